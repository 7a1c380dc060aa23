//! Run one exhaustive search sequentially and once in parallel, then print timings and speedup.
//!
//! Usage: cargo run --release --bin benchmark_parallel_speedup [catalog-path] [workers]
//!
//! Defaults to data/catalog.yaml; run from the project root so it is found.

use std::env;
use std::process::ExitCode;
use std::time::Instant;

use skillforge::config::ScoringSettings;
use skillforge::data::loader::{load_game_data, DEFAULT_CATALOG_PATH};
use skillforge::optimizer::{Optimizer, SearchOptions};
use skillforge::parallel::{CancellationToken, NoProgress, WorkerPool};

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    let path = args.get(1).map(String::as_str).unwrap_or(DEFAULT_CATALOG_PATH);
    let workers = args
        .get(2)
        .and_then(|raw| raw.parse::<usize>().ok())
        .unwrap_or(0);

    let data = match load_game_data(path) {
        Ok(data) => data,
        Err(err) => {
            eprintln!("failed to load catalog '{path}': {err}");
            return ExitCode::FAILURE;
        }
    };
    let optimizer = Optimizer::new(data, ScoringSettings::default());
    let options = SearchOptions::default();
    let pool = WorkerPool::with_workers(workers);
    let cancel = CancellationToken::new();

    let total = optimizer.estimate_search_space(&options).unwrap_or(0);
    println!(
        "Exhaustive search: {} candidates ({} workers, catalog={})",
        total,
        pool.effective_workers(),
        path
    );
    println!();

    // Sequential
    let t0 = Instant::now();
    let sequential = match optimizer.search(&options, &NoProgress, &cancel) {
        Ok(outcome) => outcome,
        Err(err) => {
            eprintln!("sequential search failed: {err}");
            return ExitCode::FAILURE;
        }
    };
    let elapsed_seq = t0.elapsed();
    let seq_ms = elapsed_seq.as_secs_f64() * 1000.0;
    println!(
        "Sequential:  {:.2} ms  ({:.1} builds/s)",
        seq_ms,
        sequential.evaluated as f64 / elapsed_seq.as_secs_f64()
    );

    // Parallel
    let t0 = Instant::now();
    let parallel = match optimizer.search_parallel(&options, &pool, &NoProgress, &cancel) {
        Ok(outcome) => outcome,
        Err(err) => {
            eprintln!("parallel search failed: {err}");
            return ExitCode::FAILURE;
        }
    };
    let elapsed_par = t0.elapsed();
    let par_ms = elapsed_par.as_secs_f64() * 1000.0;
    println!(
        "Parallel:    {:.2} ms  ({:.1} builds/s)",
        par_ms,
        parallel.evaluated as f64 / elapsed_par.as_secs_f64()
    );

    println!();
    println!("Speedup:     {:.2}x faster (parallel vs sequential)", seq_ms / par_ms);

    let same_count = sequential.evaluated == parallel.evaluated;
    let same_best = sequential.best.map(|b| b.summary()) == parallel.best.map(|b| b.summary());
    if same_count && same_best {
        println!("(Results match sequential vs parallel)");
        ExitCode::SUCCESS
    } else {
        eprintln!("result mismatch: same_count={same_count} same_best={same_best}");
        ExitCode::FAILURE
    }
}
