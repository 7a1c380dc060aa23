use serde::Serialize;
use tracing_subscriber::EnvFilter;

use crate::config::Settings;
use crate::data::loader::load_game_data;
use crate::data::Mechanic;
use crate::data::validate::{validate_game_data, ValidationSeverity};
use crate::optimizer::build::BuildSummary;
use crate::optimizer::{Optimizer, SearchOptions};
use crate::parallel::WorkerPool;

const USAGE: &str = "usage: skillforge <optimize|count|score|validate> [options]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Optimize,
    Count,
    Score,
    Validate,
}

pub fn parse_command(args: &[String]) -> Option<Command> {
    match args.get(1).map(String::as_str) {
        Some("optimize") => Some(Command::Optimize),
        Some("count") => Some(Command::Count),
        Some("score") => Some(Command::Score),
        Some("validate") => Some(Command::Validate),
        _ => None,
    }
}

/// Flags shared by every subcommand; each handler reads the ones it needs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOptions {
    pub data: Option<String>,
    pub category: Option<String>,
    pub forced_modifiers: Vec<String>,
    pub abilities: Vec<String>,
    pub modifiers: Vec<String>,
    pub workers: Option<usize>,
    pub parallel: bool,
    pub verbose: bool,
    pub positional: Vec<String>,
}

pub fn parse_options(args: &[String]) -> Result<CliOptions, String> {
    let mut options = CliOptions::default();
    let mut iter = args.iter().skip(2);
    while let Some(arg) = iter.next() {
        let mut value = |flag: &str| {
            iter.next()
                .cloned()
                .ok_or_else(|| format!("missing value for {flag}"))
        };
        match arg.as_str() {
            "--data" => options.data = Some(value("--data")?),
            "--category" => options.category = Some(value("--category")?),
            "--force-modifier" => options.forced_modifiers.push(value("--force-modifier")?),
            "--ability" => options.abilities.push(value("--ability")?),
            "--modifier" => options.modifiers.push(value("--modifier")?),
            "--workers" => {
                let raw = value("--workers")?;
                let workers = raw
                    .parse::<usize>()
                    .map_err(|_| format!("invalid --workers '{raw}'"))?;
                options.workers = Some(workers);
            }
            "--parallel" => options.parallel = true,
            "--verbose" => options.verbose = true,
            flag if flag.starts_with("--") => return Err(format!("unknown option {flag}")),
            _ => options.positional.push(arg.clone()),
        }
    }
    Ok(options)
}

/// Install the stderr log subscriber. `RUST_LOG` wins over the defaults.
pub fn init_tracing(verbose: bool) {
    let default = if verbose { "skillforge=debug" } else { "skillforge=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

pub fn run_with_args(args: &[String]) -> i32 {
    let Some(command) = parse_command(args) else {
        eprintln!("{USAGE}");
        return 2;
    };
    let options = match parse_options(args) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("{message}");
            eprintln!("{USAGE}");
            return 2;
        }
    };
    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("failed to load settings: {err}");
            return 1;
        }
    };

    match command {
        Command::Optimize => handle_optimize(&options, &settings),
        Command::Count => handle_count(&options, &settings),
        Command::Score => handle_score(&options, &settings),
        Command::Validate => handle_validate(&options, &settings),
    }
}

fn load_optimizer(options: &CliOptions, settings: &Settings) -> Result<Optimizer, i32> {
    let path = options.data.as_deref().unwrap_or(&settings.data_path);
    match load_game_data(path) {
        Ok(data) => Ok(Optimizer::from_settings(data, settings)),
        Err(err) => {
            eprintln!("failed to load catalog '{path}': {err}");
            Err(1)
        }
    }
}

fn search_options(options: &CliOptions, settings: &Settings) -> SearchOptions {
    SearchOptions {
        required_category: options.category.clone(),
        verbose: options.verbose,
        forced_modifiers: options.forced_modifiers.clone(),
        progress_interval: if options.verbose { settings.progress_interval } else { 0 },
    }
}

fn print_json<T: Serialize>(value: &T, what: &str) -> i32 {
    match serde_json::to_string_pretty(value) {
        Ok(payload) => {
            println!("{payload}");
            0
        }
        Err(err) => {
            eprintln!("failed to serialize {what}: {err}");
            1
        }
    }
}

fn handle_optimize(options: &CliOptions, settings: &Settings) -> i32 {
    let optimizer = match load_optimizer(options, settings) {
        Ok(optimizer) => optimizer,
        Err(code) => return code,
    };
    let search = search_options(options, settings);
    let result = if options.parallel {
        let pool = WorkerPool::with_workers(options.workers.unwrap_or(settings.workers));
        optimizer.find_optimal_build_parallel(&search, &pool)
    } else {
        optimizer.find_optimal_build(&search)
    };

    match result {
        Ok(best) => print_json(&best.map(|build| build.summary()), "build"),
        Err(err) => {
            eprintln!("optimization failed: {err}");
            1
        }
    }
}

#[derive(Debug, Serialize)]
struct CountReport {
    /// Decimal string; the count can exceed what JSON numbers represent exactly.
    candidates: String,
    modifier_sets: String,
}

fn handle_count(options: &CliOptions, settings: &Settings) -> i32 {
    let optimizer = match load_optimizer(options, settings) {
        Ok(optimizer) => optimizer,
        Err(code) => return code,
    };
    let search = search_options(options, settings);
    let report = optimizer.modifier_plan(&search).and_then(|plan| {
        let modifier_sets =
            crate::combinatorics::combination_count(plan.free.len(), plan.open_slots);
        let candidates = optimizer.estimate_search_space(&search)?;
        Ok(CountReport {
            candidates: candidates.to_string(),
            modifier_sets: modifier_sets.to_string(),
        })
    });

    match report {
        Ok(report) => print_json(&report, "count"),
        Err(err) => {
            eprintln!("count failed: {err}");
            1
        }
    }
}

#[derive(Debug, Serialize)]
struct AbilityScore {
    name: String,
    score: f64,
    mechanic: Mechanic,
    duration: f64,
}

#[derive(Debug, Serialize)]
struct ScoreReport {
    #[serde(flatten)]
    summary: BuildSummary,
    ability_scores: Vec<AbilityScore>,
    passive_uplift: f64,
}

fn handle_score(options: &CliOptions, settings: &Settings) -> i32 {
    if options.abilities.is_empty() {
        eprintln!("usage: skillforge score --ability NAME [--ability NAME]... [--modifier NAME]...");
        return 2;
    }
    let optimizer = match load_optimizer(options, settings) {
        Ok(optimizer) => optimizer,
        Err(code) => return code,
    };

    match optimizer.score_build(&options.abilities, &options.modifiers) {
        Ok(build) => print_json(
            &ScoreReport {
                summary: build.summary(),
                ability_scores: build
                    .abilities()
                    .iter()
                    .zip(build.ability_scores())
                    .map(|(ability, &score)| AbilityScore {
                        name: ability.name.clone(),
                        score,
                        mechanic: ability.mechanic(),
                        duration: ability.duration(),
                    })
                    .collect(),
                passive_uplift: build.passive_uplift(),
            },
            "score",
        ),
        Err(err) => {
            eprintln!("scoring failed: {err}");
            1
        }
    }
}

fn handle_validate(options: &CliOptions, settings: &Settings) -> i32 {
    let path = options
        .positional
        .first()
        .or(options.data.as_ref())
        .map(String::as_str)
        .unwrap_or(&settings.data_path);

    let data = match load_game_data(path) {
        Ok(data) => data,
        Err(err) => {
            eprintln!("validation failed: {err}");
            return 1;
        }
    };
    let report = validate_game_data(&data, &settings.scoring);
    for diagnostic in &report.diagnostics {
        eprintln!("- {diagnostic}");
    }

    if report.has_errors() {
        eprintln!(
            "validation failed: {} error(s)",
            report.count(ValidationSeverity::Error)
        );
        1
    } else {
        println!(
            "validation passed: {path} ({} warning(s))",
            report.count(ValidationSeverity::Warning)
        );
        0
    }
}
