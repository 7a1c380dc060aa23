pub mod batch;
pub mod cancel;
pub mod pool;
pub mod progress;
pub mod worker;

pub use batch::auto_batch_size;
pub use cancel::CancellationToken;
pub use pool::WorkerPool;
pub use progress::{LogProgress, NoProgress, ProgressEvent, ProgressReporter};
pub use worker::{evaluate_batch, WorkerRequest, WorkerResponse};
