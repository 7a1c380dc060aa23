use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CombinatoricsError {
    #[error("chunk size must be positive, got {0}")]
    InvalidChunkSize(usize),
}

/// Constraint violations detected while assembling a [crate::optimizer::build::Build].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error("too many abilities: {count} > {max}")]
    TooManyAbilities { count: usize, max: usize },

    #[error("too many modifiers: {count} > {max}")]
    TooManyModifiers { count: usize, max: usize },

    #[error("too many category lines: {count} > {max}")]
    TooManyCategoryLines { count: usize, max: usize },

    #[error("too many weapon lines: {count} > {max}")]
    TooManyWeaponLines { count: usize, max: usize },

    #[error("more than one morph of '{0}' selected")]
    DuplicateMorph(String),
}

#[derive(Debug, Error)]
pub enum DataError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("unknown ability: {0}")]
    UnknownAbility(String),

    #[error("ability name '{name}' is ambiguous; it appears in lines {lines:?}")]
    AmbiguousAbility { name: String, lines: Vec<String> },

    #[error("unknown modifier: {0}")]
    UnknownModifier(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid value '{value}' for {key}")]
    InvalidEnv { key: &'static str, value: String },
}

#[derive(Debug, Error)]
pub enum OptimizerError {
    #[error(transparent)]
    Combinatorics(#[from] CombinatoricsError),

    #[error(transparent)]
    Build(#[from] BuildError),

    #[error(transparent)]
    Data(#[from] DataError),

    #[error("{count} forced modifiers exceed the limit of {max}")]
    TooManyForcedModifiers { count: usize, max: usize },

    #[error("thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("worker {worker_id} failed: {message}")]
    WorkerFailed { worker_id: usize, message: String },
}

pub type Result<T> = std::result::Result<T, OptimizerError>;
