use thiserror::Error;

/// Crate-wide error surface. Fetchers never propagate this outward (they
/// translate failures into a `FetchResult`, see `lakescraper-fetcher`); it
/// surfaces from storage, config, and template lookups.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("network error: {0}")]
    Network(String),

    #[error("timeout after {0}s")]
    Timeout(u64),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),

    #[error("config error: {0}")]
    Config(String),

    #[error("template not found: {0}")]
    TemplateNotFound(String),

    #[error("illegal job transition: {0}")]
    IllegalTransition(String),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}
