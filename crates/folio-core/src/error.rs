use thiserror::Error;

/// Failures the engine can report.
///
/// Only [`EngineError::DuplicateBehavior`] and [`EngineError::Config`] ever
/// reach a caller; the rest are logged and degrade to an inactive feature.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("behavior `{0}` is already registered")]
    DuplicateBehavior(String),
    #[error("no element matches `{0}`")]
    MissingTarget(String),
    #[error("preference storage unavailable: {0}")]
    StorageUnavailable(String),
    #[error("`{0}` is not a theme (expected `light` or `dark`)")]
    InvalidTheme(String),
    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T, E = EngineError> = std::result::Result<T, E>;
