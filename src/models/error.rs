use thiserror::Error;

/// Errors raised by the matching core
///
/// Data-quality problems never surface here; they degrade to lower-confidence
/// results instead. Only caller misuse does.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}
