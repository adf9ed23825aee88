use std::fmt;

/// Every failure the crate can report.
///
/// - `Configuration`   — invalid hyperparameters at construction or load time
/// - `ShapeMismatch`   — a sample, batch or parameter has the wrong length
/// - `InvalidArgument` — non-positive `epochs` / `n_iter`, empty datasets
/// - `Io`, `Serialization`, `Format` — persistence failures
#[derive(Debug)]
pub enum RbmError {
    Configuration(String),
    ShapeMismatch {
        context: String,
        expected: usize,
        found: usize,
    },
    InvalidArgument(String),
    Io(std::io::Error),
    Serialization(serde_json::Error),
    Format(String),
}

pub type Result<T> = std::result::Result<T, RbmError>;

impl RbmError {
    pub(crate) fn shape(context: impl Into<String>, expected: usize, found: usize) -> RbmError {
        RbmError::ShapeMismatch {
            context: context.into(),
            expected,
            found,
        }
    }
}

impl fmt::Display for RbmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RbmError::Configuration(msg) => write!(f, "invalid configuration: {}", msg),
            RbmError::ShapeMismatch { context, expected, found } => write!(
                f,
                "shape mismatch in {}: expected {}, found {}",
                context, expected, found
            ),
            RbmError::InvalidArgument(msg) => write!(f, "invalid argument: {}", msg),
            RbmError::Io(e) => write!(f, "i/o error: {}", e),
            RbmError::Serialization(e) => write!(f, "serialization error: {}", e),
            RbmError::Format(msg) => write!(f, "unsupported model format: {}", msg),
        }
    }
}

impl std::error::Error for RbmError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RbmError::Io(e) => Some(e),
            RbmError::Serialization(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for RbmError {
    fn from(value: std::io::Error) -> Self {
        RbmError::Io(value)
    }
}

impl From<serde_json::Error> for RbmError {
    fn from(value: serde_json::Error) -> Self {
        RbmError::Serialization(value)
    }
}
