//! Error types for Confetti

use thiserror::Error;

/// The main error type for Confetti operations
#[derive(Debug, Error)]
pub enum ConfettiError {
    #[error("No renderable environment available")]
    EnvironmentUnavailable,

    #[error("Surface could not provide a 2D drawing context")]
    ContextUnavailable,

    #[error("Surface {0} is not attached to the document")]
    SurfaceNotAttached(u64),

    #[error("Resize listener {0} is not registered")]
    ListenerNotFound(u64),

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("Image error: {0}")]
    ImageError(String),
}

/// Result type alias for Confetti operations
pub type Result<T> = std::result::Result<T, ConfettiError>;

impl From<toml::de::Error> for ConfettiError {
    fn from(err: toml::de::Error) -> Self {
        ConfettiError::TomlParseError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toml_error_converts() {
        let err: ConfettiError = toml::from_str::<toml::Table>("x = ").unwrap_err().into();
        assert!(matches!(err, ConfettiError::TomlParseError(_)));
    }

    #[test]
    fn display_includes_ids() {
        let err = ConfettiError::SurfaceNotAttached(7);
        assert_eq!(err.to_string(), "Surface 7 is not attached to the document");
    }
}
