use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SortError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration error at {position}: {message}")]
    Configuration { position: String, message: String },

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Hash mismatch for {path}: expected {expected}, got {actual}")]
    HashMismatch {
        path: PathBuf,
        expected: String,
        actual: String,
    },

    #[error("Placement failed for {path}: {source}")]
    Placement {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SortError {
    pub fn configuration(position: impl Into<String>, message: impl Into<String>) -> Self {
        SortError::Configuration {
            position: position.into(),
            message: message.into(),
        }
    }

    pub fn placement(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SortError::Placement {
            path: path.into(),
            source,
        }
    }
}

impl From<serde_yaml::Error> for SortError {
    fn from(err: serde_yaml::Error) -> Self {
        SortError::Config(format!("Failed to parse YAML: {}", err))
    }
}

impl From<toml::de::Error> for SortError {
    fn from(err: toml::de::Error) -> Self {
        SortError::Config(format!("Failed to parse TOML: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, SortError>;
