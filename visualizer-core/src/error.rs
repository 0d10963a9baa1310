use crate::types::ArtifactKind;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Artifact error: {0}")]
    Artifact(#[from] ArtifactError),

    #[error("Read error: {0}")]
    Read(#[from] ReadError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Mining error: {0}")]
    Mining(#[from] MiningError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },
}

/// Everything that can be wrong with the contents of an artifact file.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ArtifactError {
    #[error("Could not parse {}: {details}", .artifact.file_name())]
    Syntax {
        artifact: ArtifactKind,
        details: String,
    },

    #[error("Invalid {artifact} file")]
    NotAnObject { artifact: ArtifactKind },

    #[error("Invalid {artifact} file format: {reason}")]
    Schema {
        artifact: ArtifactKind,
        reason: String,
    },
}

impl ArtifactError {
    pub fn schema(artifact: ArtifactKind, reason: impl Into<String>) -> Self {
        ArtifactError::Schema {
            artifact,
            reason: reason.into(),
        }
    }

    pub fn syntax(artifact: ArtifactKind, source: &serde_json::Error) -> Self {
        ArtifactError::Syntax {
            artifact,
            details: source.to_string(),
        }
    }

    pub fn artifact(&self) -> ArtifactKind {
        match self {
            ArtifactError::Syntax { artifact, .. }
            | ArtifactError::NotAnObject { artifact }
            | ArtifactError::Schema { artifact, .. } => *artifact,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReadError {
    #[error("Cannot read {path}: {reason}")]
    Io { path: String, reason: String },

    #[error("{path} is not valid UTF-8 text")]
    NotUtf8 { path: String },
}

impl ReadError {
    pub fn path(&self) -> &str {
        match self {
            ReadError::Io { path, .. } | ReadError::NotUtf8 { path } => path,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    #[error("Configuration validation failed: {reason}")]
    ValidationFailed { reason: String },

    #[error("Permission denied accessing config: {path}")]
    PermissionDenied { path: String },

    #[error("Configuration parsing error: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MiningError {
    #[error("Minimum support must be at least 1, got {value}")]
    InvalidSupport { value: u64 },

    #[error("Duplicate tokens found in tokens_map.json: {token}")]
    DuplicateToken { token: String },

    #[error("Duplicate tokens ids found in tokens_map.json: {id}")]
    DuplicateTokenId { id: i64 },

    #[error("Token {id} not found in tokens_map.json")]
    UnknownToken { id: i64 },

    #[error("No {file} file found in {directory}")]
    MissingFile { file: String, directory: String },
}
