use crate::error::*;
use tracing::{error, info, warn};

pub trait ErrorExt {
    fn log_error(&self) -> &Self;
    fn log_warn(&self) -> &Self;
    fn user_friendly_message(&self) -> String;
    fn error_code(&self) -> String;
}

impl ErrorExt for CoreError {
    fn log_error(&self) -> &Self {
        error!("CoreError: {}", self);
        match self {
            CoreError::Artifact(e) => {
                error!("Artifact error details: {:?}", e);
            }
            CoreError::Read(e) => {
                error!("Read error details: {:?}", e);
            }
            CoreError::Config(e) => {
                error!("Configuration error details: {:?}", e);
            }
            CoreError::Mining(e) => {
                error!("Mining error details: {:?}", e);
            }
            _ => {}
        }
        self
    }

    fn log_warn(&self) -> &Self {
        warn!("CoreError (warning): {}", self);
        self
    }

    fn user_friendly_message(&self) -> String {
        match self {
            CoreError::Artifact(e) => e.user_friendly_message(),
            CoreError::Read(e) => e.user_friendly_message(),
            CoreError::Config(e) => e.user_friendly_message(),
            CoreError::Mining(e) => e.user_friendly_message(),
            CoreError::Io(e) => format!("File system error: {}", e),
            CoreError::Serialization(e) => format!("Could not write JSON output: {}", e),
            CoreError::InvalidInput { message } => format!("Invalid input: {}", message),
            CoreError::NotFound { resource } => format!("Could not find: {}", resource),
        }
    }

    fn error_code(&self) -> String {
        match self {
            CoreError::Artifact(_) => "ARTIFACT".to_string(),
            CoreError::Read(_) => "READ".to_string(),
            CoreError::Config(_) => "CONFIG".to_string(),
            CoreError::Mining(_) => "MINING".to_string(),
            CoreError::Io(_) => "IO".to_string(),
            CoreError::Serialization(_) => "SERIALIZATION".to_string(),
            CoreError::InvalidInput { .. } => "INVALID_INPUT".to_string(),
            CoreError::NotFound { .. } => "NOT_FOUND".to_string(),
        }
    }
}

impl ErrorExt for ArtifactError {
    fn log_error(&self) -> &Self {
        error!("ArtifactError: {}", self);
        self
    }

    fn log_warn(&self) -> &Self {
        warn!("ArtifactError (warning): {}", self);
        self
    }

    // Validation messages are already written for the user.
    fn user_friendly_message(&self) -> String {
        self.to_string()
    }

    fn error_code(&self) -> String {
        match self {
            ArtifactError::Syntax { .. } => "ARTIFACT_SYNTAX".to_string(),
            ArtifactError::NotAnObject { .. } => "ARTIFACT_NOT_AN_OBJECT".to_string(),
            ArtifactError::Schema { .. } => "ARTIFACT_SCHEMA".to_string(),
        }
    }
}

impl ErrorExt for ReadError {
    fn log_error(&self) -> &Self {
        error!("ReadError: {}", self);
        self
    }

    fn log_warn(&self) -> &Self {
        warn!("ReadError (warning): {}", self);
        self
    }

    fn user_friendly_message(&self) -> String {
        match self {
            ReadError::Io { path, .. } => {
                format!("Could not read {}. Check that it exists and is readable.", path)
            }
            ReadError::NotUtf8 { path } => format!("{} is not a UTF-8 text file.", path),
        }
    }

    fn error_code(&self) -> String {
        match self {
            ReadError::Io { .. } => "READ_IO".to_string(),
            ReadError::NotUtf8 { .. } => "READ_NOT_UTF8".to_string(),
        }
    }
}

impl ErrorExt for ConfigError {
    fn log_error(&self) -> &Self {
        error!("ConfigError: {}", self);
        self
    }

    fn log_warn(&self) -> &Self {
        warn!("ConfigError (warning): {}", self);
        self
    }

    fn user_friendly_message(&self) -> String {
        match self {
            ConfigError::FileNotFound { path } => {
                format!("Settings file {} does not exist.", path)
            }
            ConfigError::InvalidValue { field, value } => {
                format!("Setting {} cannot be {}.", field, value)
            }
            ConfigError::ValidationFailed { reason } => format!("Settings rejected: {}.", reason),
            ConfigError::PermissionDenied { path } => {
                format!("The settings file {} is not readable.", path)
            }
            ConfigError::Parse(e) => format!("The settings file is not valid TOML: {}", e.message()),
        }
    }

    fn error_code(&self) -> String {
        match self {
            ConfigError::FileNotFound { .. } => "CONFIG_FILE_NOT_FOUND".to_string(),
            ConfigError::InvalidValue { .. } => "CONFIG_INVALID_VALUE".to_string(),
            ConfigError::ValidationFailed { .. } => "CONFIG_VALIDATION_FAILED".to_string(),
            ConfigError::PermissionDenied { .. } => "CONFIG_PERMISSION_DENIED".to_string(),
            ConfigError::Parse(_) => "CONFIG_PARSE_ERROR".to_string(),
        }
    }
}

impl ErrorExt for MiningError {
    fn log_error(&self) -> &Self {
        error!("MiningError: {}", self);
        self
    }

    fn log_warn(&self) -> &Self {
        warn!("MiningError (warning): {}", self);
        self
    }

    fn user_friendly_message(&self) -> String {
        match self {
            MiningError::InvalidSupport { .. } => "Minimum support must be at least 1.".to_string(),
            MiningError::MissingFile { file, directory } => {
                format!("No {} file found in the directory {}", file, directory)
            }
            _ => self.to_string(),
        }
    }

    fn error_code(&self) -> String {
        match self {
            MiningError::InvalidSupport { .. } => "MINING_INVALID_SUPPORT".to_string(),
            MiningError::DuplicateToken { .. } => "MINING_DUPLICATE_TOKEN".to_string(),
            MiningError::DuplicateTokenId { .. } => "MINING_DUPLICATE_TOKEN_ID".to_string(),
            MiningError::UnknownToken { .. } => "MINING_UNKNOWN_TOKEN".to_string(),
            MiningError::MissingFile { .. } => "MINING_MISSING_FILE".to_string(),
        }
    }
}

pub struct ErrorReporter {
    report_errors: bool,
    report_warnings: bool,
}

impl ErrorReporter {
    pub fn new() -> Self {
        Self {
            report_errors: true,
            report_warnings: true,
        }
    }

    pub fn with_error_reporting(mut self, enabled: bool) -> Self {
        self.report_errors = enabled;
        self
    }

    pub fn with_warning_reporting(mut self, enabled: bool) -> Self {
        self.report_warnings = enabled;
        self
    }

    pub fn report_error(&self, error: &CoreError) {
        if self.report_errors {
            error.log_error();
            info!("Error code: {}", error.error_code());
            info!("User message: {}", error.user_friendly_message());
        }
    }

    pub fn report_warning(&self, error: &CoreError) {
        if self.report_warnings {
            error.log_warn();
        }
    }
}

impl Default for ErrorReporter {
    fn default() -> Self {
        Self::new()
    }
}
