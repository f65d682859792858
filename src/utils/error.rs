use thiserror::Error;

#[derive(Error, Debug)]
pub enum DiagramError {
    #[error("Failed to load topology from '{path}': {message}")]
    ConfigLoadError { path: String, message: String },

    #[error("Failed to open result dataset '{path}': {message}")]
    DatasetOpenError { path: String, message: String },

    #[error("Lookup failed: {message}")]
    LookupError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid configuration value for '{field}' ('{value}'): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Render error: {message}")]
    RenderError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Data,
    Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl DiagramError {
    pub fn config_load(path: impl Into<String>, message: impl Into<String>) -> Self {
        DiagramError::ConfigLoadError {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn dataset_open(path: impl Into<String>, message: impl Into<String>) -> Self {
        DiagramError::DatasetOpenError {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn lookup(message: impl Into<String>) -> Self {
        DiagramError::LookupError {
            message: message.into(),
        }
    }

    pub fn render(message: impl Into<String>) -> Self {
        DiagramError::RenderError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            DiagramError::ConfigError { .. }
            | DiagramError::InvalidConfigValueError { .. }
            | DiagramError::MissingConfigError { .. }
            | DiagramError::ValidationError { .. } => ErrorCategory::Configuration,
            DiagramError::ConfigLoadError { .. } | DiagramError::DatasetOpenError { .. } => {
                ErrorCategory::Input
            }
            DiagramError::LookupError { .. } => ErrorCategory::Data,
            DiagramError::RenderError { .. }
            | DiagramError::IoError(_)
            | DiagramError::SerializationError(_) => ErrorCategory::Output,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration => ErrorSeverity::Medium,
            ErrorCategory::Input | ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::Output => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            DiagramError::ConfigLoadError { path, .. } => {
                format!("Could not read the topology file '{}'", path)
            }
            DiagramError::DatasetOpenError { path, .. } => {
                format!("Could not open the result dataset '{}'", path)
            }
            DiagramError::LookupError { message } => {
                format!("A girder references data that is not available: {}", message)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            DiagramError::ConfigLoadError { .. } => {
                "Check that the nodes/elements files exist and hold a single JSON object mapping ids to tuples"
            }
            DiagramError::DatasetOpenError { .. } => {
                "Export the dataset with xarray (Dataset.to_dict() as JSON, or the forces variable as a long CSV table)"
            }
            DiagramError::LookupError { .. } => {
                "Make sure every girder element exists in the topology and has Mz_i/Mz_j/Vy_i/Vy_j values in the dataset"
            }
            DiagramError::ConfigError { .. }
            | DiagramError::InvalidConfigValueError { .. }
            | DiagramError::MissingConfigError { .. }
            | DiagramError::ValidationError { .. } => {
                "Review the command line flags or the TOML configuration file"
            }
            DiagramError::RenderError { .. } | DiagramError::SerializationError(_) => {
                "This is likely a bug; rerun with --verbose and report the log"
            }
            DiagramError::IoError(_) => "Check that the output directory is writable",
        }
    }
}

pub type Result<T> = std::result::Result<T, DiagramError>;
