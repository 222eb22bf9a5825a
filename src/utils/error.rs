use thiserror::Error;

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Invalid {field}: {message}")]
    InvalidInput { field: String, message: String },

    #[error("{message}")]
    NotFound { message: String },

    #[error("Upstream provider error: {message}")]
    Upstream { message: String },

    #[error("Upstream request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Upstream request timed out: {message}")]
    Timeout { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid configuration value for {field}: '{value}' ({reason})")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

/// Coarse classification used for logging and HTTP status mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidInput,
    NotFound,
    Upstream,
    Timeout,
    Config,
    Internal,
}

impl GatewayError {
    pub fn invalid_input(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        Self::Upstream {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput { .. } => ErrorKind::InvalidInput,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Upstream { .. } | Self::Serialization(_) => ErrorKind::Upstream,
            Self::Http(_) => ErrorKind::Upstream,
            Self::Timeout { .. } => ErrorKind::Timeout,
            Self::Config { .. } | Self::InvalidConfigValue { .. } => ErrorKind::Config,
            Self::Io(_) | Self::Internal { .. } => ErrorKind::Internal,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.kind() {
            ErrorKind::InvalidInput => format!("Invalid request: {}", self),
            ErrorKind::NotFound => format!("No data: {}", self),
            ErrorKind::Upstream => "The motorsport data provider returned an error".to_string(),
            ErrorKind::Timeout => "The motorsport data provider did not answer in time".to_string(),
            ErrorKind::Config => format!("Configuration problem: {}", self),
            ErrorKind::Internal => "Internal server error".to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.kind() {
            ErrorKind::InvalidInput => "Check the year, round and driver codes in the request path",
            ErrorKind::NotFound => "Use /races/{year} and /drivers/{year}/{round} to list valid values",
            ErrorKind::Upstream => "Check provider.base_url and the upstream service status",
            ErrorKind::Timeout => "Retry later or raise provider.request_timeout_seconds",
            ErrorKind::Config => "Fix the configuration file or command line flags",
            ErrorKind::Internal => "Check the server logs for details",
        }
    }
}

pub type Result<T> = std::result::Result<T, GatewayError>;
