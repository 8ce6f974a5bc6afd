use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP error! status: {status} ({url})")]
    FetchStatus { url: String, status: u16 },

    #[error("Failed to parse menu page: {message}")]
    Parse { message: String },

    #[error("No scraper found for restaurant ID: {id}")]
    NotFound { id: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV output error: {0}")]
    CsvError(#[from] csv::Error),
}

/// Coarse error taxonomy used for exit codes and log fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Fetch,
    Parse,
    NotFound,
    Config,
    Io,
}

impl ScrapeError {
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Http(_) | Self::FetchStatus { .. } => ErrorKind::Fetch,
            Self::Parse { .. } => ErrorKind::Parse,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => ErrorKind::Config,
            Self::IoError(_) | Self::SerializationError(_) | Self::CsvError(_) => ErrorKind::Io,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::Http(e) if e.is_timeout() => "The restaurant website did not answer in time".to_string(),
            Self::Http(_) => "Could not reach the restaurant website".to_string(),
            Self::FetchStatus { status, .. } => {
                format!("The restaurant website answered with HTTP {}", status)
            }
            Self::Parse { .. } => "The menu page had an unexpected layout".to_string(),
            Self::NotFound { id } => format!("Unknown restaurant '{}'", id),
            Self::ConfigError { message } => format!("Configuration problem: {}", message),
            Self::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid setting '{}': {}", field, reason)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.kind() {
            ErrorKind::Fetch => "Check the network connection or try again with/without --proxy",
            ErrorKind::Parse => "The site layout may have changed; the source adapter needs updating",
            ErrorKind::NotFound => "Run with --list to see the registered restaurants",
            ErrorKind::Config => "Review the configuration file and command line flags",
            ErrorKind::Io => "Check file permissions and available disk space",
        }
    }
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
