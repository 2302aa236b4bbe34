use thiserror::Error;

#[derive(Error, Debug)]
pub enum WaitlistError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("HTTP {status} returned by {url}")]
    HttpStatusError { status: u16, url: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Malformed waitlist data: {message}")]
    MalformedDataError { message: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl WaitlistError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::HttpError(_) | Self::HttpStatusError { .. } => ErrorCategory::Network,
            Self::SerializationError(_) | Self::MalformedDataError { .. } => ErrorCategory::Data,
            Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorCategory::Configuration,
            Self::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 資料來源失敗時清單維持空白，畫面仍可使用
            ErrorCategory::Network | ErrorCategory::Data => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            Self::HttpError(_) => "Check the network connection and the source URL".to_string(),
            Self::HttpStatusError { status, .. } if *status == 404 => {
                "Make sure waitlistData.json is published at the source location".to_string()
            }
            Self::HttpStatusError { .. } => "Retry later or point --source at a local file".to_string(),
            Self::IoError(_) => "Check that the file exists and is readable".to_string(),
            Self::SerializationError(_) | Self::MalformedDataError { .. } => {
                "The waitlist document must be a JSON array of entries".to_string()
            }
            Self::ConfigValidationError { field, .. }
            | Self::InvalidConfigValueError { field, .. }
            | Self::MissingConfigError { field } => {
                format!("Fix the '{}' setting in the config file or on the command line", field)
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Network => format!("Could not fetch the waitlist: {}", self),
            ErrorCategory::Data => format!("The waitlist data could not be read: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, WaitlistError>;
