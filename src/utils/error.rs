use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecapError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Upstream API error: status {status} from {url}")]
    TransportError { status: u16, url: String },

    #[error("Language model unavailable at {host}: {message}")]
    ModelUnavailable { host: String, message: String },

    #[error("Unreadable barcode '{value}': {reason}")]
    InvalidBarcode { value: String, reason: String },

    #[error("Missing input: {field}")]
    MissingInput { field: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl RecapError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            RecapError::MissingInput { .. } | RecapError::InvalidBarcode { .. } => {
                ErrorSeverity::Low
            }
            RecapError::HttpError(_)
            | RecapError::TransportError { .. }
            | RecapError::ModelUnavailable { .. } => ErrorSeverity::Medium,
            RecapError::SerializationError(_) => ErrorSeverity::High,
            RecapError::IoError(_)
            | RecapError::ConfigError { .. }
            | RecapError::MissingConfigError { .. }
            | RecapError::InvalidConfigValueError { .. }
            | RecapError::ConfigValidationError { .. } => ErrorSeverity::Critical,
        }
    }

    /// HTTP status for this error on the recap endpoint.
    pub fn status_code(&self) -> u16 {
        match self {
            RecapError::MissingInput { .. } | RecapError::InvalidBarcode { .. } => 400,
            RecapError::HttpError(_) | RecapError::TransportError { .. } => 502,
            RecapError::ModelUnavailable { .. } => 503,
            _ => 500,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            RecapError::TransportError { status: 401, .. } => {
                "The Marvel API rejected the request credentials.".to_string()
            }
            RecapError::TransportError { status, .. } => {
                format!("The Marvel API returned an error (status {}).", status)
            }
            RecapError::HttpError(_) => "Could not reach the Marvel API.".to_string(),
            RecapError::ModelUnavailable { .. } => {
                "Failed to connect to Ollama. Make sure it's running.".to_string()
            }
            RecapError::InvalidBarcode { .. } => {
                "Could not read the issue barcode from the image.".to_string()
            }
            RecapError::MissingInput { field } if field == "upc" => "No UPC provided".to_string(),
            RecapError::MissingInput { field } => format!("No {} provided", field),
            RecapError::SerializationError(_) => {
                "Received a response that could not be understood.".to_string()
            }
            RecapError::IoError(e) => format!("File system error: {}", e),
            RecapError::ConfigError { .. }
            | RecapError::MissingConfigError { .. }
            | RecapError::InvalidConfigValueError { .. }
            | RecapError::ConfigValidationError { .. } => format!("Invalid configuration: {}", self),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            RecapError::TransportError { status: 401, .. }
            | RecapError::TransportError { status: 409, .. } => {
                "Check MARVEL_PUBLIC and MARVEL_PRIVATE"
            }
            RecapError::TransportError { .. } | RecapError::HttpError(_) => {
                "Check network connectivity and try again later"
            }
            RecapError::ModelUnavailable { .. } => {
                "Start the Ollama server and check OLLAMA_LOCAL_HOST"
            }
            RecapError::InvalidBarcode { .. } => "Retake the photo with the barcode in focus",
            RecapError::MissingInput { .. } => "Provide the code printed under the barcode",
            RecapError::SerializationError(_) => "Report the response that failed to parse",
            RecapError::IoError(_) => "Check file paths and permissions",
            RecapError::ConfigError { .. }
            | RecapError::MissingConfigError { .. }
            | RecapError::InvalidConfigValueError { .. }
            | RecapError::ConfigValidationError { .. } => {
                "Fix the configuration file or environment variables"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, RecapError>;
