use serde_json::Value;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HotelError {
    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    #[error("Provider error: {0}")]
    Provider(ProviderError),

    #[error("Malformed response: {message}")]
    MalformedResponse { message: String },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Missing configuration field: {field}")]
    MissingConfig { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration parse error: {message}")]
    ConfigParse { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Request,
    Provider,
    Response,
    Transport,
    Config,
}

impl HotelError {
    pub fn invalid_request<S: Into<String>>(message: S) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    pub fn malformed<S: Into<String>>(message: S) -> Self {
        Self::MalformedResponse {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            HotelError::InvalidRequest { .. } => ErrorCategory::Request,
            HotelError::Provider(_) => ErrorCategory::Provider,
            HotelError::MalformedResponse { .. } | HotelError::Json(_) => ErrorCategory::Response,
            HotelError::Http(_) | HotelError::UnexpectedStatus { .. } => ErrorCategory::Transport,
            HotelError::Url(_)
            | HotelError::Io(_)
            | HotelError::MissingConfig { .. }
            | HotelError::InvalidConfigValue { .. }
            | HotelError::ConfigParse { .. } => ErrorCategory::Config,
        }
    }

    /// Only transport failures are worth retrying; the adapter itself never does.
    pub fn is_retryable(&self) -> bool {
        match self {
            HotelError::Http(e) => e.is_timeout() || e.is_connect(),
            HotelError::UnexpectedStatus { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

impl From<ProviderError> for HotelError {
    fn from(err: ProviderError) -> Self {
        HotelError::Provider(err)
    }
}

/// Error object the provider embeds in an otherwise successful response (`EanWsErrors`).
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderError {
    pub category: Option<String>,
    pub handling: Option<String>,
    pub presentation_message: Option<String>,
    pub verbose_message: Option<String>,
    pub raw: Value,
}

impl ProviderError {
    pub fn from_payload(raw: Value) -> Self {
        // EanWsErrors is either the error object itself or wraps it under EanError
        let detail = raw.get("EanError").unwrap_or(&raw);
        let detail = match detail {
            Value::Array(items) => items.first().unwrap_or(detail),
            other => other,
        };
        let text = |key: &str| detail.get(key).and_then(Value::as_str).map(str::to_string);

        Self {
            category: text("category"),
            handling: text("handling"),
            presentation_message: text("presentationMessage"),
            verbose_message: text("verboseMessage"),
            raw,
        }
    }
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = self
            .presentation_message
            .as_deref()
            .or(self.verbose_message.as_deref())
            .unwrap_or("unspecified provider error");
        match &self.category {
            Some(category) => write!(f, "{} ({})", message, category),
            None => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for ProviderError {}

pub type Result<T> = std::result::Result<T, HotelError>;
