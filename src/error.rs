use serde::Serialize;

/// Failure classes surfaced to callers. Callers branch on the class, never
/// on message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum_macros::Display)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ErrorKind {
    Validation,
    NotFound,
    RateLimited,
    Timeout,
    Network,
    ServerError,
    MalformedResponse,
    Processing,
    Config,
}

/// All errors that can occur while building a season summary.
#[derive(thiserror::Error, Debug)]
pub enum FplError {
    /// The manager id was not a number.
    #[error("invalid manager id {input:?}")]
    InvalidManagerId { input: String },

    /// The manager id was numeric but outside the accepted range.
    #[error("manager id {input} out of range 1..={max}")]
    ManagerIdOutOfRange { input: String, max: u64 },

    /// Upstream returned 404 for the resource.
    #[error("resource not found at {url}")]
    NotFound { url: String },

    /// Upstream answered 429.
    #[error("rate limited by upstream at {url}")]
    UpstreamRateLimited { url: String },

    /// Our own limiter rejected the caller.
    #[error("rate limit exceeded for {client}")]
    RateLimited { client: String, retry_after: u64 },

    /// Server returned a non-success HTTP status code.
    #[error("unexpected status {status} for {url}")]
    UnexpectedStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    /// The request did not complete within the client timeout.
    #[error("request to {url} timed out")]
    Timeout { url: String },

    /// HTTP request failed (network, DNS, TLS, etc.).
    #[error("http request failed for {url}: {source}")]
    Http {
        url: String,
        source: reqwest::Error,
    },

    /// Failed to read the response body as text.
    #[error("failed to read response body from {url}: {source}")]
    ResponseBody {
        url: String,
        source: reqwest::Error,
    },

    /// The body was empty, HTML, or JSON of an unexpected shape.
    #[error("malformed response from {url}: {reason}")]
    MalformedResponse { url: String, reason: String },

    /// The summary stayed inconsistent after sanitization.
    #[error("summary failed validation: {}", .errors.join("; "))]
    Processing { errors: Vec<String> },

    /// Configuration could not be loaded.
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl FplError {
    /// The taxonomy class of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            FplError::InvalidManagerId { .. } | FplError::ManagerIdOutOfRange { .. } => {
                ErrorKind::Validation
            }
            FplError::NotFound { .. } => ErrorKind::NotFound,
            FplError::UpstreamRateLimited { .. } | FplError::RateLimited { .. } => {
                ErrorKind::RateLimited
            }
            FplError::Timeout { .. } => ErrorKind::Timeout,
            FplError::Http { .. } | FplError::ResponseBody { .. } => ErrorKind::Network,
            FplError::UnexpectedStatus { .. } => ErrorKind::ServerError,
            FplError::MalformedResponse { .. } => ErrorKind::MalformedResponse,
            FplError::Processing { .. } => ErrorKind::Processing,
            FplError::Config(_) => ErrorKind::Config,
        }
    }

    /// Whether another attempt could plausibly succeed. A 404 is definitive.
    pub fn is_retryable(&self) -> bool {
        match self {
            FplError::UnexpectedStatus { status, .. } => status.is_server_error(),
            other => matches!(
                other.kind(),
                ErrorKind::RateLimited
                    | ErrorKind::Timeout
                    | ErrorKind::Network
                    | ErrorKind::MalformedResponse
            ),
        }
    }

    /// Short message safe to show to end users.
    pub fn user_message(&self) -> String {
        match self {
            FplError::InvalidManagerId { .. } => {
                "Invalid manager ID. Please enter a numeric FPL manager ID.".to_string()
            }
            FplError::ManagerIdOutOfRange { max, .. } => {
                format!("Manager ID out of range. FPL manager IDs are between 1 and {max}.")
            }
            FplError::NotFound { .. } => {
                "Manager not found. Please check the ID and try again.".to_string()
            }
            FplError::RateLimited { .. } => {
                "Too many requests. Please wait a moment and try again.".to_string()
            }
            FplError::UpstreamRateLimited { .. } => {
                "The FPL API is rate limiting requests. Please try again shortly.".to_string()
            }
            FplError::Timeout { .. } => {
                "The FPL API took too long to respond. Please try again.".to_string()
            }
            FplError::Http { .. } | FplError::ResponseBody { .. } => {
                "Could not reach the FPL API. Please try again later.".to_string()
            }
            FplError::UnexpectedStatus { .. } | FplError::MalformedResponse { .. } => {
                "The FPL API is currently unavailable. Please try again later.".to_string()
            }
            FplError::Processing { .. } => {
                "We could not build a consistent summary for this manager.".to_string()
            }
            FplError::Config(_) => "Service misconfigured.".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FplError>;
