use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    /// 401 from the server. On login this means bad credentials; on any
    /// other endpoint it means the stored token is no longer accepted.
    #[error("unauthorized - token rejected or credentials invalid")]
    Unauthorized,

    /// The server answered 2xx but the envelope carried `success: false`
    /// (or no data). The message, when present, comes verbatim from the
    /// envelope.
    #[error("request rejected: {}", .message.as_deref().unwrap_or("no reason given"))]
    Rejected { message: Option<String> },

    /// Any other non-2xx status. The message is recovered from the error
    /// body's envelope when it parses.
    #[error("server returned status {status}")]
    Status { status: u16, message: Option<String> },

    /// Transport failure: the request never produced a response.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A 2xx body that does not match the response envelope.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl ApiError {
    /// Classify a non-2xx status, carrying along whatever message the
    /// error body's envelope provided.
    pub fn from_status(status: u16, message: Option<String>) -> Self {
        match status {
            401 => ApiError::Unauthorized,
            _ => ApiError::Status { status, message },
        }
    }

    /// True when the request never reached the server (as opposed to the
    /// server answering with an error). This is what the offline fallback
    /// keys on.
    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Network(_))
    }
}
