use thiserror::Error;

/// Failure taxonomy for repository operations.
///
/// Every variant is an expected condition and comes back as a value; the
/// repository never panics for these. Storage corruption is not here at
/// all - the store swallows it and reads the record as absent.
#[derive(Error, Debug)]
pub enum AuthError {
    /// Input rejected before any network call was made.
    #[error("{0}")]
    Validation(&'static str),

    /// 401 on login: the credentials are wrong. Nothing is cleared because
    /// no prior session was involved.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// 401 on profile fetch: the stored token is no longer accepted. The
    /// local session has already been wiped; the caller must sign in again.
    #[error("session expired, please sign in again")]
    SessionExpired,

    /// The server answered with an error. The message is the server's own
    /// when it sent one, otherwise a fixed fallback.
    #[error("{message}")]
    Server {
        status: Option<u16>,
        message: String,
    },

    /// The server never answered and no cached session can stand in.
    #[error("could not reach the server: {0}")]
    Connectivity(String),

    /// The server never answered during login, but a token and a cached
    /// profile are stored - the caller may continue offline via
    /// [`cached_user`](crate::SessionRepository::cached_user).
    #[error("no connection - cached session available for offline use")]
    OfflineFallback,
}

impl AuthError {
    /// Server-side failure with the server's message when available.
    pub(crate) fn server(status: Option<u16>, message: Option<String>) -> Self {
        let message = message.unwrap_or_else(|| match status {
            Some(code) => format!("server error (status {})", code),
            None => "request rejected by the server".to_string(),
        });
        AuthError::Server { status, message }
    }

    pub fn is_offline_fallback(&self) -> bool {
        matches!(self, AuthError::OfflineFallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_error_prefers_server_message() {
        let err = AuthError::server(Some(500), Some("db down".to_string()));
        assert_eq!(err.to_string(), "db down");
    }

    #[test]
    fn server_error_falls_back_to_status() {
        let err = AuthError::server(Some(502), None);
        assert_eq!(err.to_string(), "server error (status 502)");

        let err = AuthError::server(None, None);
        assert_eq!(err.to_string(), "request rejected by the server");
    }
}
