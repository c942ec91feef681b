//! Session orchestration: login, profile fetch, logout, and the
//! online/offline fallback policy.
//!
//! The repository is the only writer of the `SessionStore` and the only
//! caller of the `ApiClient`; everything above it gets tagged results and
//! never an exception-style surprise.

use tracing::{debug, info, warn};

use crate::api::{ApiClient, ApiError};
use crate::models::{Credential, User};

use super::error::AuthError;
use super::store::SessionStore;

/// Successful outcome of [`SessionRepository::login`] and
/// [`SessionRepository::fetch_profile`].
///
/// `served_from_cache` is true when the network was unreachable and the
/// profile came from local storage instead of the server.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileFetch {
    pub user: User,
    pub served_from_cache: bool,
}

pub struct SessionRepository {
    api: ApiClient,
    store: SessionStore,
}

impl SessionRepository {
    pub fn new(api: ApiClient, store: SessionStore) -> Self {
        Self { api, store }
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Log in and fetch the account profile.
    ///
    /// On a successful exchange the token is persisted first, then the
    /// profile fetch runs with it; the login reports that fetch's outcome.
    /// A transport failure turns into [`AuthError::OfflineFallback`] when a
    /// token and a cached profile are already stored, so a dead network
    /// during re-login does not strand a user with usable local state.
    pub async fn login(&self, identifier: &str, secret: &str) -> Result<ProfileFetch, AuthError> {
        if identifier.trim().is_empty() {
            return Err(AuthError::Validation("email is required"));
        }
        if secret.is_empty() {
            return Err(AuthError::Validation("password is required"));
        }

        let credential = Credential::new(identifier, secret);
        match self.api.login(&credential).await {
            Ok(login) => {
                if let Err(e) = self.store.save_token(&login.token) {
                    warn!(error = %e, "Failed to persist token");
                }
                info!("Login accepted, fetching profile");
                self.fetch_profile().await
            }
            Err(ApiError::Unauthorized) => Err(AuthError::InvalidCredentials),
            Err(ApiError::Rejected { message }) => Err(AuthError::server(None, message)),
            Err(ApiError::Status { status, message }) => {
                Err(AuthError::server(Some(status), message))
            }
            Err(ApiError::Network(e)) => {
                if self.store.profile().is_some() && self.store.token().is_some() {
                    debug!(error = %e, "Login unreachable, cached session available");
                    Err(AuthError::OfflineFallback)
                } else {
                    Err(AuthError::Connectivity(e.to_string()))
                }
            }
            Err(ApiError::InvalidResponse(detail)) => {
                warn!(detail = %detail, "Login response did not match the envelope");
                Err(AuthError::server(None, None))
            }
        }
    }

    /// Fetch the profile with the stored token, caching it on success.
    ///
    /// A 401 here means the token is dead: the whole local session (token
    /// and cache) is wiped before the error is returned. A transport
    /// failure is answered from the cache when one exists - regardless of
    /// its age - with `served_from_cache` set.
    pub async fn fetch_profile(&self) -> Result<ProfileFetch, AuthError> {
        let token = self.store.token();
        match self.api.fetch_profile(token.as_deref()).await {
            Ok(user) => {
                if let Err(e) = self.store.save_profile(&user) {
                    warn!(error = %e, "Failed to cache profile");
                }
                Ok(ProfileFetch {
                    user,
                    served_from_cache: false,
                })
            }
            Err(ApiError::Unauthorized) => {
                info!("Token rejected by the server, clearing local session");
                if let Err(e) = self.store.clear_all() {
                    warn!(error = %e, "Failed to clear session storage");
                }
                Err(AuthError::SessionExpired)
            }
            Err(ApiError::Rejected { message }) => Err(AuthError::server(None, message)),
            Err(ApiError::Status { status, message }) => {
                Err(AuthError::server(Some(status), message))
            }
            Err(ApiError::Network(e)) => match self.store.profile() {
                Some(cached) => {
                    debug!("Network unreachable, serving profile from cache");
                    Ok(ProfileFetch {
                        user: cached.user,
                        served_from_cache: true,
                    })
                }
                None => Err(AuthError::Connectivity(e.to_string())),
            },
            Err(ApiError::InvalidResponse(detail)) => {
                warn!(detail = %detail, "Profile response did not match the envelope");
                Err(AuthError::server(None, None))
            }
        }
    }

    /// Best-effort server logout, then unconditional local cleanup.
    ///
    /// Never fails from the caller's perspective: once this returns,
    /// [`is_authenticated`](Self::is_authenticated) is false and no cached
    /// profile remains, whatever the network did.
    pub async fn logout(&self) {
        if let Err(e) = self.api.logout(self.store.token().as_deref()).await {
            debug!(error = %e, "Server logout failed, clearing local session anyway");
        }
        if let Err(e) = self.store.clear_all() {
            warn!(error = %e, "Failed to clear session storage");
        }
    }

    /// Local, non-verifying check: a stored token may already have been
    /// invalidated server-side; only the next API call discovers that.
    pub fn is_authenticated(&self) -> bool {
        self.store.token().is_some()
    }

    /// The cached profile, without touching the network.
    pub fn cached_user(&self) -> Option<User> {
        self.store.profile().map(|cached| cached.user)
    }
}

// ============================================================================
// Tests
// ============================================================================
