//! Client library for the PixStop REST API.
//!
//! This crate is the data and authentication layer of the PixStop mobile
//! client: it logs in against the backend, keeps the bearer token and the
//! last-known user profile in local storage, and serves the cached profile
//! when the network is unreachable.
//!
//! The pieces, leaf to root:
//!
//! - [`SessionStore`]: persistent token + profile storage
//! - [`ApiClient`]: HTTP wrapper for the three backend endpoints
//! - [`SessionRepository`]: orchestration with the offline fallback policy
//!
//! A typical flow:
//!
//! ```no_run
//! use pixstop_client::{ApiClient, ApiConfig, SessionRepository, SessionStore};
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let api = ApiClient::new(ApiConfig::from_env())?;
//! let store = SessionStore::open_default()?;
//! let repo = SessionRepository::new(api, store);
//!
//! let outcome = repo.login("ann@example.com", "secret").await?;
//! println!("signed in as {}", outcome.user.name);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod models;

pub use api::{ApiClient, ApiError};
pub use auth::{AuthError, CachedUser, ProfileFetch, SessionRepository, SessionStore};
pub use config::{ApiConfig, Environment};
pub use models::{Credential, User};
