//! Data models for PixStop entities.
//!
//! - `User`: the server-authoritative account profile
//! - `Credential`: transient login input, never persisted

pub mod user;

pub use user::{Credential, User};
