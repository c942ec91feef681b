//! REST API client module for the PixStop backend.
//!
//! This module provides the `ApiClient` for the three endpoints the client
//! consumes: `POST auth/login`, `GET me`, and `POST auth/logout`.
//!
//! Every response is wrapped in the backend's standard envelope
//! (`{success, data, error, message}`); the client unwraps it and maps
//! failures onto `ApiError`.

pub mod client;
pub mod error;

pub use client::{ApiClient, LoginData};
pub use error::ApiError;
