//! REST API gateway for the budgeting backend.
//!
//! This module provides the `ApiClient` every caller uses to reach the
//! backend, along with the typed fetches for expenses, investments and
//! transactions.
//!
//! The API uses bearer token authentication obtained from the token
//! endpoint (see `auth::Session`).

pub mod budget;
pub mod client;
pub mod error;

pub use client::ApiClient;
pub use error::ApiError;
