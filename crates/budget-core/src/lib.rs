//! Core library for the budget client.
//!
//! - `auth`: the credential store, its storage backends and login/logout
//! - `api`: the request gateway and typed budget fetches
//! - `navigation`: the route guard and the host navigation capability
//! - `config`: deployment-time configuration
//! - `models`: budgeting data types

pub mod api;
pub mod auth;
pub mod config;
pub mod models;
pub mod navigation;

pub use api::{ApiClient, ApiError};
pub use auth::{CredentialStore, Session, TokenStorage};
pub use config::Config;
pub use navigation::{GuardDecision, NavigationGuard, Navigator};
