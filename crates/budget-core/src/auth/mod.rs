//! Authentication module for the session token.
//!
//! This module provides:
//! - `CredentialStore`: the single in-memory holder of the token, mirrored
//!   to durable storage
//! - `TokenStorage` and its backends: memory, file and OS keychain
//! - `Session`: login and logout through the API gateway

pub mod credentials;
pub mod session;
pub mod storage;

pub use credentials::CredentialStore;
pub use session::{Session, AUTH_TOKEN_PATH};
pub use storage::{FileStorage, KeyringStorage, MemoryStorage, TokenStorage, AUTH_TOKEN_KEY};
