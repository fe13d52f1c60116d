//! Resque dashboard API client for resqui.
//!
//! Wraps the backend's JSON endpoints. Only 2xx responses are decoded; every
//! other outcome becomes an [`ApiError`].

pub mod client;
pub mod config;
pub mod error;

pub use client::ResqueClient;
pub use config::ClientConfig;
pub use error::ApiError;
