//! Feature API modules, one per backend resource.
//!
//! Each module is a thin typed layer over the shared [`ApiClient`]: request
//! and response models next to the functions that use them, with local
//! validation where the views rely on it.
//!
//! [`ApiClient`]: crate::client::ApiClient

pub mod admin;
pub mod auth;
pub mod common;
pub mod example;
pub mod files;
pub mod health;
pub mod metrics;
pub mod user;
