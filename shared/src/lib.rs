//! Shared types and models for the CropAI advisory platform
//!
//! This crate contains the pure, I/O-free parts of the system shared between
//! the backend, the browser client (via WASM), and tests.

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
