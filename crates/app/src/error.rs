//! Unified error type for the app core.
//!
//! Only two error families are meant for the user's eyes: address
//! validation failures and order-submission failures. Storage errors are
//! logged and self-healed (in-memory state stays authoritative), and
//! malformed persisted data is treated as absence. Nothing in this core is
//! fatal to the process.

use thiserror::Error;

use crate::api::ApiError;
use crate::config::ConfigError;
use crate::services::{CheckoutError, SessionError};
use crate::store::StoreError;

/// Application-level error type for the app core.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration loading failed.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Device-local storage failed while opening the store.
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    /// Remote API operation failed.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Login or session operation failed.
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    /// Checkout operation failed.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
