//! Remote REST API client.
//!
//! # Architecture
//!
//! - Plain JSON over `reqwest` with a bounded per-request timeout
//! - The server is the source of record for customers and orders; the cart
//!   never leaves the device until order submission
//! - [`RemoteApi`] is the seam the services depend on; [`ApiClient`] is the
//!   HTTP implementation, tests substitute fakes
//!
//! Variant (flavor) labels arrive from the catalog in historically messy
//! encodings; [`types::normalize_flavor_labels`] cleans them up right here
//! at the boundary so the rest of the app never re-parses raw strings.

mod client;
pub mod types;

pub use client::ApiClient;

use async_trait::async_trait;
use bluefruit_core::{Email, ProductId};
use thiserror::Error;

use crate::models::{Product, Session};
use types::{CreatedOrder, OrderPayload, Registration};

/// Errors that can occur when talking to the remote API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure (connect, timeout, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body was not the JSON we expected.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A path could not be joined onto the base URL.
    #[error("invalid endpoint: {0}")]
    Endpoint(#[from] url::ParseError),

    /// The server answered with a non-success status.
    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },
}

/// The remote API surface the app core consumes.
///
/// One seam for everything: login, catalog, orders, account flows. The
/// checkout orchestrator and session service hold this as a trait object so
/// tests can script responses.
#[async_trait]
pub trait RemoteApi: Send + Sync {
    /// Authenticate and return the account's session data.
    ///
    /// Role gating is the caller's job; this returns whatever account the
    /// server recognizes.
    async fn login(&self, email: &Email, password: &str) -> Result<Session, ApiError>;

    /// Submit an order. Non-2xx or transport failure is the caller's sole
    /// trigger for the failed-checkout path.
    async fn create_order(&self, order: &OrderPayload) -> Result<CreatedOrder, ApiError>;

    /// Fetch the full product catalog.
    async fn products(&self) -> Result<Vec<Product>, ApiError>;

    /// Fetch one product by id.
    async fn product(&self, id: &ProductId) -> Result<Product, ApiError>;

    /// Fetch a random product (used for recommendations).
    async fn random_product(&self) -> Result<Product, ApiError>;

    /// Start password recovery by emailing a verification code.
    async fn request_recovery_code(&self, email: &Email) -> Result<(), ApiError>;

    /// Check a password-recovery verification code.
    async fn verify_recovery_code(&self, email: &Email, code: &str) -> Result<(), ApiError>;

    /// Set a new password after a verified recovery code.
    async fn set_new_password(
        &self,
        email: &Email,
        code: &str,
        new_password: &str,
    ) -> Result<(), ApiError>;

    /// Register a new customer account.
    async fn register_customer(&self, registration: &Registration) -> Result<(), ApiError>;

    /// Confirm a registration email with the mailed code.
    async fn verify_email_code(&self, email: &Email, code: &str) -> Result<(), ApiError>;
}
