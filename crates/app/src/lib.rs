//! Blue Fruit App Core - cart, checkout, and session logic.
//!
//! This library is the headless core of the Blue Fruit mobile storefront.
//! The UI shell renders screens and routes between them; everything with an
//! invariant lives here:
//!
//! - [`services::CartRepository`] - sole owner of cart state, merge-on-add,
//!   write-through persistence
//! - [`services::CheckoutOrchestrator`] - address capture, order submission,
//!   idempotent retry, cart-clearing on confirmed success only
//! - [`services::SessionService`] - login/logout, role gating, change
//!   notifications for consumers
//! - [`services::CatalogService`] - cached product catalog reads
//! - [`api::ApiClient`] - thin JSON client for the remote REST API
//! - [`store`] - device-local key-value persistence
//!
//! # Architecture
//!
//! Cart state is device-local convenience state, not a server-of-record
//! entity: the server only learns of it at order-submission time. All
//! mutations go through the services; callers never touch stored state
//! directly.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod error;
pub mod invoice;
pub mod models;
pub mod services;
pub mod state;
pub mod store;
pub mod wellness;

pub use config::{AppConfig, CartScope, ConfigError};
pub use error::AppError;
pub use state::App;

/// Initialize tracing for embedders that have no subscriber of their own.
///
/// Respects `RUST_LOG`; defaults to info level for this crate.
pub fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "bluefruit_app=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
