//! Blue Fruit Core - Shared types library.
//!
//! This crate provides common types used across the Blue Fruit mobile app:
//! - `app` - The cart/checkout/session core driven by the UI shell
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, money, phone numbers,
//!   emails, and statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
