//! Clementine Core - Shared domain types.
//!
//! This crate provides common types used across all Clementine components:
//! - `storefront` - Cart, catalog filtering, auth, and checkout state
//! - `cli` - Command-line demo driving the storefront library
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access, no
//! timers. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, emails, and statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
