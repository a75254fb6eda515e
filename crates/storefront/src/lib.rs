//! Clementine Storefront - client-side state layer for the demo shop.
//!
//! This crate provides the storefront's state containers as a library,
//! allowing them to be tested and reused without any UI framework:
//!
//! - [`cart`] - the cart container (active lines + saved-for-later)
//! - [`catalog`] - the product catalog and filter/sort/paginate engine
//! - [`services::auth`] - the mocked authentication flow
//! - [`checkout`] - the checkout flow and order confirmation handoff
//! - [`storage`] - the pluggable key-value persistence capability
//!
//! Containers own their state exclusively, publish snapshots to explicitly
//! registered observers, and persist best-effort through an injected
//! [`storage::KeyValueStore`]. Persistence failures are logged and
//! swallowed - they never reach the caller.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod models;
pub mod observe;
pub mod services;
pub mod storage;
pub mod validate;
