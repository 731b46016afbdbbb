//! Quitanda Core - Shared storefront types.
//!
//! This crate provides the types used across all Quitanda components:
//! - `client` - HTTP client and storefront session
//! - `cli` - Command-line front end
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no HTTP
//! clients, no rendering. Everything here can be unit tested without a
//! backend.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for ids, prices, quantities, and the
//!   product/receipt/history records
//! - [`cart`] - The session-scoped cart
//! - [`validation`] - Local validation failures raised before any network call

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod types;
pub mod validation;

pub use cart::{Cart, CartItem};
pub use types::*;
pub use validation::ValidationError;
