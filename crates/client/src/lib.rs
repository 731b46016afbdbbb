//! Quitanda storefront client.
//!
//! Everything between the terminal (or any other front end) and the backend's
//! JSON API:
//!
//! - [`api`] - the [`StorefrontApi`] seam and its `reqwest` implementation
//! - [`session`] - [`Storefront`], which owns the cart, the last receipt, and
//!   the catalog and history as last fetched
//! - [`view`] - askama rendering of products, receipts, and history
//! - [`prompt`] - the alert/confirm surface the session reports through
//! - [`config`] - environment configuration

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod error;
pub mod prompt;
pub mod session;
pub mod view;

pub use api::{HttpStorefrontApi, StorefrontApi};
pub use config::{ClientConfig, ConfigError};
pub use error::{ApiError, Result, StorefrontError};
pub use prompt::{Prompt, RecordingPrompt};
pub use session::{Catalog, Storefront};
pub use view::PrintDocument;
