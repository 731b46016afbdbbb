//! Command implementations.
//!
//! Each command drives a [`quitanda_client::Storefront`] and writes its
//! results to stdout. Alerts raised along the way go through the terminal
//! prompt on stderr.

pub mod catalog;
pub mod product;
pub mod purchase;

#[cfg(test)]
mod fake;

use quitanda_client::{ApiError, ConfigError, StorefrontError};
use thiserror::Error;

/// Errors that end a command with a non-zero exit status.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The HTTP client could not be built.
    #[error(transparent)]
    Client(#[from] ApiError),

    /// A storefront operation failed.
    #[error(transparent)]
    Storefront(#[from] StorefrontError),

    /// Writing output failed.
    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),
}
