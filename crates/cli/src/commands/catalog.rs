//! Read-only commands: catalog and purchase history.

use std::io::Write;

use quitanda_client::{Prompt, Storefront, StorefrontApi, StorefrontError, view};

use super::CommandError;

/// Print the catalog.
///
/// A failed fetch still prints the error placeholder before failing.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded or output fails.
pub async fn products<A, P, W>(
    store: &mut Storefront<A, P>,
    out: &mut W,
) -> Result<(), CommandError>
where
    A: StorefrontApi,
    P: Prompt,
    W: Write,
{
    let loaded = store.load_products().await.map(|_| ());
    let text = view::products_text(store.catalog()).map_err(StorefrontError::from)?;
    out.write_all(text.as_bytes())?;
    loaded.map_err(CommandError::from)
}

/// Print purchase history. A missing history prints as empty.
///
/// # Errors
///
/// Returns an error if rendering or output fails.
pub async fn history<A, P, W>(
    store: &mut Storefront<A, P>,
    out: &mut W,
) -> Result<(), CommandError>
where
    A: StorefrontApi,
    P: Prompt,
    W: Write,
{
    store.load_history().await;
    let entries = store.history().unwrap_or_default();
    let text = view::history_text(entries).map_err(StorefrontError::from)?;
    out.write_all(text.as_bytes())?;
    Ok(())
}
