//! Product administration commands.

use std::io::Write;

use quitanda_client::{Prompt, Storefront, StorefrontApi};
use quitanda_core::{ProductForm, ProductId, ProductSave};

use super::CommandError;

/// Create a product, or update it when `id` is given.
///
/// # Errors
///
/// Returns an error if the form is invalid, the backend refuses, or output
/// fails.
pub async fn save<A, P, W>(
    store: &mut Storefront<A, P>,
    id: Option<ProductId>,
    mut form: ProductForm,
    out: &mut W,
) -> Result<(), CommandError>
where
    A: StorefrontApi,
    P: Prompt,
    W: Write,
{
    form.id = id.map(|id| id.to_string());

    match store.save_product(&form).await? {
        ProductSave::Create(draft) => writeln!(out, "Created product {:?}", draft.name)?,
        ProductSave::Update(id, draft) => {
            writeln!(out, "Updated product {id} ({:?})", draft.name)?;
        }
    }
    Ok(())
}

/// Delete a product after confirmation.
///
/// # Errors
///
/// Returns an error if the backend refuses or output fails.
pub async fn delete<A, P, W>(
    store: &mut Storefront<A, P>,
    id: ProductId,
    out: &mut W,
) -> Result<(), CommandError>
where
    A: StorefrontApi,
    P: Prompt,
    W: Write,
{
    if store.delete_product(id).await? {
        writeln!(out, "Deleted product {id}")?;
    } else {
        writeln!(out, "Cancelled")?;
    }
    Ok(())
}
