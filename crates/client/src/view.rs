//! Rendering layer.
//!
//! Pure functions from session state to markup. Nothing in here talks to the
//! network or mutates the session; the HTML fragments stand in for the page
//! regions (product list, receipt, history) and the text variants are what
//! the command line prints.

use askama::Template;
use quitanda_core::{HistoryEntry, Product, Receipt};

use crate::session::Catalog;

/// Title of the printable receipt document.
pub const PRINT_TITLE: &str = "Receipt";

/// Viewport the printable receipt is laid out for, in CSS pixels.
pub const PRINT_VIEWPORT: (u32, u32) = (600, 700);

// =============================================================================
// View data
// =============================================================================

/// Product display data for templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductView {
    pub id: i32,
    pub name: String,
    pub price: String,
    pub stock: u32,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.as_i32(),
            name: product.name.clone(),
            price: product.price.display(),
            stock: product.stock,
        }
    }
}

/// Receipt line display data for templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptLineView {
    pub name: String,
    pub quantity: u32,
    pub subtotal: String,
}

/// Receipt display data for templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptView {
    pub date: String,
    pub lines: Vec<ReceiptLineView>,
    pub total: String,
}

impl From<&Receipt> for ReceiptView {
    fn from(receipt: &Receipt) -> Self {
        Self {
            date: receipt.date.clone(),
            lines: receipt
                .lines
                .iter()
                .map(|line| ReceiptLineView {
                    name: line.product_name.clone(),
                    quantity: line.quantity,
                    subtotal: line.subtotal.display(),
                })
                .collect(),
            total: receipt.total.display(),
        }
    }
}

/// History entry display data for templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryView {
    pub date: String,
    pub total: String,
    pub items: String,
}

impl From<&HistoryEntry> for HistoryView {
    fn from(entry: &HistoryEntry) -> Self {
        Self {
            date: entry.date.clone(),
            total: entry.total.display(),
            items: entry.items_summary(),
        }
    }
}

/// A standalone document ready to be printed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintDocument {
    pub title: String,
    pub html: String,
    pub width: u32,
    pub height: u32,
}

// =============================================================================
// Templates
// =============================================================================

#[derive(Template)]
#[template(path = "products.html")]
struct ProductListHtml<'a> {
    products: &'a [ProductView],
    unavailable: bool,
}

#[derive(Template)]
#[template(path = "products.txt")]
struct ProductListText<'a> {
    products: &'a [ProductView],
    unavailable: bool,
}

#[derive(Template)]
#[template(path = "receipt.html")]
struct ReceiptHtml<'a> {
    receipt: &'a ReceiptView,
}

#[derive(Template)]
#[template(path = "receipt.txt")]
struct ReceiptText<'a> {
    receipt: &'a ReceiptView,
}

#[derive(Template)]
#[template(path = "history.html")]
struct HistoryHtml<'a> {
    entries: &'a [HistoryView],
}

#[derive(Template)]
#[template(path = "history.txt")]
struct HistoryText<'a> {
    entries: &'a [HistoryView],
}

#[derive(Template)]
#[template(path = "print_receipt.html")]
struct PrintReceiptHtml<'a> {
    title: &'a str,
    content: &'a str,
}

// =============================================================================
// Rendering
// =============================================================================

fn catalog_views(catalog: &Catalog) -> (Vec<ProductView>, bool) {
    match catalog {
        Catalog::NotLoaded => (Vec::new(), false),
        Catalog::Loaded(products) => (products.iter().map(ProductView::from).collect(), false),
        Catalog::Unavailable => (Vec::new(), true),
    }
}

/// Render the product list; an unavailable catalog renders the error placeholder.
///
/// # Errors
///
/// Returns an error if the template fails to render.
pub fn products_html(catalog: &Catalog) -> askama::Result<String> {
    let (products, unavailable) = catalog_views(catalog);
    ProductListHtml {
        products: &products,
        unavailable,
    }
    .render()
}

/// Plain-text product list.
///
/// # Errors
///
/// Returns an error if the template fails to render.
pub fn products_text(catalog: &Catalog) -> askama::Result<String> {
    let (products, unavailable) = catalog_views(catalog);
    ProductListText {
        products: &products,
        unavailable,
    }
    .render()
}

/// Render a receipt fragment.
///
/// # Errors
///
/// Returns an error if the template fails to render.
pub fn receipt_html(receipt: &Receipt) -> askama::Result<String> {
    ReceiptHtml {
        receipt: &ReceiptView::from(receipt),
    }
    .render()
}

/// Plain-text receipt.
///
/// # Errors
///
/// Returns an error if the template fails to render.
pub fn receipt_text(receipt: &Receipt) -> askama::Result<String> {
    ReceiptText {
        receipt: &ReceiptView::from(receipt),
    }
    .render()
}

/// Render the purchase history list.
///
/// # Errors
///
/// Returns an error if the template fails to render.
pub fn history_html(entries: &[HistoryEntry]) -> askama::Result<String> {
    let entries: Vec<HistoryView> = entries.iter().map(HistoryView::from).collect();
    HistoryHtml { entries: &entries }.render()
}

/// Plain-text purchase history.
///
/// # Errors
///
/// Returns an error if the template fails to render.
pub fn history_text(entries: &[HistoryEntry]) -> askama::Result<String> {
    let entries: Vec<HistoryView> = entries.iter().map(HistoryView::from).collect();
    HistoryText { entries: &entries }.render()
}

/// Wrap already-rendered receipt markup in a printable document.
///
/// # Errors
///
/// Returns an error if the template fails to render.
pub fn print_document(receipt_markup: &str) -> askama::Result<PrintDocument> {
    let html = PrintReceiptHtml {
        title: PRINT_TITLE,
        content: receipt_markup,
    }
    .render()?;

    let (width, height) = PRINT_VIEWPORT;
    Ok(PrintDocument {
        title: PRINT_TITLE.to_string(),
        html,
        width,
        height,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use quitanda_core::{HistoryItem, Price, ProductId, ReceiptLine};

    use super::*;

    fn price(s: &str) -> Price {
        Price::parse(s).unwrap()
    }

    fn products() -> Vec<Product> {
        vec![
            Product {
                id: ProductId::new(1),
                name: "Arroz 5kg".to_string(),
                price: price("21.9"),
                stock: 12,
            },
            Product {
                id: ProductId::new(2),
                name: "Pão & Manteiga".to_string(),
                price: price("7.456"),
                stock: 3,
            },
            Product {
                id: ProductId::new(3),
                name: "Café".to_string(),
                price: price("15"),
                stock: 0,
            },
        ]
    }

    fn receipt() -> Receipt {
        Receipt {
            date: "2025-03-01 10:15:00".to_string(),
            lines: vec![ReceiptLine {
                product_name: "Arroz 5kg".to_string(),
                quantity: 2,
                subtotal: price("43.8"),
            }],
            total: price("43.8"),
        }
    }

    #[test]
    fn test_product_list_has_one_entry_per_product() {
        let catalog = Catalog::Loaded(products());
        let html = products_html(&catalog).unwrap();

        assert_eq!(html.matches("<li>").count(), 3);
        assert!(html.contains("Arroz 5kg - R$21.90 (Stock: 12)"));
        assert!(html.contains("R$7.46"));
        assert!(html.contains("R$15.00"));
        assert!(html.contains(r#"max="12""#));
        assert!(html.contains(r#"id="qty-2""#));
    }

    #[test]
    fn test_product_names_are_escaped() {
        let html = products_html(&Catalog::Loaded(products())).unwrap();
        assert!(html.contains("Pão &amp; Manteiga") || html.contains("Pão &#38; Manteiga"));
    }

    #[test]
    fn test_unavailable_catalog_renders_placeholder() {
        let html = products_html(&Catalog::Unavailable).unwrap();
        assert_eq!(html.trim(), "<li>Error loading products.</li>");

        let text = products_text(&Catalog::Unavailable).unwrap();
        assert!(text.contains("Error loading products."));
    }

    #[test]
    fn test_not_loaded_catalog_renders_nothing() {
        assert!(products_html(&Catalog::NotLoaded).unwrap().trim().is_empty());
    }

    #[test]
    fn test_products_text_lists_each_product() {
        let text = products_text(&Catalog::Loaded(products())).unwrap();
        assert!(text.contains("[1] Arroz 5kg - R$21.90 (stock: 12)"));
        assert!(text.contains("[3] Café - R$15.00 (stock: 0)"));
    }

    #[test]
    fn test_receipt_fragment() {
        let html = receipt_html(&receipt()).unwrap();
        assert!(html.contains("<h3>Receipt</h3>"));
        assert!(html.contains("2025-03-01 10:15:00"));
        assert!(html.contains("Arroz 5kg x2 - R$43.80"));
        assert!(html.contains("<strong>Total:</strong> R$43.80"));

        let text = receipt_text(&receipt()).unwrap();
        assert!(text.contains("Total: R$43.80"));
    }

    #[test]
    fn test_history_list() {
        let entries = vec![HistoryEntry {
            date: "2025-02-28".to_string(),
            total: price("30"),
            items: vec![
                HistoryItem {
                    product_name: "Arroz".to_string(),
                    quantity: 1,
                },
                HistoryItem {
                    product_name: "Café".to_string(),
                    quantity: 2,
                },
            ],
        }];

        let html = history_html(&entries).unwrap();
        assert_eq!(html.matches("<li>").count(), 1);
        assert!(html.contains("Total: R$30.00"));
        assert!(html.contains("Items: Arroz x1, Café x2"));

        assert!(history_text(&[]).unwrap().contains("No purchases yet."));
    }

    #[test]
    fn test_print_document_embeds_markup_unescaped() {
        let fragment = receipt_html(&receipt()).unwrap();
        let doc = print_document(&fragment).unwrap();

        assert_eq!(doc.title, PRINT_TITLE);
        assert_eq!((doc.width, doc.height), PRINT_VIEWPORT);
        assert!(doc.html.contains("<title>Receipt</title>"));
        assert!(doc.html.contains("<h3>Receipt</h3>"));
        assert!(doc.html.contains("font-family: Arial"));
    }
}
