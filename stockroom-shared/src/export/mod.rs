/// Inventory export codecs
///
/// This module renders an owner's full inventory into the two download
/// formats the API serves:
///
/// # Modules
///
/// - [`xml`]: Plain XML document, images inlined as base64 text
/// - [`xlsx`]: Styled spreadsheet with image thumbnails embedded in rows
///
/// Both renderers take the same slice of [`InventoryItem`] rows, already
/// scoped to one owner by the caller, and emit the item fields in the
/// canonical order `name, image, description, quantity, price`. Rendering
/// is pure with respect to the database; neither codec performs queries.
///
/// # Example
///
/// ```no_run
/// use stockroom_shared::export;
/// use stockroom_shared::models::item::InventoryItem;
///
/// # fn example(items: Vec<InventoryItem>) -> Result<(), Box<dyn std::error::Error>> {
/// let xml_bytes = export::xml::render(&items)?;
/// let xlsx_bytes = export::xlsx::render(&items)?;
/// assert!(xml_bytes.starts_with(b"<?xml"));
/// assert!(xlsx_bytes.starts_with(b"PK"));
/// # Ok(())
/// # }
/// ```
///
/// [`InventoryItem`]: crate::models::item::InventoryItem
pub mod xlsx;
pub mod xml;

use crate::images::ImageError;

/// Error type for export rendering
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// XML serialization failed
    #[error("XML serialization failed: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Workbook construction or serialization failed
    #[error("Workbook serialization failed: {0}")]
    Spreadsheet(#[from] rust_xlsxwriter::XlsxError),

    /// A stored image blob could not be staged or decoded
    #[error(transparent)]
    Image(#[from] ImageError),
}
