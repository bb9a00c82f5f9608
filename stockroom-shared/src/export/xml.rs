/// XML inventory export
///
/// Renders an owner's inventory as a compact XML document. Images are
/// inlined as base64 text so the document is self-contained and can be
/// re-imported without chasing external files.
///
/// # Output
///
/// ```xml
/// <?xml version="1.0" encoding="utf-8"?>
/// <inventory>
///   <item>
///     <name>Espresso beans</name>
///     <image>iVBORw0K...</image>
///     <description>1kg dark roast</description>
///     <quantity>12</quantity>
///     <price>18.50</price>
///   </item>
/// </inventory>
/// ```
///
/// The real output carries no indentation or newlines; the document above
/// is formatted for readability. Text content is entity-escaped by the
/// writer, and prices always render with exactly two decimals.
use std::io::Cursor;
use std::io::Write;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::export::ExportError;
use crate::images;
use crate::models::item::InventoryItem;

/// Root element wrapping the whole document
const ROOT_TAG: &str = "inventory";

/// Element wrapping one inventory row
const ITEM_TAG: &str = "item";

/// Renders the given inventory rows as a complete XML document
///
/// The item fields are emitted in the canonical order `name, image,
/// description, quantity, price`. An item without an image gets an empty
/// `<image>` element rather than no element, so every `<item>` has the
/// same shape.
///
/// # Arguments
///
/// * `items` - Inventory rows, already scoped to one owner
///
/// # Returns
///
/// The serialized document as bytes, starting with the XML declaration.
/// An empty slice produces a declaration plus an empty `<inventory>` root.
///
/// # Errors
///
/// Returns `ExportError::Xml` if event serialization fails. Writing into
/// an in-memory buffer, this only happens on malformed event input, not
/// on any inventory content.
pub fn render(items: &[InventoryItem]) -> Result<Vec<u8>, ExportError> {
    let mut writer = Writer::new(Cursor::new(Vec::new()));

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
    writer.write_event(Event::Start(BytesStart::new(ROOT_TAG)))?;

    for item in items {
        write_item(&mut writer, item)?;
    }

    writer.write_event(Event::End(BytesEnd::new(ROOT_TAG)))?;

    Ok(writer.into_inner().into_inner())
}

/// Writes one `<item>` element with its five field children
fn write_item<W: Write>(
    writer: &mut Writer<W>,
    item: &InventoryItem,
) -> Result<(), quick_xml::Error> {
    let image = item
        .image
        .as_deref()
        .map(images::to_base64)
        .unwrap_or_default();

    writer.write_event(Event::Start(BytesStart::new(ITEM_TAG)))?;
    write_field(writer, "name", &item.name)?;
    write_field(writer, "image", &image)?;
    write_field(writer, "description", &item.description)?;
    write_field(writer, "quantity", &item.quantity.to_string())?;
    write_field(writer, "price", &format!("{:.2}", item.price))?;
    writer.write_event(Event::End(BytesEnd::new(ITEM_TAG)))?;

    Ok(())
}

/// Writes `<tag>value</tag>`, entity-escaping the value
fn write_field<W: Write>(
    writer: &mut Writer<W>,
    tag: &str,
    value: &str,
) -> Result<(), quick_xml::Error> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    writer.write_event(Event::Text(BytesText::new(value)))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;

    Ok(())
}
