/// XLSX inventory export
///
/// Renders an owner's inventory as a styled spreadsheet, one row per item,
/// with stored images embedded as thumbnails directly in the sheet.
///
/// # Layout
///
/// A single worksheet named `Inventory` with a bold, blue header row and
/// the canonical columns `Name, Image, Description, Quantity, Price`.
/// Data rows are tall enough (60) to fit thumbnails, which are scaled so
/// their largest dimension lands at 60 pixels regardless of the uploaded
/// image size. Quantity is a real number cell; price is rendered as a
/// two-decimal string to match the XML export exactly.
use rust_xlsxwriter::{Color, Format, FormatAlign, Image, Workbook};

use crate::export::ExportError;
use crate::images;
use crate::models::item::InventoryItem;

/// Worksheet tab name
const SHEET_NAME: &str = "Inventory";

/// Header background, the standard Office blue
const HEADER_FILL: Color = Color::RGB(0x4F81BD);

/// Header row height
const HEADER_ROW_HEIGHT: f64 = 25.0;

/// Data row height, sized to fit image thumbnails
const DATA_ROW_HEIGHT: f64 = 60.0;

/// Target edge length for embedded thumbnails, in pixels
const THUMBNAIL_PX: f64 = 60.0;

/// Column titles and widths, in canonical field order
const COLUMNS: [(&str, f64); 5] = [
    ("Name", 20.0),
    ("Image", 15.0),
    ("Description", 40.0),
    ("Quantity", 10.0),
    ("Price", 10.0),
];

/// Renders the given inventory rows as a complete XLSX workbook
///
/// # Arguments
///
/// * `items` - Inventory rows, already scoped to one owner
///
/// # Returns
///
/// The serialized workbook as bytes. An empty slice produces a workbook
/// with just the styled header row.
///
/// # Errors
///
/// Returns `ExportError::Image` if a stored blob cannot be staged to disk
/// or is not a decodable image, and `ExportError::Spreadsheet` if workbook
/// construction or serialization fails.
pub fn render(items: &[InventoryItem]) -> Result<Vec<u8>, ExportError> {
    let header_format = header_format();
    let body_format = body_format();

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;
    worksheet.set_row_height(0, HEADER_ROW_HEIGHT)?;

    for (col, (title, width)) in COLUMNS.iter().enumerate() {
        let col = col as u16;
        worksheet.set_column_width(col, *width)?;
        worksheet.write_string_with_format(0, col, *title, &header_format)?;
    }

    for (index, item) in items.iter().enumerate() {
        let row = index as u32 + 1;
        worksheet.set_row_height(row, DATA_ROW_HEIGHT)?;

        worksheet.write_string_with_format(row, 0, &item.name, &body_format)?;
        worksheet.write_string_with_format(row, 2, &item.description, &body_format)?;
        worksheet.write_number_with_format(row, 3, item.quantity as f64, &body_format)?;
        worksheet.write_string_with_format(row, 4, format!("{:.2}", item.price), &body_format)?;

        if let Some(blob) = item.image.as_deref() {
            let image = thumbnail(blob)?;
            worksheet.insert_image(row, 1, &image)?;
        }
    }

    Ok(workbook.save_to_buffer()?)
}

/// Loads a stored blob and scales it to thumbnail size
///
/// Scale factors are computed from the decoded dimensions, so a 600x600
/// upload and a 30x30 upload both land at 60x60 in the sheet.
fn thumbnail(blob: &[u8]) -> Result<Image, ExportError> {
    let mut image = images::to_spreadsheet_image(blob)?;
    let (width, height) = (image.width(), image.height());

    image
        .set_scale_width(THUMBNAIL_PX / width)
        .set_scale_height(THUMBNAIL_PX / height);

    Ok(image)
}

/// Bold white-on-blue centered format for the header row
fn header_format() -> Format {
    Format::new()
        .set_bold()
        .set_font_color(Color::White)
        .set_background_color(HEADER_FILL)
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter)
}

/// Centered format for data cells
fn body_format() -> Format {
    Format::new()
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter)
}
