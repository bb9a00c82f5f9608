/// Image intake and encoding
///
/// This module is the boundary between uploaded files, stored blobs, and the
/// representations the views and exporters need. Three transforms live here:
///
/// - [`ingest`]: uploaded multipart part -> stored blob (or the "no image"
///   sentinel)
/// - [`to_display_uri`]: stored blob -> self-contained base64 data URI
/// - [`to_spreadsheet_image`]: stored blob -> image handle for XLSX
///   embedding, staged through a uniquely-named temporary file
///
/// The display transform is pure; the spreadsheet transform touches disk but
/// cleans up after itself on every path, including errors.
use std::io::Write;

use base64::Engine;
use rust_xlsxwriter::Image;
use tempfile::NamedTempFile;

/// MIME type used for display URIs
///
/// Uploads are stored as raw bytes without sniffing, so display rendering
/// assumes JPEG the way the original upload forms did. Browsers decode the
/// actual format regardless of the label.
const DISPLAY_MIME: &str = "image/jpeg";

/// Error type for image staging and loading
#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    /// Failed to write the blob to a staging file
    #[error("Failed to stage image: {0}")]
    Staging(#[from] std::io::Error),

    /// The spreadsheet writer could not read the staged bytes as an image
    #[error("Failed to load image: {0}")]
    Load(#[from] rust_xlsxwriter::XlsxError),
}

/// Converts an uploaded file part into a storable blob
///
/// Returns `None` when no file was supplied or the part carries an empty
/// filename; browsers submit an empty-named part when the file picker is
/// left blank, and that means "no image", not an error. A named but empty
/// file is kept as an empty blob, which stays distinct from `None`.
///
/// The content is taken as-is; nothing is staged on disk.
///
/// # Example
///
/// ```
/// use stockroom_shared::images::ingest;
///
/// assert_eq!(ingest(None, b"..."), None);
/// assert_eq!(ingest(Some(""), b"..."), None);
/// assert_eq!(ingest(Some("pear.jpg"), b"bytes"), Some(b"bytes".to_vec()));
/// ```
pub fn ingest(filename: Option<&str>, content: &[u8]) -> Option<Vec<u8>> {
    match filename {
        None => None,
        Some("") => None,
        Some(_) => Some(content.to_vec()),
    }
}

/// Encodes a stored blob as an embeddable data URI
///
/// `None` in, `None` out; otherwise the blob is base64-encoded and wrapped
/// as `data:image/jpeg;base64,<payload>`. Deterministic and lossless: the
/// payload decodes back to the exact stored bytes.
///
/// # Example
///
/// ```
/// use stockroom_shared::images::to_display_uri;
///
/// assert_eq!(to_display_uri(None), None);
///
/// let uri = to_display_uri(Some(&[1, 2, 3])).unwrap();
/// assert!(uri.starts_with("data:image/jpeg;base64,"));
/// ```
pub fn to_display_uri(blob: Option<&[u8]>) -> Option<String> {
    blob.map(|bytes| {
        let payload = base64::engine::general_purpose::STANDARD.encode(bytes);
        format!("data:{};base64,{}", DISPLAY_MIME, payload)
    })
}

/// Encodes a blob as base64 without the URI wrapper
///
/// Used by the XML exporter, which carries the bare payload in an element.
pub fn to_base64(blob: &[u8]) -> String {
    base64::engine::general_purpose::STANDARD.encode(blob)
}

/// Stages a blob into a spreadsheet image handle
///
/// Writes the blob to a uniquely-named temporary file and loads the image
/// from it. The loader reads the pixel data eagerly, so the staging file is
/// already consumed when it is removed on drop at the end of this function,
/// error paths included. Unique temp names mean concurrent exports never
/// collide on staged files.
///
/// # Errors
///
/// Returns `ImageError::Staging` if the temporary file cannot be created or
/// written, and `ImageError::Load` if the bytes are not a supported image
/// format (PNG, JPEG, GIF, or BMP).
pub fn to_spreadsheet_image(blob: &[u8]) -> Result<Image, ImageError> {
    let mut staging = NamedTempFile::new()?;
    staging.write_all(blob)?;
    staging.flush()?;

    let image = Image::new(staging.path())?;

    Ok(image)
}
