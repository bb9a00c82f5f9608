/// Inventory export download endpoints
///
/// Both endpoints load the authenticated owner's full inventory, hand it to
/// the matching renderer in the shared crate, and return the document as a
/// download attachment. Rendering happens entirely in memory; nothing is
/// written to disk except the per-image staging files the XLSX path scopes
/// internally.
///
/// # Endpoints
///
/// - `GET /v1/exports/xml` - `inventory.xml` attachment
/// - `GET /v1/exports/xlsx` - `inventory.xlsx` attachment
use crate::{app::AppState, error::ApiResult};
use axum::{
    extract::State,
    http::header::{self, HeaderName},
    response::IntoResponse,
    Extension,
};
use stockroom_shared::{auth::middleware::AuthContext, export, models::item::InventoryItem};

/// MIME type for the XML download
const XML_MIME: &str = "application/xml";

/// MIME type for the XLSX download
const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Download the inventory as XML
///
/// # Endpoint
///
/// ```text
/// GET /v1/exports/xml
/// Authorization: Bearer <token>
/// ```
///
/// # Response
///
/// `200 OK`, `Content-Type: application/xml`, attachment `inventory.xml`.
/// An empty inventory still downloads a well-formed document with an empty
/// root element.
///
/// # Errors
///
/// - `401 Unauthorized`: Missing or invalid token
/// - `500 Internal Server Error`: Query or serialization failure
pub async fn export_xml(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<impl IntoResponse> {
    let items = InventoryItem::list_for_owner(&state.db, auth.owner_id).await?;
    let bytes = export::xml::render(&items)?;

    tracing::info!(owner_id = auth.owner_id, items = items.len(), "XML export");

    Ok(attachment(XML_MIME, "inventory.xml", bytes))
}

/// Download the inventory as a styled XLSX spreadsheet
///
/// # Endpoint
///
/// ```text
/// GET /v1/exports/xlsx
/// Authorization: Bearer <token>
/// ```
///
/// # Response
///
/// `200 OK`, the spreadsheet MIME type, attachment `inventory.xlsx`. An
/// empty inventory downloads a workbook with just the styled header row.
///
/// # Errors
///
/// - `401 Unauthorized`: Missing or invalid token
/// - `500 Internal Server Error`: Query, image staging, or workbook failure
pub async fn export_xlsx(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<impl IntoResponse> {
    let items = InventoryItem::list_for_owner(&state.db, auth.owner_id).await?;
    let bytes = export::xlsx::render(&items)?;

    tracing::info!(owner_id = auth.owner_id, items = items.len(), "XLSX export");

    Ok(attachment(XLSX_MIME, "inventory.xlsx", bytes))
}

/// Wraps rendered bytes as a download attachment response
fn attachment(
    mime: &'static str,
    filename: &str,
    bytes: Vec<u8>,
) -> ([(HeaderName, String); 2], Vec<u8>) {
    (
        [
            (header::CONTENT_TYPE, mime.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        bytes,
    )
}
