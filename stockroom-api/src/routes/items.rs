/// Owner-scoped inventory endpoints
///
/// Every handler here runs behind the JWT middleware and reads the owner id
/// from the injected [`AuthContext`]; the store queries are filtered by that
/// id, so no request can observe or mutate another owner's rows.
///
/// # Endpoints
///
/// - `GET /v1/items` - List this owner's inventory
/// - `POST /v1/items` - Create an item (multipart, optional image)
/// - `GET /v1/items/low-stock` - Low/out-of-stock report
/// - `GET /v1/items/quantity/:name` - Quantity of one item
/// - `PUT /v1/items/quantity/:name` - Set quantity of one item
/// - `DELETE /v1/items/:id` - Delete an item by id
use crate::{
    app::AppState,
    error::{ApiError, ApiResult, ValidationErrorDetail},
};
use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use stockroom_shared::{
    auth::middleware::AuthContext,
    images,
    models::item::{CreateItem, InventoryItem, ItemView},
    stock::{self, StockReport, DEFAULT_LOW_STOCK_THRESHOLD},
};
use validator::Validate;

/// Update quantity request
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateQuantityRequest {
    /// New quantity on hand
    #[validate(range(min = 0, message = "Quantity must be non-negative"))]
    pub quantity: i64,
}

/// Quantity lookup/update response
#[derive(Debug, Serialize, Deserialize)]
pub struct QuantityResponse {
    /// Item name
    pub name: String,

    /// Current quantity on hand
    pub quantity: i64,
}

/// Query parameters for the low-stock report
#[derive(Debug, Deserialize)]
pub struct LowStockQuery {
    /// Inclusive low-stock threshold; defaults to 10
    pub threshold: Option<i64>,
}

/// List inventory
///
/// # Endpoint
///
/// ```text
/// GET /v1/items
/// Authorization: Bearer <token>
/// ```
///
/// # Response
///
/// `200 OK` with an array of item views; stored images come back as
/// embeddable `data:` URIs, or null for items without one.
///
/// # Errors
///
/// - `401 Unauthorized`: Missing or invalid token
/// - `500 Internal Server Error`: Server error
pub async fn list_items(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<Vec<ItemView>>> {
    let items = InventoryItem::list_for_owner(&state.db, auth.owner_id).await?;

    let views = items.iter().map(ItemView::from).collect();

    Ok(Json(views))
}

/// Create an item
///
/// Takes a multipart form so the optional image travels in the same request
/// as the text fields. Numeric fields arrive as form text and are parsed
/// strictly: a quantity of `"abc"` or `"-3"` is rejected with a field-level
/// validation error, never stored as zero.
///
/// # Endpoint
///
/// ```text
/// POST /v1/items
/// Authorization: Bearer <token>
/// Content-Type: multipart/form-data
///
/// name=Espresso beans
/// description=1kg dark roast
/// quantity=12
/// price=18.5
/// image=<file, optional>
/// ```
///
/// # Response
///
/// `201 Created` with the stored item view.
///
/// # Errors
///
/// - `400 Bad Request`: Unreadable multipart body
/// - `401 Unauthorized`: Missing or invalid token
/// - `409 Conflict`: This owner already has an item with this name
/// - `422 Unprocessable Entity`: Validation failed (field details)
/// - `500 Internal Server Error`: Server error
pub async fn create_item(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    multipart: Multipart,
) -> ApiResult<(StatusCode, Json<ItemView>)> {
    let form = read_create_form(multipart).await?;

    let item = InventoryItem::create(
        &state.db,
        CreateItem {
            owner_id: auth.owner_id,
            name: form.name,
            description: form.description,
            quantity: form.quantity,
            price: form.price,
            image: form.image,
        },
    )
    .await?;

    tracing::info!(
        owner_id = auth.owner_id,
        item_id = item.item_id,
        name = %item.name,
        "Item created"
    );

    Ok((StatusCode::CREATED, Json(ItemView::from(&item))))
}

/// Low/out-of-stock report
///
/// Splits the inventory into two disjoint buckets: out of stock (quantity
/// zero) and low stock (positive quantity at or below the threshold).
/// Healthy items appear in neither.
///
/// # Endpoint
///
/// ```text
/// GET /v1/items/low-stock?threshold=10
/// Authorization: Bearer <token>
/// ```
///
/// # Response
///
/// `200 OK`
/// ```json
/// {
///   "low_stock": [ ...item views... ],
///   "out_of_stock": [ ...item views... ]
/// }
/// ```
///
/// # Errors
///
/// - `401 Unauthorized`: Missing or invalid token
/// - `422 Unprocessable Entity`: Negative threshold
/// - `500 Internal Server Error`: Server error
pub async fn low_stock(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Query(query): Query<LowStockQuery>,
) -> ApiResult<Json<StockReport>> {
    let threshold = query.threshold.unwrap_or(DEFAULT_LOW_STOCK_THRESHOLD);
    if threshold < 0 {
        return Err(ApiError::validation(
            "threshold",
            "Threshold must be non-negative",
        ));
    }

    let items = InventoryItem::list_for_owner(&state.db, auth.owner_id).await?;

    Ok(Json(stock::classify(&items, threshold)))
}

/// Get the quantity of one item by name
///
/// # Endpoint
///
/// ```text
/// GET /v1/items/quantity/:name
/// Authorization: Bearer <token>
/// ```
///
/// # Response
///
/// `200 OK`
/// ```json
/// {
///   "name": "Espresso beans",
///   "quantity": 12
/// }
/// ```
///
/// # Errors
///
/// - `401 Unauthorized`: Missing or invalid token
/// - `404 Not Found`: This owner has no item with that name
/// - `500 Internal Server Error`: Server error
pub async fn get_quantity(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(name): Path<String>,
) -> ApiResult<Json<QuantityResponse>> {
    let quantity = InventoryItem::quantity_by_name(&state.db, auth.owner_id, &name)
        .await?
        .ok_or_else(|| ApiError::NotFound("Item not found".to_string()))?;

    Ok(Json(QuantityResponse { name, quantity }))
}

/// Set the quantity of one item by name
///
/// Touches the quantity column only. Addressing a name this owner does not
/// have reports 404 and changes nothing.
///
/// # Endpoint
///
/// ```text
/// PUT /v1/items/quantity/:name
/// Authorization: Bearer <token>
/// Content-Type: application/json
///
/// { "quantity": 4 }
/// ```
///
/// # Response
///
/// `200 OK`
/// ```json
/// {
///   "name": "Espresso beans",
///   "quantity": 4
/// }
/// ```
///
/// # Errors
///
/// - `401 Unauthorized`: Missing or invalid token
/// - `404 Not Found`: This owner has no item with that name
/// - `422 Unprocessable Entity`: Negative quantity
/// - `500 Internal Server Error`: Server error
pub async fn update_quantity(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(name): Path<String>,
    Json(req): Json<UpdateQuantityRequest>,
) -> ApiResult<Json<QuantityResponse>> {
    req.validate()?;

    let item = InventoryItem::update_quantity(&state.db, auth.owner_id, &name, req.quantity)
        .await?
        .ok_or_else(|| ApiError::NotFound("Item not found".to_string()))?;

    tracing::debug!(
        owner_id = auth.owner_id,
        name = %item.name,
        quantity = item.quantity,
        "Quantity updated"
    );

    Ok(Json(QuantityResponse {
        name: item.name,
        quantity: item.quantity,
    }))
}

/// Delete an item by id
///
/// The delete statement is scoped by owner in its WHERE clause; an id that
/// does not exist, or that belongs to another owner, deletes nothing and
/// reports 404. A forged id can therefore never remove someone else's row.
///
/// # Endpoint
///
/// ```text
/// DELETE /v1/items/:id
/// Authorization: Bearer <token>
/// ```
///
/// # Response
///
/// `204 No Content`
///
/// # Errors
///
/// - `401 Unauthorized`: Missing or invalid token
/// - `404 Not Found`: No such item for this owner
/// - `500 Internal Server Error`: Server error
pub async fn delete_item(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    let deleted = InventoryItem::delete(&state.db, auth.owner_id, id).await?;

    if !deleted {
        return Err(ApiError::NotFound("Item not found".to_string()));
    }

    tracing::info!(owner_id = auth.owner_id, item_id = id, "Item deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// Create form after multipart intake and validation
struct CreateItemForm {
    name: String,
    description: String,
    quantity: i64,
    price: f64,
    image: Option<Vec<u8>>,
}

/// Reads the multipart create form and validates every field
///
/// Problems are collected per field and reported together, so a form with a
/// missing name and a malformed price gets both messages in one response.
async fn read_create_form(mut multipart: Multipart) -> Result<CreateItemForm, ApiError> {
    let mut name: Option<String> = None;
    let mut description = String::new();
    let mut quantity: Option<String> = None;
    let mut price: Option<String> = None;
    let mut image: Option<Vec<u8>> = None;

    while let Some(field) = multipart.next_field().await? {
        let Some(field_name) = field.name().map(str::to_string) else {
            continue;
        };

        match field_name.as_str() {
            "name" => name = Some(field.text().await?),
            "description" => description = field.text().await?,
            "quantity" => quantity = Some(field.text().await?),
            "price" => price = Some(field.text().await?),
            "image" => {
                // The filename has to be captured before the content read
                // consumes the field; an empty filename is the "no image"
                // sentinel, handled by the codec.
                let filename = field.file_name().map(str::to_string);
                let content = field.bytes().await?;
                image = images::ingest(filename.as_deref(), &content);
            }
            _ => {}
        }
    }

    let mut errors = Vec::new();

    let name = name.unwrap_or_default();
    if name.is_empty() {
        errors.push(detail("name", "Name is required"));
    }

    let quantity = match parse_quantity(quantity.as_deref()) {
        Ok(value) => Some(value),
        Err(e) => {
            errors.push(e);
            None
        }
    };

    let price = match parse_price(price.as_deref()) {
        Ok(value) => Some(value),
        Err(e) => {
            errors.push(e);
            None
        }
    };

    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }

    Ok(CreateItemForm {
        name,
        description,
        // Both are Some when no error was collected
        quantity: quantity.unwrap_or_default(),
        price: price.unwrap_or_default(),
        image,
    })
}

/// Parses a quantity form value; rejects anything but a non-negative integer
fn parse_quantity(raw: Option<&str>) -> Result<i64, ValidationErrorDetail> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Err(detail("quantity", "Quantity is required"));
    };

    match raw.parse::<i64>() {
        Ok(value) if value >= 0 => Ok(value),
        Ok(_) => Err(detail("quantity", "Quantity must be non-negative")),
        Err(_) => Err(detail("quantity", "Quantity must be a whole number")),
    }
}

/// Parses a price form value; rejects anything but a non-negative number
fn parse_price(raw: Option<&str>) -> Result<f64, ValidationErrorDetail> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Err(detail("price", "Price is required"));
    };

    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => Ok(value),
        Ok(_) => Err(detail("price", "Price must be a non-negative number")),
        Err(_) => Err(detail("price", "Price must be a number")),
    }
}

fn detail(field: &str, message: &str) -> ValidationErrorDetail {
    ValidationErrorDetail {
        field: field.to_string(),
        message: message.to_string(),
    }
}
