use crate::{
    auth::CurrentUser,
    error::AppError,
    models::{Item, ItemInput},
    schemas::{item_schema, Links},
    store::Store,
};
use actix_web::{web, HttpResponse};

/// Loads an item for its author.
///
/// Existence is checked first (404), then ownership (403).
async fn owned_item(store: &dyn Store, item_id: i32, user: &CurrentUser) -> Result<Item, AppError> {
    let item = store
        .find_item(item_id)
        .await?
        .ok_or_else(AppError::not_found)?;
    if !user.owns(&item) {
        log::warn!("User {} denied access to item {}", user.id(), item_id);
        return Err(AppError::forbidden());
    }
    Ok(item)
}

/// Get an item (`GET /items/{item_id}`)
///
/// ## Responses:
/// - `200 OK`: the item representation.
/// - `403 Forbidden`: the item belongs to another user.
/// - `404 Not Found`: no item has this id.
pub async fn get_item(
    store: web::Data<dyn Store>,
    item_id: web::Path<i32>,
    user: CurrentUser,
    links: Links,
) -> Result<HttpResponse, AppError> {
    let item = owned_item(store.get_ref(), item_id.into_inner(), &user).await?;
    Ok(HttpResponse::Ok().json(item_schema(&item, &user, &links)))
}

/// Replace an item's body (`PUT /items/{item_id}`)
///
/// Expects `{"body": "..."}`. A missing or blank body is rejected with 400
/// and leaves the item untouched.
///
/// ## Responses:
/// - `204 No Content` on success.
/// - `400 Bad Request`, `403 Forbidden`, `404 Not Found` otherwise.
pub async fn edit_item(
    store: web::Data<dyn Store>,
    item_id: web::Path<i32>,
    user: CurrentUser,
    payload: web::Bytes,
) -> Result<HttpResponse, AppError> {
    let item = owned_item(store.get_ref(), item_id.into_inner(), &user).await?;
    let body = ItemInput::parse(&payload)?;
    store.update_item_body(item.id, &body).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Toggle an item's completion flag (`PATCH /items/{item_id}`)
pub async fn toggle_item(
    store: web::Data<dyn Store>,
    item_id: web::Path<i32>,
    user: CurrentUser,
) -> Result<HttpResponse, AppError> {
    let item = owned_item(store.get_ref(), item_id.into_inner(), &user).await?;
    let done = store.toggle_item(item.id).await?;
    log::debug!("Item {} is now done={}", item.id, done);
    Ok(HttpResponse::NoContent().finish())
}

/// Delete an item (`DELETE /items/{item_id}`)
pub async fn delete_item(
    store: web::Data<dyn Store>,
    item_id: web::Path<i32>,
    user: CurrentUser,
) -> Result<HttpResponse, AppError> {
    let item = owned_item(store.get_ref(), item_id.into_inner(), &user).await?;
    store.delete_item(item.id).await?;
    log::info!("User {} deleted item {}", user.id(), item.id);
    Ok(HttpResponse::NoContent().finish())
}
