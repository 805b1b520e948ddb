use crate::{
    auth::CurrentUser,
    config::Config,
    error::AppError,
    models::{ItemInput, Partition},
    pagination::{PageQuery, Pagination},
    schemas::{item_schema, items_schema, user_schema, Links},
    store::Store,
};
use actix_web::{http::header, web, HttpResponse};

/// The authenticated user's own representation (`GET /user`)
pub async fn get_user(
    store: web::Data<dyn Store>,
    user: CurrentUser,
    links: Links,
) -> Result<HttpResponse, AppError> {
    let counts = store.count_items(user.id()).await?;
    Ok(HttpResponse::Ok().json(user_schema(&user, &counts, &links)))
}

/// Renders one page of the current user's items in `partition`.
///
/// `page` defaults to 1; `per_page` defaults to the configured page size.
/// Pages outside the collection are 404.
async fn list_partition(
    store: &dyn Store,
    config: &Config,
    user: &CurrentUser,
    links: &Links,
    query: &PageQuery,
    partition: Partition,
) -> Result<HttpResponse, AppError> {
    let counts = store.count_items(user.id()).await?;
    let pagination = Pagination::new(
        query.page(),
        query.per_page(config.items_per_page),
        counts.get(partition),
    )?;
    let items = store
        .list_items(user.id(), partition, pagination.per_page, pagination.offset())
        .await?;
    Ok(HttpResponse::Ok().json(items_schema(&items, user, &pagination, partition, links)))
}

/// `GET /user/items`
pub async fn list_all_items(
    store: web::Data<dyn Store>,
    config: web::Data<Config>,
    user: CurrentUser,
    links: Links,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, AppError> {
    list_partition(store.get_ref(), &config, &user, &links, &query, Partition::All).await
}

/// `GET /user/items/active`
pub async fn list_active_items(
    store: web::Data<dyn Store>,
    config: web::Data<Config>,
    user: CurrentUser,
    links: Links,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, AppError> {
    list_partition(store.get_ref(), &config, &user, &links, &query, Partition::Active).await
}

/// `GET /user/items/completed`
pub async fn list_completed_items(
    store: web::Data<dyn Store>,
    config: web::Data<Config>,
    user: CurrentUser,
    links: Links,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, AppError> {
    list_partition(store.get_ref(), &config, &user, &links, &query, Partition::Completed).await
}

/// Create an item (`POST /user/items`)
///
/// Expects `{"body": "..."}`; responds `201 Created` with the new item and a
/// `Location` header pointing at it.
pub async fn create_item(
    store: web::Data<dyn Store>,
    user: CurrentUser,
    links: Links,
    payload: web::Bytes,
) -> Result<HttpResponse, AppError> {
    let body = ItemInput::parse(&payload)?;
    let item = store.create_item(user.id(), &body).await?;
    log::info!("User {} created item {}", user.id(), item.id);

    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, links.item(item.id)))
        .json(item_schema(&item, &user, &links)))
}

/// Delete every completed item (`DELETE /user/items/completed`)
pub async fn clear_completed_items(
    store: web::Data<dyn Store>,
    user: CurrentUser,
) -> Result<HttpResponse, AppError> {
    let removed = store.clear_completed(user.id()).await?;
    log::info!("User {} cleared {} completed items", user.id(), removed);
    Ok(HttpResponse::NoContent().finish())
}
