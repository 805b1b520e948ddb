pub mod auth;
pub mod index;
pub mod items;
pub mod user;

use actix_web::{web, HttpResponse};

use crate::auth::AuthMiddleware;
use crate::error::AppError;

/// Mount point of every API route.
pub const API_PREFIX: &str = "/api/v1";

async fn method_not_allowed() -> Result<HttpResponse, AppError> {
    Err(AppError::MethodNotAllowed(
        "The method is not allowed for the requested URL.".into(),
    ))
}

async fn not_found() -> Result<HttpResponse, AppError> {
    Err(AppError::NotFound(
        "The requested URL was not found on the server.".into(),
    ))
}

/// Registers the API under [`API_PREFIX`].
///
/// Expects `web::Data<dyn Store>`, `web::Data<TokenIssuer>` and `web::Data<Config>`
/// to be provided by the application.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        AppError::BadRequest(err.to_string()).into()
    }))
    .app_data(web::FormConfig::default().error_handler(|err, _req| {
        AppError::BadRequest(err.to_string()).into()
    }))
    .app_data(web::PathConfig::default().error_handler(|_err, _req| AppError::not_found().into()))
    .service(
        web::scope(API_PREFIX)
            .service(
                web::resource(["", "/"])
                    .route(web::get().to(index::index))
                    .default_service(web::to(method_not_allowed)),
            )
            .service(
                web::resource("/token")
                    .route(web::post().to(auth::issue_token))
                    .default_service(web::to(method_not_allowed)),
            )
            .service(
                web::resource("/register")
                    .route(web::post().to(auth::register))
                    .default_service(web::to(method_not_allowed)),
            )
            .service(
                web::resource("/user")
                    .wrap(AuthMiddleware)
                    .route(web::get().to(user::get_user))
                    .default_service(web::to(method_not_allowed)),
            )
            .service(
                web::resource("/user/items")
                    .wrap(AuthMiddleware)
                    .route(web::get().to(user::list_all_items))
                    .route(web::post().to(user::create_item))
                    .default_service(web::to(method_not_allowed)),
            )
            .service(
                web::resource("/user/items/active")
                    .wrap(AuthMiddleware)
                    .route(web::get().to(user::list_active_items))
                    .default_service(web::to(method_not_allowed)),
            )
            .service(
                web::resource("/user/items/completed")
                    .wrap(AuthMiddleware)
                    .route(web::get().to(user::list_completed_items))
                    .route(web::delete().to(user::clear_completed_items))
                    .default_service(web::to(method_not_allowed)),
            )
            .service(
                web::resource("/items/{item_id}")
                    .wrap(AuthMiddleware)
                    .route(web::get().to(items::get_item))
                    .route(web::put().to(items::edit_item))
                    .route(web::patch().to(items::toggle_item))
                    .route(web::delete().to(items::delete_item))
                    .default_service(web::to(method_not_allowed)),
            )
            .default_service(web::to(not_found)),
    );
}
