#![allow(dead_code, unused_macros)]

use std::sync::Arc;

use actix_web::{body::MessageBody, dev::ServiceResponse, http::header, test, web};
use todo_api::auth::password::hash_password_with_cost;
use todo_api::auth::TokenIssuer;
use todo_api::config::Config;
use todo_api::models::User;
use todo_api::store::{MemoryStore, Store};

pub const PASSWORD: &str = "correct horse battery";
pub const HOST: &str = "todo.test";

pub struct TestState {
    pub store: web::Data<dyn Store>,
    pub issuer: web::Data<TokenIssuer>,
    pub config: web::Data<Config>,
}

pub fn test_config(items_per_page: u32) -> Config {
    let per_page = items_per_page.to_string();
    Config::from_lookup(move |key| match key {
        "JWT_SECRET" => Some("integration-secret".to_string()),
        "ITEMS_PER_PAGE" => Some(per_page.clone()),
        _ => None,
    })
    .expect("test configuration is valid")
}

pub fn test_state(items_per_page: u32) -> TestState {
    let config = test_config(items_per_page);
    let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
    TestState {
        store: web::Data::from(store),
        issuer: web::Data::new(TokenIssuer::new(&config.jwt_secret, config.token_expires_in)),
        config: web::Data::new(config),
    }
}

/// Builds the full application around a `TestState`.
macro_rules! test_app {
    ($state:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data($state.store.clone())
                .app_data($state.issuer.clone())
                .app_data($state.config.clone())
                .wrap(actix_web::middleware::Logger::default())
                .configure(todo_api::routes::config),
        )
        .await
    };
}

/// Creates a user directly in the store with a cheap bcrypt cost.
pub async fn seed_user(state: &TestState, username: &str) -> User {
    let hash = hash_password_with_cost(PASSWORD, 4).unwrap();
    state.store.create_user(username, &hash).await.unwrap()
}

pub async fn login(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
    >,
    username: &str,
) -> String {
    let req = test::TestRequest::post()
        .uri("/api/v1/token")
        .insert_header((header::HOST, HOST))
        .set_form([
            ("grant_type", "password"),
            ("username", username),
            ("password", PASSWORD),
        ])
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(app, req).await;
    body["access_token"]
        .as_str()
        .expect("token response carries an access_token")
        .to_string()
}

pub fn bearer(token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {}", token))
}
