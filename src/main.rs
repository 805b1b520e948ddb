use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use todo_api::auth::TokenIssuer;
use todo_api::config::Config;
use todo_api::routes;
use todo_api::store::{MemoryStore, PgStore, Store};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = Config::from_env().map_err(|e| {
        log::error!("Invalid configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e)
    })?;

    let store: Arc<dyn Store> = match &config.database_url {
        Some(database_url) => {
            let store = PgStore::connect(database_url)
                .await
                .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
            store
                .migrate()
                .await
                .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
            log::info!("Using PostgreSQL store");
            Arc::new(store)
        }
        None => {
            log::warn!("DATABASE_URL not set, using in-memory store");
            Arc::new(MemoryStore::new())
        }
    };

    let store = web::Data::from(store);
    let issuer = web::Data::new(TokenIssuer::new(&config.jwt_secret, config.token_expires_in));
    let bind = (config.server_host.clone(), config.server_port);
    log::info!("Starting server at {}{}", config.server_url(), routes::API_PREFIX);
    let config = web::Data::new(config);

    HttpServer::new(move || {
        App::new()
            .app_data(store.clone())
            .app_data(issuer.clone())
            .app_data(config.clone())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .configure(routes::config)
    })
    .bind(bind)?
    .run()
    .await
}
