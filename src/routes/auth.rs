use crate::{
    auth::{
        hash_password, verify_password, verify_unknown_user, RegisterRequest, TokenIssuer,
        TokenRequest, TokenResponse,
    },
    error::AppError,
    models::ItemCounts,
    schemas::{user_schema, Links},
    store::Store,
};
use actix_web::{http::header, web, HttpResponse};
use validator::Validate;

/// Issue an access token (`POST /token`)
///
/// Accepts the form fields of an OAuth2 password grant. An unsupported grant
/// type, an unknown username and a wrong password all fail with the same bare
/// 400 so the response does not reveal which part was wrong.
///
/// The token response must not be cached, hence `Cache-Control: no-store` and
/// `Pragma: no-cache`.
pub async fn issue_token(
    store: web::Data<dyn Store>,
    issuer: web::Data<TokenIssuer>,
    form: web::Form<TokenRequest>,
) -> Result<HttpResponse, AppError> {
    let form = form.into_inner();
    if !form.is_password_grant() {
        return Err(AppError::bad_request());
    }

    let username = form.username.unwrap_or_default();
    let password = form.password.unwrap_or_default();

    let user = store.find_user_by_username(&username).await?;
    let verified = match &user {
        Some(user) => verify_password(&password, &user.password_hash)?,
        None => verify_unknown_user(&password),
    };
    let user = match user {
        Some(user) if verified => user,
        _ => {
            log::warn!("Rejected token request for username {:?}", username);
            return Err(AppError::bad_request());
        }
    };

    let (token, expires_in) = issuer.generate_token(user.id)?;
    log::info!("Issued access token for user {}", user.id);

    Ok(HttpResponse::Ok()
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .insert_header((header::PRAGMA, "no-cache"))
        .json(TokenResponse::bearer(token, expires_in)))
}

/// Register a new user (`POST /register`)
///
/// Creates an account and returns its user representation.
pub async fn register(
    store: web::Data<dyn Store>,
    links: Links,
    register_data: web::Json<RegisterRequest>,
) -> Result<HttpResponse, AppError> {
    register_data.validate()?;

    let password_hash = hash_password(&register_data.password)?;
    let user = store
        .create_user(&register_data.username, &password_hash)
        .await?;
    log::info!("Registered user {} ({})", user.id, user.username);

    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, links.user()))
        .json(user_schema(&user, &ItemCounts::default(), &links)))
}
