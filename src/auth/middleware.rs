use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::{header, Method},
    web, Error, HttpMessage, ResponseError,
};
use futures::future::{ready, LocalBoxFuture, Ready};

use crate::auth::token::{Claims, TokenIssuer};
use crate::error::AppError;

/// Guards a resource behind a valid bearer token.
///
/// On success the decoded `Claims` are inserted into the request extensions,
/// where the `CurrentUser` extractor picks them up. The `TokenIssuer` is read
/// from application data.
pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService { service }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        // Preflight requests carry no credentials.
        if *req.method() == Method::OPTIONS {
            let fut = self.service.call(req);
            return Box::pin(async move { Ok(fut.await?.map_into_left_body()) });
        }

        match authenticate(&req) {
            Ok(claims) => {
                req.extensions_mut().insert(claims);
                let fut = self.service.call(req);
                Box::pin(async move { Ok(fut.await?.map_into_left_body()) })
            }
            Err(app_err) => {
                log::debug!("Rejected request to {}: {}", req.path(), app_err);
                let response = app_err.error_response();
                Box::pin(async move { Ok(req.into_response(response).map_into_right_body()) })
            }
        }
    }
}

fn authenticate(req: &ServiceRequest) -> Result<Claims, AppError> {
    let token = bearer_token(req.headers().get(header::AUTHORIZATION))?;
    let issuer = req
        .app_data::<web::Data<TokenIssuer>>()
        .ok_or_else(|| AppError::InternalServerError("TokenIssuer is not configured".into()))?;
    issuer.verify_token(token)
}

/// Splits `Authorization: <type> <token>` and insists on the bearer type.
fn bearer_token(value: Option<&header::HeaderValue>) -> Result<&str, AppError> {
    let value = value.ok_or_else(|| AppError::Unauthorized("Token missing.".into()))?;
    let bad_type = || AppError::BadRequest("The token type must be bearer.".into());

    let mut parts = value.to_str().map_err(|_| bad_type())?.trim().splitn(2, char::is_whitespace);
    let token_type = parts.next().unwrap_or_default();
    if !token_type.eq_ignore_ascii_case("bearer") {
        return Err(bad_type());
    }
    match parts.next().map(str::trim) {
        Some(token) if !token.is_empty() => Ok(token),
        _ => Err(AppError::Unauthorized("Token missing.".into())),
    }
}
