use actix_web::dev::Payload;
use actix_web::{web, Error as ActixError, FromRequest, HttpMessage, HttpRequest};
use futures::future::LocalBoxFuture;

use crate::auth::token::Claims;
use crate::error::AppError;
use crate::models::User;
use crate::store::Store;

/// The authenticated principal for the current request.
///
/// Built from the `Claims` that `AuthMiddleware` leaves in the request
/// extensions, by loading the named user from the store. Handlers receive it
/// as an ordinary argument instead of reading ambient state.
///
/// A token whose user no longer exists is rejected as an invalid token.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl CurrentUser {
    pub fn id(&self) -> i32 {
        self.0.id
    }
}

impl std::ops::Deref for CurrentUser {
    type Target = User;

    fn deref(&self) -> &User {
        &self.0
    }
}

impl FromRequest for CurrentUser {
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let claims = req.extensions().get::<Claims>().cloned();
        let store = req.app_data::<web::Data<dyn Store>>().cloned();

        Box::pin(async move {
            let claims = claims.ok_or_else(|| {
                AppError::Unauthorized(
                    "Claims not found in request. Ensure AuthMiddleware is active.".to_string(),
                )
            })?;
            let store = store
                .ok_or_else(|| AppError::InternalServerError("Store is not configured".into()))?;

            match store.find_user(claims.sub).await? {
                Some(user) => Ok(CurrentUser(user)),
                None => Err(AppError::InvalidToken("Unknown token subject".into()).into()),
            }
        })
    }
}
