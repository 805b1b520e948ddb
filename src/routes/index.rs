use actix_web::{HttpResponse, Responder};

use crate::schemas::{index_document, Links};

/// API discovery document.
///
/// Lists the API version and the URL templates of every resource. Needs no
/// authentication and always succeeds.
pub async fn index(links: Links) -> impl Responder {
    HttpResponse::Ok().json(index_document(&links))
}
