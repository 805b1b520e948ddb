//! JSON representations of the API's resources.
//!
//! The builders here are pure: they take already-loaded entities plus a [`Links`]
//! value and return a `serde_json::Value` with the hyperlinks embedded.

use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::{Error as ActixError, FromRequest, HttpRequest};
use serde_json::{json, Value};

use crate::models::{Item, ItemCounts, Partition, User};
use crate::pagination::Pagination;
use crate::routes::API_PREFIX;

pub const API_VERSION: &str = "1.0";

/// Builds absolute URLs for the API's resources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Links {
    base: String,
}

impl Links {
    /// `base` is the absolute API root, e.g. `http://localhost:8080/api/v1`.
    pub fn new(base: impl Into<String>) -> Self {
        let mut base = base.into();
        while base.ends_with('/') {
            base.pop();
        }
        Self { base }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn token(&self) -> String {
        format!("{}/token", self.base)
    }

    pub fn user(&self) -> String {
        format!("{}/user", self.base)
    }

    pub fn item(&self, id: i32) -> String {
        format!("{}/items/{}", self.base, id)
    }

    pub fn items(&self, partition: Partition) -> String {
        format!("{}{}", self.base, partition.path())
    }

    /// One page of a partition. `per_page` is always carried so following the
    /// link keeps the page size the client asked for.
    pub fn items_page(&self, partition: Partition, page: i64, per_page: i64) -> String {
        format!(
            "{}?page={}&per_page={}",
            self.items(partition),
            page,
            per_page
        )
    }
}

/// Derives the API root from the request's scheme and host.
impl FromRequest for Links {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let info = req.connection_info();
        ready(Ok(Links::new(format!(
            "{}://{}{}",
            info.scheme(),
            info.host(),
            API_PREFIX
        ))))
    }
}

/// The discovery document served at the API root.
pub fn index_document(links: &Links) -> Value {
    let template = |partition| format!("{}{{?page,per_page}}", links.items(partition));
    json!({
        "api_version": API_VERSION,
        "api_base_url": links.base(),
        "current_user_url": links.user(),
        "authentication_url": links.token(),
        "item_url": format!("{}/items/{{item_id}}", links.base()),
        "current_user_items_url": template(Partition::All),
        "current_user_active_items_url": template(Partition::Active),
        "current_user_completed_items_url": template(Partition::Completed),
    })
}

pub fn user_schema(user: &User, counts: &ItemCounts, links: &Links) -> Value {
    json!({
        "id": user.id,
        "self": links.user(),
        "kind": "User",
        "username": user.username,
        "all_items_url": links.items(Partition::All),
        "active_items_url": links.items(Partition::Active),
        "completed_items_url": links.items(Partition::Completed),
        "all_item_count": counts.all,
        "active_item_count": counts.active,
        "completed_item_count": counts.completed,
    })
}

/// `author` must be the item's author; handlers only call this after the ownership check.
pub fn item_schema(item: &Item, author: &User, links: &Links) -> Value {
    debug_assert_eq!(item.user_id, author.id);
    json!({
        "id": item.id,
        "self": links.item(item.id),
        "kind": "Item",
        "body": item.body,
        "done": item.done,
        "author": {
            "id": author.id,
            "url": links.user(),
            "username": author.username,
            "kind": "User",
        },
    })
}

pub fn items_schema(
    items: &[Item],
    author: &User,
    pagination: &Pagination,
    partition: Partition,
    links: &Links,
) -> Value {
    let page_url = |page| links.items_page(partition, page, pagination.per_page);
    json!({
        "self": page_url(pagination.page),
        "kind": "ItemCollection",
        "items": items.iter().map(|item| item_schema(item, author, links)).collect::<Vec<_>>(),
        "prev": pagination.prev_page().map(page_url),
        "last": page_url(pagination.last_page()),
        "first": page_url(1),
        "next": pagination.next_page().map(page_url),
        "count": pagination.total,
    })
}
