#[macro_use]
mod common;

use actix_web::http::{header, StatusCode};
use actix_web::test;
use common::{bearer, login, seed_user, test_state, HOST};
use pretty_assertions::assert_eq;
use serde_json::Value;
use todo_api::store::Store;

fn list_request(path: &str, token: &str) -> actix_http::Request {
    test::TestRequest::get()
        .uri(&format!("/api/v1{}", path))
        .insert_header((header::HOST, HOST))
        .insert_header(bearer(token))
        .to_request()
}

fn ids(collection: &Value) -> Vec<i64> {
    collection["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["id"].as_i64().unwrap())
        .collect()
}

#[actix_rt::test]
async fn test_pages_of_all_items() {
    let state = test_state(2);
    let alice = seed_user(&state, "alice").await;
    let mut created = Vec::new();
    for n in 1..=5 {
        let item = state
            .store
            .create_item(alice.id, &format!("item {}", n))
            .await
            .unwrap();
        created.push(i64::from(item.id));
    }
    let app = test_app!(state);
    let token = login(&app, "alice").await;
    let page_url = |n: i64| format!("http://todo.test/api/v1/user/items?page={}&per_page=2", n);

    let first: Value = test::call_and_read_body_json(&app, list_request("/user/items", &token)).await;
    assert_eq!(first["kind"], "ItemCollection");
    assert_eq!(first["count"], 5);
    assert_eq!(first["self"], page_url(1));
    assert_eq!(first["prev"], Value::Null);
    assert_eq!(first["next"], page_url(2));
    assert_eq!(first["first"], page_url(1));
    assert_eq!(first["last"], page_url(3));
    assert_eq!(ids(&first), created[0..2].to_vec());

    let last: Value =
        test::call_and_read_body_json(&app, list_request("/user/items?page=3", &token)).await;
    assert_eq!(last["prev"], page_url(2));
    assert_eq!(last["next"], Value::Null);
    assert_eq!(ids(&last), created[4..].to_vec());

    let resp = test::call_service(&app, list_request("/user/items?page=4", &token)).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = test::call_service(&app, list_request("/user/items?page=0", &token)).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let garbage: Value =
        test::call_and_read_body_json(&app, list_request("/user/items?page=abc", &token)).await;
    assert_eq!(garbage["self"], page_url(1));

    let wide: Value =
        test::call_and_read_body_json(&app, list_request("/user/items?per_page=10", &token)).await;
    assert_eq!(ids(&wide), created);
    assert_eq!(wide["next"], Value::Null);
}

#[actix_rt::test]
async fn test_links_keep_the_requested_page_size() {
    let state = test_state(20);
    let alice = seed_user(&state, "alice").await;
    let mut created = Vec::new();
    for n in 1..=5 {
        let item = state
            .store
            .create_item(alice.id, &format!("item {}", n))
            .await
            .unwrap();
        created.push(i64::from(item.id));
    }
    let app = test_app!(state);
    let token = login(&app, "alice").await;

    let first: Value =
        test::call_and_read_body_json(&app, list_request("/user/items?per_page=2", &token)).await;
    assert_eq!(
        first["next"],
        "http://todo.test/api/v1/user/items?page=2&per_page=2"
    );
    assert_eq!(
        first["last"],
        "http://todo.test/api/v1/user/items?page=3&per_page=2"
    );

    // Walk the next links to the end.
    let mut seen = ids(&first);
    let mut next = first["next"].clone();
    while let Some(url) = next.as_str() {
        let path = url.trim_start_matches("http://todo.test/api/v1");
        let resp = test::call_service(&app, list_request(path, &token)).await;
        assert_eq!(resp.status(), StatusCode::OK, "GET {}", url);
        let page: Value = test::read_body_json(resp).await;
        assert!(page["items"].as_array().unwrap().len() <= 2);
        seen.extend(ids(&page));
        next = page["next"].clone();
    }
    assert_eq!(seen, created);
}

#[actix_rt::test]
async fn test_partitions_filter_by_done() {
    let state = test_state(20);
    let alice = seed_user(&state, "alice").await;
    let bob = seed_user(&state, "bob").await;
    let mut done_ids = Vec::new();
    let mut open_ids = Vec::new();
    for n in 0..4 {
        let item = state
            .store
            .create_item(alice.id, &format!("item {}", n))
            .await
            .unwrap();
        if n % 2 == 1 {
            state.store.toggle_item(item.id).await.unwrap();
            done_ids.push(i64::from(item.id));
        } else {
            open_ids.push(i64::from(item.id));
        }
    }
    state.store.create_item(bob.id, "not alice's").await.unwrap();
    let app = test_app!(state);
    let token = login(&app, "alice").await;

    let all: Value = test::call_and_read_body_json(&app, list_request("/user/items", &token)).await;
    assert_eq!(all["count"], 4);

    let active: Value =
        test::call_and_read_body_json(&app, list_request("/user/items/active", &token)).await;
    assert_eq!(active["count"], 2);
    assert_eq!(ids(&active), open_ids);
    assert_eq!(
        active["last"],
        "http://todo.test/api/v1/user/items/active?page=1&per_page=20"
    );

    let completed: Value =
        test::call_and_read_body_json(&app, list_request("/user/items/completed", &token)).await;
    assert_eq!(completed["count"], 2);
    assert_eq!(ids(&completed), done_ids);
    assert!(completed["items"]
        .as_array()
        .unwrap()
        .iter()
        .all(|item| item["done"] == true));
}

#[actix_rt::test]
async fn test_empty_collection_is_a_single_page() {
    let state = test_state(20);
    seed_user(&state, "alice").await;
    let app = test_app!(state);
    let token = login(&app, "alice").await;

    let empty: Value =
        test::call_and_read_body_json(&app, list_request("/user/items/completed", &token)).await;
    assert_eq!(empty["count"], 0);
    assert_eq!(empty["items"], serde_json::json!([]));
    assert_eq!(empty["prev"], Value::Null);
    assert_eq!(empty["next"], Value::Null);

    let resp = test::call_service(&app, list_request("/user/items/completed?page=2", &token)).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn test_clear_completed_items() {
    let state = test_state(20);
    let alice = seed_user(&state, "alice").await;
    let keep = state.store.create_item(alice.id, "keep").await.unwrap();
    let finished = state.store.create_item(alice.id, "finished").await.unwrap();
    state.store.toggle_item(finished.id).await.unwrap();
    let app = test_app!(state);
    let token = login(&app, "alice").await;

    let req = test::TestRequest::delete()
        .uri("/api/v1/user/items/completed")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    assert!(state.store.find_item(finished.id).await.unwrap().is_none());
    assert!(state.store.find_item(keep.id).await.unwrap().is_some());
}
