use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value as JsonValue};
use tower::ServiceExt;
use users_api::{build_router, config::Config, AppState};

fn setup_app() -> Router {
    build_router(AppState::new(&Config::default()))
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<JsonValue>,
) -> (StatusCode, JsonValue) {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    let body = if bytes.is_empty() {
        JsonValue::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn ids(body: &JsonValue) -> Vec<u64> {
    body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|user| user["id"].as_u64().unwrap())
        .collect()
}

#[tokio::test]
async fn list_returns_envelope_with_defaults() {
    let app = setup_app();
    let (status, body) = send(&app, "GET", "/users", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["page"], json!(1));
    assert_eq!(body["per_page"], json!(6));
    assert_eq!(body["total"], json!(3));
    assert_eq!(body["total_pages"], json!(1));
    assert_eq!(ids(&body), vec![1, 2, 3]);
}

#[tokio::test]
async fn list_paginates_seed_users() {
    let app = setup_app();
    let (status, body) = send(&app, "GET", "/users?page=1&per_page=2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec![1, 2]);
    assert_eq!(body["total"], json!(3));
    assert_eq!(body["total_pages"], json!(2));

    let (_, body) = send(&app, "GET", "/users?page=2&per_page=2", None).await;
    assert_eq!(ids(&body), vec![3]);
}

#[tokio::test]
async fn list_page_beyond_range_is_empty() {
    let app = setup_app();
    let (status, body) = send(&app, "GET", "/users?page=9999", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([]));
    assert_eq!(body["total"], json!(3));
}

#[tokio::test]
async fn list_rejects_malformed_pagination() {
    let app = setup_app();
    for uri in [
        "/users?page=abc",
        "/users?per_page=-1",
        "/users?per_page=0",
        "/users?page=1.5",
    ] {
        let (status, body) = send(&app, "GET", uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(body["message"], json!("Invalid pagination parameters"));
    }
}

#[tokio::test]
async fn get_single_user() {
    let app = setup_app();
    let (status, user) = send(&app, "GET", "/users/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(user["first_name"], json!("George"));
    assert_eq!(user["last_name"], json!("Bluth"));
    assert_eq!(user["email"], json!("george.bluth@reqres.in"));
    assert_eq!(user["avatar"], json!("https://reqres.in/img/faces/1-image.jpg"));
    assert!(user["created_at"].is_string());
    assert!(user["updated_at"].is_string());
}

#[tokio::test]
async fn get_unknown_user_is_not_found() {
    let app = setup_app();
    for uri in ["/users/9999", "/users/abc"] {
        let (status, body) = send(&app, "GET", uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{}", uri);
        assert_eq!(body["message"], json!("User not found"));
    }
}

#[tokio::test]
async fn create_user_assigns_id_and_timestamps() {
    let app = setup_app();
    let new_user = json!({
        "first_name": "Alice",
        "last_name": "Baba",
        "email": "alice.baba@reqres.in.com",
        "avatar": "https://reqres.in/img/faces/4-image.jpg",
        "job": "leader",
        "id": 77,
        "created_at": "1970-01-01T00:00:00Z"
    });
    let (status, user) = send(&app, "POST", "/users", Some(new_user)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(user["id"], json!(4));
    assert_eq!(user["first_name"], json!("Alice"));
    assert_eq!(user["avatar"], json!("https://reqres.in/img/faces/4-image.jpg"));
    assert_eq!(user["job"], json!("leader"));
    assert_ne!(user["created_at"], json!("1970-01-01T00:00:00Z"));
    assert_eq!(user["created_at"], user["updated_at"]);

    let (status, fetched) = send(&app, "GET", "/users/4", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, user);
}

#[tokio::test]
async fn create_user_requires_fields() {
    let app = setup_app();
    let (status, body) = send(&app, "POST", "/users", Some(json!({ "name": "X" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], json!("Invalid user data"));

    let (_, listing) = send(&app, "GET", "/users", None).await;
    assert_eq!(listing["total"], json!(3));
}

#[tokio::test]
async fn create_user_rejects_malformed_bodies() {
    let app = setup_app();
    let (status, body) = send(&app, "POST", "/users", Some(json!(["not", "an", "object"]))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], json!("Invalid user data"));

    let req = Request::builder()
        .method("POST")
        .uri("/users")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = Request::builder()
        .method("POST")
        .uri("/users")
        .body(Body::from(
            json!({ "first_name": "A", "last_name": "B", "email": "c" }).to_string(),
        ))
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_user_merges_fields() {
    let app = setup_app();
    let (_, before) = send(&app, "GET", "/users/1", None).await;

    let changes = json!({ "name": "Alice Updated", "email": "alice_updated@reqres.in.com", "id": 42 });
    let (status, user) = send(&app, "PUT", "/users/1", Some(changes)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(user["id"], json!(1));
    assert_eq!(user["name"], json!("Alice Updated"));
    assert_eq!(user["email"], json!("alice_updated@reqres.in.com"));
    assert_eq!(user["first_name"], before["first_name"]);
    assert_eq!(user["created_at"], before["created_at"]);

    let before_updated: chrono::DateTime<chrono::Utc> =
        serde_json::from_value(before["updated_at"].clone()).unwrap();
    let after_updated: chrono::DateTime<chrono::Utc> =
        serde_json::from_value(user["updated_at"].clone()).unwrap();
    assert!(after_updated >= before_updated);
}

#[tokio::test]
async fn update_user_can_clear_avatar() {
    let app = setup_app();
    let (status, user) = send(&app, "PUT", "/users/2", Some(json!({ "avatar": null }))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(user.get("avatar").is_none());
}

#[tokio::test]
async fn update_unknown_user_is_not_found() {
    let app = setup_app();
    let (status, body) = send(&app, "PUT", "/users/9999", Some(json!({ "name": "Nobody" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], json!("User not found"));

    let (status, _) = send(&app, "PUT", "/users/9999", Some(json!({ "email": 5 }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, "PUT", "/users/1", Some(json!({ "email": 5 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], json!("Invalid user data"));
}

#[tokio::test]
async fn delete_user_then_not_found() {
    let app = setup_app();
    let (status, body) = send(&app, "DELETE", "/users/2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], json!("User deleted"));

    let (status, _) = send(&app, "GET", "/users/2", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, "DELETE", "/users/2", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], json!("User not found"));
}

#[tokio::test]
async fn deleted_newest_id_is_reused() {
    let app = setup_app();
    let new_user = json!({
        "first_name": "To Be Deleted",
        "last_name": "Also To Be Deleted",
        "email": "delete@example.com"
    });
    let (status, created) = send(&app, "POST", "/users", Some(new_user.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["id"], json!(4));

    let (status, _) = send(&app, "DELETE", "/users/4", None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, recreated) = send(&app, "POST", "/users", Some(new_user)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(recreated["id"], json!(4));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_creates_get_distinct_ids() {
    let app = setup_app();
    let mut handles = Vec::new();
    for n in 0..20 {
        let app = app.clone();
        handles.push(tokio::spawn(async move {
            let body = json!({
                "first_name": format!("User{}", n),
                "last_name": "Concurrent",
                "email": format!("user{}@example.com", n)
            });
            let (status, user) = send(&app, "POST", "/users", Some(body)).await;
            assert_eq!(status, StatusCode::CREATED);
            user["id"].as_u64().unwrap()
        }));
    }

    let mut created = Vec::new();
    for handle in handles {
        created.push(handle.await.unwrap());
    }
    created.sort_unstable();
    assert_eq!(created, (4..24).collect::<Vec<u64>>());

    let (_, listing) = send(&app, "GET", "/users?per_page=100", None).await;
    assert_eq!(listing["total"], json!(23));
}

#[tokio::test]
async fn empty_store_starts_at_id_one() {
    let config = Config {
        seed_users: false,
        ..Config::default()
    };
    let app = build_router(AppState::new(&config));
    let (_, listing) = send(&app, "GET", "/users", None).await;
    assert_eq!(listing["total"], json!(0));
    assert_eq!(listing["total_pages"], json!(0));

    let body = json!({ "first_name": "A", "last_name": "B", "email": "a@b.c" });
    let (status, user) = send(&app, "POST", "/users", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(user["id"], json!(1));
}

#[tokio::test]
async fn health_reports_user_count() {
    let app = setup_app();
    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], json!("ok"));
    assert_eq!(body["users"], json!(3));
}
