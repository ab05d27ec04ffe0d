use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::header::{CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE};
use axum::http::{Request, StatusCode};
use axum::response::Response;
use companyrating_application::{AdminAuthService, RatingService};
use companyrating_infrastructure::{Argon2PasswordHasher, InMemoryRatingRepository};
use serde_json::{Value, json};
use tower::ServiceExt;

use crate::api_services::build_memory_session_layer;
use crate::state::{AppState, UploadSettings};
use crate::visibility::RatingsVisibility;

use super::{StaticDirs, build_router};

fn test_router() -> Router {
    let upload_dir = std::env::temp_dir().join("companyrating-router-tests");
    let public_dir = PathBuf::from("public");

    let admin_auth_service = AdminAuthService::new(
        "admin",
        "s3cret",
        Arc::new(Argon2PasswordHasher::new()),
    )
    .unwrap_or_else(|_| unreachable!());
    let app_state = AppState {
        rating_service: RatingService::new(Arc::new(InMemoryRatingRepository::new())),
        admin_auth_service,
        visibility: RatingsVisibility::new(),
        uploads: UploadSettings::new(upload_dir.clone()),
        postgres_pool: None,
    };

    build_router(
        app_state,
        None,
        StaticDirs {
            public_dir: public_dir.as_path(),
            upload_dir: upload_dir.as_path(),
        },
        build_memory_session_layer(false),
    )
    .unwrap_or_else(|_| unreachable!())
}

fn request(method: &str, uri: &str, cookie: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }

    let body = match body {
        Some(body) => {
            builder = builder.header(CONTENT_TYPE, "application/json");
            Body::from(body.to_string())
        }
        None => Body::empty(),
    };

    builder.body(body).unwrap_or_else(|_| unreachable!())
}

async fn send(router: &Router, request: Request<Body>) -> Response {
    router
        .clone()
        .oneshot(request)
        .await
        .unwrap_or_else(|_| unreachable!())
}

async fn json_body(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap_or_default();
    serde_json::from_slice(&bytes).unwrap_or(Value::Null)
}

async fn login(router: &Router) -> String {
    let response = send(
        router,
        request(
            "POST",
            "/api/login",
            None,
            Some(json!({ "username": "admin", "password": "s3cret" })),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    response
        .headers()
        .get(SET_COOKIE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(ToOwned::to_owned)
        .unwrap_or_default()
}

#[tokio::test]
async fn anonymous_mutations_are_unauthorized() {
    let router = test_router();

    let update = send(
        &router,
        request(
            "POST",
            "/api/update",
            None,
            Some(json!({ "name": "Acme", "subcompany": "East", "rating": 10 })),
        ),
    )
    .await;
    assert_eq!(update.status(), StatusCode::UNAUTHORIZED);

    let delete = send(
        &router,
        request("POST", "/api/delete", None, Some(json!({ "name": "Acme" }))),
    )
    .await;
    assert_eq!(delete.status(), StatusCode::UNAUTHORIZED);

    let visibility = send(
        &router,
        request(
            "PUT",
            "/api/ratings-visibility",
            None,
            Some(json!({ "value": false })),
        ),
    )
    .await;
    assert_eq!(visibility.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn wrong_credentials_are_rejected() {
    let router = test_router();

    let response = send(
        &router,
        request(
            "POST",
            "/api/login",
            None,
            Some(json!({ "username": "admin", "password": "guess" })),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().get(SET_COOKIE).is_none());
}

#[tokio::test]
async fn session_lifecycle_is_reported_by_me() {
    let router = test_router();

    let anonymous = json_body(send(&router, request("GET", "/api/me", None, None)).await).await;
    assert_eq!(anonymous, json!({ "authenticated": false }));

    let cookie = login(&router).await;
    let me = json_body(send(&router, request("GET", "/api/me", Some(&cookie), None)).await).await;
    assert_eq!(
        me,
        json!({ "authenticated": true, "user": { "username": "admin" } })
    );

    let logout = send(&router, request("POST", "/api/logout", Some(&cookie), None)).await;
    assert_eq!(logout.status(), StatusCode::OK);

    let after = json_body(send(&router, request("GET", "/api/me", Some(&cookie), None)).await).await;
    assert_eq!(after["authenticated"], json!(false));
}

#[tokio::test]
async fn admin_can_create_read_and_delete_ratings() {
    let router = test_router();
    let cookie = login(&router).await;

    let created = send(
        &router,
        request(
            "POST",
            "/api/update",
            Some(&cookie),
            Some(json!({ "name": "Acme", "subcompany": "East", "rating": 1200 })),
        ),
    )
    .await;
    assert_eq!(created.status(), StatusCode::OK);
    let created = json_body(created).await;
    assert_eq!(created["success"], json!(true));
    assert_eq!(created["company"]["rating"], json!(1200.0));
    assert_eq!(created["company"]["video"], json!(""));

    let fetched = send(
        &router,
        request("GET", "/api/company?name=Acme&subcompany=East", None, None),
    )
    .await;
    assert_eq!(fetched.status(), StatusCode::OK);

    let listed = json_body(send(&router, request("GET", "/api/companies", None, None)).await).await;
    assert_eq!(listed.as_array().map(Vec::len), Some(1));

    let deleted = send(
        &router,
        request(
            "POST",
            "/api/delete",
            Some(&cookie),
            Some(json!({ "name": "acme", "subcompany": "EAST" })),
        ),
    )
    .await;
    assert_eq!(deleted.status(), StatusCode::OK);
    assert_eq!(json_body(deleted).await["deletedCount"], json!(1));

    let missing = send(
        &router,
        request(
            "POST",
            "/api/delete",
            Some(&cookie),
            Some(json!({ "name": "acme", "subcompany": "EAST" })),
        ),
    )
    .await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    let missing = json_body(missing).await;
    assert_eq!(missing["deletedCount"], json!(0));
    assert_eq!(missing["success"], json!(false));
}

#[tokio::test]
async fn rename_onto_existing_pair_conflicts() {
    let router = test_router();
    let cookie = login(&router).await;

    for (name, subcompany) in [("Acme", "East"), ("Beta", "West")] {
        let saved = send(
            &router,
            request(
                "POST",
                "/api/update",
                Some(&cookie),
                Some(json!({ "name": name, "subcompany": subcompany, "rating": 1 })),
            ),
        )
        .await;
        assert_eq!(saved.status(), StatusCode::OK);
    }

    let conflict = send(
        &router,
        request(
            "POST",
            "/api/update",
            Some(&cookie),
            Some(json!({
                "name": "Beta",
                "subcompany": "West",
                "rating": 2,
                "originalName": "Acme",
                "originalSubcompany": "East"
            })),
        ),
    )
    .await;
    assert_eq!(conflict.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn rename_moves_the_record_to_its_new_identity() {
    let router = test_router();
    let cookie = login(&router).await;

    let created = send(
        &router,
        request(
            "POST",
            "/api/update",
            Some(&cookie),
            Some(json!({ "name": "Acme", "subcompany": "East", "rating": 1 })),
        ),
    )
    .await;
    let record_id = json_body(created).await["company"]["recordId"].clone();

    let renamed = send(
        &router,
        request(
            "POST",
            "/api/update",
            Some(&cookie),
            Some(json!({
                "name": "Acme Corp",
                "subcompany": "North",
                "rating": 2,
                "originalName": "Acme",
                "originalSubcompany": "East"
            })),
        ),
    )
    .await;
    assert_eq!(renamed.status(), StatusCode::OK);
    assert_eq!(json_body(renamed).await["company"]["recordId"], record_id);

    let listed = json_body(send(&router, request("GET", "/api/companies", None, None)).await).await;
    assert_eq!(listed.as_array().map(Vec::len), Some(1));
    assert_eq!(listed[0]["name"], json!("Acme Corp"));
}

#[tokio::test]
async fn invalid_requests_map_to_client_errors() {
    let router = test_router();
    let cookie = login(&router).await;

    let out_of_range = send(
        &router,
        request(
            "POST",
            "/api/update",
            Some(&cookie),
            Some(json!({ "name": "Acme", "subcompany": "East", "rating": 5001 })),
        ),
    )
    .await;
    assert_eq!(out_of_range.status(), StatusCode::BAD_REQUEST);

    let missing_key = send(
        &router,
        request("GET", "/api/company?name=Acme", None, None),
    )
    .await;
    assert_eq!(missing_key.status(), StatusCode::BAD_REQUEST);

    let unknown = send(
        &router,
        request("GET", "/api/company?name=Acme&subcompany=East", None, None),
    )
    .await;
    assert_eq!(unknown.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn listing_tolerates_garbage_parameters() {
    let router = test_router();

    let response = send(
        &router,
        request(
            "GET",
            "/api/companies?limit=abc&sort=__proto__&order=sideways",
            None,
            None,
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!([]));
}

#[tokio::test]
async fn visibility_flag_round_trips_for_admins() {
    let router = test_router();
    let cookie = login(&router).await;

    let initial = json_body(
        send(&router, request("GET", "/api/ratings-visibility", None, None)).await,
    )
    .await;
    assert_eq!(initial, json!({ "value": true }));

    let updated = send(
        &router,
        request(
            "PUT",
            "/api/ratings-visibility",
            Some(&cookie),
            Some(json!({ "value": false })),
        ),
    )
    .await;
    assert_eq!(updated.status(), StatusCode::OK);

    let current = json_body(
        send(&router, request("GET", "/api/ratings-visibility", None, None)).await,
    )
    .await;
    assert_eq!(current, json!({ "value": false }));
}

#[tokio::test]
async fn upload_requires_admin_session() {
    let router = test_router();

    let response = send(
        &router,
        Request::builder()
            .method("POST")
            .uri("/api/upload-video")
            .header(CONTENT_TYPE, "multipart/form-data; boundary=X")
            .body(Body::from("--X--\r\n"))
            .unwrap_or_else(|_| unreachable!()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn admin_upload_stores_video() {
    let router = test_router();
    let cookie = login(&router).await;
    let body = "--X\r\n\
        Content-Disposition: form-data; name=\"video\"; filename=\"clip.mp4\"\r\n\
        Content-Type: video/mp4\r\n\r\n\
        fake-video-bytes\r\n\
        --X--\r\n";

    let response = send(
        &router,
        Request::builder()
            .method("POST")
            .uri("/api/upload-video")
            .header(COOKIE, cookie.as_str())
            .header(CONTENT_TYPE, "multipart/form-data; boundary=X")
            .body(Body::from(body))
            .unwrap_or_else(|_| unreachable!()),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let payload = json_body(response).await;
    let video_path = payload["videoPath"].as_str().unwrap_or_default();
    assert!(video_path.starts_with("/uploads/"));
    assert!(video_path.ends_with(".mp4"));
}

#[tokio::test]
async fn admin_pages_redirect_anonymous_visitors() {
    let router = test_router();

    let response = send(&router, request("GET", "/admin.html", None, None)).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok()),
        Some("/login.html?next=%2Fadmin.html")
    );
}

#[tokio::test]
async fn health_reports_memory_store_ready() {
    let router = test_router();

    let response = send(&router, request("GET", "/health", None, None)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let payload = json_body(response).await;
    assert_eq!(payload["status"], json!("ok"));
    assert_eq!(payload["store"]["status"], json!("memory"));
}
