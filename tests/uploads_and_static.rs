mod common;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use serde_json::json;

use common::{empty_request, multipart_request, sample_ticket, spawn_app, INDEX_HTML};

#[tokio::test]
async fn upload_writes_file_and_serves_it_back() {
    let app = spawn_app().await;
    let contents = b"\x89PNG\r\n\x1a\nnot-really-a-png";

    let (status, body) = app
        .json(multipart_request("image", "poster.PNG", contents))
        .await;
    assert_eq!(status, StatusCode::OK, "body: {body}");
    assert_eq!(body["originalName"], "poster.PNG");

    let image_path = body["imagePath"].as_str().expect("imagePath");
    let filename = image_path
        .strip_prefix("/uploads/")
        .expect("path under /uploads");
    assert!(filename.ends_with(".png"));

    let on_disk = app.config.uploads_dir.join(filename);
    assert_eq!(std::fs::read(&on_disk).expect("uploaded file"), contents);

    let (status, served) = app.request(empty_request(Method::GET, image_path)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(served, contents);
}

#[tokio::test]
async fn same_name_uploads_do_not_overwrite_each_other() {
    let app = spawn_app().await;

    let (_, first) = app.json(multipart_request("image", "a.jpg", b"first")).await;
    let (_, second) = app.json(multipart_request("image", "a.jpg", b"second")).await;
    assert_ne!(first["imagePath"], second["imagePath"]);

    for (body, expected) in [(&first, "first"), (&second, "second")] {
        let path = body["imagePath"].as_str().expect("imagePath");
        let file = app
            .config
            .uploads_dir
            .join(path.trim_start_matches("/uploads/"));
        assert_eq!(std::fs::read(file).expect("file"), expected.as_bytes());
    }
}

#[tokio::test]
async fn upload_without_image_field_is_400() {
    let app = spawn_app().await;

    let (status, body) = app
        .json(multipart_request("attachment", "poster.png", b"data"))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No image provided");

    // Nothing was written.
    assert!(!app.config.uploads_dir.exists());
}

#[tokio::test]
async fn upload_with_empty_file_input_is_400() {
    let app = spawn_app().await;

    let (status, body) = app.json(multipart_request("image", "", b"")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No image provided");
    assert!(!app.config.uploads_dir.exists());
}

#[tokio::test]
async fn upload_that_is_not_multipart_is_400() {
    let app = spawn_app().await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/tickets/upload")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{}"))
        .expect("request");
    let (status, body) = app.json(request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn upload_over_the_size_limit_is_rejected() {
    let app = spawn_app().await;
    let too_big = vec![7u8; app.config.max_upload_bytes + 1];

    let (status, _) = app.request(multipart_request("image", "big.png", &too_big)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(!app.config.uploads_dir.exists());
}

#[tokio::test]
async fn uploaded_path_can_be_stored_on_a_ticket() {
    let app = spawn_app().await;

    let (_, uploaded) = app.json(multipart_request("image", "t.webp", b"img")).await;
    let mut ticket = sample_ticket("With image");
    ticket["imagePath"] = uploaded["imagePath"].clone();

    let created = app.create_ticket(ticket).await;
    assert_eq!(created["imagePath"], uploaded["imagePath"]);
}

#[tokio::test]
async fn frontend_index_is_served_for_root_and_unknown_paths() {
    let app = spawn_app().await;

    for uri in ["/", "/tickets/12/edit", "/some/deep/link"] {
        let (status, body) = app.request(empty_request(Method::GET, uri)).await;
        assert_eq!(status, StatusCode::OK, "uri {uri}");
        assert_eq!(String::from_utf8_lossy(&body), INDEX_HTML, "uri {uri}");
    }
}

#[tokio::test]
async fn bundle_files_are_served_directly() {
    let app = spawn_app().await;

    let response = app.response(empty_request(Method::GET, "/assets/app.js")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CACHE_CONTROL],
        "public, max-age=31536000, immutable"
    );

    let (status, favicon) = app.request(empty_request(Method::GET, "/favicon.ico")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(favicon, vec![0u8, 0, 1, 0]);

    let (status, _) = app
        .request(empty_request(Method::GET, "/assets/missing.js"))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn responses_carry_security_and_cors_headers() {
    let app = spawn_app().await;

    let preflight = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/tickets")
        .header(header::ORIGIN, "http://localhost:3000")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "PUT")
        .body(Body::empty())
        .expect("request");

    let response = app.response(preflight).await;
    let headers = response.headers();
    assert_eq!(
        headers[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "http://localhost:3000"
    );
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
    assert_eq!(headers[header::ACCESS_CONTROL_MAX_AGE], "43200");

    let response = app.response(empty_request(Method::GET, "/health")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::X_CONTENT_TYPE_OPTIONS], "nosniff");
    assert_eq!(response.headers()[header::X_FRAME_OPTIONS], "DENY");

    let (_, body) = app.get("/health").await;
    assert_eq!(body, json!({ "status": "OK", "service": "tocket-api" }));
}
