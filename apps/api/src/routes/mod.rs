pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::resumes::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Browser flow
        .route("/", get(handlers::handle_index))
        .route("/upload", post(handlers::handle_upload))
        .route("/export_csv", get(handlers::handle_export_csv))
        // JSON API
        .route("/api/v1/resumes", post(handlers::handle_api_upload))
        .route("/api/v1/resumes/:batch_id", get(handlers::handle_get_batch))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
        response::Response,
    };
    use http_body_util::BodyExt;
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::extraction::docx::tests::make_test_docx;

    const BOUNDARY: &str = "resume-parser-test-boundary";

    fn test_state() -> AppState {
        AppState::new(Config {
            persist_uploads: false,
            ..Config::default()
        })
        .unwrap()
    }

    fn multipart_body(files: &[(&str, &[u8])]) -> Vec<u8> {
        let mut body = Vec::new();
        for (filename, bytes) in files {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\n\
                     Content-Disposition: form-data; name=\"resumes\"; filename=\"{filename}\"\r\n\
                     Content-Type: application/octet-stream\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(bytes);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    fn upload_request(uri: &str, files: &[(&str, &[u8])]) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(multipart_body(files)))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn body_string(response: Response) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn alice_docx() -> Vec<u8> {
        make_test_docx(&["Name: Alice Smith", "alice@example.com"])
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let response = build_router(test_state()).oneshot(get("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json: Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["stored_batches"], 0);
    }

    #[tokio::test]
    async fn index_serves_upload_form() {
        let response = build_router(test_state()).oneshot(get("/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_string(response).await.contains("multipart/form-data"));
    }

    #[tokio::test]
    async fn upload_renders_results_and_exports_csv() {
        let app = build_router(test_state());
        let docx = alice_docx();

        let response = app
            .clone()
            .oneshot(upload_request(
                "/upload",
                &[
                    ("alice.docx", docx.as_slice()),
                    ("notes.txt", &b"Name: Ignored Person"[..]),
                ],
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_string(response).await;
        assert!(html.contains("Alice Smith"));
        assert!(!html.contains("Ignored Person"));
        assert!(html.contains("1 file(s) skipped"));

        let marker = "/export_csv?batch=";
        let start = html.find(marker).expect("results page links the CSV export") + marker.len();
        let export_uri = format!("{marker}{}", &html[start..start + 36]);

        let response = app.oneshot(get(&export_uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"parsed_resumes.csv\""
        );
        assert_eq!(
            body_string(response).await,
            "Filename,Name,Email\nalice.docx,Alice Smith,alice@example.com\n"
        );
    }

    #[tokio::test]
    async fn upload_without_files_redirects_to_form() {
        let response = build_router(test_state())
            .oneshot(upload_request("/upload", &[]))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/");
    }

    #[tokio::test]
    async fn export_before_any_upload_is_header_only() {
        let response = build_router(test_state())
            .oneshot(get("/export_csv"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "Filename,Name,Email\n");
    }

    #[tokio::test]
    async fn export_without_batch_id_never_returns_other_uploads() {
        let app = build_router(test_state());
        let docx = alice_docx();

        let response = app
            .clone()
            .oneshot(upload_request("/upload", &[("a.docx", docx.as_slice())]))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app.oneshot(get("/export_csv")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "Filename,Name,Email\n");
    }

    #[tokio::test]
    async fn export_of_unknown_batch_is_not_found() {
        let uri = format!("/export_csv?batch={}", uuid::Uuid::new_v4());
        let response = build_router(test_state()).oneshot(get(&uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn api_upload_returns_records_and_batch_is_retrievable() {
        let app = build_router(test_state());
        let docx = alice_docx();

        let response = app
            .clone()
            .oneshot(upload_request(
                "/api/v1/resumes",
                &[
                    ("photo.png", &b"\x89PNG"[..]),
                    ("alice.docx", docx.as_slice()),
                ],
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json: Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(json["received"], 2);
        assert_eq!(json["records"].as_array().unwrap().len(), 1);
        assert_eq!(json["records"][0]["filename"], "alice.docx");
        assert_eq!(json["records"][0]["name"], "Alice Smith");
        assert_eq!(json["records"][0]["email"], "alice@example.com");

        let batch_id = json["batch_id"].as_str().unwrap().to_string();
        let response = app
            .oneshot(get(&format!("/api/v1/resumes/{batch_id}")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let stored: Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(stored["records"], json["records"]);
    }

    #[tokio::test]
    async fn api_upload_without_files_is_rejected() {
        let response = build_router(test_state())
            .oneshot(upload_request("/api/v1/resumes", &[]))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn uploads_are_persisted_to_working_storage() {
        let dir = tempfile::tempdir().unwrap();
        let state = AppState::new(Config {
            upload_dir: dir.path().to_path_buf(),
            ..Config::default()
        })
        .unwrap();
        let docx = alice_docx();

        let response = build_router(state)
            .oneshot(upload_request("/api/v1/resumes", &[("alice.docx", docx.as_slice())]))
            .await
            .unwrap();
        let json: Value = serde_json::from_str(&body_string(response).await).unwrap();
        let batch_id = json["batch_id"].as_str().unwrap();

        let stored = dir.path().join(batch_id).join("alice.docx");
        assert_eq!(std::fs::read(stored).unwrap(), docx);
    }
}
