pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::feedback::handlers::handle_feedback;
use crate::generation::handlers::{handle_generate, handle_summarize};
use crate::state::AppState;
use crate::upload::handlers::handle_upload;

/// Room for multipart boundaries and part headers on top of the file itself.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state
        .config
        .max_upload_bytes
        .saturating_add(MULTIPART_OVERHEAD_BYTES);

    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/upload",
            post(handle_upload).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/api/generate", post(handle_generate))
        .route("/api/feedback", post(handle_feedback))
        .route("/api/summarize", post(handle_summarize))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{header, Method, Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use tempfile::TempDir;
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::llm_client::testing::{gateway_with, StubGenerator};
    use crate::llm_client::LlmError;
    use crate::upload::storage::LocalStore;

    const BOUNDARY: &str = "autowebinar-test-boundary";

    fn test_app(stub: Arc<StubGenerator>) -> (Router, TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::for_tests(dir.path());
        let state = AppState {
            llm: gateway_with(stub),
            store: Arc::new(LocalStore::new(config.upload_dir.clone())),
            config,
        };
        (build_router(state), dir)
    }

    fn json_request(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn multipart_request(field: &str, file_name: &str, content: &[u8]) -> Request<Body> {
        let mut body = format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; \
             filename=\"{file_name}\"\r\nContent-Type: video/mp4\r\n\r\n"
        )
        .into_bytes();
        body.extend_from_slice(content);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        Request::builder()
            .method(Method::POST)
            .uri("/api/upload")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn valid_generate_body() -> Value {
        json!({
            "name": "副業スタートアップ講座",
            "genre": "会社員",
            "text": "このオンライン講座では副業の始め方を基礎から学べます。現役マーケターが実践的なノウハウを直接指導します。",
            "price": "29800",
            "salesPeriod": "limited",
            "aiModel": "grok"
        })
    }

    #[tokio::test]
    async fn test_health() {
        let (app, _dir) = test_app(StubGenerator::canned());
        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "autowebinar-api");
    }

    #[tokio::test]
    async fn test_generate_success_returns_all_artifacts() {
        let stub = StubGenerator::canned();
        let (app, _dir) = test_app(stub.clone());

        let response = app
            .oneshot(json_request("/api/generate", valid_generate_body()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["success"], true);
        assert!(body["lpHtml"].as_str().unwrap().contains("副業スタートアップ講座"));
        assert!(body["script"].as_str().unwrap().contains("00:00"));
        assert!(body["adCopy"]["short"].as_str().unwrap().contains("30日"));
        assert!(!body["adCopy"]["long"].as_str().unwrap().is_empty());
        assert!(uuid::Uuid::parse_str(body["sessionId"].as_str().unwrap()).is_ok());
        assert_eq!(stub.calls(), 4);
    }

    #[tokio::test]
    async fn test_generate_missing_name_is_rejected_before_any_call() {
        let stub = StubGenerator::canned();
        let (app, _dir) = test_app(stub.clone());

        let response = app
            .oneshot(json_request(
                "/api/generate",
                json!({ "name": "  ", "text": "説明文です" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "必須項目が不足しています");
        assert_eq!(body["fields"]["name"], "商品名が必要です");
        assert!(body["fields"]["text"].is_null());
        assert_eq!(stub.calls(), 0);
    }

    #[tokio::test]
    async fn test_generate_malformed_json_is_bad_request() {
        let (app, _dir) = test_app(StubGenerator::canned());
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/generate")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_generate_provider_failure_returns_no_partial_result() {
        let stub = StubGenerator::new(|_| {
            Err(LlmError::Api {
                status: 503,
                message: "overloaded".to_string(),
            })
        });
        let (app, _dir) = test_app(stub);

        let response = app
            .oneshot(json_request("/api/generate", valid_generate_body()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert!(body["error"].as_str().unwrap().ends_with("の生成に失敗しました"));
        assert!(body.get("lpHtml").is_none());
        assert!(body.get("script").is_none());
        assert!(body.get("adCopy").is_none());
    }

    #[tokio::test]
    async fn test_generate_wrong_method_is_405() {
        let (app, _dir) = test_app(StubGenerator::canned());
        let response = app
            .oneshot(Request::get("/api/generate").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_upload_stores_file_locally() {
        let (app, dir) = test_app(StubGenerator::canned());

        let response = app
            .oneshot(multipart_request("file", "intro.mp4", b"fake video"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["fileName"], "intro.mp4");
        assert_eq!(body["fileSize"], 10);

        let path = body["filePath"].as_str().unwrap();
        assert!(path.starts_with(dir.path().join("uploads").to_string_lossy().as_ref()));
        assert!(path.ends_with("-intro.mp4"));
        assert_eq!(std::fs::read(path).unwrap(), b"fake video");
    }

    #[tokio::test]
    async fn test_upload_without_file_field_is_bad_request() {
        let (app, _dir) = test_app(StubGenerator::canned());

        let response = app
            .oneshot(multipart_request("other", "intro.mp4", b"fake video"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "ファイルが見つかりません");
    }

    #[tokio::test]
    async fn test_upload_over_limit_is_413() {
        let (app, dir) = test_app(StubGenerator::canned());
        let oversized = vec![b'x'; 2048];

        let response = app
            .oneshot(multipart_request("file", "big.mp4", &oversized))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert!(!dir.path().join("uploads").exists());
    }

    #[tokio::test]
    async fn test_feedback_is_written_to_disk() {
        let (app, dir) = test_app(StubGenerator::canned());

        let response = app
            .oneshot(json_request(
                "/api/feedback",
                json!({ "feedback": "とても便利でした", "rating": 5, "sessionId": "abc" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({ "success": true }));

        let entries: Vec<_> = std::fs::read_dir(dir.path().join("feedback"))
            .unwrap()
            .map(|e| e.unwrap().path())
            .collect();
        assert_eq!(entries.len(), 1);
        let written = std::fs::read_to_string(&entries[0]).unwrap();
        assert!(written.contains("Rating: 5/5"));
        assert!(written.contains("Session ID: abc"));
        assert!(written.contains("とても便利でした"));
    }

    #[tokio::test]
    async fn test_feedback_rating_zero_is_rejected_and_not_written() {
        let (app, dir) = test_app(StubGenerator::canned());

        let response = app
            .oneshot(json_request(
                "/api/feedback",
                json!({ "feedback": "良かった", "rating": 0 }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(!dir.path().join("feedback").exists());
    }

    #[tokio::test]
    async fn test_summarize_placeholder() {
        let (app, _dir) = test_app(StubGenerator::canned());
        let response = app
            .oneshot(json_request("/api/summarize", json!({})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["message"], "要約・抽出処理は今後実装予定です");
    }
}
