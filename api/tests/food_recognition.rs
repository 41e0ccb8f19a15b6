use std::{net::SocketAddr, sync::Arc};

use axum::{
    Json, Router,
    body::Bytes,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use axum_test::{
    TestServer,
    multipart::{MultipartForm, Part},
};
use clap::Parser;
use serde_json::json;
use smartfridge_api::{
    application::http::{
        food_recognition::handlers::{
            analyze_image::AnalysisResponse, get_knowledge_base::GetKnowledgeBaseResponse,
            home::HomeResponse,
        },
        health::ReadinessResponse,
        server::{
            api_entities::api_error::ApiErrorResponse,
            http_server::{router, state},
        },
    },
    args::Args,
};
use test_context::{AsyncTestContext, test_context};
use tokio::{net::TcpListener, task::JoinHandle};

/// Answers according to the uploaded bytes so one endpoint covers every
/// backend shape.
async fn stub_inference(body: Bytes) -> Response {
    match body.as_ref() {
        b"labels" => Json(json!([
            {"label": "Granny Smith apple", "score": 0.91},
            {"label": "banana", "score": 0.42},
            {"label": "refrigerator", "score": 0.88}
        ]))
        .into_response(),
        b"objects" => Json(json!({
            "objects": [
                {"name": "bottle of milk", "confidence": 0.77, "box": {"xmin": 1.0, "ymin": 2.0, "xmax": 30.0, "ymax": 60.0}},
                {"name": "egg", "confidence": 0.65}
            ]
        }))
        .into_response(),
        b"caption" => Json(json!([
            {"generated_text": "a plate of pasta next to a bottle of orange juice"}
        ]))
        .into_response(),
        b"empty" => Json(json!({"generated_text": "an empty white shelf"})).into_response(),
        _ => (StatusCode::SERVICE_UNAVAILABLE, "model is loading").into_response(),
    }
}

struct RecognitionContext {
    server: TestServer,
    backend: JoinHandle<()>,
}

impl AsyncTestContext for RecognitionContext {
    async fn setup() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr: SocketAddr = listener.local_addr().unwrap();
        let backend = tokio::spawn(async move {
            let app = Router::new().route("/infer", post(stub_inference));
            axum::serve(listener, app).await.unwrap();
        });

        let args = Args::parse_from([
            "smartfridge".to_string(),
            "--metrics-enabled".to_string(),
            "false".to_string(),
            "--inference-endpoint".to_string(),
            format!("http://{addr}/infer"),
            "--inference-timeout-seconds".to_string(),
            "5".to_string(),
        ]);

        let app_state = state(Arc::new(args)).unwrap();
        let server = TestServer::new(router(app_state).unwrap()).unwrap();

        Self { server, backend }
    }

    async fn teardown(self) {
        self.backend.abort();
    }
}

fn image_form(content: &'static [u8]) -> MultipartForm {
    MultipartForm::new().add_part(
        "image",
        Part::bytes(content.to_vec())
            .file_name("fridge.jpg")
            .mime_type("image/jpeg"),
    )
}

#[test_context(RecognitionContext)]
#[tokio::test]
async fn test_home(ctx: &mut RecognitionContext) {
    let response = ctx.server.get("/").await;

    response.assert_status_ok();
    let body: HomeResponse = response.json();
    assert!(body.usage.contains("/analyze"));
}

#[test_context(RecognitionContext)]
#[tokio::test]
async fn test_analyze_label_list(ctx: &mut RecognitionContext) {
    let response = ctx.server.post("/analyze").multipart(image_form(b"labels")).await;

    response.assert_status_ok();
    let body: AnalysisResponse = response.json();
    let result = body.data;

    assert!(result.has_food);
    assert_eq!(result.detections.len(), 3);
    assert_eq!(result.detections[0].label, "Granny Smith apple");

    let keywords: Vec<&str> = result
        .recommendations
        .iter()
        .map(|r| r.keyword.as_str())
        .collect();
    assert_eq!(keywords, vec!["apple", "banana"]);
}

#[test_context(RecognitionContext)]
#[tokio::test]
async fn test_analyze_with_threshold(ctx: &mut RecognitionContext) {
    let form = image_form(b"labels").add_text("confidence_threshold", "0.5");
    let response = ctx.server.post("/analyze").multipart(form).await;

    response.assert_status_ok();
    let body: AnalysisResponse = response.json();
    let keywords: Vec<&str> = body
        .data
        .recommendations
        .iter()
        .map(|r| r.keyword.as_str())
        .collect();
    assert_eq!(keywords, vec!["apple"]);
}

#[test_context(RecognitionContext)]
#[tokio::test]
async fn test_analyze_object_list(ctx: &mut RecognitionContext) {
    let response = ctx.server.post("/analyze").multipart(image_form(b"objects")).await;

    response.assert_status_ok();
    let body: AnalysisResponse = response.json();

    assert!(body.data.has_food);
    assert!(body.data.detections[0].bounding_box.is_some());
    let keywords: Vec<&str> = body
        .data
        .recommendations
        .iter()
        .map(|r| r.keyword.as_str())
        .collect();
    assert_eq!(keywords, vec!["milk", "egg"]);
}

#[test_context(RecognitionContext)]
#[tokio::test]
async fn test_analyze_caption(ctx: &mut RecognitionContext) {
    let response = ctx.server.post("/analyze").multipart(image_form(b"caption")).await;

    response.assert_status_ok();
    let body: AnalysisResponse = response.json();

    assert!(body.data.has_food);
    assert_eq!(
        body.data.description.as_deref(),
        Some("a plate of pasta next to a bottle of orange juice")
    );
    assert!(body.data.recommendations.iter().all(|r| r.confidence.is_none()));
    assert!(body.data.recommendations.iter().any(|r| r.keyword == "pasta"));
}

#[test_context(RecognitionContext)]
#[tokio::test]
async fn test_analyze_without_food(ctx: &mut RecognitionContext) {
    let response = ctx.server.post("/analyze").multipart(image_form(b"empty")).await;

    response.assert_status_ok();
    let body: AnalysisResponse = response.json();

    assert!(!body.data.has_food);
    assert!(body.data.recommendations.is_empty());
    assert!(body.data.suggestion.contains("No recognizable food"));
}

#[test_context(RecognitionContext)]
#[tokio::test]
async fn test_backend_failure_is_bad_gateway(ctx: &mut RecognitionContext) {
    let response = ctx.server.post("/analyze").multipart(image_form(b"fail")).await;

    response.assert_status(StatusCode::BAD_GATEWAY);
    let body: ApiErrorResponse = response.json();
    assert_eq!(body.status, 502);
    assert!(body.message.contains("503"));
}

#[test_context(RecognitionContext)]
#[tokio::test]
async fn test_missing_image_is_bad_request(ctx: &mut RecognitionContext) {
    let form = MultipartForm::new().add_text("confidence_threshold", "0.5");
    let response = ctx.server.post("/analyze").multipart(form).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: ApiErrorResponse = response.json();
    assert_eq!(body.message, "No image uploaded");
}

#[test_context(RecognitionContext)]
#[tokio::test]
async fn test_empty_image_is_bad_request(ctx: &mut RecognitionContext) {
    let response = ctx.server.post("/analyze").multipart(image_form(b"")).await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[test_context(RecognitionContext)]
#[tokio::test]
async fn test_threshold_out_of_range_is_bad_request(ctx: &mut RecognitionContext) {
    let form = image_form(b"labels").add_text("confidence_threshold", "2");
    let response = ctx.server.post("/analyze").multipart(form).await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[test_context(RecognitionContext)]
#[tokio::test]
async fn test_analyze_raw(ctx: &mut RecognitionContext) {
    let response = ctx
        .server
        .post("/analyze/raw")
        .json(&json!({
            "raw": [
                {"label": "cheese pizza", "score": 0.3},
                {"label": "pizza slice", "score": 0.8}
            ]
        }))
        .await;

    response.assert_status_ok();
    let body: AnalysisResponse = response.json();

    assert_eq!(body.data.recommendations.len(), 2);
    let pizza = body
        .data
        .recommendations
        .iter()
        .find(|r| r.keyword == "pizza")
        .unwrap();
    assert_eq!(pizza.confidence, Some(0.8));
}

#[test_context(RecognitionContext)]
#[tokio::test]
async fn test_analyze_raw_unrecognized_shape(ctx: &mut RecognitionContext) {
    let response = ctx
        .server
        .post("/analyze/raw")
        .json(&json!({"raw": {"unexpected": true}}))
        .await;

    response.assert_status_ok();
    let body: AnalysisResponse = response.json();
    assert!(!body.data.has_food);
    assert!(body.data.detections.is_empty());
}

#[test_context(RecognitionContext)]
#[tokio::test]
async fn test_analyze_raw_rejects_bad_threshold(ctx: &mut RecognitionContext) {
    let response = ctx
        .server
        .post("/analyze/raw")
        .json(&json!({"raw": [], "confidence_threshold": -0.1}))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

#[test_context(RecognitionContext)]
#[tokio::test]
async fn test_knowledge_base(ctx: &mut RecognitionContext) {
    let response = ctx.server.get("/knowledge-base").await;

    response.assert_status_ok();
    let body: GetKnowledgeBaseResponse = response.json();
    assert!(body.data.entries.iter().any(|e| e.keyword == "apple"));
    assert!(body.data.vocabulary.iter().any(|k| k == "food"));
}

#[test_context(RecognitionContext)]
#[tokio::test]
async fn test_health(ctx: &mut RecognitionContext) {
    ctx.server.get("/health/live").await.assert_status_ok();

    let response = ctx.server.get("/health/ready").await;
    response.assert_status_ok();
    let body: ReadinessResponse = response.json();
    assert_eq!(body.backend, "http");
    assert!(body.knowledge_entries > 0);
}

#[test_context(RecognitionContext)]
#[tokio::test]
async fn test_unknown_route_is_not_found(ctx: &mut RecognitionContext) {
    let response = ctx.server.get("/fridge/door").await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body: ApiErrorResponse = response.json();
    assert_eq!(body.code, "E_NOT_FOUND");
}

#[test_context(RecognitionContext)]
#[tokio::test]
async fn test_openapi_document(ctx: &mut RecognitionContext) {
    let response = ctx.server.get("/api-docs/openapi.json").await;

    response.assert_status_ok();
    let doc: serde_json::Value = response.json();
    assert!(doc["paths"]["/analyze"].is_object());
}
