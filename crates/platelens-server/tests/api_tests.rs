//! Integration tests for the platelens-server API
//!
//! Drives the router directly with `tower::ServiceExt::oneshot`, with mock
//! collaborators standing in for the three external services.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::Value;
use tower::util::ServiceExt;

use platelens_app::AnalysisPipeline;
use platelens_domain::{LabelDetector, NutritionSource, RecipeSource};
use platelens_server::{build_router, AppState};
use platelens_types::{Error, MacroRecord, RecipeStub, Result};

const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

// ---------------------------------------------------------------------------
// Mock collaborators
// ---------------------------------------------------------------------------

struct FixedLabels(Vec<&'static str>);

#[async_trait]
impl LabelDetector for FixedLabels {
    async fn detect_labels(&self, _image: &[u8]) -> Result<Vec<String>> {
        Ok(self.0.iter().map(|s| s.to_string()).collect())
    }
}

struct FailingDetector;

#[async_trait]
impl LabelDetector for FailingDetector {
    async fn detect_labels(&self, _image: &[u8]) -> Result<Vec<String>> {
        Err(Error::upstream("vision", "labeler unreachable"))
    }
}

struct BananaNutrition;

#[async_trait]
impl NutritionSource for BananaNutrition {
    async fn macros_per_100g(&self, _canonical_name: &str) -> Result<Option<MacroRecord>> {
        Ok(Some(MacroRecord {
            calories: "89 KCAL".to_string(),
            protein: "1.1 G".to_string(),
            carbs: "23 G".to_string(),
            fiber: "N/A".to_string(),
        }))
    }
}

struct NoNutrition;

#[async_trait]
impl NutritionSource for NoNutrition {
    async fn macros_per_100g(&self, _canonical_name: &str) -> Result<Option<MacroRecord>> {
        Ok(None)
    }
}

struct FixedRecipes(Vec<RecipeStub>);

#[async_trait]
impl RecipeSource for FixedRecipes {
    async fn recipes_for(&self, _ingredient: &str) -> Result<Vec<RecipeStub>> {
        Ok(self.0.clone())
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn setup_app(
    detector: impl LabelDetector + 'static,
    nutrition: impl NutritionSource + 'static,
    recipes: impl RecipeSource + 'static,
) -> axum::Router {
    let pipeline = Arc::new(AnalysisPipeline::new(
        Arc::new(detector),
        Arc::new(nutrition),
        Arc::new(recipes),
    ));
    build_router(AppState::new(pipeline))
}

/// Build a multipart request body with a single field.
fn multipart_request(field_name: &str, file_name: &str, data: &[u8]) -> Request<Body> {
    let boundary = "platelens-test-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; \
             name=\"{field_name}\"; filename=\"{file_name}\"\r\n\
             Content-Type: application/octet-stream\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri("/analyze")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

fn banana_recipe() -> RecipeStub {
    RecipeStub {
        title: "Banana Pancakes".to_string(),
        url: "https://www.themealdb.com/meal/52855".to_string(),
        image: "https://www.themealdb.com/images/media/meals/sywswr.jpg".to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_endpoint_reports_ok() {
    let app = setup_app(FixedLabels(vec![]), NoNutrition, FixedRecipes(vec![]));

    let request = Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "platelens-server");
}

#[tokio::test]
async fn missing_image_field_is_a_client_error() {
    let app = setup_app(FixedLabels(vec![]), NoNutrition, FixedRecipes(vec![]));

    // A multipart body with some other field but no "image"
    let request = multipart_request("attachment", "notes.txt", b"hello");
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"], "No image uploaded");
}

#[tokio::test]
async fn non_image_bytes_are_rejected() {
    let app = setup_app(FixedLabels(vec![]), NoNutrition, FixedRecipes(vec![]));

    let request = multipart_request("image", "notes.txt", b"plain text, not an image");
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"], "Unsupported image format");
}

#[tokio::test]
async fn no_allow_listed_food_is_a_message_not_an_error() {
    let app = setup_app(
        FixedLabels(vec!["Table", "Chair", "Furniture"]),
        NoNutrition,
        FixedRecipes(vec![]),
    );

    let request = multipart_request("image", "table.png", PNG_MAGIC);
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["message"], "No food items found");
    assert!(body.get("detected_foods").is_none());
}

#[tokio::test]
async fn full_analysis_response_shape() {
    let app = setup_app(
        FixedLabels(vec!["Banana", "Fruit", "Table"]),
        BananaNutrition,
        FixedRecipes(vec![banana_recipe()]),
    );

    let request = multipart_request("image", "banana.png", PNG_MAGIC);
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;

    assert_eq!(body["detected_foods"], serde_json::json!(["Banana"]));
    assert_eq!(
        body["macros per 100g"]["banana, raw"]["calories"],
        "89 KCAL"
    );
    assert_eq!(body["macros per 100g"]["banana, raw"]["fiber"], "N/A");
    assert_eq!(body["recipes"][0]["title"], "Banana Pancakes");
    assert_eq!(
        body["recipes"][0]["url"],
        "https://www.themealdb.com/meal/52855"
    );
}

#[tokio::test]
async fn empty_recipes_serialize_as_literal_marker() {
    let app = setup_app(
        FixedLabels(vec!["Banana"]),
        BananaNutrition,
        FixedRecipes(vec![]),
    );

    let request = multipart_request("image", "banana.png", PNG_MAGIC);
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    // The marker string, not an empty array
    assert_eq!(body["recipes"], "no recipes found");
}

#[tokio::test]
async fn vision_failure_maps_to_bad_gateway() {
    let app = setup_app(FailingDetector, NoNutrition, FixedRecipes(vec![]));

    let request = multipart_request("image", "banana.png", PNG_MAGIC);
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = extract_json(response.into_body()).await;
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("labeler unreachable"));
}
