//! Vision module - cloud label detection for food photos
//!
//! Thin client for the Google Cloud Vision `images:annotate` REST endpoint,
//! restricted to LABEL_DETECTION. One call per analysis request; any failure
//! here is fatal to that request.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};
use tracing::debug;

use platelens_domain::LabelDetector;
use platelens_types::{Error, Result};

const DEFAULT_ENDPOINT: &str = "https://vision.googleapis.com/v1/images:annotate";
const MAX_LABEL_RESULTS: u32 = 10;

/// Vision client configuration
#[derive(Debug, Clone)]
pub struct VisionConfig {
    pub api_key: String,
    pub endpoint: String,
}

impl VisionConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }

    /// Point the client at a different endpoint (tests, proxies).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

/// Label detection client for the Google Cloud Vision REST API.
#[derive(Debug, Clone)]
pub struct GoogleVisionClient {
    http: reqwest::Client,
    config: VisionConfig,
}

impl GoogleVisionClient {
    pub fn new(config: VisionConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }
}

#[derive(Debug, Serialize)]
struct AnnotateRequest {
    requests: Vec<ImageRequest>,
}

#[derive(Debug, Serialize)]
struct ImageRequest {
    image: ImageContent,
    features: Vec<Feature>,
}

#[derive(Debug, Serialize)]
struct ImageContent {
    /// Base64-encoded image bytes
    content: String,
}

#[derive(Debug, Serialize)]
struct Feature {
    #[serde(rename = "type")]
    feature_type: &'static str,
    #[serde(rename = "maxResults")]
    max_results: u32,
}

#[derive(Debug, Deserialize)]
pub struct AnnotateResponse {
    #[serde(default)]
    pub responses: Vec<ImageResponse>,
}

#[derive(Debug, Deserialize)]
pub struct ImageResponse {
    #[serde(rename = "labelAnnotations", default)]
    pub label_annotations: Vec<LabelAnnotation>,

    /// Per-image error the API reports inside a 200 body
    #[serde(default)]
    pub error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
pub struct LabelAnnotation {
    pub description: String,

    #[serde(default)]
    pub score: f64,
}

#[derive(Debug, Deserialize)]
pub struct ApiError {
    #[serde(default)]
    pub code: i32,
    #[serde(default)]
    pub message: String,
}

fn annotate_body(image: &[u8]) -> AnnotateRequest {
    AnnotateRequest {
        requests: vec![ImageRequest {
            image: ImageContent {
                content: BASE64.encode(image),
            },
            features: vec![Feature {
                feature_type: "LABEL_DETECTION",
                max_results: MAX_LABEL_RESULTS,
            }],
        }],
    }
}

/// Extract label descriptions from an annotate response, emission order kept.
pub fn labels_from_response(response: AnnotateResponse) -> Result<Vec<String>> {
    let image_response = response
        .responses
        .into_iter()
        .next()
        .ok_or_else(|| Error::upstream("vision", "empty annotate response"))?;

    if let Some(api_error) = image_response.error {
        return Err(Error::upstream(
            "vision",
            format!("{} (code {})", api_error.message, api_error.code),
        ));
    }

    Ok(image_response
        .label_annotations
        .into_iter()
        .map(|a| a.description)
        .collect())
}

#[async_trait]
impl LabelDetector for GoogleVisionClient {
    async fn detect_labels(&self, image: &[u8]) -> Result<Vec<String>> {
        let response = self
            .http
            .post(&self.config.endpoint)
            .query(&[("key", self.config.api_key.as_str())])
            .json(&annotate_body(image))
            .send()
            .await
            .map_err(|e| Error::upstream("vision", e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::upstream(
                "vision",
                format!("status {status}: {body}"),
            ));
        }

        let annotate: AnnotateResponse = response
            .json()
            .await
            .map_err(|e| Error::upstream("vision", e.to_string()))?;

        let labels = labels_from_response(annotate)?;
        debug!(count = labels.len(), "vision labels received");
        Ok(labels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_label_annotations_in_order() {
        let response: AnnotateResponse = serde_json::from_value(serde_json::json!({
            "responses": [{
                "labelAnnotations": [
                    {"description": "Banana", "score": 0.98},
                    {"description": "Fruit", "score": 0.95},
                    {"description": "Table", "score": 0.61}
                ]
            }]
        }))
        .unwrap();

        let labels = labels_from_response(response).unwrap();
        assert_eq!(labels, vec!["Banana", "Fruit", "Table"]);
    }

    #[test]
    fn in_body_error_is_upstream_failure() {
        let response: AnnotateResponse = serde_json::from_value(serde_json::json!({
            "responses": [{
                "error": {"code": 7, "message": "invalid API key"}
            }]
        }))
        .unwrap();

        let err = labels_from_response(response).unwrap_err();
        assert!(matches!(err, Error::Upstream { service: "vision", .. }));
    }

    #[test]
    fn missing_annotations_yield_empty_labels() {
        let response: AnnotateResponse =
            serde_json::from_value(serde_json::json!({"responses": [{}]})).unwrap();
        assert!(labels_from_response(response).unwrap().is_empty());
    }

    #[test]
    fn request_body_has_label_detection_feature() {
        let body = serde_json::to_value(annotate_body(b"img")).unwrap();
        assert_eq!(
            body["requests"][0]["features"][0]["type"],
            "LABEL_DETECTION"
        );
        assert!(body["requests"][0]["image"]["content"].is_string());
    }
}
