use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ValidationIssue;

#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    pub text: String,
}

impl QueryRequest {
    /// Decodes a `/query` body. A missing content type is read as JSON;
    /// any other non-JSON type never yields an object.
    pub fn from_body(content_type: Option<&str>, body: &[u8]) -> Result<Self, ValidationIssue> {
        if body.is_empty() {
            return Err(ValidationIssue::missing(vec!["body"]));
        }
        if !content_type.is_none_or(is_json_content_type) {
            return Err(ValidationIssue::not_an_object());
        }

        let value: Value =
            serde_json::from_slice(body).map_err(|_| ValidationIssue::json_invalid())?;
        let Value::Object(mut fields) = value else {
            return Err(ValidationIssue::not_an_object());
        };
        match fields.remove("text") {
            Some(Value::String(text)) => Ok(QueryRequest { text }),
            Some(_) => Err(ValidationIssue::not_a_string(vec!["body", "text"])),
            None => Err(ValidationIssue::missing(vec!["body", "text"])),
        }
    }
}

/// `application/json` and any `application/*+json`, ignoring parameters.
fn is_json_content_type(content_type: &str) -> bool {
    let essence = content_type.split(';').next().unwrap_or_default().trim();
    let Some((main, sub)) = essence.split_once('/') else {
        return false;
    };
    main.eq_ignore_ascii_case("application")
        && (sub.eq_ignore_ascii_case("json") || sub.to_ascii_lowercase().ends_with("+json"))
}

#[derive(Debug, Serialize)]
pub struct StatusMessage {
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResponse {
    pub user_input: String,
    pub detected_labels: DetectedLabels,
    pub search_results: Vec<SearchResult>,
    pub llm_response: LlmResponse,
    pub processing_info: ProcessingInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedLabels {
    pub threat: f64,
    pub toxic: f64,
}

/// One retrieved training example similar to the user's input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub rank: u32,
    pub similarity_score: f64,
    pub text: String,
    pub labels: ToxicityLabels,
    pub primary_emotion: String,
    pub toxicity_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToxicityLabels {
    pub toxic: u8,
    pub severe_toxic: u8,
    pub obscene: u8,
    pub threat: u8,
    pub insult: u8,
    pub identity_hate: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmResponse {
    pub analysis_type: String,
    pub classification: String,
    pub toxicity_ratio: f64,
    pub user_offensive_words: u32,
    pub confidence: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessingInfo {
    pub confidence_threshold: f64,
    pub search_limit: u32,
    pub use_local_llm: bool,
    pub similar_examples_found: u32,
}

#[test]
fn test_from_body_accepts_json_like_content_types() {
    for content_type in [
        None,
        Some("application/json"),
        Some("Application/JSON; charset=utf-8"),
        Some("application/vnd.api+json"),
    ] {
        let request = QueryRequest::from_body(content_type, br#"{"text":"hi"}"#).unwrap();
        assert_eq!(request.text, "hi", "{content_type:?}");
    }
}

#[test]
fn test_from_body_classifies_failures() {
    let cases: [(Option<&str>, &[u8], &str, Vec<&str>); 7] = [
        (Some("text/plain"), br#"{"text":"hi"}"#, "model_attributes_type", vec!["body"]),
        (Some("json"), br#"{"text":"hi"}"#, "model_attributes_type", vec!["body"]),
        (None, b"", "missing", vec!["body"]),
        (None, br#"{"text": "#, "json_invalid", vec!["body"]),
        (None, br#"["hi"]"#, "model_attributes_type", vec!["body"]),
        (None, br#"{"text": 42}"#, "string_type", vec!["body", "text"]),
        (None, br#"{"txt": "hi"}"#, "missing", vec!["body", "text"]),
    ];
    for (content_type, body, kind, loc) in cases {
        let issue = QueryRequest::from_body(content_type, body).unwrap_err();
        assert_eq!(issue.kind, kind, "{content_type:?} {body:?}");
        assert_eq!(issue.loc, loc);
    }
}
