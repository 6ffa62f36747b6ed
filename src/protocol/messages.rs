//! Request and response bodies exchanged with the study backend.
//!
//! Generation is a multipart upload and clarification a url-encoded form;
//! every response is JSON.

use serde::{Deserialize, Serialize};

pub mod endpoints {
    pub const PROCESS: &str = "/process";
    pub const HISTORY: &str = "/history";
    pub const CLARIFY: &str = "/clarify";
    pub const DELETE: &str = "/delete";
}

/// Multipart field names of `/process`.
pub mod fields {
    pub const PROMPT: &str = "prompt";
    pub const MODE: &str = "mode";
    pub const FILE_TYPE: &str = "fileType";
    pub const FILE: &str = "file";
    pub const EXAM_TIME: &str = "examTime";
    pub const SYLLABUS: &str = "syllabus";
    pub const STUDY_HOURS: &str = "studyHours";
}

/// Body of a successful `/process` call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub response: String,
    #[serde(default)]
    pub context: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryResponse {
    #[serde(default)]
    pub history: Vec<HistoryRecord>,
}

/// One stored generation. Text columns may be null.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub id: i64,
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub context: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// Url-encoded body of `/clarify`.
#[derive(Debug, Clone, Serialize)]
pub struct ClarifyForm<'a> {
    pub question: &'a str,
    pub doubt: &'a str,
    pub context: &'a str,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClarifyResponse {
    pub response: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteRequest {
    pub id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}

/// Whatever message a failed call put in its JSON body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorBody {
    pub fn into_message(self) -> Option<String> {
        self.error.or(self.response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_response_without_context() {
        let body: GenerateResponse =
            serde_json::from_str(r#"{"response": "Please provide either a file or a prompt."}"#)
                .unwrap();
        assert_eq!(body.context, None);
    }

    #[test]
    fn test_history_with_nulls() {
        let json = r#"{"history": [
            {"id": 7, "mode": "mcq", "prompt": null, "response": "Q: x", "context": null,
             "timestamp": "Tue, 15 Oct 2024 10:00:00 GMT"}
        ]}"#;
        let body: HistoryResponse = serde_json::from_str(json).unwrap();
        assert_eq!(body.history.len(), 1);
        assert_eq!(body.history[0].id, 7);
        assert_eq!(body.history[0].prompt, None);
        assert_eq!(body.history[0].mode.as_deref(), Some("mcq"));
    }

    #[test]
    fn test_clarify_form_field_names() {
        let form = ClarifyForm {
            question: "Q: x",
            doubt: "why?",
            context: "",
        };
        let json = serde_json::to_value(&form).unwrap();
        assert_eq!(json["question"], "Q: x");
        assert_eq!(json["doubt"], "why?");
        assert_eq!(json["context"], "");
    }

    #[test]
    fn test_error_body_prefers_error_field() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"success": false, "error": "db down"}"#).unwrap();
        assert_eq!(body.into_message().as_deref(), Some("db down"));

        let body: ErrorBody = serde_json::from_str(r#"{"response": "Gemini Error"}"#).unwrap();
        assert_eq!(body.into_message().as_deref(), Some("Gemini Error"));
    }
}
