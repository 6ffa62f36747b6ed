//! The study backend as seen by the client.
//!
//! [`StudyBackend`] is the seam between the application and the network;
//! [`HttpBackend`] is the real implementation.

#[cfg(test)]
pub(crate) mod fake;
mod http;

use std::future::Future;
use std::path::PathBuf;

use chrono::{DateTime, Local, NaiveDateTime};

use crate::error::BackendError;
use crate::models::Mode;
use crate::protocol::HistoryRecord;
use crate::quiz::ClarificationRequest;

pub use http::HttpBackend;

/// Exam-prep extras, only sent for [`Mode::ExamPrep`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExamParameters {
    pub exam_days: String,
    pub syllabus: String,
    pub study_hours: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub prompt: String,
    pub mode: Mode,
    pub file_type: String,
    pub file: Option<PathBuf>,
    pub exam: Option<ExamParameters>,
}

/// A generated response and the source material it was generated from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generation {
    pub response_text: String,
    pub context: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryItem {
    pub id: i64,
    pub mode: Mode,
    pub timestamp: Option<DateTime<Local>>,
    /// The timestamp as the backend sent it.
    pub timestamp_text: String,
    pub prompt: String,
    pub response_text: String,
    pub context: String,
}

impl HistoryItem {
    pub fn display_time(&self) -> String {
        match &self.timestamp {
            Some(time) => time.format("%Y-%m-%d %H:%M").to_string(),
            None => self.timestamp_text.clone(),
        }
    }
}

impl From<HistoryRecord> for HistoryItem {
    fn from(record: HistoryRecord) -> Self {
        let timestamp_text = record.timestamp.unwrap_or_default();
        Self {
            id: record.id,
            mode: record
                .mode
                .unwrap_or_default()
                .parse()
                .unwrap_or_else(|never| match never {}),
            timestamp: parse_timestamp(&timestamp_text),
            timestamp_text,
            prompt: record.prompt.unwrap_or_default(),
            response_text: record.response.unwrap_or_default(),
            context: record.context.unwrap_or_default(),
        }
    }
}

/// Accepts HTTP dates, RFC 3339 and plain `YYYY-MM-DD HH:MM:SS` (taken as UTC).
fn parse_timestamp(text: &str) -> Option<DateTime<Local>> {
    let text = text.trim();
    DateTime::parse_from_rfc2822(text)
        .or_else(|_| DateTime::parse_from_rfc3339(text))
        .map(|time| time.with_timezone(&Local))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S")
                .ok()
                .map(|naive| naive.and_utc().with_timezone(&Local))
        })
}

/// The four calls the application makes.
pub trait StudyBackend: Send + Sync + 'static {
    fn generate(
        &self,
        request: GenerationRequest,
    ) -> impl Future<Output = Result<Generation, BackendError>> + Send;

    /// Most recent first.
    fn history(&self) -> impl Future<Output = Result<Vec<HistoryItem>, BackendError>> + Send;

    fn clarify(
        &self,
        request: ClarificationRequest,
    ) -> impl Future<Output = Result<String, BackendError>> + Send;

    fn delete(&self, id: i64) -> impl Future<Output = Result<(), BackendError>> + Send;
}
