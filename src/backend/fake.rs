//! In-memory backend for tests.

use std::sync::Mutex;

use crate::error::BackendError;
use crate::models::Mode;
use crate::quiz::ClarificationRequest;

use super::{Generation, GenerationRequest, HistoryItem, StudyBackend};

#[derive(Debug, Default)]
pub struct FakeBackend {
    /// Returned by `generate`; `None` makes the call fail.
    pub response_text: Option<String>,
    pub history: Mutex<Vec<HistoryItem>>,
    pub reject_delete: bool,
    pub requests: Mutex<Vec<GenerationRequest>>,
}

impl FakeBackend {
    pub fn answering(response_text: &str) -> Self {
        Self {
            response_text: Some(response_text.to_string()),
            ..Self::default()
        }
    }
}

impl StudyBackend for FakeBackend {
    async fn generate(&self, request: GenerationRequest) -> Result<Generation, BackendError> {
        let prompt = request.prompt.clone();
        self.requests.lock().unwrap().push(request);
        match &self.response_text {
            Some(text) => Ok(Generation {
                response_text: text.clone(),
                context: format!("context for {}", prompt),
            }),
            None => Err(BackendError::Status {
                endpoint: "/process".to_string(),
                status: 500,
                message: None,
            }),
        }
    }

    async fn history(&self) -> Result<Vec<HistoryItem>, BackendError> {
        Ok(self.history.lock().unwrap().clone())
    }

    async fn clarify(&self, request: ClarificationRequest) -> Result<String, BackendError> {
        Ok(format!("about {}", request.doubt_text))
    }

    async fn delete(&self, id: i64) -> Result<(), BackendError> {
        if self.reject_delete {
            return Err(BackendError::DeleteRejected(Some("locked".to_string())));
        }
        self.history.lock().unwrap().retain(|item| item.id != id);
        Ok(())
    }
}

pub fn history_item(id: i64, mode: Mode, prompt: &str, response: &str) -> HistoryItem {
    HistoryItem {
        id,
        mode,
        timestamp: None,
        timestamp_text: String::new(),
        prompt: prompt.to_string(),
        response_text: response.to_string(),
        context: String::new(),
    }
}
