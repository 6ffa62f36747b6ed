use std::path::Path;

use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::BackendError;
use crate::protocol::{
    ClarifyForm, ClarifyResponse, DeleteRequest, DeleteResponse, ErrorBody, GenerateResponse,
    HistoryResponse, endpoints, fields,
};
use crate::quiz::ClarificationRequest;

use super::{Generation, GenerationRequest, HistoryItem, StudyBackend};

/// Talks to the study backend over HTTP.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Result<Self, reqwest::Error> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self {
            client: Client::builder().build()?,
            base_url,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    async fn generation_form(request: GenerationRequest) -> Result<Form, BackendError> {
        let mut form = Form::new()
            .text(fields::PROMPT, request.prompt)
            .text(fields::MODE, request.mode.wire_name().to_string())
            .text(fields::FILE_TYPE, request.file_type);

        if let Some(path) = request.file {
            form = form.part(fields::FILE, file_part(&path).await?);
        }

        if let Some(exam) = request.exam {
            form = form
                .text(fields::EXAM_TIME, exam.exam_days)
                .text(fields::SYLLABUS, exam.syllabus)
                .text(fields::STUDY_HOURS, exam.study_hours);
        }

        Ok(form)
    }
}

async fn file_part(path: &Path) -> Result<Part, BackendError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| BackendError::Upload {
            path: path.to_path_buf(),
            source,
        })?;

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_string());

    debug!("Attaching {} ({} bytes)", file_name, bytes.len());
    Ok(Part::bytes(bytes).file_name(file_name))
}

fn request_failed(endpoint: &str) -> impl FnOnce(reqwest::Error) -> BackendError + '_ {
    move |source| {
        warn!("Request to {} failed: {}", endpoint, source);
        BackendError::Request {
            endpoint: endpoint.to_string(),
            source,
        }
    }
}

/// Decodes a JSON body, turning non-2xx statuses into [`BackendError::Status`].
async fn read_json<T: DeserializeOwned>(
    endpoint: &str,
    response: Response,
) -> Result<T, BackendError> {
    let status = response.status();
    let text = response.text().await.map_err(request_failed(endpoint))?;

    if !status.is_success() {
        let message = serde_json::from_str::<ErrorBody>(&text)
            .ok()
            .and_then(ErrorBody::into_message);
        warn!("{} answered with status {}", endpoint, status);
        return Err(BackendError::Status {
            endpoint: endpoint.to_string(),
            status: status.as_u16(),
            message,
        });
    }

    serde_json::from_str(&text).map_err(|source| {
        warn!("Undecodable body from {}: {}", endpoint, source);
        BackendError::Decode {
            endpoint: endpoint.to_string(),
            source,
        }
    })
}

impl StudyBackend for HttpBackend {
    async fn generate(&self, request: GenerationRequest) -> Result<Generation, BackendError> {
        let endpoint = endpoints::PROCESS;
        debug!("Requesting {} generation", request.mode);

        let form = Self::generation_form(request).await?;
        let response = self
            .client
            .post(self.url(endpoint))
            .multipart(form)
            .send()
            .await
            .map_err(request_failed(endpoint))?;

        let body: GenerateResponse = read_json(endpoint, response).await?;
        Ok(Generation {
            response_text: body.response,
            context: body.context.unwrap_or_default(),
        })
    }

    async fn history(&self) -> Result<Vec<HistoryItem>, BackendError> {
        let endpoint = endpoints::HISTORY;
        let response = self
            .client
            .get(self.url(endpoint))
            .send()
            .await
            .map_err(request_failed(endpoint))?;

        let body: HistoryResponse = read_json(endpoint, response).await?;
        debug!("Fetched {} history entries", body.history.len());
        Ok(body.history.into_iter().map(HistoryItem::from).collect())
    }

    async fn clarify(&self, request: ClarificationRequest) -> Result<String, BackendError> {
        let endpoint = endpoints::CLARIFY;
        let form = ClarifyForm {
            question: &request.question_text,
            doubt: &request.doubt_text,
            context: &request.context,
        };

        let response = self
            .client
            .post(self.url(endpoint))
            .form(&form)
            .send()
            .await
            .map_err(request_failed(endpoint))?;

        let body: ClarifyResponse = read_json(endpoint, response).await?;
        Ok(body.response)
    }

    async fn delete(&self, id: i64) -> Result<(), BackendError> {
        let endpoint = endpoints::DELETE;
        let response = self
            .client
            .post(self.url(endpoint))
            .json(&DeleteRequest { id })
            .send()
            .await
            .map_err(request_failed(endpoint))?;

        let body: DeleteResponse = read_json(endpoint, response).await?;
        if body.success {
            Ok(())
        } else {
            Err(BackendError::DeleteRejected(body.error))
        }
    }
}
