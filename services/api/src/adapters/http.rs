//! services/api/src/adapters/http.rs
//!
//! The client-side implementation of the `RecordService` port. It talks to the
//! REST API over HTTP with `reqwest` and maps responses back into domain types
//! and port errors.

use async_trait::async_trait;
use prep_tracker_core::domain::{
    CodeSnippet, CodeSnippetDraft, Question, QuestionDraft, RecordId,
};
use prep_tracker_core::ports::{PortError, PortResult, RecordService};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::web::protocol::{
    CodeSnippetPayload, CodeSnippetResource, ErrorResponse, MessageResponse, QuestionPayload,
    QuestionResource,
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// A `RecordService` backed by a remote server.
#[derive(Clone)]
pub struct HttpRecordService {
    client: Client,
    base_url: String,
}

impl HttpRecordService {
    /// Builds a client for the server at `base_url` (e.g. `http://127.0.0.1:8195`).
    pub fn new(base_url: impl Into<String>) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

fn transport(e: reqwest::Error) -> PortError {
    PortError::Transport(e.to_string())
}

/// Decodes a success body, or turns an error status into the matching port error.
pub async fn decode<T: DeserializeOwned>(response: Response) -> PortResult<T> {
    let status = response.status();
    if status.is_success() {
        return response.json::<T>().await.map_err(|e| {
            PortError::Unexpected(format!("Malformed response body: {}", e))
        });
    }

    let body = response.text().await.map_err(transport)?;
    let message = serde_json::from_str::<ErrorResponse>(&body)
        .map(|e| e.error)
        .unwrap_or(body);

    Err(match status {
        StatusCode::NOT_FOUND => PortError::NotFound(message),
        StatusCode::BAD_REQUEST => PortError::Validation(message),
        _ => PortError::Server {
            status: status.as_u16(),
            message,
        },
    })
}

#[async_trait]
impl RecordService for HttpRecordService {
    async fn list_questions(&self) -> PortResult<Vec<Question>> {
        let response = self
            .client
            .get(self.url("/api/questions"))
            .send()
            .await
            .map_err(transport)?;
        decode::<Vec<QuestionResource>>(response)
            .await?
            .into_iter()
            .map(Question::try_from)
            .collect()
    }

    async fn get_question(&self, id: RecordId) -> PortResult<Question> {
        let response = self
            .client
            .get(self.url(&format!("/api/questions/{}", id)))
            .send()
            .await
            .map_err(transport)?;
        decode::<QuestionResource>(response).await?.try_into()
    }

    async fn create_question(&self, draft: &QuestionDraft) -> PortResult<Question> {
        let response = self
            .client
            .post(self.url("/api/questions"))
            .json(&QuestionPayload::from(draft))
            .send()
            .await
            .map_err(transport)?;
        decode::<QuestionResource>(response).await?.try_into()
    }

    async fn update_question(&self, id: RecordId, draft: &QuestionDraft) -> PortResult<Question> {
        let response = self
            .client
            .put(self.url(&format!("/api/questions/{}", id)))
            .json(&QuestionPayload::from(draft))
            .send()
            .await
            .map_err(transport)?;
        decode::<QuestionResource>(response).await?.try_into()
    }

    async fn delete_question(&self, id: RecordId) -> PortResult<()> {
        let response = self
            .client
            .delete(self.url(&format!("/api/questions/{}", id)))
            .send()
            .await
            .map_err(transport)?;
        decode::<MessageResponse>(response).await.map(|_| ())
    }

    async fn list_code_snippets(&self) -> PortResult<Vec<CodeSnippet>> {
        let response = self
            .client
            .get(self.url("/api/code-snippets"))
            .send()
            .await
            .map_err(transport)?;
        let resources = decode::<Vec<CodeSnippetResource>>(response).await?;
        Ok(resources.into_iter().map(CodeSnippet::from).collect())
    }

    async fn get_code_snippet(&self, id: RecordId) -> PortResult<CodeSnippet> {
        let response = self
            .client
            .get(self.url(&format!("/api/code-snippets/{}", id)))
            .send()
            .await
            .map_err(transport)?;
        Ok(decode::<CodeSnippetResource>(response).await?.into())
    }

    async fn create_code_snippet(&self, draft: &CodeSnippetDraft) -> PortResult<CodeSnippet> {
        let response = self
            .client
            .post(self.url("/api/code-snippets"))
            .json(&CodeSnippetPayload::from(draft))
            .send()
            .await
            .map_err(transport)?;
        Ok(decode::<CodeSnippetResource>(response).await?.into())
    }

    async fn update_code_snippet(
        &self,
        id: RecordId,
        draft: &CodeSnippetDraft,
    ) -> PortResult<CodeSnippet> {
        let response = self
            .client
            .put(self.url(&format!("/api/code-snippets/{}", id)))
            .json(&CodeSnippetPayload::from(draft))
            .send()
            .await
            .map_err(transport)?;
        Ok(decode::<CodeSnippetResource>(response).await?.into())
    }

    async fn delete_code_snippet(&self, id: RecordId) -> PortResult<()> {
        let response = self
            .client
            .delete(self.url(&format!("/api/code-snippets/{}", id)))
            .send()
            .await
            .map_err(transport)?;
        decode::<MessageResponse>(response).await.map(|_| ())
    }
}
