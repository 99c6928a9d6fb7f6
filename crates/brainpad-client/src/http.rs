//! HTTP implementation of [`NotesApi`].

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info, warn};

use brainpad_core::{
    defaults,
    validation::{search_query, validate_create, validate_update},
    CreateNoteInput, DeleteNoteInput, DeleteNoteResponse, ErrorResponse, Note, NoteResponse,
    NotesResponse, SearchNotesInput, UpdateNoteInput,
};

use crate::api::NotesApi;
use crate::error::{ClientError, ClientResult};

/// Typed client for the brainpad API.
///
/// Inputs go through the same validation the server applies, so a request
/// that would be rejected with 400 fails here without touching the network.
#[derive(Debug, Clone)]
pub struct NotesClient {
    client: Client,
    base_url: String,
}

impl NotesClient {
    pub fn new(base_url: impl Into<String>) -> ClientResult<Self> {
        Self::with_timeout(base_url, Duration::from_secs(defaults::CLIENT_TIMEOUT_SECS))
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> ClientResult<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let client = Client::builder().timeout(timeout).build()?;
        info!(subsystem = "client", base_url = %base_url, "Initializing notes client");
        Ok(Self { client, base_url })
    }

    /// Base URL from `BRAINPAD_API_URL`, timeout from
    /// `BRAINPAD_CLIENT_TIMEOUT_SECS`.
    pub fn from_env() -> ClientResult<Self> {
        let base_url =
            std::env::var("BRAINPAD_API_URL").unwrap_or_else(|_| defaults::API_URL.to_string());
        let timeout = std::env::var("BRAINPAD_CLIENT_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(defaults::CLIENT_TIMEOUT_SECS);
        Self::with_timeout(base_url, Duration::from_secs(timeout))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        op: &'static str,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let start = Instant::now();
        let response = self.client.post(self.url(path)).json(body).send().await?;
        let out = decode(op, response).await;
        debug!(
            subsystem = "client",
            component = "http",
            op,
            duration_ms = start.elapsed().as_millis() as u64,
            ok = out.is_ok(),
            "Request finished"
        );
        out
    }
}

/// Turn a response into `T`, or into [`ClientError::Api`] using the
/// server's `{error}` message.
async fn decode<T: DeserializeOwned>(op: &'static str, response: Response) -> ClientResult<T> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorResponse>(&body)
            .map(|e| e.error)
            .unwrap_or_else(|_| {
                if body.is_empty() {
                    status.to_string()
                } else {
                    body
                }
            });
        warn!(
            subsystem = "client",
            component = "http",
            op,
            status = status.as_u16(),
            error = %message,
            "Request rejected"
        );
        return Err(ClientError::Api {
            status: status.as_u16(),
            message,
        });
    }

    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| ClientError::Decode(e.to_string()))
}

#[async_trait]
impl NotesApi for NotesClient {
    async fn list(&self) -> ClientResult<Vec<Note>> {
        let response = self.client.get(self.url("/notes")).send().await?;
        let body: NotesResponse = decode("list", response).await?;
        Ok(body.notes)
    }

    async fn create(&self, input: CreateNoteInput) -> ClientResult<Note> {
        validate_create(&input)?;
        let body: NoteResponse = self.post("create", "/notes", &input).await?;
        Ok(body.note)
    }

    async fn update(&self, input: UpdateNoteInput) -> ClientResult<Note> {
        validate_update(&input)?;
        let body: NoteResponse = self.post("update", "/notes/update", &input).await?;
        Ok(body.note)
    }

    async fn delete(&self, id: &str) -> ClientResult<String> {
        let input = DeleteNoteInput { id: id.to_string() };
        let body: DeleteNoteResponse = self.post("delete", "/notes/delete", &input).await?;
        Ok(body.id)
    }

    async fn search(&self, query: &str) -> ClientResult<Vec<Note>> {
        let input = SearchNotesInput {
            query: query.to_string(),
        };
        if search_query(&input).is_none() {
            return Ok(Vec::new());
        }
        let body: NotesResponse = self.post("search", "/notes/search", &input).await?;
        Ok(body.notes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_dropped() {
        let client = NotesClient::new("http://localhost:3000/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:3000");
        assert_eq!(client.url("/notes"), "http://localhost:3000/notes");
    }

    #[tokio::test]
    async fn test_invalid_create_fails_before_sending() {
        // port 9 (discard) would fail with a transport error if contacted
        let client = NotesClient::new("http://127.0.0.1:9").unwrap();
        let err = client
            .create(CreateNoteInput::new("", "body"))
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Validation(_)));
    }

    #[tokio::test]
    async fn test_blank_search_sends_nothing() {
        let client = NotesClient::new("http://127.0.0.1:9").unwrap();
        assert!(client.search("  ").await.unwrap().is_empty());
    }
}
