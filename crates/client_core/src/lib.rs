use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use async_trait::async_trait;
use reqwest::{
    multipart::{Form, Part},
    Client, Response, StatusCode,
};
use shared::{
    domain::DocumentKind,
    protocol::{
        AskRequest, AskResponse, FeedbackRecord, HistoryEntry, HistoryResponse, UploadResponse,
    },
};
use tracing::{debug, warn};

pub mod controller;
pub mod error;
pub mod history;
pub mod session;

pub use controller::{InteractionController, Notice};
pub use error::ClientError;
pub use history::{HistoryView, NumberedEntry, HISTORY_LIMIT};
pub use session::{Phase, QaExchange, SessionState};

pub const DEFAULT_API_BASE: &str = "http://localhost:8000";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct DocumentUpload {
    pub filename: String,
    pub kind: DocumentKind,
    pub bytes: Vec<u8>,
}

impl DocumentUpload {
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Result<Self, ClientError> {
        let filename = filename.into();
        let kind = DocumentKind::from_path(Path::new(&filename)).ok_or_else(|| {
            ClientError::UnsupportedDocument {
                filename: filename.clone(),
            }
        })?;
        Ok(Self {
            filename,
            kind,
            bytes,
        })
    }

    pub async fn from_path(path: &Path) -> Result<Self, ClientError> {
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        if DocumentKind::from_path(path).is_none() {
            return Err(ClientError::UnsupportedDocument { filename });
        }
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| ClientError::ReadDocument {
                path: PathBuf::from(path),
                source,
            })?;
        Self::new(filename, bytes)
    }
}

/// The four remote operations the interaction flow depends on.
#[async_trait]
pub trait QaBackend: Send + Sync {
    async fn fetch_history(&self) -> Result<Vec<HistoryEntry>, ClientError>;
    async fn upload(&self, document: DocumentUpload) -> Result<UploadResponse, ClientError>;
    async fn ask(&self, query: &str) -> Result<AskResponse, ClientError>;
    async fn submit_feedback(&self, record: &FeedbackRecord) -> Result<(), ClientError>;
}

pub struct DocQaClient {
    http: Client,
    api_base: String,
}

impl DocQaClient {
    pub fn new(api_base: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            api_base: normalize_api_base(&api_base.into()),
        }
    }

    pub fn with_timeout(
        api_base: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ClientError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            api_base: normalize_api_base(&api_base.into()),
        })
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.api_base)
    }
}

pub fn normalize_api_base(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}

/// Anything but 200 counts as a failure; the body is kept verbatim.
async fn require_ok(endpoint: &str, response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status == StatusCode::OK {
        return Ok(response);
    }
    let body = match response.text().await {
        Ok(body) => body,
        Err(error) => {
            warn!(endpoint, %status, %error, "failed to read error body");
            String::new()
        }
    };
    let err = ClientError::Status { status, body };
    warn!(
        endpoint,
        %status,
        code = ?err.api_error().map(|api| api.code),
        "request rejected by server"
    );
    Err(err)
}

#[async_trait]
impl QaBackend for DocQaClient {
    async fn fetch_history(&self) -> Result<Vec<HistoryEntry>, ClientError> {
        debug!(api_base = %self.api_base, "GET /history");
        let response = self.http.get(self.endpoint("/history")).send().await?;
        let body: HistoryResponse = require_ok("/history", response).await?.json().await?;
        Ok(body.history)
    }

    async fn upload(&self, document: DocumentUpload) -> Result<UploadResponse, ClientError> {
        debug!(
            filename = %document.filename,
            size_bytes = document.bytes.len(),
            "POST /upload"
        );
        let part = Part::bytes(document.bytes)
            .file_name(document.filename)
            .mime_str(document.kind.mime_type())?;
        let form = Form::new().part("file", part);
        let response = self
            .http
            .post(self.endpoint("/upload"))
            .multipart(form)
            .send()
            .await?;
        Ok(require_ok("/upload", response).await?.json().await?)
    }

    async fn ask(&self, query: &str) -> Result<AskResponse, ClientError> {
        debug!("POST /ask");
        let response = self
            .http
            .post(self.endpoint("/ask"))
            .json(&AskRequest {
                query: query.to_string(),
            })
            .send()
            .await?;
        Ok(require_ok("/ask", response).await?.json().await?)
    }

    async fn submit_feedback(&self, record: &FeedbackRecord) -> Result<(), ClientError> {
        debug!(rating = record.rating.value(), "POST /feedback");
        let response = self
            .http
            .post(self.endpoint("/feedback"))
            .json(record)
            .send()
            .await?;
        require_ok("/feedback", response).await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
