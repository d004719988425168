//! Interaction controller: turns user actions into backend calls and session
//! transitions.

use std::path::Path;

use shared::{domain::Rating, protocol::FeedbackRecord};
use tracing::info;

use crate::{
    history::HistoryView,
    session::{Phase, SessionState},
    DocumentUpload, QaBackend,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
    Info(String),
}

impl Notice {
    pub fn message(&self) -> &str {
        match self {
            Self::Success(message) | Self::Error(message) | Self::Info(message) => message,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

pub struct InteractionController<B: QaBackend> {
    backend: B,
    state: SessionState,
}

impl<B: QaBackend> InteractionController<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            state: SessionState::new(),
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub async fn history(&self) -> HistoryView {
        HistoryView::from_result(self.backend.fetch_history().await)
    }

    pub async fn upload_path(&mut self, path: &Path) -> Notice {
        if let Some(rejected) = self.reject_upload() {
            return rejected;
        }
        match DocumentUpload::from_path(path).await {
            Ok(document) => self.upload(document).await,
            Err(err) => Notice::Error(format!("Upload failed: {err}")),
        }
    }

    pub async fn upload(&mut self, document: DocumentUpload) -> Notice {
        if let Some(rejected) = self.reject_upload() {
            return rejected;
        }
        let filename = document.filename.clone();
        match self.backend.upload(document).await {
            Ok(response) => {
                self.state = std::mem::take(&mut self.state).with_document_uploaded();
                info!(%filename, "document uploaded");
                Notice::Success(response.message)
            }
            Err(err) => Notice::Error(format!("Upload failed: {}", err.display_body())),
        }
    }

    /// Forgets the uploaded document locally; the server keeps its index.
    pub fn reset_document(&mut self) -> Notice {
        self.state = std::mem::take(&mut self.state).with_document_reset();
        info!("document reset");
        Notice::Info("Ready for a new document.".to_string())
    }

    /// Returns `None` when the query is blank (nothing is sent) or when the
    /// answer arrived; the answer itself is read from the session state.
    pub async fn ask(&mut self, query: &str) -> Option<Notice> {
        if !self.state.uploaded() {
            return Some(Notice::Error(
                "Upload a document before asking a question.".to_string(),
            ));
        }
        if query.trim().is_empty() {
            return None;
        }
        let result = self.backend.ask(query).await;
        let state = std::mem::take(&mut self.state);
        match result {
            Ok(response) => {
                self.state = state.with_answer(query, response.answer);
                info!("answer received");
                None
            }
            Err(_) => {
                self.state = state.without_answer();
                Some(Notice::Error("Failed to get answer.".to_string()))
            }
        }
    }

    pub fn feedback_record(
        &self,
        rating: Option<i64>,
        correction: Option<String>,
    ) -> Option<FeedbackRecord> {
        let exchange = self.state.exchange()?;
        Some(FeedbackRecord {
            question: exchange.question.clone(),
            answer: exchange.answer.clone(),
            rating: rating.map(Rating::clamped).unwrap_or_default(),
            correction: correction.unwrap_or_default(),
        })
    }

    pub async fn submit_feedback(
        &mut self,
        rating: Option<i64>,
        correction: Option<String>,
    ) -> Notice {
        if self.state.phase() != Phase::QuestionAsked {
            return Notice::Error("Ask a question before submitting feedback.".to_string());
        }
        let Some(record) = self.feedback_record(rating, correction) else {
            return Notice::Error("Ask a question before submitting feedback.".to_string());
        };
        match self.backend.submit_feedback(&record).await {
            Ok(()) => {
                self.state = std::mem::take(&mut self.state).without_answer();
                info!(rating = record.rating.value(), "feedback submitted");
                Notice::Success("Feedback submitted! Thank you".to_string())
            }
            Err(err) => Notice::Error(format!(
                "Failed to submit feedback: {}",
                err.display_body()
            )),
        }
    }

    fn reject_upload(&self) -> Option<Notice> {
        self.state.uploaded().then(|| {
            Notice::Info("Document already uploaded. Use `new` to upload another.".to_string())
        })
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
