//! Client-side session state and its transitions.
//!
//! Every transition consumes the current state and returns the next one, so a
//! render pass always reads a settled value.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QaExchange {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    NoDocument,
    DocumentUploaded,
    QuestionAsked,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    uploaded: bool,
    exchange: Option<QaExchange>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn uploaded(&self) -> bool {
        self.uploaded
    }

    pub fn exchange(&self) -> Option<&QaExchange> {
        self.exchange.as_ref()
    }

    pub fn last_query(&self) -> Option<&str> {
        self.exchange.as_ref().map(|e| e.question.as_str())
    }

    pub fn last_answer(&self) -> Option<&str> {
        self.exchange.as_ref().map(|e| e.answer.as_str())
    }

    pub fn phase(&self) -> Phase {
        match (self.uploaded, &self.exchange) {
            (false, _) => Phase::NoDocument,
            (true, None) => Phase::DocumentUploaded,
            (true, Some(_)) => Phase::QuestionAsked,
        }
    }

    pub fn with_document_uploaded(self) -> Self {
        Self {
            uploaded: true,
            ..self
        }
    }

    /// Drops the uploaded flag only; a pending answer becomes visible again
    /// once another document is uploaded.
    pub fn with_document_reset(self) -> Self {
        Self {
            uploaded: false,
            ..self
        }
    }

    pub fn with_answer(self, question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            exchange: Some(QaExchange {
                question: question.into(),
                answer: answer.into(),
            }),
            ..self
        }
    }

    pub fn without_answer(self) -> Self {
        Self {
            exchange: None,
            ..self
        }
    }
}
