use shared::protocol::HistoryEntry;

use crate::error::ClientError;

pub const HISTORY_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberedEntry {
    pub position: usize,
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryView {
    Entries(Vec<NumberedEntry>),
    Empty,
    Failed(String),
}

impl HistoryView {
    pub fn from_result(result: Result<Vec<HistoryEntry>, ClientError>) -> Self {
        match result {
            Ok(entries) if entries.is_empty() => Self::Empty,
            Ok(entries) => Self::Entries(recent_first(entries, HISTORY_LIMIT)),
            Err(err @ ClientError::Status { .. }) => {
                tracing::warn!(status = ?err.status(), "history request rejected");
                Self::Failed("Failed to load history.".to_string())
            }
            Err(err) => Self::Failed(format!("Error: {err}")),
        }
    }
}

/// Keeps the newest `limit` entries of a chronological list, newest first,
/// numbered from 1.
pub fn recent_first(entries: Vec<HistoryEntry>, limit: usize) -> Vec<NumberedEntry> {
    let skip = entries.len().saturating_sub(limit);
    entries
        .into_iter()
        .skip(skip)
        .rev()
        .enumerate()
        .map(|(index, entry)| NumberedEntry {
            position: index + 1,
            question: entry.question,
            answer: entry.answer,
        })
        .collect()
}
