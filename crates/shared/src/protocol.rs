use serde::{Deserialize, Serialize};

use crate::domain::Rating;

pub const DEFAULT_UPLOAD_MESSAGE: &str = "Upload successful!";
pub const DEFAULT_ANSWER: &str = "No answer returned.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistoryResponse {
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    #[serde(default = "default_upload_message")]
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskRequest {
    pub query: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskResponse {
    #[serde(default = "default_answer")]
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackRecord {
    pub question: String,
    pub answer: String,
    pub rating: Rating,
    pub correction: String,
}

fn default_upload_message() -> String {
    DEFAULT_UPLOAD_MESSAGE.to_string()
}

fn default_answer() -> String {
    DEFAULT_ANSWER.to_string()
}
