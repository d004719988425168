use super::*;
use std::{io::Write as _, sync::Arc};

use async_trait::async_trait;
use client_core::{ClientError, DocumentUpload};
use shared::protocol::{AskResponse, FeedbackRecord, HistoryEntry, UploadResponse};
use tokio::sync::Mutex;

#[derive(Clone, Default)]
struct ScriptedBackend {
    history: Arc<Mutex<Vec<HistoryEntry>>>,
    history_fetches: Arc<Mutex<usize>>,
    feedback: Arc<Mutex<Vec<FeedbackRecord>>>,
}

#[async_trait]
impl QaBackend for ScriptedBackend {
    async fn fetch_history(&self) -> Result<Vec<HistoryEntry>, ClientError> {
        *self.history_fetches.lock().await += 1;
        Ok(self.history.lock().await.clone())
    }

    async fn upload(&self, document: DocumentUpload) -> Result<UploadResponse, ClientError> {
        Ok(UploadResponse {
            message: format!("Indexed {} bytes", document.bytes.len()),
        })
    }

    async fn ask(&self, query: &str) -> Result<AskResponse, ClientError> {
        let answer = "Refunds within 30 days.".to_string();
        self.history.lock().await.push(HistoryEntry {
            question: query.to_string(),
            answer: answer.clone(),
        });
        Ok(AskResponse { answer })
    }

    async fn submit_feedback(&self, record: &FeedbackRecord) -> Result<(), ClientError> {
        self.feedback.lock().await.push(record.clone());
        Ok(())
    }
}

fn pdf_fixture() -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".pdf")
        .tempfile()
        .expect("temp pdf");
    file.write_all(b"%PDF-1.7 twelve pages").expect("write pdf");
    file
}

#[tokio::test]
async fn scripted_session_walks_all_phases() {
    let fixture = pdf_fixture();
    let backend = ScriptedBackend::default();
    let mut controller = InteractionController::new(backend.clone());
    let script = format!(
        "upload {}\nask What is the refund policy?\nfeedback 4\nquit\n",
        fixture.path().display()
    );
    let mut output = Vec::new();

    run(&mut controller, script.as_bytes(), &mut output)
        .await
        .expect("session");

    let text = String::from_utf8(output).expect("utf8");
    assert!(text.contains("Uploading and processing..."));
    assert!(text.contains("[ok] Indexed 21 bytes"));
    assert!(text.contains("Thinking..."));
    assert!(text.contains("   Refunds within 30 days."));
    assert!(text.contains("1. What is the refund policy?"));
    assert!(text.contains("[ok] Feedback submitted! Thank you"));

    let feedback = backend.feedback.lock().await;
    assert_eq!(feedback.len(), 1);
    assert_eq!(feedback[0].rating.value(), 4);
    assert_eq!(feedback[0].correction, "");

    assert!(controller.state().uploaded());
    assert_eq!(controller.state().last_answer(), None);
    // One render before each of the four commands.
    assert_eq!(*backend.history_fetches.lock().await, 4);
}

#[tokio::test]
async fn end_of_input_ends_session() {
    let mut controller = InteractionController::new(ScriptedBackend::default());
    let mut output = Vec::new();

    run(&mut controller, &b"help\n"[..], &mut output)
        .await
        .expect("session");

    let text = String::from_utf8(output).expect("utf8");
    assert!(text.contains("[info] Commands:"));
    assert!(text.contains("No Q&A history yet."));
}

#[tokio::test]
async fn blank_question_prints_no_busy_line() {
    let fixture = pdf_fixture();
    let mut controller = InteractionController::new(ScriptedBackend::default());
    let mut sink = Vec::new();
    apply(
        &mut controller,
        Command::Upload(fixture.path().to_path_buf()),
        &mut sink,
    )
    .await
    .expect("upload");

    let mut output = Vec::new();
    let notice = apply(&mut controller, Command::Ask(String::new()), &mut output)
        .await
        .expect("ask");

    assert_eq!(notice, None);
    assert!(output.is_empty());
    assert_eq!(controller.state().last_query(), None);
}

#[tokio::test]
async fn unsupported_upload_skips_busy_line() {
    let mut controller = InteractionController::new(ScriptedBackend::default());
    let mut output = Vec::new();

    let notice = apply(
        &mut controller,
        Command::Upload("slides.pptx".into()),
        &mut output,
    )
    .await
    .expect("upload");

    assert!(output.is_empty());
    let notice = notice.expect("notice");
    assert!(notice.is_error());
    assert!(notice.message().contains("slides.pptx"));
    assert!(!controller.state().uploaded());
}
