//! Full-view rendering. The whole screen is rebuilt from the session state on
//! every pass.

use std::fmt;

use client_core::{HistoryView, Notice, SessionState};

pub const TITLE: &str = "Intelligent Document Q&A with Feedback";

pub fn render_view(state: &SessionState, history: &HistoryView, notice: Option<&Notice>) -> String {
    View {
        state,
        history,
        notice,
    }
    .to_string()
}

struct View<'a> {
    state: &'a SessionState,
    history: &'a HistoryView,
    notice: Option<&'a Notice>,
}

impl fmt::Display for View<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== {TITLE} ===\n")?;
        write_history(f, self.history)?;
        write_phases(f, self.state)?;
        if let Some(notice) = self.notice {
            writeln!(f, "\n{}", render_notice(notice))?;
        }
        Ok(())
    }
}

fn write_history(f: &mut fmt::Formatter<'_>, history: &HistoryView) -> fmt::Result {
    writeln!(f, "--- Q&A History ---")?;
    match history {
        HistoryView::Entries(entries) => {
            for entry in entries {
                writeln!(f, "{}. {}", entry.position, entry.question)?;
                writeln!(f, "   -> {}", entry.answer)?;
            }
        }
        HistoryView::Empty => writeln!(f, "[info] No Q&A history yet.")?,
        HistoryView::Failed(message) => writeln!(f, "[error] {message}")?,
    }
    writeln!(f)
}

fn write_phases(f: &mut fmt::Formatter<'_>, state: &SessionState) -> fmt::Result {
    writeln!(f, "1. Upload a Document")?;
    if !state.uploaded() {
        return writeln!(f, "   Upload PDF, DOCX, or TXT: `upload <path>`");
    }
    writeln!(f, "   Document already uploaded. (`new` to upload another)")?;

    writeln!(f, "\n2. Ask a Question")?;
    writeln!(f, "   `ask <question>`")?;

    if let Some(answer) = state.last_answer() {
        writeln!(f, "\nAnswer:")?;
        writeln!(f, "   {answer}")?;
        writeln!(f, "\n3. Provide Feedback")?;
        writeln!(
            f,
            "   `feedback [1-5] [better answer]` (1 = Bad, 5 = Excellent, default 3)"
        )?;
    }
    Ok(())
}

pub fn render_notice(notice: &Notice) -> String {
    let tag = match notice {
        Notice::Success(_) => "ok",
        Notice::Error(_) => "error",
        Notice::Info(_) => "info",
    };
    format!("[{tag}] {}", notice.message())
}

#[cfg(test)]
mod tests {
    use client_core::NumberedEntry;

    use super::*;

    #[test]
    fn fresh_session_only_offers_upload() {
        let view = render_view(&SessionState::new(), &HistoryView::Empty, None);
        assert!(view.contains("No Q&A history yet."));
        assert!(view.contains("1. Upload a Document"));
        assert!(!view.contains("2. Ask a Question"));
        assert!(!view.contains("3. Provide Feedback"));
    }

    #[test]
    fn answered_session_shows_answer_and_feedback() {
        let state = SessionState::new()
            .with_document_uploaded()
            .with_answer("What is the refund policy?", "Refunds within 30 days.");
        let history = HistoryView::Entries(vec![NumberedEntry {
            position: 1,
            question: "What is the refund policy?".into(),
            answer: "Refunds within 30 days.".into(),
        }]);

        let view = render_view(&state, &history, Some(&Notice::Info("hi".into())));

        assert!(view.contains("1. What is the refund policy?"));
        assert!(view.contains("Document already uploaded."));
        assert!(view.contains("   Refunds within 30 days."));
        assert!(view.contains("3. Provide Feedback"));
        assert!(view.ends_with("[info] hi\n"));
    }

    #[test]
    fn reset_session_hides_pending_answer() {
        let state = SessionState::new()
            .with_document_uploaded()
            .with_answer("q", "hidden answer")
            .with_document_reset();

        let view = render_view(&state, &HistoryView::Failed("Failed to load history.".into()), None);

        assert!(view.contains("[error] Failed to load history."));
        assert!(!view.contains("hidden answer"));
    }
}
