//! Command loop: read one command, apply it, re-render everything.

use std::io::Write;

use anyhow::Context;
use client_core::{InteractionController, Notice, QaBackend};
use shared::domain::DocumentKind;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::{
    command::{parse_command, Command, HELP},
    render::render_view,
};

pub async fn run<B, R, W>(
    controller: &mut InteractionController<B>,
    input: R,
    output: &mut W,
) -> anyhow::Result<()>
where
    B: QaBackend,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    let mut notice: Option<Notice> = None;

    loop {
        let history = controller.history().await;
        write!(
            output,
            "{}",
            render_view(controller.state(), &history, notice.as_ref())
        )?;
        write!(output, "> ")?;
        output.flush()?;

        let Some(line) = lines.next_line().await.context("failed to read command")? else {
            break;
        };
        let command = parse_command(&line);
        if command == Command::Quit {
            break;
        }
        notice = apply(controller, command, output).await?;
        if let Some(failed) = notice.as_ref().filter(|n| n.is_error()) {
            tracing::debug!(message = failed.message(), "command failed");
        }
        writeln!(output)?;
    }

    tracing::debug!("session ended");
    Ok(())
}

pub async fn apply<B, W>(
    controller: &mut InteractionController<B>,
    command: Command,
    output: &mut W,
) -> std::io::Result<Option<Notice>>
where
    B: QaBackend,
    W: Write,
{
    let notice = match command {
        Command::Upload(path) => {
            if !controller.state().uploaded() && DocumentKind::from_path(&path).is_some() {
                writeln!(output, "Uploading and processing...")?;
                output.flush()?;
            }
            Some(controller.upload_path(&path).await)
        }
        Command::NewDocument => Some(controller.reset_document()),
        Command::Ask(query) => {
            if controller.state().uploaded() && !query.trim().is_empty() {
                writeln!(output, "Thinking...")?;
                output.flush()?;
            }
            controller.ask(&query).await
        }
        Command::Feedback { rating, correction } => {
            Some(controller.submit_feedback(rating, correction).await)
        }
        Command::Help => Some(Notice::Info(HELP.to_string())),
        Command::Invalid(message) => Some(Notice::Error(message)),
        Command::Refresh | Command::Quit => None,
    };
    Ok(notice)
}

#[cfg(test)]
#[path = "tests/repl_tests.rs"]
mod tests;
