use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Upload(PathBuf),
    NewDocument,
    Ask(String),
    Feedback {
        rating: Option<i64>,
        correction: Option<String>,
    },
    Refresh,
    Help,
    Quit,
    Invalid(String),
}

pub const HELP: &str = "\
Commands:
  upload <path>                     upload a PDF, DOCX or TXT document
  new                               forget the uploaded document
  ask <question>                    ask a question about the document
  feedback [rating] [correction]    rate the last answer (1-5, default 3)
  history                           refresh the view
  help                              show this list
  quit                              leave";

pub fn parse_command(line: &str) -> Command {
    let line = line.trim();
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    match verb.to_ascii_lowercase().as_str() {
        "" | "history" | "refresh" => Command::Refresh,
        "upload" if rest.is_empty() => Command::Invalid("usage: upload <path>".to_string()),
        "upload" => Command::Upload(PathBuf::from(rest)),
        "new" | "reset" => Command::NewDocument,
        "ask" => Command::Ask(rest.to_string()),
        "feedback" => parse_feedback(rest),
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => Command::Invalid(format!("unknown command '{other}'; type `help`")),
    }
}

fn parse_feedback(rest: &str) -> Command {
    let (first, tail) = match rest.split_once(char::is_whitespace) {
        Some((first, tail)) => (first, tail.trim()),
        None => (rest, ""),
    };
    let non_empty = |text: &str| (!text.is_empty()).then(|| text.to_string());

    if is_integer_token(first) {
        return Command::Feedback {
            rating: Some(saturating_rating(first)),
            correction: non_empty(tail),
        };
    }
    if first.contains(|c: char| c.is_ascii_digit()) && first.parse::<f64>().is_ok() {
        return Command::Invalid("rating must be a whole number 1-5".to_string());
    }
    Command::Feedback {
        rating: None,
        correction: non_empty(rest),
    }
}

fn is_integer_token(token: &str) -> bool {
    let digits = token.strip_prefix(['+', '-']).unwrap_or(token);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Out-of-range integers saturate so clamping still picks the nearest bound.
fn saturating_rating(token: &str) -> i64 {
    token.parse::<i64>().unwrap_or(if token.starts_with('-') {
        i64::MIN
    } else {
        i64::MAX
    })
}
