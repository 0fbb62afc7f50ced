use std::fmt;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;

/// Progress and outcome messages shown in the host's status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusEvent {
    Loading(String),
    Parsing(String),
    Parsed {
        file: String,
        declarations: usize,
        elapsed: Duration,
    },
    NothingFound(String),
    RegexError(String),
}

pub type StatusSender = UnboundedSender<StatusEvent>;

impl fmt::Display for StatusEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusEvent::Loading(file) => write!(f, "Loading file: {}", file),
            StatusEvent::Parsing(file) => write!(f, "Parsing: {}", file),
            StatusEvent::Parsed {
                file,
                declarations,
                elapsed,
            } => write!(
                f,
                "Parsed {} in {:.2} seconds ({} declarations)",
                file,
                elapsed.as_secs_f64(),
                declarations
            ),
            StatusEvent::NothingFound(text) => write!(f, "Nothing found for: \"{}\"", text),
            StatusEvent::RegexError(message) => write!(f, "Regex Error: {}", message),
        }
    }
}
