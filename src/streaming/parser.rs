//! Line classifier for streamed chat responses
//!
//! Splits a line-oriented response into a "thinking" segment and the final
//! answer. The server marks thinking inline with `<think>` / `</think>`;
//! classification only needs a boolean mode:
//!
//! ```text
//! Answering --line contains <think>--> Thinking
//! Thinking  --line contains </think>--> Answering
//! ```
//!
//! A repeated `<think>` inside a thinking segment is stripped and the mode
//! stays Thinking. A line carrying both markers matches no marker rule and
//! is handled by the default branch of the current mode. Blank lines are
//! skipped without touching state.

use serde::{Deserialize, Serialize};

/// Marker opening a thinking segment
pub const THINK_OPEN: &str = "<think>";

/// Marker closing a thinking segment
pub const THINK_CLOSE: &str = "</think>";

/// Parser modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParserMode {
    /// Lines are answer text
    #[default]
    Answering,

    /// Lines are thinking text until a closing marker
    Thinking,
}

/// Answer and thinking text after one processed line
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Snapshot {
    pub answer: String,
    pub thinking: String,
}

impl Snapshot {
    /// Snapshot reporting a failed exchange
    pub fn error(answer: impl Into<String>) -> Self {
        Self {
            answer: answer.into(),
            thinking: String::new(),
        }
    }
}

/// Per-request parser state
///
/// One instance belongs to exactly one in-flight request.
#[derive(Debug, Clone, Default)]
pub struct StreamState {
    mode: ParserMode,
    thinking: String,
    answer: String,
}

impl StreamState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one line; returns the updated snapshot unless the line is blank
    pub fn apply(&mut self, line: &str) -> Option<Snapshot> {
        if line.trim().is_empty() {
            return None;
        }

        let opens = line.contains(THINK_OPEN);
        let closes = line.contains(THINK_CLOSE);

        match self.mode {
            ParserMode::Answering if opens && !closes => {
                self.mode = ParserMode::Thinking;
                self.push_thinking(&line.replacen(THINK_OPEN, "", 1));
            }
            ParserMode::Thinking if closes && !opens => {
                self.mode = ParserMode::Answering;
                self.push_thinking(&line.replacen(THINK_CLOSE, "", 1));
            }
            ParserMode::Thinking if opens && !closes => {
                self.push_thinking(&line.replacen(THINK_OPEN, "", 1));
            }
            ParserMode::Thinking => self.push_thinking(line),
            ParserMode::Answering => {
                self.answer.push_str(line);
                self.answer.push('\n');
            }
        }

        Some(self.snapshot())
    }

    /// Terminal emission once the line source is exhausted
    ///
    /// Only produced when the answer is non-empty; repeating the last
    /// snapshot is harmless for consumers that render the latest state.
    pub fn finish(&self) -> Option<Snapshot> {
        if self.answer.trim().is_empty() {
            None
        } else {
            Some(self.snapshot())
        }
    }

    /// Current buffers, trimmed
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            answer: self.answer.trim().to_string(),
            thinking: self.thinking.trim().to_string(),
        }
    }

    pub fn mode(&self) -> ParserMode {
        self.mode
    }

    pub fn is_thinking(&self) -> bool {
        self.mode == ParserMode::Thinking
    }

    fn push_thinking(&mut self, text: &str) {
        self.thinking.push_str(text.trim());
        self.thinking.push(' ');
    }
}

/// Pure form of [`StreamState::apply`]
pub fn fold_line(mut state: StreamState, line: &str) -> (StreamState, Option<Snapshot>) {
    let snapshot = state.apply(line);
    (state, snapshot)
}

/// Run a complete line sequence, including the terminal emission
pub fn parse_lines<I, S>(lines: I) -> Vec<Snapshot>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut state = StreamState::new();
    let mut snapshots: Vec<Snapshot> = lines
        .into_iter()
        .filter_map(|line| state.apply(line.as_ref()))
        .collect();
    snapshots.extend(state.finish());
    snapshots
}
