//! Submitted-line history with wrap-around recall.

use alloc::string::String;
use alloc::vec::Vec;

/// Previously submitted lines plus a recall cursor.
///
/// Lines are kept in submission order and never removed. Empty lines are
/// never stored. The cursor is reset to `0` after every submission, so the
/// first [`recall_previous`](Self::recall_previous) lands on the most
/// recent line.
///
/// ```rust
/// use termsite::terminal::History;
///
/// let mut history = History::new();
/// history.push("HELP");
/// history.push("INFO");
///
/// assert_eq!(history.recall_previous(), "INFO");
/// assert_eq!(history.recall_previous(), "HELP");
/// assert_eq!(history.recall_previous(), "INFO");
/// ```
#[derive(Debug, Default, Clone)]
pub struct History {
    lines: Vec<String>,
    cursor: usize,
}

impl History {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a submitted line. Empty lines are ignored.
    pub fn push(&mut self, line: &str) {
        if !line.is_empty() {
            self.lines.push(String::from(line));
        }
    }

    /// Move the cursor back one line, wrapping to the newest line.
    ///
    /// Returns `""` when the history is empty.
    pub fn recall_previous(&mut self) -> &str {
        if self.lines.is_empty() {
            self.cursor = 0;
            return "";
        }
        self.cursor = match self.cursor {
            0 => self.lines.len() - 1,
            n => (n - 1).min(self.lines.len() - 1),
        };
        &self.lines[self.cursor]
    }

    /// Move the cursor forward one line, wrapping to the oldest line.
    ///
    /// Returns `""` when the history is empty.
    pub fn recall_next(&mut self) -> &str {
        if self.lines.is_empty() {
            self.cursor = 0;
            return "";
        }
        self.cursor += 1;
        if self.cursor >= self.lines.len() {
            self.cursor = 0;
        }
        &self.lines[self.cursor]
    }

    /// Put the cursor back at the start.
    pub fn reset_cursor(&mut self) {
        self.cursor = 0;
    }

    /// Current cursor position.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Line at `index`, oldest first.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    /// Lines in submission order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    /// Number of stored lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether nothing has been stored yet.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
