//! Command history with arrow-key navigation

/// Executed command lines and a navigation cursor.
///
/// The cursor ranges over `0..=len`; `len` means "past the newest entry",
/// which is where it sits after every push.
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<String>,
    index: usize,
    limit: usize,
}

impl History {
    /// Create an empty history keeping at most `limit` entries
    pub fn new(limit: usize) -> Self {
        Self {
            entries: Vec::new(),
            index: 0,
            limit: limit.max(1),
        }
    }

    /// Record a command and reset the cursor past the newest entry
    pub fn push(&mut self, line: impl Into<String>) {
        if self.entries.len() == self.limit {
            self.entries.remove(0);
        }
        self.entries.push(line.into());
        self.index = self.entries.len();
    }

    /// Step back. `None` at the oldest entry (input stays as is).
    pub fn up(&mut self) -> Option<&str> {
        if self.index == 0 {
            return None;
        }
        self.index -= 1;
        self.entries.get(self.index).map(String::as_str)
    }

    /// Step forward. Leaving the newest entry yields `""` (clear the input);
    /// `None` when already past it.
    pub fn down(&mut self) -> Option<&str> {
        let len = self.entries.len();
        if self.index + 1 < len {
            self.index += 1;
            self.entries.get(self.index).map(String::as_str)
        } else if self.index + 1 == len {
            self.index = len;
            Some("")
        } else {
            None
        }
    }

    /// Current cursor position
    pub fn index(&self) -> usize {
        self.index
    }

    /// Number of stored entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been executed yet
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Stored entries, oldest first
    pub fn entries(&self) -> &[String] {
        &self.entries
    }
}
