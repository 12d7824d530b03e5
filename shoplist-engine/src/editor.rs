//! Inline price editing rules.
//!
//! A row's price cell swaps between display text and a text input. Enter and
//! blur both commit; Escape discards. Enter is usually followed by a blur from
//! the input being removed, so a second finish on the same edit is ignored.

/// Result of committing an edited price.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PriceCommit {
    Set(String),
    Clear,
}

/// Blank, `0` and `0 gp` reset a price instead of overriding it.
#[must_use]
pub fn clears_override(value: &str) -> bool {
    let value = value.trim();
    value.is_empty() || value == "0" || value.eq_ignore_ascii_case("0 gp")
}

#[must_use]
pub fn price_commit(value: &str) -> PriceCommit {
    if clears_override(value) {
        PriceCommit::Clear
    } else {
        PriceCommit::Set(value.trim().to_string())
    }
}

/// How an edit session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditEnd {
    /// Enter or focus loss.
    Commit,
    /// Escape.
    Discard,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    /// Commit this value through the override path.
    Commit(String),
    /// Restore the text shown before editing.
    Restore(String),
    /// No edit was open.
    Ignored,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
enum EditorState {
    #[default]
    Display,
    Editing {
        original: String,
    },
}

/// Per-row editor; each row owns exactly one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PriceEditor {
    state: EditorState,
}

impl PriceEditor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn is_editing(&self) -> bool {
        matches!(self.state, EditorState::Editing { .. })
    }

    /// Open the editor. Returns the seed value for the input, or `None` when
    /// an edit is already open.
    pub fn begin(&mut self, current: &str) -> Option<String> {
        if self.is_editing() {
            return None;
        }
        let seed = current.trim().to_string();
        self.state = EditorState::Editing {
            original: seed.clone(),
        };
        Some(seed)
    }

    pub fn finish(&mut self, end: EditEnd, value: &str) -> EditOutcome {
        match std::mem::take(&mut self.state) {
            EditorState::Display => EditOutcome::Ignored,
            EditorState::Editing { original } => match end {
                EditEnd::Commit => EditOutcome::Commit(value.to_string()),
                EditEnd::Discard => EditOutcome::Restore(original),
            },
        }
    }
}
