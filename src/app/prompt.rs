//! Modal prompts: single-line inputs and the names menu.

use crate::calc::Readout;

use super::model::format_address;

/// Longest text a prompt line holds, in characters.
pub const MAX_INPUT_CHARS: usize = 68;

/// An editable line with a caret, measured in characters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineInput {
    chars: Vec<char>,
    caret: usize,
}

impl LineInput {
    /// Start with `initial` filled in and the caret after it.
    pub fn new(initial: &str) -> Self {
        let chars: Vec<char> = initial.chars().take(MAX_INPUT_CHARS).collect();
        let caret = chars.len();
        Self { chars, caret }
    }

    pub fn text(&self) -> String {
        self.chars.iter().collect()
    }

    pub const fn caret(&self) -> usize {
        self.caret
    }

    /// Insert at the caret; ignored once the line is full.
    pub fn insert(&mut self, c: char) {
        if self.chars.len() >= MAX_INPUT_CHARS {
            return;
        }
        self.chars.insert(self.caret, c);
        self.caret += 1;
    }

    /// Delete the character before the caret.
    pub fn backspace(&mut self) {
        if self.caret > 0 {
            self.caret -= 1;
            self.chars.remove(self.caret);
        }
    }

    /// Delete the character under the caret.
    pub fn delete(&mut self) {
        if self.caret < self.chars.len() {
            self.chars.remove(self.caret);
        }
    }

    pub const fn left(&mut self) {
        self.caret = self.caret.saturating_sub(1);
    }

    pub fn right(&mut self) {
        self.caret = (self.caret + 1).min(self.chars.len());
    }

    pub const fn home(&mut self) {
        self.caret = 0;
    }

    pub fn end(&mut self) {
        self.caret = self.chars.len();
    }
}

/// A comment listed in the names menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameEntry {
    pub address: usize,
    pub label: String,
}

/// Selectable list of every comment in the buffer, sorted by address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamesMenu {
    entries: Vec<NameEntry>,
    selected: usize,
}

impl NamesMenu {
    /// Build from `(address, text)` pairs. Returns `None` when empty.
    pub fn new<'a>(comments: impl IntoIterator<Item = (usize, &'a str)>) -> Option<Self> {
        let mut entries: Vec<NameEntry> = comments
            .into_iter()
            .map(|(address, text)| NameEntry {
                address,
                label: format!("{address:08x}  {text}"),
            })
            .collect();
        if entries.is_empty() {
            return None;
        }
        entries.sort_by_key(|entry| entry.address);
        Some(Self {
            entries,
            selected: 0,
        })
    }

    pub fn entries(&self) -> &[NameEntry] {
        &self.entries
    }

    pub const fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_address(&self) -> Option<usize> {
        self.entries.get(self.selected).map(|entry| entry.address)
    }

    pub const fn up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn down(&mut self) {
        if self.selected + 1 < self.entries.len() {
            self.selected += 1;
        }
    }
}

/// The prompt currently owning the keyboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prompt {
    /// Expression entry with the readout of the last evaluation.
    Calculator { input: LineInput, readout: Readout },
    Goto { input: LineInput },
    /// Comment entry for the byte at `address`.
    Comment { address: usize, input: LineInput },
    Names(NamesMenu),
}

impl Prompt {
    pub fn calculator() -> Self {
        Self::Calculator {
            input: LineInput::default(),
            readout: Readout::new(None),
        }
    }

    pub fn goto() -> Self {
        Self::Goto {
            input: LineInput::default(),
        }
    }

    pub fn comment(address: usize, existing: Option<&str>) -> Self {
        Self::Comment {
            address,
            input: LineInput::new(existing.unwrap_or_default()),
        }
    }

    pub fn title(&self) -> String {
        match self {
            Self::Calculator { .. } => "Calculator".to_string(),
            Self::Goto { .. } => "Goto".to_string(),
            Self::Comment { address, .. } => {
                format!("Comment at offset {}", format_address(*address))
            }
            Self::Names(_) => "Names".to_string(),
        }
    }

    pub const fn input(&self) -> Option<&LineInput> {
        match self {
            Self::Calculator { input, .. } | Self::Goto { input } | Self::Comment { input, .. } => {
                Some(input)
            }
            Self::Names(_) => None,
        }
    }

    pub const fn input_mut(&mut self) -> Option<&mut LineInput> {
        match self {
            Self::Calculator { input, .. } | Self::Goto { input } | Self::Comment { input, .. } => {
                Some(input)
            }
            Self::Names(_) => None,
        }
    }
}
