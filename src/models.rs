use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

pub const DEFAULT_WORDS_TARGET: usize = 18;
pub const DEFAULT_REROLL_SEED: u64 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    Word,
    Number,
    Whitespace,
    Punctuation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub kind: TokenKind,
    /// index into the word-stream, only set for words and numbers
    pub position: Option<usize>,
}

impl Token {
    pub fn is_streamed(&self) -> bool {
        matches!(self.kind, TokenKind::Word | TokenKind::Number)
    }
}

/// A contiguous span of word-stream positions, `end` inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Window {
    pub start: usize,
    pub end: usize,
    pub len: usize,
    pub score: f64,
}

impl Window {
    /// A window always covers at least one word; `len` 0 is treated as 1.
    pub fn new(start: usize, len: usize, score: f64) -> Self {
        let len = len.max(1);
        Self {
            start,
            end: start + len - 1,
            len,
            score,
        }
    }

    pub fn overlaps(&self, other: &Window) -> bool {
        !(self.end < other.start || self.start > other.end)
    }

    // one untouched token must separate two windows
    pub fn too_close(&self, other: &Window) -> bool {
        self.start.abs_diff(other.end) <= 1 || other.start.abs_diff(self.end) <= 1
    }

    pub fn positions(&self) -> std::ops::RangeInclusive<usize> {
        self.start..=self.end
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candidate {
    /// sorted by `start`
    pub windows: Vec<Window>,
    pub score: f64,
    pub word_count: usize,
}

impl Candidate {
    pub fn signature(&self) -> String {
        self.windows
            .iter()
            .map(|w| format!("{}-{}", w.start, w.end))
            .collect::<Vec<_>>()
            .join("|")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Mode {
    #[default]
    SmartLocal,
    RandomIsh,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::SmartLocal => "smart_local",
            Mode::RandomIsh => "randomish",
        }
    }
}

// unknown mode names fall back to smart_local instead of failing
impl From<String> for Mode {
    fn from(value: String) -> Self {
        Mode::from(value.as_str())
    }
}

impl From<&str> for Mode {
    fn from(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "randomish" | "random_ish" | "random-ish" | "random" => Mode::RandomIsh,
            _ => Mode::SmartLocal,
        }
    }
}

impl From<Mode> for String {
    fn from(mode: Mode) -> Self {
        mode.as_str().to_string()
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Settings {
    pub enabled: bool,
    pub poem_words_target: usize,
    pub mode: Mode,
    pub reroll_seed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            enabled: true,
            poem_words_target: DEFAULT_WORDS_TARGET,
            mode: Mode::SmartLocal,
            reroll_seed: DEFAULT_REROLL_SEED,
        }
    }
}

/// Settings as they arrive from a store: every field optional, numbers unchecked.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSettings {
    pub enabled: Option<bool>,
    #[serde(alias = "poemWordsTarget")]
    pub words_target: Option<i64>,
    pub mode: Option<String>,
    #[serde(alias = "rerollSeed")]
    pub reroll_seed: Option<i64>,
}

impl From<RawSettings> for Settings {
    fn from(raw: RawSettings) -> Self {
        let defaults = Settings::default();
        Self {
            enabled: raw.enabled.unwrap_or(defaults.enabled),
            poem_words_target: raw
                .words_target
                .filter(|n| *n >= 1)
                .and_then(|n| usize::try_from(n).ok())
                .unwrap_or(defaults.poem_words_target),
            mode: raw.mode.as_deref().map(Mode::from).unwrap_or_default(),
            reroll_seed: raw
                .reroll_seed
                .and_then(|n| u64::try_from(n).ok())
                .unwrap_or(defaults.reroll_seed),
        }
    }
}

/// What one selection run decided to keep.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Selection {
    pub seed: u32,
    pub mode: Mode,
    pub keep_positions: BTreeSet<usize>,
    /// empty when the poem came from discrete positions
    pub windows: Vec<Window>,
    pub poem: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    Poem(Selection),
    Insufficient { words: usize },
}

impl Outcome {
    pub fn selection(&self) -> Option<&Selection> {
        match self {
            Outcome::Poem(selection) => Some(selection),
            Outcome::Insufficient { .. } => None,
        }
    }
}
