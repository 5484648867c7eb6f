//! Barline delimiters and measure decorations
//!
//! A music line is split on `|:`, `:|`, `|` and `/`. The two-character
//! repeat forms must be recognized before the bare `|`.

use serde::{Deserialize, Serialize};

/// Delimiter found in a music line
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Delimiter {
    Single,      // |
    Slash,       // /
    StartRepeat, // |:
    EndRepeat,   // :|
}

impl Delimiter {
    /// Longest-match lookup at the head of `text`
    ///
    /// Returns the delimiter and its byte length.
    pub fn match_prefix(text: &str) -> Option<(Self, usize)> {
        if text.starts_with("|:") {
            Some((Delimiter::StartRepeat, 2))
        } else if text.starts_with(":|") {
            Some((Delimiter::EndRepeat, 2))
        } else if text.starts_with('|') {
            Some((Delimiter::Single, 1))
        } else if text.starts_with('/') {
            Some((Delimiter::Slash, 1))
        } else {
            None
        }
    }

    /// End decoration for the measure this delimiter closes
    pub fn closing_barline(&self) -> EndBarline {
        match self {
            Delimiter::EndRepeat => EndBarline::RepeatEnd,
            _ => EndBarline::Normal,
        }
    }

    /// Start decoration for the measure this delimiter opens
    pub fn opening_barline(&self) -> StartBarline {
        match self {
            Delimiter::StartRepeat => StartBarline::RepeatStart,
            _ => StartBarline::Normal,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum StartBarline {
    #[default]
    Normal,
    RepeatStart,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum EndBarline {
    #[default]
    Normal,
    RepeatEnd,
}
