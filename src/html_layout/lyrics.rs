//! Lyric rows under a note group
//!
//! Every lyric line keeps its vertical slot: missing syllables and `--`
//! holds render as a non-breaking space.

use crate::models::{Group, Syllable};

/// Placeholder keeping an empty lyric slot at full height
pub const BLANK_SYLLABLE: &str = "\u{00A0}";

/// Display strings for a group's lyric lines (empty when untagged)
pub fn lyric_rows(group: &Group) -> Vec<String> {
    group
        .lyrics
        .as_ref()
        .map(|syllables| syllables.iter().map(syllable_text).collect())
        .unwrap_or_default()
}

fn syllable_text(syllable: &Option<Syllable>) -> String {
    syllable
        .as_ref()
        .and_then(Syllable::display_text)
        .unwrap_or(BLANK_SYLLABLE)
        .to_string()
}
