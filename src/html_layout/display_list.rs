//! Display List for Layout Rendering
//!
//! This module defines the output structure handed to a rendering backend.
//! The DisplayList is an abstract, positioned-by-structure score: rows of
//! measures of glyph groups, with classes and data attributes already
//! decided, so a backend only has to draw.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::beams::BeamSpan;
use crate::models::NoteId;

/// Width of one note slot in em (beam placement unit)
pub const NOTE_SLOT_EM: f32 = 2.2;

/// Top-level display list containing all rendering information
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct DisplayList {
    pub header: DocumentHeader,

    /// Rows in display order
    pub rows: Vec<RenderRow>,
}

/// Document header information
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct DocumentHeader {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub lyricist: Option<String>,
    pub composer: Option<String>,

    /// Key and time signature, e.g. `1=C 4/4`
    pub meta: String,
}

/// One system row
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RenderRow {
    /// Row index (matches `SlurEndpoint::row`)
    pub row_index: usize,

    pub classes: Vec<String>,

    /// Real measures followed by fillers
    pub measures: Vec<RenderMeasure>,
}

/// One measure slot
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RenderMeasure {
    /// Outer classes (`measure`, `repeat-start`, `repeat-end`)
    pub classes: Vec<String>,

    /// Inner classes (`measure-inner`, `measure-error`)
    pub inner_classes: Vec<String>,

    /// Tooltip text: beat total and trace
    pub title: Option<String>,

    pub items: Vec<RenderItem>,

    /// Empty slot padding a short row
    pub filler: bool,
}

/// Content of a measure
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RenderItem {
    Group(RenderGroup),
    Dash(RenderDash),
}

/// A beamed group of notes with its lyrics
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RenderGroup {
    pub classes: Vec<String>,
    pub notes: Vec<RenderNote>,
    pub beams: Vec<RenderBeam>,

    /// One display string per lyric line (blank slots are U+00A0)
    pub lyrics: Vec<String>,
}

/// A note glyph with its decorations
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RenderNote {
    pub note_id: NoteId,

    /// Digit, or `?` for a placeholder
    pub text: String,

    pub accidental: Option<RenderAccidental>,

    /// Octave dots drawn above / below the digit
    pub dots_above: u8,
    pub dots_below: u8,

    pub augmentation_dot: bool,

    /// Classes of the note content (`note-content`, `error-syntax`)
    pub classes: Vec<String>,

    /// Data attributes (`slurStart`, `slurEnd`, `noteId`)
    pub dataset: BTreeMap<String, String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RenderAccidental {
    /// `♯` or `♭`
    pub text: String,
    pub classes: Vec<String>,
}

/// A beam line, positioned in em relative to its group
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RenderBeam {
    pub span: BeamSpan,
    pub left_em: f32,
    pub width_em: f32,
    pub classes: Vec<String>,
}

impl RenderBeam {
    pub fn from_span(span: BeamSpan) -> Self {
        Self {
            span,
            left_em: span.start as f32 * NOTE_SLOT_EM,
            width_em: span.note_count() as f32 * NOTE_SLOT_EM,
            classes: vec!["beam-line".to_string(), format!("level-{}", span.level)],
        }
    }
}

/// A sustain dash
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RenderDash {
    pub text: String,
    pub classes: Vec<String>,
}

impl Default for RenderDash {
    fn default() -> Self {
        Self {
            text: "-".to_string(),
            classes: vec!["note-content".to_string(), "dash".to_string()],
        }
    }
}

impl DisplayList {
    /// Every rendered note, in document order
    pub fn notes(&self) -> impl Iterator<Item = &RenderNote> {
        self.rows
            .iter()
            .flat_map(|row| row.measures.iter())
            .flat_map(|measure| measure.items.iter())
            .filter_map(|item| match item {
                RenderItem::Group(group) => Some(group),
                RenderItem::Dash(_) => None,
            })
            .flat_map(|group| group.notes.iter())
    }
}
