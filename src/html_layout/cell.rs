//! Note-level styling
//!
//! This module handles class generation and data attributes for individual
//! note glyphs.

use std::collections::BTreeMap;

use super::display_list::{RenderAccidental, RenderNote};
use crate::models::{Accidental, Note};

/// Builder for note styling
pub struct NoteStyleBuilder;

impl NoteStyleBuilder {
    /// Build a RenderNote with all decorations and flags
    pub fn build_render_note(note: &Note) -> RenderNote {
        let mut classes = vec!["note-content".to_string()];
        if note.syntax_error {
            classes.push("error-syntax".to_string());
        }

        let mut dataset = BTreeMap::new();
        dataset.insert("noteId".to_string(), note.id.0.to_string());
        if note.slur_start {
            dataset.insert("slurStart".to_string(), "true".to_string());
        }
        if note.slur_end {
            dataset.insert("slurEnd".to_string(), "true".to_string());
        }

        RenderNote {
            note_id: note.id,
            text: note.symbol().to_string(),
            accidental: Self::accidental(note.accidental),
            dots_above: note.octave.max(0).unsigned_abs(),
            dots_below: note.octave.min(0).unsigned_abs(),
            augmentation_dot: note.dotted,
            classes,
            dataset,
        }
    }

    fn accidental(accidental: Accidental) -> Option<RenderAccidental> {
        let glyph = accidental.glyph()?;
        let class = match accidental {
            Accidental::Sharp => "sharp",
            Accidental::Flat => "flat",
            Accidental::None => return None,
        };
        Some(RenderAccidental {
            text: glyph.to_string(),
            classes: vec!["accidental".to_string(), class.to_string()],
        })
    }
}
