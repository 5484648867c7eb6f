// Beam grouping - functions for finding beam spans inside one note group

use serde::{Deserialize, Serialize};

use crate::models::{BeamLevel, Note};

/// Deepest beam level drawn (sixteenths)
pub const MAX_BEAM_LEVEL: u8 = 2;

/// One beam line over notes `start..=end` of a group
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct BeamSpan {
    /// 1 = eighth beam, 2 = sixteenth beam
    pub level: u8,
    pub start: usize,
    /// Inclusive
    pub end: usize,
}

impl BeamSpan {
    /// Number of notes under this beam
    pub fn note_count(&self) -> usize {
        self.end - self.start + 1
    }
}

/// Find beam spans per level, level 1 first
///
/// A span is a maximal run of notes whose beam level is at least the
/// span's level. Runs of length one are returned too; whether to draw a
/// flag instead is up to the renderer.
pub fn beam_spans(notes: &[Note]) -> Vec<BeamSpan> {
    let levels: Vec<BeamLevel> = notes.iter().map(|n| n.beam_level).collect();
    beam_spans_for_levels(&levels)
}

/// Same as [`beam_spans`], over raw beam levels
pub fn beam_spans_for_levels(levels: &[BeamLevel]) -> Vec<BeamSpan> {
    let mut spans = vec![];

    for level in 1..=MAX_BEAM_LEVEL {
        let mut run_start: Option<usize> = None;

        for (i, beam_level) in levels.iter().enumerate() {
            if beam_level.as_u8() >= level {
                run_start.get_or_insert(i);
            } else if let Some(start) = run_start.take() {
                spans.push(BeamSpan { level, start, end: i - 1 });
            }
        }

        // Don't forget final run
        if let Some(start) = run_start {
            spans.push(BeamSpan { level, start, end: levels.len() - 1 });
        }
    }

    spans
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_token;

    fn spans(token: &str) -> Vec<BeamSpan> {
        beam_spans(&parse_token(token).notes)
    }

    #[test]
    fn test_quarters_have_no_beams() {
        assert!(spans("1").is_empty());
        assert!(spans("1234").is_empty());
    }

    #[test]
    fn test_eighth_pair() {
        assert_eq!(spans("q1q2"), vec![BeamSpan { level: 1, start: 0, end: 1 }]);
    }

    #[test]
    fn test_sixteenths_get_both_levels() {
        assert_eq!(
            spans("s1s2s3s4"),
            vec![
                BeamSpan { level: 1, start: 0, end: 3 },
                BeamSpan { level: 2, start: 0, end: 3 },
            ]
        );
    }

    #[test]
    fn test_mixed_levels() {
        // q1 s2 s3 -> level 1 over all, level 2 over the two sixteenths
        assert_eq!(
            spans("q1s2s3"),
            vec![
                BeamSpan { level: 1, start: 0, end: 2 },
                BeamSpan { level: 2, start: 1, end: 2 },
            ]
        );
    }

    #[test]
    fn test_quarter_breaks_run() {
        assert_eq!(
            spans("q1q23q4"),
            vec![
                BeamSpan { level: 1, start: 0, end: 1 },
                BeamSpan { level: 1, start: 3, end: 3 },
            ]
        );
    }

    #[test]
    fn test_singleton_run_is_emitted() {
        let result = spans("q1");
        assert_eq!(result, vec![BeamSpan { level: 1, start: 0, end: 0 }]);
        assert_eq!(result[0].note_count(), 1);
    }

    #[test]
    fn test_idempotent() {
        let notes = parse_token("s1q2s3.4s5").notes;
        assert_eq!(beam_spans(&notes), beam_spans(&notes));
    }
}
