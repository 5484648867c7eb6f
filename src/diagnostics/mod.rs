//! Diagnostics module for notation errors
//!
//! Every error class is absorbed where it happens (a flag on the note or
//! measure, or a silently dropped slur marker). This module gathers them
//! into a flat report a host can list next to the rendered score.

pub mod slurs;

use serde::{Deserialize, Serialize};

use crate::models::{NoteId, Score};
use crate::slurs::resolve_pairs;

/// Severity level for diagnostic marks
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticSeverity {
    Error,
    Warning,
    Info,
}

/// A diagnostic mark highlighting an issue at a specific location
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DiagnosticMark {
    /// Row index in the score
    pub row: usize,
    /// Measure index within the row, when known
    pub measure: Option<usize>,
    /// Offending note, when the issue is note-level
    pub note: Option<NoteId>,
    pub severity: DiagnosticSeverity,
    /// Kind identifier (e.g., "token_syntax_error", "slur_orphan_end")
    pub kind: String,
    /// Human-readable message
    pub message: String,
}

impl DiagnosticMark {
    pub fn new(
        row: usize,
        severity: DiagnosticSeverity,
        kind: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            row,
            measure: None,
            note: None,
            severity,
            kind: kind.into(),
            message: message.into(),
        }
    }

    pub fn in_measure(mut self, measure: usize) -> Self {
        self.measure = Some(measure);
        self
    }

    pub fn at_note(mut self, note: NoteId) -> Self {
        self.note = Some(note);
        self
    }
}

/// Collection of diagnostic marks for an entire score
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Diagnostics {
    pub marks: Vec<DiagnosticMark>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self { marks: Vec::new() }
    }

    pub fn add(&mut self, mark: DiagnosticMark) {
        self.marks.push(mark);
    }

    pub fn extend(&mut self, marks: impl IntoIterator<Item = DiagnosticMark>) {
        self.marks.extend(marks);
    }

    /// Check if there are any errors
    pub fn has_errors(&self) -> bool {
        self.marks
            .iter()
            .any(|m| m.severity == DiagnosticSeverity::Error)
    }

    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    pub fn count_kind(&self, kind: &str) -> usize {
        self.marks.iter().filter(|m| m.kind == kind).count()
    }
}

/// Gather syntax errors, duration mismatches and unresolved slur markers
pub fn collect_diagnostics(score: &Score) -> Diagnostics {
    let mut diagnostics = Diagnostics::new();

    for row in &score.rows {
        for (measure_idx, measure) in row.measures.iter().enumerate() {
            for note in measure.notes().filter(|n| n.syntax_error) {
                diagnostics.add(
                    DiagnosticMark::new(
                        row.index,
                        DiagnosticSeverity::Error,
                        "token_syntax_error",
                        format!("Unmatched slur marker in '{}'", note.source),
                    )
                    .in_measure(measure_idx)
                    .at_note(note.id),
                );
            }

            if !measure.is_valid {
                diagnostics.add(
                    DiagnosticMark::new(
                        row.index,
                        DiagnosticSeverity::Warning,
                        "measure_duration_mismatch",
                        format!(
                            "Measure has {} beat(s), expected {}: {}",
                            measure.duration, score.config.beats_per_bar, measure.trace
                        ),
                    )
                    .in_measure(measure_idx),
                );
            }
        }
    }

    diagnostics.extend(slurs::unresolved_slur_marks(&resolve_pairs(score)));
    diagnostics
}
