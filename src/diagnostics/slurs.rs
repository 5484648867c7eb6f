//! Slur diagnostics - reports orphaned/unmatched slur markers
//!
//! Orphans are dropped from the drawing without any visual artifact; they
//! only show up here, at `info` severity.

use crate::slurs::{SlurEndpoint, SlurPairing};

use super::{DiagnosticMark, DiagnosticSeverity};

/// Marks for every orphan end and orphan start of a pairing pass
pub fn unresolved_slur_marks(pairing: &SlurPairing) -> Vec<DiagnosticMark> {
    let ends = pairing.orphan_ends.iter().map(|endpoint| {
        mark(endpoint, "slur_orphan_end", "Unmatched slur end (no opening marker)")
    });
    let starts = pairing.orphan_starts.iter().map(|endpoint| {
        mark(endpoint, "slur_orphan_begin", "Unmatched slur start (no closing marker)")
    });
    ends.chain(starts).collect()
}

fn mark(endpoint: &SlurEndpoint, kind: &str, message: &str) -> DiagnosticMark {
    DiagnosticMark::new(endpoint.row, DiagnosticSeverity::Info, kind, message).at_note(endpoint.note)
}
