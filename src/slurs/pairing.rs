//! Slur pairing - matches slur starts with slur ends
//!
//! Uses stack-based pairing over every note of the score, in order, so
//! slurs may nest and may cross measure and row boundaries:
//! - On slur start (`~>`): push to stack
//! - On slur end (`<~`): pop from stack, if empty = orphan end
//! - After scan: anything left on stack = orphan starts
//!
//! A note carrying both markers (`<~3~>`) closes first, then opens.

use serde::{Deserialize, Serialize};

use crate::models::Score;

use super::{SlurEndpoint, SlurLink};

/// Outcome of one pairing pass
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SlurPairing {
    /// Resolved pairs, in order of their closing note
    pub links: Vec<SlurLink>,
    /// Starts never closed (dropped, no visual artifact)
    pub orphan_starts: Vec<SlurEndpoint>,
    /// Ends with nothing to close (dropped, no visual artifact)
    pub orphan_ends: Vec<SlurEndpoint>,
}

/// Pair slur markers over the whole score
pub fn resolve_pairs(score: &Score) -> SlurPairing {
    pair_endpoints(score.notes_with_rows().map(|(row, note)| {
        (SlurEndpoint { note: note.id, row }, note.slur_end, note.slur_start)
    }))
}

/// Pair an ordered stream of `(endpoint, is_end, is_start)` markers
pub fn pair_endpoints<I>(markers: I) -> SlurPairing
where
    I: IntoIterator<Item = (SlurEndpoint, bool, bool)>,
{
    let mut pairing = SlurPairing::default();
    let mut stack: Vec<SlurEndpoint> = Vec::new();

    for (endpoint, is_end, is_start) in markers {
        if is_end {
            match stack.pop() {
                Some(start) => pairing.links.push(SlurLink { start, end: endpoint }),
                None => pairing.orphan_ends.push(endpoint),
            }
        }
        if is_start {
            stack.push(endpoint);
        }
    }

    // Anything left on stack = orphaned starts (no matching end)
    pairing.orphan_starts = stack;
    pairing
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NoteId;

    fn ep(note: usize) -> SlurEndpoint {
        SlurEndpoint { note: NoteId(note), row: 0 }
    }

    #[test]
    fn test_matched_slur() {
        let pairing = pair_endpoints(vec![(ep(0), false, true), (ep(1), false, false), (ep(2), true, false)]);
        assert_eq!(pairing.links, vec![SlurLink { start: ep(0), end: ep(2) }]);
        assert!(pairing.orphan_starts.is_empty());
        assert!(pairing.orphan_ends.is_empty());
    }

    #[test]
    fn test_nested_slurs_pair_innermost_first() {
        let pairing = pair_endpoints(vec![
            (ep(0), false, true),
            (ep(1), false, true),
            (ep(2), true, false),
            (ep(3), true, false),
        ]);
        assert_eq!(
            pairing.links,
            vec![
                SlurLink { start: ep(1), end: ep(2) },
                SlurLink { start: ep(0), end: ep(3) },
            ]
        );
    }

    #[test]
    fn test_orphans() {
        // ) ( - orphan end then orphan start
        let pairing = pair_endpoints(vec![(ep(0), true, false), (ep(1), false, true)]);
        assert!(pairing.links.is_empty());
        assert_eq!(pairing.orphan_ends, vec![ep(0)]);
        assert_eq!(pairing.orphan_starts, vec![ep(1)]);
    }

    #[test]
    fn test_note_with_both_markers_chains() {
        let pairing = pair_endpoints(vec![(ep(0), false, true), (ep(1), true, true), (ep(2), true, false)]);
        assert_eq!(
            pairing.links,
            vec![
                SlurLink { start: ep(0), end: ep(1) },
                SlurLink { start: ep(1), end: ep(2) },
            ]
        );
    }

    #[test]
    fn test_empty() {
        assert_eq!(pair_endpoints(Vec::new()), SlurPairing::default());
    }
}
