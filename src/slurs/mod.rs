//! Slur resolution
//!
//! Two phases: `resolve_pairs` is a pure function of the parsed score;
//! `compute_geometry` runs later, against measured layout.

pub mod geometry;
pub mod pairing;

use serde::{Deserialize, Serialize};

use crate::models::NoteId;

pub use geometry::{
    compute_geometry, link_geometry, LayoutReport, MeasuredLayout, MetricsProvider, Rect, SlurGeometry,
    SlurShape,
};
pub use pairing::{pair_endpoints, resolve_pairs, SlurPairing};

/// A note taking part in a slur, with the row it was laid out on
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SlurEndpoint {
    pub note: NoteId,
    pub row: usize,
}

/// One resolved slur between two notes
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SlurLink {
    pub start: SlurEndpoint,
    pub end: SlurEndpoint,
}

impl SlurLink {
    pub fn is_same_row(&self) -> bool {
        self.start.row == self.end.row
    }
}
