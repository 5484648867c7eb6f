//! Slur geometry - second pass, after layout
//!
//! Needs measured glyph boxes, which only exist once the display list has
//! been realized by the host and the layout has settled. Metrics come in
//! through [`MetricsProvider`]; a missing box defers the whole pass instead
//! of fabricating coordinates.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{JianpuError, Result};
use crate::html_layout::curves::{CurveRenderer, Point, Ribbon};
use crate::models::{NoteId, Score};

use super::SlurLink;

/// Endpoint anchor sits this many scale units above the glyph top
pub const ANCHOR_LIFT: f32 = 1.5;
/// Distance kept from a row's edge by a broken slur's half-arc
pub const ROW_EDGE_INSET: f32 = 10.0;

/// Axis-aligned box relative to the score container origin
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self { left, top, width, height }
    }

    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn top_center(&self) -> Point {
        Point::new(self.left + self.width / 2.0, self.top)
    }
}

/// Source of measured positions (implemented by the host's layout)
pub trait MetricsProvider {
    /// Box of the note's digit glyph
    fn note_rect(&self, note: NoteId) -> Option<Rect>;

    /// Box of a whole row
    fn row_rect(&self, row: usize) -> Option<Rect>;
}

/// Wire form of a layout measurement report
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct LayoutReport {
    #[serde(default)]
    pub notes: Vec<NoteRect>,
    #[serde(default)]
    pub rows: Vec<RowRect>,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct NoteRect {
    pub note: NoteId,
    pub rect: Rect,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct RowRect {
    pub row: usize,
    pub rect: Rect,
}

/// Measured layout held in memory
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(from = "LayoutReport", into = "LayoutReport")]
pub struct MeasuredLayout {
    notes: HashMap<NoteId, Rect>,
    rows: HashMap<usize, Rect>,
}

impl MeasuredLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_note(mut self, note: NoteId, rect: Rect) -> Self {
        self.notes.insert(note, rect);
        self
    }

    pub fn with_row(mut self, row: usize, rect: Rect) -> Self {
        self.rows.insert(row, rect);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty() && self.rows.is_empty()
    }
}

impl From<LayoutReport> for MeasuredLayout {
    fn from(report: LayoutReport) -> Self {
        Self {
            notes: report.notes.into_iter().map(|n| (n.note, n.rect)).collect(),
            rows: report.rows.into_iter().map(|r| (r.row, r.rect)).collect(),
        }
    }
}

impl From<MeasuredLayout> for LayoutReport {
    fn from(layout: MeasuredLayout) -> Self {
        let mut notes: Vec<NoteRect> = layout
            .notes
            .into_iter()
            .map(|(note, rect)| NoteRect { note, rect })
            .collect();
        notes.sort_by_key(|n| n.note);
        let mut rows: Vec<RowRect> = layout
            .rows
            .into_iter()
            .map(|(row, rect)| RowRect { row, rect })
            .collect();
        rows.sort_by_key(|r| r.row);
        Self { notes, rows }
    }
}

impl MetricsProvider for MeasuredLayout {
    fn note_rect(&self, note: NoteId) -> Option<Rect> {
        self.notes.get(&note).copied()
    }

    fn row_rect(&self, row: usize) -> Option<Rect> {
        self.rows.get(&row).copied()
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum SlurShape {
    /// One ribbon between two notes of one row
    SameRow,
    /// Two half-arcs, split by a row wrap
    CrossRow,
}

/// Drawable form of one slur link
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SlurGeometry {
    pub link: SlurLink,
    pub shape: SlurShape,
    pub ribbons: Vec<Ribbon>,
}

impl SlurGeometry {
    /// SVG path data, one per ribbon
    pub fn svg_paths(&self) -> Vec<String> {
        self.ribbons.iter().map(Ribbon::to_svg_path).collect()
    }
}

/// Anchor point of a note: top center of its glyph, lifted by `ANCHOR_LIFT`
fn anchor(metrics: &dyn MetricsProvider, note: NoteId, scale: f32) -> Result<Point> {
    let rect = metrics
        .note_rect(note)
        .ok_or(JianpuError::NoteNotMeasured(note))?;
    let top = rect.top_center();
    Ok(Point::new(top.x, top.y - scale * ANCHOR_LIFT))
}

/// Geometry for a single link
pub fn link_geometry(link: &SlurLink, metrics: &dyn MetricsProvider, scale: f32) -> Result<SlurGeometry> {
    let start = anchor(metrics, link.start.note, scale)?;
    let end = anchor(metrics, link.end.note, scale)?;

    if link.is_same_row() {
        return Ok(SlurGeometry {
            link: *link,
            shape: SlurShape::SameRow,
            ribbons: vec![CurveRenderer::slur_ribbon(start, end, scale)],
        });
    }

    let start_row = metrics
        .row_rect(link.start.row)
        .ok_or(JianpuError::RowNotMeasured(link.start.row))?;
    let end_row = metrics
        .row_rect(link.end.row)
        .ok_or(JianpuError::RowNotMeasured(link.end.row))?;

    Ok(SlurGeometry {
        link: *link,
        shape: SlurShape::CrossRow,
        ribbons: vec![
            CurveRenderer::outgoing_half_arc(start, start_row.right() - ROW_EDGE_INSET, scale),
            CurveRenderer::incoming_half_arc(end_row.left + ROW_EDGE_INSET, end, scale),
        ],
    })
}

/// Geometry for every resolved slur of the score
///
/// All-or-nothing: if any endpoint is not measured yet the error is
/// returned (see [`JianpuError::is_deferral`]) and nothing is emitted.
pub fn compute_geometry(score: &Score, metrics: &dyn MetricsProvider) -> Result<Vec<SlurGeometry>> {
    let scale = score.config.scale;
    score
        .slurs
        .iter()
        .map(|link| link_geometry(link, metrics, scale))
        .collect()
}
