//! Row-level layout computation
//!
//! This module turns one packed row into render measures: barline classes,
//! error flags and tooltips per measure, then glyph groups, beams and
//! lyrics per content item.

use super::cell::NoteStyleBuilder;
use super::display_list::*;
use super::lyrics::lyric_rows;
use crate::beams::beam_spans;
use crate::models::*;

/// Computes layout for a single row
pub struct LayoutRowComputer {
    beats_per_bar: f64,
}

impl LayoutRowComputer {
    pub fn new(beats_per_bar: f64) -> Self {
        Self { beats_per_bar }
    }

    /// Compute layout for a single row, fillers included
    pub fn compute_row_layout(&self, row: &Row) -> RenderRow {
        let mut measures: Vec<RenderMeasure> = row
            .measures
            .iter()
            .map(|measure| self.compute_measure(measure))
            .collect();
        measures.extend((0..row.fillers).map(|_| Self::filler()));

        RenderRow {
            row_index: row.index,
            classes: vec!["system-row".to_string()],
            measures,
        }
    }

    fn compute_measure(&self, measure: &Measure) -> RenderMeasure {
        let mut classes = vec!["measure".to_string()];
        if measure.start_barline == StartBarline::RepeatStart {
            classes.push("repeat-start".to_string());
        }
        if measure.end_barline == EndBarline::RepeatEnd {
            classes.push("repeat-end".to_string());
        }

        let mut inner_classes = vec!["measure-inner".to_string()];
        if !measure.is_valid {
            inner_classes.push("measure-error".to_string());
        }

        let title = format!(
            "Beats: {} / {}\nNotes: {}",
            measure.duration, self.beats_per_bar, measure.trace
        );

        RenderMeasure {
            classes,
            inner_classes,
            title: Some(title),
            items: measure.content.iter().map(Self::compute_item).collect(),
            filler: false,
        }
    }

    fn compute_item(item: &ContentItem) -> RenderItem {
        match item {
            ContentItem::Group(group) => RenderItem::Group(RenderGroup {
                classes: vec!["beam-group".to_string()],
                notes: group.notes.iter().map(NoteStyleBuilder::build_render_note).collect(),
                beams: beam_spans(&group.notes)
                    .into_iter()
                    .map(RenderBeam::from_span)
                    .collect(),
                lyrics: lyric_rows(group),
            }),
            ContentItem::Dash => RenderItem::Dash(RenderDash::default()),
        }
    }

    fn filler() -> RenderMeasure {
        RenderMeasure {
            classes: vec!["measure".to_string()],
            inner_classes: Vec::new(),
            title: None,
            items: Vec::new(),
            filler: true,
        }
    }
}
