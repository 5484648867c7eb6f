//! Core document model: configuration, measures, rows, score
//!
//! Ownership is a strict tree (Score -> Row -> Measure -> ContentItem -> Note).
//! Slur links reference notes by `NoteId` and never own them.

use serde::{Deserialize, Serialize};

use super::barlines::{EndBarline, StartBarline};
use super::duration::Duration;
use super::elements::{ContentItem, Note, NoteId};
use crate::error::{JianpuError, Result};
use crate::slurs::SlurLink;

/// Allowed deviation between a measure's total and `beats_per_bar`
pub const DURATION_TOLERANCE: f64 = 0.01;

/// Display scale bounds (font size in px)
pub const MIN_SCALE: f32 = 5.0;
pub const MAX_SCALE: f32 = 50.0;
pub const DEFAULT_SCALE: f32 = 7.4;

/// Optional title block shown above the first row
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ScoreHeader {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub lyricist: Option<String>,
    pub composer: Option<String>,
}

impl ScoreHeader {
    /// Trim every field, dropping blank ones
    pub fn normalized(&self) -> Self {
        fn clean(field: &Option<String>) -> Option<String> {
            field
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        }

        Self {
            title: clean(&self.title),
            subtitle: clean(&self.subtitle),
            lyricist: clean(&self.lyricist),
            composer: clean(&self.composer),
        }
    }
}

/// Document-wide parameters supplied by the host
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ScoreConfig {
    /// Expected total duration of each measure, in beats
    pub beats_per_bar: f64,
    /// Lower number of the time signature (display only)
    pub beat_unit: u32,
    /// Tonic shown as `1=<key>`
    pub key_signature: String,
    pub measures_per_row: usize,
    /// Display scale (zoom), drives slur geometry
    pub scale: f32,
    pub header: ScoreHeader,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self {
            beats_per_bar: 4.0,
            beat_unit: 4,
            key_signature: "C".to_string(),
            measures_per_row: 4,
            scale: DEFAULT_SCALE,
            header: ScoreHeader::default(),
        }
    }
}

impl ScoreConfig {
    /// Reject values a host should never send
    pub fn validate(&self) -> Result<()> {
        if !self.beats_per_bar.is_finite() || self.beats_per_bar <= 0.0 {
            return Err(JianpuError::InvalidConfig(format!(
                "beatsPerBar must be a positive number, got {}",
                self.beats_per_bar
            )));
        }
        if self.beat_unit == 0 {
            return Err(JianpuError::InvalidConfig("beatUnit must be positive".to_string()));
        }
        if self.measures_per_row == 0 {
            return Err(JianpuError::InvalidConfig(
                "measuresPerRow must be positive".to_string(),
            ));
        }
        if !self.scale.is_finite() {
            return Err(JianpuError::InvalidConfig(format!(
                "scale must be finite, got {}",
                self.scale
            )));
        }
        Ok(())
    }

    /// Replace unusable values with defaults and clamp the display scale
    pub fn sanitized(&self) -> Self {
        let defaults = ScoreConfig::default();
        let mut config = self.clone();

        if !config.beats_per_bar.is_finite() || config.beats_per_bar <= 0.0 {
            log::warn!("beatsPerBar {} unusable, falling back to {}", config.beats_per_bar, defaults.beats_per_bar);
            config.beats_per_bar = defaults.beats_per_bar;
        }
        if config.beat_unit == 0 {
            log::warn!("beatUnit 0 unusable, falling back to {}", defaults.beat_unit);
            config.beat_unit = defaults.beat_unit;
        }
        if config.measures_per_row == 0 {
            log::warn!("measuresPerRow 0 unusable, falling back to {}", defaults.measures_per_row);
            config.measures_per_row = defaults.measures_per_row;
        }
        if config.key_signature.trim().is_empty() {
            config.key_signature = defaults.key_signature;
        }
        config.scale = if config.scale.is_finite() {
            config.scale.clamp(MIN_SCALE, MAX_SCALE)
        } else {
            DEFAULT_SCALE
        };
        config.header = config.header.normalized();
        config
    }

    /// Meta line shown at the top left, e.g. `1=C 4/4`
    pub fn meta_line(&self) -> String {
        format!("1={} {}/{}", self.key_signature, self.beats_per_bar, self.beat_unit)
    }
}

/// A finalized measure
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Measure {
    pub content: Vec<ContentItem>,
    pub start_barline: StartBarline,
    pub end_barline: EndBarline,
    /// Sum of content durations
    pub duration: Duration,
    /// `|duration - beats_per_bar| < DURATION_TOLERANCE`
    pub is_valid: bool,
    /// Debug trace: `symbol(duration)` per note or dash, comma separated
    pub trace: String,
}

impl Measure {
    /// Finalize accumulated content against the bar length
    pub fn finalize(
        content: Vec<ContentItem>,
        start_barline: StartBarline,
        end_barline: EndBarline,
        beats_per_bar: f64,
    ) -> Self {
        let mut duration = Duration::zero();
        let mut trace = Vec::new();

        for item in &content {
            match item {
                ContentItem::Group(group) => {
                    for note in &group.notes {
                        duration = duration + note.duration;
                        trace.push(format!("{}({})", note.symbol(), note.duration));
                    }
                }
                ContentItem::Dash => {
                    duration = duration + Duration::beat();
                    trace.push(format!("-({})", Duration::beat()));
                }
            }
        }

        let is_valid = (duration.as_f64() - beats_per_bar).abs() < DURATION_TOLERANCE;

        Self {
            content,
            start_barline,
            end_barline,
            duration,
            is_valid,
            trace: trace.join(", "),
        }
    }

    /// Notes in display order, across all groups
    pub fn notes(&self) -> impl Iterator<Item = &Note> {
        self.content
            .iter()
            .filter_map(ContentItem::as_group)
            .flat_map(|group| group.notes.iter())
    }
}

/// Re-sum a measure trace exactly
///
/// Entries look like `1(1)`, `3(0.375)` or `-(1)`, joined by `, `.
pub fn parse_trace(trace: &str) -> Result<Duration> {
    if trace.trim().is_empty() {
        return Ok(Duration::zero());
    }

    trace
        .split(", ")
        .map(|entry| {
            let open = entry
                .rfind('(')
                .ok_or_else(|| JianpuError::MalformedTrace(entry.to_string()))?;
            let beats = entry[open + 1..]
                .strip_suffix(')')
                .ok_or_else(|| JianpuError::MalformedTrace(entry.to_string()))?;
            Duration::parse_decimal(beats)
        })
        .sum::<Result<Duration>>()
}

/// A display row: at most `measures_per_row` measures, padded with fillers
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Row {
    /// Position of this row in the score
    pub index: usize,
    pub measures: Vec<Measure>,
    /// Empty filler measures appended to keep grid width constant
    pub fillers: usize,
}

impl Row {
    /// Measure slots including fillers
    pub fn width(&self) -> usize {
        self.measures.len() + self.fillers
    }

    pub fn notes(&self) -> impl Iterator<Item = &Note> {
        self.measures.iter().flat_map(Measure::notes)
    }
}

/// The parsed, paired score
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Score {
    pub config: ScoreConfig,
    pub rows: Vec<Row>,
    /// Resolved slur pairs
    pub slurs: Vec<SlurLink>,
}

impl Score {
    /// All real measures in document order
    pub fn measures(&self) -> impl Iterator<Item = &Measure> {
        self.rows.iter().flat_map(|row| row.measures.iter())
    }

    /// All notes in document order, paired with their row index
    pub fn notes_with_rows(&self) -> impl Iterator<Item = (usize, &Note)> {
        self.rows
            .iter()
            .flat_map(|row| row.notes().map(move |note| (row.index, note)))
    }

    pub fn find_note(&self, id: NoteId) -> Option<&Note> {
        self.notes_with_rows().map(|(_, n)| n).find(|n| n.id == id)
    }
}
