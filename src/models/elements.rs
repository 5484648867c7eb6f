//! Musical elements: notes, note groups, sustain dashes
//!
//! A Group is what one whitespace-delimited source token produces. A beamed
//! run such as `s1s2s3s4` is a single Group holding four Notes.

use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};
use std::fmt;

use super::duration::Duration;

/// Score-wide note identity, assigned in document order
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct NoteId(pub usize);

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// Scale degree of a note
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Pitch {
    /// `0`
    Rest,
    /// `1`..=`7`
    Degree(u8),
    /// Placeholder for a token that produced no note but carries an error
    Unknown,
}

impl Pitch {
    /// Parse a single source digit
    pub fn from_digit(ch: char) -> Option<Self> {
        match ch {
            '0' => Some(Pitch::Rest),
            '1'..='7' => ch.to_digit(10).map(|d| Pitch::Degree(d as u8)),
            _ => None,
        }
    }

    /// Glyph shown for this pitch
    pub fn symbol(&self) -> char {
        match self {
            Pitch::Rest => '0',
            Pitch::Degree(d) => char::from(b'0' + *d),
            Pitch::Unknown => '?',
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Accidental {
    #[default]
    None,
    Sharp, // #
    Flat,  // b
}

impl Accidental {
    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            '#' => Some(Accidental::Sharp),
            'b' => Some(Accidental::Flat),
            _ => None,
        }
    }

    /// Unicode glyph for rendering
    pub fn glyph(&self) -> Option<char> {
        match self {
            Accidental::None => None,
            Accidental::Sharp => Some('♯'),
            Accidental::Flat => Some('♭'),
        }
    }
}

/// Rhythmic class derived from the `q`/`s` prefix
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Rhythm {
    #[default]
    Quarter,   // no prefix, 1 beat
    Eighth,    // q, 0.5 beat
    Sixteenth, // s, 0.25 beat
}

impl Rhythm {
    /// Undotted duration of this class
    pub fn base_duration(&self) -> Duration {
        match self {
            Rhythm::Quarter => Duration::beat(),
            Rhythm::Eighth => Duration::from_ratio(1, 2),
            Rhythm::Sixteenth => Duration::from_ratio(1, 4),
        }
    }

    pub fn beam_level(&self) -> BeamLevel {
        match self {
            Rhythm::Quarter => BeamLevel::None,
            Rhythm::Eighth => BeamLevel::Single,
            Rhythm::Sixteenth => BeamLevel::Double,
        }
    }
}

/// Number of beam lines a note requires
#[derive(Serialize_repr, Deserialize_repr, Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum BeamLevel {
    #[default]
    None = 0,
    Single = 1,
    Double = 2,
}

impl BeamLevel {
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

/// A single parsed note
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Note {
    /// Identity within the score (assigned by the measure builder)
    pub id: NoteId,
    /// Exact source text this note was matched from
    pub source: String,
    pub pitch: Pitch,
    pub accidental: Accidental,
    pub rhythm: Rhythm,
    pub beam_level: BeamLevel,
    /// Net octave shift: positive = high marks (`'`), negative = low marks (`,`)
    pub octave: i8,
    /// Augmentation dot present
    pub dotted: bool,
    pub duration: Duration,
    /// Carries the `~>` suffix
    pub slur_start: bool,
    /// Carries a `<~` marker (prefix, or trailing when it opens no further note)
    pub slur_end: bool,
    /// Token had unmatched tilde characters
    pub syntax_error: bool,
}

impl Note {
    /// Placeholder emitted when an erroneous token yields no notes (e.g. a lone `~`)
    pub fn placeholder(source: &str) -> Self {
        Self {
            id: NoteId::default(),
            source: source.to_string(),
            pitch: Pitch::Unknown,
            accidental: Accidental::None,
            rhythm: Rhythm::Quarter,
            beam_level: BeamLevel::None,
            octave: 0,
            dotted: false,
            duration: Duration::beat(),
            slur_start: false,
            slur_end: false,
            syntax_error: true,
        }
    }

    /// Symbol used in measure debug traces
    pub fn symbol(&self) -> char {
        self.pitch.symbol()
    }
}

/// One lyric syllable bound to a group
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase", tag = "kind", content = "text")]
pub enum Syllable {
    Text(String),
    /// The `--` token: keeps its slot, renders blank
    Hold,
}

impl Syllable {
    pub fn from_token(token: &str) -> Self {
        if token == "--" {
            Syllable::Hold
        } else {
            Syllable::Text(token.to_string())
        }
    }

    /// Text to display, `None` for a hold
    pub fn display_text(&self) -> Option<&str> {
        match self {
            Syllable::Text(text) => Some(text),
            Syllable::Hold => None,
        }
    }
}

/// Notes parsed from one source token
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Group {
    pub notes: Vec<Note>,
    /// One entry per lyric line; `None` = no syllable on that line
    #[serde(default)]
    pub lyrics: Option<Vec<Option<Syllable>>>,
}

impl Group {
    pub fn new(notes: Vec<Note>) -> Self {
        Self { notes, lyrics: None }
    }

    pub fn duration(&self) -> Duration {
        self.notes.iter().map(|n| n.duration).sum()
    }
}

/// Content slot of a measure
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentItem {
    Group(Group),
    /// Sustain marker: one beat, no pitch, no beam
    Dash,
}

impl ContentItem {
    pub fn duration(&self) -> Duration {
        match self {
            ContentItem::Group(group) => group.duration(),
            ContentItem::Dash => Duration::beat(),
        }
    }

    pub fn as_group(&self) -> Option<&Group> {
        match self {
            ContentItem::Group(group) => Some(group),
            ContentItem::Dash => None,
        }
    }
}
