//! Note tokenizer
//!
//! Scans one whitespace-free source token left to right and extracts every
//! note it contains. A note is:
//!
//! ```text
//! [<~] [q|s]* [#|b] digit(0-7) ['|,|.|+]* [~>] [<~]
//! ```
//!
//! The trailing `<~` (as in `3<~`) closes a slur on the note it follows,
//! unless it introduces the next note of the token (`q3~><~q4`).
//!
//! Characters that cannot start a note are skipped, so `q1q2` yields two
//! notes and `x1` yields one. Any `~` that is not part of a consumed `<~` or
//! `~>` marks the whole token as a syntax error.

use serde::{Deserialize, Serialize};

use crate::models::{Accidental, Note, NoteId, Pitch, Rhythm};

const SLUR_END: [char; 2] = ['<', '~'];
const SLUR_START: [char; 2] = ['~', '>'];

/// Result of parsing one source token
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ParsedToken {
    pub notes: Vec<Note>,
    /// Unmatched tilde characters were found
    pub has_syntax_error: bool,
}

/// Parse a token into notes
pub fn parse_token(token: &str) -> ParsedToken {
    let chars: Vec<char> = token.chars().collect();
    let mut notes = Vec::new();
    let mut pos = 0;

    while pos < chars.len() {
        match match_note_at(&chars, pos) {
            Some((note, end)) => {
                notes.push(note);
                pos = end;
            }
            None => pos += 1,
        }
    }

    let tildes = chars.iter().filter(|&&c| c == '~').count();
    let consumed = notes
        .iter()
        .map(|n| usize::from(n.slur_start) + usize::from(n.slur_end))
        .sum::<usize>();
    let has_syntax_error = tildes > consumed;

    if has_syntax_error {
        log::debug!("token '{}': {} tilde(s), {} slur marker(s) matched", token, tildes, consumed);
        for note in &mut notes {
            note.syntax_error = true;
        }
        if notes.is_empty() {
            notes.push(Note::placeholder(token));
        }
    }

    ParsedToken { notes, has_syntax_error }
}

/// True when the token is a run of sustain dashes (`-`, `---`)
pub fn is_dash_run(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c == '-')
}

/// Try to match one note starting at `start`; returns the note and the end index
fn match_note_at(chars: &[char], start: usize) -> Option<(Note, usize)> {
    if chars[start..].starts_with(&SLUR_END) {
        if let Some(found) = match_body(chars, start, start + SLUR_END.len(), true) {
            return Some(found);
        }
    }
    match_body(chars, start, start, false)
}

fn match_body(chars: &[char], start: usize, mut i: usize, mut slur_end: bool) -> Option<(Note, usize)> {
    let mut has_q = false;
    let mut has_s = false;
    while let Some(&c) = chars.get(i) {
        match c {
            'q' => has_q = true,
            's' => has_s = true,
            _ => break,
        }
        i += 1;
    }

    let accidental = match chars.get(i).copied().and_then(Accidental::from_char) {
        Some(acc) => {
            i += 1;
            acc
        }
        None => Accidental::None,
    };

    let pitch = chars.get(i).copied().and_then(Pitch::from_digit)?;
    i += 1;

    let mut octave: i8 = 0;
    let mut dotted = false;
    while let Some(&c) = chars.get(i) {
        match c {
            '\'' => octave = octave.saturating_add(1),
            ',' => octave = octave.saturating_sub(1),
            '.' => dotted = true,
            '+' => {}
            _ => break,
        }
        i += 1;
    }

    let slur_start = chars[i..].starts_with(&SLUR_START);
    if slur_start {
        i += SLUR_START.len();
    }

    if !slur_end
        && chars[i..].starts_with(&SLUR_END)
        && match_body(chars, i, i + SLUR_END.len(), true).is_none()
    {
        slur_end = true;
        i += SLUR_END.len();
    }

    // `s` anywhere in the prefix wins over `q`
    let rhythm = if has_s {
        Rhythm::Sixteenth
    } else if has_q {
        Rhythm::Eighth
    } else {
        Rhythm::Quarter
    };
    let duration = if dotted {
        rhythm.base_duration().dotted()
    } else {
        rhythm.base_duration()
    };

    let note = Note {
        id: NoteId::default(),
        source: chars[start..i].iter().collect(),
        pitch,
        accidental,
        rhythm,
        beam_level: rhythm.beam_level(),
        octave,
        dotted,
        duration,
        slur_start,
        slur_end,
        syntax_error: false,
    };
    Some((note, i))
}
