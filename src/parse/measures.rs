//! Measure builder
//!
//! Splits a music line on barline delimiters and accumulates note groups and
//! sustain dashes into measures. Invalid measures are kept and flagged; the
//! builder never rejects input.

use crate::models::{ContentItem, Delimiter, EndBarline, Group, Measure, NoteId, StartBarline};

use super::lyrics::LyricQueues;
use super::tokens::{is_dash_run, parse_token};

/// Piece of a music line between (or being) delimiters
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Segment<'a> {
    Delimiter(Delimiter),
    Text(&'a str),
}

/// Split a line into text chunks and delimiters, keeping both
pub fn split_segments(line: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut text_start = 0;
    let mut pos = 0;

    while pos < line.len() {
        if let Some((delimiter, len)) = Delimiter::match_prefix(&line[pos..]) {
            if text_start < pos {
                segments.push(Segment::Text(&line[text_start..pos]));
            }
            segments.push(Segment::Delimiter(delimiter));
            pos += len;
            text_start = pos;
        } else {
            pos += line[pos..].chars().next().map_or(1, char::len_utf8);
        }
    }
    if text_start < line.len() {
        segments.push(Segment::Text(&line[text_start..]));
    }

    segments
}

/// Hands out score-wide note ids in document order
#[derive(Clone, Debug, Default)]
pub struct NoteIdGenerator {
    next: usize,
}

impl NoteIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generate_id(&mut self) -> NoteId {
        let id = NoteId(self.next);
        self.next += 1;
        id
    }
}

/// Accumulates content into measures for one music line
pub struct MeasureBuilder<'a> {
    beats_per_bar: f64,
    ids: &'a mut NoteIdGenerator,
    lyrics: &'a mut LyricQueues,
    measures: Vec<Measure>,
    content: Vec<ContentItem>,
    start_barline: StartBarline,
}

impl<'a> MeasureBuilder<'a> {
    pub fn new(beats_per_bar: f64, ids: &'a mut NoteIdGenerator, lyrics: &'a mut LyricQueues) -> Self {
        Self {
            beats_per_bar,
            ids,
            lyrics,
            measures: Vec::new(),
            content: Vec::new(),
            start_barline: StartBarline::Normal,
        }
    }

    /// Close the open measure (if it has content) and set up the next one
    pub fn push_delimiter(&mut self, delimiter: Delimiter) {
        if !self.content.is_empty() {
            self.finalize(delimiter.closing_barline());
        }
        self.start_barline = delimiter.opening_barline();
    }

    /// Add one whitespace-free token to the open measure
    pub fn push_token(&mut self, token: &str) {
        let parsed = parse_token(token);
        if !parsed.notes.is_empty() {
            let mut group = Group::new(parsed.notes);
            for note in &mut group.notes {
                note.id = self.ids.generate_id();
            }
            group.lyrics = self.lyrics.next_group();
            self.content.push(ContentItem::Group(group));
        } else if is_dash_run(token) {
            self.content
                .extend(std::iter::repeat(ContentItem::Dash).take(token.len()));
        } else {
            log::debug!("dropping unrecognized token '{}'", token);
        }
    }

    /// Add a text chunk, split on whitespace
    pub fn push_text(&mut self, text: &str) {
        for token in text.split_whitespace() {
            self.push_token(token);
        }
    }

    /// Finalize any open content and return the measures
    pub fn finish(mut self) -> Vec<Measure> {
        if !self.content.is_empty() {
            self.finalize(EndBarline::Normal);
        }
        self.measures
    }

    fn finalize(&mut self, end_barline: EndBarline) {
        let content = std::mem::take(&mut self.content);
        let measure = Measure::finalize(content, self.start_barline, end_barline, self.beats_per_bar);
        if !measure.is_valid {
            log::debug!(
                "measure {} duration {} != {}: {}",
                self.measures.len(),
                measure.duration,
                self.beats_per_bar,
                measure.trace
            );
        }
        self.measures.push(measure);
        self.start_barline = StartBarline::Normal;
    }
}

/// Build the measures of one music line
pub fn build_measures(
    line: &str,
    beats_per_bar: f64,
    ids: &mut NoteIdGenerator,
    lyrics: &mut LyricQueues,
) -> Vec<Measure> {
    let mut builder = MeasureBuilder::new(beats_per_bar, ids, lyrics);
    for segment in split_segments(line) {
        match segment {
            Segment::Delimiter(delimiter) => builder.push_delimiter(delimiter),
            Segment::Text(text) => builder.push_text(text),
        }
    }
    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Duration;

    fn measures(line: &str, beats: f64) -> Vec<Measure> {
        let mut ids = NoteIdGenerator::new();
        let mut lyrics = LyricQueues::default();
        build_measures(line, beats, &mut ids, &mut lyrics)
    }

    #[test]
    fn test_split_segments_longest_match() {
        let segments = split_segments("|: 1 2 :| 3 / 4 |");
        assert_eq!(
            segments,
            vec![
                Segment::Delimiter(Delimiter::StartRepeat),
                Segment::Text(" 1 2 "),
                Segment::Delimiter(Delimiter::EndRepeat),
                Segment::Text(" 3 "),
                Segment::Delimiter(Delimiter::Slash),
                Segment::Text(" 4 "),
                Segment::Delimiter(Delimiter::Single),
            ]
        );
    }

    #[test]
    fn test_split_segments_non_ascii_text() {
        let segments = split_segments("1 ♯ | 2");
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0], Segment::Text("1 ♯ "));
    }

    #[test]
    fn test_single_valid_measure() {
        let result = measures("1 2 3 4", 4.0);
        assert_eq!(result.len(), 1);
        assert!(result[0].is_valid);
        assert_eq!(result[0].content.len(), 4);
        assert_eq!(result[0].end_barline, EndBarline::Normal);
    }

    #[test]
    fn test_dashes_count_one_beat_each() {
        let result = measures("1 --- | 5 - - -", 4.0);
        assert_eq!(result.len(), 2);
        assert!(result.iter().all(|m| m.is_valid));
        assert_eq!(result[0].content[1], ContentItem::Dash);
        assert_eq!(result[0].trace, "1(1), -(1), -(1), -(1)");
    }

    #[test]
    fn test_repeat_barlines() {
        let result = measures("|: 1 2 | 3 4 :| 5 6", 2.0);
        assert_eq!(result.len(), 3);
        assert_eq!(result[0].start_barline, StartBarline::RepeatStart);
        assert_eq!(result[0].end_barline, EndBarline::Normal);
        assert_eq!(result[1].start_barline, StartBarline::Normal);
        assert_eq!(result[1].end_barline, EndBarline::RepeatEnd);
        assert_eq!(result[2].start_barline, StartBarline::Normal);
    }

    #[test]
    fn test_repeat_start_after_content() {
        let result = measures("1 2 |: 3 4", 2.0);
        assert_eq!(result[0].end_barline, EndBarline::Normal);
        assert_eq!(result[1].start_barline, StartBarline::RepeatStart);
    }

    #[test]
    fn test_empty_measures_are_not_created() {
        let result = measures("| | 1 2 3 4 | |", 4.0);
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn test_invalid_measure_is_kept() {
        let result = measures("1 2 3 | 1 2 3 4 5", 4.0);
        assert_eq!(result.len(), 2);
        assert!(!result[0].is_valid);
        assert_eq!(result[0].duration, Duration::from_ratio(3, 1));
        assert!(!result[1].is_valid);
    }

    #[test]
    fn test_unknown_tokens_are_dropped() {
        let result = measures("1 hello 2 3 4", 4.0);
        assert_eq!(result[0].content.len(), 4);
        assert!(result[0].is_valid);
    }

    #[test]
    fn test_note_ids_are_sequential() {
        let result = measures("q1q2 3 | 4", 4.0);
        let ids: Vec<usize> = result.iter().flat_map(|m| m.notes()).map(|n| n.id.0).collect();
        assert_eq!(ids, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_lyrics_follow_groups_across_measures() {
        let mut ids = NoteIdGenerator::new();
        let mut lyrics = LyricQueues::new(&["do re mi"]);
        let result = build_measures("q1q2 - | 3 4", 4.0, &mut ids, &mut lyrics);
        let tagged: Vec<bool> = result
            .iter()
            .flat_map(|m| m.content.iter())
            .filter_map(ContentItem::as_group)
            .map(|g| g.lyrics.is_some())
            .collect();
        assert_eq!(tagged, vec![true, true, true]);
        assert_eq!(lyrics.remaining(), 0);
    }
}
