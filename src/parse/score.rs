//! Score assembly
//!
//! Walks the source line by line. Each music line (with its trailing `##`
//! block) becomes a run of measures, packed into its own rows. Rows never
//! merge across music lines. Slur pairing runs once over the finished score.

use crate::html_layout::rows::pack_rows;
use crate::models::{Row, Score, ScoreConfig};
use crate::slurs::resolve_pairs;

use super::lyrics::{collect_lyric_block, is_lyric_line, LyricQueues};
use super::measures::{build_measures, NoteIdGenerator};

/// Parse source text into a paired score
///
/// Never fails: malformed notation is flagged inside the model. The
/// configuration is sanitized first.
pub fn parse_score(source: &str, config: &ScoreConfig) -> Score {
    let config = config.sanitized();
    let lines: Vec<&str> = source.lines().collect();
    let mut ids = NoteIdGenerator::new();
    let mut rows: Vec<Row> = Vec::new();

    let mut i = 0;
    while i < lines.len() {
        let line = lines[i];
        if line.trim().is_empty() {
            i += 1;
            continue;
        }
        if is_lyric_line(line) {
            log::warn!("lyric line {} has no music line above it, ignoring", i + 1);
            i += 1;
            continue;
        }

        let lyric_lines = collect_lyric_block(&lines, i);
        let mut lyrics = LyricQueues::new(&lyric_lines);
        let measures = build_measures(line, config.beats_per_bar, &mut ids, &mut lyrics);
        if lyrics.remaining() > 0 {
            log::debug!("line {}: {} lyric syllable(s) without a note", i + 1, lyrics.remaining());
        }

        rows.extend(pack_rows(measures, config.measures_per_row, rows.len()));
        i += 1 + lyric_lines.len();
    }

    let mut score = Score {
        config,
        rows,
        slurs: Vec::new(),
    };
    score.slurs = resolve_pairs(&score).links;

    log::info!(
        "parsed score: {} row(s), {} measure(s), {} slur(s)",
        score.rows.len(),
        score.measures().count(),
        score.slurs.len()
    );
    score
}
