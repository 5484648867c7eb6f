//! Lyric alignment
//!
//! A music line may be followed by any number of `##` lines. Each lyric line
//! becomes a queue of whitespace-separated syllables, and every note group of
//! the music line (left to right, across all its measures) takes the head of
//! each queue.

use std::collections::VecDeque;

use crate::models::Syllable;

/// Prefix marking a lyric line
pub const LYRIC_PREFIX: &str = "##";

/// True for a `##` line (leading whitespace allowed)
pub fn is_lyric_line(line: &str) -> bool {
    line.trim_start().starts_with(LYRIC_PREFIX)
}

/// Collect the contiguous run of lyric lines right after `music_index`
///
/// Returns the lyric line texts (prefix stripped, trimmed). The caller skips
/// `returned.len()` lines so they are never treated as music.
pub fn collect_lyric_block<'a>(lines: &[&'a str], music_index: usize) -> Vec<&'a str> {
    lines
        .iter()
        .skip(music_index + 1)
        .map(|line| line.trim())
        .take_while(|line| line.starts_with(LYRIC_PREFIX))
        .map(|line| line[LYRIC_PREFIX.len()..].trim())
        .collect()
}

/// One syllable queue per lyric line
#[derive(Clone, Debug, Default)]
pub struct LyricQueues {
    queues: Vec<VecDeque<String>>,
}

impl LyricQueues {
    /// Tokenize lyric lines (already stripped of `##`)
    pub fn new(lyric_lines: &[&str]) -> Self {
        let queues = lyric_lines
            .iter()
            .map(|line| line.split_whitespace().map(str::to_string).collect())
            .collect();
        Self { queues }
    }

    pub fn line_count(&self) -> usize {
        self.queues.len()
    }

    /// Syllables for the next group, one per lyric line
    ///
    /// Returns `None` when every queue is exhausted, so the group stays
    /// untagged.
    pub fn next_group(&mut self) -> Option<Vec<Option<Syllable>>> {
        if self.queues.is_empty() {
            return None;
        }

        let taken: Vec<Option<Syllable>> = self
            .queues
            .iter_mut()
            .map(|queue| queue.pop_front().map(|token| Syllable::from_token(&token)))
            .collect();

        if taken.iter().any(Option::is_some) {
            Some(taken)
        } else {
            None
        }
    }

    /// Syllables left over after the music line ran out of groups
    pub fn remaining(&self) -> usize {
        self.queues.iter().map(VecDeque::len).sum()
    }
}
