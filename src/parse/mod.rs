//! Parsing module for the jianpu engine
//!
//! This module contains all the parsing logic for converting notation text
//! into measures, rows and a paired score.

pub mod lyrics;
pub mod measures;
pub mod score;
pub mod tokens;

// Re-export commonly used types
pub use lyrics::{collect_lyric_block, is_lyric_line, LyricQueues};
pub use measures::{build_measures, split_segments, MeasureBuilder, NoteIdGenerator, Segment};
pub use score::parse_score;
pub use tokens::{is_dash_run, parse_token, ParsedToken};
