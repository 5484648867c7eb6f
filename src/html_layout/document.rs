//! Document-level layout computation
//!
//! This module contains the main entry point for layout calculations,
//! taking a parsed score and producing a DisplayList.

use super::display_list::*;
use super::line::LayoutRowComputer;
use crate::models::*;

/// Main layout engine for computing display lists
#[derive(Default)]
pub struct LayoutEngine;

impl LayoutEngine {
    pub fn new() -> Self {
        Self
    }

    /// Compute complete layout for a score
    ///
    /// The result carries structure, classes and beam placement; absolute
    /// pixel positions are left to the rendering backend.
    pub fn compute_layout(&self, score: &Score) -> DisplayList {
        let config = &score.config;
        let header = config.header.normalized();
        let row_computer = LayoutRowComputer::new(config.beats_per_bar);

        DisplayList {
            header: DocumentHeader {
                title: header.title,
                subtitle: header.subtitle,
                lyricist: header.lyricist,
                composer: header.composer,
                meta: config.meta_line(),
            },
            rows: score
                .rows
                .iter()
                .map(|row| row_computer.compute_row_layout(row))
                .collect(),
        }
    }
}
