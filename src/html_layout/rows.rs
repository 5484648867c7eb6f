//! Row packing
//!
//! Flat chunking of a measure list into fixed-width rows. The last row is
//! padded with fillers so every row spans the same grid width.

use crate::models::{Measure, Row};

/// Chunk `measures` into rows of at most `measures_per_row`
///
/// `first_index` is the score-wide index given to the first produced row.
/// A `measures_per_row` of zero is treated as one.
pub fn pack_rows(measures: Vec<Measure>, measures_per_row: usize, first_index: usize) -> Vec<Row> {
    let per_row = measures_per_row.max(1);
    let mut rows = Vec::with_capacity(measures.len().div_ceil(per_row));
    let mut current: Vec<Measure> = Vec::with_capacity(per_row);

    for measure in measures {
        current.push(measure);
        if current.len() == per_row {
            rows.push(Row {
                index: first_index + rows.len(),
                measures: std::mem::take(&mut current),
                fillers: 0,
            });
        }
    }

    if !current.is_empty() {
        let fillers = per_row - current.len();
        rows.push(Row {
            index: first_index + rows.len(),
            measures: current,
            fillers,
        });
    }

    rows
}
