use thiserror::Error;

use crate::models::NoteId;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum JianpuError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("note {0} has not been laid out yet")]
    NoteNotMeasured(NoteId),
    #[error("row {0} has not been laid out yet")]
    RowNotMeasured(usize),
    #[error("malformed trace entry: {0}")]
    MalformedTrace(String),
}

impl JianpuError {
    /// Layout metrics are missing; the caller should retry after layout settles
    pub fn is_deferral(&self) -> bool {
        matches!(self, JianpuError::NoteNotMeasured(_) | JianpuError::RowNotMeasured(_))
    }
}

pub type Result<T> = std::result::Result<T, JianpuError>;
