//! Models module for the jianpu engine
//!
//! This module contains the document model produced by the parser and
//! consumed by the layout and slur passes.

pub mod barlines;
pub mod core;
pub mod duration;
pub mod elements;

// Re-export commonly used types
pub use barlines::*;
pub use self::core::*;
pub use duration::Duration;
pub use elements::*;
