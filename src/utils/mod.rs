//! Utility modules for the jianpu renderer

pub mod timing;

// Re-export commonly used types
pub use timing::*;
