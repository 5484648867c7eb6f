//! Jianpu WASM Module
//!
//! Parses jianpu (numbered musical notation) source text into a score of
//! rows, measures and notes, validates measure durations, computes a
//! display list for the host to realize, and draws slurs (including slurs
//! broken across row wraps) once the host layout has been measured.

pub mod error;
pub mod models;
pub mod parse;
pub mod beams;
pub mod slurs;
pub mod diagnostics;
pub mod html_layout;
pub mod pipeline;
pub mod utils;
pub mod api;

// Re-export commonly used types
pub use error::{JianpuError, Result};
pub use models::core::*;
pub use models::elements::*;
pub use models::barlines::*;
pub use models::duration::Duration;
pub use parse::parse_score;
pub use html_layout::{DisplayList, LayoutEngine};
pub use slurs::{compute_geometry, resolve_pairs, MeasuredLayout, MetricsProvider, SlurGeometry, SlurLink};
pub use diagnostics::{collect_diagnostics, Diagnostics};
pub use pipeline::RenderPipeline;

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    #[cfg(feature = "console_log")]
    if let Err(err) = console_log::init_with_level(log::Level::Debug) {
        wasm_warn!("logger already initialized: {}", err);
    }

    log::info!("Jianpu WASM module initialized");
}
