//! Jianpu WASM API
//!
//! This module provides the JavaScript-facing API.
//!
//! # Module Structure
//!
//! - `helpers`: Shared utilities for serialization, error conversion and logging
//! - `render`: Score rendering, slur geometry and the debounced render pipeline

pub mod helpers;
pub mod render;

pub use render::{
    compute_slur_geometry, edit_source, layout_frame, poll_render, render_score, update_config,
};
