//! Rendering entry points exposed to JavaScript
//!
//! Two styles: one-shot functions (`renderScore`, `computeSlurGeometry`)
//! that take everything as arguments, and a stateful set driving the
//! module-wide [`RenderPipeline`] from the host's input and frame events.

use lazy_static::lazy_static;
use serde::Serialize;
use std::sync::{Mutex, MutexGuard};
use wasm_bindgen::prelude::*;

use crate::api::helpers::{config_from_js, deserialize, js_error, serialize};
use crate::diagnostics::{collect_diagnostics, Diagnostics};
use crate::html_layout::{DisplayList, LayoutEngine};
use crate::parse::parse_score;
use crate::pipeline::RenderPipeline;
use crate::slurs::{compute_geometry, MeasuredLayout, SlurGeometry, SlurLink};
use crate::{wasm_info, wasm_log};

// WASM-owned pipeline (one score per module instance)
lazy_static! {
    static ref PIPELINE: Mutex<RenderPipeline> = Mutex::new(RenderPipeline::default());
}

fn pipeline() -> Result<MutexGuard<'static, RenderPipeline>, JsValue> {
    PIPELINE
        .lock()
        .map_err(|_| JsValue::from_str("render pipeline lock poisoned"))
}

/// Milliseconds from the page clock
fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|window| window.performance())
        .map(|performance| performance.now())
        .unwrap_or_else(js_sys::Date::now)
}

/// Result of a one-shot render
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderOutput {
    pub display_list: DisplayList,
    /// Resolved slur pairs; geometry needs layout and comes later
    pub slurs: Vec<SlurLink>,
    pub diagnostics: Diagnostics,
}

/// A slur ready to draw: geometry plus SVG path data per ribbon
#[derive(Serialize)]
pub struct SlurDrawing {
    #[serde(flatten)]
    pub geometry: SlurGeometry,
    pub paths: Vec<String>,
}

impl From<&SlurGeometry> for SlurDrawing {
    fn from(geometry: &SlurGeometry) -> Self {
        Self {
            paths: geometry.svg_paths(),
            geometry: geometry.clone(),
        }
    }
}

fn drawings(slurs: &[SlurGeometry]) -> Vec<SlurDrawing> {
    slurs.iter().map(SlurDrawing::from).collect()
}

/// Parse and lay out a score in one call
///
/// # Parameters
/// - `source`: jianpu source text
/// - `config_js`: score configuration (`undefined` for defaults)
///
/// # Returns
/// `{ displayList, slurs, diagnostics }`
#[wasm_bindgen(js_name = renderScore)]
pub fn render_score(source: &str, config_js: JsValue) -> Result<JsValue, JsValue> {
    let config = config_from_js(config_js)?;
    wasm_log!("renderScore called: {} byte(s) of source", source.len());

    let score = parse_score(source, &config);
    let output = RenderOutput {
        display_list: LayoutEngine::new().compute_layout(&score),
        slurs: score.slurs.clone(),
        diagnostics: collect_diagnostics(&score),
    };

    serialize(&output, "Failed to serialize render output")
}

/// Compute slur geometry against a measured layout
///
/// Throws when any slur endpoint (note or row) is missing from `layout_js`;
/// the host should retry after its layout settles.
#[wasm_bindgen(js_name = computeSlurGeometry)]
pub fn compute_slur_geometry(
    source: &str,
    config_js: JsValue,
    layout_js: JsValue,
) -> Result<JsValue, JsValue> {
    let config = config_from_js(config_js)?;
    let layout: MeasuredLayout = deserialize(layout_js, "Invalid layout report")?;

    let score = parse_score(source, &config);
    let geometry = compute_geometry(&score, &layout).map_err(js_error)?;
    wasm_info!("computeSlurGeometry: {} slur(s)", geometry.len());

    serialize(&drawings(&geometry), "Failed to serialize slur geometry")
}

/// Replace the pipeline's source text; the render is debounced
#[wasm_bindgen(js_name = editSource)]
pub fn edit_source(source: String) -> Result<(), JsValue> {
    let now = now_ms();
    pipeline()?.edit(source, now);
    Ok(())
}

/// Replace the pipeline's configuration; the render is debounced
#[wasm_bindgen(js_name = updateConfig)]
pub fn update_config(config_js: JsValue) -> Result<(), JsValue> {
    let config = config_from_js(config_js)?;
    let now = now_ms();
    pipeline()?.set_config(config, now).map_err(js_error)
}

/// Run a pending render if its quiet period has elapsed
///
/// # Returns
/// The new display list, or `null` when nothing was rendered
#[wasm_bindgen(js_name = pollRender)]
pub fn poll_render() -> Result<JsValue, JsValue> {
    let now = now_ms();
    let mut pipeline = pipeline()?;
    match pipeline.poll(now) {
        Some(display) => serialize(display, "Failed to serialize display list"),
        None => Ok(JsValue::NULL),
    }
}

/// Report one animation frame with the container size and measured layout
///
/// # Returns
/// The replacement slur layer once layout has settled, otherwise `null`
#[wasm_bindgen(js_name = layoutFrame)]
pub fn layout_frame(width: f64, height: f64, layout_js: JsValue) -> Result<JsValue, JsValue> {
    let layout: MeasuredLayout = deserialize(layout_js, "Invalid layout report")?;
    let mut pipeline = pipeline()?;
    match pipeline.frame(width, height, &layout).map_err(js_error)? {
        Some(slurs) => serialize(&drawings(slurs), "Failed to serialize slur geometry"),
        None => Ok(JsValue::NULL),
    }
}
