//! Render pipeline
//!
//! Owns the single score snapshot shown to the user. Edits are debounced;
//! a firing parses the whole source atomically and replaces the snapshot,
//! the display list and the slur layer wholesale. Slur geometry is only
//! computed once the host layout has settled, since it needs measured
//! glyph positions.

use crate::error::Result;
use crate::html_layout::{DisplayList, LayoutEngine};
use crate::models::{Score, ScoreConfig};
use crate::parse::parse_score;
use crate::slurs::{compute_geometry, MetricsProvider, SlurGeometry};
use crate::utils::{Debouncer, LayoutSettle};

pub struct RenderPipeline {
    source: String,
    config: ScoreConfig,
    score: Option<Score>,
    display: DisplayList,
    slurs: Vec<SlurGeometry>,
    slurs_current: bool,
    debouncer: Debouncer,
    settle: LayoutSettle,
    engine: LayoutEngine,
}

impl RenderPipeline {
    pub fn new(config: ScoreConfig) -> Self {
        Self::with_debouncer(config, Debouncer::default())
    }

    pub fn with_debouncer(config: ScoreConfig, debouncer: Debouncer) -> Self {
        Self {
            source: String::new(),
            config,
            score: None,
            display: DisplayList::default(),
            slurs: Vec::new(),
            slurs_current: false,
            debouncer,
            settle: LayoutSettle::new(),
            engine: LayoutEngine::new(),
        }
    }

    /// Replace the source text and schedule a render
    pub fn edit(&mut self, source: impl Into<String>, now: f64) {
        self.source = source.into();
        self.debouncer.trigger(now);
    }

    /// Replace the configuration and schedule a render
    ///
    /// An invalid configuration is rejected and the current one kept.
    pub fn set_config(&mut self, config: ScoreConfig, now: f64) -> Result<()> {
        config.validate()?;
        self.config = config;
        self.debouncer.trigger(now);
        Ok(())
    }

    /// Render if the debounce period has elapsed
    ///
    /// Returns the new display list when a render happened.
    pub fn poll(&mut self, now: f64) -> Option<&DisplayList> {
        if !self.debouncer.poll(now) {
            return None;
        }
        self.render_now();
        Some(&self.display)
    }

    /// Parse and lay out immediately, bypassing the debounce
    pub fn render_now(&mut self) {
        let score = parse_score(&self.source, &self.config);
        self.display = self.engine.compute_layout(&score);
        self.score = Some(score);
        self.slurs.clear();
        self.slurs_current = false;
        self.settle.reset();
    }

    /// Report one animation frame of the host
    ///
    /// Once the container size is stable for two consecutive frames the slur
    /// layer is (re)computed. Returns the new layer when it changed. Missing
    /// metrics defer the pass to a later frame.
    pub fn frame(
        &mut self,
        width: f64,
        height: f64,
        metrics: &dyn MetricsProvider,
    ) -> Result<Option<&[SlurGeometry]>> {
        if self.score.is_none() {
            return Ok(None);
        }
        if !self.settle.observe(width, height) {
            // size changed since the last frame; redraw once it settles again
            self.slurs_current = false;
            return Ok(None);
        }
        if self.slurs_current {
            return Ok(None);
        }

        if let Err(err) = self.redraw_slurs(metrics) {
            if err.is_deferral() {
                log::debug!("slur pass deferred: {}", err);
                return Ok(None);
            }
            return Err(err);
        }
        Ok(Some(&self.slurs))
    }

    /// Recompute the slur layer from scratch
    ///
    /// Replaces the previous layer; calling it repeatedly never stacks
    /// duplicate curves. On error the previous layer is left untouched.
    pub fn redraw_slurs(&mut self, metrics: &dyn MetricsProvider) -> Result<&[SlurGeometry]> {
        let Some(score) = self.score.as_ref() else {
            return Ok(&[]);
        };
        let geometry = compute_geometry(score, metrics)?;
        self.slurs = geometry;
        self.slurs_current = true;
        Ok(&self.slurs)
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn config(&self) -> &ScoreConfig {
        &self.config
    }

    pub fn score(&self) -> Option<&Score> {
        self.score.as_ref()
    }

    pub fn display_list(&self) -> &DisplayList {
        &self.display
    }

    pub fn slurs(&self) -> &[SlurGeometry] {
        &self.slurs
    }

    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }
}

impl Default for RenderPipeline {
    fn default() -> Self {
        Self::new(ScoreConfig::default())
    }
}
