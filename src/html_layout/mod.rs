//! HTML Layout Engine
//!
//! This module packs measures into rows and computes a DisplayList with the
//! classes, beams and lyrics a rendering backend needs, plus the ribbon
//! curves used for slurs.

pub mod cell;
pub mod curves;
pub mod display_list;
pub mod document;
pub mod line;
pub mod lyrics;
pub mod rows;

pub use curves::{CurveRenderer, Point, Ribbon};
pub use display_list::{DisplayList, RenderGroup, RenderItem, RenderMeasure, RenderNote, RenderRow};
pub use document::LayoutEngine;
pub use rows::pack_rows;
