//! Slur ribbon rendering (quadratic Bézier curves)
//!
//! A slur is drawn as a filled ribbon: an upper and a lower quadratic curve
//! sharing both endpoints' x, thin at the ends and thick at the apex. All
//! sizes scale with the display scale (font size).

use serde::{Deserialize, Serialize};

/// Arch height as a fraction of the horizontal span
pub const ARCH_FACTOR: f32 = 0.25;
/// Arch height bounds, in units of scale
pub const ARCH_MIN: f32 = 0.6;
pub const ARCH_MAX: f32 = 2.0;
/// Ribbon half-widths, in units of scale
pub const END_HALF_WIDTH: f32 = 0.08;
pub const APEX_HALF_WIDTH: f32 = 0.25;
pub const BROKEN_APEX_HALF_WIDTH: f32 = 0.20;
/// Control point lift of a half-arc above its note, in units of scale
pub const BROKEN_CONTROL_LIFT: f32 = 1.5;
/// Lift of a half-arc's free end at the row edge, in units of scale
pub const BROKEN_EDGE_LIFT: f32 = 1.0;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A filled variable-width curve
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Ribbon {
    pub start: Point,
    /// Shared control point of the center line
    pub control: Point,
    pub end: Point,
    /// Half-width at both endpoints
    pub end_half_width: f32,
    /// Half-width at the control point
    pub apex_half_width: f32,
}

impl Ribbon {
    /// Upper edge as (start, control, end)
    pub fn upper_edge(&self) -> (Point, Point, Point) {
        (
            Point::new(self.start.x, self.start.y - self.end_half_width),
            Point::new(self.control.x, self.control.y - self.apex_half_width),
            Point::new(self.end.x, self.end.y - self.end_half_width),
        )
    }

    /// Lower edge, traversed from end back to start
    pub fn lower_edge(&self) -> (Point, Point, Point) {
        (
            Point::new(self.end.x, self.end.y + self.end_half_width),
            Point::new(self.control.x, self.control.y + self.apex_half_width),
            Point::new(self.start.x, self.start.y + self.end_half_width),
        )
    }

    /// Closed SVG path: upper curve, across, lower curve back
    pub fn to_svg_path(&self) -> String {
        let (u0, uc, u1) = self.upper_edge();
        let (l0, lc, l1) = self.lower_edge();
        format!(
            "M {} {} Q {} {} {} {} L {} {} Q {} {} {} {} Z",
            u0.x, u0.y, uc.x, uc.y, u1.x, u1.y, l0.x, l0.y, lc.x, lc.y, l1.x, l1.y
        )
    }
}

/// Curve renderer for slurs
pub struct CurveRenderer;

impl CurveRenderer {
    /// Arch height for a slur spanning `distance` horizontally
    pub fn arch_height(distance: f32, scale: f32) -> f32 {
        (distance * ARCH_FACTOR).min(scale * ARCH_MAX).max(scale * ARCH_MIN)
    }

    /// Ribbon between two anchors on the same row
    pub fn slur_ribbon(start: Point, end: Point, scale: f32) -> Ribbon {
        let mid_x = (start.x + end.x) / 2.0;
        let arch = Self::arch_height((end.x - start.x).abs(), scale);
        let control_y = start.y.min(end.y) - arch;

        Ribbon {
            start,
            control: Point::new(mid_x, control_y),
            end,
            end_half_width: scale * END_HALF_WIDTH,
            apex_half_width: scale * APEX_HALF_WIDTH,
        }
    }

    /// First half of a slur broken by a row wrap: note up to the row's right edge
    pub fn outgoing_half_arc(start: Point, edge_x: f32, scale: f32) -> Ribbon {
        let end = Point::new(edge_x, start.y - scale * BROKEN_EDGE_LIFT);
        Ribbon {
            start,
            control: Point::new((start.x + end.x) / 2.0, start.y - scale * BROKEN_CONTROL_LIFT),
            end,
            end_half_width: scale * END_HALF_WIDTH,
            apex_half_width: scale * BROKEN_APEX_HALF_WIDTH,
        }
    }

    /// Second half of a broken slur: from the next row's left edge down into the note
    pub fn incoming_half_arc(edge_x: f32, end: Point, scale: f32) -> Ribbon {
        let start = Point::new(edge_x, end.y - scale * BROKEN_EDGE_LIFT);
        Ribbon {
            start,
            control: Point::new((start.x + end.x) / 2.0, end.y - scale * BROKEN_CONTROL_LIFT),
            end,
            end_half_width: scale * END_HALF_WIDTH,
            apex_half_width: scale * BROKEN_APEX_HALF_WIDTH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f32, expected: f32) {
        assert!((actual - expected).abs() < 1e-4, "{} != {}", actual, expected);
    }

    #[test]
    fn test_arch_height_is_clamped() {
        assert_close(CurveRenderer::arch_height(0.0, 10.0), 6.0);
        assert_close(CurveRenderer::arch_height(40.0, 10.0), 10.0);
        assert_close(CurveRenderer::arch_height(400.0, 10.0), 20.0);
    }

    #[test]
    fn test_slur_ribbon_control_above_higher_endpoint() {
        let ribbon = CurveRenderer::slur_ribbon(Point::new(0.0, 50.0), Point::new(40.0, 40.0), 10.0);
        assert_close(ribbon.control.x, 20.0);
        assert_close(ribbon.control.y, 30.0);
        assert_close(ribbon.end_half_width, 0.8);
        assert_close(ribbon.apex_half_width, 2.5);
    }

    #[test]
    fn test_half_arcs() {
        let out = CurveRenderer::outgoing_half_arc(Point::new(10.0, 100.0), 90.0, 10.0);
        assert_close(out.end.x, 90.0);
        assert_close(out.end.y, 90.0);
        assert_close(out.control.x, 50.0);
        assert_close(out.control.y, 85.0);
        assert_close(out.apex_half_width, 2.0);

        let inc = CurveRenderer::incoming_half_arc(10.0, Point::new(50.0, 200.0), 10.0);
        assert_close(inc.start.x, 10.0);
        assert_close(inc.start.y, 190.0);
        assert_close(inc.control.x, 30.0);
        assert_close(inc.control.y, 185.0);
    }

    #[test]
    fn test_svg_path() {
        let ribbon = Ribbon {
            start: Point::new(0.0, 10.0),
            control: Point::new(5.0, 0.0),
            end: Point::new(10.0, 10.0),
            end_half_width: 1.0,
            apex_half_width: 2.0,
        };
        assert_eq!(ribbon.to_svg_path(), "M 0 9 Q 5 -2 10 9 L 10 11 Q 5 2 0 11 Z");
    }
}
