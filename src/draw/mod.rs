//! Defines and implements the helper method [`DrawCurve::add_curve`] on various drawing contexts.
//!
//! Every drawing context so far speaks svg path syntax, see [`svg`].
use crate::geometry::CubicCurve;

/// Draw cubic curves on different "drawing contexts" with ease.
pub trait DrawCurve {
    /// Add a curve to the drawing context.
    ///
    /// What this actually means depends on the context.
    /// But generally this just prepares the curve to be drawn instead of actually drawing it.
    fn add_curve(&mut self, curve: &CubicCurve);
}

pub mod svg;

/// Builds the `d` attribute of an svg `<path>` tracing `curve` in absolute coordinates.
///
/// The result is `M x0 y0 C x1 y1 x2 y2 x3 y3`: single spaces between every
/// command and number, numbers in their shortest `Display` form (`200`, `12.5`).
///
/// ```
/// # use nalgebra::Vector2;
/// use svgbezier::{build_path_command, CubicCurve};
///
/// let curve = CubicCurve::from_points(
///     &[Vector2::new(0.0, 0.0), Vector2::new(400.0, 100.0)],
///     false,
/// ).unwrap();
/// assert_eq!(build_path_command(&curve), "M 0 0 C 200 0 200 100 400 100");
/// ```
pub fn build_path_command(curve: &CubicCurve) -> String {
    let mut d = String::new();
    svg::SVGAbsolutePath::from(&mut d).add_curve(curve);
    d
}
