//! Draw a curve in a svg

use crate::draw::DrawCurve;
use crate::geometry::CubicCurve;
use nalgebra::Vector2;
use std::fmt::Write;
use std::marker::PhantomData;

/// Helper trait implemented by [`Absolute`] and [`Relative`] to choose
/// how the coordinates are interpreted in the svg's path.
///
/// This toggles between lower and upper case letters for the path commands
/// and decides whether points are written as offsets to the curve's start.
pub trait CoordRepr {
    /// Character to use for the MoveTo command
    const M: &'static str;

    /// Character to use for the Cubic Bezier Curve command
    const C: &'static str;

    /// Whether the curve command's points are relative to the start anchor
    const RELATIVE: bool;
}

/// Interpret the svg path's coordinates as absolute.
pub struct Absolute;
impl CoordRepr for Absolute {
    const M: &'static str = "M";
    const C: &'static str = "C";
    const RELATIVE: bool = false;
}

/// Interpret the svg path's coordinates as relative.
pub struct Relative;
impl CoordRepr for Relative {
    const M: &'static str = "m";
    const C: &'static str = "c";
    const RELATIVE: bool = true;
}

/// This type wraps a mutable String reference and implements [`DrawCurve`] on it.
/// The [`DrawCurve::add_curve`] appends the curve to the string
/// using the path commands used in a svg `<path>`'s d attribute
///
/// ```
/// # use nalgebra::Vector2;
/// use svgbezier::CubicCurve;
/// use svgbezier::draw::DrawCurve;
/// use svgbezier::draw::svg::SVGRelativePath;
///
/// let curve = CubicCurve::from_points(
///     &[Vector2::new(50.0, 50.0), Vector2::new(350.0, 350.0)],
///     false,
/// ).unwrap();
/// let mut d = String::new();
/// SVGRelativePath::from(&mut d).add_curve(&curve);
/// assert_eq!(d, "m 50 50 c 300 0 0 300 300 300");
/// ```
pub struct SVGPath<'s, R: CoordRepr>(&'s mut String, PhantomData<&'s R>);

/// Wrapper for writing a curve to a svg's path using absolute coordinates
pub type SVGAbsolutePath<'s> = SVGPath<'s, Absolute>;

/// Wrapper for writing a curve to a svg's path using relative coordinates
pub type SVGRelativePath<'s> = SVGPath<'s, Relative>;

impl<'s, R: CoordRepr> From<&'s mut String> for SVGPath<'s, R> {
    fn from(string: &'s mut String) -> Self {
        SVGPath(string, PhantomData)
    }
}

impl<'s, R: CoordRepr> DrawCurve for SVGPath<'s, R> {
    fn add_curve(&mut self, curve: &CubicCurve) {
        let [start, handle_start, handle_end, end] = curve.points();
        let origin = if R::RELATIVE {
            start
        } else {
            Vector2::zeros()
        };
        let [a, b, c] = [handle_start, handle_end, end].map(|p| p - origin);

        if !self.0.is_empty() {
            self.0.push(' ');
        }
        // Writing into a String never fails
        let _ = write!(
            self.0,
            "{} {} {} {} {} {} {} {} {} {}",
            R::M,
            start.x,
            start.y,
            R::C,
            a.x,
            a.y,
            b.x,
            b.y,
            c.x,
            c.y,
        );
    }
}
