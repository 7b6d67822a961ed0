//! A wrapper around [`nalgebra::Matrix2x4`] interpreting it as a cubic bezier curve
//! between two anchors.

use std::collections::BTreeMap;

use nalgebra::{Matrix2x4, RealField, Vector2};
use num::Zero;

use crate::bounding_box::BoundingBox;
use crate::error::{Error, Result};

/// Index of the anchor the curve starts at
pub const START_ANCHOR: usize = 0;
/// Index of the control point shaping the curve's start
pub const START_HANDLE: usize = 1;
/// Index of the control point shaping the curve's end
pub const END_HANDLE: usize = 2;
/// Index of the anchor the curve ends at
pub const END_ANCHOR: usize = 3;

/// Cubic bezier curve whose four control points are stored as the matrix' columns.
///
/// The column order is fixed: start anchor, start handle, end handle, end anchor
/// (see [`START_ANCHOR`], [`START_HANDLE`], [`END_HANDLE`] and [`END_ANCHOR`]).
#[derive(Clone, Debug, PartialEq)]
pub struct CubicCurve<T: RealField = f64>(pub Matrix2x4<T>);

/// Like `Math.sign`: zero stays zero instead of becoming `1`.
fn sign<T: RealField>(value: &T) -> T {
    if value.is_zero() {
        T::zero()
    } else if *value > T::zero() {
        T::one()
    } else {
        -T::one()
    }
}

/// Places two handles for a curve between `start` and `end`.
///
/// The handles are only ever moved along the x axis away from their anchors.
/// How far is determined by the shape of the rectangle both anchors span:
/// - taller than (or as tall as) wide: the rectangle's height
/// - wider than tall: the rectangle's width, shrinking towards half of it
///   as the rectangle gets flatter
///
/// Unless `dual_direction` is set, the offset is always positive so the curve
/// leaves its start to the right. With `dual_direction` the handles flip sides
/// once `end` is left of `start`.
pub fn derive_control_points<T: RealField>(
    start: &Vector2<T>,
    end: &Vector2<T>,
    dual_direction: bool,
) -> [Vector2<T>; 2] {
    let delta = end - start;
    let rect = BoundingBox::from_corners(start, end);
    let (rect_w, rect_h) = (rect.width(), rect.height());
    let half = T::one() / (T::one() + T::one());

    let mut dx = if rect_w > rect_h {
        // ratio is infinite for a flat rectangle, which clamps the transition to 0.5
        let ratio = (rect_w.clone() - rect_h.clone()) / rect_h;
        let transition = T::one() - ratio.min(half);
        sign(&delta.x) * rect_w * transition
    } else {
        let dx = sign(&delta.x) * rect_h.clone();
        if dx.is_zero() {
            rect_h
        } else {
            dx
        }
    };

    // The vertical offset is never applied to the handles,
    // they always keep their anchor's y coordinate.
    if !dual_direction {
        dx = dx.abs();
    }

    [
        Vector2::new(start.x.clone() + dx.clone(), start.y.clone()),
        Vector2::new(end.x.clone() - dx, end.y.clone()),
    ]
}

impl<T: RealField> CubicCurve<T> {
    /// Builds a curve from either its two anchors or all four control points.
    ///
    /// Two anchors get their handles placed by [`derive_control_points`].
    /// Four points are taken verbatim, e.g. after the user dragged a handle.
    pub fn from_points(points: &[Vector2<T>], dual_direction: bool) -> Result<Self> {
        match points {
            [start, end] => {
                let [handle_start, handle_end] = derive_control_points(start, end, dual_direction);
                Ok(Self::new(start.clone(), handle_start, handle_end, end.clone()))
            }
            [start, handle_start, handle_end, end] => Ok(Self::new(
                start.clone(),
                handle_start.clone(),
                handle_end.clone(),
                end.clone(),
            )),
            _ => Err(Error::InvalidPointCount(points.len())),
        }
    }

    /// Assembles a curve from its control points in positional order
    pub fn new(
        start: Vector2<T>,
        handle_start: Vector2<T>,
        handle_end: Vector2<T>,
        end: Vector2<T>,
    ) -> Self {
        CubicCurve(Matrix2x4::from_columns(&[
            start,
            handle_start,
            handle_end,
            end,
        ]))
    }

    /// Get the control point at positional `index`
    pub fn point(&self, index: usize) -> Result<Vector2<T>> {
        if index > END_ANCHOR {
            return Err(Error::InvalidIndex(index));
        }
        Ok(self.0.column(index).clone_owned())
    }

    /// All four control points in positional order
    pub fn points(&self) -> [Vector2<T>; 4] {
        [0, 1, 2, 3].map(|i| self.0.column(i).clone_owned())
    }

    /// Replaces the control point at `index`, leaving the others untouched.
    pub fn set_point(&mut self, index: usize, point: Vector2<T>) -> Result<()> {
        if index > END_ANCHOR {
            return Err(Error::InvalidIndex(index));
        }
        self.0.set_column(index, &point);
        Ok(())
    }

    /// Get the point on the curve at position `t`.
    ///
    /// This method uses de castlejau's algorithm.
    /// It assumes `t` to between 0 and 1 but doesn't check it.
    pub fn castlejau_eval(&self, t: T) -> Vector2<T> {
        let t_inv = T::one() - t.clone();
        let mut points = self.0.clone_owned();
        for step in 1..4 {
            for i in 0..(4 - step) {
                let column = points.column(i) * t_inv.clone() + points.column(i + 1) * t.clone();
                points.set_column(i, &column);
            }
        }
        points.column(0).clone_owned()
    }

    /// Constructs an axis aligned bounding box containing all control points.
    ///
    /// This box will also contain the whole curve, but can overestimate it.
    pub fn bounding_box(&self) -> BoundingBox<T> {
        let [a, b, c, d] = self.points();
        let bb = BoundingBox::from_corners(&a, &d);
        BoundingBox {
            min: bb.min.inf(&b).inf(&c),
            max: bb.max.sup(&b).sup(&c),
        }
    }
}

impl CubicCurve<f64> {
    /// Flattens the control points into a tween state keyed `x0, y0, ..., x3, y3`.
    pub fn tween_state(&self) -> BTreeMap<String, f64> {
        let mut state = BTreeMap::new();
        for (i, p) in self.points().iter().enumerate() {
            state.insert(format!("x{}", i), p.x);
            state.insert(format!("y{}", i), p.y);
        }
        state
    }

    /// Inverse of [`CubicCurve::tween_state`]
    pub fn from_tween_state(state: &BTreeMap<String, f64>) -> Result<Self> {
        let get = |key: String| state.get(&key).copied().ok_or(Error::MissingKey(key));
        let mut curve = CubicCurve(Matrix2x4::zeros());
        for i in 0..4 {
            let point = Vector2::new(get(format!("x{}", i))?, get(format!("y{}", i))?);
            curve.0.set_column(i, &point);
        }
        Ok(curve)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_out_of_range() {
        let mut curve =
            CubicCurve::from_points(&[Vector2::new(0.0, 0.0), Vector2::new(1.0, 1.0)], false)
                .unwrap();
        assert!(matches!(curve.point(4), Err(Error::InvalidIndex(4))));
        assert!(matches!(
            curve.set_point(7, Vector2::zeros()),
            Err(Error::InvalidIndex(7))
        ));
    }

    #[test]
    fn tween_state_keys() {
        let curve = CubicCurve::new(
            Vector2::new(1.0, 2.0),
            Vector2::new(3.0, 4.0),
            Vector2::new(5.0, 6.0),
            Vector2::new(7.0, 8.0),
        );
        let state = curve.tween_state();
        assert_eq!(state.len(), 8);
        assert_eq!(state["x2"], 5.0);
        assert_eq!(state["y3"], 8.0);
        assert_eq!(CubicCurve::from_tween_state(&state).unwrap(), curve);

        let mut partial = state;
        partial.remove("y1");
        assert!(matches!(
            CubicCurve::from_tween_state(&partial),
            Err(Error::MissingKey(key)) if key == "y1"
        ));
    }

    #[test]
    fn bounding_box_covers_handles() {
        let curve = CubicCurve::new(
            Vector2::new(50.0, 0.0),
            Vector2::new(200.0, 33.0),
            Vector2::new(0.0, 66.0),
            Vector2::new(50.0, 100.0),
        );
        let bb = curve.bounding_box();
        assert_eq!(bb.min, Vector2::new(0.0, 0.0));
        assert_eq!(bb.max, Vector2::new(200.0, 100.0));
        for i in 0..=10 {
            assert!(bb.contains(&curve.castlejau_eval(i as f64 / 10.0)));
        }
    }
}
