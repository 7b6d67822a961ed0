//! Axis aligned bounding boxes around sets of points.

use nalgebra::{RealField, Vector2};

/// Axis aligned rectangle spanned by its `min` and `max` corners
#[derive(Clone, Debug, PartialEq)]
pub struct BoundingBox<T: RealField> {
    /// Corner with the smallest coordinates
    pub min: Vector2<T>,
    /// Corner with the largest coordinates
    pub max: Vector2<T>,
}

impl<T: RealField> BoundingBox<T> {
    /// Smallest box containing every point yielded by `points`.
    ///
    /// Returns `None` for an empty iterator.
    pub fn from_iter<I: IntoIterator<Item = Vector2<T>>>(points: I) -> Option<BoundingBox<T>> {
        let mut points = points.into_iter();
        let first = points.next()?;
        let mut bb = BoundingBox {
            min: first.clone(),
            max: first,
        };
        for p in points {
            for i in 0..2 {
                if bb.min[i] > p[i] {
                    bb.min[i] = p[i].clone();
                }
                if bb.max[i] < p[i] {
                    bb.max[i] = p[i].clone();
                }
            }
        }
        Some(bb)
    }

    /// Box spanned by two opposing corners given in any order
    pub fn from_corners(a: &Vector2<T>, b: &Vector2<T>) -> BoundingBox<T> {
        BoundingBox {
            min: a.inf(b),
            max: a.sup(b),
        }
    }

    /// Extent along the x axis
    pub fn width(&self) -> T {
        self.max.x.clone() - self.min.x.clone()
    }

    /// Extent along the y axis
    pub fn height(&self) -> T {
        self.max.y.clone() - self.min.y.clone()
    }

    /// Checks whether `point` lies inside the box (borders included)
    pub fn contains(&self, point: &Vector2<T>) -> bool {
        self.min.x <= point.x
            && point.x <= self.max.x
            && self.min.y <= point.y
            && point.y <= self.max.y
    }

    /// Grows the box by `margin` on every side
    pub fn expand(&self, margin: T) -> BoundingBox<T> {
        let offset = Vector2::new(margin.clone(), margin);
        BoundingBox {
            min: &self.min - &offset,
            max: &self.max + &offset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::BoundingBox;
    use nalgebra::Vector2;

    #[test]
    fn corners_in_any_order() {
        let bb = BoundingBox::from_corners(&Vector2::new(350.0, 50.0), &Vector2::new(50.0, 350.0));
        assert_eq!(bb.min, Vector2::new(50.0, 50.0));
        assert_eq!(bb.max, Vector2::new(350.0, 350.0));
        assert_eq!(bb.width(), 300.0);
        assert_eq!(bb.height(), 300.0);
    }

    #[test]
    fn from_points() {
        let bb = BoundingBox::from_iter([
            Vector2::new(0.0, 0.0),
            Vector2::new(200.0, -10.0),
            Vector2::new(400.0, 100.0),
        ])
        .unwrap();
        assert_eq!(bb.min, Vector2::new(0.0, -10.0));
        assert_eq!(bb.max, Vector2::new(400.0, 100.0));
        assert!(bb.contains(&Vector2::new(400.0, 100.0)));
        assert!(!bb.contains(&Vector2::new(401.0, 100.0)));

        let grown = bb.expand(5.0);
        assert_eq!(grown.min, Vector2::new(-5.0, -15.0));
        assert_eq!(grown.max, Vector2::new(405.0, 105.0));

        assert!(BoundingBox::<f64>::from_iter(Vec::new()).is_none());
    }
}
