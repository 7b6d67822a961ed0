use nalgebra::Vector2;
use once_cell::sync::Lazy;

/// Points generated randomly
/// ```python
/// from random import random
/// for i in range(10):
///     print(f"[{random()*400:.3f}, {random()*400:.3f}],")
/// ```
pub static POINTS: [[f64; 2]; 10] = [
    [    0.0,     0.0],
    [118.937, 179.936],
    [210.240, 171.540],
    [371.108,  10.608],
    [392.128, 271.296],
    [ 79.452, 365.312],
    [304.556, 316.400],
    [241.916, 237.272],
    [ 46.408, 382.364],
    [231.784, 115.552],
];

/// Every ordered pair of distinct points, covering wide, tall and reversed anchors
pub static ANCHORS: Lazy<Vec<[Vector2<f64>; 2]>> = Lazy::new(|| {
    let mut pairs = Vec::with_capacity(POINTS.len() * (POINTS.len() - 1));
    for (i, [ax, ay]) in POINTS.iter().enumerate() {
        for (j, [bx, by]) in POINTS.iter().enumerate() {
            if i != j {
                pairs.push([Vector2::new(*ax, *ay), Vector2::new(*bx, *by)]);
            }
        }
    }
    pairs
});
