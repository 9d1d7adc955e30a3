//! Axis-extreme points of a 2D point set.
//!
//! The four extremes (min/max on each axis) are the usual seed for hull
//! construction: every point strictly inside the polygon they span can be
//! discarded before the hull proper is built.
//!
//! Ties resolve to the first point in input order holding the extreme
//! coordinate.

use crate::mesh_error::MeshError;

/// Indices of the axis-extreme points of a point set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Extremes {
    pub min_x: usize,
    pub min_y: usize,
    pub max_x: usize,
    pub max_y: usize,
}

impl Extremes {
    /// Extreme indices in the order min-X, min-Y, max-X, max-Y, keeping the
    /// first occurrence of a point that is extreme on several axes.
    ///
    /// For a non-degenerate set this walks the extreme polygon counter-clockwise.
    pub fn indices(&self) -> Vec<usize> {
        let mut out = Vec::with_capacity(4);
        for i in [self.min_x, self.min_y, self.max_x, self.max_y] {
            if !out.contains(&i) {
                out.push(i);
            }
        }
        out
    }
}

/// Find the axis-extreme points of `points`.
///
/// # Errors
/// - [`MeshError::EmptyPointSet`] if `points` is empty.
/// - [`MeshError::NonFinitePoint`] if any coordinate is NaN or infinite.
pub fn extreme_points(points: &[[f64; 2]]) -> Result<Extremes, MeshError> {
    let first = points.first().ok_or(MeshError::EmptyPointSet)?;
    if !first.iter().all(|c| c.is_finite()) {
        return Err(MeshError::NonFinitePoint { index: 0 });
    }
    let (mut lo_x, mut lo_y, mut hi_x, mut hi_y) = (first[0], first[1], first[0], first[1]);
    let mut ext = Extremes {
        min_x: 0,
        min_y: 0,
        max_x: 0,
        max_y: 0,
    };

    for (i, &[x, y]) in points.iter().enumerate().skip(1) {
        if !x.is_finite() || !y.is_finite() {
            return Err(MeshError::NonFinitePoint { index: i });
        }
        if x < lo_x {
            lo_x = x;
            ext.min_x = i;
        }
        if x > hi_x {
            hi_x = x;
            ext.max_x = i;
        }
        if y < lo_y {
            lo_y = y;
            ext.min_y = i;
        }
        if y > hi_y {
            hi_y = y;
            ext.max_y = i;
        }
    }
    Ok(ext)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_uses_first_encountered_ties() {
        let pts = [[0.0, 0.0], [5.0, 0.0], [5.0, 5.0], [0.0, 5.0]];
        let e = extreme_points(&pts).unwrap();
        assert_eq!(
            e,
            Extremes {
                min_x: 0,
                min_y: 0,
                max_x: 1,
                max_y: 2
            }
        );
        assert_eq!(e.indices(), vec![0, 1, 2]);
    }

    #[test]
    fn diamond_has_four_distinct_extremes() {
        let pts = [[0.0, 1.0], [1.0, 0.0], [2.0, 1.0], [1.0, 2.0], [1.0, 1.0]];
        let e = extreme_points(&pts).unwrap();
        assert_eq!(e.indices(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn single_point_is_every_extreme() {
        let e = extreme_points(&[[3.0, -1.0]]).unwrap();
        assert_eq!(e.indices(), vec![0]);
    }

    #[test]
    fn empty_and_non_finite_are_rejected() {
        assert_eq!(extreme_points(&[]), Err(MeshError::EmptyPointSet));
        assert_eq!(
            extreme_points(&[[0.0, 0.0], [f64::NAN, 1.0]]),
            Err(MeshError::NonFinitePoint { index: 1 })
        );
        assert_eq!(
            extreme_points(&[[f64::INFINITY, 0.0]]),
            Err(MeshError::NonFinitePoint { index: 0 })
        );
    }
}
