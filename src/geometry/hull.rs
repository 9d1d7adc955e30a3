//! 2D convex hull seeded from the axis-extreme points.
//!
//! Points strictly inside the polygon spanned by the extremes cannot be hull
//! vertices and are discarded first (Akl–Toussaint pruning). The survivors go
//! through Andrew's monotone chain.
//!
//! The hull is returned as indices into the input, counter-clockwise, starting
//! at the lexicographically smallest `(x, y)` point. Collinear boundary points
//! and repeated coordinates are not hull vertices; for repeated coordinates the
//! lowest index represents the point.

use super::extremes::extreme_points;
use crate::mesh_error::MeshError;

/// Twice the signed area of `(a, b, c)`; positive for a counter-clockwise turn.
#[inline]
pub fn orient2d(a: [f64; 2], b: [f64; 2], c: [f64; 2]) -> f64 {
    (b[0] - a[0]) * (c[1] - a[1]) - (b[1] - a[1]) * (c[0] - a[0])
}

/// True if `p` lies strictly inside triangle `(a, b, c)`, for either winding.
/// Points on an edge or vertex, and any point of a degenerate triangle, are
/// outside.
pub fn point_in_triangle(p: [f64; 2], a: [f64; 2], b: [f64; 2], c: [f64; 2]) -> bool {
    let d1 = orient2d(a, b, p);
    let d2 = orient2d(b, c, p);
    let d3 = orient2d(c, a, p);
    (d1 > 0.0 && d2 > 0.0 && d3 > 0.0) || (d1 < 0.0 && d2 < 0.0 && d3 < 0.0)
}

/// Convex hull vertex indices of `points`.
///
/// # Errors
/// Same as [`extreme_points`]: empty input or non-finite coordinates.
pub fn convex_hull(points: &[[f64; 2]]) -> Result<Vec<usize>, MeshError> {
    let seed = extreme_points(points)?.indices();

    let mut candidates: Vec<usize> = (0..points.len())
        .filter(|&i| seed.contains(&i) || !inside_seed(points, &seed, points[i]))
        .collect();
    log::trace!(
        "convex_hull: {} of {} points survive extreme pruning",
        candidates.len(),
        points.len()
    );

    candidates.sort_by(|&a, &b| {
        points[a][0]
            .total_cmp(&points[b][0])
            .then(points[a][1].total_cmp(&points[b][1]))
    });
    candidates.dedup_by(|a, b| points[*a] == points[*b]);
    if candidates.len() < 3 {
        return Ok(candidates);
    }

    let mut lower: Vec<usize> = Vec::with_capacity(candidates.len());
    for &i in &candidates {
        push_turning_left(&mut lower, points, i);
    }
    let mut upper: Vec<usize> = Vec::with_capacity(candidates.len());
    for &i in candidates.iter().rev() {
        push_turning_left(&mut upper, points, i);
    }
    lower.pop();
    upper.pop();
    lower.extend(upper);
    Ok(lower)
}

fn push_turning_left(chain: &mut Vec<usize>, points: &[[f64; 2]], i: usize) {
    while let Some(&[a, b]) = chain.last_chunk::<2>() {
        if orient2d(points[a], points[b], points[i]) > 0.0 {
            break;
        }
        chain.pop();
    }
    chain.push(i);
}

/// `p` is strictly inside one of the fan triangles of the seed polygon.
fn inside_seed(points: &[[f64; 2]], seed: &[usize], p: [f64; 2]) -> bool {
    let Some((&apex, rest)) = seed.split_first() else {
        return false;
    };
    rest.windows(2)
        .any(|w| point_in_triangle(p, points[apex], points[w[0]], points[w[1]]))
}
