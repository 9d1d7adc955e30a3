//! Planar geometry helpers: axis extremes and convex hulls of 2D point sets.
//!
//! Points are plain `[f64; 2]` arrays.

pub mod extremes;
pub mod hull;

pub use extremes::{Extremes, extreme_points};
pub use hull::{convex_hull, orient2d, point_in_triangle};
