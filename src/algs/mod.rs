//! Re-export public algorithms.

pub mod face_path;
pub mod traversal;

pub use face_path::{FacePathSearch, PathCache, find_face_path};
pub use traversal::{face_components, graph_components};
