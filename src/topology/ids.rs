//! `FaceId` / `MeshEdgeId`: dense, zero-cost handles for mesh entities.
//!
//! Both wrap a `u32` index assigned by the mesh that owns the entity. They are
//! only meaningful relative to that mesh.

use std::fmt;

/// Handle of a polygon in a mesh.
#[derive(
    Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[repr(transparent)]
pub struct FaceId(u32);

/// Handle of an undirected mesh edge.
#[derive(
    Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[repr(transparent)]
pub struct MeshEdgeId(u32);

macro_rules! impl_index_handle {
    ($ty:ident, $name:literal) => {
        impl $ty {
            #[inline]
            pub const fn new(raw: u32) -> Self {
                $ty(raw)
            }

            #[inline]
            pub const fn get(self) -> u32 {
                self.0
            }

            /// The handle as a `usize` slot index.
            #[inline]
            pub const fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Debug for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_tuple($name).field(&self.0).finish()
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u32> for $ty {
            #[inline]
            fn from(raw: u32) -> Self {
                $ty(raw)
            }
        }
    };
}

impl_index_handle!(FaceId, "FaceId");
impl_index_handle!(MeshEdgeId, "MeshEdgeId");

#[cfg(test)]
mod layout_tests {
    use super::*;
    use static_assertions::assert_eq_size;

    assert_eq_size!(FaceId, u32);
    assert_eq_size!(MeshEdgeId, u32);
}
