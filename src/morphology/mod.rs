//! Morphology graph assembly.
//!
//! Turns structure, location and link records from the annotation service into
//! per-structure [`MorphologyGraph`]s backed by the typed [`Graph`](crate::graph::Graph)
//! container.

pub mod assembly;
pub mod records;

pub use assembly::{
    AssemblyOpts, DanglingLinkPolicy, MorphologyGraph, assemble_all, assemble_structure,
};
pub use records::{LocationLink, LocationRecord, StructureRecord};
