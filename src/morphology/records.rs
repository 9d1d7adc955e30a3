//! Plain annotation records as delivered by the service layer.
//!
//! The crate owns no wire format; these are the already-deserialized shapes it
//! accepts. Optional fields default when absent so partial JSON payloads load.

use serde::{Deserialize, Serialize};

/// An annotated structure: a cell, or a child such as a synapse or vesicle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureRecord {
    pub id: u64,
    /// Structure type code (cell, synapse kinds, ...), opaque to this crate.
    pub type_id: u64,
    /// Owning structure for child annotations.
    #[serde(default)]
    pub parent_id: Option<u64>,
    #[serde(default)]
    pub label: Option<String>,
}

impl StructureRecord {
    pub fn new(id: u64, type_id: u64) -> Self {
        StructureRecord {
            id,
            type_id,
            parent_id: None,
            label: None,
        }
    }

    pub fn with_parent(mut self, parent: u64) -> Self {
        self.parent_id = Some(parent);
        self
    }
}

/// One annotated location of a structure: a disc on a section.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LocationRecord {
    pub id: u64,
    /// Structure this location belongs to.
    pub structure_id: u64,
    /// Volume-space position; `z` is the section coordinate.
    pub position: [f64; 3],
    pub radius: f64,
    /// Annotator marked the process as ending here.
    #[serde(default)]
    pub terminal: bool,
    /// Annotator marked the process as leaving the imaged volume here.
    #[serde(default)]
    pub off_edge: bool,
}

impl LocationRecord {
    pub fn new(id: u64, structure_id: u64, position: [f64; 3], radius: f64) -> Self {
        LocationRecord {
            id,
            structure_id,
            position,
            radius,
            terminal: false,
            off_edge: false,
        }
    }

    /// Euclidean distance between the two positions.
    pub fn distance(&self, other: &LocationRecord) -> f64 {
        let d = [
            self.position[0] - other.position[0],
            self.position[1] - other.position[1],
            self.position[2] - other.position[2],
        ];
        (d[0] * d[0] + d[1] * d[1] + d[2] * d[2]).sqrt()
    }
}

/// Undirected link between two location ids.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocationLink {
    pub a: u64,
    pub b: u64,
}

impl LocationLink {
    #[inline]
    pub fn new(a: u64, b: u64) -> Self {
        LocationLink { a, b }
    }
}
