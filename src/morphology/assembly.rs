//! Morphology graph assembly from structure/location/link records.
//!
//! Each structure becomes a [`Graph`] keyed by location id with one node per
//! location and one edge per link between two of its locations. Child
//! structures (those with a `parent_id`) can be nested under their parent.
//!
//! Assembly is single-threaded and finishes before any query runs.

use std::collections::{BTreeMap, HashMap};

use super::records::{LocationLink, LocationRecord, StructureRecord};
use crate::debug_invariants::DebugInvariants;
use crate::graph::{Edge, Graph, Node};
use crate::mesh_error::MeshError;

/// What to do with a link that has exactly one endpoint in the structure.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DanglingLinkPolicy {
    /// Drop silently.
    Ignore,
    /// Drop and emit a `log::warn!`.
    #[default]
    Warn,
    /// Fail assembly with [`MeshError::MissingLocation`].
    Error,
}

/// Options for [`assemble_structure`] and [`assemble_all`].
#[derive(Clone, Copy, Debug)]
pub struct AssemblyOpts {
    pub dangling_links: DanglingLinkPolicy,
    /// Collapse repeated and reversed links into one edge.
    pub dedupe_links: bool,
    /// Nest child structures under their parent in [`assemble_all`].
    pub include_children: bool,
}

impl Default for AssemblyOpts {
    fn default() -> Self {
        Self {
            dangling_links: DanglingLinkPolicy::Warn,
            dedupe_links: true,
            include_children: true,
        }
    }
}

/// Per-structure morphology graph, with nested child structures.
#[derive(Clone, Debug)]
pub struct MorphologyGraph {
    pub structure: StructureRecord,
    pub graph: Graph<u64, LocationRecord>,
    pub children: BTreeMap<u64, MorphologyGraph>,
}

impl MorphologyGraph {
    #[inline]
    pub fn id(&self) -> u64 {
        self.structure.id
    }

    /// Locations with more than two incident links, ascending.
    pub fn branch_points(&self) -> Vec<u64> {
        self.locations_where(|d| d > 2)
    }

    /// Locations with at most one incident link, ascending.
    pub fn terminals(&self) -> Vec<u64> {
        self.locations_where(|d| d <= 1)
    }

    /// Sum of link lengths between location centers.
    pub fn cable_length(&self) -> f64 {
        self.graph
            .edges()
            .iter()
            .filter_map(|e| {
                let a = self.graph.node(&e.source)?;
                let b = self.graph.node(&e.target)?;
                Some(a.data.distance(&b.data))
            })
            .sum()
    }

    /// Axis-aligned `(min, max)` corners of the location centers, or `None`
    /// for a structure without locations.
    pub fn bounds(&self) -> Option<([f64; 3], [f64; 3])> {
        let mut it = self.graph.nodes().map(|n| n.data.position);
        let first = it.next()?;
        Some(it.fold((first, first), |(mut lo, mut hi), p| {
            for k in 0..3 {
                lo[k] = lo[k].min(p[k]);
                hi[k] = hi[k].max(p[k]);
            }
            (lo, hi)
        }))
    }

    /// Depth-first lookup of this structure or a nested child.
    pub fn find(&self, id: u64) -> Option<&MorphologyGraph> {
        if self.id() == id {
            return Some(self);
        }
        self.children.values().find_map(|c| c.find(id))
    }

    /// This structure plus all nested children.
    pub fn structure_count(&self) -> usize {
        1 + self
            .children
            .values()
            .map(MorphologyGraph::structure_count)
            .sum::<usize>()
    }

    fn locations_where(&self, keep: impl Fn(usize) -> bool) -> Vec<u64> {
        let mut out: Vec<u64> = self
            .graph
            .nodes()
            .filter(|n| keep(n.degree()))
            .map(|n| *n.key())
            .collect();
        out.sort_unstable();
        out
    }
}

/// Build the graph of one structure.
///
/// Only locations with `structure_id == structure.id` become nodes. Links with
/// neither endpoint among them are skipped; links with one endpoint are
/// handled per [`AssemblyOpts::dangling_links`]. Self-links are skipped.
pub fn assemble_structure<'a>(
    structure: &StructureRecord,
    locations: impl IntoIterator<Item = &'a LocationRecord>,
    links: impl IntoIterator<Item = &'a LocationLink>,
    opts: AssemblyOpts,
) -> Result<MorphologyGraph, MeshError> {
    let mut graph: Graph<u64, LocationRecord> = Graph::new();
    for loc in locations {
        if loc.structure_id == structure.id {
            graph.add_node(Node::new(loc.id, loc.clone()))?;
        }
    }

    for link in links {
        let (a, b) = (link.a, link.b);
        match (graph.contains_node(&a), graph.contains_node(&b)) {
            (false, false) => continue,
            (true, true) => {}
            (has_a, _) => {
                let missing = if has_a { b } else { a };
                match opts.dangling_links {
                    DanglingLinkPolicy::Ignore => {}
                    DanglingLinkPolicy::Warn => log::warn!(
                        "structure {}: dropping link {a} -> {b}, location {missing} is not part of it",
                        structure.id
                    ),
                    DanglingLinkPolicy::Error => {
                        return Err(MeshError::MissingLocation {
                            structure: structure.id,
                            a,
                            b,
                            missing,
                        });
                    }
                }
                continue;
            }
        }
        if a == b {
            log::debug!("structure {}: skipping self-link on {a}", structure.id);
            continue;
        }
        if opts.dedupe_links && !graph.edges_between(&a, &b).is_empty() {
            continue;
        }
        graph.add_edge(Edge::unit(a, b))?;
    }

    graph.debug_assert_invariants();
    log::debug!(
        "structure {}: {} locations, {} links",
        structure.id,
        graph.node_count(),
        graph.edge_count()
    );
    Ok(MorphologyGraph {
        structure: structure.clone(),
        graph,
        children: BTreeMap::new(),
    })
}

/// Build graphs for every structure and return the roots keyed by id.
///
/// With [`AssemblyOpts::include_children`], a structure whose `parent_id`
/// names another supplied structure is nested under it; otherwise every
/// structure is a root. Structures caught in a parent cycle are promoted to
/// roots with a warning.
///
/// # Errors
/// - [`MeshError::DuplicateNodeKey`] for a repeated structure or location id.
/// - [`MeshError::UnknownStructure`] for a location whose structure is absent.
/// - Anything [`assemble_structure`] reports.
pub fn assemble_all(
    structures: &[StructureRecord],
    locations: &[LocationRecord],
    links: &[LocationLink],
    opts: AssemblyOpts,
) -> Result<BTreeMap<u64, MorphologyGraph>, MeshError> {
    let mut by_id: BTreeMap<u64, &StructureRecord> = BTreeMap::new();
    for s in structures {
        if by_id.insert(s.id, s).is_some() {
            return Err(MeshError::DuplicateNodeKey(format!("structure {}", s.id)));
        }
    }

    let mut owner: HashMap<u64, u64> = HashMap::with_capacity(locations.len());
    let mut locs_of: HashMap<u64, Vec<&LocationRecord>> = HashMap::new();
    for loc in locations {
        if !by_id.contains_key(&loc.structure_id) {
            return Err(MeshError::UnknownStructure(loc.structure_id));
        }
        if owner.insert(loc.id, loc.structure_id).is_some() {
            return Err(MeshError::DuplicateNodeKey(format!("location {}", loc.id)));
        }
        locs_of.entry(loc.structure_id).or_default().push(loc);
    }

    let mut links_of: HashMap<u64, Vec<&LocationLink>> = HashMap::new();
    for link in links {
        let sa = owner.get(&link.a).copied();
        let sb = owner.get(&link.b).copied();
        if let Some(s) = sa {
            links_of.entry(s).or_default().push(link);
        }
        if let Some(s) = sb
            && sb != sa
        {
            links_of.entry(s).or_default().push(link);
        }
    }

    let mut graphs: BTreeMap<u64, MorphologyGraph> = BTreeMap::new();
    for (&id, s) in &by_id {
        let locs = locs_of.remove(&id).unwrap_or_default();
        let ls = links_of.remove(&id).unwrap_or_default();
        graphs.insert(id, assemble_structure(s, locs, ls, opts)?);
    }

    if !opts.include_children {
        return Ok(graphs);
    }

    let mut children_of: BTreeMap<u64, Vec<u64>> = BTreeMap::new();
    let mut roots = Vec::new();
    for (&id, s) in &by_id {
        match s.parent_id {
            Some(p) if p != id && by_id.contains_key(&p) => {
                children_of.entry(p).or_default().push(id)
            }
            _ => roots.push(id),
        }
    }

    let mut out = BTreeMap::new();
    for id in roots {
        if let Some(g) = take_subtree(id, &mut graphs, &children_of) {
            out.insert(id, g);
        }
    }
    while let Some(id) = graphs.keys().next().copied() {
        log::warn!("structure {id}: parent chain forms a cycle, treating as root");
        if let Some(g) = take_subtree(id, &mut graphs, &children_of) {
            out.insert(id, g);
        }
    }
    Ok(out)
}

fn take_subtree(
    id: u64,
    graphs: &mut BTreeMap<u64, MorphologyGraph>,
    children_of: &BTreeMap<u64, Vec<u64>>,
) -> Option<MorphologyGraph> {
    let mut g = graphs.remove(&id)?;
    for &c in children_of.get(&id).into_iter().flatten() {
        if let Some(child) = take_subtree(c, graphs, children_of) {
            g.children.insert(c, child);
        }
    }
    Some(g)
}
