//! Face-path search over the face-adjacency graph of a mesh.
//!
//! Starting from a face, the search looks for a sequence of edge-adjacent faces
//! ending at a face that satisfies a caller-supplied predicate. The returned
//! path includes both ends; "no path" is `Ok(None)`.
//!
//! # Algorithm
//! Depth-first exploration with a memo table:
//! 1. Mark the face tested.
//! 2. If the predicate holds, the path is `[face]`.
//! 3. If the memo table has a path for the face, return it.
//! 4. Collect adjacent faces not yet tested. None: no path from here.
//! 5. Exactly one: continue into it, sharing the tested set.
//! 6. Several: explore each on its own copy of the tested set, union every
//!    copy back into the shared set afterwards, and keep the shortest
//!    successful sub-path (first one wins ties, in adjacency order).
//!
//! Each branching face stores its chosen path in the memo table.
//!
//! The traversal runs on an explicit frame stack, so long face chains do not
//! grow the call stack. Partial paths are carried match-first and reversed
//! once at the end, so unwinding a chain is linear in its length.
//!
//! # Limitations
//! This is DFS with memoization, not BFS/Dijkstra. Pruning by the tested set
//! and reuse of memoized sub-paths discovered under a different tested set
//! mean the result is *a* short path, not necessarily the globally shortest
//! one on meshes with many cycles. Without a memo table the worst case is
//! exponential in the branching of the mesh.
//!
//! # Caching
//! A [`PathCache`] may be supplied and reused across calls. It is only valid
//! for one immutable mesh and one predicate; reusing it after either changes
//! returns stale paths.

use std::collections::{HashMap, HashSet};
use std::convert::Infallible;
use std::sync::atomic::{AtomicBool, Ordering};

use thiserror::Error;

use crate::mesh_error::MeshError;
use crate::topology::{FaceId, MeshTopology};

/// Memo table: face → previously found path from that face to a match.
#[derive(Clone, Debug, Default)]
pub struct PathCache {
    paths: HashMap<FaceId, Vec<FaceId>>,
}

impl PathCache {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn get(&self, face: FaceId) -> Option<&[FaceId]> {
        self.paths.get(&face).map(Vec::as_slice)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Drop every memoized path, e.g. before switching predicates.
    pub fn clear(&mut self) {
        self.paths.clear();
    }

    fn insert(&mut self, face: FaceId, path: Vec<FaceId>) {
        self.paths.insert(face, path);
    }
}

/// Failure of a fallible face-path search.
#[derive(Debug, Error)]
pub enum FacePathError<E> {
    /// The predicate returned an error; it is passed through untouched.
    #[error("face predicate failed: {0}")]
    Predicate(E),
    #[error(transparent)]
    Mesh(#[from] MeshError),
}

/// Builder-style face-path search over a borrowed mesh.
///
/// ```rust
/// use morphology_mesh::algs::face_path::{FacePathSearch, PathCache};
/// use morphology_mesh::topology::{FaceId, PolygonMesh};
///
/// let mesh = PolygonMesh::from_triangles(&[[0, 1, 2], [2, 1, 3], [2, 3, 4]]).unwrap();
/// let mut cache = PathCache::new();
/// let path = FacePathSearch::new(&mesh)
///     .with_cache(&mut cache)
///     .find(FaceId::new(0), |f| f == FaceId::new(2))
///     .unwrap();
/// assert_eq!(path, Some(vec![FaceId::new(0), FaceId::new(1), FaceId::new(2)]));
/// ```
pub struct FacePathSearch<'a, M: MeshTopology> {
    mesh: &'a M,
    cache: Option<&'a mut PathCache>,
    cancel: Option<&'a AtomicBool>,
}

impl<'a, M: MeshTopology> FacePathSearch<'a, M> {
    pub fn new(mesh: &'a M) -> Self {
        Self {
            mesh,
            cache: None,
            cancel: None,
        }
    }

    /// Reuse `cache` across calls instead of a per-call memo table.
    pub fn with_cache(mut self, cache: &'a mut PathCache) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Abort with [`MeshError::SearchCancelled`] once `flag` reads `true`.
    /// The flag is polled once per search step.
    pub fn with_cancel(mut self, flag: &'a AtomicBool) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Search with an infallible predicate.
    pub fn find<P>(&mut self, start: FaceId, mut predicate: P) -> Result<Option<Vec<FaceId>>, MeshError>
    where
        P: FnMut(FaceId) -> bool,
    {
        self.try_find(start, |f| Ok::<_, Infallible>(predicate(f)))
            .map_err(|e| match e {
                FacePathError::Predicate(never) => match never {},
                FacePathError::Mesh(e) => e,
            })
    }

    /// Search with a fallible predicate. The first predicate error ends the
    /// search and is returned as [`FacePathError::Predicate`].
    pub fn try_find<P, E>(
        &mut self,
        start: FaceId,
        mut predicate: P,
    ) -> Result<Option<Vec<FaceId>>, FacePathError<E>>
    where
        P: FnMut(FaceId) -> Result<bool, E>,
    {
        if !self.mesh.contains_face(start) {
            log::debug!("face path: start face {start} is not in the mesh");
            return Ok(None);
        }
        let mut local = PathCache::new();
        let cache = match self.cache.as_deref_mut() {
            Some(c) => c,
            None => &mut local,
        };
        let mut state = SearchState {
            mesh: self.mesh,
            cache,
            sets: vec![HashSet::new()],
            stack: Vec::new(),
        };
        state.run(start, &mut predicate, self.cancel)
    }
}

/// Search from `start` for a face satisfying `predicate`, with a fresh memo
/// table and no cancellation.
pub fn find_face_path<M, P>(mesh: &M, start: FaceId, predicate: P) -> Option<Vec<FaceId>>
where
    M: MeshTopology,
    P: FnMut(FaceId) -> bool,
{
    // Without a cancel flag the only error source is gone.
    FacePathSearch::new(mesh).find(start, predicate).ok().flatten()
}

enum FrameKind {
    /// Exactly one untested neighbor; it shares this frame's tested set.
    Chain(FaceId),
    /// Several untested neighbors, each explored on a copy of the tested set.
    Branch {
        neighbors: Vec<FaceId>,
        next: usize,
        explored: HashSet<FaceId>,
        best: Option<Vec<FaceId>>,
    },
}

struct Frame {
    face: FaceId,
    /// Index into `SearchState::sets` of this frame's tested set.
    set: usize,
    kind: FrameKind,
}

enum Step {
    /// Reversed path (match first), or `None` for no path.
    Resolved(Option<Vec<FaceId>>),
    Descend,
}

struct SearchState<'s, M: MeshTopology> {
    mesh: &'s M,
    cache: &'s mut PathCache,
    /// Stack of tested sets: the root set plus one copy per open branch child.
    sets: Vec<HashSet<FaceId>>,
    stack: Vec<Frame>,
}

impl<M: MeshTopology> SearchState<'_, M> {
    fn run<P, E>(
        &mut self,
        start: FaceId,
        predicate: &mut P,
        cancel: Option<&AtomicBool>,
    ) -> Result<Option<Vec<FaceId>>, FacePathError<E>>
    where
        P: FnMut(FaceId) -> Result<bool, E>,
    {
        let mut pending = Some((start, 0usize));
        // `Some` once the most recently entered face has a result. Paths here
        // are reversed.
        let mut ret: Option<Option<Vec<FaceId>>> = None;
        let mut steps = 0usize;

        loop {
            if let Some(flag) = cancel
                && flag.load(Ordering::Relaxed)
            {
                log::debug!("face path: cancelled after {steps} steps");
                return Err(MeshError::SearchCancelled.into());
            }
            steps += 1;

            if let Some((face, set)) = pending.take()
                && let Step::Resolved(r) = self.enter(face, set, predicate)?
            {
                ret = Some(r);
            }

            let Some(top) = self.stack.last_mut() else {
                let path = ret.flatten().map(|mut p| {
                    p.reverse();
                    p
                });
                log::debug!(
                    "face path from {start}: {} in {steps} steps",
                    path.as_ref().map_or(0, Vec::len)
                );
                return Ok(path);
            };

            match &mut top.kind {
                FrameKind::Chain(next) => match ret.take() {
                    None => pending = Some((*next, top.set)),
                    Some(sub) => {
                        let face = top.face;
                        self.stack.pop();
                        ret = Some(sub.map(|mut p| {
                            p.push(face);
                            p
                        }));
                    }
                },
                FrameKind::Branch {
                    neighbors,
                    next,
                    explored,
                    best,
                } => {
                    if let Some(sub) = ret.take() {
                        if let Some(child) = self.sets.pop() {
                            explored.extend(child);
                        }
                        if let Some(path) = sub
                            && best.as_ref().is_none_or(|b| path.len() < b.len())
                        {
                            *best = Some(path);
                        }
                    }
                    if let Some(&n) = neighbors.get(*next) {
                        *next += 1;
                        let copy = self.sets[top.set].clone();
                        self.sets.push(copy);
                        pending = Some((n, self.sets.len() - 1));
                    } else {
                        let (face, set) = (top.face, top.set);
                        let explored = std::mem::take(explored);
                        let best = best.take();
                        self.stack.pop();
                        self.sets[set].extend(explored);
                        ret = Some(best.map(|p| self.finish(face, p)));
                    }
                }
            }
        }
    }

    fn enter<P, E>(
        &mut self,
        face: FaceId,
        set: usize,
        predicate: &mut P,
    ) -> Result<Step, FacePathError<E>>
    where
        P: FnMut(FaceId) -> Result<bool, E>,
    {
        self.sets[set].insert(face);
        if predicate(face).map_err(FacePathError::Predicate)? {
            return Ok(Step::Resolved(Some(vec![face])));
        }
        if let Some(p) = self.cache.get(face) {
            log::trace!("face path: cache hit at {face}");
            return Ok(Step::Resolved(Some(p.iter().rev().copied().collect())));
        }

        let tested = &self.sets[set];
        let mut untested: Vec<FaceId> = self
            .mesh
            .adjacent_faces(face)
            .into_iter()
            .filter(|f| !tested.contains(f))
            .collect();
        let kind = match untested.len() {
            0 => return Ok(Step::Resolved(None)),
            1 => FrameKind::Chain(untested.swap_remove(0)),
            _ => FrameKind::Branch {
                neighbors: untested,
                next: 0,
                explored: HashSet::new(),
                best: None,
            },
        };
        self.stack.push(Frame { face, set, kind });
        Ok(Step::Descend)
    }

    /// Extend a reversed sub-path with its branching face and memoize it.
    fn finish(&mut self, face: FaceId, mut rev: Vec<FaceId>) -> Vec<FaceId> {
        rev.push(face);
        self.cache
            .insert(face, rev.iter().rev().copied().collect());
        rev
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::PolygonMesh;

    fn f(i: u32) -> FaceId {
        FaceId::new(i)
    }

    /// Row of `n` quads; quad `i` shares one edge with quad `i + 1`.
    fn quad_strip(n: u32) -> PolygonMesh {
        let top = n + 1;
        let quads: Vec<[u32; 4]> = (0..n).map(|i| [i, i + 1, top + i + 1, top + i]).collect();
        PolygonMesh::from_polygons(&quads).unwrap()
    }

    /// Closed ring of six triangles around vertex 0.
    /// adjacent_faces(F0) == [F5, F1].
    fn fan_ring() -> PolygonMesh {
        let tris: Vec<[u32; 3]> = (0..6).map(|i| [0, i + 1, (i + 1) % 6 + 1]).collect();
        PolygonMesh::from_triangles(&tris).unwrap()
    }

    #[test]
    fn chain_path_includes_both_ends() {
        let m = quad_strip(4);
        let path = find_face_path(&m, f(0), |x| x == f(3));
        assert_eq!(path, Some(vec![f(0), f(1), f(2), f(3)]));
    }

    #[test]
    fn start_matching_is_singleton() {
        let m = quad_strip(3);
        assert_eq!(find_face_path(&m, f(1), |_| true), Some(vec![f(1)]));
    }

    #[test]
    fn disconnected_faces_have_no_path() {
        let m = PolygonMesh::from_triangles(&[[0, 1, 2], [3, 4, 5]]).unwrap();
        assert_eq!(find_face_path(&m, f(0), |x| x == f(1)), None);
    }

    #[test]
    fn unknown_start_or_empty_mesh_is_no_path() {
        let m = PolygonMesh::default();
        assert_eq!(find_face_path(&m, f(0), |_| true), None);
        let m = quad_strip(2);
        assert_eq!(find_face_path(&m, f(9), |_| true), None);
    }

    #[test]
    fn branches_pick_shortest() {
        let m = fan_ring();
        assert_eq!(m.adjacent_faces(f(0)), vec![f(5), f(1)]);
        // Via F1 is two faces; via F5 is four.
        assert_eq!(
            find_face_path(&m, f(0), |x| x == f(2)),
            Some(vec![f(0), f(1), f(2)])
        );
    }

    #[test]
    fn ties_keep_first_neighbor() {
        let m = fan_ring();
        assert_eq!(
            find_face_path(&m, f(0), |x| x == f(3)),
            Some(vec![f(0), f(5), f(4), f(3)])
        );
    }

    #[test]
    fn reused_cache_returns_same_path() {
        let m = fan_ring();
        let target = |x: FaceId| x == f(3);
        let fresh = find_face_path(&m, f(0), target);

        let mut cache = PathCache::new();
        let first = FacePathSearch::new(&m)
            .with_cache(&mut cache)
            .find(f(0), target)
            .unwrap();
        assert!(!cache.is_empty());
        assert_eq!(cache.get(f(0)), fresh.as_deref());
        let second = FacePathSearch::new(&m)
            .with_cache(&mut cache)
            .find(f(0), target)
            .unwrap();
        assert_eq!(first, fresh);
        assert_eq!(second, fresh);
    }

    #[test]
    fn predicate_error_propagates() {
        let m = quad_strip(4);
        let err = FacePathSearch::new(&m)
            .try_find(f(0), |x| if x == f(2) { Err("boom") } else { Ok(false) })
            .unwrap_err();
        assert!(matches!(err, FacePathError::Predicate("boom")));
    }

    #[test]
    fn cancellation_is_reported() {
        let m = quad_strip(4);
        let flag = AtomicBool::new(true);
        let err = FacePathSearch::new(&m)
            .with_cancel(&flag)
            .find(f(0), |x| x == f(3))
            .unwrap_err();
        assert_eq!(err, MeshError::SearchCancelled);

        flag.store(false, Ordering::Relaxed);
        let ok = FacePathSearch::new(&m)
            .with_cancel(&flag)
            .find(f(0), |x| x == f(3))
            .unwrap();
        assert_eq!(ok.map(|p| p.len()), Some(4));
    }

    #[test]
    fn long_chain_does_not_recurse() {
        let m = quad_strip(50_000);
        let path = find_face_path(&m, f(0), |x| x == f(49_999)).unwrap();
        assert_eq!(path.len(), 50_000);
        assert_eq!(path.first(), Some(&f(0)));
        assert_eq!(path.last(), Some(&f(49_999)));
    }
}
