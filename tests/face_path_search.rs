use morphology_mesh::algs::face_path::{FacePathSearch, PathCache, find_face_path};
use morphology_mesh::algs::traversal::{face_components, reachable_faces};
use morphology_mesh::topology::{FaceId, MeshTopology, PolygonMesh};
use proptest::prelude::*;

fn f(i: u32) -> FaceId {
    FaceId::new(i)
}

/// `nx` × `ny` grid of quads; face `j * nx + i` is cell `(i, j)`.
fn quad_grid(nx: u32, ny: u32) -> PolygonMesh {
    let v = |i: u32, j: u32| j * (nx + 1) + i;
    let mut quads = Vec::new();
    for j in 0..ny {
        for i in 0..nx {
            quads.push([v(i, j), v(i + 1, j), v(i + 1, j + 1), v(i, j + 1)]);
        }
    }
    PolygonMesh::from_polygons(&quads).unwrap()
}

fn assert_walk(mesh: &PolygonMesh, path: &[FaceId], start: FaceId, target: FaceId) {
    assert_eq!(path.first(), Some(&start));
    assert_eq!(path.last(), Some(&target));
    for w in path.windows(2) {
        assert!(
            mesh.adjacent_faces(w[0]).contains(&w[1]),
            "{:?} and {:?} are not adjacent",
            w[0],
            w[1]
        );
    }
}

#[test]
fn four_face_chain() {
    let mesh = quad_grid(4, 1);
    let path = find_face_path(&mesh, f(0), |x| x == f(3));
    assert_eq!(path, Some(vec![f(0), f(1), f(2), f(3)]));
}

#[test]
fn disconnected_faces_report_no_path() {
    let mesh = PolygonMesh::from_triangles(&[[0, 1, 2], [3, 4, 5]]).unwrap();
    let mut cache = PathCache::new();
    let res = FacePathSearch::new(&mesh)
        .with_cache(&mut cache)
        .find(f(0), |x| x == f(1))
        .unwrap();
    assert_eq!(res, None);
    assert!(cache.is_empty());
    assert_eq!(face_components(&mesh).len(), 2);
}

#[test]
fn grid_neighbors_are_idempotent() {
    let mesh = quad_grid(3, 3);
    // Centre cell touches its four edge-neighbours only.
    let first = mesh.adjacent_faces(f(4));
    let second = mesh.adjacent_faces(f(4));
    assert_eq!(first, second);
    assert_eq!(first, vec![f(1), f(5), f(7), f(3)]);
    assert_eq!(reachable_faces(&mesh, f(0)).len(), 9);
}

#[test]
fn grid_corner_to_corner() {
    let mesh = quad_grid(3, 3);
    let path = find_face_path(&mesh, f(0), |x| x == f(8)).unwrap();
    assert_walk(&mesh, &path, f(0), f(8));
    assert_eq!(path.len(), 5);
}

#[test]
fn cache_is_shared_between_queries_for_one_predicate() {
    let mesh = quad_grid(4, 2);
    let target = |x: FaceId| x == f(7);
    let mut cache = PathCache::new();
    let mut results = Vec::new();
    for start in mesh.faces() {
        let p = FacePathSearch::new(&mesh)
            .with_cache(&mut cache)
            .find(start, target)
            .unwrap()
            .unwrap();
        assert_walk(&mesh, &p, start, f(7));
        results.push(p);
    }
    let repeat: Vec<_> = mesh
        .faces()
        .map(|s| {
            FacePathSearch::new(&mesh)
                .with_cache(&mut cache)
                .find(s, target)
                .unwrap()
                .unwrap()
        })
        .collect();
    assert_eq!(results, repeat);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn grid_search_finds_valid_walk(
        nx in 1u32..5,
        ny in 1u32..5,
        s in 0u32..25,
        t in 0u32..25,
    ) {
        let mesh = quad_grid(nx, ny);
        let n = nx * ny;
        let (start, target) = (f(s % n), f(t % n));

        let fresh = find_face_path(&mesh, start, |x| x == target);
        let path = fresh.clone().expect("grid is connected");
        assert_walk(&mesh, &path, start, target);
        if start == target {
            prop_assert_eq!(path.len(), 1);
        }

        let mut cache = PathCache::new();
        let first = FacePathSearch::new(&mesh)
            .with_cache(&mut cache)
            .find(start, |x| x == target)
            .unwrap();
        let second = FacePathSearch::new(&mesh)
            .with_cache(&mut cache)
            .find(start, |x| x == target)
            .unwrap();
        prop_assert_eq!(&first, &fresh);
        prop_assert_eq!(&second, &fresh);
    }
}
