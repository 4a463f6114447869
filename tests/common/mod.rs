/*
 * Geometry builders shared by the integration tests.
 */

use geomcodec::attribute::{AttributeSemantic, DataType, PointAttribute};
use geomcodec::geometry::{Face, Mesh, PointCloud, PointIndex};
use rand::prelude::{Distribution, SmallRng};
use rand::SeedableRng;
use rand_distr::UnitSphere;
use std::sync::Once;

static LOG_INIT: Once = Once::new();

/// Initializes `env_logger` once per test binary, so `RUST_LOG=debug` shows
/// the library's `log::debug!`/`log::warn!` points (scheme selection,
/// EdgeBreaker seed faces, rans model frame sizes) when a test is run
/// directly. Never called from library code itself.
pub fn init_logging() {
    LOG_INIT.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

fn position_attribute(coords: &[[f64; 3]]) -> PointAttribute {
    let mut attr = PointAttribute::new(0, AttributeSemantic::Position, DataType::F32, 3, false).unwrap();
    for c in coords {
        attr.push_value(c).unwrap();
    }
    attr
}

/// A single triangle, no other attributes.
pub fn unit_triangle() -> Mesh {
    let mut mesh = Mesh::new();
    mesh.points_mut()
        .add_attribute(position_attribute(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]));
    mesh.points_mut().set_num_points(3);
    let p = |i: usize| PointIndex::from(i);
    mesh.push_face(Face::new(p(0), p(1), p(2)));
    mesh
}

/// Two triangles sharing an edge, forming a quad.
pub fn two_triangle_quad() -> Mesh {
    let mut mesh = Mesh::new();
    mesh.points_mut().add_attribute(position_attribute(&[
        [0.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [1.0, 1.0, 0.0],
        [0.0, 1.0, 0.0],
    ]));
    mesh.points_mut().set_num_points(4);
    let p = |i: usize| PointIndex::from(i);
    mesh.push_face(Face::new(p(0), p(1), p(2)));
    mesh.push_face(Face::new(p(0), p(2), p(3)));
    mesh
}

/// A closed, manifold octahedron: 6 vertices, 8 faces. `with_normals`
/// additionally attaches the (already unit-length) vertex positions as a
/// Normal attribute, since on an octahedron centered at the origin they
/// coincide.
pub fn octahedron(with_normals: bool) -> Mesh {
    let mut mesh = Mesh::new();
    let coords = [
        [1.0, 0.0, 0.0],
        [-1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, -1.0, 0.0],
        [0.0, 0.0, 1.0],
        [0.0, 0.0, -1.0],
    ];
    mesh.points_mut().add_attribute(position_attribute(&coords));
    if with_normals {
        let mut normals = PointAttribute::new(0, AttributeSemantic::Normal, DataType::F32, 3, true).unwrap();
        for c in &coords {
            normals.push_value(c).unwrap();
        }
        mesh.points_mut().add_attribute(normals);
    }
    mesh.points_mut().set_num_points(6);

    let p = |i: usize| PointIndex::from(i);
    let faces = [
        (4, 0, 2),
        (4, 2, 1),
        (4, 1, 3),
        (4, 3, 0),
        (5, 2, 0),
        (5, 1, 2),
        (5, 3, 1),
        (5, 0, 3),
    ];
    for (a, b, c) in faces {
        mesh.push_face(Face::new(p(a), p(b), p(c)));
    }
    mesh
}

/// A closed, genus-1 triangulated torus: a `rows` x `cols` grid of
/// vertices with both axes wrapped, two triangles per grid cell. Used to
/// exercise the EdgeBreaker path's rejection of topology it has no
/// handle symbol for.
pub fn torus_grid(rows: usize, cols: usize) -> Mesh {
    let mut mesh = Mesh::new();
    let mut coords = Vec::with_capacity(rows * cols);
    for r in 0..rows {
        for c in 0..cols {
            coords.push([r as f64, c as f64, 0.0]);
        }
    }
    mesh.points_mut().add_attribute(position_attribute(&coords));
    mesh.points_mut().set_num_points(rows * cols);

    let idx = |r: usize, c: usize| PointIndex::from((r % rows) * cols + (c % cols));
    for r in 0..rows {
        for c in 0..cols {
            mesh.push_face(Face::new(idx(r, c), idx(r, c + 1), idx(r + 1, c)));
            mesh.push_face(Face::new(idx(r, c + 1), idx(r + 1, c + 1), idx(r + 1, c)));
        }
    }
    mesh
}

/// A point cloud of `n` points sampled uniformly on the unit sphere.
pub fn sphere_point_cloud(n: usize, seed: u64) -> PointCloud {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut cloud = PointCloud::new();
    cloud.set_num_points(n);
    let mut pos = PointAttribute::new(0, AttributeSemantic::Position, DataType::F32, 3, false).unwrap();
    for _ in 0..n {
        let sample: [f64; 3] = UnitSphere.sample(&mut rng);
        pos.push_value(&sample).unwrap();
    }
    cloud.add_attribute(pos);
    cloud
}
