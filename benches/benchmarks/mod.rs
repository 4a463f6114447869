pub mod edgebreaker;
pub mod rans;

use geomcodec::attribute::{AttributeSemantic, DataType, PointAttribute};
use geomcodec::geometry::{Face, Mesh, PointIndex};

/// Rows/cols of the benchmark grid mesh; `(rows-1)*(cols-1)*2` faces.
pub const GRID_ROWS: usize = 64;
pub const GRID_COLS: usize = 64;

/// Size of the symbol list used to bench the entropy coder directly.
pub const SYMBOL_LIST_LENGTH: usize = 200_000;

/// A manifold grid mesh (two triangles per cell), large enough to give the
/// EdgeBreaker traversal and the rANS coder a realistic amount of work.
pub fn grid_mesh(rows: usize, cols: usize) -> Mesh {
    let mut mesh = Mesh::new();
    let mut pos = PointAttribute::new(0, AttributeSemantic::Position, DataType::F32, 3, false).unwrap();
    for r in 0..rows {
        for c in 0..cols {
            pos.push_value(&[c as f64, r as f64, 0.0]).unwrap();
        }
    }
    mesh.points_mut().add_attribute(pos);
    mesh.points_mut().set_num_points(rows * cols);

    let idx = |r: usize, c: usize| PointIndex::from(r * cols + c);
    for r in 0..rows - 1 {
        for c in 0..cols - 1 {
            mesh.push_face(Face::new(idx(r, c), idx(r, c + 1), idx(r + 1, c)));
            mesh.push_face(Face::new(idx(r, c + 1), idx(r + 1, c + 1), idx(r + 1, c)));
        }
    }
    mesh
}

/// A skewed symbol stream (mimics a real EdgeBreaker/residual distribution:
/// one dominant symbol, a long thin tail) for benching the entropy coder in
/// isolation from any geometry.
pub fn skewed_symbols(n: usize) -> Vec<u16> {
    (0..n)
        .map(|i| match i % 11 {
            0 => 1,
            1 => 2,
            _ => 0,
        })
        .collect()
}
