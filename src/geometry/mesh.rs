//! `Mesh` (spec §3): a [`PointCloud`] plus an ordered sequence of
//! triangular faces.

use crate::error::{Error, Result};
use crate::geometry::{FaceIndex, PointCloud, PointIndex};

/// A triangular face: three point indices drawn from `[0, N)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Face(pub [PointIndex; 3]);

impl Face {
    pub fn new(a: PointIndex, b: PointIndex, c: PointIndex) -> Self {
        Self([a, b, c])
    }

    pub fn get(&self, k: usize) -> PointIndex {
        self.0[k]
    }
}

/// A point cloud plus triangle connectivity.
#[derive(Clone, Debug, Default)]
pub struct Mesh {
    points: PointCloud,
    faces: Vec<Face>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn points(&self) -> &PointCloud {
        &self.points
    }

    pub fn points_mut(&mut self) -> &mut PointCloud {
        &mut self.points
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    pub fn push_face(&mut self, face: Face) -> FaceIndex {
        let idx = FaceIndex::from(self.faces.len());
        self.faces.push(face);
        idx
    }

    pub fn face(&self, idx: FaceIndex) -> Face {
        self.faces[idx.as_usize()]
    }

    /// Spec §3 invariants: point-cloud invariants hold, every face index
    /// is `< N`, and every point in `[0, N)` is referenced by at least one
    /// face (an isolated vertex has no connectivity to quantize against).
    pub fn validate(&self) -> Result<()> {
        self.points.validate()?;
        let n = self.points.num_points();
        let mut referenced = vec![false; n];
        for (i, face) in self.faces.iter().enumerate() {
            for k in 0..3 {
                let p = face.get(k).as_usize();
                if p >= n {
                    return Err(Error::InvalidParameter(format!(
                        "face {i} references point {} but the cloud has {n} points",
                        face.get(k)
                    )));
                }
                referenced[p] = true;
            }
        }
        if let Some(p) = referenced.iter().position(|&r| !r) {
            return Err(Error::InvalidParameter(format!(
                "point {p} is referenced by no face"
            )));
        }
        Ok(())
    }
}
