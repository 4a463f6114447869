//! Corner table (spec §3 / §4.E): half-edge-style connectivity for
//! triangle meshes, built in one pass over the face list.

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::geometry::{CornerIndex, Mesh, PointIndex};

const NO_CORNER: u32 = u32::MAX;

/// O(1) `next`/`prev`/`face`/`vertex`/`opposite` queries over a mesh's
/// corners. `vertex` here means the point index the corner touches — the
/// corner table doesn't renumber vertices, EdgeBreaker's traversal order
/// does that separately.
#[derive(Clone, Debug)]
pub struct CornerTable {
    /// `corner_vertex[c]` = point index at corner `c`.
    corner_vertex: Vec<PointIndex>,
    /// `opposite[c]` = corner across the edge opposite `c`, or `NO_CORNER`.
    opposite: Vec<u32>,
}

impl CornerTable {
    /// Builds a corner table from `mesh`'s face list. Fails with
    /// `NonManifold` if any edge is shared by more than two corners.
    pub fn build(mesh: &Mesh) -> Result<Self> {
        let num_faces = mesh.num_faces();
        let mut corner_vertex = Vec::with_capacity(num_faces * 3);
        for face in mesh.faces() {
            for k in 0..3 {
                corner_vertex.push(face.get(k));
            }
        }

        let mut opposite = vec![NO_CORNER; num_faces * 3];
        let mut edge_map: HashMap<(PointIndex, PointIndex), u32> = HashMap::new();

        for c in 0..num_faces * 3 {
            let corner = CornerIndex::from(c);
            let v_next = corner_vertex[Self::next_idx(corner).as_usize()];
            let v_prev = corner_vertex[Self::prev_idx(corner).as_usize()];
            let key = if v_next.0 <= v_prev.0 {
                (v_next, v_prev)
            } else {
                (v_prev, v_next)
            };

            match edge_map.remove(&key) {
                None => {
                    edge_map.insert(key, c as u32);
                }
                Some(other) => {
                    if opposite[other as usize] != NO_CORNER {
                        return Err(Error::NonManifold(format!(
                            "edge {{{}, {}}} is shared by more than two corners",
                            key.0, key.1
                        )));
                    }
                    opposite[other as usize] = c as u32;
                    opposite[c] = other;
                }
            }
        }

        Ok(Self {
            corner_vertex,
            opposite,
        })
    }

    pub fn num_corners(&self) -> usize {
        self.corner_vertex.len()
    }

    pub fn num_faces(&self) -> usize {
        self.corner_vertex.len() / 3
    }

    #[inline]
    pub fn next(&self, c: CornerIndex) -> CornerIndex {
        Self::next_idx(c)
    }

    #[inline]
    pub fn prev(&self, c: CornerIndex) -> CornerIndex {
        Self::prev_idx(c)
    }

    #[inline]
    fn next_idx(c: CornerIndex) -> CornerIndex {
        let f = c.as_usize() / 3;
        CornerIndex::from(3 * f + (c.as_usize() + 1) % 3)
    }

    #[inline]
    fn prev_idx(c: CornerIndex) -> CornerIndex {
        let f = c.as_usize() / 3;
        CornerIndex::from(3 * f + (c.as_usize() + 2) % 3)
    }

    #[inline]
    pub fn face(&self, c: CornerIndex) -> crate::geometry::FaceIndex {
        crate::geometry::FaceIndex::from(c.as_usize() / 3)
    }

    #[inline]
    pub fn vertex(&self, c: CornerIndex) -> PointIndex {
        self.corner_vertex[c.as_usize()]
    }

    /// The corner across the edge opposite `c`, or `None` on a boundary.
    #[inline]
    pub fn opposite(&self, c: CornerIndex) -> Option<CornerIndex> {
        let o = self.opposite[c.as_usize()];
        if o == NO_CORNER {
            None
        } else {
            Some(CornerIndex::from(o))
        }
    }

    /// The three corners of the face `c` belongs to, starting from `c`
    /// itself (`c`, `next(c)`, `prev(c)`).
    pub fn face_corners(&self, c: CornerIndex) -> [CornerIndex; 3] {
        [c, self.next(c), self.prev(c)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Face;

    fn quad() -> Mesh {
        let mut mesh = Mesh::new();
        mesh.points_mut().set_num_points(4);
        let p = |i: usize| PointIndex::from(i);
        mesh.push_face(Face::new(p(0), p(1), p(2)));
        mesh.push_face(Face::new(p(0), p(2), p(3)));
        mesh
    }

    #[test]
    fn opposite_is_involutive_and_shares_the_edge() {
        let mesh = quad();
        let table = CornerTable::build(&mesh).unwrap();
        for c in 0..table.num_corners() {
            let c = CornerIndex::from(c);
            if let Some(o) = table.opposite(c) {
                assert_eq!(table.opposite(o), Some(c));
                let edge_c = (table.vertex(table.next(c)), table.vertex(table.prev(c)));
                let edge_o = (table.vertex(table.next(o)), table.vertex(table.prev(o)));
                let as_set = |e: (PointIndex, PointIndex)| {
                    if e.0.0 <= e.1.0 {
                        e
                    } else {
                        (e.1, e.0)
                    }
                };
                assert_eq!(as_set(edge_c), as_set(edge_o));
            }
        }
    }

    #[test]
    fn boundary_edges_have_no_opposite() {
        let mesh = quad();
        let table = CornerTable::build(&mesh).unwrap();
        let boundary_count = (0..table.num_corners())
            .filter(|&c| table.opposite(CornerIndex::from(c)).is_none())
            .count();
        assert_eq!(boundary_count, 4);
    }

    #[test]
    fn non_manifold_edge_is_rejected() {
        let mut mesh = Mesh::new();
        mesh.points_mut().set_num_points(5);
        let p = |i: usize| PointIndex::from(i);
        mesh.push_face(Face::new(p(0), p(1), p(2)));
        mesh.push_face(Face::new(p(0), p(1), p(3)));
        mesh.push_face(Face::new(p(0), p(1), p(4)));
        assert!(matches!(CornerTable::build(&mesh), Err(Error::NonManifold(_))));
    }
}
