//! Corner-table-grounded parallelogram prediction (spec §4.D): turns the
//! `(opposite_a, opposite_b, third_vertex)` context
//! [`super::parallelogram_predict`] wants into something that can be
//! derived purely from a [`CornerTable`] and an EdgeBreaker traversal
//! order, so callers never have to thread per-face state through the
//! traversal itself.
//!
//! This asks a simpler question than a live per-corner seam predictor
//! would: for the vertex introduced at traversal rank `r`, is there *any*
//! incident face whose other two corners, and whose opposite corner
//! across the edge between them, were all already visited (rank < r)?
//! That is enough to reconstruct deterministically (every rank only ever
//! looks at strictly lower ranks) without reproducing EdgeBreaker's own
//! gate-stack state a second time.

use std::collections::HashMap;

use crate::geometry::{CornerIndex, CornerTable, PointIndex};
use crate::prediction::{parallelogram_predict, ParallelogramContext};

pub(crate) struct CornerContext {
    rank_of: HashMap<PointIndex, usize>,
    corners_by_point: HashMap<PointIndex, Vec<CornerIndex>>,
}

impl CornerContext {
    pub(crate) fn build(table: &CornerTable, vertex_order: &[PointIndex]) -> Self {
        let rank_of = vertex_order.iter().enumerate().map(|(rank, &p)| (p, rank)).collect();
        let mut corners_by_point: HashMap<PointIndex, Vec<CornerIndex>> = HashMap::new();
        for c in 0..table.num_corners() {
            let corner = CornerIndex::from(c);
            corners_by_point.entry(table.vertex(corner)).or_default().push(corner);
        }
        Self { rank_of, corners_by_point }
    }

    fn gate_for(&self, table: &CornerTable, point: PointIndex, rank: usize) -> Option<(PointIndex, PointIndex, PointIndex)> {
        for &c in self.corners_by_point.get(&point)? {
            let v_next = table.vertex(table.next(c));
            let v_prev = table.vertex(table.prev(c));
            let rank_next = *self.rank_of.get(&v_next)?;
            let rank_prev = *self.rank_of.get(&v_prev)?;
            if rank_next >= rank || rank_prev >= rank {
                continue;
            }
            let opp = table.opposite(c)?;
            let apex = table.vertex(opp);
            let rank_apex = *self.rank_of.get(&apex)?;
            if rank_apex < rank {
                return Some((v_next, v_prev, apex));
            }
        }
        None
    }

    fn row<'a>(codes: &'a [i32], nc: usize, rank: usize) -> &'a [i32] {
        &codes[rank * nc..rank * nc + nc]
    }
}

/// Parallelogram-predicted residuals for traversal-rank-indexed,
/// `num_components`-wide quantized `codes` (row `r` is the value for
/// `vertex_order[r]`). A vertex with no usable gate face falls back to
/// delta against the previous rank's value, same as rank 0 always does.
pub(crate) fn parallelogram_residuals(
    codes: &[i32],
    num_components: usize,
    table: &CornerTable,
    vertex_order: &[PointIndex],
    ctx: &CornerContext,
) -> Vec<i32> {
    let nc = num_components;
    let mut out = Vec::with_capacity(codes.len());
    for (rank, &point) in vertex_order.iter().enumerate() {
        if rank == 0 {
            out.extend_from_slice(CornerContext::row(codes, nc, 0));
            continue;
        }
        let previous = CornerContext::row(codes, nc, rank - 1);
        let predicted = match ctx.gate_for(table, point, rank) {
            Some((a, b, c_prime)) => {
                let pc = ParallelogramContext {
                    opposite_a: CornerContext::row(codes, nc, ctx.rank_of[&a]),
                    opposite_b: CornerContext::row(codes, nc, ctx.rank_of[&b]),
                    third_vertex: CornerContext::row(codes, nc, ctx.rank_of[&c_prime]),
                };
                parallelogram_predict(Some(&pc), previous)
            }
            None => parallelogram_predict(None, previous),
        };
        let actual = CornerContext::row(codes, nc, rank);
        for c in 0..nc {
            out.push(actual[c] - predicted[c]);
        }
    }
    out
}

/// Inverse of [`parallelogram_residuals`]: reconstructs rank by rank,
/// since every gate only ever references strictly lower ranks.
pub(crate) fn parallelogram_reconstruct(
    residuals: &[i32],
    num_components: usize,
    table: &CornerTable,
    vertex_order: &[PointIndex],
    ctx: &CornerContext,
) -> Vec<i32> {
    let nc = num_components;
    let mut codes = vec![0i32; residuals.len()];
    for (rank, &point) in vertex_order.iter().enumerate() {
        if rank == 0 {
            codes[0..nc].copy_from_slice(&residuals[0..nc]);
            continue;
        }
        let previous = codes[(rank - 1) * nc..rank * nc].to_vec();
        let predicted = match ctx.gate_for(table, point, rank) {
            Some((a, b, c_prime)) => {
                let a_row = codes[ctx.rank_of[&a] * nc..ctx.rank_of[&a] * nc + nc].to_vec();
                let b_row = codes[ctx.rank_of[&b] * nc..ctx.rank_of[&b] * nc + nc].to_vec();
                let c_row = codes[ctx.rank_of[&c_prime] * nc..ctx.rank_of[&c_prime] * nc + nc].to_vec();
                let pc = ParallelogramContext {
                    opposite_a: &a_row,
                    opposite_b: &b_row,
                    third_vertex: &c_row,
                };
                parallelogram_predict(Some(&pc), &previous)
            }
            None => parallelogram_predict(None, &previous),
        };
        for c in 0..nc {
            codes[rank * nc + c] = predicted[c] + residuals[rank * nc + c];
        }
    }
    codes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Face, Mesh, PointIndex};

    fn quad_with_table() -> (CornerTable, Vec<PointIndex>) {
        // Two triangles sharing an edge: a square split along one diagonal.
        let mut mesh = Mesh::new();
        mesh.points_mut().set_num_points(4);
        let p = |i: usize| PointIndex::from(i);
        mesh.push_face(Face::new(p(0), p(1), p(2)));
        mesh.push_face(Face::new(p(0), p(2), p(3)));
        let table = CornerTable::build(&mesh).unwrap();
        (table, vec![p(0), p(1), p(2), p(3)])
    }

    #[test]
    fn residuals_roundtrip_through_reconstruct() {
        let (table, vertex_order) = quad_with_table();
        let codes = [0, 0, 1, 0, 1, 1, 0, 1];
        let ctx = CornerContext::build(&table, &vertex_order);
        let residuals = parallelogram_residuals(&codes, 2, &table, &vertex_order, &ctx);
        let back = parallelogram_reconstruct(&residuals, 2, &table, &vertex_order, &ctx);
        assert_eq!(back, codes);
    }

    #[test]
    fn last_vertex_has_a_full_gate_and_zero_residual_on_a_planar_quad() {
        // Vertex 3 completes the quad: 0 and 2 are the shared edge, 1 is the
        // apex on the other side, so a planar quad predicts it exactly.
        let (table, vertex_order) = quad_with_table();
        let codes = [0, 0, 4, 0, 4, 4, 0, 4];
        let ctx = CornerContext::build(&table, &vertex_order);
        let residuals = parallelogram_residuals(&codes, 2, &table, &vertex_order, &ctx);
        assert_eq!(&residuals[6..8], &[0, 0]);
    }
}
