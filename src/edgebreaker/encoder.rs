//! EdgeBreaker connectivity encoder (spec §4.F): walks a mesh's corner
//! table in depth-first order, emitting one CLERS symbol per face plus an
//! auxiliary integer where the symbol needs one, and records the order in
//! which points are first visited (the traversal-order vertex numbering
//! attribute values are later sequenced by).
//!
//! The traversal picks a seed face per connected component (lowest
//! minimum point id among remaining faces, for determinism), then walks
//! an explicit stack of `(corner, gate)` frames rather than recursing, so
//! `S` splits are just two pushes instead of native recursion depth.

use std::collections::{HashMap, HashSet};

use crate::bitstream::EncoderBuffer;
use crate::edgebreaker::symbol::Symbol;
use crate::entropy::{RansModel, RansSymbolEncoder};
use crate::error::{Error, Result};
use crate::geometry::{CornerIndex, CornerTable, FaceIndex, Mesh, PointIndex, VertexIndex};

/// One step of the traversal: the emitted symbol, plus an auxiliary value
/// whose meaning depends on the symbol (see [`write_connectivity`]).
struct Step {
    symbol: Symbol,
    aux: u64,
}

/// Connectivity extracted from a mesh by the EdgeBreaker traversal.
pub struct Traversal {
    steps: Vec<Step>,
    /// `vertex_order[i]` is the point first visited when traversal-order
    /// vertex `i` was introduced.
    pub vertex_order: Vec<PointIndex>,
    pub num_components: u32,
}

/// `aux` encoding for a `C` step: whether the traversal continues across
/// the newly-exposed right edge, or that edge is a mesh boundary.
const C_CONTINUES: u64 = 0;
const C_BOUNDARY: u64 = 1;
/// `aux` for L/R/S/E steps is `offset + OFFSET_BIAS`, where `offset` is
/// how many traversal-order vertices back from the current count the
/// apex (a previously-visited vertex) was introduced.
const OFFSET_BIAS: u64 = 2;

/// Rejects any connected component whose topology this traversal can't
/// express. The CLERS alphabet closes a boundary loop to a single point
/// (`E`/`EHole`) but has no symbol for a face that stitches together two
/// arms of the same traversal across a handle (a torus, for instance) —
/// Rossignac's original alphabet needs two extra symbols for that, which
/// this crate doesn't implement. Per-component Euler characteristic
/// (`V - E + F`) catches it: a genus-0 component with `b` boundary loops
/// has `V - E + F == 2 - b`; anything less indicates genus > 0.
pub(crate) fn check_genus_zero(mesh: &Mesh, table: &CornerTable) -> Result<()> {
    let num_faces = table.num_faces();
    let mut visited = vec![false; num_faces];

    for start in 0..num_faces {
        if visited[start] {
            continue;
        }
        let mut stack = vec![start];
        visited[start] = true;
        let mut faces = Vec::new();
        while let Some(f) = stack.pop() {
            faces.push(f);
            for k in 0..3 {
                let c = CornerIndex::from(f * 3 + k);
                if let Some(o) = table.opposite(c) {
                    let nf = table.face(o).as_usize();
                    if !visited[nf] {
                        visited[nf] = true;
                        stack.push(nf);
                    }
                }
            }
        }

        let mut points: HashSet<PointIndex> = HashSet::new();
        let mut edges: HashSet<(PointIndex, PointIndex)> = HashSet::new();
        let mut boundary_corners = Vec::new();
        for &f in &faces {
            for k in 0..3 {
                let c = CornerIndex::from(f * 3 + k);
                points.insert(table.vertex(c));
                let a = table.vertex(table.next(c));
                let b = table.vertex(table.prev(c));
                edges.insert(if a.0 <= b.0 { (a, b) } else { (b, a) });
                if table.opposite(c).is_none() {
                    boundary_corners.push(c);
                }
            }
        }

        let boundary_loops = count_boundary_loops(table, &boundary_corners);
        let euler = points.len() as i64 - edges.len() as i64 + faces.len() as i64;
        let expected = 2 - boundary_loops as i64;
        if euler != expected {
            return Err(Error::UnsupportedFeature(format!(
                "mesh component seeded at face {start} has genus > 0 (euler characteristic \
                 {euler}, expected {expected} for {boundary_loops} boundary loop(s)); this codec \
                 has no EdgeBreaker handle symbol for through-holes"
            )));
        }
    }
    Ok(())
}

/// Counts boundary loops by following each boundary corner's directed
/// edge (`prev(c) -> next(c)`) to the next one starting where it ends.
fn count_boundary_loops(table: &CornerTable, boundary_corners: &[CornerIndex]) -> usize {
    let mut next_vertex: HashMap<PointIndex, PointIndex> = HashMap::new();
    for &c in boundary_corners {
        next_vertex.insert(table.vertex(table.prev(c)), table.vertex(table.next(c)));
    }

    let mut seen_starts: HashSet<PointIndex> = HashSet::new();
    let mut loops = 0;
    for &c in boundary_corners {
        let start = table.vertex(table.prev(c));
        if !seen_starts.insert(start) {
            continue;
        }
        loops += 1;
        let mut cur = start;
        while let Some(&next) = next_vertex.get(&cur) {
            if next == start || !seen_starts.insert(next) {
                break;
            }
            cur = next;
        }
    }
    loops
}

pub fn traverse(mesh: &Mesh) -> Result<Traversal> {
    let table = CornerTable::build(mesh)?;
    check_genus_zero(mesh, &table)?;
    let num_faces = table.num_faces();
    let mut visited_faces = vec![false; num_faces];
    let mut vertex_rank: HashMap<PointIndex, VertexIndex> = HashMap::new();
    let mut vertex_order: Vec<PointIndex> = Vec::new();
    let mut steps: Vec<Step> = Vec::new();
    let mut num_components = 0u32;

    let mut alloc_vertex = |p: PointIndex, vertex_order: &mut Vec<PointIndex>| -> VertexIndex {
        let idx = VertexIndex::from(vertex_order.len());
        vertex_order.push(p);
        idx
    };

    loop {
        let seed = (0..num_faces)
            .filter(|&f| !visited_faces[f])
            .min_by_key(|&f| {
                let face = mesh.face(FaceIndex::from(f));
                (0..3).map(|k| face.get(k).0).min().unwrap_or(u32::MAX)
            });
        let Some(seed_face) = seed else { break };
        num_components += 1;
        log::debug!("edgebreaker: component {num_components} seeded at face {seed_face}");

        let c0 = CornerIndex::from(seed_face * 3);
        let v1 = table.vertex(table.next(c0));
        let v2 = table.vertex(table.prev(c0));

        let v1_idx = *vertex_rank
            .entry(v1)
            .or_insert_with(|| alloc_vertex(v1, &mut vertex_order));
        let v2_idx = *vertex_rank
            .entry(v2)
            .or_insert_with(|| alloc_vertex(v2, &mut vertex_order));

        let mut corner_stack: Vec<CornerIndex> = vec![c0];
        let mut gate_stack: Vec<(VertexIndex, VertexIndex)> = vec![(v1_idx, v2_idx)];

        while let (Some(corner), Some((left, right))) = (corner_stack.pop(), gate_stack.pop()) {
            let face_idx = table.face(corner).as_usize();
            if visited_faces[face_idx] {
                // Every face is reached through exactly one gate frame in
                // a correct traversal of a manifold mesh; this guards
                // against that invariant ever being violated rather than
                // relying on it silently.
                continue;
            }
            visited_faces[face_idx] = true;
            let apex = table.vertex(corner);

            if let std::collections::hash_map::Entry::Vacant(e) = vertex_rank.entry(apex) {
                let new_idx = alloc_vertex(apex, &mut vertex_order);
                e.insert(new_idx);

                let right_neighbor = table.opposite(table.prev(corner));
                match right_neighbor {
                    Some(rc) if !visited_faces[table.face(rc).as_usize()] => {
                        steps.push(Step {
                            symbol: Symbol::C,
                            aux: C_CONTINUES,
                        });
                        corner_stack.push(rc);
                        gate_stack.push((new_idx, right));
                    }
                    _ => {
                        steps.push(Step {
                            symbol: Symbol::C,
                            aux: C_BOUNDARY,
                        });
                    }
                }
            } else {
                let apex_idx = vertex_rank[&apex];
                let right_corner = table.opposite(table.prev(corner));
                let left_corner = table.opposite(table.next(corner));
                let right_open = right_corner
                    .map(|rc| !visited_faces[table.face(rc).as_usize()])
                    .unwrap_or(false);
                let left_open = left_corner
                    .map(|lc| !visited_faces[table.face(lc).as_usize()])
                    .unwrap_or(false);

                let offset = (vertex_order.len() as u64 - 1) - apex_idx.0 as u64;
                let aux = offset + OFFSET_BIAS;

                match (left_open, right_open) {
                    (false, true) => {
                        steps.push(Step { symbol: Symbol::L, aux });
                        corner_stack.push(right_corner.unwrap());
                        gate_stack.push((apex_idx, right));
                    }
                    (true, false) => {
                        steps.push(Step { symbol: Symbol::R, aux });
                        corner_stack.push(left_corner.unwrap());
                        gate_stack.push((left, apex_idx));
                    }
                    (true, true) => {
                        steps.push(Step { symbol: Symbol::S, aux });
                        // Push left first so the right branch (continued
                        // first, per spec) pops off next.
                        corner_stack.push(left_corner.unwrap());
                        gate_stack.push((left, apex_idx));
                        corner_stack.push(right_corner.unwrap());
                        gate_stack.push((apex_idx, right));
                    }
                    (false, false) => {
                        let is_hole = right_corner.is_none() || left_corner.is_none();
                        steps.push(Step {
                            symbol: if is_hole { Symbol::EHole } else { Symbol::E },
                            aux,
                        });
                    }
                }
            }
        }
    }

    Ok(Traversal {
        steps,
        vertex_order,
        num_components,
    })
}

/// Serializes a traversal: header (component/vertex/face counts), an
/// rANS-coded symbol stream, then one varint auxiliary value per symbol.
pub fn write_connectivity(mesh: &Mesh, out: &mut EncoderBuffer) -> Result<Vec<PointIndex>> {
    let traversal = traverse(mesh)?;

    out.write_varint(traversal.num_components as u64)?;
    out.write_varint(traversal.vertex_order.len() as u64)?;
    out.write_varint(traversal.steps.len() as u64)?;

    let mut counts = vec![0u64; Symbol::ALPHABET_SIZE];
    for step in &traversal.steps {
        counts[step.symbol.wire_tag() as usize] += 1;
    }
    // rANS requires every symbol it ever sees to carry nonzero frequency;
    // give never-used symbols a floor of 1 so an empty/degenerate mesh
    // (or one that never needs S, say) still yields a buildable model.
    for c in &mut counts {
        if *c == 0 {
            *c = 1;
        }
    }
    let model = RansModel::from_counts(&counts, 8)?;
    model.write(out)?;

    let mut encoder = RansSymbolEncoder::new(&model);
    for step in traversal.steps.iter().rev() {
        encoder
            .encode(step.symbol.wire_tag())
            .map_err(|_| Error::internal("edgebreaker symbol encode failed"))?;
    }
    let payload = encoder.finish();
    out.write_varint(payload.len() as u64)?;
    out.write_bytes(&payload)?;

    for step in &traversal.steps {
        out.write_varint(step.aux)?;
    }

    Ok(traversal.vertex_order)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Face;

    fn octahedron() -> Mesh {
        let mut mesh = Mesh::new();
        mesh.points_mut().set_num_points(6);
        let p = |i: usize| PointIndex::from(i);
        // +x,-x,+y,-y,+z,-z at indices 0..5; eight faces around the poles.
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

    #[test]
    fn visits_every_face_exactly_once() {
        let mesh = octahedron();
        let traversal = traverse(&mesh).unwrap();
        assert_eq!(traversal.steps.len(), mesh.num_faces());
        assert_eq!(traversal.vertex_order.len(), mesh.points().num_points());
    }

    #[test]
    fn single_triangle_is_one_c_symbol() {
        let mut mesh = Mesh::new();
        mesh.points_mut().set_num_points(3);
        let p = |i: usize| PointIndex::from(i);
        mesh.push_face(Face::new(p(0), p(1), p(2)));
        let traversal = traverse(&mesh).unwrap();
        assert_eq!(traversal.steps.len(), 1);
        assert_eq!(traversal.steps[0].symbol, Symbol::C);
        assert_eq!(traversal.steps[0].aux, C_BOUNDARY);
    }
}
