//! EdgeBreaker connectivity decoder: the mechanical inverse of
//! [`super::encoder`] — it never touches a corner table, it just replays
//! the recorded symbol/auxiliary stream against a stack of `(left,
//! right)` gate pairs, allocating a fresh vertex each time a `C` symbol
//! says to and reading the `apex` vertex of every other symbol straight
//! out of its own traversal-order vertex count.
//!
//! Output is expressed purely in traversal-order vertex numbering — per
//! spec this codec does not preserve input vertex order, so there is
//! nothing to map back to.

use crate::bitstream::DecoderBuffer;
use crate::edgebreaker::symbol::Symbol;
use crate::entropy::{RansModel, RansSymbolDecoder};
use crate::error::{Error, Result};
use crate::geometry::{PointIndex, VertexIndex};

/// Decoded connectivity: a flat face list over traversal-order vertex
/// indices (reused as `PointIndex` — the two spaces coincide once
/// decoded), and how many distinct vertices were introduced.
pub struct DecodedConnectivity {
    pub faces: Vec<[PointIndex; 3]>,
    pub num_vertices: usize,
}

const C_BOUNDARY: u64 = 1;
const OFFSET_BIAS: u64 = 2;

pub fn read_connectivity(data: &mut DecoderBuffer) -> Result<DecodedConnectivity> {
    let num_components = data.read_varint()? as usize;
    let num_vertices_expected = data.read_varint()? as usize;
    let num_faces = data.read_varint()? as usize;

    let model = RansModel::read(data)?;
    let payload_len = data.read_varint()? as usize;
    let payload = data.read_bytes(payload_len)?;
    let mut symbol_decoder = RansSymbolDecoder::new(&model, payload)?;

    let mut symbols = Vec::with_capacity(num_faces);
    for _ in 0..num_faces {
        let tag = symbol_decoder
            .decode()
            .map_err(|_| Error::corrupt("edgebreaker symbol stream truncated"))?;
        let symbol = Symbol::from_wire_tag(tag)
            .ok_or_else(|| Error::corrupt("edgebreaker symbol out of alphabet"))?;
        symbols.push(symbol);
    }

    let mut auxes = Vec::with_capacity(num_faces);
    for _ in 0..num_faces {
        auxes.push(data.read_varint()?);
    }

    let mut faces = Vec::with_capacity(num_faces);
    let mut next_vertex: u32 = 0;

    let mut components_started = 0usize;
    let mut gate_stack: Vec<(VertexIndex, VertexIndex)> = Vec::new();
    let mut symbol_pos = 0usize;

    while symbol_pos < num_faces {
        if gate_stack.is_empty() {
            if components_started >= num_components {
                return Err(Error::corrupt(
                    "edgebreaker stream ran out of faces before declared component count",
                ));
            }
            components_started += 1;
            let v1 = VertexIndex::from(next_vertex);
            let v2 = VertexIndex::from(next_vertex + 1);
            next_vertex += 2;
            gate_stack.push((v1, v2));
            continue;
        }

        let (left, right) = gate_stack.pop().unwrap();
        let symbol = symbols[symbol_pos];
        let aux = auxes[symbol_pos];
        symbol_pos += 1;

        match symbol {
            Symbol::C => {
                let new_v = VertexIndex::from(next_vertex);
                next_vertex += 1;
                faces.push(as_points(left, right, new_v));
                if aux != C_BOUNDARY {
                    gate_stack.push((new_v, right));
                }
            }
            Symbol::L => {
                let far = resolve_far(aux, next_vertex)?;
                faces.push(as_points(left, right, far));
                gate_stack.push((far, right));
            }
            Symbol::R => {
                let far = resolve_far(aux, next_vertex)?;
                faces.push(as_points(left, right, far));
                gate_stack.push((left, far));
            }
            Symbol::S => {
                let far = resolve_far(aux, next_vertex)?;
                faces.push(as_points(left, right, far));
                gate_stack.push((left, far));
                gate_stack.push((far, right));
            }
            Symbol::E | Symbol::EHole => {
                let far = resolve_far(aux, next_vertex)?;
                faces.push(as_points(left, right, far));
            }
        }
    }

    if next_vertex as usize != num_vertices_expected {
        return Err(Error::corrupt(
            "edgebreaker traversal produced a different vertex count than declared",
        ));
    }

    Ok(DecodedConnectivity {
        faces,
        num_vertices: next_vertex as usize,
    })
}

fn as_points(a: VertexIndex, b: VertexIndex, c: VertexIndex) -> [PointIndex; 3] {
    [PointIndex::from(a.0), PointIndex::from(b.0), PointIndex::from(c.0)]
}

/// Resolves an L/R/S/E auxiliary value (vertices-ago, biased by
/// [`OFFSET_BIAS`]) to the vertex it names, given how many vertices have
/// been allocated so far.
fn resolve_far(aux: u64, next_vertex: u32) -> Result<VertexIndex> {
    if aux < OFFSET_BIAS {
        return Err(Error::corrupt("edgebreaker non-C symbol missing offset"));
    }
    let offset = aux - OFFSET_BIAS;
    if offset >= next_vertex as u64 {
        return Err(Error::corrupt("edgebreaker offset out of range"));
    }
    Ok(VertexIndex::from(next_vertex - 1 - offset as u32))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitstream::EncoderBuffer;
    use crate::edgebreaker::encoder::write_connectivity;
    use crate::geometry::Face;
    use crate::geometry::Mesh;

    fn octahedron() -> Mesh {
        let mut mesh = Mesh::new();
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

    #[test]
    fn roundtrips_connectivity_of_an_octahedron() {
        let mesh = octahedron();
        let mut enc = EncoderBuffer::new();
        write_connectivity(&mesh, &mut enc).unwrap();
        let bytes = enc.into_bytes();

        let mut dec = DecoderBuffer::new(&bytes);
        let decoded = read_connectivity(&mut dec).unwrap();
        assert_eq!(decoded.faces.len(), mesh.num_faces());
        assert_eq!(decoded.num_vertices, mesh.points().num_points());
    }

    #[test]
    fn roundtrips_a_single_triangle() {
        let mut mesh = Mesh::new();
        mesh.points_mut().set_num_points(3);
        let p = |i: usize| PointIndex::from(i);
        mesh.push_face(Face::new(p(0), p(1), p(2)));

        let mut enc = EncoderBuffer::new();
        write_connectivity(&mesh, &mut enc).unwrap();
        let bytes = enc.into_bytes();
        let mut dec = DecoderBuffer::new(&bytes);
        let decoded = read_connectivity(&mut dec).unwrap();
        assert_eq!(decoded.faces.len(), 1);
        assert_eq!(decoded.num_vertices, 3);
    }

    #[test]
    fn roundtrips_a_two_triangle_quad() {
        let mut mesh = Mesh::new();
        mesh.points_mut().set_num_points(4);
        let p = |i: usize| PointIndex::from(i);
        mesh.push_face(Face::new(p(0), p(1), p(2)));
        mesh.push_face(Face::new(p(0), p(2), p(3)));

        let mut enc = EncoderBuffer::new();
        write_connectivity(&mesh, &mut enc).unwrap();
        let bytes = enc.into_bytes();
        let mut dec = DecoderBuffer::new(&bytes);
        let decoded = read_connectivity(&mut dec).unwrap();
        assert_eq!(decoded.faces.len(), 2);
        assert_eq!(decoded.num_vertices, 4);
    }
}
