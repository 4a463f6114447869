//! Top-level decode entry point: reads the header to pick a connectivity
//! codec, then the mechanical inverse of [`super::encode`].

use crate::bitstream::DecoderBuffer;
use crate::codec::header::{EncoderType, Header};
use crate::edgebreaker;
use crate::error::{Error, Result};
use crate::geometry::{CornerTable, Face, Geometry, Mesh, PointIndex};
use crate::sequential;
use crate::sequential::decoder::CornerData;

pub fn decode(bytes: &[u8]) -> Result<Geometry> {
    let mut data = DecoderBuffer::new(bytes);
    let header = Header::read(&mut data)?;

    let geometry = match header.encoder_type {
        EncoderType::PointCloudSequential => {
            Geometry::PointCloud(sequential::decode_point_cloud(&mut data)?)
        }
        EncoderType::MeshSequential => Geometry::Mesh(sequential::decode_mesh(&mut data)?),
        EncoderType::MeshEdgebreaker => Geometry::Mesh(decode_mesh_edgebreaker(&mut data)?),
    };

    geometry.points().validate()?;
    if let Geometry::Mesh(mesh) = &geometry {
        mesh.validate()?;
    }

    Ok(geometry)
}

fn decode_mesh_edgebreaker(data: &mut DecoderBuffer) -> Result<Mesh> {
    let connectivity = edgebreaker::read_connectivity(data)?;

    // EdgeBreaker numbers vertices in traversal order from scratch, so the
    // decoded point indices already *are* the traversal-order ranks: the
    // "vertex order" a parallelogram-predicted attribute needs is just the
    // identity permutation here, unlike on the encode side.
    let mut mesh = Mesh::new();
    mesh.points_mut().set_num_points(connectivity.num_vertices);
    for face in &connectivity.faces {
        mesh.push_face(Face::new(face[0], face[1], face[2]));
    }
    let table = CornerTable::build(&mesh)?;
    let vertex_order: Vec<PointIndex> = (0..connectivity.num_vertices).map(PointIndex::from).collect();

    let num_attributes = data.read_varint()? as usize;
    for _ in 0..num_attributes {
        let corner_data = CornerData {
            table: &table,
            vertex_order: &vertex_order,
        };
        let attribute = sequential::decoder::read_attribute(data, connectivity.num_vertices, Some(corner_data))?;
        if !attribute.is_direct() {
            return Err(Error::corrupt(
                "edgebreaker attribute unexpectedly carried a point-to-value map",
            ));
        }
        mesh.points_mut().add_attribute(attribute);
    }

    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribute::{AttributeSemantic, DataType, PointAttribute};
    use crate::codec::encode::encode;
    use crate::codec::options::EncoderOptions;
    use crate::geometry::PointIndex;

    fn octahedron() -> Mesh {
        let mut mesh = Mesh::new();
        let mut pos = PointAttribute::new(0, AttributeSemantic::Position, DataType::F32, 3, false).unwrap();
        let coords = [
            [1.0, 0.0, 0.0],
            [-1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, -1.0, 0.0],
            [0.0, 0.0, 1.0],
            [0.0, 0.0, -1.0],
        ];
        for c in coords {
            pos.push_value(&c).unwrap();
        }
        mesh.points_mut().add_attribute(pos);
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
    fn edgebreaker_mesh_roundtrips_connectivity_and_attributes() {
        let mesh = octahedron();
        let bytes = encode(&Geometry::Mesh(mesh), &EncoderOptions::new()).unwrap();
        let decoded = decode(&bytes).unwrap();
        let decoded_mesh = decoded.as_mesh().unwrap();
        assert_eq!(decoded_mesh.num_faces(), 8);
        assert_eq!(decoded_mesh.points().num_points(), 6);
    }

    #[test]
    fn truncated_stream_reports_buffer_underflow() {
        let mesh = octahedron();
        let mut bytes = encode(&Geometry::Mesh(mesh), &EncoderOptions::new()).unwrap();
        bytes.truncate(bytes.len() - 10);
        assert!(matches!(decode(&bytes), Err(Error::BufferUnderflow(_))));
    }

    #[test]
    fn corrupted_magic_reports_corrupt_bitstream() {
        let mesh = octahedron();
        let mut bytes = encode(&Geometry::Mesh(mesh), &EncoderOptions::new()).unwrap();
        bytes[4] = b'X';
        assert!(matches!(decode(&bytes), Err(Error::CorruptBitstream(_))));
    }
}
