/*
 * End-to-end encode/decode scenarios, exercised through the public
 * `encode`/`decode` surface only.
 */

mod common;

use common::*;
use geomcodec::attribute::AttributeSemantic;
use geomcodec::{decode, encode, EncoderOptions, Error, Geometry};

#[test]
fn unit_triangle_roundtrips() {
    init_logging();
    let mesh = unit_triangle();
    let bytes = encode(&Geometry::Mesh(mesh), &EncoderOptions::new()).unwrap();
    let decoded = decode(&bytes).unwrap();
    let decoded_mesh = decoded.as_mesh().unwrap();
    assert_eq!(decoded_mesh.num_faces(), 1);
    assert_eq!(decoded_mesh.points().num_points(), 3);
}

#[test]
fn two_triangle_quad_roundtrips() {
    init_logging();
    let mesh = two_triangle_quad();
    let bytes = encode(&Geometry::Mesh(mesh), &EncoderOptions::new()).unwrap();
    let decoded = decode(&bytes).unwrap();
    let decoded_mesh = decoded.as_mesh().unwrap();
    assert_eq!(decoded_mesh.num_faces(), 2);
    assert_eq!(decoded_mesh.points().num_points(), 4);
}

#[test]
fn sphere_point_cloud_positions_survive_quantization() {
    init_logging();
    let cloud = sphere_point_cloud(100, 7);
    let bytes = encode(&Geometry::PointCloud(cloud.clone()), &EncoderOptions::new()).unwrap();
    let decoded = decode(&bytes).unwrap();
    assert_eq!(decoded.points().num_points(), 100);

    let original = cloud.attribute_by_semantic(AttributeSemantic::Position).unwrap();
    let recovered = decoded.points().attribute_by_semantic(AttributeSemantic::Position).unwrap();
    for i in 0..100 {
        let a = original.value(geomcodec::geometry::AttributeValueIndex::from(i));
        let b = recovered.value(geomcodec::geometry::AttributeValueIndex::from(i));
        for c in 0..3 {
            assert!((a[c] - b[c]).abs() < 0.01, "component {c} drifted too far under quantization");
        }
    }
}

#[test]
fn normals_only_octahedron_roundtrips_through_edgebreaker() {
    init_logging();
    let original = octahedron(true);
    let original_normals = original.points().attribute_by_semantic(AttributeSemantic::Normal).unwrap().clone();
    let bytes = encode(&Geometry::Mesh(original), &EncoderOptions::new()).unwrap();
    let decoded = decode(&bytes).unwrap();
    let decoded_mesh = decoded.as_mesh().unwrap();
    assert_eq!(decoded_mesh.num_faces(), 8);
    let normals = decoded_mesh.points().attribute_by_semantic(AttributeSemantic::Normal).unwrap();
    assert_eq!(normals.num_values(), 6);

    // The octahedral fold should keep each decoded normal within a
    // fraction of a degree of the original unit vector, not just
    // present the right count of values.
    for p in 0..6 {
        let before = original_normals.value_for_point(geomcodec::geometry::PointIndex::from(p));
        let after = normals.value_for_point(geomcodec::geometry::PointIndex::from(p));
        let dot: f64 = (0..3).map(|c| before[c] * after[c]).sum();
        let before_len: f64 = (0..3).map(|c| before[c] * before[c]).sum::<f64>().sqrt();
        let after_len: f64 = (0..3).map(|c| after[c] * after[c]).sum::<f64>().sqrt();
        let cos_angle = dot / (before_len * after_len);
        assert!(cos_angle > 0.999, "normal at point {p} drifted too far: cos(angle) = {cos_angle}");
    }
}

#[test]
fn corrupted_magic_is_rejected() {
    init_logging();
    let mesh = unit_triangle();
    let mut bytes = encode(&Geometry::Mesh(mesh), &EncoderOptions::new()).unwrap();
    bytes[4] = b'X';
    assert!(matches!(decode(&bytes), Err(Error::CorruptBitstream(_))));
}

#[test]
fn truncated_stream_is_rejected() {
    init_logging();
    let mesh = octahedron(false);
    let mut bytes = encode(&Geometry::Mesh(mesh), &EncoderOptions::new()).unwrap();
    bytes.truncate(bytes.len() - 10);
    assert!(matches!(decode(&bytes), Err(Error::BufferUnderflow(_))));
}
