//! Top-level encode entry point (spec §4.A): picks a connectivity codec
//! per mesh, then writes a framed bitstream.

use crate::attribute::AttributeSemantic;
use crate::bitstream::EncoderBuffer;
use crate::codec::header::{EncoderType, Header};
use crate::codec::options::EncoderOptions;
use crate::codec::stats::{AttributeStats, EncodingStats};
use crate::edgebreaker;
use crate::error::Result;
use crate::geometry::{CornerTable, Geometry, PointIndex};
use crate::prediction::PredictionScheme;
use crate::sequential;
use crate::sequential::encoder::PredictionInput;

/// Encodes a point cloud or mesh into a framed byte stream.
///
/// Meshes try EdgeBreaker first; a mesh the corner table rejects as
/// non-manifold (or one that simply requests the fast path via
/// [`EncoderOptions::prefer_sequential`]) falls back to the sequential
/// mesh codec instead of failing the whole encode.
pub fn encode(geometry: &Geometry, options: &EncoderOptions) -> Result<Vec<u8>> {
    encode_with_stats(geometry, options).map(|(bytes, _)| bytes)
}

/// Like [`encode`], but also returns a readback of where the output bytes
/// went. Never consulted by [`super::decode`]; purely informational, for
/// callers picking quantization/prediction settings by trial.
pub fn encode_with_stats(geometry: &Geometry, options: &EncoderOptions) -> Result<(Vec<u8>, EncodingStats)> {
    geometry.points().validate()?;
    if let Geometry::Mesh(mesh) = geometry {
        mesh.validate()?;
    }
    let input_points = geometry.points().num_points();

    let mut out = EncoderBuffer::new();
    let mut attributes = Vec::new();

    match geometry {
        Geometry::PointCloud(cloud) => {
            let header = Header::new(EncoderType::PointCloudSequential);
            header.write(&mut out)?;
            sequential::encode_point_cloud(
                cloud,
                |id, semantic| options.quantization_bits_for(id, semantic),
                &mut out,
            )?;
        }
        Geometry::Mesh(mesh) => {
            let use_edgebreaker = !options.prefer_sequential()
                && CornerTable::build(mesh)
                    .ok()
                    .is_some_and(|table| edgebreaker::encoder::check_genus_zero(mesh, &table).is_ok());
            if use_edgebreaker {
                attributes = encode_mesh_edgebreaker(mesh, options, &mut out)?;
            } else {
                let header = Header::new(EncoderType::MeshSequential);
                header.write(&mut out)?;
                sequential::encode_mesh(
                    mesh,
                    |id, semantic| options.quantization_bits_for(id, semantic),
                    &mut out,
                )?;
            }
        }
    }

    let output_bytes = out.len();
    let stats = EncodingStats {
        input_points,
        output_bytes,
        attributes,
    };
    Ok((out.into_bytes(), stats))
}

fn encode_mesh_edgebreaker(
    mesh: &crate::geometry::Mesh,
    options: &EncoderOptions,
    out: &mut EncoderBuffer,
) -> Result<Vec<AttributeStats>> {
    let header = Header::new(EncoderType::MeshEdgebreaker);
    header.write(out)?;

    let vertex_order = edgebreaker::write_connectivity(mesh, out)?;
    let table = CornerTable::build(mesh)?;

    let cloud = mesh.points();
    out.write_varint(cloud.attributes().len() as u64)?;
    let mut attribute_stats = Vec::with_capacity(cloud.attributes().len());
    for attribute in cloud.attributes() {
        let reordered = reorder_attribute(attribute, &vertex_order)?;
        let bits = options.quantization_bits_for(attribute.id(), attribute.semantic());
        let prediction = match options.prediction_scheme_for(attribute.id()) {
            Some(PredictionScheme::Delta) => PredictionInput::Delta,
            Some(PredictionScheme::Parallelogram) => {
                PredictionInput::Parallelogram { table: &table, vertex_order: &vertex_order }
            }
            Some(other) => {
                log::warn!(
                    "attribute {}: requested prediction scheme {other:?} is not wired into \
                     this codec, falling back to the dry-run default",
                    attribute.id()
                );
                default_prediction(attribute.semantic(), &table, &vertex_order)
            }
            None => default_prediction(attribute.semantic(), &table, &vertex_order),
        };
        let before = out.len();
        sequential::encoder::write_attribute(&reordered, bits, prediction, out)?;
        attribute_stats.push(AttributeStats {
            attribute_id: attribute.id(),
            semantic: attribute.semantic(),
            num_values: attribute.num_values(),
            bytes: out.len() - before,
        });
    }
    Ok(attribute_stats)
}

/// Parallelogram prediction only needs per-vertex corner adjacency, which
/// this crate's attribute model supports for any semantic; normals and
/// texcoords keep their own dedicated (unwired) schemes reserved, so they
/// default to delta here absent an explicit override (see DESIGN.md).
fn default_prediction<'a>(
    semantic: AttributeSemantic,
    table: &'a CornerTable,
    vertex_order: &'a [PointIndex],
) -> PredictionInput<'a> {
    match semantic {
        AttributeSemantic::Normal | AttributeSemantic::TexCoord => PredictionInput::Delta,
        _ => PredictionInput::Parallelogram { table, vertex_order },
    }
}

/// Builds a direct-mode copy of `attribute` with one value per
/// traversal-order vertex, so EdgeBreaker meshes can reuse the
/// sequential codec's per-attribute pipeline unmodified.
fn reorder_attribute(
    attribute: &crate::attribute::PointAttribute,
    vertex_order: &[PointIndex],
) -> Result<crate::attribute::PointAttribute> {
    let mut reordered = crate::attribute::PointAttribute::new(
        attribute.id(),
        attribute.semantic(),
        attribute.data_type(),
        attribute.num_components(),
        attribute.normalized(),
    )?;
    for &point in vertex_order {
        reordered.push_value(attribute.value_for_point(point))?;
    }
    Ok(reordered)
}
