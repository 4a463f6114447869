//! Sequential codec (spec §4.G): the point-cloud-always, mesh-fallback
//! path. No connectivity symbols are emitted for the geometry itself —
//! attribute values are quantized and delta-predicted in storage order,
//! one independent rANS stream per component. When encoding a mesh this
//! way, the face list is carried as its own varint block, delta-coded
//! against the previous face's corresponding corner.

use crate::attribute::{encode_octahedral, AttributeSemantic, DataType, PointAttribute, Quantizer, QuantizerMode};
use crate::bitstream::EncoderBuffer;
use crate::entropy::multi_model::{MultiModelEncoder, MultiModelTable};
use crate::error::Result;
use crate::geometry::{CornerTable, Mesh, PointCloud, PointIndex};
use crate::prediction::{self, delta_predict_encode, zigzag, CornerContext, PredictionScheme};

/// Default quantization precision per spec's attribute-semantic table.
pub fn default_quantization_bits(semantic: AttributeSemantic) -> u8 {
    match semantic {
        AttributeSemantic::Position => 14,
        AttributeSemantic::Normal => 10,
        AttributeSemantic::Color => 8,
        AttributeSemantic::TexCoord => 12,
        AttributeSemantic::Generic => 12,
    }
}

/// A candidate predictor for [`write_attribute`] to try. `Delta` is the
/// only option the plain sequential codec ever uses (spec §4.G); the
/// EdgeBreaker path additionally offers `Parallelogram`, dry-run-costed
/// against delta per attribute, with the cheaper one's tag recorded in
/// the stream (spec §4.D).
pub(crate) enum PredictionInput<'a> {
    Delta,
    Parallelogram { table: &'a CornerTable, vertex_order: &'a [PointIndex] },
}

/// Writes one attribute's quantized, predicted, rANS-coded value stream
/// (no point-to-value map). Shared with the EdgeBreaker path, which
/// reorders values into traversal order before calling this.
pub(crate) fn write_attribute(
    attribute: &PointAttribute,
    bits: u8,
    prediction: PredictionInput,
    out: &mut EncoderBuffer,
) -> Result<()> {
    out.write_u8(semantic_tag(attribute.semantic()))?;
    out.write_u8(attribute.data_type().wire_tag())?;
    out.write_u8(attribute.num_components())?;
    out.write_u8(attribute.normalized() as u8)?;
    out.write_u8(attribute.is_direct() as u8)?;
    out.write_varint(attribute.num_values() as u64)?;

    let num_components = attribute.num_components() as usize;
    // Normals are coded as a pair of octahedrally-folded angles (spec
    // §4.C) rather than through the per-component linear quantizer every
    // other attribute uses; everything downstream of this branch (the
    // prediction dry run, the entropy coder) works in terms of
    // `coding_components`, not the attribute's own 3-wide component count.
    let is_octahedral_normal = attribute.semantic() == AttributeSemantic::Normal && num_components == 3;
    out.write_u8(is_octahedral_normal as u8)?;
    out.write_u8(bits)?;

    let (codes, coding_components): (Vec<i32>, usize) = if is_octahedral_normal {
        let codes = attribute
            .all_values()
            .chunks_exact(3)
            .flat_map(|chunk| {
                let (u, v) = encode_octahedral([chunk[0], chunk[1], chunk[2]], bits);
                [u as i32, v as i32]
            })
            .collect();
        (codes, 2)
    } else {
        let quantizer = Quantizer::fit(attribute.all_values(), num_components, bits, QuantizerMode::PerComponent)?;
        for &m in quantizer.min() {
            out.write_f32(m)?;
        }
        for &r in quantizer.range() {
            out.write_f32(r)?;
        }
        let codes = attribute
            .all_values()
            .chunks_exact(num_components)
            .flat_map(|chunk| (0..num_components).map(move |c| quantizer.quantize(c, chunk[c]) as i32))
            .collect();
        (codes, num_components)
    };

    let delta_residuals = delta_predict_encode(&codes, coding_components);
    let (scheme, residuals) = match prediction {
        PredictionInput::Delta => (PredictionScheme::Delta, delta_residuals),
        PredictionInput::Parallelogram { table, vertex_order } => {
            let ctx = CornerContext::build(table, vertex_order);
            let para_residuals =
                prediction::parallelogram_residuals(&codes, coding_components, table, vertex_order, &ctx);
            if residual_cost(&para_residuals) < residual_cost(&delta_residuals) {
                (PredictionScheme::Parallelogram, para_residuals)
            } else {
                log::warn!(
                    "attribute {}: parallelogram dry run lost to delta, falling back",
                    attribute.id()
                );
                (PredictionScheme::Delta, delta_residuals)
            }
        }
    };
    log::debug!("attribute {}: prediction scheme {:?} selected", attribute.id(), scheme);
    out.write_u8(scheme.wire_tag())?;

    let mut counts = vec![Vec::new(); coding_components];
    let mut symbols = vec![Vec::new(); coding_components];
    for (component, counts_c) in counts.iter_mut().enumerate() {
        let values_c: Vec<u16> = residuals
            .iter()
            .skip(component)
            .step_by(coding_components)
            .map(|&r| zigzag(r as i64) as u16)
            .collect();
        let max_symbol = values_c.iter().copied().max().unwrap_or(0) as usize;
        let mut c = vec![1u64; max_symbol + 1];
        for &s in &values_c {
            c[s as usize] += 1;
        }
        *counts_c = c;
        symbols[component] = values_c;
    }

    let table = MultiModelTable::from_counts(&counts, 12)?;
    table.write(out)?;
    let mut mm = MultiModelEncoder::new(&table);
    for (component, values_c) in symbols.iter().enumerate() {
        for &s in values_c {
            mm.push(component, s)?;
        }
    }
    mm.finish(out)?;
    Ok(())
}

/// A log2 mock writer: estimates entropy-coded size as `floor(log2(x)) + 1`
/// bits per zig-zagged residual (0 costs 1 bit), without running the rANS
/// coder. Lets [`write_attribute`] pick between prediction schemes by dry
/// run instead of encoding both and keeping the smaller.
fn residual_cost(residuals: &[i32]) -> u64 {
    residuals
        .iter()
        .map(|&r| {
            let z = zigzag(r as i64);
            (u64::BITS - z.leading_zeros()).max(1) as u64
        })
        .sum()
}

fn semantic_tag(semantic: AttributeSemantic) -> u8 {
    match semantic {
        AttributeSemantic::Position => 0,
        AttributeSemantic::Normal => 1,
        AttributeSemantic::Color => 2,
        AttributeSemantic::TexCoord => 3,
        AttributeSemantic::Generic => 4,
    }
}

pub fn semantic_from_tag(tag: u8) -> Option<AttributeSemantic> {
    Some(match tag {
        0 => AttributeSemantic::Position,
        1 => AttributeSemantic::Normal,
        2 => AttributeSemantic::Color,
        3 => AttributeSemantic::TexCoord,
        4 => AttributeSemantic::Generic,
        _ => return None,
    })
}

/// Encodes a point cloud's attributes (no connectivity). `bits_for`
/// overrides the default quantization precision per attribute id, when
/// present.
pub fn encode_point_cloud(
    cloud: &PointCloud,
    bits_for: impl Fn(u32, AttributeSemantic) -> u8,
    out: &mut EncoderBuffer,
) -> Result<()> {
    out.write_varint(cloud.num_points() as u64)?;
    out.write_varint(cloud.attributes().len() as u64)?;
    for attribute in cloud.attributes() {
        let bits = bits_for(attribute.id(), attribute.semantic());
        write_attribute_with_map(attribute, bits, cloud.num_points(), out)?;
    }
    Ok(())
}

fn write_attribute_with_map(
    attribute: &PointAttribute,
    bits: u8,
    num_points: usize,
    out: &mut EncoderBuffer,
) -> Result<()> {
    write_attribute(attribute, bits, PredictionInput::Delta, out)?;
    if !attribute.is_direct() {
        for point in 0..num_points {
            let idx = attribute.value_index_for_point(crate::geometry::PointIndex::from(point));
            out.write_varint(idx.as_usize() as u64)?;
        }
    }
    Ok(())
}

/// Encodes a mesh using the sequential codec: attributes as above, plus a
/// varint-delta-coded face block (spec §4.G).
pub fn encode_mesh(
    mesh: &Mesh,
    bits_for: impl Fn(u32, AttributeSemantic) -> u8,
    out: &mut EncoderBuffer,
) -> Result<()> {
    encode_point_cloud(mesh.points(), bits_for, out)?;
    out.write_varint(mesh.num_faces() as u64)?;
    let mut previous = [0i64; 3];
    for (row, face) in mesh.faces().iter().enumerate() {
        for k in 0..3 {
            let v = face.get(k).0 as i64;
            let delta = if row == 0 { v } else { v - previous[k] };
            out.write_varint(zigzag(delta))?;
            previous[k] = v;
        }
    }
    Ok(())
}
