//! Inverse of [`super::encoder`]: reads back quantized, delta-predicted
//! attribute streams and dequantizes them, plus the mesh fallback's
//! varint-delta-coded face block.

use crate::attribute::{decode_octahedral, DataType, PointAttribute, Quantizer, QuantizerMode};
use crate::bitstream::DecoderBuffer;
use crate::entropy::multi_model::{MultiModelDecoder, MultiModelTable};
use crate::error::{Error, Result};
use crate::geometry::{CornerTable, Face, Mesh, PointCloud, PointIndex};
use crate::prediction::{self, delta_predict_decode, unzigzag, CornerContext, PredictionScheme};
use crate::sequential::encoder::semantic_from_tag;

/// Corner-table context a caller can supply when the attribute being
/// read might have been parallelogram-predicted (i.e. it was written by
/// the EdgeBreaker path). The plain sequential codec always passes
/// `None`, since it only ever writes delta-predicted attributes.
pub(crate) struct CornerData<'a> {
    pub table: &'a CornerTable,
    pub vertex_order: &'a [PointIndex],
}

/// Reads back one attribute written by [`super::encoder::write_attribute`].
/// `num_points` is only consulted when the attribute turns out to carry a
/// point-to-value map.
pub(crate) fn read_attribute(
    data: &mut DecoderBuffer,
    num_points: usize,
    corner_data: Option<CornerData>,
) -> Result<PointAttribute> {
    let semantic_tag = data.read_u8()?;
    let semantic = semantic_from_tag(semantic_tag)
        .ok_or_else(|| Error::corrupt("unknown attribute semantic tag"))?;
    let data_type_tag = data.read_u8()?;
    let data_type = DataType::from_wire_tag(data_type_tag)
        .ok_or_else(|| Error::corrupt("unknown attribute data type tag"))?;
    let num_components = data.read_u8()?;
    let normalized = data.read_u8()? != 0;
    let is_direct = data.read_u8()? != 0;
    let num_values = data.read_varint()? as usize;

    let nc = num_components as usize;
    let is_octahedral_normal = data.read_u8()? != 0;
    let bits = data.read_u8()?;

    let quantizer = if is_octahedral_normal {
        None
    } else {
        let mut min = Vec::with_capacity(nc);
        for _ in 0..nc {
            min.push(data.read_f32()?);
        }
        let mut range = Vec::with_capacity(nc);
        for _ in 0..nc {
            range.push(data.read_f32()?);
        }
        Some(Quantizer::from_parts(QuantizerMode::PerComponent, bits, min, range))
    };
    let coding_components = if is_octahedral_normal { 2 } else { nc };

    let scheme_tag = data.read_u8()?;
    let scheme = PredictionScheme::from_wire_tag(scheme_tag)
        .ok_or_else(|| Error::corrupt("unknown prediction scheme tag"))?;

    let table = MultiModelTable::read(data)?;
    if table.component_count() != coding_components {
        return Err(Error::corrupt("attribute component count mismatch with model table"));
    }
    let mm = MultiModelDecoder::new(&table, data)?;

    let mut residuals = vec![0i32; num_values * coding_components];
    for component in 0..coding_components {
        let mut decoder = mm.decoder(component)?;
        for row in 0..num_values {
            let symbol = decoder.decode()?;
            residuals[row * coding_components + component] = unzigzag(symbol as u64) as i32;
        }
    }
    let codes = match scheme {
        PredictionScheme::Delta => delta_predict_decode(&residuals, coding_components),
        PredictionScheme::Parallelogram => {
            let corner_data = corner_data
                .ok_or_else(|| Error::corrupt("parallelogram-predicted attribute outside an EdgeBreaker mesh"))?;
            let ctx = CornerContext::build(corner_data.table, corner_data.vertex_order);
            prediction::parallelogram_reconstruct(
                &residuals,
                coding_components,
                corner_data.table,
                corner_data.vertex_order,
                &ctx,
            )
        }
        PredictionScheme::ConstrainedMultiParallelogram
        | PredictionScheme::TexCoordPortable
        | PredictionScheme::GeometricNormal => {
            return Err(Error::corrupt("prediction scheme not supported by this codec"));
        }
    };

    let mut attribute = PointAttribute::new(0, semantic, data_type, num_components, normalized)?;
    if is_octahedral_normal {
        for row in 0..num_values {
            let u = codes[row * 2] as u32;
            let v = codes[row * 2 + 1] as u32;
            let normal = decode_octahedral((u, v), bits);
            attribute.push_value(&normal)?;
        }
    } else {
        let quantizer = quantizer.expect("non-octahedral attribute always carries a quantizer");
        for row in 0..num_values {
            let mut components = Vec::with_capacity(nc);
            for c in 0..nc {
                components.push(quantizer.dequantize(c, codes[row * nc + c] as u32));
            }
            attribute.push_value(&components)?;
        }
    }

    if !is_direct {
        let mut map = Vec::with_capacity(num_points);
        for _ in 0..num_points {
            map.push(crate::geometry::AttributeValueIndex::from(data.read_varint()? as usize));
        }
        attribute.set_value_map(map)?;
    }

    Ok(attribute)
}

pub fn decode_point_cloud(data: &mut DecoderBuffer) -> Result<PointCloud> {
    let num_points = data.read_varint()? as usize;
    let num_attributes = data.read_varint()? as usize;
    let mut cloud = PointCloud::new();
    cloud.set_num_points(num_points);
    for _ in 0..num_attributes {
        let attribute = read_attribute(data, num_points, None)?;
        cloud.add_attribute(attribute);
    }
    Ok(cloud)
}

pub fn decode_mesh(data: &mut DecoderBuffer) -> Result<Mesh> {
    let cloud = decode_point_cloud(data)?;
    let num_faces = data.read_varint()? as usize;
    let mut mesh = Mesh::new();
    *mesh.points_mut() = cloud;
    let mut previous = [0i64; 3];
    for row in 0..num_faces {
        let mut verts = [PointIndex::from(0usize); 3];
        for (k, vert) in verts.iter_mut().enumerate() {
            let delta = unzigzag(data.read_varint()?);
            let v = if row == 0 { delta } else { previous[k] + delta };
            previous[k] = v;
            *vert = PointIndex::from(v as usize);
        }
        mesh.push_face(Face::new(verts[0], verts[1], verts[2]));
    }
    Ok(mesh)
}
