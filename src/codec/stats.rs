//! Compression-stats readback (spec's "supplemented features"):
//! informational only, never consulted during decode.

use crate::attribute::AttributeSemantic;

/// Size breakdown for one attribute's encoded stream.
#[derive(Clone, Debug)]
pub struct AttributeStats {
    pub attribute_id: u32,
    pub semantic: AttributeSemantic,
    pub num_values: usize,
    pub bytes: usize,
}

impl AttributeStats {
    pub fn bits_per_value(&self) -> f64 {
        if self.num_values == 0 {
            0.0
        } else {
            (self.bytes * 8) as f64 / self.num_values as f64
        }
    }
}

/// Returned alongside the encoded buffer by [`super::encode_with_stats`].
#[derive(Clone, Debug)]
pub struct EncodingStats {
    pub input_points: usize,
    pub output_bytes: usize,
    pub attributes: Vec<AttributeStats>,
}
