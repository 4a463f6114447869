//! Prediction schemes (spec §4.D): each turns a sequence of quantized
//! attribute values into signed residuals (and back), using whatever
//! context (previous value, neighboring corners, decoded positions) the
//! scheme needs. Residuals are zig-zag mapped to unsigned symbols before
//! entropy coding.

mod corner_context;
mod delta;
mod multi_parallelogram;
mod normal;
mod parallelogram;
mod texcoord;
mod zigzag;

pub use delta::{delta_predict_decode, delta_predict_encode};
pub use multi_parallelogram::{multi_parallelogram_decode, multi_parallelogram_encode};
pub use normal::{geometric_normal_predict_decode, geometric_normal_predict_encode};
pub use parallelogram::{parallelogram_predict, ParallelogramContext};
pub use texcoord::{texcoord_predict_decode, texcoord_predict_encode, TexCoordContext};
pub use zigzag::{unzigzag, zigzag};

pub(crate) use corner_context::{parallelogram_reconstruct, parallelogram_residuals, CornerContext};

/// Which prediction scheme an attribute was encoded with (spec §4.D,
/// recorded in the per-attribute header byte per spec §4.F step 6).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PredictionScheme {
    Delta,
    Parallelogram,
    ConstrainedMultiParallelogram,
    TexCoordPortable,
    GeometricNormal,
}

impl PredictionScheme {
    pub fn wire_tag(self) -> u8 {
        match self {
            PredictionScheme::Delta => 0,
            PredictionScheme::Parallelogram => 1,
            PredictionScheme::ConstrainedMultiParallelogram => 2,
            PredictionScheme::TexCoordPortable => 3,
            PredictionScheme::GeometricNormal => 4,
        }
    }

    pub fn from_wire_tag(tag: u8) -> Option<Self> {
        Some(match tag {
            0 => PredictionScheme::Delta,
            1 => PredictionScheme::Parallelogram,
            2 => PredictionScheme::ConstrainedMultiParallelogram,
            3 => PredictionScheme::TexCoordPortable,
            4 => PredictionScheme::GeometricNormal,
            _ => return None,
        })
    }
}
