//! Top-level codec (spec §4.A): frames a point cloud or mesh into a
//! versioned bitstream, choosing EdgeBreaker connectivity coding for
//! manifold meshes and falling back to the sequential codec otherwise.

mod decode;
mod encode;
mod header;
mod options;
mod stats;

pub use decode::decode;
pub use encode::{encode, encode_with_stats};
pub use header::{EncoderType, Header};
pub use options::EncoderOptions;
pub use stats::{AttributeStats, EncodingStats};
