//! A lossy compression codec for triangle meshes and point clouds,
//! modeled on EdgeBreaker connectivity coding over a corner table, rANS
//! entropy coding of both connectivity symbols and attribute residuals,
//! and per-attribute quantization with delta prediction.
//!
//! The public surface is [`encode`]/[`decode`] plus [`EncoderOptions`]
//! for the knobs that control quantization precision and the
//! EdgeBreaker/sequential connectivity tradeoff. Everything else —
//! bitstream framing, entropy coding, attribute transforms, the corner
//! table — is exposed for testing and benchmarking but isn't meant to be
//! assembled by hand; [`encode`] already does that.

pub mod attribute;
pub mod bitstream;
mod codec;
pub mod edgebreaker;
pub mod entropy;
mod error;
pub mod geometry;
pub mod prediction;
pub mod sequential;

pub use codec::{decode, encode, encode_with_stats, AttributeStats, EncoderOptions, EncoderType, EncodingStats};
pub use error::{Error, Result};
pub use geometry::Geometry;
