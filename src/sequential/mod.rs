//! Sequential attribute codec (spec §4.G): used for every point cloud,
//! and as the mesh fallback when EdgeBreaker isn't applicable (e.g. a
//! non-manifold or otherwise ineligible mesh). Carries no connectivity
//! symbols of its own; a mesh encoded this way ships its face list as a
//! plain varint-delta-coded block alongside the same per-attribute
//! quantize-predict-entropy-code pipeline used for point clouds.

pub mod decoder;
pub mod encoder;

pub use decoder::{decode_mesh, decode_point_cloud};
pub use encoder::{default_quantization_bits, encode_mesh, encode_point_cloud};
