//! Entropy coders (spec component B): a range-ANS symbol coder with an
//! explicit frequency-table header, an adaptive binary rANS bit coder with
//! a folded-32 variant for wide integers, and a model-free direct bit coder.
//!
//! The symbol coder's renormalization follows the classic byte-oriented
//! rANS construction (state base `2^32`, renormalization threshold
//! `2^16`): symbols are fed to the encoder in the reverse of the order they
//! should decode in, each call may flush low bytes of the state to keep it
//! bounded, and the final register is flushed last. Because of how the
//! renormalization interacts with that reverse traversal, the bytes
//! produced during the symbol loop land in the stream in exactly the
//! reverse of the order they were emitted — see [`rans_encoder`] for the
//! construction this crate uses to get that order right without giving the
//! whole byte buffer special treatment.

pub mod ans_util;
pub mod direct_bit_coder;
pub mod multi_model;
pub mod rans_bit_coder;
pub mod rans_core;
pub mod rans_decoder;
pub mod rans_encoder;
pub mod rans_model;

pub use rans_decoder::RansSymbolDecoder;
pub use rans_encoder::RansSymbolEncoder;
pub use rans_model::RansModel;

/// Base of the rANS state (the state is represented as a `u32`).
pub const RANS_BASE_BITS: u32 = 32;

/// Renormalization lower bound: the state is always kept `>= 2^16` after
/// decoding a symbol, and is shrunk below `2^16 * 256` before encoding one.
pub const RANS_LOWER_BOUND: u32 = 1 << 16;

/// Largest alphabet size (`2^k`) the symbol coder supports, per spec.
pub const MAX_ALPHABET_LOG2: u32 = 12;
