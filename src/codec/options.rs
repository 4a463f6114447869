//! Encoder-facing knobs (spec §4.A): per-attribute quantization precision
//! and prediction scheme overrides, plus the encode/decode speed hints
//! that pick between EdgeBreaker and the sequential fallback.

use std::collections::HashMap;

use crate::attribute::AttributeSemantic;
use crate::prediction::PredictionScheme;
use crate::sequential::default_quantization_bits;

/// 0 favors smaller output, 10 favors faster encode/decode. Only
/// `encoding_speed` currently affects behavior: a value of 10 skips
/// EdgeBreaker entirely and always uses the sequential codec.
#[derive(Clone, Copy, Debug)]
pub struct EncoderOptions {
    pub encoding_speed: u8,
    pub decoding_speed: u8,
    quantization_bits: HashMap<u32, u8>,
    prediction_scheme: HashMap<u32, PredictionScheme>,
}

impl Default for EncoderOptions {
    fn default() -> Self {
        Self {
            encoding_speed: 5,
            decoding_speed: 5,
            quantization_bits: HashMap::new(),
            prediction_scheme: HashMap::new(),
        }
    }
}

impl EncoderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_encoding_speed(mut self, speed: u8) -> Self {
        self.encoding_speed = speed;
        self
    }

    pub fn with_quantization_bits(mut self, attribute_id: u32, bits: u8) -> Self {
        self.quantization_bits.insert(attribute_id, bits);
        self
    }

    pub fn with_prediction_scheme(mut self, attribute_id: u32, scheme: PredictionScheme) -> Self {
        self.prediction_scheme.insert(attribute_id, scheme);
        self
    }

    /// Resolves quantization precision for an attribute: an explicit
    /// per-id override if one was set, otherwise the semantic default.
    pub fn quantization_bits_for(&self, attribute_id: u32, semantic: AttributeSemantic) -> u8 {
        self.quantization_bits
            .get(&attribute_id)
            .copied()
            .unwrap_or_else(|| default_quantization_bits(semantic))
    }

    pub fn prediction_scheme_for(&self, attribute_id: u32) -> Option<PredictionScheme> {
        self.prediction_scheme.get(&attribute_id).copied()
    }

    /// `encoding_speed >= 9` requests the fastest, simplest path: skip
    /// EdgeBreaker's corner-table traversal and go straight to the
    /// sequential codec even for manifold meshes.
    pub fn prefer_sequential(&self) -> bool {
        self.encoding_speed >= 9
    }
}
