//! Adaptive binary rANS bit coder and the folded-32 coder built on top of
//! it, for attribute bits (crease flags, sign bits, escape flags) and wide
//! integer residuals respectively.
//!
//! The adaptive coder keeps a single online-updated probability per
//! context (count-of-zeros over a sliding effective window, represented as
//! a 12-bit fixed-point fraction) and reuses the same two-subinterval
//! renormalization primitives as the symbol coder: a bit is just a
//! two-symbol alphabet whose frequencies change after every call instead
//! of being fixed up front.

use crate::entropy::rans_core::{decode_slot, decode_step};
use crate::error::Result;

/// Precision of the adaptive bit model, in bits. The probability of a
/// zero bit is tracked as a fixed-point fraction of `1 << BIT_PROB_BITS`.
pub const BIT_PROB_BITS: u32 = 12;
const BIT_PROB_MAX: u32 = 1 << BIT_PROB_BITS;
/// Adaptation speed: larger values adapt more slowly. Matches the
/// conservative update rate used by binary arithmetic coders for sparse
/// flag streams (crease flags, signs).
const BIT_MODEL_RATE: u32 = 5;

/// A single adaptive binary probability estimate.
#[derive(Clone, Copy, Debug)]
pub struct AdaptiveBitModel {
    /// Probability of a zero bit, scaled to `[1, BIT_PROB_MAX - 1]`.
    prob_zero: u32,
}

impl Default for AdaptiveBitModel {
    fn default() -> Self {
        Self {
            prob_zero: BIT_PROB_MAX / 2,
        }
    }
}

impl AdaptiveBitModel {
    fn update(&mut self, bit: bool) {
        if bit {
            self.prob_zero -= self.prob_zero >> BIT_MODEL_RATE;
        } else {
            self.prob_zero += (BIT_PROB_MAX - self.prob_zero) >> BIT_MODEL_RATE;
        }
        self.prob_zero = self.prob_zero.clamp(1, BIT_PROB_MAX - 1);
    }

    fn freq_cumul(&self, bit: bool) -> (u32, u32) {
        if bit {
            (BIT_PROB_MAX - self.prob_zero, self.prob_zero)
        } else {
            (self.prob_zero, 0)
        }
    }
}

/// Encodes a sequence of bits against one adaptively-updated model.
///
/// As with [`super::rans_encoder::RansSymbolEncoder`], bits must be fed in
/// the reverse of decode order; the model update is symmetric (it only
/// depends on the bit value, not direction) so running it forward while
/// buffering, then encoding in reverse, would desync the model from the
/// decoder. Instead [`Self::encode_bits`] takes the whole sequence in
/// natural order and internally replays the model forward before encoding
/// backward, so callers never have to reason about this.
pub struct AdaptiveBitEncoder {
    state: u32,
    renorm_bytes: Vec<u8>,
}

impl AdaptiveBitEncoder {
    pub fn new() -> Self {
        Self {
            state: crate::entropy::RANS_LOWER_BOUND,
            renorm_bytes: Vec::new(),
        }
    }

    /// Encodes `bits` (natural, decode order) against `model`, which is
    /// mutated to its state after all bits as a side effect (mirroring
    /// what the decoder's copy will look like after consuming them).
    pub fn encode_bits(&mut self, bits: &[bool], model: &mut AdaptiveBitModel) {
        // Replay the adaptation forward to snapshot the model before each
        // bit, then encode in reverse using those snapshots.
        let mut snapshots = Vec::with_capacity(bits.len());
        for &bit in bits {
            snapshots.push(*model);
            model.update(bit);
        }
        for (&bit, snapshot) in bits.iter().zip(snapshots.iter()).rev() {
            let (freq, cumul) = snapshot.freq_cumul(bit);
            self.state = crate::entropy::rans_core::encode_step(
                self.state,
                freq,
                cumul,
                BIT_PROB_BITS,
                &mut self.renorm_bytes,
            );
        }
    }

    pub fn finish(self) -> Vec<u8> {
        let mut renorm = self.renorm_bytes;
        renorm.reverse();
        let mut out = Vec::with_capacity(4 + renorm.len());
        out.extend_from_slice(&self.state.to_le_bytes());
        out.extend_from_slice(&renorm);
        out
    }
}

impl Default for AdaptiveBitEncoder {
    fn default() -> Self {
        Self::new()
    }
}

pub struct AdaptiveBitDecoder<'d> {
    state: u32,
    stream: &'d [u8],
    cursor: usize,
}

impl<'d> AdaptiveBitDecoder<'d> {
    pub fn new(payload: &'d [u8]) -> Result<Self> {
        if payload.len() < 4 {
            return Err(crate::error::Error::underflow(
                "adaptive bit payload shorter than the state prefix",
            ));
        }
        let state = u32::from_le_bytes([payload[0], payload[1], payload[2], payload[3]]);
        Ok(Self {
            state,
            stream: payload,
            cursor: 4,
        })
    }

    pub fn decode_bit(&mut self, model: &mut AdaptiveBitModel) -> Result<bool> {
        let slot = decode_slot(self.state, BIT_PROB_BITS);
        let bit = slot >= model.prob_zero;
        let (freq, cumul) = model.freq_cumul(bit);
        self.state = decode_step(
            self.state,
            freq,
            cumul,
            slot,
            BIT_PROB_BITS,
            self.stream,
            &mut self.cursor,
        )?;
        model.update(bit);
        Ok(bit)
    }
}

/// Splits a (possibly wide) unsigned integer into a 4-bit head, entropy
/// coded through the ordinary rANS symbol coder over a 16-symbol alphabet,
/// and — for values that don't fit in the literal range — a fixed-width
/// tail written with the direct bit coder.
///
/// Values `0..=14` are carried entirely in the head as literals. The value
/// `15` is reserved as an escape: it is followed by a `tail_bits`-wide
/// direct-coded field carrying the full value. `tail_bits` must be chosen
/// by the caller wide enough for the data (e.g. from an attribute's
/// quantization bit depth); values that don't fit are a caller error, not
/// a coder concern.
pub const FOLD_ESCAPE: u16 = 15;
pub const FOLD_HEAD_ALPHABET: usize = 16;

pub fn fold_value(value: u32) -> (u16, Option<u32>) {
    if (value as u64) < FOLD_ESCAPE as u64 {
        (value as u16, None)
    } else {
        (FOLD_ESCAPE, Some(value))
    }
}

pub fn unfold_value(head: u16, tail: Option<u32>) -> u32 {
    if head == FOLD_ESCAPE {
        tail.unwrap_or(0)
    } else {
        head as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adaptive_bit_roundtrip_with_skew() {
        let bits: Vec<bool> = (0..200).map(|i| i % 7 != 0).collect();
        let mut model_enc = AdaptiveBitModel::default();
        let mut enc = AdaptiveBitEncoder::new();
        enc.encode_bits(&bits, &mut model_enc);
        let payload = enc.finish();

        let mut model_dec = AdaptiveBitModel::default();
        let mut dec = AdaptiveBitDecoder::new(&payload).unwrap();
        let decoded: Vec<bool> = (0..bits.len())
            .map(|_| dec.decode_bit(&mut model_dec).unwrap())
            .collect();
        assert_eq!(decoded, bits);
    }

    #[test]
    fn fold_roundtrips_small_and_escaped_values() {
        for v in [0u32, 1, 14, 15, 16, 4095, u32::MAX] {
            let (head, tail) = fold_value(v);
            assert_eq!(unfold_value(head, tail), v);
        }
    }
}
