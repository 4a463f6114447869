//! The frequency/cumulative-frequency table shared by the rANS encoder and
//! decoder, plus the decoder's flat slot-to-symbol lookup.
//!
//! The slot table is grounded in the teacher's `VecFrame` (`ans/model4decoder.rs`):
//! since this codec's precision is capped at 12 bits, a frame never holds
//! more than 4096 slots, so a flat `Vec` lookup (rather than the teacher's
//! Elias-Fano/Rank9Sel alternatives, which exist there to scale to much
//! larger alphabets) is the simplest correct choice.

use crate::bitstream::{DecoderBuffer, EncoderBuffer};
use crate::entropy::ans_util::{
    normalize_frequencies, read_frequency_table, write_frequency_table,
};
use crate::error::{Error, Result};

#[derive(Clone, Copy, Debug)]
pub struct ModelEntry {
    pub freq: u32,
    pub cumul_freq: u32,
}

/// A normalized frequency table for an alphabet of `2^precision_bits`
/// slots, shared by encoder and decoder.
#[derive(Clone, Debug)]
pub struct RansModel {
    pub precision_bits: u8,
    /// Per-symbol (freq, cumulative frequency), length = alphabet_size.
    entries: Vec<ModelEntry>,
    /// Flat slot -> symbol lookup, length = `1 << precision_bits`.
    slot_to_symbol: Vec<u16>,
}

impl RansModel {
    /// Builds a model from raw symbol counts. `precision_bits` must be in
    /// `8..=12` per spec.
    pub fn from_counts(counts: &[u64], precision_bits: u8) -> Result<Self> {
        if !(8..=12).contains(&precision_bits) {
            return Err(Error::InvalidParameter(format!(
                "precision_bits must be 8..=12, got {precision_bits}"
            )));
        }
        let freqs = normalize_frequencies(counts, precision_bits)?;
        Self::from_freqs(&freqs, precision_bits)
    }

    fn from_freqs(freqs: &[u32], precision_bits: u8) -> Result<Self> {
        let frame_size = 1u32 << precision_bits;
        log::debug!(
            "rans model: {} symbols, {precision_bits} precision bits ({frame_size}-slot frame)",
            freqs.len()
        );
        let mut entries = Vec::with_capacity(freqs.len());
        let mut slot_to_symbol = vec![0u16; frame_size as usize];
        let mut cumul = 0u32;
        for (sym, &freq) in freqs.iter().enumerate() {
            entries.push(ModelEntry {
                freq,
                cumul_freq: cumul,
            });
            for slot in cumul..cumul + freq {
                slot_to_symbol[slot as usize] = sym as u16;
            }
            cumul += freq;
        }
        if cumul != frame_size {
            return Err(Error::corrupt(format!(
                "frequency table sums to {cumul}, expected frame size {frame_size}"
            )));
        }
        Ok(Self {
            precision_bits,
            entries,
            slot_to_symbol,
        })
    }

    pub fn alphabet_size(&self) -> usize {
        self.entries.len()
    }

    pub fn frame_size(&self) -> u32 {
        1 << self.precision_bits
    }

    #[inline(always)]
    pub fn entry(&self, symbol: u16) -> ModelEntry {
        self.entries[symbol as usize]
    }

    #[inline(always)]
    pub fn symbol_for_slot(&self, slot: u32) -> (u16, ModelEntry) {
        let sym = self.slot_to_symbol[slot as usize];
        (sym, self.entries[sym as usize])
    }

    pub fn write(&self, out: &mut EncoderBuffer) -> Result<()> {
        out.write_u8(self.precision_bits)?;
        out.write_varint(self.entries.len() as u64)?;
        let freqs: Vec<u32> = self.entries.iter().map(|e| e.freq).collect();
        write_frequency_table(out, &freqs)
    }

    pub fn read(data: &mut DecoderBuffer) -> Result<Self> {
        let precision_bits = data.read_u8()?;
        if !(8..=12).contains(&precision_bits) {
            return Err(Error::corrupt(format!(
                "bitstream precision_bits {precision_bits} out of range"
            )));
        }
        let alphabet_size = data.read_varint()? as usize;
        if alphabet_size as u64 > (1u64 << MAX_ALPHABET_FOR_PRECISION) {
            return Err(Error::corrupt("alphabet size implausibly large"));
        }
        let freqs = read_frequency_table(data, alphabet_size)?;
        Self::from_freqs(&freqs, precision_bits)
    }
}

/// Loose sanity bound used only to reject obviously-corrupt alphabet-size
/// headers before allocating; not a precision constraint.
const MAX_ALPHABET_FOR_PRECISION: u32 = 24;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_roundtrips_through_wire() {
        let counts = [10u64, 0, 5, 3, 0, 0, 2];
        let model = RansModel::from_counts(&counts, 8).unwrap();
        let mut enc = EncoderBuffer::new();
        model.write(&mut enc).unwrap();
        let bytes = enc.into_bytes();
        let mut dec = DecoderBuffer::new(&bytes);
        let model2 = RansModel::read(&mut dec).unwrap();
        assert_eq!(model2.frame_size(), model.frame_size());
        for sym in 0..counts.len() as u16 {
            let a = model.entry(sym);
            let b = model2.entry(sym);
            assert_eq!((a.freq, a.cumul_freq), (b.freq, b.cumul_freq));
        }
    }
}
