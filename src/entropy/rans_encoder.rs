//! rANS symbol encoder (spec component B).

use crate::entropy::rans_core::encode_step;
use crate::entropy::rans_model::RansModel;
use crate::entropy::RANS_LOWER_BOUND;
use crate::error::{Error, Result};

/// Encodes a sequence of symbols against a fixed [`RansModel`].
///
/// Symbols must be pushed in the *reverse* of the order they should decode
/// in (see the module docs in `entropy/mod.rs` for why). [`Self::finish`]
/// returns the serialized payload: the final 32-bit state (little-endian)
/// followed by the renormalization byte stream in the order the decoder
/// needs to consume it.
pub struct RansSymbolEncoder<'m> {
    model: &'m RansModel,
    state: u32,
    /// Renormalization bytes, pushed in encode (i.e. reverse-symbol) order;
    /// reversed once at the end to land in decode order.
    renorm_bytes: Vec<u8>,
}

impl<'m> RansSymbolEncoder<'m> {
    pub fn new(model: &'m RansModel) -> Self {
        Self {
            model,
            state: RANS_LOWER_BOUND,
            renorm_bytes: Vec::new(),
        }
    }

    /// Encodes one symbol. Callers must present the full symbol sequence
    /// in reverse.
    pub fn encode(&mut self, symbol: u16) -> Result<()> {
        let entry = self.model.entry(symbol);
        if entry.freq == 0 {
            return Err(Error::internal(format!(
                "symbol {symbol} has zero frequency in the active model"
            )));
        }
        self.state = encode_step(
            self.state,
            entry.freq,
            entry.cumul_freq,
            self.model.precision_bits as u32,
            &mut self.renorm_bytes,
        );
        Ok(())
    }

    /// Finishes encoding and returns the serialized payload.
    pub fn finish(self) -> Vec<u8> {
        let mut renorm = self.renorm_bytes;
        renorm.reverse();
        let mut out = Vec::with_capacity(4 + renorm.len());
        out.extend_from_slice(&self.state.to_le_bytes());
        out.extend_from_slice(&renorm);
        out
    }
}
