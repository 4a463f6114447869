//! rANS symbol decoder, the inverse of [`super::rans_encoder::RansSymbolEncoder`].

use crate::entropy::rans_core::{decode_slot, decode_step};
use crate::entropy::rans_model::RansModel;
use crate::error::{Error, Result};

pub struct RansSymbolDecoder<'m, 'd> {
    model: &'m RansModel,
    state: u32,
    stream: &'d [u8],
    cursor: usize,
}

impl<'m, 'd> RansSymbolDecoder<'m, 'd> {
    /// `payload` is the byte blob produced by
    /// [`super::rans_encoder::RansSymbolEncoder::finish`]: a 4-byte
    /// little-endian initial state followed by the renormalization stream.
    pub fn new(model: &'m RansModel, payload: &'d [u8]) -> Result<Self> {
        if payload.len() < 4 {
            return Err(Error::underflow("rANS payload shorter than the state prefix"));
        }
        let state = u32::from_le_bytes([payload[0], payload[1], payload[2], payload[3]]);
        Ok(Self {
            model,
            state,
            stream: payload,
            cursor: 4,
        })
    }

    pub fn decode(&mut self) -> Result<u16> {
        let precision = self.model.precision_bits as u32;
        let slot = decode_slot(self.state, precision);
        let (symbol, entry) = self.model.symbol_for_slot(slot);

        self.state = decode_step(
            self.state,
            entry.freq,
            entry.cumul_freq,
            slot,
            precision,
            self.stream,
            &mut self.cursor,
        )?;
        Ok(symbol)
    }

    /// Byte offset just past the last byte this decoder has consumed.
    pub fn bytes_consumed(&self) -> usize {
        self.cursor
    }
}
