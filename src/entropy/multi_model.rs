//! A per-component table of independent rANS models, for attributes whose
//! components are not expected to share a distribution (e.g. separate
//! streams per vector component of a prediction residual). Each component
//! gets its own frequency table and its own rANS-coded segment; segments
//! are concatenated with a varint length prefix so a decoder can carve the
//! stream back up without decoding neighboring components first.

use crate::bitstream::{DecoderBuffer, EncoderBuffer};
use crate::entropy::rans_decoder::RansSymbolDecoder;
use crate::entropy::rans_encoder::RansSymbolEncoder;
use crate::entropy::rans_model::RansModel;
use crate::error::{Error, Result};

/// One [`RansModel`] per component.
pub struct MultiModelTable {
    models: Vec<RansModel>,
}

impl MultiModelTable {
    /// Builds one model per entry of `counts_per_model`, all sharing the
    /// same `precision_bits`.
    pub fn from_counts(counts_per_model: &[Vec<u64>], precision_bits: u8) -> Result<Self> {
        let models = counts_per_model
            .iter()
            .map(|counts| RansModel::from_counts(counts, precision_bits))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { models })
    }

    pub fn component_count(&self) -> usize {
        self.models.len()
    }

    pub fn model(&self, component: usize) -> Result<&RansModel> {
        self.models
            .get(component)
            .ok_or_else(|| Error::internal(format!("no model registered for component {component}")))
    }

    pub fn write(&self, out: &mut EncoderBuffer) -> Result<()> {
        out.write_varint(self.models.len() as u64)?;
        for model in &self.models {
            model.write(out)?;
        }
        Ok(())
    }

    pub fn read(data: &mut DecoderBuffer) -> Result<Self> {
        let count = data.read_varint()? as usize;
        let models = (0..count)
            .map(|_| RansModel::read(data))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { models })
    }
}

/// Buffers per-component symbol streams (in natural order) and emits them,
/// each reversed internally and rANS-coded against its own model, as
/// length-prefixed segments.
pub struct MultiModelEncoder<'t> {
    table: &'t MultiModelTable,
    buffers: Vec<Vec<u16>>,
}

impl<'t> MultiModelEncoder<'t> {
    pub fn new(table: &'t MultiModelTable) -> Self {
        let buffers = vec![Vec::new(); table.component_count()];
        Self { table, buffers }
    }

    pub fn push(&mut self, component: usize, symbol: u16) -> Result<()> {
        let buf = self
            .buffers
            .get_mut(component)
            .ok_or_else(|| Error::internal(format!("no buffer for component {component}")))?;
        buf.push(symbol);
        Ok(())
    }

    pub fn finish(self, out: &mut EncoderBuffer) -> Result<()> {
        for (component, symbols) in self.buffers.iter().enumerate() {
            let model = self.table.model(component)?;
            let mut enc = RansSymbolEncoder::new(model);
            for &s in symbols.iter().rev() {
                enc.encode(s)?;
            }
            let payload = enc.finish();
            out.write_varint(payload.len() as u64)?;
            out.write_bytes(&payload)?;
        }
        Ok(())
    }
}

/// Reads back the segments written by [`MultiModelEncoder`], exposing one
/// [`RansSymbolDecoder`] per component.
pub struct MultiModelDecoder<'t> {
    table: &'t MultiModelTable,
    segments: Vec<Vec<u8>>,
}

impl<'t> MultiModelDecoder<'t> {
    pub fn new(table: &'t MultiModelTable, data: &mut DecoderBuffer) -> Result<Self> {
        let mut segments = Vec::with_capacity(table.component_count());
        for _ in 0..table.component_count() {
            let len = data.read_varint()? as usize;
            segments.push(data.read_bytes(len)?.to_vec());
        }
        Ok(Self { table, segments })
    }

    pub fn decoder(&self, component: usize) -> Result<RansSymbolDecoder<'_, '_>> {
        let model = self.table.model(component)?;
        let payload = self
            .segments
            .get(component)
            .ok_or_else(|| Error::internal(format!("no segment for component {component}")))?;
        RansSymbolDecoder::new(model, payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn per_component_streams_roundtrip_independently() {
        let counts = vec![vec![5u64, 1, 3], vec![2u64, 2, 2, 2]];
        let table = MultiModelTable::from_counts(&counts, 8).unwrap();

        let mut enc = MultiModelEncoder::new(&table);
        let comp0 = [0u16, 1, 2, 0, 0];
        let comp1 = [3u16, 2, 1, 0];
        for &s in &comp0 {
            enc.push(0, s).unwrap();
        }
        for &s in &comp1 {
            enc.push(1, s).unwrap();
        }
        let mut out = EncoderBuffer::new();
        enc.finish(&mut out).unwrap();
        let bytes = out.into_bytes();

        let mut data = DecoderBuffer::new(&bytes);
        let dec = MultiModelDecoder::new(&table, &mut data).unwrap();

        let mut d0 = dec.decoder(0).unwrap();
        let got0: Vec<u16> = (0..comp0.len()).map(|_| d0.decode().unwrap()).collect();
        assert_eq!(got0, comp0);

        let mut d1 = dec.decoder(1).unwrap();
        let got1: Vec<u16> = (0..comp1.len()).map(|_| d1.decode().unwrap()).collect();
        assert_eq!(got1, comp1);
    }
}
