use byteorder::{ByteOrder, LittleEndian};

use crate::bitstream::varint::read_varint;
use crate::error::{Error, Result};

/// State of the active bit-reading region, if any.
struct BitMode {
    /// Total number of bits available in the bit region.
    total_bits: usize,
    /// Number of bits already consumed.
    consumed_bits: usize,
    /// Byte offset (into the decoder's own buffer) where the bit region
    /// starts, used by `end_bit_decoding` to skip past it.
    start_pos: usize,
}

/// A position-advancing reader over a borrowed byte slice, with the same
/// bit-mode sublayer as [`super::EncoderBuffer`].
pub struct DecoderBuffer<'a> {
    data: &'a [u8],
    pos: usize,
    bit_mode: Option<BitMode>,
}

impl<'a> DecoderBuffer<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            pos: 0,
            bit_mode: None,
        }
    }

    pub fn decoded_size(&self) -> usize {
        self.data.len()
    }

    pub fn remaining_size(&self) -> usize {
        self.data.len() - self.pos
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn set_position(&mut self, pos: usize) -> Result<()> {
        if pos > self.data.len() {
            return Err(Error::underflow("set_position beyond end of buffer"));
        }
        self.pos = pos;
        Ok(())
    }

    fn check_byte_mode(&self) -> Result<()> {
        if self.bit_mode.is_some() {
            return Err(Error::internal(
                "cannot perform a byte-mode read while bit decoding is active",
            ));
        }
        Ok(())
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        self.check_byte_mode()?;
        if self.pos + n > self.data.len() {
            return Err(Error::underflow(format!(
                "need {n} bytes at position {}, only {} remain",
                self.pos,
                self.remaining_size()
            )));
        }
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        Ok(LittleEndian::read_u16(self.take(2)?))
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        Ok(LittleEndian::read_u32(self.take(4)?))
    }

    pub fn read_u64(&mut self) -> Result<u64> {
        Ok(LittleEndian::read_u64(self.take(8)?))
    }

    pub fn read_f32(&mut self) -> Result<f32> {
        Ok(LittleEndian::read_f32(self.take(4)?))
    }

    pub fn read_f64(&mut self) -> Result<f64> {
        Ok(LittleEndian::read_f64(self.take(8)?))
    }

    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8]> {
        self.take(n)
    }

    pub fn read_varint(&mut self) -> Result<u64> {
        self.check_byte_mode()?;
        read_varint(self.data, &mut self.pos)
    }

    /// Reads a NUL-terminated string.
    pub fn read_cstr(&mut self) -> Result<String> {
        self.check_byte_mode()?;
        let start = self.pos;
        loop {
            let b = *self
                .data
                .get(self.pos)
                .ok_or_else(|| Error::underflow("unterminated string"))?;
            self.pos += 1;
            if b == 0 {
                break;
            }
        }
        String::from_utf8(self.data[start..self.pos - 1].to_vec())
            .map_err(|e| Error::corrupt(format!("string is not valid utf-8: {e}")))
    }

    /// Enters bit mode. When `encode_size_prefix` is set, reads the 4-byte
    /// little-endian length prefix written by `start_bit_encoding`;
    /// otherwise the bit region extends to the end of the buffer.
    pub fn start_bit_decoding(&mut self, encode_size_prefix: bool) -> Result<()> {
        if self.bit_mode.is_some() {
            return Err(Error::internal("bit decoding is already active"));
        }
        let byte_len = if encode_size_prefix {
            self.read_u32()? as usize
        } else {
            self.remaining_size()
        };
        if self.pos + byte_len > self.data.len() {
            return Err(Error::underflow("bit region exceeds buffer"));
        }
        self.bit_mode = Some(BitMode {
            total_bits: byte_len * 8,
            consumed_bits: 0,
            start_pos: self.pos,
        });
        Ok(())
    }

    /// Reads `num_bits` (`<= 64`) bits, little-endian within each byte.
    pub fn read_bits(&mut self, num_bits: u8) -> Result<u64> {
        let mode = self
            .bit_mode
            .as_mut()
            .ok_or_else(|| Error::internal("read_bits called outside bit decoding mode"))?;
        if mode.consumed_bits + num_bits as usize > mode.total_bits {
            return Err(Error::underflow("bit region exhausted"));
        }
        let mut value: u64 = 0;
        let mut got = 0u8;
        while got < num_bits {
            let bit_index = mode.consumed_bits;
            let byte = self.data[mode.start_pos + bit_index / 8];
            let bit = (byte >> (bit_index % 8)) & 1;
            value |= (bit as u64) << got;
            got += 1;
            mode.consumed_bits += 1;
        }
        Ok(value)
    }

    /// Leaves bit mode, advancing the byte cursor past the whole bit
    /// region (including any padding in the final byte).
    pub fn end_bit_decoding(&mut self) -> Result<()> {
        let mode = self
            .bit_mode
            .take()
            .ok_or_else(|| Error::internal("end_bit_decoding called outside bit decoding mode"))?;
        self.pos = mode.start_pos + mode.total_bits.div_ceil(8);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitstream::EncoderBuffer;

    #[test]
    fn read_past_end_underflows() {
        let data = [1u8, 2, 3];
        let mut dec = DecoderBuffer::new(&data);
        dec.read_u32().unwrap();
        assert!(matches!(dec.read_u8(), Err(Error::BufferUnderflow(_))));
    }

    #[test]
    fn set_position_is_decoder_only() {
        let data = [0u8; 8];
        let mut dec = DecoderBuffer::new(&data);
        dec.set_position(4).unwrap();
        assert_eq!(dec.position(), 4);
        assert!(dec.set_position(9).is_err());
    }

    #[test]
    fn cstr_roundtrip() {
        let mut enc = EncoderBuffer::new();
        enc.write_cstr("hello").unwrap();
        let bytes = enc.into_bytes();
        let mut dec = DecoderBuffer::new(&bytes);
        assert_eq!(dec.read_cstr().unwrap(), "hello");
    }
}
