use byteorder::{LittleEndian, WriteBytesExt};

use crate::bitstream::varint::write_varint;
use crate::error::{Error, Result};

/// State of the active bit-packing region, if any.
struct BitMode {
    /// Bits packed little-endian into whole bytes as they fill up.
    bytes: Vec<u8>,
    /// Bits accumulated into the current (not yet flushed) byte.
    partial: u8,
    /// Number of valid bits in `partial`, in `0..8`.
    partial_len: u8,
    /// Byte offset of the size prefix placeholder, if one was requested.
    size_prefix_pos: Option<usize>,
}

/// An append-only byte buffer with an optional bit-packing sublayer.
///
/// Integer primitives are written little-endian regardless of host
/// endianness.
#[derive(Default)]
pub struct EncoderBuffer {
    bytes: Vec<u8>,
    bit_mode: Option<BitMode>,
}

impl EncoderBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(cap: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(cap),
            bit_mode: None,
        }
    }

    /// Number of bytes written so far (bit mode must not be active).
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    fn check_byte_mode(&self) -> Result<()> {
        if self.bit_mode.is_some() {
            return Err(Error::internal(
                "cannot perform a byte-mode write while bit encoding is active",
            ));
        }
        Ok(())
    }

    pub fn write_u8(&mut self, value: u8) -> Result<()> {
        self.check_byte_mode()?;
        self.bytes.push(value);
        Ok(())
    }

    pub fn write_u16(&mut self, value: u16) -> Result<()> {
        self.check_byte_mode()?;
        self.bytes
            .write_u16::<LittleEndian>(value)
            .map_err(|e| Error::internal(format!("write_u16: {e}")))
    }

    pub fn write_u32(&mut self, value: u32) -> Result<()> {
        self.check_byte_mode()?;
        self.bytes
            .write_u32::<LittleEndian>(value)
            .map_err(|e| Error::internal(format!("write_u32: {e}")))
    }

    pub fn write_u64(&mut self, value: u64) -> Result<()> {
        self.check_byte_mode()?;
        self.bytes
            .write_u64::<LittleEndian>(value)
            .map_err(|e| Error::internal(format!("write_u64: {e}")))
    }

    pub fn write_f32(&mut self, value: f32) -> Result<()> {
        self.check_byte_mode()?;
        self.bytes
            .write_f32::<LittleEndian>(value)
            .map_err(|e| Error::internal(format!("write_f32: {e}")))
    }

    pub fn write_f64(&mut self, value: f64) -> Result<()> {
        self.check_byte_mode()?;
        self.bytes
            .write_f64::<LittleEndian>(value)
            .map_err(|e| Error::internal(format!("write_f64: {e}")))
    }

    pub fn write_bytes(&mut self, data: &[u8]) -> Result<()> {
        self.check_byte_mode()?;
        self.bytes.extend_from_slice(data);
        Ok(())
    }

    pub fn write_varint(&mut self, value: u64) -> Result<()> {
        self.check_byte_mode()?;
        write_varint(&mut self.bytes, value);
        Ok(())
    }

    /// Writes `s` followed by a single `0x00` terminator. `s` must not
    /// itself contain a NUL byte.
    pub fn write_cstr(&mut self, s: &str) -> Result<()> {
        self.check_byte_mode()?;
        if s.as_bytes().contains(&0) {
            return Err(Error::internal("string for write_cstr contains a NUL byte"));
        }
        self.bytes.extend_from_slice(s.as_bytes());
        self.bytes.push(0);
        Ok(())
    }

    /// Enters bit mode. `required_bytes` is a capacity hint. When
    /// `encode_size_prefix` is set, a 4-byte little-endian placeholder is
    /// written now and back-patched with the bit region's byte length by
    /// [`end_bit_encoding`].
    pub fn start_bit_encoding(&mut self, required_bytes: usize, encode_size_prefix: bool) -> Result<()> {
        if self.bit_mode.is_some() {
            return Err(Error::internal("bit encoding is already active"));
        }
        let size_prefix_pos = if encode_size_prefix {
            let pos = self.bytes.len();
            self.bytes.extend_from_slice(&0u32.to_le_bytes());
            Some(pos)
        } else {
            None
        };
        self.bit_mode = Some(BitMode {
            bytes: Vec::with_capacity(required_bytes),
            partial: 0,
            partial_len: 0,
            size_prefix_pos,
        });
        Ok(())
    }

    /// Writes the `num_bits` (`<= 64`) least-significant bits of `value`,
    /// packed little-endian within each byte.
    pub fn write_bits(&mut self, value: u64, num_bits: u8) -> Result<()> {
        let mode = self
            .bit_mode
            .as_mut()
            .ok_or_else(|| Error::internal("write_bits called outside bit encoding mode"))?;
        let mut remaining = num_bits;
        let mut v = value;
        while remaining > 0 {
            let space = 8 - mode.partial_len;
            let take = remaining.min(space);
            let mask = if take == 64 { u64::MAX } else { (1u64 << take) - 1 };
            let bits = (v & mask) as u8;
            mode.partial |= bits << mode.partial_len;
            mode.partial_len += take;
            v >>= take;
            remaining -= take;
            if mode.partial_len == 8 {
                mode.bytes.push(mode.partial);
                mode.partial = 0;
                mode.partial_len = 0;
            }
        }
        Ok(())
    }

    /// Flushes any partial byte (zero-padded), appends the bit region to
    /// the byte stream, and back-patches the size prefix if one was
    /// requested.
    pub fn end_bit_encoding(&mut self) -> Result<()> {
        let mut mode = self
            .bit_mode
            .take()
            .ok_or_else(|| Error::internal("end_bit_encoding called outside bit encoding mode"))?;
        if mode.partial_len > 0 {
            mode.bytes.push(mode.partial);
        }
        if let Some(pos) = mode.size_prefix_pos {
            let len = mode.bytes.len() as u32;
            self.bytes[pos..pos + 4].copy_from_slice(&len.to_le_bytes());
        }
        self.bytes.extend_from_slice(&mode.bytes);
        Ok(())
    }
}
