//! Fixed-width, model-free bit coder: a thin naming wrapper over the
//! bitstream's bit-mode primitives for fields that carry no statistical
//! skew worth modeling (e.g. raw quantized bit-depth fallbacks).

use crate::bitstream::{DecoderBuffer, EncoderBuffer};
use crate::error::Result;

pub struct DirectBitWriter<'a> {
    buf: &'a mut EncoderBuffer,
}

impl<'a> DirectBitWriter<'a> {
    pub fn new(buf: &'a mut EncoderBuffer) -> Self {
        Self { buf }
    }

    pub fn write(&mut self, value: u64, num_bits: u8) -> Result<()> {
        self.buf.write_bits(value, num_bits)
    }
}

pub struct DirectBitReader<'a, 'd> {
    buf: &'a mut DecoderBuffer<'d>,
}

impl<'a, 'd> DirectBitReader<'a, 'd> {
    pub fn new(buf: &'a mut DecoderBuffer<'d>) -> Self {
        Self { buf }
    }

    pub fn read(&mut self, num_bits: u8) -> Result<u64> {
        self.buf.read_bits(num_bits)
    }
}
