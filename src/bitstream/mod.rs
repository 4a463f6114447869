//! Sequential byte/bit I/O primitives (spec component A).
//!
//! [`EncoderBuffer`] is append-only; [`DecoderBuffer`] advances a read
//! position over a borrowed slice. Both support a "bit mode" sublayer
//! entered with `start_bit_encoding`/`start_bit_decoding`: while active, the
//! buffer is a flat little-endian-packed bit stream and ordinary byte writes
//! are rejected.

mod decoder_buffer;
mod encoder_buffer;
mod varint;

pub use decoder_buffer::DecoderBuffer;
pub use encoder_buffer::EncoderBuffer;
pub use varint::{read_varint, write_varint};
