//! Low-level rANS renormalization primitives shared by the symbol coder,
//! the adaptive bit coder, and the folded-32 coder.

use crate::entropy::RANS_LOWER_BOUND;
use crate::error::{Error, Result};

/// Advances `state` past one symbol with the given `(freq, cumul_freq)` at
/// `precision` bits, flushing renormalization bytes to `out` (in encode
/// order; callers reverse the whole stream once at the end — see
/// `entropy/mod.rs`).
#[inline(always)]
pub fn encode_step(mut state: u32, freq: u32, cumul: u32, precision: u32, out: &mut Vec<u8>) -> u32 {
    debug_assert!(freq > 0);
    let x_max = ((RANS_LOWER_BOUND >> precision) << 8) * freq;
    while state >= x_max {
        out.push((state & 0xff) as u8);
        state >>= 8;
    }
    ((state / freq) << precision) + (state % freq) + cumul
}

/// The slot a decoder should look up in its cumulative-frequency table.
#[inline(always)]
pub fn decode_slot(state: u32, precision: u32) -> u32 {
    state & ((1u32 << precision) - 1)
}

/// Inverse of [`encode_step`]: given the `(freq, cumul_freq)` of the symbol
/// that owns `slot`, updates `state` and pulls further bytes from `stream`
/// (advancing `cursor`) as needed to keep it above the renormalization
/// bound.
#[inline(always)]
pub fn decode_step(
    state: u32,
    freq: u32,
    cumul: u32,
    slot: u32,
    precision: u32,
    stream: &[u8],
    cursor: &mut usize,
) -> Result<u32> {
    let mut state = freq * (state >> precision) + slot - cumul;
    while state < RANS_LOWER_BOUND {
        let byte = *stream
            .get(*cursor)
            .ok_or_else(|| Error::underflow("rANS stream exhausted during renormalization"))?;
        *cursor += 1;
        state = (state << 8) | byte as u32;
    }
    Ok(state)
}
