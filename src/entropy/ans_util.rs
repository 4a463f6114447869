//! Frequency-table normalization and the symbol-folding transform used by
//! the folded-32 coder.
//!
//! Grounded in the teacher's `ans/ans_util.rs` frequency-scaling routine,
//! simplified to a single deterministic pass: unlike the teacher (which
//! searches over increasing frame sizes to bound cross-entropy loss) this
//! codec's frame size `L = 2^r` is fixed by the coder's precision parameter,
//! so normalization always targets that exact `L`.

use crate::bitstream::{DecoderBuffer, EncoderBuffer};
use crate::error::{Error, Result};

/// Scales `counts` (raw symbol frequencies, any nonnegative values) to a new
/// set of frequencies summing exactly to `1 << precision_bits`, preserving
/// zero counts as zero and giving every nonzero count a frequency `>= 1`.
///
/// Rounding residue is distributed deterministically: the symbol with the
/// largest scaled count absorbs the residue, ties broken by the lowest
/// symbol id, so two conforming implementations normalizing the same
/// counts always produce the same table.
pub fn normalize_frequencies(counts: &[u64], precision_bits: u8) -> Result<Vec<u32>> {
    let total: u64 = counts.iter().sum();
    if total == 0 {
        return Err(Error::internal("cannot normalize an all-zero frequency table"));
    }
    let target: u64 = 1u64 << precision_bits;
    let nonzero = counts.iter().filter(|&&c| c > 0).count() as u64;
    if nonzero > target {
        return Err(Error::UnsupportedFeature(format!(
            "{nonzero} distinct symbols cannot fit in a frame of size {target}"
        )));
    }

    let mut freqs: Vec<u32> = counts
        .iter()
        .map(|&c| {
            if c == 0 {
                0
            } else {
                (((c as u128) * (target as u128)) / (total as u128)).max(1) as u32
            }
        })
        .collect();

    let sum: i64 = freqs.iter().map(|&f| f as i64).sum();
    let mut residue = target as i64 - sum;

    while residue != 0 {
        // Find the symbol with the largest *original* count (lowest id on
        // ties) to absorb one unit of residue; repeat until balanced.
        let step: i64 = if residue > 0 { 1 } else { -1 };
        let mut best: Option<usize> = None;
        for (i, &c) in counts.iter().enumerate() {
            if c == 0 {
                continue;
            }
            if step < 0 && freqs[i] <= 1 {
                // never push a nonzero symbol's frequency down to 0
                continue;
            }
            match best {
                None => best = Some(i),
                Some(b) if counts[i] > counts[b] => best = Some(i),
                _ => {}
            }
        }
        let idx = best.ok_or_else(|| {
            Error::internal("could not distribute frequency-table rounding residue")
        })?;
        freqs[idx] = (freqs[idx] as i64 + step) as u32;
        residue -= step;
    }

    Ok(freqs)
}

/// Writes the compressed frequency-table header: for each symbol in
/// `[0, alphabet_size)`, either a varint-encoded nonzero frequency, or a
/// `0` marker followed by the varint run-length of consecutive zero
/// frequencies.
pub fn write_frequency_table(out: &mut EncoderBuffer, freqs: &[u32]) -> Result<()> {
    let mut i = 0;
    while i < freqs.len() {
        if freqs[i] == 0 {
            let mut run = 0u64;
            while i < freqs.len() && freqs[i] == 0 {
                run += 1;
                i += 1;
            }
            out.write_varint(0)?;
            out.write_varint(run)?;
        } else {
            out.write_varint(freqs[i] as u64)?;
            i += 1;
        }
    }
    Ok(())
}

/// Inverse of [`write_frequency_table`].
pub fn read_frequency_table(data: &mut DecoderBuffer, alphabet_size: usize) -> Result<Vec<u32>> {
    let mut freqs = vec![0u32; alphabet_size];
    let mut i = 0;
    while i < alphabet_size {
        let tag = data.read_varint()?;
        if tag == 0 {
            let run = data.read_varint()? as usize;
            if i + run > alphabet_size {
                return Err(Error::corrupt("frequency table zero-run overruns alphabet"));
            }
            i += run;
        } else {
            if tag > u32::MAX as u64 {
                return Err(Error::corrupt("frequency exceeds u32"));
            }
            freqs[i] = tag as u32;
            i += 1;
        }
    }
    Ok(freqs)
}
