//! Quantization (spec §4.C): maps floating-point attribute components to
//! `q`-bit integers, either against one range shared by all components
//! (`Scalar`) or one range per component (`PerComponent`).

use crate::error::{Error, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuantizerMode {
    /// All components share the single largest `(max - min)` span.
    Scalar,
    /// Each component is quantized against its own `(min, max)`.
    PerComponent,
}

/// A quantizer fitted to a set of component ranges, able to map values to
/// and from `q`-bit integers.
#[derive(Clone, Debug)]
pub struct Quantizer {
    mode: QuantizerMode,
    bits: u8,
    min: Vec<f32>,
    /// Per-component range in `PerComponent` mode, or a single shared
    /// range repeated in `Scalar` mode (kept uniform-length for simplicity
    /// at the call site).
    range: Vec<f32>,
}

impl Quantizer {
    /// Fits a quantizer to `values` (flattened, `num_components`-wide
    /// rows) at `bits` of precision (spec: 1-30).
    pub fn fit(values: &[f64], num_components: usize, bits: u8, mode: QuantizerMode) -> Result<Self> {
        if !(1..=30).contains(&bits) {
            return Err(Error::InvalidParameter(format!(
                "quantization bits must be 1..=30, got {bits}"
            )));
        }
        if num_components == 0 || values.len() % num_components != 0 {
            return Err(Error::Internal("quantizer input not a multiple of component count".into()));
        }
        let mut min = vec![f32::MAX; num_components];
        let mut max = vec![f32::MIN; num_components];
        for chunk in values.chunks_exact(num_components) {
            for c in 0..num_components {
                let v = chunk[c] as f32;
                min[c] = min[c].min(v);
                max[c] = max[c].max(v);
            }
        }
        if values.is_empty() {
            min = vec![0.0; num_components];
            max = vec![0.0; num_components];
        }
        let range = match mode {
            QuantizerMode::PerComponent => (0..num_components).map(|c| max[c] - min[c]).collect(),
            QuantizerMode::Scalar => {
                let shared = (0..num_components)
                    .map(|c| max[c] - min[c])
                    .fold(0.0f32, f32::max);
                vec![shared; num_components]
            }
        };
        Ok(Self { mode, bits, min, range })
    }

    /// Reconstructs a quantizer from wire side-data (min vector + range
    /// vector, already matching `mode`'s layout).
    pub fn from_parts(mode: QuantizerMode, bits: u8, min: Vec<f32>, range: Vec<f32>) -> Self {
        Self { mode, bits, min, range }
    }

    pub fn mode(&self) -> QuantizerMode {
        self.mode
    }

    pub fn bits(&self) -> u8 {
        self.bits
    }

    pub fn min(&self) -> &[f32] {
        &self.min
    }

    pub fn range(&self) -> &[f32] {
        &self.range
    }

    fn max_code(&self) -> u32 {
        (1u32 << self.bits) - 1
    }

    /// Quantizes one component value.
    pub fn quantize(&self, component: usize, value: f64) -> u32 {
        let range = self.range[component];
        let max_code = self.max_code();
        if range <= 1e-9 {
            return 0;
        }
        let normalized = (value as f32 - self.min[component]) / range;
        let q = (normalized * max_code as f32).round();
        q.clamp(0.0, max_code as f32) as u32
    }

    /// Inverse of [`Self::quantize`].
    pub fn dequantize(&self, component: usize, code: u32) -> f64 {
        let range = self.range[component];
        if range <= 1e-9 {
            return self.min[component] as f64;
        }
        let max_code = self.max_code();
        let normalized = code as f32 / max_code as f32;
        (self.min[component] + normalized * range) as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantize_dequantize_is_within_one_step() {
        let values = [0.0, 0.25, 0.5, 0.75, 1.0];
        let q = Quantizer::fit(&values, 1, 10, QuantizerMode::Scalar).unwrap();
        for &v in &values {
            let code = q.quantize(0, v);
            let back = q.dequantize(0, code);
            assert!((back - v).abs() < 1.0 / (1u32 << 10) as f64 + 1e-6);
        }
    }

    #[test]
    fn quantization_is_monotonic() {
        let values = [-5.0, -1.0, 0.0, 2.0, 9.0];
        let q = Quantizer::fit(&values, 1, 8, QuantizerMode::Scalar).unwrap();
        let codes: Vec<u32> = values.iter().map(|&v| q.quantize(0, v)).collect();
        for pair in codes.windows(2) {
            assert!(pair[0] <= pair[1]);
        }
    }

    #[test]
    fn degenerate_zero_range_maps_everything_to_zero() {
        let values = [3.0, 3.0, 3.0];
        let q = Quantizer::fit(&values, 1, 8, QuantizerMode::Scalar).unwrap();
        assert_eq!(q.quantize(0, 3.0), 0);
    }

    #[test]
    fn rejects_out_of_range_bits() {
        assert!(Quantizer::fit(&[0.0], 1, 0, QuantizerMode::Scalar).is_err());
        assert!(Quantizer::fit(&[0.0], 1, 31, QuantizerMode::Scalar).is_err());
    }
}
