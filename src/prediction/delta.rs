//! Delta prediction (spec §4.D): value `i` is predicted by value `i - 1`;
//! value `0` has no predictor, so its residual is the value itself.

/// Turns a sequence of per-component-interleaved quantized values into
/// residuals. `values` and the returned residuals are both laid out as
/// `num_components`-wide rows.
pub fn delta_predict_encode(values: &[i32], num_components: usize) -> Vec<i32> {
    let mut out = Vec::with_capacity(values.len());
    for (row, chunk) in values.chunks_exact(num_components).enumerate() {
        if row == 0 {
            out.extend_from_slice(chunk);
        } else {
            let prev_start = (row - 1) * num_components;
            for c in 0..num_components {
                out.push(chunk[c] - values[prev_start + c]);
            }
        }
    }
    out
}

/// Inverse of [`delta_predict_encode`].
pub fn delta_predict_decode(residuals: &[i32], num_components: usize) -> Vec<i32> {
    let mut out = Vec::with_capacity(residuals.len());
    for (row, chunk) in residuals.chunks_exact(num_components).enumerate() {
        if row == 0 {
            out.extend_from_slice(chunk);
        } else {
            let prev_start = (row - 1) * num_components;
            for c in 0..num_components {
                out.push(chunk[c] + out[prev_start + c]);
            }
        }
    }
    out
}
