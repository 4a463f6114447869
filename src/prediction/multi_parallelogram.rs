//! Constrained multi-parallelogram prediction (spec §4.D): averages every
//! valid parallelogram predictor meeting at a vertex, gated by a
//! per-vertex crease flag that selects between the multi-prediction and a
//! single parallelogram fallback.

/// Averages `candidates` (each a `num_components`-wide parallelogram
/// prediction) component-wise, rounding to nearest.
fn average(candidates: &[Vec<i32>]) -> Vec<i32> {
    let num_components = candidates[0].len();
    let n = candidates.len() as f64;
    (0..num_components)
        .map(|c| {
            let sum: i64 = candidates.iter().map(|v| v[c] as i64).sum();
            (sum as f64 / n).round() as i32
        })
        .collect()
}

/// The prediction step shared by encode and decode: when `crease` is set,
/// or there are no valid candidates, predicts with `single_fallback`
/// (itself already the outcome of a single parallelogram prediction, or a
/// delta fallback at the boundary); otherwise averages all `candidates`.
fn predict(candidates: &[Vec<i32>], crease: bool, single_fallback: &[i32]) -> Vec<i32> {
    if crease || candidates.is_empty() {
        single_fallback.to_vec()
    } else {
        average(candidates)
    }
}

pub fn multi_parallelogram_encode(candidates: &[Vec<i32>], crease: bool, single_fallback: &[i32]) -> Vec<i32> {
    predict(candidates, crease, single_fallback)
}

pub fn multi_parallelogram_decode(candidates: &[Vec<i32>], crease: bool, single_fallback: &[i32]) -> Vec<i32> {
    predict(candidates, crease, single_fallback)
}
