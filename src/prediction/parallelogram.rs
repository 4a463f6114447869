//! Parallelogram prediction (spec §4.D): predicts a vertex attribute
//! value from the opposite edge of the neighboring face, falling back to
//! delta against the previously decoded value when that neighbor isn't
//! available yet.

/// The three already-decoded quantized values a parallelogram prediction
/// needs: the opposite edge's two endpoints (`a`, `b`) and the apex of
/// the neighbor face across that edge (`c_prime`). All three are
/// `num_components`-wide.
pub struct ParallelogramContext<'a> {
    pub opposite_a: &'a [i32],
    pub opposite_b: &'a [i32],
    pub third_vertex: &'a [i32],
}

/// Returns the predicted value (`a + b - c'`) for a component-wide
/// quantized attribute value, or `None` if `ctx` is absent (boundary, or
/// the neighbor face isn't decoded yet) — callers fall back to delta
/// against `previous` in that case.
pub fn parallelogram_predict(ctx: Option<&ParallelogramContext>, previous: &[i32]) -> Vec<i32> {
    match ctx {
        Some(c) => c
            .opposite_a
            .iter()
            .zip(c.opposite_b)
            .zip(c.third_vertex)
            .map(|((&a, &b), &cp)| a + b - cp)
            .collect(),
        None => previous.to_vec(),
    }
}
