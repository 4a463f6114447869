//! Portable texcoord prediction (spec §4.D): predicts a UV value from the
//! positions and UVs of two already-processed vertices of the same
//! triangle, via a rotation-and-scale derived from the 3D edge. Stable
//! under quantization and independent of coordinate-system handedness
//! (the rotation uses the edge's length, not its signed orientation).

/// The context needed to predict a triangle's third UV from its first
/// two vertices: their (quantized, decoded) 3D positions and 2D UVs, plus
/// the third vertex's position.
pub struct TexCoordContext {
    pub pos0: [f64; 3],
    pub pos1: [f64; 3],
    pub pos2: [f64; 3],
    pub uv0: [f64; 2],
    pub uv1: [f64; 2],
}

fn sub3(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

fn dot3(a: [f64; 3], b: [f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

fn cross3(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

fn length3(a: [f64; 3]) -> f64 {
    dot3(a, a).sqrt()
}

/// Predicts the third UV, or `None` when the 3D edge `pos0 -> pos1`
/// degenerates (near-zero length) — callers fall back to delta against
/// the previously decoded UV in that case.
fn predict(ctx: &TexCoordContext) -> Option<[i32; 2]> {
    let e1 = sub3(ctx.pos1, ctx.pos0);
    let e2 = sub3(ctx.pos2, ctx.pos0);
    let plen2 = dot3(e1, e1);
    if plen2 < 1e-12 {
        return None;
    }
    let t = dot3(e2, e1) / plen2;
    let s = length3(cross3(e1, e2)) / plen2;
    let ux = ctx.uv1[0] - ctx.uv0[0];
    let uy = ctx.uv1[1] - ctx.uv0[1];
    let pred_u = ctx.uv0[0] + t * ux - s * uy;
    let pred_v = ctx.uv0[1] + t * uy + s * ux;
    Some([pred_u.round() as i32, pred_v.round() as i32])
}

pub fn texcoord_predict_encode(ctx: &TexCoordContext, previous: [i32; 2]) -> [i32; 2] {
    predict(ctx).unwrap_or(previous)
}

pub fn texcoord_predict_decode(ctx: &TexCoordContext, previous: [i32; 2]) -> [i32; 2] {
    predict(ctx).unwrap_or(previous)
}
