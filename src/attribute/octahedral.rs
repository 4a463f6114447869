//! Octahedral normal transform (spec §4.C): projects a unit 3-vector onto
//! the octahedron and folds the lower hemisphere, yielding two values in
//! `[-1, 1]` quantized to `q` bits each.

/// Encodes `normal` (need not be unit-length; zero vectors map to the
/// origin) as a pair of `q`-bit unsigned codes.
pub fn encode_octahedral(normal: [f64; 3], bits: u8) -> (u32, u32) {
    let len = (normal[0] * normal[0] + normal[1] * normal[1] + normal[2] * normal[2]).sqrt();
    let (x, y, z) = if len > 1e-9 {
        (normal[0] / len, normal[1] / len, normal[2] / len)
    } else {
        (0.0, 0.0, 1.0)
    };

    let l1_norm = x.abs() + y.abs() + z.abs();
    let (nx, ny) = if l1_norm > 1e-9 {
        (x / l1_norm, y / l1_norm)
    } else {
        (0.0, 0.0)
    };

    let (ox, oy) = if z >= 0.0 {
        (nx, ny)
    } else {
        (
            (1.0 - ny.abs()) * signum_nonzero(nx),
            (1.0 - nx.abs()) * signum_nonzero(ny),
        )
    };

    let max_code = (1u32 << bits) - 1;
    let u = (((ox * 0.5 + 0.5) * max_code as f64).round()).clamp(0.0, max_code as f64) as u32;
    let v = (((oy * 0.5 + 0.5) * max_code as f64).round()).clamp(0.0, max_code as f64) as u32;
    (u, v)
}

/// Inverse of [`encode_octahedral`]: returns a renormalized unit vector.
pub fn decode_octahedral(codes: (u32, u32), bits: u8) -> [f64; 3] {
    let max_code = (1u32 << bits) - 1;
    let ox = (codes.0 as f64 / max_code as f64) * 2.0 - 1.0;
    let oy = (codes.1 as f64 / max_code as f64) * 2.0 - 1.0;

    let z = 1.0 - ox.abs() - oy.abs();
    let (x, y) = if z >= 0.0 {
        (ox, oy)
    } else {
        (
            (1.0 - oy.abs()) * signum_nonzero(ox),
            (1.0 - ox.abs()) * signum_nonzero(oy),
        )
    };

    let len = (x * x + y * y + z * z).sqrt();
    if len > 1e-9 {
        [x / len, y / len, z / len]
    } else {
        [0.0, 0.0, 1.0]
    }
}

/// `f64::signum` returns `1.0` for `+0.0`, which is what the octahedral
/// fold needs at the axis boundaries (unlike a "sign or zero" helper).
fn signum_nonzero(v: f64) -> f64 {
    if v < 0.0 {
        -1.0
    } else {
        1.0
    }
}
