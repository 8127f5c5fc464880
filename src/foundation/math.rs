pub(crate) fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Piecewise-linear interpolation through `(xs[i], ys[i])`.
///
/// `xs` must be non-decreasing. Inputs before the first or after the last breakpoint take the
/// boundary value; there is no extrapolation. Zero-width segments resolve to their right-hand
/// value.
pub(crate) fn interp_clamped<const N: usize>(x: f64, xs: [f64; N], ys: [f64; N]) -> f64 {
    if N == 0 {
        return 0.0;
    }
    if x.is_nan() || x <= xs[0] {
        return ys[0];
    }
    if x >= xs[N - 1] {
        return ys[N - 1];
    }

    let idx = xs.partition_point(|&k| k <= x);
    let (x0, x1) = (xs[idx - 1], xs[idx]);
    let (y0, y1) = (ys[idx - 1], ys[idx]);
    let span = x1 - x0;
    if span <= 0.0 {
        return y1;
    }
    lerp(y0, y1, (x - x0) / span)
}

pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

pub(crate) fn mul_div255_u8(x: u16, y: u16) -> u8 {
    mul_div255_u16(x, y) as u8
}

pub(crate) fn add_sat_u8(a: u8, b: u8) -> u8 {
    a.saturating_add(b)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
