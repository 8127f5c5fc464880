use super::*;

const XS: [f64; 4] = [0.2, 0.25, 0.4, 0.45];
const YS: [f64; 4] = [0.0, 1.0, 1.0, 0.0];

#[test]
fn interp_hits_breakpoints_exactly() {
    for (x, y) in XS.iter().zip(YS.iter()) {
        assert_eq!(interp_clamped(*x, XS, YS), *y);
    }
}

#[test]
fn interp_clamps_outside_breakpoints() {
    assert_eq!(interp_clamped(-3.0, XS, YS), 0.0);
    assert_eq!(interp_clamped(9.0, XS, YS), 0.0);
    assert_eq!(interp_clamped(9.0, [0.0, 1.0], [2.0, 5.0]), 5.0);
    assert_eq!(interp_clamped(f64::NAN, [0.0, 1.0], [2.0, 5.0]), 2.0);
}

#[test]
fn interp_is_linear_inside_a_segment() {
    let y = interp_clamped(0.225, XS, YS);
    assert!((y - 0.5).abs() < 1e-9);
}

#[test]
fn interp_zero_width_segment_takes_right_value() {
    let xs = [0.0, 0.5, 0.5, 1.0];
    let ys = [0.0, 1.0, 3.0, 3.0];
    assert_eq!(interp_clamped(0.5, xs, ys), 3.0);
    assert!((interp_clamped(0.25, xs, ys) - 0.5).abs() < 1e-9);
}

#[test]
fn mul_div255_variants_align() {
    for x in [0u16, 1, 127, 255] {
        for y in [0u16, 1, 127, 255] {
            assert_eq!(u16::from(mul_div255_u8(x, y)), mul_div255_u16(x, y));
        }
    }
}
