use super::*;
use crate::foundation::core::Size;

fn buf(w: u32, h: u32, data: Vec<u8>) -> PixelBuffer {
    PixelBuffer::new(Size::new(w, h).unwrap(), data).unwrap()
}

#[test]
fn endpoints_reproduce_inputs_exactly() {
    let a: Vec<u8> = (0..=255).collect();
    let b: Vec<u8> = (0..=255).rev().collect();
    assert_eq!(blend_bytes(&a, &b, 0.0), a);
    assert_eq!(blend_bytes(&a, &b, 1.0), b);

    let pa = buf(8, 8, a);
    let pb = buf(8, 8, b);
    assert_eq!(blend(&pa, &pb, 0.0), pa);
    assert_eq!(blend(&pa, &pb, 1.0), pb);
}

#[test]
fn midpoint_rounds_to_nearest() {
    assert_eq!(blend_bytes(&[0, 10, 255], &[255, 11, 0], 0.5), vec![128, 11, 128]);
}

#[test]
fn alpha_is_interpolated_like_color() {
    let a = [255u8, 0, 0, 0];
    let b = [0u8, 0, 255, 255];
    assert_eq!(blend_bytes(&a, &b, 0.25), vec![191, 0, 64, 64]);
}

#[test]
fn out_of_range_factor_is_clamped() {
    let a = [10u8, 20, 30, 40];
    let b = [200u8, 210, 220, 230];
    assert_eq!(blend_bytes(&a, &b, -3.0), a.to_vec());
    assert_eq!(blend_bytes(&a, &b, 7.5), b.to_vec());
}

#[test]
fn output_stays_within_endpoints_across_factors() {
    let a: Vec<u8> = (0..64).map(|i| (i * 4) as u8).collect();
    let b: Vec<u8> = (0..64).map(|i| 255 - (i * 3) as u8).collect();
    for step in 0..=20 {
        let t = step as f32 / 20.0;
        let out = blend_bytes(&a, &b, t);
        for ((&o, &x), &y) in out.iter().zip(&a).zip(&b) {
            assert!(o >= x.min(y) && o <= x.max(y), "t={t} {x} {y} -> {o}");
        }
    }
}

#[test]
#[should_panic(expected = "equal-length")]
fn mismatched_lengths_fail_fast() {
    let _ = blend_bytes(&[0, 0, 0, 0], &[0, 0, 0, 0, 0, 0, 0, 0], 0.5);
}

#[test]
#[should_panic(expected = "same-size")]
fn mismatched_sizes_fail_fast() {
    let a = PixelBuffer::solid(Size::new(2, 1).unwrap(), [0, 0, 0, 255]);
    let b = PixelBuffer::solid(Size::new(1, 2).unwrap(), [0, 0, 0, 255]);
    let _ = blend(&a, &b, 0.5);
}

#[test]
#[should_panic(expected = "finite")]
fn nan_factor_fails_fast() {
    let _ = blend_bytes(&[1], &[2], f32::NAN);
}
