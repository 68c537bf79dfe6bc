use super::*;

#[test]
fn size_rejects_zero_axes() {
    assert!(Size::new(0, 10).is_err());
    assert!(Size::new(10, 0).is_err());
    let s = Size::new(3, 2).unwrap();
    assert_eq!(s.area(), 6);
    assert_eq!(s.rgba_len(), 24);
}

#[test]
fn area_does_not_overflow_u32() {
    let s = Size::new(u32::MAX, 2).unwrap();
    assert_eq!(s.area(), u64::from(u32::MAX) * 2);
}

#[test]
fn centered_rect_can_start_off_canvas() {
    let canvas = Size::new(100, 50).unwrap();
    let r = DrawRect::centered(
        canvas,
        FitSize {
            width: 100.0,
            height: 80.0,
        },
    );
    assert_eq!(r.x, 0.0);
    assert_eq!(r.y, -15.0);

    let r = DrawRect::centered(
        canvas,
        FitSize {
            width: 40.0,
            height: 50.0,
        },
    );
    assert_eq!(r.x, 30.0);
    assert_eq!(r.y, 0.0);
}

#[test]
fn crop_mode_roles() {
    assert!(CropMode::CropToStart.start_dictates());
    assert!(CropMode::PadToStart.start_dictates());
    assert!(!CropMode::CropToEnd.start_dictates());
    assert!(!CropMode::PadToEnd.start_dictates());

    assert!(CropMode::CropToStart.covers());
    assert!(CropMode::CropToEnd.covers());
    assert!(!CropMode::PadToStart.covers());
    assert!(!CropMode::PadToEnd.covers());
}

#[test]
fn crop_mode_serde_is_snake_case() {
    let s = serde_json::to_string(&CropMode::PadToEnd).unwrap();
    assert_eq!(s, "\"pad_to_end\"");
    let m: CropMode = serde_json::from_str("\"crop_to_end\"").unwrap();
    assert_eq!(m, CropMode::CropToEnd);
}
