use super::*;
use crate::foundation::core::Size;

fn pair() -> (PixelBuffer, PixelBuffer) {
    let size = Size::new(2, 2).unwrap();
    (
        PixelBuffer::solid(size, [0, 0, 0, 255]),
        PixelBuffer::solid(size, [200, 100, 50, 255]),
    )
}

fn timing(duration_secs: f64, framerate: f64) -> Timing {
    Timing {
        duration_secs,
        framerate,
    }
}

#[test]
fn total_frames_is_ceiling_of_duration_times_rate() {
    assert_eq!(timing(3.0, 10.0).total_frames(), 30);
    assert_eq!(timing(2.5, 3.0).total_frames(), 8);
    assert_eq!(timing(0.01, 1.0).total_frames(), 1);
    assert_eq!(timing(0.0, 10.0).total_frames(), 0);
    assert_eq!(timing(3.0, 0.0).total_frames(), 0);
    assert_eq!(timing(f64::NAN, 10.0).total_frames(), 0);
    assert_eq!(timing(-1.0, 10.0).total_frames(), 0);
}

#[test]
fn three_seconds_at_ten_fps_gives_33_frames() {
    let (a, b) = pair();
    let frames = build_sequence(timing(3.0, 10.0), &a, &b, &SequenceOpts::default());
    assert_eq!(frames.len(), 33);

    let holds: Vec<f64> = frames.iter().map(|f| f.hold_ms).collect();
    let mut expected = vec![1500.0];
    expected.extend(std::iter::repeat_n(100.0, 31));
    expected.push(2000.0);
    assert_eq!(holds, expected);

    assert_eq!(frames[0].buffer, a);
    assert_eq!(frames[1].buffer, a);
    assert_eq!(frames[31].buffer, b);
    assert_eq!(frames[32].buffer, b);
}

#[test]
fn frame_count_is_total_plus_three() {
    let (a, b) = pair();
    for (d, f) in [(1.0, 1.0), (0.5, 7.0), (2.0, 24.0), (0.1, 0.5)] {
        let t = timing(d, f);
        let frames = build_sequence(t, &a, &b, &SequenceOpts::default());
        assert_eq!(frames.len() as u64, t.total_frames() + 3, "{d}s @ {f}fps");
    }
}

#[test]
fn interpolated_frames_progress_monotonically() {
    let (a, b) = pair();
    let frames = build_sequence(timing(1.0, 5.0), &a, &b, &SequenceOpts::default());
    let reds: Vec<u8> = frames[1..frames.len() - 1]
        .iter()
        .map(|f| f.buffer.pixel(0, 0)[0])
        .collect();
    assert_eq!(reds, vec![0, 40, 80, 120, 160, 200]);
}

#[test]
fn zero_total_frames_degenerates_to_a_single_final_blend() {
    let (a, b) = pair();
    let frames = build_sequence(timing(0.0, 0.0), &a, &b, &SequenceOpts::default());
    assert_eq!(frames.len(), 3);
    assert_eq!(frames[1].buffer, b);
    assert_eq!(frames[1].hold_ms, 0.0);

    let opts = SequenceOpts {
        include_redundant_final_blend: false,
        ..SequenceOpts::default()
    };
    let frames = build_sequence(timing(0.0, 10.0), &a, &b, &opts);
    assert_eq!(frames.len(), 2);
}

#[test]
fn dropping_the_redundant_blend_removes_one_frame() {
    let (a, b) = pair();
    let opts = SequenceOpts {
        include_redundant_final_blend: false,
        ..SequenceOpts::default()
    };
    let frames = build_sequence(timing(3.0, 10.0), &a, &b, &opts);
    assert_eq!(frames.len(), 32);
    assert_ne!(frames[30].buffer, b);
}

#[test]
fn tail_frame_is_appended_with_one_millisecond() {
    let (a, b) = pair();
    let opts = SequenceOpts {
        include_tail_frame: true,
        ..SequenceOpts::default()
    };
    let frames = build_sequence(timing(1.0, 2.0), &a, &b, &opts);
    let last = frames.last().unwrap();
    assert_eq!(last.hold_ms, TAIL_HOLD_MS);
    assert_eq!(last.buffer, b);
    assert_eq!(frames[frames.len() - 2].hold_ms, END_HOLD_MS);
}

#[test]
fn parallel_and_sequential_blends_match() {
    let (a, b) = pair();
    let seq = build_sequence(timing(2.0, 12.0), &a, &b, &SequenceOpts::default());
    let par = build_sequence(
        timing(2.0, 12.0),
        &a,
        &b,
        &SequenceOpts {
            parallel: true,
            ..SequenceOpts::default()
        },
    );
    assert_eq!(seq, par);
}

#[test]
fn blend_factors_cover_zero_to_one() {
    assert_eq!(blend_factors(4, true), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
    assert_eq!(blend_factors(4, false), vec![0.0, 0.25, 0.5, 0.75]);
    assert_eq!(blend_factors(0, true), vec![1.0]);
    assert!(blend_factors(0, false).is_empty());
}
