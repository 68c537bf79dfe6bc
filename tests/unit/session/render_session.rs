use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use super::*;
use crate::encode::encoder::EncodedTransition;
use crate::foundation::error::{TweenError, TweenResult};
use crate::sequence::builder::Frame;
use crate::session::preview::{PreviewSlot, PreviewState};

/// Encodes the frame count as a single byte. The first call can be made slow.
struct StubEncoder {
    calls: AtomicUsize,
    first_delay: Duration,
}

impl StubEncoder {
    fn new(first_delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            first_delay,
        })
    }
}

impl FrameEncoder for StubEncoder {
    fn encode(&self, _size: Size, frames: &[Frame]) -> TweenResult<Vec<u8>> {
        if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
            std::thread::sleep(self.first_delay);
        }
        Ok(vec![frames.len() as u8])
    }
}

struct FailingEncoder;

impl FrameEncoder for FailingEncoder {
    fn encode(&self, _size: Size, _frames: &[Frame]) -> TweenResult<Vec<u8>> {
        Err(TweenError::encode("palette exhausted"))
    }
}

#[derive(Clone, Default)]
struct Recorder {
    shown: Arc<Mutex<Vec<u8>>>,
}

impl PreviewSink for Recorder {
    fn show(&mut self, gif: &EncodedTransition) -> TweenResult<()> {
        self.shown.lock().unwrap().push(gif.bytes[0]);
        Ok(())
    }

    fn show_failure(&mut self, _reason: &str) {}
}

fn source(w: u32, h: u32) -> SourceImage {
    SourceImage::from_rgba(image::RgbaImage::from_pixel(w, h, image::Rgba([9, 9, 9, 255]))).unwrap()
}

fn session<P: PreviewSink>(encoder: Arc<dyn FrameEncoder>, preview: P) -> TransitionSession<P> {
    TransitionSession::new(
        RenderOpts::default(),
        TrailingDebounce::new(Duration::from_millis(500)),
        encoder,
        preview,
    )
}

#[test]
fn nothing_fires_before_the_quiet_period() {
    let t0 = Instant::now();
    let mut s = session(StubEncoder::new(Duration::ZERO), PreviewSlot::new());
    assert_eq!(s.next_deadline(), None);

    s.set_duration(1.0, t0);
    s.set_framerate(2.0, t0 + Duration::from_millis(300));
    assert_eq!(s.next_deadline(), Some(t0 + Duration::from_millis(800)));

    let report = s.poll(t0 + Duration::from_millis(700));
    assert_eq!(report.triggered, None);
    assert_eq!(s.next_deadline(), Some(t0 + Duration::from_millis(800)));
}

#[test]
fn missing_image_skips_and_leaves_preview_untouched() {
    let t0 = Instant::now();
    let mut s = session(StubEncoder::new(Duration::ZERO), PreviewSlot::new());
    s.set_start_image(source(4, 4), t0);

    let report = s.poll(t0 + Duration::from_millis(500));
    assert_eq!(
        report.triggered,
        Some(RenderTrigger::Skipped(MissingImage::End))
    );
    assert_eq!(s.in_flight(), 0);
    assert_eq!(s.preview().state(), &PreviewState::Empty);
    assert_eq!(s.next_deadline(), None);
}

#[test]
fn a_burst_of_changes_renders_once_with_the_latest_values() {
    let t0 = Instant::now();
    let mut s = session(StubEncoder::new(Duration::ZERO), PreviewSlot::new());
    s.set_start_image(source(4, 4), t0);
    s.set_end_image(source(4, 4), t0 + Duration::from_millis(100));
    s.set_duration(1.0, t0 + Duration::from_millis(200));
    s.set_framerate(2.0, t0 + Duration::from_millis(300));

    let report = s.poll(t0 + Duration::from_millis(800));
    // start hold + blends at 0, 0.5, 1 + end hold
    assert_eq!(
        report.triggered,
        Some(RenderTrigger::Started {
            size: Size::new(4, 4).unwrap(),
            frames: 5,
        })
    );
    assert_eq!(s.poll(t0 + Duration::from_secs(5)).triggered, None);

    let report = s.flush();
    assert_eq!(report.delivered, 1);
    match s.preview().state() {
        PreviewState::Ready(gif) => assert_eq!(gif.bytes, vec![5]),
        other => panic!("unexpected preview state {other:?}"),
    }
}

#[test]
fn encodes_are_delivered_in_start_order() {
    let t0 = Instant::now();
    let recorder = Recorder::default();
    let shown = Arc::clone(&recorder.shown);
    let mut s = session(StubEncoder::new(Duration::from_millis(300)), recorder);
    s.set_start_image(source(2, 2), t0);
    s.set_end_image(source(2, 2), t0);
    s.set_duration(1.0, t0);
    s.set_framerate(1.0, t0);

    let first = s.poll(t0 + Duration::from_millis(500));
    assert!(matches!(
        first.triggered,
        Some(RenderTrigger::Started { frames: 4, .. })
    ));

    s.set_framerate(3.0, t0 + Duration::from_millis(600));
    let second = s.poll(t0 + Duration::from_millis(1100));
    assert!(matches!(
        second.triggered,
        Some(RenderTrigger::Started { frames: 6, .. })
    ));
    assert_eq!(s.in_flight(), 2);

    // The fast second encode finishes first but waits behind the slow one.
    std::thread::sleep(Duration::from_millis(50));
    assert_eq!(s.poll(t0 + Duration::from_millis(1200)).delivered, 0);

    assert_eq!(s.flush().delivered, 2);
    assert_eq!(*shown.lock().unwrap(), vec![4, 6]);
}

#[test]
fn render_errors_reach_the_preview() {
    let t0 = Instant::now();
    let mut s = session(StubEncoder::new(Duration::ZERO), PreviewSlot::new());
    s.set_start_image(source(2, 2), t0);
    s.set_end_image(source(2, 2), t0);
    s.set_duration(f64::NAN, t0);

    let report = s.poll(t0 + Duration::from_millis(500));
    assert!(matches!(report.triggered, Some(RenderTrigger::Failed(_))));
    assert!(matches!(s.preview().state(), PreviewState::Failed(_)));
}

#[test]
fn encode_errors_reach_the_preview() {
    let t0 = Instant::now();
    let mut s = session(Arc::new(FailingEncoder), PreviewSlot::new());
    s.set_start_image(source(2, 2), t0);
    s.set_end_image(source(2, 2), t0);

    s.poll(t0 + Duration::from_millis(500));
    let report = s.flush();
    assert_eq!(report.failed, 1);
    match s.preview().state() {
        PreviewState::Failed(reason) => assert!(reason.contains("palette exhausted")),
        other => panic!("unexpected preview state {other:?}"),
    }
}

#[test]
fn reset_drops_images_and_restores_defaults() {
    let t0 = Instant::now();
    let mut s = session(StubEncoder::new(Duration::ZERO), PreviewSlot::new());
    s.set_start_image(source(2, 2), t0);
    s.set_crop_mode(CropMode::PadToEnd, t0);
    s.reset(t0 + Duration::from_millis(100));

    assert!(s.settings().start_image.is_none());
    assert_eq!(s.settings().crop_mode, CropMode::CropToStart);
    assert_eq!(s.settings().duration_secs, 3.0);
    assert_eq!(
        s.poll(t0 + Duration::from_millis(600)).triggered,
        Some(RenderTrigger::Skipped(MissingImage::Start))
    );
}
