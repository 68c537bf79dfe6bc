use super::*;

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

#[test]
fn fires_once_after_quiet_period() {
    let t0 = Instant::now();
    let mut d = TrailingDebounce::new(ms(500));
    assert!(!d.fire_if_due(t0));

    d.arm(t0);
    assert!(!d.fire_if_due(t0 + ms(499)));
    assert!(d.fire_if_due(t0 + ms(500)));
    assert!(!d.fire_if_due(t0 + ms(2000)));
    assert_eq!(d.deadline(), None);
}

#[test]
fn rearming_pushes_the_deadline() {
    let t0 = Instant::now();
    let mut d = TrailingDebounce::default();
    assert_eq!(d.quiet(), DEFAULT_QUIET);

    d.arm(t0);
    d.arm(t0 + ms(300));
    assert!(!d.fire_if_due(t0 + ms(600)));
    assert_eq!(d.deadline(), Some(t0 + ms(800)));
    assert!(d.fire_if_due(t0 + ms(800)));
}

#[test]
fn cancel_disarms() {
    let t0 = Instant::now();
    let mut d = TrailingDebounce::new(ms(10));
    d.arm(t0);
    d.cancel();
    assert!(!d.fire_if_due(t0 + ms(100)));
}
