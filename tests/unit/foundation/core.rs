use super::*;

#[test]
fn time_window_contains_boundaries() {
    let w = TimeWindow::new(2.0, 5.0).unwrap();
    assert!(!w.contains(1.999));
    assert!(w.contains(2.0));
    assert!(w.contains(4.999));
    assert!(!w.contains(5.0));
    assert_eq!(w.duration(), 3.0);
}

#[test]
fn time_window_rejects_empty_and_inverted() {
    assert!(TimeWindow::new(1.0, 1.0).is_err());
    assert!(TimeWindow::new(3.0, 1.0).is_err());
    assert!(TimeWindow::new(0.0, f64::NAN).is_err());
}

#[test]
fn canvas_requires_non_zero_size() {
    assert!(Canvas::new(0, 10).is_err());
    assert_eq!(Canvas::new(1080, 1920).unwrap().size(), (1080.0, 1920.0));
}
