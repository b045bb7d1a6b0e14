use super::*;

fn query(x: f64, y: f64) -> SnapQuery {
    SnapQuery {
        x,
        y,
        width: 100.0,
        height: 50.0,
        canvas_width: 1000.0,
        canvas_height: 800.0,
    }
}

#[test]
fn no_snap_passes_position_through() {
    let r = NoSnap.resolve(query(12.5, 7.0));
    assert_eq!((r.x, r.y), (12.5, 7.0));
    assert!(r.guides.is_empty());
}

#[test]
fn canvas_snap_aligns_center_lines() {
    // element center x = 447 + 50 = 497, 3px off the canvas center
    let r = CanvasSnap::default().resolve(query(447.0, 300.0));
    assert_eq!(r.x, 450.0);
    assert_eq!(r.guides.vertical, Some(500.0));
    assert_eq!(r.y, 300.0);
    assert_eq!(r.guides.horizontal, None);
}

#[test]
fn canvas_snap_aligns_edges() {
    let r = CanvasSnap::default().resolve(query(-4.0, 745.0));
    assert_eq!(r.x, 0.0);
    assert_eq!(r.guides.vertical, Some(0.0));
    // bottom edge 795 snaps to canvas bottom 800
    assert_eq!(r.y, 750.0);
    assert_eq!(r.guides.horizontal, Some(800.0));
}

#[test]
fn canvas_snap_ignores_far_positions() {
    let r = CanvasSnap { threshold_px: 2.0 }.resolve(query(200.0, 200.0));
    assert_eq!((r.x, r.y), (200.0, 200.0));
    assert!(r.guides.is_empty());
}

#[test]
fn closures_are_resolvers() {
    let grid = |q: SnapQuery| SnapResult {
        x: (q.x / 10.0).round() * 10.0,
        y: (q.y / 10.0).round() * 10.0,
        guides: SnapGuides::default(),
    };
    let r = grid.resolve(query(14.0, 26.0));
    assert_eq!((r.x, r.y), (10.0, 30.0));
}
