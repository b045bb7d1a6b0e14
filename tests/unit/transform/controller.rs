use super::*;
use crate::transform::snap::{CanvasSnap, SnapResult};

const EPS: f64 = 1e-6;

fn canvas() -> Canvas {
    Canvas {
        width: 1080,
        height: 1080,
    }
}

fn square(rotation: f64) -> Geometry {
    Geometry::new(0.0, 0.0, 100.0, 100.0).with_rotation(rotation)
}

fn ctl() -> TransformController {
    TransformController::without_snap(canvas())
}

fn near(a: Point, b: Point) -> bool {
    (a.x - b.x).abs() < EPS && (a.y - b.y).abs() < EPS
}

/// Canvas position of the midpoint of the edge opposite `handle`.
fn opposite_edge_mid(g: &Geometry, handle: ResizeHandle) -> Point {
    let local = match handle {
        ResizeHandle::E => Point::new(0.0, g.height * 0.5),
        ResizeHandle::W => Point::new(g.width, g.height * 0.5),
        ResizeHandle::S => Point::new(g.width * 0.5, 0.0),
        ResizeHandle::N => Point::new(g.width * 0.5, g.height),
        _ => unreachable!(),
    };
    g.local_to_canvas(local)
}

fn drag_resize(
    c: &mut TransformController,
    g: Geometry,
    handle: ResizeHandle,
    from: Point,
    to: Point,
) -> Geometry {
    let mut s = c.begin_resize("el", g, from, handle).unwrap();
    c.on_pointer_move(&mut s, to, Modifiers::default()).unwrap();
    let mut out = g;
    c.on_pointer_up(s).unwrap().geometry.apply_to(&mut out);
    out
}

#[test]
fn east_edge_drag_unrotated() {
    let mut c = ctl();
    let g = drag_resize(
        &mut c,
        square(0.0),
        ResizeHandle::E,
        Point::new(100.0, 50.0),
        Point::new(120.0, 50.0),
    );
    assert!((g.width - 120.0).abs() < EPS);
    assert!((g.height - 100.0).abs() < EPS);
    assert_eq!((g.x, g.y), (0.0, 0.0));
}

#[test]
fn east_edge_drag_at_quarter_turn_rotates_delta_into_local_frame() {
    let mut c = ctl();
    let g0 = square(90.0);
    let mut s = c
        .begin_resize("el", g0, Point::new(0.0, 0.0), ResizeHandle::E)
        .unwrap();
    c.on_pointer_move(&mut s, Point::new(20.0, 0.0), Modifiers::default())
        .unwrap();
    // screen (20, 0) is local (0, -20): perpendicular to the east handle's axis
    let g = *s.current();
    assert!((g.width - 100.0).abs() < EPS);
    assert!((g.height - 100.0).abs() < EPS);

    // dragging along the local x axis (screen +y at 90°) grows the width
    c.on_pointer_move(&mut s, Point::new(0.0, 20.0), Modifiers::default())
        .unwrap();
    assert!((s.current().width - 120.0).abs() < EPS);
}

#[test]
fn south_edge_at_quarter_turn() {
    let mut c = ctl();
    let g = drag_resize(
        &mut c,
        square(90.0),
        ResizeHandle::S,
        Point::new(0.0, 0.0),
        Point::new(-20.0, 0.0),
    );
    assert!((g.height - 120.0).abs() < EPS);
    assert!((g.width - 100.0).abs() < EPS);
}

#[test]
fn opposite_edge_stays_fixed_for_all_rotations() {
    let handles = [ResizeHandle::N, ResizeHandle::S, ResizeHandle::E, ResizeHandle::W];
    let deltas = [
        Vec2::new(35.0, -12.0),
        Vec2::new(-60.0, 44.0),
        Vec2::new(-500.0, -500.0),
        Vec2::new(0.3, 900.0),
    ];
    for scale in [1.0, 1.7] {
        for step in 0..24 {
            let rotation = f64::from(step) * 15.0 + 7.0;
            for handle in handles {
                for delta in deltas {
                    let g0 = Geometry::new(40.0, 60.0, 180.0, 90.0)
                        .with_rotation(rotation)
                        .with_scale(scale);
                    let before = opposite_edge_mid(&g0, handle);
                    let start = Point::new(300.0, 300.0);
                    let g = drag_resize(&mut ctl(), g0, handle, start, start + delta);
                    let after = opposite_edge_mid(&g, handle);
                    assert!(
                        near(before, after),
                        "rot={rotation} scale={scale} {handle:?} {delta:?}: {before:?} -> {after:?}"
                    );
                    assert!(g.width >= 20.0 && g.height >= 20.0);
                }
            }
        }
    }
}

#[test]
fn dragged_edge_follows_pointer_on_scaled_element() {
    for rotation in [0.0, 30.0, 90.0, 212.0] {
        let g0 = Geometry::new(10.0, 20.0, 100.0, 80.0)
            .with_rotation(rotation)
            .with_scale(2.0);
        let e_mid = |g: &Geometry| g.local_to_canvas(Point::new(g.width, g.height * 0.5));
        let start = e_mid(&g0);
        let axis = local_to_screen(Vec2::new(20.0, 0.0), rotation);
        let g = drag_resize(&mut ctl(), g0, ResizeHandle::E, start, start + axis);
        assert!((g.width - 110.0).abs() < EPS, "rot={rotation} width={}", g.width);
        assert!(near(e_mid(&g), start + axis), "rot={rotation}");
    }

    let g0 = Geometry::new(0.0, 0.0, 100.0, 100.0).with_scale(2.0);
    let g = drag_resize(
        &mut ctl(),
        g0,
        ResizeHandle::N,
        Point::new(100.0, 0.0),
        Point::new(100.0, -30.0),
    );
    assert!((g.height - 115.0).abs() < EPS);
    assert!((g.y + 30.0).abs() < EPS);
}

#[test]
fn edge_resize_clamps_to_min_size() {
    let mut c = ctl();
    let g = drag_resize(
        &mut c,
        square(0.0),
        ResizeHandle::W,
        Point::new(0.0, 50.0),
        Point::new(400.0, 50.0),
    );
    assert!((g.width - 20.0).abs() < EPS);
    // the east edge stays at x = 100
    assert!((g.x - 80.0).abs() < EPS);

    let g = drag_resize(
        &mut c,
        square(0.0),
        ResizeHandle::N,
        Point::new(50.0, 0.0),
        Point::new(50.0, 1000.0),
    );
    assert!((g.height - 20.0).abs() < EPS);
    assert!((g.y - 80.0).abs() < EPS);
}

#[test]
fn corner_scales_by_distance_ratio() {
    let mut c = ctl();
    // center of the unrotated square is (50, 50); start 100px away along +x
    let mut s = c
        .begin_resize("el", square(0.0), Point::new(150.0, 50.0), ResizeHandle::Se)
        .unwrap();
    let u = c
        .on_pointer_move(&mut s, Point::new(200.0, 50.0), Modifiers::default())
        .unwrap();
    assert!((u.patch.geometry.scale.unwrap() - 1.5).abs() < EPS);
    assert_eq!(u.patch.geometry.width, None);
    assert_eq!(u.patch.geometry.height, None);
    assert_eq!(s.current().width, 100.0);
    assert_eq!(s.current().height, 100.0);
}

#[test]
fn corner_scale_never_drops_below_floor() {
    let mut c = ctl();
    for handle in [ResizeHandle::Ne, ResizeHandle::Nw, ResizeHandle::Se, ResizeHandle::Sw] {
        let mut s = c
            .begin_resize("el", square(33.0), Point::new(400.0, 400.0), handle)
            .unwrap();
        let center = s.initial().center();
        let u = c
            .on_pointer_move(&mut s, center, Modifiers::default())
            .unwrap();
        assert!((u.patch.geometry.scale.unwrap() - 0.1).abs() < EPS);
        c.on_pointer_up(s).unwrap();
    }
}

#[test]
fn corner_with_zero_start_distance_keeps_scale() {
    let mut c = ctl();
    let g0 = square(0.0);
    let mut s = c
        .begin_resize("el", g0, g0.center(), ResizeHandle::Nw)
        .unwrap();
    let u = c
        .on_pointer_move(&mut s, Point::new(500.0, 500.0), Modifiers::default())
        .unwrap();
    assert_eq!(u.patch.geometry.scale, Some(1.0));
}

#[test]
fn rotate_tracks_swept_angle_and_normalizes() {
    let mut c = ctl();
    let g0 = square(350.0);
    let center = g0.center();
    let mut s = c
        .begin_rotate("el", g0, center + Vec2::new(100.0, 0.0))
        .unwrap();
    // sweep +90° (y-down, clockwise)
    let u = c
        .on_pointer_move(&mut s, center + Vec2::new(0.0, 100.0), Modifiers::default())
        .unwrap();
    assert!((u.patch.geometry.rotation.unwrap() - 80.0).abs() < EPS);

    // sweep -90°
    let u = c
        .on_pointer_move(&mut s, center + Vec2::new(0.0, -100.0), Modifiers::default())
        .unwrap();
    assert!((u.patch.geometry.rotation.unwrap() - 260.0).abs() < EPS);
}

#[test]
fn rotate_snaps_to_fifteen_degrees() {
    let mut c = ctl();
    let g0 = square(0.0);
    let center = g0.center();
    let mut s = c
        .begin_rotate("el", g0, center + Vec2::new(100.0, 0.0))
        .unwrap();
    let a = 22.0_f64.to_radians();
    let u = c
        .on_pointer_move(
            &mut s,
            center + Vec2::new(a.cos(), a.sin()) * 100.0,
            Modifiers { snap: true },
        )
        .unwrap();
    assert!((u.patch.geometry.rotation.unwrap() - 15.0).abs() < EPS);
}

#[test]
fn rotation_always_in_range() {
    let mut c = ctl();
    for start_rot in [0.0, 90.0, 359.9] {
        let g0 = square(start_rot);
        let center = g0.center();
        let mut s = c
            .begin_rotate("el", g0, center + Vec2::new(0.0, -50.0))
            .unwrap();
        for i in 0..72 {
            let a = f64::from(i) * 0.17 - 6.0;
            for snap in [false, true] {
                let u = c
                    .on_pointer_move(
                        &mut s,
                        center + Vec2::new(a.cos(), a.sin()) * 80.0,
                        Modifiers { snap },
                    )
                    .unwrap();
                let r = u.patch.geometry.rotation.unwrap();
                assert!((0.0..360.0).contains(&r), "r={r}");
            }
        }
        c.on_pointer_up(s).unwrap();
    }
}

#[test]
fn move_passes_through_snap_and_guides_clear_on_release() {
    let mut c = TransformController::new(canvas(), CanvasSnap::default());
    let g0 = Geometry::new(100.0, 100.0, 100.0, 100.0);
    let mut s = c.begin_move("el", g0, Point::new(150.0, 150.0)).unwrap();
    assert_eq!(c.state(), GestureState::Moving);

    let u = c
        .on_pointer_move(&mut s, Point::new(200.0, 160.0), Modifiers::default())
        .unwrap();
    assert_eq!(u.patch.geometry.x, Some(150.0));
    assert_eq!(u.patch.geometry.y, Some(110.0));
    assert!(u.guides.is_empty());

    // center x lands at 537, snaps to canvas center 540
    let u = c
        .on_pointer_move(&mut s, Point::new(537.0, 160.0), Modifiers::default())
        .unwrap();
    assert_eq!(u.patch.geometry.x, Some(490.0));
    assert_eq!(u.guides.vertical, Some(540.0));
    assert_eq!(c.snap_guides().vertical, Some(540.0));

    let committed = c.on_pointer_up(s).unwrap();
    assert_eq!(committed.id, "el");
    assert_eq!(committed.geometry.x, Some(490.0));
    assert!(c.snap_guides().is_empty());
    assert_eq!(c.state(), GestureState::Idle);
}

#[test]
fn custom_resolver_closure_is_consulted() {
    let lock_y = |q: SnapQuery| SnapResult {
        x: q.x,
        y: 0.0,
        guides: SnapGuides {
            vertical: None,
            horizontal: Some(0.0),
        },
    };
    let mut c = TransformController::new(canvas(), lock_y);
    let mut s = c
        .begin_move("el", square(0.0), Point::new(0.0, 0.0))
        .unwrap();
    let u = c
        .on_pointer_move(&mut s, Point::new(30.0, 70.0), Modifiers::default())
        .unwrap();
    assert_eq!(u.patch.geometry.x, Some(30.0));
    assert_eq!(u.patch.geometry.y, Some(0.0));
    assert_eq!(u.guides.horizontal, Some(0.0));
}

#[test]
fn stale_sessions_are_no_ops() {
    let mut c = ctl();
    let mut s = c
        .begin_move("el", square(0.0), Point::new(0.0, 0.0))
        .unwrap();
    let mut stale = s.clone();
    c.on_pointer_move(&mut s, Point::new(5.0, 5.0), Modifiers::default())
        .unwrap();
    assert!(c.on_pointer_up(s).is_some());

    assert!(
        c.on_pointer_move(&mut stale, Point::new(50.0, 50.0), Modifiers::default())
            .is_none()
    );
    assert_eq!(stale.current(), stale.initial());
    assert!(c.on_pointer_up(stale).is_none());
}

#[test]
fn sessions_from_another_controller_are_ignored() {
    let mut a = ctl();
    let mut b = ctl();
    let mut own = a
        .begin_move("el", square(0.0), Point::new(0.0, 0.0))
        .unwrap();
    let mut foreign = b
        .begin_rotate("el2", square(0.0), Point::new(10.0, 0.0))
        .unwrap();
    assert!(
        a.on_pointer_move(&mut foreign, Point::new(1.0, 1.0), Modifiers::default())
            .is_none()
    );
    assert!(
        a.on_pointer_move(&mut own, Point::new(1.0, 1.0), Modifiers::default())
            .is_some()
    );
    assert_eq!(a.state(), GestureState::Moving);
    assert_eq!(b.state(), GestureState::Rotating);
}

#[test]
fn starting_a_second_gesture_is_rejected() {
    let mut c = ctl();
    let s = c
        .begin_resize("el", square(0.0), Point::new(100.0, 50.0), ResizeHandle::E)
        .unwrap();
    let err = c
        .begin_rotate("el", square(0.0), Point::new(0.0, 0.0))
        .unwrap_err();
    assert!(matches!(err, PostframeError::Gesture(_)));
    assert_eq!(c.state(), GestureState::Resizing);

    c.on_pointer_up(s).unwrap();
    assert!(c.begin_rotate("el", square(0.0), Point::new(0.0, 0.0)).is_ok());
}

#[test]
fn cancel_closes_without_commit() {
    let mut c = ctl();
    let mut s = c
        .begin_move("el", square(0.0), Point::new(0.0, 0.0))
        .unwrap();
    c.on_pointer_move(&mut s, Point::new(10.0, 0.0), Modifiers::default())
        .unwrap();
    c.cancel();
    assert_eq!(c.state(), GestureState::Idle);
    assert!(c.on_pointer_up(s).is_none());
}

#[test]
fn non_finite_pointer_is_ignored() {
    let mut c = ctl();
    assert!(
        c.begin_move("el", square(0.0), Point::new(f64::NAN, 0.0))
            .is_err()
    );
    let mut s = c
        .begin_move("el", square(0.0), Point::new(0.0, 0.0))
        .unwrap();
    assert!(
        c.on_pointer_move(&mut s, Point::new(f64::INFINITY, 0.0), Modifiers::default())
            .is_none()
    );
}

#[test]
fn handles_parse_from_short_names() {
    assert_eq!("ne".parse::<ResizeHandle>().unwrap(), ResizeHandle::Ne);
    assert_eq!(" W ".parse::<ResizeHandle>().unwrap(), ResizeHandle::W);
    assert!("x".parse::<ResizeHandle>().is_err());
    assert!(ResizeHandle::Sw.is_corner());
    assert!(!ResizeHandle::S.is_corner());
    assert_eq!(ResizeHandle::Nw.as_str(), "nw");
}
