use super::*;

#[test]
fn defaults_match_engine_floors() {
    let opts = EngineOpts::default();
    assert_eq!(opts.transform.min_scale, 0.1);
    assert_eq!(opts.transform.min_size_px, 20.0);
    assert_eq!(opts.transform.rotation_snap_deg, 15.0);
    assert_eq!(opts.animation.cursor_glyph, '|');
}

#[test]
fn partial_json_overrides_only_named_fields() {
    let opts = EngineOpts::from_json(r#"{ "transform": { "rotation_snap_deg": 45 } }"#).unwrap();
    assert_eq!(opts.transform.rotation_snap_deg, 45.0);
    assert_eq!(opts.transform.min_size_px, 20.0);
    assert_eq!(opts.animation, AnimationOpts::default());
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = EngineOpts::from_json("[1, 2").unwrap_err();
    assert!(err.to_string().contains("serialization error:"));
}
