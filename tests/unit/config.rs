use super::*;

#[test]
fn defaults_reproduce_reference_constants() {
    let cfg = JigsawConfig::default();
    assert_eq!(cfg.grid.target_size, 1024);
    assert_eq!(cfg.grid.margin, 72);
    assert_eq!(cfg.grid.row_count, 3);
    assert_eq!(cfg.grid.input_size(), 1168);
    assert_eq!(cfg.templates.len(), 7);
    assert_eq!(cfg.templates[0], "a");
    assert_eq!((cfg.story.width, cfg.story.height), (1080, 1920));
    cfg.validate().unwrap();
}

#[test]
fn partial_json_overrides_only_named_fields() {
    let cfg = JigsawConfig::from_json_str(
        r#"{ "grid": { "margin": 16 }, "output_dir": "out", "threading": { "threads": 2 } }"#,
    )
    .unwrap();
    assert_eq!(cfg.grid.margin, 16);
    assert_eq!(cfg.grid.target_size, 1024);
    assert_eq!(cfg.output_dir, PathBuf::from("out"));
    assert_eq!(cfg.threading.threads, Some(2));
    assert!(cfg.threading.parallel);
}

#[test]
fn invalid_values_are_config_errors() {
    let err = JigsawConfig::from_json_str(r#"{ "templates": [] }"#).unwrap_err();
    assert!(matches!(err, JigsawError::Config(_)));

    let err = JigsawConfig::from_json_str(r#"{ "grid": { "row_count": 0 } }"#).unwrap_err();
    assert!(matches!(err, JigsawError::Config(_)));

    let err = JigsawConfig::from_json_str(r#"{ "story": { "canvas_width": 4000 } }"#)
        .unwrap_err();
    assert!(err.to_string().contains("neighbourhood"));

    let err = JigsawConfig::from_json_str(r#"{ "threading": { "threads": 0 } }"#).unwrap_err();
    assert!(matches!(err, JigsawError::Config(_)));
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = JigsawConfig::from_json_str("{ not json").unwrap_err();
    assert!(matches!(err, JigsawError::Serde(_)));
}

#[test]
fn layer_settings_mirror_config() {
    let cfg = JigsawConfig::default();
    let s = cfg.layer_settings();
    assert_eq!(s.geometry, cfg.grid);
    assert_eq!(s.templates, cfg.templates);
    assert_eq!(s.output_dir, PathBuf::from("output"));
}
