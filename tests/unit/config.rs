use super::*;
use crate::assets::color::Rgba8;

#[test]
fn empty_object_gives_defaults() {
    let cfg = ViewerConfig::from_reader("{}".as_bytes()).unwrap();
    assert_eq!(cfg, ViewerConfig::default());
    assert_eq!(cfg.guide_color, "#ddd");
    assert_eq!(cfg.timing, AnimationTiming::DIAGRAM);
}

#[test]
fn partial_config_overrides_fields() {
    let json = r##"{
        "asset_root": "/srv/kanji",
        "timing": { "stroke_ms": 800, "gap_ms": 500 },
        "ink": { "color": "#c00", "width": 3.5 },
        "diagram_size": 218
    }"##;
    let cfg = ViewerConfig::from_reader(json.as_bytes()).unwrap();
    assert_eq!(cfg.asset_root, "/srv/kanji");
    assert_eq!(cfg.timing, AnimationTiming::PRACTICE);
    assert_eq!(cfg.ink.color, Rgba8::rgb(0xcc, 0, 0));
    assert_eq!(cfg.ink.width, 3.5);
    assert_eq!(cfg.diagram_size, 218);
    assert_eq!(cfg.extractor().guide_color(), "#ddd");
}

#[test]
fn rejects_unknown_and_invalid() {
    let err = ViewerConfig::from_reader(r#"{"bogus": 1}"#.as_bytes()).unwrap_err();
    assert!(matches!(err, HitsujunError::Serde(_)));

    let err = ViewerConfig::from_reader(r#"{"diagram_size": 0}"#.as_bytes()).unwrap_err();
    assert!(matches!(err, HitsujunError::Configuration(_)));

    let err = ViewerConfig::from_path("/definitely/not/here.json").unwrap_err();
    assert!(matches!(err, HitsujunError::Configuration(_)));
}

#[cfg(not(feature = "http"))]
#[test]
fn url_root_needs_http_feature() {
    let cfg = ViewerConfig {
        asset_root: "https://example.invalid/kanji".to_owned(),
        ..Default::default()
    };
    assert!(cfg.source().is_err());
}
