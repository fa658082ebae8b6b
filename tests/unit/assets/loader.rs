use super::*;
use crate::assets::source::MemorySource;
use crate::entry::model::SvgLocator;

const KANJIVG: &str = include_str!("../../fixtures/resources/kanji_svg/065e5.svg");

fn entry(chu: &str) -> Entry {
    Entry {
        chu: chu.to_owned(),
        han_viet: String::new(),
        nghia: String::new(),
        kun: vec![],
        on: vec![],
        bo: None,
        svg: SvgLocator::for_char(chu).unwrap(),
        updated_at: String::new(),
    }
}

fn source() -> MemorySource {
    MemorySource::new()
        .with("resources/kanji_svg/065e5.svg", KANJIVG)
        .unwrap()
        .with("resources/kanji_svg/06708.svg", "")
        .unwrap()
}

#[test]
fn resolve_path_prefers_explicit_then_code_point() {
    let mut e = entry("日");
    assert_eq!(
        AssetLoader::<MemorySource>::resolve_path(&e).unwrap(),
        "resources/kanji_svg/065e5.svg"
    );

    e.svg.path = String::new();
    e.svg.codepoint_hex = "065E5".to_owned();
    assert_eq!(
        AssetLoader::<MemorySource>::resolve_path(&e).unwrap(),
        "resources/kanji_svg/065e5.svg"
    );

    e.svg.codepoint_hex = String::new();
    e.chu = String::new();
    assert!(matches!(
        AssetLoader::<MemorySource>::resolve_path(&e),
        Err(HitsujunError::Configuration(_))
    ));
}

#[test]
fn load_strokes_sanitizes_and_extracts() {
    let loader = AssetLoader::new(source());
    let loaded = loader.load_strokes(&entry("日")).unwrap();
    assert_eq!(loaded.strokes.len(), 4);
    assert!(loaded.document.markup().starts_with("<svg"));
}

#[test]
fn missing_asset_is_a_network_error() {
    let loader = AssetLoader::new(source());
    let err = loader.load_strokes(&entry("火")).unwrap_err();
    assert_eq!(err.status(), Some(404));
}

#[test]
fn empty_body_degrades_to_no_strokes() {
    let loader = AssetLoader::new(source());
    let loaded = loader.load_strokes(&entry("月")).unwrap();
    assert!(loaded.document.is_empty());
    assert!(loaded.strokes.is_empty());
}

#[test]
fn stale_tickets_are_discarded() {
    let mut loader = AssetLoader::new(source());
    let first = loader.begin(&entry("日")).unwrap();
    let result = loader.fetch(&first);
    let second = loader.begin(&entry("月")).unwrap();

    assert!(loader.accept(&first, result).is_none());
    assert!(loader.is_current(&second));
    let fresh = loader.fetch(&second);
    assert!(loader.accept(&second, fresh).is_some());

    loader.invalidate();
    assert!(!loader.is_current(&second));
}
