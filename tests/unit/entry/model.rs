use super::*;
use serde_json::json;

#[test]
fn codepoint_hex_pads_to_five_digits() {
    assert_eq!(codepoint_hex("日").as_deref(), Some("065e5"));
    assert_eq!(codepoint_hex("a").as_deref(), Some("00061"));
    assert_eq!(codepoint_hex("𠀋").as_deref(), Some("2000b"));
    assert_eq!(codepoint_hex("\u{10ffff}").as_deref(), Some("10ffff"));
    assert_eq!(codepoint_hex("  "), None);
}

#[test]
fn default_path_follows_convention() {
    let loc = SvgLocator::for_char("日").unwrap();
    assert_eq!(loc.codepoint_hex, "065e5");
    assert_eq!(loc.path, "resources/kanji_svg/065e5.svg");
    assert!(loc.exists);
}

#[test]
fn entry_serializes_with_camel_case_keys() {
    let entry = Entry {
        chu: "日".to_owned(),
        han_viet: "NHẬT".to_owned(),
        nghia: "mặt trời".to_owned(),
        kun: vec![Reading::plain("ひ")],
        on: vec![],
        bo: None,
        svg: SvgLocator::for_char("日").unwrap(),
        updated_at: "2024-01-01T00:00:00.000Z".to_owned(),
    };
    let v = serde_json::to_value(&entry).unwrap();
    assert_eq!(v["hanViet"], json!("NHẬT"));
    assert_eq!(v["svg"]["codepointHex"], json!("065e5"));
    assert_eq!(v["updatedAt"], json!("2024-01-01T00:00:00.000Z"));
    assert_eq!(v["kun"][0], json!({"am": "ひ", "examples": []}));

    let back: Entry = serde_json::from_value(v).unwrap();
    assert_eq!(back, entry);
}
