use super::*;

fn temp_dir(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!(
        "hitsujun_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

fn rejection(path: &str) -> String {
    match asset_key(path).unwrap_err() {
        HitsujunError::Configuration(msg) => msg,
        other => panic!("expected configuration error, got {other:?}"),
    }
}

#[test]
fn asset_keys_unify_separators() {
    assert_eq!(asset_key("kanji_svg/065e5.svg").unwrap(), "kanji_svg/065e5.svg");
    assert_eq!(asset_key("kanji_svg\\065e5.svg").unwrap(), "kanji_svg/065e5.svg");
    assert_eq!(asset_key(" ./kanji_svg//065e5.svg ").unwrap(), "kanji_svg/065e5.svg");
}

#[test]
fn asset_keys_stay_under_the_root() {
    assert!(rejection("../065e5.svg").contains("escapes the asset root at '..'"));
    assert!(rejection("kanji_svg/../../etc/passwd").contains("'..'"));
    assert!(rejection("C:\\kanji_svg\\065e5.svg").contains("at 'C:'"));
    assert!(rejection("https://example.com/065e5.svg").contains("at 'https:'"));
    assert!(rejection("/srv/kanji_svg/065e5.svg").contains("is absolute"));
    assert!(rejection("  ").contains("names no file"));
    assert!(rejection("./").contains("'./'"));
}

#[test]
fn memory_source_reports_missing_as_404() {
    let src = MemorySource::new().with("a/b.svg", "<svg/>").unwrap();
    assert_eq!(src.fetch("./a/b.svg").unwrap(), b"<svg/>");

    let err = src.fetch("a/c.svg").unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert!(matches!(
        src.fetch("../a/b.svg").unwrap_err(),
        HitsujunError::Configuration(_)
    ));
}

#[test]
fn dir_source_reads_relative_files() {
    let tmp = temp_dir("dir_source");
    std::fs::create_dir_all(tmp.join("kanji_svg")).unwrap();
    std::fs::write(tmp.join("kanji_svg/065e5.svg"), "<svg/>").unwrap();

    let src = DirSource::new(&tmp);
    assert_eq!(src.fetch("kanji_svg/065e5.svg").unwrap(), b"<svg/>");

    let err = src.fetch("kanji_svg/06708.svg").unwrap_err();
    assert!(matches!(err, HitsujunError::Network { status: Some(404), .. }));

    std::fs::remove_dir_all(&tmp).ok();
}
