use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        HitsujunError::configuration("x")
            .to_string()
            .contains("configuration error:")
    );
    assert!(
        HitsujunError::parse("x")
            .to_string()
            .contains("parse error:")
    );
    assert!(
        HitsujunError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
    assert_eq!(
        HitsujunError::network(None, "offline").to_string(),
        "network error: offline"
    );
}

#[test]
fn network_error_carries_status() {
    let err = HitsujunError::network(Some(404), "not found");
    assert_eq!(err.status(), Some(404));
    assert_eq!(err.to_string(), "network error (status 404): not found");
    assert_eq!(HitsujunError::parse("x").status(), None);
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = HitsujunError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn reject_reason_is_displayed() {
    let r = NormalizationReject::new("no character");
    assert_eq!(r.to_string(), "record rejected: no character");
}
