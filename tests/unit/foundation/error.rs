use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        ScheduleError::invalid_configuration("x")
            .to_string()
            .contains("invalid configuration:")
    );
    assert!(
        ScheduleError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = ScheduleError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn other_converts_from_anyhow_with_context() {
    let err: ScheduleError = anyhow::anyhow!("disk gone")
        .context("read request 'req.json'")
        .into();
    assert!(err.to_string().contains("read request"));
}
