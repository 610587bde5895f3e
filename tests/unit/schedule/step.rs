use super::*;

#[test]
fn parses_integers_and_power2() {
    assert_eq!("1".parse::<StepMode>().unwrap(), StepMode::Integer(1));
    assert_eq!(" 3 ".parse::<StepMode>().unwrap(), StepMode::Integer(3));
    assert_eq!("power2".parse::<StepMode>().unwrap(), StepMode::PowerOfTwo);
}

#[test]
fn rejects_unknown_and_non_positive() {
    for bad in ["", "power3", "1.5", "0", "-2", "two"] {
        let err = bad.parse::<StepMode>().unwrap_err();
        assert!(
            matches!(err, ScheduleError::InvalidConfiguration(_)),
            "{bad:?} should be rejected"
        );
    }
}

#[test]
fn zero_integer_fails_validation() {
    assert!(StepMode::Integer(0).validate().is_err());
    assert_eq!(StepMode::PowerOfTwo.validate().unwrap(), StepMode::PowerOfTwo);
}

#[test]
fn display_matches_cli_spelling() {
    assert_eq!(StepMode::Integer(2).to_string(), "2");
    assert_eq!(StepMode::PowerOfTwo.to_string(), "power2");
    assert_eq!(StepMode::default(), StepMode::Integer(1));
}

#[test]
fn json_accepts_number_or_name() {
    let m: StepMode = serde_json::from_str("4").unwrap();
    assert_eq!(m, StepMode::Integer(4));
    let m: StepMode = serde_json::from_str("\"power2\"").unwrap();
    assert_eq!(m, StepMode::PowerOfTwo);
    let m: StepMode = serde_json::from_str("\"2\"").unwrap();
    assert_eq!(m, StepMode::Integer(2));
    assert!(serde_json::from_str::<StepMode>("0").is_err());
    assert!(serde_json::from_str::<StepMode>("\"halving\"").is_err());

    assert_eq!(serde_json::to_string(&StepMode::PowerOfTwo).unwrap(), "\"power2\"");
    assert_eq!(serde_json::to_string(&StepMode::Integer(3)).unwrap(), "3");
}
