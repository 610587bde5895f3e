use super::*;

#[test]
fn defaults_match_cli_defaults() {
    let r = ScheduleRequest::new(1.0, 256.0);
    assert_eq!(r.step, StepMode::Integer(1));
    assert_eq!(r.dialect, Dialect::Generic);
    assert_eq!(r.convergence, "1e-6");
    assert_eq!(r.effective_final_iterations(), 25);
}

#[test]
fn affine_style_dialects_raise_default_iterations_only_when_unset() {
    let mut r = ScheduleRequest::new(1.0, 256.0);
    r.dialect = Dialect::MultilevelHalving;
    assert_eq!(r.effective_final_iterations(), 50);
    r.dialect = Dialect::Affine;
    assert_eq!(r.effective_final_iterations(), 50);
    r.final_iterations = Some(25);
    assert_eq!(r.effective_final_iterations(), 25);
    r.final_iterations = Some(7);
    assert_eq!(r.params().final_iterations, 7);
}

#[test]
fn minimal_json_fills_defaults() {
    let r = ScheduleRequest::from_json(r#"{"min_resolution": 0.5, "max_size": 64}"#).unwrap();
    assert_eq!(r, ScheduleRequest::new(0.5, 64.0));
}

#[test]
fn full_json_request() {
    let r = ScheduleRequest::from_json(
        r#"{
            "min_resolution": 1.0,
            "max_size": 128.0,
            "start_scale": 4.0,
            "final_iterations": 10,
            "step": 1,
            "dialect": "multilevel-halving",
            "convergence": "1e-7"
        }"#,
    )
    .unwrap();
    assert_eq!(r.start_scale, Some(4.0));
    assert_eq!(r.dialect, Dialect::MultilevelHalving);
    let text = r.run().unwrap();
    assert!(text.contains("\t--convergence [ 270x90,1e-7,10 ] \\\n"));
}

#[test]
fn bad_json_is_a_serde_error() {
    for bad in [
        r#"{"min_resolution": 1.0}"#,
        r#"{"min_resolution": 1.0, "max_size": 2.0, "step": "power3"}"#,
        r#"{"min_resolution": 1.0, "max_size": 2.0, "dialect": "rigid"}"#,
        r#"{"min_resolution": 1.0, "max_size": 2.0, "colour": "red"}"#,
    ] {
        let err = ScheduleRequest::from_json(bad).unwrap_err();
        assert!(matches!(err, ScheduleError::Serde(_)), "{bad}");
    }
}

#[test]
fn missing_file_reports_path() {
    let err = ScheduleRequest::from_path(Path::new("does/not/exist.json")).unwrap_err();
    assert!(matches!(err, ScheduleError::Other(_)));
    assert!(err.to_string().contains("does/not/exist.json"));
}

#[test]
fn invalid_parameters_produce_no_text() {
    let r = ScheduleRequest::new(0.0, 128.0);
    assert!(matches!(
        r.run().unwrap_err(),
        ScheduleError::InvalidConfiguration(_)
    ));
}

#[test]
fn run_matches_generate_then_render() {
    let mut r = ScheduleRequest::new(1.0, 256.0);
    r.step = StepMode::PowerOfTwo;
    r.dialect = Dialect::TwolevelDbm;
    let schedule = generate(&r.params()).unwrap();
    assert_eq!(
        r.run().unwrap(),
        render(&schedule, Dialect::TwolevelDbm, &RenderOpts::default())
    );
    assert!(r.run().unwrap().starts_with("--reg-iterations 500x500x500x102x29x25x25 \\\n"));
}
