//! ASHP/GSHP 엑서지 수지 회귀 테스트. 기준값은 기본 입력에 대한 손 계산 결과다.
use approx::assert_relative_eq;
use exergy_analyzer::catalog::{Application, Catalog, Topology};
use exergy_analyzer::exergy::{
    self, compute_exergy, ExergyError, OutdoorSide, StepKind, C_A, RHO_A,
};
use exergy_analyzer::inputs::InputVector;
use exergy_analyzer::units::Kelvin;

fn assert_close(actual: f64, expected: f64, tol: f64) {
    assert!(
        (actual - expected).abs() <= tol,
        "actual={actual} expected={expected} tol={tol}"
    );
}

fn defaults(topology: Topology) -> InputVector {
    Catalog::builtin()
        .expect("builtin catalog")
        .case(Application::Cooling, topology)
        .expect("cooling case")
        .defaults()
}

fn with(topology: Topology, overrides: &[(&str, f64)]) -> InputVector {
    let mut inputs = defaults(topology);
    for (id, value) in overrides {
        inputs.set(*id, *value);
    }
    inputs
}

#[test]
fn ashp_default_balance() {
    let r = compute_exergy(&defaults(Topology::Ashp), Topology::Ashp).expect("ashp");
    assert_close(r.cop, 2.97, 1e-9);
    assert_close(r.capacities.e_cmp, 5.135354, 1e-5);
    assert_close(r.capacities.q_r_ext, 20.387354, 1e-5);
    assert_close(r.temperatures.t_r_int.celsius(), 9.0, 1e-9);
    assert_close(r.temperatures.t_r_ext.celsius(), 47.0, 1e-9);
    assert_close(r.t_a_ext_out().expect("air side").celsius(), 42.0, 1e-9);

    assert_close(r.indoor_air.mass_flow, 1.517612, 1e-5);
    assert_close(r.indoor_air.volume_flow * RHO_A, r.indoor_air.mass_flow, 1e-12);
    assert_close(r.x_r_int, 1.243296, 1e-5);

    assert_close(r.indoor_unit.consumption, 0.773062, 1e-5);
    assert_close(r.refrigerant.consumption, 2.936848, 1e-5);
    assert_close(r.outdoor_unit.consumption, 0.918278, 1e-5);
    assert_close(r.total.input, 5.635354, 1e-5);
    assert_close(r.total.consumption, 4.628188, 1e-5);
    assert_close(r.useful_output(), 0.680234, 1e-5);
}

#[test]
fn gshp_default_balance() {
    let r = compute_exergy(&defaults(Topology::Gshp), Topology::Gshp).expect("gshp");
    assert_close(r.cop, 5.643, 1e-9);
    assert_close(r.capacities.e_cmp, 2.702818, 1e-5);
    assert_close(r.temperatures.t_r_ext.celsius(), 29.0, 1e-9);
    assert!(r.t_a_ext_in().is_none());

    match r.outdoor {
        OutdoorSide::Ground { q_g, x_g, x_r_ext, .. } => {
            assert_close(q_g, 18.434818, 1e-5);
            assert_close(x_g, 0.820307, 1e-5);
            assert_close(x_r_ext, 0.178271, 1e-5);
        }
        OutdoorSide::Air { .. } => panic!("GSHP는 지중 측 결과를 가져야 함"),
    }
    assert_close(r.refrigerant.consumption, 1.637792, 1e-5);
    assert_close(r.outdoor_unit.consumption, 1.122036, 1e-5);
    assert_close(r.total.consumption, 3.532890, 1e-5);
}

#[test]
fn stage_consumption_reconciles_with_total() {
    let cases = [
        (Topology::Ashp, vec![]),
        (Topology::Gshp, vec![]),
        (Topology::Ashp, vec![("T_0", 35.0), ("dT_a", 6.0), ("k", 0.55)]),
        (Topology::Gshp, vec![("T_g", 12.0), ("dT_r", 8.0), ("Q_r_int_G", 22.0)]),
    ];
    for (topology, overrides) in cases {
        let r = compute_exergy(&with(topology, &overrides), topology).expect("compute");
        assert!(
            (r.total.consumption - r.consumption_sum()).abs() < 1e-9,
            "{topology}: total={} sum={}",
            r.total.consumption,
            r.consumption_sum()
        );
        for stage in [r.indoor_unit, r.refrigerant, r.outdoor_unit, r.total] {
            assert_relative_eq!(stage.consumption, stage.input - stage.output);
        }
    }
}

#[test]
fn identical_inputs_give_identical_results() {
    let inputs = defaults(Topology::Gshp);
    let a = compute_exergy(&inputs, Topology::Gshp).expect("first");
    let b = compute_exergy(&inputs, Topology::Gshp).expect("second");
    assert_eq!(a, b);
}

#[test]
fn waterfall_runs_from_input_to_useful_output() {
    let ashp = compute_exergy(&defaults(Topology::Ashp), Topology::Ashp).expect("ashp");
    let steps = ashp.waterfall();
    let labels: Vec<&str> = steps.iter().map(|s| s.label).collect();
    assert_eq!(
        labels,
        ["Input", "X_c,int", "X_c,ref", "X_c,ext", "X_ext,out", "Output"]
    );
    let remaining: f64 = steps
        .iter()
        .filter(|s| s.kind != StepKind::Output)
        .map(|s| s.value)
        .sum();
    assert_close(remaining, ashp.useful_output(), 1e-9);

    let gshp = compute_exergy(&defaults(Topology::Gshp), Topology::Gshp).expect("gshp");
    let steps = gshp.waterfall();
    assert_eq!(steps.len(), 5);
    assert_eq!(steps[3].label, "X_c,GHE");
    assert!(steps[1..4].iter().all(|s| s.kind == StepKind::Loss));
    let remaining: f64 = steps[..4].iter().map(|s| s.value).sum();
    assert_close(remaining, gshp.useful_output(), 1e-9);
}

#[test]
fn gshp_is_more_exergy_efficient_at_defaults() {
    let ashp = compute_exergy(&defaults(Topology::Ashp), Topology::Ashp).expect("ashp");
    let gshp = compute_exergy(&defaults(Topology::Gshp), Topology::Gshp).expect("gshp");
    assert_close(ashp.exergy_efficiency(), 0.120708, 1e-5);
    assert_close(gshp.exergy_efficiency(), 0.161456, 1e-5);
    assert!(gshp.total.consumption < ashp.total.consumption);
}

#[test]
fn equal_refrigerant_temperatures_are_degenerate() {
    // T_r_int = 24 - 5 - 5 = 14, T_r_ext = 4 + 5 + 5 = 14
    let inputs = with(
        Topology::Ashp,
        &[("T_0", 4.0), ("T_a_int_in", 24.0), ("dT_a", 5.0), ("dT_r", 5.0)],
    );
    let err = compute_exergy(&inputs, Topology::Ashp).unwrap_err();
    assert!(matches!(err, ExergyError::DegenerateCop { lift, .. } if lift == 0.0));
}

#[test]
fn zero_correction_factor_is_degenerate() {
    let inputs = with(Topology::Gshp, &[("k", 0.0)]);
    let err = compute_exergy(&inputs, Topology::Gshp).unwrap_err();
    assert!(matches!(err, ExergyError::DegenerateCop { cop, .. } if cop == 0.0));
}

#[test]
fn zero_air_temperature_difference_has_no_flow() {
    let inputs = with(Topology::Ashp, &[("dT_a", 0.0)]);
    let err = compute_exergy(&inputs, Topology::Ashp).unwrap_err();
    assert_eq!(err, ExergyError::ZeroFlow { what: "V_int" });
}

#[test]
fn temperature_below_absolute_zero_is_rejected() {
    let inputs = with(Topology::Ashp, &[("T_0", -300.0)]);
    match compute_exergy(&inputs, Topology::Ashp) {
        Err(ExergyError::InvalidTemperature(e)) => {
            assert_eq!(e.what, "T_0");
            assert!(e.kelvin < 0.0);
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn missing_input_is_reported_before_arithmetic() {
    let mut inputs = defaults(Topology::Gshp);
    inputs.remove("T_g");
    match compute_exergy(&inputs, Topology::Gshp) {
        Err(ExergyError::MissingDependency { id }) => assert_eq!(id, "T_g"),
        other => panic!("unexpected: {other:?}"),
    }
    // ASHP 기본값에는 GSHP 전용 변수가 없다.
    let err = compute_exergy(&defaults(Topology::Ashp), Topology::Gshp).unwrap_err();
    assert!(matches!(err, ExergyError::MissingDependency { .. }));
}

#[test]
fn non_finite_power_inputs_are_rejected() {
    let inputs = with(Topology::Ashp, &[("Q_r_int_A", f64::NAN)]);
    match compute_exergy(&inputs, Topology::Ashp) {
        Err(ExergyError::NonFiniteInput { id, value }) => {
            assert_eq!(id, "Q_r_int_A");
            assert!(value.is_nan());
        }
        other => panic!("unexpected: {other:?}"),
    }

    let inputs = with(Topology::Gshp, &[("E_pmp_G", f64::INFINITY)]);
    let err = compute_exergy(&inputs, Topology::Gshp).unwrap_err();
    assert!(matches!(err, ExergyError::NonFiniteInput { id, .. } if id == "E_pmp_G"));

    let inputs = with(Topology::Ashp, &[("E_f_ext", f64::NEG_INFINITY)]);
    let err = compute_exergy(&inputs, Topology::Ashp).unwrap_err();
    assert!(matches!(err, ExergyError::NonFiniteInput { id, .. } if id == "E_f_ext"));
}

#[test]
fn outdoor_side_colder_than_indoor_refrigerant_is_degenerate() {
    // ASHP: T_r_int = 30 - 2 - 2 = 26, T_r_ext = -10 + 2 + 2 = -6
    let ashp = with(
        Topology::Ashp,
        &[("T_0", -10.0), ("T_a_int_in", 30.0), ("dT_a", 2.0), ("dT_r", 2.0)],
    );
    let catalog = Catalog::builtin().expect("builtin");
    assert!(catalog
        .validate(&ashp, Application::Cooling, Topology::Ashp)
        .expect("validate")
        .is_empty());
    let err = compute_exergy(&ashp, Topology::Ashp).unwrap_err();
    assert!(matches!(err, ExergyError::DegenerateCop { lift, .. } if lift < 0.0));

    // GSHP: T_r_int = 26, T_r_ext = -10 + 2 = -8
    let gshp = with(
        Topology::Gshp,
        &[
            ("T_0", 40.0),
            ("T_g", -10.0),
            ("T_a_int_in", 30.0),
            ("dT_a", 2.0),
            ("dT_r", 2.0),
        ],
    );
    let err = compute_exergy(&gshp, Topology::Gshp).unwrap_err();
    assert!(matches!(err, ExergyError::DegenerateCop { lift, .. } if lift < 0.0));
}

#[test]
fn accepted_operating_points_never_consume_negative_exergy() {
    let catalog = Catalog::builtin().expect("builtin");
    let mut computed = 0;
    for topology in [Topology::Ashp, Topology::Gshp] {
        for t_0 in [-50.0, -10.0, 0.0, 20.0, 32.0, 50.0] {
            for t_a_int_in in [-50.0, 0.0, 24.0, 50.0] {
                for dt_a in [2.0, 10.0, 60.0] {
                    for dt_r in [2.0, 5.0, 30.0] {
                        for (k, t_g) in [(0.1, -30.0), (0.4, -10.0), (1.0, 19.0)] {
                            let mut inputs = with(
                                topology,
                                &[
                                    ("T_0", t_0),
                                    ("T_a_int_in", t_a_int_in),
                                    ("dT_a", dt_a),
                                    ("dT_r", dt_r),
                                    ("k", k),
                                ],
                            );
                            if topology == Topology::Gshp {
                                inputs.set("T_g", t_g);
                            }
                            let violations = catalog
                                .validate(&inputs, Application::Cooling, topology)
                                .expect("validate");
                            if !violations.is_empty() {
                                continue;
                            }
                            match compute_exergy(&inputs, topology) {
                                Ok(r) => {
                                    computed += 1;
                                    assert!(r.cop.is_finite() && r.cop > 0.0, "cop={}", r.cop);
                                    for stage in [r.indoor_unit, r.refrigerant, r.outdoor_unit] {
                                        assert!(
                                            stage.consumption > -1e-9,
                                            "{topology} {inputs:?}: {stage:?}"
                                        );
                                    }
                                    assert!(r.total.consumption > -1e-9);
                                }
                                Err(ExergyError::DegenerateCop { .. }) => {}
                                Err(other) => panic!("{topology} {inputs:?}: {other}"),
                            }
                        }
                    }
                }
            }
        }
    }
    assert!(computed > 0);
}

#[test]
fn heat_exergy_sign_follows_temperature() {
    let t0 = Kelvin::from_celsius(32.0, "T_0").expect("t0");
    let cold = Kelvin::from_celsius(9.0, "cold").expect("cold");
    let hot = Kelvin::from_celsius(47.0, "hot").expect("hot");
    assert!(exergy::heat_exergy(10.0, cold, t0) < 0.0);
    assert!(exergy::heat_exergy(10.0, hot, t0) > 0.0);
    assert_eq!(exergy::heat_exergy(10.0, t0, t0), 0.0);
    assert_relative_eq!(C_A * RHO_A, 1.206, epsilon = 1e-12);
}

#[test]
fn kelvin_offset_applied_once() {
    let t = Kelvin::from_celsius(25.0, "t").expect("kelvin");
    assert_close(t.value(), 298.15, 1e-12);
    assert_close(t.celsius(), 25.0, 1e-12);
    assert!(Kelvin::from_celsius(-273.15, "t").is_err());
    assert!(Kelvin::new(f64::NAN, "t").is_err());
}
