//! 시스템 세션 추가/제거/입력 변경/일괄 계산 테스트.
use exergy_analyzer::catalog::{Application, Catalog, Topology, ViolationKind};
use exergy_analyzer::exergy::ExergyError;
use exergy_analyzer::session::{Session, SessionError};

fn catalog() -> Catalog {
    Catalog::builtin().expect("builtin catalog")
}

#[test]
fn systems_are_numbered_without_reuse() {
    let catalog = catalog();
    let mut session = Session::new();
    assert!(session.is_empty());

    let first = session
        .add_system(&catalog, Application::Cooling, Topology::Ashp)
        .expect("add ashp");
    assert_eq!(first.name, "System 1");
    assert_eq!(first.inputs.get("E_f_ext"), Some(0.29));
    session
        .add_system(&catalog, Application::Cooling, Topology::Gshp)
        .expect("add gshp");

    let removed = session.remove_system("System 1").expect("remove");
    assert_eq!(removed.topology, Topology::Ashp);
    let third = session
        .add_system(&catalog, Application::Cooling, Topology::Ashp)
        .expect("add again");
    assert_eq!(third.name, "System 3");

    let names: Vec<&str> = session.systems().iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["System 2", "System 3"]);
    assert!(matches!(
        session.remove_system("System 1"),
        Err(SessionError::UnknownSystem(name)) if name == "System 1"
    ));
}

#[test]
fn adding_undefined_case_fails() {
    let mut session = Session::new();
    let err = session
        .add_system(&catalog(), Application::HotWater, Topology::Gshp)
        .unwrap_err();
    assert!(matches!(err, SessionError::Catalog(_)));
    assert!(session.is_empty());
}

#[test]
fn out_of_range_value_is_stored_and_reported() {
    let catalog = catalog();
    let mut session = Session::new();
    session
        .add_system(&catalog, Application::Cooling, Topology::Gshp)
        .expect("add");

    // T_g 상한은 현재 T_0
    let violations = session
        .set_value(&catalog, "System 1", "T_0", 15.0)
        .expect("set");
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].id, "T_g");
    assert_eq!(violations[0].kind, ViolationKind::AboveMaximum);
    assert_eq!(violations[0].bound, Some(15.0));
    assert_eq!(session.get("System 1").and_then(|s| s.inputs.get("T_0")), Some(15.0));

    let violations = session
        .set_value(&catalog, "System 1", "k", -0.1)
        .expect("set");
    assert_eq!(violations.len(), 2);
    assert_eq!(violations[1].id, "k");
    assert_eq!(violations[1].kind, ViolationKind::BelowMinimum);
}

#[test]
fn unknown_parameter_is_rejected() {
    let catalog = catalog();
    let mut session = Session::new();
    session
        .add_system(&catalog, Application::Cooling, Topology::Ashp)
        .expect("add");
    let err = session
        .set_value(&catalog, "System 1", "T_g", 10.0)
        .unwrap_err();
    assert!(matches!(err, SessionError::UnknownParameter { id, .. } if id == "T_g"));
    assert!(matches!(
        session.set_value(&catalog, "System 9", "T_0", 10.0),
        Err(SessionError::UnknownSystem(_))
    ));
}

#[test]
fn compute_all_keeps_system_order_and_isolates_errors() {
    let catalog = catalog();
    let mut session = Session::new();
    for topology in [Topology::Gshp, Topology::Ashp, Topology::Gshp] {
        session
            .add_system(&catalog, Application::Cooling, topology)
            .expect("add");
    }
    session
        .set_value(&catalog, "System 2", "dT_a", 0.0)
        .expect("set");

    let results = session.compute_all();
    let names: Vec<&str> = results.iter().map(|(name, _)| *name).collect();
    assert_eq!(names, ["System 1", "System 2", "System 3"]);

    let first = results[0].1.as_ref().expect("system 1");
    let third = results[2].1.as_ref().expect("system 3");
    assert_eq!(first.topology, Topology::Gshp);
    assert_eq!(first, third);
    assert_eq!(
        results[1].1.as_ref().unwrap_err(),
        &ExergyError::ZeroFlow { what: "V_int" }
    );
}
