use std::io::{self, Write};

use crate::app::AppError;
use crate::catalog::{Application, Catalog, SystemCase, Topology, Violation, ViolationKind};
use crate::exergy::{ExergyResult, OutdoorSide, StageBalance};
use crate::i18n::{keys, Translator};
use crate::session::{Session, SessionError};

/// 대화형 세션 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    AddSystem,
    RemoveSystem,
    EditValue,
    ListSystems,
    Calculate,
    Exit,
}

/// 케이스의 입력 변수 표를 출력한다. 범위는 기본값 기준으로 계산해 보여준다.
pub fn print_parameters(tr: &Translator, case: &SystemCase) -> Result<(), AppError> {
    println!("{} {}/{}", tr.t(keys::PARAMS_HEADING), case.application, case.topology);
    println!(
        "{:<12} {:<44} {:>5} {:>9} {:>7}  {}",
        tr.t(keys::HEADER_ID),
        tr.t(keys::HEADER_LABEL),
        tr.t(keys::HEADER_UNIT),
        tr.t(keys::HEADER_DEFAULT),
        tr.t(keys::HEADER_STEP),
        tr.t(keys::HEADER_RANGE),
    );
    let defaults = case.defaults();
    for spec in &case.parameters {
        let (low, high) = spec.resolve_range(&defaults)?;
        println!(
            "{:<12} {:<44} {:>5} {:>9} {:>7}  [{}, {}] = [{low}, {high}]",
            spec.id,
            spec.label(tr.language()),
            spec.unit.symbol(),
            spec.default,
            spec.step,
            spec.range.0,
            spec.range.1,
        );
    }
    Ok(())
}

pub fn print_violations(tr: &Translator, violations: &[Violation]) {
    for v in violations {
        let kind = match v.kind {
            ViolationKind::BelowMinimum => tr.t(keys::VIOLATION_BELOW),
            ViolationKind::AboveMaximum => tr.t(keys::VIOLATION_ABOVE),
            ViolationKind::NotFinite => tr.t(keys::VIOLATION_NOT_FINITE),
        };
        println!("! {v} ({kind})");
    }
}

fn print_stage(label: &str, stage: &StageBalance, d: usize) {
    println!(
        "  {:<24} {:>10.d$} {:>10.d$} {:>10.d$}",
        label, stage.input, stage.output, stage.consumption
    );
}

/// 엑서지 수지 결과를 표 형태로 출력한다.
pub fn print_result(tr: &Translator, r: &ExergyResult, d: usize) {
    println!("{} {}", tr.t(keys::RESULT_HEADING), r.topology);

    println!("{}", tr.t(keys::RESULT_TEMPERATURES));
    let t = &r.temperatures;
    println!("  T_0 = {:.d$}", t.t_0.celsius());
    println!(
        "  T_a_int_in = {:.d$}, T_a_int_out = {:.d$}",
        t.t_a_int_in.celsius(),
        t.t_a_int_out.celsius()
    );
    if let (Some(t_in), Some(t_out)) = (r.t_a_ext_in(), r.t_a_ext_out()) {
        println!(
            "  T_a_ext_in = {:.d$}, T_a_ext_out = {:.d$}",
            t_in.celsius(),
            t_out.celsius()
        );
    }
    if let OutdoorSide::Ground { t_g, .. } = r.outdoor {
        println!("  T_g = {:.d$}", t_g.celsius());
    }
    println!(
        "  T_r_int = {:.d$}, T_r_ext = {:.d$}",
        t.t_r_int.celsius(),
        t.t_r_ext.celsius()
    );

    println!("{}", tr.t(keys::RESULT_PERFORMANCE));
    let c = &r.capacities;
    println!("  COP = {:.d$}", r.cop);
    println!(
        "  Q_r_int = {:.d$} kW, E_cmp = {:.d$} kW, Q_r_ext = {:.d$} kW",
        c.q_r_int, c.e_cmp, c.q_r_ext
    );
    println!(
        "  V_int = {:.d$} m3/s, m_int = {:.d$} kg/s",
        r.indoor_air.volume_flow, r.indoor_air.mass_flow
    );
    match &r.outdoor {
        OutdoorSide::Air { stream, .. } => println!(
            "  V_ext = {:.d$} m3/s, m_ext = {:.d$} kg/s",
            stream.volume_flow, stream.mass_flow
        ),
        OutdoorSide::Ground { q_g, x_g, .. } => {
            println!("  Q_g = {q_g:.d$} kW, X_g = {x_g:.d$} kW")
        }
    }

    println!("{}", tr.t(keys::RESULT_STAGES));
    println!(
        "  {:<24} {:>10} {:>10} {:>10}",
        "",
        tr.t(keys::COLUMN_INPUT),
        tr.t(keys::COLUMN_OUTPUT),
        tr.t(keys::COLUMN_CONSUMPTION)
    );
    let outdoor_label = match r.topology {
        Topology::Ashp => tr.t(keys::STAGE_OUTDOOR),
        Topology::Gshp => tr.t(keys::STAGE_GROUND),
    };
    print_stage(tr.t(keys::STAGE_INDOOR), &r.indoor_unit, d);
    print_stage(tr.t(keys::STAGE_REFRIGERANT), &r.refrigerant, d);
    print_stage(outdoor_label, &r.outdoor_unit, d);
    print_stage(tr.t(keys::STAGE_TOTAL), &r.total, d);

    println!("{}", tr.t(keys::RESULT_WATERFALL));
    for step in r.waterfall() {
        println!("  {:<10} {:>10.d$}", step.label, step.value);
    }
    println!(
        "{}: {:.1} %",
        tr.t(keys::RESULT_EFFICIENCY),
        r.exergy_efficiency() * 100.0
    );
}

/// 여러 형식의 결과를 나란히 비교한다.
pub fn print_comparison(tr: &Translator, results: &[ExergyResult], d: usize) {
    println!("{}", tr.t(keys::RESULT_COMPARE_HEADING));
    print!("  {:<14}", "");
    for r in results {
        print!(" {:>10}", r.topology.to_string());
    }
    println!();
    let rows: [(&str, fn(&ExergyResult) -> f64); 8] = [
        ("COP", |r| r.cop),
        ("E_cmp", |r| r.capacities.e_cmp),
        ("Xin_total", |r| r.total.input),
        ("Xc_int", |r| r.indoor_unit.consumption),
        ("Xc_r", |r| r.refrigerant.consumption),
        ("Xc_ext/GHE", |r| r.outdoor_unit.consumption),
        ("Xc_total", |r| r.total.consumption),
        ("Xout_useful", |r| r.useful_output()),
    ];
    for (label, get) in rows {
        print!("  {label:<14}");
        for r in results {
            print!(" {:>10.d$}", get(r));
        }
        println!();
    }
}

/// 대화형 세션을 실행한다. 시스템 모음은 이 함수가 소유한다.
pub fn run_session(tr: &Translator, catalog: &Catalog, d: usize) -> Result<(), AppError> {
    let mut session = Session::new();
    loop {
        match session_menu(tr)? {
            MenuChoice::AddSystem => {
                let topology = loop {
                    match read_line(tr.t(keys::PROMPT_TOPOLOGY))?.trim() {
                        "1" => break Topology::Ashp,
                        "2" => break Topology::Gshp,
                        _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
                    }
                };
                let system = session.add_system(catalog, Application::Cooling, topology)?;
                println!("{} {}", tr.t(keys::SESSION_ADDED), system.name);
            }
            MenuChoice::RemoveSystem => {
                let name = read_line(tr.t(keys::PROMPT_SYSTEM_NAME))?;
                match session.remove_system(name.trim()) {
                    Ok(removed) => println!("{} {}", tr.t(keys::SESSION_REMOVED), removed.name),
                    Err(e) => report(tr, &e),
                }
            }
            MenuChoice::EditValue => {
                let name = read_line(tr.t(keys::PROMPT_SYSTEM_NAME))?;
                let id = read_line(tr.t(keys::PROMPT_PARAMETER_ID))?;
                let value = read_f64(tr, tr.t(keys::PROMPT_VALUE))?;
                match session.set_value(catalog, name.trim(), id.trim(), value) {
                    Ok(violations) => {
                        println!("{} {} = {value}", tr.t(keys::SESSION_UPDATED), id.trim());
                        print_violations(tr, &violations);
                    }
                    Err(e) => report(tr, &e),
                }
            }
            MenuChoice::ListSystems => {
                if session.is_empty() {
                    println!("{}", tr.t(keys::SESSION_EMPTY));
                }
                for s in session.systems() {
                    let values: Vec<String> =
                        s.inputs.iter().map(|(k, v)| format!("{k}={v}")).collect();
                    println!("  {} [{}] {}", s.name, s.topology, values.join(", "));
                }
            }
            MenuChoice::Calculate => {
                if session.is_empty() {
                    println!("{}", tr.t(keys::SESSION_EMPTY));
                }
                for (name, result) in session.compute_all() {
                    println!("\n== {name} ==");
                    match result {
                        Ok(r) => print_result(tr, &r, d),
                        Err(e) => println!("{}: {e}", tr.t(keys::ERROR_PREFIX)),
                    }
                }
            }
            MenuChoice::Exit => {
                println!("{}", tr.t(keys::APP_EXIT));
                break;
            }
        }
    }
    Ok(())
}

fn report(tr: &Translator, err: &SessionError) {
    println!("{}: {err}", tr.t(keys::ERROR_PREFIX));
}

/// 세션 메뉴를 표시하고 선택값을 반환한다.
fn session_menu(tr: &Translator) -> Result<MenuChoice, AppError> {
    println!("{}", tr.t(keys::SESSION_MENU_TITLE));
    println!("{}", tr.t(keys::SESSION_MENU_ADD));
    println!("{}", tr.t(keys::SESSION_MENU_REMOVE));
    println!("{}", tr.t(keys::SESSION_MENU_EDIT));
    println!("{}", tr.t(keys::SESSION_MENU_LIST));
    println!("{}", tr.t(keys::SESSION_MENU_CALCULATE));
    println!("{}", tr.t(keys::SESSION_MENU_EXIT));
    loop {
        let sel = match read_line(tr.t(keys::PROMPT_MENU_SELECT)) {
            Ok(sel) => sel,
            // 입력이 끝나면 종료로 처리한다.
            Err(AppError::Io(e)) if e.kind() == io::ErrorKind::UnexpectedEof => {
                return Ok(MenuChoice::Exit)
            }
            Err(e) => return Err(e),
        };
        match sel.trim() {
            "1" => return Ok(MenuChoice::AddSystem),
            "2" => return Ok(MenuChoice::RemoveSystem),
            "3" => return Ok(MenuChoice::EditValue),
            "4" => return Ok(MenuChoice::ListSystems),
            "5" => return Ok(MenuChoice::Calculate),
            "0" => return Ok(MenuChoice::Exit),
            _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

fn read_line(prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut buf = String::new();
    if io::stdin().read_line(&mut buf)? == 0 {
        return Err(io::Error::from(io::ErrorKind::UnexpectedEof).into());
    }
    Ok(buf)
}

fn read_f64(tr: &Translator, prompt: &str) -> Result<f64, AppError> {
    loop {
        let line = read_line(prompt)?;
        match line.trim().parse::<f64>() {
            Ok(v) => return Ok(v),
            Err(_) => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    }
}
