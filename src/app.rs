use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use thiserror::Error;
use tracing::info;

use crate::catalog::{Application, Catalog, CatalogError, Topology};
use crate::config::{self, Config, ConfigError};
use crate::exergy::{self, ExergyError};
use crate::i18n::{self, Translator};
use crate::inputs::InputVector;
use crate::session::SessionError;
use crate::ui_cli;

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    #[error("설정 오류: {0}")]
    Config(#[from] ConfigError),
    #[error("카탈로그 오류: {0}")]
    Catalog(#[from] CatalogError),
    #[error("엑서지 계산 오류: {0}")]
    Exergy(#[from] ExergyError),
    #[error("세션 오류: {0}")]
    Session(#[from] SessionError),
    #[error("JSON 직렬화 오류: {0}")]
    Json(#[from] serde_json::Error),
    #[error("잘못된 입력 지정: '{0}' (ID=VALUE 형식)")]
    InvalidAssignment(String),
    #[error("로그 설정 오류: {0}")]
    Tracing(#[from] tracing::subscriber::SetGlobalDefaultError),
}

/// 명령행 인자.
#[derive(Debug, Parser)]
#[command(name = "exergy_analyzer", version, about = "ASHP/GSHP 엑서지 수지 계산기")]
pub struct Cli {
    /// 표시 언어 (auto/ko/en)
    #[arg(long, short = 'L', global = true, default_value = "auto")]
    pub lang: String,
    /// 설정 파일 경로
    #[arg(long, global = true, default_value = config::CONFIG_FILE)]
    pub config: PathBuf,
    /// 로그를 자세히 출력한다 (-v: info, -vv: debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// 케이스의 입력 변수 목록을 출력한다
    Params {
        #[arg(long, value_enum, default_value_t = Application::Cooling)]
        application: Application,
        #[arg(long, value_enum)]
        topology: Topology,
    },
    /// 한 시스템의 엑서지 수지를 계산한다
    Compute {
        #[arg(long, value_enum)]
        topology: Topology,
        #[command(flatten)]
        overrides: Overrides,
        /// 결과를 JSON으로 출력한다
        #[arg(long)]
        json: bool,
    },
    /// ASHP와 GSHP를 같은 조건에서 비교한다
    Compare {
        #[command(flatten)]
        overrides: Overrides,
    },
    /// 대화형으로 시스템을 추가/제거하고 계산한다
    Session,
}

#[derive(Debug, Args)]
pub struct Overrides {
    #[arg(long, value_enum, default_value_t = Application::Cooling)]
    pub application: Application,
    /// 기본값 대신 사용할 입력 (예: --set T_0=30 --set k=0.45)
    #[arg(long = "set", value_name = "ID=VALUE")]
    pub values: Vec<String>,
}

/// `ID=VALUE` 문자열을 해석한다.
pub fn parse_assignment(text: &str) -> Result<(String, f64), AppError> {
    let invalid = || AppError::InvalidAssignment(text.to_string());
    let (id, value) = text.split_once('=').ok_or_else(invalid)?;
    let id = id.trim();
    if id.is_empty() {
        return Err(invalid());
    }
    let value: f64 = value.trim().parse().map_err(|_| invalid())?;
    Ok((id.to_string(), value))
}

/// 케이스 기본값에 덮어쓰기 값을 적용한다. 케이스에 없는 기호는 `strict`이면 오류, 아니면 건너뛴다.
pub fn build_inputs(
    catalog: &Catalog,
    application: Application,
    topology: Topology,
    assignments: &[String],
    strict: bool,
) -> Result<InputVector, AppError> {
    let case = catalog.case(application, topology)?;
    let mut inputs = case.defaults();
    for text in assignments {
        let (id, value) = parse_assignment(text)?;
        if case.spec(&id).is_some() {
            inputs.set(id, value);
        } else if strict {
            return Err(CatalogError::UnknownParameter {
                application,
                topology,
                id,
            }
            .into());
        }
    }
    Ok(inputs)
}

/// 표준 오류로 출력하는 전역 tracing subscriber를 설치한다. 두 번째 호출은 실패한다.
pub fn init_tracing(level: tracing::Level) -> Result<(), AppError> {
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

/// 설정에 지정된 카탈로그 또는 내장 카탈로그를 로드한다.
pub fn load_catalog(cfg: &Config) -> Result<Catalog, CatalogError> {
    match &cfg.catalog_path {
        Some(path) => {
            info!(path = %path.display(), "사용자 카탈로그 로드");
            Catalog::from_path(path)
        }
        None => Catalog::builtin(),
    }
}

/// 명령을 실행한다.
pub fn run(cli: &Cli, cfg: &Config) -> Result<(), AppError> {
    let lang = i18n::resolve_language(&cli.lang, Some(cfg.language.as_str()));
    let tr = Translator::new(&lang);
    let catalog = load_catalog(cfg)?;
    let decimals = cfg.decimals;

    match &cli.command {
        Command::Params {
            application,
            topology,
        } => {
            let case = catalog.case(*application, *topology)?;
            ui_cli::print_parameters(&tr, case)?;
        }
        Command::Compute {
            topology,
            overrides,
            json,
        } => {
            let inputs = build_inputs(
                &catalog,
                overrides.application,
                *topology,
                &overrides.values,
                true,
            )?;
            let violations = catalog.validate(&inputs, overrides.application, *topology)?;
            let result = exergy::compute_exergy(&inputs, *topology)?;
            if *json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                ui_cli::print_violations(&tr, &violations);
                ui_cli::print_result(&tr, &result, decimals);
            }
        }
        Command::Compare { overrides } => {
            let mut results = Vec::new();
            for topology in [Topology::Ashp, Topology::Gshp] {
                // 한쪽 형식에만 있는 기호(T_g, E_f_ext 등)는 다른 쪽에서 건너뛴다.
                let inputs = build_inputs(
                    &catalog,
                    overrides.application,
                    topology,
                    &overrides.values,
                    false,
                )?;
                let violations = catalog.validate(&inputs, overrides.application, topology)?;
                ui_cli::print_violations(&tr, &violations);
                results.push(exergy::compute_exergy(&inputs, topology)?);
            }
            ui_cli::print_comparison(&tr, &results, decimals);
        }
        Command::Session => ui_cli::run_session(&tr, &catalog, decimals)?,
    }
    Ok(())
}
