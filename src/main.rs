use std::process::ExitCode;

use clap::Parser;
use exergy_analyzer::app::{self, AppError, Cli};
use exergy_analyzer::config;

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 CLI 애플리케이션을 실행한다.
fn main() -> ExitCode {
    let cli = Cli::parse();
    match try_run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("오류: {err}");
            ExitCode::FAILURE
        }
    }
}

fn try_run(cli: &Cli) -> Result<(), AppError> {
    let cfg = config::load_or_default(&cli.config)?;

    // -v는 info, -vv 이상은 debug
    let level = match cli.verbose {
        0 => cfg.tracing_level(),
        1 => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };
    app::init_tracing(level)?;

    app::run(cli, &cfg)
}
