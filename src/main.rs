use std::process::ExitCode;

use log::{error, info};
use stagechain::config::AppConfig;
use stagechain::errors::AppError;
use stagechain::logging::init_logging;
use stagechain::textflow::{run_demo, sample_documents};

fn run() -> Result<(), AppError> {
    let config = AppConfig::from_env()?;
    init_logging(&config.log_filter)?;
    info!("main:start engine_version={} record_events={}",
          stagechain_core::constants::ENGINE_VERSION,
          config.controller.record_events);

    let runs = run_demo(&config, sample_documents())?;
    for run in &runs {
        println!("{} [{}] tokens={} top_terms={}",
                 run.summary.doc_id,
                 run.run_id,
                 run.summary.token_count,
                 run.summary.top_terms.join(","));
    }
    Ok(())
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("main:failed error={e}");
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
