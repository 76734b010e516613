use std::env;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing::{debug, error, info, warn};

use crate::pipeline::{SaveJob, SaveOutcome, SavePipeline, SaveRequest};
use crate::selection::Selection;
use crate::tagging::ExplicitFlag;

mod cli;
mod logging;
mod settings;

pub fn run() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let args = cli::Args::parse();
    let (settings, problem) = settings::load_settings();

    logging::init(&settings.log);
    if let Some(msg) = problem {
        warn!("{msg}");
    }

    if args.print_config {
        print!("{}", settings.to_toml()?);
        return Ok(ExitCode::SUCCESS);
    }

    let work_dir = match &args.work_dir {
        Some(d) => d.clone(),
        None => env::current_dir()?,
    };

    let request = SaveRequest {
        selection: Selection::collect(&args.paths, &settings.selection),
        fields: args.form_fields(),
        explicit: args.explicit,
    };

    debug!(selected = ?request.selection.paths(), "selection");

    let pipeline = Arc::new(SavePipeline::from_settings(&settings, &work_dir));
    let job = SaveJob::spawn(pipeline, request);

    if let Err(err) = ctrlc::set_handler({
        let cancel = job.cancel_token();
        move || {
            warn!("interrupted, cancelling save");
            cancel.cancel();
        }
    }) {
        error!("failed to register signal handler: {err}");
    }

    match job.wait() {
        Ok(outcome) => {
            report(&outcome);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            error!("save failed: {e}");
            Ok(ExitCode::FAILURE)
        }
    }
}

fn report(outcome: &SaveOutcome) {
    if outcome.converted {
        info!(
            "converted {} -> {}",
            outcome.source.display(),
            outcome.target.display()
        );
    }
    if let ExplicitFlag::Failed(reason) = &outcome.explicit_flag {
        warn!("saved without explicit flag: {reason}");
    }
    info!("success: {}", outcome.target.display());
}
