mod cli;

use clap::Parser;
use cli::{Cli, Command, DtAssembleArgs};
use dtassemble::adapters::outbound::assembler::SbomasmEngine;
use dtassemble::adapters::outbound::console::StderrProgressReporter;
use dtassemble::adapters::outbound::network::DependencyTrackClient;
use dtassemble::application::factories::{PresenterFactory, PresenterType};
use dtassemble::application::use_cases::DtAssembleUseCase;
use dtassemble::assembly::domain::MISSING_PROJECTS_MESSAGE;
use dtassemble::assembly::services::ParamsValidator;
use dtassemble::config::{self, ConfigFile};
use dtassemble::shared::error::{AssembleError, ExitCode};
use dtassemble::shared::Result;
use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Parse errors exit with code 2 inside clap
    let cli = Cli::parse();

    init_tracing(cli.debug);

    if let Err(e) = run(cli).await {
        eprintln!("\n❌ An error occurred:\n");
        eprintln!("{}", e);

        // Display error chain
        let mut source = e.source();
        while let Some(err) = source {
            eprintln!("\nCaused by: {}", err);
            source = err.source();
        }

        eprintln!();
        process::exit(ExitCode::for_error(&e).as_i32());
    }
}

/// Diagnostics go to stderr; stdout is reserved for the assembled SBOM.
fn init_tracing(debug: bool) {
    let log_level = if debug { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::DtAssemble(args) => {
            // Zero identifiers is reported before the config file is touched
            if args.project_ids.is_empty() {
                return Err(AssembleError::configuration(MISSING_PROJECTS_MESSAGE).into());
            }

            let config = load_config(cli.config.as_deref())?;
            dt_assemble(args, config.as_ref()).await
        }
    }
}

/// Uses the explicit `--config` path, or the file in the current directory if any
fn load_config(path: Option<&Path>) -> Result<Option<ConfigFile>> {
    match path {
        Some(path) => config::load_config_from_path(path).map(Some),
        None => {
            let current_dir = std::env::current_dir()?;
            config::discover_config(&current_dir)
        }
    }
}

async fn dt_assemble(args: DtAssembleArgs, config: Option<&ConfigFile>) -> Result<()> {
    let timeout_secs = args
        .timeout
        .or_else(|| config.and_then(|c| c.timeout_secs))
        .unwrap_or(DependencyTrackClient::DEFAULT_TIMEOUT_SECONDS);
    let sbomasm_path = config
        .and_then(|c| c.sbomasm_path.clone())
        .unwrap_or_else(|| PathBuf::from(SbomasmEngine::DEFAULT_PROGRAM));

    // Validate before any network or process work starts
    let (flags, project_args) = args.into_raw_flags(config);
    let params = ParamsValidator::validate(flags, &project_args)?;
    tracing::debug!(
        projects = params.project_ids.len(),
        merge_mode = %params.assemble.merge_mode,
        output_spec = %params.assemble.output_spec,
        output_format = %params.assemble.output_format,
        timeout_secs,
        sbomasm = %sbomasm_path.display(),
        "validated parameters"
    );

    // Create adapters (Dependency Injection)
    let fetcher = DependencyTrackClient::with_timeout(Duration::from_secs(timeout_secs))?;
    let engine = SbomasmEngine::new(sbomasm_path);
    let progress_reporter = StderrProgressReporter::new();

    let use_case = DtAssembleUseCase::new(fetcher, engine, progress_reporter);
    let response = use_case.execute(params).await?;

    // The destination is opened only once the document exists
    let presenter = PresenterFactory::create(PresenterType::for_output(response.output.as_deref()));
    presenter.present(&response.document)?;

    Ok(())
}
