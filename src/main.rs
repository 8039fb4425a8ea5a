mod cli;
mod config;

use chrono::{DateTime, Utc};
use clap::Parser;
use cli::{Args, Command};
use config::{discover_config, load_config_from_path, ConfigFile, CONFIG_FILENAME};
use iso38500_governance::adapters::inbound::mcp::McpServer;
use iso38500_governance::adapters::outbound::clock::{FixedClock, SystemClock};
use iso38500_governance::adapters::outbound::console::{
    QuietProgressReporter, StderrProgressReporter,
};
use iso38500_governance::adapters::outbound::filesystem::FileSystemReader;
use iso38500_governance::application::demo::run_enterprise_demo;
use iso38500_governance::application::dto::OutputFormat;
use iso38500_governance::application::factories::{
    FormatterFactory, GovernanceWorkspace, PresenterFactory, PresenterType, WorkspaceFactory,
};
use iso38500_governance::application::read_models::GovernanceReport;
use iso38500_governance::application::use_cases::ReportUseCase;
use iso38500_governance::governance::domain::{AgreementId, ApplicationId, PortfolioId, RiskLevel};
use iso38500_governance::ports::outbound::{Clock, DatasetReader, ProgressReporter};
use iso38500_governance::shared::{ExitCode, Result};
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_EVALUATOR: &str = "Governance Board";

fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let code = if e.use_stderr() {
                ExitCode::InvalidArguments
            } else {
                ExitCode::Success
            };
            // --help and --version also arrive here
            let _ = e.print();
            process::exit(code.as_i32());
        }
    };

    init_tracing(args.verbose);

    match run(args) {
        Ok(code) => process::exit(code.as_i32()),
        Err(e) => {
            eprintln!("\n❌ An error occurred:\n");
            eprintln!("{}", e);

            // Display error chain
            let mut source = e.source();
            while let Some(err) = source {
                eprintln!("\nCaused by: {}", err);
                source = err.source();
            }

            eprintln!();
            process::exit(ExitCode::ApplicationError.as_i32());
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(fmt::layer().without_time().with_writer(std::io::stderr))
        .try_init();
}

/// Effective options after merging CLI flags over the config file
#[derive(Debug, Clone, PartialEq)]
struct Settings {
    format: OutputFormat,
    evaluator: String,
    data_file: Option<PathBuf>,
    fail_on: Option<RiskLevel>,
    as_of: Option<DateTime<Utc>>,
}

impl Settings {
    /// Precedence: CLI flag, then config file, then default
    fn resolve(args: &Args, config: Option<&ConfigFile>) -> Result<Self> {
        let default_config = ConfigFile::default();
        let config = config.unwrap_or(&default_config);

        Ok(Self {
            format: match args.format {
                Some(format) => format,
                None => config.output_format()?.unwrap_or_default(),
            },
            evaluator: config
                .evaluator
                .clone()
                .unwrap_or_else(|| DEFAULT_EVALUATOR.to_string()),
            data_file: args.data.clone().or_else(|| config.data_file.clone()),
            fail_on: match args.fail_on {
                Some(level) => Some(level),
                None => config.fail_on_level()?,
            },
            as_of: match args.as_of {
                Some(instant) => Some(instant),
                None => config.as_of_instant()?,
            },
        })
    }

    fn clock(&self) -> Arc<dyn Clock> {
        match self.as_of {
            Some(instant) => Arc::new(FixedClock::new(instant)),
            None => Arc::new(SystemClock),
        }
    }
}

fn run(args: Args) -> Result<ExitCode> {
    // Step 1: Load configuration
    let config = match &args.config {
        Some(path) => Some(load_config_from_path(path)?),
        None => discover_config(Path::new("."))?,
    };
    let settings = Settings::resolve(&args, config.as_ref())?;
    let clock = settings.clock();

    if args.command == Command::Serve {
        return serve(&settings, clock);
    }

    // Step 2: Run the governance command
    let report = if args.quiet {
        execute(&args.command, &settings, clock, QuietProgressReporter)?
    } else {
        execute(&args.command, &settings, clock, StderrProgressReporter::new())?
    };

    // Step 3: Format and present the report
    if !args.quiet {
        eprintln!("{}", FormatterFactory::progress_message(settings.format));
    }
    let formatter = FormatterFactory::create(settings.format);
    let output = formatter.format(&report)?;
    let presenter = PresenterFactory::create(PresenterType::from(args.output.clone()));
    presenter.present(&output)?;

    Ok(exit_code_for(&report, settings.fail_on))
}

fn execute<PR: ProgressReporter>(
    command: &Command,
    settings: &Settings,
    clock: Arc<dyn Clock>,
    progress_reporter: PR,
) -> Result<GovernanceReport> {
    if *command == Command::Demo {
        if settings.data_file.is_some() {
            tracing::warn!("the demo always uses the built-in enterprise dataset; --data is ignored");
        }
        let outcome = run_enterprise_demo(clock, progress_reporter, &settings.evaluator)?;
        return Ok(outcome.report);
    }

    let workspace = load_workspace(settings, clock)?;
    let reports = ReportUseCase::new(&workspace, progress_reporter);
    let mut report = reports.new_report();

    match command {
        Command::EvaluateApp {
            application_id,
            evaluator,
        } => {
            let evaluator = evaluator.as_deref().unwrap_or(&settings.evaluator);
            reports.add_application(&mut report, &ApplicationId::new(application_id.as_str())?, evaluator)?;
        }
        Command::EvaluatePortfolio { portfolio_id } => {
            reports.add_portfolio(&mut report, &PortfolioId::new(portfolio_id.as_str())?)?;
        }
        Command::Monitor {
            agreement_id,
            monitor,
        } => {
            let monitor = monitor.as_deref().unwrap_or(&settings.evaluator);
            reports.add_monitoring(&mut report, &AgreementId::new(agreement_id.as_str())?, monitor)?;
        }
        Command::Demo | Command::Serve => {}
    }

    Ok(report)
}

/// Builds a workspace seeded from the configured dataset
fn load_workspace(settings: &Settings, clock: Arc<dyn Clock>) -> Result<GovernanceWorkspace> {
    let Some(path) = settings.data_file.as_deref() else {
        anyhow::bail!(
            "No governance dataset specified.\n\n💡 Hint: Pass --data FILE, set 'data_file' in {}, or run the 'demo' command.",
            CONFIG_FILENAME
        );
    };
    let dataset = FileSystemReader::new().read_dataset(path)?;
    WorkspaceFactory::from_dataset(dataset, clock)
}

fn serve(settings: &Settings, clock: Arc<dyn Clock>) -> Result<ExitCode> {
    let workspace = match settings.data_file {
        Some(_) => load_workspace(settings, clock)?,
        None => WorkspaceFactory::in_memory(clock),
    };
    let server = McpServer::new(&workspace);

    tracing::info!("MCP server listening on stdin");
    let runtime = tokio::runtime::Builder::new_multi_thread().enable_all().build()?;
    runtime.block_on(server.serve_stdio())?;
    Ok(ExitCode::Success)
}

fn exit_code_for(report: &GovernanceReport, fail_on: Option<RiskLevel>) -> ExitCode {
    match (fail_on, report.highest_risk()) {
        (Some(threshold), Some(highest)) if highest >= threshold => ExitCode::RiskThresholdExceeded,
        _ => ExitCode::Success,
    }
}
