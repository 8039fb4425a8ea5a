use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use iso38500_governance::application::dto::OutputFormat;
use iso38500_governance::governance::domain::RiskLevel;
use std::path::PathBuf;

/// Evaluate, direct and monitor IT application portfolios (ISO/IEC 38500)
#[derive(Parser, Debug)]
#[command(name = "iso38500-governance")]
#[command(version)]
#[command(about = "Evaluate, direct and monitor IT application portfolios (ISO/IEC 38500)", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Governance dataset to load (.json, .toml, .yml or .yaml)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub data: Option<PathBuf>,

    /// Output format: json, markdown or text [default: text]
    #[arg(short, long, global = true)]
    pub format: Option<OutputFormat>,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Path to a config file (defaults to ./governance.config.yml when present)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Evaluate as of this instant (RFC 3339) instead of the current time
    #[arg(long, global = true, value_name = "RFC3339")]
    pub as_of: Option<DateTime<Utc>>,

    /// Exit with code 1 when any assessed risk reaches this level
    #[arg(long, global = true, value_name = "LEVEL")]
    pub fail_on: Option<RiskLevel>,

    /// Suppress progress output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Evaluate a single application's health, value and risk
    EvaluateApp {
        application_id: String,

        /// Name recorded as the evaluator
        #[arg(long)]
        evaluator: Option<String>,
    },
    /// Roll up the health of every application in a portfolio
    EvaluatePortfolio { portfolio_id: String },
    /// Monitor KPIs, compliance and risks for a governance agreement
    Monitor {
        agreement_id: String,

        /// Name recorded as the monitor
        #[arg(long)]
        monitor: Option<String>,
    },
    /// Run the built-in enterprise governance demo
    Demo,
    /// Serve the governance tools over MCP on stdin/stdout
    Serve,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_evaluate_app() {
        let args = Args::try_parse_from([
            "iso38500-governance",
            "evaluate-app",
            "crm",
            "--evaluator",
            "Board",
            "-f",
            "md",
        ])
        .unwrap();
        assert_eq!(
            args.command,
            Command::EvaluateApp {
                application_id: "crm".to_string(),
                evaluator: Some("Board".to_string()),
            }
        );
        assert_eq!(args.format, Some(OutputFormat::Markdown));
    }

    #[test]
    fn test_global_options_before_subcommand() {
        let args = Args::try_parse_from([
            "iso38500-governance",
            "--fail-on",
            "HIGH",
            "--as-of",
            "2024-06-01T00:00:00Z",
            "-d",
            "portfolio.json",
            "evaluate-portfolio",
            "core",
        ])
        .unwrap();
        assert_eq!(args.fail_on, Some(RiskLevel::High));
        assert!(args.as_of.is_some());
        assert_eq!(args.data, Some(PathBuf::from("portfolio.json")));
        assert_eq!(
            args.command,
            Command::EvaluatePortfolio {
                portfolio_id: "core".to_string()
            }
        );
    }

    #[test]
    fn test_invalid_fail_on() {
        let result = Args::try_parse_from(["iso38500-governance", "--fail-on", "severe", "demo"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_format() {
        let result = Args::try_parse_from(["iso38500-governance", "demo", "-f", "xml"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        let result = Args::try_parse_from(["iso38500-governance", "-q", "-v", "demo"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_subcommand_required() {
        let result = Args::try_parse_from(["iso38500-governance"]);
        assert!(result.is_err());
    }
}
