//! Governance tools exposed over MCP
//!
//! Every tool returns a human-readable text block. Evaluation and
//! monitoring results are rendered with the same text formatter the CLI
//! uses.

use super::protocol::ToolDefinition;
use crate::adapters::outbound::console::QuietProgressReporter;
use crate::adapters::outbound::formatters::TextFormatter;
use crate::application::demo::run_enterprise_demo;
use crate::application::dto::{
    CreateAgreementRequest, CreatePortfolioRequest, RegisterApplicationRequest,
    DEFAULT_APPLICATION_VERSION,
};
use crate::application::factories::GovernanceWorkspace;
use crate::application::read_models::GovernanceReport;
use crate::application::use_cases::{GovernanceUseCase, PortfolioUseCase, ReportUseCase};
use crate::governance::domain::{
    AgreementId, ApplicationId, ApplicationStatus, PortfolioId, RiskLevel,
};
use crate::ports::outbound::{Clock, ReportFormatter};
use crate::shared::Result;
use anyhow::Context;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use std::fmt::Write;
use std::sync::Arc;

const DEFAULT_ACTOR: &str = "MCP Assistant";

#[derive(Debug, Deserialize)]
struct CreateApplicationArgs {
    id: Option<String>,
    name: String,
    #[serde(default)]
    description: String,
    version: Option<String>,
    status: Option<ApplicationStatus>,
}

#[derive(Debug, Deserialize)]
struct CreatePortfolioArgs {
    id: Option<String>,
    name: String,
    #[serde(default)]
    description: String,
    owner: String,
}

#[derive(Debug, Deserialize)]
struct MembershipArgs {
    portfolio_id: String,
    application_id: String,
}

#[derive(Debug, Deserialize)]
struct CreateAgreementArgs {
    id: Option<String>,
    application_id: String,
    title: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AgreementArgs {
    agreement_id: String,
}

#[derive(Debug, Deserialize)]
struct EvaluateApplicationArgs {
    application_id: String,
    evaluator: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EvaluatePortfolioArgs {
    portfolio_id: String,
}

#[derive(Debug, Deserialize)]
struct MonitorArgs {
    agreement_id: String,
    monitor: Option<String>,
}

/// Dispatches tool calls to the governance use cases of one workspace
pub struct GovernanceTools {
    portfolios: PortfolioUseCase,
    governance: GovernanceUseCase<QuietProgressReporter>,
    reports: ReportUseCase<QuietProgressReporter>,
    clock: Arc<dyn Clock>,
    formatter: TextFormatter,
}

impl GovernanceTools {
    pub fn new(workspace: &GovernanceWorkspace) -> Self {
        Self {
            portfolios: PortfolioUseCase::new(workspace),
            governance: GovernanceUseCase::new(workspace, QuietProgressReporter),
            reports: ReportUseCase::new(workspace, QuietProgressReporter),
            clock: workspace.clock.clone(),
            formatter: TextFormatter::new(),
        }
    }

    /// Runs a tool and returns its text output
    ///
    /// # Errors
    /// Returns an error for an unknown tool, arguments that do not match the
    /// tool's schema, or a failing governance operation
    pub fn call(&self, name: &str, arguments: Value) -> Result<String> {
        match name {
            "create_application" => self.create_application(parse(name, arguments)?),
            "create_portfolio" => self.create_portfolio(parse(name, arguments)?),
            "add_to_portfolio" => self.add_to_portfolio(parse(name, arguments)?),
            "remove_from_portfolio" => self.remove_from_portfolio(parse(name, arguments)?),
            "create_governance_agreement" => self.create_agreement(parse(name, arguments)?),
            "approve_agreement" => self.approve_agreement(parse(name, arguments)?),
            "activate_agreement" => self.activate_agreement(parse(name, arguments)?),
            "evaluate_application" => self.evaluate_application(parse(name, arguments)?),
            "evaluate_portfolio" => self.evaluate_portfolio(parse(name, arguments)?),
            "monitor_governance" => self.monitor_governance(parse(name, arguments)?),
            "list_applications" => self.list_applications(),
            "list_portfolios" => self.list_portfolios(),
            "run_enterprise_demo" => self.run_enterprise_demo(),
            other => anyhow::bail!("unknown tool: {}", other),
        }
    }

    fn create_application(&self, args: CreateApplicationArgs) -> Result<String> {
        let id = match args.id {
            Some(id) => ApplicationId::new(id)?,
            None => ApplicationId::new(format!("app-{}", uuid::Uuid::new_v4()))?,
        };
        let request = RegisterApplicationRequest::new(id, args.name)
            .with_description(args.description)
            .with_version(args.version.unwrap_or_else(|| DEFAULT_APPLICATION_VERSION.to_string()))
            .with_status(args.status.unwrap_or(ApplicationStatus::Active));
        let app = self.portfolios.register_application(request)?;
        Ok(format!(
            "✅ Created application: {} ({})\nDescription: {}\nVersion: {}\nStatus: {}",
            app.name, app.id, app.description, app.version, app.status
        ))
    }

    fn create_portfolio(&self, args: CreatePortfolioArgs) -> Result<String> {
        let id = match args.id {
            Some(id) => PortfolioId::new(id)?,
            None => PortfolioId::new(format!("portfolio-{}", uuid::Uuid::new_v4()))?,
        };
        let portfolio = self.portfolios.create_portfolio(CreatePortfolioRequest {
            id,
            name: args.name,
            description: args.description,
            owner: args.owner,
        })?;
        Ok(format!(
            "✅ Created portfolio: {} ({})\nDescription: {}\nOwner: {}",
            portfolio.name, portfolio.id, portfolio.description, portfolio.owner
        ))
    }

    fn add_to_portfolio(&self, args: MembershipArgs) -> Result<String> {
        let portfolio_id = PortfolioId::new(args.portfolio_id)?;
        let application_id = ApplicationId::new(args.application_id)?;
        self.portfolios
            .add_application_to_portfolio(&portfolio_id, &application_id)?;
        Ok(format!(
            "✅ Added application {} to portfolio {}",
            application_id, portfolio_id
        ))
    }

    fn remove_from_portfolio(&self, args: MembershipArgs) -> Result<String> {
        let portfolio_id = PortfolioId::new(args.portfolio_id)?;
        let application_id = ApplicationId::new(args.application_id)?;
        self.portfolios
            .remove_application_from_portfolio(&portfolio_id, &application_id)?;
        Ok(format!(
            "✅ Removed application {} from portfolio {}",
            application_id, portfolio_id
        ))
    }

    fn create_agreement(&self, args: CreateAgreementArgs) -> Result<String> {
        let application_id = ApplicationId::new(args.application_id)?;
        let id = match args.id {
            Some(id) => AgreementId::new(id)?,
            None => AgreementId::new(format!("gov-{}", application_id))?,
        };
        let title = match args.title {
            Some(title) => title,
            None => {
                let app = self.portfolios.get_application(&application_id)?;
                format!("Governance Agreement for {}", app.name)
            }
        };
        let agreement = self.governance.create_governance_agreement(CreateAgreementRequest {
            id,
            application_id,
            title,
        })?;
        Ok(format!(
            "✅ Created governance agreement: {}\nApplication: {}\nTitle: {}\nStatus: {}",
            agreement.id, agreement.application_id, agreement.title, agreement.status
        ))
    }

    fn approve_agreement(&self, args: AgreementArgs) -> Result<String> {
        let agreement = self
            .governance
            .approve_governance_agreement(&AgreementId::new(args.agreement_id)?)?;
        Ok(format!(
            "✅ Approved governance agreement: {}\nStatus: {}",
            agreement.id, agreement.status
        ))
    }

    fn activate_agreement(&self, args: AgreementArgs) -> Result<String> {
        let agreement = self
            .governance
            .activate_governance_agreement(&AgreementId::new(args.agreement_id)?)?;
        Ok(format!(
            "✅ Activated governance agreement: {}\nStatus: {}",
            agreement.id, agreement.status
        ))
    }

    fn evaluate_application(&self, args: EvaluateApplicationArgs) -> Result<String> {
        let application_id = ApplicationId::new(args.application_id)?;
        let evaluator = args.evaluator.unwrap_or_else(|| DEFAULT_ACTOR.to_string());
        let mut report = self.reports.new_report();
        self.reports
            .add_application(&mut report, &application_id, &evaluator)?;
        self.formatter.format(&report)
    }

    fn evaluate_portfolio(&self, args: EvaluatePortfolioArgs) -> Result<String> {
        let portfolio_id = PortfolioId::new(args.portfolio_id)?;
        let mut report = self.reports.new_report();
        self.reports.add_portfolio(&mut report, &portfolio_id)?;
        self.formatter.format(&report)
    }

    fn monitor_governance(&self, args: MonitorArgs) -> Result<String> {
        let agreement_id = AgreementId::new(args.agreement_id)?;
        let monitor = args.monitor.unwrap_or_else(|| DEFAULT_ACTOR.to_string());
        let mut report = self.reports.new_report();
        self.reports
            .add_monitoring(&mut report, &agreement_id, &monitor)?;
        self.formatter.format(&report)
    }

    fn list_applications(&self) -> Result<String> {
        let apps = self.portfolios.list_applications()?;
        let mut out = format!("📋 Applications ({} total):\n\n", apps.len());
        for (i, app) in apps.iter().enumerate() {
            let status_emoji = match app.status {
                ApplicationStatus::Deprecated => "⚠️",
                ApplicationStatus::Retired => "🚫",
                ApplicationStatus::Active | ApplicationStatus::Planned => "✅",
            };
            writeln!(out, "{}. {} ({}) {}", i + 1, app.name, app.id, status_emoji)?;
            writeln!(out, "   📝 {}", app.description)?;
            writeln!(
                out,
                "   🔖 Version: {} | Created: {}\n",
                app.version,
                app.created_at.format("%Y-%m-%d")
            )?;
        }
        Ok(out)
    }

    fn list_portfolios(&self) -> Result<String> {
        let portfolios = self.portfolios.list_portfolios()?;
        let mut out = format!("📁 Application Portfolios ({} total):\n\n", portfolios.len());
        for (i, portfolio) in portfolios.iter().enumerate() {
            writeln!(out, "{}. {} ({})", i + 1, portfolio.name, portfolio.id)?;
            writeln!(out, "   👤 Owner: {}", portfolio.owner)?;
            writeln!(out, "   📝 {}", portfolio.description)?;
            writeln!(out, "   📊 Applications: {}", portfolio.applications.len())?;
            writeln!(
                out,
                "   📅 Created: {}\n",
                portfolio.created_at.format("%Y-%m-%d")
            )?;
        }
        Ok(out)
    }

    /// Runs the demo in a separate workspace; the server's own state is
    /// left untouched
    fn run_enterprise_demo(&self) -> Result<String> {
        let outcome = run_enterprise_demo(self.clock.clone(), QuietProgressReporter, DEFAULT_ACTOR)?;
        let report = &outcome.report;
        let kpis: usize = report.monitoring.iter().map(|m| m.result.kpi_measurements.len()).sum();
        let indicators: usize = report
            .monitoring
            .iter()
            .map(|m| m.result.risk_status.risk_indicators.len())
            .sum();

        let mut out = String::from("🏛️ ISO 38500 Enterprise Governance Demo\n");
        out.push_str("=====================================\n\n");
        writeln!(
            out,
            "✅ Enterprise Application Portfolio: {} applications across {} portfolios",
            outcome.applications, outcome.portfolios
        )?;
        writeln!(
            out,
            "✅ Governance Framework: {} governance agreements",
            outcome.agreements
        )?;
        writeln!(
            out,
            "✅ Risk Assessment: {} applications evaluated, highest risk {}",
            report.applications.len(),
            highest_risk_label(report)
        )?;
        writeln!(
            out,
            "✅ Strategic Direction: objectives and initiatives set for {}",
            crate::application::demo::DIRECTED_DEMO_AGREEMENT
        )?;
        writeln!(
            out,
            "✅ Monitoring: {} KPI measurements and {} risk indicators tracked\n",
            kpis, indicators
        )?;
        out.push_str("🎯 ISO 38500 Governance Principles Demonstrated:\n");
        out.push_str("• EVALUATE: application and portfolio assessment\n");
        out.push_str("• DIRECT: strategic direction setting\n");
        out.push_str("• MONITOR: KPI, compliance and risk monitoring\n\n");
        writeln!(
            out,
            "🏆 Enterprise Governance Coverage: {:.1}% of application portfolio",
            outcome.governance_coverage()
        )?;
        Ok(out)
    }
}

fn highest_risk_label(report: &GovernanceReport) -> String {
    match report.highest_risk() {
        Some(level) => format!("{} {}", level, level.emoji()),
        None => RiskLevel::Low.to_string(),
    }
}

fn parse<T: DeserializeOwned>(tool: &str, arguments: Value) -> Result<T> {
    serde_json::from_value(arguments).with_context(|| format!("Invalid arguments for {}", tool))
}

fn string_property(description: &str) -> Value {
    json!({"type": "string", "description": description})
}

fn schema(properties: Value, required: &[&str]) -> Value {
    json!({"type": "object", "properties": properties, "required": required})
}

/// Tool catalogue advertised by `tools/list`
pub fn tool_definitions() -> Vec<ToolDefinition> {
    let agreement_only = || {
        schema(
            json!({"agreement_id": string_property("Governance agreement identifier")}),
            &["agreement_id"],
        )
    };
    let membership = || {
        schema(
            json!({
                "portfolio_id": string_property("Portfolio identifier"),
                "application_id": string_property("Application identifier"),
            }),
            &["portfolio_id", "application_id"],
        )
    };
    let no_arguments = || schema(json!({}), &[]);

    vec![
        ToolDefinition {
            name: "create_application",
            description: "Register a new application in the governance portfolio",
            input_schema: schema(
                json!({
                    "id": string_property("Unique application identifier (generated when omitted)"),
                    "name": string_property("Application name"),
                    "description": string_property("Application description"),
                    "version": string_property("Application version (default 1.0.0)"),
                    "status": {
                        "type": "string",
                        "enum": ["active", "deprecated", "retired", "planned"],
                        "description": "Lifecycle status (default active)"
                    },
                }),
                &["name"],
            ),
        },
        ToolDefinition {
            name: "create_portfolio",
            description: "Create a new application portfolio",
            input_schema: schema(
                json!({
                    "id": string_property("Unique portfolio identifier (generated when omitted)"),
                    "name": string_property("Portfolio name"),
                    "description": string_property("Portfolio description"),
                    "owner": string_property("Accountable owner"),
                }),
                &["name", "owner"],
            ),
        },
        ToolDefinition {
            name: "add_to_portfolio",
            description: "Add a governed application to a portfolio",
            input_schema: membership(),
        },
        ToolDefinition {
            name: "remove_from_portfolio",
            description: "Remove an application from a portfolio",
            input_schema: membership(),
        },
        ToolDefinition {
            name: "create_governance_agreement",
            description: "Create a draft governance agreement for an application",
            input_schema: schema(
                json!({
                    "id": string_property("Agreement identifier (default gov-<application_id>)"),
                    "application_id": string_property("Governed application"),
                    "title": string_property("Agreement title"),
                }),
                &["application_id"],
            ),
        },
        ToolDefinition {
            name: "approve_agreement",
            description: "Approve a draft governance agreement",
            input_schema: agreement_only(),
        },
        ToolDefinition {
            name: "activate_agreement",
            description: "Activate an approved governance agreement",
            input_schema: agreement_only(),
        },
        ToolDefinition {
            name: "evaluate_application",
            description: "Evaluate an application's technical health, business value and risk",
            input_schema: schema(
                json!({
                    "application_id": string_property("Application to evaluate"),
                    "evaluator": string_property("Who performs the evaluation"),
                }),
                &["application_id"],
            ),
        },
        ToolDefinition {
            name: "evaluate_portfolio",
            description: "Roll up the health of every application in a portfolio",
            input_schema: schema(
                json!({"portfolio_id": string_property("Portfolio to evaluate")}),
                &["portfolio_id"],
            ),
        },
        ToolDefinition {
            name: "monitor_governance",
            description: "Monitor KPIs, compliance and risks for a governance agreement",
            input_schema: schema(
                json!({
                    "agreement_id": string_property("Governance agreement identifier"),
                    "monitor": string_property("Who performs the monitoring"),
                }),
                &["agreement_id"],
            ),
        },
        ToolDefinition {
            name: "list_applications",
            description: "List all registered applications",
            input_schema: no_arguments(),
        },
        ToolDefinition {
            name: "list_portfolios",
            description: "List all application portfolios",
            input_schema: no_arguments(),
        },
        ToolDefinition {
            name: "run_enterprise_demo",
            description: "Run the built-in enterprise governance demo",
            input_schema: no_arguments(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::outbound::clock::FixedClock;
    use crate::application::factories::WorkspaceFactory;
    use chrono::{TimeZone, Utc};

    fn tools() -> GovernanceTools {
        let clock = Arc::new(FixedClock::new(Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()));
        GovernanceTools::new(&WorkspaceFactory::in_memory(clock))
    }

    #[test]
    fn test_tool_definitions_are_unique_objects() {
        let definitions = tool_definitions();
        assert_eq!(definitions.len(), 13);
        let mut names: Vec<&str> = definitions.iter().map(|d| d.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 13);
        assert!(definitions.iter().all(|d| d.input_schema["type"] == "object"));
    }

    #[test]
    fn test_create_application_defaults() {
        let text = tools()
            .call("create_application", json!({"id": "crm", "name": "CRM"}))
            .unwrap();
        assert_eq!(
            text,
            "✅ Created application: CRM (crm)\nDescription: \nVersion: 1.0.0\nStatus: active"
        );
    }

    #[test]
    fn test_create_application_generates_id() {
        let text = tools().call("create_application", json!({"name": "CRM"})).unwrap();
        assert!(text.starts_with("✅ Created application: CRM (app-"));
    }

    #[test]
    fn test_missing_required_argument() {
        let err = tools().call("create_portfolio", json!({"name": "Core"})).unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.starts_with("Invalid arguments for create_portfolio"));
        assert!(message.contains("owner"));
    }

    #[test]
    fn test_unknown_tool() {
        let err = tools().call("delete_everything", json!({})).unwrap_err();
        assert_eq!(err.to_string(), "unknown tool: delete_everything");
    }

    #[test]
    fn test_governance_flow() {
        let tools = tools();
        tools
            .call("create_application", json!({"id": "crm", "name": "CRM", "version": "2.1.0"}))
            .unwrap();
        tools
            .call("create_portfolio", json!({"id": "core", "name": "Core", "owner": "CIO"}))
            .unwrap();

        // Ungoverned applications cannot join a portfolio
        assert!(tools
            .call("add_to_portfolio", json!({"portfolio_id": "core", "application_id": "crm"}))
            .is_err());

        let text = tools
            .call("create_governance_agreement", json!({"application_id": "crm"}))
            .unwrap();
        assert_eq!(
            text,
            "✅ Created governance agreement: gov-crm\nApplication: crm\nTitle: Governance Agreement for CRM\nStatus: draft"
        );

        let text = tools
            .call("add_to_portfolio", json!({"portfolio_id": "core", "application_id": "crm"}))
            .unwrap();
        assert_eq!(text, "✅ Added application crm to portfolio core");

        let text = tools.call("list_portfolios", json!({})).unwrap();
        assert!(text.starts_with("📁 Application Portfolios (1 total):"));
        assert!(text.contains("   📊 Applications: 1"));

        let text = tools
            .call("evaluate_application", json!({"application_id": "crm"}))
            .unwrap();
        assert!(text.contains("🔍 Application Evaluation Results: CRM"));

        let text = tools
            .call("approve_agreement", json!({"agreement_id": "gov-crm"}))
            .unwrap();
        assert!(text.ends_with("Status: approved"));
        let text = tools
            .call("activate_agreement", json!({"agreement_id": "gov-crm"}))
            .unwrap();
        assert!(text.ends_with("Status: active"));

        let text = tools
            .call("monitor_governance", json!({"agreement_id": "gov-crm"}))
            .unwrap();
        assert!(text.contains("📊 Governance Monitoring Results: gov-crm"));
    }

    #[test]
    fn test_run_enterprise_demo_summary() {
        let tools = tools();
        let text = tools.call("run_enterprise_demo", json!({})).unwrap();
        assert!(text.starts_with("🏛️ ISO 38500 Enterprise Governance Demo"));
        assert!(text.contains("15 applications across 5 portfolios"));
        assert!(text.contains("14 governance agreements"));
        assert!(text.contains("🏆 Enterprise Governance Coverage: 93.3% of application portfolio"));

        // The demo runs in its own workspace
        let listing = tools.call("list_applications", json!({})).unwrap();
        assert!(listing.starts_with("📋 Applications (0 total):"));
    }
}
