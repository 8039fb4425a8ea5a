use crate::application::read_models::{
    ApplicationReport, GovernanceReport, MonitoringReport, PortfolioReport,
};
use crate::governance::domain::RiskLevel;
use crate::ports::outbound::ReportFormatter;
use crate::shared::Result;

const RISK_LEVELS: [RiskLevel; 4] = [
    RiskLevel::Critical,
    RiskLevel::High,
    RiskLevel::Medium,
    RiskLevel::Low,
];

/// MarkdownFormatter adapter for human-readable governance reports
pub struct MarkdownFormatter;

impl MarkdownFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Escapes pipe characters and newlines for safe Markdown table rendering
    fn escape_markdown_table_cell(text: &str) -> String {
        text.replace('|', "\\|").replace('\n', " ")
    }
}

impl Default for MarkdownFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// Helper methods for rendering sections
impl MarkdownFormatter {
    fn render_header(&self, output: &mut String, report: &GovernanceReport) {
        output.push_str("# IT Governance Report\n\n");
        output.push_str(&format!(
            "Generated at {} following the ISO/IEC 38500 Evaluate-Direct-Monitor model.\n\n",
            report.generated_at.to_rfc3339()
        ));
    }

    fn render_portfolios(&self, output: &mut String, portfolios: &[PortfolioReport]) {
        output.push_str("## Portfolio Health\n\n");
        output.push_str("| Portfolio | Owner | Applications | Active | Deprecated | Average Age (days) | Critical | High | Medium | Low |\n");
        output.push_str("|-----------|-------|--------------|--------|------------|--------------------|----------|------|--------|-----|\n");
        for portfolio in portfolios {
            let health = &portfolio.health;
            output.push_str(&format!(
                "| {} | {} | {} | {} | {} | {:.1} |",
                Self::escape_markdown_table_cell(&portfolio.portfolio_name),
                Self::escape_markdown_table_cell(&portfolio.owner),
                health.total_applications,
                health.active_applications,
                health.deprecated_applications,
                health.average_age_days(),
            ));
            for level in RISK_LEVELS {
                output.push_str(&format!(" {} |", health.risk_count(level)));
            }
            output.push('\n');
        }
        output.push('\n');
    }

    fn render_applications(&self, output: &mut String, applications: &[ApplicationReport]) {
        output.push_str("## Application Assessments\n\n");
        output.push_str("| Application | Risk | Code Quality | Documentation | Security | Performance | Test Coverage | Business Alignment | Cost Efficiency |\n");
        output.push_str("|-------------|------|--------------|---------------|----------|-------------|---------------|--------------------|-----------------|\n");
        for app in applications {
            let a = &app.assessment;
            let h = &a.technical_health;
            output.push_str(&format!(
                "| {} | {} {} | {}/5 | {}/5 | {}/5 | {}/5 | {:.0}% | {:.0}% | {:.0}% |\n",
                Self::escape_markdown_table_cell(&app.application_name),
                a.risk_level.emoji(),
                a.risk_level,
                h.code_quality,
                h.documentation,
                h.security_score,
                h.performance_score,
                h.test_coverage,
                a.business_value.business_alignment,
                a.business_value.cost_efficiency,
            ));
        }
        output.push('\n');

        let with_recommendations: Vec<_> = applications
            .iter()
            .filter(|app| !app.assessment.recommendations.is_empty())
            .collect();
        if with_recommendations.is_empty() {
            return;
        }

        output.push_str("### Recommendations\n\n");
        output.push_str("| Application | ID | Type | Priority | Effort (hours) | Description | Business Impact |\n");
        output.push_str("|-------------|----|------|----------|----------------|-------------|-----------------|\n");
        for app in with_recommendations {
            for rec in &app.assessment.recommendations {
                output.push_str(&format!(
                    "| {} | {} | {} | {} | {} | {} | {} |\n",
                    Self::escape_markdown_table_cell(&app.application_name),
                    rec.id,
                    rec.kind,
                    rec.priority,
                    rec.estimated_effort.as_secs() / 3600,
                    Self::escape_markdown_table_cell(&rec.description),
                    Self::escape_markdown_table_cell(&rec.business_impact),
                ));
            }
        }
        output.push('\n');
    }

    fn render_monitoring(&self, output: &mut String, monitoring: &[MonitoringReport]) {
        output.push_str("## Governance Monitoring\n\n");
        for entry in monitoring {
            let result = &entry.result;
            output.push_str(&format!("### Agreement {}\n\n", entry.agreement_id));

            if result.kpi_measurements.is_empty() {
                output.push_str("*No KPI measurements*\n\n");
            } else {
                output.push_str("| KPI | Value | Target | Achieved | Notes |\n");
                output.push_str("|-----|-------|--------|----------|-------|\n");
                for m in &result.kpi_measurements {
                    output.push_str(&format!(
                        "| {} | {:.1} | {:.1} | {} | {} |\n",
                        Self::escape_markdown_table_cell(&m.kpi_id),
                        m.value,
                        m.target,
                        if m.achieved { "✅" } else { "❌" },
                        Self::escape_markdown_table_cell(&m.notes),
                    ));
                }
                output.push('\n');
            }

            let risks = &result.risk_status;
            if risks.risk_indicators.is_empty() {
                output.push_str("*No risk indicators*\n\n");
            } else {
                output.push_str("| Risk Indicator | Value | Threshold | Status |\n");
                output.push_str("|----------------|-------|-----------|--------|\n");
                for indicator in &risks.risk_indicators {
                    output.push_str(&format!(
                        "| {} | {:.1} | {:.1} | {} {} |\n",
                        Self::escape_markdown_table_cell(&indicator.name),
                        indicator.value,
                        indicator.threshold,
                        indicator.status.emoji(),
                        indicator.status,
                    ));
                }
                output.push('\n');
            }

            if !risks.mitigation_tracking.is_empty() {
                output.push_str("| Mitigation | Status | Progress | Responsible |\n");
                output.push_str("|------------|--------|----------|-------------|\n");
                for tracking in &risks.mitigation_tracking {
                    output.push_str(&format!(
                        "| {} | {} | {:.0}% | {} |\n",
                        Self::escape_markdown_table_cell(&tracking.mitigation_id),
                        tracking.status,
                        tracking.progress * 100.0,
                        Self::escape_markdown_table_cell(&tracking.notes),
                    ));
                }
                output.push('\n');
            }
        }
    }
}

impl ReportFormatter for MarkdownFormatter {
    fn format(&self, report: &GovernanceReport) -> Result<String> {
        let mut output = String::new();
        self.render_header(&mut output, report);

        if !report.portfolios.is_empty() {
            self.render_portfolios(&mut output, &report.portfolios);
        }
        if !report.applications.is_empty() {
            self.render_applications(&mut output, &report.applications);
        }
        if !report.monitoring.is_empty() {
            self.render_monitoring(&mut output, &report.monitoring);
        }
        if report.is_empty() {
            output.push_str("*Nothing was evaluated*\n");
        }
        Ok(output)
    }
}
