use crate::application::read_models::{
    ApplicationReport, GovernanceReport, MonitoringReport, PortfolioReport,
};
use crate::governance::domain::RiskLevel;
use crate::ports::outbound::ReportFormatter;
use crate::shared::Result;
use std::fmt::Write;

/// Recommendations listed per application before the rest are summarized.
const MAX_LISTED_RECOMMENDATIONS: usize = 3;

/// TextFormatter adapter for terminal summaries
pub struct TextFormatter;

impl TextFormatter {
    pub fn new() -> Self {
        Self
    }

    fn write_application(out: &mut String, app: &ApplicationReport) -> std::fmt::Result {
        let a = &app.assessment;
        writeln!(out, "🔍 Application Evaluation Results: {}", app.application_name)?;
        writeln!(out, "   📊 Risk Level: {} {}", a.risk_level, a.risk_level.emoji())?;
        writeln!(
            out,
            "   🏥 Technical Health: {}/5",
            a.technical_health.average_score()
        )?;
        writeln!(
            out,
            "   💰 Business Value: {:.0}%",
            a.business_value.business_alignment
        )?;
        writeln!(out, "   📋 Recommendations: {}", a.recommendations.len())?;

        if !a.recommendations.is_empty() {
            writeln!(out, "   📝 Key Recommendations:")?;
            for rec in a.recommendations.iter().take(MAX_LISTED_RECOMMENDATIONS) {
                writeln!(out, "      • [{}] {}", rec.priority, rec.description)?;
            }
            if a.recommendations.len() > MAX_LISTED_RECOMMENDATIONS {
                writeln!(
                    out,
                    "      ... and {} more",
                    a.recommendations.len() - MAX_LISTED_RECOMMENDATIONS
                )?;
            }
        }
        writeln!(out)
    }

    fn write_portfolio(out: &mut String, portfolio: &PortfolioReport) -> std::fmt::Result {
        let health = &portfolio.health;
        writeln!(
            out,
            "📊 Portfolio Evaluation Results: {} (owner: {})",
            portfolio.portfolio_name, portfolio.owner
        )?;
        writeln!(out, "   📁 Total Applications: {}", health.total_applications)?;
        writeln!(out, "   ✅ Active Applications: {}", health.active_applications)?;
        writeln!(
            out,
            "   ⚠️ Deprecated Applications: {}",
            health.deprecated_applications
        )?;
        writeln!(
            out,
            "   🚨 Average Application Age: {:.1} days",
            health.average_age_days()
        )?;
        writeln!(out, "   🎯 Risk Distribution:")?;
        for level in [RiskLevel::Low, RiskLevel::Medium, RiskLevel::High, RiskLevel::Critical] {
            let count = health.risk_count(level);
            if count > 0 {
                writeln!(out, "      {} {}: {}", level.emoji(), level, count)?;
            }
        }
        writeln!(out)
    }

    fn write_monitoring(out: &mut String, entry: &MonitoringReport) -> std::fmt::Result {
        let result = &entry.result;
        writeln!(out, "📊 Governance Monitoring Results: {}", entry.agreement_id)?;
        writeln!(
            out,
            "   📈 Key Performance Indicators ({}):",
            result.kpi_measurements.len()
        )?;
        for m in &result.kpi_measurements {
            let mark = if m.achieved { "✅" } else { "❌" };
            writeln!(out, "      {} {}: {:.1} (target {:.1})", mark, m.kpi_id, m.value, m.target)?;
        }
        let risks = &result.risk_status;
        writeln!(out, "   🎯 Risk Indicators ({}):", risks.risk_indicators.len())?;
        for indicator in &risks.risk_indicators {
            writeln!(
                out,
                "      {} {}: {:.1}/{:.1} ({})",
                indicator.status.emoji(),
                indicator.name,
                indicator.value,
                indicator.threshold,
                indicator.status
            )?;
        }
        for tracking in &risks.mitigation_tracking {
            writeln!(
                out,
                "      🛠️ {}: {} ({:.0}%)",
                tracking.mitigation_id,
                tracking.status,
                tracking.progress * 100.0
            )?;
        }
        writeln!(out)
    }

    fn render(out: &mut String, report: &GovernanceReport) -> std::fmt::Result {
        if !report.portfolios.is_empty() {
            writeln!(out, "📁 Application Portfolios ({} total):", report.portfolios.len())?;
            writeln!(out)?;
            for portfolio in &report.portfolios {
                Self::write_portfolio(out, portfolio)?;
            }
        }
        for app in &report.applications {
            Self::write_application(out, app)?;
        }
        for entry in &report.monitoring {
            Self::write_monitoring(out, entry)?;
        }
        if report.is_empty() {
            writeln!(out, "Nothing was evaluated.")?;
        }
        Ok(())
    }
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for TextFormatter {
    fn format(&self, report: &GovernanceReport) -> Result<String> {
        let mut out = String::new();
        Self::render(&mut out, report)
            .map_err(|e| anyhow::anyhow!("Failed to render text report: {}", e))?;
        Ok(out)
    }
}
