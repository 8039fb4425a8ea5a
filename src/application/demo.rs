//! Built-in enterprise dataset used by the `demo` command and the
//! `run_enterprise_demo` MCP tool.
//!
//! Every timestamp is relative to the supplied instant, so a fixed clock
//! yields a fully reproducible demo.

use crate::application::factories::WorkspaceFactory;
use crate::application::read_models::GovernanceReport;
use crate::application::use_cases::ReportUseCase;
use crate::governance::domain::{
    AgreementId, Application, ApplicationCatalogue, ApplicationId, ApplicationStatus,
    ComplianceMonitoring, Functionality, GovernanceAgreement, Kpi, KpiMeasurement, MitigationPlan,
    PortfolioId, Priority, Risk, RiskImpact, RiskLevel, RolePermission, SecurityMeasure,
    SecurityProvisions, Sla, StrategicInitiative, StrategicObjective,
};
use crate::ports::outbound::{Clock, GovernanceDataset, PortfolioSeed, ProgressReporter};
use crate::shared::Result;
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use std::time::Duration as StdDuration;

/// Applications that receive no governance agreement in the demo.
pub const UNGOVERNED_DEMO_APPLICATIONS: &[&str] = &["mobile-field-001"];

/// Agreement that receives the demo's strategic direction.
pub const DIRECTED_DEMO_AGREEMENT: &str = "gov-erp-core-001";

struct DemoApplication {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    version: &'static str,
    status: ApplicationStatus,
    age_days: i64,
}

const APPLICATIONS: &[DemoApplication] = &[
    DemoApplication {
        id: "erp-core-001",
        name: "Enterprise Resource Planning (ERP)",
        description: "Integrated enterprise resource planning system managing core business processes",
        version: "2024.2.1",
        status: ApplicationStatus::Active,
        age_days: 3 * 365,
    },
    DemoApplication {
        id: "crm-global-001",
        name: "Global Customer Relationship Management",
        description: "Unified CRM system for customer management across all business units",
        version: "12.8.0",
        status: ApplicationStatus::Active,
        age_days: 2 * 365,
    },
    DemoApplication {
        id: "scm-supply-001",
        name: "Supply Chain Management",
        description: "End-to-end supply chain visibility and management platform",
        version: "9.4.3",
        status: ApplicationStatus::Active,
        age_days: 548,
    },
    DemoApplication {
        id: "hr-talent-001",
        name: "Talent Management Suite",
        description: "Comprehensive HR and talent management platform",
        version: "8.2.1",
        status: ApplicationStatus::Active,
        age_days: 365,
    },
    DemoApplication {
        id: "finance-budget-001",
        name: "Enterprise Budgeting & Forecasting",
        description: "Advanced financial planning and budgeting system",
        version: "15.7.0",
        status: ApplicationStatus::Active,
        age_days: 822,
    },
    DemoApplication {
        id: "procure-source-001",
        name: "Strategic Sourcing Platform",
        description: "Supplier management and strategic procurement system",
        version: "6.9.2",
        status: ApplicationStatus::Deprecated,
        age_days: 4 * 365,
    },
    DemoApplication {
        id: "infra-monitoring-001",
        name: "Infrastructure Monitoring Platform",
        description: "Unified monitoring and alerting for all IT infrastructure",
        version: "4.2.8",
        status: ApplicationStatus::Active,
        age_days: 608,
    },
    DemoApplication {
        id: "security-siem-001",
        name: "Security Information & Event Management",
        description: "Enterprise security monitoring and threat detection",
        version: "3.1.5",
        status: ApplicationStatus::Active,
        age_days: 426,
    },
    DemoApplication {
        id: "backup-enterprise-001",
        name: "Enterprise Backup & Recovery",
        description: "Comprehensive data backup and disaster recovery platform",
        version: "11.0.3",
        status: ApplicationStatus::Active,
        age_days: 913,
    },
    DemoApplication {
        id: "analytics-bi-001",
        name: "Business Intelligence Platform",
        description: "Enterprise BI and analytics for decision support",
        version: "7.4.1",
        status: ApplicationStatus::Active,
        age_days: 487,
    },
    DemoApplication {
        id: "data-warehouse-001",
        name: "Enterprise Data Warehouse",
        description: "Centralized data warehouse for enterprise analytics",
        version: "5.8.9",
        status: ApplicationStatus::Active,
        age_days: 1156,
    },
    DemoApplication {
        id: "reporting-executive-001",
        name: "Executive Dashboard & Reporting",
        description: "Executive-level dashboards and automated reporting",
        version: "2.6.4",
        status: ApplicationStatus::Planned,
        age_days: 30,
    },
    DemoApplication {
        id: "legacy-hr-001",
        name: "Legacy HR System",
        description: "Outdated HR system scheduled for retirement",
        version: "1.2",
        status: ApplicationStatus::Deprecated,
        age_days: 8 * 365,
    },
    DemoApplication {
        id: "legacy-finance-001",
        name: "Legacy Financial System",
        description: "Deprecated financial system with known vulnerabilities",
        version: "",
        status: ApplicationStatus::Retired,
        age_days: 6 * 365,
    },
    DemoApplication {
        id: "mobile-field-001",
        name: "Field Service Mobile App",
        description: "Pilot mobile application for field technicians",
        version: "0.9",
        status: ApplicationStatus::Planned,
        age_days: 14,
    },
];

const PORTFOLIOS: &[(&str, &str, &str, &str, &[&str])] = &[
    (
        "portfolio-core-business",
        "Core Business Systems Portfolio",
        "Mission-critical business applications supporting core operations",
        "Chief Information Officer",
        &["erp-core-001", "crm-global-001", "scm-supply-001"],
    ),
    (
        "portfolio-hr-finance",
        "HR & Finance Systems Portfolio",
        "Human resources and financial management applications",
        "Chief Financial Officer",
        &["hr-talent-001", "finance-budget-001"],
    ),
    (
        "portfolio-infrastructure",
        "IT Infrastructure Portfolio",
        "Core IT infrastructure and security systems",
        "Chief Technology Officer",
        &["infra-monitoring-001", "security-siem-001", "backup-enterprise-001"],
    ),
    (
        "portfolio-analytics",
        "Business Intelligence Portfolio",
        "Data analytics and business intelligence platforms",
        "Chief Data Officer",
        &["analytics-bi-001", "data-warehouse-001", "reporting-executive-001"],
    ),
    (
        "portfolio-legacy-migration",
        "Legacy System Migration Portfolio",
        "Applications targeted for modernization or retirement",
        "IT Transformation Director",
        &["legacy-hr-001", "legacy-finance-001", "procure-source-001"],
    ),
];

/// Builds the enterprise demo dataset as of `now`
///
/// Fifteen applications across five portfolios. Every application except
/// those in [`UNGOVERNED_DEMO_APPLICATIONS`] gets a draft agreement with
/// ID `gov-<application id>`.
pub fn enterprise_dataset(now: DateTime<Utc>) -> Result<GovernanceDataset> {
    let mut applications = Vec::with_capacity(APPLICATIONS.len());
    let mut agreements = Vec::new();

    for demo in APPLICATIONS {
        let created = now - Duration::days(demo.age_days);
        let mut app = Application::new(ApplicationId::new(demo.id)?, demo.name, created)?
            .with_description(demo.description)
            .with_version(demo.version)
            .with_status(demo.status);
        app.updated_at = match demo.status {
            ApplicationStatus::Active | ApplicationStatus::Planned => now - Duration::days(7),
            _ => now - Duration::days(400),
        };
        if demo.id == "erp-core-001" || demo.id == "security-siem-001" {
            app = app
                .with_security_provisions(hardened_provisions(demo.name))
                .with_catalogue(ApplicationCatalogue {
                    functionality: vec![Functionality {
                        id: format!("{}-core", demo.id),
                        name: "Core capability".to_string(),
                        priority: Priority::Critical,
                        ..Functionality::default()
                    }],
                    last_updated: Some(now - Duration::days(20)),
                });
        }
        applications.push(app);

        if UNGOVERNED_DEMO_APPLICATIONS.contains(&demo.id) {
            continue;
        }
        let mut agreement = GovernanceAgreement::new(
            AgreementId::new(format!("gov-{}", demo.id))?,
            ApplicationId::new(demo.id)?,
            format!("Enterprise Governance Agreement for {}", demo.name),
            created,
        )?;
        if demo.status == ApplicationStatus::Active {
            agreement.conformance.compliance_monitoring = ComplianceMonitoring {
                monitoring_frequency: "monthly".to_string(),
                responsible_parties: vec!["IT Governance Office".to_string()],
                reporting_schedule: "quarterly".to_string(),
                ..ComplianceMonitoring::default()
            };
        }
        agreements.push(agreement);
    }

    let portfolios = PORTFOLIOS
        .iter()
        .map(|(id, name, description, owner, members)| -> Result<PortfolioSeed> {
            Ok(PortfolioSeed {
                id: PortfolioId::new(*id)?,
                name: name.to_string(),
                description: description.to_string(),
                owner: owner.to_string(),
                applications: members
                    .iter()
                    .map(|m| ApplicationId::new(*m))
                    .collect::<Result<Vec<_>>>()?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(GovernanceDataset {
        applications,
        agreements,
        portfolios,
        kpis: kpis(),
        kpi_measurements: kpi_measurements(now),
        risks: risks(),
        mitigation_plans: mitigation_plans(),
        ..GovernanceDataset::default()
    })
}

fn hardened_provisions(service_name: &str) -> SecurityProvisions {
    SecurityProvisions {
        data_confidentiality: vec![
            SecurityMeasure::implemented("AES-256 Encryption", "encryption"),
            SecurityMeasure::implemented("TLS 1.3", "transport"),
        ],
        data_integrity: vec![SecurityMeasure::implemented("Data Validation", "integrity")],
        application_availability: Sla {
            service_name: service_name.to_string(),
            response_time: StdDuration::from_secs(2),
            availability: 99.9,
            ..Sla::default()
        },
        application_authenticity: vec![SecurityMeasure::implemented("SSO", "identity")],
        roles_and_permissions: vec![
            RolePermission::new("admin", "all", &["read", "write", "approve"]),
            RolePermission::new("analyst", "reports", &["read"]),
        ],
    }
}

fn kpis() -> Vec<Kpi> {
    vec![
        Kpi::new("kpi-availability", "System Availability", 99.5)
            .with_category("performance")
            .with_unit("%"),
        Kpi::new("kpi-incident-cost", "Cost per Incident", 500.0)
            .with_category("efficiency")
            .with_unit("USD"),
        Kpi::new("kpi-user-satisfaction", "User Satisfaction", 80.0)
            .with_category("quality")
            .with_unit("%"),
    ]
}

fn kpi_measurements(now: DateTime<Utc>) -> Vec<KpiMeasurement> {
    let measurement = |kpi_id: &str, value: f64, target: f64, days_ago: i64| KpiMeasurement {
        kpi_id: kpi_id.to_string(),
        value,
        target,
        achieved: false,
        measured_at: now - Duration::days(days_ago),
        notes: "Monthly governance review".to_string(),
    };
    vec![
        measurement("kpi-availability", 99.1, 99.5, 35),
        measurement("kpi-availability", 99.7, 99.5, 5),
        measurement("kpi-incident-cost", 430.0, 500.0, 5),
    ]
}

fn risks() -> Vec<Risk> {
    vec![
        Risk {
            id: "risk-legacy-vulns".to_string(),
            name: "Unpatched legacy vulnerabilities".to_string(),
            description: "Retired financial system still reachable from the intranet".to_string(),
            category: "security".to_string(),
            probability: 0.8,
            impact: RiskImpact::Critical,
            level: RiskLevel::High,
        },
        Risk {
            id: "risk-vendor-lockin".to_string(),
            name: "ERP vendor lock-in".to_string(),
            description: String::new(),
            category: "strategic".to_string(),
            probability: 0.5,
            impact: RiskImpact::Medium,
            level: RiskLevel::Medium,
        },
    ]
}

fn mitigation_plans() -> Vec<MitigationPlan> {
    vec![MitigationPlan {
        risk_id: "risk-legacy-vulns".to_string(),
        actions: vec![
            "Isolate network segment".to_string(),
            "Migrate remaining reports".to_string(),
        ],
        responsible: "Security Office".to_string(),
        timeline: StdDuration::from_secs(90 * 86_400),
        budget: 120_000.0,
        effectiveness: 0.4,
    }]
}

/// Objectives and initiatives the board sets for the ERP agreement
pub fn strategic_direction(now: DateTime<Utc>) -> (Vec<StrategicObjective>, Vec<StrategicInitiative>) {
    let objectives = vec![
        StrategicObjective::new(
            "obj-cloud",
            "Cloud-first ERP",
            "Move core ERP workloads to managed cloud infrastructure",
            now + Duration::days(365),
        ),
        StrategicObjective::new(
            "obj-close",
            "Faster financial close",
            "Cut the month-end close from ten days to five",
            now + Duration::days(180),
        ),
    ];
    let initiatives = vec![StrategicInitiative {
        id: "init-erp-migration".to_string(),
        name: "ERP cloud migration".to_string(),
        description: "Phased migration of ERP modules".to_string(),
        owner: "CTO".to_string(),
        budget: 1_500_000.0,
        deadline: now + Duration::days(365),
    }];
    (objectives, initiatives)
}

/// Outcome of a full demo run
#[derive(Debug, Clone)]
pub struct DemoOutcome {
    pub report: GovernanceReport,
    pub applications: usize,
    pub governed_applications: usize,
    pub portfolios: usize,
    pub agreements: usize,
}

impl DemoOutcome {
    /// Share of applications under a governance agreement, as a percentage
    pub fn governance_coverage(&self) -> f64 {
        if self.applications == 0 {
            return 0.0;
        }
        self.governed_applications as f64 * 100.0 / self.applications as f64
    }
}

/// Seeds a fresh workspace with the enterprise dataset, sets the demo's
/// strategic direction, then evaluates and monitors everything
pub fn run_enterprise_demo<PR: ProgressReporter>(
    clock: Arc<dyn Clock>,
    progress_reporter: PR,
    reviewer: &str,
) -> Result<DemoOutcome> {
    let now = clock.now();
    let dataset = enterprise_dataset(now)?;
    let applications = dataset.applications.len();
    let agreements = dataset.agreements.len();
    let portfolios = dataset.portfolios.len();
    let governed_applications = dataset
        .applications
        .iter()
        .filter(|app| dataset.agreements.iter().any(|a| a.application_id == app.id))
        .count();

    let workspace = WorkspaceFactory::from_dataset(dataset, clock)?;
    let reports = ReportUseCase::new(&workspace, progress_reporter);

    let (objectives, initiatives) = strategic_direction(now);
    reports.governance().set_strategic_direction(
        &AgreementId::new(DIRECTED_DEMO_AGREEMENT)?,
        reviewer,
        objectives,
        initiatives,
    )?;

    let report = reports.full_review(reviewer, reviewer)?;
    Ok(DemoOutcome {
        report,
        applications,
        governed_applications,
        portfolios,
        agreements,
    })
}
