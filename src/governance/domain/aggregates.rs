//! Aggregate roots that guard invariants and collect domain events.
//!
//! Callers mutate through the aggregate, persist `into_inner()` or
//! `portfolio()`, then drain `take_events()` into the event log.

use super::agreement::{GovernanceAgreement, GovernanceComponent};
use super::application::Application;
use super::events::DomainEvent;
use super::ids::{AgreementId, ApplicationId, PortfolioId};
use super::portfolio::ApplicationPortfolio;
use crate::shared::{EntityKind, GovernanceError, Result};
use chrono::{DateTime, Utc};

pub struct PortfolioAggregate {
    portfolio: ApplicationPortfolio,
    events: Vec<DomainEvent>,
}

impl PortfolioAggregate {
    /// Creates a new portfolio and records `PortfolioCreated`.
    pub fn new(
        id: PortfolioId,
        name: impl Into<String>,
        description: impl Into<String>,
        owner: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Result<Self> {
        let portfolio = ApplicationPortfolio::new(id, name, description, owner, now)?;
        let event = DomainEvent::PortfolioCreated {
            portfolio_id: portfolio.id.clone(),
            name: portfolio.name.clone(),
            owner: portfolio.owner.clone(),
            occurred_at: now,
        };
        Ok(Self {
            portfolio,
            events: vec![event],
        })
    }

    /// Wraps an existing portfolio loaded from a store.
    pub fn from_portfolio(portfolio: ApplicationPortfolio) -> Self {
        Self {
            portfolio,
            events: Vec::new(),
        }
    }

    pub fn portfolio(&self) -> &ApplicationPortfolio {
        &self.portfolio
    }

    pub fn into_inner(self) -> ApplicationPortfolio {
        self.portfolio
    }

    pub fn take_events(&mut self) -> Vec<DomainEvent> {
        std::mem::take(&mut self.events)
    }

    /// Adds a governed application copy.
    ///
    /// # Errors
    /// - `AlreadyExists` for a duplicate member ID or member name
    /// - `InvalidState` when the application has no governance agreement
    pub fn add_application(&mut self, app: Application, now: DateTime<Utc>) -> Result<()> {
        app.validate()?;
        if self.portfolio.contains(&app.id) {
            return Err(GovernanceError::already_exists(EntityKind::PortfolioMember, &app.id).into());
        }
        if self
            .portfolio
            .applications
            .iter()
            .any(|existing| existing.name == app.name)
        {
            return Err(GovernanceError::already_exists(EntityKind::PortfolioMember, &app.name).into());
        }
        let agreement_id = app.governance_agreement_id.clone().ok_or_else(|| {
            GovernanceError::invalid_state(format!(
                "application {} must have a governance agreement before joining a portfolio",
                app.id
            ))
        })?;

        let event = DomainEvent::ApplicationAddedToPortfolio {
            portfolio_id: self.portfolio.id.clone(),
            application_id: app.id.clone(),
            application_name: app.name.clone(),
            governance_agreement_id: Some(agreement_id),
            occurred_at: now,
        };
        self.portfolio.add_application(app, now)?;
        self.events.push(event);
        Ok(())
    }

    pub fn remove_application(&mut self, app_id: &ApplicationId, now: DateTime<Utc>) -> Result<Application> {
        let removed = self.portfolio.remove_application(app_id, now)?;
        self.events.push(DomainEvent::ApplicationRemovedFromPortfolio {
            portfolio_id: self.portfolio.id.clone(),
            application_id: removed.id.clone(),
            application_name: removed.name.clone(),
            occurred_at: now,
        });
        Ok(removed)
    }

    /// Replaces a member copy with a fresh snapshot.
    pub fn update_application(&mut self, app: Application, now: DateTime<Utc>) -> Result<()> {
        let event = DomainEvent::ApplicationUpdated {
            portfolio_id: self.portfolio.id.clone(),
            application_id: app.id.clone(),
            application_name: app.name.clone(),
            occurred_at: now,
        };
        self.portfolio.replace_application(app, now)?;
        self.events.push(event);
        Ok(())
    }
}

pub struct AgreementAggregate {
    agreement: GovernanceAgreement,
    events: Vec<DomainEvent>,
}

impl AgreementAggregate {
    /// Creates a draft agreement and records `GovernanceAgreementCreated`.
    pub fn new(
        id: AgreementId,
        application_id: ApplicationId,
        title: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Result<Self> {
        let agreement = GovernanceAgreement::new(id, application_id, title, now)?;
        let event = DomainEvent::GovernanceAgreementCreated {
            agreement_id: agreement.id.clone(),
            application_id: agreement.application_id.clone(),
            title: agreement.title.clone(),
            occurred_at: now,
        };
        Ok(Self {
            agreement,
            events: vec![event],
        })
    }

    pub fn from_agreement(agreement: GovernanceAgreement) -> Self {
        Self {
            agreement,
            events: Vec::new(),
        }
    }

    pub fn agreement(&self) -> &GovernanceAgreement {
        &self.agreement
    }

    pub fn into_inner(self) -> GovernanceAgreement {
        self.agreement
    }

    pub fn take_events(&mut self) -> Vec<DomainEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn update_component(&mut self, component: GovernanceComponent, now: DateTime<Utc>) {
        let name = self.agreement.replace_component(component, now);
        self.events.push(DomainEvent::GovernanceAgreementUpdated {
            agreement_id: self.agreement.id.clone(),
            component: name.to_string(),
            occurred_at: now,
        });
    }

    pub fn approve(&mut self, now: DateTime<Utc>) -> Result<()> {
        self.agreement.approve(now)?;
        self.events.push(DomainEvent::GovernanceAgreementApproved {
            agreement_id: self.agreement.id.clone(),
            occurred_at: now,
        });
        Ok(())
    }

    pub fn activate(&mut self, now: DateTime<Utc>) -> Result<()> {
        self.agreement.activate(now)?;
        self.events.push(DomainEvent::GovernanceAgreementActivated {
            agreement_id: self.agreement.id.clone(),
            occurred_at: now,
        });
        Ok(())
    }
}
