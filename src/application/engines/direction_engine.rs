use crate::governance::domain::{
    AgreementId, BudgetAllocation, GovernanceAgreement, PersonnelAllocation, Policy, Procedure,
    Standard, StrategicInitiative, StrategicObjective,
};
use crate::governance::services::DirectionPlanner;
use crate::ports::outbound::{Clock, GovernanceAgreementRepository};
use crate::shared::Result;
use std::sync::Arc;

/// DirectionEngine - the "Direct" side of governance
///
/// Each operation loads the agreement, replaces one part of its direction
/// and writes it back.
pub struct DirectionEngine {
    agreements: Arc<dyn GovernanceAgreementRepository>,
    clock: Arc<dyn Clock>,
}

impl DirectionEngine {
    pub fn new(agreements: Arc<dyn GovernanceAgreementRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { agreements, clock }
    }

    /// Replaces objectives and initiatives and regenerates the action plans
    ///
    /// # Errors
    /// Returns `NotFound` if the agreement does not exist
    pub fn set_strategic_direction(
        &self,
        agreement_id: &AgreementId,
        director: &str,
        objectives: Vec<StrategicObjective>,
        initiatives: Vec<StrategicInitiative>,
    ) -> Result<GovernanceAgreement> {
        let mut agreement = self.agreements.find_by_id(agreement_id)?;
        tracing::debug!(
            agreement = %agreement_id,
            director,
            objectives = objectives.len(),
            "setting strategic direction"
        );
        DirectionPlanner::set_strategic_direction(&mut agreement, objectives, initiatives, self.clock.now());
        self.agreements.update(&agreement)?;
        Ok(agreement)
    }

    pub fn allocate_resources(
        &self,
        agreement_id: &AgreementId,
        budget: Vec<BudgetAllocation>,
        personnel: Vec<PersonnelAllocation>,
    ) -> Result<GovernanceAgreement> {
        let mut agreement = self.agreements.find_by_id(agreement_id)?;
        DirectionPlanner::allocate_resources(&mut agreement, budget, personnel, self.clock.now());
        self.agreements.update(&agreement)?;
        Ok(agreement)
    }

    pub fn establish_policies(
        &self,
        agreement_id: &AgreementId,
        policies: Vec<Policy>,
        standards: Vec<Standard>,
        procedures: Vec<Procedure>,
    ) -> Result<GovernanceAgreement> {
        let mut agreement = self.agreements.find_by_id(agreement_id)?;
        DirectionPlanner::establish_policies(
            &mut agreement,
            policies,
            standards,
            procedures,
            self.clock.now(),
        );
        self.agreements.update(&agreement)?;
        Ok(agreement)
    }
}
