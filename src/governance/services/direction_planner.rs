use crate::governance::domain::{
    Action, ActionPlan, ActionStatus, BudgetAllocation, GovernanceAgreement, PersonnelAllocation,
    Policy, Procedure, Standard, StrategicInitiative, StrategicObjective, UNASSIGNED_OWNER,
};
use chrono::{DateTime, Duration as ChronoDuration, Utc};

/// Lead time between the seed action's deadline and its objective's deadline.
const SEED_ACTION_LEAD_DAYS: i64 = 30;

/// DirectionPlanner applies "Direct" decisions to an agreement
pub struct DirectionPlanner;

impl DirectionPlanner {
    /// Replaces the strategic direction and regenerates the action plans
    ///
    /// Objectives and initiatives are replaced wholesale, never merged.
    pub fn set_strategic_direction(
        agreement: &mut GovernanceAgreement,
        objectives: Vec<StrategicObjective>,
        initiatives: Vec<StrategicInitiative>,
        now: DateTime<Utc>,
    ) {
        agreement.direct.action_plans = Self::action_plans(&objectives);
        agreement.direct.strategic_direction.objectives = objectives;
        agreement.direct.strategic_direction.initiatives = initiatives;
        agreement.direct.last_directed = Some(now);
        agreement.updated_at = now;
    }

    pub fn allocate_resources(
        agreement: &mut GovernanceAgreement,
        budget: Vec<BudgetAllocation>,
        personnel: Vec<PersonnelAllocation>,
        now: DateTime<Utc>,
    ) {
        agreement.direct.resource_allocation.budget_allocations = budget;
        agreement.direct.resource_allocation.personnel_allocations = personnel;
        agreement.direct.last_directed = Some(now);
        agreement.updated_at = now;
    }

    pub fn establish_policies(
        agreement: &mut GovernanceAgreement,
        policies: Vec<Policy>,
        standards: Vec<Standard>,
        procedures: Vec<Procedure>,
        now: DateTime<Utc>,
    ) {
        let framework = &mut agreement.direct.policy_framework;
        framework.policies = policies;
        framework.standards = standards;
        framework.procedures = procedures;
        agreement.updated_at = now;
    }

    /// One pending plan per objective, each seeded with a single action due
    /// thirty days before the objective's deadline.
    pub fn action_plans(objectives: &[StrategicObjective]) -> Vec<ActionPlan> {
        objectives
            .iter()
            .enumerate()
            .map(|(index, objective)| {
                let number = index + 1;
                ActionPlan {
                    id: format!("ap-{}", number),
                    name: format!("Action Plan for {}", objective.name),
                    description: format!(
                        "Implementation plan for strategic objective: {}",
                        objective.description
                    ),
                    actions: vec![Action {
                        id: format!("action-{}-1", number),
                        description: "Define detailed implementation steps".to_string(),
                        responsible: UNASSIGNED_OWNER.to_string(),
                        deadline: objective.deadline - ChronoDuration::days(SEED_ACTION_LEAD_DAYS),
                        status: ActionStatus::Pending,
                    }],
                    owner: UNASSIGNED_OWNER.to_string(),
                    deadline: objective.deadline,
                    status: ActionStatus::Pending,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::governance::domain::{AgreementId, ApplicationId};
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    fn agreement() -> GovernanceAgreement {
        GovernanceAgreement::new(
            AgreementId::new("ga-1").unwrap(),
            ApplicationId::new("app-1").unwrap(),
            "CRM governance",
            now(),
        )
        .unwrap()
    }

    fn objectives() -> Vec<StrategicObjective> {
        vec![
            StrategicObjective::new(
                "obj-1",
                "Cloud migration",
                "Move workloads to the cloud",
                Utc.with_ymd_and_hms(2024, 12, 31, 0, 0, 0).unwrap(),
            ),
            StrategicObjective::new(
                "obj-2",
                "Zero trust",
                "Adopt zero trust networking",
                Utc.with_ymd_and_hms(2025, 6, 30, 0, 0, 0).unwrap(),
            ),
        ]
    }

    #[test]
    fn test_action_plans_from_objectives() {
        let plans = DirectionPlanner::action_plans(&objectives());

        assert_eq!(plans.len(), 2);
        let plan = &plans[0];
        assert_eq!(plan.id, "ap-1");
        assert_eq!(plan.name, "Action Plan for Cloud migration");
        assert_eq!(
            plan.description,
            "Implementation plan for strategic objective: Move workloads to the cloud"
        );
        assert_eq!(plan.owner, "TBD");
        assert_eq!(plan.status, ActionStatus::Pending);
        assert_eq!(plan.actions.len(), 1);

        let action = &plan.actions[0];
        assert_eq!(action.id, "action-1-1");
        assert_eq!(action.responsible, "TBD");
        assert_eq!(action.deadline, Utc.with_ymd_and_hms(2024, 12, 1, 0, 0, 0).unwrap());
        assert_eq!(plans[1].actions[0].id, "action-2-1");
    }

    #[test]
    fn test_set_strategic_direction_replaces_previous_direction() {
        let mut agreement = agreement();
        DirectionPlanner::set_strategic_direction(&mut agreement, objectives(), Vec::new(), now());
        assert_eq!(agreement.direct.action_plans.len(), 2);

        let later = now() + ChronoDuration::days(1);
        let single = vec![objectives().remove(1)];
        DirectionPlanner::set_strategic_direction(&mut agreement, single, Vec::new(), later);

        assert_eq!(agreement.direct.strategic_direction.objectives.len(), 1);
        assert_eq!(agreement.direct.action_plans.len(), 1);
        assert_eq!(agreement.direct.action_plans[0].id, "ap-1");
        assert_eq!(agreement.direct.action_plans[0].name, "Action Plan for Zero trust");
        assert_eq!(agreement.direct.last_directed, Some(later));
    }

    #[test]
    fn test_empty_objectives_clear_action_plans() {
        let mut agreement = agreement();
        DirectionPlanner::set_strategic_direction(&mut agreement, objectives(), Vec::new(), now());
        DirectionPlanner::set_strategic_direction(&mut agreement, Vec::new(), Vec::new(), now());
        assert!(agreement.direct.action_plans.is_empty());
    }

    #[test]
    fn test_allocate_resources_replaces_allocations() {
        let mut agreement = agreement();
        let budget = vec![BudgetAllocation {
            category: "operations".to_string(),
            amount: 250_000.0,
            ..BudgetAllocation::default()
        }];
        DirectionPlanner::allocate_resources(&mut agreement, budget, Vec::new(), now());
        DirectionPlanner::allocate_resources(
            &mut agreement,
            Vec::new(),
            vec![PersonnelAllocation {
                role: "SRE".to_string(),
                count: 2,
                ..PersonnelAllocation::default()
            }],
            now(),
        );

        let allocation = &agreement.direct.resource_allocation;
        assert!(allocation.budget_allocations.is_empty());
        assert_eq!(allocation.personnel_allocations.len(), 1);
        assert_eq!(agreement.direct.last_directed, Some(now()));
    }

    #[test]
    fn test_establish_policies_replaces_framework() {
        let mut agreement = agreement();
        let policy = Policy {
            id: "pol-1".to_string(),
            name: "Data retention".to_string(),
            ..Policy::default()
        };
        DirectionPlanner::establish_policies(&mut agreement, vec![policy], Vec::new(), Vec::new(), now());

        let framework = &agreement.direct.policy_framework;
        assert_eq!(framework.policies.len(), 1);
        assert!(framework.standards.is_empty());
        assert!(framework.procedures.is_empty());
    }
}
