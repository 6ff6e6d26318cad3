// ABOUTME: Tagged-union state machine for the four-step subscription purchase wizard
// ABOUTME: Enforces the linear step order and persists record plus notification on payment
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Subscription wizard state machine
//!
//! Holds the selection state for one user's purchase as an explicit tagged
//! union. Transitions are strictly forward; an operation invoked at the wrong
//! step returns an invalid-state error naming the current and required steps
//! and leaves the state unchanged. Confirming payment writes the subscription
//! record and queues the admin notification before the state advances.

use super::WizardStep;
use crate::catalog;
use crate::errors::{AppError, AppResult};
use crate::models::{
    AdminNotification, PaymentInstructions, Plan, Session, SubscriptionRecord, Trainer,
};
use crate::repositories::{NotificationQueue, SubscriptionRepository};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Wizard selection state as an explicit tagged union
///
/// Each variant carries exactly the selections made so far, so illegal
/// orderings are unrepresentable rather than inferred from optional fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub enum WizardState {
    /// Choosing a plan from the catalog
    #[default]
    SelectingPlan,
    /// Plan chosen; choosing a trainer
    SelectingTrainer {
        /// Selected plan
        plan: Plan,
    },
    /// Selections complete; awaiting payment confirmation
    Payment {
        /// Selected plan
        plan: Plan,
        /// Selected trainer
        trainer: Trainer,
        /// Plan price plus trainer modifier in whole currency units
        total_amount: i64,
    },
    /// Payment recorded; subscription pending admin verification
    Confirmed {
        /// The persisted subscription record
        record: SubscriptionRecord,
    },
}

impl WizardState {
    /// The step this state corresponds to
    #[must_use]
    pub const fn step(&self) -> WizardStep {
        match self {
            Self::SelectingPlan => WizardStep::PlanSelection,
            Self::SelectingTrainer { .. } => WizardStep::TrainerSelection,
            Self::Payment { .. } => WizardStep::Payment,
            Self::Confirmed { .. } => WizardStep::Confirmation,
        }
    }
}

/// Drives one user's subscription purchase over injected repositories
#[derive(Clone)]
pub struct SubscriptionWizard {
    user: Session,
    state: WizardState,
    subscriptions: SubscriptionRepository,
    notifications: NotificationQueue,
}

impl SubscriptionWizard {
    /// Start a new wizard at the plan-selection step
    #[must_use]
    pub const fn new(
        user: Session,
        subscriptions: SubscriptionRepository,
        notifications: NotificationQueue,
    ) -> Self {
        Self {
            user,
            state: WizardState::SelectingPlan,
            subscriptions,
            notifications,
        }
    }

    /// Current wizard state
    #[must_use]
    pub const fn state(&self) -> &WizardState {
        &self.state
    }

    /// Current step label
    #[must_use]
    pub const fn step(&self) -> WizardStep {
        self.state.step()
    }

    /// Plan price plus trainer modifier once both selections are made
    #[must_use]
    pub const fn total_amount(&self) -> Option<i64> {
        match &self.state {
            WizardState::Payment { total_amount, .. } => Some(*total_amount),
            WizardState::Confirmed { record } => Some(record.total_amount),
            WizardState::SelectingPlan | WizardState::SelectingTrainer { .. } => None,
        }
    }

    /// Transfer details shown while the wizard awaits payment
    ///
    /// # Errors
    ///
    /// Returns an error if the wizard is not at the payment step
    pub fn payment_instructions(&self) -> AppResult<PaymentInstructions> {
        if !matches!(self.state, WizardState::Payment { .. }) {
            return Err(self.wrong_step(WizardStep::Payment));
        }
        Ok(catalog::payment_instructions())
    }

    /// Select a plan from the catalog and advance to trainer selection
    ///
    /// # Errors
    ///
    /// Returns an error if the wizard is past plan selection or the plan id
    /// is not in the catalog
    pub fn select_plan(&mut self, plan_id: &str) -> AppResult<()> {
        if !matches!(self.state, WizardState::SelectingPlan) {
            return Err(self.wrong_step(WizardStep::PlanSelection));
        }
        let plan = catalog::find_plan(plan_id)?;
        info!(
            user = %self.user.email,
            plan = %plan.id,
            "Subscription wizard: plan selected"
        );
        self.state = WizardState::SelectingTrainer { plan };
        Ok(())
    }

    /// Select a trainer, compute the total, and advance to payment
    ///
    /// # Errors
    ///
    /// Returns an error if no plan has been selected yet or the trainer id
    /// is not in the catalog
    pub fn select_trainer(&mut self, trainer_id: &str) -> AppResult<()> {
        let WizardState::SelectingTrainer { plan } = &self.state else {
            return Err(self.wrong_step(WizardStep::TrainerSelection));
        };
        let trainer = catalog::find_trainer(trainer_id)?;
        let total_amount = plan.monthly_price + trainer.price_modifier;
        let plan = plan.clone();
        info!(
            user = %self.user.email,
            trainer = %trainer.id,
            total_amount,
            "Subscription wizard: trainer selected"
        );
        self.state = WizardState::Payment {
            plan,
            trainer,
            total_amount,
        };
        Ok(())
    }

    /// Confirm payment, persisting the record and queueing the notification
    ///
    /// The record write and the notification append both complete before the
    /// state advances; a failure in either leaves the wizard at the payment
    /// step so the caller can retry.
    ///
    /// # Errors
    ///
    /// Returns an error if the wizard is not at the payment step or
    /// persistence fails
    pub async fn confirm_payment(&mut self) -> AppResult<SubscriptionRecord> {
        let WizardState::Payment {
            plan,
            trainer,
            total_amount,
        } = &self.state
        else {
            return Err(self.wrong_step(WizardStep::Payment));
        };
        let record = SubscriptionRecord::pending(plan.clone(), trainer.clone(), *total_amount);

        self.subscriptions.put(self.user.user_id, &record).await?;
        let notification = AdminNotification::new_subscription(&self.user, &record);
        self.notifications.append(notification).await?;

        info!(
            user = %self.user.email,
            total_amount = record.total_amount,
            "Subscription payment recorded, pending admin verification"
        );
        self.state = WizardState::Confirmed {
            record: record.clone(),
        };
        Ok(record)
    }

    /// Finish the flow, consuming the wizard and yielding the final record
    ///
    /// # Errors
    ///
    /// Returns an error if payment has not been confirmed
    pub fn complete(self) -> AppResult<SubscriptionRecord> {
        match self.state {
            WizardState::Confirmed { record } => Ok(record),
            state => Err(AppError::invalid_state(format!(
                "Subscription flow is at the {} step; completion requires a confirmed payment",
                state.step()
            ))),
        }
    }

    fn wrong_step(&self, required: WizardStep) -> AppError {
        AppError::invalid_state(format!(
            "Subscription flow is at the {} step; this operation requires the {} step",
            self.state.step(),
            required
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;
    use crate::models::{User, UserRole, VerificationStatus};
    use crate::store::{MemoryStore, Store};
    use std::sync::Arc;

    fn memory_store() -> Arc<Store> {
        Arc::new(Store::Memory(MemoryStore::new()))
    }

    fn sample_wizard(store: &Arc<Store>) -> SubscriptionWizard {
        let user = User::new(
            "client@example.com".to_owned(),
            "$2b$12$hash".to_owned(),
            "Sample Client".to_owned(),
            UserRole::Client,
        );
        SubscriptionWizard::new(
            Session::for_user(&user),
            SubscriptionRepository::new(Arc::clone(store)),
            NotificationQueue::new(Arc::clone(store)),
        )
    }

    #[tokio::test]
    async fn test_full_flow_reaches_confirmation() {
        let store = memory_store();
        let mut wizard = sample_wizard(&store);
        assert_eq!(wizard.step(), WizardStep::PlanSelection);

        wizard.select_plan("premium").unwrap();
        assert_eq!(wizard.step(), WizardStep::TrainerSelection);

        wizard.select_trainer("sarah-johnson").unwrap();
        assert_eq!(wizard.step(), WizardStep::Payment);
        assert_eq!(wizard.total_amount(), Some(64));
        let instructions = wizard.payment_instructions().unwrap();
        assert_eq!(instructions.account_name, "FitBridge Fitness Solutions");

        let record = wizard.confirm_payment().await.unwrap();
        assert!(record.subscribed);
        assert!(!record.verified);
        assert_eq!(record.verification_status, VerificationStatus::Pending);
        assert!(record.payment_timestamp.is_some());

        let completed = wizard.clone().complete().unwrap();
        assert_eq!(completed, record);
    }

    #[tokio::test]
    async fn test_confirm_payment_persists_record_and_notification() {
        let store = memory_store();
        let mut wizard = sample_wizard(&store);
        let user_id = wizard.user.user_id;

        wizard.select_plan("basic").unwrap();
        wizard.select_trainer("john-smith").unwrap();
        let record = wizard.confirm_payment().await.unwrap();

        let stored = SubscriptionRepository::new(Arc::clone(&store))
            .get(user_id)
            .await
            .unwrap()
            .expect("record persisted");
        assert_eq!(stored, record);

        let pending = NotificationQueue::new(store).pending().await.unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].user_id, user_id);
        assert_eq!(pending[0].plan_name, "Basic");
        assert_eq!(pending[0].amount, 29);
        assert_eq!(pending[0].status, VerificationStatus::Pending);
    }

    #[tokio::test]
    async fn test_operations_reject_wrong_step() {
        let store = memory_store();
        let mut wizard = sample_wizard(&store);

        let err = wizard.select_trainer("john-smith").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidState);
        let err = wizard.confirm_payment().await.unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidState);
        let err = wizard.payment_instructions().unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidState);
        assert_eq!(wizard.step(), WizardStep::PlanSelection);

        wizard.select_plan("elite").unwrap();
        let err = wizard.select_plan("basic").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidState);
        assert_eq!(wizard.step(), WizardStep::TrainerSelection);

        let err = wizard.clone().complete().unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidState);
    }

    #[tokio::test]
    async fn test_unknown_catalog_ids_leave_state_unchanged() {
        let store = memory_store();
        let mut wizard = sample_wizard(&store);

        let err = wizard.select_plan("gold").unwrap_err();
        assert_eq!(err.code, ErrorCode::ResourceNotFound);
        assert_eq!(wizard.step(), WizardStep::PlanSelection);

        wizard.select_plan("basic").unwrap();
        let err = wizard.select_trainer("nobody").unwrap_err();
        assert_eq!(err.code, ErrorCode::ResourceNotFound);
        assert_eq!(wizard.step(), WizardStep::TrainerSelection);
    }

    #[tokio::test]
    async fn test_total_is_plan_price_plus_modifier_for_all_pairs() {
        for plan in catalog::plans() {
            for trainer in catalog::trainers() {
                let store = memory_store();
                let mut wizard = sample_wizard(&store);
                wizard.select_plan(&plan.id).unwrap();
                wizard.select_trainer(&trainer.id).unwrap();
                assert_eq!(
                    wizard.total_amount(),
                    Some(plan.monthly_price + trainer.price_modifier)
                );
            }
        }
    }
}
