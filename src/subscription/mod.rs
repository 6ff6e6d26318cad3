// ABOUTME: Subscription purchase flow: plan and trainer selection, payment, confirmation
// ABOUTME: Provides the wizard state machine and the step vocabulary shared with dashboards
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Subscription Flow
//!
//! This module implements the client subscription purchase flow:
//! - Fixed linear sequence from plan selection through payment confirmation
//! - Explicit tagged-union state with illegal-transition errors
//! - Payment confirmation persists the record and queues an admin notification

/// The four-step subscription wizard state machine
pub mod wizard;

pub use wizard::{SubscriptionWizard, WizardState};

use std::fmt::{Display, Formatter, Result as FmtResult};

/// Step labels for the linear subscription flow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    /// Choosing a plan from the catalog
    PlanSelection,
    /// Choosing a trainer from the catalog
    TrainerSelection,
    /// Reviewing the total and confirming payment
    Payment,
    /// Payment recorded, awaiting admin verification
    Confirmation,
}

impl Display for WizardStep {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::PlanSelection => write!(f, "plan selection"),
            Self::TrainerSelection => write!(f, "trainer selection"),
            Self::Payment => write!(f, "payment"),
            Self::Confirmation => write!(f, "confirmation"),
        }
    }
}
