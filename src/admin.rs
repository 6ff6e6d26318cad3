// ABOUTME: Admin approval workflows for subscription payments and trainer accounts
// ABOUTME: Keeps subscription records and their notifications in lockstep on every action
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Admin approval flows
//!
//! Two review queues feed this module: payment notifications emitted by the
//! subscription wizard, and trainer accounts created in the pending state by
//! registration. Approving or rejecting a payment updates the subscription
//! record and its notification before the call returns, so no reader observes
//! a half-applied pair. Terminal notifications may be re-approved or
//! re-rejected; the status is simply overwritten.

use crate::errors::{AppError, AppResult};
use crate::logging::AppLogger;
use crate::models::{
    AccountStatus, AdminNotification, Session, SubscriptionRecord, User, UserRole,
    VerificationStatus,
};
use crate::repositories::{AccountRepository, NotificationQueue, SubscriptionRepository};
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

/// Drives admin review actions over injected repositories
#[derive(Clone)]
pub struct AdminApprovalFlow {
    admin: Session,
    subscriptions: SubscriptionRepository,
    notifications: NotificationQueue,
    accounts: AccountRepository,
}

impl AdminApprovalFlow {
    /// Create a flow acting as the given admin session
    #[must_use]
    pub const fn new(
        admin: Session,
        subscriptions: SubscriptionRepository,
        notifications: NotificationQueue,
        accounts: AccountRepository,
    ) -> Self {
        Self {
            admin,
            subscriptions,
            notifications,
            accounts,
        }
    }

    /// Notifications still awaiting review, oldest first
    ///
    /// # Errors
    ///
    /// Returns an error if the store read fails
    pub async fn pending_notifications(&self) -> AppResult<Vec<AdminNotification>> {
        self.require_admin()?;
        self.notifications.pending().await
    }

    /// Approve the subscription payment behind a notification
    ///
    /// Sets `verification_status = Approved` and `verified = true` on the
    /// record, then marks the notification approved. Re-approving a terminal
    /// notification overwrites its status with no further side effects.
    ///
    /// # Errors
    ///
    /// Returns an error if the caller is not an admin, the notification id is
    /// unknown, or no subscription record exists for its user
    pub async fn approve_subscription(
        &self,
        notification_id: Uuid,
    ) -> AppResult<SubscriptionRecord> {
        let record = self
            .review_subscription(notification_id, VerificationStatus::Approved)
            .await?;
        info!(
            admin = %self.admin.email,
            notification = %notification_id,
            "Subscription payment approved"
        );
        Ok(record)
    }

    /// Reject the subscription payment behind a notification
    ///
    /// Sets `verification_status = Rejected` and `verified = false` on the
    /// record, then marks the notification rejected. The record is kept;
    /// rejection is a terminal status, not a removal.
    ///
    /// # Errors
    ///
    /// Returns an error if the caller is not an admin, the notification id is
    /// unknown, or no subscription record exists for its user
    pub async fn reject_subscription(
        &self,
        notification_id: Uuid,
    ) -> AppResult<SubscriptionRecord> {
        let record = self
            .review_subscription(notification_id, VerificationStatus::Rejected)
            .await?;
        warn!(
            admin = %self.admin.email,
            notification = %notification_id,
            "Subscription payment rejected"
        );
        Ok(record)
    }

    /// Shared record-then-notification update for both review outcomes
    async fn review_subscription(
        &self,
        notification_id: Uuid,
        status: VerificationStatus,
    ) -> AppResult<SubscriptionRecord> {
        self.require_admin()?;
        let notification = self.notifications.find(notification_id).await?;

        let mut record = self
            .subscriptions
            .get(notification.user_id)
            .await?
            .ok_or_else(|| {
                warn!(
                    user_id = %notification.user_id,
                    "Notification refers to a user without a subscription record"
                );
                AppError::not_found(format!("Subscription for user {}", notification.user_id))
            })?;

        record.verification_status = status;
        record.verified = status == VerificationStatus::Approved;
        self.subscriptions.put(notification.user_id, &record).await?;
        self.notifications.update_status(notification_id, status).await?;

        AppLogger::log_admin_action(
            &self.admin.email,
            &format!("subscription_{status}"),
            &notification.user_email,
            true,
        );
        Ok(record)
    }

    /// Trainer accounts still awaiting approval
    ///
    /// # Errors
    ///
    /// Returns an error if the caller is not an admin or the store read fails
    pub async fn list_pending_trainers(&self) -> AppResult<Vec<User>> {
        self.require_admin()?;
        let pending = self.accounts.list_by_status(AccountStatus::Pending).await?;
        Ok(pending
            .into_iter()
            .filter(|account| account.role == UserRole::Trainer)
            .collect())
    }

    /// Activate a pending trainer account
    ///
    /// Stamps `approved_by` and `approved_at` with the acting admin.
    ///
    /// # Errors
    ///
    /// Returns an error if the caller is not an admin, the account is unknown
    /// or not a trainer account, or the account is already active
    pub async fn approve_trainer(&self, user_id: Uuid, reason: Option<&str>) -> AppResult<User> {
        self.require_admin()?;
        let mut account = self.trainer_account(user_id).await?;
        if account.status == AccountStatus::Active {
            return Err(AppError::invalid_state(format!(
                "Trainer account {} is already active",
                account.email
            )));
        }

        account.status = AccountStatus::Active;
        account.approved_by = Some(self.admin.user_id);
        account.approved_at = Some(Utc::now());
        self.accounts.update(&account).await?;

        let reason = reason.unwrap_or("No reason provided");
        info!(
            admin = %self.admin.email,
            trainer = %account.email,
            reason,
            "Trainer account approved"
        );
        AppLogger::log_admin_action(&self.admin.email, "trainer_approve", &account.email, true);
        Ok(account)
    }

    /// Suspend a trainer account, blocking further logins
    ///
    /// # Errors
    ///
    /// Returns an error if the caller is not an admin, the account is unknown
    /// or not a trainer account, or the account is already suspended
    pub async fn suspend_trainer(&self, user_id: Uuid, reason: Option<&str>) -> AppResult<User> {
        self.require_admin()?;
        let mut account = self.trainer_account(user_id).await?;
        if account.status == AccountStatus::Suspended {
            return Err(AppError::invalid_state(format!(
                "Trainer account {} is already suspended",
                account.email
            )));
        }

        account.status = AccountStatus::Suspended;
        self.accounts.update(&account).await?;

        let reason = reason.unwrap_or("No reason provided");
        warn!(
            admin = %self.admin.email,
            trainer = %account.email,
            reason,
            "Trainer account suspended"
        );
        AppLogger::log_admin_action(&self.admin.email, "trainer_suspend", &account.email, true);
        Ok(account)
    }

    async fn trainer_account(&self, user_id: Uuid) -> AppResult<User> {
        let account = self
            .accounts
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| {
                warn!(user_id = %user_id, "Trainer account not found");
                AppError::not_found(format!("Account {user_id}"))
            })?;
        if account.role != UserRole::Trainer {
            return Err(AppError::invalid_input(format!(
                "Account {} is not a trainer account",
                account.email
            )));
        }
        Ok(account)
    }

    fn require_admin(&self) -> AppResult<()> {
        if self.admin.role == UserRole::Admin {
            Ok(())
        } else {
            AppLogger::log_security_event(
                "permission_denied",
                "admin action attempted without admin role",
                Some(&self.admin.email),
            );
            Err(AppError::permission_denied(
                "Admin privileges are required for this action",
            ))
        }
    }
}
