// ABOUTME: Typed repositories layered over the raw key-value store
// ABOUTME: Each repository owns one key family and the JSON shape stored under it
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Typed persistence repositories
//!
//! Services never touch raw store keys. Each repository below owns a single
//! key family from [`crate::constants::storage_keys`] and exposes typed
//! operations over it. All repositories are cheap to clone and share the
//! underlying [`Store`].

use crate::chat::ChatMessage;
use crate::constants::storage_keys;
use crate::errors::{AppError, AppResult};
use crate::foodlog::FoodLogEntry;
use crate::models::{
    AccountStatus, AdminNotification, Session, SubscriptionRecord, User, VerificationStatus,
};
use crate::store::{Store, StoreProvider};
use crate::workout::WorkoutPlan;
use std::sync::Arc;
use uuid::Uuid;

/// Subscription records keyed per user
#[derive(Clone)]
pub struct SubscriptionRepository {
    store: Arc<Store>,
}

impl SubscriptionRepository {
    #[must_use]
    pub const fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// Load the subscription record for a user, if any
    ///
    /// # Errors
    ///
    /// Returns an error if the store read fails or the record is corrupt
    pub async fn get(&self, user_id: Uuid) -> AppResult<Option<SubscriptionRecord>> {
        self.store
            .get_json(&storage_keys::subscription(user_id))
            .await
    }

    /// Store or replace the subscription record for a user
    ///
    /// # Errors
    ///
    /// Returns an error if the store write fails
    pub async fn put(&self, user_id: Uuid, record: &SubscriptionRecord) -> AppResult<()> {
        self.store
            .put_json(&storage_keys::subscription(user_id), record)
            .await
    }

    /// Remove the subscription record for a user
    ///
    /// # Errors
    ///
    /// Returns an error if the store write fails
    pub async fn remove(&self, user_id: Uuid) -> AppResult<bool> {
        self.store.remove(&storage_keys::subscription(user_id)).await
    }
}

/// Admin notification queue stored as a single ordered list
#[derive(Clone)]
pub struct NotificationQueue {
    store: Arc<Store>,
}

impl NotificationQueue {
    #[must_use]
    pub const fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// All notifications, oldest first
    ///
    /// # Errors
    ///
    /// Returns an error if the store read fails or the queue is corrupt
    pub async fn list(&self) -> AppResult<Vec<AdminNotification>> {
        Ok(self
            .store
            .get_json(storage_keys::ADMIN_NOTIFICATIONS)
            .await?
            .unwrap_or_default())
    }

    /// Notifications still awaiting an admin decision
    ///
    /// # Errors
    ///
    /// Returns an error if the store read fails
    pub async fn pending(&self) -> AppResult<Vec<AdminNotification>> {
        let mut notifications = self.list().await?;
        notifications.retain(|n| n.status == VerificationStatus::Pending);
        Ok(notifications)
    }

    /// Append a notification to the end of the queue
    ///
    /// # Errors
    ///
    /// Returns an error if the store read or write fails
    pub async fn append(&self, notification: AdminNotification) -> AppResult<()> {
        let mut notifications = self.list().await?;
        notifications.push(notification);
        self.save(&notifications).await
    }

    /// Find a notification by id
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if no notification has the given id
    pub async fn find(&self, id: Uuid) -> AppResult<AdminNotification> {
        self.list()
            .await?
            .into_iter()
            .find(|n| n.id == id)
            .ok_or_else(|| AppError::not_found(format!("Notification {id}")))
    }

    /// Set the status of a notification and return the updated value
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if no notification has the given id
    pub async fn update_status(
        &self,
        id: Uuid,
        status: VerificationStatus,
    ) -> AppResult<AdminNotification> {
        let mut notifications = self.list().await?;
        let entry = notifications
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or_else(|| AppError::not_found(format!("Notification {id}")))?;
        entry.status = status;
        let updated = entry.clone();
        self.save(&notifications).await?;
        Ok(updated)
    }

    async fn save(&self, notifications: &[AdminNotification]) -> AppResult<()> {
        self.store
            .put_json(storage_keys::ADMIN_NOTIFICATIONS, &notifications)
            .await
    }
}

/// Registered user accounts stored as a single list
#[derive(Clone)]
pub struct AccountRepository {
    store: Arc<Store>,
}

impl AccountRepository {
    #[must_use]
    pub const fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// All registered accounts
    ///
    /// # Errors
    ///
    /// Returns an error if the store read fails or the list is corrupt
    pub async fn list(&self) -> AppResult<Vec<User>> {
        Ok(self
            .store
            .get_json(storage_keys::REGISTERED_USERS)
            .await?
            .unwrap_or_default())
    }

    /// Accounts filtered by status
    ///
    /// # Errors
    ///
    /// Returns an error if the store read fails
    pub async fn list_by_status(&self, status: AccountStatus) -> AppResult<Vec<User>> {
        let mut users = self.list().await?;
        users.retain(|u| u.status == status);
        Ok(users)
    }

    /// Look up an account by email (exact match on the stored form)
    ///
    /// # Errors
    ///
    /// Returns an error if the store read fails
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self
            .list()
            .await?
            .into_iter()
            .find(|u| u.email.eq_ignore_ascii_case(email)))
    }

    /// Look up an account by id
    ///
    /// # Errors
    ///
    /// Returns an error if the store read fails
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.list().await?.into_iter().find(|u| u.id == id))
    }

    /// Add a new account
    ///
    /// # Errors
    ///
    /// Returns `ResourceAlreadyExists` if the email is already registered
    pub async fn insert(&self, user: User) -> AppResult<()> {
        let mut users = self.list().await?;
        if users.iter().any(|u| u.email.eq_ignore_ascii_case(&user.email)) {
            return Err(AppError::already_exists(format!("Account {}", user.email)));
        }
        users.push(user);
        self.save(&users).await
    }

    /// Replace a stored account, matched by id
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if no account has the given id
    pub async fn update(&self, user: &User) -> AppResult<()> {
        let mut users = self.list().await?;
        let entry = users
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or_else(|| AppError::not_found(format!("Account {}", user.id)))?;
        *entry = user.clone();
        self.save(&users).await
    }

    async fn save(&self, users: &[User]) -> AppResult<()> {
        self.store.put_json(storage_keys::REGISTERED_USERS, &users).await
    }
}

/// Single-slot session persistence
///
/// Mirrors a client keeping the logged-in user under one well-known key:
/// writing replaces any previous session, logout clears the slot.
#[derive(Clone)]
pub struct SessionStore {
    store: Arc<Store>,
}

impl SessionStore {
    #[must_use]
    pub const fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// Load the current session, if someone is logged in
    ///
    /// # Errors
    ///
    /// Returns an error if the store read fails or the session is corrupt
    pub async fn load(&self) -> AppResult<Option<Session>> {
        self.store.get_json(storage_keys::SESSION).await
    }

    /// Persist the session for the logged-in user
    ///
    /// # Errors
    ///
    /// Returns an error if the store write fails
    pub async fn save(&self, session: &Session) -> AppResult<()> {
        self.store.put_json(storage_keys::SESSION, session).await
    }

    /// Clear the session slot, returning whether one existed
    ///
    /// # Errors
    ///
    /// Returns an error if the store write fails
    pub async fn clear(&self) -> AppResult<bool> {
        self.store.remove(storage_keys::SESSION).await
    }
}

/// Per-conversation chat history, keyed by user and trainer
#[derive(Clone)]
pub struct ChatStore {
    store: Arc<Store>,
}

impl ChatStore {
    #[must_use]
    pub const fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// Full message history for one user/trainer conversation
    ///
    /// # Errors
    ///
    /// Returns an error if the store read fails or the history is corrupt
    pub async fn history(&self, user_id: Uuid, trainer_id: &str) -> AppResult<Vec<ChatMessage>> {
        Ok(self
            .store
            .get_json(&storage_keys::chat(user_id, trainer_id))
            .await?
            .unwrap_or_default())
    }

    /// Replace the stored history for one conversation
    ///
    /// # Errors
    ///
    /// Returns an error if the store write fails
    pub async fn save(
        &self,
        user_id: Uuid,
        trainer_id: &str,
        messages: &[ChatMessage],
    ) -> AppResult<()> {
        self.store
            .put_json(&storage_keys::chat(user_id, trainer_id), &messages)
            .await
    }
}

/// Per-user food log entries
#[derive(Clone)]
pub struct FoodLogRepository {
    store: Arc<Store>,
}

impl FoodLogRepository {
    #[must_use]
    pub const fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// All logged entries for a user, oldest first
    ///
    /// # Errors
    ///
    /// Returns an error if the store read fails or the log is corrupt
    pub async fn entries(&self, user_id: Uuid) -> AppResult<Vec<FoodLogEntry>> {
        Ok(self
            .store
            .get_json(&storage_keys::food_log(user_id))
            .await?
            .unwrap_or_default())
    }

    /// Replace the stored log for a user
    ///
    /// # Errors
    ///
    /// Returns an error if the store write fails
    pub async fn save(&self, user_id: Uuid, entries: &[FoodLogEntry]) -> AppResult<()> {
        self.store
            .put_json(&storage_keys::food_log(user_id), &entries)
            .await
    }
}

/// Per-user workout plan state, including exercise completion toggles
#[derive(Clone)]
pub struct WorkoutLogRepository {
    store: Arc<Store>,
}

impl WorkoutLogRepository {
    #[must_use]
    pub const fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// Load the active workout plan for a user, if one was started
    ///
    /// # Errors
    ///
    /// Returns an error if the store read fails or the plan is corrupt
    pub async fn get(&self, user_id: Uuid) -> AppResult<Option<WorkoutPlan>> {
        self.store
            .get_json(&storage_keys::workout_log(user_id))
            .await
    }

    /// Store or replace the active workout plan for a user
    ///
    /// # Errors
    ///
    /// Returns an error if the store write fails
    pub async fn put(&self, user_id: Uuid, plan: &WorkoutPlan) -> AppResult<()> {
        self.store
            .put_json(&storage_keys::workout_log(user_id), plan)
            .await
    }
}
