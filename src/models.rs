// ABOUTME: Core data models and types for the FitBridge subscription platform
// ABOUTME: Defines User, Plan, Trainer, SubscriptionRecord and other fundamental data structures
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Data Models
//!
//! This module contains the core data structures used throughout the FitBridge
//! core: accounts and sessions, the immutable plan/trainer catalog entries, the
//! subscription record with its admin-controlled verification status, and the
//! derived nutrition targets.
//!
//! ## Design Principles
//!
//! - **Serializable**: all models support JSON serialization for the key-value
//!   store
//! - **Type Safe**: statuses and roles are enums, never loose strings
//! - **Immutable catalog**: `Plan` and `Trainer` are catalog entries; user
//!   state never mutates them

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;

/// Role attached to a stored account
///
/// The role is always derived from the account record; callers never assert
/// a role at login time.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Platform administrator reviewing subscriptions and trainer accounts
    Admin,
    /// Coach offering training services
    Trainer,
    /// End user subscribing to plans
    #[default]
    Client,
}

impl UserRole {
    /// Convert to string for storage
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Trainer => "trainer",
            Self::Client => "client",
        }
    }
}

impl Display for UserRole {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "trainer" => Ok(Self::Trainer),
            "client" => Ok(Self::Client),
            _ => Err(AppError::invalid_input(format!("Invalid user role: {s}")).into()),
        }
    }
}

/// Account status for the admin approval workflow
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum AccountStatus {
    /// Account pending admin approval (new trainer registrations)
    #[default]
    Pending,
    /// Account approved and active
    Active,
    /// Account suspended by admin
    Suspended,
}

impl AccountStatus {
    /// Check if the account can log in
    #[must_use]
    pub const fn can_login(&self) -> bool {
        matches!(self, Self::Active)
    }

    /// Get user-friendly status message
    #[must_use]
    pub const fn to_message(&self) -> &'static str {
        match self {
            Self::Pending => "Your account is pending admin approval",
            Self::Active => "Account is active",
            Self::Suspended => "Your account has been suspended",
        }
    }
}

impl Display for AccountStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Active => write!(f, "active"),
            Self::Suspended => write!(f, "suspended"),
        }
    }
}

/// A stored account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier
    pub id: Uuid,
    /// User email address (used for identification)
    pub email: String,
    /// Display name
    pub display_name: String,
    /// Hashed password for authentication
    pub password_hash: String,
    /// Role bound to this account
    pub role: UserRole,
    /// Account status for the admin approval workflow
    pub status: AccountStatus,
    /// When the account was created
    pub created_at: DateTime<Utc>,
    /// Last time the account logged in
    pub last_active: DateTime<Utc>,
    /// Admin who approved this account (if approved)
    pub approved_by: Option<Uuid>,
    /// When the account was approved by an admin
    pub approved_at: Option<DateTime<Utc>>,
}

impl User {
    /// Create a new account with the given email and password hash
    ///
    /// New accounts start in `Pending` status; registration decides whether
    /// the role allows immediate activation.
    #[must_use]
    pub fn new(email: String, password_hash: String, display_name: String, role: UserRole) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email,
            display_name,
            password_hash,
            role,
            status: AccountStatus::Pending,
            created_at: now,
            last_active: now,
            approved_by: None,
            approved_at: None,
        }
    }

    /// Whether this account still needs admin review before logging in
    #[must_use]
    pub const fn needs_approval(&self) -> bool {
        matches!(self.status, AccountStatus::Pending)
    }
}

/// A resolved login session
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Session {
    /// Account this session belongs to
    pub user_id: Uuid,
    /// Account email
    pub email: String,
    /// Display name for greeting views
    pub display_name: String,
    /// Role derived from the stored account
    pub role: UserRole,
    /// Whether the account has been approved
    pub approved: bool,
    /// When the session was established
    pub logged_in_at: DateTime<Utc>,
}

impl Session {
    /// Build a session from a stored account
    #[must_use]
    pub fn for_user(user: &User) -> Self {
        Self {
            user_id: user.id,
            email: user.email.clone(),
            display_name: user.display_name.clone(),
            role: user.role,
            approved: user.status.can_login(),
            logged_in_at: Utc::now(),
        }
    }
}

/// A subscription tier with a fixed monthly price and feature list
///
/// Immutable catalog entry; selecting a plan copies it into the wizard and
/// eventually into the subscription record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Plan {
    /// Catalog identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Price in whole currency units per billing period
    pub monthly_price: i64,
    /// Billing period unit (currently always "month")
    pub duration_unit: String,
    /// Ordered feature descriptions shown on the plan card
    pub features: Vec<String>,
    /// Whether the plan carries the highlighted badge in listings
    #[serde(default)]
    pub popular: bool,
}

/// A coach catalog entry with an additive price modifier
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Trainer {
    /// Catalog identifier
    pub id: String,
    /// Full name
    pub name: String,
    /// Years of coaching experience
    pub years_experience: u32,
    /// Specialization tags
    pub specializations: Vec<String>,
    /// Average review rating (0-5)
    pub rating: f64,
    /// Number of reviews behind the rating
    pub review_count: u32,
    /// Amount added to the plan price when this trainer is selected
    pub price_modifier: i64,
    /// Short biography
    pub bio: String,
    /// Certification tags
    pub certifications: Vec<String>,
}

/// Admin-controlled approval state of a subscription payment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    /// Awaiting admin review
    #[default]
    Pending,
    /// Payment verified by an admin
    Approved,
    /// Payment rejected by an admin
    Rejected,
}

impl VerificationStatus {
    /// Whether an admin has already acted on this status
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }
}

impl Display for VerificationStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Approved => write!(f, "approved"),
            Self::Rejected => write!(f, "rejected"),
        }
    }
}

/// Per-user subscription state
///
/// Created when a user completes the payment step; mutated by admin
/// approve/reject actions; never deleted (rejection is a terminal status,
/// not removal).
///
/// # Examples
///
/// ```rust
/// use fitbridge::models::{Plan, SubscriptionRecord, Trainer, VerificationStatus};
///
/// let plan = Plan {
///     id: "premium".into(),
///     name: "Premium".into(),
///     monthly_price: 49,
///     duration_unit: "month".into(),
///     features: vec!["Live chat support".into()],
///     popular: true,
/// };
/// let trainer = Trainer {
///     id: "sarah-johnson".into(),
///     name: "Sarah Johnson".into(),
///     years_experience: 8,
///     specializations: vec!["Yoga".into()],
///     rating: 4.9,
///     review_count: 89,
///     price_modifier: 15,
///     bio: "Expert in holistic fitness".into(),
///     certifications: vec!["RYT-500".into()],
/// };
/// let record = SubscriptionRecord::pending(plan, trainer, 64);
///
/// assert!(record.subscribed);
/// assert!(!record.verified);
/// assert_eq!(record.verification_status, VerificationStatus::Pending);
/// assert_eq!(record.total_amount, 64);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubscriptionRecord {
    /// Whether the user has completed the payment step
    pub subscribed: bool,
    /// Whether an admin has verified the payment
    pub verified: bool,
    /// Selected plan, if any
    pub plan: Option<Plan>,
    /// Selected trainer, if any
    pub trainer: Option<Trainer>,
    /// When the payment step was completed
    pub payment_timestamp: Option<DateTime<Utc>>,
    /// Admin review status
    pub verification_status: VerificationStatus,
    /// Plan price plus trainer modifier in whole currency units
    pub total_amount: i64,
}

impl SubscriptionRecord {
    /// Build the record emitted by a completed payment step
    #[must_use]
    pub fn pending(plan: Plan, trainer: Trainer, total_amount: i64) -> Self {
        Self {
            subscribed: true,
            verified: false,
            plan: Some(plan),
            trainer: Some(trainer),
            payment_timestamp: Some(Utc::now()),
            verification_status: VerificationStatus::Pending,
            total_amount,
        }
    }
}

/// Kind of event queued for admin review
#[non_exhaustive]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// A client completed the payment step of the subscription wizard
    NewSubscription,
}

/// A queued record prompting admin review of a new subscription
///
/// Invariant: after any admin action, `status` equals the
/// `verification_status` of the subscription record it references.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AdminNotification {
    /// Unique notification identifier
    pub id: Uuid,
    /// Event kind
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    /// User whose subscription needs review
    pub user_id: Uuid,
    /// Display name at the time of subscription
    pub user_name: String,
    /// Email at the time of subscription
    pub user_email: String,
    /// Selected plan name
    pub plan_name: String,
    /// Selected trainer name
    pub trainer_name: String,
    /// Amount due in whole currency units
    pub amount: i64,
    /// When the subscription was created
    pub timestamp: DateTime<Utc>,
    /// Review status, kept in lockstep with the subscription record
    pub status: VerificationStatus,
}

impl AdminNotification {
    /// Build the pending notification emitted alongside a new subscription
    #[must_use]
    pub fn new_subscription(user: &Session, record: &SubscriptionRecord) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind: NotificationKind::NewSubscription,
            user_id: user.user_id,
            user_name: user.display_name.clone(),
            user_email: user.email.clone(),
            plan_name: record
                .plan
                .as_ref()
                .map_or_else(String::new, |p| p.name.clone()),
            trainer_name: record
                .trainer
                .as_ref()
                .map_or_else(String::new, |t| t.name.clone()),
            amount: record.total_amount,
            timestamp: record.payment_timestamp.unwrap_or_else(Utc::now),
            status: VerificationStatus::Pending,
        }
    }
}

/// Daily caloric and macronutrient targets derived from body metrics
///
/// All values are non-negative; derived, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NutritionTargets {
    /// Daily calories after goal adjustment (kcal)
    pub calories: u32,
    /// Daily protein target (g)
    pub protein_grams: u32,
    /// Daily carbohydrate target (g)
    pub carb_grams: u32,
    /// Daily fat target (g)
    pub fat_grams: u32,
    /// Daily fiber target (g)
    pub fiber_grams: u32,
    /// Daily water target (L, one decimal)
    pub water_liters: f64,
}

/// Static transfer details shown at the payment step
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaymentInstructions {
    /// Receiving account holder
    pub account_name: String,
    /// Receiving account number
    pub account_number: String,
    /// Bank routing code
    pub ifsc_code: String,
    /// Receiving bank name
    pub bank_name: String,
    /// UPI handle for instant transfer
    pub upi_id: String,
}
