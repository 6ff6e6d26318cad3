// ABOUTME: Main library entry point for the FitBridge fitness platform core
// ABOUTME: Provides auth, subscription wizard, admin approval, and nutrition targets
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

#![deny(unsafe_code)]

//! # FitBridge Core
//!
//! The client-side core of the FitBridge fitness subscription platform:
//! every flow the app runs today against a key-value store standing in for
//! a real backend.
//!
//! ## Features
//!
//! - **Role-based auth**: Mocked credential login with admin, trainer, and
//!   client roles, plus registration with admin approval for trainers
//! - **Subscription wizard**: Plan selection, trainer selection, manual
//!   payment, and confirmation as an explicit state machine
//! - **Admin approval**: Subscription verification and trainer account
//!   review, with records and notifications updated in lockstep
//! - **Nutrition targets**: Mifflin-St Jeor BMR, activity-adjusted TDEE,
//!   and goal-adjusted calorie and macro targets
//! - **Daily tracking**: Workout plan completion, food logging, and trainer
//!   chat backed by the same store
//!
//! ## Quick Start
//!
//! 1. Seed the demo accounts with the `seed-demo` binary
//! 2. Log in through [`auth::AuthService`] to obtain a [`models::Session`]
//! 3. Drive the flows for that session's role
//!
//! ## Architecture
//!
//! - **Store**: Pluggable key-value persistence (memory or JSON file)
//! - **Repositories**: Typed access to accounts, subscriptions, logs, and
//!   notifications on top of the store
//! - **Services**: Auth, wizard, admin flow, and tracking logic over
//!   injected repositories
//! - **Catalog**: Fixed plans, trainers, and payment instructions
//! - **Config**: Environment-driven settings and nutrition constants
//!
//! ## Example Usage
//!
//! ```rust
//! use fitbridge::config::NutritionConfig;
//! use fitbridge::nutrition::{self, ActivityLevel, NutritionProfile, Sex, TrainingGoal};
//!
//! # fn main() -> fitbridge::errors::AppResult<()> {
//! let config = NutritionConfig::default();
//! let profile = NutritionProfile {
//!     weight_kg: 70.0,
//!     height_cm: 170.0,
//!     age_years: 30,
//!     sex: Sex::Male,
//!     activity_level: ActivityLevel::Moderate,
//!     goal: TrainingGoal::Maintenance,
//! };
//!
//! let targets = nutrition::compute_targets(&profile, &config)?;
//! assert_eq!(targets.calories, 2507);
//! assert_eq!(targets.protein_grams, 157);
//! # Ok(())
//! # }
//! ```

/// Administrative review of subscriptions and trainer accounts
pub mod admin;

/// Authentication, registration, and session management
pub mod auth;

/// Static plan, trainer, and payment-instruction catalog
pub mod catalog;

/// Client-to-trainer chat with simulated trainer replies
pub mod chat;

/// Configuration management and nutrition constants
pub mod config;

/// Application constants and storage key layout
pub mod constants;

/// Role-routed dashboard assembly
pub mod dashboard;

/// Unified error handling with standard error codes
pub mod errors;

/// Daily food logging against the built-in food database
pub mod foodlog;

/// Structured logging setup and audit events
pub mod logging;

/// Common data models shared across the platform
pub mod models;

/// Nutrition target calculations from body metrics
pub mod nutrition;

/// Typed repositories over the key-value store
pub mod repositories;

/// Pluggable key-value persistence backends
pub mod store;

/// The four-step subscription wizard
pub mod subscription;

/// Weekly workout plan tracking
pub mod workout;
