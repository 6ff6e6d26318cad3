// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Groups storage keys, environment names, validation limits, and demo data
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Constants module
//!
//! This module organizes application constants by domain for better maintainability.
//! Constants are grouped into logical domains rather than being in a single large file.

/// Storage key schema for the key-value store
///
/// Key names match the original browser-storage layout so an exported file
/// store remains readable next to legacy data dumps.
pub mod storage_keys {
    use uuid::Uuid;

    /// Per-user subscription record key prefix
    pub const SUBSCRIPTION_PREFIX: &str = "subscription_";
    /// Admin notification queue (JSON array)
    pub const ADMIN_NOTIFICATIONS: &str = "admin_notifications";
    /// Registered account list (JSON array)
    pub const REGISTERED_USERS: &str = "fitbridge_registered_users";
    /// Current session record
    pub const SESSION: &str = "fitbridge_user";
    /// Chat transcript key prefix
    pub const CHAT_PREFIX: &str = "chat_";
    /// Food log key prefix
    pub const FOOD_LOG_PREFIX: &str = "foodlog_";
    /// Workout completion key prefix
    pub const WORKOUT_LOG_PREFIX: &str = "workoutlog_";

    /// Subscription record key for a user
    #[must_use]
    pub fn subscription(user_id: Uuid) -> String {
        format!("{SUBSCRIPTION_PREFIX}{user_id}")
    }

    /// Chat transcript key for a user/trainer pair
    #[must_use]
    pub fn chat(user_id: Uuid, trainer_id: &str) -> String {
        format!("{CHAT_PREFIX}{user_id}_{trainer_id}")
    }

    /// Food log key for a user
    #[must_use]
    pub fn food_log(user_id: Uuid) -> String {
        format!("{FOOD_LOG_PREFIX}{user_id}")
    }

    /// Workout completion key for a user
    #[must_use]
    pub fn workout_log(user_id: Uuid) -> String {
        format!("{WORKOUT_LOG_PREFIX}{user_id}")
    }
}

/// Environment variable names
pub mod env_names {
    /// Runtime environment selector (development, production, testing)
    pub const ENVIRONMENT: &str = "ENVIRONMENT";
    /// Log level override
    pub const LOG_LEVEL: &str = "LOG_LEVEL";
    /// Store backend URL (memory:// or file:<path>)
    pub const STORE_URL: &str = "FITBRIDGE_STORE_URL";
}

/// Default values
pub mod defaults {
    /// Default store backend
    pub const DEFAULT_STORE_URL: &str = "memory://";
    /// Default file store path used by the seeding binary
    pub const DEFAULT_SEED_STORE: &str = "file:fitbridge.json";
}

/// Validation limits
pub mod limits {
    /// Maximum plausible bodyweight in kilograms
    pub const MAX_WEIGHT_KG: f64 = 300.0;
    /// Maximum plausible height in centimeters
    pub const MAX_HEIGHT_CM: f64 = 300.0;
    /// Minimum supported age in years
    pub const MIN_AGE_YEARS: u32 = 10;
    /// Maximum supported age in years
    pub const MAX_AGE_YEARS: u32 = 120;
    /// Minimum password length for registration
    pub const MIN_PASSWORD_LENGTH: usize = 8;
    /// Maximum chat message length in characters
    pub const MAX_CHAT_MESSAGE_CHARS: usize = 2000;
    /// Maximum servings accepted per food log entry
    pub const MAX_FOOD_SERVINGS: f64 = 50.0;
}

/// Built-in demo account credentials
pub mod demo_accounts {
    /// Demo admin login
    pub const ADMIN_EMAIL: &str = "admin@fitbridge.com";
    /// Demo admin password
    pub const ADMIN_PASSWORD: &str = "admin123";
    /// Demo trainer login (approved)
    pub const TRAINER_EMAIL: &str = "trainer@fitbridge.com";
    /// Demo trainer password
    pub const TRAINER_PASSWORD: &str = "trainer123";
    /// Demo client login
    pub const CLIENT_EMAIL: &str = "client@fitbridge.com";
    /// Demo client password
    pub const CLIENT_PASSWORD: &str = "client123";
    /// Demo trainer login awaiting approval
    pub const PENDING_EMAIL: &str = "pending@fitbridge.com";
    /// Demo pending trainer password
    pub const PENDING_PASSWORD: &str = "pending123";
}

/// Service names for structured logging
pub mod service_names {
    /// Core library service name
    pub const FITBRIDGE_CORE: &str = "fitbridge";
    /// Auth service
    pub const AUTH: &str = "auth";
    /// Admin review service
    pub const ADMIN: &str = "admin";
    /// Store service
    pub const STORE: &str = "store";
}
