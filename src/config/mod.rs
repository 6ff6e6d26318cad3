// ABOUTME: Configuration management module for centralized application settings
// ABOUTME: Handles environment configs and nutrition computation parameters
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Configuration module for the FitBridge core
//!
//! This module provides centralized configuration management:
//!
//! - **Environment**: runtime configuration from environment variables
//! - **Nutrition**: BMR coefficients, activity factors, and macro targets

/// Environment and runtime configuration
pub mod environment;
/// Nutrition target computation parameters
pub mod nutrition;

// Re-export main configuration types from environment
pub use environment::{AppConfig, Environment, LogLevel, StoreUrl};

// Re-export nutrition configuration types
pub use nutrition::{
    ActivityFactorsConfig, BmrConfig, GoalAdjustmentConfig, HydrationConfig, MacroSplitConfig,
    NutritionConfig,
};
