// ABOUTME: Nutrition target calculations using peer-reviewed scientific formulas
// ABOUTME: BMR, TDEE, goal-adjusted calories, and macronutrient distribution
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Nutrition Calculator Module
//!
//! This module derives daily caloric and macronutrient targets from body
//! metrics. All formulas are based on peer-reviewed research with citations.
//!
//! # Scientific References
//!
//! - Mifflin, M.D., et al. (1990). A new predictive equation for resting energy expenditure.
//!   *American Journal of Clinical Nutrition*, 51(2), 241-247.
//!   <https://doi.org/10.1093/ajcn/51.2.241>
//!
//! - McArdle, W.D., Katch, F.I., & Katch, V.L. (2010). *Exercise Physiology:
//!   Nutrition, Energy, and Human Performance*. Lippincott Williams & Wilkins.
//!   (activity factor multipliers)

use crate::config::{ActivityFactorsConfig, BmrConfig, GoalAdjustmentConfig, NutritionConfig};
use crate::constants::limits;
use crate::errors::{AppError, AppResult};
use crate::models::NutritionTargets;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Biological sex for BMR calculations
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    /// Male (+5 constant in Mifflin-St Jeor)
    Male,
    /// Female (-161 constant in Mifflin-St Jeor)
    Female,
}

impl FromStr for Sex {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "male" => Ok(Self::Male),
            "female" => Ok(Self::Female),
            other => Err(AppError::invalid_input(format!(
                "Unrecognized sex tag '{other}' (expected 'male' or 'female')"
            ))),
        }
    }
}

/// Activity level for TDEE calculation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    /// Little or no exercise
    Sedentary,
    /// Light exercise 1-3 days/week
    Light,
    /// Moderate exercise 3-5 days/week
    Moderate,
    /// Hard exercise 6-7 days/week
    Active,
    /// Very hard exercise or physical job
    VeryActive,
}

impl ActivityLevel {
    /// Parse an activity tag as submitted by intake forms
    ///
    /// Unrecognized tags fall back to `Sedentary` (the 1.2 multiplier),
    /// matching the intake form's behavior for unset selections. The
    /// camel-case spelling `veryActive` is accepted alongside `very_active`.
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "light" => Self::Light,
            "moderate" => Self::Moderate,
            "active" => Self::Active,
            "very_active" | "veryActive" => Self::VeryActive,
            _ => Self::Sedentary,
        }
    }
}

/// Training goal for the calorie adjustment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TrainingGoal {
    /// Weight loss (caloric deficit)
    WeightLoss,
    /// Maintenance (caloric balance)
    Maintenance,
    /// Weight gain (caloric surplus)
    WeightGain,
    /// Muscle gain (caloric balance, training-driven)
    MuscleGain,
}

impl TrainingGoal {
    /// Parse a goal tag as submitted by intake forms
    ///
    /// Unrecognized tags fall back to `Maintenance` (no calorie adjustment).
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "weight_loss" => Self::WeightLoss,
            "weight_gain" => Self::WeightGain,
            "muscle_gain" => Self::MuscleGain,
            _ => Self::Maintenance,
        }
    }
}

/// Body metrics and lifestyle parameters for target computation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct NutritionProfile {
    /// Body weight in kilograms
    pub weight_kg: f64,
    /// Height in centimeters
    pub height_cm: f64,
    /// Age in years
    pub age_years: u32,
    /// Biological sex for BMR calculation
    pub sex: Sex,
    /// Activity level for TDEE multiplier
    pub activity_level: ActivityLevel,
    /// Training goal for the calorie adjustment
    pub goal: TrainingGoal,
}

/// Calculate Basal Metabolic Rate using the Mifflin-St Jeor equation (1990)
///
/// Formula: BMR = (10 x `weight_kg`) + (6.25 x `height_cm`) - (5 x age) + `sex_constant`
/// - Men: +5
/// - Women: -161
///
/// # Arguments
/// * `weight_kg` - Body weight in kilograms
/// * `height_cm` - Height in centimeters
/// * `age_years` - Age in years
/// * `sex` - Male or Female
/// * `config` - BMR configuration with formula coefficients
///
/// # Reference
/// Mifflin et al. (1990) DOI: 10.1093/ajcn/51.2.241
///
/// # Errors
///
/// Returns an error if any input is non-finite or out of valid ranges
pub fn calculate_mifflin_st_jeor(
    weight_kg: f64,
    height_cm: f64,
    age_years: u32,
    sex: Sex,
    config: &BmrConfig,
) -> AppResult<f64> {
    if !weight_kg.is_finite() || weight_kg <= 0.0 || weight_kg > limits::MAX_WEIGHT_KG {
        return Err(AppError::invalid_input(format!(
            "Weight must be between 0 and {} kg",
            limits::MAX_WEIGHT_KG
        )));
    }
    if !height_cm.is_finite() || height_cm <= 0.0 || height_cm > limits::MAX_HEIGHT_CM {
        return Err(AppError::invalid_input(format!(
            "Height must be between 0 and {} cm",
            limits::MAX_HEIGHT_CM
        )));
    }
    if !(limits::MIN_AGE_YEARS..=limits::MAX_AGE_YEARS).contains(&age_years) {
        return Err(AppError::invalid_input(format!(
            "Age must be between {} and {} years (Mifflin-St Jeor formula validated for ages 10+)",
            limits::MIN_AGE_YEARS,
            limits::MAX_AGE_YEARS
        )));
    }

    let weight_component = config.msj_weight_coef * weight_kg;
    let height_component = config.msj_height_coef * height_cm;
    let age_component = config.msj_age_coef * f64::from(age_years);

    let sex_constant = match sex {
        Sex::Male => config.msj_male_constant,
        Sex::Female => config.msj_female_constant,
    };

    Ok(weight_component + height_component + age_component + sex_constant)
}

/// Calculate Total Daily Energy Expenditure (TDEE)
///
/// Formula: TDEE = BMR x Activity Factor
///
/// Activity factors based on `McArdle` et al. (2010):
/// - Sedentary: 1.2 (little/no exercise)
/// - Light: 1.375 (1-3 days/week)
/// - Moderate: 1.55 (3-5 days/week)
/// - Active: 1.725 (6-7 days/week)
/// - Very active: 1.9 (very hard exercise or physical job)
///
/// # Arguments
/// * `bmr` - Basal Metabolic Rate (kcal/day)
/// * `activity_level` - Activity level category
/// * `config` - Activity factor configuration
///
/// # Reference
/// `McArdle` et al. (2010) - Exercise Physiology
///
/// # Errors
///
/// Returns an error if BMR is not positive
pub fn calculate_tdee(
    bmr: f64,
    activity_level: ActivityLevel,
    config: &ActivityFactorsConfig,
) -> AppResult<f64> {
    if bmr <= 0.0 {
        return Err(AppError::invalid_input("BMR must be positive"));
    }

    let activity_factor = match activity_level {
        ActivityLevel::Sedentary => config.sedentary,
        ActivityLevel::Light => config.light,
        ActivityLevel::Moderate => config.moderate,
        ActivityLevel::Active => config.active,
        ActivityLevel::VeryActive => config.very_active,
    };

    Ok(bmr * activity_factor)
}

/// Apply the training-goal calorie adjustment on top of TDEE
///
/// - Weight loss: fixed daily deficit (default 500 kcal)
/// - Weight gain: fixed daily surplus (default 500 kcal)
/// - Maintenance and muscle gain: TDEE unchanged
#[must_use]
pub const fn apply_goal_adjustment(
    tdee: f64,
    goal: TrainingGoal,
    config: &GoalAdjustmentConfig,
) -> f64 {
    match goal {
        TrainingGoal::WeightLoss => tdee - config.weight_loss_deficit,
        TrainingGoal::WeightGain => tdee + config.weight_gain_surplus,
        TrainingGoal::Maintenance | TrainingGoal::MuscleGain => tdee,
    }
}

/// Compute complete daily nutrition targets from a profile
///
/// This is the main entry point combining BMR, TDEE, the goal adjustment,
/// the macronutrient split, and bodyweight-scaled fiber/water targets.
/// Grams are rounded from the unrounded calorie budget, so the published
/// integer calories and the macro grams can differ by sub-gram rounding.
///
/// # Arguments
/// * `profile` - Body metrics and lifestyle parameters
/// * `config` - Nutrition computation configuration
///
/// # Errors
///
/// Returns an error if input validation fails or the adjusted calorie
/// budget is not positive
pub fn compute_targets(
    profile: &NutritionProfile,
    config: &NutritionConfig,
) -> AppResult<NutritionTargets> {
    let bmr = calculate_mifflin_st_jeor(
        profile.weight_kg,
        profile.height_cm,
        profile.age_years,
        profile.sex,
        &config.bmr,
    )?;
    let tdee = calculate_tdee(bmr, profile.activity_level, &config.activity_factors)?;
    let calories = apply_goal_adjustment(tdee, profile.goal, &config.goal_adjustment);
    if calories <= 0.0 {
        return Err(AppError::out_of_range(format!(
            "Adjusted calorie target ({calories:.0} kcal) is not positive for these body metrics"
        )));
    }

    let split = &config.macro_split;
    let protein = calories * split.protein_percent / split.protein_kcal_per_gram;
    let carbs = calories * split.carb_percent / split.carb_kcal_per_gram;
    let fat = calories * split.fat_percent / split.fat_kcal_per_gram;

    let hydration = &config.hydration;
    let fiber = profile.weight_kg * hydration.fiber_grams_per_kg;
    let water_liters =
        (profile.weight_kg * hydration.water_ml_per_kg / 1000.0 * 10.0).round() / 10.0;

    Ok(NutritionTargets {
        calories: round_whole(calories),
        protein_grams: round_whole(protein),
        carb_grams: round_whole(carbs),
        fat_grams: round_whole(fat),
        fiber_grams: round_whole(fiber),
        water_liters,
    })
}

/// Round a positive quantity to the nearest whole unit
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn round_whole(value: f64) -> u32 {
    value.round() as u32
}
