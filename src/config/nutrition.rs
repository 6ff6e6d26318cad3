// ABOUTME: Nutrition configuration for daily target computation
// ABOUTME: Configures BMR coefficients, activity factors, macro split, and hydration rules
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Nutrition Target Configuration
//!
//! Provides configuration for nutrition target computation including BMR
//! calculation, TDEE activity factors, goal adjustment, and macronutrient
//! distribution.
//!
//! # Scientific References
//!
//! - BMR: Mifflin et al. (1990) DOI: 10.1093/ajcn/51.2.241
//! - Activity factors: McArdle, Katch & Katch (2010), Exercise Physiology

use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Nutrition target computation configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NutritionConfig {
    /// Basal Metabolic Rate (BMR) calculation settings
    pub bmr: BmrConfig,
    /// Activity factor multipliers for TDEE calculation
    pub activity_factors: ActivityFactorsConfig,
    /// Calorie adjustment applied per training goal
    pub goal_adjustment: GoalAdjustmentConfig,
    /// Macronutrient distribution targets
    pub macro_split: MacroSplitConfig,
    /// Fiber and water targets per kilogram of bodyweight
    pub hydration: HydrationConfig,
}

impl NutritionConfig {
    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns a config error if the macro percentages do not sum to 1.0 or
    /// any factor is non-positive
    pub fn validate(&self) -> AppResult<()> {
        let split_sum = self.macro_split.protein_percent
            + self.macro_split.carb_percent
            + self.macro_split.fat_percent;
        if (split_sum - 1.0).abs() > 1e-9 {
            return Err(AppError::config(format!(
                "macro split percentages must sum to 1.0, got {split_sum}"
            )));
        }
        let factors = [
            self.activity_factors.sedentary,
            self.activity_factors.light,
            self.activity_factors.moderate,
            self.activity_factors.active,
            self.activity_factors.very_active,
        ];
        if factors.iter().any(|f| *f <= 0.0) {
            return Err(AppError::config("activity factors must be positive"));
        }
        Ok(())
    }
}

/// BMR (Basal Metabolic Rate) calculation configuration
///
/// Reference: Mifflin, M.D., et al. (1990). A new predictive equation for resting energy expenditure.
/// American Journal of Clinical Nutrition, 51(2), 241-247. DOI: 10.1093/ajcn/51.2.241
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BmrConfig {
    /// Mifflin-St Jeor weight coefficient (10.0)
    pub msj_weight_coef: f64,
    /// Mifflin-St Jeor height coefficient (6.25)
    pub msj_height_coef: f64,
    /// Mifflin-St Jeor age coefficient (-5.0)
    pub msj_age_coef: f64,
    /// Mifflin-St Jeor male constant (+5)
    pub msj_male_constant: f64,
    /// Mifflin-St Jeor female constant (-161)
    pub msj_female_constant: f64,
}

impl Default for BmrConfig {
    fn default() -> Self {
        Self {
            msj_weight_coef: 10.0,
            msj_height_coef: 6.25,
            msj_age_coef: -5.0,
            msj_male_constant: 5.0,
            msj_female_constant: -161.0,
        }
    }
}

/// Activity factor multipliers for TDEE calculation
///
/// Reference: `McArdle`, W.D., Katch, F.I., & Katch, V.L. (2010). Exercise Physiology
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityFactorsConfig {
    /// Sedentary (little/no exercise): 1.2
    pub sedentary: f64,
    /// Light exercise 1-3 days/week: 1.375
    pub light: f64,
    /// Moderate exercise 3-5 days/week: 1.55
    pub moderate: f64,
    /// Hard exercise 6-7 days/week: 1.725
    pub active: f64,
    /// Very hard exercise or physical job: 1.9
    pub very_active: f64,
}

impl Default for ActivityFactorsConfig {
    fn default() -> Self {
        Self {
            sedentary: 1.2,
            light: 1.375,
            moderate: 1.55,
            active: 1.725,
            very_active: 1.9,
        }
    }
}

/// Calorie adjustment applied on top of TDEE per training goal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalAdjustmentConfig {
    /// Daily deficit for weight loss (kcal)
    pub weight_loss_deficit: f64,
    /// Daily surplus for weight gain (kcal)
    pub weight_gain_surplus: f64,
}

impl Default for GoalAdjustmentConfig {
    fn default() -> Self {
        Self {
            weight_loss_deficit: 500.0,
            weight_gain_surplus: 500.0,
        }
    }
}

/// Macronutrient distribution as fractions of daily calories
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MacroSplitConfig {
    /// Protein share of calories: 25%
    pub protein_percent: f64,
    /// Carbohydrate share of calories: 45%
    pub carb_percent: f64,
    /// Fat share of calories: 30%
    pub fat_percent: f64,
    /// Energy density of protein (kcal/g): 4
    pub protein_kcal_per_gram: f64,
    /// Energy density of carbohydrate (kcal/g): 4
    pub carb_kcal_per_gram: f64,
    /// Energy density of fat (kcal/g): 9
    pub fat_kcal_per_gram: f64,
}

impl Default for MacroSplitConfig {
    fn default() -> Self {
        Self {
            protein_percent: 0.25,
            carb_percent: 0.45,
            fat_percent: 0.30,
            protein_kcal_per_gram: 4.0,
            carb_kcal_per_gram: 4.0,
            fat_kcal_per_gram: 9.0,
        }
    }
}

/// Fiber and hydration targets scaled by bodyweight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HydrationConfig {
    /// Fiber target per kilogram of bodyweight (g/kg): 0.5
    pub fiber_grams_per_kg: f64,
    /// Water target per kilogram of bodyweight (mL/kg): 35
    pub water_ml_per_kg: f64,
}

impl Default for HydrationConfig {
    fn default() -> Self {
        Self {
            fiber_grams_per_kg: 0.5,
            water_ml_per_kg: 35.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(NutritionConfig::default().validate().is_ok());
    }

    #[test]
    fn test_unbalanced_split_rejected() {
        let mut config = NutritionConfig::default();
        config.macro_split.protein_percent = 0.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_non_positive_factor_rejected() {
        let mut config = NutritionConfig::default();
        config.activity_factors.moderate = 0.0;
        assert!(config.validate().is_err());
    }
}
