// ABOUTME: Daily food logging against a built-in food database
// ABOUTME: Scales per-serving macros and sums daily totals from the stored log
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Food log
//!
//! The food database is a fixed in-crate table standing in for a nutrition
//! API. Logging scales the per-serving values by the serving count and
//! appends a timestamped entry to the user's log, so daily totals are plain
//! sums over one day's entries.

use crate::constants::limits;
use crate::errors::{AppError, AppResult};
use crate::repositories::FoodLogRepository;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One food in the built-in database, values per serving
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FoodItem {
    /// Food name, including the serving unit where one exists
    pub name: String,
    /// Kilocalories per serving
    pub calories: f64,
    /// Protein grams per serving
    pub protein: f64,
    /// Carbohydrate grams per serving
    pub carbs: f64,
    /// Fat grams per serving
    pub fat: f64,
}

/// One logged food with macros already scaled by servings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FoodLogEntry {
    /// Unique entry id
    pub id: Uuid,
    /// Food name as logged
    pub name: String,
    /// Serving count this entry was scaled by
    pub servings: f64,
    /// Kilocalories for this entry
    pub calories: f64,
    /// Protein grams for this entry
    pub protein: f64,
    /// Carbohydrate grams for this entry
    pub carbs: f64,
    /// Fat grams for this entry
    pub fat: f64,
    /// When the food was logged
    pub logged_at: DateTime<Utc>,
}

/// Calorie and macro sums for one day of the log
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct DailyTotals {
    /// Kilocalories logged
    pub calories: f64,
    /// Protein grams logged
    pub protein: f64,
    /// Carbohydrate grams logged
    pub carbs: f64,
    /// Fat grams logged
    pub fat: f64,
}

fn food(name: &str, calories: f64, protein: f64, carbs: f64, fat: f64) -> FoodItem {
    FoodItem {
        name: name.to_owned(),
        calories,
        protein,
        carbs,
        fat,
    }
}

/// The built-in food database
#[must_use]
pub fn food_database() -> Vec<FoodItem> {
    vec![
        food("Apple", 95.0, 0.5, 25.0, 0.3),
        food("Banana", 105.0, 1.3, 27.0, 0.4),
        food("Chicken Breast (100g)", 165.0, 31.0, 0.0, 3.6),
        food("Brown Rice (1 cup)", 218.0, 4.5, 45.0, 1.6),
        food("Broccoli (1 cup)", 25.0, 3.0, 5.0, 0.3),
        food("Salmon (100g)", 208.0, 20.0, 0.0, 12.0),
        food("Oatmeal (1 cup)", 154.0, 5.0, 28.0, 3.0),
    ]
}

/// Case-insensitive substring search over the food database
#[must_use]
pub fn search_foods(query: &str) -> Vec<FoodItem> {
    let needle = query.to_lowercase();
    food_database()
        .into_iter()
        .filter(|item| item.name.to_lowercase().contains(&needle))
        .collect()
}

fn find_food(name: &str) -> AppResult<FoodItem> {
    food_database()
        .into_iter()
        .find(|item| item.name.eq_ignore_ascii_case(name))
        .ok_or_else(|| AppError::not_found(format!("Food '{name}'")))
}

/// Food log operations backed by the per-user log repository
#[derive(Clone)]
pub struct FoodLogService {
    log: FoodLogRepository,
}

impl FoodLogService {
    #[must_use]
    pub const fn new(log: FoodLogRepository) -> Self {
        Self { log }
    }

    /// Log a database food, scaling its per-serving macros by `servings`
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for a food name not in the database,
    /// `InvalidInput` for a serving count that is not finite, not positive,
    /// or above the per-entry limit, or an error if the store write fails
    pub async fn log_food(
        &self,
        user_id: Uuid,
        food_name: &str,
        servings: f64,
    ) -> AppResult<FoodLogEntry> {
        if !servings.is_finite() || servings <= 0.0 || servings > limits::MAX_FOOD_SERVINGS {
            return Err(AppError::invalid_input(format!(
                "Serving count must be between 0 and {}, got {servings}",
                limits::MAX_FOOD_SERVINGS
            )));
        }
        let item = find_food(food_name)?;
        let entry = FoodLogEntry {
            id: Uuid::new_v4(),
            name: item.name,
            servings,
            calories: item.calories * servings,
            protein: item.protein * servings,
            carbs: item.carbs * servings,
            fat: item.fat * servings,
            logged_at: Utc::now(),
        };
        let mut entries = self.log.entries(user_id).await?;
        entries.push(entry.clone());
        self.log.save(user_id, &entries).await?;
        Ok(entry)
    }

    /// Entries logged on one day, in the order they were written
    ///
    /// # Errors
    ///
    /// Returns an error if the store read fails
    pub async fn entries_for(
        &self,
        user_id: Uuid,
        date: NaiveDate,
    ) -> AppResult<Vec<FoodLogEntry>> {
        Ok(self
            .log
            .entries(user_id)
            .await?
            .into_iter()
            .filter(|entry| entry.logged_at.date_naive() == date)
            .collect())
    }

    /// Calorie and macro sums for one day
    ///
    /// # Errors
    ///
    /// Returns an error if the store read fails
    pub async fn daily_totals(&self, user_id: Uuid, date: NaiveDate) -> AppResult<DailyTotals> {
        let mut totals = DailyTotals::default();
        for entry in self.entries_for(user_id, date).await? {
            totals.calories += entry.calories;
            totals.protein += entry.protein;
            totals.carbs += entry.carbs;
            totals.fat += entry.fat;
        }
        Ok(totals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;
    use crate::store::{MemoryStore, Store};
    use std::sync::Arc;

    fn memory_store() -> Arc<Store> {
        Arc::new(Store::Memory(MemoryStore::new()))
    }

    fn service(store: &Arc<Store>) -> FoodLogService {
        FoodLogService::new(FoodLogRepository::new(Arc::clone(store)))
    }

    #[test]
    fn test_database_contents() {
        let foods = food_database();
        assert_eq!(foods.len(), 7);

        let apple = &foods[0];
        assert_eq!(apple.name, "Apple");
        assert!((apple.calories - 95.0).abs() < f64::EPSILON);
        assert!((apple.protein - 0.5).abs() < f64::EPSILON);

        let salmon = foods.iter().find(|f| f.name == "Salmon (100g)").unwrap();
        assert!((salmon.fat - 12.0).abs() < f64::EPSILON);
        assert!((salmon.carbs - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let hits = search_foods("rice");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Brown Rice (1 cup)");

        let hits = search_foods("B");
        let names: Vec<&str> = hits.iter().map(|f| f.name.as_str()).collect();
        assert!(names.contains(&"Banana"));
        assert!(names.contains(&"Broccoli (1 cup)"));

        assert_eq!(search_foods("").len(), 7);
        assert!(search_foods("pizza").is_empty());
    }

    #[tokio::test]
    async fn test_log_food_scales_servings() {
        let store = memory_store();
        let service = service(&store);
        let user_id = Uuid::new_v4();

        let entry = service.log_food(user_id, "Apple", 2.0).await.unwrap();
        assert_eq!(entry.name, "Apple");
        assert!((entry.calories - 190.0).abs() < f64::EPSILON);
        assert!((entry.protein - 1.0).abs() < f64::EPSILON);
        assert!((entry.carbs - 50.0).abs() < f64::EPSILON);

        let today = Utc::now().date_naive();
        let entries = service.entries_for(user_id, today).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0], entry);
    }

    #[tokio::test]
    async fn test_log_food_name_matching() {
        let store = memory_store();
        let service = service(&store);
        let user_id = Uuid::new_v4();

        let entry = service.log_food(user_id, "banana", 1.0).await.unwrap();
        assert_eq!(entry.name, "Banana");

        let error = service.log_food(user_id, "Pizza", 1.0).await.unwrap_err();
        assert_eq!(error.code, ErrorCode::ResourceNotFound);
    }

    #[tokio::test]
    async fn test_invalid_servings_rejected() {
        let store = memory_store();
        let service = service(&store);
        let user_id = Uuid::new_v4();

        for servings in [0.0, -1.0, f64::NAN, f64::INFINITY, 51.0] {
            let error = service
                .log_food(user_id, "Apple", servings)
                .await
                .unwrap_err();
            assert_eq!(error.code, ErrorCode::InvalidInput, "servings {servings}");
        }

        let today = Utc::now().date_naive();
        assert!(service.entries_for(user_id, today).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_daily_totals_sum_the_day() {
        let store = memory_store();
        let service = service(&store);
        let user_id = Uuid::new_v4();

        service
            .log_food(user_id, "Chicken Breast (100g)", 1.0)
            .await
            .unwrap();
        service
            .log_food(user_id, "Brown Rice (1 cup)", 0.5)
            .await
            .unwrap();

        let totals = service
            .daily_totals(user_id, Utc::now().date_naive())
            .await
            .unwrap();
        assert!((totals.calories - 274.0).abs() < 1e-9);
        assert!((totals.protein - 33.25).abs() < 1e-9);
        assert!((totals.carbs - 22.5).abs() < 1e-9);
        assert!((totals.fat - 4.4).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_totals_ignore_other_days() {
        let store = memory_store();
        let service = service(&store);
        let user_id = Uuid::new_v4();

        service.log_food(user_id, "Oatmeal (1 cup)", 1.0).await.unwrap();

        let yesterday = Utc::now().date_naive().pred_opt().unwrap();
        let totals = service.daily_totals(user_id, yesterday).await.unwrap();
        assert!((totals.calories - 0.0).abs() < f64::EPSILON);
        assert!(service.entries_for(user_id, yesterday).await.unwrap().is_empty());
    }
}
