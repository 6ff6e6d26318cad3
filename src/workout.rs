// ABOUTME: Weekly workout plan template with per-exercise completion tracking
// ABOUTME: Persists each user's plan instance through the workout log repository
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Workout plan tracking
//!
//! Every active client trains on the built-in weekly template until
//! trainer-authored plans arrive from a real backend. The template is copied
//! into the user's workout log the first time they touch it, after which
//! completion toggles mutate the stored instance.

use crate::errors::{AppError, AppResult};
use crate::repositories::WorkoutLogRepository;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use tracing::debug;
use uuid::Uuid;

/// Coaching difficulty attached to each exercise
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Difficulty {
    /// Suitable for clients new to resistance training
    Beginner,
    /// Assumes established movement patterns
    Intermediate,
    /// Heavy compound work, form coaching expected
    Advanced,
    /// Active recovery, no load targets
    Recovery,
}

impl Display for Difficulty {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Beginner => write!(f, "Beginner"),
            Self::Intermediate => write!(f, "Intermediate"),
            Self::Advanced => write!(f, "Advanced"),
            Self::Recovery => write!(f, "Recovery"),
        }
    }
}

/// A single prescribed exercise within a training day
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Exercise {
    /// Stable identifier used by completion toggles
    pub id: String,
    /// Exercise name as shown to the client
    pub name: String,
    /// Number of sets
    pub sets: u32,
    /// Repetition prescription, free text ("12-15", "10 each leg")
    pub reps: String,
    /// Rest between sets, free text ("60s", "N/A")
    pub rest: String,
    /// Difficulty rating for this exercise
    pub difficulty: Difficulty,
}

/// One day of the weekly plan
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkoutDay {
    /// Day label including the training focus ("Monday - Upper Body")
    pub day: String,
    /// Exercises prescribed for this day
    pub exercises: Vec<Exercise>,
}

/// A user's active weekly plan, including which exercises they completed
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkoutPlan {
    /// Program week label
    pub week: String,
    /// Name of the trainer who assigned the plan
    pub trainer: String,
    /// Training days in week order
    pub days: Vec<WorkoutDay>,
    /// Ids of exercises the user marked as completed
    pub completed_exercises: Vec<String>,
}

fn exercise(
    id: &str,
    name: &str,
    sets: u32,
    reps: &str,
    rest: &str,
    difficulty: Difficulty,
) -> Exercise {
    Exercise {
        id: id.to_owned(),
        name: name.to_owned(),
        sets,
        reps: reps.to_owned(),
        rest: rest.to_owned(),
        difficulty,
    }
}

impl WorkoutPlan {
    /// The built-in weekly plan every client starts on
    #[must_use]
    pub fn weekly_template() -> Self {
        Self {
            week: "Week 3 - Strength Building".to_owned(),
            trainer: "John Smith".to_owned(),
            days: vec![
                WorkoutDay {
                    day: "Monday - Upper Body".to_owned(),
                    exercises: vec![
                        exercise("1", "Push-ups", 3, "12-15", "60s", Difficulty::Beginner),
                        exercise("2", "Dumbbell Rows", 3, "10-12", "90s", Difficulty::Intermediate),
                        exercise("3", "Shoulder Press", 3, "8-10", "90s", Difficulty::Intermediate),
                        exercise("4", "Bicep Curls", 2, "12-15", "60s", Difficulty::Beginner),
                    ],
                },
                WorkoutDay {
                    day: "Tuesday - Lower Body".to_owned(),
                    exercises: vec![
                        exercise("5", "Squats", 3, "15-20", "90s", Difficulty::Beginner),
                        exercise("6", "Lunges", 3, "10 each leg", "60s", Difficulty::Intermediate),
                        exercise("7", "Deadlifts", 3, "8-10", "120s", Difficulty::Advanced),
                        exercise("8", "Calf Raises", 2, "15-20", "45s", Difficulty::Beginner),
                    ],
                },
                WorkoutDay {
                    day: "Wednesday - Rest Day".to_owned(),
                    exercises: vec![
                        exercise(
                            "9",
                            "Light Walking",
                            1,
                            "30 minutes",
                            "N/A",
                            Difficulty::Recovery,
                        ),
                        exercise("10", "Stretching", 1, "15 minutes", "N/A", Difficulty::Recovery),
                    ],
                },
            ],
            completed_exercises: Vec::new(),
        }
    }

    /// Total number of exercises across all days
    #[must_use]
    pub fn total_exercises(&self) -> usize {
        self.days.iter().map(|day| day.exercises.len()).sum()
    }

    /// Whether the plan prescribes an exercise with this id
    #[must_use]
    pub fn contains_exercise(&self, exercise_id: &str) -> bool {
        self.days
            .iter()
            .flat_map(|day| &day.exercises)
            .any(|entry| entry.id == exercise_id)
    }

    /// Whether the user marked this exercise as completed
    #[must_use]
    pub fn is_completed(&self, exercise_id: &str) -> bool {
        self.completed_exercises.iter().any(|id| id == exercise_id)
    }

    /// Flip the completion state of one exercise
    ///
    /// Returns `true` when the exercise is now completed, `false` when the
    /// toggle cleared a previous completion.
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the plan has no exercise with this id
    pub fn toggle(&mut self, exercise_id: &str) -> AppResult<bool> {
        if !self.contains_exercise(exercise_id) {
            return Err(AppError::not_found(format!("Exercise {exercise_id}")));
        }
        if let Some(position) = self
            .completed_exercises
            .iter()
            .position(|id| id == exercise_id)
        {
            self.completed_exercises.remove(position);
            Ok(false)
        } else {
            self.completed_exercises.push(exercise_id.to_owned());
            Ok(true)
        }
    }

    /// Completion counts, totalled and broken down per day
    #[must_use]
    pub fn summary(&self) -> CompletionSummary {
        let by_day = self
            .days
            .iter()
            .map(|day| DayCompletion {
                day: day.day.clone(),
                completed: day
                    .exercises
                    .iter()
                    .filter(|entry| self.is_completed(&entry.id))
                    .count(),
                total: day.exercises.len(),
            })
            .collect::<Vec<_>>();
        CompletionSummary {
            completed: by_day.iter().map(|day| day.completed).sum(),
            total: by_day.iter().map(|day| day.total).sum(),
            by_day,
        }
    }
}

/// Per-day completion counts for one training day
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DayCompletion {
    /// Day label from the plan
    pub day: String,
    /// Exercises completed on this day
    pub completed: usize,
    /// Exercises prescribed for this day
    pub total: usize,
}

/// Weekly completion state derived from a plan instance
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CompletionSummary {
    /// Exercises completed across the week
    pub completed: usize,
    /// Exercises prescribed across the week
    pub total: usize,
    /// Breakdown in day order
    pub by_day: Vec<DayCompletion>,
}

impl CompletionSummary {
    /// Progress sentence shown on the workout screen
    #[must_use]
    pub fn describe(&self) -> String {
        let Self {
            completed, total, ..
        } = self;
        format!("Completed {completed} of {total} exercises this week")
    }
}

/// Workout plan operations backed by the per-user workout log
#[derive(Clone)]
pub struct WorkoutService {
    log: WorkoutLogRepository,
}

impl WorkoutService {
    #[must_use]
    pub const fn new(log: WorkoutLogRepository) -> Self {
        Self { log }
    }

    /// Load the user's active plan, falling back to the weekly template
    ///
    /// # Errors
    ///
    /// Returns an error if the store read fails
    pub async fn current_plan(&self, user_id: Uuid) -> AppResult<WorkoutPlan> {
        Ok(self
            .log
            .get(user_id)
            .await?
            .unwrap_or_else(WorkoutPlan::weekly_template))
    }

    /// Flip one exercise's completion state and persist the plan
    ///
    /// Returns `true` when the exercise is now completed.
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown exercise id, or an error
    /// if the store write fails
    pub async fn toggle_exercise(&self, user_id: Uuid, exercise_id: &str) -> AppResult<bool> {
        let mut plan = self.current_plan(user_id).await?;
        let now_completed = plan.toggle(exercise_id)?;
        self.log.put(user_id, &plan).await?;
        debug!(
            "Exercise {} {} for user {}",
            exercise_id,
            if now_completed {
                "completed"
            } else {
                "unmarked"
            },
            user_id
        );
        Ok(now_completed)
    }

    /// Completion counts for the user's active plan
    ///
    /// # Errors
    ///
    /// Returns an error if the store read fails
    pub async fn completion_summary(&self, user_id: Uuid) -> AppResult<CompletionSummary> {
        Ok(self.current_plan(user_id).await?.summary())
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

    fn service(store: &Arc<Store>) -> WorkoutService {
        WorkoutService::new(WorkoutLogRepository::new(Arc::clone(store)))
    }

    #[test]
    fn test_weekly_template_shape() {
        let plan = WorkoutPlan::weekly_template();

        assert_eq!(plan.week, "Week 3 - Strength Building");
        assert_eq!(plan.trainer, "John Smith");
        assert_eq!(plan.days.len(), 3);
        assert_eq!(plan.total_exercises(), 10);
        assert_eq!(plan.days[0].day, "Monday - Upper Body");
        assert_eq!(plan.days[1].day, "Tuesday - Lower Body");
        assert_eq!(plan.days[2].day, "Wednesday - Rest Day");
        assert!(plan.completed_exercises.is_empty());

        let push_ups = &plan.days[0].exercises[0];
        assert_eq!(push_ups.id, "1");
        assert_eq!(push_ups.name, "Push-ups");
        assert_eq!(push_ups.sets, 3);
        assert_eq!(push_ups.reps, "12-15");
        assert_eq!(push_ups.rest, "60s");
        assert_eq!(push_ups.difficulty, Difficulty::Beginner);

        let deadlifts = &plan.days[1].exercises[2];
        assert_eq!(deadlifts.name, "Deadlifts");
        assert_eq!(deadlifts.difficulty, Difficulty::Advanced);

        let stretching = &plan.days[2].exercises[1];
        assert_eq!(stretching.id, "10");
        assert_eq!(stretching.reps, "15 minutes");
        assert_eq!(stretching.rest, "N/A");
        assert_eq!(stretching.difficulty, Difficulty::Recovery);
    }

    #[test]
    fn test_toggle_flips_completion() {
        let mut plan = WorkoutPlan::weekly_template();

        assert!(plan.toggle("1").unwrap());
        assert!(plan.is_completed("1"));
        assert!(!plan.toggle("1").unwrap());
        assert!(!plan.is_completed("1"));
        assert!(plan.completed_exercises.is_empty());
    }

    #[test]
    fn test_toggle_unknown_exercise_rejected() {
        let mut plan = WorkoutPlan::weekly_template();

        let error = plan.toggle("99").unwrap_err();
        assert_eq!(error.code, ErrorCode::ResourceNotFound);
        assert!(plan.completed_exercises.is_empty());
    }

    #[test]
    fn test_summary_counts_per_day() {
        let mut plan = WorkoutPlan::weekly_template();
        plan.toggle("1").unwrap();
        plan.toggle("2").unwrap();
        plan.toggle("5").unwrap();

        let summary = plan.summary();
        assert_eq!(summary.completed, 3);
        assert_eq!(summary.total, 10);
        assert_eq!(summary.by_day[0].completed, 2);
        assert_eq!(summary.by_day[0].total, 4);
        assert_eq!(summary.by_day[1].completed, 1);
        assert_eq!(summary.by_day[2].completed, 0);
        assert_eq!(summary.by_day[2].total, 2);
        assert_eq!(summary.describe(), "Completed 3 of 10 exercises this week");
    }

    #[tokio::test]
    async fn test_fresh_user_gets_template() {
        let store = memory_store();
        let service = service(&store);

        let plan = service.current_plan(Uuid::new_v4()).await.unwrap();
        assert_eq!(plan, WorkoutPlan::weekly_template());
    }

    #[tokio::test]
    async fn test_toggle_persists_across_service_instances() {
        let store = memory_store();
        let user_id = Uuid::new_v4();

        assert!(service(&store).toggle_exercise(user_id, "7").await.unwrap());

        let summary = service(&store).completion_summary(user_id).await.unwrap();
        assert_eq!(summary.completed, 1);
        assert_eq!(summary.by_day[1].completed, 1);
    }

    #[tokio::test]
    async fn test_failed_toggle_does_not_persist() {
        let store = memory_store();
        let service = service(&store);
        let user_id = Uuid::new_v4();

        let error = service.toggle_exercise(user_id, "99").await.unwrap_err();
        assert_eq!(error.code, ErrorCode::ResourceNotFound);

        let log = WorkoutLogRepository::new(store);
        assert!(log.get(user_id).await.unwrap().is_none());
    }
}
