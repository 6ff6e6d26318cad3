// ABOUTME: Integration tests for workout completion, food logging, and trainer chat
// ABOUTME: Wires all tracking services over one shared store for a registered client
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use anyhow::Result;
use chrono::Utc;
use fitbridge::auth::{AuthService, RegisterRequest};
use fitbridge::chat::ChatService;
use fitbridge::errors::ErrorCode;
use fitbridge::foodlog::FoodLogService;
use fitbridge::models::{Session, UserRole};
use fitbridge::repositories::{
    AccountRepository, ChatStore, FoodLogRepository, SessionStore, WorkoutLogRepository,
};
use fitbridge::store::{MemoryStore, Store};
use fitbridge::workout::WorkoutService;
use std::sync::Arc;

async fn client_session(store: &Arc<Store>) -> Result<Session> {
    let auth = AuthService::new(
        AccountRepository::new(Arc::clone(store)),
        SessionStore::new(Arc::clone(store)),
    );
    let response = auth
        .register(RegisterRequest {
            email: "tracker@example.com".to_owned(),
            password: "correct-horse-battery".to_owned(),
            display_name: "Robin Tracker".to_owned(),
            role: UserRole::Client,
        })
        .await?;
    Ok(response.session.expect("clients log in on registration"))
}

#[tokio::test]
async fn test_workout_completion_survives_service_restart() -> Result<()> {
    let store = Arc::new(Store::Memory(MemoryStore::new()));
    let session = client_session(&store).await?;

    let workouts = WorkoutService::new(WorkoutLogRepository::new(Arc::clone(&store)));
    assert!(workouts.toggle_exercise(session.user_id, "1").await?);
    assert!(workouts.toggle_exercise(session.user_id, "5").await?);

    // A fresh service over the same store sees the toggles
    let reopened = WorkoutService::new(WorkoutLogRepository::new(Arc::clone(&store)));
    let plan = reopened.current_plan(session.user_id).await?;
    assert!(plan.is_completed("1"));
    assert!(plan.is_completed("5"));
    assert!(!plan.is_completed("2"));

    let summary = reopened.completion_summary(session.user_id).await?;
    assert_eq!(summary.completed, 2);
    assert_eq!(summary.total, 10);
    assert_eq!(
        summary.describe(),
        "Completed 2 of 10 exercises this week"
    );
    Ok(())
}

#[tokio::test]
async fn test_unknown_exercise_leaves_the_plan_untouched() -> Result<()> {
    let store = Arc::new(Store::Memory(MemoryStore::new()));
    let session = client_session(&store).await?;
    let workouts = WorkoutService::new(WorkoutLogRepository::new(Arc::clone(&store)));

    let err = workouts
        .toggle_exercise(session.user_id, "99")
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);

    let summary = workouts.completion_summary(session.user_id).await?;
    assert_eq!(summary.completed, 0);
    Ok(())
}

#[tokio::test]
async fn test_food_log_scales_servings_into_daily_totals() -> Result<()> {
    let store = Arc::new(Store::Memory(MemoryStore::new()));
    let session = client_session(&store).await?;
    let food = FoodLogService::new(FoodLogRepository::new(Arc::clone(&store)));

    food.log_food(session.user_id, "Chicken Breast (100g)", 1.0)
        .await?;
    food.log_food(session.user_id, "Brown Rice (1 cup)", 0.5)
        .await?;

    let today = Utc::now().date_naive();
    let entries = food.entries_for(session.user_id, today).await?;
    assert_eq!(entries.len(), 2);

    let totals = food.daily_totals(session.user_id, today).await?;
    assert!((totals.calories - 274.0).abs() < 1e-9);
    assert!((totals.protein - 33.25).abs() < 1e-9);
    Ok(())
}

#[tokio::test]
async fn test_food_log_rejects_bad_servings_and_unknown_foods() -> Result<()> {
    let store = Arc::new(Store::Memory(MemoryStore::new()));
    let session = client_session(&store).await?;
    let food = FoodLogService::new(FoodLogRepository::new(Arc::clone(&store)));

    let err = food
        .log_food(session.user_id, "Apple", 0.0)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);

    let err = food
        .log_food(session.user_id, "Deep Dish Pizza", 1.0)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);

    let today = Utc::now().date_naive();
    assert!(food.entries_for(session.user_id, today).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_chat_seeds_a_welcome_and_rotates_replies() -> Result<()> {
    let store = Arc::new(Store::Memory(MemoryStore::new()));
    let session = client_session(&store).await?;
    let chat = ChatService::new(ChatStore::new(Arc::clone(&store)));

    let history = chat.history(&session, "sarah-johnson").await?;
    assert_eq!(history.len(), 1, "first open seeds the trainer welcome");
    assert_eq!(history[0].sender_name, "Sarah Johnson");
    assert!(history[0].content.contains("Robin Tracker"));

    let first_reply = chat
        .send_message(&session, "sarah-johnson", "How many rest days?")
        .await?;
    let second_reply = chat
        .send_message(&session, "sarah-johnson", "And what about protein?")
        .await?;
    assert_ne!(first_reply.content, second_reply.content);

    let history = chat.history(&session, "sarah-johnson").await?;
    assert_eq!(history.len(), 5, "welcome, two questions, two replies");
    Ok(())
}

#[tokio::test]
async fn test_chat_transcripts_are_per_trainer() -> Result<()> {
    let store = Arc::new(Store::Memory(MemoryStore::new()));
    let session = client_session(&store).await?;
    let chat = ChatService::new(ChatStore::new(Arc::clone(&store)));

    chat.send_message(&session, "sarah-johnson", "Hello Sarah")
        .await?;
    let wilson_history = chat.history(&session, "mike-wilson").await?;
    assert_eq!(wilson_history.len(), 1, "only the welcome for Mike");
    assert_eq!(wilson_history[0].sender_name, "Mike Wilson");

    let err = chat.history(&session, "nobody").await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);
    Ok(())
}

#[tokio::test]
async fn test_unread_counts_track_trainer_messages() -> Result<()> {
    let store = Arc::new(Store::Memory(MemoryStore::new()));
    let session = client_session(&store).await?;
    let chat = ChatService::new(ChatStore::new(Arc::clone(&store)));

    chat.send_message(&session, "john-smith", "Checking in")
        .await?;
    // Welcome plus one canned reply are unread; the client's own message is not
    assert_eq!(chat.unread_count(&session, "john-smith").await?, 2);

    chat.mark_read(&session, "john-smith").await?;
    assert_eq!(chat.unread_count(&session, "john-smith").await?, 0);
    Ok(())
}
