// ABOUTME: Criterion benchmarks for nutrition target computation and the purchase flow
// ABOUTME: Measures BMR math, full target assembly, and the wizard's persistence path
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Criterion benchmarks for the nutrition calculator and subscription wizard.
//!
//! Measures the pure target math on its own, full target assembly across a
//! spread of body profiles, and the wizard's confirm path including its two
//! store writes.

#![allow(
    clippy::missing_docs_in_private_items,
    clippy::unwrap_used,
    missing_docs
)]

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fitbridge::config::{BmrConfig, NutritionConfig};
use fitbridge::models::{AccountStatus, Session, User, UserRole};
use fitbridge::nutrition::{
    calculate_mifflin_st_jeor, compute_targets, ActivityLevel, NutritionProfile, Sex,
    TrainingGoal,
};
use fitbridge::repositories::{NotificationQueue, SubscriptionRepository};
use fitbridge::store::{MemoryStore, Store};
use fitbridge::subscription::SubscriptionWizard;
use std::sync::Arc;
use tokio::runtime::Runtime;

fn reference_profile() -> NutritionProfile {
    NutritionProfile {
        weight_kg: 70.0,
        height_cm: 170.0,
        age_years: 30,
        sex: Sex::Male,
        activity_level: ActivityLevel::Moderate,
        goal: TrainingGoal::Maintenance,
    }
}

/// A spread of plausible intake-form submissions
fn profile_spread() -> Vec<NutritionProfile> {
    let activity_levels = [
        ActivityLevel::Sedentary,
        ActivityLevel::Light,
        ActivityLevel::Moderate,
        ActivityLevel::Active,
        ActivityLevel::VeryActive,
    ];
    let goals = [
        TrainingGoal::WeightLoss,
        TrainingGoal::Maintenance,
        TrainingGoal::WeightGain,
        TrainingGoal::MuscleGain,
    ];

    let mut profiles = Vec::with_capacity(activity_levels.len() * goals.len() * 2);
    for (index, activity_level) in activity_levels.iter().enumerate() {
        for (goal_index, goal) in goals.iter().enumerate() {
            for sex in [Sex::Male, Sex::Female] {
                profiles.push(NutritionProfile {
                    weight_kg: 55.0 + (index as f64) * 8.0,
                    height_cm: 155.0 + (goal_index as f64) * 10.0,
                    age_years: 22 + (index as u32) * 9,
                    sex,
                    activity_level: *activity_level,
                    goal: *goal,
                });
            }
        }
    }
    profiles
}

fn bench_bmr_formula(c: &mut Criterion) {
    let config = BmrConfig::default();
    let mut group = c.benchmark_group("bmr");

    group.bench_function("mifflin_st_jeor", |b| {
        b.iter(|| {
            calculate_mifflin_st_jeor(
                black_box(70.0),
                black_box(170.0),
                black_box(30),
                Sex::Male,
                &config,
            )
        });
    });

    group.finish();
}

fn bench_target_computation(c: &mut Criterion) {
    let config = NutritionConfig::default();
    let mut group = c.benchmark_group("nutrition_targets");

    let reference = reference_profile();
    group.bench_function("single_profile", |b| {
        b.iter(|| compute_targets(black_box(&reference), &config));
    });

    let spread = profile_spread();
    group.bench_function("profile_spread_40", |b| {
        b.iter(|| {
            for profile in &spread {
                let _ = compute_targets(black_box(profile), &config);
            }
        });
    });

    let targets = compute_targets(&reference, &config).unwrap();
    group.bench_function("serialize_targets", |b| {
        b.iter(|| serde_json::to_vec(black_box(&targets)));
    });

    group.finish();
}

fn bench_wizard_confirmation(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let mut user = User::new(
        "bench@example.com".to_owned(),
        "$2b$12$hash".to_owned(),
        "Bench Client".to_owned(),
        UserRole::Client,
    );
    user.status = AccountStatus::Active;
    let session = Session::for_user(&user);

    let mut group = c.benchmark_group("subscription_wizard");

    group.bench_function("full_purchase_memory_store", |b| {
        b.iter(|| {
            rt.block_on(async {
                let store = Arc::new(Store::Memory(MemoryStore::new()));
                let mut wizard = SubscriptionWizard::new(
                    session.clone(),
                    SubscriptionRepository::new(Arc::clone(&store)),
                    NotificationQueue::new(store),
                );
                wizard.select_plan(black_box("premium")).unwrap();
                wizard.select_trainer(black_box("sarah-johnson")).unwrap();
                wizard.confirm_payment().await.unwrap()
            })
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_bmr_formula,
    bench_target_computation,
    bench_wizard_confirmation,
);
criterion_main!(benches);
