// ABOUTME: Built-in commerce catalog with plans, trainers, and payment details
// ABOUTME: Stands in for server-side catalog endpoints with fixed demo data
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Static subscription catalog
//!
//! Plans and trainers are fixed demo data. Lookups go by catalog id and fail
//! with `ResourceNotFound` for unknown ids so callers never have to handle a
//! half-selected wizard state.

use crate::constants::demo_accounts;
use crate::errors::{AppError, AppResult};
use crate::models::{AccountStatus, PaymentInstructions, Plan, Trainer, UserRole};

/// All subscription plans, cheapest first
#[must_use]
pub fn plans() -> Vec<Plan> {
    vec![
        Plan {
            id: "basic".to_owned(),
            name: "Basic".to_owned(),
            monthly_price: 29,
            duration_unit: "month".to_owned(),
            features: vec![
                "Access to personal trainer".to_owned(),
                "Basic workout plans".to_owned(),
                "Nutrition guidelines".to_owned(),
                "Email support".to_owned(),
                "Monthly progress review".to_owned(),
            ],
            popular: false,
        },
        Plan {
            id: "premium".to_owned(),
            name: "Premium".to_owned(),
            monthly_price: 49,
            duration_unit: "month".to_owned(),
            features: vec![
                "Everything in Basic".to_owned(),
                "Custom workout & diet plans".to_owned(),
                "Weekly progress reviews".to_owned(),
                "Live chat support".to_owned(),
                "Video consultations".to_owned(),
                "Meal planning assistance".to_owned(),
            ],
            popular: true,
        },
        Plan {
            id: "elite".to_owned(),
            name: "Elite".to_owned(),
            monthly_price: 79,
            duration_unit: "month".to_owned(),
            features: vec![
                "Everything in Premium".to_owned(),
                "Daily check-ins".to_owned(),
                "24/7 priority support".to_owned(),
                "Advanced analytics".to_owned(),
                "Supplement recommendations".to_owned(),
                "Group training sessions".to_owned(),
            ],
            popular: false,
        },
    ]
}

/// All bookable trainers
#[must_use]
pub fn trainers() -> Vec<Trainer> {
    vec![
        Trainer {
            id: "john-smith".to_owned(),
            name: "John Smith".to_owned(),
            years_experience: 5,
            specializations: vec![
                "Weight Loss".to_owned(),
                "Strength Training".to_owned(),
                "Nutrition".to_owned(),
            ],
            rating: 4.8,
            review_count: 124,
            price_modifier: 0,
            bio: "Certified personal trainer specializing in weight loss and strength \
                  training. Helped over 200 clients achieve their fitness goals."
                .to_owned(),
            certifications: vec!["NASM-CPT".to_owned(), "Nutrition Specialist".to_owned()],
        },
        Trainer {
            id: "sarah-johnson".to_owned(),
            name: "Sarah Johnson".to_owned(),
            years_experience: 8,
            specializations: vec![
                "Yoga".to_owned(),
                "Flexibility".to_owned(),
                "Mind-Body".to_owned(),
                "Weight Loss".to_owned(),
            ],
            rating: 4.9,
            review_count: 89,
            price_modifier: 15,
            bio: "Expert in holistic fitness approach combining physical training with \
                  mental wellness. Yoga instructor and certified nutritionist."
                .to_owned(),
            certifications: vec![
                "RYT-500".to_owned(),
                "ACSM-CPT".to_owned(),
                "Holistic Nutrition".to_owned(),
            ],
        },
        Trainer {
            id: "mike-wilson".to_owned(),
            name: "Mike Wilson".to_owned(),
            years_experience: 10,
            specializations: vec![
                "Bodybuilding".to_owned(),
                "Powerlifting".to_owned(),
                "Advanced Training".to_owned(),
            ],
            rating: 4.7,
            review_count: 156,
            price_modifier: 25,
            bio: "Former competitive bodybuilder with expertise in advanced training \
                  techniques. Specializes in muscle building and strength development."
                .to_owned(),
            certifications: vec![
                "NSCA-CSCS".to_owned(),
                "Powerlifting Coach".to_owned(),
                "Sports Nutrition".to_owned(),
            ],
        },
        Trainer {
            id: "emma-davis".to_owned(),
            name: "Emma Davis".to_owned(),
            years_experience: 6,
            specializations: vec![
                "HIIT".to_owned(),
                "Cardio".to_owned(),
                "Weight Loss".to_owned(),
                "Functional Training".to_owned(),
            ],
            rating: 4.8,
            review_count: 98,
            price_modifier: 10,
            bio: "High-energy trainer focused on functional fitness and cardiovascular \
                  health. Expert in creating efficient, time-effective workouts."
                .to_owned(),
            certifications: vec![
                "ACE-CPT".to_owned(),
                "HIIT Specialist".to_owned(),
                "Functional Movement".to_owned(),
            ],
        },
    ]
}

/// Look up a plan by catalog id
///
/// # Errors
///
/// Returns `ResourceNotFound` for ids not in the catalog
pub fn find_plan(plan_id: &str) -> AppResult<Plan> {
    plans()
        .into_iter()
        .find(|p| p.id == plan_id)
        .ok_or_else(|| AppError::not_found(format!("Plan {plan_id}")))
}

/// Look up a trainer by catalog id
///
/// # Errors
///
/// Returns `ResourceNotFound` for ids not in the catalog
pub fn find_trainer(trainer_id: &str) -> AppResult<Trainer> {
    trainers()
        .into_iter()
        .find(|t| t.id == trainer_id)
        .ok_or_else(|| AppError::not_found(format!("Trainer {trainer_id}")))
}

/// Manual transfer details shown on the payment step
#[must_use]
pub fn payment_instructions() -> PaymentInstructions {
    PaymentInstructions {
        account_name: "FitBridge Fitness Solutions".to_owned(),
        account_number: "1234567890123456".to_owned(),
        ifsc_code: "FITB0001234".to_owned(),
        bank_name: "FitBridge Bank".to_owned(),
        upi_id: "fitbridge@upi".to_owned(),
    }
}

/// Seed description of a demo login, hashed into a real account at setup time
#[derive(Debug, Clone)]
pub struct DemoAccount {
    /// Login email
    pub email: &'static str,
    /// Plaintext password, hashed before storage
    pub password: &'static str,
    /// Display name
    pub display_name: &'static str,
    /// Role bound to the account
    pub role: UserRole,
    /// Status the account starts in
    pub status: AccountStatus,
}

/// The four built-in demo logins
#[must_use]
pub fn demo_account_specs() -> Vec<DemoAccount> {
    vec![
        DemoAccount {
            email: demo_accounts::ADMIN_EMAIL,
            password: demo_accounts::ADMIN_PASSWORD,
            display_name: "Admin User",
            role: UserRole::Admin,
            status: AccountStatus::Active,
        },
        DemoAccount {
            email: demo_accounts::TRAINER_EMAIL,
            password: demo_accounts::TRAINER_PASSWORD,
            display_name: "John Trainer",
            role: UserRole::Trainer,
            status: AccountStatus::Active,
        },
        DemoAccount {
            email: demo_accounts::CLIENT_EMAIL,
            password: demo_accounts::CLIENT_PASSWORD,
            display_name: "Jane Client",
            role: UserRole::Client,
            status: AccountStatus::Active,
        },
        DemoAccount {
            email: demo_accounts::PENDING_EMAIL,
            password: demo_accounts::PENDING_PASSWORD,
            display_name: "Pending Trainer",
            role: UserRole::Trainer,
            status: AccountStatus::Pending,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_lookup() {
        let plan = find_plan("premium").unwrap();
        assert_eq!(plan.monthly_price, 49);
        assert!(plan.popular);
        assert!(find_plan("platinum").is_err());
    }

    #[test]
    fn test_trainer_lookup_and_modifiers() {
        let base = find_trainer("john-smith").unwrap();
        assert_eq!(base.price_modifier, 0);
        let premium_coach = find_trainer("mike-wilson").unwrap();
        assert_eq!(premium_coach.price_modifier, 25);
        assert!(find_trainer("nobody").is_err());
    }

    #[test]
    fn test_catalog_ids_unique() {
        let mut plan_ids: Vec<String> = plans().into_iter().map(|p| p.id).collect();
        plan_ids.sort_unstable();
        plan_ids.dedup();
        assert_eq!(plan_ids.len(), 3);

        let mut trainer_ids: Vec<String> = trainers().into_iter().map(|t| t.id).collect();
        trainer_ids.sort_unstable();
        trainer_ids.dedup();
        assert_eq!(trainer_ids.len(), 4);
    }

    #[test]
    fn test_demo_account_roles() {
        let specs = demo_account_specs();
        assert_eq!(specs.len(), 4);
        assert!(specs
            .iter()
            .any(|a| a.role == UserRole::Admin && a.status == AccountStatus::Active));
        assert!(specs
            .iter()
            .any(|a| a.role == UserRole::Trainer && a.status == AccountStatus::Pending));
    }
}
