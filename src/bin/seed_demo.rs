// ABOUTME: Demo data seeder for the FitBridge key-value store
// ABOUTME: Creates the demo accounts and an approved subscription for the demo client
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Demo data seeder for FitBridge.
//!
//! Populates the store with the built-in demo accounts and one approved
//! subscription so every dashboard has data on first login.
//!
//! Usage:
//! ```bash
//! # Seed the default file store
//! cargo run --bin seed-demo
//!
//! # Seed a specific store
//! cargo run --bin seed-demo -- --store-url file:demo.json
//!
//! # Wipe the store and reseed
//! cargo run --bin seed-demo -- --force
//! ```

use anyhow::{anyhow, Result};
use chrono::Utc;
use clap::Parser;
use fitbridge::auth::hash_password;
use fitbridge::catalog;
use fitbridge::constants::{defaults, demo_accounts};
use fitbridge::models::{
    AccountStatus, AdminNotification, Session, SubscriptionRecord, User, UserRole,
    VerificationStatus,
};
use fitbridge::repositories::{AccountRepository, NotificationQueue, SubscriptionRepository};
use fitbridge::store::{Store, StoreProvider};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

#[derive(Parser)]
#[command(
    name = "seed-demo",
    about = "FitBridge demo data seeder",
    long_about = "Populate the key-value store with demo accounts and subscription data"
)]
struct SeedArgs {
    /// Store URL (memory:// or file:<path>)
    #[arg(long, default_value = defaults::DEFAULT_SEED_STORE)]
    store_url: String,

    /// Wipe the store before seeding
    #[arg(long)]
    force: bool,

    /// Enable verbose logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = SeedArgs::parse();

    let log_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt().with_env_filter(log_level).init();

    info!("=== FitBridge Demo Data Seeder ===");

    let store = Arc::new(Store::new(&args.store_url).await?);
    info!("Store backend: {}", store.backend_info());

    let accounts = AccountRepository::new(Arc::clone(&store));
    let existing = accounts.list().await?;
    if !existing.is_empty() {
        if args.force {
            info!("Clearing {} existing accounts (--force)", existing.len());
            store.clear_all().await?;
        } else {
            info!(
                "Store already holds {} accounts; pass --force to reseed",
                existing.len()
            );
            return Ok(());
        }
    }

    let admin_id = seed_accounts(&accounts).await?;
    seed_client_subscription(&store, &accounts).await?;
    info!("Seeding complete (admin id {})", admin_id);

    print_summary();
    Ok(())
}

/// Create the demo accounts, hashing each password before storage.
///
/// Active accounts that required approval are stamped as approved by the
/// demo admin so the audit trail looks like a real decision.
async fn seed_accounts(accounts: &AccountRepository) -> Result<Uuid> {
    let mut admin_id = None;
    for spec in catalog::demo_account_specs() {
        let password_hash = hash_password(spec.password)?;
        let mut user = User::new(
            spec.email.to_owned(),
            password_hash,
            spec.display_name.to_owned(),
            spec.role,
        );
        user.status = spec.status;
        if spec.role == UserRole::Admin {
            admin_id = Some(user.id);
        } else if spec.status == AccountStatus::Active {
            user.approved_by = admin_id;
            user.approved_at = Some(Utc::now());
        }
        info!("Seeding {} account {}", spec.role, spec.email);
        accounts.insert(user).await?;
    }
    admin_id.ok_or_else(|| anyhow!("Demo account list has no admin"))
}

/// Give the demo client an approved Premium subscription with Sarah Johnson.
///
/// The subscription record and its admin notification are written together
/// so the store starts out consistent.
async fn seed_client_subscription(
    store: &Arc<Store>,
    accounts: &AccountRepository,
) -> Result<()> {
    let client = accounts
        .find_by_email(demo_accounts::CLIENT_EMAIL)
        .await?
        .ok_or_else(|| anyhow!("Demo client account missing after seeding"))?;

    let plan = catalog::find_plan("premium")?;
    let trainer = catalog::find_trainer("sarah-johnson")?;
    let total_amount = plan.monthly_price + trainer.price_modifier;

    let mut record = SubscriptionRecord::pending(plan, trainer, total_amount);
    record.verification_status = VerificationStatus::Approved;
    record.verified = true;

    let mut notification =
        AdminNotification::new_subscription(&Session::for_user(&client), &record);
    notification.status = VerificationStatus::Approved;

    SubscriptionRepository::new(Arc::clone(store))
        .put(client.id, &record)
        .await?;
    NotificationQueue::new(Arc::clone(store))
        .append(notification)
        .await?;

    info!(
        "Seeded approved subscription for {}: {} + {} (${}/month)",
        client.email,
        record
            .plan
            .as_ref()
            .map_or("unknown plan", |plan| plan.name.as_str()),
        record
            .trainer
            .as_ref()
            .map_or("unknown trainer", |trainer| trainer.name.as_str()),
        total_amount
    );
    Ok(())
}

fn print_summary() {
    println!("\nSeeded demo accounts:");
    println!(
        "  {:<26} {:<14} {:<10} {}",
        "EMAIL", "PASSWORD", "ROLE", "STATUS"
    );
    for spec in catalog::demo_account_specs() {
        println!(
            "  {:<26} {:<14} {:<10} {}",
            spec.email, spec.password, spec.role, spec.status
        );
    }
    println!("\nDemo client subscription: Premium + Sarah Johnson ($64/month, approved)");
}
