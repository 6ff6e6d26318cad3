// ABOUTME: Role-routed dashboard assembly for client, trainer, and admin views
// ABOUTME: Read-only composition over repositories plus the original demo chart data
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Dashboards
//!
//! One router fans a session out to the view for its role. Everything here
//! is read-only assembly: live state comes from the repositories, while the
//! chart series, rosters, and tips are fixed demo data standing in for
//! tracking endpoints that do not exist yet.

use crate::errors::AppResult;
use crate::foodlog::{DailyTotals, FoodLogService};
use crate::models::{
    AccountStatus, AdminNotification, Session, SubscriptionRecord, User, UserRole,
    VerificationStatus,
};
use crate::repositories::{AccountRepository, NotificationQueue, SubscriptionRepository};
use crate::workout::{CompletionSummary, WorkoutService};
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Subscription state as shown on the client dashboard
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum SubscriptionSummary {
    /// No subscription started
    NotSubscribed,
    /// Payment received, waiting for admin verification
    Pending(PlanChoice),
    /// Verified and active
    Approved(PlanChoice),
    /// Declined by an admin
    Rejected(PlanChoice),
}

impl SubscriptionSummary {
    /// Whether the subscription unlocks the premium experience
    #[must_use]
    pub const fn is_premium(&self) -> bool {
        matches!(self, Self::Approved(_))
    }
}

/// Plan and trainer the user picked in the wizard
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlanChoice {
    /// Selected plan name
    pub plan_name: String,
    /// Selected trainer name
    pub trainer_name: String,
    /// Monthly total in whole currency units
    pub total_amount: i64,
}

/// This week's headline numbers on the client dashboard
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct WeeklyProgress {
    /// Workouts completed so far
    pub workouts_completed: u32,
    /// Workouts planned for the week
    pub workouts_planned: u32,
    /// Daily calorie target
    pub calories_target: u32,
    /// Calories consumed today
    pub calories_consumed: u32,
    /// Water drunk today in liters
    pub water_intake_l: f64,
    /// Daily water target in liters
    pub water_target_l: f64,
}

/// A starter exercise shown to users without an active subscription
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BasicWorkout {
    pub name: String,
    pub sets: u32,
    pub reps: String,
    pub description: String,
}

/// One general healthy-eating tip
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NutritionTip {
    pub title: String,
    pub tip: String,
}

/// One point in the body composition chart
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeightPoint {
    pub week: String,
    pub weight_kg: f64,
    pub body_fat_percent: f64,
}

/// One day in the weekly workout activity chart
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkoutActivityPoint {
    pub day: String,
    pub workouts: u32,
    pub calories: u32,
}

/// The client view: live subscription and log state plus demo chart series
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ClientDashboard {
    /// Greeting name
    pub display_name: String,
    /// Subscription state driving the premium gate
    pub subscription: SubscriptionSummary,
    /// Weekly percentage shown on the overall progress card
    pub overall_progress_percent: u8,
    /// This week's headline numbers
    pub weekly_progress: WeeklyProgress,
    /// Live completion state of the user's workout plan
    pub workout_completion: CompletionSummary,
    /// Today's logged calories and macros
    pub todays_totals: DailyTotals,
    /// Starter exercises for the free tier
    pub basic_workouts: Vec<BasicWorkout>,
    /// General nutrition guidance for the free tier
    pub nutrition_tips: Vec<NutritionTip>,
    /// Week-by-week weight and body fat series
    pub weight_series: Vec<WeightPoint>,
    /// Per-day workout activity for the current week
    pub workout_week: Vec<WorkoutActivityPoint>,
}

/// One client card on the trainer's roster
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrainerClient {
    pub name: String,
    pub email: String,
    pub body_type: String,
    pub weight_kg: f64,
    pub goal: String,
    /// Last workout date as displayed ("2024-01-15")
    pub last_workout: String,
}

/// Static compliance numbers shown for every roster client
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ComplianceSnapshot {
    pub workout_compliance_percent: u32,
    pub nutrition_compliance_percent: u32,
    pub progress_score_percent: u32,
}

/// The trainer view: roster and weekly stats, gated on account approval
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TrainerDashboard {
    /// Greeting name
    pub display_name: String,
    /// Whether the trainer account has been approved by an admin
    pub approved: bool,
    /// Assigned clients, empty until the account is approved
    pub roster: Vec<TrainerClient>,
    /// Sessions planned this week
    pub sessions_planned: u32,
    /// Average client adherence percentage
    pub compliance_rate_percent: u32,
    /// Per-client compliance numbers
    pub compliance: ComplianceSnapshot,
}

/// Registered account counts by role
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoleCounts {
    pub admins: usize,
    pub trainers: usize,
    pub clients: usize,
}

/// One row in the admin's client overview
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClientAssignment {
    pub name: String,
    pub trainer: String,
    pub active: bool,
}

/// The admin view: everything waiting on a decision plus account totals
#[derive(Debug, Clone, Serialize)]
pub struct AdminDashboard {
    /// Greeting name
    pub display_name: String,
    /// Subscription requests still awaiting verification
    pub pending_subscriptions: Vec<AdminNotification>,
    /// Trainer accounts still awaiting approval
    pub pending_trainers: Vec<User>,
    /// Registered account counts by role
    pub role_counts: RoleCounts,
    /// Demo client-to-trainer assignments
    pub client_overview: Vec<ClientAssignment>,
}

/// The dashboard matching a session's role
#[derive(Debug, Clone, Serialize)]
pub enum DashboardView {
    Client(ClientDashboard),
    Trainer(TrainerDashboard),
    Admin(AdminDashboard),
}

/// Weekly headline numbers shown on the client dashboard cards
#[must_use]
pub const fn weekly_progress_snapshot() -> WeeklyProgress {
    WeeklyProgress {
        workouts_completed: 2,
        workouts_planned: 5,
        calories_target: 2200,
        calories_consumed: 2050,
        water_intake_l: 2.1,
        water_target_l: 2.5,
    }
}

fn starter(name: &str, sets: u32, reps: &str, description: &str) -> BasicWorkout {
    BasicWorkout {
        name: name.to_owned(),
        sets,
        reps: reps.to_owned(),
        description: description.to_owned(),
    }
}

/// Starter exercises shown to users without an approved subscription
#[must_use]
pub fn basic_workouts() -> Vec<BasicWorkout> {
    vec![
        starter("Push-ups", 3, "10-15", "Basic upper body exercise"),
        starter("Squats", 3, "15-20", "Lower body strength"),
        starter("Plank", 3, "30-60 seconds", "Core strengthening"),
        starter("Jumping Jacks", 3, "20", "Cardio warm-up"),
    ]
}

fn tip(title: &str, tip: &str) -> NutritionTip {
    NutritionTip {
        title: title.to_owned(),
        tip: tip.to_owned(),
    }
}

/// General healthy-eating tips shown on the free tier
#[must_use]
pub fn nutrition_tips() -> Vec<NutritionTip> {
    vec![
        tip("Daily Water Intake", "Aim for 8-10 glasses of water per day"),
        tip(
            "Balanced Meals",
            "Include proteins, carbohydrates, and healthy fats in each meal",
        ),
        tip(
            "Portion Control",
            "Use smaller plates and listen to your hunger cues",
        ),
    ]
}

fn weight_point(week: &str, weight_kg: f64, body_fat_percent: f64) -> WeightPoint {
    WeightPoint {
        week: week.to_owned(),
        weight_kg,
        body_fat_percent,
    }
}

/// Week-by-week weight and body fat demo series
#[must_use]
pub fn weight_progress_series() -> Vec<WeightPoint> {
    vec![
        weight_point("Week 1", 70.0, 18.0),
        weight_point("Week 2", 69.5, 17.8),
        weight_point("Week 3", 69.0, 17.5),
        weight_point("Week 4", 68.8, 17.2),
        weight_point("Week 5", 68.5, 17.0),
        weight_point("Week 6", 68.2, 16.8),
    ]
}

fn activity(day: &str, workouts: u32, calories: u32) -> WorkoutActivityPoint {
    WorkoutActivityPoint {
        day: day.to_owned(),
        workouts,
        calories,
    }
}

/// Per-day workout activity demo series for the current week
#[must_use]
pub fn weekly_workout_activity() -> Vec<WorkoutActivityPoint> {
    vec![
        activity("Mon", 1, 450),
        activity("Tue", 1, 380),
        activity("Wed", 0, 0),
        activity("Thu", 1, 420),
        activity("Fri", 1, 500),
        activity("Sat", 1, 350),
        activity("Sun", 0, 0),
    ]
}

fn roster_client(
    name: &str,
    email: &str,
    body_type: &str,
    weight_kg: f64,
    goal: &str,
    last_workout: &str,
) -> TrainerClient {
    TrainerClient {
        name: name.to_owned(),
        email: email.to_owned(),
        body_type: body_type.to_owned(),
        weight_kg,
        goal: goal.to_owned(),
        last_workout: last_workout.to_owned(),
    }
}

/// The demo client roster every approved trainer sees
#[must_use]
pub fn trainer_roster() -> Vec<TrainerClient> {
    vec![
        roster_client(
            "Alice Brown",
            "alice@email.com",
            "Ectomorph",
            55.0,
            "Weight Gain",
            "2024-01-15",
        ),
        roster_client(
            "Bob Davis",
            "bob@email.com",
            "Mesomorph",
            75.0,
            "Muscle Building",
            "2024-01-14",
        ),
        roster_client(
            "Carol White",
            "carol@email.com",
            "Endomorph",
            68.0,
            "Weight Loss",
            "2024-01-13",
        ),
    ]
}

fn assignment(name: &str, trainer: &str, active: bool) -> ClientAssignment {
    ClientAssignment {
        name: name.to_owned(),
        trainer: trainer.to_owned(),
        active,
    }
}

/// Demo client-to-trainer assignments on the admin overview
#[must_use]
pub fn client_overview() -> Vec<ClientAssignment> {
    vec![
        assignment("Alice Brown", "John Smith", true),
        assignment("Bob Davis", "Mike Wilson", true),
        assignment("Carol White", "John Smith", false),
    ]
}

/// Routes a session to the dashboard for its role
#[derive(Clone)]
pub struct DashboardRouter {
    subscriptions: SubscriptionRepository,
    notifications: NotificationQueue,
    accounts: AccountRepository,
    workouts: WorkoutService,
    food: FoodLogService,
}

impl DashboardRouter {
    #[must_use]
    pub const fn new(
        subscriptions: SubscriptionRepository,
        notifications: NotificationQueue,
        accounts: AccountRepository,
        workouts: WorkoutService,
        food: FoodLogService,
    ) -> Self {
        Self {
            subscriptions,
            notifications,
            accounts,
            workouts,
            food,
        }
    }

    /// Assemble the dashboard for this session's role
    ///
    /// # Errors
    ///
    /// Returns an error if any repository read fails
    pub async fn route(&self, session: &Session) -> AppResult<DashboardView> {
        match session.role {
            UserRole::Client => Ok(DashboardView::Client(self.client_view(session).await?)),
            UserRole::Trainer => Ok(DashboardView::Trainer(Self::trainer_view(session))),
            UserRole::Admin => Ok(DashboardView::Admin(self.admin_view(session).await?)),
        }
    }

    async fn client_view(&self, session: &Session) -> AppResult<ClientDashboard> {
        let subscription = self
            .subscriptions
            .get(session.user_id)
            .await?
            .map_or(SubscriptionSummary::NotSubscribed, |record| {
                summarize_subscription(&record)
            });
        let workout_completion = self.workouts.completion_summary(session.user_id).await?;
        let todays_totals = self
            .food
            .daily_totals(session.user_id, Utc::now().date_naive())
            .await?;
        let overall_progress_percent = if subscription.is_premium() { 85 } else { 40 };
        Ok(ClientDashboard {
            display_name: session.display_name.clone(),
            subscription,
            overall_progress_percent,
            weekly_progress: weekly_progress_snapshot(),
            workout_completion,
            todays_totals,
            basic_workouts: basic_workouts(),
            nutrition_tips: nutrition_tips(),
            weight_series: weight_progress_series(),
            workout_week: weekly_workout_activity(),
        })
    }

    fn trainer_view(session: &Session) -> TrainerDashboard {
        let roster = if session.approved {
            trainer_roster()
        } else {
            Vec::new()
        };
        TrainerDashboard {
            display_name: session.display_name.clone(),
            approved: session.approved,
            roster,
            sessions_planned: 18,
            compliance_rate_percent: 87,
            compliance: ComplianceSnapshot {
                workout_compliance_percent: 85,
                nutrition_compliance_percent: 78,
                progress_score_percent: 82,
            },
        }
    }

    async fn admin_view(&self, session: &Session) -> AppResult<AdminDashboard> {
        let pending_subscriptions = self.notifications.pending().await?;
        let pending_trainers = self
            .accounts
            .list_by_status(AccountStatus::Pending)
            .await?
            .into_iter()
            .filter(|account| account.role == UserRole::Trainer)
            .collect();
        let mut role_counts = RoleCounts::default();
        for account in self.accounts.list().await? {
            match account.role {
                UserRole::Admin => role_counts.admins += 1,
                UserRole::Trainer => role_counts.trainers += 1,
                UserRole::Client => role_counts.clients += 1,
            }
        }
        Ok(AdminDashboard {
            display_name: session.display_name.clone(),
            pending_subscriptions,
            pending_trainers,
            role_counts,
            client_overview: client_overview(),
        })
    }
}

fn summarize_subscription(record: &SubscriptionRecord) -> SubscriptionSummary {
    if !record.subscribed {
        return SubscriptionSummary::NotSubscribed;
    }
    let choice = PlanChoice {
        plan_name: record
            .plan
            .as_ref()
            .map(|plan| plan.name.clone())
            .unwrap_or_default(),
        trainer_name: record
            .trainer
            .as_ref()
            .map(|trainer| trainer.name.clone())
            .unwrap_or_default(),
        total_amount: record.total_amount,
    };
    match record.verification_status {
        VerificationStatus::Pending => SubscriptionSummary::Pending(choice),
        VerificationStatus::Approved => SubscriptionSummary::Approved(choice),
        VerificationStatus::Rejected => SubscriptionSummary::Rejected(choice),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::{FoodLogRepository, WorkoutLogRepository};
    use crate::store::{MemoryStore, Store};
    use crate::{catalog, workout::WorkoutPlan};
    use std::sync::Arc;

    fn memory_store() -> Arc<Store> {
        Arc::new(Store::Memory(MemoryStore::new()))
    }

    fn router(store: &Arc<Store>) -> DashboardRouter {
        DashboardRouter::new(
            SubscriptionRepository::new(Arc::clone(store)),
            NotificationQueue::new(Arc::clone(store)),
            AccountRepository::new(Arc::clone(store)),
            WorkoutService::new(WorkoutLogRepository::new(Arc::clone(store))),
            FoodLogService::new(FoodLogRepository::new(Arc::clone(store))),
        )
    }

    fn session_for(role: UserRole, approved: bool) -> Session {
        let mut user = User::new(
            "person@example.com".to_owned(),
            "$2b$12$hash".to_owned(),
            "Test Person".to_owned(),
            role,
        );
        if approved {
            user.status = AccountStatus::Active;
        }
        Session::for_user(&user)
    }

    #[tokio::test]
    async fn test_client_view_without_subscription() {
        let store = memory_store();
        let session = session_for(UserRole::Client, true);

        let view = router(&store).route(&session).await.unwrap();
        let DashboardView::Client(dashboard) = view else {
            panic!("expected client view");
        };
        assert_eq!(dashboard.subscription, SubscriptionSummary::NotSubscribed);
        assert_eq!(dashboard.overall_progress_percent, 40);
        assert_eq!(dashboard.weekly_progress.workouts_completed, 2);
        assert_eq!(dashboard.weekly_progress.calories_target, 2200);
        assert_eq!(dashboard.basic_workouts.len(), 4);
        assert_eq!(dashboard.nutrition_tips.len(), 3);
        assert_eq!(dashboard.weight_series.len(), 6);
        assert_eq!(dashboard.workout_week.len(), 7);
        assert_eq!(dashboard.workout_completion.total, 10);
        assert_eq!(dashboard.workout_completion.completed, 0);
    }

    #[tokio::test]
    async fn test_client_view_reflects_approved_subscription() {
        let store = memory_store();
        let session = session_for(UserRole::Client, true);

        let plan = catalog::find_plan("premium").unwrap();
        let trainer = catalog::find_trainer("sarah-johnson").unwrap();
        let mut record = SubscriptionRecord::pending(plan, trainer, 64);
        record.verification_status = VerificationStatus::Approved;
        record.verified = true;
        SubscriptionRepository::new(Arc::clone(&store))
            .put(session.user_id, &record)
            .await
            .unwrap();

        let view = router(&store).route(&session).await.unwrap();
        let DashboardView::Client(dashboard) = view else {
            panic!("expected client view");
        };
        assert_eq!(
            dashboard.subscription,
            SubscriptionSummary::Approved(PlanChoice {
                plan_name: "Premium".to_owned(),
                trainer_name: "Sarah Johnson".to_owned(),
                total_amount: 64,
            })
        );
        assert_eq!(dashboard.overall_progress_percent, 85);
    }

    #[tokio::test]
    async fn test_client_view_includes_live_logs() {
        let store = memory_store();
        let session = session_for(UserRole::Client, true);

        WorkoutService::new(WorkoutLogRepository::new(Arc::clone(&store)))
            .toggle_exercise(session.user_id, "1")
            .await
            .unwrap();
        FoodLogService::new(FoodLogRepository::new(Arc::clone(&store)))
            .log_food(session.user_id, "Banana", 1.0)
            .await
            .unwrap();

        let view = router(&store).route(&session).await.unwrap();
        let DashboardView::Client(dashboard) = view else {
            panic!("expected client view");
        };
        assert_eq!(dashboard.workout_completion.completed, 1);
        assert!((dashboard.todays_totals.calories - 105.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_trainer_view_gated_on_approval() {
        let store = memory_store();

        let approved = session_for(UserRole::Trainer, true);
        let view = router(&store).route(&approved).await.unwrap();
        let DashboardView::Trainer(dashboard) = view else {
            panic!("expected trainer view");
        };
        assert!(dashboard.approved);
        assert_eq!(dashboard.roster.len(), 3);
        assert_eq!(dashboard.roster[0].name, "Alice Brown");
        assert_eq!(dashboard.roster[0].body_type, "Ectomorph");
        assert_eq!(dashboard.sessions_planned, 18);
        assert_eq!(dashboard.compliance_rate_percent, 87);
        assert_eq!(dashboard.compliance.workout_compliance_percent, 85);

        let pending = session_for(UserRole::Trainer, false);
        let view = router(&store).route(&pending).await.unwrap();
        let DashboardView::Trainer(dashboard) = view else {
            panic!("expected trainer view");
        };
        assert!(!dashboard.approved);
        assert!(dashboard.roster.is_empty());
    }

    #[tokio::test]
    async fn test_admin_view_collects_pending_work() {
        let store = memory_store();
        let accounts = AccountRepository::new(Arc::clone(&store));

        let admin = User::new(
            "admin@example.com".to_owned(),
            "$2b$12$hash".to_owned(),
            "Admin User".to_owned(),
            UserRole::Admin,
        );
        let pending_trainer = User::new(
            "new-trainer@example.com".to_owned(),
            "$2b$12$hash".to_owned(),
            "New Trainer".to_owned(),
            UserRole::Trainer,
        );
        let client = User::new(
            "client@example.com".to_owned(),
            "$2b$12$hash".to_owned(),
            "Jane Client".to_owned(),
            UserRole::Client,
        );
        accounts.insert(admin.clone()).await.unwrap();
        accounts.insert(pending_trainer.clone()).await.unwrap();
        accounts.insert(client.clone()).await.unwrap();

        let record = SubscriptionRecord::pending(
            catalog::find_plan("basic").unwrap(),
            catalog::find_trainer("john-smith").unwrap(),
            29,
        );
        SubscriptionRepository::new(Arc::clone(&store))
            .put(client.id, &record)
            .await
            .unwrap();
        NotificationQueue::new(Arc::clone(&store))
            .append(AdminNotification::new_subscription(
                &Session::for_user(&client),
                &record,
            ))
            .await
            .unwrap();

        let session = Session::for_user(&admin);
        let view = router(&store).route(&session).await.unwrap();
        let DashboardView::Admin(dashboard) = view else {
            panic!("expected admin view");
        };
        assert_eq!(dashboard.pending_subscriptions.len(), 1);
        assert_eq!(dashboard.pending_subscriptions[0].plan_name, "Basic");
        assert_eq!(dashboard.pending_trainers.len(), 1);
        assert_eq!(dashboard.pending_trainers[0].email, "new-trainer@example.com");
        assert_eq!(
            dashboard.role_counts,
            RoleCounts {
                admins: 1,
                trainers: 1,
                clients: 1,
            }
        );
        assert_eq!(dashboard.client_overview.len(), 3);
    }

    #[tokio::test]
    async fn test_rejected_subscription_summary() {
        let plan = catalog::find_plan("elite").unwrap();
        let trainer = catalog::find_trainer("mike-wilson").unwrap();
        let mut record = SubscriptionRecord::pending(plan, trainer, 104);
        record.verification_status = VerificationStatus::Rejected;

        let summary = summarize_subscription(&record);
        let SubscriptionSummary::Rejected(choice) = summary else {
            panic!("expected rejected summary");
        };
        assert_eq!(choice.plan_name, "Elite");
        assert_eq!(choice.total_amount, 104);
    }

    #[test]
    fn test_workout_plan_toggle_feeds_dashboard_counts() {
        let mut plan = WorkoutPlan::weekly_template();
        plan.toggle("9").unwrap();
        plan.toggle("10").unwrap();
        assert_eq!(plan.summary().by_day[2].completed, 2);
    }
}
