// ABOUTME: Authentication service handling registration, login, and session state
// ABOUTME: Role is bound to the stored account; login never takes a role claim
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Registration and login
//!
//! Credentials are bcrypt-hashed at the boundary. Clients become active on
//! registration, trainer accounts start pending and are unlocked by an admin.
//! A successful login persists a [`Session`] under the single session slot.

use crate::catalog;
use crate::constants::limits;
use crate::errors::{AppError, AppResult};
use crate::logging::AppLogger;
use crate::models::{AccountStatus, Session, User, UserRole};
use crate::repositories::{AccountRepository, SessionStore};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Registration request payload
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    /// Login email
    pub email: String,
    /// Plaintext password, hashed before storage
    pub password: String,
    /// Name shown across the app
    pub display_name: String,
    /// Requested role (admin registration is rejected)
    pub role: UserRole,
}

/// Registration outcome
#[derive(Debug, Clone, Serialize)]
pub struct RegisterResponse {
    /// Id of the created account
    pub user_id: Uuid,
    /// User-facing confirmation message
    pub message: String,
    /// Present when the new account was logged in immediately (clients only)
    pub session: Option<Session>,
}

/// Authentication service for registration and login business logic
#[derive(Clone)]
pub struct AuthService {
    accounts: AccountRepository,
    sessions: SessionStore,
}

impl AuthService {
    #[must_use]
    pub const fn new(accounts: AccountRepository, sessions: SessionStore) -> Self {
        Self { accounts, sessions }
    }

    /// Handle user registration
    ///
    /// Clients are activated and logged in immediately. Trainer accounts are
    /// stored pending and must be approved by an admin before they can log in.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails, the role is admin, the email is
    /// already registered, or the store operation fails
    pub async fn register(&self, request: RegisterRequest) -> AppResult<RegisterResponse> {
        let email = request.email.trim().to_owned();
        tracing::info!("User registration attempt for email: {}", email);

        if !Self::is_valid_email(&email) {
            return Err(AppError::invalid_input("Invalid email format"));
        }
        if !Self::is_valid_password(&request.password) {
            return Err(AppError::invalid_input(format!(
                "Password must be at least {} characters",
                limits::MIN_PASSWORD_LENGTH
            )));
        }
        if request.display_name.trim().is_empty() {
            return Err(AppError::invalid_input("Display name is required"));
        }
        if request.role == UserRole::Admin {
            return Err(AppError::permission_denied(
                "Admin accounts cannot be self-registered",
            ));
        }

        // Demo logins hold their emails even before the store is seeded
        let demo_taken = catalog::demo_account_specs()
            .iter()
            .any(|account| account.email.eq_ignore_ascii_case(&email));
        if demo_taken || self.accounts.find_by_email(&email).await?.is_some() {
            AppLogger::log_auth_event(&email, "register", false, Some("duplicate email"));
            return Err(AppError::already_exists("An account with this email"));
        }

        let password_hash = hash_password(&request.password)?;
        let mut user = User::new(
            email.clone(),
            password_hash,
            request.display_name.trim().to_owned(),
            request.role,
        );
        if request.role == UserRole::Client {
            user.status = AccountStatus::Active;
        }
        let user_id = user.id;

        self.accounts.insert(user.clone()).await?;
        AppLogger::log_auth_event(&email, "register", true, None);
        tracing::info!("User registered successfully: {} ({})", email, user_id);

        if request.role == UserRole::Client {
            let session = Session::for_user(&user);
            self.sessions.save(&session).await?;
            Ok(RegisterResponse {
                user_id,
                message: format!("Welcome to FitBridge, {}!", user.display_name),
                session: Some(session),
            })
        } else {
            Ok(RegisterResponse {
                user_id,
                message: "Your trainer account has been submitted for approval. \
                          You'll be notified once approved."
                    .to_owned(),
                session: None,
            })
        }
    }

    /// Handle user login
    ///
    /// The role comes from the stored account, never from the caller.
    ///
    /// # Errors
    ///
    /// Returns `AuthInvalid` for unknown emails or wrong passwords, and an
    /// account-state error when the account exists but cannot log in yet
    pub async fn login(&self, email: &str, password: &str) -> AppResult<Session> {
        let email = email.trim();
        tracing::info!("User login attempt for email: {}", email);

        let Some(mut user) = self.accounts.find_by_email(email).await? else {
            AppLogger::log_auth_event(email, "login", false, Some("unknown email"));
            return Err(AppError::auth_invalid(
                "Invalid credentials. Please check your email and password.",
            ));
        };

        // Verify password off the async executor; bcrypt is CPU-bound
        let candidate = password.to_owned();
        let password_hash = user.password_hash.clone();
        let is_valid =
            tokio::task::spawn_blocking(move || bcrypt::verify(&candidate, &password_hash))
                .await
                .map_err(|e| AppError::internal(format!("Password verification task failed: {e}")))?
                .map_err(|e| AppError::internal(format!("Password verification error: {e}")))?;

        if !is_valid {
            AppLogger::log_security_event("invalid_password", "login rejected", Some(email));
            return Err(AppError::auth_invalid(
                "Invalid credentials. Please check your email and password.",
            ));
        }

        if !user.status.can_login() {
            tracing::warn!(
                "Login blocked for user: {} - status: {:?}",
                email,
                user.status
            );
            AppLogger::log_auth_event(email, "login", false, Some("account not active"));
            let message = user.status.to_message();
            return Err(match user.status {
                AccountStatus::Suspended => AppError::account_suspended(message),
                AccountStatus::Pending | AccountStatus::Active => {
                    AppError::account_pending(message)
                }
            });
        }

        user.last_active = chrono::Utc::now();
        self.accounts.update(&user).await?;

        let session = Session::for_user(&user);
        self.sessions.save(&session).await?;

        AppLogger::log_auth_event(email, "login", true, None);
        tracing::info!("User logged in successfully: {} ({})", email, user.id);
        Ok(session)
    }

    /// Clear the session slot, returning whether someone was logged in
    ///
    /// # Errors
    ///
    /// Returns an error if the store operation fails
    pub async fn logout(&self) -> AppResult<bool> {
        let session = self.sessions.load().await?;
        let cleared = self.sessions.clear().await?;
        if let Some(session) = session {
            AppLogger::log_auth_event(&session.email, "logout", true, None);
        }
        Ok(cleared)
    }

    /// The currently logged-in session, if any
    ///
    /// # Errors
    ///
    /// Returns an error if the store read fails
    pub async fn current_session(&self) -> AppResult<Option<Session>> {
        self.sessions.load().await
    }

    /// Validate email format
    #[must_use]
    pub fn is_valid_email(email: &str) -> bool {
        if email.len() <= 5 {
            return false;
        }
        let Some(at_pos) = email.find('@') else {
            return false;
        };
        if at_pos == 0 || at_pos == email.len() - 1 {
            return false; // @ at start or end
        }
        let domain_part = &email[at_pos + 1..];
        domain_part.contains('.')
    }

    /// Validate password strength
    #[must_use]
    pub const fn is_valid_password(password: &str) -> bool {
        password.len() >= limits::MIN_PASSWORD_LENGTH
    }
}

/// Hash a password for storage
///
/// Cost 4 in debug builds keeps test suites fast; release builds stay on the
/// bcrypt default of 12.
///
/// # Errors
///
/// Returns an error if bcrypt hashing fails
pub fn hash_password(password: &str) -> AppResult<String> {
    let cost = if cfg!(debug_assertions) {
        4
    } else {
        bcrypt::DEFAULT_COST
    };
    bcrypt::hash(password, cost)
        .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))
}
