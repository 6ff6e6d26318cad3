// ABOUTME: Client-to-trainer chat with stored transcripts and canned replies
// ABOUTME: Seeds a trainer welcome message and rotates trainer responses deterministically
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Trainer chat
//!
//! Conversations are stored per user and trainer. The trainer side is
//! simulated: the first history access seeds a welcome message, and every
//! client message gets one reply picked from a fixed response list by
//! rotating over how many client messages came before. Replies land in the
//! same store write as the client message, with no artificial delay.

use crate::catalog;
use crate::constants::limits;
use crate::errors::{AppError, AppResult};
use crate::models::Session;
use crate::repositories::ChatStore;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use uuid::Uuid;

/// Which side of the conversation sent a message
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// The subscribed client
    Client,
    /// The (simulated) trainer
    Trainer,
}

impl Display for ChatRole {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Client => write!(f, "client"),
            Self::Trainer => write!(f, "trainer"),
        }
    }
}

/// One message in a user/trainer transcript
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    /// Unique message id
    pub id: Uuid,
    /// Sender identifier, a user id or a catalog trainer id
    pub sender_id: String,
    /// Sender display name
    pub sender_name: String,
    /// Which side sent the message
    pub sender_role: ChatRole,
    /// Message body
    pub content: String,
    /// When the message was sent
    pub sent_at: DateTime<Utc>,
    /// Whether the recipient has seen the message
    pub read: bool,
}

/// Trainer responses cycled through in order, one per client message
const TRAINER_REPLIES: [&str; 8] = [
    "Great question! Let me help you with that.",
    "That's a good observation. Here's what I recommend...",
    "I'm glad you're staying engaged with your fitness journey!",
    "Let's adjust your plan based on this feedback.",
    "You're making excellent progress! Keep it up!",
    "That's completely normal. Here's how we can address it...",
    "I'll create a customized plan for you based on this information.",
    "Remember to stay hydrated and get enough rest too!",
];

fn welcome_message(trainer_id: &str, trainer_name: &str, client_name: &str) -> ChatMessage {
    ChatMessage {
        id: Uuid::new_v4(),
        sender_id: trainer_id.to_owned(),
        sender_name: trainer_name.to_owned(),
        sender_role: ChatRole::Trainer,
        content: format!(
            "Hi {client_name}! Welcome to your personalized fitness journey. \
             I'm excited to work with you and help you achieve your goals. \
             Feel free to ask me anything about your workout plans, nutrition, \
             or any fitness-related questions!"
        ),
        sent_at: Utc::now(),
        read: false,
    }
}

/// Chat operations backed by the per-conversation transcript store
#[derive(Clone)]
pub struct ChatService {
    transcripts: ChatStore,
}

impl ChatService {
    #[must_use]
    pub const fn new(transcripts: ChatStore) -> Self {
        Self { transcripts }
    }

    /// Full transcript for one user/trainer conversation, oldest first
    ///
    /// An empty conversation is seeded with the trainer's welcome message
    /// before it is returned.
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown trainer id, or an error
    /// if the store access fails
    pub async fn history(&self, user: &Session, trainer_id: &str) -> AppResult<Vec<ChatMessage>> {
        let trainer = catalog::find_trainer(trainer_id)?;
        let mut messages = self.transcripts.history(user.user_id, trainer_id).await?;
        if messages.is_empty() {
            messages.push(welcome_message(
                trainer_id,
                &trainer.name,
                &user.display_name,
            ));
            self.transcripts
                .save(user.user_id, trainer_id, &messages)
                .await?;
        }
        Ok(messages)
    }

    /// Send a client message and receive the trainer's reply
    ///
    /// The trimmed client message and one canned trainer reply are appended
    /// to the transcript in a single store write. Returns the reply.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an empty or oversized message,
    /// `ResourceNotFound` for an unknown trainer id, or an error if the
    /// store access fails
    pub async fn send_message(
        &self,
        user: &Session,
        trainer_id: &str,
        content: &str,
    ) -> AppResult<ChatMessage> {
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Err(AppError::invalid_input("Message cannot be empty"));
        }
        if trimmed.chars().count() > limits::MAX_CHAT_MESSAGE_CHARS {
            return Err(AppError::invalid_input(format!(
                "Message exceeds {} characters",
                limits::MAX_CHAT_MESSAGE_CHARS
            )));
        }
        let trainer = catalog::find_trainer(trainer_id)?;
        let mut messages = self.history(user, trainer_id).await?;

        let prior_client_messages = messages
            .iter()
            .filter(|message| message.sender_role == ChatRole::Client)
            .count();
        messages.push(ChatMessage {
            id: Uuid::new_v4(),
            sender_id: user.user_id.to_string(),
            sender_name: user.display_name.clone(),
            sender_role: ChatRole::Client,
            content: trimmed.to_owned(),
            sent_at: Utc::now(),
            read: true,
        });
        let reply = ChatMessage {
            id: Uuid::new_v4(),
            sender_id: trainer_id.to_owned(),
            sender_name: trainer.name,
            sender_role: ChatRole::Trainer,
            content: TRAINER_REPLIES[prior_client_messages % TRAINER_REPLIES.len()].to_owned(),
            sent_at: Utc::now(),
            read: false,
        };
        messages.push(reply.clone());
        self.transcripts
            .save(user.user_id, trainer_id, &messages)
            .await?;
        Ok(reply)
    }

    /// Trainer messages the user has not seen yet
    ///
    /// # Errors
    ///
    /// Returns an error if the store access fails
    pub async fn unread_count(&self, user: &Session, trainer_id: &str) -> AppResult<usize> {
        Ok(self
            .history(user, trainer_id)
            .await?
            .iter()
            .filter(|message| message.sender_role == ChatRole::Trainer && !message.read)
            .count())
    }

    /// Mark every trainer message in the conversation as read
    ///
    /// # Errors
    ///
    /// Returns an error if the store access fails
    pub async fn mark_read(&self, user: &Session, trainer_id: &str) -> AppResult<()> {
        let mut messages = self.history(user, trainer_id).await?;
        for message in &mut messages {
            if message.sender_role == ChatRole::Trainer {
                message.read = true;
            }
        }
        self.transcripts
            .save(user.user_id, trainer_id, &messages)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;
    use crate::models::{User, UserRole};
    use crate::store::{MemoryStore, Store};
    use std::sync::Arc;

    fn memory_store() -> Arc<Store> {
        Arc::new(Store::Memory(MemoryStore::new()))
    }

    fn service(store: &Arc<Store>) -> ChatService {
        ChatService::new(ChatStore::new(Arc::clone(store)))
    }

    fn client_session() -> Session {
        let user = User::new(
            "jane@example.com".to_owned(),
            "$2b$12$hash".to_owned(),
            "Jane Client".to_owned(),
            UserRole::Client,
        );
        Session::for_user(&user)
    }

    #[tokio::test]
    async fn test_first_history_seeds_welcome() {
        let store = memory_store();
        let service = service(&store);
        let session = client_session();

        let history = service.history(&session, "sarah-johnson").await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].sender_role, ChatRole::Trainer);
        assert_eq!(history[0].sender_name, "Sarah Johnson");
        assert!(!history[0].read);
        assert!(history[0].content.starts_with("Hi Jane Client! Welcome"));

        // A second look must not seed another welcome
        let again = service.history(&session, "sarah-johnson").await.unwrap();
        assert_eq!(again.len(), 1);
        assert_eq!(again[0].id, history[0].id);
    }

    #[tokio::test]
    async fn test_send_appends_message_and_reply() {
        let store = memory_store();
        let service = service(&store);
        let session = client_session();

        let reply = service
            .send_message(&session, "john-smith", "  How many rest days?  ")
            .await
            .unwrap();
        assert_eq!(reply.sender_role, ChatRole::Trainer);
        assert_eq!(reply.content, "Great question! Let me help you with that.");

        let history = service.history(&session, "john-smith").await.unwrap();
        assert_eq!(history.len(), 3);
        assert_eq!(history[1].sender_role, ChatRole::Client);
        assert_eq!(history[1].content, "How many rest days?");
        assert!(history[1].read);
        assert_eq!(history[2], reply);
    }

    #[tokio::test]
    async fn test_replies_rotate_in_order() {
        let store = memory_store();
        let service = service(&store);
        let session = client_session();

        for expected in &TRAINER_REPLIES {
            let reply = service
                .send_message(&session, "emma-davis", "another question")
                .await
                .unwrap();
            assert_eq!(reply.content, *expected);
        }

        // Ninth message wraps back to the first response
        let reply = service
            .send_message(&session, "emma-davis", "one more")
            .await
            .unwrap();
        assert_eq!(reply.content, TRAINER_REPLIES[0]);
    }

    #[tokio::test]
    async fn test_rejects_empty_and_oversized_messages() {
        let store = memory_store();
        let service = service(&store);
        let session = client_session();

        let error = service
            .send_message(&session, "john-smith", "   ")
            .await
            .unwrap_err();
        assert_eq!(error.code, ErrorCode::InvalidInput);

        let oversized = "x".repeat(limits::MAX_CHAT_MESSAGE_CHARS + 1);
        let error = service
            .send_message(&session, "john-smith", &oversized)
            .await
            .unwrap_err();
        assert_eq!(error.code, ErrorCode::InvalidInput);

        // Neither attempt may leave anything beyond the welcome message
        let history = service.history(&session, "john-smith").await.unwrap();
        assert_eq!(history.len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_trainer_rejected() {
        let store = memory_store();
        let service = service(&store);
        let session = client_session();

        let error = service.history(&session, "nobody").await.unwrap_err();
        assert_eq!(error.code, ErrorCode::ResourceNotFound);

        let error = service
            .send_message(&session, "nobody", "hello")
            .await
            .unwrap_err();
        assert_eq!(error.code, ErrorCode::ResourceNotFound);
    }

    #[tokio::test]
    async fn test_conversations_are_isolated_per_trainer() {
        let store = memory_store();
        let service = service(&store);
        let session = client_session();

        service
            .send_message(&session, "john-smith", "hi John")
            .await
            .unwrap();

        let other = service.history(&session, "mike-wilson").await.unwrap();
        assert_eq!(other.len(), 1);
        assert_eq!(other[0].sender_name, "Mike Wilson");
    }

    #[tokio::test]
    async fn test_unread_tracking() {
        let store = memory_store();
        let service = service(&store);
        let session = client_session();

        service
            .send_message(&session, "john-smith", "first")
            .await
            .unwrap();
        service
            .send_message(&session, "john-smith", "second")
            .await
            .unwrap();

        // Welcome plus two replies are unread
        assert_eq!(
            service.unread_count(&session, "john-smith").await.unwrap(),
            3
        );

        service.mark_read(&session, "john-smith").await.unwrap();
        assert_eq!(
            service.unread_count(&session, "john-smith").await.unwrap(),
            0
        );
    }
}
