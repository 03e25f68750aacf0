//! Message domain model
//!
//! Conversation log entries attached to tickets. Messages are either
//! authored by a participant (the ticket's customer or its assigned agent)
//! or emitted by the system itself to record lifecycle events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single entry in a ticket's conversation log
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    pub id: Uuid,
    /// None for system-generated entries
    pub sender_id: Option<Uuid>,
    pub sender_name: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub is_system: bool,
}

impl Message {
    /// Create a message authored by a participant
    pub fn new<S1: Into<String>, S2: Into<String>>(
        sender_id: Uuid,
        sender_name: S1,
        content: S2,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            sender_id: Some(sender_id),
            sender_name: sender_name.into(),
            content: content.into(),
            created_at: Utc::now(),
            is_system: false,
        }
    }

    /// Create a system-generated message
    pub fn system<S: Into<String>>(content: S) -> Self {
        Self {
            id: Uuid::new_v4(),
            sender_id: None,
            sender_name: "System".to_string(),
            content: content.into(),
            created_at: Utc::now(),
            is_system: true,
        }
    }
}
