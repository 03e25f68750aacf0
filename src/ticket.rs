//! Ticket domain model and related types
//!
//! This module provides the ticket model together with the `Priority` and
//! `Status` enumerations. A ticket's priority doubles as the specialization
//! matching key during assignment: an agent whose specialization equals the
//! lowercase priority name is preferred. The coupling is a plain string
//! comparison, not a typed relationship.
//!
//! # Examples
//!
//! ```rust
//! use helpdesk::ticket::{Priority, Status, Ticket};
//!
//! let ticket = Ticket::new(
//!     "Cannot log in".to_string(),
//!     "Login fails with error 500".to_string(),
//!     Priority::High,
//! );
//!
//! assert_eq!(ticket.status, Status::Open);
//! assert_eq!(ticket.priority.key(), "high");
//! assert!(ticket.assigned_agent_id.is_none());
//! ```

use crate::message::Message;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Priority level of a ticket, ordered by severity
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

impl Priority {
    /// Lowercase name, used as the specialization matching key
    pub fn key(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Critical => "critical",
        }
    }

    /// Extract a priority from free text by keyword scan
    ///
    /// Keywords are checked most-severe first; text with no recognized
    /// keyword defaults to `Low`.
    pub fn from_keywords(text: &str) -> Self {
        const KEYWORDS: &[(&str, Priority)] = &[
            ("critical", Priority::Critical),
            ("urgent", Priority::Critical),
            ("emergency", Priority::Critical),
            ("high", Priority::High),
            ("important", Priority::High),
            ("medium", Priority::Medium),
            ("normal", Priority::Medium),
            ("low", Priority::Low),
            ("routine", Priority::Low),
        ];

        let text = text.to_lowercase();
        for (keyword, priority) in KEYWORDS {
            if text.contains(keyword) {
                return *priority;
            }
        }
        Priority::Low
    }

    /// Response-time window expected for this priority
    pub fn sla(&self) -> Duration {
        match self {
            Priority::Critical => Duration::hours(1),
            Priority::High => Duration::hours(4),
            Priority::Medium => Duration::hours(12),
            Priority::Low => Duration::hours(24),
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Low
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Lifecycle status of a ticket
///
/// There is no enforced transition graph; any status may be set from any
/// other. The only coupled side effect lives in the registry: entering
/// `Resolved` decrements the assigned agent's workload.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Status {
    Open,
    Assigned,
    InProgress,
    Resolved,
    Closed,
}

impl Status {
    /// Lowercase name for display and logging
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Open => "open",
            Status::Assigned => "assigned",
            Status::InProgress => "in_progress",
            Status::Resolved => "resolved",
            Status::Closed => "closed",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Represents a support ticket
///
/// `status`, `assigned_agent_id` and `updated_at` are mutated only through
/// the registry's operations. The assigned agent is referenced by id; agents
/// are never removed from the registry, so the reference never dangles.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Ticket {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub status: Status,
    pub customer_id: Option<Uuid>,
    pub assigned_agent_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
    pub first_response_at: Option<DateTime<Utc>>,
    pub satisfaction: Option<u8>,
    pub messages: Vec<Message>,
    pub tags: Vec<String>,
}

impl Ticket {
    /// Create a new open, unassigned ticket
    pub fn new(title: String, description: String, priority: Priority) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title,
            description,
            priority,
            status: Status::Open,
            customer_id: None,
            assigned_agent_id: None,
            created_at: now,
            updated_at: now,
            resolved_at: None,
            first_response_at: None,
            satisfaction: None,
            messages: Vec::new(),
            tags: Vec::new(),
        }
    }

    /// Append a message to the conversation log
    pub fn add_message(&mut self, message: Message) {
        self.messages.push(message);
        self.touch();
    }

    /// Refresh the last-updated timestamp
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Check if the ticket is currently assigned
    pub fn is_assigned(&self) -> bool {
        self.assigned_agent_id.is_some()
    }

    /// Check if the ticket is in a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self.status, Status::Resolved | Status::Closed)
    }

    /// Add a tag if not already present
    pub fn add_tag<S: Into<String>>(&mut self, tag: S) {
        let tag = tag.into();
        if !self.tags.contains(&tag) {
            self.tags.push(tag);
            self.touch();
        }
    }

    /// Check if the ticket has a specific tag
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Time from creation to resolution in seconds, if resolved
    pub fn time_to_resolution_seconds(&self) -> Option<i64> {
        self.resolved_at
            .map(|resolved| resolved.signed_duration_since(self.created_at).num_seconds())
    }

    /// Time from creation to first response in seconds, if responded
    pub fn first_response_seconds(&self) -> Option<i64> {
        self.first_response_at
            .map(|at| at.signed_duration_since(self.created_at).num_seconds())
    }

    /// Time elapsed since creation in seconds
    pub fn age_seconds(&self) -> i64 {
        Utc::now()
            .signed_duration_since(self.created_at)
            .num_seconds()
    }
}
