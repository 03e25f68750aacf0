//! Agent domain model and related types
//!
//! This module provides the agent model for representing support agents
//! in the helpdesk system. Agents carry a bounded workload counter and an
//! optional specialization tag that the registry matches against ticket
//! priorities during assignment.
//!
//! # Examples
//!
//! Creating a new agent:
//!
//! ```rust
//! use helpdesk::agent::Agent;
//!
//! let agent = Agent::builder()
//!     .name("Joan")
//!     .email("joan@example.com")
//!     .specialization("High")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(agent.workload, 0);
//! assert_eq!(agent.specialization.as_deref(), Some("high"));
//! ```

use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum number of active tickets an agent may carry; agents at or above
/// this count are never eligible for assignment.
pub const MAX_WORKLOAD: i32 = 5;

/// Represents a support agent in the system
///
/// `workload` counts currently assigned, unresolved tickets. It is mutated
/// only by the registry's assignment and status-update operations, never by
/// callers directly. There is no lower bound on the counter (see the
/// registry's notes on repeated resolution).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Agent {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub workload: i32,
    pub specialization: Option<String>,
    pub available: bool,
    pub tickets_resolved: u32,
    pub created_at: DateTime<Utc>,
}

impl Agent {
    /// Create a new agent with an empty workload
    pub fn new(name: String, email: String, specialization: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            workload: 0,
            specialization: specialization.map(|s| s.to_lowercase()),
            available: true,
            tickets_resolved: 0,
            created_at: Utc::now(),
        }
    }

    /// Create a builder for constructing an Agent
    pub fn builder() -> AgentBuilder {
        AgentBuilder::new()
    }

    /// Check whether the agent can take another ticket
    pub fn has_capacity(&self) -> bool {
        self.available && self.workload < MAX_WORKLOAD
    }

    /// Check whether the agent's specialization matches a priority key
    pub fn is_specialized_in(&self, key: &str) -> bool {
        self.specialization.as_deref() == Some(key)
    }

    /// Set the agent's specialization tag (stored lowercased)
    pub fn set_specialization<S: Into<String>>(&mut self, specialization: S) {
        self.specialization = Some(specialization.into().to_lowercase());
    }

    /// Mark the agent available or unavailable for new assignments
    pub fn set_available(&mut self, available: bool) {
        self.available = available;
    }
}

/// Builder for constructing Agent instances
#[derive(Debug, Clone, Default)]
pub struct AgentBuilder {
    name: Option<String>,
    email: Option<String>,
    specialization: Option<String>,
}

impl AgentBuilder {
    /// Create a new agent builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the agent name
    pub fn name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the agent email
    pub fn email<S: Into<String>>(mut self, email: S) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Set the specialization tag; lowercased on build
    pub fn specialization<S: Into<String>>(mut self, specialization: S) -> Self {
        self.specialization = Some(specialization.into());
        self
    }

    /// Build the Agent instance
    pub fn build(self) -> Result<Agent> {
        let name = self
            .name
            .ok_or_else(|| Error::validation("Agent name is required"))?;
        let email = self
            .email
            .ok_or_else(|| Error::validation("Agent email is required"))?;

        Ok(Agent::new(name, email, self.specialization))
    }
}
