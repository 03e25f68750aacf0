//! Customer domain model
//!
//! Customers open tickets and take part in their conversation threads. The
//! registry keeps a running list of the ticket ids each customer has opened.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents a customer in the system
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Customer {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub open_tickets: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl Customer {
    /// Create a new customer
    pub fn new<S1: Into<String>, S2: Into<String>>(name: S1, email: S2) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            email: email.into(),
            open_tickets: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Record a ticket opened by this customer
    pub fn record_ticket(&mut self, ticket_id: Uuid) {
        self.open_tickets.push(ticket_id);
    }
}
