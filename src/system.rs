//! Support system registry
//!
//! `SupportSystem` owns the collections of agents, tickets and customers and
//! exposes every operation that mutates them. The heart of the module is
//! [`SupportSystem::assign_ticket`]: a load-balancing heuristic that only
//! considers agents with spare capacity, prefers agents whose specialization
//! matches the ticket's priority, and falls back to any available agent when
//! no specialist has room. Specialization is a soft preference, not a hard
//! filter: availability beats skill match.
//!
//! Everything is synchronous and in-memory. Nothing is ever removed from the
//! collections, so index- and id-based references stay valid for the life of
//! the registry.
//!
//! # Examples
//!
//! ```rust
//! use helpdesk::agent::Agent;
//! use helpdesk::system::SupportSystem;
//! use helpdesk::ticket::Priority;
//!
//! let mut system = SupportSystem::new();
//! system.add_agent(
//!     Agent::builder()
//!         .name("Joan")
//!         .email("joan@example.com")
//!         .specialization("high")
//!         .build()
//!         .unwrap(),
//! );
//!
//! let ticket_id = system
//!     .create_ticket("Login broken", "500 on login", Priority::High)
//!     .id;
//! let assigned = system.assign_ticket(ticket_id).unwrap();
//! assert_eq!(assigned.name, "Joan");
//! ```

use std::collections::VecDeque;

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::agent::Agent;
use crate::customer::Customer;
use crate::message::Message;
use crate::ticket::{Priority, Status, Ticket};
use crate::triage::{AutoResponder, MessageAnalyzer, ResponseKind};
use crate::{Error, Result};

/// Global message history keeps at most this many entries
const HISTORY_LIMIT: usize = 1000;

/// In-memory registry of agents, tickets and customers
#[derive(Debug, Default)]
pub struct SupportSystem {
    agents: Vec<Agent>,
    tickets: Vec<Ticket>,
    customers: Vec<Customer>,
    history: VecDeque<Message>,
    analyzer: MessageAnalyzer,
    responder: AutoResponder,
}

/// Aggregated statistics over the registry's tickets and agents
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PerformanceReport {
    pub total_tickets: usize,
    pub resolved_tickets: usize,
    /// Percentage of tickets currently in `Resolved` status
    pub resolution_rate: f64,
    pub avg_resolution_seconds: f64,
    pub avg_satisfaction: f64,
    /// Up to three agents, by tickets resolved, descending
    pub top_agents: Vec<AgentSummary>,
}

/// Per-agent line in a performance report
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AgentSummary {
    pub name: String,
    pub tickets_resolved: u32,
}

impl SupportSystem {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an agent
    ///
    /// Appends in insertion order; no uniqueness check is performed.
    pub fn add_agent(&mut self, agent: Agent) {
        debug!(agent = %agent.name, agent_id = %agent.id, "agent registered");
        self.agents.push(agent);
    }

    /// Register a customer and return it
    pub fn register_customer<S1, S2>(&mut self, name: S1, email: S2) -> &Customer
    where
        S1: Into<String>,
        S2: Into<String>,
    {
        let customer = Customer::new(name, email);
        debug!(customer = %customer.name, customer_id = %customer.id, "customer registered");
        self.customers.push(customer);
        &self.customers[self.customers.len() - 1]
    }

    /// Create an open, unassigned ticket and return it
    ///
    /// The ticket gets a fresh id, `Open` status and both timestamps set to
    /// now. No assignment is attempted; call [`Self::assign_ticket`] for
    /// that, or use [`Self::open_ticket`] for the full customer intake flow.
    pub fn create_ticket<S1, S2>(
        &mut self,
        title: S1,
        description: S2,
        priority: Priority,
    ) -> &Ticket
    where
        S1: Into<String>,
        S2: Into<String>,
    {
        let mut ticket = Ticket::new(title.into(), description.into(), priority);
        ticket.add_message(Message::system(format!(
            "Ticket created with priority {priority}"
        )));
        debug!(ticket = %ticket.id, priority = %priority, "ticket created");
        self.tickets.push(ticket);
        &self.tickets[self.tickets.len() - 1]
    }

    /// Full intake flow for a customer-reported ticket
    ///
    /// Priority is extracted from the description by keyword triage, the
    /// ticket is recorded on the customer's open-ticket list, and an
    /// assignment is attempted immediately. A ticket that could not be
    /// assigned simply stays `Open`.
    pub fn open_ticket<S1, S2>(
        &mut self,
        customer_id: Uuid,
        title: S1,
        description: S2,
    ) -> Result<&Ticket>
    where
        S1: Into<String>,
        S2: Into<String>,
    {
        let customer_idx = self
            .customers
            .iter()
            .position(|c| c.id == customer_id)
            .ok_or_else(|| Error::not_found("Customer", customer_id.to_string()))?;

        let description = description.into();
        let priority = self.analyzer.extract_priority(&description);
        let mut ticket = Ticket::new(title.into(), description, priority);
        ticket.customer_id = Some(customer_id);
        ticket.add_message(Message::system(format!(
            "Ticket created with priority {priority}"
        )));

        let ticket_id = ticket.id;
        let ticket_idx = self.tickets.len();
        self.customers[customer_idx].record_ticket(ticket_id);
        self.tickets.push(ticket);
        info!(ticket = %ticket_id, customer = %customer_id, priority = %priority, "ticket opened");

        let _ = self.assign_ticket(ticket_id);
        Ok(&self.tickets[ticket_idx])
    }

    /// Assign a ticket to the best available agent
    ///
    /// The heuristic:
    /// 1. only agents that are available and below the workload cap are
    ///    eligible; if none is, the ticket is left untouched and `None` is
    ///    returned; the caller must handle that case;
    /// 2. among eligible agents, those whose specialization equals the
    ///    ticket's lowercase priority name are preferred;
    /// 3. the least-loaded agent of the preferred pool wins, ties going to
    ///    the earliest-registered one.
    ///
    /// An unknown ticket id also yields `None`.
    pub fn assign_ticket(&mut self, ticket_id: Uuid) -> Option<&Agent> {
        let ticket_idx = self.tickets.iter().position(|t| t.id == ticket_id)?;
        let key = self.tickets[ticket_idx].priority.key();

        let eligible: Vec<usize> = self
            .agents
            .iter()
            .enumerate()
            .filter(|(_, agent)| agent.has_capacity())
            .map(|(idx, _)| idx)
            .collect();
        if eligible.is_empty() {
            debug!(ticket = %ticket_id, "no agent with spare capacity");
            return None;
        }

        let specialized: Vec<usize> = eligible
            .iter()
            .copied()
            .filter(|&idx| self.agents[idx].is_specialized_in(key))
            .collect();

        let pool = if specialized.is_empty() {
            &eligible
        } else {
            &specialized
        };
        // min_by_key keeps the first minimum, so ties go to the
        // earliest-registered agent.
        let chosen = *pool.iter().min_by_key(|&&idx| self.agents[idx].workload)?;

        self.agents[chosen].workload += 1;
        let agent_id = self.agents[chosen].id;
        let agent_name = self.agents[chosen].name.clone();

        let ticket = &mut self.tickets[ticket_idx];
        ticket.assigned_agent_id = Some(agent_id);
        ticket.status = Status::Assigned;
        if ticket.first_response_at.is_none() {
            ticket.first_response_at = Some(Utc::now());
        }
        ticket.add_message(Message::system(format!("Ticket assigned to {agent_name}")));

        info!(ticket = %ticket_id, agent = %agent_name, "ticket assigned");
        Some(&self.agents[chosen])
    }

    /// Set a ticket's status, returning `false` for an unknown id
    ///
    /// The status is set unconditionally; there is no transition graph.
    /// Entering `Resolved` with an assignee decrements that agent's workload
    /// and bumps its resolved counter. `Closed` touches no agent state.
    pub fn update_ticket_status(&mut self, ticket_id: Uuid, new_status: Status) -> bool {
        let Some(ticket_idx) = self.tickets.iter().position(|t| t.id == ticket_id) else {
            return false;
        };

        let ticket = &mut self.tickets[ticket_idx];
        ticket.status = new_status;
        ticket.touch();
        let assigned = ticket.assigned_agent_id;

        if new_status == Status::Resolved {
            if let Some(agent_id) = assigned {
                self.tickets[ticket_idx].resolved_at = Some(Utc::now());
                if let Some(agent) = self.agents.iter_mut().find(|a| a.id == agent_id) {
                    // No floor on the counter: resolving a ticket twice
                    // decrements twice.
                    agent.workload -= 1;
                    agent.tickets_resolved += 1;
                    info!(ticket = %ticket_id, agent = %agent.name, "ticket resolved");
                }
            }
        }

        debug!(ticket = %ticket_id, status = %new_status, "ticket status updated");
        true
    }

    /// Record an incoming message on a ticket and react to its content
    ///
    /// The sender must be the ticket's customer or its assigned agent. The
    /// message lands on the ticket's log and the bounded global history.
    /// Returned strings are the system's automatic reactions: a canned
    /// acknowledgement when a problem is flagged, a note when urgency
    /// keywords escalate the priority, and a warning when the time since the
    /// previous update exceeds the priority's SLA window.
    pub fn process_message<S: Into<String>>(
        &mut self,
        ticket_id: Uuid,
        sender_id: Uuid,
        content: S,
    ) -> Result<Vec<String>> {
        let content = content.into();
        let ticket_idx = self
            .tickets
            .iter()
            .position(|t| t.id == ticket_id)
            .ok_or_else(|| Error::not_found("Ticket", ticket_id.to_string()))?;

        let ticket = &self.tickets[ticket_idx];
        let sender_name = if ticket.customer_id == Some(sender_id) {
            self.customers
                .iter()
                .find(|c| c.id == sender_id)
                .map(|c| c.name.clone())
        } else if ticket.assigned_agent_id == Some(sender_id) {
            self.agents
                .iter()
                .find(|a| a.id == sender_id)
                .map(|a| a.name.clone())
        } else {
            None
        };
        let sender_name = sender_name.ok_or_else(|| {
            Error::permission_denied("process_message", "sender is not a participant on this ticket")
        })?;

        // Measured before the append below refreshes `updated_at`.
        let idle = Utc::now().signed_duration_since(self.tickets[ticket_idx].updated_at);

        let message = Message::new(sender_id, sender_name, content.clone());
        self.push_history(message.clone());
        self.tickets[ticket_idx].add_message(message);

        let flags = self.analyzer.classify(&content);
        let mut responses = Vec::new();

        if flags.problem {
            responses.push(self.responder.reply(ResponseKind::Wait).to_string());
        }
        if flags.urgency {
            let new_priority = self.analyzer.extract_priority(&content);
            let ticket = &mut self.tickets[ticket_idx];
            if new_priority != ticket.priority {
                ticket.priority = new_priority;
                ticket.touch();
                warn!(ticket = %ticket_id, priority = %new_priority, "ticket priority escalated");
                responses.push(format!("Ticket priority updated to {new_priority}"));
            }
        }
        if idle > self.tickets[ticket_idx].priority.sla() {
            responses.push("Warning: this ticket is about to breach its SLA".to_string());
        }

        Ok(responses)
    }

    /// Record a customer satisfaction score (1 to 5) for a ticket
    pub fn rate_satisfaction(
        &mut self,
        ticket_id: Uuid,
        score: u8,
        comment: Option<&str>,
    ) -> Result<()> {
        if !(1..=5).contains(&score) {
            return Err(Error::validation(
                "Satisfaction score must be between 1 and 5",
            ));
        }
        let ticket = self
            .tickets
            .iter_mut()
            .find(|t| t.id == ticket_id)
            .ok_or_else(|| Error::not_found("Ticket", ticket_id.to_string()))?;

        ticket.satisfaction = Some(score);
        let note = match comment {
            Some(comment) => format!("Customer rating: {score}/5 - {comment}"),
            None => format!("Customer rating: {score}/5"),
        };
        ticket.add_message(Message::system(note));
        Ok(())
    }

    /// Aggregate statistics over all tickets and agents
    pub fn performance_report(&self) -> PerformanceReport {
        let total_tickets = self.tickets.len();
        let resolved_tickets = self
            .tickets
            .iter()
            .filter(|t| t.status == Status::Resolved)
            .count();

        let resolution_seconds: i64 = self
            .tickets
            .iter()
            .filter_map(Ticket::time_to_resolution_seconds)
            .sum();
        let avg_resolution_seconds = if resolved_tickets > 0 {
            resolution_seconds as f64 / resolved_tickets as f64
        } else {
            0.0
        };

        let ratings: Vec<u8> = self.tickets.iter().filter_map(|t| t.satisfaction).collect();
        let avg_satisfaction = if ratings.is_empty() {
            0.0
        } else {
            ratings.iter().map(|&r| f64::from(r)).sum::<f64>() / ratings.len() as f64
        };

        let resolution_rate = if total_tickets > 0 {
            resolved_tickets as f64 / total_tickets as f64 * 100.0
        } else {
            0.0
        };

        let mut by_resolved: Vec<&Agent> = self.agents.iter().collect();
        by_resolved.sort_by(|a, b| b.tickets_resolved.cmp(&a.tickets_resolved));
        let top_agents = by_resolved
            .into_iter()
            .take(3)
            .map(|agent| AgentSummary {
                name: agent.name.clone(),
                tickets_resolved: agent.tickets_resolved,
            })
            .collect();

        PerformanceReport {
            total_tickets,
            resolved_tickets,
            resolution_rate,
            avg_resolution_seconds,
            avg_satisfaction,
            top_agents,
        }
    }

    /// Look up an agent by id
    pub fn agent(&self, id: Uuid) -> Option<&Agent> {
        self.agents.iter().find(|a| a.id == id)
    }

    /// Look up a ticket by id
    pub fn ticket(&self, id: Uuid) -> Option<&Ticket> {
        self.tickets.iter().find(|t| t.id == id)
    }

    /// Look up a customer by id
    pub fn customer(&self, id: Uuid) -> Option<&Customer> {
        self.customers.iter().find(|c| c.id == id)
    }

    /// All agents, in registration order
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    /// All tickets, in creation order
    pub fn tickets(&self) -> &[Ticket] {
        &self.tickets
    }

    /// All customers, in registration order
    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    /// Global message history, oldest first
    pub fn history(&self) -> &VecDeque<Message> {
        &self.history
    }

    fn push_history(&mut self, message: Message) {
        if self.history.len() == HISTORY_LIMIT {
            self.history.pop_front();
        }
        self.history.push_back(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::MAX_WORKLOAD;

    fn agent(name: &str, specialization: Option<&str>) -> Agent {
        let mut builder = Agent::builder().name(name).email(format!("{name}@example.com"));
        if let Some(specialization) = specialization {
            builder = builder.specialization(specialization);
        }
        builder.build().unwrap()
    }

    fn system_with(agents: Vec<Agent>) -> SupportSystem {
        let mut system = SupportSystem::new();
        for agent in agents {
            system.add_agent(agent);
        }
        system
    }

    #[test]
    fn test_create_ticket_defaults_and_order() {
        let mut system = SupportSystem::new();
        let first = system
            .create_ticket("First", "first description", Priority::Low)
            .id;
        let second = system
            .create_ticket("Second", "second description", Priority::High)
            .id;

        assert_ne!(first, second);
        assert_eq!(system.tickets().len(), 2);
        assert_eq!(system.tickets()[0].id, first);
        assert_eq!(system.tickets()[1].id, second);

        let ticket = system.ticket(first).unwrap();
        assert_eq!(ticket.status, Status::Open);
        assert!(ticket.assigned_agent_id.is_none());
        // creation is logged on the ticket itself
        assert!(ticket.messages.iter().any(|m| m.is_system));
    }

    #[test]
    fn test_create_ticket_never_auto_assigns() {
        let mut system = system_with(vec![agent("Ana", Some("low"))]);
        let ticket_id = system.create_ticket("T", "desc", Priority::Low).id;

        assert_eq!(system.ticket(ticket_id).unwrap().status, Status::Open);
        assert_eq!(system.agents()[0].workload, 0);
    }

    #[test]
    fn test_assign_prefers_matching_specialist() {
        let mut system = system_with(vec![
            agent("Ana", Some("high")),
            agent("Bruno", Some("medium")),
        ]);
        let ticket_id = system.create_ticket("T", "desc", Priority::High).id;

        let selected = system.assign_ticket(ticket_id).unwrap();
        assert_eq!(selected.name, "Ana");
        assert_eq!(system.agents()[0].workload, 1);
        assert_eq!(system.agents()[1].workload, 0);

        let ticket = system.ticket(ticket_id).unwrap();
        assert_eq!(ticket.status, Status::Assigned);
        assert_eq!(ticket.assigned_agent_id, Some(system.agents()[0].id));
        assert!(ticket.first_response_at.is_some());
        assert!(ticket.first_response_seconds().unwrap() >= 0);
    }

    #[test]
    fn test_assign_picks_min_workload_within_specialists() {
        let mut system = system_with(vec![
            agent("Busy", Some("high")),
            agent("Calm", Some("high")),
            agent("Idle", None),
        ]);
        system.agents[0].workload = 2;
        system.agents[1].workload = 1;
        // Idle has the lowest workload overall but is outside the
        // specialist subset, so it must not be chosen.
        let ticket_id = system.create_ticket("T", "desc", Priority::High).id;

        let selected = system.assign_ticket(ticket_id).unwrap();
        assert_eq!(selected.name, "Calm");
    }

    #[test]
    fn test_assign_falls_back_when_no_specialist_matches() {
        let mut system = system_with(vec![
            agent("Ana", Some("low")),
            agent("Bruno", None),
        ]);
        system.agents[0].workload = 3;
        system.agents[1].workload = 1;
        let ticket_id = system.create_ticket("T", "desc", Priority::Critical).id;

        let selected = system.assign_ticket(ticket_id).unwrap();
        assert_eq!(selected.name, "Bruno");
    }

    #[test]
    fn test_assign_tie_goes_to_first_registered() {
        let mut system = system_with(vec![agent("First", None), agent("Second", None)]);
        let ticket_id = system.create_ticket("T", "desc", Priority::Medium).id;

        let selected = system.assign_ticket(ticket_id).unwrap();
        assert_eq!(selected.name, "First");
    }

    #[test]
    fn test_assign_skips_agents_at_capacity() {
        let mut system = system_with(vec![
            agent("Full", Some("high")),
            agent("Loaded", None),
        ]);
        system.agents[0].workload = MAX_WORKLOAD;
        system.agents[1].workload = MAX_WORKLOAD - 1;
        let ticket_id = system.create_ticket("T", "desc", Priority::High).id;

        // The specialist is at the cap, so the generalist wins.
        let selected = system.assign_ticket(ticket_id).unwrap();
        assert_eq!(selected.name, "Loaded");
    }

    #[test]
    fn test_assign_skips_unavailable_agents() {
        let mut system = system_with(vec![agent("Away", Some("high")), agent("Here", None)]);
        system.agents[0].set_available(false);
        let ticket_id = system.create_ticket("T", "desc", Priority::High).id;

        let selected = system.assign_ticket(ticket_id).unwrap();
        assert_eq!(selected.name, "Here");
    }

    #[test]
    fn test_assign_returns_none_when_saturated() {
        let mut system = system_with(vec![agent("Solo", None)]);

        for n in 0..MAX_WORKLOAD {
            let ticket_id = system.create_ticket(format!("T{n}"), "desc", Priority::Low).id;
            assert!(system.assign_ticket(ticket_id).is_some());
        }
        assert_eq!(system.agents()[0].workload, MAX_WORKLOAD);

        let ticket_id = system.create_ticket("Overflow", "desc", Priority::Low).id;
        assert!(system.assign_ticket(ticket_id).is_none());

        // Failed assignment leaves the ticket untouched.
        let ticket = system.ticket(ticket_id).unwrap();
        assert_eq!(ticket.status, Status::Open);
        assert!(ticket.assigned_agent_id.is_none());
    }

    #[test]
    fn test_assign_with_no_agents_returns_none() {
        let mut system = SupportSystem::new();
        let ticket_id = system.create_ticket("T", "desc", Priority::Low).id;
        assert!(system.assign_ticket(ticket_id).is_none());
    }

    #[test]
    fn test_assign_unknown_ticket_returns_none() {
        let mut system = system_with(vec![agent("Ana", None)]);
        assert!(system.assign_ticket(Uuid::new_v4()).is_none());
        assert_eq!(system.agents()[0].workload, 0);
    }

    #[test]
    fn test_resolve_decrements_workload() {
        let mut system = system_with(vec![agent("Ana", None)]);
        let ticket_id = system.create_ticket("T", "desc", Priority::Low).id;
        system.assign_ticket(ticket_id).unwrap();
        assert_eq!(system.agents()[0].workload, 1);

        assert!(system.update_ticket_status(ticket_id, Status::Resolved));
        assert_eq!(system.agents()[0].workload, 0);
        assert_eq!(system.agents()[0].tickets_resolved, 1);

        let ticket = system.ticket(ticket_id).unwrap();
        assert_eq!(ticket.status, Status::Resolved);
        assert!(ticket.resolved_at.is_some());
    }

    #[test]
    fn test_double_resolve_decrements_twice() {
        // Suspicious but intentional: repeated resolution is not guarded,
        // so the workload counter goes negative.
        let mut system = system_with(vec![agent("Ana", None)]);
        let ticket_id = system.create_ticket("T", "desc", Priority::Low).id;
        system.assign_ticket(ticket_id).unwrap();

        assert!(system.update_ticket_status(ticket_id, Status::Resolved));
        assert!(system.update_ticket_status(ticket_id, Status::Resolved));
        assert_eq!(system.agents()[0].workload, -1);
        assert_eq!(system.agents()[0].tickets_resolved, 2);
    }

    #[test]
    fn test_close_leaves_workload_alone() {
        // Suspicious but intentional: closing skips the decrement that
        // resolving performs.
        let mut system = system_with(vec![agent("Ana", None)]);
        let ticket_id = system.create_ticket("T", "desc", Priority::Low).id;
        system.assign_ticket(ticket_id).unwrap();

        assert!(system.update_ticket_status(ticket_id, Status::Closed));
        assert_eq!(system.agents()[0].workload, 1);
        assert_eq!(system.agents()[0].tickets_resolved, 0);
        assert_eq!(system.ticket(ticket_id).unwrap().status, Status::Closed);
    }

    #[test]
    fn test_any_status_may_follow_any_other() {
        let mut system = SupportSystem::new();
        let ticket_id = system.create_ticket("T", "desc", Priority::Low).id;

        assert!(system.update_ticket_status(ticket_id, Status::Closed));
        assert!(system.update_ticket_status(ticket_id, Status::Open));
        assert!(system.update_ticket_status(ticket_id, Status::InProgress));
        assert_eq!(system.ticket(ticket_id).unwrap().status, Status::InProgress);
    }

    #[test]
    fn test_update_status_unknown_ticket_returns_false() {
        let mut system = SupportSystem::new();
        assert!(!system.update_ticket_status(Uuid::new_v4(), Status::Resolved));
    }

    #[test]
    fn test_open_ticket_classifies_and_auto_assigns() {
        let mut system = system_with(vec![agent("Ana", Some("critical"))]);
        let customer_id = system.register_customer("Dana", "dana@example.com").id;

        let ticket = system
            .open_ticket(customer_id, "Outage", "urgent: the whole site is down")
            .unwrap();
        assert_eq!(ticket.priority, Priority::Critical);
        assert_eq!(ticket.status, Status::Assigned);
        assert_eq!(ticket.customer_id, Some(customer_id));
        assert!(ticket.assigned_agent_id.is_some());

        let ticket_id = ticket.id;
        assert!(system
            .customer(customer_id)
            .unwrap()
            .open_tickets
            .contains(&ticket_id));
        assert_eq!(system.agents()[0].workload, 1);
    }

    #[test]
    fn test_open_ticket_stays_open_without_agents() {
        let mut system = SupportSystem::new();
        let customer_id = system.register_customer("Dana", "dana@example.com").id;

        let ticket = system
            .open_ticket(customer_id, "Question", "where is the invoice page")
            .unwrap();
        assert_eq!(ticket.status, Status::Open);
        assert!(ticket.assigned_agent_id.is_none());
    }

    #[test]
    fn test_open_ticket_unknown_customer() {
        let mut system = SupportSystem::new();
        let err = system
            .open_ticket(Uuid::new_v4(), "T", "desc")
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_process_message_unknown_ticket() {
        let mut system = SupportSystem::new();
        let err = system
            .process_message(Uuid::new_v4(), Uuid::new_v4(), "hello")
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_process_message_rejects_outsiders() {
        let mut system = SupportSystem::new();
        let customer_id = system.register_customer("Dana", "dana@example.com").id;
        let ticket_id = system
            .open_ticket(customer_id, "T", "printer acting oddly")
            .unwrap()
            .id;

        let err = system
            .process_message(ticket_id, Uuid::new_v4(), "let me in")
            .unwrap_err();
        assert_eq!(err.category(), "permission_denied");
    }

    #[test]
    fn test_process_message_from_customer_escalates_priority() {
        let mut system = system_with(vec![agent("Ana", None)]);
        let customer_id = system.register_customer("Dana", "dana@example.com").id;
        let ticket_id = system
            .open_ticket(customer_id, "T", "printer acting oddly")
            .unwrap()
            .id;
        assert_eq!(system.ticket(ticket_id).unwrap().priority, Priority::Low);

        let responses = system
            .process_message(ticket_id, customer_id, "this is urgent, there is an error")
            .unwrap();

        // Problem flag yields a canned reply, urgency flag escalates.
        assert!(responses.iter().any(|r| r.contains("priority updated")));
        assert_eq!(responses.len(), 2);
        assert_eq!(
            system.ticket(ticket_id).unwrap().priority,
            Priority::Critical
        );
        assert_eq!(system.history().len(), 1);

        let ticket = system.ticket(ticket_id).unwrap();
        let last = ticket.messages.last().unwrap();
        assert_eq!(last.sender_name, "Dana");
        assert!(!last.is_system);
    }

    #[test]
    fn test_process_message_from_assigned_agent() {
        let mut system = system_with(vec![agent("Ana", None)]);
        let customer_id = system.register_customer("Dana", "dana@example.com").id;
        let ticket_id = system
            .open_ticket(customer_id, "T", "printer acting oddly")
            .unwrap()
            .id;
        let agent_id = system.ticket(ticket_id).unwrap().assigned_agent_id.unwrap();

        let responses = system
            .process_message(ticket_id, agent_id, "looking into it now")
            .unwrap();
        assert!(responses.is_empty());

        let last = system.ticket(ticket_id).unwrap().messages.last().unwrap();
        assert_eq!(last.sender_name, "Ana");
    }

    #[test]
    fn test_rate_satisfaction() {
        let mut system = SupportSystem::new();
        let ticket_id = system.create_ticket("T", "desc", Priority::Low).id;

        assert!(system.rate_satisfaction(ticket_id, 0, None).unwrap_err().is_validation());
        assert!(system.rate_satisfaction(ticket_id, 6, None).unwrap_err().is_validation());
        assert!(system
            .rate_satisfaction(Uuid::new_v4(), 4, None)
            .unwrap_err()
            .is_not_found());

        system
            .rate_satisfaction(ticket_id, 4, Some("quick and friendly"))
            .unwrap();
        let ticket = system.ticket(ticket_id).unwrap();
        assert_eq!(ticket.satisfaction, Some(4));
        assert!(ticket
            .messages
            .last()
            .unwrap()
            .content
            .contains("quick and friendly"));
    }

    #[test]
    fn test_performance_report_aggregates() {
        let mut system = system_with(vec![agent("Ana", None), agent("Bruno", None)]);
        let first = system.create_ticket("T1", "desc", Priority::Low).id;
        let _second = system.create_ticket("T2", "desc", Priority::Low).id;

        system.assign_ticket(first).unwrap();
        system.update_ticket_status(first, Status::Resolved);
        system.rate_satisfaction(first, 4, None).unwrap();

        let report = system.performance_report();
        assert_eq!(report.total_tickets, 2);
        assert_eq!(report.resolved_tickets, 1);
        assert!((report.resolution_rate - 50.0).abs() < f64::EPSILON);
        assert!((report.avg_satisfaction - 4.0).abs() < f64::EPSILON);
        assert!(report.avg_resolution_seconds >= 0.0);
        assert_eq!(report.top_agents.len(), 2);
        assert_eq!(report.top_agents[0].name, "Ana");
        assert_eq!(report.top_agents[0].tickets_resolved, 1);
    }

    #[test]
    fn test_empty_report_has_zero_rates() {
        let system = SupportSystem::new();
        let report = system.performance_report();
        assert_eq!(report.total_tickets, 0);
        assert_eq!(report.resolution_rate, 0.0);
        assert_eq!(report.avg_satisfaction, 0.0);
        assert!(report.top_agents.is_empty());
    }

    #[test]
    fn test_history_is_bounded() {
        let mut system = SupportSystem::new();
        let customer_id = system.register_customer("Dana", "dana@example.com").id;
        let ticket_id = system
            .open_ticket(customer_id, "T", "printer acting oddly")
            .unwrap()
            .id;

        for n in 0..(HISTORY_LIMIT + 5) {
            system
                .process_message(ticket_id, customer_id, format!("note {n}"))
                .unwrap();
        }
        assert_eq!(system.history().len(), HISTORY_LIMIT);
        // Oldest entries were evicted first.
        assert_eq!(system.history().front().unwrap().content, "note 5");
    }
}
