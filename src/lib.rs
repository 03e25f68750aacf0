//! Core domain models for the helpdesk ticket system
//!
//! This crate contains the entities and the in-memory registry used to
//! route support tickets to agents. Assignment balances load across
//! agents with spare capacity and prefers agents whose specialization
//! matches the ticket's priority.

pub mod agent;
pub mod customer;
pub mod error;
pub mod message;
pub mod system;
pub mod ticket;
pub mod triage;

pub use error::{Error, Result};
