//! Message triage: keyword classification and canned auto-responses
//!
//! The analyzer flags incoming message text against fixed keyword sets so
//! the registry can react (escalate priority, acknowledge a problem). The
//! responder picks a canned reply at random from a small pool per category.

use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::ticket::Priority;

/// Classification flags produced for an incoming message
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageFlags {
    pub problem: bool,
    pub urgency: bool,
    pub help: bool,
}

/// Keyword-based message classifier
#[derive(Debug, Clone, Default)]
pub struct MessageAnalyzer;

impl MessageAnalyzer {
    const PROBLEM_WORDS: &'static [&'static str] =
        &["error", "bug", "failure", "problem", "not working", "broken"];
    const URGENCY_WORDS: &'static [&'static str] =
        &["urgent", "critical", "emergency", "immediately"];
    const HELP_WORDS: &'static [&'static str] = &["help", "support", "assist", "how do i"];

    /// Create a new analyzer
    pub fn new() -> Self {
        Self
    }

    /// Classify message text into boolean category flags
    pub fn classify(&self, text: &str) -> MessageFlags {
        let text = text.to_lowercase();
        let any = |words: &[&str]| words.iter().any(|w| text.contains(w));

        MessageFlags {
            problem: any(Self::PROBLEM_WORDS),
            urgency: any(Self::URGENCY_WORDS),
            help: any(Self::HELP_WORDS),
        }
    }

    /// Extract a priority from message text
    pub fn extract_priority(&self, text: &str) -> Priority {
        Priority::from_keywords(text)
    }
}

/// Category of canned auto-response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseKind {
    Greeting,
    Farewell,
    Wait,
}

/// Picks canned replies for common conversational moments
#[derive(Debug, Clone, Default)]
pub struct AutoResponder;

impl AutoResponder {
    const GREETINGS: &'static [&'static str] = &[
        "Hello! How can I help you today?",
        "Welcome to support! What can I do for you?",
        "Hi! I'm here to help. What's your question?",
    ];
    const FAREWELLS: &'static [&'static str] = &[
        "Thanks for reaching out! Have a great day!",
        "Happy to help! See you around!",
        "If there's anything else, we're here for you!",
    ];
    const WAITS: &'static [&'static str] = &[
        "Please hold on while I process your request.",
        "I'm looking into your question, one moment.",
        "Just a moment, I'm checking that for you.",
    ];

    /// Create a new responder
    pub fn new() -> Self {
        Self
    }

    /// Pick a canned reply for the given category
    pub fn reply(&self, kind: ResponseKind) -> &'static str {
        let pool = match kind {
            ResponseKind::Greeting => Self::GREETINGS,
            ResponseKind::Farewell => Self::FAREWELLS,
            ResponseKind::Wait => Self::WAITS,
        };
        // Pools are non-empty constants
        pool.choose(&mut rand::thread_rng()).copied().unwrap_or(pool[0])
    }
}
