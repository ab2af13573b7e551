//! Chat persona routing.
//!
//! The chat front-end hands every user message to one of a handful of static
//! personas, each with its own canned system prompt. Selection is a keyword
//! count: for each agent, count how many of its keywords occur as substrings
//! of the lower-cased message, and take the highest scorer. Ties resolve to
//! declaration order, and a zero score falls back to the general agent.
//!
//! This is deliberately crude. It runs on every keystroke-submitted message,
//! it must never fail, and the personas only differ in tone and tool hints.

mod prompts;

use serde::Serialize;

/// A static chat persona.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Agent {
    /// Stable identifier, also the key into the prompt table.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// One-line description shown in the persona picker.
    pub description: &'static str,
    /// Keywords matched as substrings of the lower-cased message.
    pub keywords: &'static [&'static str],
}

/// Identifier of the fallback agent.
pub const GENERAL_AGENT_ID: &str = "general";

/// All known agents, in tie-breaking priority order.
///
/// The general agent carries no keywords; it is only ever selected as the
/// zero-score fallback.
pub const AGENTS: &[Agent] = &[
    Agent {
        id: "trading",
        name: "Trading",
        description: "Trade journal, positions, and market questions",
        keywords: &[
            "trade", "trading", "position", "portfolio", "market", "ticker", "pnl", "stock",
            "entry", "exit",
        ],
    },
    Agent {
        id: "cad",
        name: "CAD",
        description: "Part modelling, features, and drawing operations",
        keywords: &[
            "cad",
            "solidworks",
            "inventor",
            "part",
            "assembly",
            "extrude",
            "revolve",
            "fillet",
            "feature",
            "model",
            "drawing",
        ],
    },
    Agent {
        id: "sketch",
        name: "Sketch",
        description: "2D sketch geometry and constraints",
        keywords: &[
            "sketch",
            "circle",
            "rectangle",
            "line",
            "arc",
            "spline",
            "constraint",
            "dimension",
        ],
    },
    Agent {
        id: "work",
        name: "Work",
        description: "Tasks, schedules, and project tracking",
        keywords: &[
            "task", "todo", "schedule", "meeting", "deadline", "project", "remind",
        ],
    },
    Agent {
        id: GENERAL_AGENT_ID,
        name: "General",
        description: "Everything else",
        keywords: &[],
    },
];

/// The outcome of routing a message.
#[derive(Debug, Clone, Serialize)]
pub struct RoutedAgent {
    /// The selected agent.
    pub agent: &'static Agent,
    /// Number of keyword hits for the selected agent (0 for the fallback).
    pub score: usize,
    /// The system prompt template for the selected agent.
    pub system_prompt: &'static str,
}

/// Routes a free-text message to an agent.
///
/// Pure function: identical input always yields identical output.
#[must_use]
pub fn route(message: &str) -> RoutedAgent {
    let lowered = message.to_lowercase();

    let mut best: Option<(&'static Agent, usize)> = None;
    for agent in AGENTS {
        let score = keyword_hits(agent, &lowered);
        // Strictly-greater keeps earlier agents on ties.
        if score > best.map_or(0, |(_, s)| s) {
            best = Some((agent, score));
        }
    }

    let (agent, score) = best.unwrap_or_else(|| (fallback_agent(), 0));

    RoutedAgent {
        agent,
        score,
        system_prompt: prompts::system_prompt(agent.id),
    }
}

/// Counts how many of the agent's keywords occur in the lower-cased message.
fn keyword_hits(agent: &Agent, lowered: &str) -> usize {
    agent
        .keywords
        .iter()
        .filter(|kw| lowered.contains(*kw))
        .count()
}

/// Returns the general fallback agent.
fn fallback_agent() -> &'static Agent {
    AGENTS
        .iter()
        .find(|a| a.id == GENERAL_AGENT_ID)
        .unwrap_or(&AGENTS[0])
}
