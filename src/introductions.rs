// Grove Chat Core — Persona introductions
//
// When discovery completes and the building phase begins, Root introduces
// the team, then each persona introduces itself. This module synthesizes
// those messages and computes where they belong in the transcript. The
// "has this been shown before" flag and the met-agent ledger are persisted
// by the caller (browser storage); here they are plain values.

use log::info;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::discovery::DiscoveryStage;
use crate::types::{AgentType, Message, Role};

/// Personas introduced when transitioning to the building phase.
pub const TEAM_PERSONAS: [AgentType; 2] = [AgentType::Designer, AgentType::Developer];

fn is_team_message(message: &Message) -> bool {
    message.role == Role::Assistant
        && message
            .agent_type
            .is_some_and(|a| TEAM_PERSONAS.contains(&a.canonical()))
}

// ── Message synthesis ──────────────────────────────────────────────────

/// Root's combined team introduction, assembled from the persona profiles.
pub fn team_intro_content() -> String {
    let mut content = String::from(
        "Great! Now that we understand your project, let me introduce the team who'll help build it.",
    );
    for persona in TEAM_PERSONAS {
        content.push_str("\n\n");
        content.push_str(persona.profile().team_intro);
    }
    content
}

/// The introduction sequence for a project: Root's team introduction
/// followed by each persona's self-introduction. Ids are deterministic so
/// re-renders never duplicate them.
pub fn introduction_messages(project_id: &str) -> Vec<Message> {
    let mut messages = Vec::with_capacity(1 + TEAM_PERSONAS.len());

    let mut team = Message::assistant(
        project_id,
        team_intro_content(),
        Some(AgentType::ProductManager),
    );
    team.id = format!("intro-root-team-{}", project_id);
    messages.push(team);

    for persona in TEAM_PERSONAS {
        let mut msg = Message::assistant(project_id, persona.profile().self_intro, Some(persona));
        msg.id = format!("intro-{}-{}", persona.as_str(), project_id);
        messages.push(msg);
    }

    messages
}

// ── Placement ──────────────────────────────────────────────────────────

/// Whether the introduction sequence should be shown now: discovery is
/// done, it hasn't been shown, and the building phase has produced its
/// first team message.
pub fn should_introduce(
    stage: DiscoveryStage,
    already_introduced: bool,
    messages: &[Message],
) -> bool {
    !already_introduced && stage.is_complete() && messages.iter().any(is_team_message)
}

/// Index of the first team-persona message — the introductions are
/// spliced in just before it.
pub fn insertion_index(messages: &[Message]) -> Option<usize> {
    messages.iter().position(is_team_message)
}

/// Splice the introduction sequence into a transcript. Without a team
/// message there is nothing to introduce and the input is returned as-is.
pub fn inject_introductions(messages: &[Message], project_id: &str) -> Vec<Message> {
    let Some(at) = insertion_index(messages) else {
        return messages.to_vec();
    };
    info!("[introductions] Injecting team introductions at index {}", at);

    let mut result = Vec::with_capacity(messages.len() + 1 + TEAM_PERSONAS.len());
    result.extend_from_slice(&messages[..at]);
    result.extend(introduction_messages(project_id));
    result.extend_from_slice(&messages[at..]);
    result
}

// ── Met-agent ledger ───────────────────────────────────────────────────

/// Which personas the user has already met, used for the "NEW" badge on a
/// persona's first appearance. Serializable so the caller can persist it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IntroductionLedger {
    met: HashSet<AgentType>,
}

impl IntroductionLedger {
    pub fn new() -> IntroductionLedger {
        IntroductionLedger::default()
    }

    pub fn has_met(&self, agent: AgentType) -> bool {
        self.met.contains(&agent.canonical())
    }

    /// Record a persona as met. Returns true on first meeting.
    pub fn mark_met(&mut self, agent: AgentType) -> bool {
        self.met.insert(agent.canonical())
    }

    pub fn reset(&mut self) {
        self.met.clear();
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════
