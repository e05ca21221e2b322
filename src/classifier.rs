// Grove Chat Core — Introduction Classifier
//
// Decides whether an assistant message is a persona introduction, and if
// so whether it is Root's combined team introduction or an individual
// persona's self-introduction.
//
// The same agent tag is reused for every later message from that persona,
// so the tag alone cannot identify an introduction — content-pattern
// matching is the discriminating signal. Rules are evaluated in priority
// order, first match wins:
//   1. team phrase + multiple persona mentions → team introduction
//   2. known persona tag + greeting + self-framing → individual introduction
//   3. anything else → not an introduction
//
// All phrase sets live in `ClassifierConfig` as data. They are product
// copy coupled to the current persona naming (Bloom, Harvest); wording
// changes go through the config, never through this control flow.

use log::debug;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use crate::metadata::strip_metadata;
use crate::types::{AgentType, Message, Role};

// ── Types ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    NotIntroduction,
    IndividualIntroduction(AgentType),
    TeamIntroduction,
}

/// Phrase sets the classifier matches against, lowercase.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Signature phrases of Root's team introduction.
    pub team_phrases: Vec<String>,
    /// Persona display names counted toward the team-mention threshold.
    pub persona_names: Vec<String>,
    /// Minimum distinct persona names a team introduction must mention.
    #[serde(default = "default_min_mentions")]
    pub min_persona_mentions: usize,
    /// Opening words of a self-introduction (matched at message start).
    pub greeting_phrases: Vec<String>,
    /// First-person framing phrases of a self-introduction.
    pub self_framing_phrases: Vec<String>,
}

fn default_min_mentions() -> usize {
    2
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        ClassifierConfig {
            team_phrases: vec![
                "introduce the team".into(),
                "meet the team".into(),
                "meet your team".into(),
            ],
            persona_names: vec!["bloom".into(), "harvest".into()],
            min_persona_mentions: default_min_mentions(),
            greeting_phrases: vec!["hi".into(), "hey".into(), "hello".into()],
            self_framing_phrases: vec![
                "i'm".into(),
                "i am".into(),
                "i'll".into(),
                "my job".into(),
                "my role".into(),
            ],
        }
    }
}

fn default_config() -> &'static ClassifierConfig {
    static CONFIG: OnceLock<ClassifierConfig> = OnceLock::new();
    CONFIG.get_or_init(ClassifierConfig::default)
}

// ── Classification ─────────────────────────────────────────────────────

/// Classify a message with the default (product copy) phrase sets.
pub fn classify(message: &Message) -> Classification {
    classify_with(default_config(), message)
}

/// Classify a message against explicit phrase sets.
/// Pure and infallible: anything that matches no rule is simply not an
/// introduction.
pub fn classify_with(config: &ClassifierConfig, message: &Message) -> Classification {
    // Only the assistant introduces personas; a user quoting the copy
    // must not classify.
    if message.role != Role::Assistant {
        return Classification::NotIntroduction;
    }

    // Heuristics run on what the user actually sees
    let content = strip_metadata(&message.content).display_text.to_lowercase();

    // Rule 1: team introduction — signature phrase plus enough distinct
    // persona mentions.
    if contains_any(&content, &config.team_phrases) {
        let mentions = config
            .persona_names
            .iter()
            .filter(|name| content.contains(name.as_str()))
            .count();
        if mentions >= config.min_persona_mentions {
            debug!("[classifier] Team introduction ({} persona mentions)", mentions);
            return Classification::TeamIntroduction;
        }
    }

    // Rule 2: individual introduction — known persona tag plus greeting
    // plus first-person framing. The tag, never the content, decides which
    // persona the introduction is attributed to.
    if let Some(agent) = message.agent_type {
        let opening = content.trim_start();
        let greets = config
            .greeting_phrases
            .iter()
            .any(|g| begins_with_word(opening, g));
        if greets && contains_any(&content, &config.self_framing_phrases) {
            debug!("[classifier] Individual introduction from {}", agent.as_str());
            return Classification::IndividualIntroduction(agent);
        }
    }

    Classification::NotIntroduction
}

pub fn is_introduction(message: &Message) -> bool {
    classify(message) != Classification::NotIntroduction
}

pub fn is_team_introduction(message: &Message) -> bool {
    classify(message) == Classification::TeamIntroduction
}

// ── Helpers ────────────────────────────────────────────────────────────

fn contains_any(s: &str, terms: &[String]) -> bool {
    terms.iter().any(|t| s.contains(t.as_str()))
}

/// True when `s` opens with `word` as a whole word ("hi!" yes, "high" no).
fn begins_with_word(s: &str, word: &str) -> bool {
    match s.strip_prefix(word) {
        Some(rest) => !rest.chars().next().is_some_and(|c| c.is_alphanumeric()),
        None => false,
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════
