// Grove Chat Core — Message types
// These are the data structures that flow through the chat presentation
// layer. Field names serialize to the wire JSON the Grove backend emits
// (camelCase), so a transcript round-trips through serde unchanged.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ── Roles ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

// ── Agent types ────────────────────────────────────────────────────────

/// The persona behind an assistant message.
/// `product_manager` is displayed as "Root" (the discovery agent);
/// `product` is a legacy alias kept for backward compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentType {
    ProductManager,
    Product,
    Designer,
    Developer,
}

impl AgentType {
    /// Parse a free-form agent tag. Unknown tags yield `None` — callers
    /// treat those messages as plain assistant output.
    pub fn parse(tag: &str) -> Option<AgentType> {
        match tag {
            "product_manager" => Some(AgentType::ProductManager),
            "product" => Some(AgentType::Product),
            "designer" => Some(AgentType::Designer),
            "developer" => Some(AgentType::Developer),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AgentType::ProductManager => "product_manager",
            AgentType::Product => "product",
            AgentType::Designer => "designer",
            AgentType::Developer => "developer",
        }
    }

    /// Fold the legacy alias onto its canonical tag.
    pub fn canonical(&self) -> AgentType {
        match self {
            AgentType::Product => AgentType::ProductManager,
            other => *other,
        }
    }

    /// Root (the product manager persona) leads discovery and introduces
    /// the rest of the team; it has no self-introduction of its own.
    pub fn is_root(&self) -> bool {
        matches!(self.canonical(), AgentType::ProductManager)
    }

    pub fn profile(&self) -> &'static AgentProfile {
        match self.canonical() {
            AgentType::Designer => &DESIGNER_PROFILE,
            AgentType::Developer => &DEVELOPER_PROFILE,
            _ => &ROOT_PROFILE,
        }
    }
}

// ── Agent profiles ─────────────────────────────────────────────────────
// The intro strings below are product copy, not logic. The classifier's
// phrase sets reference the display names; wording changes belong here
// and in ClassifierConfig, never in control flow.

#[derive(Debug, Clone, Serialize)]
pub struct AgentProfile {
    pub display_name: &'static str,
    pub short_name: &'static str,
    pub color: &'static str,
    pub bg_color: &'static str,
    /// Root's line when introducing this agent to the user.
    pub team_intro: &'static str,
    /// The agent's own self-introduction message.
    pub self_intro: &'static str,
}

static ROOT_PROFILE: AgentProfile = AgentProfile {
    display_name: "Root",
    short_name: "Root",
    color: "#0D9488",
    bg_color: "#CCFBF1",
    team_intro: "",
    self_intro: "",
};

static DESIGNER_PROFILE: AgentProfile = AgentProfile {
    display_name: "Bloom",
    short_name: "Bloom",
    color: "#F97316",
    bg_color: "#FFF7ED",
    team_intro: "Meet Bloom, our designer - she'll craft the visual experience and user interface.",
    self_intro: "Hi! I'm excited to design your project. I'll focus on making it intuitive and beautiful.",
};

static DEVELOPER_PROFILE: AgentProfile = AgentProfile {
    display_name: "Harvest",
    short_name: "Harvest",
    color: "#10B981",
    bg_color: "#ECFDF5",
    team_intro: "And Harvest, our developer - he'll write the code and bring everything to life.",
    self_intro: "Hey! Ready to build this. I'll handle the technical implementation and make sure everything works smoothly.",
};

// ── Messages ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub project_id: String,
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    /// True while chunks are still arriving; content is mutated in place
    /// until the stream completes, then becomes immutable.
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_streaming: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_type: Option<AgentType>,
}

fn is_false(b: &bool) -> bool {
    !*b
}

impl Message {
    /// Create a user-authored message.
    pub fn user(project_id: impl Into<String>, content: impl Into<String>) -> Message {
        Message {
            id: Uuid::new_v4().to_string(),
            project_id: project_id.into(),
            role: Role::User,
            content: content.into(),
            timestamp: Utc::now(),
            is_streaming: false,
            agent_type: None,
        }
    }

    /// Create a completed assistant message.
    pub fn assistant(
        project_id: impl Into<String>,
        content: impl Into<String>,
        agent_type: Option<AgentType>,
    ) -> Message {
        Message {
            id: Uuid::new_v4().to_string(),
            project_id: project_id.into(),
            role: Role::Assistant,
            content: content.into(),
            timestamp: Utc::now(),
            is_streaming: false,
            agent_type,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_agent_tag_round_trip() {
        for tag in ["product_manager", "product", "designer", "developer"] {
            let agent = AgentType::parse(tag).expect("known tag should parse");
            assert_eq!(agent.as_str(), tag);
        }
        assert_eq!(AgentType::parse("marketing"), None);
    }

    #[test]
    fn test_legacy_product_alias() {
        let legacy = AgentType::Product;
        assert_eq!(legacy.canonical(), AgentType::ProductManager);
        assert!(legacy.is_root());
        assert_eq!(legacy.profile().display_name, "Root");
    }

    #[test]
    fn test_profiles() {
        assert_eq!(AgentType::Designer.profile().display_name, "Bloom");
        assert_eq!(AgentType::Developer.profile().display_name, "Harvest");
        // Root introduces others; it has no intro copy of its own
        assert!(AgentType::ProductManager.profile().self_intro.is_empty());
        assert!(!AgentType::Designer.profile().self_intro.is_empty());
    }

    #[test]
    fn test_message_wire_json() {
        let json = r#"{
            "id": "msg-1",
            "projectId": "project-1",
            "role": "assistant",
            "content": "Hello!",
            "timestamp": "2025-12-24T10:00:00Z",
            "isStreaming": true,
            "agentType": "designer"
        }"#;
        let msg: Message = serde_json::from_str(json).expect("wire JSON should deserialize");
        assert_eq!(msg.role, Role::Assistant);
        assert!(msg.is_streaming);
        assert_eq!(msg.agent_type, Some(AgentType::Designer));

        // Optional fields default when absent
        let json = r#"{
            "id": "msg-2",
            "projectId": "project-1",
            "role": "user",
            "content": "Hi",
            "timestamp": "2025-12-24T10:01:00Z"
        }"#;
        let msg: Message = serde_json::from_str(json).expect("minimal JSON should deserialize");
        assert!(!msg.is_streaming);
        assert_eq!(msg.agent_type, None);
    }

    #[test]
    fn test_constructors() {
        let user = Message::user("project-1", "Can you help me?");
        assert_eq!(user.role, Role::User);
        assert_eq!(user.agent_type, None);

        let reply = Message::assistant("project-1", "Of course!", Some(AgentType::Developer));
        assert_eq!(reply.role, Role::Assistant);
        assert!(!reply.is_streaming);
        assert_ne!(user.id, reply.id);
    }
}
