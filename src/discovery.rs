// Grove Chat Core — Discovery types
// Typed view over the trailer payload the discovery agent embeds in its
// responses, plus the stage progression of the guided discovery flow.
// The stripper itself stays shape-agnostic; this is the opt-in decode.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::metadata::{METADATA_MARKER, METADATA_TERMINATOR};

// ── Stages ─────────────────────────────────────────────────────────────

/// Phase of the guided discovery conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscoveryStage {
    Welcome,
    Problem,
    Personas,
    Mvp,
    Summary,
    Complete,
}

impl DiscoveryStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiscoveryStage::Welcome => "welcome",
            DiscoveryStage::Problem => "problem",
            DiscoveryStage::Personas => "personas",
            DiscoveryStage::Mvp => "mvp",
            DiscoveryStage::Summary => "summary",
            DiscoveryStage::Complete => "complete",
        }
    }

    /// The stage that follows this one, or `None` once discovery is done.
    pub fn next_stage(&self) -> Option<DiscoveryStage> {
        match self {
            DiscoveryStage::Welcome => Some(DiscoveryStage::Problem),
            DiscoveryStage::Problem => Some(DiscoveryStage::Personas),
            DiscoveryStage::Personas => Some(DiscoveryStage::Mvp),
            DiscoveryStage::Mvp => Some(DiscoveryStage::Summary),
            DiscoveryStage::Summary => Some(DiscoveryStage::Complete),
            DiscoveryStage::Complete => None,
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, DiscoveryStage::Complete)
    }
}

// ── Trailer payload ────────────────────────────────────────────────────

/// Structured data extracted from an assistant response's trailer.
/// `extracted` fields vary by stage (business_context, problem_statement,
/// users, mvp_features, ...); only the commonly read string fields get
/// typed accessors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiscoveryMetadata {
    pub stage_complete: bool,
    #[serde(default)]
    pub extracted: serde_json::Map<String, serde_json::Value>,
}

impl DiscoveryMetadata {
    /// Decode a stripped trailer payload into the typed view.
    pub fn from_value(value: serde_json::Value) -> Result<DiscoveryMetadata, CoreError> {
        Ok(serde_json::from_value(value)?)
    }

    fn text_field(&self, key: &str) -> Option<&str> {
        self.extracted.get(key).and_then(|v| v.as_str()).filter(|s| !s.is_empty())
    }

    pub fn business_context(&self) -> Option<&str> {
        self.text_field("business_context")
    }

    pub fn problem_statement(&self) -> Option<&str> {
        self.text_field("problem_statement")
    }

    pub fn project_name(&self) -> Option<&str> {
        self.text_field("project_name")
    }

    pub fn solves_statement(&self) -> Option<&str> {
        self.text_field("solves_statement")
    }

    /// Append this payload to response text as a well-formed trailer.
    /// Mirrors how the backend composes assistant responses; used by
    /// fixtures and tests.
    pub fn encode_trailer(&self, text: &str) -> Result<String, CoreError> {
        let json = serde_json::to_string(self)?;
        Ok(format!(
            "{}\n\n{}{}{}",
            text, METADATA_MARKER, json, METADATA_TERMINATOR
        ))
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::strip_metadata;
    use serde_json::json;

    #[test]
    fn test_stage_progression() {
        let mut stage = DiscoveryStage::Welcome;
        let mut visited = vec![stage];
        while let Some(next) = stage.next_stage() {
            stage = next;
            visited.push(stage);
        }
        assert_eq!(visited.len(), 6, "six stages from welcome to complete");
        assert!(stage.is_complete());
        assert_eq!(stage.next_stage(), None);
    }

    #[test]
    fn test_stage_serde() {
        let stage: DiscoveryStage = serde_json::from_str("\"mvp\"").unwrap();
        assert_eq!(stage, DiscoveryStage::Mvp);
        assert_eq!(serde_json::to_string(&DiscoveryStage::Welcome).unwrap(), "\"welcome\"");
    }

    #[test]
    fn test_typed_decode() {
        let value = json!({
            "stage_complete": true,
            "extracted": { "business_context": "Runs a local bakery" }
        });
        let meta = DiscoveryMetadata::from_value(value).expect("well-formed payload decodes");
        assert!(meta.stage_complete);
        assert_eq!(meta.business_context(), Some("Runs a local bakery"));
        assert_eq!(meta.problem_statement(), None);
    }

    #[test]
    fn test_empty_fields_treated_as_absent() {
        let value = json!({
            "stage_complete": false,
            "extracted": { "project_name": "" }
        });
        let meta = DiscoveryMetadata::from_value(value).unwrap();
        assert_eq!(meta.project_name(), None);
    }

    #[test]
    fn test_missing_extracted_defaults() {
        let meta = DiscoveryMetadata::from_value(json!({ "stage_complete": false })).unwrap();
        assert!(meta.extracted.is_empty());
    }

    #[test]
    fn test_encode_then_strip() {
        let meta = DiscoveryMetadata {
            stage_complete: true,
            extracted: serde_json::Map::from_iter([(
                "business_context".to_string(),
                json!("bakery owner"),
            )]),
        };
        let raw = meta
            .encode_trailer("Great! What's your biggest challenge?")
            .expect("encoding a plain payload succeeds");

        let stripped = strip_metadata(&raw);
        assert_eq!(stripped.display_text, "Great! What's your biggest challenge?");
        let decoded = DiscoveryMetadata::from_value(stripped.metadata.unwrap()).unwrap();
        assert_eq!(decoded, meta);
    }
}
