// Grove Chat Core — Discovery Metadata Stripper
//
// The backend has no side channel during streaming, so structured discovery
// data rides as a tagged trailer at the end of the assistant's text:
//
//   Great, tell me more!<!--DISCOVERY_DATA:{"stage_complete":true,...}-->
//
// The trailer must never reach the user. This module is the only place in
// the system that knows about the raw marker; everything else consumes
// `StrippedContent`.
//
// Callers re-invoke `strip_metadata` on every streaming chunk: until the
// closing `-->` has arrived the payload simply isn't available yet, and a
// parse failure degrades to "no metadata" rather than an error.

use log::debug;

/// Marker literal that opens the trailer. The JSON payload follows it.
pub const METADATA_MARKER: &str = "<!--DISCOVERY_DATA:";

/// Terminator closing the trailer.
pub const METADATA_TERMINATOR: &str = "-->";

/// Result of splitting raw message content into its user-facing text and
/// the optional structured payload.
#[derive(Debug, Clone, PartialEq)]
pub struct StrippedContent {
    /// Content safe to display. Never contains the marker.
    pub display_text: String,
    /// Parsed trailer payload, or `None` if absent, incomplete, or malformed.
    pub metadata: Option<serde_json::Value>,
}

/// Split the discovery trailer off raw message content.
///
/// Rules:
/// - No marker → content returned unchanged, no metadata.
/// - Marker present → `display_text` is everything strictly before the
///   marker, with trailing whitespace trimmed. The trailer occupies the
///   tail of the string, so nothing after the marker is displayed.
/// - Payload between marker and terminator is parsed as JSON. A missing
///   terminator or malformed payload (both routine mid-stream) yields
///   `metadata: None`.
///
/// Idempotent on its own output and never fails.
pub fn strip_metadata(raw: &str) -> StrippedContent {
    let Some(marker_at) = raw.find(METADATA_MARKER) else {
        return StrippedContent {
            display_text: raw.to_string(),
            metadata: None,
        };
    };

    let display_text = raw[..marker_at].trim_end().to_string();
    let payload_start = marker_at + METADATA_MARKER.len();

    let metadata = match raw[payload_start..].find(METADATA_TERMINATOR) {
        Some(end) => {
            let payload = raw[payload_start..payload_start + end].trim();
            match serde_json::from_str::<serde_json::Value>(payload) {
                Ok(value) => {
                    debug!("[metadata] Parsed trailer payload ({} bytes)", payload.len());
                    Some(value)
                }
                Err(e) => {
                    // Malformed payload is swallowed by contract
                    debug!("[metadata] Trailer payload not parseable yet: {}", e);
                    None
                }
            }
        }
        None => {
            // Terminator hasn't streamed in yet
            debug!("[metadata] Trailer open but unterminated, hiding tail");
            None
        }
    };

    StrippedContent {
        display_text,
        metadata,
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════
