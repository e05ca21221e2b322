// Grove Chat Core — Transcript assembly
//
// Owns the ordered message list for one project and assembles streaming
// assistant responses chunk by chunk. The raw content (which may carry a
// partial discovery trailer) is buffered per stream; the message's
// `content` field always holds the display-safe text, re-stripped after
// every chunk. Most recent raw content wins — there is no ordering
// requirement beyond that.
//
// This layer does no I/O. The WebSocket bridge feeds it frames; the
// renderer reads `messages()`.

use log::{debug, info, warn};
use std::collections::HashMap;

use crate::metadata::strip_metadata;
use crate::types::{AgentType, Message};

pub struct Transcript {
    project_id: String,
    messages: Vec<Message>,
    /// Raw accumulated content per in-flight stream, keyed by message id.
    streaming_raw: HashMap<String, String>,
}

impl Transcript {
    pub fn new(project_id: impl Into<String>) -> Transcript {
        Transcript {
            project_id: project_id.into(),
            messages: Vec::new(),
            streaming_raw: HashMap::new(),
        }
    }

    /// Seed a transcript with history loaded by the caller.
    pub fn with_messages(project_id: impl Into<String>, messages: Vec<Message>) -> Transcript {
        Transcript {
            project_id: project_id.into(),
            messages,
            streaming_raw: HashMap::new(),
        }
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Append a user-authored message and return its id.
    pub fn push_user(&mut self, content: impl Into<String>) -> String {
        let msg = Message::user(&self.project_id, content);
        let id = msg.id.clone();
        self.messages.push(msg);
        id
    }

    /// Append an already-complete message (e.g. an injected introduction).
    pub fn push_message(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Start a streaming assistant message. If the id is already known the
    /// stream is reset — the newest start wins.
    pub fn begin_stream(&mut self, message_id: &str) {
        info!("[transcript] Stream started: {}", message_id);
        self.streaming_raw.insert(message_id.to_string(), String::new());

        if let Some(existing) = self.find_mut(message_id) {
            existing.content.clear();
            existing.is_streaming = true;
            return;
        }

        let mut msg = Message::assistant(&self.project_id, "", None);
        msg.id = message_id.to_string();
        msg.is_streaming = true;
        self.messages.push(msg);
    }

    /// Accumulate a content chunk and refresh the display-safe text.
    /// Chunks for unknown stream ids are ignored.
    pub fn apply_chunk(&mut self, message_id: &str, delta: &str) {
        let Some(raw) = self.streaming_raw.get_mut(message_id) else {
            debug!("[transcript] Chunk for unknown stream {} ignored", message_id);
            return;
        };
        raw.push_str(delta);

        let display = strip_metadata(raw).display_text;
        if let Some(msg) = self.messages.iter_mut().find(|m| m.id == message_id) {
            msg.content = display;
        }
    }

    /// Finalize a stream. `full_content`, when the server provides it, is
    /// authoritative over the accumulated chunks. Returns the parsed
    /// trailer payload, if any, for the caller's discovery pipeline.
    pub fn complete_stream(
        &mut self,
        message_id: &str,
        full_content: Option<&str>,
        agent_type: Option<AgentType>,
    ) -> Option<serde_json::Value> {
        let buffered = self.streaming_raw.remove(message_id);
        let raw = match (full_content, &buffered) {
            (Some(full), _) => full.to_string(),
            (None, Some(b)) => b.clone(),
            (None, None) => {
                warn!("[transcript] Completion for unknown stream {}", message_id);
                return None;
            }
        };

        let stripped = strip_metadata(&raw);
        if let Some(msg) = self.find_mut(message_id) {
            // An empty final payload keeps whatever the chunks assembled
            if !stripped.display_text.is_empty() {
                msg.content = stripped.display_text;
            }
            msg.is_streaming = false;
            if agent_type.is_some() {
                msg.agent_type = agent_type;
            }
        }
        info!("[transcript] Stream complete: {}", message_id);
        stripped.metadata
    }

    /// Drop a failed stream and its message, as on a server error frame.
    pub fn abort_stream(&mut self, message_id: &str) {
        info!("[transcript] Stream aborted: {}", message_id);
        self.streaming_raw.remove(message_id);
        self.messages.retain(|m| m.id != message_id);
    }

    /// Clear all in-flight streams (connection dropped); completed
    /// messages stay.
    pub fn clear_streams(&mut self) {
        self.streaming_raw.clear();
    }

    fn find_mut(&mut self, message_id: &str) -> Option<&mut Message> {
        self.messages.iter_mut().find(|m| m.id == message_id)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Role;
    use serde_json::json;

    #[test]
    fn test_chunked_stream_with_trailer() {
        let mut t = Transcript::new("project-1");
        t.begin_stream("msg-1");

        // Trailer arrives split across chunks
        t.apply_chunk("msg-1", "Welcome to your ");
        t.apply_chunk("msg-1", "project!");
        assert_eq!(t.messages()[0].content, "Welcome to your project!");
        assert!(t.messages()[0].is_streaming);

        t.apply_chunk("msg-1", "<!--DISCOVERY_DATA:{\"stage_complete\":true,");
        // Full marker has arrived: the tail is hidden even though the
        // payload is still incomplete
        assert_eq!(t.messages()[0].content, "Welcome to your project!");

        t.apply_chunk("msg-1", "\"extracted\":{\"business_context\":\"test\"}}-->");
        assert_eq!(t.messages()[0].content, "Welcome to your project!");

        let metadata = t.complete_stream("msg-1", None, Some(AgentType::ProductManager));
        assert_eq!(
            metadata,
            Some(json!({
                "stage_complete": true,
                "extracted": { "business_context": "test" }
            }))
        );
        let msg = &t.messages()[0];
        assert!(!msg.is_streaming);
        assert_eq!(msg.agent_type, Some(AgentType::ProductManager));
        assert_eq!(msg.role, Role::Assistant);
    }

    #[test]
    fn test_completion_full_content_is_authoritative() {
        let mut t = Transcript::new("project-1");
        t.begin_stream("msg-1");
        t.apply_chunk("msg-1", "partial");

        t.complete_stream("msg-1", Some("The whole reply."), None);
        assert_eq!(t.messages()[0].content, "The whole reply.");
    }

    #[test]
    fn test_empty_completion_keeps_assembled_content() {
        let mut t = Transcript::new("project-1");
        t.begin_stream("msg-1");
        t.apply_chunk("msg-1", "Assembled from chunks");

        t.complete_stream("msg-1", Some(""), None);
        assert_eq!(t.messages()[0].content, "Assembled from chunks");
        assert!(!t.messages()[0].is_streaming);
    }

    #[test]
    fn test_unknown_stream_ids_ignored() {
        let mut t = Transcript::new("project-1");
        t.apply_chunk("ghost", "hello");
        assert!(t.messages().is_empty());
        assert_eq!(t.complete_stream("ghost", None, None), None);
    }

    #[test]
    fn test_abort_drops_failed_message() {
        let mut t = Transcript::new("project-1");
        t.push_user("Build me a site");
        t.begin_stream("msg-1");
        t.apply_chunk("msg-1", "Sure, I");

        t.abort_stream("msg-1");
        assert_eq!(t.messages().len(), 1, "only the user message remains");
        assert_eq!(t.messages()[0].role, Role::User);
    }

    #[test]
    fn test_begin_stream_twice_resets() {
        let mut t = Transcript::new("project-1");
        t.begin_stream("msg-1");
        t.apply_chunk("msg-1", "first attempt");
        t.begin_stream("msg-1");
        t.apply_chunk("msg-1", "second attempt");

        assert_eq!(t.messages().len(), 1);
        assert_eq!(t.messages()[0].content, "second attempt");
    }
}
