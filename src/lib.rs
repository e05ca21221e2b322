// Grove Chat Core — crate root
// Pure presentation-layer logic for the Grove chat client: message types,
// streaming display content, discovery metadata, and persona introductions.
// No I/O, no async, no shared state — everything here is a synchronous
// transformation the UI layer calls on every render or stream chunk.
//
// Dependency rule (one-way):
//   classifier → metadata → types
//   transcript → metadata → types
//   discovery → metadata
//   introductions → types
// Nothing here may perform network, filesystem, or storage access; those
// live with the callers (HTTP client, WebSocket bridge, localStorage).

pub mod classifier;
pub mod discovery;
pub mod error;
pub mod introductions;
pub mod metadata;
pub mod transcript;
pub mod types;

pub use classifier::{classify, is_introduction, is_team_introduction, Classification, ClassifierConfig};
pub use discovery::{DiscoveryMetadata, DiscoveryStage};
pub use error::CoreError;
pub use introductions::{inject_introductions, introduction_messages, IntroductionLedger, TEAM_PERSONAS};
pub use metadata::{strip_metadata, StrippedContent};
pub use transcript::Transcript;
pub use types::{AgentProfile, AgentType, Message, Role};
