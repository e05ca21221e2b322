// Grove Chat Core — Error types
// Single canonical error enum for the crate, built with `thiserror`.
//
// Design rules:
//   • Variants are coarse-grained by domain.
//   • The `#[from]` attribute wires external error conversions automatically.
//   • The display-path functions (stripper, classifier) never return this
//     type — their contract is to degrade silently. Only the opt-in encode
//     and typed-decode edges are fallible.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    /// JSON serialization / deserialization failure.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
