use thiserror::Error;

use crate::coordinator::InteractionKind;

/// A remote toggle mutation failed.
///
/// Every variant is recoverable: the coordinator rolls the optimistic state
/// back and the caller surfaces a transient, retryable condition. Nothing
/// here is fatal to the host.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MutationError {
    /// The endpoint was unreachable or the connection dropped.
    #[error("network error: {0}")]
    Network(String),

    /// The endpoint rejected the caller's credentials or rules.
    #[error("permission denied: {0}")]
    Denied(String),

    /// The endpoint reported conflicting remote state.
    #[error("remote conflict: {0}")]
    Conflict(String),

    /// The mutation did not resolve within the configured bound.
    #[error("mutation timed out after {elapsed_ms} ms")]
    TimedOut { elapsed_ms: u64 },
}

/// Errors from the coordinator itself, as opposed to the remote endpoint.
#[derive(Debug, Error)]
pub enum CoordinatorError {
    /// `toggle` was called for an entity/kind pair that was never
    /// registered. Cells are created on first render; a toggle without a
    /// cell is a caller bug, not a remote failure.
    #[error("no interaction cell for entity `{entity_id}` kind `{kind}`")]
    UnknownEntity {
        entity_id: String,
        kind: InteractionKind,
    },
}
