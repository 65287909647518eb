//! Optimistic interaction sync for Flock.
//!
//! Post interactions (endorse, save, repost) must render instantly: the
//! local toggle state flips before the remote mutation is even sent, and is
//! reverted only if that mutation fails. Every in-flight mutation carries a
//! request id; a failure only rolls the state back when its id is still the
//! most recent one, so a stale failure can never clobber a newer toggle
//! (last-writer-wins).
//!
//! The coordinator makes exactly one attempt per user action — no retry
//! with backoff. A failed toggle is surfaced as a retryable condition and
//! the user retries by tapping again.

pub mod cell;
pub mod coordinator;
pub mod error;

pub use cell::{InteractionCell, InteractionSnapshot, ToggleOutcome, ToggleTicket};
pub use coordinator::{
    CoordinatorConfig, InteractionCoordinator, InteractionKind, MutationEndpoint,
};
pub use error::{CoordinatorError, MutationError};
