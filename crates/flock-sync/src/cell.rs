//! Per-entity interaction state with request-id fencing.
//!
//! A cell tracks one toggleable interaction on one entity: the user-visible
//! flag, the aggregate count, and the id of the most recent in-flight
//! mutation. The toggle lifecycle is split into explicit steps —
//! [`InteractionCell::begin_toggle`] applies the optimistic flip and hands
//! back a [`ToggleTicket`]; [`InteractionCell::commit`] and
//! [`InteractionCell::roll_back`] resolve it — so the fencing rule is
//! enforced by the types rather than by call-site convention.

use std::sync::{Mutex, PoisonError};

use serde::Serialize;
use uuid::Uuid;

use crate::error::MutationError;

/// User-visible state of one interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InteractionSnapshot {
    pub flag: bool,
    pub count: i64,
}

#[derive(Debug, Clone, Copy)]
struct CellState {
    flag: bool,
    count: i64,
    pending: Option<Uuid>,
}

/// A started toggle: the optimistic flip has been applied and the remote
/// mutation is (about to be) in flight.
#[derive(Debug)]
pub struct ToggleTicket {
    request_id: Uuid,
    /// The flag value the remote endpoint should converge on.
    pub desired_flag: bool,
    prior: InteractionSnapshot,
}

/// Outcome of one resolved toggle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The remote mutation succeeded; local state already reflected it.
    Committed(InteractionSnapshot),
    /// The remote mutation failed and this was still the latest toggle, so
    /// the pre-toggle state was restored. Retryable.
    RolledBack {
        snapshot: InteractionSnapshot,
        error: MutationError,
    },
    /// The remote mutation failed but a newer toggle had already taken
    /// over; the failure was discarded without touching local state.
    Superseded,
}

/// State for one entity + interaction kind. Created on first render of the
/// interactive element, dropped with its owner.
#[derive(Debug)]
pub struct InteractionCell {
    state: Mutex<CellState>,
}

impl InteractionCell {
    #[must_use]
    pub fn new(flag: bool, count: i64) -> Self {
        InteractionCell {
            state: Mutex::new(CellState {
                flag,
                count,
                pending: None,
            }),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, CellState> {
        // A panicked holder cannot leave the three plain fields torn;
        // recover the guard instead of propagating the poison.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current user-visible state.
    #[must_use]
    pub fn snapshot(&self) -> InteractionSnapshot {
        let state = self.lock();
        InteractionSnapshot {
            flag: state.flag,
            count: state.count,
        }
    }

    /// Apply the optimistic flip and mark this request as the latest.
    ///
    /// The new state is computed from the current state, not a caller
    /// snapshot, so rapid toggles compose instead of racing. The previous
    /// pending id, if any, is overwritten: that older request is superseded
    /// from this point on.
    #[must_use]
    pub fn begin_toggle(&self) -> ToggleTicket {
        let mut state = self.lock();
        let prior = InteractionSnapshot {
            flag: state.flag,
            count: state.count,
        };
        let request_id = Uuid::new_v4();
        state.flag = !state.flag;
        state.count += if state.flag { 1 } else { -1 };
        state.pending = Some(request_id);
        ToggleTicket {
            request_id,
            desired_flag: state.flag,
            prior,
        }
    }

    /// Resolve a successful mutation. Local state already reflects the new
    /// truth, so nothing visible changes; the pending marker is cleared
    /// only if no newer toggle has replaced it.
    #[must_use]
    pub fn commit(&self, ticket: &ToggleTicket) -> ToggleOutcome {
        let mut state = self.lock();
        if state.pending == Some(ticket.request_id) {
            state.pending = None;
        }
        ToggleOutcome::Committed(InteractionSnapshot {
            flag: state.flag,
            count: state.count,
        })
    }

    /// Resolve a failed mutation. Restores the pre-toggle state only when
    /// this request is still the latest; a stale failure is discarded so it
    /// cannot undo a newer toggle.
    #[must_use]
    pub fn roll_back(&self, ticket: &ToggleTicket, error: MutationError) -> ToggleOutcome {
        let mut state = self.lock();
        if state.pending != Some(ticket.request_id) {
            tracing::debug!(
                request_id = %ticket.request_id,
                "stale mutation failure discarded, a newer toggle superseded it"
            );
            return ToggleOutcome::Superseded;
        }
        state.flag = ticket.prior.flag;
        state.count = ticket.prior.count;
        state.pending = None;
        ToggleOutcome::RolledBack {
            snapshot: ticket.prior,
            error,
        }
    }

    /// Replace the cell contents with fresh remote truth, unless a mutation
    /// is in flight (the optimistic state wins until it resolves).
    pub fn refresh(&self, flag: bool, count: i64) {
        let mut state = self.lock();
        if state.pending.is_some() {
            return;
        }
        state.flag = flag;
        state.count = count;
    }
}
