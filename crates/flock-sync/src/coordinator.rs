//! Coordinator tying interaction cells to a remote mutation endpoint.
//!
//! One coordinator serves one signed-in user. Cells are keyed by
//! (entity id, interaction kind) and fully independent of one another; the
//! cell map lock is only held to look a cell up, never across an `.await`.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::cell::{InteractionCell, InteractionSnapshot, ToggleOutcome};
use crate::error::{CoordinatorError, MutationError};

/// The three toggleable post interactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionKind {
    Endorse,
    Save,
    Repost,
}

impl std::fmt::Display for InteractionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InteractionKind::Endorse => write!(f, "endorse"),
            InteractionKind::Save => write!(f, "save"),
            InteractionKind::Repost => write!(f, "repost"),
        }
    }
}

/// The remote side of a toggle.
///
/// Implementations are expected to be idempotent per `(entity, user, kind,
/// desired_flag)`: applying the same desired state twice must not
/// double-count server-side. That guarantee belongs to the endpoint, not
/// the coordinator.
pub trait MutationEndpoint {
    fn apply(
        &self,
        entity_id: &str,
        user_id: &str,
        kind: InteractionKind,
        desired_flag: bool,
    ) -> impl Future<Output = Result<(), MutationError>> + Send;
}

/// Coordinator settings.
#[derive(Debug, Clone, Copy)]
pub struct CoordinatorConfig {
    /// Upper bound on one mutation attempt. Expiry counts as a failure and
    /// triggers the normal rollback path.
    pub mutation_timeout: Duration,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        CoordinatorConfig {
            mutation_timeout: Duration::from_secs(15),
        }
    }
}

type CellMap = HashMap<(String, InteractionKind), Arc<InteractionCell>>;

/// Optimistic-update coordinator for one user's interactions.
#[derive(Debug)]
pub struct InteractionCoordinator<E> {
    endpoint: E,
    user_id: String,
    config: CoordinatorConfig,
    cells: Mutex<CellMap>,
}

impl<E: MutationEndpoint> InteractionCoordinator<E> {
    pub fn new(endpoint: E, user_id: impl Into<String>, config: CoordinatorConfig) -> Self {
        InteractionCoordinator {
            endpoint,
            user_id: user_id.into(),
            config,
            cells: Mutex::new(HashMap::new()),
        }
    }

    fn cells(&self) -> MutexGuard<'_, CellMap> {
        self.cells.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Create the cell for an entity/kind pair with the remote truth known
    /// at render time. Re-registering an existing cell refreshes it instead
    /// (and the refresh is ignored while a mutation is pending, because the
    /// optimistic state is newer than the caller's read).
    pub fn register(&self, entity_id: &str, kind: InteractionKind, flag: bool, count: i64) {
        let mut cells = self.cells();
        match cells.get(&(entity_id.to_string(), kind)) {
            Some(cell) => cell.refresh(flag, count),
            None => {
                cells.insert(
                    (entity_id.to_string(), kind),
                    Arc::new(InteractionCell::new(flag, count)),
                );
            }
        }
    }

    /// Current user-visible state, if the cell exists.
    #[must_use]
    pub fn snapshot(&self, entity_id: &str, kind: InteractionKind) -> Option<InteractionSnapshot> {
        self.cells()
            .get(&(entity_id.to_string(), kind))
            .map(|cell| cell.snapshot())
    }

    /// Toggle an interaction: flip locally right away, then try the remote
    /// mutation once, rolling back on failure unless a newer toggle has
    /// superseded this one.
    ///
    /// # Errors
    ///
    /// [`CoordinatorError::UnknownEntity`] when no cell was registered for
    /// the pair. Remote failures are not `Err`: they come back as
    /// [`ToggleOutcome::RolledBack`] so the caller can show a transient,
    /// retryable notice.
    pub async fn toggle(
        &self,
        entity_id: &str,
        kind: InteractionKind,
    ) -> Result<ToggleOutcome, CoordinatorError> {
        let cell = self
            .cells()
            .get(&(entity_id.to_string(), kind))
            .cloned()
            .ok_or_else(|| CoordinatorError::UnknownEntity {
                entity_id: entity_id.to_string(),
                kind,
            })?;

        let ticket = cell.begin_toggle();
        let attempt = tokio::time::timeout(
            self.config.mutation_timeout,
            self.endpoint
                .apply(entity_id, &self.user_id, kind, ticket.desired_flag),
        )
        .await;

        let result = match attempt {
            Ok(inner) => inner,
            Err(_elapsed) => Err(MutationError::TimedOut {
                elapsed_ms: u64::try_from(self.config.mutation_timeout.as_millis())
                    .unwrap_or(u64::MAX),
            }),
        };

        match result {
            Ok(()) => Ok(cell.commit(&ticket)),
            Err(err) => {
                let outcome = cell.roll_back(&ticket, err);
                if let ToggleOutcome::RolledBack { error, .. } = &outcome {
                    tracing::warn!(
                        entity = entity_id,
                        %kind,
                        error = %error,
                        "interaction mutation failed, rolled back optimistic state"
                    );
                }
                Ok(outcome)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&InteractionKind::Endorse).unwrap(), "\"endorse\"");
        assert_eq!(InteractionKind::Repost.to_string(), "repost");
    }

    #[test]
    fn default_timeout_is_bounded() {
        let config = CoordinatorConfig::default();
        assert!(config.mutation_timeout >= Duration::from_secs(10));
        assert!(config.mutation_timeout <= Duration::from_secs(30));
    }
}
