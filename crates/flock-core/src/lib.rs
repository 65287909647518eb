//! Shared domain types for the Flock personalization core.
//!
//! Holds the read-only inputs to feed ranking (user profiles, posts, person
//! candidates) and the tunable scoring weights. These types carry no
//! behaviour beyond validation; the scoring logic lives in `flock-rank` and
//! the interaction sync logic in `flock-sync`.

pub mod post;
pub mod profile;
pub mod weights;

pub use post::{Post, PostCategory};
pub use profile::{PersonCandidate, UserProfile};
pub use weights::{PersonWeights, PostWeights, RankWeights, RecencyBucket, WeightsError};
