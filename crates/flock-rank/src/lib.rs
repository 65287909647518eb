//! Feed and people ranking for Flock.
//!
//! Scores candidate posts against the viewing user's declared interests and
//! goals, and candidate people against shared interests, goals, and
//! activity. Scoring is a pure function of its inputs: `now` is passed
//! explicitly, there is no randomness, and identical inputs always produce
//! the same order. The scorer reads a snapshot and returns a ranked list —
//! it owns no persistence and makes no external calls.

pub mod keywords;
pub mod person;
pub mod post;
pub mod snapshot;

pub use person::{PersonScore, RankedPerson};
pub use post::{PostScore, RankedPost};
pub use snapshot::{decode_people, decode_posts, FeedSnapshot, PeopleSnapshot};

use chrono::{DateTime, Utc};
use flock_core::{PersonCandidate, Post, RankWeights, UserProfile};

/// Rank `posts` for `profile`, most relevant first.
///
/// A blank profile (no interests and no goals) is a passthrough: the posts
/// come back in their original order with zero scores. Ties keep input
/// order (stable sort).
#[must_use]
pub fn rank_posts(
    profile: &UserProfile,
    posts: Vec<Post>,
    now: DateTime<Utc>,
    weights: &RankWeights,
) -> Vec<RankedPost> {
    if profile.is_blank() {
        tracing::debug!(
            user = %profile.id,
            candidates = posts.len(),
            "blank profile, returning feed unranked"
        );
        return posts
            .into_iter()
            .map(|post| RankedPost {
                score: PostScore::default(),
                post,
            })
            .collect();
    }

    let mut ranked: Vec<RankedPost> = posts
        .into_iter()
        .map(|post| RankedPost {
            score: post::score_post(profile, &post, now, &weights.post),
            post,
        })
        .collect();
    ranked.sort_by(|a, b| b.score.total.total_cmp(&a.score.total));
    ranked
}

/// Rank `candidates` for "people you may know", most relevant first.
///
/// Same passthrough and stability contract as [`rank_posts`].
#[must_use]
pub fn rank_people(
    profile: &UserProfile,
    candidates: Vec<PersonCandidate>,
    weights: &RankWeights,
) -> Vec<RankedPerson> {
    if profile.is_blank() {
        tracing::debug!(
            user = %profile.id,
            candidates = candidates.len(),
            "blank profile, returning people unranked"
        );
        return candidates
            .into_iter()
            .map(|candidate| RankedPerson {
                score: PersonScore::default(),
                candidate,
            })
            .collect();
    }

    let mut ranked: Vec<RankedPerson> = candidates
        .into_iter()
        .map(|candidate| RankedPerson {
            score: person::score_person(profile, &candidate, &weights.person),
            candidate,
        })
        .collect();
    ranked.sort_by(|a, b| b.score.total.total_cmp(&a.score.total));
    ranked
}
