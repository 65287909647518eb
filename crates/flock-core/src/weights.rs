//! Tunable scoring weights.
//!
//! The canonical constants (50/25/15/10 for posts, 60/30/10 for people, the
//! recency hour buckets, the engagement divisors) are empirically chosen
//! product values with no derivation. They are kept as configuration rather
//! than hard-coded so a deployment can tune them, but the defaults must not
//! drift: downstream ranking tests pin the default behaviour.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A weight or divisor failed validation.
#[derive(Debug, Error)]
pub enum WeightsError {
    #[error("weight `{name}` must be finite and non-negative, got {value}")]
    InvalidWeight { name: &'static str, value: f64 },

    #[error("divisor `{name}` must be finite and positive, got {value}")]
    InvalidDivisor { name: &'static str, value: f64 },

    #[error("recency buckets must be non-empty with strictly increasing hour bounds")]
    InvalidRecencyBuckets,
}

/// One step of the recency step function: posts younger than `max_hours`
/// (and older than the previous bucket's bound) score `score`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecencyBucket {
    pub max_hours: f64,
    pub score: f64,
}

/// Weights for post feed ranking. Component caps sum to 100 at defaults:
/// interest 50, goal 25, engagement 15, recency 10.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PostWeights {
    /// Awarded outright for a case-insensitive exact topic-tag match.
    pub exact_tag_match: f64,
    /// Awarded per interest sharing a word with the topic tag.
    pub partial_tag_match: f64,
    /// Awarded per interest keyword found in the post content.
    pub content_keyword_hit: f64,
    /// Ceiling on the whole interest-match component.
    pub interest_cap: f64,
    /// Awarded per goal keyword found in the post content.
    pub goal_keyword_hit: f64,
    /// Ceiling on the goal-alignment component.
    pub goal_cap: f64,
    /// Insight-count divisor for discussion posts.
    pub discussion_insight_divisor: f64,
    /// Endorsement-count divisor for testimony and prayer-request posts.
    pub devotion_endorsement_divisor: f64,
    /// Endorsement-count divisor for tip and fact posts.
    pub practical_endorsement_divisor: f64,
    /// Ceiling on the category-specific engagement share.
    pub engagement_cap: f64,
    /// Comment-count divisor for the comment bonus.
    pub comment_divisor: f64,
    /// Ceiling on the comment bonus.
    pub comment_bonus_cap: f64,
    /// Recency step function, youngest bucket first. Ages past the last
    /// bound score `recency_floor`.
    pub recency_buckets: Vec<RecencyBucket>,
    pub recency_floor: f64,
}

impl Default for PostWeights {
    fn default() -> Self {
        PostWeights {
            exact_tag_match: 50.0,
            partial_tag_match: 25.0,
            content_keyword_hit: 5.0,
            interest_cap: 50.0,
            goal_keyword_hit: 5.0,
            goal_cap: 25.0,
            discussion_insight_divisor: 10.0,
            devotion_endorsement_divisor: 20.0,
            practical_endorsement_divisor: 15.0,
            engagement_cap: 10.0,
            comment_divisor: 10.0,
            comment_bonus_cap: 5.0,
            recency_buckets: vec![
                RecencyBucket { max_hours: 1.0, score: 10.0 },
                RecencyBucket { max_hours: 3.0, score: 8.0 },
                RecencyBucket { max_hours: 12.0, score: 6.0 },
                RecencyBucket { max_hours: 24.0, score: 4.0 },
                RecencyBucket { max_hours: 72.0, score: 2.0 },
            ],
            recency_floor: 1.0,
        }
    }
}

/// Weights for person recommendation. Component caps sum to 100 at
/// defaults: interest 60, goal 30, activity 10.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonWeights {
    /// Awarded per exact case-insensitive interest/goal pair match.
    pub exact_match: f64,
    /// Awarded per pair sharing at least one word.
    pub word_overlap: f64,
    pub interest_cap: f64,
    pub goal_cap: f64,
    pub post_divisor: f64,
    pub post_cap: f64,
    pub follower_divisor: f64,
    pub follower_cap: f64,
}

impl Default for PersonWeights {
    fn default() -> Self {
        PersonWeights {
            exact_match: 10.0,
            word_overlap: 5.0,
            interest_cap: 60.0,
            goal_cap: 30.0,
            post_divisor: 5.0,
            post_cap: 5.0,
            follower_divisor: 20.0,
            follower_cap: 5.0,
        }
    }
}

/// Full weight set for both ranking paths.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RankWeights {
    pub post: PostWeights,
    pub person: PersonWeights,
}

impl RankWeights {
    /// Check every weight, cap, and divisor.
    ///
    /// # Errors
    ///
    /// Returns [`WeightsError`] naming the first offending field: weights
    /// and caps must be finite and non-negative, divisors finite and
    /// positive, and recency buckets non-empty with increasing bounds.
    pub fn validate(&self) -> Result<(), WeightsError> {
        let weights = [
            ("post.exact_tag_match", self.post.exact_tag_match),
            ("post.partial_tag_match", self.post.partial_tag_match),
            ("post.content_keyword_hit", self.post.content_keyword_hit),
            ("post.interest_cap", self.post.interest_cap),
            ("post.goal_keyword_hit", self.post.goal_keyword_hit),
            ("post.goal_cap", self.post.goal_cap),
            ("post.engagement_cap", self.post.engagement_cap),
            ("post.comment_bonus_cap", self.post.comment_bonus_cap),
            ("post.recency_floor", self.post.recency_floor),
            ("person.exact_match", self.person.exact_match),
            ("person.word_overlap", self.person.word_overlap),
            ("person.interest_cap", self.person.interest_cap),
            ("person.goal_cap", self.person.goal_cap),
            ("person.post_cap", self.person.post_cap),
            ("person.follower_cap", self.person.follower_cap),
        ];
        for (name, value) in weights {
            if !value.is_finite() || value < 0.0 {
                return Err(WeightsError::InvalidWeight { name, value });
            }
        }

        let divisors = [
            (
                "post.discussion_insight_divisor",
                self.post.discussion_insight_divisor,
            ),
            (
                "post.devotion_endorsement_divisor",
                self.post.devotion_endorsement_divisor,
            ),
            (
                "post.practical_endorsement_divisor",
                self.post.practical_endorsement_divisor,
            ),
            ("post.comment_divisor", self.post.comment_divisor),
            ("person.post_divisor", self.person.post_divisor),
            ("person.follower_divisor", self.person.follower_divisor),
        ];
        for (name, value) in divisors {
            if !value.is_finite() || value <= 0.0 {
                return Err(WeightsError::InvalidDivisor { name, value });
            }
        }

        if self.post.recency_buckets.is_empty() {
            return Err(WeightsError::InvalidRecencyBuckets);
        }
        for pair in self.post.recency_buckets.windows(2) {
            if pair[1].max_hours <= pair[0].max_hours {
                return Err(WeightsError::InvalidRecencyBuckets);
            }
        }
        for bucket in &self.post.recency_buckets {
            if !bucket.max_hours.is_finite()
                || bucket.max_hours <= 0.0
                || !bucket.score.is_finite()
                || bucket.score < 0.0
            {
                return Err(WeightsError::InvalidRecencyBuckets);
            }
        }

        Ok(())
    }
}
