//! Person recommendation scoring.
//!
//! Pairwise comparison of the viewer's interests/goals against the
//! candidate's, plus a small activity signal from post and follower counts.

use serde::Serialize;

use flock_core::{PersonCandidate, PersonWeights, UserProfile};

use crate::keywords::share_word;

/// Score breakdown for one person candidate.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PersonScore {
    pub interest: f64,
    pub goal: f64,
    pub activity: f64,
    pub total: f64,
    /// Interest pairs that matched exactly or by word overlap. Counts every
    /// match, including ones past the component cap.
    pub shared_interests: u32,
    pub shared_goals: u32,
}

/// A candidate paired with its score breakdown.
#[derive(Debug, Clone, Serialize)]
pub struct RankedPerson {
    pub candidate: PersonCandidate,
    pub score: PersonScore,
}

/// Score one candidate against the profile.
#[must_use]
pub fn score_person(
    profile: &UserProfile,
    candidate: &PersonCandidate,
    weights: &PersonWeights,
) -> PersonScore {
    let (interest, shared_interests) = pair_component(
        &profile.interests,
        &candidate.interests,
        weights,
        weights.interest_cap,
    );
    let (goal, shared_goals) =
        pair_component(&profile.goals, &candidate.goals, weights, weights.goal_cap);
    let activity = activity_component(candidate, weights);

    PersonScore {
        interest,
        goal,
        activity,
        total: interest + goal + activity,
        shared_interests,
        shared_goals,
    }
}

/// Compare every (viewer phrase, candidate phrase) pair: an exact
/// case-insensitive match earns the full pair weight, a shared word the
/// overlap weight. The sum is capped; the shared counter is not.
fn pair_component(
    ours: &[String],
    theirs: &[String],
    weights: &PersonWeights,
    cap: f64,
) -> (f64, u32) {
    let mut score = 0.0;
    let mut shared = 0u32;
    for a in ours {
        let a_norm = a.trim().to_lowercase();
        for b in theirs {
            if a_norm == b.trim().to_lowercase() {
                score += weights.exact_match;
                shared += 1;
            } else if share_word(a, b) {
                score += weights.word_overlap;
                shared += 1;
            }
        }
    }
    (score.min(cap), shared)
}

/// Activity signal: prolific and followed users float up a little, but the
/// component never dominates the match-based ones.
fn activity_component(candidate: &PersonCandidate, weights: &PersonWeights) -> f64 {
    (f64::from(candidate.post_count) / weights.post_divisor).min(weights.post_cap)
        + (f64::from(candidate.follower_count) / weights.follower_divisor)
            .min(weights.follower_cap)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(interests: &[&str], goals: &[&str]) -> UserProfile {
        UserProfile {
            id: "viewer".to_string(),
            interests: interests.iter().map(|s| (*s).to_string()).collect(),
            goals: goals.iter().map(|s| (*s).to_string()).collect(),
            post_count: 0,
            follower_count: 0,
        }
    }

    fn candidate(interests: &[&str], goals: &[&str]) -> PersonCandidate {
        PersonCandidate {
            id: "cand".to_string(),
            interests: interests.iter().map(|s| (*s).to_string()).collect(),
            goals: goals.iter().map(|s| (*s).to_string()).collect(),
            post_count: 0,
            follower_count: 0,
        }
    }

    #[test]
    fn exact_interest_pair_scores_ten() {
        let score = score_person(
            &profile(&["Worship"], &[]),
            &candidate(&["worship"], &[]),
            &PersonWeights::default(),
        );
        assert_eq!(score.interest, 10.0);
        assert_eq!(score.shared_interests, 1);
    }

    #[test]
    fn word_overlap_scores_five() {
        let score = score_person(
            &profile(&["worship music"], &[]),
            &candidate(&["live music"], &[]),
            &PersonWeights::default(),
        );
        assert_eq!(score.interest, 5.0);
        assert_eq!(score.shared_interests, 1);
    }

    #[test]
    fn interest_component_caps_at_sixty() {
        let many: Vec<&str> = vec!["prayer"; 10];
        let score = score_person(
            &profile(&many, &[]),
            &candidate(&many, &[]),
            &PersonWeights::default(),
        );
        // 100 exact pairs would be 1000 points uncapped.
        assert_eq!(score.interest, 60.0);
        assert_eq!(score.shared_interests, 100);
    }

    #[test]
    fn goal_component_caps_at_thirty() {
        let many: Vec<&str> = vec!["grow deeper"; 5];
        let score = score_person(
            &profile(&[], &many),
            &candidate(&[], &many),
            &PersonWeights::default(),
        );
        assert_eq!(score.goal, 30.0);
    }

    #[test]
    fn activity_rewards_posts_and_followers() {
        let mut cand = candidate(&[], &[]);
        cand.post_count = 10;
        cand.follower_count = 40;
        let score = score_person(&profile(&["x y z"], &[]), &cand, &PersonWeights::default());
        assert_eq!(score.activity, 4.0);
    }

    #[test]
    fn activity_caps_at_ten() {
        let mut cand = candidate(&[], &[]);
        cand.post_count = 10_000;
        cand.follower_count = 1_000_000;
        let score = score_person(&profile(&["x y z"], &[]), &cand, &PersonWeights::default());
        assert_eq!(score.activity, 10.0);
    }

    #[test]
    fn no_overlap_scores_only_activity() {
        let mut cand = candidate(&["gardening"], &["run a marathon"]);
        cand.post_count = 5;
        let score = score_person(
            &profile(&["theology"], &["memorize psalms"]),
            &cand,
            &PersonWeights::default(),
        );
        assert_eq!(score.interest, 0.0);
        assert_eq!(score.goal, 0.0);
        assert_eq!(score.total, 1.0);
    }
}
