//! Post relevance scoring.
//!
//! Four weighted components, summing to at most 100 at default weights:
//! interest match (0–50), goal alignment (0–25), engagement (0–15), and
//! recency (0–10). Matched interest/goal phrases are reported back so the
//! UI can explain why a post was recommended.

use chrono::{DateTime, Utc};
use serde::Serialize;

use flock_core::{Post, PostCategory, PostWeights, UserProfile};

use crate::keywords::{keywords, words};

/// Keyword length floor for interest-derived content keywords.
const INTEREST_KEYWORD_FLOOR: usize = 2;
/// Keyword length floor for goal-derived content keywords. Higher than the
/// interest floor because goals skew toward full sentences.
const GOAL_KEYWORD_FLOOR: usize = 3;

/// Score breakdown for one post.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PostScore {
    pub interest_match: f64,
    pub goal_alignment: f64,
    pub engagement: f64,
    pub recency: f64,
    pub total: f64,
    /// Profile interests that contributed to the score, viewer's wording.
    pub matched_interests: Vec<String>,
    /// Profile goals that contributed to the score.
    pub matched_goals: Vec<String>,
}

/// A post paired with its score breakdown.
#[derive(Debug, Clone, Serialize)]
pub struct RankedPost {
    pub post: Post,
    pub score: PostScore,
}

/// Score one post against the profile. Pure; `now` anchors the recency
/// component.
#[must_use]
pub fn score_post(
    profile: &UserProfile,
    post: &Post,
    now: DateTime<Utc>,
    weights: &PostWeights,
) -> PostScore {
    let (interest_match, matched_interests) = interest_component(profile, post, weights);
    let (goal_alignment, matched_goals) = goal_component(profile, post, weights);
    let engagement = engagement_component(post, weights);
    let recency = recency_component(post.created_at, now, weights);

    PostScore {
        interest_match,
        goal_alignment,
        engagement,
        recency,
        total: interest_match + goal_alignment + engagement + recency,
        matched_interests,
        matched_goals,
    }
}

/// Interest match: exact topic-tag hit short-circuits at the full award;
/// otherwise word-overlap tag matches and content keyword hits accumulate
/// under the component cap.
fn interest_component(
    profile: &UserProfile,
    post: &Post,
    weights: &PostWeights,
) -> (f64, Vec<String>) {
    let tag = post
        .topic_tag
        .as_deref()
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_lowercase);

    if let Some(tag) = tag.as_deref() {
        for interest in &profile.interests {
            if interest.trim().to_lowercase() == tag {
                return (
                    weights.exact_tag_match.min(weights.interest_cap),
                    vec![interest.clone()],
                );
            }
        }
    }

    let mut score = 0.0;
    let mut matched: Vec<String> = Vec::new();

    if let Some(tag) = tag.as_deref() {
        let tag_words = words(tag);
        for interest in &profile.interests {
            if words(interest).iter().any(|word| tag_words.contains(word)) {
                score += weights.partial_tag_match;
                matched.push(interest.clone());
            }
        }
    }

    let content = post.content.to_lowercase();
    for interest in &profile.interests {
        let mut hit = false;
        for keyword in keywords(interest, INTEREST_KEYWORD_FLOOR) {
            if content.contains(&keyword) {
                score += weights.content_keyword_hit;
                hit = true;
            }
        }
        if hit && !matched.contains(interest) {
            matched.push(interest.clone());
        }
    }

    (score.min(weights.interest_cap), matched)
}

/// Goal alignment: each goal keyword found in the content adds the per-hit
/// weight, capped per component.
fn goal_component(
    profile: &UserProfile,
    post: &Post,
    weights: &PostWeights,
) -> (f64, Vec<String>) {
    let content = post.content.to_lowercase();
    let mut score = 0.0;
    let mut matched: Vec<String> = Vec::new();

    for goal in &profile.goals {
        let mut hit = false;
        for keyword in keywords(goal, GOAL_KEYWORD_FLOOR) {
            if content.contains(&keyword) {
                score += weights.goal_keyword_hit;
                hit = true;
            }
        }
        if hit {
            matched.push(goal.clone());
        }
    }

    (score.min(weights.goal_cap), matched)
}

/// Engagement: the counter that matters depends on the category —
/// discussions live on insights, testimonies and prayer requests on
/// endorsements at a higher divisor, tips and facts on endorsements at a
/// lower one. Comments add a small bonus in every category.
fn engagement_component(post: &Post, weights: &PostWeights) -> f64 {
    let base = match post.category {
        PostCategory::Discussion => {
            f64::from(post.insight_count) / weights.discussion_insight_divisor
        }
        PostCategory::Testimony | PostCategory::PrayerRequest => {
            f64::from(post.endorsement_count) / weights.devotion_endorsement_divisor
        }
        PostCategory::Tip | PostCategory::Fact => {
            f64::from(post.endorsement_count) / weights.practical_endorsement_divisor
        }
    };
    let comment_bonus =
        (f64::from(post.comment_count) / weights.comment_divisor).min(weights.comment_bonus_cap);
    base.min(weights.engagement_cap) + comment_bonus
}

/// Recency: step function over hours of age. Posts timestamped in the
/// future count as brand new rather than erroring.
fn recency_component(
    created_at: DateTime<Utc>,
    now: DateTime<Utc>,
    weights: &PostWeights,
) -> f64 {
    let age_seconds = (now - created_at).num_seconds();
    #[allow(clippy::cast_precision_loss)]
    let age_hours = if age_seconds <= 0 {
        0.0
    } else {
        age_seconds as f64 / 3600.0
    };
    for bucket in &weights.recency_buckets {
        if age_hours < bucket.max_hours {
            return bucket.score;
        }
    }
    weights.recency_floor
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

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

    fn post(topic_tag: Option<&str>, content: &str, category: PostCategory) -> Post {
        Post {
            id: "p1".to_string(),
            author_id: "author".to_string(),
            content: content.to_string(),
            topic_tag: topic_tag.map(str::to_string),
            category,
            endorsement_count: 0,
            insight_count: 0,
            comment_count: 0,
            created_at: Utc::now(),
        }
    }

    fn weights() -> PostWeights {
        PostWeights::default()
    }

    #[test]
    fn exact_tag_match_short_circuits_at_full_award() {
        let profile = profile(&["prayer"], &[]);
        // Content is unrelated; the exact tag hit alone must max the component.
        let post = post(Some("Prayer"), "totally unrelated words", PostCategory::Fact);
        let (score, matched) = interest_component(&profile, &post, &weights());
        assert_eq!(score, 50.0);
        assert_eq!(matched, vec!["prayer".to_string()]);
    }

    #[test]
    fn partial_tag_match_awards_per_interest() {
        let profile = profile(&["morning prayer", "prayer journal"], &[]);
        let post = post(Some("prayer requests"), "", PostCategory::Fact);
        let (score, matched) = interest_component(&profile, &post, &weights());
        // Both interests share the word "prayer" with the tag: 25 + 25.
        assert_eq!(score, 50.0);
        assert_eq!(matched.len(), 2);
    }

    #[test]
    fn content_keywords_add_five_each() {
        let profile = profile(&["worship music"], &[]);
        let post = post(
            None,
            "the worship set had new music tonight",
            PostCategory::Fact,
        );
        let (score, matched) = interest_component(&profile, &post, &weights());
        assert_eq!(score, 10.0);
        assert_eq!(matched, vec!["worship music".to_string()]);
    }

    #[test]
    fn interest_component_never_exceeds_cap() {
        let interests: Vec<String> = (0..20).map(|i| format!("faith topic {i}")).collect();
        let profile = UserProfile {
            id: "viewer".to_string(),
            interests,
            goals: vec![],
            post_count: 0,
            follower_count: 0,
        };
        let post = post(
            Some("faith topic roundup"),
            "faith topic faith topic faith topic",
            PostCategory::Fact,
        );
        let (score, _) = interest_component(&profile, &post, &weights());
        assert!(score <= 50.0);
    }

    #[test]
    fn short_interest_tokens_do_not_match_content() {
        // "go" is two characters, below the keyword floor.
        let profile = profile(&["go"], &[]);
        let post = post(None, "go and tell everyone", PostCategory::Fact);
        let (score, matched) = interest_component(&profile, &post, &weights());
        assert_eq!(score, 0.0);
        assert!(matched.is_empty());
    }

    #[test]
    fn goal_alignment_caps_at_twenty_five() {
        let goals: Vec<String> = (0..10).map(|i| format!("learn chapter {i}")).collect();
        let profile = UserProfile {
            id: "viewer".to_string(),
            interests: vec![],
            goals,
            post_count: 0,
            follower_count: 0,
        };
        let post = post(None, "learn a new chapter every day", PostCategory::Fact);
        let (score, _) = goal_component(&profile, &post, &weights());
        assert_eq!(score, 25.0);
    }

    #[test]
    fn goal_keywords_use_a_higher_length_floor() {
        // "pray" is exactly 4 chars and survives the floor of 3; "for" (3) does not.
        let profile = profile(&[], &["pray for rain"]);
        let post = post(None, "we pray together", PostCategory::Fact);
        let (score, matched) = goal_component(&profile, &post, &weights());
        assert_eq!(score, 5.0);
        assert_eq!(matched, vec!["pray for rain".to_string()]);
    }

    #[test]
    fn engagement_uses_insights_for_discussions() {
        let mut discussion = post(None, "", PostCategory::Discussion);
        discussion.insight_count = 40;
        discussion.endorsement_count = 1000;
        assert_eq!(engagement_component(&discussion, &weights()), 4.0);
    }

    #[test]
    fn engagement_uses_endorsements_for_testimonies() {
        let mut testimony = post(None, "", PostCategory::Testimony);
        testimony.endorsement_count = 100;
        testimony.insight_count = 1000;
        assert_eq!(engagement_component(&testimony, &weights()), 5.0);
    }

    #[test]
    fn engagement_divisor_differs_for_tips() {
        let mut tip = post(None, "", PostCategory::Tip);
        tip.endorsement_count = 30;
        assert_eq!(engagement_component(&tip, &weights()), 2.0);
    }

    #[test]
    fn engagement_is_bounded_by_fifteen() {
        let mut testimony = post(None, "", PostCategory::Testimony);
        testimony.endorsement_count = u32::MAX;
        testimony.comment_count = u32::MAX;
        assert_eq!(engagement_component(&testimony, &weights()), 15.0);
    }

    #[test]
    fn recency_steps_down_with_age() {
        let now = Utc::now();
        let w = weights();
        let cases = [
            (Duration::minutes(30), 10.0),
            (Duration::hours(2), 8.0),
            (Duration::hours(11), 6.0),
            (Duration::hours(23), 4.0),
            (Duration::hours(48), 2.0),
            (Duration::days(30), 1.0),
        ];
        for (age, expected) in cases {
            assert_eq!(
                recency_component(now - age, now, &w),
                expected,
                "age {age}"
            );
        }
    }

    #[test]
    fn future_timestamps_score_as_brand_new() {
        let now = Utc::now();
        assert_eq!(
            recency_component(now + Duration::hours(5), now, &weights()),
            10.0
        );
    }

    #[test]
    fn boundary_ages_fall_into_the_older_bucket() {
        let now = Utc::now();
        // Exactly one hour old is no longer "< 1h".
        assert_eq!(recency_component(now - Duration::hours(1), now, &weights()), 8.0);
    }
}
