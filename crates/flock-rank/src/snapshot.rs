//! Tolerant decoding of candidate snapshots.
//!
//! The candidate supplier hands over raw JSON records; one malformed record
//! must never abort the whole batch. Failures are logged with their index
//! and skipped, and the survivors are scored.

use serde::Deserialize;
use serde_json::Value;

use flock_core::{PersonCandidate, Post, UserProfile};

/// A feed snapshot as handed over by the host: the viewing profile plus raw
/// post records.
#[derive(Debug, Deserialize)]
pub struct FeedSnapshot {
    pub profile: UserProfile,
    #[serde(default)]
    pub posts: Vec<Value>,
}

/// A people snapshot: the viewing profile plus raw person records.
#[derive(Debug, Deserialize)]
pub struct PeopleSnapshot {
    pub profile: UserProfile,
    #[serde(default)]
    pub people: Vec<Value>,
}

/// Decode raw post records, skipping malformed ones.
#[must_use]
pub fn decode_posts(records: &[Value]) -> Vec<Post> {
    decode_records(records, "post")
}

/// Decode raw person records, skipping malformed ones.
#[must_use]
pub fn decode_people(records: &[Value]) -> Vec<PersonCandidate> {
    decode_records(records, "person")
}

fn decode_records<T: serde::de::DeserializeOwned>(records: &[Value], kind: &str) -> Vec<T> {
    records
        .iter()
        .enumerate()
        .filter_map(|(index, record)| match serde_json::from_value(record.clone()) {
            Ok(decoded) => Some(decoded),
            Err(err) => {
                tracing::warn!(kind, index, error = %err, "skipping malformed candidate record");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn malformed_post_is_skipped_not_fatal() {
        let records = vec![
            json!({
                "id": "p1",
                "author_id": "u1",
                "content": "hello",
                "category": "tip",
                "created_at": "2026-08-01T00:00:00Z"
            }),
            // Missing content and category.
            json!({ "id": "p2", "author_id": "u2" }),
            json!({
                "id": "p3",
                "author_id": "u3",
                "content": "again",
                "category": "fact",
                "created_at": "2026-08-02T00:00:00Z"
            }),
        ];
        let posts = decode_posts(&records);
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].id, "p1");
        assert_eq!(posts[1].id, "p3");
    }

    #[test]
    fn all_malformed_yields_empty_not_error() {
        let records = vec![json!(42), json!("nope")];
        assert!(decode_posts(&records).is_empty());
    }

    #[test]
    fn people_records_decode_with_defaults() {
        let records = vec![json!({ "id": "u7", "interests": ["prayer"] })];
        let people = decode_people(&records);
        assert_eq!(people.len(), 1);
        assert_eq!(people[0].follower_count, 0);
    }

    #[test]
    fn feed_snapshot_parses_profile_and_raw_posts() {
        let snapshot: FeedSnapshot = serde_json::from_value(json!({
            "profile": { "id": "viewer", "interests": ["prayer"] },
            "posts": [ { "anything": true } ]
        }))
        .unwrap();
        assert_eq!(snapshot.profile.id, "viewer");
        assert_eq!(snapshot.posts.len(), 1);
    }
}
