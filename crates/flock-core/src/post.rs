use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Editorial category of a post. Drives which engagement counter the scorer
/// weighs (discussions live on insights, testimonies on endorsements).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PostCategory {
    Discussion,
    Testimony,
    PrayerRequest,
    Tip,
    Fact,
}

impl std::fmt::Display for PostCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PostCategory::Discussion => write!(f, "discussion"),
            PostCategory::Testimony => write!(f, "testimony"),
            PostCategory::PrayerRequest => write!(f, "prayer-request"),
            PostCategory::Tip => write!(f, "tip"),
            PostCategory::Fact => write!(f, "fact"),
        }
    }
}

/// A candidate post for feed ranking, as supplied by the feed store.
///
/// Immutable for the duration of one scoring pass. Counters are aggregate
/// reads; the scorer never writes them back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub author_id: String,
    pub content: String,
    #[serde(default)]
    pub topic_tag: Option<String>,
    pub category: PostCategory,
    #[serde(default)]
    pub endorsement_count: u32,
    #[serde(default)]
    pub insight_count: u32,
    #[serde(default)]
    pub comment_count: u32,
    pub created_at: DateTime<Utc>,
}
