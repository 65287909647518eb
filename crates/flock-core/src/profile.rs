use serde::{Deserialize, Serialize};

/// The viewing user's profile, as supplied by the external profile store.
///
/// `interests` and `goals` are free-text phrases entered by the user.
/// Insertion order is irrelevant for scoring but preserved so matched-term
/// reporting can echo the user's own wording.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub goals: Vec<String>,
    #[serde(default)]
    pub post_count: u32,
    #[serde(default)]
    pub follower_count: u32,
}

impl UserProfile {
    /// True when the profile carries no personalization signal at all.
    ///
    /// Scorers treat such profiles as a passthrough: candidates are returned
    /// in their original order rather than ranked.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.interests.is_empty() && self.goals.is_empty()
    }
}

/// Another user considered for "people you may know" recommendation.
///
/// Same shape as [`UserProfile`] minus the viewer-only bookkeeping; kept as
/// a separate type because candidates come from the feed/search store, not
/// the profile store, and must stay immutable for the scoring pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonCandidate {
    pub id: String,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub goals: Vec<String>,
    #[serde(default)]
    pub post_count: u32,
    #[serde(default)]
    pub follower_count: u32,
}
