//! End-of-session summaries.

use crate::reading::{READING_BASE_URL, slugify, title_case};
use archivist_core::{TopicCount, UsageSummary};
use serde::{Deserialize, Serialize};

/// Topics included in a learning path.
pub const LEARNING_PATH_LENGTH: usize = 3;

/// A "continue with" recommendation for one topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct LearningStep {
    /// Topic the step builds on
    topic: String,
    /// Display title
    title: String,
    /// Where to continue
    url: String,
    /// Suggested activities, deepest first
    next_steps: Vec<String>,
}

impl LearningStep {
    fn for_topic(topic: &str) -> Self {
        Self {
            topic: topic.to_string(),
            title: format!("Continue with {}", title_case(topic)),
            url: format!("{READING_BASE_URL}/topic/{}", slugify(topic)),
            next_steps: vec![
                format!("Deep dive into {topic} primary sources"),
                format!("Explore {topic} timeline in detail"),
                format!("Read academic papers on {topic}"),
            ],
        }
    }
}

/// Recommendations for the user's busiest topics, at most three.
pub fn learning_path(top_topics: &[TopicCount]) -> Vec<LearningStep> {
    top_topics
        .iter()
        .take(LEARNING_PATH_LENGTH)
        .map(|entry| LearningStep::for_topic(&entry.topic))
        .collect()
}

/// Milestones reached during the day.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum Achievement {
    /// Ten or more queries today
    #[strum(to_string = "Research Enthusiast: 10+ queries today!")]
    ResearchEnthusiast,
    /// Three or more distinct topics today
    #[strum(to_string = "Knowledge Seeker: Explored 3+ topics!")]
    KnowledgeSeeker,
    /// The daily allowance is used up
    #[strum(to_string = "Daily Goal Achieved: Maximum learning reached!")]
    DailyGoalAchieved,
}

impl Achievement {
    /// Whether `summary` earns this achievement.
    pub fn earned_by(&self, summary: &UsageSummary) -> bool {
        match self {
            Achievement::ResearchEnthusiast => summary.queries_today >= 10,
            Achievement::KnowledgeSeeker => summary.topics_explored >= 3,
            Achievement::DailyGoalAchieved => summary.queries_today >= summary.daily_limit,
        }
    }
}

/// A user's day: usage, what to read next and milestones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    /// Usage counters
    pub stats: UsageSummary,
    /// Where to continue
    pub learning_path: Vec<LearningStep>,
    /// Milestones reached
    pub achievements: Vec<Achievement>,
}

/// Builds the session summary for `summary`.
///
/// ```
/// use archivist_core::{TopicCount, UsageSummary};
/// use archivist_response::{Achievement, summarize_session};
///
/// let stats = UsageSummary {
///     queries_today: 12,
///     words_received: 2400,
///     topics_explored: 1,
///     top_topics: vec![TopicCount { topic: "mandela".into(), queries: 12 }],
///     daily_limit: 20,
///     queries_remaining: 8,
/// };
/// let session = summarize_session(stats);
/// assert_eq!(session.learning_path.len(), 1);
/// assert_eq!(session.achievements, vec![Achievement::ResearchEnthusiast]);
/// ```
pub fn summarize_session(summary: UsageSummary) -> SessionSummary {
    use strum::IntoEnumIterator;

    let achievements = Achievement::iter()
        .filter(|achievement| achievement.earned_by(&summary))
        .collect();
    SessionSummary {
        learning_path: learning_path(&summary.top_topics),
        achievements,
        stats: summary,
    }
}
