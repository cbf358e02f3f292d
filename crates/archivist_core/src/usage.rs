//! Per-user daily usage records.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Maps a caller-supplied topic to the key used for tracking.
///
/// Missing, empty and whitespace-only topics mean "no topic". Any other topic
/// is used exactly as given, so classification and recording agree as long as
/// the caller passes the same string to both.
///
/// # Examples
///
/// ```
/// use archivist_core::normalize_topic;
///
/// assert_eq!(normalize_topic(Some("mandela")), Some("mandela"));
/// assert_eq!(normalize_topic(Some("  ")), None);
/// assert_eq!(normalize_topic(None), None);
/// ```
pub fn normalize_topic(topic: Option<&str>) -> Option<&str> {
    topic.filter(|t| !t.trim().is_empty())
}

/// One completed query, as reported after the answer was generated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct QueryUsage {
    /// Topic the query was classified under, if any.
    topic: Option<String>,
    /// Words in the generated answer.
    word_count: u64,
    /// When the query completed.
    at: DateTime<Utc>,
}

impl QueryUsage {
    /// Creates a usage report. Blank topics are dropped.
    pub fn new(topic: Option<&str>, word_count: u64, at: DateTime<Utc>) -> Self {
        Self {
            topic: normalize_topic(topic).map(str::to_string),
            word_count,
            at,
        }
    }
}

/// Query count for one topic.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TopicCount {
    /// The topic
    pub topic: String,
    /// Queries on it today
    pub queries: u32,
}

/// Counters for one user on one calendar day.
///
/// A record is never carried into another day: stores replace it with a
/// fresh one the first time the user shows up on a different date.
///
/// # Examples
///
/// ```
/// use archivist_core::{QueryUsage, UsageRecord};
/// use chrono::{NaiveDate, TimeZone, Utc};
///
/// let day = NaiveDate::from_ymd_opt(2024, 6, 16).unwrap();
/// let mut record = UsageRecord::new("reader-1", day);
///
/// let at = Utc.with_ymd_and_hms(2024, 6, 16, 9, 0, 0).unwrap();
/// record.apply(&QueryUsage::new(Some("soweto"), 420, at));
/// record.apply(&QueryUsage::new(None, 80, at));
///
/// assert_eq!(*record.queries_count(), 2);
/// assert_eq!(*record.words_count(), 500);
/// assert_eq!(record.queries_on("soweto"), 1);
/// assert_eq!(record.topics(), &vec!["soweto".to_string()]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct UsageRecord {
    /// Opaque user identity.
    user_id: String,
    /// Calendar day in the deployment's reference timezone.
    date: NaiveDate,
    /// Completed queries today.
    queries_count: u32,
    /// Words delivered today.
    words_count: u64,
    /// Topics seen today, in first-seen order.
    topics: Vec<String>,
    /// Queries per topic today.
    topic_queries: HashMap<String, u32>,
    /// When the most recent query completed. Advisory.
    last_query_time: Option<DateTime<Utc>>,
}

impl UsageRecord {
    /// Creates a zeroed record for `user_id` on `date`.
    pub fn new(user_id: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            user_id: user_id.into(),
            date,
            queries_count: 0,
            words_count: 0,
            topics: Vec::new(),
            topic_queries: HashMap::new(),
            last_query_time: None,
        }
    }

    /// Whether this record belongs to `date`.
    pub fn is_for(&self, date: NaiveDate) -> bool {
        self.date == date
    }

    /// Whether `topic` has been queried today.
    pub fn has_topic(&self, topic: &str) -> bool {
        self.topic_queries.contains_key(topic)
    }

    /// Queries on `topic` today.
    pub fn queries_on(&self, topic: &str) -> u32 {
        self.topic_queries.get(topic).copied().unwrap_or(0)
    }

    /// Adds one completed query to the counters.
    ///
    /// Queries without a topic count toward the daily totals only.
    pub fn apply(&mut self, usage: &QueryUsage) {
        self.queries_count = self.queries_count.saturating_add(1);
        self.words_count = self.words_count.saturating_add(usage.word_count);

        if let Some(topic) = usage.topic.as_deref() {
            if !self.topic_queries.contains_key(topic) {
                self.topics.push(topic.to_string());
            }
            let count = self.topic_queries.entry(topic.to_string()).or_insert(0);
            *count = count.saturating_add(1);
        }

        self.last_query_time = Some(usage.at);
    }

    /// The `limit` most-queried topics, busiest first.
    ///
    /// Ties keep first-seen order.
    pub fn top_topics(&self, limit: usize) -> Vec<TopicCount> {
        let mut ranked: Vec<TopicCount> = self
            .topics
            .iter()
            .map(|topic| TopicCount {
                topic: topic.clone(),
                queries: self.queries_on(topic),
            })
            .collect();

        // Stable sort keeps insertion order among equal counts.
        ranked.sort_by(|a, b| b.queries.cmp(&a.queries));
        ranked.truncate(limit);
        ranked
    }
}

/// A user's consumption for the day, as reported to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageSummary {
    /// Completed queries today
    pub queries_today: u32,
    /// Words delivered today
    pub words_received: u64,
    /// Distinct topics explored today
    pub topics_explored: usize,
    /// Up to five busiest topics
    pub top_topics: Vec<TopicCount>,
    /// Daily query allowance
    pub daily_limit: u32,
    /// Queries left today
    pub queries_remaining: u32,
}

impl UsageSummary {
    /// Number of topics listed in `top_topics`.
    pub const TOP_TOPICS: usize = 5;

    /// Summarizes `record` against a daily allowance of `daily_limit` queries.
    pub fn from_record(record: &UsageRecord, daily_limit: u32) -> Self {
        Self {
            queries_today: record.queries_count,
            words_received: record.words_count,
            topics_explored: record.topics.len(),
            top_topics: record.top_topics(Self::TOP_TOPICS),
            daily_limit,
            queries_remaining: daily_limit.saturating_sub(record.queries_count),
        }
    }
}
