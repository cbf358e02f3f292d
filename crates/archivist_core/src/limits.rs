//! Tunable limits that drive tier selection.

use crate::ResponseTier;
use archivist_error::ConfigError;
use serde::{Deserialize, Serialize};

/// Base word budget for each response tier.
///
/// ```toml
/// [limits.word_limits]
/// first_query = 500
/// follow_up = 300
/// repeated_topic = 150
/// daily_limit_approaching = 100
/// daily_limit_reached = 50
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WordLimits {
    /// Budget for a new topic
    #[serde(default = "default_first_query_words")]
    pub first_query: u32,
    /// Budget for a follow-up on a known topic
    #[serde(default = "default_follow_up_words")]
    pub follow_up: u32,
    /// Budget once a topic's follow-ups are used up
    #[serde(default = "default_repeated_topic_words")]
    pub repeated_topic: u32,
    /// Budget while the daily allowance is running out
    #[serde(default = "default_approaching_words")]
    pub daily_limit_approaching: u32,
    /// Table value for the exhausted tier. The policy for that tier always
    /// carries a budget of zero; this value is informational.
    #[serde(default = "default_reached_words")]
    pub daily_limit_reached: u32,
}

fn default_first_query_words() -> u32 {
    500
}

fn default_follow_up_words() -> u32 {
    300
}

fn default_repeated_topic_words() -> u32 {
    150
}

fn default_approaching_words() -> u32 {
    100
}

fn default_reached_words() -> u32 {
    50
}

impl Default for WordLimits {
    fn default() -> Self {
        Self {
            first_query: default_first_query_words(),
            follow_up: default_follow_up_words(),
            repeated_topic: default_repeated_topic_words(),
            daily_limit_approaching: default_approaching_words(),
            daily_limit_reached: default_reached_words(),
        }
    }
}

impl WordLimits {
    /// Base word budget for `tier`.
    pub fn for_tier(&self, tier: ResponseTier) -> u32 {
        match tier {
            ResponseTier::FirstQuery => self.first_query,
            ResponseTier::FollowUp => self.follow_up,
            ResponseTier::RepeatedTopic => self.repeated_topic,
            ResponseTier::DailyLimitApproaching => self.daily_limit_approaching,
            ResponseTier::DailyLimitReached => self.daily_limit_reached,
        }
    }
}

/// Daily allowances and per-tier word budgets.
///
/// Read once when an engine is built and never mutated afterwards. Several
/// configurations can live side by side, one per engine.
///
/// # Examples
///
/// ```
/// use archivist_core::{LimitConfig, ResponseTier};
///
/// let strict = LimitConfig::builder()
///     .daily_queries(5)
///     .follow_ups_per_topic(2)
///     .build();
///
/// assert_eq!(*strict.daily_queries(), 5);
/// assert_eq!(strict.word_limit(ResponseTier::FollowUp), 300);
///
/// let defaults = LimitConfig::default();
/// assert_eq!(*defaults.daily_queries(), 20);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
#[serde(deny_unknown_fields)]
pub struct LimitConfig {
    /// Queries allowed per user per day.
    #[serde(default = "default_daily_queries")]
    daily_queries: u32,

    /// Words a user should receive per day. Advisory; not used for tier selection.
    #[serde(default = "default_daily_words")]
    daily_words: u64,

    /// Distinct topics a user should explore per day. Advisory.
    #[serde(default = "default_daily_topics")]
    daily_topics: u32,

    /// Queries on one topic before answers redirect to reading material.
    #[serde(default = "default_follow_ups_per_topic")]
    follow_ups_per_topic: u32,

    /// Share of the daily allowance, in percent, at which warnings start.
    #[serde(default = "default_approaching_percent")]
    approaching_percent: u32,

    /// Base word budget per tier.
    #[serde(default)]
    word_limits: WordLimits,
}

fn default_daily_queries() -> u32 {
    20
}

fn default_daily_words() -> u64 {
    5000
}

fn default_daily_topics() -> u32 {
    5
}

fn default_follow_ups_per_topic() -> u32 {
    10
}

fn default_approaching_percent() -> u32 {
    80
}

impl Default for LimitConfig {
    fn default() -> Self {
        Self {
            daily_queries: default_daily_queries(),
            daily_words: default_daily_words(),
            daily_topics: default_daily_topics(),
            follow_ups_per_topic: default_follow_ups_per_topic(),
            approaching_percent: default_approaching_percent(),
            word_limits: WordLimits::default(),
        }
    }
}

impl LimitConfig {
    /// Creates a new limit config builder.
    pub fn builder() -> LimitConfigBuilder {
        LimitConfigBuilder::default()
    }

    /// Base word budget for `tier`.
    pub fn word_limit(&self, tier: ResponseTier) -> u32 {
        self.word_limits.for_tier(tier)
    }

    /// Queries left today after `queries_count` completed ones, clamped at zero.
    pub fn remaining_queries(&self, queries_count: u32) -> u32 {
        self.daily_queries.saturating_sub(queries_count)
    }

    /// Whether `queries` has reached the warning share of the daily allowance.
    ///
    /// Integer arithmetic, so 16 of 20 at 80% is an exact match.
    pub fn reaches_warning_share(&self, queries: u32) -> bool {
        u64::from(queries) * 100 >= u64::from(self.daily_queries) * u64::from(self.approaching_percent)
    }

    /// Validates that the limits describe a usable allowance.
    ///
    /// # Errors
    ///
    /// Returns an error if the daily allowance or per-topic allowance is zero,
    /// the warning share is outside `1..=100`, or a new topic would get an
    /// empty answer.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.daily_queries == 0 {
            return Err(ConfigError::invalid(
                "limits.daily_queries",
                "must be greater than zero",
            ));
        }
        if self.follow_ups_per_topic == 0 {
            return Err(ConfigError::invalid(
                "limits.follow_ups_per_topic",
                "must be greater than zero",
            ));
        }
        if self.approaching_percent == 0 || self.approaching_percent > 100 {
            return Err(ConfigError::invalid(
                "limits.approaching_percent",
                format!("must be in 1..=100, got {}", self.approaching_percent),
            ));
        }
        if self.word_limits.first_query == 0 {
            return Err(ConfigError::invalid(
                "limits.word_limits.first_query",
                "must be greater than zero",
            ));
        }
        Ok(())
    }
}

/// Builder for `LimitConfig`.
#[derive(Debug, Default)]
pub struct LimitConfigBuilder {
    daily_queries: Option<u32>,
    daily_words: Option<u64>,
    daily_topics: Option<u32>,
    follow_ups_per_topic: Option<u32>,
    approaching_percent: Option<u32>,
    word_limits: Option<WordLimits>,
}

impl LimitConfigBuilder {
    /// Sets the daily query allowance.
    pub fn daily_queries(mut self, value: u32) -> Self {
        self.daily_queries = Some(value);
        self
    }

    /// Sets the advisory daily word allowance.
    pub fn daily_words(mut self, value: u64) -> Self {
        self.daily_words = Some(value);
        self
    }

    /// Sets the advisory daily topic allowance.
    pub fn daily_topics(mut self, value: u32) -> Self {
        self.daily_topics = Some(value);
        self
    }

    /// Sets the per-topic query allowance.
    pub fn follow_ups_per_topic(mut self, value: u32) -> Self {
        self.follow_ups_per_topic = Some(value);
        self
    }

    /// Sets the warning share in percent.
    pub fn approaching_percent(mut self, value: u32) -> Self {
        self.approaching_percent = Some(value);
        self
    }

    /// Sets the per-tier word budgets.
    pub fn word_limits(mut self, value: WordLimits) -> Self {
        self.word_limits = Some(value);
        self
    }

    /// Builds the `LimitConfig`, filling unset values with defaults.
    pub fn build(self) -> LimitConfig {
        LimitConfig {
            daily_queries: self.daily_queries.unwrap_or_else(default_daily_queries),
            daily_words: self.daily_words.unwrap_or_else(default_daily_words),
            daily_topics: self.daily_topics.unwrap_or_else(default_daily_topics),
            follow_ups_per_topic: self
                .follow_ups_per_topic
                .unwrap_or_else(default_follow_ups_per_topic),
            approaching_percent: self
                .approaching_percent
                .unwrap_or_else(default_approaching_percent),
            word_limits: self.word_limits.unwrap_or_default(),
        }
    }
}
