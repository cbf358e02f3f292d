//! Response tiers.

use serde::{Deserialize, Serialize};

/// How deep an answer may go, selected from the user's usage today.
///
/// Variants are declared in ascending severity, so `Ord` compares severity.
///
/// # Examples
///
/// ```
/// use archivist_core::ResponseTier;
///
/// assert!(ResponseTier::DailyLimitReached > ResponseTier::FollowUp);
/// assert_eq!(ResponseTier::RepeatedTopic.to_string(), "repeated_topic");
/// assert_eq!("follow_up".parse::<ResponseTier>().unwrap(), ResponseTier::FollowUp);
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::EnumString,
    strum::Display,
    strum::AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ResponseTier {
    /// New topic (or no topic): the full-depth answer.
    FirstQuery,
    /// Another question on a topic already explored today.
    FollowUp,
    /// The per-topic follow-up allowance is used up.
    RepeatedTopic,
    /// Most of the daily query allowance is used up.
    DailyLimitApproaching,
    /// No queries left today.
    DailyLimitReached,
}

impl ResponseTier {
    /// Whether this tier comes from the daily allowance rather than topic history.
    pub fn is_daily_limit(&self) -> bool {
        matches!(
            self,
            ResponseTier::DailyLimitApproaching | ResponseTier::DailyLimitReached
        )
    }

    /// Whether no answer should be generated at all under this tier.
    pub fn is_terminal(&self) -> bool {
        matches!(self, ResponseTier::DailyLimitReached)
    }
}
