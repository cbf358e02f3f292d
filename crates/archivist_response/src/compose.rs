//! Turning a generated body and a policy into the answer the user sees.

use crate::reading::{ReadingItem, follow_up_prompts, suggested_reading};
use crate::words::{count_words, truncate_to_word_limit};
use archivist_core::{ResponseTier, TierPolicy};
use serde::{Deserialize, Serialize};

/// Reading list topic used when a refused query had no topic.
const FALLBACK_READING_TOPIC: &str = "general";

/// The final answer for `policy`.
///
/// The body is cut to the word budget and the policy message, if any, is
/// placed before it with a blank line in between. A policy that allows no
/// answer yields just the message.
///
/// ```
/// use archivist_core::TierPolicy;
/// use archivist_response::compose_answer;
///
/// let policy = TierPolicy::new(3, true, 5, 10).with_message("Welcome back.".to_string());
/// assert_eq!(
///     compose_answer(&policy, "The uprising began on 16 June 1976."),
///     "Welcome back.\n\nThe uprising began..."
/// );
/// ```
pub fn compose_answer(policy: &TierPolicy, body: &str) -> String {
    let message = policy.message().as_deref();
    if !policy.allows_answer() {
        return message.unwrap_or_default().to_string();
    }
    let body = truncate_to_word_limit(body, *policy.word_limit());
    match message {
        Some(message) if !body.is_empty() => format!("{message}\n\n{body}"),
        Some(message) => message.to_string(),
        None => body,
    }
}

/// Everything returned to the user for one query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct ShapedResponse {
    /// Tier the query was classified under
    tier: ResponseTier,
    /// Composed answer text
    answer: String,
    /// Recommended reading
    suggested_reading: Vec<ReadingItem>,
    /// Questions to offer next
    follow_up_questions: Vec<String>,
    /// Words of generated text delivered, excluding the policy message
    word_count: u64,
    /// Policy the answer was shaped by
    policy: TierPolicy,
}

impl ShapedResponse {
    /// Shapes `body` for a query on `topic`.
    pub fn new(tier: ResponseTier, policy: TierPolicy, topic: Option<&str>, body: &str) -> Self {
        let topic = match topic.map(str::trim) {
            Some(topic) if !topic.is_empty() => topic,
            _ if tier == ResponseTier::DailyLimitReached => FALLBACK_READING_TOPIC,
            _ => "",
        };
        let word_count = if policy.allows_answer() {
            count_words(&truncate_to_word_limit(body, *policy.word_limit())) as u64
        } else {
            0
        };
        Self {
            tier,
            answer: compose_answer(&policy, body),
            word_count,
            suggested_reading: suggested_reading(topic, *policy.suggested_article_count()),
            follow_up_questions: follow_up_prompts(tier)
                .iter()
                .map(|prompt| prompt.to_string())
                .collect(),
            policy,
        }
    }
}
