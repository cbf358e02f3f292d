//! Response policies.

use serde::{Deserialize, Serialize};

/// How one answer must be shaped.
///
/// The four base fields are present on every policy. The extras are only set
/// by the tiers that define them and are omitted from serialized output
/// otherwise.
///
/// # Examples
///
/// ```
/// use archivist_core::TierPolicy;
///
/// let policy = TierPolicy::new(150, false, 10, 7)
///     .with_message("You've explored 'soweto' extensively today!".to_string())
///     .with_redirect_to_articles(true);
///
/// assert_eq!(*policy.word_limit(), 150);
/// assert_eq!(*policy.redirect_to_articles(), Some(true));
/// assert_eq!(*policy.show_summary(), None);
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_setters::Setters,
)]
#[setters(prefix = "with_", strip_option)]
pub struct TierPolicy {
    /// Maximum words the answer may contain.
    #[setters(skip)]
    word_limit: u32,

    /// Whether cited source documents should be attached.
    #[setters(skip)]
    include_sources: bool,

    /// How many supplementary reading items to recommend.
    #[serde(rename = "suggest_articles")]
    #[setters(skip)]
    suggested_article_count: u32,

    /// Queries left today, clamped at zero.
    #[setters(skip)]
    remaining_queries: u32,

    /// Guidance prepended to the answer.
    #[serde(default)]
    message: Option<String>,

    /// Point the user at reading material instead of more answers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    redirect_to_articles: Option<bool>,

    /// Offer to download the suggested resources.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    show_download_option: Option<bool>,

    /// Show a summary of the day's research.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    show_summary: Option<bool>,

    /// Every topic explored today, in first-seen order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    topics_explored: Option<Vec<String>>,

    /// Invite the user back once the daily window resets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    comeback_tomorrow: Option<bool>,
}

impl TierPolicy {
    /// Creates a policy with no message and no tier extras.
    pub fn new(
        word_limit: u32,
        include_sources: bool,
        suggested_article_count: u32,
        remaining_queries: u32,
    ) -> Self {
        Self {
            word_limit,
            include_sources,
            suggested_article_count,
            remaining_queries,
            message: None,
            redirect_to_articles: None,
            show_download_option: None,
            show_summary: None,
            topics_explored: None,
            comeback_tomorrow: None,
        }
    }

    /// Whether an answer may be generated at all.
    pub fn allows_answer(&self) -> bool {
        self.word_limit > 0
    }
}
