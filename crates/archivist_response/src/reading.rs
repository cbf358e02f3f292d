//! Supplementary reading and follow-up prompts.

use archivist_core::ResponseTier;
use serde::{Deserialize, Serialize};

/// Site that hosts the reading material.
pub const READING_BASE_URL: &str = "https://sahistory.org.za";

/// Kind of reading item.
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
    strum::AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ReadingKind {
    /// Overview article
    Article,
    /// Chronology of events
    Timeline,
    /// Primary sources
    Archive,
}

impl ReadingKind {
    /// URL path segment for this kind.
    pub fn path(&self) -> &'static str {
        match self {
            ReadingKind::Article => "topic",
            ReadingKind::Timeline => "timeline",
            ReadingKind::Archive => "archive",
        }
    }

    /// Estimated reading time in minutes.
    pub fn reading_minutes(&self) -> u32 {
        match self {
            ReadingKind::Article => 15,
            ReadingKind::Timeline => 10,
            ReadingKind::Archive => 30,
        }
    }

    fn title(&self, topic: &str) -> String {
        match self {
            ReadingKind::Article => format!("Complete Guide to {topic}"),
            ReadingKind::Timeline => format!("Timeline: Key Events in {topic}"),
            ReadingKind::Archive => format!("Primary Sources: {topic}"),
        }
    }
}

/// One recommended reading item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct ReadingItem {
    /// Display title
    title: String,
    /// Link to the material
    url: String,
    /// What sort of material it is
    kind: ReadingKind,
    /// Estimated reading time in minutes
    reading_minutes: u32,
}

/// Capitalizes the first letter of each word and lowercases the rest.
pub fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// URL-safe form of a topic: lowercase alphanumerics joined by single dashes.
pub fn slugify(text: &str) -> String {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// Up to three reading items for `topic`, cut to `count`.
///
/// Blank topics have no reading list.
///
/// ```
/// use archivist_response::suggested_reading;
///
/// let items = suggested_reading("soweto uprising", 2);
/// assert_eq!(items.len(), 2);
/// assert_eq!(items[0].title(), "Complete Guide to Soweto Uprising");
/// assert_eq!(items[1].url(), "https://sahistory.org.za/timeline/soweto-uprising");
/// ```
pub fn suggested_reading(topic: &str, count: u32) -> Vec<ReadingItem> {
    let slug = slugify(topic);
    if slug.is_empty() {
        return Vec::new();
    }
    let title = title_case(topic);
    [ReadingKind::Article, ReadingKind::Timeline, ReadingKind::Archive]
        .into_iter()
        .take(count as usize)
        .map(|kind| ReadingItem {
            title: kind.title(&title),
            url: format!("{READING_BASE_URL}/{}/{slug}", kind.path()),
            kind,
            reading_minutes: kind.reading_minutes(),
        })
        .collect()
}

const EXPLORATORY_PROMPTS: [&str; 3] = [
    "What specific aspect would you like to explore further?",
    "Would you like to see primary sources on this topic?",
    "Are you interested in the timeline of these events?",
];

const READING_LIST_PROMPTS: [&str; 2] = [
    "Would you like a comprehensive reading list on this topic?",
    "Should I email you additional resources for offline study?",
];

/// Follow-up questions to offer after an answer.
///
/// None once the daily allowance is running out, so users are not nudged
/// into spending their last queries.
pub fn follow_up_prompts(tier: ResponseTier) -> &'static [&'static str] {
    match tier {
        ResponseTier::DailyLimitApproaching | ResponseTier::DailyLimitReached => &[],
        ResponseTier::RepeatedTopic => &READING_LIST_PROMPTS,
        ResponseTier::FirstQuery | ResponseTier::FollowUp => &EXPLORATORY_PROMPTS,
    }
}
