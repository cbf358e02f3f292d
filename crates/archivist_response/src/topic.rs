//! Best-effort topic extraction.

use tracing::debug;

const DEFAULT_KEYWORDS: [&str; 7] = [
    "apartheid",
    "soweto",
    "1976",
    "mandela",
    "anc",
    "struggle",
    "colonial",
];

/// Words taken from the query when no keyword matches.
const FALLBACK_WORDS: usize = 3;

/// Maps free-text queries to topic strings.
///
/// The first keyword (in list order) that occurs anywhere in the lowercased
/// query wins. Otherwise the topic is the query's first three words.
///
/// ```
/// use archivist_response::TopicExtractor;
///
/// let extractor = TopicExtractor::default();
/// assert_eq!(extractor.extract("What happened in Soweto in 1976?"), "soweto");
/// assert_eq!(extractor.extract("Who was Steve Biko?"), "Who was Steve");
///
/// let custom = TopicExtractor::with_keywords(["Sharpeville"]);
/// assert_eq!(custom.extract("the sharpeville massacre"), "sharpeville");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicExtractor {
    keywords: Vec<String>,
}

impl Default for TopicExtractor {
    fn default() -> Self {
        Self::with_keywords(DEFAULT_KEYWORDS)
    }
}

impl TopicExtractor {
    /// Creates an extractor for `keywords`, matched in the given order.
    pub fn with_keywords<I, K>(keywords: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        let keywords = keywords
            .into_iter()
            .map(|k| k.as_ref().trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        Self { keywords }
    }

    /// Keywords in priority order, lowercased.
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Topic for `query`. An empty query yields an empty topic.
    pub fn extract(&self, query: &str) -> String {
        let lowered = query.to_lowercase();
        if let Some(keyword) = self.keywords.iter().find(|k| lowered.contains(k.as_str())) {
            debug!(keyword = %keyword, "Matched topic keyword");
            return keyword.clone();
        }
        query
            .split_whitespace()
            .take(FALLBACK_WORDS)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// [`TopicExtractor::extract`] with the default keywords.
pub fn extract_topic(query: &str) -> String {
    TopicExtractor::default().extract(query)
}
