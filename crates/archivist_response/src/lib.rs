//! Answer shaping for Archivist.
//!
//! Everything around the tier decision that turns a query into something a
//! reader sees: picking a topic out of the query text, keeping generated
//! text within its word budget, reading suggestions, follow-up prompts and
//! the end-of-day summary.
//!
//! ```
//! use archivist_core::{ResponseTier, TierPolicy};
//! use archivist_response::{ShapedResponse, extract_topic};
//!
//! let topic = extract_topic("Tell me about the ANC Youth League");
//! assert_eq!(topic, "anc");
//!
//! let policy = TierPolicy::new(500, true, 3, 20);
//! let response = ShapedResponse::new(ResponseTier::FirstQuery, policy, Some(topic.as_str()), "Founded in 1944.");
//! assert_eq!(response.answer(), "Founded in 1944.");
//! assert_eq!(response.suggested_reading().len(), 3);
//! assert_eq!(response.follow_up_questions().len(), 3);
//! assert_eq!(*response.word_count(), 3);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod compose;
mod reading;
mod summary;
mod topic;
mod words;

pub use compose::{ShapedResponse, compose_answer};
pub use reading::{
    READING_BASE_URL, ReadingItem, ReadingKind, follow_up_prompts, slugify, suggested_reading,
    title_case,
};
pub use summary::{
    Achievement, LEARNING_PATH_LENGTH, LearningStep, SessionSummary, learning_path,
    summarize_session,
};
pub use topic::{TopicExtractor, extract_topic};
pub use words::{ELLIPSIS, count_words, truncate_to_word_limit};
