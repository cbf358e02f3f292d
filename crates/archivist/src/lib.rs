//! Archivist - usage-tiered answers for a historical research assistant
//!
//! Archivist decides how deep each answer may go. Every user gets a daily
//! query allowance; the first question on a topic gets a long, sourced
//! answer, follow-ups get shorter ones, and as the allowance runs out the
//! answers give way to reading lists and a summary of the day.
//!
//! # Quick Start
//!
//! ```rust
//! use archivist::{
//!     InMemoryUsageStore, LimitConfig, ResponseTier, ShapedResponse, TierPolicyEngine,
//!     extract_topic,
//! };
//! use chrono::{TimeZone, Utc};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let engine = TierPolicyEngine::new(LimitConfig::default(), InMemoryUsageStore::new());
//! let now = Utc.with_ymd_and_hms(2024, 6, 16, 9, 0, 0).unwrap();
//!
//! let topic = extract_topic("What happened in Soweto on 16 June 1976?");
//! let session = engine.begin("reader-1", Some(topic.as_str()), now)?;
//! assert_eq!(session.tier(), ResponseTier::FirstQuery);
//!
//! let generated = "Students marched against Afrikaans-medium instruction.";
//! let response = ShapedResponse::new(session.tier(), session.policy().clone(), session.topic(), generated);
//! session.finish(*response.word_count(), now)?;
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! Archivist is organized as a workspace with focused crates:
//!
//! - `archivist_error` - Error types
//! - `archivist_core` - Tiers, policies, usage records and limits
//! - `archivist_storage` - Usage stores (in-memory and JSON files)
//! - `archivist_tier` - Tier rules, the policy engine and configuration
//! - `archivist_response` - Topic extraction and answer shaping
//!
//! This crate (`archivist`) re-exports everything for convenience.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

// Error types
pub use archivist_error::{
    ArchivistError, ArchivistErrorKind, ArchivistResult, ConfigError, ConfigErrorKind, JsonError,
    StorageError, StorageErrorKind,
};

// Core data model
pub use archivist_core::{
    LimitConfig, LimitConfigBuilder, QueryUsage, ResponseTier, TierPolicy, TopicCount,
    UsageRecord, UsageSummary, WordLimits, normalize_topic,
};

// Storage
pub use archivist_storage::{FileUsageStore, InMemoryUsageStore, UsageStore};

// Tier engine and configuration
pub use archivist_tier::{
    ArchivistConfig, QuerySession, RuleContext, StorageConfig, TIER_RULES, TierPolicyEngine,
    TierRule, TopicConfig, select_tier, shape_policy,
};

// Response shaping
pub use archivist_response::{
    Achievement, LearningStep, ReadingItem, ReadingKind, SessionSummary, ShapedResponse,
    TopicExtractor, compose_answer, count_words, extract_topic, follow_up_prompts,
    learning_path, suggested_reading, summarize_session, truncate_to_word_limit,
};
