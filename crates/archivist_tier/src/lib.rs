//! Usage-tier classification and response policies.
//!
//! This crate decides how deep an answer may go. Before generating, the
//! caller asks [`TierPolicyEngine::classify`] for a [`TierPolicy`]; after
//! generating, it reports the answer's word count with
//! [`TierPolicyEngine::record`]. [`TierPolicyEngine::begin`] wraps both steps
//! in a [`QuerySession`] that keeps the user's queries serialized.
//!
//! Tier selection is an ordered rule list ([`TIER_RULES`]): the first rule
//! that matches wins.
//!
//! ## Configuration
//!
//! [`ArchivistConfig`] layers the bundled `archivist.toml`, user overrides
//! and `ARCHIVIST_*` environment variables.
//!
//! ```
//! use archivist_core::{LimitConfig, ResponseTier};
//! use archivist_storage::InMemoryUsageStore;
//! use archivist_tier::TierPolicyEngine;
//! use chrono::{TimeZone, Utc};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let engine = TierPolicyEngine::new(LimitConfig::default(), InMemoryUsageStore::new());
//! let now = Utc.with_ymd_and_hms(2024, 6, 16, 9, 0, 0).unwrap();
//!
//! let (tier, policy) = engine.classify("reader-1", Some("mandela"), now)?;
//! assert_eq!(tier, ResponseTier::FirstQuery);
//! assert_eq!(*policy.word_limit(), 500);
//!
//! engine.record("reader-1", Some("mandela"), 480, now)?;
//! let (tier, _) = engine.classify("reader-1", Some("mandela"), now)?;
//! assert_eq!(tier, ResponseTier::FollowUp);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod engine;
mod rules;

pub use archivist_core::{ResponseTier, TierPolicy};
pub use config::{ArchivistConfig, StorageConfig, TopicConfig};
pub use engine::{QuerySession, TierPolicyEngine};
pub use rules::{RuleContext, TIER_RULES, TierRule, select_tier, shape_policy};
