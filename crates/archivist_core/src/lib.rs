//! Core data types for the Archivist usage-tiering engine.
//!
//! This crate provides the value types shared by the storage backends, the
//! tier engine and the response helpers: the closed set of response tiers,
//! the limits that drive tier selection, the per-user daily usage record, and
//! the policy handed back to callers before they generate an answer.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod limits;
mod policy;
mod tier;
mod usage;

pub use limits::{LimitConfig, LimitConfigBuilder, WordLimits};
pub use policy::TierPolicy;
pub use tier::ResponseTier;
pub use usage::{QueryUsage, TopicCount, UsageRecord, UsageSummary, normalize_topic};
