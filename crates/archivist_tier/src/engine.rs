//! The tier policy engine.

use crate::config::ArchivistConfig;
use crate::rules::{RuleContext, select_tier, shape_policy};
use archivist_core::{
    LimitConfig, QueryUsage, ResponseTier, TierPolicy, UsageRecord, UsageSummary, normalize_topic,
};
use archivist_error::ArchivistResult;
use archivist_storage::UsageStore;
use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use parking_lot::lock_api::ArcMutexGuard;
use parking_lot::{Mutex, RawMutex};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Maps usage to response policies and records what was delivered.
///
/// The engine never reads the clock: every operation takes `now`, which is
/// converted to a calendar day in the configured timezone (UTC unless set).
///
/// `classify` and `record` each take the user's session lock for their own
/// duration only. A caller that needs the pair to be atomic against other
/// requests from the same user should use [`begin`](Self::begin) instead,
/// and must not call `classify` or `record` for that user on the same thread
/// while the session is alive.
///
/// A user's lock exists only while one of their requests is in flight, so
/// the table of locks stays as small as the number of concurrent users.
pub struct TierPolicyEngine<S> {
    limits: LimitConfig,
    timezone: Tz,
    store: S,
    sessions: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl<S> TierPolicyEngine<S> {
    /// Number of users with a request in flight.
    pub fn active_sessions(&self) -> usize {
        self.sessions.lock().len()
    }

    fn session_lock(&self, user_id: &str) -> Arc<Mutex<()>> {
        let mut sessions = self.sessions.lock();
        Arc::clone(sessions.entry(user_id.to_string()).or_default())
    }

    /// Drops the user's lock once nobody holds or waits on it.
    ///
    /// Handles are only cloned under the table lock, so a count of one here
    /// means the table owns the last handle.
    fn release_session(&self, user_id: &str) {
        let mut sessions = self.sessions.lock();
        if sessions
            .get(user_id)
            .is_some_and(|lock| Arc::strong_count(lock) == 1)
        {
            sessions.remove(user_id);
        }
    }

    fn with_session<T>(&self, user_id: &str, f: impl FnOnce() -> T) -> T {
        let result = {
            let lock = self.session_lock(user_id);
            let _guard = lock.lock();
            f()
        };
        self.release_session(user_id);
        result
    }
}

impl<S: UsageStore> TierPolicyEngine<S> {
    /// Creates an engine over `store`, with days ending at UTC midnight.
    pub fn new(limits: LimitConfig, store: S) -> Self {
        Self {
            limits,
            timezone: Tz::UTC,
            store,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Sets the timezone whose midnight ends the usage day.
    pub fn with_timezone(mut self, timezone: Tz) -> Self {
        self.timezone = timezone;
        self
    }

    /// Creates an engine from loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration fails validation.
    pub fn from_config(config: &ArchivistConfig, store: S) -> ArchivistResult<Self> {
        config.validate()?;
        Ok(Self::new(config.limits.clone(), store).with_timezone(config.timezone))
    }

    /// Limits in force.
    pub fn limits(&self) -> &LimitConfig {
        &self.limits
    }

    /// Reference timezone.
    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Calendar day of `now` in the reference timezone.
    pub fn day_of(&self, now: DateTime<Utc>) -> NaiveDate {
        now.with_timezone(&self.timezone).date_naive()
    }

    fn evaluate(
        &self,
        user_id: &str,
        topic: Option<&str>,
        now: DateTime<Utc>,
    ) -> ArchivistResult<(ResponseTier, TierPolicy)> {
        let record = self.store.get_or_create(user_id, self.day_of(now))?;
        let ctx = RuleContext {
            record: &record,
            topic: normalize_topic(topic),
            limits: &self.limits,
        };
        let tier = select_tier(&ctx);
        let policy = shape_policy(tier, &ctx);

        if tier.is_daily_limit() {
            info!(
                user_id,
                %tier,
                queries = *record.queries_count(),
                remaining = *policy.remaining_queries(),
                "Daily allowance nearly or fully used"
            );
        } else {
            debug!(user_id, %tier, word_limit = *policy.word_limit(), "Classified query");
        }
        Ok((tier, policy))
    }

    fn commit(
        &self,
        user_id: &str,
        topic: Option<&str>,
        word_count: u64,
        now: DateTime<Utc>,
    ) -> ArchivistResult<UsageRecord> {
        let usage = QueryUsage::new(normalize_topic(topic), word_count, now);
        self.store.commit(user_id, self.day_of(now), &usage)
    }

    /// Picks the tier and policy for the next query from `user_id`.
    ///
    /// Creates today's record if there is none. Does not count the query.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    #[instrument(skip(self))]
    pub fn classify(
        &self,
        user_id: &str,
        topic: Option<&str>,
        now: DateTime<Utc>,
    ) -> ArchivistResult<(ResponseTier, TierPolicy)> {
        self.with_session(user_id, || self.evaluate(user_id, topic, now))
    }

    /// Counts one delivered answer of `word_count` words.
    ///
    /// Pass the same topic that was given to [`classify`](Self::classify).
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    #[instrument(skip(self))]
    pub fn record(
        &self,
        user_id: &str,
        topic: Option<&str>,
        word_count: u64,
        now: DateTime<Utc>,
    ) -> ArchivistResult<UsageRecord> {
        self.with_session(user_id, || self.commit(user_id, topic, word_count, now))
    }

    /// Today's usage summary for `user_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    #[instrument(skip(self))]
    pub fn stats(&self, user_id: &str, now: DateTime<Utc>) -> ArchivistResult<UsageSummary> {
        let record = self.with_session(user_id, || {
            self.store.get_or_create(user_id, self.day_of(now))
        })?;
        Ok(UsageSummary::from_record(&record, *self.limits.daily_queries()))
    }

    /// Classifies a query and keeps the user locked until it is finished.
    ///
    /// Other requests from the same user wait until the returned session is
    /// finished or dropped. Other users are not affected.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    #[instrument(skip(self))]
    pub fn begin(
        &self,
        user_id: &str,
        topic: Option<&str>,
        now: DateTime<Utc>,
    ) -> ArchivistResult<QuerySession<'_, S>> {
        let guard = self.session_lock(user_id).lock_arc();
        let (tier, policy) = match self.evaluate(user_id, topic, now) {
            Ok(decision) => decision,
            Err(e) => {
                drop(guard);
                self.release_session(user_id);
                return Err(e);
            }
        };
        Ok(QuerySession {
            engine: self,
            guard: Some(guard),
            user_id: user_id.to_string(),
            topic: normalize_topic(topic).map(str::to_string),
            tier,
            policy,
        })
    }
}

/// One query between classification and recording.
///
/// Dropping a session without calling [`finish`](Self::finish) releases the
/// user without counting the query.
pub struct QuerySession<'a, S> {
    engine: &'a TierPolicyEngine<S>,
    guard: Option<ArcMutexGuard<RawMutex, ()>>,
    user_id: String,
    topic: Option<String>,
    tier: ResponseTier,
    policy: TierPolicy,
}

impl<S: UsageStore> QuerySession<'_, S> {
    /// User the session belongs to.
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Normalized topic, as it will be recorded.
    pub fn topic(&self) -> Option<&str> {
        self.topic.as_deref()
    }

    /// Selected tier.
    pub fn tier(&self) -> ResponseTier {
        self.tier
    }

    /// Policy for the answer.
    pub fn policy(&self) -> &TierPolicy {
        &self.policy
    }

    /// Records the delivered answer and releases the user.
    ///
    /// A refused query (one whose policy allows no answer) is not counted;
    /// the current record is returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read or written.
    pub fn finish(self, word_count: u64, now: DateTime<Utc>) -> ArchivistResult<UsageRecord> {
        if !self.policy.allows_answer() {
            debug!(user_id = %self.user_id, "Refused query not counted");
            return self
                .engine
                .store
                .get_or_create(&self.user_id, self.engine.day_of(now));
        }
        self.engine
            .commit(&self.user_id, self.topic.as_deref(), word_count, now)
    }
}

impl<S> Drop for QuerySession<'_, S> {
    fn drop(&mut self) {
        self.guard.take();
        self.engine.release_session(&self.user_id);
    }
}
