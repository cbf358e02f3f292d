//! Ordered tier rules and the policy each tier produces.
//!
//! Rules are checked from most to least severe and the first match wins.
//! The query being classified counts toward the soft thresholds: with a
//! daily allowance of 20 the warning starts on the 16th query of the day,
//! and with 10 follow-ups per topic the 10th question on one topic is
//! redirected to reading material. The hard limit only counts completed
//! queries, so all 20 queries get an answer.

use archivist_core::{LimitConfig, ResponseTier, TierPolicy, UsageRecord};
use tracing::debug;

const FOLLOW_UP_MESSAGE: &str =
    "Here's more information on this topic. Check the suggested articles for deeper insights.";

/// What a rule gets to look at.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    /// Today's usage before the query being classified
    pub record: &'a UsageRecord,
    /// Normalized topic of the query being classified
    pub topic: Option<&'a str>,
    /// Limits in force
    pub limits: &'a LimitConfig,
}

impl RuleContext<'_> {
    /// Completed queries today.
    pub fn completed(&self) -> u32 {
        *self.record.queries_count()
    }

    /// The topic, if it was already queried today.
    pub fn known_topic(&self) -> Option<&str> {
        self.topic.filter(|topic| self.record.has_topic(topic))
    }
}

/// One entry of the decision list.
#[derive(Debug, Clone, Copy)]
pub struct TierRule {
    /// Tier selected when the rule matches
    pub tier: ResponseTier,
    /// Condition, for logs and docs
    pub condition: &'static str,
    matches: fn(&RuleContext<'_>) -> bool,
}

impl TierRule {
    /// Whether this rule fires for `ctx`.
    pub fn matches(&self, ctx: &RuleContext<'_>) -> bool {
        (self.matches)(ctx)
    }
}

/// The decision list, most severe first. The last rule always matches.
pub static TIER_RULES: [TierRule; 5] = [
    TierRule {
        tier: ResponseTier::DailyLimitReached,
        condition: "completed queries >= daily_queries",
        matches: |ctx| ctx.completed() >= *ctx.limits.daily_queries(),
    },
    TierRule {
        tier: ResponseTier::DailyLimitApproaching,
        condition: "this query reaches approaching_percent of daily_queries",
        matches: |ctx| ctx.limits.reaches_warning_share(ctx.completed().saturating_add(1)),
    },
    TierRule {
        tier: ResponseTier::RepeatedTopic,
        condition: "known topic and this query reaches follow_ups_per_topic",
        matches: |ctx| {
            ctx.known_topic().is_some_and(|topic| {
                ctx.record.queries_on(topic).saturating_add(1) >= *ctx.limits.follow_ups_per_topic()
            })
        },
    },
    TierRule {
        tier: ResponseTier::FollowUp,
        condition: "known topic",
        matches: |ctx| ctx.known_topic().is_some(),
    },
    TierRule {
        tier: ResponseTier::FirstQuery,
        condition: "new topic or no topic",
        matches: |_| true,
    },
];

/// First tier in [`TIER_RULES`] whose rule matches.
pub fn select_tier(ctx: &RuleContext<'_>) -> ResponseTier {
    let rule = TIER_RULES.iter().find(|rule| rule.matches(ctx));
    match rule {
        Some(rule) => {
            debug!(tier = %rule.tier, condition = rule.condition, "Tier rule matched");
            rule.tier
        }
        None => ResponseTier::FirstQuery,
    }
}

/// Reading items recommended under each tier.
fn suggested_articles(tier: ResponseTier) -> u32 {
    match tier {
        ResponseTier::FirstQuery => 3,
        ResponseTier::FollowUp => 5,
        ResponseTier::RepeatedTopic => 10,
        ResponseTier::DailyLimitApproaching => 15,
        ResponseTier::DailyLimitReached => 20,
    }
}

/// Builds the policy for `tier` from the usage in `ctx`.
pub fn shape_policy(tier: ResponseTier, ctx: &RuleContext<'_>) -> TierPolicy {
    let completed = ctx.completed();
    let remaining = ctx.limits.remaining_queries(completed);
    let word_limit = ctx.limits.word_limit(tier);
    let articles = suggested_articles(tier);

    match tier {
        ResponseTier::FirstQuery => TierPolicy::new(word_limit, true, articles, remaining),
        ResponseTier::FollowUp => TierPolicy::new(word_limit, true, articles, remaining)
            .with_message(FOLLOW_UP_MESSAGE.to_string()),
        ResponseTier::RepeatedTopic => TierPolicy::new(word_limit, false, articles, remaining)
            .with_message(format!(
                "You've explored '{}' extensively today! Here are comprehensive resources for deeper research.",
                ctx.topic.unwrap_or_default()
            ))
            .with_redirect_to_articles(true),
        ResponseTier::DailyLimitApproaching => {
            let noun = if remaining == 1 { "query" } else { "queries" };
            TierPolicy::new(word_limit, false, articles, remaining)
                .with_message(format!(
                    "You have {remaining} {noun} remaining today. Save these resources for continued research."
                ))
                .with_show_download_option(true)
        }
        ResponseTier::DailyLimitReached => {
            let topics = ctx.record.topics().clone();
            let mut message = format!(
                "You've completed {completed} queries today! Well done on your research. \
                 Here's a summary of your learning journey and resources for tomorrow."
            );
            if !topics.is_empty() {
                message.push_str(&format!(" Topics explored: {}.", topics.join(", ")));
            }
            TierPolicy::new(0, false, articles, 0)
                .with_message(message)
                .with_show_summary(true)
                .with_topics_explored(topics)
                .with_comeback_tomorrow(true)
        }
    }
}
