use archivist_core::{LimitConfig, ResponseTier, TierPolicy, WordLimits};
use archivist_error::ConfigErrorKind;
use strum::IntoEnumIterator;

#[test]
fn test_defaults_match_documented_values() {
    let limits = LimitConfig::default();
    assert_eq!(*limits.daily_queries(), 20);
    assert_eq!(*limits.daily_words(), 5000);
    assert_eq!(*limits.daily_topics(), 5);
    assert_eq!(*limits.follow_ups_per_topic(), 10);
    assert_eq!(*limits.approaching_percent(), 80);

    let budgets: Vec<u32> = ResponseTier::iter().map(|t| limits.word_limit(t)).collect();
    assert_eq!(budgets, vec![500, 300, 150, 100, 50]);
}

#[test]
fn test_builder_overrides_only_what_is_set() {
    let limits = LimitConfig::builder()
        .daily_queries(5)
        .word_limits(WordLimits {
            first_query: 800,
            ..WordLimits::default()
        })
        .build();

    assert_eq!(*limits.daily_queries(), 5);
    assert_eq!(*limits.follow_ups_per_topic(), 10); // Default
    assert_eq!(limits.word_limit(ResponseTier::FirstQuery), 800);
    assert_eq!(limits.word_limit(ResponseTier::FollowUp), 300);
}

#[test]
fn test_warning_share_is_exact() {
    let limits = LimitConfig::default();
    assert!(!limits.reaches_warning_share(15));
    assert!(limits.reaches_warning_share(16));
    assert!(limits.reaches_warning_share(20));

    let odd = LimitConfig::builder().daily_queries(7).build();
    // 80% of 7 is 5.6
    assert!(!odd.reaches_warning_share(5));
    assert!(odd.reaches_warning_share(6));
}

#[test]
fn test_remaining_queries_clamps_at_zero() {
    let limits = LimitConfig::default();
    assert_eq!(limits.remaining_queries(0), 20);
    assert_eq!(limits.remaining_queries(19), 1);
    assert_eq!(limits.remaining_queries(25), 0);
}

#[test]
fn test_validate_rejects_unusable_limits() {
    assert!(LimitConfig::builder().daily_queries(0).build().validate().is_err());
    assert!(
        LimitConfig::builder()
            .follow_ups_per_topic(0)
            .build()
            .validate()
            .is_err()
    );
    assert!(
        LimitConfig::builder()
            .approaching_percent(101)
            .build()
            .validate()
            .is_err()
    );
    let no_answers = WordLimits {
        first_query: 0,
        ..WordLimits::default()
    };
    assert!(
        LimitConfig::builder()
            .word_limits(no_answers)
            .build()
            .validate()
            .is_err()
    );
}

#[test]
fn test_validate_accepts_defaults() {
    assert!(LimitConfig::default().validate().is_ok());
}

#[test]
fn test_tiers_ascend_in_severity() {
    let tiers: Vec<ResponseTier> = ResponseTier::iter().collect();
    let mut sorted = tiers.clone();
    sorted.sort();
    assert_eq!(tiers, sorted);
    assert!(ResponseTier::DailyLimitApproaching.is_daily_limit());
    assert!(!ResponseTier::RepeatedTopic.is_daily_limit());
    assert!(ResponseTier::DailyLimitReached.is_terminal());
}

#[test]
fn test_policy_omits_absent_extras_when_serialized() {
    let policy = TierPolicy::new(500, true, 3, 20);
    let json = serde_json::to_value(&policy).unwrap();

    assert_eq!(json["word_limit"], 500);
    assert_eq!(json["suggest_articles"], 3);
    assert!(json["message"].is_null());
    assert!(json.get("redirect_to_articles").is_none());
    assert!(json.get("comeback_tomorrow").is_none());
}

#[test]
fn test_policy_with_summary_extras() {
    let policy = TierPolicy::new(0, false, 20, 0)
        .with_show_summary(true)
        .with_comeback_tomorrow(true)
        .with_topics_explored(vec!["anc".to_string()]);

    assert!(!policy.allows_answer());
    assert_eq!(*policy.show_summary(), Some(true));
    assert_eq!(policy.topics_explored().as_deref(), Some(&["anc".to_string()][..]));
}

#[test]
fn test_validate_names_the_rejected_setting() {
    let err = LimitConfig::builder()
        .approaching_percent(0)
        .build()
        .validate()
        .unwrap_err();
    match err.kind {
        ConfigErrorKind::InvalidValue { key, reason } => {
            assert_eq!(key, "limits.approaching_percent");
            assert!(reason.contains("got 0"));
        }
        other => panic!("expected an invalid value, got {other:?}"),
    }
}
