//! End-to-end tests through the facade crate.

use archivist::{
    Achievement, ArchivistConfig, FileUsageStore, LimitConfig, ResponseTier, ShapedResponse,
    TierPolicyEngine, TopicExtractor, summarize_session,
};
use chrono::{DateTime, TimeZone, Utc};
use tempfile::TempDir;

fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 16, hour, minute, 0).unwrap()
}

/// Stand-in for the generation step: a body of `words` words.
fn generate(words: usize) -> String {
    vec!["word"; words].join(" ")
}

#[test]
fn test_research_day_end_to_end() {
    let temp_dir = TempDir::new().unwrap();
    let config = ArchivistConfig::default();
    let engine =
        TierPolicyEngine::from_config(&config, FileUsageStore::new(temp_dir.path()).unwrap())
            .unwrap();
    let extractor = TopicExtractor::with_keywords(&config.topics.keywords);

    let queries = [
        "Tell me about Mandela's early life",
        "What did Mandela do at Rivonia?",
        "Why did the Soweto students march in 1976?",
    ];
    let mut tiers = Vec::new();
    for (minute, query) in queries.iter().enumerate() {
        let now = at(9, minute as u32);
        let topic = extractor.extract(query);
        let session = engine.begin("reader", Some(topic.as_str()), now).unwrap();
        let response = ShapedResponse::new(
            session.tier(),
            session.policy().clone(),
            session.topic(),
            &generate(1000),
        );
        assert!(*response.word_count() <= u64::from(*session.policy().word_limit()));
        tiers.push(*response.tier());
        session.finish(*response.word_count(), now).unwrap();
    }
    assert_eq!(
        tiers,
        vec![
            ResponseTier::FirstQuery,
            ResponseTier::FollowUp,
            ResponseTier::FirstQuery,
        ]
    );

    let session = summarize_session(engine.stats("reader", at(12, 0)).unwrap());
    assert_eq!(session.stats.queries_today, 3);
    assert_eq!(session.stats.words_received, 500 + 300 + 500);
    assert_eq!(session.learning_path[0].topic(), "mandela");
    assert!(session.achievements.is_empty());
}

#[test]
fn test_exhausted_allowance_is_refused_and_summarized() {
    let temp_dir = TempDir::new().unwrap();
    let engine = TierPolicyEngine::new(
        LimitConfig::builder().daily_queries(10).build(),
        FileUsageStore::new(temp_dir.path()).unwrap(),
    );

    for minute in 0..10 {
        let topic = ["anc", "soweto", "colonial"][minute % 3];
        let session = engine.begin("reader", Some(topic), at(10, minute as u32)).unwrap();
        assert!(session.policy().allows_answer());
        session.finish(50, at(10, minute as u32)).unwrap();
    }

    let session = engine.begin("reader", Some("anc"), at(11, 0)).unwrap();
    assert_eq!(session.tier(), ResponseTier::DailyLimitReached);
    let response = ShapedResponse::new(
        session.tier(),
        session.policy().clone(),
        session.topic(),
        "never shown",
    );
    assert!(response.answer().starts_with("You've completed 10 queries today!"));
    assert!(response.follow_up_questions().is_empty());
    session.finish(*response.word_count(), at(11, 0)).unwrap();

    let summary = summarize_session(engine.stats("reader", at(11, 5)).unwrap());
    assert_eq!(summary.stats.queries_today, 10);
    assert_eq!(summary.stats.queries_remaining, 0);
    assert_eq!(
        summary.achievements,
        vec![
            Achievement::ResearchEnthusiast,
            Achievement::KnowledgeSeeker,
            Achievement::DailyGoalAchieved,
        ]
    );
}
