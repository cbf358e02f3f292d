//! Tests for topic extraction and answer shaping.

use archivist_core::{ResponseTier, TierPolicy, TopicCount, UsageSummary};
use archivist_response::{
    Achievement, ReadingKind, ShapedResponse, TopicExtractor, compose_answer, count_words,
    extract_topic, follow_up_prompts, learning_path, slugify, suggested_reading,
    summarize_session, title_case, truncate_to_word_limit,
};

#[test]
fn test_keyword_priority_follows_list_order() {
    // Both "soweto" and "1976" occur; "soweto" comes first in the list
    assert_eq!(extract_topic("1976 and the Soweto students"), "soweto");
    assert_eq!(extract_topic("MANDELA's release"), "mandela");
}

#[test]
fn test_fallback_takes_first_three_words() {
    assert_eq!(extract_topic("  The   Great Trek of 1838 "), "The Great Trek");
    assert_eq!(extract_topic("Biko"), "Biko");
    assert_eq!(extract_topic(""), "");
    assert_eq!(extract_topic("   "), "");
}

#[test]
fn test_custom_keywords_are_normalized() {
    let extractor = TopicExtractor::with_keywords([" Sharpeville ", "", "Rivonia"]);
    assert_eq!(extractor.keywords(), ["sharpeville", "rivonia"]);
    assert_eq!(extractor.extract("The Rivonia Trial"), "rivonia");
    assert_eq!(extractor.extract("Who was Mandela?"), "Who was Mandela?");
}

#[test]
fn test_word_counting() {
    assert_eq!(count_words(""), 0);
    assert_eq!(count_words("  one\ttwo\nthree  "), 3);
}

#[test]
fn test_truncation() {
    let text = "a b c d e f";
    assert_eq!(truncate_to_word_limit(text, 6), text);
    assert_eq!(truncate_to_word_limit(text, 10), text);
    assert_eq!(truncate_to_word_limit(text, 4), "a b c d...");
    assert_eq!(truncate_to_word_limit("a\n\nb   c", 2), "a b...");
    assert_eq!(truncate_to_word_limit(text, 0), "");
}

#[test]
fn test_title_case_and_slug() {
    assert_eq!(title_case("soweto UPRISING 1976"), "Soweto Uprising 1976");
    assert_eq!(slugify("The ANC's Freedom Charter!"), "the-anc-s-freedom-charter");
    assert_eq!(slugify("  --  "), "");
}

#[test]
fn test_suggested_reading() {
    let items = suggested_reading("mandela", 20);
    assert_eq!(items.len(), 3);

    let kinds: Vec<ReadingKind> = items.iter().map(|item| *item.kind()).collect();
    assert_eq!(
        kinds,
        vec![ReadingKind::Article, ReadingKind::Timeline, ReadingKind::Archive]
    );
    assert_eq!(items[0].title(), "Complete Guide to Mandela");
    assert_eq!(items[0].url(), "https://sahistory.org.za/topic/mandela");
    assert_eq!(items[1].title(), "Timeline: Key Events in Mandela");
    assert_eq!(items[2].title(), "Primary Sources: Mandela");
    assert_eq!(items[2].url(), "https://sahistory.org.za/archive/mandela");
    assert_eq!(*items[2].reading_minutes(), 30);

    assert_eq!(suggested_reading("mandela", 1).len(), 1);
    assert!(suggested_reading("mandela", 0).is_empty());
    assert!(suggested_reading("", 5).is_empty());
}

#[test]
fn test_follow_up_prompts_by_tier() {
    assert!(follow_up_prompts(ResponseTier::DailyLimitReached).is_empty());
    assert!(follow_up_prompts(ResponseTier::DailyLimitApproaching).is_empty());
    assert_eq!(follow_up_prompts(ResponseTier::RepeatedTopic).len(), 2);
    assert_eq!(follow_up_prompts(ResponseTier::FollowUp).len(), 3);
    assert_eq!(
        follow_up_prompts(ResponseTier::FirstQuery),
        follow_up_prompts(ResponseTier::FollowUp)
    );
}

#[test]
fn test_compose_without_message() {
    let policy = TierPolicy::new(2, true, 3, 20);
    assert_eq!(compose_answer(&policy, "one two three"), "one two...");
}

#[test]
fn test_compose_refused_answer_is_message_only() {
    let policy = TierPolicy::new(0, false, 20, 0).with_message("Come back tomorrow.".to_string());
    assert_eq!(compose_answer(&policy, "ignored body"), "Come back tomorrow.");

    let silent = TierPolicy::new(0, false, 20, 0);
    assert_eq!(compose_answer(&silent, "ignored body"), "");
}

#[test]
fn test_shaped_response_counts_body_words_only() {
    let policy = TierPolicy::new(4, false, 10, 5).with_message("Note this.".to_string());
    let response = ShapedResponse::new(
        ResponseTier::RepeatedTopic,
        policy,
        Some("apartheid"),
        "one two three four five six",
    );
    assert_eq!(response.answer(), "Note this.\n\none two three four...");
    assert_eq!(*response.word_count(), 4);
    assert_eq!(response.suggested_reading().len(), 3);
    assert_eq!(response.follow_up_questions().len(), 2);
}

#[test]
fn test_refused_response_reads_general_topic() {
    let policy = TierPolicy::new(0, false, 20, 0).with_message("Done for today.".to_string());
    let response = ShapedResponse::new(ResponseTier::DailyLimitReached, policy, None, "");
    assert_eq!(response.answer(), "Done for today.");
    assert_eq!(*response.word_count(), 0);
    assert!(response.follow_up_questions().is_empty());
    assert_eq!(
        response.suggested_reading()[0].url(),
        "https://sahistory.org.za/topic/general"
    );
}

#[test]
fn test_shaped_response_serializes_policy() {
    let policy = TierPolicy::new(500, true, 3, 20);
    let response = ShapedResponse::new(ResponseTier::FirstQuery, policy, Some("anc"), "text");
    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["tier"], "first_query");
    assert_eq!(json["policy"]["suggest_articles"], 3);
    assert_eq!(json["suggested_reading"][0]["kind"], "article");
}

fn topic(name: &str, queries: u32) -> TopicCount {
    TopicCount {
        topic: name.to_string(),
        queries,
    }
}

#[test]
fn test_learning_path_takes_top_three() {
    let top = vec![
        topic("soweto", 5),
        topic("anc", 4),
        topic("mandela", 2),
        topic("colonial", 1),
    ];
    let path = learning_path(&top);
    assert_eq!(path.len(), 3);
    assert_eq!(path[0].topic(), "soweto");
    assert_eq!(path[0].title(), "Continue with Soweto");
    assert_eq!(path[0].url(), "https://sahistory.org.za/topic/soweto");
    assert_eq!(path[0].next_steps().len(), 3);
    assert!(learning_path(&[]).is_empty());
}

#[test]
fn test_session_summary_achievements() {
    let stats = UsageSummary {
        queries_today: 20,
        words_received: 4000,
        topics_explored: 3,
        top_topics: vec![topic("soweto", 10), topic("anc", 6), topic("mandela", 4)],
        daily_limit: 20,
        queries_remaining: 0,
    };
    let session = summarize_session(stats.clone());
    assert_eq!(session.stats, stats);
    assert_eq!(session.learning_path.len(), 3);
    assert_eq!(
        session.achievements,
        vec![
            Achievement::ResearchEnthusiast,
            Achievement::KnowledgeSeeker,
            Achievement::DailyGoalAchieved,
        ]
    );
    assert_eq!(
        Achievement::KnowledgeSeeker.to_string(),
        "Knowledge Seeker: Explored 3+ topics!"
    );
}

#[test]
fn test_quiet_day_has_no_achievements() {
    let session = summarize_session(UsageSummary {
        queries_today: 0,
        words_received: 0,
        topics_explored: 0,
        top_topics: Vec::new(),
        daily_limit: 20,
        queries_remaining: 20,
    });
    assert!(session.learning_path.is_empty());
    assert!(session.achievements.is_empty());
}
