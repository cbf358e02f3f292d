use archivist_core::{QueryUsage, UsageRecord, UsageSummary};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

fn at(hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, hour, 0, 0).unwrap()
}

fn record_queries(record: &mut UsageRecord, topic: &str, times: u32) {
    for _ in 0..times {
        record.apply(&QueryUsage::new(Some(topic), 10, at(8)));
    }
}

#[test]
fn test_new_record_is_zeroed() {
    let record = UsageRecord::new("u1", day());
    assert_eq!(*record.queries_count(), 0);
    assert_eq!(*record.words_count(), 0);
    assert!(record.topics().is_empty());
    assert!(record.topic_queries().is_empty());
    assert_eq!(*record.last_query_time(), None);
    assert!(record.is_for(day()));
}

#[test]
fn test_apply_tracks_topic_counts() {
    let mut record = UsageRecord::new("u1", day());
    record.apply(&QueryUsage::new(Some("mandela"), 480, at(9)));
    record.apply(&QueryUsage::new(Some("mandela"), 290, at(10)));
    record.apply(&QueryUsage::new(Some("soweto"), 100, at(11)));

    assert_eq!(*record.queries_count(), 3);
    assert_eq!(*record.words_count(), 870);
    assert_eq!(record.queries_on("mandela"), 2);
    assert_eq!(record.queries_on("soweto"), 1);
    assert_eq!(record.topics(), &vec!["mandela".to_string(), "soweto".to_string()]);
    assert_eq!(*record.last_query_time(), Some(at(11)));

    let per_topic: u32 = record.topic_queries().values().sum();
    assert_eq!(per_topic, *record.queries_count());
}

#[test]
fn test_blank_topic_counts_toward_totals_only() {
    let mut record = UsageRecord::new("u1", day());
    record.apply(&QueryUsage::new(Some(""), 40, at(9)));
    record.apply(&QueryUsage::new(Some("   "), 40, at(9)));
    record.apply(&QueryUsage::new(None, 40, at(9)));

    assert_eq!(*record.queries_count(), 3);
    assert_eq!(*record.words_count(), 120);
    assert!(record.topics().is_empty());
    assert!(record.topic_queries().is_empty());
}

#[test]
fn test_topics_are_compared_as_given() {
    let mut record = UsageRecord::new("u1", day());
    record.apply(&QueryUsage::new(Some("Mandela"), 1, at(9)));
    record.apply(&QueryUsage::new(Some("mandela"), 1, at(9)));

    assert_eq!(record.topics().len(), 2);
    assert_eq!(record.queries_on("Mandela"), 1);
}

#[test]
fn test_top_topics_orders_by_count_then_first_seen() {
    let mut record = UsageRecord::new("u1", day());
    record_queries(&mut record, "a", 3);
    record_queries(&mut record, "b", 5);
    record_queries(&mut record, "c", 5);
    record_queries(&mut record, "d", 1);

    let order: Vec<String> = record.top_topics(5).into_iter().map(|t| t.topic).collect();
    assert_eq!(order, vec!["b", "c", "a", "d"]);
}

#[test]
fn test_top_topics_truncates() {
    let mut record = UsageRecord::new("u1", day());
    for topic in ["t1", "t2", "t3", "t4", "t5", "t6", "t7"] {
        record_queries(&mut record, topic, 1);
    }
    record_queries(&mut record, "t7", 1);

    let top = record.top_topics(5);
    assert_eq!(top.len(), 5);
    assert_eq!(top[0].topic, "t7");
    assert_eq!(top[0].queries, 2);
    assert_eq!(top[1].topic, "t1");
}

#[test]
fn test_summary_clamps_remaining_queries() {
    let mut record = UsageRecord::new("u1", day());
    record_queries(&mut record, "anc", 4);

    let summary = UsageSummary::from_record(&record, 3);
    assert_eq!(summary.queries_today, 4);
    assert_eq!(summary.words_received, 40);
    assert_eq!(summary.topics_explored, 1);
    assert_eq!(summary.daily_limit, 3);
    assert_eq!(summary.queries_remaining, 0);
}

#[test]
fn test_record_survives_json_round_trip() {
    let mut record = UsageRecord::new("u1", day());
    record_queries(&mut record, "colonial", 2);

    let json = serde_json::to_string(&record).unwrap();
    let restored: UsageRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, record);
}
