//! End-to-end engine tests over a file-backed store

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sharpflip::config::EngineConfig;
use sharpflip::data::{EventIdentity, JsonFileStore, SignalRow};
use sharpflip::engine::FlipEngine;
use sharpflip::flip::FlipType;
use sharpflip::signal::{Side, SplitType};
use std::io::Write;

fn row(
    split_type: SplitType,
    stake: Decimal,
    bet: Decimal,
    minutes_before: i64,
    start: DateTime<Utc>,
) -> SignalRow {
    SignalRow {
        split_type,
        source: "vsin".to_string(),
        book: Some("pinnacle".to_string()),
        stake_pct: stake,
        bet_pct: bet,
        captured_at: start - Duration::minutes(minutes_before),
        event_start_time: start,
    }
}

fn snapshot_file(events: Vec<(EventIdentity, Vec<SignalRow>)>) -> tempfile::NamedTempFile {
    let records: Vec<serde_json::Value> = events
        .into_iter()
        .map(|(event, rows)| {
            serde_json::json!({
                "event": event,
                "rows": rows,
            })
        })
        .collect();
    let body = serde_json::json!({ "events": records });

    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{}", body).unwrap();
    file
}

fn identity(event_id: &str, start_time: DateTime<Utc>) -> EventIdentity {
    EventIdentity {
        event_id: event_id.to_string(),
        home_team: "DAL".to_string(),
        away_team: "NYG".to_string(),
        start_time,
    }
}

#[tokio::test]
async fn test_file_to_detection_pipeline() {
    let start = Utc::now() + Duration::hours(1);
    let rows = vec![
        row(SplitType::Moneyline, dec!(70), dec!(40), 8 * 60, start),
        row(SplitType::Moneyline, dec!(44), dec!(56), 90, start),
    ];
    let file = snapshot_file(vec![(identity("ev1", start), rows)]);

    let store = JsonFileStore::load(file.path(), dec!(12)).unwrap();
    let engine = FlipEngine::new(store, EngineConfig::default()).unwrap();

    let detection = engine.detect_for_event("ev1").await.unwrap().unwrap();
    assert_eq!(detection.flip_type, FlipType::SameMarketFlip);
    assert_eq!(detection.recommendation.side, Side::Home);
    assert_eq!(detection.confidence_score, dec!(65));
    assert!(detection.confidence_score <= dec!(65));
    assert!(detection.early_signal.abs_differential() >= dec!(12));
    assert!(detection.late_signal.abs_differential() >= dec!(12));
}

#[tokio::test]
async fn test_opposing_books_never_pair() {
    // Same shape as a flip, but the late signal comes from another book
    let start = Utc::now() + Duration::hours(1);
    let mut late = row(SplitType::Moneyline, dec!(44), dec!(56), 90, start);
    late.book = Some("draftkings".to_string());
    let rows = vec![
        row(SplitType::Moneyline, dec!(70), dec!(40), 8 * 60, start),
        late,
    ];
    let file = snapshot_file(vec![(identity("ev1", start), rows)]);

    let store = JsonFileStore::load(file.path(), dec!(12)).unwrap();
    let engine = FlipEngine::new(store, EngineConfig::default()).unwrap();

    assert!(engine.detect_for_event("ev1").await.unwrap().is_none());
}

#[tokio::test]
async fn test_recent_scan_over_snapshot_file() {
    let now = Utc::now();
    let start = now + Duration::hours(1);
    let rows = vec![
        row(SplitType::Moneyline, dec!(70), dec!(40), 8 * 60, start),
        row(SplitType::Moneyline, dec!(44), dec!(56), 90, start),
    ];
    let file = snapshot_file(vec![(identity("ev1", start), rows)]);

    let store = JsonFileStore::load(file.path(), dec!(12)).unwrap();
    let engine = FlipEngine::new(store, EngineConfig::default()).unwrap();

    let flips = engine.detect_recent(24, dec!(50)).await.unwrap();
    assert_eq!(flips.len(), 1);
    assert_eq!(flips[0].event.event_id, "ev1");
}

#[tokio::test]
async fn test_today_summary_over_snapshot_file() {
    let now = Utc::now();
    let start = now + Duration::hours(2);
    let rows = vec![
        row(SplitType::Moneyline, dec!(70), dec!(40), 8 * 60, start),
        row(SplitType::Moneyline, dec!(44), dec!(56), 90, start),
    ];
    let file = snapshot_file(vec![(identity("ev1", start), rows)]);

    let store = JsonFileStore::load(file.path(), dec!(12)).unwrap();
    let engine = FlipEngine::new(store, EngineConfig::default()).unwrap();

    let (flips, summary) = engine.detect_today_with_summary(dec!(50)).await.unwrap();
    assert_eq!(flips.len(), 1);
    assert_eq!(summary.events_evaluated, 1);
    assert_eq!(summary.events_with_flip, 1);
    assert_eq!(summary.bet_count, 1);
    assert_eq!(summary.average_confidence, dec!(65));
}
