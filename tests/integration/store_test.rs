//! Snapshot-file round trip tests

use chrono::{Duration, Utc};
use rust_decimal_macros::dec;
use sharpflip::data::{JsonFileStore, SignalStore};
use std::io::Write;

fn snapshot_json() -> String {
    let start = (Utc::now() + Duration::hours(6)).to_rfc3339();
    let early = (Utc::now() - Duration::hours(2)).to_rfc3339();
    let late = (Utc::now() + Duration::hours(4) + Duration::minutes(30)).to_rfc3339();
    format!(
        r#"{{
            "events": [
                {{
                    "event": {{
                        "event_id": "nfl-dal-nyg-2026-01-11",
                        "home_team": "DAL",
                        "away_team": "NYG",
                        "start_time": "{start}"
                    }},
                    "rows": [
                        {{
                            "split_type": "moneyline",
                            "source": "vsin",
                            "book": "pinnacle",
                            "stake_pct": 70,
                            "bet_pct": 40,
                            "captured_at": "{early}",
                            "event_start_time": "{start}"
                        }},
                        {{
                            "split_type": "moneyline",
                            "source": "vsin",
                            "book": "pinnacle",
                            "stake_pct": 44,
                            "bet_pct": 56,
                            "captured_at": "{late}",
                            "event_start_time": "{start}"
                        }},
                        {{
                            "split_type": "spread",
                            "source": "vsin",
                            "book": "pinnacle",
                            "stake_pct": 52,
                            "bet_pct": 50,
                            "captured_at": "{early}",
                            "event_start_time": "{start}"
                        }}
                    ]
                }}
            ]
        }}"#
    )
}

#[tokio::test]
async fn test_load_snapshot_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{}", snapshot_json()).unwrap();

    let store = JsonFileStore::load(file.path(), dec!(12)).unwrap();
    assert_eq!(store.event_count(), 1);

    // The 2-point spread row is below the sharp threshold
    let rows = store
        .fetch_signal_rows("nfl-dal-nyg-2026-01-11")
        .await
        .unwrap();
    assert_eq!(rows.len(), 2);

    let identity = store
        .fetch_event_identity("nfl-dal-nyg-2026-01-11")
        .await
        .unwrap();
    assert_eq!(identity.home_team, "DAL");
}

#[test]
fn test_load_rejects_malformed_json() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{{ not json").unwrap();

    let result = JsonFileStore::load(file.path(), dec!(12));
    assert!(result.is_err());
}
