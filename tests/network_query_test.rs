//! Itinerary and schedule queries against a seeded in-memory store.

mod common;

use porto_transit::domain::itinerary::ValidationMode;
use porto_transit::domain::{LineMode, NewLine, NewSchedule};
use porto_transit::errors::AppError;
use porto_transit::services::ServiceContainer;

#[tokio::test]
async fn itinerary_of_line_500_is_ordered_by_offset() {
    let db = common::seeded_db().await;
    let services = common::services(db);

    let itinerary = services
        .network()
        .get_itinerary("LINE_B_500")
        .await
        .expect("itinerary");

    let got: Vec<(String, i32)> = itinerary
        .iter()
        .map(|entry| (entry.stop.name.clone(), entry.offset_seconds))
        .collect();
    assert_eq!(
        got,
        vec![
            ("Aliados".to_string(), 0),
            ("São Bento".to_string(), 420),
            ("Ribeira".to_string(), 840),
            ("Foz".to_string(), 1260),
            ("Matosinhos Praia".to_string(), 1680),
        ]
    );

    // no duplicate (line, stop) pairs
    let mut stop_ids: Vec<&str> = itinerary.iter().map(|e| e.stop.stop_id.as_str()).collect();
    stop_ids.sort_unstable();
    stop_ids.dedup();
    assert_eq!(stop_ids.len(), itinerary.len());
}

#[tokio::test]
async fn itinerary_of_a_line_without_stop_times_is_not_found() {
    let db = common::seeded_db().await;
    let services = common::services(db);

    let line = services
        .network()
        .add_line(NewLine {
            code: "900".to_string(),
            name: "Bus 900 (Circular)".to_string(),
            mode: LineMode::Bus,
        })
        .await
        .expect("new line");

    let err = services
        .network()
        .get_itinerary(&line.line_id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound));
}

#[tokio::test]
async fn schedule_lookup_misses_are_not_found() {
    let db = common::seeded_db().await;
    let services = common::services(db);

    let err = services
        .network()
        .get_schedule_for_day("LINE_B_900_MISSING", 0)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound));
}

#[tokio::test]
async fn second_schedule_for_same_day_is_rejected_unless_replacing() {
    let db = common::seeded_db().await;
    let services = common::services(db);

    let window = NewSchedule {
        line_id: "LINE_B_500".to_string(),
        dow: 0,
        start_time: chrono::NaiveTime::from_hms_opt(5, 30, 0).unwrap(),
        end_time: chrono::NaiveTime::from_hms_opt(23, 45, 0).unwrap(),
        headway_minutes: 10,
    };

    let err = services
        .network()
        .set_schedule(window.clone(), false)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let replaced = services
        .network()
        .set_schedule(window, true)
        .await
        .expect("replace schedule");
    assert_eq!(replaced.headway_minutes, 10);
    // replacing keeps the seeded id stable
    assert_eq!(replaced.schedule_id, "LS_LINE_B_500_0");
}

#[tokio::test]
async fn duplicate_line_stop_pair_is_a_conflict() {
    let db = common::seeded_db().await;
    let services = common::services(db);

    let err = services
        .network()
        .add_stop_time("LINE_B_500", "B_STOP_ALD", 2000, ValidationMode::Advisory)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn offset_collisions_fail_only_in_strict_mode() {
    let db = common::seeded_db().await;
    let services = common::services(db);

    // M_STOP_TRD exists in the network but is not on bus line 500;
    // offset 840 collides with Ribeira's.
    let err = services
        .network()
        .add_stop_time("LINE_B_500", "M_STOP_TRD", 840, ValidationMode::Strict)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    // Advisory mode logs and accepts the same write
    services
        .network()
        .add_stop_time("LINE_B_500", "M_STOP_TRD", 840, ValidationMode::Advisory)
        .await
        .expect("advisory insert");
}

#[tokio::test]
async fn stop_times_against_missing_parents_are_referential_errors() {
    let db = common::seeded_db().await;
    let services = common::services(db);

    let err = services
        .network()
        .add_stop_time("LINE_X_NOPE", "B_STOP_ALD", 0, ValidationMode::Advisory)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Referential(_)));

    let err = services
        .network()
        .add_stop_time("LINE_B_500", "B_STOP_NOPE", 2200, ValidationMode::Advisory)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Referential(_)));
}
