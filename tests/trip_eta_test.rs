//! Trip planning and ETA projection against the seeded network.

mod common;

use chrono::{Duration, TimeZone, Utc};

use porto_transit::domain::{NewTrip, NewUser, Role};
use porto_transit::errors::AppError;
use porto_transit::services::ServiceContainer;

async fn register_rider(services: &porto_transit::Services, email: &str) -> String {
    services
        .users()
        .register_user(NewUser {
            email: email.to_string(),
            password_hash: "x".repeat(32),
            full_name: "Rider".to_string(),
            role: Role::Passenger,
        })
        .await
        .expect("register user")
        .user_id
}

#[tokio::test]
async fn eta_combines_headway_wait_and_itinerary_offsets() {
    let db = common::seeded_db().await;
    let services = common::services(db);
    let user_id = register_rider(&services, "eta@example.com").await;

    // Monday: bus 500 runs every 12 minutes -> 360 s expected wait.
    // Aliados (0) to Ribeira (840) is 840 s of travel.
    let monday = Utc.with_ymd_and_hms(2026, 8, 10, 10, 0, 0).unwrap();
    let trip = services
        .trips()
        .plan_trip(
            NewTrip {
                user_id: Some(user_id),
                line_id: Some("LINE_B_500".to_string()),
                origin_stop_id: Some("B_STOP_ALD".to_string()),
                dest_stop_id: Some("B_STOP_RIB".to_string()),
                planned_start: monday,
                planned_end: None,
            },
            None,
        )
        .await
        .expect("plan trip");

    let eta = services
        .trips()
        .project_trip_eta(&trip.trip_id)
        .await
        .expect("project eta");
    assert_eq!(eta, monday + Duration::seconds(360 + 840));

    // The projection is recorded on the tracked stop
    let tracked = services
        .trips()
        .get_trip_stop(&trip.trip_id)
        .await
        .unwrap()
        .expect("tracked stop");
    assert_eq!(tracked.stop_id, "B_STOP_RIB");
    assert_eq!(tracked.eta, Some(eta));
}

#[tokio::test]
async fn projection_without_a_line_is_not_found() {
    let db = common::seeded_db().await;
    let services = common::services(db);
    let user_id = register_rider(&services, "noline@example.com").await;

    let trip = services
        .trips()
        .plan_trip(
            NewTrip {
                user_id: Some(user_id),
                line_id: None,
                origin_stop_id: Some("B_STOP_ALD".to_string()),
                dest_stop_id: Some("B_STOP_RIB".to_string()),
                planned_start: Utc::now(),
                planned_end: None,
            },
            None,
        )
        .await
        .unwrap();

    let err = services
        .trips()
        .project_trip_eta(&trip.trip_id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound));
}

#[tokio::test]
async fn projection_for_a_stop_off_the_itinerary_is_not_found() {
    let db = common::seeded_db().await;
    let services = common::services(db);
    let user_id = register_rider(&services, "offline@example.com").await;

    // Trindade is a metro stop, not on bus line 500
    let trip = services
        .trips()
        .plan_trip(
            NewTrip {
                user_id: Some(user_id),
                line_id: Some("LINE_B_500".to_string()),
                origin_stop_id: Some("B_STOP_ALD".to_string()),
                dest_stop_id: Some("M_STOP_TRD".to_string()),
                planned_start: Utc::now(),
                planned_end: None,
            },
            None,
        )
        .await
        .unwrap();

    let err = services
        .trips()
        .project_trip_eta(&trip.trip_id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound));
}

#[tokio::test]
async fn tracked_stop_before_origin_is_a_validation_error() {
    let db = common::seeded_db().await;
    let services = common::services(db);
    let user_id = register_rider(&services, "backwards@example.com").await;

    let trip = services
        .trips()
        .plan_trip(
            NewTrip {
                user_id: Some(user_id),
                line_id: Some("LINE_B_500".to_string()),
                origin_stop_id: Some("B_STOP_RIB".to_string()),
                dest_stop_id: Some("B_STOP_ALD".to_string()),
                planned_start: Utc::now(),
                planned_end: None,
            },
            None,
        )
        .await
        .unwrap();

    let err = services
        .trips()
        .project_trip_eta(&trip.trip_id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn trip_progress_reports_projection_and_arrival() {
    let db = common::seeded_db().await;
    let services = common::services(db.clone());
    let facade = common::facade(db);
    let user_id = register_rider(&services, "progress@example.com").await;

    let monday = Utc.with_ymd_and_hms(2026, 8, 10, 9, 30, 0).unwrap();
    let trip = services
        .trips()
        .plan_trip(
            NewTrip {
                user_id: Some(user_id.clone()),
                line_id: Some("LINE_B_500".to_string()),
                origin_stop_id: Some("B_STOP_ALD".to_string()),
                dest_stop_id: Some("B_STOP_FOZ".to_string()),
                planned_start: monday,
                planned_end: None,
            },
            None,
        )
        .await
        .unwrap();

    let progress = facade.trip_progress(&trip.trip_id).await.expect("progress");
    assert_eq!(progress.trip.trip_id, trip.trip_id);
    assert_eq!(progress.tracked_stop.stop_id, "B_STOP_FOZ");
    assert_eq!(progress.projected_eta, monday + Duration::seconds(360 + 1260));
    assert!(!progress.arrived);

    let ata = monday + Duration::seconds(1700);
    services
        .trips()
        .record_arrival(&trip.trip_id, ata)
        .await
        .expect("record arrival");

    let progress = facade.trip_progress(&trip.trip_id).await.expect("progress");
    assert!(progress.arrived);
    assert_eq!(progress.tracked_stop.ata, Some(ata));

    // History shows the rider's trip, newest first
    let history = services.trips().trip_history(&user_id, None).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].trip_id, trip.trip_id);
}

#[tokio::test]
async fn itinerary_summary_reports_runtime_and_monotonicity() {
    let db = common::seeded_db().await;
    let facade = common::facade(db);

    let summary = facade
        .line_itinerary_summary("LINE_B_500")
        .await
        .expect("summary");
    assert_eq!(summary.line.line_id, "LINE_B_500");
    assert_eq!(summary.stop_count, 5);
    assert_eq!(summary.total_runtime_seconds, 1680);
    assert!(summary.monotonic);
}

#[tokio::test]
async fn active_assignments_report_resolves_drivers_and_vehicles() {
    let db = common::seeded_db().await;
    let facade = common::facade(db);

    let report = facade
        .active_assignments_report(Utc::now())
        .await
        .expect("report");

    // all five seeded lines are active
    assert_eq!(report.len(), 5);
    for activity in &report {
        // each line has exactly its _02 shift open right now
        assert_eq!(activity.assignments.len(), 1, "line {}", activity.line.line_id);
        let entry = &activity.assignments[0];
        assert!(entry.assignment.is_open());
        assert_eq!(entry.driver.driver_id, entry.assignment.driver_id);
        assert_eq!(entry.vehicle.vehicle_id, entry.assignment.vehicle_id);
    }
}
