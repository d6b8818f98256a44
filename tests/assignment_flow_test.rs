//! Assignment lifecycle tests: open-assignment exclusivity, close
//! transitions, and cascade behavior, against in-memory SQLite.

mod common;

use chrono::{Duration, NaiveDate, Utc};

use porto_transit::domain::{NewAssignment, NewDriver, NewTrip, NewUser, NewVehicle, Role};
use porto_transit::errors::AppError;
use porto_transit::services::ServiceContainer;

fn fresh_driver(tag: &str) -> NewDriver {
    NewDriver {
        full_name: format!("Test Driver {tag}"),
        license_no: format!("D-TEST-{tag}"),
        hire_date: NaiveDate::from_ymd_opt(2023, 4, 3).unwrap(),
    }
}

fn fresh_vehicle(tag: &str) -> NewVehicle {
    NewVehicle {
        plate: format!("PT-TEST-{tag}"),
        model: Some("Mercedez-Benz Citaro".to_string()),
        capacity: Some(44),
    }
}

#[tokio::test]
async fn creating_and_closing_an_assignment() {
    let db = common::seeded_db().await;
    let services = common::services(db);

    let driver = services.fleet().add_driver(fresh_driver("A")).await.unwrap();
    let vehicle = services.fleet().add_vehicle(fresh_vehicle("A")).await.unwrap();

    let start = Utc::now();
    let created = services
        .assignments()
        .create_assignment(NewAssignment {
            driver_id: driver.driver_id.clone(),
            vehicle_id: vehicle.vehicle_id.clone(),
            line_id: "LINE_B_500".to_string(),
            start_ts: start,
        })
        .await
        .expect("create assignment");
    assert!(created.is_open());

    let open = services
        .assignments()
        .open_assignment_for_vehicle(&vehicle.vehicle_id)
        .await
        .unwrap()
        .expect("vehicle now has an open assignment");
    assert_eq!(open.assignment_id, created.assignment_id);

    let closed = services
        .assignments()
        .close_assignment(&created.assignment_id, start + Duration::hours(8))
        .await
        .expect("close assignment");
    assert!(!closed.is_open());

    assert!(services
        .assignments()
        .open_assignment_for_driver(&driver.driver_id)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn busy_driver_or_vehicle_is_a_conflict() {
    let db = common::seeded_db().await;
    let services = common::services(db);

    let vehicle = services.fleet().add_vehicle(fresh_vehicle("B")).await.unwrap();

    // DRV_LINE_M_A_02 holds the seeded open assignment
    let err = services
        .assignments()
        .create_assignment(NewAssignment {
            driver_id: "DRV_LINE_M_A_02".to_string(),
            vehicle_id: vehicle.vehicle_id.clone(),
            line_id: "LINE_M_A".to_string(),
            start_ts: Utc::now(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
    assert!(err.is_retryable());

    // Same for the seeded open vehicle
    let driver = services.fleet().add_driver(fresh_driver("B")).await.unwrap();
    let err = services
        .assignments()
        .create_assignment(NewAssignment {
            driver_id: driver.driver_id,
            vehicle_id: "VEH_LINE_M_A_02".to_string(),
            line_id: "LINE_M_A".to_string(),
            start_ts: Utc::now(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn concurrent_creation_for_one_driver_yields_a_single_open_assignment() {
    let db = common::seeded_db().await;
    let services = std::sync::Arc::new(common::services(db));

    let driver = services.fleet().add_driver(fresh_driver("C")).await.unwrap();
    let v1 = services.fleet().add_vehicle(fresh_vehicle("C1")).await.unwrap();
    let v2 = services.fleet().add_vehicle(fresh_vehicle("C2")).await.unwrap();

    let mut handles = Vec::new();
    for vehicle_id in [v1.vehicle_id.clone(), v2.vehicle_id.clone()] {
        let services = services.clone();
        let driver_id = driver.driver_id.clone();
        handles.push(tokio::spawn(async move {
            services
                .assignments()
                .create_assignment(NewAssignment {
                    driver_id,
                    vehicle_id,
                    line_id: "LINE_B_500".to_string(),
                    start_ts: Utc::now(),
                })
                .await
        }));
    }

    let mut ok = 0;
    let mut conflicts = 0;
    for handle in handles {
        match handle.await.expect("task") {
            Ok(_) => ok += 1,
            Err(AppError::Conflict(_)) => conflicts += 1,
            Err(other) => panic!("unexpected error: {other:?}"),
        }
    }
    assert_eq!((ok, conflicts), (1, 1));

    let open = services
        .assignments()
        .open_assignment_for_driver(&driver.driver_id)
        .await
        .unwrap();
    assert!(open.is_some());
}

#[tokio::test]
async fn closing_rejects_bad_end_timestamps_and_reclosing() {
    let db = common::seeded_db().await;
    let services = common::services(db);

    let driver = services.fleet().add_driver(fresh_driver("D")).await.unwrap();
    let vehicle = services.fleet().add_vehicle(fresh_vehicle("D")).await.unwrap();

    let start = Utc::now();
    let assignment = services
        .assignments()
        .create_assignment(NewAssignment {
            driver_id: driver.driver_id,
            vehicle_id: vehicle.vehicle_id,
            line_id: "LINE_T_1".to_string(),
            start_ts: start,
        })
        .await
        .unwrap();

    // end_ts <= start_ts
    let err = services
        .assignments()
        .close_assignment(&assignment.assignment_id, start)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidState(_)));

    services
        .assignments()
        .close_assignment(&assignment.assignment_id, start + Duration::hours(6))
        .await
        .unwrap();

    // Closed is terminal
    let err = services
        .assignments()
        .close_assignment(&assignment.assignment_id, start + Duration::hours(7))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidState(_)));
}

#[tokio::test]
async fn missing_parents_are_referential_errors() {
    let db = common::seeded_db().await;
    let services = common::services(db);

    let err = services
        .assignments()
        .create_assignment(NewAssignment {
            driver_id: "DRV_NOPE".to_string(),
            vehicle_id: "VEH_LINE_M_A_01".to_string(),
            line_id: "LINE_M_A".to_string(),
            start_ts: Utc::now(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Referential(_)));
}

#[tokio::test]
async fn deleting_a_driver_cascades_to_their_assignments() {
    let db = common::seeded_db().await;
    let services = common::services(db);

    services
        .fleet()
        .remove_driver("DRV_LINE_T_1_01")
        .await
        .expect("delete driver");

    let err = services
        .assignments()
        .get_assignment("ASG_LINE_T_1_01")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound));
}

#[tokio::test]
async fn deleting_a_user_nulls_their_trips() {
    let db = common::seeded_db().await;
    let services = common::services(db);

    let user = services
        .users()
        .register_user(NewUser {
            email: "rider@example.com".to_string(),
            password_hash: "x".repeat(32),
            full_name: "Rider".to_string(),
            role: Role::Passenger,
        })
        .await
        .unwrap();

    let trip = services
        .trips()
        .plan_trip(
            NewTrip {
                user_id: Some(user.user_id.clone()),
                line_id: Some("LINE_B_500".to_string()),
                origin_stop_id: Some("B_STOP_ALD".to_string()),
                dest_stop_id: Some("B_STOP_RIB".to_string()),
                planned_start: Utc::now(),
                planned_end: None,
            },
            None,
        )
        .await
        .unwrap();

    services.users().delete_user(&user.user_id).await.unwrap();

    let reloaded = services.trips().get_trip(&trip.trip_id).await.unwrap();
    assert_eq!(reloaded.user_id, None);
}
