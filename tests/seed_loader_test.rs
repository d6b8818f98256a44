//! Seed loader integration tests: idempotency and the fixed seed
//! mapping, against in-memory SQLite.

mod common;

use porto_transit::infra::{SeedLoader, UnitOfWork};
use porto_transit::services::ServiceContainer;

#[tokio::test]
async fn first_seed_run_inserts_the_full_network() {
    let db = common::setup_db().await;
    let report = SeedLoader::new(db).seed_all().await.expect("seed");

    assert_eq!(report.lines.inserted, 5);
    assert_eq!(report.vehicles.inserted, 10);
    assert_eq!(report.drivers.inserted, 10);
    assert_eq!(report.assignments.inserted, 10);
    // Trindade and Aliados are shared between lines and inserted once,
    // then skipped when the second line that uses them is processed
    assert_eq!(report.stops.inserted, 21);
    assert_eq!(report.stops.skipped, 2);
    assert_eq!(report.stop_times.inserted, 23);
    assert_eq!(report.schedules.inserted, 35);
}

#[tokio::test]
async fn reseeding_is_a_no_op() {
    let db = common::setup_db().await;
    let loader = SeedLoader::new(db.clone());

    let first = loader.seed_all().await.expect("first seed");
    assert_eq!(first.total_inserted(), 114);

    let second = loader.seed_all().await.expect("second seed");
    assert_eq!(second.total_inserted(), 0);

    // Row counts are unchanged by the second run
    let uow = common::persistence(db);
    assert_eq!(uow.lines().list().await.unwrap().len(), 5);
    assert_eq!(uow.drivers().list().await.unwrap().len(), 10);
    assert_eq!(uow.vehicles().list().await.unwrap().len(), 10);
    assert_eq!(uow.stops().list().await.unwrap().len(), 21);
}

#[tokio::test]
async fn seeded_vehicles_follow_the_mode_profile() {
    let db = common::seeded_db().await;
    let services = common::services(db);

    let metro = services
        .fleet()
        .get_vehicle("VEH_LINE_M_A_01")
        .await
        .expect("metro vehicle");
    assert_eq!(metro.model.as_deref(), Some("CRRC Tram"));
    assert_eq!(metro.capacity, Some(244));
    assert!(metro.active);

    let bus = services
        .fleet()
        .get_vehicle("VEH_LINE_B_500_01")
        .await
        .expect("bus vehicle");
    assert_eq!(bus.model.as_deref(), Some("Mercedez-Benz Citaro"));
    assert_eq!(bus.capacity, Some(44));
}

#[tokio::test]
async fn seeded_assignments_keep_one_open_per_line() {
    let db = common::seeded_db().await;
    let services = common::services(db);

    // _01 is the closed earlier shift, _02 is the open one
    let closed = services
        .assignments()
        .get_assignment("ASG_LINE_M_A_01")
        .await
        .expect("closed assignment");
    assert!(!closed.is_open());

    let open = services
        .assignments()
        .open_assignment_for_driver("DRV_LINE_M_A_02")
        .await
        .expect("open lookup")
        .expect("driver 02 has an open assignment");
    assert_eq!(open.assignment_id, "ASG_LINE_M_A_02");

    let none = services
        .assignments()
        .open_assignment_for_driver("DRV_LINE_M_A_01")
        .await
        .expect("open lookup");
    assert!(none.is_none());
}

#[tokio::test]
async fn seeded_schedules_cover_the_whole_week() {
    let db = common::seeded_db().await;
    let services = common::services(db);

    for dow in 0u8..=6 {
        let schedule = services
            .network()
            .get_schedule_for_day("LINE_B_500", dow)
            .await
            .expect("schedule present");
        let expected = if dow <= 4 { 12 } else { 20 };
        assert_eq!(schedule.headway_minutes, expected, "dow {dow}");
        assert_eq!(schedule.schedule_id, format!("LS_LINE_B_500_{dow}"));
    }
}
