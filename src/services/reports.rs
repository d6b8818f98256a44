//! Query facade - read-only composition over the service layer.
//!
//! Aggregates repository-layer results into report views. No new
//! invariants live here; failures propagate unchanged.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

use super::container::parallel;
use super::{AssignmentService, FleetService, NetworkService, TripService};
use crate::domain::itinerary::{offsets_strictly_increasing, ItineraryStop};
use crate::domain::{Driver, DriverAssignment, Line, Trip, TripStop, Vehicle};
use crate::errors::{AppError, AppResult};

/// A line with its resolved itinerary
#[derive(Debug, Serialize)]
pub struct ItinerarySummary {
    pub line: Line,
    pub stops: Vec<ItineraryStop>,
    pub stop_count: usize,
    /// Seconds from the first to the last stop
    pub total_runtime_seconds: i32,
    /// False when duplicate offsets break strict ordering
    pub monotonic: bool,
}

/// One assignment active on a line, with driver and vehicle resolved
#[derive(Debug, Serialize)]
pub struct ActiveAssignment {
    pub assignment: DriverAssignment,
    pub driver: Driver,
    pub vehicle: Vehicle,
}

/// All assignments active on one line
#[derive(Debug, Serialize)]
pub struct LineActivity {
    pub line: Line,
    pub assignments: Vec<ActiveAssignment>,
}

/// A trip with its tracked stop and projected arrival
#[derive(Debug, Serialize)]
pub struct TripProgress {
    pub trip: Trip,
    pub tracked_stop: TripStop,
    pub projected_eta: DateTime<Utc>,
    pub arrived: bool,
}

/// Read-only facade over the services
pub struct QueryFacade {
    network: Arc<dyn NetworkService>,
    fleet: Arc<dyn FleetService>,
    assignments: Arc<dyn AssignmentService>,
    trips: Arc<dyn TripService>,
}

impl QueryFacade {
    pub fn new(
        network: Arc<dyn NetworkService>,
        fleet: Arc<dyn FleetService>,
        assignments: Arc<dyn AssignmentService>,
        trips: Arc<dyn TripService>,
    ) -> Self {
        Self {
            network,
            fleet,
            assignments,
            trips,
        }
    }

    /// The line and its ordered itinerary, fetched concurrently.
    pub async fn line_itinerary_summary(&self, line_id: &str) -> AppResult<ItinerarySummary> {
        let (line, stops) = parallel::join2(
            self.network.get_line(line_id),
            self.network.get_itinerary(line_id),
        )
        .await?;

        let offsets: Vec<i32> = stops.iter().map(|s| s.offset_seconds).collect();
        let total_runtime_seconds = match (offsets.first(), offsets.last()) {
            (Some(first), Some(last)) => last - first,
            _ => 0,
        };

        Ok(ItinerarySummary {
            line,
            stop_count: stops.len(),
            total_runtime_seconds,
            monotonic: offsets_strictly_increasing(&offsets),
            stops,
        })
    }

    /// Per active line, the assignments in effect at `at` with driver
    /// and vehicle resolved.
    pub async fn active_assignments_report(
        &self,
        at: DateTime<Utc>,
    ) -> AppResult<Vec<LineActivity>> {
        let lines = self.network.list_active_lines().await?;

        let mut report = Vec::with_capacity(lines.len());
        for line in lines {
            let active = self
                .assignments
                .active_assignments_for_line(&line.line_id, at)
                .await?;

            let mut resolved = Vec::with_capacity(active.len());
            for assignment in active {
                let (driver, vehicle) = parallel::join2(
                    self.fleet.get_driver(&assignment.driver_id),
                    self.fleet.get_vehicle(&assignment.vehicle_id),
                )
                .await?;
                resolved.push(ActiveAssignment {
                    assignment,
                    driver,
                    vehicle,
                });
            }

            report.push(LineActivity {
                line,
                assignments: resolved,
            });
        }

        Ok(report)
    }

    /// A trip, its tracked stop, and the projected arrival there.
    pub async fn trip_progress(&self, trip_id: &str) -> AppResult<TripProgress> {
        let projected_eta = self.trips.project_trip_eta(trip_id).await?;
        let (trip, tracked) = parallel::join2(
            self.trips.get_trip(trip_id),
            self.trips.get_trip_stop(trip_id),
        )
        .await?;
        // The projection above guarantees the tracked stop exists
        let tracked_stop = tracked.ok_or(AppError::NotFound)?;

        Ok(TripProgress {
            arrived: tracked_stop.ata.is_some(),
            trip,
            tracked_stop,
            projected_eta,
        })
    }
}
