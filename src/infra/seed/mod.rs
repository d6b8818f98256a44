//! Idempotent seed loader.
//!
//! Each logical seed row is checked by its derived natural key before
//! insert and skipped when present, so the loader is safely re-runnable
//! against a partially seeded database. A step that references a
//! missing parent fails with a referential error naming the offending
//! key; parents are never invented.
//!
//! Step order follows the dependency chain: lines → vehicles → drivers
//! → driver_assignments → stops → stop_times → line_schedules.

pub mod fixtures;

use chrono::{Duration, NaiveDate, NaiveTime, Utc};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};

use super::repositories::entities::{
    driver, driver_assignment, line, line_schedule, stop, stop_time, vehicle,
};
use crate::domain::keys::{
    assignment_key, driver_key, line_key, schedule_key, stop_key, stop_time_key, vehicle_key,
};
use crate::errors::{AppError, AppResult};
use fixtures::{driver_name, vehicle_profile, LineFixture, NETWORK};

/// Inserted/skipped counts for one seed step
#[derive(Debug, Default, Clone, Copy)]
pub struct SeedStepReport {
    pub inserted: usize,
    pub skipped: usize,
}

/// Outcome of a full seed run
#[derive(Debug, Default)]
pub struct SeedReport {
    pub lines: SeedStepReport,
    pub vehicles: SeedStepReport,
    pub drivers: SeedStepReport,
    pub assignments: SeedStepReport,
    pub stops: SeedStepReport,
    pub stop_times: SeedStepReport,
    pub schedules: SeedStepReport,
}

impl SeedReport {
    pub fn total_inserted(&self) -> usize {
        self.lines.inserted
            + self.vehicles.inserted
            + self.drivers.inserted
            + self.assignments.inserted
            + self.stops.inserted
            + self.stop_times.inserted
            + self.schedules.inserted
    }

    pub fn total_skipped(&self) -> usize {
        self.lines.skipped
            + self.vehicles.skipped
            + self.drivers.skipped
            + self.assignments.skipped
            + self.stops.skipped
            + self.stop_times.skipped
            + self.schedules.skipped
    }
}

impl std::fmt::Display for SeedReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "lines:        {} inserted, {} skipped", self.lines.inserted, self.lines.skipped)?;
        writeln!(f, "vehicles:     {} inserted, {} skipped", self.vehicles.inserted, self.vehicles.skipped)?;
        writeln!(f, "drivers:      {} inserted, {} skipped", self.drivers.inserted, self.drivers.skipped)?;
        writeln!(f, "assignments:  {} inserted, {} skipped", self.assignments.inserted, self.assignments.skipped)?;
        writeln!(f, "stops:        {} inserted, {} skipped", self.stops.inserted, self.stops.skipped)?;
        writeln!(f, "stop_times:   {} inserted, {} skipped", self.stop_times.inserted, self.stop_times.skipped)?;
        write!(f, "schedules:    {} inserted, {} skipped", self.schedules.inserted, self.schedules.skipped)
    }
}

/// Seed loader over a live connection
pub struct SeedLoader {
    db: DatabaseConnection,
}

impl SeedLoader {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Run every seed step in dependency order.
    pub async fn seed_all(&self) -> AppResult<SeedReport> {
        let mut report = SeedReport::default();

        report.lines = self.seed_lines().await?;
        report.vehicles = self.seed_vehicles().await?;
        report.drivers = self.seed_drivers().await?;
        report.assignments = self.seed_assignments().await?;
        report.stops = self.seed_stops().await?;
        report.stop_times = self.seed_stop_times().await?;
        report.schedules = self.seed_schedules().await?;

        tracing::info!(
            inserted = report.total_inserted(),
            skipped = report.total_skipped(),
            "seed run complete"
        );
        Ok(report)
    }

    async fn seed_lines(&self) -> AppResult<SeedStepReport> {
        let mut step = SeedStepReport::default();

        for fixture in NETWORK {
            let line_id = line_key(fixture.mode, fixture.code);
            if line::Entity::find_by_id(&line_id).one(&self.db).await?.is_some() {
                step.skipped += 1;
                continue;
            }

            line::ActiveModel {
                line_id: Set(line_id),
                code: Set(fixture.code.to_string()),
                name: Set(fixture.name.to_string()),
                line_mode: Set(fixture.mode.as_str().to_string()),
                active: Set(true),
            }
            .insert(&self.db)
            .await
            .map_err(AppError::from)?;
            step.inserted += 1;
        }

        tracing::debug!(inserted = step.inserted, skipped = step.skipped, "seeded lines");
        Ok(step)
    }

    async fn seed_vehicles(&self) -> AppResult<SeedStepReport> {
        let mut step = SeedStepReport::default();

        for fixture in NETWORK {
            let line_id = line_key(fixture.mode, fixture.code);
            let (model, capacity) = vehicle_profile(fixture.mode);

            for index in 1u8..=2 {
                let vehicle_id = vehicle_key(&line_id, index);
                if vehicle::Entity::find_by_id(&vehicle_id).one(&self.db).await?.is_some() {
                    step.skipped += 1;
                    continue;
                }

                vehicle::ActiveModel {
                    vehicle_id: Set(vehicle_id),
                    plate: Set(format!("PT-{}-{:02}", fixture.code, index)),
                    model: Set(Some(model.to_string())),
                    capacity: Set(Some(capacity)),
                    active: Set(true),
                }
                .insert(&self.db)
                .await
                .map_err(AppError::from)?;
                step.inserted += 1;
            }
        }

        tracing::debug!(inserted = step.inserted, skipped = step.skipped, "seeded vehicles");
        Ok(step)
    }

    async fn seed_drivers(&self) -> AppResult<SeedStepReport> {
        let mut step = SeedStepReport::default();

        for (line_index, fixture) in NETWORK.iter().enumerate() {
            let line_id = line_key(fixture.mode, fixture.code);

            for index in 1u8..=2 {
                let driver_id = driver_key(&line_id, index);
                if driver::Entity::find_by_id(&driver_id).one(&self.db).await?.is_some() {
                    step.skipped += 1;
                    continue;
                }

                let hire_date = if index == 1 {
                    NaiveDate::from_ymd_opt(2020, 1, 15)
                } else {
                    NaiveDate::from_ymd_opt(2021, 6, 1)
                }
                .ok_or_else(|| AppError::internal("invalid fixture hire date"))?;

                driver::ActiveModel {
                    driver_id: Set(driver_id),
                    full_name: Set(driver_name(line_index, index).to_string()),
                    license_no: Set(format!("D-{}-{:02}", fixture.code, index)),
                    hire_date: Set(hire_date),
                }
                .insert(&self.db)
                .await
                .map_err(AppError::from)?;
                step.inserted += 1;
            }
        }

        tracing::debug!(inserted = step.inserted, skipped = step.skipped, "seeded drivers");
        Ok(step)
    }

    /// Two assignments per line: `_01` is a closed earlier shift, `_02`
    /// is open. The split keeps every seeded driver and vehicle at no
    /// more than one open assignment.
    async fn seed_assignments(&self) -> AppResult<SeedStepReport> {
        let mut step = SeedStepReport::default();
        let now = Utc::now();

        for fixture in NETWORK {
            let line_id = line_key(fixture.mode, fixture.code);

            for index in 1u8..=2 {
                let assignment_id = assignment_key(&line_id, index);
                if driver_assignment::Entity::find_by_id(&assignment_id)
                    .one(&self.db)
                    .await?
                    .is_some()
                {
                    step.skipped += 1;
                    continue;
                }

                let driver_id = driver_key(&line_id, index);
                let vehicle_id = vehicle_key(&line_id, index);
                self.ensure_parent::<driver::Entity>(&driver_id).await?;
                self.ensure_parent::<vehicle::Entity>(&vehicle_id).await?;
                self.ensure_parent::<line::Entity>(&line_id).await?;

                let (start_ts, end_ts) = if index == 1 {
                    (now - Duration::hours(8), Some(now - Duration::hours(1)))
                } else {
                    (now - Duration::hours(1), None)
                };

                driver_assignment::ActiveModel {
                    assignment_id: Set(assignment_id),
                    driver_id: Set(driver_id),
                    vehicle_id: Set(vehicle_id),
                    line_id: Set(line_id.clone()),
                    start_ts: Set(start_ts),
                    end_ts: Set(end_ts),
                }
                .insert(&self.db)
                .await
                .map_err(AppError::from)?;
                step.inserted += 1;
            }
        }

        tracing::debug!(inserted = step.inserted, skipped = step.skipped, "seeded assignments");
        Ok(step)
    }

    async fn seed_stops(&self) -> AppResult<SeedStepReport> {
        let mut step = SeedStepReport::default();

        for fixture in NETWORK {
            for entry in fixture.itinerary {
                let stop_id = stop_key(fixture.mode, entry.short);
                if stop::Entity::find_by_id(&stop_id).one(&self.db).await?.is_some() {
                    step.skipped += 1;
                    continue;
                }

                stop::ActiveModel {
                    stop_id: Set(stop_id),
                    code: Set(format!("{}_{}", fixture.mode.prefix(), entry.short)),
                    name: Set(entry.name.to_string()),
                    lat: Set(Some(entry.lat)),
                    lon: Set(Some(entry.lon)),
                }
                .insert(&self.db)
                .await
                .map_err(AppError::from)?;
                step.inserted += 1;
            }
        }

        tracing::debug!(inserted = step.inserted, skipped = step.skipped, "seeded stops");
        Ok(step)
    }

    async fn seed_stop_times(&self) -> AppResult<SeedStepReport> {
        let mut step = SeedStepReport::default();

        for fixture in NETWORK {
            let line_id = line_key(fixture.mode, fixture.code);

            for (position, entry) in fixture.itinerary.iter().enumerate() {
                let stop_time_id = stop_time_key(&line_id, position + 1);
                if stop_time::Entity::find_by_id(&stop_time_id)
                    .one(&self.db)
                    .await?
                    .is_some()
                {
                    step.skipped += 1;
                    continue;
                }

                let stop_id = stop_key(fixture.mode, entry.short);
                self.ensure_parent::<line::Entity>(&line_id).await?;
                self.ensure_parent::<stop::Entity>(&stop_id).await?;

                stop_time::ActiveModel {
                    stop_time_id: Set(stop_time_id),
                    line_id: Set(line_id.clone()),
                    stop_id: Set(stop_id),
                    scheduled_seconds_from_start: Set(entry.offset_seconds),
                }
                .insert(&self.db)
                .await
                .map_err(AppError::from)?;
                step.inserted += 1;
            }
        }

        tracing::debug!(inserted = step.inserted, skipped = step.skipped, "seeded stop_times");
        Ok(step)
    }

    async fn seed_schedules(&self) -> AppResult<SeedStepReport> {
        let mut step = SeedStepReport::default();

        for fixture in NETWORK {
            let line_id = line_key(fixture.mode, fixture.code);
            let start_time = fixture_time(fixture, fixture.service_start)?;
            let end_time = fixture_time(fixture, fixture.service_end)?;

            for dow in 0u8..=6 {
                let schedule_id = schedule_key(&line_id, dow);
                if line_schedule::Entity::find_by_id(&schedule_id)
                    .one(&self.db)
                    .await?
                    .is_some()
                {
                    step.skipped += 1;
                    continue;
                }

                self.ensure_parent::<line::Entity>(&line_id).await?;

                let headway = if dow <= 4 {
                    fixture.weekday_headway
                } else {
                    fixture.weekend_headway
                };

                line_schedule::ActiveModel {
                    schedule_id: Set(schedule_id),
                    line_id: Set(line_id.clone()),
                    dow: Set(dow as i16),
                    start_time: Set(start_time),
                    end_time: Set(end_time),
                    headway_minutes: Set(headway),
                }
                .insert(&self.db)
                .await
                .map_err(AppError::from)?;
                step.inserted += 1;
            }
        }

        tracing::debug!(inserted = step.inserted, skipped = step.skipped, "seeded schedules");
        Ok(step)
    }

    /// Referential guard: the parent row must already exist under its
    /// derived key.
    async fn ensure_parent<E>(&self, id: &str) -> AppResult<()>
    where
        E: EntityTrait,
        <E::PrimaryKey as sea_orm::PrimaryKeyTrait>::ValueType: From<String>,
    {
        let found = E::find_by_id(<E::PrimaryKey as sea_orm::PrimaryKeyTrait>::ValueType::from(
            id.to_string(),
        ))
        .one(&self.db)
        .await
        .map_err(AppError::from)?;

        if found.is_none() {
            return Err(AppError::referential(id.to_string()));
        }
        Ok(())
    }
}

fn fixture_time(fixture: &LineFixture, (hour, minute): (u32, u32)) -> AppResult<NaiveTime> {
    NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(|| {
        AppError::internal(format!(
            "invalid fixture service time {hour}:{minute} on line {}",
            fixture.code
        ))
    })
}
