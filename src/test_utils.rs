//! Test utilities: time constructors and populated portal fixtures
//!
//! Shared by the unit tests and, through the `benchmark` feature, by the
//! criterion benches.

#![cfg(any(test, feature = "benchmark"))]

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};

use crate::types::{ClimbCategory, RaceId, StageType};
use crate::{Portal, Result};

/// Clock value from hours, minutes and seconds.
///
/// Panics on out-of-range components; only meant for literals in tests.
pub fn hms(hour: u32, minute: u32, second: u32) -> NaiveTime {
    hms_milli(hour, minute, second, 0)
}

/// Clock value with millisecond precision.
pub fn hms_milli(hour: u32, minute: u32, second: u32, milli: u32) -> NaiveTime {
    match NaiveTime::from_hms_milli_opt(hour, minute, second, milli) {
        Some(time) => time,
        None => panic!("invalid test time {hour:02}:{minute:02}:{second:02}.{milli:03}"),
    }
}

/// Start of the first fixture stage: 4 July 2026, 11:00.
pub fn stage_start() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 7, 4)
        .and_then(|day| day.and_hms_opt(11, 0, 0))
        .unwrap_or_default()
}

/// Shape of a generated race field.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub riders: u32,
    pub stages: u32,
    pub sprints_per_stage: u32,
    pub climbs_per_stage: u32,
}

impl Default for FieldSpec {
    fn default() -> Self {
        Self { riders: 176, stages: 21, sprints_per_stage: 1, climbs_per_stage: 3 }
    }
}

/// Checkpoints for one rider: `start`, evenly spaced segment crossings, then
/// `start + elapsed`.
pub fn checkpoints(start: NaiveTime, segments: usize, elapsed: TimeDelta) -> Vec<NaiveTime> {
    let step = elapsed / (segments as i32 + 1);
    (0..=segments as i32 + 1)
        .map(|index| start.overflowing_add_signed(step * index).0)
        .collect()
}

/// Deterministic spread of finish offsets so that some riders bunch and some do not.
fn finish_offset(rider: u32, stage: u32) -> TimeDelta {
    let scatter = (rider.wrapping_mul(7919) ^ stage.wrapping_mul(104_729)) % 1_500;
    TimeDelta::milliseconds(i64::from(rider) * 700 + i64::from(scatter))
}

/// Build a race with a full field of riders and results on every stage.
pub fn build_field(field: FieldSpec) -> Result<(Portal, RaceId)> {
    let mut portal = Portal::new();
    let race = portal.create_race("GrandTour", "Generated field")?;

    let team = portal.create_team("Peloton", "Generated riders")?;
    let mut riders = Vec::with_capacity(field.riders as usize);
    for index in 0..field.riders {
        riders.push(portal.create_rider(team, &format!("Rider {index}"), 1990 + (index % 15) as i32)?);
    }

    let categories =
        [ClimbCategory::C4, ClimbCategory::C3, ClimbCategory::C2, ClimbCategory::C1, ClimbCategory::HC];
    for day in 0..field.stages {
        let stage_type = match day % 4 {
            0 => StageType::Flat,
            1 => StageType::MediumMountain,
            _ => StageType::HighMountain,
        };
        let start = stage_start() + TimeDelta::days(i64::from(day));
        let stage = portal.add_stage_to_race(race, &format!("Stage{}", day + 1), "", 180.0, start, stage_type)?;

        for sprint in 0..field.sprints_per_stage {
            portal.add_intermediate_sprint_to_stage(stage, 20.0 + f64::from(sprint) * 10.0)?;
        }
        for climb in 0..field.climbs_per_stage {
            let category = categories[(climb as usize + day as usize) % categories.len()];
            portal.add_categorized_climb_to_stage(stage, 100.0 + f64::from(climb) * 20.0, category, 6.0, 8.0)?;
        }
        portal.conclude_stage_preparation(stage)?;

        let segments = (field.sprints_per_stage + field.climbs_per_stage) as usize;
        for (index, &rider) in riders.iter().enumerate() {
            let elapsed = TimeDelta::hours(4) + finish_offset(index as u32, day);
            portal.register_result(stage, rider, &checkpoints(hms(11, 0, 0), segments, elapsed))?;
        }
    }

    Ok((portal, race))
}

/// A small portal exercising every entity kind: two teams, four riders, and a
/// three-stage race (flat with a sprint, mountain with climbs, time trial).
pub fn build_sample_portal() -> Result<Portal> {
    let mut portal = Portal::new();
    let race = portal.create_race("Tour", "Sample race")?;

    let climbers = portal.create_team("Grimpeurs", "Mountain team")?;
    let sprinters = portal.create_team("Rouleurs", "Sprint team")?;
    let riders = [
        portal.create_rider(climbers, "Ana", 1994)?,
        portal.create_rider(climbers, "Bea", 1997)?,
        portal.create_rider(sprinters, "Cat", 1999)?,
        portal.create_rider(sprinters, "Dee", 2001)?,
    ];

    let flat = portal.add_stage_to_race(race, "Flat", "", 160.0, stage_start(), StageType::Flat)?;
    portal.add_intermediate_sprint_to_stage(flat, 80.0)?;
    let mountain = portal.add_stage_to_race(
        race,
        "Mountain",
        "",
        140.0,
        stage_start() + TimeDelta::days(1),
        StageType::HighMountain,
    )?;
    portal.add_categorized_climb_to_stage(mountain, 60.0, ClimbCategory::C2, 5.0, 6.0)?;
    portal.add_categorized_climb_to_stage(mountain, 140.0, ClimbCategory::HC, 8.5, 15.0)?;
    let time_trial =
        portal.add_stage_to_race(race, "Chrono", "", 30.0, stage_start() + TimeDelta::days(2), StageType::TimeTrial)?;

    for stage in [flat, mountain, time_trial] {
        portal.conclude_stage_preparation(stage)?;
    }

    let start = hms(11, 0, 0);
    // Seconds behind the base time on each stage, per rider.
    let flat_gaps = [230, 230, 0, 0];
    let mountain_gaps = [0, 95, 1_400, 1_400];
    let time_trial_gaps = [35, 20, 50, 0];
    for (index, &rider) in riders.iter().enumerate() {
        let flat_time = TimeDelta::hours(3)
            + TimeDelta::seconds(flat_gaps[index])
            + TimeDelta::milliseconds(index as i64 * 300);
        portal.register_result(flat, rider, &checkpoints(start, 1, flat_time))?;

        let mountain_time = TimeDelta::hours(4) + TimeDelta::seconds(mountain_gaps[index]);
        portal.register_result(mountain, rider, &checkpoints(start, 2, mountain_time))?;

        let time_trial_time = TimeDelta::minutes(38) + TimeDelta::seconds(time_trial_gaps[index]);
        portal.register_result(time_trial, rider, &checkpoints(start, 0, time_trial_time))?;
    }

    Ok(portal)
}

/// [`build_sample_portal`] for tests that cannot fail on fixture setup.
pub fn sample_portal() -> Portal {
    match build_sample_portal() {
        Ok(portal) => portal,
        Err(error) => panic!("sample portal fixture is invalid: {error}"),
    }
}
