//! Races: ordered stages and the overall classifications
//!
//! A [`Race`] owns its stages (ordered by start time) and a [`ResultSet`] holding
//! the aggregated race classification. The aggregate is rebuilt on demand from
//! the stages.
//!
//! ## Aggregation cycle
//!
//! 1. [`Race::collect_results`] clears the race results and sums each rider's
//!    adjusted stage times. This fixes the race ranking (general classification).
//! 2. [`Race::collect_points`] or [`Race::collect_mountain_points`] adds each
//!    stage's per-rider points onto the race results.
//!
//! Points collection accumulates, so collecting twice without a fresh
//! `collect_results` in between double counts. The classification queries on
//! [`Race`] run a complete cycle each time and are safe to call repeatedly.
//!
//! ```rust
//! use chrono::NaiveDate;
//! use peloton::{Race, RaceId, Stage, StageId, StageType};
//!
//! let start = NaiveDate::from_ymd_opt(2026, 7, 4).unwrap().and_hms_opt(11, 0, 0).unwrap();
//! let mut race = Race::new(RaceId(1), "Tour", "Three weeks in July");
//! race.add_stage(Stage::new(StageId(1), "Opening", "", 182.0, start, StageType::Flat));
//! assert_eq!(race.details().stage_count, 1);
//! ```

use std::fmt;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::results::ResultSet;
use crate::stage::Stage;
use crate::types::time::{MIDNIGHT, accumulate};
use crate::types::{EntityKind, RaceId, RiderId, StageId};
use crate::{CyclingError, Result};

/// A race: a named, ordered series of stages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct Race {
    id: RaceId,
    name: String,
    description: String,
    stages: Vec<Stage>,
    results: ResultSet,
}

/// Summary of a race for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct RaceDetails {
    pub id: RaceId,
    pub name: String,
    pub description: String,
    pub stage_count: usize,
    /// Sum of all stage lengths in kilometres
    pub total_length: f64,
}

impl fmt::Display for RaceDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Race {} '{}' ({}): {} stages, {} km",
            self.id, self.name, self.description, self.stage_count, self.total_length
        )
    }
}

impl Race {
    pub fn new(id: RaceId, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            stages: Vec::new(),
            results: ResultSet::new(),
        }
    }

    pub fn id(&self) -> RaceId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Stages ordered by start time.
    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    pub fn stage_ids(&self) -> Vec<StageId> {
        self.stages.iter().map(Stage::id).collect()
    }

    pub fn stage(&self, stage: StageId) -> Option<&Stage> {
        self.stages.iter().find(|s| s.id() == stage)
    }

    pub fn stage_mut(&mut self, stage: StageId) -> Option<&mut Stage> {
        self.stages.iter_mut().find(|s| s.id() == stage)
    }

    pub(crate) fn stages_mut(&mut self) -> impl Iterator<Item = &mut Stage> {
        self.stages.iter_mut()
    }

    /// Aggregated race results from the last collection.
    pub fn results(&self) -> &ResultSet {
        &self.results
    }

    /// Insert a stage before the first stage that starts strictly later.
    pub fn add_stage(&mut self, stage: Stage) {
        let index = self
            .stages
            .iter()
            .position(|existing| stage.start_time() < existing.start_time())
            .unwrap_or(self.stages.len());
        debug!(race = %self.id, stage = %stage.id(), index, "Adding stage");
        self.stages.insert(index, stage);
    }

    pub fn remove_stage(&mut self, stage: StageId) -> Result<Stage> {
        let index = self
            .stages
            .iter()
            .position(|s| s.id() == stage)
            .ok_or_else(|| CyclingError::unknown_id(EntityKind::Stage, stage))?;
        debug!(race = %self.id, stage = %stage, "Removing stage");
        Ok(self.stages.remove(index))
    }

    /// Total length of all stages in kilometres.
    pub fn total_length(&self) -> f64 {
        self.stages.iter().map(Stage::length).sum()
    }

    pub fn details(&self) -> RaceDetails {
        RaceDetails {
            id: self.id,
            name: self.name.clone(),
            description: self.description.clone(),
            stage_count: self.stages.len(),
            total_length: self.total_length(),
        }
    }

    /// Rebuild the race results from the stages' adjusted times.
    ///
    /// The riders considered are those ranked in the first stage that has any
    /// results. Each one's total is the sum of their adjusted times over every
    /// stage they have a result in; it is stored as both finish and adjusted time.
    pub fn collect_results(&mut self) -> Result<()> {
        self.results.clear();
        for stage in &mut self.stages {
            stage.adjust_rider_results();
        }

        let Some(riders) =
            self.stages.iter().map(Stage::ranked_riders).find(|riders| !riders.is_empty())
        else {
            trace!(race = %self.id, "No stage results to collect");
            return Ok(());
        };

        for rider in riders {
            let total = self
                .stages
                .iter_mut()
                .filter_map(|stage| stage.adjusted_rider_time(rider))
                .fold(MIDNIGHT, accumulate);
            self.results.add(rider, total)?;
            self.results.set_adjusted(rider, total);
        }

        debug!(race = %self.id, riders = self.results.len(), "Collected race results");
        Ok(())
    }

    /// Add every stage's points-classification points onto the race results.
    pub fn collect_points(&mut self) {
        for stage in &mut self.stages {
            let points = stage.riders_points();
            for (rider, delta) in stage.ranked_riders().into_iter().zip(points) {
                self.results.add_points(rider, delta);
            }
        }
    }

    /// Add every stage's mountain points onto the race results.
    pub fn collect_mountain_points(&mut self) {
        for stage in &mut self.stages {
            let points = stage.mountain_points();
            for (rider, delta) in stage.ranked_riders().into_iter().zip(points) {
                self.results.add_points(rider, delta);
            }
        }
    }

    /// Accumulated points in race ranking order.
    pub fn race_points(&self) -> Vec<u32> {
        self.results.points_in_rank_order()
    }

    pub fn riders_ranked_by_points(&self) -> Vec<RiderId> {
        self.results.riders_ranked_by_points()
    }

    /// Total adjusted times in general classification order.
    pub fn general_classification_times(&mut self) -> Result<Vec<NaiveTime>> {
        self.collect_results()?;
        Ok(self
            .results
            .iter()
            .map(|result| result.adjusted_time().unwrap_or(result.finish_time()))
            .collect())
    }

    pub fn general_classification_rank(&mut self) -> Result<Vec<RiderId>> {
        self.collect_results()?;
        Ok(self.results.ranked_riders())
    }

    /// Points totals in general classification order.
    pub fn points_totals(&mut self) -> Result<Vec<u32>> {
        self.collect_results()?;
        self.collect_points();
        Ok(self.race_points())
    }

    /// Mountain points totals in general classification order.
    pub fn mountain_points_totals(&mut self) -> Result<Vec<u32>> {
        self.collect_results()?;
        self.collect_mountain_points();
        Ok(self.race_points())
    }

    pub fn points_classification_rank(&mut self) -> Result<Vec<RiderId>> {
        self.collect_results()?;
        self.collect_points();
        Ok(self.riders_ranked_by_points())
    }

    pub fn mountain_points_classification_rank(&mut self) -> Result<Vec<RiderId>> {
        self.collect_results()?;
        self.collect_mountain_points();
        Ok(self.riders_ranked_by_points())
    }
}
