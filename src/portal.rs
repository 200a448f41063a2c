//! The portal: one entry point owning every team, race and ID counter
//!
//! [`Portal`] is the surface callers work against. It resolves IDs to entities,
//! enforces naming and existence rules, and forwards to [`Race`], [`Stage`] and
//! [`Team`] for the domain logic. Every lookup of an unknown ID fails with
//! [`CyclingError::UnknownId`].
//!
//! ## Usage Example
//!
//! ```rust
//! use chrono::{NaiveDate, NaiveTime};
//! use peloton::{Portal, StageType};
//!
//! # fn main() -> peloton::Result<()> {
//! let mut portal = Portal::new();
//! let race = portal.create_race("Tour", "Three weeks in July")?;
//! let start = NaiveDate::from_ymd_opt(2026, 7, 4).unwrap().and_hms_opt(11, 0, 0).unwrap();
//! let stage = portal.add_stage_to_race(race, "Opening", "", 182.0, start, StageType::Flat)?;
//! portal.add_intermediate_sprint_to_stage(stage, 90.0)?;
//! portal.conclude_stage_preparation(stage)?;
//!
//! let team = portal.create_team("Rouleurs", "")?;
//! let rider = portal.create_rider(team, "Anna Berg", 1998)?;
//! let at = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap();
//! portal.register_result(stage, rider, &[at(11, 0), at(13, 0), at(15, 10)])?;
//!
//! assert_eq!(portal.riders_points_in_stage(stage)?, vec![50 + 20]);
//! # Ok(())
//! # }
//! ```

use chrono::{NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::ids::IdAllocator;
use crate::race::{Race, RaceDetails};
use crate::registry::{Rider, Team, ensure_unique_name, validate_name};
use crate::segment::{Climb, Segment};
use crate::stage::Stage;
use crate::types::rules::MIN_STAGE_LENGTH;
use crate::types::{
    ClimbCategory, EntityKind, RaceId, RiderId, SegmentId, StageId, StageType, TeamId,
};
use crate::{CyclingError, Result};

/// Owner of all teams and races.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct Portal {
    pub(crate) teams: Vec<Team>,
    pub(crate) races: Vec<Race>,
    pub(crate) ids: IdAllocator,
}

impl Portal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Borrow the ID counters, e.g. to inspect what will be allocated next.
    pub fn ids(&self) -> &IdAllocator {
        &self.ids
    }

    fn race(&self, race: RaceId) -> Result<&Race> {
        self.races
            .iter()
            .find(|r| r.id() == race)
            .ok_or_else(|| CyclingError::unknown_id(EntityKind::Race, race))
    }

    fn race_mut(&mut self, race: RaceId) -> Result<&mut Race> {
        self.races
            .iter_mut()
            .find(|r| r.id() == race)
            .ok_or_else(|| CyclingError::unknown_id(EntityKind::Race, race))
    }

    fn stage(&self, stage: StageId) -> Result<&Stage> {
        self.races
            .iter()
            .find_map(|race| race.stage(stage))
            .ok_or_else(|| CyclingError::unknown_id(EntityKind::Stage, stage))
    }

    fn stage_mut(&mut self, stage: StageId) -> Result<&mut Stage> {
        self.races
            .iter_mut()
            .find_map(|race| race.stage_mut(stage))
            .ok_or_else(|| CyclingError::unknown_id(EntityKind::Stage, stage))
    }

    fn team(&self, team: TeamId) -> Result<&Team> {
        self.teams
            .iter()
            .find(|t| t.id() == team)
            .ok_or_else(|| CyclingError::unknown_id(EntityKind::Team, team))
    }

    fn team_mut(&mut self, team: TeamId) -> Result<&mut Team> {
        self.teams
            .iter_mut()
            .find(|t| t.id() == team)
            .ok_or_else(|| CyclingError::unknown_id(EntityKind::Team, team))
    }

    fn ensure_rider(&self, rider: RiderId) -> Result<()> {
        if self.teams.iter().any(|team| team.has_rider(rider)) {
            Ok(())
        } else {
            Err(CyclingError::unknown_id(EntityKind::Rider, rider))
        }
    }

    fn purge_rider_results(&mut self, rider: RiderId) {
        for race in &mut self.races {
            for stage in race.stages_mut() {
                stage.remove_rider_results(rider);
            }
        }
    }

    // Races

    pub fn race_ids(&self) -> Vec<RaceId> {
        self.races.iter().map(Race::id).collect()
    }

    pub fn create_race(&mut self, name: &str, description: &str) -> Result<RaceId> {
        ensure_unique_name(self.races.iter().map(Race::name), name)?;
        validate_name(name)?;

        let id = self.ids.next_race()?;
        self.races.push(Race::new(id, name, description));
        info!(race = %id, name, "Created race");
        Ok(id)
    }

    pub fn view_race_details(&self, race: RaceId) -> Result<RaceDetails> {
        Ok(self.race(race)?.details())
    }

    pub fn remove_race_by_id(&mut self, race: RaceId) -> Result<()> {
        let index = self
            .races
            .iter()
            .position(|r| r.id() == race)
            .ok_or_else(|| CyclingError::unknown_id(EntityKind::Race, race))?;
        self.races.remove(index);
        info!(race = %race, "Removed race");
        Ok(())
    }

    pub fn remove_race_by_name(&mut self, name: &str) -> Result<()> {
        let index = self
            .races
            .iter()
            .position(|r| r.name() == name)
            .ok_or_else(|| CyclingError::UnknownName { name: name.to_owned() })?;
        let removed = self.races.remove(index);
        info!(race = %removed.id(), name, "Removed race");
        Ok(())
    }

    pub fn number_of_stages(&self, race: RaceId) -> Result<usize> {
        Ok(self.race(race)?.stages().len())
    }

    // Stages

    pub fn add_stage_to_race(
        &mut self,
        race: RaceId,
        name: &str,
        description: &str,
        length: f64,
        start_time: NaiveDateTime,
        stage_type: StageType,
    ) -> Result<StageId> {
        self.race(race)?;
        validate_name(name)?;
        ensure_unique_name(
            self.races.iter().flat_map(|r| r.stages()).map(Stage::name),
            name,
        )?;
        if !length.is_finite() || length < MIN_STAGE_LENGTH {
            return Err(CyclingError::InvalidLength { length, minimum: MIN_STAGE_LENGTH });
        }

        let id = self.ids.next_stage()?;
        let stage = Stage::new(id, name, description, length, start_time, stage_type);
        self.race_mut(race)?.add_stage(stage);
        info!(race = %race, stage = %id, name, %stage_type, "Added stage");
        Ok(id)
    }

    /// Stage IDs ordered by start time.
    pub fn race_stages(&self, race: RaceId) -> Result<Vec<StageId>> {
        Ok(self.race(race)?.stage_ids())
    }

    pub fn stage_length(&self, stage: StageId) -> Result<f64> {
        Ok(self.stage(stage)?.length())
    }

    pub fn remove_stage_by_id(&mut self, stage: StageId) -> Result<()> {
        let race = self
            .races
            .iter_mut()
            .find(|race| race.stage(stage).is_some())
            .ok_or_else(|| CyclingError::unknown_id(EntityKind::Stage, stage))?;
        race.remove_stage(stage)?;
        info!(stage = %stage, "Removed stage");
        Ok(())
    }

    pub fn conclude_stage_preparation(&mut self, stage: StageId) -> Result<()> {
        self.stage_mut(stage)?.conclude_preparation()
    }

    /// Segment IDs ordered by location.
    pub fn stage_segments(&self, stage: StageId) -> Result<Vec<SegmentId>> {
        Ok(self.stage(stage)?.segment_ids())
    }

    // Segments

    pub fn add_categorized_climb_to_stage(
        &mut self,
        stage: StageId,
        location: f64,
        category: ClimbCategory,
        average_gradient: f64,
        length: f64,
    ) -> Result<SegmentId> {
        let mut ids = self.ids;
        let id = ids.next_segment()?;
        let climb = Segment::climb(id, location, Climb { category, average_gradient, length });
        self.stage_mut(stage)?.add_segment(climb)?;
        self.ids = ids;
        Ok(id)
    }

    pub fn add_intermediate_sprint_to_stage(&mut self, stage: StageId, location: f64) -> Result<SegmentId> {
        let mut ids = self.ids;
        let id = ids.next_segment()?;
        self.stage_mut(stage)?.add_segment(Segment::sprint(id, location))?;
        self.ids = ids;
        Ok(id)
    }

    pub fn remove_segment(&mut self, segment: SegmentId) -> Result<()> {
        let stage = self
            .races
            .iter_mut()
            .flat_map(|race| race.stages_mut())
            .find(|stage| stage.has_segment(segment))
            .ok_or_else(|| CyclingError::unknown_id(EntityKind::Segment, segment))?;
        stage.remove_segment(segment)?;
        Ok(())
    }

    // Teams and riders

    pub fn create_team(&mut self, name: &str, description: &str) -> Result<TeamId> {
        ensure_unique_name(self.teams.iter().map(Team::name), name)?;
        validate_name(name)?;

        let id = self.ids.next_team()?;
        self.teams.push(Team::new(id, name, description));
        info!(team = %id, name, "Created team");
        Ok(id)
    }

    /// Remove a team, its riders, and all of their results.
    pub fn remove_team(&mut self, team: TeamId) -> Result<()> {
        let riders = self.team(team)?.rider_ids();
        for rider in riders {
            self.purge_rider_results(rider);
        }
        self.teams.retain(|t| t.id() != team);
        info!(team = %team, "Removed team");
        Ok(())
    }

    pub fn teams(&self) -> Vec<TeamId> {
        self.teams.iter().map(Team::id).collect()
    }

    pub fn team_riders(&self, team: TeamId) -> Result<Vec<RiderId>> {
        Ok(self.team(team)?.rider_ids())
    }

    pub fn create_rider(&mut self, team: TeamId, name: &str, year_of_birth: i32) -> Result<RiderId> {
        let mut ids = self.ids;
        let id = ids.next_rider()?;
        let rider = Rider::new(id, team, name, year_of_birth)?;
        self.team_mut(team)?.add_rider(rider);
        self.ids = ids;
        debug!(team = %team, rider = %id, "Created rider");
        Ok(id)
    }

    /// Remove a rider and all of their results.
    pub fn remove_rider(&mut self, rider: RiderId) -> Result<()> {
        let removed = self.teams.iter_mut().find_map(|team| team.remove_rider(rider));
        if removed.is_none() {
            return Err(CyclingError::unknown_id(EntityKind::Rider, rider));
        }
        self.purge_rider_results(rider);
        debug!(rider = %rider, "Removed rider");
        Ok(())
    }

    // Stage results

    /// Register a rider's checkpoints: start, one per segment, finish.
    pub fn register_result(&mut self, stage: StageId, rider: RiderId, checkpoints: &[NaiveTime]) -> Result<()> {
        self.stage(stage)?;
        self.ensure_rider(rider)?;
        self.stage_mut(stage)?.process_results(rider, checkpoints)
    }

    /// Segment times followed by the stage elapsed time; empty without a result.
    pub fn rider_results_in_stage(&self, stage: StageId, rider: RiderId) -> Result<Vec<NaiveTime>> {
        let stage = self.stage(stage)?;
        self.ensure_rider(rider)?;
        Ok(stage.rider_results(rider))
    }

    pub fn rider_adjusted_elapsed_time_in_stage(
        &mut self,
        stage: StageId,
        rider: RiderId,
    ) -> Result<Option<NaiveTime>> {
        self.stage(stage)?;
        self.ensure_rider(rider)?;
        Ok(self.stage_mut(stage)?.adjusted_rider_time(rider))
    }

    pub fn delete_rider_results_in_stage(&mut self, stage: StageId, rider: RiderId) -> Result<()> {
        self.stage(stage)?;
        self.ensure_rider(rider)?;
        self.stage_mut(stage)?.remove_rider_results(rider);
        Ok(())
    }

    pub fn riders_rank_in_stage(&self, stage: StageId) -> Result<Vec<RiderId>> {
        Ok(self.stage(stage)?.ranked_riders())
    }

    pub fn ranked_adjusted_elapsed_times_in_stage(&mut self, stage: StageId) -> Result<Vec<NaiveTime>> {
        Ok(self.stage_mut(stage)?.ranked_adjusted_times())
    }

    pub fn riders_points_in_stage(&mut self, stage: StageId) -> Result<Vec<u32>> {
        Ok(self.stage_mut(stage)?.riders_points())
    }

    pub fn riders_mountain_points_in_stage(&mut self, stage: StageId) -> Result<Vec<u32>> {
        Ok(self.stage_mut(stage)?.mountain_points())
    }

    // Race classifications

    pub fn general_classification_times_in_race(&mut self, race: RaceId) -> Result<Vec<NaiveTime>> {
        self.race_mut(race)?.general_classification_times()
    }

    pub fn riders_points_in_race(&mut self, race: RaceId) -> Result<Vec<u32>> {
        self.race_mut(race)?.points_totals()
    }

    pub fn riders_mountain_points_in_race(&mut self, race: RaceId) -> Result<Vec<u32>> {
        self.race_mut(race)?.mountain_points_totals()
    }

    pub fn riders_general_classification_rank(&mut self, race: RaceId) -> Result<Vec<RiderId>> {
        self.race_mut(race)?.general_classification_rank()
    }

    pub fn riders_point_classification_rank(&mut self, race: RaceId) -> Result<Vec<RiderId>> {
        self.race_mut(race)?.points_classification_rank()
    }

    pub fn riders_mountain_point_classification_rank(&mut self, race: RaceId) -> Result<Vec<RiderId>> {
        self.race_mut(race)?.mountain_points_classification_rank()
    }

    /// Remove every entity and restart all ID counters at 1.
    pub fn erase(&mut self) {
        self.teams.clear();
        self.races.clear();
        self.ids.reset();
        info!("Portal erased");
    }
}
