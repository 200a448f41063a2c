//! Stages: segment layout, result registration, bunching and stage points
//!
//! A stage moves through two states. While [`StageState::Preparing`] its
//! segment layout may change; once preparation is concluded the layout is
//! frozen and rider results are accepted.
//!
//! ## Result registration
//!
//! Results arrive as wall-clock checkpoints: the start time, one crossing time
//! per segment (in location order), then the finish time. Every checkpoint is
//! converted to time elapsed since the start; the last one becomes the stage
//! result and the others go to the matching segments.
//!
//! ## Bunching
//!
//! On every stage type except time trials, a rider finishing strictly less than
//! [`BUNCHING_GAP`] behind the rider ranked immediately ahead is given the time of
//! the first rider of that chain. Chains are transitive, so a long group of
//! riders each within a second of the next all share the leader's time.

use chrono::{NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::results::ResultSet;
use crate::segment::{Segment, SegmentKind};
use crate::types::rules::BUNCHING_GAP;
use crate::types::time::elapsed_between;
use crate::types::{EntityKind, RiderId, SegmentId, StageId, StageState, StageType};
use crate::{CyclingError, Result};

/// A stage of a race.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct Stage {
    id: StageId,
    name: String,
    description: String,
    length: f64,
    start_time: NaiveDateTime,
    stage_type: StageType,
    state: StageState,
    segments: Vec<Segment>,
    results: ResultSet,
}

impl Stage {
    pub fn new(
        id: StageId,
        name: impl Into<String>,
        description: impl Into<String>,
        length: f64,
        start_time: NaiveDateTime,
        stage_type: StageType,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            length,
            start_time,
            stage_type,
            state: StageState::Preparing,
            segments: Vec::new(),
            results: ResultSet::new(),
        }
    }

    pub fn id(&self) -> StageId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Stage length in kilometres.
    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn start_time(&self) -> NaiveDateTime {
        self.start_time
    }

    pub fn stage_type(&self) -> StageType {
        self.stage_type
    }

    pub fn state(&self) -> StageState {
        self.state
    }

    /// Segments ordered by ascending location.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn segment_ids(&self) -> Vec<SegmentId> {
        self.segments.iter().map(Segment::id).collect()
    }

    pub fn has_segment(&self, segment: SegmentId) -> bool {
        self.segments.iter().any(|s| s.id() == segment)
    }

    /// Stage-level results, ranked by elapsed time.
    pub fn results(&self) -> &ResultSet {
        &self.results
    }

    fn require_state(&self, expected: StageState, operation: &'static str) -> Result<()> {
        if self.state == expected {
            Ok(())
        } else {
            Err(CyclingError::InvalidStageState { stage: self.id, state: self.state, operation })
        }
    }

    /// Insert a segment, keeping the layout ordered by location.
    pub fn add_segment(&mut self, segment: Segment) -> Result<()> {
        self.require_state(StageState::Preparing, "add segments")?;

        if self.stage_type == StageType::TimeTrial {
            return Err(CyclingError::InvalidStageType { stage: self.id, stage_type: self.stage_type });
        }

        let location = segment.location();
        if !(0.0..=self.length).contains(&location) {
            return Err(CyclingError::invalid_location(
                location,
                format!("outside the stage (0 to {} km)", self.length),
            ));
        }
        if let SegmentKind::Climb(climb) = segment.kind() {
            if !(0.0..).contains(&climb.length) {
                return Err(CyclingError::invalid_location(
                    location,
                    format!("climb length {} is invalid", climb.length),
                ));
            }
        }
        if segment.start_offset() < 0.0 {
            return Err(CyclingError::invalid_location(location, "climb starts before the stage start"));
        }

        let index = self
            .segments
            .iter()
            .position(|existing| existing.location() > location)
            .unwrap_or(self.segments.len());
        debug!(stage = %self.id, segment = %segment.id(), location, index, "Adding segment");
        self.segments.insert(index, segment);
        Ok(())
    }

    /// Remove a segment and its results.
    pub fn remove_segment(&mut self, segment: SegmentId) -> Result<Segment> {
        let index = self
            .segments
            .iter()
            .position(|s| s.id() == segment)
            .ok_or_else(|| CyclingError::unknown_id(EntityKind::Segment, segment))?;
        self.require_state(StageState::Preparing, "remove segments")?;

        debug!(stage = %self.id, segment = %segment, "Removing segment");
        Ok(self.segments.remove(index))
    }

    /// Freeze the segment layout and start accepting results.
    pub fn conclude_preparation(&mut self) -> Result<()> {
        self.require_state(StageState::Preparing, "conclude preparation")?;
        self.state = StageState::WaitingForResults;
        debug!(stage = %self.id, segments = self.segments.len(), "Stage preparation concluded");
        Ok(())
    }

    /// Record a rider's checkpoint times.
    ///
    /// `checkpoints` holds the start time, one time per segment and the finish
    /// time. All validation happens before anything is recorded, so an error
    /// leaves the stage and its segments untouched.
    pub fn process_results(&mut self, rider: RiderId, checkpoints: &[NaiveTime]) -> Result<()> {
        self.require_state(StageState::WaitingForResults, "register results")?;

        let expected = self.segments.len() + 2;
        if checkpoints.len() != expected {
            return Err(CyclingError::InvalidCheckpointCount { expected, found: checkpoints.len() });
        }

        if self.results.has_result(rider)
            || self.segments.iter().any(|segment| segment.results().has_result(rider))
        {
            return Err(CyclingError::DuplicateResult { rider });
        }

        let start = checkpoints[0];
        let elapsed: Vec<NaiveTime> =
            checkpoints[1..].iter().map(|&checkpoint| elapsed_between(start, checkpoint)).collect();
        let (finish, crossings) = match elapsed.split_last() {
            Some(split) => split,
            None => return Err(CyclingError::InvalidCheckpointCount { expected, found: 1 }),
        };

        self.results.add(rider, *finish)?;
        for (segment, &crossing) in self.segments.iter_mut().zip(crossings) {
            segment.results_mut().add(rider, crossing)?;
        }

        debug!(stage = %self.id, rider = %rider, elapsed = %finish, "Registered stage result");
        self.adjust_rider_results();
        Ok(())
    }

    /// Segment elapsed times in segment order followed by the stage elapsed time.
    ///
    /// Empty when the rider has no result on this stage.
    pub fn rider_results(&self, rider: RiderId) -> Vec<NaiveTime> {
        let Some(finish) = self.results.get(rider) else {
            return Vec::new();
        };

        self.segments
            .iter()
            .filter_map(|segment| segment.results().get(rider))
            .chain(std::iter::once(finish))
            .collect()
    }

    /// Recompute adjusted times from the current ranking.
    ///
    /// Time trials copy each raw time unchanged. Idempotent.
    pub fn adjust_rider_results(&mut self) {
        if !self.stage_type.bunches_finishers() {
            self.results.set_adjusted_with(|_, current| current.finish_time());
            return;
        }

        let mut chain_start: Option<NaiveTime> = None;
        self.results.set_adjusted_with(|previous, current| match previous {
            Some(previous)
                if current.finish_time().signed_duration_since(previous.finish_time())
                    < BUNCHING_GAP =>
            {
                let leader = *chain_start.get_or_insert(previous.finish_time());
                trace!(rider = %current.rider(), bunched_to = %leader, "Bunching rider");
                leader
            }
            _ => {
                chain_start = None;
                current.finish_time()
            }
        });
    }

    /// Adjusted elapsed time of the rider, or `None` without a result.
    pub fn adjusted_rider_time(&mut self, rider: RiderId) -> Option<NaiveTime> {
        if !self.stage_type.bunches_finishers() {
            return self.results.get(rider);
        }
        self.adjust_rider_results();
        self.results.get_adjusted(rider)
    }

    /// Adjusted elapsed times in ranking order.
    pub fn ranked_adjusted_times(&mut self) -> Vec<NaiveTime> {
        self.adjust_rider_results();
        self.results
            .iter()
            .map(|result| result.adjusted_time().unwrap_or(result.finish_time()))
            .collect()
    }

    pub fn ranked_riders(&self) -> Vec<RiderId> {
        self.results.ranked_riders()
    }

    /// Delete the rider's result from the stage and every segment.
    pub fn remove_rider_results(&mut self, rider: RiderId) {
        self.results.remove(rider);
        for segment in &mut self.segments {
            segment.results_mut().remove(rider);
        }
        debug!(stage = %self.id, rider = %rider, "Removed rider results");
    }

    /// Overwrite stage finish points from the stage type's table.
    pub fn assign_stage_points(&mut self) {
        self.results.assign_points(self.stage_type.points_table());
    }

    /// Points classification points per ranked rider: stage finish plus sprints.
    pub fn riders_points(&mut self) -> Vec<u32> {
        self.assign_stage_points();
        for segment in self.segments.iter_mut().filter(|segment| segment.is_sprint()) {
            segment.assign_points();
        }

        let sprints: Vec<&Segment> = self.segments.iter().filter(|s| s.is_sprint()).collect();
        self.results
            .iter()
            .map(|result| {
                let sprint_points: u32 =
                    sprints.iter().map(|sprint| sprint.rider_points(result.rider())).sum();
                result.points() + sprint_points
            })
            .collect()
    }

    /// Mountain points per ranked rider, summed over every climb.
    pub fn mountain_points(&mut self) -> Vec<u32> {
        for segment in self.segments.iter_mut().filter(|segment| segment.is_climb()) {
            segment.assign_points();
        }

        let climbs: Vec<&Segment> = self.segments.iter().filter(|s| s.is_climb()).collect();
        self.results
            .iter()
            .map(|result| climbs.iter().map(|climb| climb.rider_points(result.rider())).sum())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::Climb;
    use crate::test_utils::{hms, hms_milli, stage_start};
    use crate::types::ClimbCategory;
    use proptest::prelude::*;

    fn open_stage(stage_type: StageType) -> Stage {
        let mut stage = Stage::new(StageId(1), "Stage1", "", 180.0, stage_start(), stage_type);
        stage.conclude_preparation().unwrap();
        stage
    }

    fn register(stage: &mut Stage, rider: u32, finish: NaiveTime) {
        stage.process_results(RiderId(rider), &[hms(0, 0, 0), finish]).unwrap();
    }

    fn hilly_stage() -> Stage {
        let mut stage = Stage::new(StageId(2), "Hills", "", 150.0, stage_start(), StageType::HighMountain);
        stage.add_segment(Segment::sprint(SegmentId(10), 60.0)).unwrap();
        stage
            .add_segment(Segment::climb(
                SegmentId(11),
                120.0,
                Climb { category: ClimbCategory::C1, average_gradient: 7.2, length: 8.0 },
            ))
            .unwrap();
        stage
            .add_segment(Segment::climb(
                SegmentId(12),
                40.0,
                Climb { category: ClimbCategory::C3, average_gradient: 4.0, length: 3.0 },
            ))
            .unwrap();
        stage.conclude_preparation().unwrap();
        stage
    }

    #[test]
    fn segments_are_ordered_by_location() {
        let stage = hilly_stage();
        assert_eq!(stage.segment_ids(), vec![SegmentId(12), SegmentId(10), SegmentId(11)]);
    }

    #[test]
    fn equal_locations_keep_insertion_order() {
        let mut stage = Stage::new(StageId(1), "S", "", 100.0, stage_start(), StageType::Flat);
        stage.add_segment(Segment::sprint(SegmentId(1), 50.0)).unwrap();
        stage.add_segment(Segment::sprint(SegmentId(2), 50.0)).unwrap();
        assert_eq!(stage.segment_ids(), vec![SegmentId(1), SegmentId(2)]);
    }

    #[test]
    fn segment_layout_is_validated() {
        let mut stage = Stage::new(StageId(1), "S", "", 100.0, stage_start(), StageType::Flat);
        let beyond = stage.add_segment(Segment::sprint(SegmentId(1), 100.5));
        assert!(matches!(beyond, Err(CyclingError::InvalidLocation { .. })));

        let negative = stage.add_segment(Segment::sprint(SegmentId(2), -1.0));
        assert!(matches!(negative, Err(CyclingError::InvalidLocation { .. })));

        let early_climb = Segment::climb(
            SegmentId(3),
            5.0,
            Climb { category: ClimbCategory::C4, average_gradient: 3.0, length: 6.0 },
        );
        assert!(matches!(stage.add_segment(early_climb), Err(CyclingError::InvalidLocation { .. })));
        assert!(stage.segments().is_empty());

        stage.add_segment(Segment::sprint(SegmentId(4), 100.0)).unwrap();
        assert_eq!(stage.segment_ids(), vec![SegmentId(4)]);
    }

    #[test]
    fn non_finite_and_negative_extents_are_rejected() {
        let mut stage = Stage::new(StageId(1), "S", "", 100.0, stage_start(), StageType::Flat);
        let nan_sprint = stage.add_segment(Segment::sprint(SegmentId(1), f64::NAN));
        assert!(matches!(nan_sprint, Err(CyclingError::InvalidLocation { .. })));

        let climb = |length| Climb { category: ClimbCategory::C3, average_gradient: 5.0, length };
        let backwards = stage.add_segment(Segment::climb(SegmentId(2), 50.0, climb(-4.0)));
        assert!(matches!(backwards, Err(CyclingError::InvalidLocation { .. })));
        let unmeasured = stage.add_segment(Segment::climb(SegmentId(3), 50.0, climb(f64::NAN)));
        assert!(matches!(unmeasured, Err(CyclingError::InvalidLocation { .. })));
        assert!(stage.segments().is_empty());

        stage.add_segment(Segment::climb(SegmentId(4), 50.0, climb(0.0))).unwrap();
        assert_eq!(stage.segment_ids(), vec![SegmentId(4)]);
    }

    #[test]
    fn time_trials_reject_segments() {
        let mut stage = Stage::new(StageId(1), "TT", "", 30.0, stage_start(), StageType::TimeTrial);
        let result = stage.add_segment(Segment::sprint(SegmentId(1), 10.0));
        assert!(matches!(result, Err(CyclingError::InvalidStageType { .. })));
    }

    #[test]
    fn state_machine_guards_operations() {
        let mut stage = Stage::new(StageId(1), "S", "", 100.0, stage_start(), StageType::Flat);
        stage.add_segment(Segment::sprint(SegmentId(1), 30.0)).unwrap();

        let early = stage.process_results(RiderId(1), &[hms(0, 0, 0), hms(1, 0, 0), hms(2, 0, 0)]);
        assert!(matches!(early, Err(CyclingError::InvalidStageState { .. })));

        stage.conclude_preparation().unwrap();
        assert_eq!(stage.state(), StageState::WaitingForResults);
        assert!(matches!(stage.conclude_preparation(), Err(CyclingError::InvalidStageState { .. })));
        assert!(matches!(
            stage.add_segment(Segment::sprint(SegmentId(2), 40.0)),
            Err(CyclingError::InvalidStageState { .. })
        ));
        assert!(matches!(stage.remove_segment(SegmentId(1)), Err(CyclingError::InvalidStageState { .. })));
        assert!(matches!(stage.remove_segment(SegmentId(9)), Err(CyclingError::UnknownId { .. })));
    }

    #[test]
    fn remove_segment_while_preparing() {
        let mut stage = Stage::new(StageId(1), "S", "", 100.0, stage_start(), StageType::Flat);
        stage.add_segment(Segment::sprint(SegmentId(1), 30.0)).unwrap();
        stage.add_segment(Segment::sprint(SegmentId(2), 60.0)).unwrap();
        let removed = stage.remove_segment(SegmentId(1)).unwrap();
        assert_eq!(removed.id(), SegmentId(1));
        assert_eq!(stage.segment_ids(), vec![SegmentId(2)]);
    }

    #[test]
    fn process_results_distributes_elapsed_times() {
        let mut stage = hilly_stage();
        let checkpoints =
            [hms(10, 0, 0), hms(11, 5, 0), hms(11, 40, 0), hms(13, 10, 0), hms(14, 0, 30)];
        stage.process_results(RiderId(7), &checkpoints).unwrap();

        assert_eq!(
            stage.rider_results(RiderId(7)),
            vec![hms(1, 5, 0), hms(1, 40, 0), hms(3, 10, 0), hms(4, 0, 30)]
        );
        assert_eq!(stage.results().get(RiderId(7)), Some(hms(4, 0, 30)));
        assert_eq!(stage.segments()[0].results().get(RiderId(7)), Some(hms(1, 5, 0)));
        assert!(stage.rider_results(RiderId(8)).is_empty());
    }

    #[test]
    fn wrong_checkpoint_count_records_nothing() {
        let mut stage = hilly_stage();
        let result = stage.process_results(RiderId(1), &[hms(10, 0, 0), hms(11, 0, 0), hms(12, 0, 0)]);
        assert!(matches!(
            result,
            Err(CyclingError::InvalidCheckpointCount { expected: 5, found: 3 })
        ));
        assert!(stage.results().is_empty());
        assert!(stage.segments().iter().all(|segment| segment.results().is_empty()));
    }

    #[test]
    fn duplicate_result_records_nothing_new() {
        let mut stage = open_stage(StageType::Flat);
        register(&mut stage, 1, hms(4, 0, 0));
        let duplicate = stage.process_results(RiderId(1), &[hms(0, 0, 0), hms(3, 0, 0)]);
        assert!(matches!(duplicate, Err(CyclingError::DuplicateResult { .. })));
        assert_eq!(stage.results().get(RiderId(1)), Some(hms(4, 0, 0)));
    }

    #[test]
    fn bunching_example_from_a_sprint_finish() {
        let mut stage = open_stage(StageType::Flat);
        let start = hms(0, 0, 0);
        stage.process_results(RiderId(3), &[start, hms(12, 11, 0)]).unwrap();
        stage.process_results(RiderId(2), &[start, hms_milli(12, 5, 0, 500)]).unwrap();
        stage.process_results(RiderId(1), &[start, hms(12, 5, 0)]).unwrap();

        assert_eq!(stage.ranked_riders(), vec![RiderId(1), RiderId(2), RiderId(3)]);
        assert_eq!(stage.ranked_adjusted_times(), vec![hms(12, 5, 0), hms(12, 5, 0), hms(12, 11, 0)]);
    }

    #[test]
    fn bunching_is_transitive_and_resets() {
        let mut stage = open_stage(StageType::MediumMountain);
        register(&mut stage, 1, hms(3, 0, 0));
        register(&mut stage, 2, hms_milli(3, 0, 0, 500));
        register(&mut stage, 3, hms_milli(3, 0, 0, 900));
        // 0.6s behind the previous rider, so still part of the leading chain.
        register(&mut stage, 4, hms_milli(3, 0, 1, 500));
        register(&mut stage, 5, hms(3, 0, 3));
        register(&mut stage, 6, hms_milli(3, 0, 3, 400));
        register(&mut stage, 7, hms(3, 0, 5));

        assert_eq!(
            stage.ranked_adjusted_times(),
            vec![
                hms(3, 0, 0),
                hms(3, 0, 0),
                hms(3, 0, 0),
                hms(3, 0, 0),
                hms(3, 0, 3),
                hms(3, 0, 3),
                hms(3, 0, 5),
            ]
        );
    }

    #[test]
    fn long_chain_shares_leader_time() {
        let mut stage = open_stage(StageType::Flat);
        for rider in 0..5u32 {
            let finish = hms(2, 0, 0) + chrono::TimeDelta::milliseconds(900 * rider as i64);
            register(&mut stage, rider + 1, finish);
        }
        assert!(stage.ranked_adjusted_times().iter().all(|&time| time == hms(2, 0, 0)));
    }

    #[test]
    fn exactly_one_second_is_not_bunched() {
        let mut stage = open_stage(StageType::Flat);
        register(&mut stage, 1, hms(1, 0, 0));
        register(&mut stage, 2, hms(1, 0, 1));
        assert_eq!(stage.adjusted_rider_time(RiderId(2)), Some(hms(1, 0, 1)));
    }

    #[test]
    fn time_trials_are_not_bunched() {
        let mut stage = open_stage(StageType::TimeTrial);
        register(&mut stage, 1, hms(0, 40, 0));
        register(&mut stage, 2, hms_milli(0, 40, 0, 300));

        assert_eq!(stage.adjusted_rider_time(RiderId(2)), Some(hms_milli(0, 40, 0, 300)));
        assert_eq!(stage.ranked_adjusted_times(), vec![hms(0, 40, 0), hms_milli(0, 40, 0, 300)]);
    }

    #[test]
    fn adjusted_rider_time_for_absent_rider() {
        let mut stage = open_stage(StageType::Flat);
        register(&mut stage, 1, hms(1, 0, 0));
        assert_eq!(stage.adjusted_rider_time(RiderId(99)), None);
    }

    #[test]
    fn removing_results_clears_stage_and_segments() {
        let mut stage = hilly_stage();
        let start = hms(9, 0, 0);
        stage
            .process_results(RiderId(1), &[start, hms(10, 0, 0), hms(10, 30, 0), hms(12, 0, 0), hms(13, 0, 0)])
            .unwrap();
        stage
            .process_results(RiderId(2), &[start, hms(10, 1, 0), hms(10, 31, 0), hms(12, 1, 0), hms(13, 2, 0)])
            .unwrap();

        stage.remove_rider_results(RiderId(1));
        assert_eq!(stage.ranked_riders(), vec![RiderId(2)]);
        assert!(stage.segments().iter().all(|segment| !segment.results().has_result(RiderId(1))));
        assert!(stage.rider_results(RiderId(1)).is_empty());

        // A removed rider may register again.
        stage
            .process_results(RiderId(1), &[start, hms(10, 0, 0), hms(10, 30, 0), hms(12, 0, 0), hms(13, 0, 0)])
            .unwrap();
        assert_eq!(stage.ranked_riders(), vec![RiderId(1), RiderId(2)]);
    }

    #[test]
    fn stage_points_by_type() {
        let mut flat = open_stage(StageType::Flat);
        let mut hilly = open_stage(StageType::MediumMountain);
        let mut tt = open_stage(StageType::TimeTrial);
        for stage in [&mut flat, &mut hilly, &mut tt] {
            register(stage, 1, hms(4, 0, 0));
            register(stage, 2, hms(4, 1, 0));
        }

        assert_eq!(flat.riders_points(), vec![50, 30]);
        assert_eq!(hilly.riders_points(), vec![30, 25]);
        assert_eq!(tt.riders_points(), vec![20, 17]);
    }

    #[test]
    fn riders_points_include_sprints_and_ignore_climbs() {
        let mut stage = hilly_stage();
        let start = hms(9, 0, 0);
        // Rider 2 wins the sprint, rider 1 wins the stage.
        stage
            .process_results(RiderId(1), &[start, hms(10, 0, 0), hms(10, 31, 0), hms(12, 0, 0), hms(13, 0, 0)])
            .unwrap();
        stage
            .process_results(RiderId(2), &[start, hms(10, 1, 0), hms(10, 30, 0), hms(12, 1, 0), hms(13, 5, 0)])
            .unwrap();

        assert_eq!(stage.riders_points(), vec![20 + 17, 17 + 20]);
        assert_eq!(stage.riders_points(), vec![37, 37]);
    }

    #[test]
    fn mountain_points_sum_every_climb() {
        let mut stage = hilly_stage();
        let start = hms(9, 0, 0);
        // Segment order: C3 at 40km, sprint at 60km, C1 at 120km.
        stage
            .process_results(RiderId(1), &[start, hms(10, 0, 0), hms(10, 30, 0), hms(12, 5, 0), hms(13, 0, 0)])
            .unwrap();
        stage
            .process_results(RiderId(2), &[start, hms(10, 2, 0), hms(10, 31, 0), hms(12, 0, 0), hms(13, 1, 0)])
            .unwrap();
        stage
            .process_results(RiderId(3), &[start, hms(10, 1, 0), hms(10, 32, 0), hms(12, 9, 0), hms(13, 2, 0)])
            .unwrap();

        // C3: [1, 3, 2] -> 2, 1, 0. C1: [2, 1, 3] -> 10, 8, 6.
        assert_eq!(stage.mountain_points(), vec![2 + 8, 10, 1 + 6]);
    }

    #[test]
    fn mountain_points_without_climbs_are_zero() {
        let mut stage = open_stage(StageType::Flat);
        register(&mut stage, 1, hms(4, 0, 0));
        register(&mut stage, 2, hms(4, 1, 0));
        assert_eq!(stage.mountain_points(), vec![0, 0]);
    }

    proptest! {
        #[test]
        fn bunching_is_idempotent_and_never_later_than_raw(
            offsets in prop::collection::vec(0i64..5_000, 1..25)
        ) {
            let mut stage = open_stage(StageType::Flat);
            for (index, ms) in offsets.iter().enumerate() {
                let finish = hms(3, 0, 0) + chrono::TimeDelta::milliseconds(*ms);
                register(&mut stage, index as u32 + 1, finish);
            }

            let first = stage.ranked_adjusted_times();
            let second = stage.ranked_adjusted_times();
            prop_assert_eq!(&first, &second);

            let raw: Vec<NaiveTime> = stage.results().iter().map(|r| r.finish_time()).collect();
            for (adjusted, raw) in first.iter().zip(&raw) {
                prop_assert!(adjusted <= raw);
            }
            prop_assert_eq!(first[0], raw[0]);
        }
    }
}
