//! Ordered per-rider result collections
//!
//! A [`ResultSet`] holds at most one [`RiderResult`] per rider, kept in ascending
//! raw finish-time order. That order *is* the ranking: it is never re-sorted by
//! adjusted time or by points. Segments, stages and races each own one.

use std::collections::HashSet;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::types::RiderId;
use crate::{CyclingError, Result};

/// A single rider's result within one scoring context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct RiderResult {
    rider: RiderId,
    finish_time: NaiveTime,
    adjusted_time: Option<NaiveTime>,
    points: u32,
}

impl RiderResult {
    fn new(rider: RiderId, finish_time: NaiveTime) -> Self {
        Self { rider, finish_time, adjusted_time: None, points: 0 }
    }

    pub fn rider(&self) -> RiderId {
        self.rider
    }

    /// Raw finish time (elapsed time for segments and stages).
    pub fn finish_time(&self) -> NaiveTime {
        self.finish_time
    }

    /// Finish time after bunching, if it has been computed.
    pub fn adjusted_time(&self) -> Option<NaiveTime> {
        self.adjusted_time
    }

    pub fn points(&self) -> u32 {
        self.points
    }
}

/// Results ordered by ascending raw finish time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
#[serde(transparent)]
pub struct ResultSet {
    results: Vec<RiderResult>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a result, keeping finish-time order.
    ///
    /// The new result goes before the first result with a strictly later finish
    /// time, so riders with equal times keep their insertion order.
    pub fn add(&mut self, rider: RiderId, finish_time: NaiveTime) -> Result<()> {
        if self.has_result(rider) {
            return Err(CyclingError::DuplicateResult { rider });
        }

        let index = self
            .results
            .iter()
            .position(|existing| finish_time < existing.finish_time)
            .unwrap_or(self.results.len());
        self.results.insert(index, RiderResult::new(rider, finish_time));
        Ok(())
    }

    pub fn has_result(&self, rider: RiderId) -> bool {
        self.results.iter().any(|result| result.rider == rider)
    }

    /// Remove the rider's result. No-op when absent.
    pub fn remove(&mut self, rider: RiderId) {
        self.results.retain(|result| result.rider != rider);
    }

    pub fn entry(&self, rider: RiderId) -> Option<&RiderResult> {
        self.results.iter().find(|result| result.rider == rider)
    }

    fn entry_mut(&mut self, rider: RiderId) -> Option<&mut RiderResult> {
        self.results.iter_mut().find(|result| result.rider == rider)
    }

    /// Raw finish time of the rider.
    pub fn get(&self, rider: RiderId) -> Option<NaiveTime> {
        self.entry(rider).map(RiderResult::finish_time)
    }

    /// Adjusted time of the rider, if computed.
    pub fn get_adjusted(&self, rider: RiderId) -> Option<NaiveTime> {
        self.entry(rider).and_then(RiderResult::adjusted_time)
    }

    /// Set the rider's adjusted time. No-op when absent.
    pub fn set_adjusted(&mut self, rider: RiderId, time: NaiveTime) {
        if let Some(result) = self.entry_mut(rider) {
            result.adjusted_time = Some(time);
        }
    }

    /// Add `delta` to the rider's points. No-op when absent.
    pub fn add_points(&mut self, rider: RiderId, delta: u32) {
        if let Some(result) = self.entry_mut(rider) {
            result.points += delta;
        }
    }

    /// Overwrite points by rank position from a points table.
    ///
    /// The rider at rank `i` gets `table[i]`; riders ranked past the end of the
    /// table keep their current points. Calling this twice is idempotent.
    pub fn assign_points(&mut self, table: &[u32]) {
        for (result, &points) in self.results.iter_mut().zip(table) {
            result.points = points;
        }
    }

    /// Recompute every adjusted time in ranking order.
    ///
    /// `rule` sees the previous result (if any) and the current one.
    pub(crate) fn set_adjusted_with<F>(&mut self, mut rule: F)
    where
        F: FnMut(Option<&RiderResult>, &RiderResult) -> NaiveTime,
    {
        for index in 0..self.results.len() {
            let adjusted = {
                let previous = index.checked_sub(1).map(|prev| &self.results[prev]);
                rule(previous, &self.results[index])
            };
            self.results[index].adjusted_time = Some(adjusted);
        }
    }

    /// Rider IDs in ranking order.
    pub fn ranked_riders(&self) -> Vec<RiderId> {
        self.results.iter().map(RiderResult::rider).collect()
    }

    /// Adjusted times in ranking order.
    pub fn ranked_adjusted_times(&self) -> Vec<Option<NaiveTime>> {
        self.results.iter().map(RiderResult::adjusted_time).collect()
    }

    /// Points in ranking order.
    pub fn points_in_rank_order(&self) -> Vec<u32> {
        self.results.iter().map(RiderResult::points).collect()
    }

    /// Rider IDs ordered by descending points.
    ///
    /// Repeatedly extracts the remaining entry with the strictly greatest points.
    /// Among equal points the entry scanned first (i.e. the better finish-time
    /// rank) wins, which makes the result deterministic for unchanged input.
    pub fn riders_ranked_by_points(&self) -> Vec<RiderId> {
        let mut remaining: Vec<&RiderResult> = self.results.iter().collect();
        let mut ranked = Vec::with_capacity(remaining.len());

        while !remaining.is_empty() {
            let mut best_index = 0;
            let mut best_points: Option<u32> = None;
            for (index, result) in remaining.iter().enumerate() {
                if best_points.is_none_or(|best| result.points > best) {
                    best_index = index;
                    best_points = Some(result.points);
                }
            }
            ranked.push(remaining.remove(best_index).rider);
        }

        ranked
    }

    /// Finish times never decrease and no rider appears twice.
    ///
    /// Always true for sets built through [`ResultSet::add`]; deserialized sets
    /// are checked with this before use.
    pub fn is_well_formed(&self) -> bool {
        let ordered = self.results.windows(2).all(|pair| pair[0].finish_time <= pair[1].finish_time);
        let mut seen = HashSet::with_capacity(self.results.len());
        ordered && self.results.iter().all(|result| seen.insert(result.rider))
    }

    pub fn iter(&self) -> impl Iterator<Item = &RiderResult> {
        self.results.iter()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn clear(&mut self) {
        self.results.clear();
    }
}
