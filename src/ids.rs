//! Identifier allocation
//!
//! Every entity kind draws from its own counter. Counters start at 1, only move
//! forward, and are stored alongside the entities in snapshots so that IDs
//! are never reused after a reload.

use serde::{Deserialize, Serialize};

use crate::types::{EntityKind, RaceId, RiderId, SegmentId, StageId, TeamId};
use crate::{CyclingError, Result};

/// Per-kind monotonic ID counters.
///
/// Each field holds the next ID to hand out for that kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct IdAllocator {
    team: u32,
    rider: u32,
    race: u32,
    stage: u32,
    segment: u32,
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self { team: 1, rider: 1, race: 1, stage: 1, segment: 1 }
    }
}

/// Hand out the current value and advance. `u32::MAX` is never handed out.
fn bump(counter: &mut u32, kind: EntityKind) -> Result<u32> {
    let id = *counter;
    *counter = id.checked_add(1).ok_or(CyclingError::IdsExhausted { kind })?;
    Ok(id)
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_team(&mut self) -> Result<TeamId> {
        bump(&mut self.team, EntityKind::Team).map(TeamId)
    }

    pub fn next_rider(&mut self) -> Result<RiderId> {
        bump(&mut self.rider, EntityKind::Rider).map(RiderId)
    }

    pub fn next_race(&mut self) -> Result<RaceId> {
        bump(&mut self.race, EntityKind::Race).map(RaceId)
    }

    pub fn next_stage(&mut self) -> Result<StageId> {
        bump(&mut self.stage, EntityKind::Stage).map(StageId)
    }

    pub fn next_segment(&mut self) -> Result<SegmentId> {
        bump(&mut self.segment, EntityKind::Segment).map(SegmentId)
    }

    /// Return every counter to 1.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Next IDs in team, rider, race, stage, segment order.
    pub fn counters(&self) -> [u32; 5] {
        [self.team, self.rider, self.race, self.stage, self.segment]
    }
}
