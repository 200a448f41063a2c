//! Scored segments within a stage: categorised climbs and intermediate sprints

use serde::{Deserialize, Serialize};

use crate::results::ResultSet;
use crate::types::{ClimbCategory, RiderId, SegmentId, SegmentType, points};

/// Attributes of a categorised climb.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct Climb {
    pub category: ClimbCategory,
    /// Average gradient in percent
    pub average_gradient: f64,
    /// Climb length in kilometres, ending at the segment location
    pub length: f64,
}

/// What a segment scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub enum SegmentKind {
    /// Awards mountain points
    Climb(Climb),
    /// Awards points towards the points classification
    Sprint,
}

/// A climb or intermediate sprint and the times riders crossed it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct Segment {
    id: SegmentId,
    location: f64,
    kind: SegmentKind,
    results: ResultSet,
}

impl Segment {
    pub fn climb(id: SegmentId, location: f64, climb: Climb) -> Self {
        Self { id, location, kind: SegmentKind::Climb(climb), results: ResultSet::new() }
    }

    pub fn sprint(id: SegmentId, location: f64) -> Self {
        Self { id, location, kind: SegmentKind::Sprint, results: ResultSet::new() }
    }

    pub fn id(&self) -> SegmentId {
        self.id
    }

    /// Distance from the stage start to the segment finish line.
    pub fn location(&self) -> f64 {
        self.location
    }

    /// Distance from the stage start to where the segment begins.
    pub fn start_offset(&self) -> f64 {
        match &self.kind {
            SegmentKind::Climb(climb) => self.location - climb.length,
            SegmentKind::Sprint => self.location,
        }
    }

    pub fn kind(&self) -> &SegmentKind {
        &self.kind
    }

    pub fn segment_type(&self) -> SegmentType {
        match &self.kind {
            SegmentKind::Climb(climb) => climb.category.into(),
            SegmentKind::Sprint => SegmentType::Sprint,
        }
    }

    pub fn is_climb(&self) -> bool {
        matches!(self.kind, SegmentKind::Climb(_))
    }

    pub fn is_sprint(&self) -> bool {
        matches!(self.kind, SegmentKind::Sprint)
    }

    pub fn points_table(&self) -> &'static [u32] {
        match &self.kind {
            SegmentKind::Climb(climb) => climb.category.points_table(),
            SegmentKind::Sprint => points::SPRINT,
        }
    }

    /// Recompute every rider's points on this segment from the current ranking.
    pub fn assign_points(&mut self) {
        let table = self.points_table();
        self.results.assign_points(table);
    }

    /// Points the rider holds on this segment; 0 without a result.
    pub fn rider_points(&self, rider: RiderId) -> u32 {
        self.results.entry(rider).map_or(0, |result| result.points())
    }

    pub fn results(&self) -> &ResultSet {
        &self.results
    }

    pub(crate) fn results_mut(&mut self) -> &mut ResultSet {
        &mut self.results
    }
}
