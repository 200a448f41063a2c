//! Stage and segment classification enums

use serde::{Deserialize, Serialize};
use std::fmt;

use super::points;

/// Terrain profile of a stage, which selects its finish points table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub enum StageType {
    /// Flat stage, favouring sprinters
    Flat,
    /// Hilly finish or moderate climbs
    MediumMountain,
    /// High mountain stage
    HighMountain,
    /// Individual time trial; results are never bunched
    TimeTrial,
}

impl StageType {
    /// Stage finish points table for this stage type.
    pub const fn points_table(self) -> &'static [u32] {
        match self {
            StageType::Flat => points::FLAT_STAGE,
            StageType::MediumMountain => points::MEDIUM_MOUNTAIN_STAGE,
            StageType::HighMountain | StageType::TimeTrial => points::OTHER_STAGE,
        }
    }

    /// Whether close finishers of this stage type share a bunched time.
    pub const fn bunches_finishers(self) -> bool {
        !matches!(self, StageType::TimeTrial)
    }
}

impl fmt::Display for StageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StageType::Flat => "flat",
            StageType::MediumMountain => "medium mountain",
            StageType::HighMountain => "high mountain",
            StageType::TimeTrial => "time trial",
        };
        f.write_str(name)
    }
}

/// Lifecycle state of a stage.
///
/// A stage starts in [`StageState::Preparing`] and moves to
/// [`StageState::WaitingForResults`] exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub enum StageState {
    /// Segments may be added or removed; no results accepted yet
    #[default]
    Preparing,
    /// Segment layout is frozen; rider results are accepted
    WaitingForResults,
}

impl fmt::Display for StageState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StageState::Preparing => f.write_str("preparing"),
            StageState::WaitingForResults => f.write_str("waiting for results"),
        }
    }
}

/// Categorised climb difficulty, from the easiest (C4) to hors catégorie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub enum ClimbCategory {
    C4,
    C3,
    C2,
    C1,
    HC,
}

impl ClimbCategory {
    /// Mountain points table for this category.
    pub const fn points_table(self) -> &'static [u32] {
        match self {
            ClimbCategory::C4 => points::CLIMB_C4,
            ClimbCategory::C3 => points::CLIMB_C3,
            ClimbCategory::C2 => points::CLIMB_C2,
            ClimbCategory::C1 => points::CLIMB_C1,
            ClimbCategory::HC => points::CLIMB_HC,
        }
    }
}

/// Reporting view of a segment's type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub enum SegmentType {
    C4,
    C3,
    C2,
    C1,
    HC,
    Sprint,
}

impl SegmentType {
    /// Climb category, or `None` for intermediate sprints.
    pub const fn climb_category(self) -> Option<ClimbCategory> {
        match self {
            SegmentType::C4 => Some(ClimbCategory::C4),
            SegmentType::C3 => Some(ClimbCategory::C3),
            SegmentType::C2 => Some(ClimbCategory::C2),
            SegmentType::C1 => Some(ClimbCategory::C1),
            SegmentType::HC => Some(ClimbCategory::HC),
            SegmentType::Sprint => None,
        }
    }

    /// Points table applied to riders crossing this segment.
    pub const fn points_table(self) -> &'static [u32] {
        match self.climb_category() {
            Some(category) => category.points_table(),
            None => points::SPRINT,
        }
    }
}

impl From<ClimbCategory> for SegmentType {
    fn from(category: ClimbCategory) -> Self {
        match category {
            ClimbCategory::C4 => SegmentType::C4,
            ClimbCategory::C3 => SegmentType::C3,
            ClimbCategory::C2 => SegmentType::C2,
            ClimbCategory::C1 => SegmentType::C1,
            ClimbCategory::HC => SegmentType::HC,
        }
    }
}
