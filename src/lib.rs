//! Results aggregation and classification for multi-stage cycling races.
//!
//! Peloton turns raw checkpoint times into stage rankings, bunched finish
//! times, and the points, mountain and general classifications of a race.
//!
//! # Features
//!
//! - **Ordered results**: every segment, stage and race keeps its results ranked by time
//! - **Time bunching**: riders finishing within a second of each other share a time
//! - **Points tables**: stage, sprint and climb points by finishing position
//! - **Race classifications**: general, points and mountain rankings across stages
//! - **Snapshots**: save and restore the complete portal state as YAML
//!
//! # Quick Start
//!
//! ```rust
//! use chrono::{NaiveDate, NaiveTime};
//! use peloton::{ClimbCategory, Portal, StageType};
//!
//! # fn main() -> peloton::Result<()> {
//! let mut portal = Portal::new();
//! let race = portal.create_race("Tour", "Three weeks in July")?;
//! let start = NaiveDate::from_ymd_opt(2026, 7, 10).unwrap().and_hms_opt(12, 0, 0).unwrap();
//! let stage = portal.add_stage_to_race(race, "Galibier", "", 150.0, start, StageType::HighMountain)?;
//! portal.add_categorized_climb_to_stage(stage, 150.0, ClimbCategory::HC, 7.1, 18.0)?;
//! portal.conclude_stage_preparation(stage)?;
//!
//! let team = portal.create_team("Grimpeurs", "")?;
//! let first = portal.create_rider(team, "Ana", 1996)?;
//! let second = portal.create_rider(team, "Bea", 1998)?;
//! let at = |h, m, s| NaiveTime::from_hms_opt(h, m, s).unwrap();
//! portal.register_result(stage, second, &[at(12, 0, 0), at(16, 30, 0), at(16, 30, 0)])?;
//! portal.register_result(stage, first, &[at(12, 0, 0), at(16, 29, 0), at(16, 29, 0)])?;
//!
//! assert_eq!(portal.riders_general_classification_rank(race)?, vec![first, second]);
//! assert_eq!(portal.riders_mountain_points_in_race(race)?, vec![20, 15]);
//! # Ok(())
//! # }
//! ```

// Core types and error handling
mod error;
#[cfg_attr(any(test, feature = "benchmark"), path = "test_utils.rs")]
#[cfg(any(test, feature = "benchmark"))]
pub mod test_utils;
pub mod types;

// Results engine
pub mod race;
pub mod results;
pub mod segment;
pub mod stage;

// Entity management and persistence
pub mod ids;
pub mod portal;
pub mod registry;
mod store;

// Core exports
pub use error::*;
pub use types::*;

pub use ids::IdAllocator;
pub use portal::Portal;
pub use race::{Race, RaceDetails};
pub use registry::{Rider, Team, validate_name};
pub use results::{ResultSet, RiderResult};
pub use segment::{Climb, Segment, SegmentKind};
pub use stage::Stage;
