//! Core value types shared by the results engine.
//!
//! This module provides the small, copyable vocabulary types the rest of the
//! crate is written in terms of.
//!
//! ## Contents
//!
//! - [`RiderId`], [`TeamId`], [`RaceId`], [`StageId`], [`SegmentId`]: integer
//!   identities allocated by [`IdAllocator`](crate::IdAllocator)
//! - [`StageType`] and [`StageState`]: stage profile and lifecycle
//! - [`ClimbCategory`] and [`SegmentType`]: segment classification
//! - [`points`]: position-dependent points tables
//! - [`rules`]: fixed competition rules (bunching gap, name limits, ...)
//! - [`time`]: 24-hour clock arithmetic for elapsed times
//!
//! ## Usage Example
//!
//! ```rust
//! use peloton::types::{ClimbCategory, SegmentType, StageType};
//!
//! assert_eq!(StageType::Flat.points_table()[0], 50);
//! assert_eq!(SegmentType::from(ClimbCategory::HC).points_table()[0], 20);
//! assert!(!StageType::TimeTrial.bunches_finishers());
//! ```

mod ids;
mod kinds;
pub mod points;
pub mod rules;
pub mod time;

pub use ids::{EntityKind, RaceId, RiderId, SegmentId, StageId, TeamId};
pub use kinds::{ClimbCategory, SegmentType, StageState, StageType};
