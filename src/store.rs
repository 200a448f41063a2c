//! Snapshot persistence for the portal
//!
//! The whole entity graph (teams, races with their stages, segments and
//! results, and the ID counters) is written as one YAML document. Loading is
//! all-or-nothing: the snapshot is parsed and checked in full before it
//! replaces the portal's state.
//!
//! ```rust
//! use peloton::Portal;
//!
//! # fn main() -> peloton::Result<()> {
//! let mut portal = Portal::new();
//! portal.create_team("Rouleurs", "Flat specialists")?;
//!
//! let blob = portal.to_blob()?;
//! let restored = Portal::from_blob(&blob)?;
//! assert_eq!(restored.teams(), portal.teams());
//! # Ok(())
//! # }
//! ```

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::ids::IdAllocator;
use crate::portal::Portal;
use crate::race::Race;
use crate::registry::Team;
use crate::results::ResultSet;
use crate::{CyclingError, Result};

/// Serialized form of a [`Portal`].
#[derive(Debug, Serialize, Deserialize)]
struct Snapshot {
    ids: IdAllocator,
    teams: Vec<Team>,
    races: Vec<Race>,
}

impl Snapshot {
    /// Counters must be ahead of every ID of their kind and IDs may not repeat.
    /// Result sets must be ranked with one entry per rider.
    fn validate(&self) -> Result<()> {
        let stages = || self.races.iter().flat_map(|race| race.stages());
        let handed_out: [(&str, Vec<u32>); 5] = [
            ("team", self.teams.iter().map(|t| t.id().get()).collect()),
            ("rider", self.teams.iter().flat_map(|t| t.riders()).map(|r| r.id.get()).collect()),
            ("race", self.races.iter().map(|r| r.id().get()).collect()),
            ("stage", stages().map(|s| s.id().get()).collect()),
            ("segment", stages().flat_map(|s| s.segments()).map(|s| s.id().get()).collect()),
        ];

        for ((kind, ids), next) in handed_out.iter().zip(self.ids.counters()) {
            let max = ids.iter().copied().max().unwrap_or(0);
            if next <= max {
                return Err(CyclingError::parse_error(
                    "snapshot",
                    format!("{kind} counter {next} does not exceed highest {kind} ID {max}"),
                ));
            }
            if let Some(id) = first_repeat(ids) {
                return Err(CyclingError::parse_error("snapshot", format!("{kind} ID {id} appears twice")));
            }
        }

        for race in &self.races {
            ensure_well_formed(race.results(), || format!("race {}", race.id()))?;
            for stage in race.stages() {
                ensure_well_formed(stage.results(), || format!("stage {}", stage.id()))?;
                for segment in stage.segments() {
                    ensure_well_formed(segment.results(), || format!("segment {}", segment.id()))?;
                }
            }
        }
        Ok(())
    }
}

fn first_repeat(ids: &[u32]) -> Option<u32> {
    let mut seen = HashSet::with_capacity(ids.len());
    ids.iter().copied().find(|&id| !seen.insert(id))
}

fn ensure_well_formed(results: &ResultSet, owner: impl FnOnce() -> String) -> Result<()> {
    if results.is_well_formed() {
        Ok(())
    } else {
        Err(CyclingError::parse_error(
            "snapshot",
            format!("{} results are out of finish order or repeat a rider", owner()),
        ))
    }
}

impl Portal {
    /// Serialize the complete portal state to a YAML string.
    pub fn to_blob(&self) -> Result<String> {
        let snapshot = Snapshot { ids: self.ids, teams: self.teams.clone(), races: self.races.clone() };
        serde_yaml_ng::to_string(&snapshot)
            .map_err(|e| CyclingError::parse_error("snapshot", e.to_string()))
    }

    /// Rebuild a portal from a blob produced by [`Portal::to_blob`].
    pub fn from_blob(blob: &str) -> Result<Portal> {
        let snapshot: Snapshot = serde_yaml_ng::from_str(blob)
            .map_err(|e| CyclingError::parse_error("snapshot", e.to_string()))?;
        snapshot.validate()?;
        Ok(Portal { teams: snapshot.teams, races: snapshot.races, ids: snapshot.ids })
    }

    /// Write the portal state to `path`.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let blob = self.to_blob()?;
        fs::write(path, blob).map_err(|e| CyclingError::file_error(path.to_path_buf(), e))?;
        info!(path = %path.display(), races = self.races.len(), teams = self.teams.len(), "Saved portal");
        Ok(())
    }

    /// Replace the portal state with the snapshot at `path`.
    ///
    /// On any error the current state is left untouched.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let blob = fs::read_to_string(path).map_err(|e| CyclingError::file_error(path.to_path_buf(), e))?;
        let loaded = Portal::from_blob(&blob).inspect_err(|error| {
            warn!(path = %path.display(), %error, "Rejected portal snapshot");
        })?;

        *self = loaded;
        info!(path = %path.display(), races = self.races.len(), teams = self.teams.len(), "Loaded portal");
        Ok(())
    }
}
