//! Teams, riders and naming rules
//!
//! Names of races, stages and teams share one rule set: non-empty, at most
//! [`MAX_NAME_LENGTH`] characters, no whitespace, quotes or backslashes. They
//! must also be unique among entities of the same kind.

use serde::{Deserialize, Serialize};

use crate::types::rules::{FORBIDDEN_NAME_CHARS, MAX_NAME_LENGTH, MIN_YEAR_OF_BIRTH};
use crate::types::{RiderId, TeamId};
use crate::{CyclingError, Result};

/// A registered rider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct Rider {
    pub id: RiderId,
    pub team: TeamId,
    pub name: String,
    pub year_of_birth: i32,
}

impl Rider {
    pub fn new(id: RiderId, team: TeamId, name: impl Into<String>, year_of_birth: i32) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(CyclingError::invalid_rider("name is empty"));
        }
        if year_of_birth < MIN_YEAR_OF_BIRTH {
            return Err(CyclingError::invalid_rider(format!(
                "year of birth {year_of_birth} is before {MIN_YEAR_OF_BIRTH}"
            )));
        }
        Ok(Self { id, team, name, year_of_birth })
    }
}

/// A team and its riders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct Team {
    id: TeamId,
    name: String,
    description: String,
    riders: Vec<Rider>,
}

impl Team {
    pub fn new(id: TeamId, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self { id, name: name.into(), description: description.into(), riders: Vec::new() }
    }

    pub fn id(&self) -> TeamId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Riders in registration order.
    pub fn riders(&self) -> &[Rider] {
        &self.riders
    }

    pub fn rider_ids(&self) -> Vec<RiderId> {
        self.riders.iter().map(|rider| rider.id).collect()
    }

    pub fn has_rider(&self, rider: RiderId) -> bool {
        self.riders.iter().any(|r| r.id == rider)
    }

    pub fn add_rider(&mut self, rider: Rider) {
        self.riders.push(rider);
    }

    /// Remove a rider, returning it if it belonged to this team.
    pub fn remove_rider(&mut self, rider: RiderId) -> Option<Rider> {
        let index = self.riders.iter().position(|r| r.id == rider)?;
        Some(self.riders.remove(index))
    }
}

/// Check a race, stage or team name against the naming rules.
pub fn validate_name(name: &str) -> Result<()> {
    let reason = if name.is_empty() {
        "name is empty"
    } else if name.chars().count() > MAX_NAME_LENGTH {
        "name is longer than 30 characters"
    } else if name.chars().any(char::is_whitespace) {
        "name contains whitespace"
    } else if name.contains(FORBIDDEN_NAME_CHARS) {
        "name contains escape characters"
    } else {
        return Ok(());
    };

    Err(CyclingError::InvalidName { name: name.to_owned(), reason })
}

/// Fail with [`CyclingError::IllegalName`] if `name` is already taken.
pub fn ensure_unique_name<'a>(mut existing: impl Iterator<Item = &'a str>, name: &str) -> Result<()> {
    if existing.any(|taken| taken == name) {
        Err(CyclingError::IllegalName { name: name.to_owned() })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn accepts_plain_names() {
        for name in ["Tour", "Giro-2026", "Stage_1", "ÉtapeReine", "a"] {
            assert!(validate_name(name).is_ok(), "{name} should be valid");
        }
        assert!(validate_name(&"x".repeat(30)).is_ok());
    }

    #[test]
    fn rejects_malformed_names() {
        let cases = [
            ("", "empty"),
            ("two words", "whitespace"),
            ("tab\there", "whitespace"),
            ("it's", "escape"),
            ("say\"hi\"", "escape"),
            ("back\\slash", "escape"),
            ("bell\u{8}", "escape"),
        ];
        for (name, fragment) in cases {
            match validate_name(name) {
                Err(CyclingError::InvalidName { reason, .. }) => {
                    assert!(reason.contains(fragment), "{name:?}: {reason}")
                }
                other => panic!("{name:?} accepted: {other:?}"),
            }
        }
        assert!(validate_name(&"x".repeat(31)).is_err());
    }

    #[test]
    fn uniqueness_is_exact_match() {
        let taken = ["Tour", "Giro"];
        assert!(ensure_unique_name(taken.iter().copied(), "Vuelta").is_ok());
        assert!(ensure_unique_name(taken.iter().copied(), "tour").is_ok());
        assert!(matches!(
            ensure_unique_name(taken.iter().copied(), "Giro"),
            Err(CyclingError::IllegalName { .. })
        ));
    }

    #[test]
    fn rider_details_are_checked() {
        assert!(Rider::new(RiderId(1), TeamId(1), "Anna Berg", 1998).is_ok());
        assert!(Rider::new(RiderId(1), TeamId(1), "Old Timer", 1900).is_ok());
        assert!(matches!(
            Rider::new(RiderId(1), TeamId(1), "", 1998),
            Err(CyclingError::InvalidRider { .. })
        ));
        assert!(matches!(
            Rider::new(RiderId(1), TeamId(1), "Too Early", 1899),
            Err(CyclingError::InvalidRider { .. })
        ));
    }

    #[test]
    fn team_roster_management() {
        let mut team = Team::new(TeamId(4), "Rouleurs", "");
        team.add_rider(Rider::new(RiderId(1), TeamId(4), "A", 2000).unwrap());
        team.add_rider(Rider::new(RiderId(2), TeamId(4), "B", 2001).unwrap());
        assert_eq!(team.rider_ids(), vec![RiderId(1), RiderId(2)]);

        assert_eq!(team.remove_rider(RiderId(1)).map(|r| r.name), Some("A".to_owned()));
        assert!(team.remove_rider(RiderId(1)).is_none());
        assert!(!team.has_rider(RiderId(1)));
        assert!(team.has_rider(RiderId(2)));
    }

    proptest! {
        #[test]
        fn valid_names_pass(name in "[A-Za-z0-9_-]{1,30}") {
            prop_assert!(validate_name(&name).is_ok());
        }

        #[test]
        fn names_with_spaces_fail(left in "[a-z]{1,10}", right in "[a-z]{1,10}") {
            let spaced = format!("{left} {right}");
            prop_assert!(validate_name(&spaced).is_err());
        }
    }
}
