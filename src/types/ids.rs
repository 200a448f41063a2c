//! Strongly typed entity identifiers

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[cfg_attr(feature = "tauri", derive(specta::Type))]
        #[serde(transparent)]
        pub struct $name(pub u32);

        impl $name {
            /// Raw integer value of the identifier.
            pub const fn get(self) -> u32 {
                self.0
            }
        }

        impl From<u32> for $name {
            fn from(value: u32) -> Self {
                Self(value)
            }
        }

        impl From<$name> for u32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

entity_id!(
    /// Identifier of a rider registered with a team.
    RiderId
);
entity_id!(
    /// Identifier of a team.
    TeamId
);
entity_id!(
    /// Identifier of a race.
    RaceId
);
entity_id!(
    /// Identifier of a stage within a race.
    StageId
);
entity_id!(
    /// Identifier of a climb or intermediate sprint within a stage.
    SegmentId
);

/// Kind of entity an identifier refers to, used for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub enum EntityKind {
    Race,
    Stage,
    Segment,
    Team,
    Rider,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Race => "race",
            EntityKind::Stage => "stage",
            EntityKind::Segment => "segment",
            EntityKind::Team => "team",
            EntityKind::Rider => "rider",
        };
        f.write_str(name)
    }
}
