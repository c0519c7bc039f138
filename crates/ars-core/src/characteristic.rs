use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the eight characteristics every character carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Characteristic {
    /// Reasoning and memory.
    Intelligence,
    /// Awareness of surroundings.
    Perception,
    /// Raw physical power; adds to damage.
    Strength,
    /// Toughness; adds to soak.
    Stamina,
    /// Force of personality.
    Presence,
    /// Expressiveness.
    Communication,
    /// Hand-eye coordination; adds to attack.
    Dexterity,
    /// Reflexes; adds to initiative and defense.
    Quickness,
}

impl Characteristic {
    /// All characteristics in sheet order.
    pub fn all() -> &'static [Self] {
        &[
            Self::Intelligence,
            Self::Perception,
            Self::Strength,
            Self::Stamina,
            Self::Presence,
            Self::Communication,
            Self::Dexterity,
            Self::Quickness,
        ]
    }
}

impl fmt::Display for Characteristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Intelligence => write!(f, "Intelligence"),
            Self::Perception => write!(f, "Perception"),
            Self::Strength => write!(f, "Strength"),
            Self::Stamina => write!(f, "Stamina"),
            Self::Presence => write!(f, "Presence"),
            Self::Communication => write!(f, "Communication"),
            Self::Dexterity => write!(f, "Dexterity"),
            Self::Quickness => write!(f, "Quickness"),
        }
    }
}
