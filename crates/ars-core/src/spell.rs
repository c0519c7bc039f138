//! Spells and their design parameters.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::art::{ArtPair, Form, Technique};

/// How far a spell reaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Range {
    /// The caster only.
    Personal,
    /// Something the caster touches.
    Touch,
    /// Anything that can hear the caster.
    Voice,
    /// Anything the caster can see.
    Sight,
    /// Anything linked to the caster by an arcane connection.
    ArcaneConnection,
}

impl Range {
    /// Magnitudes added to a spell's level by this range.
    pub fn level_modifier(self) -> i32 {
        match self {
            Self::Personal | Self::Touch => 0,
            Self::Voice => 2,
            Self::Sight => 3,
            Self::ArcaneConnection => 4,
        }
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Personal => write!(f, "Personal"),
            Self::Touch => write!(f, "Touch"),
            Self::Voice => write!(f, "Voice"),
            Self::Sight => write!(f, "Sight"),
            Self::ArcaneConnection => write!(f, "Arcane Connection"),
        }
    }
}

/// How long a spell lasts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Duration {
    /// An instant.
    Momentary,
    /// While the caster concentrates.
    Concentration,
    /// Two minutes.
    Diameter,
    /// Until the next sunrise or sunset.
    Sun,
    /// Until the moon has waxed and waned.
    Moon,
    /// Until the next equinox four seasons on.
    Year,
}

impl Duration {
    /// Magnitudes added to a spell's level by this duration.
    pub fn level_modifier(self) -> i32 {
        match self {
            Self::Momentary => 0,
            Self::Concentration => 1,
            Self::Diameter => 2,
            Self::Sun => 3,
            Self::Moon => 4,
            Self::Year => 5,
        }
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Momentary => write!(f, "Momentary"),
            Self::Concentration => write!(f, "Concentration"),
            Self::Diameter => write!(f, "Diameter"),
            Self::Sun => write!(f, "Sun"),
            Self::Moon => write!(f, "Moon"),
            Self::Year => write!(f, "Year"),
        }
    }
}

/// What a spell affects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Target {
    /// A single being or object.
    Individual,
    /// A group of beings.
    Group,
    /// Everything within a room.
    Room,
    /// A whole building.
    Structure,
    /// Everything within a boundary.
    Boundary,
}

impl Target {
    /// Magnitudes added to a spell's level by this target.
    pub fn level_modifier(self) -> i32 {
        match self {
            Self::Individual => 0,
            Self::Group | Self::Room => 2,
            Self::Structure => 3,
            Self::Boundary => 4,
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Individual => write!(f, "Individual"),
            Self::Group => write!(f, "Group"),
            Self::Room => write!(f, "Room"),
            Self::Structure => write!(f, "Structure"),
            Self::Boundary => write!(f, "Boundary"),
        }
    }
}

/// A formulaic or ritual spell a magus knows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spell {
    /// Spell name.
    pub name: String,
    /// Technique used to cast it.
    pub technique: Technique,
    /// Form used to cast it.
    pub form: Form,
    /// Level the casting total must reach.
    pub level: i32,
    /// Range parameter.
    pub range: Range,
    /// Duration parameter.
    pub duration: Duration,
    /// Target parameter.
    pub target: Target,
    /// Mastery score, added to the casting total.
    pub mastery_level: i32,
    /// Ritual spells cost no fatigue and may be cast ceremonially.
    pub ritual: bool,
}

impl Spell {
    /// Create a Voice/Momentary/Individual spell with no mastery.
    pub fn new(name: impl Into<String>, technique: Technique, form: Form, level: i32) -> Self {
        Self {
            name: name.into(),
            technique,
            form,
            level,
            range: Range::Voice,
            duration: Duration::Momentary,
            target: Target::Individual,
            mastery_level: 0,
            ritual: false,
        }
    }

    /// Set the range parameter.
    pub fn with_range(mut self, range: Range) -> Self {
        self.range = range;
        self
    }

    /// Set the duration parameter.
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Set the target parameter.
    pub fn with_target(mut self, target: Target) -> Self {
        self.target = target;
        self
    }

    /// Set the mastery score.
    pub fn with_mastery(mut self, mastery_level: i32) -> Self {
        self.mastery_level = mastery_level;
        self
    }

    /// Mark the spell as a ritual.
    pub fn as_ritual(mut self) -> Self {
        self.ritual = true;
        self
    }

    /// The Technique + Form pair the spell is cast with.
    pub fn arts(&self) -> ArtPair {
        ArtPair::new(self.technique, self.form)
    }
}

impl fmt::Display for Spell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}{})", self.name, self.arts(), self.level)
    }
}
