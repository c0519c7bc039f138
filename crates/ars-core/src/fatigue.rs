//! Fatigue levels.
//!
//! Fatigue is a clamped ladder from Fresh to Unconscious. Each level below
//! Winded subtracts a penalty from every roll; an Unconscious character
//! cannot act at all.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How tired a character is.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub enum FatigueLevel {
    /// Fully rested.
    #[default]
    Fresh,
    /// Breathing hard, no penalty yet.
    Winded,
    /// -1 to all rolls.
    Weary,
    /// -3 to all rolls.
    Tired,
    /// -5 to all rolls.
    Dazed,
    /// Cannot act.
    Unconscious,
}

impl FatigueLevel {
    const LADDER: [Self; 6] = [
        Self::Fresh,
        Self::Winded,
        Self::Weary,
        Self::Tired,
        Self::Dazed,
        Self::Unconscious,
    ];

    /// Position on the ladder, Fresh = 0 through Unconscious = 5.
    pub fn index(self) -> i32 {
        match self {
            Self::Fresh => 0,
            Self::Winded => 1,
            Self::Weary => 2,
            Self::Tired => 3,
            Self::Dazed => 4,
            Self::Unconscious => 5,
        }
    }

    /// The level at a ladder position, clamped into range.
    pub fn from_index(index: i32) -> Self {
        Self::LADDER[index.clamp(0, 5) as usize]
    }

    /// The amount subtracted from rolls at this level.
    ///
    /// Unconscious keeps the Dazed penalty for passive defense.
    pub fn penalty(self) -> i32 {
        match self {
            Self::Fresh | Self::Winded => 0,
            Self::Weary => 1,
            Self::Tired => 3,
            Self::Dazed | Self::Unconscious => 5,
        }
    }

    /// Move `levels` steps down (positive) or up (negative) the ladder.
    pub fn add(self, levels: i32) -> Self {
        Self::from_index(self.index().saturating_add(levels))
    }

    /// Returns true unless the character is unconscious.
    pub fn can_act(self) -> bool {
        self != Self::Unconscious
    }
}

impl fmt::Display for FatigueLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fresh => write!(f, "Fresh"),
            Self::Winded => write!(f, "Winded"),
            Self::Weary => write!(f, "Weary"),
            Self::Tired => write!(f, "Tired"),
            Self::Dazed => write!(f, "Dazed"),
            Self::Unconscious => write!(f, "Unconscious"),
        }
    }
}
