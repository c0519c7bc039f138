//! Die roll results.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which die was rolled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DieKind {
    /// A single face, 0-9, no explosions or botches.
    Simple,
    /// The open-ended die: 0 explodes, 1 may botch.
    Stress,
}

impl fmt::Display for DieKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Simple => write!(f, "simple"),
            Self::Stress => write!(f, "stress"),
        }
    }
}

/// The result of rolling one simple or stress die.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DieRoll {
    /// Which die this was.
    pub kind: DieKind,
    /// Face value after explosions resolve.
    pub value: u32,
    /// Every face drawn, in order, including exploded zeros and the botch
    /// check die.
    pub raw_faces: Vec<u32>,
    /// Power of two accumulated by explosions.
    pub multiplier: u32,
    /// Whether the roll botched.
    pub is_botch: bool,
    /// Extra dice consulted for the botch check.
    pub botch_dice_used: u32,
}

impl DieRoll {
    /// The roll's contribution to a total: 0 on a botch, otherwise value
    /// times multiplier.
    pub fn total(&self) -> i32 {
        if self.is_botch {
            return 0;
        }
        i32::try_from(self.value.saturating_mul(self.multiplier)).unwrap_or(i32::MAX)
    }

    /// The first face drawn.
    pub fn first_face(&self) -> u32 {
        self.raw_faces.first().copied().unwrap_or(self.value)
    }

    /// True when a stress die came up 1 and went to a botch check.
    pub fn triggered_botch_check(&self) -> bool {
        self.kind == DieKind::Stress && self.first_face() == 1
    }

    /// True when at least one zero exploded.
    pub fn exploded(&self) -> bool {
        self.multiplier > 1
    }
}

impl fmt::Display for DieRoll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_botch {
            return write!(f, "botch");
        }
        if self.multiplier > 1 {
            write!(f, "{}x{} = {}", self.value, self.multiplier, self.total())
        } else {
            write!(f, "{}", self.value)
        }
    }
}

/// The result of rolling a set of botch dice.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BotchCheck {
    /// True if any die showed 0.
    pub is_botch: bool,
    /// How many dice showed 0.
    pub zeros: u32,
    /// The faces rolled.
    pub faces: Vec<u32>,
}
