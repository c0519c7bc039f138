//! Wounds carried by a character.
//!
//! The mapping from damage to severity lives in the mechanics crate; this
//! module only describes what a wound is once it has been inflicted.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How serious a wound is, from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WoundSeverity {
    /// A scratch.
    Light,
    /// A real injury.
    Medium,
    /// Movement is reduced.
    Heavy,
    /// The character cannot act.
    Incapacitating,
    /// The character dies.
    Fatal,
}

impl WoundSeverity {
    /// The amount this wound subtracts from every roll.
    pub fn penalty(self) -> i32 {
        match self {
            Self::Light => 1,
            Self::Medium => 3,
            Self::Heavy => 5,
            Self::Incapacitating => 10,
            Self::Fatal => 15,
        }
    }

    /// Seasons until the wound heals, or `None` if it never does.
    pub fn recovery_seasons(self) -> Option<u32> {
        match self {
            Self::Light => Some(1),
            Self::Medium => Some(2),
            Self::Heavy => Some(4),
            Self::Incapacitating => Some(8),
            Self::Fatal => None,
        }
    }
}

impl fmt::Display for WoundSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Light => write!(f, "Light"),
            Self::Medium => write!(f, "Medium"),
            Self::Heavy => write!(f, "Heavy"),
            Self::Incapacitating => write!(f, "Incapacitating"),
            Self::Fatal => write!(f, "Fatal"),
        }
    }
}

/// Where a blow landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HitLocation {
    /// The head.
    Head,
    /// Chest or abdomen.
    Torso,
    /// Right arm.
    RightArm,
    /// Left arm.
    LeftArm,
    /// Right leg.
    RightLeg,
    /// Left leg.
    LeftLeg,
}

impl HitLocation {
    /// Map a simple-die face (0-9) to a location.
    pub fn from_face(face: u32) -> Self {
        match face {
            1..=4 => Self::Torso,
            5 => Self::RightArm,
            6 => Self::LeftArm,
            7 => Self::RightLeg,
            8 => Self::LeftLeg,
            _ => Self::Head,
        }
    }
}

impl fmt::Display for HitLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Head => write!(f, "Head"),
            Self::Torso => write!(f, "Torso"),
            Self::RightArm => write!(f, "Right Arm"),
            Self::LeftArm => write!(f, "Left Arm"),
            Self::RightLeg => write!(f, "Right Leg"),
            Self::LeftLeg => write!(f, "Left Leg"),
        }
    }
}

/// A wound inflicted on a character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wound {
    /// Severity tier.
    pub severity: WoundSeverity,
    /// Where the wound is.
    pub location: HitLocation,
    /// Amount subtracted from every roll while the wound lasts.
    pub penalty: i32,
    /// Seasons to recover; `None` for wounds that never heal.
    pub recovery_seasons: Option<u32>,
    /// Human-readable description, e.g. "Medium wound from Longsword".
    pub description: String,
}

impl Wound {
    /// Build a wound with the penalty and recovery time of its severity.
    pub fn new(severity: WoundSeverity, location: HitLocation, source: &str) -> Self {
        Self {
            severity,
            location,
            penalty: severity.penalty(),
            recovery_seasons: severity.recovery_seasons(),
            description: format!("{severity} wound from {source}"),
        }
    }
}
