//! Aging rolls and crises.
//!
//! The aging roll is a stress die less any longevity ritual bonus, plus a
//! living-conditions modifier. It is measured against apparent age: above
//! half is a Minor crisis, above two thirds Major, above the full age
//! Critical.

use std::fmt;

use ars_core::{Character, Characteristic, HasCombatStats, Participant};
use serde::{Deserialize, Serialize};

use crate::context::ResolveContext;
use crate::dice::DieRoll;
use crate::event::{ResolutionEvent, ResolutionKind};

/// Characteristic score at or below which a Critical crisis kills.
const DEATH_THRESHOLD: i32 = -3;

/// How bad an aging crisis is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AgingCrisis {
    /// One characteristic drops.
    Minor,
    /// Two characteristics drop.
    Major,
    /// Three characteristics drop hard; the character may die.
    Critical,
}

impl AgingCrisis {
    /// Number of distinct characteristics reduced.
    pub fn characteristics_affected(self) -> usize {
        match self {
            Self::Minor => 1,
            Self::Major => 2,
            Self::Critical => 3,
        }
    }

    /// Inclusive range of apparent years added.
    pub fn apparent_age_range(self) -> (i32, i32) {
        match self {
            Self::Minor => (1, 2),
            Self::Major => (2, 5),
            Self::Critical => (5, 10),
        }
    }

    /// Inclusive range each affected characteristic drops by.
    pub fn decrease_range(self) -> (i32, i32) {
        match self {
            Self::Minor | Self::Major => (1, 1),
            Self::Critical => (1, 3),
        }
    }
}

impl fmt::Display for AgingCrisis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Minor => write!(f, "Minor"),
            Self::Major => write!(f, "Major"),
            Self::Critical => write!(f, "Critical"),
        }
    }
}

/// Crisis tier for an aging roll against an apparent age.
pub fn aging_crisis(roll: i32, apparent_age: i32) -> Option<AgingCrisis> {
    if roll > apparent_age {
        Some(AgingCrisis::Critical)
    } else if 3 * roll > 2 * apparent_age {
        Some(AgingCrisis::Major)
    } else if 2 * roll > apparent_age {
        Some(AgingCrisis::Minor)
    } else {
        None
    }
}

/// Situational modifiers to an aging roll.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgingRequest {
    /// Longevity ritual bonus, subtracted from the roll.
    pub longevity_bonus: i32,
    /// Living-conditions modifier, added to the roll.
    pub living_modifier: i32,
}

/// The result of an aging roll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgingOutcome {
    /// The stress die.
    pub roll: DieRoll,
    /// Roll after modifiers.
    pub aging_total: i32,
    /// The crisis, if any.
    pub crisis: Option<AgingCrisis>,
    /// Characteristic changes, one entry per affected characteristic.
    pub characteristic_changes: Vec<(Characteristic, i32)>,
    /// Apparent years added.
    pub apparent_age_change: i32,
    /// True if the crisis kills the character.
    pub died: bool,
}

impl AgingOutcome {
    /// Write the changes onto the character.
    pub fn apply(&self, character: &mut Character) {
        for (characteristic, delta) in &self.characteristic_changes {
            character.adjust_characteristic(*characteristic, *delta);
        }
        character.apparent_age += self.apparent_age_change;
    }
}

/// Roll for aging. The character is only read; call
/// [`AgingOutcome::apply`] to record the result.
pub fn roll_aging(
    ctx: &mut ResolveContext<'_>,
    character: &Character,
    request: &AgingRequest,
) -> AgingOutcome {
    let roll = ctx.stress_die();
    let aging_total = roll.total() - request.longevity_bonus + request.living_modifier;
    let crisis = aging_crisis(aging_total, character.apparent_age);

    let mut characteristic_changes = Vec::new();
    let mut apparent_age_change = 0;
    let mut died = false;

    if let Some(crisis) = crisis {
        let mut pool: Vec<Characteristic> = Characteristic::all().to_vec();
        let (low, high) = crisis.decrease_range();
        for _ in 0..crisis.characteristics_affected() {
            let index = ctx.pick(pool.len() as u32) as usize;
            let characteristic = pool.remove(index.min(pool.len() - 1));
            let decrease = if high > low {
                low + ctx.pick((high - low + 1) as u32) as i32
            } else {
                low
            };
            characteristic_changes.push((characteristic, -decrease));
        }

        let (min_age, max_age) = crisis.apparent_age_range();
        apparent_age_change = min_age + ctx.pick((max_age - min_age + 1) as u32) as i32;

        if crisis == AgingCrisis::Critical {
            died = characteristic_changes
                .iter()
                .any(|(c, delta)| character.characteristic(*c) + delta <= DEATH_THRESHOLD);
        }
    }

    tracing::debug!(
        who = character.name(),
        aging_total,
        crisis = ?crisis,
        died,
        "aging rolled"
    );
    ctx.emit(
        ResolutionEvent::new(ResolutionKind::Aging, vec![character.id])
            .with_delta("roll", aging_total)
            .with_delta("apparent_age", apparent_age_change),
    );

    AgingOutcome {
        roll,
        aging_total,
        crisis,
        characteristic_changes,
        apparent_age_change,
        died,
    }
}
