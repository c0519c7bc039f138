//! Score-plus-die checks.

use serde::{Deserialize, Serialize};

use super::{BotchCheck, DieRoll, DieSource, botch_check, roll_die};

/// The result of a check: one die, a score, and modifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckRoll {
    /// The die that was rolled.
    pub roll: DieRoll,
    /// Die total + score + modifiers.
    pub total: i32,
    /// The botch dice, if the stress die came up 1.
    pub botch: Option<BotchCheck>,
    /// True if the botch dice turned up a zero.
    pub is_botch: bool,
}

impl CheckRoll {
    /// Number of zeros on the botch dice.
    pub fn botch_zeros(&self) -> u32 {
        self.botch.as_ref().map(|b| b.zeros).unwrap_or(0)
    }
}

/// Roll a die and add `score` and `modifier`.
///
/// A stress die that comes up 1 escalates to `botch_dice` botch dice
/// (at least one). A simple die never botches.
pub fn ability_check(
    dice: &mut dyn DieSource,
    score: i32,
    modifier: i32,
    stress: bool,
    botch_dice: u32,
) -> CheckRoll {
    let roll = roll_die(dice, stress);
    let botch = if roll.triggered_botch_check() {
        Some(botch_check(dice, botch_dice.max(1)))
    } else {
        None
    };
    let is_botch = botch.as_ref().is_some_and(|b| b.is_botch);
    CheckRoll {
        total: roll.total() + score + modifier,
        roll,
        botch,
        is_botch,
    }
}

/// A casting roll: casting total plus aura, less fatigue.
pub fn spell_check(
    dice: &mut dyn DieSource,
    casting_total: i32,
    aura: i32,
    fatigue_penalty: i32,
    stress: bool,
    botch_dice: u32,
) -> CheckRoll {
    ability_check(dice, casting_total, aura - fatigue_penalty, stress, botch_dice)
}

/// A Certamen roll: Technique + Form plus aura, less fatigue, on one
/// botch die.
pub fn certamen_check(
    dice: &mut dyn DieSource,
    technique: i32,
    form: i32,
    aura: i32,
    fatigue_penalty: i32,
    stress: bool,
) -> CheckRoll {
    spell_check(dice, technique + form, aura, fatigue_penalty, stress, 1)
}
