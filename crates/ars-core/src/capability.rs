//! Capability traits.
//!
//! Resolvers never inspect what kind of character they were handed. A
//! spellcaster is anything implementing [`HasArtScores`]; a fighter is
//! anything implementing [`HasCombatStats`]. Both share [`Participant`] for
//! identity and fatigue. [`AccumulatesStrain`] is the only write access the
//! engine needs, used where a rule charges fatigue or warping on the spot.

use crate::art::{Form, Technique};
use crate::characteristic::Characteristic;
use crate::equipment::{Armor, Weapon};
use crate::fatigue::FatigueLevel;
use crate::id::CharacterId;

/// Identity and fatigue, shared by every capability.
pub trait Participant {
    /// Stable identifier.
    fn id(&self) -> CharacterId;

    /// Display name.
    fn name(&self) -> &str;

    /// Current fatigue level.
    fn fatigue_level(&self) -> FatigueLevel;

    /// Amount subtracted from rolls for fatigue.
    fn fatigue_penalty(&self) -> i32 {
        self.fatigue_level().penalty()
    }
}

/// Read access to a character's magical Arts.
pub trait HasArtScores: Participant {
    /// Score in a Technique, or `None` if the character has no such Art.
    fn technique(&self, technique: Technique) -> Option<i32>;

    /// Score in a Form, or `None` if the character has no such Art.
    fn form(&self, form: Form) -> Option<i32>;

    /// Levels knocked off the fatigue cost of each casting.
    fn fatigue_reduction(&self) -> i32 {
        0
    }
}

/// Read access to a character's fighting statistics.
pub trait HasCombatStats: Participant {
    /// A characteristic score (defaults to 0 when not recorded).
    fn characteristic(&self, characteristic: Characteristic) -> i32;

    /// An ability score; untrained abilities score 0.
    fn ability(&self, name: &str) -> i32;

    /// A carried weapon by name.
    fn weapon(&self, name: &str) -> Option<&Weapon>;

    /// The weapon used for defense, if any is readied.
    fn readied_weapon(&self) -> Option<&Weapon>;

    /// Worn armor, if any.
    fn armor(&self) -> Option<&Armor>;

    /// Sum of all wound penalties.
    fn wound_penalty(&self) -> i32;

    /// Dexterity + weapon ability + the weapon's attack modifier.
    fn weapon_skill_bonus(&self, weapon: &Weapon) -> i32 {
        self.characteristic(Characteristic::Dexterity)
            + self.ability(&weapon.ability)
            + weapon.attack_modifier
    }

    /// Quickness + ability and defense modifier of the readied weapon.
    /// Characters with nothing readied defend with bare hands.
    fn defense_bonus(&self) -> i32 {
        let quickness = self.characteristic(Characteristic::Quickness);
        match self.readied_weapon() {
            Some(weapon) => quickness + self.ability(&weapon.ability) + weapon.defense_modifier,
            None => {
                let fist = Weapon::brawling();
                quickness + self.ability(&fist.ability) + fist.defense_modifier
            }
        }
    }

    /// Quickness + the weapon's initiative modifier.
    fn initiative_bonus(&self, weapon: &Weapon) -> i32 {
        self.characteristic(Characteristic::Quickness) + weapon.init_modifier
    }

    /// Strength added to damage; a weak character adds nothing rather than
    /// subtracting.
    fn strength_bonus(&self) -> i32 {
        self.characteristic(Characteristic::Strength).max(0)
    }

    /// Stamina + armor protection.
    fn soak(&self) -> i32 {
        self.characteristic(Characteristic::Stamina)
            + self.armor().map(|a| a.protection).unwrap_or(0)
    }
}

/// Write access for rules that charge fatigue or warping immediately.
pub trait AccumulatesStrain: Participant {
    /// Move down the fatigue ladder by `levels`.
    fn add_fatigue(&mut self, levels: i32);

    /// Add warping points.
    fn add_warping(&mut self, points: i32);
}
