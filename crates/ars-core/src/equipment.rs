//! Weapons and armor.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The broad class of a weapon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponKind {
    /// Fists, feet, and improvised blows.
    Brawling,
    /// One-handed weapons.
    Single,
    /// Two-handed weapons.
    Great,
    /// Bows, slings, and thrown weapons.
    Missile,
}

impl WeaponKind {
    /// The ability that governs weapons of this kind.
    pub fn default_ability(self) -> &'static str {
        match self {
            Self::Brawling => "Brawl",
            Self::Single => "Single Weapon",
            Self::Great => "Great Weapon",
            Self::Missile => "Bows",
        }
    }
}

impl fmt::Display for WeaponKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Brawling => write!(f, "Brawling"),
            Self::Single => write!(f, "Single"),
            Self::Great => write!(f, "Great"),
            Self::Missile => write!(f, "Missile"),
        }
    }
}

/// A weapon and its modifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Weapon {
    /// Display name, also the key it is looked up by.
    pub name: String,
    /// Weapon class.
    pub kind: WeaponKind,
    /// Ability used to wield it (e.g. "Single Weapon").
    pub ability: String,
    /// Added to initiative.
    pub init_modifier: i32,
    /// Added to attack totals.
    pub attack_modifier: i32,
    /// Added to defense totals.
    pub defense_modifier: i32,
    /// Added to damage.
    pub damage_modifier: i32,
}

impl Weapon {
    /// Create a weapon with no modifiers, wielded with the kind's default ability.
    pub fn new(name: impl Into<String>, kind: WeaponKind) -> Self {
        Self {
            name: name.into(),
            kind,
            ability: kind.default_ability().to_string(),
            init_modifier: 0,
            attack_modifier: 0,
            defense_modifier: 0,
            damage_modifier: 0,
        }
    }

    /// Set initiative, attack, defense, and damage modifiers.
    pub fn with_modifiers(mut self, init: i32, attack: i32, defense: i32, damage: i32) -> Self {
        self.init_modifier = init;
        self.attack_modifier = attack;
        self.defense_modifier = defense;
        self.damage_modifier = damage;
        self
    }

    /// Override the governing ability.
    pub fn with_ability(mut self, ability: impl Into<String>) -> Self {
        self.ability = ability.into();
        self
    }

    /// Bare hands, used for defense when nothing is readied.
    pub fn brawling() -> Self {
        Self::new("Fist", WeaponKind::Brawling)
    }
}

/// Worn protection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Armor {
    /// Display name.
    pub name: String,
    /// Added to soak.
    pub protection: i32,
}

impl Armor {
    /// Create a piece of armor.
    pub fn new(name: impl Into<String>, protection: i32) -> Self {
        Self {
            name: name.into(),
            protection,
        }
    }
}
