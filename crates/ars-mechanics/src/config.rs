//! Tunable rule constants.

use serde::{Deserialize, Serialize};

use crate::error::{MechError, MechResult};

/// Rule constants consulted by the resolvers.
///
/// The defaults are the canonical values. Troupes that house-rule a number
/// can load a different set from JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Score lead that ends a Certamen duel.
    pub certamen_victory_margin: i32,
    /// Exchanges per point of warping awarded at the end of a duel.
    pub certamen_warping_divisor: u32,
    /// Modifier placed on a feinted target's next defense.
    pub feint_penalty: i32,
    /// Attack bonus for charging.
    pub charge_attack_bonus: i32,
    /// Modifier placed on the charger's own next defense.
    pub charge_defense_penalty: i32,
    /// Flat bonus for defiant casting.
    pub defiant_bonus: i32,
    /// Largest bonus an arcane connection can add.
    pub arcane_connection_cap: i32,
    /// Fewest botch dice a spell botch can roll.
    pub min_spell_botch_dice: u32,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            certamen_victory_margin: 10,
            certamen_warping_divisor: 5,
            feint_penalty: -3,
            charge_attack_bonus: 2,
            charge_defense_penalty: -1,
            defiant_bonus: 5,
            arcane_connection_cap: 3,
            min_spell_botch_dice: 1,
        }
    }
}

impl RulesConfig {
    /// Load a configuration from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> MechResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| MechError::InvalidConfiguration(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values no duel or casting could work with.
    pub fn validate(&self) -> MechResult<()> {
        if self.certamen_victory_margin <= 0 {
            return Err(MechError::InvalidConfiguration(
                "certamen victory margin must be positive".to_string(),
            ));
        }
        if self.certamen_warping_divisor == 0 {
            return Err(MechError::InvalidConfiguration(
                "certamen warping divisor must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Set the Certamen victory margin.
    pub fn with_victory_margin(mut self, margin: i32) -> Self {
        self.certamen_victory_margin = margin;
        self
    }

    /// Set how many exchanges earn one point of warping.
    pub fn with_warping_divisor(mut self, divisor: u32) -> Self {
        self.certamen_warping_divisor = divisor;
        self
    }

    /// Set the feint penalty.
    pub fn with_feint_penalty(mut self, penalty: i32) -> Self {
        self.feint_penalty = penalty;
        self
    }

    /// Set the charge attack bonus and defense penalty.
    pub fn with_charge(mut self, attack_bonus: i32, defense_penalty: i32) -> Self {
        self.charge_attack_bonus = attack_bonus;
        self.charge_defense_penalty = defense_penalty;
        self
    }

    /// Set the defiant casting bonus.
    pub fn with_defiant_bonus(mut self, bonus: i32) -> Self {
        self.defiant_bonus = bonus;
        self
    }

    /// Set the arcane connection cap.
    pub fn with_arcane_connection_cap(mut self, cap: i32) -> Self {
        self.arcane_connection_cap = cap;
        self
    }

    /// Set the minimum number of spell botch dice.
    pub fn with_min_spell_botch_dice(mut self, dice: u32) -> Self {
        self.min_spell_botch_dice = dice;
        self
    }
}
