//! The concrete character record.
//!
//! A [`Character`] is a plain snapshot of everything the resolvers read. It
//! implements every capability trait, so the same record can fight, cast,
//! and duel. Loading and saving it is the caller's business; serde derives
//! are provided so that is easy.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::art::{Form, Technique};
use crate::capability::{AccumulatesStrain, HasArtScores, HasCombatStats, Participant};
use crate::characteristic::Characteristic;
use crate::equipment::{Armor, Weapon};
use crate::error::{CoreError, CoreResult};
use crate::fatigue::FatigueLevel;
use crate::id::CharacterId;
use crate::wound::Wound;

/// A character's mechanical state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Character {
    /// Stable identifier.
    pub id: CharacterId,
    /// Display name.
    pub name: String,
    /// Age in years.
    pub age: i32,
    /// Apparent age in years, which aging crises push upward.
    pub apparent_age: i32,
    /// Characteristic scores; missing entries count as 0.
    #[serde(default)]
    pub characteristics: HashMap<Characteristic, i32>,
    /// Ability scores by name (e.g. "Single Weapon", "Guile").
    #[serde(default)]
    pub abilities: HashMap<String, i32>,
    /// Technique scores. A Technique that is absent is not an Art the
    /// character has, which is different from a score of 0.
    #[serde(default)]
    pub techniques: HashMap<Technique, i32>,
    /// Form scores, same convention as `techniques`.
    #[serde(default)]
    pub forms: HashMap<Form, i32>,
    /// Current fatigue level.
    #[serde(default)]
    pub fatigue: FatigueLevel,
    /// Levels knocked off each casting's fatigue cost.
    #[serde(default)]
    pub fatigue_reduction: i32,
    /// Active wounds.
    #[serde(default)]
    pub wounds: Vec<Wound>,
    /// Carried weapons.
    #[serde(default)]
    pub weapons: Vec<Weapon>,
    /// Name of the weapon held ready for defense.
    #[serde(default)]
    pub readied_weapon: Option<String>,
    /// Worn armor.
    #[serde(default)]
    pub armor: Option<Armor>,
    /// Accumulated warping points.
    #[serde(default)]
    pub warping_points: i32,
}

impl Character {
    /// Create a 25-year-old character with no scores or gear.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: CharacterId::new(),
            name: name.into(),
            age: 25,
            apparent_age: 25,
            characteristics: HashMap::new(),
            abilities: HashMap::new(),
            techniques: HashMap::new(),
            forms: HashMap::new(),
            fatigue: FatigueLevel::Fresh,
            fatigue_reduction: 0,
            wounds: Vec::new(),
            weapons: Vec::new(),
            readied_weapon: None,
            armor: None,
            warping_points: 0,
        }
    }

    /// Decode a character from JSON.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Encode the character as JSON.
    pub fn to_json(&self) -> CoreResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Set age and apparent age together.
    pub fn with_age(mut self, age: i32) -> Self {
        self.age = age;
        self.apparent_age = age;
        self
    }

    /// Set a characteristic score.
    pub fn with_characteristic(mut self, characteristic: Characteristic, score: i32) -> Self {
        self.characteristics.insert(characteristic, score);
        self
    }

    /// Set an ability score.
    pub fn with_ability(mut self, name: impl Into<String>, score: i32) -> Self {
        self.abilities.insert(name.into(), score);
        self
    }

    /// Set a Technique score.
    pub fn with_technique(mut self, technique: Technique, score: i32) -> Self {
        self.techniques.insert(technique, score);
        self
    }

    /// Set a Form score.
    pub fn with_form(mut self, form: Form, score: i32) -> Self {
        self.forms.insert(form, score);
        self
    }

    /// Give the character every Art at the same score.
    pub fn with_all_arts(mut self, score: i32) -> Self {
        for t in Technique::all() {
            self.techniques.insert(*t, score);
        }
        for f in Form::all() {
            self.forms.insert(*f, score);
        }
        self
    }

    /// Add a weapon. The first weapon added is readied.
    pub fn with_weapon(mut self, weapon: Weapon) -> Self {
        if self.readied_weapon.is_none() {
            self.readied_weapon = Some(weapon.name.clone());
        }
        self.weapons.push(weapon);
        self
    }

    /// Wear armor.
    pub fn with_armor(mut self, armor: Armor) -> Self {
        self.armor = Some(armor);
        self
    }

    /// Set the starting fatigue level.
    pub fn with_fatigue(mut self, fatigue: FatigueLevel) -> Self {
        self.fatigue = fatigue;
        self
    }

    /// Set the per-casting fatigue reduction.
    pub fn with_fatigue_reduction(mut self, reduction: i32) -> Self {
        self.fatigue_reduction = reduction;
        self
    }

    /// Ready a carried weapon for defense.
    pub fn ready_weapon(&mut self, name: &str) -> CoreResult<()> {
        if !self.weapons.iter().any(|w| w.name == name) {
            return Err(CoreError::UnknownWeapon {
                character: self.name.clone(),
                weapon: name.to_string(),
            });
        }
        self.readied_weapon = Some(name.to_string());
        Ok(())
    }

    /// Record a wound.
    pub fn add_wound(&mut self, wound: Wound) {
        self.wounds.push(wound);
    }

    /// Change a characteristic by `delta`. Returns the new score.
    pub fn adjust_characteristic(&mut self, characteristic: Characteristic, delta: i32) -> i32 {
        let score = self.characteristics.entry(characteristic).or_insert(0);
        *score += delta;
        *score
    }

    /// Warping score: one per five warping points.
    pub fn warping_score(&self) -> i32 {
        self.warping_points.max(0) / 5
    }
}

impl Participant for Character {
    fn id(&self) -> CharacterId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn fatigue_level(&self) -> FatigueLevel {
        self.fatigue
    }
}

impl HasArtScores for Character {
    fn technique(&self, technique: Technique) -> Option<i32> {
        self.techniques.get(&technique).copied()
    }

    fn form(&self, form: Form) -> Option<i32> {
        self.forms.get(&form).copied()
    }

    fn fatigue_reduction(&self) -> i32 {
        self.fatigue_reduction
    }
}

impl HasCombatStats for Character {
    fn characteristic(&self, characteristic: Characteristic) -> i32 {
        self.characteristics
            .get(&characteristic)
            .copied()
            .unwrap_or(0)
    }

    fn ability(&self, name: &str) -> i32 {
        self.abilities.get(name).copied().unwrap_or(0)
    }

    fn weapon(&self, name: &str) -> Option<&Weapon> {
        self.weapons.iter().find(|w| w.name == name)
    }

    fn readied_weapon(&self) -> Option<&Weapon> {
        self.readied_weapon
            .as_deref()
            .and_then(|name| self.weapon(name))
    }

    fn armor(&self) -> Option<&Armor> {
        self.armor.as_ref()
    }

    fn wound_penalty(&self) -> i32 {
        self.wounds.iter().map(|w| w.penalty).sum()
    }
}

impl AccumulatesStrain for Character {
    fn add_fatigue(&mut self, levels: i32) {
        self.fatigue = self.fatigue.add(levels);
    }

    fn add_warping(&mut self, points: i32) {
        self.warping_points += points;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equipment::WeaponKind;
    use crate::wound::{HitLocation, WoundSeverity};
    use proptest::prelude::*;

    fn knight() -> Character {
        Character::new("Roland")
            .with_characteristic(Characteristic::Dexterity, 2)
            .with_characteristic(Characteristic::Quickness, 1)
            .with_characteristic(Characteristic::Strength, 3)
            .with_characteristic(Characteristic::Stamina, 2)
            .with_ability("Single Weapon", 5)
            .with_weapon(Weapon::new("Longsword", WeaponKind::Single).with_modifiers(2, 4, 1, 6))
            .with_armor(Armor::new("Chain Mail", 4))
    }

    #[test]
    fn combat_bonuses() {
        let k = knight();
        let sword = k.weapon("Longsword").unwrap().clone();
        assert_eq!(k.weapon_skill_bonus(&sword), 2 + 5 + 4);
        assert_eq!(k.defense_bonus(), 1 + 5 + 1);
        assert_eq!(k.initiative_bonus(&sword), 1 + 2);
        assert_eq!(k.strength_bonus(), 3);
        assert_eq!(k.soak(), 2 + 4);
    }

    #[test]
    fn unarmed_defense_uses_brawl() {
        let c = Character::new("Peasant")
            .with_characteristic(Characteristic::Quickness, 2)
            .with_ability("Brawl", 1);
        assert_eq!(c.defense_bonus(), 3);
    }

    #[test]
    fn negative_strength_adds_nothing() {
        let c = Character::new("Scholar").with_characteristic(Characteristic::Strength, -2);
        assert_eq!(c.strength_bonus(), 0);
    }

    #[test]
    fn missing_art_is_none_not_zero() {
        let c = Character::new("Apprentice").with_technique(Technique::Creo, 0);
        assert_eq!(c.technique(Technique::Creo), Some(0));
        assert_eq!(c.technique(Technique::Rego), None);
        assert_eq!(c.form(Form::Ignem), None);
    }

    #[test]
    fn ready_unknown_weapon_fails() {
        let mut k = knight();
        assert!(k.ready_weapon("Halberd").is_err());
        assert!(k.ready_weapon("Longsword").is_ok());
    }

    #[test]
    fn wound_penalties_sum() {
        let mut k = knight();
        k.add_wound(Wound::new(WoundSeverity::Light, HitLocation::Torso, "dagger"));
        k.add_wound(Wound::new(WoundSeverity::Medium, HitLocation::Head, "mace"));
        assert_eq!(k.wound_penalty(), 4);
    }

    #[test]
    fn strain_accumulates() {
        let mut c = Character::new("Magus");
        c.add_fatigue(2);
        c.add_warping(6);
        assert_eq!(c.fatigue, FatigueLevel::Weary);
        assert_eq!(c.fatigue_penalty(), 1);
        assert_eq!(c.warping_score(), 1);
    }

    #[test]
    fn json_roundtrip() {
        let k = knight().with_all_arts(3);
        let json = k.to_json().unwrap();
        let back = Character::from_json(&json).unwrap();
        assert_eq!(back.id, k.id);
        assert_eq!(back.technique(Technique::Muto), Some(3));
        assert_eq!(back.weapon("Longsword"), k.weapon("Longsword"));
    }

    #[test]
    fn bad_json_is_an_error() {
        assert!(Character::from_json("{ not json").is_err());
    }

    proptest! {
        #[test]
        fn fatigue_stays_on_the_ladder(steps in proptest::collection::vec(-6i32..=6, 0..20)) {
            let mut c = Character::new("Runner");
            for s in steps {
                c.add_fatigue(s);
                prop_assert!((0..=5).contains(&c.fatigue.index()));
            }
        }
    }
}
