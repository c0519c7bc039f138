//! Combat rounds: initiative, turn order, and temporary modifiers.
//!
//! A [`CombatRound`] owns only what combat itself changes: initiative,
//! actions left, stun, and short-lived modifiers from feints and charges.
//! Characters stay with the caller and are passed in for each action.

pub mod action;

pub use action::{
    ActionOutcome, AttackRequest, CombatAction, CombatOutcome, FeintOutcome, resolve_attack,
    resolve_charge, resolve_feint,
};

use ars_core::{CharacterId, FatigueLevel, HasCombatStats};
use serde::{Deserialize, Serialize};

use crate::context::ResolveContext;
use crate::error::{MechError, MechResult};
use crate::event::{ResolutionEvent, ResolutionKind};

/// Which rolls a temporary modifier applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModifierScope {
    /// Every attack while it lasts.
    Attack,
    /// Every defense while it lasts.
    Defense,
    /// The next defense only; used up when applied.
    NextDefense,
}

/// A modifier that lasts a number of rounds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TempModifier {
    /// Where it came from, e.g. "feint".
    pub name: String,
    /// Amount added to the roll.
    pub value: i32,
    /// Round boundaries left before it expires.
    pub rounds_remaining: u32,
    /// Which rolls it affects.
    pub scope: ModifierScope,
}

/// A character's state within one combat.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Combatant {
    /// The character's id.
    pub id: CharacterId,
    /// Display name.
    pub name: String,
    /// Weapon the character entered combat with.
    pub weapon: String,
    /// Rolled initiative.
    pub initiative: i32,
    /// Actions left this round.
    pub actions_remaining: u32,
    /// A stunned combatant cannot act.
    pub is_stunned: bool,
    /// Fatigue as of the last time the character acted or joined.
    pub fatigue: FatigueLevel,
    /// Active temporary modifiers.
    pub modifiers: Vec<TempModifier>,
}

impl Combatant {
    /// Add a temporary modifier.
    pub fn apply_modifier(
        &mut self,
        name: impl Into<String>,
        value: i32,
        rounds: u32,
        scope: ModifierScope,
    ) {
        self.modifiers.push(TempModifier {
            name: name.into(),
            value,
            rounds_remaining: rounds,
            scope,
        });
    }

    /// Sum of active attack modifiers.
    pub fn attack_modifier(&self) -> i32 {
        self.sum_scope(|s| s == ModifierScope::Attack)
    }

    /// Sum of modifiers that will apply to the next defense.
    pub fn defense_modifier(&self) -> i32 {
        self.sum_scope(|s| matches!(s, ModifierScope::Defense | ModifierScope::NextDefense))
    }

    /// Whether the combatant may take an action now.
    pub fn can_act(&self) -> bool {
        self.can_act_at(self.fatigue)
    }

    fn can_act_at(&self, fatigue: FatigueLevel) -> bool {
        self.actions_remaining > 0 && !self.is_stunned && fatigue.can_act()
    }

    fn sum_scope(&self, pred: impl Fn(ModifierScope) -> bool) -> i32 {
        self.modifiers
            .iter()
            .filter(|m| pred(m.scope))
            .map(|m| m.value)
            .sum()
    }

    fn consume_next_defense(&mut self) {
        self.modifiers
            .retain(|m| m.scope != ModifierScope::NextDefense);
    }

    fn expire_modifiers(&mut self) {
        for m in &mut self.modifiers {
            m.rounds_remaining = m.rounds_remaining.saturating_sub(1);
        }
        self.modifiers.retain(|m| m.rounds_remaining > 0);
    }
}

/// The state of an ongoing combat.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombatRound {
    combatants: Vec<Combatant>,
    /// Indices into `combatants`, highest initiative first.
    initiative_order: Vec<usize>,
    current_turn: usize,
    round_number: u32,
}

impl CombatRound {
    /// Create an empty combat at round 1.
    pub fn new() -> Self {
        Self {
            combatants: Vec::new(),
            initiative_order: Vec::new(),
            current_turn: 0,
            round_number: 1,
        }
    }

    /// Roll initiative for a character and add them to the order.
    ///
    /// Initiative is a simple die + Quickness + the weapon's initiative
    /// modifier + `initiative_modifier`. Ties keep the order combatants were
    /// added in. Joining mid-round does not change whose turn it is; a
    /// newcomer who sorts ahead of the current combatant first acts next
    /// round. Returns the rolled initiative.
    pub fn add_combatant(
        &mut self,
        ctx: &mut ResolveContext<'_>,
        character: &impl HasCombatStats,
        weapon: &str,
        initiative_modifier: i32,
    ) -> MechResult<i32> {
        let weapon_stats = character
            .weapon(weapon)
            .ok_or_else(|| MechError::UnknownWeapon {
                character: character.name().to_string(),
                weapon: weapon.to_string(),
            })?;
        if self.index_of(character.id()).is_some() {
            return Err(MechError::InvalidConfiguration(format!(
                "{} is already in this combat",
                character.name()
            )));
        }

        let roll = ctx.simple_die();
        let initiative =
            roll.total() + character.initiative_bonus(weapon_stats) + initiative_modifier;

        let acting = self.initiative_order.get(self.current_turn).copied();
        self.combatants.push(Combatant {
            id: character.id(),
            name: character.name().to_string(),
            weapon: weapon.to_string(),
            initiative,
            actions_remaining: 1,
            is_stunned: false,
            fatigue: character.fatigue_level(),
            modifiers: Vec::new(),
        });
        self.sort_initiative();
        if let Some(acting) = acting {
            self.current_turn = self
                .initiative_order
                .iter()
                .position(|&i| i == acting)
                .unwrap_or(0);
        }

        tracing::debug!(who = character.name(), initiative, "initiative rolled");
        ctx.emit(
            ResolutionEvent::new(ResolutionKind::Initiative, vec![character.id()])
                .with_delta("initiative", initiative),
        );
        Ok(initiative)
    }

    /// The combatant whose turn it is.
    pub fn current(&self) -> MechResult<&Combatant> {
        self.initiative_order
            .get(self.current_turn)
            .map(|&i| &self.combatants[i])
            .ok_or_else(|| MechError::InvalidConfiguration("combat has no combatants".to_string()))
    }

    /// Advance to the next turn. Returns true if a new round started.
    ///
    /// Starting a new round restores every combatant's action and ages
    /// their temporary modifiers, dropping any that run out.
    pub fn next_turn(&mut self) -> MechResult<bool> {
        if self.initiative_order.is_empty() {
            return Err(MechError::InvalidConfiguration(
                "combat has no combatants".to_string(),
            ));
        }
        self.current_turn += 1;
        if self.current_turn < self.initiative_order.len() {
            return Ok(false);
        }

        self.current_turn = 0;
        self.round_number += 1;
        for c in &mut self.combatants {
            c.actions_remaining = 1;
            c.expire_modifiers();
        }
        tracing::debug!(round = self.round_number, "new combat round");
        Ok(true)
    }

    /// Take an action as `actor` against `target`.
    ///
    /// Both must be in this combat and the actor must be able to act. The
    /// actor's attack modifiers and the target's pending defense modifiers
    /// fold into the roll; next-defense modifiers are used up. A successful
    /// feint leaves a penalty on the target's next defense; a charge leaves
    /// one on the charger's defenses until the round ends.
    pub fn act(
        &mut self,
        ctx: &mut ResolveContext<'_>,
        action: CombatAction,
        actor: &impl HasCombatStats,
        target: &impl HasCombatStats,
        request: &AttackRequest,
    ) -> MechResult<ActionOutcome> {
        let actor_index = self
            .index_of(actor.id())
            .ok_or_else(|| MechError::UnknownParticipant(actor.name().to_string()))?;
        let target_index = self
            .index_of(target.id())
            .ok_or_else(|| MechError::UnknownParticipant(target.name().to_string()))?;

        if !self.combatants[actor_index].can_act_at(actor.fatigue_level()) {
            return Err(MechError::CannotAct(actor.name().to_string()));
        }

        let mut request = request.clone();
        if request.weapon.is_none() {
            request.weapon = Some(self.combatants[actor_index].weapon.clone());
        }
        request.modifier += self.combatants[actor_index].attack_modifier();
        request.defense_modifier += self.combatants[target_index].defense_modifier();

        let outcome = match action {
            CombatAction::Attack => {
                ActionOutcome::Strike(resolve_attack(ctx, actor, target, &request)?)
            }
            CombatAction::Charge => {
                ActionOutcome::Strike(resolve_charge(ctx, actor, target, &request)?)
            }
            CombatAction::Feint => ActionOutcome::Feint(resolve_feint(ctx, actor, target, &request)),
        };

        self.combatants[actor_index].fatigue = actor.fatigue_level();
        self.combatants[target_index].fatigue = target.fatigue_level();

        match &outcome {
            ActionOutcome::Strike(_) => {
                self.combatants[target_index].consume_next_defense();
            }
            ActionOutcome::Feint(feint) => {
                if let Some(penalty) = feint.defense_penalty {
                    self.combatants[target_index].apply_modifier(
                        "feint",
                        penalty,
                        1,
                        ModifierScope::NextDefense,
                    );
                }
            }
        }
        if action == CombatAction::Charge {
            let penalty = ctx.rules.charge_defense_penalty;
            self.combatants[actor_index].apply_modifier(
                "charge",
                penalty,
                1,
                ModifierScope::Defense,
            );
        }
        self.combatants[actor_index].actions_remaining -= 1;

        Ok(outcome)
    }

    /// Stun or un-stun a combatant.
    pub fn set_stunned(&mut self, id: CharacterId, stunned: bool) -> MechResult<()> {
        let c = self
            .combatant_mut(id)
            .ok_or_else(|| MechError::UnknownParticipant(id.to_string()))?;
        c.is_stunned = stunned;
        Ok(())
    }

    /// Look up a combatant.
    pub fn combatant(&self, id: CharacterId) -> Option<&Combatant> {
        self.combatants.iter().find(|c| c.id == id)
    }

    /// Look up a combatant for editing.
    pub fn combatant_mut(&mut self, id: CharacterId) -> Option<&mut Combatant> {
        self.combatants.iter_mut().find(|c| c.id == id)
    }

    /// Combatants in initiative order.
    pub fn initiative_order(&self) -> Vec<&Combatant> {
        self.initiative_order
            .iter()
            .map(|&i| &self.combatants[i])
            .collect()
    }

    /// Current round number (1-based).
    pub fn round_number(&self) -> u32 {
        self.round_number
    }

    /// Position in the initiative order of the current turn.
    pub fn current_turn(&self) -> usize {
        self.current_turn
    }

    /// Number of combatants.
    pub fn len(&self) -> usize {
        self.combatants.len()
    }

    /// Returns true if nobody has joined yet.
    pub fn is_empty(&self) -> bool {
        self.combatants.is_empty()
    }

    fn index_of(&self, id: CharacterId) -> Option<usize> {
        self.combatants.iter().position(|c| c.id == id)
    }

    /// Sort combatants by initiative (descending, stable on ties).
    fn sort_initiative(&mut self) {
        let mut indices: Vec<usize> = (0..self.combatants.len()).collect();
        indices.sort_by(|&a, &b| {
            self.combatants[b]
                .initiative
                .cmp(&self.combatants[a].initiative)
        });
        self.initiative_order = indices;
    }
}

impl Default for CombatRound {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RulesConfig;
    use crate::dice::ScriptedRolls;
    use ars_core::{Character, Characteristic, Weapon, WeaponKind};

    fn fighter(name: &str, quickness: i32) -> Character {
        Character::new(name)
            .with_characteristic(Characteristic::Quickness, quickness)
            .with_ability("Single Weapon", 3)
            .with_ability("Guile", 5)
            .with_weapon(Weapon::new("Sword", WeaponKind::Single).with_modifiers(1, 2, 1, 5))
    }

    #[test]
    fn combat_lifecycle() {
        let rules = RulesConfig::default();
        let mut dice = ScriptedRolls::new([5, 2, 9]);
        let mut ctx = ResolveContext::new(&mut dice, &rules);
        let alice = fighter("Alice", 1);
        let bob = fighter("Bob", 0);
        let carl = fighter("Carl", 0);

        let mut combat = CombatRound::new();
        assert!(combat.is_empty());
        assert_eq!(combat.add_combatant(&mut ctx, &alice, "Sword", 0).unwrap(), 7);
        assert_eq!(combat.add_combatant(&mut ctx, &bob, "Sword", 0).unwrap(), 3);
        assert_eq!(combat.add_combatant(&mut ctx, &carl, "Sword", 0).unwrap(), 10);

        assert_eq!(combat.round_number(), 1);
        assert_eq!(combat.current().unwrap().name, "Carl");
        assert!(!combat.next_turn().unwrap());
        assert_eq!(combat.current().unwrap().name, "Alice");
        assert!(!combat.next_turn().unwrap());
        assert_eq!(combat.current().unwrap().name, "Bob");
        assert!(combat.next_turn().unwrap());
        assert_eq!(combat.round_number(), 2);
        assert_eq!(combat.current().unwrap().name, "Carl");
    }

    #[test]
    fn initiative_ties_keep_insertion_order() {
        let rules = RulesConfig::default();
        let mut dice = ScriptedRolls::new([4, 4, 4]);
        let mut ctx = ResolveContext::new(&mut dice, &rules);
        let first = fighter("First", 0);
        let second = fighter("Second", 0);
        let third = fighter("Third", 0);
        let mut combat = CombatRound::new();
        combat.add_combatant(&mut ctx, &first, "Sword", 0).unwrap();
        combat.add_combatant(&mut ctx, &second, "Sword", 0).unwrap();
        combat.add_combatant(&mut ctx, &third, "Sword", 0).unwrap();
        let names: Vec<&str> = combat
            .initiative_order()
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["First", "Second", "Third"]);
    }

    #[test]
    fn empty_combat_errors() {
        let mut combat = CombatRound::new();
        assert!(matches!(
            combat.next_turn(),
            Err(MechError::InvalidConfiguration(_))
        ));
        assert!(combat.current().is_err());
    }

    #[test]
    fn missing_weapon_is_rejected() {
        let rules = RulesConfig::default();
        let mut dice = ScriptedRolls::new([]);
        let mut ctx = ResolveContext::new(&mut dice, &rules);
        let mut combat = CombatRound::new();
        let err = combat
            .add_combatant(&mut ctx, &fighter("Alice", 0), "Axe", 0)
            .unwrap_err();
        assert!(matches!(err, MechError::UnknownWeapon { .. }));
        assert!(combat.is_empty());
    }

    #[test]
    fn joining_twice_is_rejected() {
        let rules = RulesConfig::default();
        let mut dice = ScriptedRolls::new([]);
        let mut ctx = ResolveContext::new(&mut dice, &rules);
        let alice = fighter("Alice", 0);
        let mut combat = CombatRound::new();
        combat.add_combatant(&mut ctx, &alice, "Sword", 0).unwrap();
        assert!(combat.add_combatant(&mut ctx, &alice, "Sword", 0).is_err());
        assert_eq!(combat.len(), 1);
    }

    #[test]
    fn one_action_per_round() {
        let rules = RulesConfig::default();
        let mut dice = ScriptedRolls::with_seed([9, 2], 3);
        let mut ctx = ResolveContext::new(&mut dice, &rules);
        let alice = fighter("Alice", 0);
        let bob = fighter("Bob", 0);
        let mut combat = CombatRound::new();
        combat.add_combatant(&mut ctx, &alice, "Sword", 0).unwrap();
        combat.add_combatant(&mut ctx, &bob, "Sword", 0).unwrap();

        let req = AttackRequest::default();
        combat
            .act(&mut ctx, CombatAction::Attack, &alice, &bob, &req)
            .unwrap();
        let err = combat
            .act(&mut ctx, CombatAction::Attack, &alice, &bob, &req)
            .unwrap_err();
        assert!(matches!(err, MechError::CannotAct(_)));

        combat.next_turn().unwrap();
        combat.next_turn().unwrap();
        assert!(combat.act(&mut ctx, CombatAction::Attack, &alice, &bob, &req).is_ok());
    }

    #[test]
    fn outsider_is_unknown() {
        let rules = RulesConfig::default();
        let mut dice = ScriptedRolls::new([]);
        let mut ctx = ResolveContext::new(&mut dice, &rules);
        let alice = fighter("Alice", 0);
        let stranger = fighter("Stranger", 0);
        let mut combat = CombatRound::new();
        combat.add_combatant(&mut ctx, &alice, "Sword", 0).unwrap();
        let err = combat
            .act(
                &mut ctx,
                CombatAction::Attack,
                &alice,
                &stranger,
                &AttackRequest::default(),
            )
            .unwrap_err();
        assert!(matches!(err, MechError::UnknownParticipant(_)));
    }

    #[test]
    fn stunned_cannot_act() {
        let rules = RulesConfig::default();
        let mut dice = ScriptedRolls::new([]);
        let mut ctx = ResolveContext::new(&mut dice, &rules);
        let alice = fighter("Alice", 0);
        let bob = fighter("Bob", 0);
        let mut combat = CombatRound::new();
        combat.add_combatant(&mut ctx, &alice, "Sword", 0).unwrap();
        combat.add_combatant(&mut ctx, &bob, "Sword", 0).unwrap();
        combat.set_stunned(alice.id, true).unwrap();
        assert!(combat
            .act(&mut ctx, CombatAction::Attack, &alice, &bob, &AttackRequest::default())
            .is_err());
    }

    #[test]
    fn feint_penalises_next_defense_once() {
        let rules = RulesConfig::default();
        // Initiative 5, 5. Feint 5 + 5 Guile vs 2 + 0 Awareness.
        // Attack die 6, defense die 6: attack 6 + 5 = 11,
        // defense 6 + 4 - 3 = 7, hit; location die 0.
        let mut dice = ScriptedRolls::new([5, 5, 5, 2, 6, 6, 0]);
        let mut ctx = ResolveContext::new(&mut dice, &rules);
        let alice = fighter("Alice", 0);
        let bob = fighter("Bob", 0);
        let mut combat = CombatRound::new();
        combat.add_combatant(&mut ctx, &alice, "Sword", 0).unwrap();
        combat.add_combatant(&mut ctx, &bob, "Sword", 0).unwrap();

        let req = AttackRequest::default();
        let feint = combat
            .act(&mut ctx, CombatAction::Feint, &alice, &bob, &req)
            .unwrap();
        assert!(feint.as_feint().unwrap().succeeded);
        assert_eq!(combat.combatant(bob.id).unwrap().defense_modifier(), -3);

        combat.combatant_mut(alice.id).unwrap().actions_remaining = 1;
        let strike = combat
            .act(&mut ctx, CombatAction::Attack, &alice, &bob, &req)
            .unwrap();
        let strike = strike.as_strike().unwrap();
        assert_eq!(strike.defense_total, 7);
        assert!(strike.is_hit);
        assert_eq!(combat.combatant(bob.id).unwrap().defense_modifier(), 0);
    }

    #[test]
    fn charge_leaves_charger_open_until_round_ends() {
        let rules = RulesConfig::default();
        let mut dice = ScriptedRolls::with_seed([5, 5, 3, 9], 1);
        let mut ctx = ResolveContext::new(&mut dice, &rules);
        let alice = fighter("Alice", 0);
        let bob = fighter("Bob", 0);
        let mut combat = CombatRound::new();
        combat.add_combatant(&mut ctx, &alice, "Sword", 0).unwrap();
        combat.add_combatant(&mut ctx, &bob, "Sword", 0).unwrap();

        let out = combat
            .act(&mut ctx, CombatAction::Charge, &alice, &bob, &AttackRequest::default())
            .unwrap();
        // 3 + (0 + 3 + 2) + 2 charge bonus.
        assert_eq!(out.as_strike().unwrap().attack_total, 10);
        assert_eq!(combat.combatant(alice.id).unwrap().defense_modifier(), -1);

        combat.next_turn().unwrap();
        assert!(combat.next_turn().unwrap());
        assert_eq!(combat.combatant(alice.id).unwrap().defense_modifier(), 0);
    }

    #[test]
    fn failed_action_leaves_combatant_untouched() {
        let rules = RulesConfig::default();
        let mut dice = ScriptedRolls::new([5, 4, 7, 7]);
        let mut ctx = ResolveContext::new(&mut dice, &rules);
        let mut alice = fighter("Alice", 0);
        let bob = fighter("Bob", 0);
        let mut combat = CombatRound::new();
        combat.add_combatant(&mut ctx, &alice, "Sword", 0).unwrap();
        combat.add_combatant(&mut ctx, &bob, "Sword", 0).unwrap();

        alice.fatigue = FatigueLevel::Tired;
        let err = combat
            .act(
                &mut ctx,
                CombatAction::Attack,
                &alice,
                &bob,
                &AttackRequest::with_weapon("Halberd"),
            )
            .unwrap_err();
        assert!(matches!(err, MechError::UnknownWeapon { .. }));

        let stored = combat.combatant(alice.id).unwrap();
        assert_eq!(stored.fatigue, FatigueLevel::Fresh);
        assert_eq!(stored.actions_remaining, 1);
        assert_eq!(dice.remaining(), 2);
    }

    #[test]
    fn unconscious_actor_is_refused_without_recording() {
        let rules = RulesConfig::default();
        let mut dice = ScriptedRolls::new([5, 4]);
        let mut ctx = ResolveContext::new(&mut dice, &rules);
        let mut alice = fighter("Alice", 0);
        let bob = fighter("Bob", 0);
        let mut combat = CombatRound::new();
        combat.add_combatant(&mut ctx, &alice, "Sword", 0).unwrap();
        combat.add_combatant(&mut ctx, &bob, "Sword", 0).unwrap();

        alice.fatigue = FatigueLevel::Unconscious;
        let err = combat
            .act(&mut ctx, CombatAction::Attack, &alice, &bob, &AttackRequest::default())
            .unwrap_err();
        assert!(matches!(err, MechError::CannotAct(_)));
        assert_eq!(
            combat.combatant(alice.id).unwrap().fatigue,
            FatigueLevel::Fresh
        );
    }

    #[test]
    fn joining_mid_round_keeps_the_current_turn() {
        let rules = RulesConfig::default();
        let mut dice = ScriptedRolls::new([5, 3, 9]);
        let mut ctx = ResolveContext::new(&mut dice, &rules);
        let alice = fighter("Alice", 1);
        let bob = fighter("Bob", 0);
        let carl = fighter("Carl", 0);
        let mut combat = CombatRound::new();
        combat.add_combatant(&mut ctx, &alice, "Sword", 0).unwrap();
        combat.add_combatant(&mut ctx, &bob, "Sword", 0).unwrap();
        combat.next_turn().unwrap();
        assert_eq!(combat.current().unwrap().name, "Bob");

        assert_eq!(combat.add_combatant(&mut ctx, &carl, "Sword", 0).unwrap(), 10);
        assert_eq!(combat.current().unwrap().name, "Bob");
        assert_eq!(combat.initiative_order()[0].name, "Carl");

        assert!(combat.next_turn().unwrap());
        assert_eq!(combat.current().unwrap().name, "Carl");
    }

    #[test]
    fn modifiers_expire_after_their_rounds() {
        let mut c = Combatant {
            id: CharacterId::new(),
            name: "Test".to_string(),
            weapon: "Sword".to_string(),
            initiative: 0,
            actions_remaining: 1,
            is_stunned: false,
            fatigue: FatigueLevel::Fresh,
            modifiers: Vec::new(),
        };
        c.apply_modifier("blessing", 2, 2, ModifierScope::Attack);
        c.expire_modifiers();
        assert_eq!(c.attack_modifier(), 2);
        c.expire_modifiers();
        assert_eq!(c.attack_modifier(), 0);
    }
}
