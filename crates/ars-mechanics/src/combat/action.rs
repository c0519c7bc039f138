//! Attack, feint, and charge resolution.

use std::fmt;

use ars_core::{CharacterId, HasCombatStats, Weapon, Wound};
use serde::{Deserialize, Serialize};

use crate::context::ResolveContext;
use crate::dice::DieRoll;
use crate::error::{MechError, MechResult};
use crate::event::{ResolutionEvent, ResolutionKind};
use crate::tables::{hit_location, wound_severity};

/// An action a combatant can take on their turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CombatAction {
    /// A plain weapon attack.
    Attack,
    /// Guile against Awareness; success weakens the target's next defense.
    Feint,
    /// An attack with a bonus that leaves the charger open.
    Charge,
}

impl fmt::Display for CombatAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Attack => write!(f, "Attack"),
            Self::Feint => write!(f, "Feint"),
            Self::Charge => write!(f, "Charge"),
        }
    }
}

/// Situational inputs to an attack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackRequest {
    /// Weapon to strike with. `None` uses the attacker's readied weapon,
    /// or bare hands if nothing is readied.
    pub weapon: Option<String>,
    /// Added to the attack total.
    pub modifier: i32,
    /// Added to the defense total.
    pub defense_modifier: i32,
    /// Roll stress dice (the default) or simple dice.
    pub stress: bool,
}

impl Default for AttackRequest {
    fn default() -> Self {
        Self {
            weapon: None,
            modifier: 0,
            defense_modifier: 0,
            stress: true,
        }
    }
}

impl AttackRequest {
    /// Attack with a named weapon.
    pub fn with_weapon(weapon: impl Into<String>) -> Self {
        Self {
            weapon: Some(weapon.into()),
            ..Self::default()
        }
    }
}

/// The result of one attack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatOutcome {
    /// Who attacked.
    pub attacker: CharacterId,
    /// Who defended.
    pub defender: CharacterId,
    /// The attacker's die.
    pub attack_roll: DieRoll,
    /// The defender's die.
    pub defense_roll: DieRoll,
    /// Attack total; may be negative.
    pub attack_total: i32,
    /// Defense total; may be negative.
    pub defense_total: i32,
    /// Attack beat defense. Ties go to the defender.
    pub is_hit: bool,
    /// Damage before soak, present on a hit.
    pub damage: Option<i32>,
    /// Damage after soak, present on a hit.
    pub final_damage: Option<i32>,
    /// The wound inflicted, if soak did not absorb everything.
    pub wound: Option<Wound>,
    /// Either die botched.
    pub botched: bool,
}

/// The result of a feint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeintOutcome {
    /// Who feinted.
    pub actor: CharacterId,
    /// Who was feinted.
    pub target: CharacterId,
    /// The actor's die.
    pub attack_roll: DieRoll,
    /// The target's die.
    pub defense_roll: DieRoll,
    /// Die + Guile + modifier.
    pub attack_total: i32,
    /// Die + Awareness.
    pub defense_total: i32,
    /// The feint worked.
    pub succeeded: bool,
    /// Modifier for the target's next defense, on success.
    pub defense_penalty: Option<i32>,
}

/// What a combat action produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionOutcome {
    /// An attack or a charge.
    Strike(CombatOutcome),
    /// A feint.
    Feint(FeintOutcome),
}

impl ActionOutcome {
    /// The attack result, if this was an attack or charge.
    pub fn as_strike(&self) -> Option<&CombatOutcome> {
        match self {
            Self::Strike(outcome) => Some(outcome),
            Self::Feint(_) => None,
        }
    }

    /// The feint result, if this was a feint.
    pub fn as_feint(&self) -> Option<&FeintOutcome> {
        match self {
            Self::Feint(outcome) => Some(outcome),
            Self::Strike(_) => None,
        }
    }
}

/// Find the weapon an attack request names.
pub(crate) fn attack_weapon(
    attacker: &impl HasCombatStats,
    request: &AttackRequest,
) -> MechResult<Weapon> {
    match &request.weapon {
        Some(name) => attacker
            .weapon(name)
            .cloned()
            .ok_or_else(|| MechError::UnknownWeapon {
                character: attacker.name().to_string(),
                weapon: name.clone(),
            }),
        None => Ok(attacker
            .readied_weapon()
            .cloned()
            .unwrap_or_else(Weapon::brawling)),
    }
}

/// Resolve one attack.
///
/// Draws the attack die, then the defense die, then a simple die for hit
/// location only if a wound results. Neither character is modified; apply
/// `wound` to the defender yourself.
pub fn resolve_attack(
    ctx: &mut ResolveContext<'_>,
    attacker: &impl HasCombatStats,
    defender: &impl HasCombatStats,
    request: &AttackRequest,
) -> MechResult<CombatOutcome> {
    let weapon = attack_weapon(attacker, request)?;

    let attack_roll = ctx.roll_die(request.stress);
    let attack_total = attack_roll.total() + attacker.weapon_skill_bonus(&weapon) + request.modifier
        - attacker.wound_penalty();

    let defense_roll = ctx.roll_die(request.stress);
    let defense_total = defense_roll.total() + defender.defense_bonus() + request.defense_modifier
        - defender.wound_penalty()
        - defender.fatigue_penalty();

    let is_hit = attack_total > defense_total;
    let mut damage = None;
    let mut final_damage = None;
    let mut wound = None;
    if is_hit {
        let margin = attack_total - defense_total;
        let raw = weapon.damage_modifier + attacker.strength_bonus() + margin / 3;
        let after_soak = (raw - defender.soak()).max(0);
        if let Some(severity) = wound_severity(after_soak) {
            let location = hit_location(ctx);
            wound = Some(Wound::new(severity, location, &weapon.name));
        }
        damage = Some(raw);
        final_damage = Some(after_soak);
    }
    let botched = attack_roll.is_botch || defense_roll.is_botch;

    tracing::debug!(
        attacker = attacker.name(),
        defender = defender.name(),
        weapon = %weapon.name,
        attack_total,
        defense_total,
        is_hit,
        final_damage = final_damage.unwrap_or(0),
        botched,
        "attack resolved"
    );
    ctx.emit(
        ResolutionEvent::new(ResolutionKind::Attack, vec![attacker.id(), defender.id()])
            .with_delta("attack", attack_total)
            .with_delta("defense", defense_total)
            .with_delta("damage", final_damage.unwrap_or(0)),
    );

    Ok(CombatOutcome {
        attacker: attacker.id(),
        defender: defender.id(),
        attack_roll,
        defense_roll,
        attack_total,
        defense_total,
        is_hit,
        damage,
        final_damage,
        wound,
        botched,
    })
}

/// Resolve a feint: die + Guile + modifier against die + Awareness.
pub fn resolve_feint(
    ctx: &mut ResolveContext<'_>,
    actor: &impl HasCombatStats,
    target: &impl HasCombatStats,
    request: &AttackRequest,
) -> FeintOutcome {
    let attack_roll = ctx.roll_die(request.stress);
    let attack_total = attack_roll.total() + actor.ability("Guile") + request.modifier;

    let defense_roll = ctx.roll_die(request.stress);
    let defense_total = defense_roll.total() + target.ability("Awareness");

    let succeeded = attack_total > defense_total;
    let defense_penalty = succeeded.then_some(ctx.rules.feint_penalty);

    tracing::debug!(
        actor = actor.name(),
        target = target.name(),
        attack_total,
        defense_total,
        succeeded,
        "feint resolved"
    );
    ctx.emit(
        ResolutionEvent::new(ResolutionKind::Feint, vec![actor.id(), target.id()])
            .with_delta("attack", attack_total)
            .with_delta("defense", defense_total),
    );

    FeintOutcome {
        actor: actor.id(),
        target: target.id(),
        attack_roll,
        defense_roll,
        attack_total,
        defense_total,
        succeeded,
        defense_penalty,
    }
}

/// Resolve a charge: an attack with the charge bonus added.
///
/// The defense penalty the charger suffers afterwards is tracked by
/// [`CombatRound`](super::CombatRound).
pub fn resolve_charge(
    ctx: &mut ResolveContext<'_>,
    attacker: &impl HasCombatStats,
    defender: &impl HasCombatStats,
    request: &AttackRequest,
) -> MechResult<CombatOutcome> {
    let charged = AttackRequest {
        modifier: request.modifier + ctx.rules.charge_attack_bonus,
        ..request.clone()
    };
    let outcome = resolve_attack(ctx, attacker, defender, &charged)?;
    ctx.emit(
        ResolutionEvent::new(ResolutionKind::Charge, vec![attacker.id(), defender.id()])
            .with_delta("attack", outcome.attack_total),
    );
    Ok(outcome)
}
