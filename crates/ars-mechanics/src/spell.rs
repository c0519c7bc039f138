//! Spellcasting.
//!
//! Every casting mode runs through the same sequence: read the Arts, build
//! a casting total, roll, compare against the spell's level, then work out
//! fatigue, warping, and penetration. The modes only change the inputs
//! (halved Arts, a bonus, forced stress) and, for defiant casting, the
//! warping.
//!
//! Fatigue is charged on success only. A failed casting reports its cost
//! in `fatigue_cost` but leaves `fatigue_applied` at 0.

use std::fmt;

use ars_core::{AccumulatesStrain, Duration, Form, HasArtScores, Range, Spell, Target, Technique};
use serde::{Deserialize, Serialize};

use crate::context::ResolveContext;
use crate::dice::{DieRoll, spell_check};
use crate::error::{MechError, MechResult};
use crate::event::{ResolutionEvent, ResolutionKind};

/// How a spell was cast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CastingMode {
    /// A known formulaic or ritual spell.
    Formulaic,
    /// An improvised effect on halved Arts.
    Spontaneous,
    /// A ritual with helpers adding their Arts.
    Ceremonial,
    /// Pushing past safe limits for a bonus and certain warping.
    Defiant,
    /// Reaching a distant target through an arcane connection.
    ArcaneConnection,
}

impl fmt::Display for CastingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Formulaic => write!(f, "formulaic"),
            Self::Spontaneous => write!(f, "spontaneous"),
            Self::Ceremonial => write!(f, "ceremonial"),
            Self::Defiant => write!(f, "defiant"),
            Self::ArcaneConnection => write!(f, "arcane connection"),
        }
    }
}

/// Situational inputs to a casting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastRequest {
    /// Magical aura; negative for hostile realms.
    pub aura: i32,
    /// Other modifiers added to the total.
    pub modifier: i32,
    /// Roll a stress die (the default) or a simple die. Some modes always
    /// use stress.
    pub stress: bool,
    /// Added to penetration.
    pub penetration_bonus: i32,
}

impl Default for CastRequest {
    fn default() -> Self {
        Self {
            aura: 0,
            modifier: 0,
            stress: true,
            penetration_bonus: 0,
        }
    }
}

impl CastRequest {
    /// A stressful casting in the given aura.
    pub fn in_aura(aura: i32) -> Self {
        Self {
            aura,
            ..Self::default()
        }
    }
}

/// The result of a casting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastingOutcome {
    /// Who cast.
    pub caster: ars_core::CharacterId,
    /// How.
    pub mode: CastingMode,
    /// Level the total had to reach.
    pub level: i32,
    /// The die.
    pub roll: DieRoll,
    /// Final casting total.
    pub total: i32,
    /// Total reached the spell's level.
    pub succeeded: bool,
    /// Fatigue levels the spell costs.
    pub fatigue_cost: i32,
    /// Fatigue levels actually charged (the cost on success, else 0).
    pub fatigue_applied: i32,
    /// Warping points gained.
    pub warping_gained: i32,
    /// The botch dice turned up a zero.
    pub botched: bool,
    /// Zeros on the botch dice.
    pub botch_zeros: u32,
    /// Total beyond the spell's level plus bonuses, on success.
    pub penetration: Option<i32>,
}

impl CastingOutcome {
    /// Charge the caster the applied fatigue and the warping gained.
    pub fn apply(&self, caster: &mut impl AccumulatesStrain) {
        if self.fatigue_applied > 0 {
            caster.add_fatigue(self.fatigue_applied);
        }
        if self.warping_gained > 0 {
            caster.add_warping(self.warping_gained);
        }
    }
}

/// Inputs that vary by casting mode.
struct Casting {
    mode: CastingMode,
    bonus: i32,
    halve_arts: bool,
    force_stress: bool,
    extra_warping: i32,
}

impl Casting {
    fn plain(mode: CastingMode) -> Self {
        Self {
            mode,
            bonus: 0,
            halve_arts: false,
            force_stress: false,
            extra_warping: 0,
        }
    }
}

fn art_score(
    caster: &impl HasArtScores,
    technique: Technique,
    form: Form,
) -> MechResult<(i32, i32)> {
    let tech = caster
        .technique(technique)
        .ok_or_else(|| MechError::UnknownArt {
            character: caster.name().to_string(),
            art: technique.to_string(),
        })?;
    let form_score = caster.form(form).ok_or_else(|| MechError::UnknownArt {
        character: caster.name().to_string(),
        art: form.to_string(),
    })?;
    Ok((tech, form_score))
}

/// Fatigue levels a spell costs before success is known.
pub fn fatigue_cost(spell: &Spell, reduction: i32) -> i32 {
    if spell.ritual {
        return 0;
    }
    ((spell.level / 5).max(1) - reduction).max(0)
}

/// Penetration: total beyond the level, plus a bonus, never negative.
pub fn penetration(total: i32, level: i32, bonus: i32) -> i32 {
    (total - level + bonus).max(0)
}

/// Minutes a ritual of this level takes to cast.
pub fn ritual_casting_minutes(level: i32) -> i32 {
    level * 15
}

/// Level of a spell designed from a base effect and its parameters.
pub fn designed_level(base: i32, range: Range, duration: Duration, target: Target) -> i32 {
    base + range.level_modifier() + duration.level_modifier() + target.level_modifier()
}

fn cast(
    ctx: &mut ResolveContext<'_>,
    spell: &Spell,
    caster: &impl HasArtScores,
    request: &CastRequest,
    casting: Casting,
) -> MechResult<CastingOutcome> {
    let (mut tech, mut form) = art_score(caster, spell.technique, spell.form)?;
    if casting.halve_arts {
        tech /= 2;
        form /= 2;
    }

    let casting_total = tech + form + spell.mastery_level + casting.bonus + request.modifier;
    let stress = request.stress || casting.force_stress;
    let botch_dice = (spell.level / 5).max(0) as u32;
    let botch_dice = botch_dice.max(ctx.rules.min_spell_botch_dice);

    let check = spell_check(
        ctx.dice,
        casting_total,
        request.aura,
        caster.fatigue_penalty(),
        stress,
        botch_dice,
    );

    let total = check.total;
    let succeeded = total >= spell.level;
    let botched = check.is_botch;
    let hostile_one = request.aura < 0 && check.roll.triggered_botch_check();
    let warping_gained = i32::from(botched || hostile_one) + casting.extra_warping;
    let cost = fatigue_cost(spell, caster.fatigue_reduction());
    let fatigue_applied = if succeeded { cost } else { 0 };

    tracing::debug!(
        caster = caster.name(),
        spell = %spell,
        mode = %casting.mode,
        total,
        succeeded,
        botched,
        warping_gained,
        "spell cast"
    );
    ctx.emit(
        ResolutionEvent::new(ResolutionKind::Cast, vec![caster.id()])
            .with_delta("total", total)
            .with_delta("fatigue", fatigue_applied)
            .with_delta("warping", warping_gained),
    );

    Ok(CastingOutcome {
        caster: caster.id(),
        mode: casting.mode,
        level: spell.level,
        botch_zeros: check.botch_zeros(),
        roll: check.roll,
        total,
        succeeded,
        fatigue_cost: cost,
        fatigue_applied,
        warping_gained,
        botched,
        penetration: succeeded
            .then(|| penetration(total, spell.level, request.penetration_bonus)),
    })
}

/// Cast a formulaic or ritual spell.
pub fn cast_spell(
    ctx: &mut ResolveContext<'_>,
    spell: &Spell,
    caster: &impl HasArtScores,
    request: &CastRequest,
) -> MechResult<CastingOutcome> {
    cast(ctx, spell, caster, request, Casting::plain(CastingMode::Formulaic))
}

/// Cast an improvised effect of `level` on halved Arts. Always stressful.
pub fn cast_spontaneous(
    ctx: &mut ResolveContext<'_>,
    technique: Technique,
    form: Form,
    level: i32,
    caster: &impl HasArtScores,
    request: &CastRequest,
) -> MechResult<CastingOutcome> {
    let spell = Spell::new(format!("Spontaneous {technique} {form}"), technique, form, level)
        .with_duration(Duration::Diameter);
    let casting = Casting {
        halve_arts: true,
        force_stress: true,
        ..Casting::plain(CastingMode::Spontaneous)
    };
    cast(ctx, &spell, caster, request, casting)
}

/// Cast a ritual ceremonially, with each helper adding the lower of their
/// Technique and Form. The sum is divided by five. Always stressful.
pub fn cast_ceremonial<P: HasArtScores>(
    ctx: &mut ResolveContext<'_>,
    spell: &Spell,
    caster: &impl HasArtScores,
    participants: &[&P],
    request: &CastRequest,
) -> MechResult<CastingOutcome> {
    if !spell.ritual {
        return Err(MechError::InvalidConfiguration(format!(
            "{} is not a ritual and cannot be cast ceremonially",
            spell.name
        )));
    }
    let mut sum = 0;
    for p in participants {
        let (tech, form) = art_score(*p, spell.technique, spell.form)?;
        sum += tech.min(form);
    }
    let casting = Casting {
        bonus: sum / 5,
        force_stress: true,
        ..Casting::plain(CastingMode::Ceremonial)
    };
    cast(ctx, spell, caster, request, casting)
}

/// Cast defiantly: a flat bonus and one warping point whatever happens.
/// Always stressful.
pub fn cast_defiant(
    ctx: &mut ResolveContext<'_>,
    spell: &Spell,
    caster: &impl HasArtScores,
    request: &CastRequest,
) -> MechResult<CastingOutcome> {
    let casting = Casting {
        bonus: ctx.rules.defiant_bonus,
        force_stress: true,
        extra_warping: 1,
        ..Casting::plain(CastingMode::Defiant)
    };
    cast(ctx, spell, caster, request, casting)
}

/// Cast an Arcane Connection range spell, adding the connection's strength
/// up to a cap. Always stressful.
pub fn cast_with_arcane_connection(
    ctx: &mut ResolveContext<'_>,
    spell: &Spell,
    caster: &impl HasArtScores,
    connection_strength: i32,
    request: &CastRequest,
) -> MechResult<CastingOutcome> {
    if spell.range != Range::ArcaneConnection {
        return Err(MechError::InvalidConfiguration(format!(
            "{} has {} range, not Arcane Connection",
            spell.name, spell.range
        )));
    }
    let casting = Casting {
        bonus: connection_strength.min(ctx.rules.arcane_connection_cap),
        force_stress: true,
        ..Casting::plain(CastingMode::ArcaneConnection)
    };
    cast(ctx, spell, caster, request, casting)
}
