//! Rules resolution for Ars Magica.
//!
//! Provides the simple and stress dice, the wound, aging, and warping
//! tables, melee combat rounds, formulaic and spontaneous spellcasting,
//! and Certamen duels. Every resolver takes a [`ResolveContext`] carrying
//! the die source, the rule constants, and an optional event sink, so the
//! same inputs and the same rolls always give the same outcome.

pub mod certamen;
pub mod combat;
pub mod config;
pub mod context;
pub mod dice;
pub mod error;
pub mod event;
pub mod spell;
pub mod tables;

pub use certamen::{Duel, DuelStage, DuelSummary, Duelist, ExchangeOutcome, ExchangeRoll};
pub use combat::{
    ActionOutcome, AttackRequest, CombatAction, CombatOutcome, CombatRound, Combatant,
    FeintOutcome, ModifierScope, TempModifier, resolve_attack, resolve_charge, resolve_feint,
};
pub use config::RulesConfig;
pub use context::ResolveContext;
pub use dice::{
    BotchCheck, CheckRoll, DieKind, DieRoll, DieSource, ScriptedRolls, ability_check,
    botch_check, certamen_check, simple_die, spell_check, stress_die,
};
pub use error::{MechError, MechResult};
pub use event::{Delta, EventLog, EventSink, LoggedEvent, ResolutionEvent, ResolutionKind};
pub use spell::{
    CastRequest, CastingMode, CastingOutcome, cast_ceremonial, cast_defiant, cast_spell,
    cast_spontaneous, cast_with_arcane_connection, designed_level, ritual_casting_minutes,
};
pub use tables::{
    AgingCrisis, AgingOutcome, AgingRequest, WarpingOutcome, WarpingTier, add_warping,
    aging_crisis, hit_location, roll_aging, warping_score, warping_tier, wound_severity,
};
