//! Damage to wound severity.

use ars_core::{HitLocation, WoundSeverity};

use crate::context::ResolveContext;

/// Severity of a wound from damage left after soak.
///
/// Each tier starts at its lower bound: 9 is Heavy, 8 is Medium. Zero or
/// less is no wound at all.
pub fn wound_severity(final_damage: i32) -> Option<WoundSeverity> {
    match final_damage {
        i32::MIN..=0 => None,
        1..=5 => Some(WoundSeverity::Light),
        6..=8 => Some(WoundSeverity::Medium),
        9..=11 => Some(WoundSeverity::Heavy),
        12..=14 => Some(WoundSeverity::Incapacitating),
        _ => Some(WoundSeverity::Fatal),
    }
}

/// Roll a simple die for where a blow lands.
pub fn hit_location(ctx: &mut ResolveContext<'_>) -> HitLocation {
    HitLocation::from_face(ctx.simple_die().value)
}
