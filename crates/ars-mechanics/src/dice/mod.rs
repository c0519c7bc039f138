//! The simple die, the stress die, and botch checks.
//!
//! All dice are ten-sided with faces 0-9. A stress die explodes on 0,
//! doubling its multiplier and rolling again, and a 1 sends it to a single
//! botch check die. Multi-die botch checks are a separate primitive that
//! resolvers size themselves.

pub mod check;
pub mod roll;
pub mod source;

pub use check::{CheckRoll, ability_check, certamen_check, spell_check};
pub use roll::{BotchCheck, DieKind, DieRoll};
pub use source::{DieSource, ScriptedRolls};

/// Roll one simple die.
pub fn simple_die(dice: &mut dyn DieSource) -> DieRoll {
    let face = dice.face();
    DieRoll {
        kind: DieKind::Simple,
        value: face,
        raw_faces: vec![face],
        multiplier: 1,
        is_botch: false,
        botch_dice_used: 0,
    }
}

/// Roll one stress die.
pub fn stress_die(dice: &mut dyn DieSource) -> DieRoll {
    let first = dice.face();
    let mut raw_faces = vec![first];

    let roll = match first {
        1 => {
            let check = dice.face();
            raw_faces.push(check);
            DieRoll {
                kind: DieKind::Stress,
                value: 0,
                raw_faces,
                multiplier: 1,
                is_botch: check == 0,
                botch_dice_used: 1,
            }
        }
        0 => {
            let mut multiplier: u32 = 2;
            let mut face = dice.face();
            raw_faces.push(face);
            while face == 0 {
                multiplier = multiplier.saturating_mul(2);
                face = dice.face();
                raw_faces.push(face);
            }
            DieRoll {
                kind: DieKind::Stress,
                value: face,
                raw_faces,
                multiplier,
                is_botch: false,
                botch_dice_used: 0,
            }
        }
        face => DieRoll {
            kind: DieKind::Stress,
            value: face,
            raw_faces,
            multiplier: 1,
            is_botch: false,
            botch_dice_used: 0,
        },
    };

    tracing::trace!(
        faces = ?roll.raw_faces,
        total = roll.total(),
        botch = roll.is_botch,
        "stress die"
    );
    roll
}

/// Roll `n` botch dice. Any 0 is a botch; `n == 0` never botches.
pub fn botch_check(dice: &mut dyn DieSource, n: u32) -> BotchCheck {
    let faces: Vec<u32> = (0..n).map(|_| dice.face()).collect();
    let zeros = faces.iter().filter(|&&f| f == 0).count() as u32;
    BotchCheck {
        is_botch: zeros > 0,
        zeros,
        faces,
    }
}

/// Roll `n` dice of the same kind.
pub fn roll_many(dice: &mut dyn DieSource, n: u32, kind: DieKind) -> Vec<DieRoll> {
    (0..n)
        .map(|_| match kind {
            DieKind::Simple => simple_die(dice),
            DieKind::Stress => stress_die(dice),
        })
        .collect()
}

/// Roll a simple or stress die as `stress` asks.
pub fn roll_die(dice: &mut dyn DieSource, stress: bool) -> DieRoll {
    if stress {
        stress_die(dice)
    } else {
        simple_die(dice)
    }
}
