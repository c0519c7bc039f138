//! Warping scores and the effects they bring.

use std::fmt;

use ars_core::CharacterId;
use serde::{Deserialize, Serialize};

use crate::context::ResolveContext;
use crate::event::{ResolutionEvent, ResolutionKind};

const MINOR_EFFECTS: [&str; 5] = [
    "Faint magical aura",
    "Slight physical oddity",
    "Minor behavioral change",
    "Unusual eye color",
    "Strange birthmark appears",
];

const MAJOR_EFFECTS: [&str; 5] = [
    "Visible magical aura",
    "Significant physical change",
    "Major personality shift",
    "Magical sensitivity",
    "Supernatural mark",
];

const POWERFUL_EFFECTS: [&str; 5] = [
    "Permanent magical aura",
    "Dramatic physical transformation",
    "Supernatural ability manifests",
    "Constant magical effect",
    "Profound metaphysical change",
];

/// How strong a warping effect is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WarpingTier {
    /// Warping score 1.
    Minor,
    /// Warping score 2.
    Major,
    /// Warping score 3 and up.
    Powerful,
}

impl WarpingTier {
    /// The effects a character at this tier can manifest.
    pub fn effects(self) -> &'static [&'static str] {
        match self {
            Self::Minor => &MINOR_EFFECTS,
            Self::Major => &MAJOR_EFFECTS,
            Self::Powerful => &POWERFUL_EFFECTS,
        }
    }
}

impl fmt::Display for WarpingTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Minor => write!(f, "Minor"),
            Self::Major => write!(f, "Major"),
            Self::Powerful => write!(f, "Powerful"),
        }
    }
}

/// Warping score for a number of points (one per five).
pub fn warping_score(points: i32) -> i32 {
    points.max(0) / 5
}

/// The tier of a warping score, if it has one.
pub fn warping_tier(score: i32) -> Option<WarpingTier> {
    match score {
        i32::MIN..=0 => None,
        1 => Some(WarpingTier::Minor),
        2 => Some(WarpingTier::Major),
        _ => Some(WarpingTier::Powerful),
    }
}

/// What happened when warping points were added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarpingOutcome {
    /// Points added.
    pub points_gained: i32,
    /// Total points afterwards.
    pub total_points: i32,
    /// Score before the points were added.
    pub old_score: i32,
    /// Score afterwards.
    pub new_score: i32,
    /// Effects that manifested; at most one, and only when the score rose.
    pub effects: Vec<String>,
}

impl WarpingOutcome {
    /// True when the points pushed the character to a new score.
    pub fn crossed(&self) -> bool {
        self.new_score > self.old_score
    }
}

/// Add `gained` warping points to a character who has `current_points`,
/// rolling an effect if the score rises.
pub fn add_warping(
    ctx: &mut ResolveContext<'_>,
    who: CharacterId,
    current_points: i32,
    gained: i32,
) -> WarpingOutcome {
    let total_points = current_points + gained;
    let old_score = warping_score(current_points);
    let new_score = warping_score(total_points);

    let tier = if new_score > old_score {
        warping_tier(new_score)
    } else {
        None
    };
    let mut effects = Vec::new();
    if let Some(tier) = tier {
        let table = tier.effects();
        let pick = ctx.pick(table.len() as u32) as usize;
        if let Some(effect) = table.get(pick) {
            effects.push((*effect).to_string());
        }
    }

    tracing::debug!(
        %who,
        gained,
        old_score,
        new_score,
        effects = effects.len(),
        "warping added"
    );
    ctx.emit(
        ResolutionEvent::new(ResolutionKind::Warping, vec![who])
            .with_delta("points", gained)
            .with_delta("score", new_score),
    );

    WarpingOutcome {
        points_gained: gained,
        total_points,
        old_score,
        new_score,
        effects,
    }
}
