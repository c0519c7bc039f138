//! Error types for the resolution engine.
//!
//! Botches, misses, and lost duels are results, not errors. Everything here
//! is a contract violation by the caller, reported before any state changes.

/// Errors that can occur during resolution.
#[derive(Debug, thiserror::Error)]
pub enum MechError {
    /// A weapon referenced in a request is not carried by the combatant.
    #[error("{character} has no weapon named \"{weapon}\"")]
    UnknownWeapon {
        /// The combatant's display name.
        character: String,
        /// The weapon that was asked for.
        weapon: String,
    },

    /// A caster or duelist lacks an Art the action needs.
    #[error("{character} has no score in {art}")]
    UnknownArt {
        /// The character's display name.
        character: String,
        /// The missing Technique or Form.
        art: String,
    },

    /// A character was named that is not part of this combat or duel.
    #[error("unknown participant: {0}")]
    UnknownParticipant(String),

    /// The request cannot be resolved as configured.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The operation is not allowed at the current stage.
    #[error("cannot {action} during {stage}")]
    InvalidStage {
        /// What was attempted.
        action: &'static str,
        /// The stage the duel or combat was in.
        stage: String,
    },

    /// The combatant has no actions left or is unable to act.
    #[error("{0} cannot act")]
    CannotAct(String),
}

/// Convenience result type for resolution operations.
pub type MechResult<T> = Result<T, MechError>;
