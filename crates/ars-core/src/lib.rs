//! Core types for the Ars Magica rules engine: characters, Arts, equipment,
//! and the capability traits the resolvers read through.
//!
//! Nothing in this crate rolls dice. It describes the numeric inputs a
//! resolution needs and the records that carry them. [`Character`] is a
//! complete implementation of every capability trait, but the engine only
//! ever sees the traits, so callers may plug in their own records.

/// Hermetic Techniques and Forms.
pub mod art;
/// Capability traits implemented by character-like records.
pub mod capability;
/// The concrete character record.
pub mod character;
/// The eight characteristics.
pub mod characteristic;
/// Weapons and armor.
pub mod equipment;
/// Error types used throughout the crate.
pub mod error;
/// Fatigue levels and their penalties.
pub mod fatigue;
/// Character identifiers.
pub mod id;
/// Spells and their range, duration, and target parameters.
pub mod spell;
/// Wounds, wound severities, and hit locations.
pub mod wound;

/// Re-export Art types.
pub use art::{ArtPair, Form, Technique};
/// Re-export capability traits.
pub use capability::{AccumulatesStrain, HasArtScores, HasCombatStats, Participant};
/// Re-export the character record.
pub use character::Character;
/// Re-export characteristics.
pub use characteristic::Characteristic;
/// Re-export equipment types.
pub use equipment::{Armor, Weapon, WeaponKind};
/// Re-export error types.
pub use error::{CoreError, CoreResult};
/// Re-export fatigue levels.
pub use fatigue::FatigueLevel;
/// Re-export identifiers.
pub use id::CharacterId;
/// Re-export spell types.
pub use spell::{Duration, Range, Spell, Target};
/// Re-export wound types.
pub use wound::{HitLocation, Wound, WoundSeverity};
