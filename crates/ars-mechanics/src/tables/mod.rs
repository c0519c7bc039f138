//! Threshold tables: numbers in, tiers out.
//!
//! Each table applies the highest cutoff a value meets. The wound and
//! crisis lookups are pure; the roll helpers draw from the context only
//! for the random parts of a result (locations, characteristics, effects).

pub mod aging;
pub mod warping;
pub mod wound;

pub use aging::{AgingCrisis, AgingOutcome, AgingRequest, aging_crisis, roll_aging};
pub use warping::{WarpingOutcome, WarpingTier, add_warping, warping_score, warping_tier};
pub use wound::{hit_location, wound_severity};
