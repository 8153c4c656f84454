//! Beat sequence analysis
//!
//! Two pure classifiers: metrical pattern inference over the whole sequence,
//! and per-beat salience tiers against that pattern. No IO, no state.

pub mod pattern;
pub mod salience;

pub use salience::classify;
