//! Metrical pattern inference
//!
//! The bar length is inferred from the set of distinct raw positions the
//! detector reported, not from beat spacing: a detector that labels bars
//! 1-2-3-1-2-3 has told us the meter already.

use crate::types::{BeatEvent, Pattern};
use std::collections::BTreeSet;

/// Infer the metrical pattern of a beat sequence.
///
/// Cardinality of the distinct raw-position set maps directly to a bar
/// length: 2 positions is a duple bar, 3 triple, 4 quadruple. Anything else
/// (empty input, a single position, or 5+) is `Unknown`. Pure function;
/// input order is irrelevant.
pub fn classify(events: &[BeatEvent]) -> Pattern {
    let distinct: BTreeSet<u32> = events.iter().map(|e| e.raw_position).collect();
    match distinct.len() {
        2 => Pattern::Duple,
        3 => Pattern::Triple,
        4 => Pattern::Quadruple,
        _ => Pattern::Unknown,
    }
}
