//! Salience classification
//!
//! Maps each beat to one of three accent tiers. Both rendering sinks consume
//! the same classified sequence, so the tier rules live here and nowhere
//! else.

use crate::types::{BeatEvent, ClassifiedBeat, Pattern, SalienceTier};

/// Classify one raw position against the run's inferred pattern.
///
/// Position 1 is the downbeat and always `Primary`. The secondary accent
/// sits on position 2 in duple bars and position 3 in triple and quadruple
/// bars; everything else is `Other`. The 2-vs-3 split is a fixed heuristic
/// carried over from the reference behavior, not a meter-theoretic rule.
pub fn tier(raw_position: u32, pattern: Pattern) -> SalienceTier {
    if raw_position == 1 {
        return SalienceTier::Primary;
    }
    let secondary = match pattern {
        Pattern::Duple => raw_position == 2,
        Pattern::Triple | Pattern::Quadruple => raw_position == 3,
        Pattern::Unknown => false,
    };
    if secondary {
        SalienceTier::Secondary
    } else {
        SalienceTier::Other
    }
}

/// Infer the pattern for a whole sequence and tag every event with its tier.
///
/// This is the single classification step the waveform annotator, the
/// click-track renderer, and the exporter all run off. Events keep their
/// input order.
pub fn classify(events: &[BeatEvent]) -> (Pattern, Vec<ClassifiedBeat>) {
    let pattern = super::pattern::classify(events);
    let beats = events
        .iter()
        .map(|&event| ClassifiedBeat {
            event,
            tier: tier(event.raw_position, pattern),
        })
        .collect();
    (pattern, beats)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn downbeat_is_primary_for_every_pattern() {
        for pattern in [
            Pattern::Duple,
            Pattern::Triple,
            Pattern::Quadruple,
            Pattern::Unknown,
        ] {
            assert_eq!(tier(1, pattern), SalienceTier::Primary);
        }
    }

    #[test]
    fn duple_secondary_is_position_two() {
        assert_eq!(tier(2, Pattern::Duple), SalienceTier::Secondary);
        assert_eq!(tier(3, Pattern::Duple), SalienceTier::Other);
    }

    #[test]
    fn triple_and_quadruple_secondary_is_position_three() {
        assert_eq!(tier(3, Pattern::Triple), SalienceTier::Secondary);
        assert_eq!(tier(3, Pattern::Quadruple), SalienceTier::Secondary);
        assert_eq!(tier(2, Pattern::Triple), SalienceTier::Other);
        assert_eq!(tier(2, Pattern::Quadruple), SalienceTier::Other);
        assert_eq!(tier(4, Pattern::Quadruple), SalienceTier::Other);
    }

    #[test]
    fn unknown_pattern_has_no_secondary() {
        assert_eq!(tier(2, Pattern::Unknown), SalienceTier::Other);
        assert_eq!(tier(3, Pattern::Unknown), SalienceTier::Other);
        assert_eq!(tier(5, Pattern::Unknown), SalienceTier::Other);
    }

    #[test]
    fn duple_scenario() {
        let events = vec![
            BeatEvent::new(0.5, 1),
            BeatEvent::new(1.0, 2),
            BeatEvent::new(1.5, 1),
            BeatEvent::new(2.0, 2),
        ];
        let (pattern, beats) = classify(&events);
        assert_eq!(pattern, Pattern::Duple);
        let tiers: Vec<_> = beats.iter().map(|b| b.tier).collect();
        assert_eq!(
            tiers,
            vec![
                SalienceTier::Primary,
                SalienceTier::Secondary,
                SalienceTier::Primary,
                SalienceTier::Secondary,
            ]
        );
    }

    #[test]
    fn triple_scenario() {
        let events = vec![
            BeatEvent::new(0.0, 1),
            BeatEvent::new(0.4, 2),
            BeatEvent::new(0.8, 3),
            BeatEvent::new(1.2, 1),
        ];
        let (pattern, beats) = classify(&events);
        assert_eq!(pattern, Pattern::Triple);
        let tiers: Vec<_> = beats.iter().map(|b| b.tier).collect();
        assert_eq!(
            tiers,
            vec![
                SalienceTier::Primary,
                SalienceTier::Other,
                SalienceTier::Secondary,
                SalienceTier::Primary,
            ]
        );
    }

    #[test]
    fn classify_preserves_event_order() {
        // Classification must not reorder, even when times are not monotonic
        let events = vec![
            BeatEvent::new(2.0, 2),
            BeatEvent::new(0.5, 1),
            BeatEvent::new(1.0, 2),
        ];
        let (_, beats) = classify(&events);
        let times: Vec<_> = beats.iter().map(|b| b.time()).collect();
        assert_eq!(times, vec![2.0, 0.5, 1.0]);
    }
}
