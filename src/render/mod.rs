//! Output rendering: annotated waveform image and click-track mix
//!
//! Both sinks consume the same classified beat sequence; the per-tier
//! visual and audible weights are two projections of the one salience
//! classification in `crate::analysis`.

pub mod clicktrack;
pub mod waveform;
