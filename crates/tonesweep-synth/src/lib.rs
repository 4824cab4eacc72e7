//! Tonesweep Synth - deterministic test tone generation
//!
//! Builds the stimulus side of a frequency-response measurement:
//!
//! - [`tone`] - Single sine tones at fixed amplitude, phase zero at start
//! - [`sequence`] - Stepped sweeps with sample-exact tone boundaries
//! - [`annotation`] - Timed labels for each tone, derived from the same boundaries
//! - [`sink`] - The [`ToneSink`] trait for streaming tones out one at a time
//!
//! ```rust
//! use tonesweep_synth::{SequenceMode, SweepRange, ToneSequence};
//!
//! let range = SweepRange::new(15000.0, 19000.0, 500.0).unwrap();
//! let sequence = ToneSequence::sweep(&range, 1.0, 48000, SequenceMode::Continuous).unwrap();
//!
//! let signal = sequence.render().unwrap();
//! assert_eq!(signal.len(), 9 * 48000);
//!
//! for entry in sequence.annotations() {
//!     println!("{} {:.1}-{:.1}s {}", entry.index, entry.start_s, entry.end_s, entry.label);
//! }
//! ```

pub mod annotation;
pub mod sequence;
pub mod sink;
pub mod tone;

pub use annotation::{AnnotationEntry, tone_label};
pub use sequence::{MAX_TONES, Segment, SequenceMode, SweepRange, ToneSequence};
pub use sink::ToneSink;
pub use tone::{AMPLITUDE, ToneSpec, synthesize_tone};
