//! Multi-tone sequences with sample-exact boundaries.
//!
//! A [`ToneSequence`] fixes the sample offset and length of every tone once,
//! at construction. Rendering (in memory or incrementally into a
//! [`ToneSink`]) and the annotation track both read those same segments, so
//! audio and annotations cannot drift apart.

use crate::annotation::{AnnotationEntry, tone_label};
use crate::sink::ToneSink;
use crate::tone::ToneSpec;
use serde::{Deserialize, Serialize};
use tonesweep_core::{Error, Result, Signal};

/// Tolerance added before flooring the step count, so a range whose width
/// is an exact multiple of the step keeps its end frequency despite
/// floating-point rounding in the division.
const COUNT_TOLERANCE: f64 = 1e-9;

/// Most tones a [`SweepRange`] may hold.
pub const MAX_TONES: usize = 100_000;

/// Inclusive frequency range walked in fixed steps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepRange {
    /// First frequency in Hz
    pub start_hz: f64,
    /// Last frequency in Hz (inclusive upper bound)
    pub end_hz: f64,
    /// Distance between neighbouring tones in Hz
    pub step_hz: f64,
}

impl SweepRange {
    /// Create a range, rejecting non-positive, non-finite, or inverted values.
    pub fn new(start_hz: f64, end_hz: f64, step_hz: f64) -> Result<Self> {
        if !(start_hz.is_finite() && start_hz > 0.0) {
            return Err(Error::invalid_parameter(
                "start_hz",
                format!("must be positive, got {start_hz}"),
            ));
        }
        if !end_hz.is_finite() || end_hz < start_hz {
            return Err(Error::invalid_parameter(
                "end_hz",
                format!("must be at least start ({start_hz} Hz), got {end_hz}"),
            ));
        }
        if !(step_hz.is_finite() && step_hz > 0.0) {
            return Err(Error::invalid_parameter(
                "step_hz",
                format!("must be positive, got {step_hz}"),
            ));
        }
        let range = Self {
            start_hz,
            end_hz,
            step_hz,
        };
        let steps = range.steps();
        if !steps.is_finite() || steps >= MAX_TONES as f64 {
            return Err(Error::invalid_parameter(
                "step_hz",
                format!(
                    "{step_hz} Hz over {start_hz}-{end_hz} Hz gives more than {MAX_TONES} tones"
                ),
            ));
        }
        Ok(range)
    }

    /// Whole steps that fit between start and end.
    fn steps(&self) -> f64 {
        ((self.end_hz - self.start_hz) / self.step_hz + COUNT_TOLERANCE).floor()
    }

    /// Number of tones in the range.
    pub fn count(&self) -> usize {
        (self.steps() as usize).saturating_add(1)
    }

    /// Tone frequencies `min(start + i * step, end)`.
    ///
    /// Each value is computed from its index rather than by repeated
    /// addition, so there is no accumulated drift. The clamp only trims the
    /// rounding error of a last tone that lands on `end`.
    pub fn frequencies(&self) -> Vec<f64> {
        (0..self.count())
            .map(|i| (self.start_hz + i as f64 * self.step_hz).min(self.end_hz))
            .collect()
    }
}

/// How a sequence is meant to be delivered to its sink.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SequenceMode {
    /// All tones rendered into one buffer and written at once
    Continuous,
    /// Tones rendered and written one at a time, bounding peak memory
    #[default]
    Segmented,
}

/// Position of one tone in the rendered sequence, in samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    /// Offset of the first sample
    pub start_sample: usize,
    /// Number of samples
    pub len: usize,
}

impl Segment {
    /// One past the last sample.
    pub fn end_sample(&self) -> usize {
        self.start_sample + self.len
    }
}

/// An ordered list of tones at one sample rate.
///
/// # Example
///
/// ```rust
/// use tonesweep_synth::{SequenceMode, SweepRange, ToneSequence};
///
/// let range = SweepRange::new(15000.0, 19000.0, 500.0).unwrap();
/// let sequence = ToneSequence::sweep(&range, 1.0, 48000, SequenceMode::Segmented).unwrap();
///
/// assert_eq!(sequence.len(), 9);
/// assert_eq!(sequence.total_samples(), 9 * 48000);
/// assert_eq!(sequence.annotations()[8].end_s, 9.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ToneSequence {
    tones: Vec<ToneSpec>,
    sample_rate: u32,
    mode: SequenceMode,
    segments: Vec<Segment>,
}

impl ToneSequence {
    /// Build a sequence from explicit tones.
    pub fn new(tones: Vec<ToneSpec>, sample_rate: u32, mode: SequenceMode) -> Result<Self> {
        if sample_rate == 0 {
            return Err(Error::invalid_parameter(
                "sample_rate",
                "must be positive, got 0",
            ));
        }
        if tones.is_empty() {
            return Err(Error::invalid_parameter(
                "tones",
                "a sequence needs at least one tone",
            ));
        }

        let mut offset = 0;
        let segments = tones
            .iter()
            .map(|tone| {
                let segment = Segment {
                    start_sample: offset,
                    len: tone.sample_count(sample_rate),
                };
                offset = segment.end_sample();
                segment
            })
            .collect();

        Ok(Self {
            tones,
            sample_rate,
            mode,
            segments,
        })
    }

    /// One tone per frequency of `range`, each lasting `duration_s`.
    pub fn sweep(
        range: &SweepRange,
        duration_s: f64,
        sample_rate: u32,
        mode: SequenceMode,
    ) -> Result<Self> {
        let tones = range
            .frequencies()
            .into_iter()
            .map(|freq| ToneSpec::new(freq, duration_s))
            .collect::<Result<Vec<_>>>()?;
        tracing::debug!(
            start_hz = range.start_hz,
            end_hz = range.end_hz,
            step_hz = range.step_hz,
            tones = tones.len(),
            "built sweep"
        );
        Self::new(tones, sample_rate, mode)
    }

    /// A sequence holding a single tone.
    pub fn single(tone: ToneSpec, sample_rate: u32) -> Result<Self> {
        Self::new(vec![tone], sample_rate, SequenceMode::Continuous)
    }

    /// Tones in playback order.
    pub fn tones(&self) -> &[ToneSpec] {
        &self.tones
    }

    /// Sample position of each tone, parallel to [`tones`](Self::tones).
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Delivery mode.
    pub fn mode(&self) -> SequenceMode {
        self.mode
    }

    /// Number of tones.
    pub fn len(&self) -> usize {
        self.tones.len()
    }

    /// Always false; construction rejects empty sequences.
    pub fn is_empty(&self) -> bool {
        self.tones.is_empty()
    }

    /// Length of the rendered sequence in samples.
    pub fn total_samples(&self) -> usize {
        self.segments.last().map_or(0, Segment::end_sample)
    }

    /// Frequency difference between the first two tones, or 0 for one tone.
    pub fn spacing_hz(&self) -> f64 {
        match self.tones.as_slice() {
            [first, second, ..] => second.frequency_hz - first.frequency_hz,
            _ => 0.0,
        }
    }

    /// Render every tone into one signal.
    pub fn render(&self) -> Result<Signal> {
        let mut samples = Vec::with_capacity(self.total_samples());
        for (tone, segment) in self.tones.iter().zip(&self.segments) {
            samples.extend(tone.render_samples(self.sample_rate, segment.len));
        }
        Signal::new(samples, self.sample_rate)
    }

    /// Render tones one at a time into `sink`.
    ///
    /// Only one tone is held in memory at once. Stops at the first sink
    /// error; releasing the sink is the caller's job.
    pub fn render_to<S: ToneSink + ?Sized>(&self, sink: &mut S) -> std::result::Result<(), S::Error> {
        for (index, (tone, segment)) in self.tones.iter().zip(&self.segments).enumerate() {
            let samples = tone.render_samples(self.sample_rate, segment.len);
            sink.write_samples(&samples)?;
            tracing::debug!(
                tone = index + 1,
                of = self.tones.len(),
                frequency_hz = tone.frequency_hz,
                samples = segment.len,
                "tone written"
            );
        }
        Ok(())
    }

    /// Annotation track: one entry per tone, timed from the tone's segment.
    pub fn annotations(&self) -> Vec<AnnotationEntry> {
        let rate = f64::from(self.sample_rate);
        let spacing = self.spacing_hz();
        self.tones
            .iter()
            .zip(&self.segments)
            .enumerate()
            .map(|(i, (tone, segment))| AnnotationEntry {
                index: i + 1,
                start_s: segment.start_sample as f64 / rate,
                end_s: segment.end_sample() as f64 / rate,
                label: tone_label(tone.frequency_hz, spacing),
            })
            .collect()
    }
}
