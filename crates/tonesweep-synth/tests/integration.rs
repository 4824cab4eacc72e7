//! Integration tests for tonesweep-synth.
//!
//! Checks sequence timing against the reference sweep and feeds synthesized
//! tones back through the analysis pipeline.

use proptest::prelude::*;
use tonesweep_analysis::{Spectrum, analyze, metrics};
use tonesweep_core::FrequencyBand;
use tonesweep_synth::{SequenceMode, SweepRange, ToneSequence, synthesize_tone};

#[test]
fn reference_sweep_timing() {
    let range = SweepRange::new(15000.0, 19000.0, 500.0).unwrap();
    let seq = ToneSequence::sweep(&range, 1.0, 48000, SequenceMode::Segmented).unwrap();

    let signal = seq.render().unwrap();
    assert_eq!(signal.len(), 9 * 48000);
    assert_eq!(signal.sample_rate(), 48000);

    let entries = seq.annotations();
    assert_eq!(entries.len(), 9);
    for pair in entries.windows(2) {
        assert_eq!(pair[0].end_s, pair[1].start_s);
    }
    for entry in &entries {
        assert_eq!(entry.start_s.fract(), 0.0);
        assert_eq!(entry.end_s.fract(), 0.0);
    }
}

#[test]
fn synthesized_tone_round_trips_through_spectrum() {
    let sample_rate = 48000;
    for freq in [1000.0, 15000.0, 17250.0, 19000.0] {
        let tone = synthesize_tone(freq, 0.5, sample_rate).unwrap();
        let bin_width = f64::from(sample_rate) / tone.len() as f64;

        let spectrum = Spectrum::from_signal(&tone).unwrap();
        let (idx, _) = spectrum.max_point().unwrap();
        let found = spectrum.frequencies_hz[idx];
        assert!((found - freq).abs() <= bin_width, "{freq} Hz found at {found} Hz");
    }
}

#[test]
fn each_sweep_segment_analyzes_to_its_tone() {
    let range = SweepRange::new(15000.0, 17000.0, 1000.0).unwrap();
    let seq = ToneSequence::sweep(&range, 1.0, 48000, SequenceMode::Continuous).unwrap();
    let signal = seq.render().unwrap();
    let band = FrequencyBand::new(14500.0, 17500.0).unwrap();

    for (tone, segment) in seq.tones().iter().zip(seq.segments()) {
        let slice = &signal.samples()[segment.start_sample..segment.end_sample()];
        let part = signal.with_samples(slice.to_vec());
        let analysis = analyze(&part, Some(band)).unwrap();
        let peak = analysis.strongest_peak().unwrap();
        assert!(
            (peak.frequency_hz - tone.frequency_hz).abs() <= 1.0,
            "segment for {} Hz peaked at {} Hz",
            tone.frequency_hz,
            peak.frequency_hz
        );
    }
}

#[test]
fn tone_metrics() {
    let tone = synthesize_tone(1000.0, 1.0, 48000).unwrap();
    let rms = metrics::rms(&tone).unwrap();
    assert!((rms - 0.9 / 2f32.sqrt()).abs() < 1e-3);
    assert!(metrics::spectral_flatness(&tone).unwrap() < 0.1);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Frequencies stay inside the range, step evenly, and reach the end
    /// when the width is a whole number of steps.
    #[test]
    fn sweep_frequencies_in_range(
        start in 20.0f64..20000.0,
        steps in 0usize..40,
        step in 1.0f64..2000.0,
    ) {
        let end = start + steps as f64 * step;
        let range = SweepRange::new(start, end, step).unwrap();
        let freqs = range.frequencies();

        prop_assert_eq!(freqs.len(), steps + 1);
        prop_assert!(freqs.iter().all(|&f| f >= start && f <= end));
        for pair in freqs.windows(2) {
            prop_assert!(((pair[1] - pair[0]) - step).abs() < 1e-6);
        }
    }

    /// Annotation entries tile the rendered sequence without gaps.
    #[test]
    fn annotations_tile_sequence(
        tones in 1usize..12,
        duration in 0.001f64..0.05,
        rate in prop::sample::select(vec![8000u32, 44100, 48000, 192000]),
    ) {
        let range = SweepRange::new(1000.0, 1000.0 + (tones - 1) as f64 * 100.0, 100.0).unwrap();
        let seq = ToneSequence::sweep(&range, duration, rate, SequenceMode::Segmented).unwrap();
        let entries = seq.annotations();

        prop_assert_eq!(entries.len(), tones);
        prop_assert_eq!(entries[0].start_s, 0.0);
        for pair in entries.windows(2) {
            prop_assert_eq!(pair[0].end_s, pair[1].start_s);
        }
        let total = seq.total_samples() as f64 / f64::from(rate);
        prop_assert_eq!(entries[tones - 1].end_s, total);
    }
}
