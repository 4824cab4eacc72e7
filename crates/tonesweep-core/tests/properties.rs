//! Property-based tests for tonesweep-core primitives.
//!
//! Covers band validation, signal construction, and biquad stability using
//! proptest for randomized input generation.

use proptest::prelude::*;
use tonesweep_core::{Biquad, Error, FrequencyBand, Signal};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    /// Any ordered pair of finite non-negative edges is a valid band, and the
    /// band contains both its edges and its geometric centre.
    #[test]
    fn ordered_edges_form_band(low in 0.0f32..20000.0f32, width in 0.01f32..20000.0f32) {
        let high = low + width;
        prop_assume!(high > low);
        let band = FrequencyBand::new(low, high).unwrap();
        prop_assert!(band.contains(low));
        prop_assert!(band.contains(high));
        prop_assert!(band.bandwidth() > 0.0);
        if low > 0.0 {
            let centre = band.center_hz();
            prop_assert!(centre >= low * 0.999 && centre <= high * 1.001);
        }
    }

    /// Reversed or collapsed edges are always rejected.
    #[test]
    fn reversed_edges_rejected(low in 0.0f32..20000.0f32, back in 0.0f32..1000.0f32) {
        let high = (low - back).max(0.0);
        let is_invalid_band = matches!(FrequencyBand::new(low, high), Err(Error::InvalidBand { .. }));
        prop_assert!(is_invalid_band);
    }

    /// Nyquist check agrees with a direct comparison against half the rate.
    #[test]
    fn nyquist_check(high in 1.0f32..100000.0f32, rate in 1000u32..200000u32) {
        let band = FrequencyBand::new(0.0, high).unwrap();
        let ok = band.check_nyquist(rate).is_ok();
        prop_assert_eq!(ok, high < rate as f32 / 2.0);
    }

    /// Signal duration is length over rate.
    #[test]
    fn signal_duration(len in 0usize..10000, rate in 1u32..200000u32) {
        let signal = Signal::new(vec![0.0; len], rate).unwrap();
        prop_assert_eq!(signal.len(), len);
        let expected = len as f64 / f64::from(rate);
        prop_assert!((signal.duration_secs() - expected).abs() < 1e-12);
    }

    /// A section with poles strictly inside the unit circle produces finite
    /// output for bounded input.
    #[test]
    fn stable_biquad_bounded(
        radius in 0.0f64..0.999f64,
        theta in 0.0f64..std::f64::consts::PI,
        input in prop::collection::vec(-1.0f64..=1.0f64, 512),
    ) {
        let a1 = -2.0 * radius * theta.cos();
        let a2 = radius * radius;
        let mut biquad = Biquad::with_coefficients(1.0, 0.0, -1.0, 1.0, a1, a2);
        prop_assert!(biquad.is_stable());

        for x in input {
            let y = biquad.process(x);
            prop_assert!(y.is_finite());
        }
    }
}
