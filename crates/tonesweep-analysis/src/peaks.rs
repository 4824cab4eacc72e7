//! Peak detection over a magnitude spectrum.
//!
//! Peaks are strict local maxima that clear a height floor. Candidates are
//! accepted greedily from low to high frequency: once a peak is accepted,
//! every candidate closer than `min_distance_bins` to it is skipped. This is
//! not a global "keep the tallest" selection.
//!
//! The minimum distance is measured in spectrum points (FFT bins), not Hz,
//! so its meaning in Hz scales with `sample_rate / N`. A 100-bin distance is
//! 100 Hz for one second of audio but only 10 Hz for ten seconds.

use crate::spectrum::Spectrum;
use serde::Serialize;
use tonesweep_core::{Error, Result};

/// Default height floor in dB.
pub const DEFAULT_MIN_HEIGHT_DB: f32 = -80.0;

/// Default minimum separation between accepted peaks, in bins.
pub const DEFAULT_MIN_DISTANCE_BINS: usize = 100;

/// A detected peak, always one of the spectrum's own points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PeakAnnotation {
    /// Frequency of the peak in Hz
    pub frequency_hz: f64,
    /// Level of the peak in dB
    pub magnitude_db: f32,
}

/// Greedy left-to-right peak picker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeakDetector {
    min_height_db: f32,
    min_distance_bins: usize,
}

impl PeakDetector {
    /// Create a detector with the given height floor and minimum separation.
    pub fn new(min_height_db: f32, min_distance_bins: usize) -> Result<Self> {
        if min_height_db.is_nan() {
            return Err(Error::invalid_parameter(
                "min_height_db",
                "must not be NaN",
            ));
        }
        if min_distance_bins == 0 {
            return Err(Error::invalid_parameter(
                "min_distance_bins",
                "must be at least 1",
            ));
        }
        Ok(Self {
            min_height_db,
            min_distance_bins,
        })
    }

    /// Height floor in dB.
    pub fn min_height_db(&self) -> f32 {
        self.min_height_db
    }

    /// Minimum separation in bins.
    pub fn min_distance_bins(&self) -> usize {
        self.min_distance_bins
    }

    /// Indices of accepted peaks in `magnitudes_db`, in increasing order.
    pub fn find_indices(&self, magnitudes_db: &[f32]) -> Vec<usize> {
        find_peaks(magnitudes_db, self.min_height_db, self.min_distance_bins)
    }

    /// Annotate the peaks of a spectrum, in frequency order.
    ///
    /// No peaks is an empty result, not an error.
    pub fn detect(&self, spectrum: &Spectrum) -> Vec<PeakAnnotation> {
        self.find_indices(&spectrum.magnitudes_db)
            .into_iter()
            .map(|i| PeakAnnotation {
                frequency_hz: spectrum.frequencies_hz[i],
                magnitude_db: spectrum.magnitudes_db[i],
            })
            .collect()
    }
}

impl Default for PeakDetector {
    fn default() -> Self {
        Self {
            min_height_db: DEFAULT_MIN_HEIGHT_DB,
            min_distance_bins: DEFAULT_MIN_DISTANCE_BINS,
        }
    }
}

/// Find strict local maxima at least `min_height_db` high and at least
/// `min_distance` indices after the previously accepted peak.
///
/// The first and last points never qualify since they lack a neighbour.
pub fn find_peaks(magnitudes_db: &[f32], min_height_db: f32, min_distance: usize) -> Vec<usize> {
    let mut peaks: Vec<usize> = Vec::new();
    if magnitudes_db.len() < 3 {
        return peaks;
    }

    for i in 1..magnitudes_db.len() - 1 {
        let level = magnitudes_db[i];
        if level < min_height_db
            || level <= magnitudes_db[i - 1]
            || level <= magnitudes_db[i + 1]
        {
            continue;
        }

        let far_enough = peaks
            .last()
            .is_none_or(|&last| i - last >= min_distance);

        if far_enough {
            peaks.push(i);
        }
    }

    peaks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strict_maxima_only() {
        // Plateau at indices 2-3 is not a strict maximum
        let levels = [-10.0, -5.0, -3.0, -3.0, -8.0, -2.0, -9.0];
        assert_eq!(find_peaks(&levels, -80.0, 1), vec![5]);
    }

    #[test]
    fn edges_never_qualify() {
        let levels = [0.0, -10.0, -20.0, -10.0, 0.0];
        assert!(find_peaks(&levels, -80.0, 1).is_empty());
    }

    #[test]
    fn height_floor_applies() {
        let levels = [-100.0, -90.0, -100.0, -70.0, -100.0];
        assert_eq!(find_peaks(&levels, -80.0, 1), vec![3]);
        assert_eq!(find_peaks(&levels, -95.0, 1), vec![1, 3]);
    }

    #[test]
    fn greedy_suppression_keeps_first_not_tallest() {
        // Peak at 1 is lower than peak at 3 but is accepted first
        let levels = [-50.0, -20.0, -50.0, -10.0, -50.0, -50.0, -30.0, -50.0];
        assert_eq!(find_peaks(&levels, -80.0, 3), vec![1, 6]);
        assert_eq!(find_peaks(&levels, -80.0, 2), vec![1, 3, 6]);
    }

    #[test]
    fn short_inputs() {
        assert!(find_peaks(&[], -80.0, 1).is_empty());
        assert!(find_peaks(&[1.0, 2.0], -80.0, 1).is_empty());
    }

    #[test]
    fn detector_validation() {
        assert!(PeakDetector::new(-80.0, 0).is_err());
        assert!(PeakDetector::new(f32::NAN, 10).is_err());
        let detector = PeakDetector::default();
        assert_eq!(detector.min_height_db(), -80.0);
        assert_eq!(detector.min_distance_bins(), 100);
    }

    #[test]
    fn detect_maps_indices_to_points() {
        let spectrum = Spectrum {
            frequencies_hz: vec![0.0, 10.0, 20.0, 30.0, 40.0],
            magnitudes_db: vec![-60.0, -40.0, -60.0, -30.0, -60.0],
        };
        let detector = PeakDetector::new(-80.0, 1).unwrap();
        let peaks = detector.detect(&spectrum);
        assert_eq!(
            peaks,
            vec![
                PeakAnnotation {
                    frequency_hz: 10.0,
                    magnitude_db: -40.0
                },
                PeakAnnotation {
                    frequency_hz: 30.0,
                    magnitude_db: -30.0
                },
            ]
        );
    }
}
