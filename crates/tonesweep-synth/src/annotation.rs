//! Time-coded annotation entries describing a tone sequence.

use serde::Serialize;

/// One numbered, timed label covering a single tone.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnotationEntry {
    /// 1-based position in the track
    pub index: usize,
    /// Start time in seconds
    pub start_s: f64,
    /// End time in seconds, equal to the next entry's start
    pub end_s: f64,
    /// Display text
    pub label: String,
}

impl AnnotationEntry {
    /// Duration covered by this entry in seconds.
    pub fn duration_s(&self) -> f64 {
        self.end_s - self.start_s
    }
}

/// Label for a tone: `Frequency: 15.500 kHz, Spacing: 0.500 kHz`.
pub fn tone_label(frequency_hz: f64, spacing_hz: f64) -> String {
    format!(
        "Frequency: {:.3} kHz, Spacing: {:.3} kHz",
        frequency_hz / 1000.0,
        spacing_hz / 1000.0
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_format() {
        assert_eq!(
            tone_label(15500.0, 500.0),
            "Frequency: 15.500 kHz, Spacing: 0.500 kHz"
        );
        assert_eq!(
            tone_label(440.0, 0.0),
            "Frequency: 0.440 kHz, Spacing: 0.000 kHz"
        );
    }

    #[test]
    fn duration() {
        let entry = AnnotationEntry {
            index: 1,
            start_s: 2.0,
            end_s: 3.5,
            label: String::new(),
        };
        assert_eq!(entry.duration_s(), 1.5);
    }
}
