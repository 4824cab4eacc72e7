//! Owned single-channel sample buffers.

use crate::error::{Error, Result};

/// A single-channel block of samples at a fixed sample rate.
///
/// A `Signal` is immutable once built. Processing stages take a `&Signal`
/// and return a new one rather than rewriting samples in place, so an
/// earlier stage's output is never aliased by a later stage.
#[derive(Debug, Clone, PartialEq)]
pub struct Signal {
    samples: Vec<f32>,
    sample_rate: u32,
}

impl Signal {
    /// Wrap `samples` recorded at `sample_rate` Hz.
    ///
    /// An empty sample vector is allowed here; transforms and metrics reject it
    /// with [`Error::EmptySignal`] when they are asked to process it.
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Result<Self> {
        if sample_rate == 0 {
            return Err(Error::invalid_parameter(
                "sample_rate",
                "must be positive, got 0",
            ));
        }
        Ok(Self {
            samples,
            sample_rate,
        })
    }

    /// Sample data.
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Nyquist frequency in Hz.
    pub fn nyquist(&self) -> f32 {
        self.sample_rate as f32 / 2.0
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True when the signal holds no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Duration in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }

    /// Build a new signal at the same rate from a transformed sample vector.
    pub fn with_samples(&self, samples: Vec<f32>) -> Self {
        Self {
            samples,
            sample_rate: self.sample_rate,
        }
    }

    /// Consume the signal and return its samples.
    pub fn into_samples(self) -> Vec<f32> {
        self.samples
    }

    /// Fail with [`Error::EmptySignal`] if there are no samples.
    pub fn require_samples(&self, operation: &'static str) -> Result<()> {
        if self.samples.is_empty() {
            Err(Error::EmptySignal(operation))
        } else {
            Ok(())
        }
    }
}
