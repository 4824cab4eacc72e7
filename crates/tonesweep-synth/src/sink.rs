//! Destination for incrementally rendered tones.

use std::convert::Infallible;

/// Something that accepts consecutive blocks of samples.
///
/// [`ToneSequence::render_to`](crate::ToneSequence::render_to) calls
/// [`write_samples`](ToneSink::write_samples) once per tone, in order, so
/// implementations can stream to disk without holding the whole sweep.
pub trait ToneSink {
    /// Error raised by a failed write.
    type Error;

    /// Append `samples` after everything written so far.
    fn write_samples(&mut self, samples: &[f32]) -> Result<(), Self::Error>;
}

/// Collects samples in memory.
impl ToneSink for Vec<f32> {
    type Error = Infallible;

    fn write_samples(&mut self, samples: &[f32]) -> Result<(), Self::Error> {
        self.extend_from_slice(samples);
        Ok(())
    }
}
