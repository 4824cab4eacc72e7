//! File I/O for tonesweep.
//!
//! This crate provides:
//!
//! - **WAV input**: [`read_wav`] decodes any PCM or float WAV to a mono [`Signal`](tonesweep_core::Signal)
//! - **WAV output**: [`write_wav`] for whole signals, [`WavSink`] for incremental writes
//! - **Sequences**: [`write_sequence`] renders a [`ToneSequence`](tonesweep_synth::ToneSequence)
//!   straight to disk, streaming or in one block depending on its mode
//! - **Annotations**: [`write_srt`] / [`export_srt`] for subtitle-style timing tracks
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use tonesweep_io::{export_srt, write_sequence, WavSpec};
//! use tonesweep_synth::{SequenceMode, SweepRange, ToneSequence};
//!
//! let range = SweepRange::new(15000.0, 19000.0, 500.0)?;
//! let sequence = ToneSequence::sweep(&range, 1.0, 48000, SequenceMode::Segmented)?;
//!
//! write_sequence("sweep.wav", WavSpec::new(48000, 16)?, &sequence)?;
//! export_srt(&sequence.annotations(), "sweep.srt")?;
//! ```

mod srt;
mod wav;

pub use srt::{export_srt, format_timestamp, write_srt};
pub use wav::{
    WavFormat, WavInfo, WavSink, WavSpec, read_wav, read_wav_info, write_sequence,
    write_sequence_with, write_wav,
};

/// Error types for file I/O operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// WAV file read/write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// The requested sample format is not supported.
    #[error("Unsupported sample format: {0}")]
    UnsupportedFormat(String),

    /// Decoded data could not form a valid signal.
    #[error(transparent)]
    Core(#[from] tonesweep_core::Error),

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type for file I/O operations.
pub type Result<T> = std::result::Result<T, Error>;
