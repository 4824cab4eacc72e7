//! WAV file reading and writing.

use crate::{Error, Result};
use hound::{SampleFormat, WavReader, WavWriter};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use tonesweep_core::Signal;
use tonesweep_synth::{SequenceMode, ToneSequence, ToneSink};

/// WAV audio encoding format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WavFormat {
    /// Linear PCM (integer samples).
    Pcm,
    /// IEEE 754 floating-point samples.
    IeeeFloat,
}

impl From<SampleFormat> for WavFormat {
    fn from(format: SampleFormat) -> Self {
        match format {
            SampleFormat::Float => WavFormat::IeeeFloat,
            SampleFormat::Int => WavFormat::Pcm,
        }
    }
}

/// WAV file metadata extracted without loading sample data.
#[derive(Debug, Clone, PartialEq)]
pub struct WavInfo {
    /// Number of audio channels in the file.
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bit depth per sample.
    pub bits_per_sample: u16,
    /// Total number of sample frames (samples per channel).
    pub num_frames: u64,
    /// Duration in seconds.
    pub duration_secs: f64,
    /// Audio encoding format.
    pub format: WavFormat,
}

impl WavInfo {
    fn from_hound(spec: hound::WavSpec, total_samples: u64) -> Self {
        let num_frames = total_samples / u64::from(spec.channels.max(1));
        Self {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
            num_frames,
            duration_secs: num_frames as f64 / f64::from(spec.sample_rate),
            format: spec.sample_format.into(),
        }
    }
}

/// Read WAV metadata without loading sample data.
pub fn read_wav_info<P: AsRef<Path>>(path: P) -> Result<WavInfo> {
    let reader = WavReader::open(path)?;
    Ok(WavInfo::from_hound(reader.spec(), u64::from(reader.len())))
}

/// Output format for mono WAV files.
///
/// 8, 16, and 24 bits are written as integer PCM; 32 bits as IEEE float.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavSpec {
    /// Sample rate in Hz (e.g., 48000, 192000).
    pub sample_rate: u32,
    /// Bit depth per sample (8, 16, 24, or 32).
    pub bits_per_sample: u16,
}

impl WavSpec {
    /// Create a validated spec.
    pub fn new(sample_rate: u32, bits_per_sample: u16) -> Result<Self> {
        let spec = Self {
            sample_rate,
            bits_per_sample,
        };
        spec.validate()?;
        Ok(spec)
    }

    /// Check that hound can write this format.
    pub fn validate(&self) -> Result<()> {
        if self.sample_rate == 0 {
            return Err(Error::UnsupportedFormat("sample rate of 0 Hz".to_string()));
        }
        match self.bits_per_sample {
            8 | 16 | 24 | 32 => Ok(()),
            bits => Err(Error::UnsupportedFormat(format!("{bits}-bit samples"))),
        }
    }

    fn is_float(&self) -> bool {
        self.bits_per_sample == 32
    }
}

impl Default for WavSpec {
    fn default() -> Self {
        Self {
            sample_rate: 48000,
            bits_per_sample: 16,
        }
    }
}

impl From<WavSpec> for hound::WavSpec {
    fn from(spec: WavSpec) -> Self {
        hound::WavSpec {
            channels: 1,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
            sample_format: if spec.is_float() {
                SampleFormat::Float
            } else {
                SampleFormat::Int
            },
        }
    }
}

/// Read a WAV file as a mono signal, along with its metadata.
///
/// Integer samples are scaled to `[-1, 1)`. Multi-channel files are mixed
/// down to mono by averaging channels.
pub fn read_wav<P: AsRef<Path>>(path: P) -> Result<(Signal, WavInfo)> {
    let reader = WavReader::open(path)?;
    let spec = reader.spec();
    let info = WavInfo::from_hound(spec, u64::from(reader.len()));
    let channels = usize::from(spec.channels.max(1));

    let samples: Vec<f32> = match spec.sample_format {
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .collect::<std::result::Result<Vec<_>, _>>()?,
        SampleFormat::Int => {
            let max_val = (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 / max_val))
                .collect::<std::result::Result<Vec<_>, _>>()?
        }
    };

    // Mix down to mono if multi-channel
    let mono = if channels > 1 {
        tracing::debug!(channels, "mixing down to mono");
        samples
            .chunks(channels)
            .map(|chunk| chunk.iter().sum::<f32>() / channels as f32)
            .collect()
    } else {
        samples
    };

    Ok((Signal::new(mono, spec.sample_rate)?, info))
}

/// Write a signal to a mono WAV file at the signal's own sample rate.
pub fn write_wav<P: AsRef<Path>>(path: P, signal: &Signal, bits_per_sample: u16) -> Result<()> {
    let spec = WavSpec::new(signal.sample_rate(), bits_per_sample)?;
    let mut sink = WavSink::create(path, spec)?;
    let appended = sink.append(signal.samples());
    let finalized = sink.finalize();
    appended?;
    finalized.map(|_| ())
}

/// Incremental mono WAV writer.
///
/// Samples can be appended in any number of calls; [`finalize`](Self::finalize)
/// writes the final header. If the sink is dropped without finalizing, hound
/// still patches the header on drop, so the file stays readable.
pub struct WavSink {
    writer: WavWriter<BufWriter<File>>,
    spec: WavSpec,
    frames_written: u64,
}

impl WavSink {
    /// Create the file and write a provisional header.
    pub fn create<P: AsRef<Path>>(path: P, spec: WavSpec) -> Result<Self> {
        spec.validate()?;
        let writer = WavWriter::create(path, hound::WavSpec::from(spec))?;
        Ok(Self {
            writer,
            spec,
            frames_written: 0,
        })
    }

    /// Output format.
    pub fn spec(&self) -> WavSpec {
        self.spec
    }

    /// Frames appended so far.
    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }

    /// Append samples after everything written so far.
    pub fn append(&mut self, samples: &[f32]) -> Result<()> {
        if self.spec.is_float() {
            for &sample in samples {
                self.writer.write_sample(sample)?;
            }
        } else {
            let max_val = (1i64 << (self.spec.bits_per_sample - 1)) as f32;
            for &sample in samples {
                let int_sample = (sample * max_val).round().clamp(-max_val, max_val - 1.0) as i32;
                self.writer.write_sample(int_sample)?;
            }
        }
        self.frames_written += samples.len() as u64;
        Ok(())
    }

    /// Flush and write the final header, returning the number of frames.
    pub fn finalize(self) -> Result<u64> {
        self.writer.finalize()?;
        Ok(self.frames_written)
    }
}

impl ToneSink for WavSink {
    type Error = Error;

    fn write_samples(&mut self, samples: &[f32]) -> Result<()> {
        self.append(samples)
    }
}

/// Render `sequence` into a WAV file.
///
/// Segmented sequences are streamed one tone at a time; continuous ones are
/// rendered in memory and written in one block. The file is finalized on
/// every path, including a failed write, before any error is returned.
pub fn write_sequence<P: AsRef<Path>>(
    path: P,
    spec: WavSpec,
    sequence: &ToneSequence,
) -> Result<u64> {
    write_sequence_with(path, spec, sequence, |_| {})
}

/// [`write_sequence`] with a callback after each tone reaches the file.
///
/// `on_tone` receives the number of tones written so far. A continuous
/// sequence reports once, with the full count, after its single write.
pub fn write_sequence_with<P, F>(
    path: P,
    spec: WavSpec,
    sequence: &ToneSequence,
    on_tone: F,
) -> Result<u64>
where
    P: AsRef<Path>,
    F: FnMut(usize),
{
    if spec.sample_rate != sequence.sample_rate() {
        return Err(Error::UnsupportedFormat(format!(
            "sequence rendered at {} Hz cannot be written to a {} Hz file",
            sequence.sample_rate(),
            spec.sample_rate
        )));
    }

    let sink = WavSink::create(path.as_ref(), spec)?;
    let frames = stream_sequence(sink, sequence, on_tone)?;

    tracing::info!(
        path = %path.as_ref().display(),
        tones = sequence.len(),
        frames,
        mode = ?sequence.mode(),
        "wrote sequence"
    );
    Ok(frames)
}

/// A tone sink that has to be closed once writing stops.
trait ClosingSink: ToneSink<Error = Error> {
    /// Flush and release the output, returning the frames written.
    fn close(self) -> Result<u64>;
}

impl ClosingSink for WavSink {
    fn close(self) -> Result<u64> {
        self.finalize()
    }
}

/// Write `sequence` into `sink` and close it, even when a write fails.
///
/// A write error takes precedence over a close error.
fn stream_sequence<S, F>(sink: S, sequence: &ToneSequence, on_tone: F) -> Result<u64>
where
    S: ClosingSink,
    F: FnMut(usize),
{
    let mut observed = ObservedSink {
        inner: sink,
        tones: 0,
        on_tone,
    };
    let written = match sequence.mode() {
        SequenceMode::Segmented => sequence.render_to(&mut observed),
        SequenceMode::Continuous => sequence.render().map_err(Error::from).and_then(|signal| {
            observed.inner.write_samples(signal.samples())?;
            observed.tones = sequence.len();
            (observed.on_tone)(observed.tones);
            Ok(())
        }),
    };
    let closed = observed.inner.close();
    written?;
    closed
}

/// Counts tones on their way into a sink.
struct ObservedSink<S, F> {
    inner: S,
    tones: usize,
    on_tone: F,
}

impl<S, F> ToneSink for ObservedSink<S, F>
where
    S: ToneSink<Error = Error>,
    F: FnMut(usize),
{
    type Error = Error;

    fn write_samples(&mut self, samples: &[f32]) -> Result<()> {
        self.inner.write_samples(samples)?;
        self.tones += 1;
        (self.on_tone)(self.tones);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn ramp(len: usize, sample_rate: u32) -> Signal {
        let samples = (0..len).map(|i| (i as f32 / len as f32).sin() * 0.9).collect();
        Signal::new(samples, sample_rate).unwrap()
    }

    #[test]
    fn test_roundtrip_f32() {
        let signal = ramp(1000, 48000);
        let file = NamedTempFile::new().unwrap();
        write_wav(file.path(), &signal, 32).unwrap();

        let (loaded, info) = read_wav(file.path()).unwrap();
        assert_eq!(info.sample_rate, 48000);
        assert_eq!(info.format, WavFormat::IeeeFloat);
        assert_eq!(loaded.len(), signal.len());
        for (a, b) in signal.samples().iter().zip(loaded.samples()) {
            assert!((a - b).abs() < 1e-6);
        }
    }

    #[test]
    fn test_roundtrip_i16() {
        let signal = ramp(1000, 44100);
        let file = NamedTempFile::new().unwrap();
        write_wav(file.path(), &signal, 16).unwrap();

        let (loaded, info) = read_wav(file.path()).unwrap();
        assert_eq!(info.sample_rate, 44100);
        assert_eq!(info.bits_per_sample, 16);
        assert_eq!(info.format, WavFormat::Pcm);
        for (a, b) in signal.samples().iter().zip(loaded.samples()) {
            assert!((a - b).abs() < 0.001);
        }
    }

    #[test]
    fn test_roundtrip_i24() {
        let signal = ramp(1000, 192000);
        let file = NamedTempFile::new().unwrap();
        write_wav(file.path(), &signal, 24).unwrap();

        let (loaded, info) = read_wav(file.path()).unwrap();
        assert_eq!(info.bits_per_sample, 24);
        for (a, b) in signal.samples().iter().zip(loaded.samples()) {
            assert!((a - b).abs() < 1e-5);
        }
    }

    #[test]
    fn stereo_is_mixed_down() {
        let file = NamedTempFile::new().unwrap();
        let spec = hound::WavSpec {
            channels: 2,
            sample_rate: 8000,
            bits_per_sample: 32,
            sample_format: SampleFormat::Float,
        };
        let mut writer = WavWriter::create(file.path(), spec).unwrap();
        for (l, r) in [(1.0f32, 0.0f32), (0.5, 0.5), (-1.0, 0.0)] {
            writer.write_sample(l).unwrap();
            writer.write_sample(r).unwrap();
        }
        writer.finalize().unwrap();

        let (loaded, info) = read_wav(file.path()).unwrap();
        assert_eq!(info.channels, 2);
        assert_eq!(info.num_frames, 3);
        assert_eq!(loaded.samples(), &[0.5, 0.5, -0.5]);
    }

    #[test]
    fn info_without_samples() {
        let signal = ramp(4800, 48000);
        let file = NamedTempFile::new().unwrap();
        write_wav(file.path(), &signal, 16).unwrap();

        let info = read_wav_info(file.path()).unwrap();
        assert_eq!(info.channels, 1);
        assert_eq!(info.num_frames, 4800);
        assert!((info.duration_secs - 0.1).abs() < 1e-12);
    }

    #[test]
    fn sink_appends_across_calls() {
        let file = NamedTempFile::new().unwrap();
        let mut sink = WavSink::create(file.path(), WavSpec::new(8000, 16).unwrap()).unwrap();
        sink.append(&[0.1; 100]).unwrap();
        sink.append(&[0.2; 50]).unwrap();
        assert_eq!(sink.frames_written(), 150);
        assert_eq!(sink.finalize().unwrap(), 150);

        let (loaded, _) = read_wav(file.path()).unwrap();
        assert_eq!(loaded.len(), 150);
    }

    #[test]
    fn progress_reported_per_tone() {
        use tonesweep_synth::SweepRange;

        let range = SweepRange::new(1000.0, 3000.0, 1000.0).unwrap();
        let file = NamedTempFile::new().unwrap();

        let streamed = ToneSequence::sweep(&range, 0.01, 8000, SequenceMode::Segmented).unwrap();
        let mut seen = Vec::new();
        write_sequence_with(file.path(), WavSpec::new(8000, 16).unwrap(), &streamed, |n| {
            seen.push(n);
        })
        .unwrap();
        assert_eq!(seen, vec![1, 2, 3]);

        let bulk = ToneSequence::sweep(&range, 0.01, 8000, SequenceMode::Continuous).unwrap();
        let mut seen = Vec::new();
        write_sequence_with(file.path(), WavSpec::new(8000, 16).unwrap(), &bulk, |n| {
            seen.push(n);
        })
        .unwrap();
        assert_eq!(seen, vec![3]);
    }

    /// Accepts `capacity` writes, then fails; records whether it was closed.
    struct FlakySink<'a> {
        capacity: usize,
        writes: usize,
        closed: &'a std::cell::Cell<bool>,
    }

    impl ToneSink for FlakySink<'_> {
        type Error = Error;

        fn write_samples(&mut self, _samples: &[f32]) -> Result<()> {
            if self.writes == self.capacity {
                return Err(Error::Io(std::io::Error::from(std::io::ErrorKind::StorageFull)));
            }
            self.writes += 1;
            Ok(())
        }
    }

    impl ClosingSink for FlakySink<'_> {
        fn close(self) -> Result<u64> {
            self.closed.set(true);
            Ok(self.writes as u64)
        }
    }

    #[test]
    fn failed_write_still_closes_sink() {
        use tonesweep_synth::SweepRange;

        let range = SweepRange::new(1000.0, 5000.0, 1000.0).unwrap();
        let sequence = ToneSequence::sweep(&range, 0.01, 48000, SequenceMode::Segmented).unwrap();
        let closed = std::cell::Cell::new(false);
        let sink = FlakySink {
            capacity: 2,
            writes: 0,
            closed: &closed,
        };

        let mut seen = Vec::new();
        let result = stream_sequence(sink, &sequence, |n| seen.push(n));
        assert!(matches!(result, Err(Error::Io(_))));
        assert!(closed.get());
        assert_eq!(seen, vec![1, 2]);
    }

    #[test]
    fn failed_continuous_write_still_closes_sink() {
        use tonesweep_synth::SweepRange;

        let range = SweepRange::new(1000.0, 2000.0, 500.0).unwrap();
        let sequence = ToneSequence::sweep(&range, 0.01, 8000, SequenceMode::Continuous).unwrap();
        let closed = std::cell::Cell::new(false);
        let sink = FlakySink {
            capacity: 0,
            writes: 0,
            closed: &closed,
        };

        assert!(stream_sequence(sink, &sequence, |_| {}).is_err());
        assert!(closed.get());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn full_disk_error_propagates() {
        use tonesweep_synth::SweepRange;

        // Well past the writer's buffer, so the failure surfaces mid-sweep
        let range = SweepRange::new(1000.0, 3000.0, 100.0).unwrap();
        let sequence = ToneSequence::sweep(&range, 0.1, 8000, SequenceMode::Segmented).unwrap();
        let mut seen = 0;
        let result = write_sequence_with(
            "/dev/full",
            WavSpec::new(8000, 16).unwrap(),
            &sequence,
            |n| seen = n,
        );
        assert!(result.is_err());
        assert!(seen < sequence.len());
    }

    #[test]
    fn unsupported_specs_rejected() {
        assert!(matches!(
            WavSpec::new(48000, 12),
            Err(Error::UnsupportedFormat(_))
        ));
        assert!(matches!(
            WavSpec::new(0, 16),
            Err(Error::UnsupportedFormat(_))
        ));
    }
}
