//! Subtitle-style (SRT) annotation tracks.
//!
//! Each entry is written as:
//!
//! ```text
//! 1
//! 00:00:00,000 --> 00:00:01,000
//! Frequency: 15.000 kHz, Spacing: 0.500 kHz
//!
//! ```
//!
//! Timestamps are rounded to the nearest millisecond.

use std::io::Write;
use std::path::Path;
use tonesweep_synth::AnnotationEntry;

/// Format seconds as `HH:MM:SS,mmm`.
///
/// Negative input is treated as zero. Hours are not wrapped.
pub fn format_timestamp(seconds: f64) -> String {
    let total_ms = (seconds.max(0.0) * 1000.0).round() as u64;
    let ms = total_ms % 1000;
    let total_s = total_ms / 1000;
    format!(
        "{:02}:{:02}:{:02},{:03}",
        total_s / 3600,
        (total_s / 60) % 60,
        total_s % 60,
        ms
    )
}

/// Write annotation entries in SRT layout.
pub fn write_srt<W: Write>(entries: &[AnnotationEntry], mut writer: W) -> std::io::Result<()> {
    for entry in entries {
        writeln!(writer, "{}", entry.index)?;
        writeln!(
            writer,
            "{} --> {}",
            format_timestamp(entry.start_s),
            format_timestamp(entry.end_s)
        )?;
        writeln!(writer, "{}", entry.label)?;
        writeln!(writer)?;
    }
    Ok(())
}

/// Write annotation entries to an SRT file.
pub fn export_srt(entries: &[AnnotationEntry], path: impl AsRef<Path>) -> std::io::Result<()> {
    let file = std::fs::File::create(path.as_ref())?;
    let mut writer = std::io::BufWriter::new(file);
    write_srt(entries, &mut writer)?;
    writer.flush()?;
    tracing::debug!(path = %path.as_ref().display(), entries = entries.len(), "wrote annotations");
    Ok(())
}
