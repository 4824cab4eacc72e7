//! Export formats for analysis results.
//!
//! - CSV: one `frequency_hz,magnitude_db` row per spectrum point
//! - JSON: spectrum, peaks, and metrics in one document

use crate::pipeline::Analysis;
use crate::spectrum::Spectrum;
use std::io::Write;
use std::path::Path;

/// Write a spectrum as CSV with a header row.
pub fn write_csv<W: Write>(spectrum: &Spectrum, mut writer: W) -> std::io::Result<()> {
    writeln!(writer, "frequency_hz,magnitude_db")?;
    for (freq, level) in spectrum
        .frequencies_hz
        .iter()
        .zip(spectrum.magnitudes_db.iter())
    {
        writeln!(writer, "{:.3},{:.3}", freq, level)?;
    }
    Ok(())
}

/// Export a spectrum to a CSV file.
pub fn export_csv(spectrum: &Spectrum, path: impl AsRef<Path>) -> std::io::Result<()> {
    let file = std::fs::File::create(path)?;
    let mut writer = std::io::BufWriter::new(file);
    write_csv(spectrum, &mut writer)?;
    writer.flush()
}

/// Export a full analysis to a pretty-printed JSON file.
pub fn export_json(analysis: &Analysis, path: impl AsRef<Path>) -> std::io::Result<()> {
    let file = std::fs::File::create(path)?;
    let mut writer = std::io::BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, analysis)?;
    writeln!(writer)?;
    writer.flush()
}
