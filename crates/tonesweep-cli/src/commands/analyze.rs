//! Spectrum analysis of a single recording.

use super::common::{AnalysisSettings, analyze_file, band_label, print_metrics, print_peaks};
use anyhow::Context;
use clap::Args;
use std::path::PathBuf;
use tonesweep_analysis::export::{export_csv, export_json};

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Recording to analyze (WAV)
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    #[command(flatten)]
    settings: AnalysisSettings,

    /// Write the spectrum as CSV
    #[arg(long, value_name = "FILE")]
    csv: Option<PathBuf>,

    /// Write spectrum, peaks, and metrics as JSON
    #[arg(long, value_name = "FILE")]
    json: Option<PathBuf>,
}

pub fn run(args: AnalyzeArgs) -> anyhow::Result<()> {
    let config = args.settings.load_config()?;
    let result = analyze_file(&args.input, &args.settings.manual_band(), &config)?;
    let spectrum = &result.analysis.spectrum;

    println!("Spectrum Analysis");
    println!("=================");
    println!("  File:        {}", result.path.display());
    println!("  Sample Rate: {} Hz", result.info.sample_rate);
    println!(
        "  Duration:    {:.3}s ({} frames)",
        result.info.duration_secs, result.info.num_frames
    );
    println!("  Band:        {}", band_label(result.band.as_ref()));
    println!(
        "  Filter:      {}",
        // A band from 0 Hz is analyzed unfiltered
        if config.filter && result.band.as_ref().is_some_and(|r| r.band.low_hz > 0.0) {
            format!("Butterworth bandpass, order {}", config.filter_order)
        } else {
            "off".to_string()
        }
    );
    println!("  Window:      {}", config.window);
    match spectrum.resolution_hz() {
        Some(res) => println!("  Bins:        {} ({res:.3} Hz apart)", spectrum.len()),
        None => println!("  Bins:        {}", spectrum.len()),
    }
    println!();

    if let Some(peak) = result.analysis.strongest_peak() {
        println!(
            "Strongest peak: {:.3} Hz at {:.2} dB",
            peak.frequency_hz, peak.magnitude_db
        );
        println!();
    }

    print_metrics(&result.analysis.metrics);
    print_peaks(&result.analysis.peaks, args.settings.max_peaks);

    if let Some(path) = &args.csv {
        export_csv(spectrum, path).with_context(|| format!("failed to write {}", path.display()))?;
        println!("Spectrum written to {}", path.display());
    }
    if let Some(path) = &args.json {
        export_json(&result.analysis, path)
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("Analysis written to {}", path.display());
    }

    Ok(())
}
