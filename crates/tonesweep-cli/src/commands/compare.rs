//! Side-by-side analysis of two recordings.
//!
//! Each file gets its own band: a band given on the command line or in the
//! config applies to both, otherwise each file's name is parsed separately.

use super::common::{
    AnalysisSettings, FileAnalysis, FileReport, analyze_file, band_label, print_peaks,
};
use anyhow::Context;
use clap::Args;
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;

#[derive(Args)]
pub struct CompareArgs {
    /// First recording
    #[arg(value_name = "FIRST")]
    first: PathBuf,

    /// Second recording
    #[arg(value_name = "SECOND")]
    second: PathBuf,

    #[command(flatten)]
    settings: AnalysisSettings,

    /// Write both analyses as JSON
    #[arg(long, value_name = "FILE")]
    json: Option<PathBuf>,
}

#[derive(Serialize)]
struct CompareReport<'a> {
    first: FileReport<'a>,
    second: FileReport<'a>,
}

pub fn run(args: CompareArgs) -> anyhow::Result<()> {
    let config = args.settings.load_config()?;
    let manual = args.settings.manual_band();
    let a = analyze_file(&args.first, &manual, &config)?;
    let b = analyze_file(&args.second, &manual, &config)?;

    println!("Comparison");
    println!("==========");
    println!("  A: {}", a.path.display());
    println!("  B: {}", b.path.display());
    println!();

    print_side_by_side(&a, &b);

    println!("A: {}", a.path.display());
    print_peaks(&a.analysis.peaks, args.settings.max_peaks);
    println!("B: {}", b.path.display());
    print_peaks(&b.analysis.peaks, args.settings.max_peaks);

    if let Some(path) = &args.json {
        let report = CompareReport {
            first: FileReport::from(&a),
            second: FileReport::from(&b),
        };
        let write = || -> anyhow::Result<()> {
            let mut writer = std::io::BufWriter::new(std::fs::File::create(path)?);
            serde_json::to_writer_pretty(&mut writer, &report)?;
            writeln!(writer)?;
            writer.flush()?;
            Ok(())
        };
        write().with_context(|| format!("failed to write {}", path.display()))?;
        println!("Comparison written to {}", path.display());
    }

    Ok(())
}

fn print_side_by_side(a: &FileAnalysis, b: &FileAnalysis) {
    let row = |label: &str, left: String, right: String| {
        println!("  {label:<18} {left:>32}  {right:>32}");
    };
    let strongest = |r: &FileAnalysis| {
        r.analysis.strongest_peak().map_or_else(
            || "none".to_string(),
            |p| format!("{:.3} Hz @ {:.2} dB", p.frequency_hz, p.magnitude_db),
        )
    };

    row("", "A".to_string(), "B".to_string());
    row(
        "Sample Rate",
        format!("{} Hz", a.info.sample_rate),
        format!("{} Hz", b.info.sample_rate),
    );
    row(
        "Duration",
        format!("{:.3}s", a.info.duration_secs),
        format!("{:.3}s", b.info.duration_secs),
    );
    row("Band", band_label(a.band.as_ref()), band_label(b.band.as_ref()));
    row(
        "RMS",
        format!("{:.6}", a.analysis.metrics.rms),
        format!("{:.6}", b.analysis.metrics.rms),
    );
    row(
        "Spectral Flatness",
        format!("{:.6}", a.analysis.metrics.flatness),
        format!("{:.6}", b.analysis.metrics.flatness),
    );
    row(
        "Total Power",
        format!("{:.6}", a.analysis.metrics.total_power),
        format!("{:.6}", b.analysis.metrics.total_power),
    );
    row(
        "Peaks",
        a.analysis.peaks.len().to_string(),
        b.analysis.peaks.len().to_string(),
    );
    row("Strongest Peak", strongest(a), strongest(b));
    println!();
}
