//! Shared pieces of the `analyze` and `compare` commands.

use anyhow::Context;
use clap::Args;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tonesweep_analysis::{Analysis, Metrics, PeakAnnotation, SpectrumAnalyzer};
use tonesweep_config::{
    AnalysisConfig, BandSource, ConfigBand, FilenameBand, ManualBand, ResolvedBand,
    default_analysis_config_path, load_analysis_config_if_present, resolve_band,
};
use tonesweep_io::{WavInfo, read_wav};

/// Analysis settings. Flags override the config file.
#[derive(Args, Debug, Clone, Default)]
pub struct AnalysisSettings {
    /// Lower edge of the analysis band in Hz
    #[arg(long, value_name = "HZ")]
    pub low: Option<f32>,

    /// Upper edge of the analysis band in Hz
    #[arg(long, value_name = "HZ")]
    pub high: Option<f32>,

    /// Analysis config file (default: the user config, when present)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Skip the bandpass filter
    #[arg(long)]
    pub no_filter: bool,

    /// Butterworth order of the bandpass filter
    #[arg(long)]
    pub order: Option<usize>,

    /// Window: hann, hamming, or blackman
    #[arg(long)]
    pub window: Option<String>,

    /// Peak height floor in dB
    #[arg(long, value_name = "DB", allow_hyphen_values = true)]
    pub min_height: Option<f32>,

    /// Minimum peak separation in FFT bins
    #[arg(long, value_name = "BINS")]
    pub min_distance: Option<usize>,

    /// Maximum number of peaks to print
    #[arg(long, default_value = "20")]
    pub max_peaks: usize,
}

impl AnalysisSettings {
    /// Config file (explicit, else the user default, else built-in defaults)
    /// with command-line overrides applied.
    pub fn load_config(&self) -> anyhow::Result<AnalysisConfig> {
        let mut config = match &self.config {
            Some(path) => AnalysisConfig::load(path)?,
            None => load_analysis_config_if_present(default_analysis_config_path())?
                .unwrap_or_default(),
        };

        if self.no_filter {
            config.filter = false;
        }
        if let Some(order) = self.order {
            config.filter_order = order;
        }
        if let Some(window) = &self.window {
            config.window.clone_from(window);
        }
        if let Some(db) = self.min_height {
            config.peaks.min_height_db = db;
        }
        if let Some(bins) = self.min_distance {
            config.peaks.min_distance_bins = bins;
        }
        config.validate()?;
        Ok(config)
    }

    /// Band typed on the command line.
    pub fn manual_band(&self) -> ManualBand {
        ManualBand::new(self.low, self.high)
    }
}

/// One analyzed file.
pub struct FileAnalysis {
    pub path: PathBuf,
    pub info: WavInfo,
    pub band: Option<ResolvedBand>,
    pub analysis: Analysis,
}

/// Resolve the band for `path`, read it, and run the pipeline.
///
/// Band sources are asked in order: command line, config file, file name.
pub fn analyze_file(
    path: &Path,
    manual: &ManualBand,
    config: &AnalysisConfig,
) -> anyhow::Result<FileAnalysis> {
    let from_config = ConfigBand::new(config);
    let from_name = FilenameBand::new(path);
    let sources: [&dyn BandSource; 3] = [manual, &from_config, &from_name];
    let band = resolve_band(&sources)?;

    let (signal, info) =
        read_wav(path).with_context(|| format!("failed to read {}", path.display()))?;

    if band.is_none() {
        tracing::info!(file = %path.display(), "no analysis band given, using the full spectrum");
    }

    let analysis = SpectrumAnalyzer::new(config.options()?)
        .analyze(&signal, band.map(|b| b.band))
        .with_context(|| format!("failed to analyze {}", path.display()))?;

    Ok(FileAnalysis {
        path: path.to_path_buf(),
        info,
        band,
        analysis,
    })
}

/// `15000.0 - 19000.0 Hz (file name)`
pub fn band_label(band: Option<&ResolvedBand>) -> String {
    match band {
        Some(r) => format!("{:.1} - {:.1} Hz ({})", r.band.low_hz, r.band.high_hz, r.source),
        None => "full spectrum".to_string(),
    }
}

pub fn print_metrics(metrics: &Metrics) {
    println!("Metrics");
    println!("-------");
    println!("  RMS:               {:.6}", metrics.rms);
    println!("  Spectral Flatness: {:.6}", metrics.flatness);
    println!("  Total Power:       {:.6}", metrics.total_power);
    println!();
}

pub fn print_peaks(peaks: &[PeakAnnotation], limit: usize) {
    let title = format!("Peaks ({} found)", peaks.len());
    println!("{title}");
    println!("{}", "-".repeat(title.len()));
    if peaks.is_empty() {
        println!("  none above the height floor");
        println!();
        return;
    }

    println!("  {:>4}  {:>16}  {:>10}", "#", "Frequency (Hz)", "Level (dB)");
    for (i, peak) in peaks.iter().take(limit).enumerate() {
        println!(
            "  {:>4}  {:>16.3}  {:>10.2}",
            i + 1,
            peak.frequency_hz,
            peak.magnitude_db
        );
    }
    if peaks.len() > limit {
        println!("  ... {} more", peaks.len() - limit);
    }
    println!();
}

/// Band edges and their source, as written to JSON reports.
#[derive(Serialize)]
pub struct BandReport {
    pub low_hz: f32,
    pub high_hz: f32,
    pub source: &'static str,
}

impl From<&ResolvedBand> for BandReport {
    fn from(r: &ResolvedBand) -> Self {
        Self {
            low_hz: r.band.low_hz,
            high_hz: r.band.high_hz,
            source: r.source,
        }
    }
}

/// A [`FileAnalysis`] in serializable form.
#[derive(Serialize)]
pub struct FileReport<'a> {
    pub file: String,
    pub sample_rate: u32,
    pub band: Option<BandReport>,
    #[serde(flatten)]
    pub analysis: &'a Analysis,
}

impl<'a> From<&'a FileAnalysis> for FileReport<'a> {
    fn from(result: &'a FileAnalysis) -> Self {
        Self {
            file: result.path.display().to_string(),
            sample_rate: result.info.sample_rate,
            band: result.band.as_ref().map(BandReport::from),
            analysis: &result.analysis,
        }
    }
}
