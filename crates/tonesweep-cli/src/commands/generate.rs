//! Test tone generation.

use anyhow::Context;
use clap::{Args, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use tonesweep_config::{GenerateConfig, GenerateMode, Quality, annotation_path};
use tonesweep_io::{WavSpec, export_srt, write_sequence_with};

/// Output quality for CLI
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum CliQuality {
    /// 48 kHz, 16-bit
    #[default]
    Regular,
    /// 192 kHz, 24-bit
    Max,
}

impl From<CliQuality> for Quality {
    fn from(q: CliQuality) -> Self {
        match q {
            CliQuality::Regular => Quality::Regular,
            CliQuality::Max => Quality::Max,
        }
    }
}

#[derive(Args)]
pub struct GenerateArgs {
    #[command(subcommand)]
    command: GenerateCommand,

    /// Directory for the generated files
    #[arg(short, long, global = true, default_value = ".")]
    output_dir: PathBuf,

    /// Output quality (ignored by from-config, which carries its own)
    #[arg(short, long, global = true, value_enum, default_value_t)]
    quality: CliQuality,
}

/// Sweep range shared by the range and changing modes.
#[derive(Args)]
struct SweepArgs {
    /// First frequency in kHz
    #[arg(long, default_value = "15.0")]
    start: f64,

    /// Last frequency in kHz
    #[arg(long, default_value = "19.0")]
    end: f64,

    /// Step between tones in kHz
    #[arg(long, default_value = "0.5")]
    spacing: f64,

    /// Seconds per tone
    #[arg(long, default_value = "1.0")]
    duration: f64,
}

#[derive(Subcommand)]
enum GenerateCommand {
    /// Generate a single tone
    Single {
        /// Frequency in kHz
        #[arg(value_name = "KHZ")]
        frequency: f64,

        /// Duration in seconds
        #[arg(long, default_value = "1.0")]
        duration: f64,
    },

    /// Generate a stepped sweep, streamed tone by tone, with annotations
    Range(SweepArgs),

    /// Generate a stepped sweep as one continuous signal, with annotations
    Changing(SweepArgs),

    /// Generate from a TOML settings file
    FromConfig {
        /// Settings file
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

impl GenerateArgs {
    fn to_config(&self) -> anyhow::Result<GenerateConfig> {
        let quality = Quality::from(self.quality);
        let sweep = |mode: GenerateMode, s: &SweepArgs| GenerateConfig {
            quality,
            mode,
            frequency_khz: None,
            start_khz: s.start,
            end_khz: s.end,
            spacing_khz: s.spacing,
            duration_s: s.duration,
        };

        let config = match &self.command {
            GenerateCommand::Single {
                frequency,
                duration,
            } => GenerateConfig {
                quality,
                mode: GenerateMode::Single,
                frequency_khz: Some(*frequency),
                duration_s: *duration,
                ..GenerateConfig::default()
            },
            GenerateCommand::Range(s) => sweep(GenerateMode::Range, s),
            GenerateCommand::Changing(s) => sweep(GenerateMode::Changing, s),
            GenerateCommand::FromConfig { file } => GenerateConfig::load(file)?,
        };
        config.validate()?;
        Ok(config)
    }
}

pub fn run(args: GenerateArgs) -> anyhow::Result<()> {
    let config = args.to_config()?;
    let sequence = config.sequence()?;
    let spec = WavSpec::new(config.quality.sample_rate(), config.quality.bits_per_sample())?;

    std::fs::create_dir_all(&args.output_dir)
        .with_context(|| format!("failed to create {}", args.output_dir.display()))?;
    let path = args.output_dir.join(config.file_name());

    println!("Generating {}", path.display());
    println!(
        "  {} tone(s), {:.3}s total at {} Hz, {}-bit",
        sequence.len(),
        sequence.total_samples() as f64 / f64::from(spec.sample_rate),
        spec.sample_rate,
        spec.bits_per_sample
    );

    let pb = ProgressBar::new(sequence.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} tones ({eta})")?
            .progress_chars("##-"),
    );
    let frames = write_sequence_with(&path, spec, &sequence, |written| {
        pb.set_position(written as u64);
    })?;
    pb.finish_with_message("Done");

    println!("  Audio:       {} ({frames} frames)", path.display());

    if config.writes_annotations() {
        let srt = annotation_path(&path);
        export_srt(&sequence.annotations(), &srt)
            .with_context(|| format!("failed to write {}", srt.display()))?;
        println!("  Annotations: {}", srt.display());
    }

    Ok(())
}
