//! Display WAV file metadata.

use clap::Args;
use std::path::{Path, PathBuf};
use tonesweep_config::{ConfigError, parse_filename};
use tonesweep_io::{WavFormat, read_wav_info};

/// Display WAV file information.
#[derive(Args)]
pub struct InfoArgs {
    /// WAV files to describe
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

/// Run the info command.
pub fn run(args: InfoArgs) -> anyhow::Result<()> {
    for (i, file) in args.files.iter().enumerate() {
        if i > 0 {
            println!();
        }
        print_info(file)?;
    }
    Ok(())
}

fn print_info(file: &Path) -> anyhow::Result<()> {
    let info = read_wav_info(file)?;

    let format_str = match info.format {
        WavFormat::Pcm => "PCM",
        WavFormat::IeeeFloat => "IEEE Float",
    };

    println!("File:        {}", file.display());
    println!("Format:      {} {}-bit", format_str, info.bits_per_sample);
    println!("Channels:    {}", info.channels);
    println!("Sample Rate: {} Hz", info.sample_rate);
    println!(
        "Duration:    {:.3}s ({} frames)",
        info.duration_secs, info.num_frames
    );

    let file_size = std::fs::metadata(file)?.len();
    println!("File Size:   {}", format_bytes(file_size));

    match parse_filename(file) {
        Ok(meta) => {
            let mut sweep = format!(
                "{:.3} - {:.3} kHz",
                meta.start_hz / 1000.0,
                meta.end_hz / 1000.0
            );
            if let Some(spacing) = meta.spacing_hz {
                sweep.push_str(&format!(", spacing {:.3} kHz", spacing / 1000.0));
            }
            if let Some(quality) = meta.quality {
                sweep.push_str(&format!(", {quality} quality"));
            }
            println!("Sweep:       {sweep}");
        }
        Err(ConfigError::FormatMismatch(_)) => println!("Sweep:       not in file name"),
        Err(e) => return Err(e.into()),
    }

    Ok(())
}

fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{bytes} B")
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

#[cfg(test)]
mod tests {
    use super::format_bytes;

    #[test]
    fn byte_units() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(2048), "2.0 KB");
        assert_eq!(format_bytes(3 * 1024 * 1024), "3.0 MB");
    }
}
