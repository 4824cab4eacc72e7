//! Analysis config file management.

use clap::{Args, Subcommand};
use std::path::PathBuf;
use tonesweep_config::paths::{ANALYSIS_CONFIG_FILE, ensure_user_config_dir};
use tonesweep_config::{AnalysisConfig, default_analysis_config_path, load_analysis_config_if_present};

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Print the default config file location
    Path,

    /// Write a config file with every setting at its default
    Init {
        /// Where to write (default: the user config directory)
        #[arg(long, value_name = "FILE")]
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the effective config
    Show {
        /// Config file to read (default: the user config, when present)
        #[arg(long, value_name = "FILE")]
        path: Option<PathBuf>,
    },
}

pub fn run(args: ConfigArgs) -> anyhow::Result<()> {
    match args.command {
        ConfigCommand::Path => {
            println!("{}", default_analysis_config_path().display());
        }
        ConfigCommand::Init { path, force } => {
            let path = match path {
                Some(path) => path,
                None => ensure_user_config_dir()?.join(ANALYSIS_CONFIG_FILE),
            };
            if path.exists() && !force {
                anyhow::bail!(
                    "{} already exists (use --force to overwrite)",
                    path.display()
                );
            }
            AnalysisConfig::default().save(&path)?;
            println!("Wrote {}", path.display());
        }
        ConfigCommand::Show { path } => {
            let config = match path {
                Some(path) => AnalysisConfig::load(path)?,
                None => load_analysis_config_if_present(default_analysis_config_path())?
                    .unwrap_or_default(),
            };
            print!("{}", config.to_toml()?);
        }
    }
    Ok(())
}
