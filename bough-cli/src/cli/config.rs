//! # Config Command
//!
//! Shows where settings are read from and what is in effect.

use anyhow::{Context, Result};
use bough_core::get_config_dirs;
use clap::{Args, Subcommand};

/// Show configuration
#[derive(Args, Debug)]
pub struct ConfigArgs {
  /// The subcommand to execute
  #[command(subcommand)]
  pub subcommand: ConfigSubcommands,
}

/// Subcommands for the config command
#[derive(Subcommand, Debug)]
pub enum ConfigSubcommands {
  /// Print the path of the settings file
  Path,

  /// Print the effective settings, environment overrides included
  Show,
}

#[allow(clippy::print_stdout)]
pub fn handle_config_command(args: ConfigArgs) -> Result<()> {
  let config_dirs = get_config_dirs()?;

  match args.subcommand {
    ConfigSubcommands::Path => println!("{}", config_dirs.config_path().display()),
    ConfigSubcommands::Show => {
      let config = config_dirs.load_config()?;
      let rendered = toml::to_string_pretty(&config).context("Failed to serialize config to TOML")?;
      print!("{rendered}");
    }
  }
  Ok(())
}
