//! # Command Line Interface
//!
//! Defines the CLI structure and command handlers for the bough tool.

mod branches;
mod config;
mod identity;
mod pick;

use anyhow::Result;
use bough_core::output::ColorMode;
use clap::builder::Styles;
use clap::builder::styling::AnsiColor;
use clap::{ArgAction, Parser, Subcommand};

pub use self::branches::{BranchesArgs, OutputFormat};
pub use self::config::{ConfigArgs, ConfigSubcommands};
pub use self::identity::IdentityArgs;
pub use self::pick::PickArgs;

/// Top-level CLI command for the bough tool
#[derive(Parser)]
#[command(name = "bough")]
#[command(display_name = "🌳 Bough")]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
#[command(about = "Pick a branch from any GitHub, GitLab or Bitbucket repository")]
#[command(
  long_about = "Bough lists the branches of a hosted repository through the provider's REST API\n\
        and lets you pick one.\n\n\
        When the provider cannot be reached, a default set of branch names is offered\n\
        instead so you always have something to choose from."
)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(propagate_version = true)]
#[command(subcommand_required(true))]
#[command(disable_help_subcommand = true)]
#[command(max_term_width = 120)]
#[command(styles = Styles::styled()
    .header(AnsiColor::BrightGreen.on_default().bold().underline())
    .usage(AnsiColor::Green.on_default().bold())
    .literal(AnsiColor::BrightGreen.on_default().bold())
    .placeholder(AnsiColor::BrightWhite.on_default().italic())
    .valid(AnsiColor::Green.on_default())
    .invalid(AnsiColor::BrightRed.on_default().bold())
)]
pub struct Cli {
  /// Sets the level of verbosity (can be used multiple times)
  #[arg(
    short = 'v',
    long = "verbose",
    action = ArgAction::Count,
    global = true,
    long_help = "Sets the level of verbosity for tracing and logging output.\n\n\
             -v: Show info level messages\n\
             -vv: Show debug level messages\n\
             -vvv: Show trace level messages"
  )]
  pub verbose: u8,

  /// Controls when colored output is used
  #[arg(
    long,
    value_enum,
    ignore_case = true,
    global = true,
    default_value_t = ColorMode::Auto,
  )]
  pub colors: ColorMode,

  /// Subcommands
  #[command(subcommand)]
  pub command: Commands,
}

/// Subcommands for the bough tool
#[derive(Subcommand)]
pub enum Commands {
  /// List the branches of a repository
  #[command(long_about = "Resolve the branch list of a repository once and print it.\n\n\
            The repository is taken from --owner/--repo/--provider, from --url, or from the\n\
            origin remote of the repository at --path (defaults to the current directory).\n\
            On failure the error is shown together with the default branch list.")]
  #[command(alias = "ls")]
  Branches(BranchesArgs),

  /// Interactively pick a branch
  #[command(long_about = "Resolve the branch list of a repository and choose one interactively.\n\n\
            The chosen branch name is printed on stdout. When resolution fails you can retry\n\
            or keep the current branch.")]
  Pick(PickArgs),

  /// Show configuration
  #[command(long_about = "Show where bough reads its settings from and the values in effect.\n\n\
            Settings come from config.toml in the bough configuration directory,\n\
            with BOUGH_* environment variables applied on top.")]
  #[command(arg_required_else_help = true)]
  Config(ConfigArgs),
}

/// Handle the parsed CLI command
pub fn handle_cli(cli: Cli) -> Result<()> {
  cli.colors.apply();

  match cli.command {
    Commands::Branches(args) => branches::handle_branches_command(args),
    Commands::Pick(args) => pick::handle_pick_command(args),
    Commands::Config(args) => config::handle_config_command(args),
  }
}
