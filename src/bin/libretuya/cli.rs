//! CLI definitions using clap.

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// libretuya - validate LibreTuya platform configuration and emit build settings
#[derive(Parser)]
#[command(name = "libretuya")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate the `libretuya` block of a build description
    Validate(ValidateArgs),

    /// Show the build directives emitted for a build description
    Flags(FlagsArgs),

    /// Write platformio.ini and the defines header for a build description
    Generate(GenerateArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

impl Commands {
    /// The build description the command operates on, if any.
    pub fn description_path(&self) -> Option<&Path> {
        match self {
            Commands::Validate(args) => Some(args.file.as_path()),
            Commands::Flags(args) => Some(args.file.as_path()),
            Commands::Generate(args) => Some(args.file.as_path()),
            Commands::Completions(_) => None,
        }
    }
}

#[derive(Args)]
pub struct ValidateArgs {
    /// Build description (YAML or TOML)
    pub file: PathBuf,

    /// Print the resolved configuration and build context as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct FlagsArgs {
    /// Build description (YAML or TOML)
    pub file: PathBuf,
}

#[derive(Args)]
pub struct GenerateArgs {
    /// Build description (YAML or TOML)
    pub file: PathBuf,

    /// Name of the platformio.ini environment
    #[arg(long)]
    pub env: Option<String>,

    /// Directory to write generated files into (defaults to current directory)
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Print generated files instead of writing them
    #[arg(long)]
    pub stdout: bool,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: Shell,
}
