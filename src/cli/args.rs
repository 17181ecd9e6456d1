//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `check`: Analyse bundles and report pattern problems
//! - `tree`: Print the namespace tree and argument kinds of one bundle
//! - `init`: Initialize bundlegen configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

use crate::core::{Encoding, FormatStyle};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Check(cmd)) => cmd.common.verbose,
            Some(Command::Tree(cmd)) => cmd.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by all bundle commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Directory bundle names are resolved against (overrides config file)
    #[arg(long)]
    pub source_root: Option<PathBuf>,

    /// Format convention of bundle values (overrides config file)
    #[arg(long, value_enum)]
    pub format_style: Option<FormatStyle>,

    /// Encoding of bundle files (overrides config file)
    #[arg(long, value_enum)]
    pub encoding: Option<Encoding>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct CheckCommand {
    /// Dotted bundle names (default: every bundle under the source root)
    pub bundles: Vec<String>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct TreeCommand {
    /// Dotted bundle name, e.g. com.example.messages
    pub bundle: String,

    /// Print the tree and signatures as JSON
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check bundles for malformed patterns and unusable keys
    Check(CheckCommand),
    /// Print the accessor namespace tree of a bundle
    Tree(TreeCommand),
    /// Initialize a new .bundlegenrc.json configuration file
    Init,
}
