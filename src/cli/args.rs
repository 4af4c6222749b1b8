//! CLI argument definitions using clap

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Interactive outline and mind-map editor
#[derive(Parser, Debug)]
#[command(name = "rsmind")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase logging verbosity (-d, -dd, -ddd)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub debug: u8,

    /// Generate shell completions
    #[arg(long = "generate", value_enum)]
    pub generator: Option<Shell>,

    /// Print author and version
    #[arg(long)]
    pub info: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Open an interactive outline session (default)
    Edit {
        /// Node box width
        #[arg(long)]
        node_width: Option<f64>,

        /// Node box height
        #[arg(long)]
        node_height: Option<f64>,

        /// Horizontal advance per depth level
        #[arg(long)]
        h_spacing: Option<f64>,

        /// Vertical gap between sibling subtrees
        #[arg(long)]
        v_spacing: Option<f64>,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Create config template
    Init,

    /// Show config path
    Path,
}
