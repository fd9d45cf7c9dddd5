//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueHint};

/// Build binary tributary trees from CSV river-network data and explore them interactively
#[derive(Parser, Debug)]
#[command(name = "riverine")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable debug output (-d: info, -dd: debug, -ddd: trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub debug: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Explore the tributary tree interactively
    Explore {
        /// CSV file describing the river network
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Print the whole tributary tree
    Tree {
        /// CSV file describing the river network
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// List headwater tributaries (no further branches)
    Headwaters {
        /// CSV file describing the river network
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}
