//! CLI module
//!
//! Subcommands:
//! - `serve`: run the marketplace API server (default)

pub mod serve;

use clap::{Parser, Subcommand};

/// Gram Bazaar - marketplace API for local artisans
#[derive(Parser)]
#[command(name = "gram-bazaar")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the API server
    Serve,
}
