//! CLI definitions using clap.

use clap::{Args, Parser, Subcommand};

/// Wharf - build and package Zig Python extensions into wheels
#[derive(Parser)]
#[command(name = "wharf")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build a wheel from the project in the current directory
    Build(BuildArgs),

    /// Build a wheel and install it into the current interpreter
    Develop(DevelopArgs),

    /// Check that the build environment is usable
    Doctor(DoctorArgs),

    /// Remove build scratch and dist directories
    Clean(CleanArgs),
}

#[derive(Args)]
pub struct BuildArgs {
    /// Build with the ReleaseFast profile
    #[arg(short, long)]
    pub release: bool,
}

#[derive(Args)]
pub struct DevelopArgs {
    /// Build with the ReleaseFast profile
    #[arg(short, long)]
    pub release: bool,
}

#[derive(Args)]
pub struct DoctorArgs {}

#[derive(Args)]
pub struct CleanArgs {
    /// Also remove the dist directory
    #[arg(long)]
    pub dist: bool,
}
