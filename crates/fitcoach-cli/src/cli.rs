//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Headless driver for the fitness-coach generation client.
#[derive(Parser)]
#[command(name = "fitcoach", version, about = "Generate fitness plans, narration, and illustrations")]
pub struct Cli {
    /// Path to a TOML configuration file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// API key override; defaults to the config file or environment.
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available operations.
#[derive(Subcommand)]
pub enum Command {
    /// Generate a complete plan from a user profile.
    Plan {
        /// Path to the profile TOML file.
        #[arg(long)]
        profile: PathBuf,
        /// Where to write the generated plan JSON.
        #[arg(long, default_value = "plan.json")]
        output: PathBuf,
    },
    /// Synthesize narration for arbitrary text into a WAV file.
    Speak {
        /// Text to narrate.
        text: String,
        /// Where to write the WAV file.
        #[arg(long, default_value = "narration.wav")]
        output: PathBuf,
    },
    /// Narrate a section of a previously generated plan.
    ReadPlan {
        /// Path to a plan JSON file produced by `plan`.
        #[arg(long)]
        plan: PathBuf,
        /// Narrate a single day instead of the whole section.
        #[arg(long)]
        day: Option<String>,
        /// Which plan section to read.
        #[arg(long, value_enum, default_value = "workout")]
        section: Section,
        /// Where to write the WAV file.
        #[arg(long, default_value = "narration.wav")]
        output: PathBuf,
    },
    /// Generate a single illustration for a visual prompt.
    Illustrate {
        /// Free-text visual prompt.
        prompt: String,
        /// Where to write the PNG file.
        #[arg(long, default_value = "illustration.png")]
        output: PathBuf,
    },
}

/// Plan section selector for narration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Section {
    /// The workout routine.
    Workout,
    /// The meal plan.
    Diet,
    /// Lifestyle tips and motivation.
    Tips,
}
