//! Leaderboard Builder CLI
//!
//! Batch entry point: snapshot request JSON in, computed snapshot JSON out.

#[cfg(feature = "cli")]
use anyhow::Result;
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "leaderboard_builder")]
#[command(about = "Compute pool leaderboard and bracket snapshots", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Compute the ranked leaderboard snapshot
    Leaderboard {
        /// Input request JSON (matches, picks, scoring, members)
        #[arg(long)]
        r#in: PathBuf,

        /// Output leaderboard snapshot path
        #[arg(long)]
        out: PathBuf,
    },

    /// Resolve qualification and knockout bracket participants
    Bracket {
        /// Input request JSON (matches snapshot, optional best-third override)
        #[arg(long)]
        r#in: PathBuf,

        /// Output bracket snapshot path
        #[arg(long)]
        out: PathBuf,
    },
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Leaderboard { r#in, out } => {
            println!("Building leaderboard snapshot...");
            println!("   Input:  {}", r#in.display());
            println!("   Output: {}", out.display());

            let report = leaderboard_builder::build_leaderboard(&r#in, &out)?;
            println!("\nLeaderboard written.");
            println!("   Entries:       {}", report.entries);
            println!("   Dropped picks: {}", report.dropped_picks);
            println!("   Size:          {} bytes", report.output_bytes);
        }

        Commands::Bracket { r#in, out } => {
            println!("Resolving bracket snapshot...");
            println!("   Input:  {}", r#in.display());
            println!("   Output: {}", out.display());

            let report = leaderboard_builder::build_bracket(&r#in, &out)?;
            println!("\nBracket written.");
            println!("   Matches: {}", report.entries);
            println!("   Size:    {} bytes", report.output_bytes);
        }
    }

    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("leaderboard_builder CLI is not available. Enable the 'cli' feature to use it.");
    std::process::exit(1);
}
