//! # Evolve
//!
//! Command-line reports over the built-in roster:
//! - `list`: every entity with its leaf-material tally
//! - `best`: candidates closest to completion for an owned inventory
//! - `consumers`: everything a given entity feeds into

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use evolve_core::{
    best_candidates, consumers_of, default_catalog, leaf_overview, parse_owned, Rank,
    ResolverConfig, CONFIG_FILE,
};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "evolve")]
#[command(about = "Crafting dependency resolver")]
struct Cli {
    /// Config file path
    #[arg(short, long, global = true, default_value = CONFIG_FILE)]
    config: PathBuf,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every entity with its leaf materials
    List,

    /// Rank candidates by how few materials they still need
    Best {
        /// Owned materials, e.g. "Luffy*3 + Chopper*3 + Wood:5"
        #[arg(short, long, default_value = "")]
        own: String,

        /// Override the candidate rank
        #[arg(short, long)]
        rank: Option<Rank>,

        /// Override how many candidates to show
        #[arg(short = 'n', long)]
        top: Option<usize>,
    },

    /// Show every entity that consumes the given one
    Consumers {
        /// Entity name
        name: String,
    },
}

fn emit<T: Serialize>(json: bool, value: &T, text: impl FnOnce() -> String) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        print!("{}", text());
    }
    Ok(())
}

/// Main entry point.
fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive("evolve=info".parse()?))
        .init();

    let cli = Cli::parse();
    let mut config = ResolverConfig::load_from(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;
    let catalog = default_catalog()?;
    info!(entities = catalog.len(), "roster ready");

    match cli.command {
        Commands::List => {
            let overview = leaf_overview(&catalog, &config);
            emit(cli.json, &overview, || {
                overview
                    .iter()
                    .map(|e| format!("{} - {}\n\n", e.name, e.tally))
                    .collect()
            })?;
        },
        Commands::Best { own, rank, top } => {
            if let Some(rank) = rank {
                config.candidate_rank = rank;
            }
            if let Some(top) = top {
                config.top_n = top;
            }
            let owned = parse_owned(&catalog, &own)?;
            let best = best_candidates(&catalog, &owned, &config);
            emit(cli.json, &best, || {
                best.iter()
                    .map(|c| format!("{} - {}\n\n", c.name, c.missing))
                    .collect()
            })?;
        },
        Commands::Consumers { name } => {
            let consumers = consumers_of(&catalog, &name)?;
            let names: Vec<_> = consumers.iter().map(|e| e.name.as_str()).collect();
            emit(cli.json, &names, || {
                consumers
                    .iter()
                    .map(|e| format!("{} ({})\n", e.name, e.rank))
                    .collect()
            })?;
        },
    }

    Ok(())
}
