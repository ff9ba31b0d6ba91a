//! Summarize JSON dumps of reconstruction records.
//!
//! Run with: cargo run --bin recob-summary -- flashes <dump.json>

use clap::{Parser, Subcommand};
use recob_core::{Cluster, OpFlash};
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

type Result<T> = std::result::Result<T, SummaryError>;

#[derive(Error, Debug)]
enum SummaryError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Summary of reconstruction record dumps.
#[derive(Parser)]
#[command(name = "recob-summary")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List optical flashes in time order
    Flashes {
        /// JSON file holding an array of flashes
        input: PathBuf,

        /// Only list flashes with at least this many photoelectrons
        #[arg(long, default_value = "0.0")]
        min_pe: f64,
    },

    /// Print clusters
    Clusters {
        /// JSON file holding an array of clusters
        input: PathBuf,

        /// Skip clusters without a valid identifier
        #[arg(long)]
        valid_only: bool,
    },
}

fn read_records<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let reader = BufReader::new(File::open(path)?);
    serde_json::from_reader(reader).map_err(|source| SummaryError::Json {
        path: path.to_path_buf(),
        source,
    })
}

fn write_flash_summary<W: Write>(
    out: &mut W,
    mut flashes: Vec<OpFlash>,
    min_pe: f64,
) -> Result<()> {
    OpFlash::sort_by_time(&mut flashes);
    writeln!(out, "time_us,total_pe,x_center,y_center,z_center")?;
    let mut listed = 0usize;
    for flash in flashes.iter().filter(|f| f.total_pe() >= min_pe) {
        let x = flash
            .x_center()
            .map_or_else(|| "-".to_string(), |x| x.to_string());
        writeln!(
            out,
            "{},{},{},{},{}",
            flash.time(),
            flash.total_pe(),
            x,
            flash.y_center(),
            flash.z_center()
        )?;
        listed += 1;
    }
    log::info!("listed {} of {} flashes", listed, flashes.len());
    Ok(())
}

fn write_cluster_summary<W: Write>(
    out: &mut W,
    clusters: &[Cluster],
    valid_only: bool,
) -> Result<()> {
    let mut skipped = 0usize;
    for cluster in clusters {
        if valid_only && !cluster.is_valid() {
            skipped += 1;
            continue;
        }
        writeln!(out, "{cluster}")?;
    }
    if skipped > 0 {
        log::warn!("skipped {skipped} clusters without a valid identifier");
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Flashes { input, min_pe } => {
            log::debug!("reading flashes from {}", input.display());
            let flashes: Vec<OpFlash> = read_records(&input)?;
            write_flash_summary(&mut out, flashes, min_pe)?;
        }
        Commands::Clusters { input, valid_only } => {
            log::debug!("reading clusters from {}", input.display());
            let clusters: Vec<Cluster> = read_records(&input)?;
            write_cluster_summary(&mut out, &clusters, valid_only)?;
        }
    }

    Ok(())
}
