//! Command-line driver for rustcal calorimeter digitization.
#![allow(
    clippy::uninlined_format_args,
    clippy::cast_precision_loss,
    clippy::too_many_lines
)]

use clap::{Parser, Subcommand};

use rustcal_core::{
    CalConstants, CollectSink, EventSink, EventTrackMarkers, Geant3ParticleTypes, LatticeGeometry,
};
use rustcal_digi::Digitizer;
use rustcal_io::{JsonEventSink, StepFileReader};

use rayon::prelude::*;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;

/// Result type for CLI operations.
type Result<T> = std::result::Result<T, CliError>;

/// CLI error types.
#[derive(Error, Debug)]
enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("I/O error: {0}")]
    RustcalIo(#[from] rustcal_io::Error),

    #[error("Core error: {0}")]
    Core(#[from] rustcal_core::Error),
}

/// Calorimeter step digitizer.
#[derive(Parser)]
#[command(name = "rustcal")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Digitize a step file into per-block hits and truth points
    Digitize {
        /// Input CSF step file
        input: PathBuf,

        /// Output JSON file path
        #[arg(short, long)]
        output: PathBuf,

        /// Calibration constants JSON file (defaults apply when omitted)
        #[arg(short, long)]
        calib: Option<PathBuf>,

        /// Number of block columns on the detector face
        #[arg(long, default_value = "59")]
        columns: u32,

        /// Number of block rows on the detector face
        #[arg(long, default_value = "59")]
        rows: u32,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Show information about a CSF step file
    Info {
        /// Input CSF step file
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Digitize {
            input,
            output,
            calib,
            columns,
            rows,
            verbose,
        } => {
            // The constants object is built exactly once, before any
            // worker starts, and shared read-only from then on. An
            // unreadable calibration file is fatal.
            let constants = match calib {
                Some(path) => rustcal_io::load_constants(path)?,
                None => CalConstants::default(),
            };
            constants.validate()?;
            let constants = Arc::new(constants);
            let geometry = LatticeGeometry::new(columns, rows);

            if verbose {
                eprintln!("Reading: {}", input.display());
                eprintln!("Merge window: {} ns", constants.two_hit_resol_ns);
                eprintln!("Readout threshold: {} MeV", constants.thresh_mev);
                eprintln!("Max hits per block: {}", constants.max_hits);
            }

            let start = Instant::now();
            let reader = StepFileReader::open(&input)?;
            let events: Vec<_> = reader.events().collect();
            let total_steps: u64 = events.iter().map(|e| e.steps.len() as u64).sum();

            // One digitizer instance per event task; instances own their
            // per-event state exclusively, so no locking anywhere.
            let digitized: Vec<CollectSink> = events
                .par_iter()
                .map(|event| {
                    let mut digitizer = Digitizer::new(Arc::clone(&constants));
                    let mut markers = EventTrackMarkers::new();
                    let mut sink = CollectSink::new();
                    digitizer.begin_event();
                    for step in &event.steps {
                        digitizer.process_step(
                            step,
                            &geometry,
                            &Geant3ParticleTypes,
                            &mut markers,
                        );
                    }
                    digitizer.end_event(&mut sink)?;
                    Ok(sink)
                })
                .collect::<std::result::Result<_, rustcal_core::Error>>()?;

            let mut out = JsonEventSink::new();
            let mut blocks_out = 0usize;
            let mut points_out = 0usize;
            for sink in digitized {
                // Events with no surviving output never touched the
                // per-event sink; keep the output numbering dense.
                let (blocks, points) = sink
                    .events
                    .into_iter()
                    .next()
                    .unwrap_or((Vec::new(), Vec::new()));
                blocks_out += blocks.len();
                points_out += points.len();
                out.accept(blocks, points)?;
            }
            out.write_to(&output)?;

            if verbose {
                eprintln!("  {} events, {} steps digitized", events.len(), total_steps);
                eprintln!("  {} blocks, {} truth points written", blocks_out, points_out);
                eprintln!("  elapsed: {:.2?}", start.elapsed());
                eprintln!("Writing output to: {}", output.display());
            }
        }

        Commands::Info { input } => {
            let reader = StepFileReader::open(&input)?;
            println!("File: {}", input.display());
            println!("Events: {}", reader.event_count());
            println!("Steps: {}", reader.step_count());
        }
    }

    Ok(())
}
