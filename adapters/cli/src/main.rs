#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs the Lifeworks rule engines headlessly.

mod config;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use lifeworks_core::{CellState, Life};
use lifeworks_system_registry as registry;
use sha2::{Digest, Sha256};

use crate::config::{RunFile, RunSettings};

#[derive(Debug, Parser)]
#[command(name = "lifeworks", version, about = "Run cellular automata on a torus")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List every available rule engine.
    List,
    /// Randomize an engine and step it until it stalls or the step limit is hit.
    Run(RunArgs),
}

#[derive(Debug, Args)]
struct RunArgs {
    /// TOML run file supplying defaults for the flags below.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Engine key as printed by `lifeworks list`.
    #[arg(long)]
    variant: Option<String>,
    /// Grid height.
    #[arg(long)]
    rows: Option<u32>,
    /// Grid width.
    #[arg(long)]
    columns: Option<u32>,
    /// Seed for the engine's random number generator.
    #[arg(long)]
    seed: Option<u64>,
    /// Maximum number of generations.
    #[arg(long)]
    steps: Option<u64>,
    /// Print every generation as text. `--render false` overrides the run file.
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    render: Option<bool>,
    /// Print a SHA-256 digest of the final grid. Accepts `true` or `false`.
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    fingerprint: Option<bool>,
}

impl RunArgs {
    fn settings(self) -> Result<RunSettings> {
        let file = match &self.config {
            Some(path) => RunFile::load(path)?,
            None => RunFile::default(),
        };
        let flags = RunFile {
            variant: self.variant,
            rows: self.rows,
            columns: self.columns,
            seed: self.seed,
            steps: self.steps,
            render: self.render,
            fingerprint: self.fingerprint,
        };
        Ok(file.merge(flags))
    }
}

/// Outcome of a headless run.
#[derive(Debug)]
struct Report {
    generations: u64,
    stalled: bool,
    population: u64,
    fingerprint: Option<String>,
}

/// Entry point for the Lifeworks command-line interface.
fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::List => list(),
        Command::Run(args) => {
            let settings = args.settings()?;
            let report = run(&settings)?;
            print_summary(&settings, &report);
        }
    }

    Ok(())
}

fn list() {
    for entry in registry::variants() {
        println!("{:<22} {}", entry.key(), entry.name());
    }
}

fn run(settings: &RunSettings) -> Result<Report> {
    let mut engine = registry::create(&settings.variant, settings.seed)?;
    engine
        .resize(settings.rows, settings.columns)
        .with_context(|| format!("cannot simulate variant `{}`", settings.variant))?;
    engine.randomize();
    log::info!(
        "running {} on a {}x{} grid with seed {}, population {}",
        settings.variant,
        settings.rows,
        settings.columns,
        settings.seed,
        engine.population_count()
    );

    if settings.render {
        println!("{}", render(engine.as_ref()));
    }

    let mut generations = 0;
    let mut stalled = false;
    while generations < settings.steps {
        let mut changes = 0_usize;
        let changed = engine.step(&mut |_, _| changes += 1);
        generations += 1;
        log::info!(
            "generation {generations}: population {}, {changes} cells changed",
            engine.population_count()
        );

        if settings.render {
            println!("{}", render(engine.as_ref()));
        }
        if !changed {
            log::info!("stalled after {generations} generations");
            stalled = true;
            break;
        }
    }

    Ok(Report {
        generations,
        stalled,
        population: engine.population_count(),
        fingerprint: settings.fingerprint.then(|| fingerprint(engine.as_ref())),
    })
}

fn print_summary(settings: &RunSettings, report: &Report) {
    let ending = if report.stalled { ", stalled" } else { "" };
    println!(
        "{} {}x{} seed {}: {} generations, population {}{ending}",
        settings.variant,
        settings.rows,
        settings.columns,
        settings.seed,
        report.generations,
        report.population
    );
    if let Some(digest) = &report.fingerprint {
        println!("fingerprint {digest}");
    }
}

/// Draws the live cells of `engine` as one line of glyphs per row.
fn render(engine: &dyn Life) -> String {
    let size = engine.size();
    let columns = size.columns() as usize;
    let mut glyphs = vec![CellState::Dead.glyph(); size.cell_count()];
    engine.for_all_life(&mut |cell, state| {
        if let Some(index) = size.index(cell) {
            glyphs[index] = state.glyph();
        }
    });

    glyphs
        .chunks(columns.max(1))
        .map(|row| row.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Hex-encoded SHA-256 digest of the grid dimensions and every cell state.
fn fingerprint(engine: &dyn Life) -> String {
    let size = engine.size();
    let mut hasher = Sha256::new();
    hasher.update(size.rows().to_le_bytes());
    hasher.update(size.columns().to_le_bytes());
    for index in 0..size.cell_count() {
        let glyph = engine.get(size.coord(index)).glyph();
        hasher.update([glyph as u8]);
    }

    hasher
        .finalize()
        .iter()
        .map(|byte| format!("{byte:02x}"))
        .collect()
}
