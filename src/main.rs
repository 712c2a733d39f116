// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! QubitOS MR sequence tool
//!
//! Inspects, validates and rewrites pulse-sequence files and prints their
//! phase-cycling tables.
//!
//! # Usage
//!
//! ```bash
//! # Print the phase table of a sequence
//! qubit-os-mrseq phase-table echo.json
//!
//! # Check a sequence against the active spectrometer
//! qubit-os-mrseq validate echo.json --backend generic
//!
//! # List available backends
//! qubit-os-mrseq backends
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};
use serde_json::{json, Value};
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use qubit_os_mrseq::{
    backend::{GenericSpectrometer, Spectrometer, SpectrometerRegistry},
    config::{Config, LoggingConfig},
    phase_table::PhaseTable,
    sequence::Sequence,
    Result, VERSION,
};

/// QubitOS magnetic-resonance sequence tool
#[derive(Parser)]
#[command(name = "qubit-os-mrseq")]
#[command(author = "QubitOS Contributors")]
#[command(version = VERSION)]
#[command(about = "Hardware-independent pulse sequences and phase-cycling tables")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Log format (pretty, json)
    #[arg(long, global = true)]
    log_format: Option<String>,

    /// Spectrometer supplying the parameter catalog
    #[arg(short, long, global = true)]
    backend: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the phase-cycling table of a sequence file
    PhaseTable {
        /// Sequence file (JSON)
        file: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Report issues in a sequence file
    Validate {
        /// Sequence file (JSON)
        file: PathBuf,
    },

    /// Load a sequence file and write it back out
    Roundtrip {
        /// Sequence file (JSON)
        file: PathBuf,

        /// Destination (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Write an empty sequence
    New {
        /// Sequence name
        name: String,

        /// Destination (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List available backends
    Backends,

    /// Show effective configuration
    Config,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    if let Some(format) = cli.log_format {
        config.logging.format = format;
    }
    if let Some(backend) = cli.backend {
        config.sequence.backend = backend;
    }

    init_logging(&config.logging);
    config.validate()?;

    let registry = initialize_backends(&config)?;
    let spectrometer = registry.active()?;

    match cli.command {
        Commands::PhaseTable { file, format } => {
            let sequence = load_sequence(spectrometer.as_ref(), &file)?;
            let table = spectrometer.phase_table(&sequence)?;
            match format {
                OutputFormat::Text => print!("{}", render_table(&table)),
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&table_document(&table))?)
                }
            }
        }

        Commands::Validate { file } => {
            let sequence = load_sequence(spectrometer.as_ref(), &file)?;
            let issues = sequence.validate();
            if issues.is_empty() {
                println!("Sequence '{}' is valid", sequence.name());
            } else {
                for issue in &issues {
                    eprintln!("{}", issue);
                }
                if config.validation.strict {
                    std::process::exit(1);
                }
                warn!(issues = issues.len(), "Sequence has issues");
            }
        }

        Commands::Roundtrip { file, output } => {
            let sequence = load_sequence(spectrometer.as_ref(), &file)?;
            write_sequence(&sequence, output.as_deref())?;
        }

        Commands::New { name, output } => {
            let sequence = Sequence::new(
                &name,
                config.sequence.default_version.as_deref(),
                spectrometer.catalog(),
            );
            write_sequence(&sequence, output.as_deref())?;
        }

        Commands::Backends => {
            println!("Available backends:");
            for (name, backend_type) in registry.list_with_types() {
                let active_marker = if Some(&name) == registry.active_name().as_ref() {
                    " (active)"
                } else {
                    ""
                };
                println!("  {} [{}]{}", name, backend_type, active_marker);
            }
        }

        Commands::Config => {
            println!("{}", serde_yaml::to_string(&config)?);
        }
    }

    Ok(())
}

/// Initialize logging with tracing.
fn init_logging(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    if logging.format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init();
    }
}

/// Register the built-in backends and activate the configured one.
fn initialize_backends(config: &Config) -> Result<SpectrometerRegistry> {
    let registry = SpectrometerRegistry::new();
    registry.register(Arc::new(GenericSpectrometer::default()));
    registry.set_active(&config.sequence.backend)?;
    info!(
        version = VERSION,
        backend = %config.sequence.backend,
        backends = ?registry.list(),
        "Spectrometer ready"
    );
    Ok(registry)
}

fn load_sequence(spectrometer: &dyn Spectrometer, path: &Path) -> Result<Sequence> {
    let text = std::fs::read_to_string(path)?;
    let doc: Value = serde_json::from_str(&text)?;
    spectrometer.load_sequence(&doc)
}

fn write_sequence(sequence: &Sequence, output: Option<&Path>) -> Result<()> {
    let text = sequence.to_json_string()?;
    match output {
        Some(path) => {
            std::fs::write(path, text)?;
            info!(sequence = %sequence.name(), path = %path.display(), "Wrote sequence");
        }
        None => println!("{}", text),
    }
    Ok(())
}

fn render_table(table: &PhaseTable) -> String {
    let mut out = String::new();
    if table.n_columns() == 0 {
        out.push_str("(no phase-cycled pulses; 1 scan)\n");
        return out;
    }
    out.push_str(&format!("{:>6}", "scan"));
    for entry in table.entries() {
        out.push_str(&format!("  {:>14}", entry.key.event));
    }
    out.push('\n');
    for (i, row) in table.matrix().rows().into_iter().enumerate() {
        out.push_str(&format!("{:>6}", i));
        for phase in row.iter() {
            out.push_str(&format!("  {:>14.1}", phase));
        }
        out.push('\n');
    }
    out
}

fn table_document(table: &PhaseTable) -> Value {
    let columns: Vec<Value> = table
        .entries()
        .iter()
        .map(|e| {
            json!({
                "event": e.key.event,
                "parameter": e.key.parameter,
                "group": e.group,
                "declared_group": e.declared_group,
                "phases": e.phases,
            })
        })
        .collect();
    let rows: Vec<Vec<f64>> = table
        .matrix()
        .rows()
        .into_iter()
        .map(|r| r.to_vec())
        .collect();
    json!({"columns": columns, "rows": rows})
}
