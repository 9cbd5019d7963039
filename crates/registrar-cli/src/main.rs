//! Registrar command-line driver.
//!
//! # Usage
//!
//! ```bash
//! # One-off command against the built-in demo catalog
//! registrar report course
//!
//! # Persistent registry in a CBOR file
//! registrar --data registry.cbor add-student S001 "Ada Lovelace"
//! registrar --data registry.cbor enroll S001 CS101
//! registrar --data registry.cbor roster CS101
//! ```

use std::{io::Write, path::PathBuf, process::ExitCode};

use clap::Parser;
use registrar_cli::{Command, execute};
use registrar_core::{CborFileStore, Persistence, Registrar, RegistrarConfig};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Course registration registry
#[derive(Parser, Debug)]
#[command(name = "registrar")]
#[command(about = "Manage students, courses, teachers and enrollments")]
#[command(version)]
struct Args {
    /// Registry file (CBOR). Without it, every run starts from the demo catalog.
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Capacity for courses added without --capacity
    #[arg(long)]
    default_capacity: Option<u32>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let args = Args::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::registry().with(fmt::layer().with_writer(std::io::stderr)).with(filter).init();

    let mut config = RegistrarConfig::default();
    if let Some(capacity) = args.default_capacity {
        config = config.with_default_capacity(capacity);
    }

    let store = args.data.map(CborFileStore::new);
    let store_ref = store.as_ref().map(|s| s as &dyn Persistence);
    let mut registrar = Registrar::initialize(config, store_ref)?;

    let mut stdout = std::io::stdout().lock();
    match execute(&mut registrar, &args.command, &mut stdout) {
        Ok(()) => {},
        Err(e) if e.is_rejection() => {
            tracing::debug!(command = ?args.command, "command rejected");
            writeln!(std::io::stderr(), "error: {e}")?;
            return Ok(ExitCode::FAILURE);
        },
        Err(e) => return Err(e.into()),
    }

    if let Some(store) = store_ref.filter(|_| args.command.is_mutating()) {
        registrar.save(store)?;
    }

    Ok(ExitCode::SUCCESS)
}
