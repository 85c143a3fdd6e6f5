//! Moisture Dashboard Host CLI
//!
//! This binary runs on your PC, reads moisture records from the RP2350 over
//! USB serial and renders a live terminal dashboard.
//!
//! ## Usage
//!
//! ```bash
//! # Connect to the default port
//! cargo run --bin moisture_host
//!
//! # Connect to specific port
//! cargo run --bin moisture_host -- --port COM3
//!
//! # Replay a captured log
//! cargo run --bin moisture_host -- --replay capture.log
//! ```
//!
//! Press Ctrl+C to stop. Set `RUST_LOG=debug` to see rejected lines.

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use log::info;

use moisture::adapters::{ReplayTransport, SerialTransport, TerminalSurface};
use moisture::config::{ArgsError, Endpoint, HostArgs, USAGE};
use moisture::monitor::{Monitor, MonitorConfig};
use moisture::ports::LineTransport;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = match HostArgs::parse(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(ArgsError::HelpRequested) => {
            println!("{}", USAGE);
            return Ok(());
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("{}", USAGE);
            std::process::exit(2);
        }
    };

    let config = MonitorConfig::default();

    // Opened once; the monitor closes it on every exit path
    let transport: Box<dyn LineTransport> = match args.endpoint {
        Endpoint::Serial { port, baud } => {
            print!("Connecting to {}...", port);
            io::stdout().flush()?;
            let transport = SerialTransport::open(&port, baud, config.read_timeout)
                .with_context(|| format!("failed to open {}", port))?;
            println!(" connected!");
            Box::new(transport)
        }
        Endpoint::Replay(path) => {
            let transport = ReplayTransport::open(&path)
                .with_context(|| format!("failed to replay {}", path.display()))?;
            Box::new(transport)
        }
    };

    let stop = Arc::new(AtomicBool::new(false));
    {
        let stop = Arc::clone(&stop);
        ctrlc::set_handler(move || stop.store(true, Ordering::Relaxed))
            .context("failed to install Ctrl+C handler")?;
    }

    let mut monitor = Monitor::new(transport, TerminalSurface::stdout(), config);
    let stats = monitor.run(&stop).context("monitor stopped")?;

    info!(
        "{} records, {} rejected lines, {} link faults",
        stats.records, stats.rejected, stats.link_faults
    );
    println!("\nGoodbye!");
    Ok(())
}
