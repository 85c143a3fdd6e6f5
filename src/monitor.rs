//! Host monitor loop
//!
//! Reads lines from a [`LineTransport`], decodes them and paints the
//! dashboard on a [`DisplaySurface`]:
//!
//! ```text
//! transport ──line──▶ Record::decode ──▶ Dashboard::render ──▶ surface.redraw
//!                          │
//!                          └── malformed ──▶ surface.annotate
//! ```
//!
//! Empty lines and read timeouts are skipped silently. A transport fault is
//! annotated and retried; `max_link_faults` consecutive faults end the loop
//! with [`MonitorError::LinkLost`]. A closed stream ends it cleanly.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use log::{debug, info, warn};
use thiserror::Error;

use crate::dashboard::{Annotation, Dashboard, DashboardConfig, DisplayState};
use crate::domain::StatusClassifier;
use crate::ports::surface::DisplaySurface;
use crate::ports::transport::{LineTransport, TransportError};
use crate::record::{DecodeError, Record};

/// Monitor settings
#[derive(Clone, Debug)]
pub struct MonitorConfig {
    /// Longest wait for one line
    pub read_timeout: Duration,
    /// Pause after each handled line or fault
    pub cycle_delay: Duration,
    /// Consecutive transport faults tolerated before giving up
    pub max_link_faults: u32,
    pub classifier: StatusClassifier,
    pub dashboard: DashboardConfig,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            read_timeout: Duration::from_secs(1),
            cycle_delay: Duration::from_millis(500),
            max_link_faults: 3,
            classifier: StatusClassifier::default(),
            dashboard: DashboardConfig::default(),
        }
    }
}

/// Outcome of one monitor cycle
#[derive(Clone, Debug, PartialEq)]
pub enum Cycle {
    /// Timeout or empty line, nothing painted
    Idle,
    /// A record was decoded and the dashboard redrawn
    Rendered(DisplayState),
    /// A malformed line was annotated
    Rejected(DecodeError),
    /// A transport fault was annotated; carries the consecutive fault count
    LinkFault(u32),
    /// The stream ended
    Closed,
}

/// Error type for the monitor loop
#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("link lost after {faults} consecutive faults")]
    LinkLost {
        faults: u32,
        source: TransportError,
    },

    #[error("display error: {0}")]
    Surface(#[from] io::Error),
}

/// Counters over a monitor run
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MonitorStats {
    /// Records rendered
    pub records: u64,
    /// Malformed lines reported
    pub rejected: u64,
    /// Transport faults seen
    pub link_faults: u64,
}

/// Telemetry monitor
///
/// Owns its transport for the whole run and closes it when [`Monitor::run`]
/// returns.
pub struct Monitor<T: LineTransport, S: DisplaySurface> {
    transport: T,
    surface: S,
    dashboard: Dashboard,
    config: MonitorConfig,
    stats: MonitorStats,
    consecutive_faults: u32,
}

impl<T: LineTransport, S: DisplaySurface> Monitor<T, S> {
    pub fn new(transport: T, surface: S, config: MonitorConfig) -> Self {
        let dashboard = Dashboard::new(config.classifier, config.dashboard.clone());
        Self {
            transport,
            surface,
            dashboard,
            config,
            stats: MonitorStats::default(),
            consecutive_faults: 0,
        }
    }

    /// Run one cycle: read, decode and paint
    pub fn step(&mut self) -> Result<Cycle, MonitorError> {
        let line = match self.transport.read_line(self.config.read_timeout) {
            Ok(Some(line)) => {
                self.consecutive_faults = 0;
                line
            }
            Ok(None) => {
                self.consecutive_faults = 0;
                return Ok(Cycle::Idle);
            }
            Err(TransportError::Closed) => return Ok(Cycle::Closed),
            Err(e) => return self.link_fault(e),
        };

        match Record::decode(&line) {
            Ok(record) => {
                let (state, panel) = self.dashboard.render(&record);
                self.surface.redraw(&panel)?;
                self.stats.records += 1;
                Ok(Cycle::Rendered(state))
            }
            Err(e) if !e.is_reportable() => Ok(Cycle::Idle),
            Err(e) => {
                debug!("rejected line {:?}: {}", line, e);
                self.surface.annotate(&Annotation::rejected_line(&line, &e))?;
                self.stats.rejected += 1;
                Ok(Cycle::Rejected(e))
            }
        }
    }

    fn link_fault(&mut self, error: TransportError) -> Result<Cycle, MonitorError> {
        self.consecutive_faults += 1;
        self.stats.link_faults += 1;
        warn!(
            "{}: {} (fault {}/{})",
            self.transport.endpoint(),
            error,
            self.consecutive_faults,
            self.config.max_link_faults
        );
        let note = Annotation::link_fault(self.transport.endpoint(), &error);

        // Out of budget: the lost link is the error to report
        if self.consecutive_faults >= self.config.max_link_faults {
            if let Err(e) = self.surface.annotate(&note) {
                warn!("could not show link fault: {}", e);
            }
            return Err(MonitorError::LinkLost {
                faults: self.consecutive_faults,
                source: error,
            });
        }
        self.surface.annotate(&note)?;
        Ok(Cycle::LinkFault(self.consecutive_faults))
    }

    /// Run until `stop` is set or the stream closes
    ///
    /// The transport is closed on every exit path.
    pub fn run(&mut self, stop: &AtomicBool) -> Result<MonitorStats, MonitorError> {
        info!("monitoring {}", self.transport.endpoint());
        let outcome = self.drive(stop);
        if let Err(e) = self.transport.close() {
            warn!("closing {}: {}", self.transport.endpoint(), e);
        }
        outcome.map(|()| self.stats)
    }

    fn drive(&mut self, stop: &AtomicBool) -> Result<(), MonitorError> {
        while !stop.load(Ordering::Relaxed) {
            match self.step()? {
                Cycle::Closed => {
                    info!("{} closed", self.transport.endpoint());
                    break;
                }
                // The read already waited out the timeout
                Cycle::Idle => {}
                Cycle::Rendered(_) | Cycle::Rejected(_) | Cycle::LinkFault(_) => {
                    if !self.config.cycle_delay.is_zero() {
                        thread::sleep(self.config.cycle_delay);
                    }
                }
            }
        }
        Ok(())
    }

    pub fn stats(&self) -> MonitorStats {
        self.stats
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn into_parts(self) -> (T, S) {
        (self.transport, self.surface)
    }
}
