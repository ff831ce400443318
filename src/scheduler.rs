//! Report scheduler
//!
//! Drives the sampling cadence: one baseline sample at start, the first report
//! after a short warm-up, then one report per period until shutdown. A separate
//! status tick prints lifetime totals. Everything runs on one task, so report
//! cycles never overlap and status reads always see a consistent snapshot.

use chrono::Local;
use log::{debug, error, info, warn};
use std::future::Future;
use std::time::Duration;
use tokio::time::{Instant, MissedTickBehavior, interval_at};

use crate::api::{BandwidthReport, Transport};
use crate::collectors::bandwidth::{Accumulator, Delta, DeltaEngine, format_bytes};
use crate::status::{StatusSnapshot, print_status};

pub const DEFAULT_REPORT_INTERVAL: Duration = Duration::from_millis(30_000);
pub const DEFAULT_WARMUP_DELAY: Duration = Duration::from_millis(2_000);
pub const DEFAULT_STATUS_INTERVAL: Duration = Duration::from_millis(60_000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerConfig {
    /// Period between report cycles once warmed up
    pub report_interval: Duration,
    /// Delay between the baseline sample and the first report cycle
    pub warmup_delay: Duration,
    /// Period between status displays
    pub status_interval: Duration,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            report_interval: DEFAULT_REPORT_INTERVAL,
            warmup_delay: DEFAULT_WARMUP_DELAY,
            status_interval: DEFAULT_STATUS_INTERVAL,
        }
    }
}

/// Result of one report cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    Reported(Delta),
    Failed { delta: Delta, error: String },
}

impl CycleOutcome {
    pub fn delta(&self) -> Delta {
        match self {
            CycleOutcome::Reported(delta) | CycleOutcome::Failed { delta, .. } => *delta,
        }
    }

    pub fn is_reported(&self) -> bool {
        matches!(self, CycleOutcome::Reported(_))
    }
}

pub struct ReportScheduler<T: Transport> {
    engine: DeltaEngine,
    accumulator: Accumulator,
    transport: T,
    config: SchedulerConfig,
    started_at: Instant,
    cycles: u64,
    failed_cycles: u64,
    status_displays: u64,
}

impl<T: Transport> ReportScheduler<T> {
    pub fn new(engine: DeltaEngine, transport: T, config: SchedulerConfig) -> Self {
        Self {
            engine,
            accumulator: Accumulator::new(),
            transport,
            config,
            started_at: Instant::now(),
            cycles: 0,
            failed_cycles: 0,
            status_displays: 0,
        }
    }

    pub fn engine(&self) -> &DeltaEngine {
        &self.engine
    }

    pub fn accumulator(&self) -> &Accumulator {
        &self.accumulator
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn failed_cycles(&self) -> u64 {
        self.failed_cycles
    }

    pub fn status_displays(&self) -> u64 {
        self.status_displays
    }

    pub fn status(&self) -> StatusSnapshot {
        StatusSnapshot {
            totals: self.accumulator.totals(),
            uptime: self.started_at.elapsed(),
        }
    }

    /// Takes the first sample so the first report covers a real interval
    pub async fn establish_baseline(&mut self) {
        let delta = self.engine.next_delta().await;
        debug!(
            "Baseline sample taken via {} (discarded delta: rx={}, tx={})",
            self.engine.mechanism(),
            delta.bytes_in,
            delta.bytes_out
        );
    }

    /// Samples, accumulates, then sends; accumulation stands even if sending fails
    pub async fn run_cycle(&mut self) -> CycleOutcome {
        self.cycles += 1;
        let delta = self.engine.next_delta().await;
        if delta.is_zero() {
            debug!("Cycle #{}: no traffic since the last sample", self.cycles);
        }
        self.accumulator.record(&delta);

        match self.transport.send_bandwidth(BandwidthReport::from(delta)).await {
            Ok(()) => {
                info!(
                    "[{}] Reported: {} down, {} up",
                    Local::now().format("%H:%M:%S"),
                    format_bytes(delta.bytes_in),
                    format_bytes(delta.bytes_out)
                );
                CycleOutcome::Reported(delta)
            }
            Err(e) => {
                self.failed_cycles += 1;
                error!("Failed to report bandwidth (cycle #{}): {}", self.cycles, e);
                CycleOutcome::Failed {
                    delta,
                    error: e.to_string(),
                }
            }
        }
    }

    /// Runs until `shutdown` resolves, then prints a final status and returns it
    ///
    /// A report cycle still in flight when `shutdown` resolves is abandoned.
    pub async fn run<F>(&mut self, shutdown: F) -> StatusSnapshot
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        self.started_at = Instant::now();

        tokio::select! {
            _ = self.establish_baseline() => {}
            _ = &mut shutdown => return self.finish(),
        }

        let start = Instant::now();
        let mut report_tick = interval_at(
            start + self.config.warmup_delay,
            self.config.report_interval,
        );
        report_tick.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut status_tick = interval_at(
            start + self.config.status_interval,
            self.config.status_interval,
        );
        status_tick.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(
            "Reporting every {:?} after a {:?} warm-up (status every {:?})",
            self.config.report_interval, self.config.warmup_delay, self.config.status_interval
        );

        'run: loop {
            tokio::select! {
                _ = &mut shutdown => break 'run,
                _ = report_tick.tick() => {
                    tokio::select! {
                        _ = self.run_cycle() => {}
                        _ = &mut shutdown => {
                            warn!("Abandoning report cycle #{} on shutdown", self.cycles);
                            break 'run;
                        }
                    }
                }
                _ = status_tick.tick() => {
                    self.status_displays += 1;
                    print_status(&self.status());
                }
            }
        }

        self.finish()
    }

    fn finish(&mut self) -> StatusSnapshot {
        info!(
            "Shutting down after {} report cycles ({} failed)",
            self.cycles, self.failed_cycles
        );
        let snapshot = self.status();
        self.status_displays += 1;
        print_status(&snapshot);
        snapshot
    }
}
