//! # Scheduler
//!
//! Drives a [`Collector`] on a fixed interval. The first cycle starts right away; every later cycle starts one
//! interval after the previous one finished. There is no jitter and no drift correction, so the effective period is
//! the interval plus however long a cycle takes.
//!
//! Cycles never overlap. A failing cycle ends [`Scheduler::run`] with the error.

use crate::{
    collectors::Collector,
    error::Result,
};
use std::{
    convert::Infallible,
    time::Duration,
};
use strum::Display;
use tokio::time::{
    sleep,
    Instant,
};

#[derive(Display, Debug, Clone, Copy, PartialEq, Eq)]
#[strum(serialize_all = "lowercase")]
pub enum SchedulerState {
    /// A cycle is in progress.
    Polling,
    /// Sleeping until the next cycle.
    Idle,
}

pub struct Scheduler<C> {
    collector: C,
    interval: Duration,
    state: SchedulerState,
    cycles: u64,
}

impl<C: Collector> Scheduler<C> {
    pub fn new(collector: C, interval: Duration) -> Self {
        Self {
            collector,
            interval,
            state: SchedulerState::Polling,
            cycles: 0,
        }
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    /// Number of cycles started so far.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn collector(&self) -> &C {
        &self.collector
    }

    /// Run one cycle, then sleep for the interval.
    pub async fn tick(&mut self) -> Result<()> {
        self.state = SchedulerState::Polling;
        self.cycles += 1;
        let cycle = self.cycles;
        let started = Instant::now();
        debug!(cycle, state = %self.state, collector = self.collector.name(), "poll cycle started");

        self.collector.collect().await?;

        debug!(
            cycle,
            elapsed = ?started.elapsed(),
            summary = %self.collector.summary(),
            "poll cycle finished"
        );

        self.state = SchedulerState::Idle;
        debug!(cycle, state = %self.state, interval = ?self.interval, "sleeping");
        sleep(self.interval).await;
        Ok(())
    }

    /// Loop forever. Only returns when a cycle fails.
    pub async fn run(mut self) -> Result<Infallible> {
        info!(
            collector = self.collector.name(),
            interval = %humantime::format_duration(self.interval),
            "scheduler started"
        );
        loop {
            self.tick().await?;
        }
    }
}
