//! The single-shot pipeline: delay, optional capture, build, optional append, print.
//!
//! Every step runs at most once, in that order, on the calling thread. Any I/O failure
//! ends the run; nothing is retried and no partial output is written to `output`.

use std::io::{Read, Write};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::append_log::{self, APPEND_LINE};
use crate::capture;
use crate::random::RandomSource;
use crate::record::Record;
use crate::settings::SimulatorSettings;

/// Fixed wait that stands in for a slow backing operation.
pub const SIMULATED_DELAY: Duration = Duration::from_secs(5);

#[derive(Clone, Debug)]
pub struct Simulator {
    settings: SimulatorSettings,
    delay: Duration,
}

impl Simulator {
    pub fn new(settings: SimulatorSettings) -> Self {
        Self {
            settings,
            delay: SIMULATED_DELAY,
        }
    }

    /// Replaces the fixed delay; used by tests that cannot wait for it.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn settings(&self) -> &SimulatorSettings {
        &self.settings
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Runs the pipeline once and returns the record that was written to `output`.
    pub fn run<I, O, R>(&self, input: I, mut output: O, random: &mut R) -> Result<Record>
    where
        I: Read,
        O: Write,
        R: RandomSource + ?Sized,
    {
        let started = Instant::now();
        info!(delay_ms = self.delay.as_millis() as u64, "simulating slow operation");
        thread::sleep(self.delay);

        let captured = if self.settings.capture_stdin {
            Some(capture::read_input(input)?)
        } else {
            None
        };

        let record = Record::build(self.settings.keys.clone(), captured, random);
        debug!(
            random = record.random(),
            items_key = %record.keys().items,
            integer_key = %record.keys().integer,
            "built record"
        );

        if self.settings.append_log {
            append_log::append_line(&self.settings.append_path, APPEND_LINE)?;
        }

        let mut line = json_encoding::to_vec(&record, self.settings.encoding)
            .context("unable to serialize record")?;
        line.push(b'\n');
        output
            .write_all(&line)
            .and_then(|()| output.flush())
            .context("unable to write record to standard output")?;

        info!(
            encoding = self.settings.encoding.label(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "record emitted"
        );
        Ok(record)
    }
}
