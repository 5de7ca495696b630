//! Trajectory snapshot sinks.
//!
//! The engine emits snapshots through [`TrajectoryWriter`] at every
//! print-interval tick and at the final time of each run; the sink
//! decides what to do with them. The trait itself is the core crate's
//! [`simmer_core::TrajectoryWriter`] seam; this module provides the
//! stock implementations.

use std::io::{self, Write};

use simmer_core::TrajectoryWriter;

/// Tab-separated trajectory output: a `# run` marker per run, a header
/// row of `time` plus species names, one row per snapshot.
#[derive(Debug)]
pub struct TsvTrajectoryWriter<W: Write> {
    out: W,
}

impl<W: Write> TsvTrajectoryWriter<W> {
    /// Write trajectories to `out`.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Recover the underlying sink.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> TrajectoryWriter for TsvTrajectoryWriter<W> {
    fn start_run(&mut self, run: usize) -> io::Result<()> {
        writeln!(self.out, "# run {run}")
    }

    fn header(&mut self, species: &[&str]) -> io::Result<()> {
        write!(self.out, "time")?;
        for name in species {
            write!(self.out, "\t{name}")?;
        }
        writeln!(self.out)
    }

    fn snapshot(&mut self, time: f64, amounts: &[f64]) -> io::Result<()> {
        write!(self.out, "{time}")?;
        for a in amounts {
            write!(self.out, "\t{a}")?;
        }
        writeln!(self.out)
    }

    fn finish_run(&mut self, _run: usize) -> io::Result<()> {
        self.out.flush()
    }
}

/// Discards every snapshot. For benchmark and decider-only runs.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullTrajectoryWriter;

impl TrajectoryWriter for NullTrajectoryWriter {
    fn start_run(&mut self, _run: usize) -> io::Result<()> {
        Ok(())
    }

    fn header(&mut self, _species: &[&str]) -> io::Result<()> {
        Ok(())
    }

    fn snapshot(&mut self, _time: f64, _amounts: &[f64]) -> io::Result<()> {
        Ok(())
    }

    fn finish_run(&mut self, _run: usize) -> io::Result<()> {
        Ok(())
    }
}
