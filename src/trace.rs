//! Scan observation: events emitted while a report is scanned, and the sinks
//! that render them. A sink only observes; it cannot change the scan result.

use crate::models::disk::{DiskUsageRecord, Usage};
use crate::scan::{FilterChecks, Rejection};
use crate::util::text::fmt_str_list;
use std::io::Write;

#[derive(Debug)]
pub enum ScanEvent<'a> {
    /// Report split into lines (after the outer trim).
    Started  { lines: &'a [&'a str] },
    /// A line about to be inspected, already trimmed.
    Line     { index: usize, line: &'a str },
    Parts    { index: usize, parts: &'a [&'a str] },
    Parsed   { index: usize, mount: &'a str, usage: Usage },
    Checked  { index: usize, checks: &'a FilterChecks },
    Accepted { index: usize, record: &'a DiskUsageRecord },
    Rejected { index: usize, reason: &'a Rejection },
    Finished { records: &'a [DiskUsageRecord] },
}

pub trait TraceSink {
    fn event(&mut self, event: &ScanEvent<'_>);
}

/// Discards everything.
#[derive(Debug, Default)]
pub struct NullSink;

impl TraceSink for NullSink {
    fn event(&mut self, _event: &ScanEvent<'_>) {}
}

// ── Writer sink ─────────────────────────────────────────────────────────

/// Human-readable trace, one line per step.
///
/// Write errors are dropped: a closed stdout must not change what the scan
/// returns.
#[derive(Debug)]
pub struct WriterSink<W: Write> {
    out: W,
}

impl<W: Write> WriterSink<W> {
    pub fn new(out: W) -> Self { Self { out } }

    #[cfg(test)]
    pub fn into_inner(self) -> W { self.out }
}

impl<W: Write> TraceSink for WriterSink<W> {
    fn event(&mut self, event: &ScanEvent<'_>) {
        let out = &mut self.out;
        let _ = match event {
            ScanEvent::Started { lines } => {
                writeln!(out, "=== Debug Disk Processing ===\nInput lines: {}", fmt_str_list(lines))
            }
            ScanEvent::Line { index, line } => {
                writeln!(out, "Processing line {}: \"{}\"", index, line)
            }
            ScanEvent::Parts { parts, .. } => {
                writeln!(out, "  -> Parts: {}", fmt_str_list(parts))
            }
            ScanEvent::Parsed { mount, usage, .. } => {
                writeln!(out, "  -> Mount: \"{}\", Usage: {}", mount, usage)
            }
            ScanEvent::Checked { checks, .. } => writeln!(out, "  -> Filters: {}", checks),
            ScanEvent::Accepted { record, .. } => writeln!(out, "  -> ADDED: {}", record),
            ScanEvent::Rejected { reason, .. } => match reason {
                Rejection::EmptyLine         => writeln!(out, "  -> Skipping empty line"),
                Rejection::Malformed { .. }  => writeln!(out, "  -> Skipping: not 2 parts"),
                Rejection::Filtered(_)       => writeln!(out, "  -> FILTERED OUT"),
            },
            // The final block is printed by the caller.
            ScanEvent::Finished { .. } => out.flush(),
        };
    }
}

// ── Log sink ────────────────────────────────────────────────────────────

/// Forwards scan events to `tracing` at debug level.
#[derive(Debug, Default)]
pub struct TracingSink;

impl TraceSink for TracingSink {
    fn event(&mut self, event: &ScanEvent<'_>) {
        match event {
            ScanEvent::Started { lines } => {
                tracing::debug!(lines = lines.len(), "scanning report");
            }
            ScanEvent::Line { index, line } => {
                tracing::debug!(index, line, "processing line");
            }
            ScanEvent::Parts { index, parts } => {
                tracing::debug!(index, ?parts, "split");
            }
            ScanEvent::Parsed { index, mount, usage } => {
                tracing::debug!(index, mount, %usage, "parsed");
            }
            ScanEvent::Checked { index, checks } => {
                tracing::debug!(index, %checks, "filters");
            }
            ScanEvent::Accepted { index, record } => {
                tracing::debug!(index, %record, "added");
            }
            ScanEvent::Rejected { index, reason } => {
                tracing::debug!(index, %reason, "skipped");
            }
            ScanEvent::Finished { records } => {
                tracing::debug!(count = records.len(), "scan finished");
            }
        }
    }
}
