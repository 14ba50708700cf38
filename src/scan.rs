//! Report scanning: turns `mount:usage` lines into the ordered disk model.
//!
//! The scan is a single forward pass. It never fails: empty, malformed and
//! filtered lines are dropped, and the reason is only reported through the
//! [`TraceSink`] handed in by the caller.

use crate::config::FilterRules;
use crate::models::disk::{DiskUsageRecord, Usage};
use crate::trace::{ScanEvent, TraceSink};
use crate::ui::palette::Palette;
use crate::util::text::trim_report;
use std::fmt;
use thiserror::Error;

/// Result of each inclusion predicate for one candidate mount point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterChecks {
    pub prefix:             String,
    pub starts_with_prefix: bool,
    /// (substring, absent) for every excluded substring, in rule order.
    pub excluded:           Vec<(String, bool)>,
    pub max_len:            usize,
    pub length_ok:          bool,
}

impl FilterChecks {
    pub fn evaluate(mount: &str, rules: &FilterRules) -> Self {
        Self {
            prefix:             rules.required_prefix.clone(),
            starts_with_prefix: mount.starts_with(rules.required_prefix.as_str()),
            excluded: rules.excluded_substrings.iter()
                .map(|s| (s.clone(), !mount.contains(s.as_str())))
                .collect(),
            max_len:            rules.max_mount_len,
            // UTF-16 code units, as the widget measures string length
            length_ok:          mount.encode_utf16().count() < rules.max_mount_len,
        }
    }

    pub fn passed(&self) -> bool {
        self.starts_with_prefix && self.length_ok && self.excluded.iter().all(|(_, ok)| *ok)
    }
}

impl fmt::Display for FilterChecks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "startsWith{}={}", self.prefix, self.starts_with_prefix)?;
        for (s, ok) in &self.excluded {
            write!(f, ", !{}={}", s, ok)?;
        }
        write!(f, ", length<{}={}", self.max_len, self.length_ok)
    }
}

/// Why a report line produced no record. Absorbed by the scan, never returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("empty line")]
    EmptyLine,

    #[error("expected 2 colon-separated parts, got {segments}")]
    Malformed { segments: usize },

    #[error("mount point filtered out ({0})")]
    Filtered(FilterChecks),
}

/// Scan a report block into disk records, emitting every step to `sink`.
///
/// At most `palette.len()` lines are inspected; any beyond that are ignored
/// even if they would pass. The colour of a record comes from its raw line
/// index, so skipped lines still advance the palette.
pub fn scan(
    text:    &str,
    rules:   &FilterRules,
    palette: &Palette,
    sink:    &mut dyn TraceSink,
) -> Vec<DiskUsageRecord> {
    let lines: Vec<&str> = trim_report(text).split('\n').collect();
    sink.event(&ScanEvent::Started { lines: &lines });

    let mut model = Vec::new();

    for (index, raw) in lines.iter().enumerate().take(palette.len()) {
        let line = trim_report(raw);
        sink.event(&ScanEvent::Line { index, line });

        if line.is_empty() {
            sink.event(&ScanEvent::Rejected { index, reason: &Rejection::EmptyLine });
            continue;
        }

        let parts: Vec<&str> = line.split(':').collect();
        sink.event(&ScanEvent::Parts { index, parts: &parts });

        if parts.len() != 2 {
            let reason = Rejection::Malformed { segments: parts.len() };
            sink.event(&ScanEvent::Rejected { index, reason: &reason });
            continue;
        }

        let mount = parts[0];
        let usage = Usage::parse_loose(parts[1]);
        sink.event(&ScanEvent::Parsed { index, mount, usage });

        let checks = FilterChecks::evaluate(mount, rules);
        sink.event(&ScanEvent::Checked { index, checks: &checks });

        if checks.passed() {
            let record = DiskUsageRecord {
                mount_point: mount.to_string(),
                usage,
                color: palette.color_for(index).to_string(),
            };
            sink.event(&ScanEvent::Accepted { index, record: &record });
            model.push(record);
        } else {
            let reason = Rejection::Filtered(checks);
            sink.event(&ScanEvent::Rejected { index, reason: &reason });
        }
    }

    sink.event(&ScanEvent::Finished { records: &model });
    model
}
