use anyhow::{Context, Result};
use std::io::Read;
use std::path::PathBuf;

/// Sample `mount:usage` report the dashboard widget was debugged against.
pub const BUILTIN_REPORT: &str = "/:7\n/boot:6";

/// Where the report text comes from. The text itself is passed to the scan
/// as-is; nothing here interprets it.
#[derive(Debug, Clone, PartialEq)]
pub enum ReportSource {
    Builtin,
    Text(String),
    File(PathBuf),
    Stdin,
}

impl ReportSource {
    /// `--text` wins over `--input`; `-` as input means stdin.
    pub fn from_args(text: Option<&str>, input: Option<&str>) -> Self {
        match (text, input) {
            (Some(t), _)    => ReportSource::Text(unescape_newlines(t)),
            (None, Some("-")) => ReportSource::Stdin,
            (None, Some(p)) => ReportSource::File(PathBuf::from(p)),
            (None, None)    => ReportSource::Builtin,
        }
    }

    pub fn label(&self) -> String {
        match self {
            ReportSource::Builtin => "builtin".into(),
            ReportSource::Text(_) => "inline text".into(),
            ReportSource::File(p) => p.display().to_string(),
            ReportSource::Stdin   => "stdin".into(),
        }
    }

    pub fn read(&self) -> Result<String> {
        let text = match self {
            ReportSource::Builtin => BUILTIN_REPORT.to_string(),
            ReportSource::Text(t) => t.clone(),
            ReportSource::File(p) => std::fs::read_to_string(p)
                .with_context(|| format!("reading report {}", p.display()))?,
            ReportSource::Stdin => {
                let mut buf = String::new();
                std::io::stdin().read_to_string(&mut buf).context("reading report from stdin")?;
                buf
            }
        };
        tracing::debug!(source = %self.label(), bytes = text.len(), "report loaded");
        Ok(text)
    }
}

/// Turn literal `\n` sequences into newlines so a multi-line report can be
/// passed as one shell argument. There is no escape for a literal `\n`.
fn unescape_newlines(s: &str) -> String {
    s.replace("\\n", "\n")
}
