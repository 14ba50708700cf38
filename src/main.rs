mod collectors;
mod config;
mod models;
mod scan;
mod trace;
mod ui;
mod util;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use collectors::source::ReportSource;
use config::Config;
use std::io;
use trace::{NullSink, TraceSink, TracingSink, WriterSink};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use ui::palette::{Palette, PaletteVariant};

#[derive(Parser, Debug)]
#[command(
    name = "diskmodel",
    about = "Trace how a mount:usage report becomes the dashboard disk model",
    version
)]
struct Cli {
    /// Read the report from a file ("-" for stdin) instead of the built-in sample
    #[arg(short, long, value_name = "PATH")]
    input: Option<String>,

    /// Report given inline; "\n" separates lines (e.g. "/:7\n/boot:6").
    /// Every backslash-n becomes a line break, so a mount path containing
    /// a literal backslash followed by "n" must be passed via --input instead
    #[arg(long, value_name = "REPORT")]
    text: Option<String>,

    /// Colour palette: mocha, macchiato, frappe, latte [default: from config]
    #[arg(short, long)]
    palette: Option<String>,

    /// Print a one-shot JSON snapshot of the disk model and exit
    #[arg(long)]
    json: bool,

    /// Skip the per-line trace, print only the final result
    #[arg(short, long)]
    quiet: bool,

    /// Do not paint colour swatches in the final result
    #[arg(long)]
    no_color: bool,

    /// Diagnostic log level on stderr (RUST_LOG overrides)
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Print config file path and current values, then exit
    #[arg(long)]
    config: bool,

    /// Print a shell completion script and exit
    #[arg(long, value_enum, value_name = "SHELL")]
    completions: Option<clap_complete::Shell>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(&cli.log_level);

    if let Some(shell) = cli.completions {
        clap_complete::generate(shell, &mut Cli::command(), "diskmodel", &mut io::stdout());
        return Ok(());
    }

    let cfg = Config::load();
    if cli.config {
        run_print_config(&cfg);
        return Ok(());
    }

    let palette_name = cli.palette.as_deref().unwrap_or(&cfg.general.palette);
    if !PaletteVariant::is_known(palette_name) {
        let known: Vec<&str> = PaletteVariant::ALL.iter().map(|v| v.name()).collect();
        tracing::warn!("unknown palette {:?} (known: {}), using mocha", palette_name, known.join(", "));
    }
    let palette = Palette::for_variant(PaletteVariant::from_name(palette_name));
    tracing::debug!(palette = palette.variant.name(), "palette selected");

    let source = ReportSource::from_args(cli.text.as_deref(), cli.input.as_deref());
    let text = source.read()?;

    if cli.json {
        return run_json_snapshot(&text, &cfg, &palette);
    }

    let mut sink: Box<dyn TraceSink> = if cli.quiet {
        Box::new(NullSink)
    } else if cfg.general.trace_to_log {
        Box::new(TracingSink)
    } else {
        Box::new(WriterSink::new(io::stdout().lock()))
    };
    let model = scan::scan(&text, &cfg.filter, &palette, sink.as_mut());
    drop(sink);
    warn_nan_usage(&model);

    let color = cfg.general.color && !cli.no_color && std::env::var_os("NO_COLOR").is_none();
    print!("{}", util::report::summary(&model, color));
    Ok(())
}

fn run_json_snapshot(text: &str, cfg: &Config, palette: &Palette) -> Result<()> {
    let model = scan::scan(text, &cfg.filter, palette, &mut TracingSink);
    warn_nan_usage(&model);
    let snapshot = util::report::snapshot(&model, palette);
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}

fn warn_nan_usage(model: &[models::disk::DiskUsageRecord]) {
    let nan = model.iter().filter(|r| r.usage.is_nan()).count();
    if nan > 0 {
        tracing::warn!("{} disk(s) accepted with a non-numeric usage", nan);
    }
}

fn run_print_config(cfg: &Config) {
    let path = Config::config_path()
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_else(|| "(unknown)".to_string());
    let f = &cfg.filter;
    println!("Config: {}", path);
    println!();
    println!("[general]");
    let palette = Palette::for_variant(PaletteVariant::from_name(&cfg.general.palette));
    println!("  palette      = {} {:?}", cfg.general.palette, palette.colors());
    println!("  color        = {}", cfg.general.color);
    println!("  trace_to_log = {}", cfg.general.trace_to_log);
    println!();
    println!("[filter]");
    println!("  required_prefix     = {:?}", f.required_prefix);
    println!("  excluded_substrings = {:?}", f.excluded_substrings);
    println!("  max_mount_len       = {}", f.max_mount_len);
}

/// Diagnostics go to stderr so they never interleave with the trace on stdout.
fn setup_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let layer = fmt::layer()
        .with_writer(io::stderr)
        .with_target(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn cli_defaults() {
        let cli = Cli::try_parse_from(["diskmodel"]).unwrap();
        assert!(cli.input.is_none() && cli.text.is_none() && cli.palette.is_none());
        assert!(!cli.json && !cli.quiet && !cli.config);
        assert_eq!(cli.log_level, "warn");
    }

    #[test]
    fn cli_parses_report_options() {
        let cli = Cli::try_parse_from([
            "diskmodel", "--input", "-", "-p", "latte", "--json", "--completions", "bash",
        ]).unwrap();
        assert_eq!(cli.input.as_deref(), Some("-"));
        assert_eq!(cli.palette.as_deref(), Some("latte"));
        assert!(cli.json);
        assert_eq!(cli.completions, Some(clap_complete::Shell::Bash));
    }

    #[test]
    fn text_help_mentions_backslash_n_limit() {
        let cmd = Cli::command();
        let arg = cmd.get_arguments().find(|a| a.get_id() == "text").unwrap();
        let help = arg.get_long_help().or(arg.get_help()).unwrap().to_string();
        assert!(help.contains("--input"));
        assert!(help.contains("backslash"));
    }

    #[test]
    fn unknown_shell_is_rejected() {
        assert!(Cli::try_parse_from(["diskmodel", "--completions", "cmd"]).is_err());
    }
}
