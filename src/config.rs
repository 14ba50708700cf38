use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub filter: FilterRules,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Palette name: mocha, macchiato, frappe, latte
    pub palette: String,
    /// Paint colour swatches in the summary block (NO_COLOR always wins).
    pub color: bool,
    /// Route per-line scan events to the log (stderr) instead of stdout.
    pub trace_to_log: bool,
}

/// Inclusion rules a mount point must satisfy to enter the disk model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterRules {
    /// Mount point must start with this.
    pub required_prefix: String,
    /// Mount point must not contain any of these anywhere.
    pub excluded_substrings: Vec<String>,
    /// Mount point length in characters must be strictly below this.
    pub max_mount_len: usize,
}

// ── Defaults ─────────────────────────────────────────────────────────

impl Default for GeneralConfig {
    fn default() -> Self {
        Self { palette: "mocha".into(), color: true, trace_to_log: false }
    }
}

impl Default for FilterRules {
    fn default() -> Self {
        Self {
            required_prefix:     "/".into(),
            excluded_substrings: vec!["snap".into(), "loop".into()],
            max_mount_len:       20,
        }
    }
}

// ── Load / Save ───────────────────────────────────────────────────────

impl Config {
    pub fn load() -> Self {
        let Some(path) = Config::config_path() else {
            tracing::debug!("no config dir, using defaults");
            return Config::default();
        };
        match Config::load_from(&path) {
            Ok(c)  => c,
            Err(e) => {
                tracing::debug!("config not loaded ({:#}), using defaults", e);
                // Write defaults on first run (best-effort)
                if !path.exists() {
                    if let Err(e) = write_defaults(&path) {
                        tracing::warn!("could not write default config: {:#}", e);
                    }
                }
                Config::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let cfg: Config = toml::from_str(&text)
            .with_context(|| format!("parsing {}", path.display()))?;
        Ok(cfg)
    }

    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("diskmodel").join("diskmodel.toml"))
    }
}

pub fn write_defaults(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let text = toml::to_string_pretty(&Config::default())?;
    fs::write(path, format!("# diskmodel configuration\n# Generated on first run, edit freely\n\n{}", text))?;
    Ok(())
}
