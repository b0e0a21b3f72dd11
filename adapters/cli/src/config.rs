//! Run settings assembled from an optional TOML file and command-line flags.

use std::{fs, path::Path};

use anyhow::{Context, Result};

/// Variant simulated when nothing else is requested.
pub(crate) const DEFAULT_VARIANT: &str = "simple";
/// Default grid height.
pub(crate) const DEFAULT_ROWS: u32 = 32;
/// Default grid width.
pub(crate) const DEFAULT_COLUMNS: u32 = 64;
/// Default generation limit.
pub(crate) const DEFAULT_STEPS: u64 = 100;

/// Contents of a run file. Every field is optional.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct RunFile {
    pub(crate) variant: Option<String>,
    pub(crate) rows: Option<u32>,
    pub(crate) columns: Option<u32>,
    pub(crate) seed: Option<u64>,
    pub(crate) steps: Option<u64>,
    pub(crate) render: Option<bool>,
    pub(crate) fingerprint: Option<bool>,
}

impl RunFile {
    /// Reads and parses the run file at `path`.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read run file at {}", path.display()))?;
        Self::parse(&contents)
            .with_context(|| format!("invalid run file at {}", path.display()))
    }

    fn parse(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("failed to parse run file toml contents")
    }

    /// Layers `flags` over the file, falling back to the defaults.
    pub(crate) fn merge(self, flags: RunFile) -> RunSettings {
        RunSettings {
            variant: flags
                .variant
                .or(self.variant)
                .unwrap_or_else(|| DEFAULT_VARIANT.to_owned()),
            rows: flags.rows.or(self.rows).unwrap_or(DEFAULT_ROWS),
            columns: flags.columns.or(self.columns).unwrap_or(DEFAULT_COLUMNS),
            seed: flags.seed.or(self.seed).unwrap_or_default(),
            steps: flags.steps.or(self.steps).unwrap_or(DEFAULT_STEPS),
            render: flags.render.or(self.render).unwrap_or(false),
            fingerprint: flags.fingerprint.or(self.fingerprint).unwrap_or(false),
        }
    }
}

/// Fully resolved parameters of a headless run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct RunSettings {
    pub(crate) variant: String,
    pub(crate) rows: u32,
    pub(crate) columns: u32,
    pub(crate) seed: u64,
    pub(crate) steps: u64,
    pub(crate) render: bool,
    pub(crate) fingerprint: bool,
}
