use std::path::Path;

use anyhow::Context;
use serde::Deserialize;
use sweeper_core::{Coord, DEFAULT_DENSITY, DEFAULT_DIMENSION, GameConfig, Limits, MAX_DIMENSION};

/// Optional settings file, every key may be left out.
///
/// ```toml
/// max_dimension = 15
/// width = 9
/// height = 9
/// density = 0.12
/// ```
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct FileConfig {
    pub max_dimension: Option<Coord>,
    pub width: Option<i64>,
    pub height: Option<i64>,
    pub density: Option<f64>,
}

impl FileConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Could not read config file {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn parse(text: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(text)?)
    }
}

/// Values given on the command line, these win over the file.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct Overrides {
    pub width: Option<i64>,
    pub height: Option<i64>,
    pub density: Option<f64>,
}

/// Fully resolved settings for a session.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct Settings {
    pub limits: Limits,
    pub game: GameConfig,
}

impl Settings {
    pub fn resolve(file: FileConfig, overrides: Overrides) -> Self {
        let limits = Limits::new(file.max_dimension.unwrap_or(MAX_DIMENSION));

        let width = overrides.width.or(file.width);
        let height = overrides.height.or(file.height);
        let density = overrides.density.or(file.density);

        Self {
            limits,
            game: GameConfig::new(
                sanitize_dimension("width", width, &limits),
                sanitize_dimension("height", height, &limits),
                sanitize_density(density),
            ),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::resolve(FileConfig::default(), Overrides::default())
    }
}

/// Out-of-range sizes fall back to the default instead of failing.
fn sanitize_dimension(name: &str, value: Option<i64>, limits: &Limits) -> Coord {
    let fallback = DEFAULT_DIMENSION.min(limits.max_dimension).max(1);
    let Some(value) = value else {
        return fallback;
    };

    match Coord::try_from(value) {
        Ok(dimension) if limits.accepts(dimension) => dimension,
        _ => {
            log::warn!(
                "{} {} outside 1..={}, using {}",
                name,
                value,
                limits.max_dimension,
                fallback
            );
            fallback
        }
    }
}

fn sanitize_density(value: Option<f64>) -> f64 {
    match value {
        None => DEFAULT_DENSITY,
        Some(density) if density > 0.0 && density < 1.0 => density,
        Some(density) => {
            log::warn!("density {} outside (0, 1), using {}", density, DEFAULT_DENSITY);
            DEFAULT_DENSITY
        }
    }
}
