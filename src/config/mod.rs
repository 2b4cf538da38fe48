//! Layered configuration: embedded defaults, an optional TOML file, then
//! `PRIMEHERD_` environment variables. Command-line flags override the
//! merged result at the call sites that consume it.

use anyhow::{Context, Result};
use figment::{
    Figment,
    providers::{Env, Format, Toml},
};
use serde::Deserialize;
use std::path::PathBuf;

use crate::engine::Engine;
use crate::engine::threads::ThreadConfig;

// Embed the default config at compile time
const DEFAULT_CONFIG: &str = include_str!("../../default-config.toml");

/// Fully merged runtime settings.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub run: RunSettings,
    pub threads: ThreadSettings,
    pub cluster: ClusterSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RunSettings {
    /// Where the retained primes are written.
    pub output: PathBuf,
    /// Engine used when the command line does not pick one.
    pub engine: Engine,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ThreadSettings {
    pub max_workers: usize,
    pub thread_percentage: u8,
    pub channel_multiplier: usize,
    pub progress_frequency: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClusterSettings {
    /// Process count, the coordinating rank included.
    pub workers: usize,
}

impl Settings {
    /// Merge embedded defaults, then `primeherd.toml` (or the `--config`
    /// path when given), then `PRIMEHERD_*` environment variables with
    /// nested keys split on `__` (e.g. `PRIMEHERD_RUN__OUTPUT`).
    pub fn load(custom_config: Option<&str>) -> Result<Self> {
        let mut figment = Figment::new().merge(Toml::string(DEFAULT_CONFIG));
        if let Some(path) = custom_config {
            figment = figment.merge(Toml::file(path));
        } else {
            figment = figment.merge(Toml::file("primeherd.toml"));
        }
        figment
            .merge(Env::prefixed("PRIMEHERD_").split("__"))
            .extract()
            .context("invalid configuration")
    }
}

impl From<ThreadSettings> for ThreadConfig {
    fn from(settings: ThreadSettings) -> Self {
        Self {
            max_workers: settings.max_workers,
            thread_percentage: settings.thread_percentage,
            channel_multiplier: settings.channel_multiplier,
            progress_frequency: settings.progress_frequency,
        }
    }
}
