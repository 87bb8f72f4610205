use crate::error::{Error, Result};
use log::{info, warn};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CAPACITY: usize = 4096;
pub const DEFAULT_CHUNK: usize = 512;

/// Chunks smaller than this make the pump syscall-bound.
const SMALL_CHUNK: usize = 64;

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub buffer: BufferConfig,
    #[serde(default)]
    pub io: IoConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct BufferConfig {
    #[serde(default = "default_capacity")]
    pub capacity: usize,
    #[serde(default = "default_chunk")]
    pub chunk: usize,
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            chunk: DEFAULT_CHUNK,
        }
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct IoConfig {
    #[serde(default)]
    pub input: Option<PathBuf>,
    #[serde(default)]
    pub output: Option<PathBuf>,
}

fn default_capacity() -> usize {
    DEFAULT_CAPACITY
}

fn default_chunk() -> usize {
    DEFAULT_CHUNK
}

/// Values given on the command line; each one wins over the file.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub capacity: Option<usize>,
    pub chunk: Option<usize>,
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
}

/// Validated settings for one pump run. `None` paths mean stdin/stdout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PumpConfig {
    pub capacity: usize,
    pub chunk: usize,
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
}

pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Err(Error::Config(format!("config file not found: {}", path.display())));
    }

    let content = fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("failed to read config file {}: {}", path.display(), e)))?;
    let cfg = parse_config(&content)
        .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;

    info!("Config loaded from: {}", path.display());
    Ok(cfg)
}

pub fn parse_config(content: &str) -> Result<Config> {
    toml::from_str(content).map_err(|e| Error::Config(format!("failed to parse TOML: {}", e)))
}

impl Config {
    pub fn resolve(self, overrides: Overrides) -> Result<PumpConfig> {
        let capacity = overrides.capacity.unwrap_or(self.buffer.capacity);
        let chunk = overrides.chunk.unwrap_or(self.buffer.chunk);

        if capacity == 0 {
            return Err(Error::Config("capacity must be greater than zero".into()));
        }
        if chunk == 0 || chunk > capacity {
            return Err(Error::Config(format!(
                "chunk must be between 1 and the capacity ({}), got {}",
                capacity, chunk
            )));
        }
        if chunk < SMALL_CHUNK {
            warn!("Chunk size {} is small - expect one syscall per {} bytes", chunk, chunk);
        }

        let cfg = PumpConfig {
            capacity,
            chunk,
            input: overrides.input.or(self.io.input),
            output: overrides.output.or(self.io.output),
        };
        info!(
            "Pump capacity {} bytes, chunk {} bytes, input {}, output {}",
            cfg.capacity,
            cfg.chunk,
            describe(cfg.input.as_deref(), "stdin"),
            describe(cfg.output.as_deref(), "stdout"),
        );
        Ok(cfg)
    }
}

fn describe(path: Option<&Path>, fallback: &str) -> String {
    path.map_or_else(|| fallback.to_string(), |p| p.display().to_string())
}
