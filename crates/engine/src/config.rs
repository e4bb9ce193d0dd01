//! Configuration system for the cache simulator.
//!
//! This module defines the configuration structures used to parameterize a run.
//! It provides:
//! 1. **Defaults:** Baseline cache shape and latencies.
//! 2. **Structures:** Cache geometry, timing, and policy sections.
//! 3. **Policy labels:** The replacement, write and allocation policies the engine implements.
//!
//! The CLI builds a `Config` from the trace header. Embedding callers can also
//! deserialize one from JSON with [`Config::from_json`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::common::SimError;

/// Default configuration constants for the simulator.
mod defaults {
    /// Default cache size in bytes (4 KiB).
    pub const CACHE_SIZE: u64 = 4096;

    /// Default cache line size in bytes.
    pub const CACHE_LINE: u64 = 64;

    /// Lines per set. Trace files do not carry this value.
    pub const CACHE_WAYS: u64 = 8;

    /// Cache access time added to a read miss (`tc`).
    pub const CACHE_LATENCY: u64 = 1;

    /// Main memory read time added to a read miss (`trm`).
    pub const MEM_READ_LATENCY: u64 = 60;

    /// Main memory write time charged to every write (`twm`).
    pub const MEM_WRITE_LATENCY: u64 = 60;
}

/// Cache replacement policy.
///
/// Only one policy exists; the label is reported alongside results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReplacementPolicy {
    /// First In First Out: the line loaded earliest is evicted.
    #[default]
    #[serde(alias = "Fifo")]
    Fifo,
}

/// Write coherence policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub enum WritePolicy {
    /// Every write is propagated to main memory immediately.
    #[default]
    #[serde(rename = "WT", alias = "WriteThrough")]
    WriteThrough,
}

/// Allocation policy on write misses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub enum AllocationPolicy {
    /// A write miss does not bring the block into the cache.
    #[default]
    #[serde(rename = "WNA", alias = "WriteNoAllocate")]
    WriteNoAllocate,
}

impl fmt::Display for ReplacementPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fifo => write!(f, "FIFO"),
        }
    }
}

impl fmt::Display for WritePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WriteThrough => write!(f, "WT"),
        }
    }
}

impl fmt::Display for AllocationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WriteNoAllocate => write!(f, "WNA"),
        }
    }
}

/// Root configuration structure containing all simulator settings.
///
/// # Examples
///
/// ```
/// use cachesim_core::config::Config;
///
/// let config = Config::default();
/// assert_eq!(config.cache.ways, 8);
/// assert_eq!(config.policy.replacement.to_string(), "FIFO");
/// ```
///
/// Deserializing from JSON; omitted sections keep their defaults:
///
/// ```
/// use cachesim_core::config::Config;
///
/// let json = r#"{
///     "cache": { "size_bytes": 1024, "line_bytes": 16 },
///     "timing": { "cache_latency": 2, "mem_read_latency": 40, "mem_write_latency": 50 }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.cache.size_bytes, 1024);
/// assert_eq!(config.cache.ways, 8);
/// assert_eq!(config.timing.mem_write_latency, 50);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Cache shape.
    #[serde(default)]
    pub cache: CacheConfig,
    /// Access latencies.
    #[serde(default)]
    pub timing: TimingConfig,
    /// Descriptive policy labels.
    #[serde(default)]
    pub policy: PolicyConfig,
}

impl Config {
    /// Builds a configuration from the five values of a trace header.
    ///
    /// Associativity and policies keep their defaults.
    ///
    /// # Arguments
    ///
    /// * `size_bytes` - Total cache size.
    /// * `line_bytes` - Block (line) size.
    /// * `tc` - Cache access time.
    /// * `trm` - Main memory read time.
    /// * `twm` - Main memory write time.
    pub fn from_header(size_bytes: u64, line_bytes: u64, tc: u64, trm: u64, twm: u64) -> Self {
        Self {
            cache: CacheConfig {
                size_bytes,
                line_bytes,
                ..CacheConfig::default()
            },
            timing: TimingConfig {
                cache_latency: tc,
                mem_read_latency: trm,
                mem_write_latency: twm,
            },
            policy: PolicyConfig::default(),
        }
    }

    /// Deserializes a configuration from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Config`] when the document is not valid JSON or
    /// does not match the configuration layout.
    pub fn from_json(json: &str) -> Result<Self, SimError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Cache geometry parameters.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Total capacity in bytes.
    #[serde(default = "CacheConfig::default_size")]
    pub size_bytes: u64,
    /// Line (block) size in bytes.
    #[serde(default = "CacheConfig::default_line")]
    pub line_bytes: u64,
    /// Associativity (lines per set).
    #[serde(default = "CacheConfig::default_ways")]
    pub ways: u64,
}

impl CacheConfig {
    const fn default_size() -> u64 {
        defaults::CACHE_SIZE
    }

    const fn default_line() -> u64 {
        defaults::CACHE_LINE
    }

    const fn default_ways() -> u64 {
        defaults::CACHE_WAYS
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            size_bytes: defaults::CACHE_SIZE,
            line_bytes: defaults::CACHE_LINE,
            ways: defaults::CACHE_WAYS,
        }
    }
}

/// Access latencies in cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct TimingConfig {
    /// Cache access time (`tc`).
    #[serde(default = "TimingConfig::default_cache_latency")]
    pub cache_latency: u64,
    /// Main memory read time (`trm`).
    #[serde(default = "TimingConfig::default_mem_read_latency")]
    pub mem_read_latency: u64,
    /// Main memory write time (`twm`).
    #[serde(default = "TimingConfig::default_mem_write_latency")]
    pub mem_write_latency: u64,
}

impl TimingConfig {
    const fn default_cache_latency() -> u64 {
        defaults::CACHE_LATENCY
    }

    const fn default_mem_read_latency() -> u64 {
        defaults::MEM_READ_LATENCY
    }

    const fn default_mem_write_latency() -> u64 {
        defaults::MEM_WRITE_LATENCY
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            cache_latency: defaults::CACHE_LATENCY,
            mem_read_latency: defaults::MEM_READ_LATENCY,
            mem_write_latency: defaults::MEM_WRITE_LATENCY,
        }
    }
}

/// Policy labels reported with every snapshot.
///
/// These describe the single policy combination the engine implements; they
/// do not select alternative code paths.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct PolicyConfig {
    /// Replacement policy label.
    #[serde(default)]
    pub replacement: ReplacementPolicy,
    /// Write coherence label.
    #[serde(default)]
    pub write: WritePolicy,
    /// Write-miss allocation label.
    #[serde(default)]
    pub allocation: AllocationPolicy,
}
