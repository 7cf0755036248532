//! Scan configuration: TOML file, overridden by CLI flags, over defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use codescan_core::{ConsensusPolicy, PolicyError};
use codescan_frame::Region;

use crate::cli::{PolicyOpts, ScanOpts};
use crate::scan_loop::LoopConfig;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid consensus policy: {0}")]
    Policy(#[from] PolicyError),

    #[error("region {region} lies outside the {width}x{height} surface")]
    RegionOutOfBounds { region: Region, width: u32, height: u32 },
}

/// On-disk config. Every table and key is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub consensus: ConsensusPolicy,
    pub region: Option<Region>,
    pub scan: ScanSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScanSection {
    pub source_cmd: Option<String>,
    pub tesseract_bin: Option<String>,
    pub lang: Option<String>,
    pub psm: Option<u8>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub frame_interval_ms: Option<u64>,
    pub recognize_timeout_ms: Option<u64>,
    pub max_frames: Option<u64>,
    pub clipboard: Option<bool>,
}

impl FileConfig {
    pub fn from_toml(s: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&content, path)?;
        tracing::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Load `path` if given, otherwise defaults.
    pub fn load_optional(path: Option<&Path>) -> Result<Self, ConfigError> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }
}

/// Apply CLI threshold overrides and validate.
pub fn resolve_policy(file: &FileConfig, opts: &PolicyOpts) -> Result<ConsensusPolicy, ConfigError> {
    let policy = ConsensusPolicy {
        min_single: opts.min_single.unwrap_or(file.consensus.min_single),
        saturated: opts.saturated.unwrap_or(file.consensus.saturated),
    };
    policy.validate()?;
    Ok(policy)
}

/// Fully resolved settings for one `scan` invocation.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    pub source_cmd: Option<String>,
    pub source_dir: Option<PathBuf>,
    pub repeat: bool,
    pub tesseract_bin: String,
    pub lang: String,
    pub psm: Option<u8>,
    pub clipboard: bool,
    pub json: bool,
    pub continuous: bool,
    pub loop_config: LoopConfig,
}

impl ScanConfig {
    pub fn resolve(file: &FileConfig, opts: &ScanOpts) -> Result<Self, ConfigError> {
        let defaults = LoopConfig::default();
        let scan = &file.scan;

        let width = opts.width.or(scan.width).unwrap_or(defaults.canvas.0);
        let height = opts.height.or(scan.height).unwrap_or(defaults.canvas.1);
        let region = opts
            .region
            .or(file.region)
            .unwrap_or_else(|| Region::centered(width, height, 300, 200));
        if region.clamp_to(width, height).is_none() {
            return Err(ConfigError::RegionOutOfBounds {
                region,
                width,
                height,
            });
        }

        let loop_config = LoopConfig {
            policy: resolve_policy(file, &opts.policy)?,
            region,
            canvas: (width, height),
            frame_interval: opts
                .frame_interval_ms
                .or(scan.frame_interval_ms)
                .map_or(defaults.frame_interval, Duration::from_millis),
            recognize_timeout: opts
                .recognize_timeout_ms
                .or(scan.recognize_timeout_ms)
                .map(Duration::from_millis),
            max_frames: opts.max_frames.or(scan.max_frames),
            preview: opts.preview.clone(),
        };

        Ok(Self {
            source_cmd: opts.source_cmd.clone().or_else(|| scan.source_cmd.clone()),
            source_dir: opts.source_dir.clone(),
            repeat: opts.repeat,
            tesseract_bin: opts
                .tesseract_bin
                .clone()
                .or_else(|| scan.tesseract_bin.clone())
                .unwrap_or_else(|| "tesseract".to_string()),
            lang: opts
                .lang
                .clone()
                .or_else(|| scan.lang.clone())
                .unwrap_or_else(|| "eng".to_string()),
            psm: opts.psm.or(scan.psm),
            clipboard: !opts.no_clipboard && scan.clipboard.unwrap_or(true),
            continuous: opts.continuous,
            json: opts.json,
            loop_config,
        })
    }
}
