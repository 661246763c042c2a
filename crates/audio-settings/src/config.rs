//! Capture request loading and defaults.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::codec::AudioCodec;

/// Sample rate requested when the caller does not specify one.
pub const DEFAULT_REQUESTED_SAMPLE_RATE: f64 = 16_000.0;

/// Desired capture configuration, negotiated into [`crate::AudioSettings`].
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SettingsRequest {
    /// Requested sample rate in Hz.
    pub desired_sample_rate: f64,
    /// Requested channel count; `None` uses the input device default.
    pub desired_channels: Option<u16>,
    /// Requested codec.
    pub codec: AudioCodec,
}

impl Default for SettingsRequest {
    fn default() -> Self {
        Self {
            desired_sample_rate: DEFAULT_REQUESTED_SAMPLE_RATE,
            desired_channels: None,
            codec: AudioCodec::default(),
        }
    }
}

impl SettingsRequest {
    /// Load a request from a TOML file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let raw =
            std::fs::read_to_string(path).with_context(|| format!("read config {:?}", path))?;
        Self::from_toml(&raw).with_context(|| format!("parse config {:?}", path))
    }

    pub fn from_toml(raw: &str) -> Result<Self> {
        Ok(toml::from_str::<SettingsRequest>(raw)?)
    }
}
