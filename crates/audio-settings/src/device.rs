//! Input device discovery and format negotiation.
//!
//! Thin wrappers around CPAL for:
//! - listing available input devices
//! - selecting either the default device or a device by substring match
//! - answering [`AudioCapability`] queries from the device's supported configs

use anyhow::{Context, Result, anyhow};
use cpal::traits::{DeviceTrait, HostTrait};

use crate::capability::AudioCapability;
use crate::format::ResolvedFormat;

/// Pick the first input device matching `needle` (case-insensitive), or the
/// host default input device.
///
/// Returns an error if no suitable device is found.
pub fn pick_input_device(host: &cpal::Host, needle: Option<&str>) -> Result<cpal::Device> {
    if let Some(needle) = needle {
        let mut devices = host.input_devices().context("No input devices")?;
        return devices
            .find(|d| {
                d.description()
                    .ok()
                    .map(|n| matches_device_name(&n.name(), needle))
                    .unwrap_or(false)
            })
            .ok_or_else(|| anyhow!("No input device matched: {needle}"));
    }

    host.default_input_device()
        .ok_or_else(|| anyhow!("No default input device"))
}

/// Print available input devices to stdout.
///
/// This is intended for CLI UX (`--list-devices`) rather than structured output.
pub fn list_input_devices(host: &cpal::Host) -> Result<()> {
    let devices = host.input_devices().context("No input devices")?;
    for (i, d) in devices.enumerate() {
        println!("#{i}: {}", d.description()?);
    }
    Ok(())
}

/// One supported input config range, reduced to what negotiation needs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct InputRange {
    pub(crate) min_rate: u32,
    pub(crate) max_rate: u32,
    pub(crate) channels: u16,
}

impl From<&cpal::SupportedStreamConfigRange> for InputRange {
    fn from(range: &cpal::SupportedStreamConfigRange) -> Self {
        Self {
            min_rate: range.min_sample_rate(),
            max_rate: range.max_sample_rate(),
            channels: range.channels(),
        }
    }
}

/// [`AudioCapability`] backed by a CPAL input device.
pub struct InputDeviceCapability {
    device: cpal::Device,
    name: String,
}

impl InputDeviceCapability {
    /// Open the default input device, or the first one matching `needle`.
    pub fn open(host: &cpal::Host, needle: Option<&str>) -> Result<Self> {
        let device = pick_input_device(host, needle)?;
        Self::new(device)
    }

    pub fn new(device: cpal::Device) -> Result<Self> {
        let name = device
            .description()
            .context("read input device description")?
            .to_string();
        tracing::info!(device = %name, "input device");
        Ok(Self { device, name })
    }

    /// The device's current default input format, already accepted by the host.
    pub fn default_format(&self) -> Result<ResolvedFormat> {
        let config = self
            .device
            .default_input_config()
            .with_context(|| format!("default input config for {}", self.name))?;
        ResolvedFormat::try_from(&config)
    }

    fn input_ranges(&self) -> Result<Vec<InputRange>> {
        let ranges = self
            .device
            .supported_input_configs()
            .with_context(|| format!("query input configs for {}", self.name))?;
        Ok(ranges.map(|r| InputRange::from(&r)).collect())
    }
}

impl AudioCapability for InputDeviceCapability {
    fn input_channel_count(&self) -> u16 {
        match self.device.default_input_config() {
            Ok(config) => config.channels(),
            Err(e) => {
                tracing::warn!(
                    device = %self.name,
                    error = %e,
                    "default input config unavailable; assuming mono"
                );
                1
            }
        }
    }

    fn negotiate_standard_format(
        &self,
        sample_rate: f64,
        channels: u16,
    ) -> Option<ResolvedFormat> {
        let ranges = match self.input_ranges() {
            Ok(ranges) => ranges,
            Err(e) => {
                tracing::warn!(device = %self.name, "input config query failed: {e:#}");
                return None;
            }
        };
        negotiate_from_ranges(&ranges, sample_rate, channels)
    }
}

/// Match a request against supported input ranges.
///
/// The rate is rounded to whole Hz. A range matches when it has exactly the
/// requested channel count and its rate range contains the rounded rate.
/// Sample format is left to the capture stream.
pub(crate) fn negotiate_from_ranges(
    ranges: &[InputRange],
    sample_rate: f64,
    channels: u16,
) -> Option<ResolvedFormat> {
    let rate = whole_hz(sample_rate)?;
    ranges
        .iter()
        .find(|r| r.channels == channels && r.min_rate <= rate && rate <= r.max_rate)
        .and_then(|r| ResolvedFormat::new(f64::from(rate), r.channels))
}

fn whole_hz(sample_rate: f64) -> Option<u32> {
    if !sample_rate.is_finite() || sample_rate < 0.5 || sample_rate > f64::from(u32::MAX) {
        return None;
    }
    Some(sample_rate.round() as u32)
}

fn matches_device_name(name: &str, needle: &str) -> bool {
    let needle = needle.trim();
    if needle.is_empty() {
        return false;
    }
    name.to_lowercase().contains(&needle.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(min_rate: u32, max_rate: u32, channels: u16) -> InputRange {
        InputRange {
            min_rate,
            max_rate,
            channels,
        }
    }

    #[test]
    fn matches_device_name_is_case_insensitive() {
        assert!(matches_device_name("USB Microphone", "mic"));
        assert!(matches_device_name("usb microphone", "USB"));
        assert!(!matches_device_name("USB Microphone", "speaker"));
        assert!(!matches_device_name("USB Microphone", "  "));
    }

    #[test]
    fn negotiate_accepts_rate_inside_range() {
        let ranges = [range(8_000, 48_000, 1)];
        let format = negotiate_from_ranges(&ranges, 16_000.0, 1).unwrap();
        assert_eq!(format.sample_rate(), 16_000.0);
        assert_eq!(format.channels(), 1);
    }

    #[test]
    fn negotiate_rounds_fractional_rates() {
        let ranges = [range(44_100, 44_100, 2)];
        let format = negotiate_from_ranges(&ranges, 44_099.6, 2).unwrap();
        assert_eq!(format.sample_rate(), 44_100.0);
    }

    #[test]
    fn negotiate_rejects_rate_outside_range() {
        let ranges = [range(44_100, 48_000, 1)];
        assert!(negotiate_from_ranges(&ranges, 16_000.0, 1).is_none());
        assert!(negotiate_from_ranges(&ranges, 96_000.0, 1).is_none());
    }

    #[test]
    fn negotiate_requires_exact_channel_count() {
        let ranges = [range(8_000, 48_000, 2)];
        assert!(negotiate_from_ranges(&ranges, 16_000.0, 1).is_none());
        assert!(negotiate_from_ranges(&ranges, 16_000.0, 2).is_some());
    }

    #[test]
    fn negotiate_rejects_invalid_requests() {
        let ranges = [range(1, 192_000, 1)];
        assert!(negotiate_from_ranges(&ranges, 0.0, 1).is_none());
        assert!(negotiate_from_ranges(&ranges, f64::NAN, 1).is_none());
        assert!(negotiate_from_ranges(&ranges, 16_000.0, 0).is_none());
        assert!(negotiate_from_ranges(&[], 16_000.0, 1).is_none());
    }

    #[test]
    fn negotiate_result_does_not_depend_on_range_order() {
        let ranges = [range(8_000, 48_000, 1), range(8_000, 48_000, 1)];
        let first = negotiate_from_ranges(&ranges, 16_000.0, 1);
        let reversed = negotiate_from_ranges(&[ranges[1], ranges[0]], 16_000.0, 1);
        assert_eq!(first, reversed);
        assert_eq!(first, ResolvedFormat::new(16_000.0, 1));
    }

    #[test]
    fn negotiate_skips_ranges_with_other_channel_counts() {
        let ranges = [range(8_000, 48_000, 2), range(44_100, 48_000, 1)];
        assert!(negotiate_from_ranges(&ranges, 16_000.0, 1).is_none());
        let format = negotiate_from_ranges(&ranges, 16_000.0, 2).unwrap();
        assert_eq!(format.channels(), 2);
    }
}
