use std::path::PathBuf;

use anyhow::Result;
use audio_settings::capability::MAX_STANDARD_CHANNELS;
use audio_settings::{AudioCodec, SettingsRequest};
use clap::Parser;

const VERSION: &str = env!("PROBE_VERSION");

/// Negotiate audio encoding settings and print them as JSON.
#[derive(Parser, Debug)]
#[command(name = "settings-probe", version = VERSION)]
pub struct Args {
    /// List input devices and exit
    #[arg(long)]
    pub list_devices: bool,

    /// Use a specific input device by substring match
    #[arg(long)]
    pub device: Option<String>,

    /// TOML file with desired_sample_rate / desired_channels / codec
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Desired sample rate in Hz (overrides config)
    #[arg(long)]
    pub sample_rate: Option<f64>,

    /// Desired channel count (overrides config; default: device input channels)
    #[arg(long)]
    pub channels: Option<u16>,

    /// Codec name or four-character code, e.g. aac, flac, lpcm (overrides config)
    #[arg(long)]
    pub codec: Option<AudioCodec>,

    /// Skip negotiation and adopt the input device's current default format
    #[arg(long, conflicts_with = "standard_rules")]
    pub device_default: bool,

    /// Negotiate against device-independent standard format rules instead of a device
    #[arg(long)]
    pub standard_rules: bool,

    /// Widest channel count accepted by --standard-rules
    #[arg(long, default_value_t = MAX_STANDARD_CHANNELS)]
    pub max_channels: u16,

    /// Ambient input channel count reported by --standard-rules
    #[arg(long, default_value_t = 1)]
    pub input_channels: u16,
}

impl Args {
    /// Build the request from the config file (if any), then apply flag overrides.
    pub fn request(&self) -> Result<SettingsRequest> {
        let mut request = match self.config.as_deref() {
            Some(path) => SettingsRequest::load(path)?,
            None => SettingsRequest::default(),
        };
        if let Some(rate) = self.sample_rate {
            request.desired_sample_rate = rate;
        }
        if let Some(channels) = self.channels {
            request.desired_channels = Some(channels);
        }
        if let Some(codec) = self.codec {
            request.codec = codec;
        }
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_includes_package_version() {
        assert!(VERSION.starts_with(env!("CARGO_PKG_VERSION")));
        assert!(VERSION.ends_with(')'));
    }

    #[test]
    fn request_defaults_without_flags() {
        let args = Args::try_parse_from(["settings-probe"]).unwrap();
        assert_eq!(args.request().unwrap(), SettingsRequest::default());
        assert_eq!(args.max_channels, 2);
        assert!(!args.standard_rules);
    }

    #[test]
    fn device_default_conflicts_with_standard_rules() {
        let parsed =
            Args::try_parse_from(["settings-probe", "--device-default", "--standard-rules"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn flags_override_request_fields() {
        let args = Args::try_parse_from([
            "settings-probe",
            "--sample-rate",
            "48000",
            "--channels",
            "2",
            "--codec",
            "flac",
        ])
        .unwrap();
        let request = args.request().unwrap();
        assert_eq!(request.desired_sample_rate, 48_000.0);
        assert_eq!(request.desired_channels, Some(2));
        assert_eq!(request.codec, AudioCodec::Flac);
    }

    #[test]
    fn unknown_codec_is_rejected() {
        assert!(Args::try_parse_from(["settings-probe", "--codec", "mp3"]).is_err());
    }

    #[test]
    fn flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("request.toml");
        std::fs::write(&path, "desired_sample_rate = 22050.0\ncodec = \"opus\"\n").unwrap();
        let path_arg = path.to_string_lossy().into_owned();
        let args = Args::try_parse_from([
            "settings-probe",
            "--config",
            path_arg.as_str(),
            "--codec",
            "aac",
        ])
        .unwrap();
        let request = args.request().unwrap();
        assert_eq!(request.desired_sample_rate, 22_050.0);
        assert_eq!(request.codec, AudioCodec::Aac);
    }
}
