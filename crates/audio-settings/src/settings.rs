use std::collections::BTreeMap;

use serde::Serialize;

use crate::capability::AudioCapability;
use crate::codec::AudioCodec;
use crate::config::SettingsRequest;
use crate::format::ResolvedFormat;

/// Sample rate used when the requested format is not supported.
pub const DEFAULT_SAMPLE_RATE: f64 = 44_100.0;
/// Channel count used when the requested format is not supported.
pub const DEFAULT_CHANNEL_COUNT: u16 = 1;

/// Output settings key carrying the numeric codec format id.
pub const FORMAT_ID_KEY: &str = "format_id";
/// Output settings key carrying the sample rate in Hz.
pub const SAMPLE_RATE_KEY: &str = "sample_rate";
/// Output settings key carrying the channel count.
pub const CHANNEL_COUNT_KEY: &str = "number_of_channels";

/// Encoder-ready audio settings.
///
/// Every constructor yields a usable value: `sample_rate > 0`,
/// `channel_count >= 1`, and `codec` is a known format. Not `Deserialize`:
/// values only come from the constructors below.
#[derive(Clone, Copy, Debug, Serialize, PartialEq)]
pub struct AudioSettings {
    /// Compression format.
    pub codec: AudioCodec,
    /// Samples per second (Hz).
    pub sample_rate: f64,
    /// Number of interleaved channels.
    pub channel_count: u16,
}

/// Which branch of negotiation produced an [`AudioSettings`].
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Negotiation {
    /// The platform accepted the request (possibly adjusting it).
    Accepted,
    /// The request was unsupported; defaults were used.
    Fallback,
}

/// Value stored under one output settings key.
#[derive(Clone, Copy, Debug, Serialize, PartialEq)]
#[serde(untagged)]
pub enum SettingValue {
    FormatId(u32),
    SampleRate(f64),
    ChannelCount(u16),
}

/// Key/value view handed to an encoder.
pub type OutputSettings = BTreeMap<&'static str, SettingValue>;

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            codec: AudioCodec::default(),
            sample_rate: DEFAULT_SAMPLE_RATE,
            channel_count: DEFAULT_CHANNEL_COUNT,
        }
    }
}

impl From<ResolvedFormat> for AudioSettings {
    fn from(format: ResolvedFormat) -> Self {
        Self::from_format(format)
    }
}

impl AudioSettings {
    /// Adopt an already negotiated hardware format. The codec keeps its default.
    pub fn from_format(format: ResolvedFormat) -> Self {
        Self {
            sample_rate: format.sample_rate(),
            channel_count: format.channels(),
            ..Self::default()
        }
    }

    /// Negotiate `request` against the platform, falling back to
    /// 44.1 kHz mono when the platform rejects it.
    pub fn negotiate<C>(capability: &C, request: &SettingsRequest) -> Self
    where
        C: AudioCapability + ?Sized,
    {
        Self::negotiate_with_outcome(capability, request).0
    }

    /// Same as [`AudioSettings::negotiate`], also reporting which branch was taken.
    pub fn negotiate_with_outcome<C>(
        capability: &C,
        request: &SettingsRequest,
    ) -> (Self, Negotiation)
    where
        C: AudioCapability + ?Sized,
    {
        let channels = request
            .desired_channels
            .unwrap_or_else(|| capability.input_channel_count());
        let codec = request.codec;

        match capability.negotiate_standard_format(request.desired_sample_rate, channels) {
            Some(format) => {
                tracing::info!(
                    sample_rate = request.desired_sample_rate,
                    channels = channels,
                    resolved_sample_rate = format.sample_rate(),
                    resolved_channels = format.channels(),
                    codec = %codec,
                    "using requested audio format"
                );
                let settings = Self {
                    codec,
                    sample_rate: format.sample_rate(),
                    channel_count: format.channels(),
                };
                (settings, Negotiation::Accepted)
            }
            None => {
                tracing::info!(
                    sample_rate = request.desired_sample_rate,
                    channels = channels,
                    fallback_sample_rate = DEFAULT_SAMPLE_RATE,
                    fallback_channels = DEFAULT_CHANNEL_COUNT,
                    codec = %codec,
                    "unsupported sample rate/channel combination; falling back to defaults"
                );
                let settings = Self {
                    codec,
                    ..Self::default()
                };
                (settings, Negotiation::Fallback)
            }
        }
    }

    /// Encoder settings keyed by [`FORMAT_ID_KEY`], [`SAMPLE_RATE_KEY`] and
    /// [`CHANNEL_COUNT_KEY`]. Rebuilt from the current fields on each call.
    pub fn output_settings(&self) -> OutputSettings {
        BTreeMap::from([
            (FORMAT_ID_KEY, SettingValue::FormatId(self.codec.format_id())),
            (SAMPLE_RATE_KEY, SettingValue::SampleRate(self.sample_rate)),
            (
                CHANNEL_COUNT_KEY,
                SettingValue::ChannelCount(self.channel_count),
            ),
        ])
    }
}
