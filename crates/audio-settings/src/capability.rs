//! Host audio capability used to negotiate encoding settings.
//!
//! The platform is passed in explicitly instead of being read from global
//! state, so settings can be negotiated against a real input device
//! ([`crate::device::InputDeviceCapability`]), against the pure
//! [`StandardFormatRules`], or against a fake in tests.

use crate::format::ResolvedFormat;

/// Audio format queries answered by the host platform.
pub trait AudioCapability {
    /// Default number of input channels on the active input device.
    fn input_channel_count(&self) -> u16;

    /// Return the platform-accepted (possibly adjusted) format for the request,
    /// or `None` when the combination is not realizable.
    fn negotiate_standard_format(&self, sample_rate: f64, channels: u16)
    -> Option<ResolvedFormat>;
}

impl<T: AudioCapability + ?Sized> AudioCapability for &T {
    fn input_channel_count(&self) -> u16 {
        (**self).input_channel_count()
    }

    fn negotiate_standard_format(
        &self,
        sample_rate: f64,
        channels: u16,
    ) -> Option<ResolvedFormat> {
        (**self).negotiate_standard_format(sample_rate, channels)
    }
}

impl<T: AudioCapability + ?Sized> AudioCapability for Box<T> {
    fn input_channel_count(&self) -> u16 {
        (**self).input_channel_count()
    }

    fn negotiate_standard_format(
        &self,
        sample_rate: f64,
        channels: u16,
    ) -> Option<ResolvedFormat> {
        (**self).negotiate_standard_format(sample_rate, channels)
    }
}

/// Widest standard format without an explicit channel layout.
pub const MAX_STANDARD_CHANNELS: u16 = 2;

/// Device-independent rules for the platform's standard (deinterleaved float)
/// format.
///
/// Any finite positive rate is accepted as-is; channel counts above
/// `max_channels` are rejected.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StandardFormatRules {
    /// Channel count reported as the ambient input channel count.
    pub input_channels: u16,
    /// Largest channel count accepted.
    pub max_channels: u16,
}

impl Default for StandardFormatRules {
    fn default() -> Self {
        Self {
            input_channels: 1,
            max_channels: MAX_STANDARD_CHANNELS,
        }
    }
}

impl AudioCapability for StandardFormatRules {
    fn input_channel_count(&self) -> u16 {
        self.input_channels
    }

    fn negotiate_standard_format(
        &self,
        sample_rate: f64,
        channels: u16,
    ) -> Option<ResolvedFormat> {
        if channels > self.max_channels {
            return None;
        }
        ResolvedFormat::new(sample_rate, channels)
    }
}
