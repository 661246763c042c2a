//! Audio encoding settings negotiated against the host audio platform.
//!
//! [`AudioSettings`] turns a capture intent (sample rate, channel count, codec)
//! into a configuration the platform accepts. Unsupported requests fall back to
//! 44.1 kHz mono instead of failing.

pub mod capability;
pub mod codec;
pub mod config;
pub mod device;
pub mod format;
pub mod settings;

pub use capability::{AudioCapability, StandardFormatRules};
pub use codec::AudioCodec;
pub use config::SettingsRequest;
pub use device::InputDeviceCapability;
pub use format::ResolvedFormat;
pub use settings::{AudioSettings, Negotiation, OutputSettings, SettingValue};
