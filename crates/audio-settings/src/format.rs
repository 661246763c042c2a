/// Sample rate and channel count confirmed realizable by the audio platform.
///
/// The platform may adjust the originally requested values, so a resolved
/// format is what callers should adopt rather than their own request.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedFormat {
    sample_rate: f64,
    channels: u16,
}

impl ResolvedFormat {
    /// Returns `None` unless `sample_rate` is finite and positive and
    /// `channels` is at least one.
    pub fn new(sample_rate: f64, channels: u16) -> Option<Self> {
        if !sample_rate.is_finite() || sample_rate <= 0.0 || channels == 0 {
            return None;
        }
        Some(Self {
            sample_rate,
            channels,
        })
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    pub fn channels(&self) -> u16 {
        self.channels
    }
}

impl TryFrom<&cpal::SupportedStreamConfig> for ResolvedFormat {
    type Error = anyhow::Error;

    fn try_from(config: &cpal::SupportedStreamConfig) -> anyhow::Result<Self> {
        let sample_rate = config.sample_rate();
        ResolvedFormat::new(f64::from(sample_rate), config.channels()).ok_or_else(|| {
            anyhow::anyhow!(
                "invalid stream config: {sample_rate} Hz / {} ch",
                config.channels()
            )
        })
    }
}
