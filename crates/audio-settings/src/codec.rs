use std::fmt;
use std::str::FromStr;

use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};

/// Audio compression format handed to the encoder.
///
/// Every variant maps to a four-character format code understood by the
/// platform encoder, so an arbitrary identifier can never reach it.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AudioCodec {
    /// AAC in an MPEG-4 container.
    #[default]
    Aac,
    /// High-efficiency AAC.
    AacHe,
    /// Apple Lossless.
    AppleLossless,
    Flac,
    Opus,
    /// Uncompressed linear PCM.
    LinearPcm,
    /// G.711 mu-law.
    ULaw,
    /// G.711 A-law.
    ALaw,
}

impl AudioCodec {
    pub const ALL: [AudioCodec; 8] = [
        AudioCodec::Aac,
        AudioCodec::AacHe,
        AudioCodec::AppleLossless,
        AudioCodec::Flac,
        AudioCodec::Opus,
        AudioCodec::LinearPcm,
        AudioCodec::ULaw,
        AudioCodec::ALaw,
    ];

    /// Four-character format code, space padded.
    pub fn fourcc(self) -> [u8; 4] {
        match self {
            AudioCodec::Aac => *b"aac ",
            AudioCodec::AacHe => *b"aach",
            AudioCodec::AppleLossless => *b"alac",
            AudioCodec::Flac => *b"flac",
            AudioCodec::Opus => *b"opus",
            AudioCodec::LinearPcm => *b"lpcm",
            AudioCodec::ULaw => *b"ulaw",
            AudioCodec::ALaw => *b"alaw",
        }
    }

    /// Numeric format id (big-endian packing of the four-character code).
    pub fn format_id(self) -> u32 {
        u32::from_be_bytes(self.fourcc())
    }

    /// Stable snake_case name used in config files and on the command line.
    pub fn name(self) -> &'static str {
        match self {
            AudioCodec::Aac => "aac",
            AudioCodec::AacHe => "aac_he",
            AudioCodec::AppleLossless => "apple_lossless",
            AudioCodec::Flac => "flac",
            AudioCodec::Opus => "opus",
            AudioCodec::LinearPcm => "linear_pcm",
            AudioCodec::ULaw => "u_law",
            AudioCodec::ALaw => "a_law",
        }
    }
}

impl fmt::Display for AudioCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AudioCodec {
    type Err = anyhow::Error;

    /// Accepts the snake_case name or the trimmed four-character code.
    fn from_str(s: &str) -> Result<Self> {
        let needle = s.trim().to_ascii_lowercase();
        AudioCodec::ALL
            .into_iter()
            .find(|codec| {
                codec.name() == needle
                    || std::str::from_utf8(&codec.fourcc())
                        .map(|code| code.trim_end() == needle)
                        .unwrap_or(false)
            })
            .ok_or_else(|| anyhow!("unknown audio codec: {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_codec_is_aac() {
        assert_eq!(AudioCodec::default(), AudioCodec::Aac);
        assert_eq!(&AudioCodec::Aac.fourcc(), b"aac ");
    }

    #[test]
    fn format_id_packs_fourcc_big_endian() {
        assert_eq!(AudioCodec::Aac.format_id(), 0x6161_6320);
        assert_eq!(AudioCodec::LinearPcm.format_id(), 0x6c70_636d);
    }

    #[test]
    fn from_str_accepts_names_and_codes() {
        assert_eq!("aac".parse::<AudioCodec>().unwrap(), AudioCodec::Aac);
        assert_eq!(" FLAC ".parse::<AudioCodec>().unwrap(), AudioCodec::Flac);
        assert_eq!("alac".parse::<AudioCodec>().unwrap(), AudioCodec::AppleLossless);
        assert_eq!("lpcm".parse::<AudioCodec>().unwrap(), AudioCodec::LinearPcm);
        assert!("mp3".parse::<AudioCodec>().is_err());
    }

    #[test]
    fn display_matches_serde_name() {
        for codec in AudioCodec::ALL {
            let json = serde_json::to_string(&codec).unwrap();
            assert_eq!(json, format!("\"{codec}\""));
            assert_eq!(codec.name().parse::<AudioCodec>().unwrap(), codec);
        }
    }
}
