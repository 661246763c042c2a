//! settings-probe: negotiate audio encoding settings against the host and print them.
//!
//! Resolves the desired capture format against either the selected input device
//! or the device-independent standard format rules, then prints the resulting
//! settings and the encoder key/value view as JSON. `--device-default` skips
//! negotiation and adopts the device's current format directly.

mod cli;

use anyhow::Result;
use audio_settings::device;
use audio_settings::{AudioCapability, AudioSettings, InputDeviceCapability, StandardFormatRules};
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = cli::Args::parse();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("info,settings_probe=info,audio_settings=info")
        }))
        .with_writer(std::io::stderr)
        .init();

    let host = cpal::default_host();
    if args.list_devices {
        device::list_input_devices(&host)?;
        return Ok(());
    }

    if args.device_default {
        let capability = InputDeviceCapability::open(&host, args.device.as_deref())?;
        let settings = AudioSettings::from_format(capability.default_format()?);
        let report = serde_json::json!({
            "settings": settings,
            "output_settings": settings.output_settings(),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let request = args.request()?;
    let capability: Box<dyn AudioCapability> = if args.standard_rules {
        Box::new(StandardFormatRules {
            input_channels: args.input_channels,
            max_channels: args.max_channels,
        })
    } else {
        Box::new(InputDeviceCapability::open(&host, args.device.as_deref())?)
    };

    let (settings, outcome) =
        AudioSettings::negotiate_with_outcome(capability.as_ref(), &request);
    let report = serde_json::json!({
        "negotiation": outcome,
        "settings": settings,
        "output_settings": settings.output_settings(),
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
