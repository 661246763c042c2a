use std::env;
use std::process::Command;

use time::OffsetDateTime;
use time::macros::format_description;

/// Emits `PROBE_VERSION`, e.g. `0.1.0 (a1b2c3d-dirty, 2026-10-17)`.
fn main() {
    println!("cargo:rerun-if-env-changed=SOURCE_DATE_EPOCH");
    println!("cargo:rerun-if-changed=.git/HEAD");

    let version = env::var("CARGO_PKG_VERSION").unwrap_or_default();
    let revision = git_describe().unwrap_or_else(|| "unknown".to_string());
    println!(
        "cargo:rustc-env=PROBE_VERSION={version} ({revision}, {})",
        build_day()
    );
}

fn git_describe() -> Option<String> {
    let out = Command::new("git")
        .args(["describe", "--always", "--dirty", "--abbrev=7"])
        .output()
        .ok()
        .filter(|out| out.status.success())?;
    let described = String::from_utf8(out.stdout).ok()?;
    let described = described.trim();
    (!described.is_empty()).then(|| described.to_string())
}

fn build_day() -> String {
    let now = env::var("SOURCE_DATE_EPOCH")
        .ok()
        .and_then(|v| v.parse::<i64>().ok())
        .and_then(|secs| OffsetDateTime::from_unix_timestamp(secs).ok())
        .unwrap_or_else(OffsetDateTime::now_utc);
    now.format(format_description!("[year]-[month]-[day]"))
        .unwrap_or_else(|_| "unknown-date".to_string())
}
