//! Init command - wires `keygate scan` into the package.json build script.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context as _, bail};
use console::style;

use crate::ui::{colors, format_duration, indicators, print_command_header, print_info};

const SCAN_COMMAND: &str = "keygate scan";

/// Executes the `keygate init` command, prepending the scan to the build
/// script of the package.json in `dir`.
pub fn run(dir: &Path) -> super::Result {
    print_command_header("init");

    let manifest_path = dir.join("package.json");
    if !manifest_path.exists() {
        bail!("no package.json found in {}", dir.display());
    }

    let start = Instant::now();
    let raw = std::fs::read_to_string(&manifest_path)
        .with_context(|| format!("failed to read {}", manifest_path.display()))?;
    let mut manifest: serde_json::Value = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not valid JSON", manifest_path.display()))?;

    match wire_build_script(&mut manifest)? {
        WireOutcome::AlreadyWired => {
            print_info("build script already runs keygate scan");
            return Ok(());
        }
        WireOutcome::Updated(script) => {
            let serialized = serde_json::to_string_pretty(&manifest)?;
            std::fs::write(&manifest_path, format!("{serialized}\n"))
                .with_context(|| format!("failed to write {}", manifest_path.display()))?;
            print_results(&manifest_path, &script, start.elapsed());
        }
    }

    Ok(())
}

enum WireOutcome {
    AlreadyWired,
    Updated(String),
}

/// Prepends the scan to the `build` script, or creates one if absent.
fn wire_build_script(manifest: &mut serde_json::Value) -> anyhow::Result<WireOutcome> {
    let Some(root) = manifest.as_object_mut() else {
        bail!("package.json root must be an object");
    };

    let scripts = root
        .entry("scripts")
        .or_insert_with(|| serde_json::Value::Object(serde_json::Map::new()));
    let Some(scripts) = scripts.as_object_mut() else {
        bail!("package.json \"scripts\" must be an object");
    };

    let updated = match scripts.get("build").and_then(serde_json::Value::as_str) {
        Some(existing) if existing.contains(SCAN_COMMAND) => return Ok(WireOutcome::AlreadyWired),
        Some(existing) => format!("{SCAN_COMMAND} && {existing}"),
        None => SCAN_COMMAND.to_string(),
    };

    scripts.insert("build".to_string(), serde_json::Value::String(updated.clone()));
    Ok(WireOutcome::Updated(updated))
}

fn print_results(manifest_path: &Path, script: &str, elapsed: std::time::Duration) {
    println!(
        "{} {} {}",
        colors::success().apply_to(indicators::SUCCESS),
        style(manifest_path.display()).bold(),
        colors::muted().apply_to(format!("({})", format_duration(elapsed)))
    );
    println!(
        "  {} {}",
        colors::muted().apply_to("build:"),
        colors::secondary().apply_to(script)
    );
    println!();
    print_info("Every production build now scans for exposed secrets first");
}
