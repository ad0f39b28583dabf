mod bootstrap;

use acmi_core::formatting;
use acmi_core::settings::Settings;
use acmi_data::analysis::analyze_recording;
use anyhow::{Context, Result};

fn main() -> Result<()> {
    let settings = Settings::load();

    bootstrap::setup_logging(&settings.log_level)?;

    tracing::info!("acmi-stats v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Recording: {}, format: {}",
        settings.recording.display(),
        settings.format
    );

    let result = analyze_recording(&settings.recording)
        .with_context(|| format!("Could not process {}", settings.recording.display()))?;

    let meta = &result.metadata;
    tracing::info!(
        "Parsed {} lines ({} skipped) in {:.3}s: {} objects, {} of {} events applied",
        meta.counts.lines_read,
        meta.counts.lines_skipped,
        meta.parse_time_seconds,
        meta.objects_tracked,
        meta.counts.events_applied,
        meta.counts.event_lines,
    );
    if let Some(member) = &meta.archive_member {
        tracing::info!("Read archive member {}", member);
    }

    let output = if settings.wants_json() {
        let mut json = formatting::format_json(&result)?;
        json.push('\n');
        json
    } else {
        formatting::format_report(&result.stats)
    };
    print!("{}", output);

    Ok(())
}
