use lumora_core::{MoodEntry, SafeMoodData};
use miette::{IntoDiagnostic, Result};

use super::Companion;
use crate::output::{Output, format_mood, format_verification};

/// List stored check-ins, newest first
pub async fn list(companion: &Companion, hours: Option<u32>, json: bool) -> Result<()> {
    let entries: Vec<&MoodEntry> = match hours {
        Some(hours) => companion.session.recent_moods(hours),
        None => companion.session.entries().iter().collect(),
    };

    if json {
        // Only the privacy-safe projection leaves the process
        let safe: Vec<SafeMoodData> = entries.iter().map(|e| SafeMoodData::from(*e)).collect();
        println!("{}", serde_json::to_string_pretty(&safe).into_diagnostic()?);
        return Ok(());
    }

    let output = Output::new();
    output.section("Mood history");

    if entries.is_empty() {
        output.status("No check-ins yet.");
        return Ok(());
    }

    for entry in entries.iter().rev() {
        let when = entry
            .timestamp()
            .with_timezone(&chrono::Local)
            .format("%Y-%m-%d %H:%M");
        println!(
            "  {}  {} ({}), {}",
            when,
            format_mood(entry.user_mood()),
            entry.intensity().label(),
            format_verification(entry.verification())
        );
        if let Some(reflection) = entry.reflection() {
            output.list_item(reflection);
        }
    }
    output.status(&format!("{} check-in(s)", entries.len()));

    Ok(())
}

/// Delete all stored check-ins
pub async fn clear(companion: &mut Companion, confirmed: bool) -> Result<()> {
    let output = Output::new();

    if !confirmed {
        output.warning("This deletes every check-in on this device. Re-run with --yes to confirm.");
        return Ok(());
    }

    let count = companion.session.entries().len();
    companion.session.clear_history().await?;
    output.success(&format!("Deleted {} check-in(s)", count));

    Ok(())
}
