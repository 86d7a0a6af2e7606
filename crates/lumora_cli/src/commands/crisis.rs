use lumora_core::CRISIS_RESPONSE;
use lumora_core::crisis::{EMERGENCY_RESOURCES, EmergencyResource};
use miette::{Result, miette};
use owo_colors::OwoColorize;

use super::Companion;
use crate::output::Output;

/// Show whether the crisis flag is up
///
/// The pattern path runs over the stored history first, so sustained sadness
/// logged in earlier runs is picked up here too.
pub async fn status(companion: &mut Companion) -> Result<()> {
    let output = Output::new();
    companion.session.check_mood_pattern();
    let state = *companion.session.crisis_state();

    output.section("Crisis status");
    if !state.is_active {
        output.kv("Active", &"no".bright_green().to_string());
        return Ok(());
    }

    output.kv("Active", &"yes".bright_red().to_string());
    if let Some(trigger) = state.trigger {
        output.kv("Trigger", trigger.to_string().as_str());
    }
    if let Some(at) = state.timestamp {
        output.kv(
            "Since",
            &at.with_timezone(&chrono::Local)
                .format("%Y-%m-%d %H:%M")
                .to_string(),
        );
    }
    output.crisis(&CRISIS_RESPONSE);
    output.status("Run `lumora crisis dismiss` once you're safe.");

    Ok(())
}

/// Clear the crisis flag
pub async fn dismiss(companion: &mut Companion) -> Result<()> {
    let output = Output::new();
    if !companion.session.crisis_state().is_active {
        output.status("No active crisis.");
        return Ok(());
    }

    companion.session.dismiss_crisis();
    output.success("Crisis notice dismissed. Help is always one call away.");
    Ok(())
}

/// List emergency resources, optionally for one region
pub async fn resources(region: Option<&str>) -> Result<()> {
    let output = Output::new();
    output.section("Emergency resources");

    match region {
        Some(region) => {
            let resource = EmergencyResource::for_region(region).ok_or_else(|| {
                miette!(
                    help = "Known regions: US, UK, GLOBAL",
                    "No resources listed for region '{}'",
                    region
                )
            })?;
            output.resource(resource);
        }
        None => {
            for resource in EMERGENCY_RESOURCES {
                output.resource(resource);
            }
        }
    }

    Ok(())
}
