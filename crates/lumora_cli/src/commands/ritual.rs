use std::time::Duration;

use lumora_core::LumoraConfig;
use lumora_core::ritual::{
    BreathPhase, BreathingSession, GROUNDING_STEPS, MOVEMENT_STEPS, RITUALS, format_clock,
};
use miette::Result;
use owo_colors::OwoColorize;

use crate::output::Output;

/// List the ritual catalog, marking the user's preferred ones
pub async fn list(config: &LumoraConfig) -> Result<()> {
    let output = Output::new();
    output.section("Rituals");

    for ritual in RITUALS {
        let marker = if config.user.preferred_rituals.contains(&ritual.kind) {
            "★".bright_yellow().to_string()
        } else {
            " ".to_string()
        };
        println!(
            "  {} {} {}",
            marker,
            ritual.name.bold(),
            format!("({}, {})", ritual.kind, ritual.duration).dimmed()
        );
        println!("      {}", ritual.description);
    }

    Ok(())
}

/// Guided box breathing, one line per phase change
pub async fn breathe(total_secs: u32) -> Result<()> {
    let output = Output::new();
    output.section("Box Breathing");
    output.status("Follow along. Press Ctrl-C to stop at any time.");
    println!();

    let mut session = BreathingSession::new(total_secs);
    let mut interval = tokio::time::interval(Duration::from_secs(1));
    interval.tick().await;

    let mut last_phase: Option<BreathPhase> = None;
    let mut step = Some(session.current());
    while let Some(current) = step {
        if last_phase != Some(current.phase) {
            println!(
                "  {} {}",
                format_clock(current.time_left_secs).dimmed(),
                current.phase.instruction().bright_cyan()
            );
            last_phase = Some(current.phase);
        }
        interval.tick().await;
        step = session.tick();
    }

    println!();
    output.success("Nicely done. Notice how you feel now.");
    Ok(())
}

/// Walk through 5-4-3-2-1 grounding
pub async fn ground() -> Result<()> {
    let output = Output::new();
    output.section("5-4-3-2-1 Grounding");

    for step in GROUNDING_STEPS {
        output.info(&format!("{} ({})", step.sense, step.count), step.prompt);
    }
    println!();
    output.status("Take your time with each one.");

    Ok(())
}

/// Print the gentle stretch sequence
pub async fn movement() -> Result<()> {
    let output = Output::new();
    output.section("Gentle Stretch");

    for (i, step) in MOVEMENT_STEPS.iter().enumerate() {
        output.info(&format!("{}.", i + 1), step);
    }

    Ok(())
}
