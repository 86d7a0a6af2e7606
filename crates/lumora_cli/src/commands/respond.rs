use chrono::Timelike;
use lumora_core::response::{NOT_A_THERAPIST_DISCLAIMER, greeting_for_hour};
use lumora_core::{CRISIS_RESPONSE, MoodLevel};
use miette::Result;

use super::Companion;
use crate::output::Output;

/// Compose a reply without recording anything
pub async fn run(companion: &mut Companion, mood: MoodLevel, context: Option<&str>) -> Result<()> {
    let output = Output::new();

    if let Some(context) = context {
        if companion.session.check_text(context) {
            output.crisis(&CRISIS_RESPONSE);
            return Ok(());
        }
    }
    if companion.session.crisis_state().is_active {
        // Generated replies stay off while a crisis notice is up
        output.crisis(&CRISIS_RESPONSE);
        return Ok(());
    }

    let greeting = greeting_for_hour(chrono::Local::now().hour());
    output.status(&format!("{}.", greeting));

    let response = companion.session.respond(mood, context);
    output.companion_message(&response);
    println!();
    output.status(NOT_A_THERAPIST_DISCLAIMER);

    Ok(())
}
