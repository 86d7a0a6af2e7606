use lumora_core::crisis::{CrisisResponse, EmergencyResource};
use lumora_core::{CompanionResponse, MoodLevel, MoodVerification};
use owo_colors::OwoColorize;

/// Standard output formatting for the CLI
#[derive(Debug, Default, Clone, Copy)]
pub struct Output;

impl Output {
    pub fn new() -> Self {
        Self
    }

    /// Print a companion reply, set apart from the rest of the output
    pub fn companion_message(&self, response: &CompanionResponse) {
        println!();
        println!("{} {}", "Lumora".bright_magenta().bold(), "says:".dimmed());
        println!();
        println!("  {}", response.message);
        println!();
        self.kv("Suggested space", response.suggested_space.space().name);
        if let Some(ritual) = response.ritual {
            self.kv("Try a ritual", ritual.as_str());
        }
    }

    /// Print the fixed crisis text and every emergency resource
    pub fn crisis(&self, response: &CrisisResponse) {
        println!();
        println!("{}", "You don't have to go through this alone".bright_red().bold());
        println!("{}", "─".repeat(40).dimmed());
        for line in response.message.lines() {
            println!("  {}", line);
        }
        println!();
        for resource in lumora_core::crisis::EMERGENCY_RESOURCES {
            self.resource(resource);
        }
    }

    pub fn resource(&self, resource: &EmergencyResource) {
        println!(
            "  {} {}",
            format!("[{}]", resource.region).bright_yellow(),
            resource.name.bold()
        );
        if let Some(phone) = resource.phone {
            self.kv("    Call", phone);
        }
        if let Some(text) = resource.text {
            self.kv("    Text", text);
        }
        if let Some(website) = resource.website {
            self.kv("    Web", website);
        }
    }

    /// Print a system/status message (indented)
    pub fn status(&self, message: &str) {
        println!("  {}", message.dimmed());
    }

    /// Print an info message (indented)
    pub fn info(&self, label: &str, value: &str) {
        println!("  {} {}", label.bright_blue(), value);
    }

    /// Print a success message (indented)
    pub fn success(&self, message: &str) {
        println!("  {} {}", "✓".bright_green(), message);
    }

    /// Print a warning message (indented)
    pub fn warning(&self, message: &str) {
        println!("  {} {}", "⚠".yellow(), message);
    }

    /// Print a section header
    pub fn section(&self, title: &str) {
        println!();
        println!("{}", title.bright_cyan().bold());
        println!("{}", "─".repeat(40).dimmed());
    }

    /// Print a list item (already indented)
    pub fn list_item(&self, item: &str) {
        println!("    • {}", item);
    }

    /// Print a key-value pair (indented)
    pub fn kv(&self, key: &str, value: &str) {
        println!("  {} {}", format!("{}:", key).dimmed(), value);
    }
}

/// Format a mood level for display
pub fn format_mood(mood: MoodLevel) -> String {
    match mood {
        MoodLevel::Great => mood.label().bright_green().to_string(),
        MoodLevel::Good => mood.label().green().to_string(),
        MoodLevel::Okay => mood.label().bright_white().to_string(),
        MoodLevel::Low => mood.label().yellow().to_string(),
        MoodLevel::Struggling => mood.label().bright_red().to_string(),
    }
}

/// Format a verification verdict for display
pub fn format_verification(verification: MoodVerification) -> String {
    match verification {
        MoodVerification::Confirmed => "confirmed".bright_green().to_string(),
        MoodVerification::Uncertain => "uncertain".dimmed().to_string(),
        MoodVerification::Mismatch => "mismatch".bright_yellow().to_string(),
    }
}
