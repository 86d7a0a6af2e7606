//! Short guided rituals: breathing, grounding, journaling, movement
//!
//! The breathing timer is driven by explicit one-second ticks so the host
//! owns the actual waiting.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RitualKind {
    Breathing,
    Grounding,
    Journaling,
    Movement,
}

impl RitualKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RitualKind::Breathing => "breathing",
            RitualKind::Grounding => "grounding",
            RitualKind::Journaling => "journaling",
            RitualKind::Movement => "movement",
        }
    }
}

impl fmt::Display for RitualKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RitualKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RITUALS
            .iter()
            .map(|r| r.kind)
            .find(|k| k.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown ritual '{s}'"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Ritual {
    pub kind: RitualKind,
    pub name: &'static str,
    pub duration: &'static str,
    pub description: &'static str,
}

pub const RITUALS: [Ritual; 4] = [
    Ritual {
        kind: RitualKind::Breathing,
        name: "Box Breathing",
        duration: "1-3 min",
        description: "A calming technique used by Navy SEALs. Breathe in, hold, breathe out, hold.",
    },
    Ritual {
        kind: RitualKind::Grounding,
        name: "5-4-3-2-1 Grounding",
        duration: "2-5 min",
        description: "Connect with your senses: 5 things you see, 4 you hear, 3 you touch, 2 you smell, 1 you taste.",
    },
    Ritual {
        kind: RitualKind::Journaling,
        name: "Quick Reflection",
        duration: "3-5 min",
        description: "Write freely about what's on your mind. No judgment, just expression.",
    },
    Ritual {
        kind: RitualKind::Movement,
        name: "Gentle Stretch",
        duration: "2-3 min",
        description: "Simple stretches to release tension in your shoulders, neck, and back.",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GroundingStep {
    pub sense: &'static str,
    pub count: u8,
    pub prompt: &'static str,
}

pub const GROUNDING_STEPS: [GroundingStep; 5] = [
    GroundingStep {
        sense: "See",
        count: 5,
        prompt: "Name 5 things you can see right now",
    },
    GroundingStep {
        sense: "Hear",
        count: 4,
        prompt: "Name 4 things you can hear",
    },
    GroundingStep {
        sense: "Touch",
        count: 3,
        prompt: "Name 3 things you can physically feel",
    },
    GroundingStep {
        sense: "Smell",
        count: 2,
        prompt: "Name 2 things you can smell",
    },
    GroundingStep {
        sense: "Taste",
        count: 1,
        prompt: "Name 1 thing you can taste",
    },
];

pub const MOVEMENT_STEPS: [&str; 4] = [
    "Roll your shoulders slowly backward 5 times",
    "Gently tilt your head to the left, then right",
    "Reach your arms above your head and stretch",
    "Take a deep breath and relax your shoulders",
];

/// One step of the breathing cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BreathPhase {
    Inhale,
    Hold,
    Exhale,
    Rest,
}

impl BreathPhase {
    pub const CYCLE: [BreathPhase; 4] = [
        BreathPhase::Inhale,
        BreathPhase::Hold,
        BreathPhase::Exhale,
        BreathPhase::Rest,
    ];

    pub fn duration_secs(&self) -> u32 {
        match self {
            BreathPhase::Inhale => 4,
            BreathPhase::Hold => 4,
            BreathPhase::Exhale => 6,
            BreathPhase::Rest => 2,
        }
    }

    pub fn instruction(&self) -> &'static str {
        match self {
            BreathPhase::Inhale => "Breathe in...",
            BreathPhase::Hold => "Hold...",
            BreathPhase::Exhale => "Breathe out...",
            BreathPhase::Rest => "Rest...",
        }
    }

    /// Length of a full inhale-hold-exhale-rest cycle
    pub fn cycle_secs() -> u32 {
        Self::CYCLE.iter().map(BreathPhase::duration_secs).sum()
    }

    /// Phase and seconds left in it, `elapsed` seconds into the exercise
    pub fn at(elapsed: u32) -> (BreathPhase, u32) {
        let mut position = elapsed % Self::cycle_secs();
        for phase in Self::CYCLE {
            if position < phase.duration_secs() {
                return (phase, phase.duration_secs() - position);
            }
            position -= phase.duration_secs();
        }
        unreachable!("position is always inside one cycle")
    }
}

/// Snapshot of a breathing exercise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BreathingStep {
    pub phase: BreathPhase,
    pub phase_remaining_secs: u32,
    pub time_left_secs: u32,
}

/// A timed breathing exercise
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreathingSession {
    total_secs: u32,
    elapsed_secs: u32,
}

impl Default for BreathingSession {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SECS)
    }
}

impl BreathingSession {
    pub const DEFAULT_SECS: u32 = 60;

    pub fn new(total_secs: u32) -> Self {
        Self {
            total_secs,
            elapsed_secs: 0,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed_secs >= self.total_secs
    }

    pub fn current(&self) -> BreathingStep {
        let (phase, phase_remaining_secs) = BreathPhase::at(self.elapsed_secs);
        BreathingStep {
            phase,
            phase_remaining_secs,
            time_left_secs: self.total_secs.saturating_sub(self.elapsed_secs),
        }
    }

    /// Advance one second; `None` once the exercise is over
    pub fn tick(&mut self) -> Option<BreathingStep> {
        if self.is_finished() {
            return None;
        }
        self.elapsed_secs += 1;
        (!self.is_finished()).then(|| self.current())
    }
}

/// Render seconds as `m:ss`
pub fn format_clock(secs: u32) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}
