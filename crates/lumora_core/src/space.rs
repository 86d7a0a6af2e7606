//! Spaces: the places a check-in can lead to

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpaceKind {
    Music,
    Books,
    Exercise,
    Games,
    Community,
    Voice,
}

impl SpaceKind {
    pub const ALL: [SpaceKind; 6] = [
        SpaceKind::Music,
        SpaceKind::Books,
        SpaceKind::Exercise,
        SpaceKind::Games,
        SpaceKind::Community,
        SpaceKind::Voice,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SpaceKind::Music => "music",
            SpaceKind::Books => "books",
            SpaceKind::Exercise => "exercise",
            SpaceKind::Games => "games",
            SpaceKind::Community => "community",
            SpaceKind::Voice => "voice",
        }
    }

    pub fn space(&self) -> &'static Space {
        // SPACES is declared in the same order as ALL.
        &SPACES[*self as usize]
    }
}

impl fmt::Display for SpaceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SpaceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SpaceKind::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown space '{s}'"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SpaceItem {
    pub id: &'static str,
    pub title: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<&'static str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Space {
    pub kind: SpaceKind,
    pub name: &'static str,
    pub description: &'static str,
    pub items: &'static [SpaceItem],
}

const fn item(id: &'static str, title: &'static str, subtitle: Option<&'static str>) -> SpaceItem {
    SpaceItem {
        id,
        title,
        subtitle,
    }
}

pub const SPACES: [Space; 6] = [
    Space {
        kind: SpaceKind::Music,
        name: "Music",
        description: "Calming sounds to help you relax",
        items: &[
            item("rain", "Gentle Rain", Some("Nature sounds")),
            item("piano", "Soft Piano", Some("Instrumental")),
            item("ocean", "Ocean Waves", Some("Nature sounds")),
            item("forest", "Forest Ambience", Some("Nature sounds")),
        ],
    },
    Space {
        kind: SpaceKind::Books,
        name: "Books",
        description: "Reflective prompts for mindful reading",
        items: &[
            item("gratitude", "What are you grateful for today?", None),
            item("strength", "What strength got you through a hard time?", None),
            item("joy", "Describe a moment of unexpected joy", None),
            item("growth", "How have you grown in the past year?", None),
        ],
    },
    Space {
        kind: SpaceKind::Exercise,
        name: "Exercise",
        description: "Gentle movement for body and mind",
        items: &[
            item("stretch", "2-Minute Desk Stretch", Some("Upper body")),
            item("walk", "Mindful Walk", Some("3 minutes")),
            item("breathe", "Movement + Breath", Some("1 minute")),
            item("shake", "Tension Release", Some("30 seconds")),
        ],
    },
    Space {
        kind: SpaceKind::Games,
        name: "Games",
        description: "Calming puzzles to focus your mind",
        items: &[
            item("2048", "Number Flow", Some("Puzzle")),
            item("memory", "Memory Match", Some("Card game")),
            item("pattern", "Pattern Recall", Some("Memory")),
            item("color", "Color Sort", Some("Sorting")),
        ],
    },
    Space {
        kind: SpaceKind::Community,
        name: "Community",
        description: "You're not alone in this",
        items: &[
            item("today", "Today's Mood Trend", Some("42% feeling hopeful")),
            item("quote", "Community Quote", Some("\"This too shall pass\"")),
            item("milestone", "Collective Milestone", Some("1,000 check-ins today")),
            item("kindness", "Act of Kindness", Some("Share anonymously")),
        ],
    },
    Space {
        kind: SpaceKind::Voice,
        name: "Voice",
        description: "Talk it out",
        items: &[],
    },
];
