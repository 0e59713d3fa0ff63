//! Technique and prospect rhythm tables
//!
//! Static, process-wide lookup data. Order matters: level generation picks
//! by index, so reordering changes seeded layouts.

use serde::{Deserialize, Serialize};

/// Energy class of a technique (drives presentation only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Energy {
    Calm,
    Neutral,
    Intense,
    Retreat,
    Warm,
    Structured,
    Decisive,
}

/// A collectible technique token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Technique {
    Soft,
    NoSell,
    Hard,
    Walk,
    Emotion,
    Logic,
    Close,
}

/// Catalog row for a technique
#[derive(Debug, Clone, Copy)]
pub struct TechniqueInfo {
    /// 0xRRGGBB
    pub color: u32,
    /// Beat weight; also phases the collectible's vertical placement
    pub weight: f32,
    pub energy: Energy,
    pub icon: &'static str,
}

impl Technique {
    pub const ALL: [Technique; 7] = [
        Technique::Soft,
        Technique::NoSell,
        Technique::Hard,
        Technique::Walk,
        Technique::Emotion,
        Technique::Logic,
        Technique::Close,
    ];

    /// The technique every prospect needs to see before it can be satisfied
    pub const CLOSING: Technique = Technique::Close;

    pub fn info(self) -> TechniqueInfo {
        match self {
            Technique::Soft => TechniqueInfo {
                color: 0x4CAF50,
                weight: 0.5,
                energy: Energy::Calm,
                icon: "🤝",
            },
            Technique::NoSell => TechniqueInfo {
                color: 0x03A9F4,
                weight: 0.3,
                energy: Energy::Neutral,
                icon: "💬",
            },
            Technique::Hard => TechniqueInfo {
                color: 0xF44336,
                weight: 1.2,
                energy: Energy::Intense,
                icon: "⚡",
            },
            Technique::Walk => TechniqueInfo {
                color: 0x9E9E9E,
                weight: 0.1,
                energy: Energy::Retreat,
                icon: "🚶",
            },
            Technique::Emotion => TechniqueInfo {
                color: 0xE91E63,
                weight: 0.8,
                energy: Energy::Warm,
                icon: "❤️",
            },
            Technique::Logic => TechniqueInfo {
                color: 0x9C27B0,
                weight: 0.7,
                energy: Energy::Structured,
                icon: "🧠",
            },
            Technique::Close => TechniqueInfo {
                color: 0xFF9800,
                weight: 1.0,
                energy: Energy::Decisive,
                icon: "🎯",
            },
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Technique::Soft => "SOFT",
            Technique::NoSell => "NO_SELL",
            Technique::Hard => "HARD",
            Technique::Walk => "WALK",
            Technique::Emotion => "EMOTION",
            Technique::Logic => "LOGIC",
            Technique::Close => "CLOSE",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str().eq_ignore_ascii_case(s))
    }
}

/// Prospect personality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Archetype {
    Analytical,
    Emotional,
    Executive,
    Skeptical,
    Friendly,
    Aggressive,
}

/// Required rhythm for an archetype
#[derive(Debug, Clone, Copy)]
pub struct Rhythm {
    /// Beat weights of the ideal sequence
    pub pattern: &'static [f32],
    /// Techniques the prospect responds to, in ideal order
    pub accepts: &'static [Technique],
    /// Beats per minute, used for the approach pulse
    pub tempo: u32,
}

impl Archetype {
    pub const ALL: [Archetype; 6] = [
        Archetype::Analytical,
        Archetype::Emotional,
        Archetype::Executive,
        Archetype::Skeptical,
        Archetype::Friendly,
        Archetype::Aggressive,
    ];

    pub fn rhythm(self) -> Rhythm {
        use Technique::*;
        match self {
            Archetype::Analytical => Rhythm {
                pattern: &[0.3, 0.7, 1.0],
                accepts: &[NoSell, Logic, Close],
                tempo: 120,
            },
            Archetype::Emotional => Rhythm {
                pattern: &[0.5, 0.8, 1.0],
                accepts: &[Soft, Emotion, Close],
                tempo: 100,
            },
            Archetype::Executive => Rhythm {
                pattern: &[0.3, 0.7, 1.0],
                accepts: &[NoSell, Logic, Close],
                tempo: 140,
            },
            Archetype::Skeptical => Rhythm {
                pattern: &[0.3, 0.1, 0.5, 1.0],
                accepts: &[NoSell, Walk, Soft, Close],
                tempo: 90,
            },
            Archetype::Friendly => Rhythm {
                pattern: &[0.5, 0.8, 1.0],
                accepts: &[Soft, Emotion, Close],
                tempo: 110,
            },
            Archetype::Aggressive => Rhythm {
                pattern: &[1.2, 0.7, 1.0],
                accepts: &[Hard, Logic, Close],
                tempo: 130,
            },
        }
    }

    pub fn accepts(self, technique: Technique) -> bool {
        self.rhythm().accepts.contains(&technique)
    }
}
