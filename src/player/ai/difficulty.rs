use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;
use std::time::Duration;

/// Playing strength offered to the human.
///
/// | Tier         | Depth | Thinking time  |
/// |--------------|-------|----------------|
/// | Beginner     | 1     | 500–1000 ms    |
/// | Intermediate | 2     | 800–1500 ms    |
/// | Advanced     | 3     | 1000–2000 ms   |
/// | Expert       | 4     | 1500–3000 ms   |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl Default for Difficulty {
    fn default() -> Self {
        Difficulty::Intermediate
    }
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Beginner,
        Difficulty::Intermediate,
        Difficulty::Advanced,
        Difficulty::Expert,
    ];

    pub fn depth(self) -> usize {
        match self {
            Difficulty::Beginner => 1,
            Difficulty::Intermediate => 2,
            Difficulty::Advanced => 3,
            Difficulty::Expert => 4,
        }
    }

    /// Thinking-time range in milliseconds.
    pub fn delay_range_ms(self) -> RangeInclusive<u64> {
        match self {
            Difficulty::Beginner => 500..=1000,
            Difficulty::Intermediate => 800..=1500,
            Difficulty::Advanced => 1000..=2000,
            Difficulty::Expert => 1500..=3000,
        }
    }

    pub fn thinking_time<R: Rng + ?Sized>(self, rng: &mut R) -> Duration {
        Duration::from_millis(rng.gen_range(self.delay_range_ms()))
    }

    /// Lenient lookup used by menus and command lines: anything unknown
    /// becomes Intermediate.
    pub fn from_name(name: &str) -> Difficulty {
        name.parse().unwrap_or_default()
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "beginner" => Ok(Difficulty::Beginner),
            "intermediate" => Ok(Difficulty::Intermediate),
            "advanced" => Ok(Difficulty::Advanced),
            "expert" => Ok(Difficulty::Expert),
            other => Err(format!("unknown difficulty '{}'", other)),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
            Difficulty::Expert => "expert",
        };
        write!(f, "{}", name)
    }
}
