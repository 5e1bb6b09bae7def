use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

pub const CONFIG_PATH: &str = "ai_config.json";

static CONFIG: Lazy<AIConfig> = Lazy::new(AIConfig::load_or_default);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AIConfig {
    pub version: String,
    pub evaluation: EvaluationConfig,
    pub search: SearchConfig,
    pub thinking: ThinkingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluationConfig {
    /// Detect endgames and score the king on its endgame table.
    /// Off by default: the stock evaluation always uses the middlegame table.
    pub endgame_king_table: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Chance that a Beginner skips search and plays a random legal move.
    pub random_move_rate: f64,
    /// Moves whose quick probe lands closer than this to the best value are
    /// treated as equally good by the variety pass.
    pub similarity_window: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThinkingConfig {
    /// When false, `select_move_with_delay` answers immediately.
    pub enabled: bool,
}

impl AIConfig {
    pub fn load() -> anyhow::Result<Self> {
        let config_str = std::fs::read_to_string(CONFIG_PATH)?;
        let config: AIConfig = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(config) => {
                tracing::debug!(path = CONFIG_PATH, "loaded engine config");
                config
            }
            Err(e) => {
                if std::path::Path::new(CONFIG_PATH).exists() {
                    tracing::warn!(path = CONFIG_PATH, error = %e, "ignoring unreadable engine config");
                }
                Self::default()
            }
        }
    }

    /// Process-wide config, read once on first use.
    pub fn get() -> &'static AIConfig {
        &CONFIG
    }
}

impl Default for AIConfig {
    fn default() -> Self {
        AIConfig {
            version: "1.0".to_string(),
            evaluation: EvaluationConfig::default(),
            search: SearchConfig::default(),
            thinking: ThinkingConfig::default(),
        }
    }
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        EvaluationConfig {
            endgame_king_table: false,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            random_move_rate: 0.3,
            similarity_window: 10,
        }
    }
}

impl Default for ThinkingConfig {
    fn default() -> Self {
        ThinkingConfig { enabled: true }
    }
}
