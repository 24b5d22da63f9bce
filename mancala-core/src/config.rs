//! Game and AI configuration

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::GameError;
use crate::search::SearchAlgorithm;

/// Board dimensions
///
/// Deserialization goes through the same validation as [`GameConfig::new`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGameConfig")]
pub struct GameConfig {
    pits_per_player: usize,
    stones_per_pit: u32,
}

#[derive(Deserialize)]
struct RawGameConfig {
    pits_per_player: i64,
    stones_per_pit: i64,
}

impl TryFrom<RawGameConfig> for GameConfig {
    type Error = GameError;

    fn try_from(raw: RawGameConfig) -> Result<Self, Self::Error> {
        GameConfig::new(raw.pits_per_player, raw.stones_per_pit)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            pits_per_player: 6,
            stones_per_pit: 4,
        }
    }
}

impl GameConfig {
    /// Validate raw dimensions
    pub fn new(pits_per_player: i64, stones_per_pit: i64) -> Result<Self, GameError> {
        if pits_per_player < 1 {
            return Err(GameError::config(format!(
                "pits_per_player must be at least 1, got {}",
                pits_per_player
            )));
        }
        if stones_per_pit < 0 {
            return Err(GameError::config(format!(
                "stones_per_pit cannot be negative, got {}",
                stones_per_pit
            )));
        }

        let pits = usize::try_from(pits_per_player)
            .map_err(|_| GameError::config("pits_per_player is too large"))?;
        let stones = u32::try_from(stones_per_pit)
            .map_err(|_| GameError::config("stones_per_pit is too large"))?;

        // A store may end up holding every stone on the board
        let total = (pits as u128) * (stones as u128) * 2;
        if total > u32::MAX as u128 {
            return Err(GameError::config(format!(
                "{} pits of {} stones overflow a store",
                pits, stones
            )));
        }

        Ok(Self {
            pits_per_player: pits,
            stones_per_pit: stones,
        })
    }

    pub fn pits_per_player(&self) -> usize {
        self.pits_per_player
    }

    pub fn stones_per_pit(&self) -> u32 {
        self.stones_per_pit
    }

    /// Stones on the board for the whole game
    pub fn total_stones(&self) -> u64 {
        self.pits_per_player as u64 * self.stones_per_pit as u64 * 2
    }

    /// Load from JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save to JSON file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

/// AI configuration for game playing
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AiConfig {
    /// Search depth in plies
    pub depth: u32,
    /// Minimax or alpha-beta
    pub algorithm: SearchAlgorithm,
    /// Seed for any random opponent (None = entropy)
    pub seed: Option<u64>,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            depth: 5,
            algorithm: SearchAlgorithm::AlphaBeta,
            seed: None,
        }
    }
}

impl AiConfig {
    /// Create config for alpha-beta at given depth
    pub fn alpha_beta(depth: u32) -> Self {
        Self {
            depth,
            algorithm: SearchAlgorithm::AlphaBeta,
            ..Default::default()
        }
    }

    /// Create config for plain minimax at given depth
    pub fn minimax(depth: u32) -> Self {
        Self {
            depth,
            algorithm: SearchAlgorithm::Minimax,
            ..Default::default()
        }
    }

    /// Set random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.pits_per_player(), 6);
        assert_eq!(config.stones_per_pit(), 4);
        assert_eq!(config.total_stones(), 48);
    }

    #[test]
    fn test_rejects_bad_dimensions() {
        assert!(matches!(
            GameConfig::new(0, 4),
            Err(GameError::InvalidConfiguration { .. })
        ));
        assert!(matches!(
            GameConfig::new(-3, 4),
            Err(GameError::InvalidConfiguration { .. })
        ));
        assert!(matches!(
            GameConfig::new(6, -1),
            Err(GameError::InvalidConfiguration { .. })
        ));
        assert!(matches!(
            GameConfig::new(6, i64::from(u32::MAX)),
            Err(GameError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_degenerate_dimensions_allowed() {
        assert!(GameConfig::new(1, 4).is_ok());
        assert!(GameConfig::new(6, 0).is_ok());
    }

    #[test]
    fn test_json_roundtrip_validates() {
        let config: GameConfig =
            serde_json::from_str(r#"{"pits_per_player": 4, "stones_per_pit": 3}"#).unwrap();
        assert_eq!(config.pits_per_player(), 4);
        assert_eq!(config.stones_per_pit(), 3);

        let bad = serde_json::from_str::<GameConfig>(r#"{"pits_per_player": 0, "stones_per_pit": 3}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!("mancala-config-{}.json", std::process::id()));
        let config = GameConfig::new(3, 2).unwrap();
        config.save(&path).unwrap();
        let loaded = GameConfig::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_ai_config_builders() {
        let ai = AiConfig::minimax(3).with_seed(9);
        assert_eq!(ai.depth, 3);
        assert_eq!(ai.algorithm, SearchAlgorithm::Minimax);
        assert_eq!(ai.seed, Some(9));
        assert_eq!(AiConfig::alpha_beta(7).algorithm, SearchAlgorithm::AlphaBeta);
    }
}
