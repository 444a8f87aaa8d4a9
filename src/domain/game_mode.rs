use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Difficulty tier a game was played on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    Easy,
    Medium,
    Hard,
}

impl GameMode {
    /// All modes in tab order.
    pub const ALL: [GameMode; 3] = [GameMode::Easy, GameMode::Medium, GameMode::Hard];

    /// Stable lower-case name, also used as the persisted value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }

    /// Position of the mode's tab on the statistics screen.
    pub fn index(&self) -> usize {
        match self {
            Self::Easy => 0,
            Self::Medium => 1,
            Self::Hard => 2,
        }
    }

    /// Tab title.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Difficult",
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" | "difficult" => Ok(Self::Hard),
            other => Err(format!("unknown game mode: {other:?}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_mode_parse() {
        assert_eq!("easy".parse::<GameMode>(), Ok(GameMode::Easy));
        assert_eq!(" Medium ".parse::<GameMode>(), Ok(GameMode::Medium));
        assert_eq!("difficult".parse::<GameMode>(), Ok(GameMode::Hard));
        assert!("expert".parse::<GameMode>().is_err());
    }

    #[test]
    fn test_game_mode_index_matches_all_order() {
        for (i, mode) in GameMode::ALL.iter().enumerate() {
            assert_eq!(mode.index(), i);
            assert_eq!(mode.as_str().parse::<GameMode>(), Ok(*mode));
        }
    }
}
