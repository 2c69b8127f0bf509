use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::ControllerError;

pub const DEFAULT_THEME: &str = "wikipedia";
const WIKIPEDIA_TEMPLATE: &str = "https://chessboardjs.com/img/chesspieces/wikipedia/{piece}.png";

/// Who plays Black.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameMode {
    /// Black is the random opponent.
    #[default]
    #[serde(rename = "ai")]
    VsRandom,
    /// Both sides are played from the same board.
    #[serde(rename = "local")]
    LocalTwoPlayer,
}

impl GameMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::VsRandom => "ai",
            GameMode::LocalTwoPlayer => "local",
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameMode {
    type Err = ControllerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "ai" => Ok(GameMode::VsRandom),
            "local" => Ok(GameMode::LocalTwoPlayer),
            other => Err(ControllerError::UnknownMode(other.to_string())),
        }
    }
}

/// Piece image URL templates by theme name. `{piece}` is filled in by the widget.
#[derive(Debug, Clone)]
pub struct PieceThemes {
    templates: HashMap<String, String>,
}

impl Default for PieceThemes {
    fn default() -> Self {
        let mut templates = HashMap::new();
        templates.insert(DEFAULT_THEME.to_string(), WIKIPEDIA_TEMPLATE.to_string());
        PieceThemes { templates }
    }
}

impl PieceThemes {
    /// Template for `name`, falling back to the wikipedia set.
    pub fn resolve(&self, name: &str) -> &str {
        self.templates
            .get(name)
            .or_else(|| self.templates.get(DEFAULT_THEME))
            .map(String::as_str)
            .unwrap_or(WIKIPEDIA_TEMPLATE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_round_trips_through_wire_names() {
        assert_eq!("ai".parse::<GameMode>().unwrap(), GameMode::VsRandom);
        assert_eq!("local".parse::<GameMode>().unwrap(), GameMode::LocalTwoPlayer);
        assert_eq!(GameMode::LocalTwoPlayer.to_string(), "local");
        assert!(matches!(
            "online".parse::<GameMode>(),
            Err(ControllerError::UnknownMode(_))
        ));
        assert_eq!(GameMode::default(), GameMode::VsRandom);
    }

    #[test]
    fn unknown_theme_falls_back_to_wikipedia() {
        let themes = PieceThemes::default();
        assert_eq!(themes.resolve("wikipedia"), WIKIPEDIA_TEMPLATE);
        assert_eq!(themes.resolve("neon"), WIKIPEDIA_TEMPLATE);
        assert_eq!(themes.resolve(""), WIKIPEDIA_TEMPLATE);
    }
}
