use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::model::ids::GameId;

/// Record of one finished play-through of a single game within a module.
///
/// `score <= total` is expected but not enforced; scoring takes the numbers
/// as they come.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameResult {
    pub game_id: GameId,
    pub game_title: String,
    pub score: u32,
    pub total: u32,
    pub timestamp: DateTime<Utc>,
}

impl GameResult {
    #[must_use]
    pub fn new(
        game_id: GameId,
        game_title: impl Into<String>,
        score: u32,
        total: u32,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            game_id,
            game_title: game_title.into(),
            score,
            total,
            timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    #[test]
    fn serializes_ids_as_plain_strings() {
        let result = GameResult::new(GameId::new("g1").unwrap(), "Quick Quiz", 3, 5, fixed_now());
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["game_id"], "g1");
        assert_eq!(json["score"], 3);
        assert_eq!(json["timestamp"], "2023-11-14T22:13:20Z");
    }
}
