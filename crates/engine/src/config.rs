use serde::{Deserialize, Serialize};

use crate::{PlayerId, SetupError, TILE_COLORS};

/// How the first player of the game is chosen
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FirstPlayerRule {
    /// Seat 0 always starts
    FirstSeated,
    /// Highest `tiebreak` key starts; earlier seat wins ties; seat 0 when
    /// nobody has a key
    #[default]
    MostRecent,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub tiles_per_color: u16,
    pub display_capacity: usize,
    pub min_players: usize,
    pub max_players: usize,
    pub first_player_rule: FirstPlayerRule,
    /// Seed for the bag; `None` uses OS entropy
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            tiles_per_color: 20,
            display_capacity: 4,
            min_players: 2,
            max_players: 4,
            first_player_rule: FirstPlayerRule::MostRecent,
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn with_seed(seed: u64) -> Self {
        GameConfig {
            seed: Some(seed),
            ..Default::default()
        }
    }

    /// Number of factory displays for `players` seats
    pub fn displays_for(players: usize) -> usize {
        2 * players + 1
    }

    /// Reject configurations and seatings the engine cannot run
    pub fn validate(&self, players: &[PlayerId]) -> Result<(), SetupError> {
        if self.tiles_per_color == 0 {
            return Err(SetupError::EmptySupply);
        }
        if self.display_capacity == 0 {
            return Err(SetupError::ZeroDisplayCapacity);
        }
        if !(self.min_players..=self.max_players).contains(&players.len())
            || Self::displays_for(players.len()) > u8::MAX as usize
        {
            return Err(SetupError::PlayerCount {
                got: players.len(),
                min: self.min_players,
                max: self.max_players,
            });
        }

        let supply = self.tiles_per_color as usize * TILE_COLORS;
        let needed = self
            .display_capacity
            .checked_mul(Self::displays_for(players.len()));
        if needed.map_or(true, |n| n > supply) {
            return Err(SetupError::SupplyTooSmall { needed, supply });
        }

        for (i, id) in players.iter().enumerate() {
            if players[..i].contains(id) {
                return Err(SetupError::DuplicatePlayer(*id));
            }
        }
        Ok(())
    }
}
