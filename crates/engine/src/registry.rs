//! Id-keyed access to running games.
//!
//! The registry does no locking. A caller sharing it between threads must
//! serialize moves for each game itself.

use std::collections::HashMap;

use crate::{
    Color, DraftSource, Game, GameConfig, GameError, GameId, GameSnapshot, PlayerId, Reference,
    Result, Seat,
};

#[derive(Debug, Default)]
pub struct GameRegistry {
    config: GameConfig,
    games: HashMap<GameId, Game>,
    next_id: u64,
}

impl GameRegistry {
    pub fn new(config: GameConfig) -> Self {
        GameRegistry {
            config,
            games: HashMap::new(),
            next_id: 1,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    /// Start a game for seated players and return its id
    pub fn create_game(&mut self, seats: Vec<Seat>) -> Result<GameId> {
        let id = GameId(self.next_id.max(1));
        let game = Game::new(id, seats, &self.config)?;
        self.next_id = id.0 + 1;
        self.games.insert(id, game);
        Ok(id)
    }

    pub fn game(&self, id: GameId) -> Result<&Game> {
        self.games
            .get(&id)
            .ok_or(GameError::InvalidReference(Reference::Game(id)))
    }

    /// Direct access for callers driving a game turn by turn
    pub fn game_mut(&mut self, id: GameId) -> Result<&mut Game> {
        self.games
            .get_mut(&id)
            .ok_or(GameError::InvalidReference(Reference::Game(id)))
    }

    pub fn take_tiles_from_factory(
        &mut self,
        game: GameId,
        player: PlayerId,
        source: DraftSource,
        color: Color,
    ) -> Result<()> {
        self.game_mut(game)?
            .take_tiles_from_factory(player, source, color)
    }

    pub fn place_tiles_on_pattern_line(
        &mut self,
        game: GameId,
        player: PlayerId,
        row: usize,
    ) -> Result<()> {
        self.game_mut(game)?.place_tiles_on_pattern_line(player, row)
    }

    pub fn place_tiles_on_floor_line(&mut self, game: GameId, player: PlayerId) -> Result<()> {
        self.game_mut(game)?.place_tiles_on_floor_line(player)
    }

    pub fn snapshot(&self, game: GameId) -> Result<GameSnapshot> {
        Ok(self.game(game)?.snapshot())
    }

    /// Drop a game, returning it
    pub fn remove(&mut self, game: GameId) -> Result<Game> {
        self.games
            .remove(&game)
            .ok_or(GameError::InvalidReference(Reference::Game(game)))
    }
}
