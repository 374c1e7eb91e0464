//! Turn and round state machine.
//!
//! A turn is two calls: the player to play drafts tiles from a display or the
//! center, then places what they hold on a pattern line or the floor line.
//! Placing ends the turn. When the last colored tile has left the table the
//! round ends inside that same call: every board does its wall tiling, and
//! either the game ends (some wall row is complete) or the next round is dealt.
//!
//! Every public mutator runs against a staged copy and only commits on
//! success, so a returned error means nothing changed.

use std::fmt;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use crate::{
    Board, Color, DraftSource, FirstPlayerRule, GameConfig, GameError, IllegalMove, Reference,
    Result, SetupError, TileBag, TileFactory, Token, BOARD_SIZE,
};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct PlayerId(pub u32);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct GameId(pub u64);

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A player as handed over by seating, before the game starts
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Seat {
    pub id: PlayerId,
    pub name: String,
    /// Higher wins the first turn under `FirstPlayerRule::MostRecent`
    pub tiebreak: Option<i64>,
}

impl Seat {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Seat {
            id: PlayerId(id),
            name: name.into(),
            tiebreak: None,
        }
    }

    pub fn with_tiebreak(mut self, key: i64) -> Self {
        self.tiebreak = Some(key);
        self
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Player {
    id: PlayerId,
    name: String,
    board: Board,
    held: Vec<Token>,
    has_starting_marker: bool,
}

impl Player {
    fn seated(seat: Seat) -> Self {
        Player {
            id: seat.id,
            name: seat.name,
            board: Board::new(),
            held: Vec::new(),
            has_starting_marker: false,
        }
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Tiles drafted this turn and not yet placed
    pub fn held(&self) -> &[Token] {
        &self.held
    }

    pub fn has_starting_marker(&self) -> bool {
        self.has_starting_marker
    }

    fn held_tiles(&self) -> usize {
        self.held.iter().filter(|t| !t.is_marker()).count()
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Player to play must draft
    AwaitingDraw,
    /// Player to play holds tiles and must place them
    AwaitingPlacement,
    /// Wall tiling in progress; never visible between calls
    RoundEnding,
    Ended,
}

/// A draft: every tile of `color` from `source`
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize)]
pub struct Draw {
    pub source: DraftSource,
    pub color: Color,
}

/// Where held tiles go
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize)]
#[serde(tag = "kind", content = "row", rename_all = "snake_case")]
pub enum Placement {
    PatternLine(u8),
    FloorLine,
}

/// Final or running position of one player
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Standing {
    pub player: PlayerId,
    pub name: String,
    pub score: u32,
    pub completed_rows: usize,
    pub rank: usize,
    pub winner: bool,
}

#[derive(Clone, Debug)]
pub struct Game {
    id: GameId,
    factory: TileFactory,
    players: Vec<Player>,
    current: usize,
    round_starter: usize,
    round_number: u32,
    phase: Phase,
    total_tiles: usize,
    rng: StdRng,
}

/// Seat index that opens the game
fn first_player(seats: &[Seat], rule: FirstPlayerRule) -> usize {
    match rule {
        FirstPlayerRule::FirstSeated => 0,
        FirstPlayerRule::MostRecent => seats
            .iter()
            .enumerate()
            .filter_map(|(i, seat)| seat.tiebreak.map(|key| (i, key)))
            // max_by_key keeps the last maximum; reverse the seat order so
            // the earliest seat wins ties
            .rev()
            .max_by_key(|&(_, key)| key)
            .map_or(0, |(i, _)| i),
    }
}

impl Game {
    /// Seat the players, fill the first round's displays and pick who opens
    pub fn new(id: GameId, seats: Vec<Seat>, config: &GameConfig) -> Result<Game> {
        let ids: Vec<PlayerId> = seats.iter().map(|s| s.id).collect();
        config.validate(&ids)?;

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let mut factory = TileFactory::new(
            GameConfig::displays_for(seats.len()) as u8,
            config.display_capacity,
            TileBag::full(config.tiles_per_color),
        );
        factory.start_round(&mut rng)?;

        Self::seat(id, seats, config, factory, rng)
    }

    /// Start from a factory whose first round is already dealt
    pub fn with_factory(
        id: GameId,
        seats: Vec<Seat>,
        config: &GameConfig,
        factory: TileFactory,
    ) -> Result<Game> {
        let ids: Vec<PlayerId> = seats.iter().map(|s| s.id).collect();
        config.validate(&ids)?;
        if factory.displays().len() != GameConfig::displays_for(seats.len()) {
            return Err(SetupError::PlayerCount {
                got: seats.len(),
                min: config.min_players,
                max: config.max_players,
            }
            .into());
        }

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::seat(id, seats, config, factory, rng)
    }

    fn seat(
        id: GameId,
        seats: Vec<Seat>,
        config: &GameConfig,
        factory: TileFactory,
        rng: StdRng,
    ) -> Result<Game> {
        let starter = first_player(&seats, config.first_player_rule);
        let players: Vec<Player> = seats.into_iter().map(Player::seated).collect();
        log::info!(
            "game {id}: {} players, {} displays, player {} opens",
            players.len(),
            factory.displays().len(),
            players[starter].id
        );

        Ok(Game {
            id,
            total_tiles: factory.tile_count(),
            factory,
            players,
            current: starter,
            round_starter: starter,
            round_number: 1,
            phase: Phase::AwaitingDraw,
            rng,
        })
    }

    pub fn id(&self) -> GameId {
        self.id
    }

    pub fn factory(&self) -> &TileFactory {
        &self.factory
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn player_to_play(&self) -> PlayerId {
        self.players[self.current].id
    }

    pub fn round_number(&self) -> u32 {
        self.round_number
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn has_ended(&self) -> bool {
        self.phase == Phase::Ended
    }

    /// Tiles minted at game start
    pub fn total_tiles(&self) -> usize {
        self.total_tiles
    }

    /// Colored tiles currently accounted for anywhere in the game
    pub fn tile_count(&self) -> usize {
        self.factory.tile_count()
            + self
                .players
                .iter()
                .map(|p| p.board.tile_count() + p.held_tiles())
                .sum::<usize>()
    }

    // =========================================================================
    // Moves
    // =========================================================================

    /// Draft every tile of `color` from `source`. The tiles (and the starting
    /// marker on the round's first center draft) are held until placed.
    pub fn take_tiles_from_factory(
        &mut self,
        player: PlayerId,
        source: DraftSource,
        color: Color,
    ) -> Result<()> {
        self.commit(|game| {
            let idx = game.ensure_turn(player)?;
            if game.phase == Phase::AwaitingPlacement {
                return Err(IllegalMove::AlreadyHoldingTiles.into());
            }

            let draft = game.factory.take_tiles(source, color)?;
            let seat = &mut game.players[idx];
            if draft.starting_marker {
                seat.has_starting_marker = true;
            }
            seat.held = draft.into_tokens();
            game.phase = Phase::AwaitingPlacement;
            Ok(())
        })
    }

    /// Stage the held tiles on pattern line `row`, then end the turn
    pub fn place_tiles_on_pattern_line(&mut self, player: PlayerId, row: usize) -> Result<()> {
        self.commit(|game| {
            let idx = game.ensure_holding(player)?;
            let seat = &mut game.players[idx];
            seat.board
                .place_on_pattern_line(&seat.held, row, &mut game.factory)?;
            log::debug!("player {player} staged {} tiles on line {row}", seat.held_tiles());
            seat.held.clear();
            game.finish_turn()
        })
    }

    /// Drop the held tiles on the floor line, then end the turn
    pub fn place_tiles_on_floor_line(&mut self, player: PlayerId) -> Result<()> {
        self.commit(|game| {
            let idx = game.ensure_holding(player)?;
            let seat = &mut game.players[idx];
            let held = std::mem::take(&mut seat.held);
            seat.board.place_on_floor_line(&held, &mut game.factory);
            log::debug!("player {player} dropped {} tokens on the floor", held.len());
            game.finish_turn()
        })
    }

    pub fn draw(&mut self, player: PlayerId, draw: Draw) -> Result<()> {
        self.take_tiles_from_factory(player, draw.source, draw.color)
    }

    pub fn place(&mut self, player: PlayerId, placement: Placement) -> Result<()> {
        match placement {
            Placement::PatternLine(row) => self.place_tiles_on_pattern_line(player, row as usize),
            Placement::FloorLine => self.place_tiles_on_floor_line(player),
        }
    }

    // =========================================================================
    // Legal move enumeration
    // =========================================================================

    /// Every draft open to the player to play
    pub fn legal_draws(&self) -> Vec<Draw> {
        if self.phase != Phase::AwaitingDraw {
            return Vec::new();
        }

        let mut draws = Vec::new();
        let mut push_colors = |source: DraftSource, tiles: &[Color]| {
            let mut seen = [false; crate::TILE_COLORS];
            for &color in tiles {
                if !std::mem::replace(&mut seen[color.index()], true) {
                    draws.push(Draw { source, color });
                }
            }
        };
        for display in self.factory.displays() {
            push_colors(DraftSource::Display(display.id()), display.tiles());
        }
        push_colors(DraftSource::Center, self.factory.center().tiles());
        draws
    }

    /// Every placement open to the player holding tiles; the floor line is
    /// always among them
    pub fn legal_placements(&self) -> Vec<Placement> {
        if self.phase != Phase::AwaitingPlacement {
            return Vec::new();
        }

        let player = &self.players[self.current];
        let mut placements: Vec<Placement> = (0..BOARD_SIZE)
            .filter(|&row| player.board.check_pattern_line(&player.held, row).is_ok())
            .map(|row| Placement::PatternLine(row as u8))
            .collect();
        placements.push(Placement::FloorLine);
        placements
    }

    /// Players ordered by score, then by completed wall rows
    pub fn standings(&self) -> Vec<Standing> {
        let mut standings: Vec<Standing> = self
            .players
            .iter()
            .map(|p| Standing {
                player: p.id,
                name: p.name.clone(),
                score: p.board.score(),
                completed_rows: p.board.completed_rows(),
                rank: 0,
                winner: false,
            })
            .collect();
        standings.sort_by(|a, b| {
            (b.score, b.completed_rows).cmp(&(a.score, a.completed_rows))
        });

        for i in 0..standings.len() {
            let tied = i > 0
                && (standings[i].score, standings[i].completed_rows)
                    == (standings[i - 1].score, standings[i - 1].completed_rows);
            standings[i].rank = if tied { standings[i - 1].rank } else { i + 1 };
            standings[i].winner = self.has_ended() && standings[i].rank == 1;
        }
        standings
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn commit<T>(&mut self, apply: impl FnOnce(&mut Game) -> Result<T>) -> Result<T> {
        let mut staged = self.clone();
        let out = apply(&mut staged)?;
        debug_assert_eq!(
            staged.tile_count(),
            staged.total_tiles,
            "tile count invariant violated"
        );
        *self = staged;
        Ok(out)
    }

    fn player_index(&self, player: PlayerId) -> Result<usize> {
        self.players
            .iter()
            .position(|p| p.id == player)
            .ok_or(GameError::InvalidReference(Reference::Player(player)))
    }

    fn ensure_turn(&self, player: PlayerId) -> Result<usize> {
        let idx = self.player_index(player)?;
        if self.phase == Phase::Ended {
            return Err(IllegalMove::GameOver.into());
        }
        if idx != self.current {
            return Err(GameError::OutOfTurn {
                expected: self.player_to_play(),
                actual: player,
            });
        }
        Ok(idx)
    }

    fn ensure_holding(&self, player: PlayerId) -> Result<usize> {
        let idx = self.ensure_turn(player)?;
        if self.phase != Phase::AwaitingPlacement {
            return Err(IllegalMove::NoTilesHeld.into());
        }
        Ok(idx)
    }

    fn finish_turn(&mut self) -> Result<()> {
        if self.factory.is_empty() {
            return self.end_round();
        }
        self.current = (self.current + 1) % self.players.len();
        self.phase = Phase::AwaitingDraw;
        Ok(())
    }

    fn end_round(&mut self) -> Result<()> {
        self.phase = Phase::RoundEnding;

        for player in &mut self.players {
            let report = player.board.do_wall_tiling(&mut self.factory);
            log::debug!(
                "round {}: player {} tiled {} lines, floor -{}, score {}",
                self.round_number,
                player.id,
                report.placed.len(),
                report.floor_penalty,
                report.score
            );
        }

        if self
            .players
            .iter()
            .any(|p| p.board.has_completed_horizontal_line())
        {
            for player in &mut self.players {
                let bonus = player.board.calculate_final_bonus_scores();
                log::debug!("player {} end-game bonus {}", player.id, bonus.points);
            }
            self.phase = Phase::Ended;
            log::info!(
                "game {} ended after round {}",
                self.id,
                self.round_number
            );
            return Ok(());
        }

        let starter = self
            .players
            .iter()
            .position(|p| p.has_starting_marker)
            .unwrap_or(self.round_starter);
        for player in &mut self.players {
            player.has_starting_marker = false;
        }

        self.round_number += 1;
        self.factory.start_round(&mut self.rng)?;
        self.current = starter;
        self.round_starter = starter;
        self.phase = Phase::AwaitingDraw;
        log::info!(
            "game {}: round {} dealt, player {} opens",
            self.id,
            self.round_number,
            self.players[starter].id
        );
        Ok(())
    }
}
