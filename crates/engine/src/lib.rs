//! Azul Game Engine
//!
//! Rules engine for the tile-drafting board game Azul, for two to four
//! players. The engine is transport-agnostic: callers hand it validated
//! player ids and moves, and read back a serializable snapshot.
//!
//! - `TileFactory`: bag, factory displays, table center, discard pile
//! - `Board`: pattern lines, wall, floor line, scoring
//! - `Game`: turn order, draft/place actions, round end, game end
//! - `GameRegistry`: games keyed by id
//!
//! ```
//! use azul_engine::{Game, GameConfig, GameId, Seat};
//!
//! let mut game = Game::new(
//!     GameId(1),
//!     vec![Seat::new(1, "ana"), Seat::new(2, "ben")],
//!     &GameConfig::with_seed(42),
//! )
//! .unwrap();
//!
//! let player = game.player_to_play();
//! let draw = game.legal_draws()[0];
//! game.take_tiles_from_factory(player, draw.source, draw.color).unwrap();
//! game.place_tiles_on_floor_line(player).unwrap();
//! assert_ne!(game.player_to_play(), player);
//! ```

mod agent;
mod bag;
mod board;
mod config;
mod error;
mod factory;
mod game;
mod pattern_line;
mod registry;
mod snapshot;
mod tile;

pub use agent::*;
pub use bag::*;
pub use board::*;
pub use config::*;
pub use error::*;
pub use factory::*;
pub use game::*;
pub use pattern_line::*;
pub use registry::*;
pub use snapshot::*;
pub use tile::*;
