//! Error types returned by every fallible engine operation.
//!
//! No operation is ever partially applied: when one of these comes back, the
//! game is exactly as it was before the call.

use std::fmt;

use crate::{DraftSource, GameId, PlayerId};

pub type Result<T, E = GameError> = std::result::Result<T, E>;

/// Something the caller referred to by id that does not exist
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Reference {
    Game(GameId),
    Player(PlayerId),
    Display(u8),
}

/// Why a draw or placement was rejected
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum IllegalMove {
    GameOver,
    AlreadyHoldingTiles,
    NoTilesHeld,
    ColorNotInSource(DraftSource),
    RowOutOfRange(u8),
    MixedColors,
    NoColoredTiles,
    PatternLineColorMismatch { row: u8 },
    PatternLineFull { row: u8 },
    ColorAlreadyOnWall { row: u8 },
}

/// Rejected game construction
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum SetupError {
    PlayerCount { got: usize, min: usize, max: usize },
    DuplicatePlayer(PlayerId),
    EmptySupply,
    ZeroDisplayCapacity,
    /// One round's deal needs more tiles than the whole supply holds
    SupplyTooSmall { needed: Option<usize>, supply: usize },
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum GameError {
    InvalidReference(Reference),
    OutOfTurn { expected: PlayerId, actual: PlayerId },
    IllegalMove(IllegalMove),
    /// Bag and discard pile together could not fill a round
    ResourceExhaustion { requested: usize, available: usize },
    InvalidSetup(SetupError),
}

impl From<IllegalMove> for GameError {
    fn from(reason: IllegalMove) -> Self {
        GameError::IllegalMove(reason)
    }
}

impl From<SetupError> for GameError {
    fn from(reason: SetupError) -> Self {
        GameError::InvalidSetup(reason)
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reference::Game(id) => write!(f, "game {id}"),
            Reference::Player(id) => write!(f, "player {id}"),
            Reference::Display(idx) => write!(f, "factory display {idx}"),
        }
    }
}

impl fmt::Display for IllegalMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IllegalMove::GameOver => write!(f, "the game has ended"),
            IllegalMove::AlreadyHoldingTiles => {
                write!(f, "tiles already taken must be placed before drawing again")
            }
            IllegalMove::NoTilesHeld => write!(f, "no tiles to place"),
            IllegalMove::ColorNotInSource(source) => {
                write!(f, "requested color is not present in {source}")
            }
            IllegalMove::RowOutOfRange(row) => write!(f, "pattern line {row} does not exist"),
            IllegalMove::MixedColors => write!(f, "tiles of more than one color"),
            IllegalMove::NoColoredTiles => write!(f, "no colored tiles to stage"),
            IllegalMove::PatternLineColorMismatch { row } => {
                write!(f, "pattern line {row} already holds another color")
            }
            IllegalMove::PatternLineFull { row } => write!(f, "pattern line {row} is full"),
            IllegalMove::ColorAlreadyOnWall { row } => {
                write!(f, "wall row {row} already holds that color")
            }
        }
    }
}

impl fmt::Display for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetupError::PlayerCount { got, min, max } => {
                write!(f, "{got} players seated, expected {min}..={max}")
            }
            SetupError::DuplicatePlayer(id) => write!(f, "player {id} is seated twice"),
            SetupError::EmptySupply => write!(f, "tile supply must hold at least one tile per color"),
            SetupError::ZeroDisplayCapacity => write!(f, "factory displays must hold at least one tile"),
            SetupError::SupplyTooSmall {
                needed: Some(needed),
                supply,
            } => write!(f, "a round deals {needed} tiles but the supply holds {supply}"),
            SetupError::SupplyTooSmall { needed: None, supply } => {
                write!(f, "display capacity too large for a supply of {supply} tiles")
            }
        }
    }
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::InvalidReference(reference) => write!(f, "unknown {reference}"),
            GameError::OutOfTurn { expected, actual } => {
                write!(f, "player {actual} moved out of turn; player {expected} is to play")
            }
            GameError::IllegalMove(reason) => write!(f, "illegal move: {reason}"),
            GameError::ResourceExhaustion {
                requested,
                available,
            } => write!(
                f,
                "tile supply exhausted: {requested} tiles requested, {available} available"
            ),
            GameError::InvalidSetup(reason) => write!(f, "invalid game setup: {reason}"),
        }
    }
}

impl std::error::Error for GameError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = GameError::OutOfTurn {
            expected: PlayerId(1),
            actual: PlayerId(2),
        };
        assert_eq!(
            err.to_string(),
            "player 2 moved out of turn; player 1 is to play"
        );

        let err: GameError = IllegalMove::PatternLineFull { row: 3 }.into();
        assert_eq!(err.to_string(), "illegal move: pattern line 3 is full");

        let err = GameError::InvalidReference(Reference::Display(9));
        assert_eq!(err.to_string(), "unknown factory display 9");

        let err: GameError = SetupError::SupplyTooSmall {
            needed: Some(120),
            supply: 100,
        }
        .into();
        assert_eq!(
            err.to_string(),
            "invalid game setup: a round deals 120 tiles but the supply holds 100"
        );
    }
}
