//! Tile kinds, the fixed wall layout, and the single-tile placement cell.

use std::fmt;

use serde::{Serialize, Serializer};

pub const BOARD_SIZE: usize = 5;
pub const FLOOR_CAPACITY: usize = 7;
pub const TILE_COLORS: usize = 5;

/// Tile colors (order fixed for serialization)
#[repr(u8)]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Blue = 0,
    Yellow = 1,
    Red = 2,
    Black = 3,
    Teal = 4, // "light blue"
}

impl Color {
    /// Convert from u8 index to Color
    pub fn from_index(idx: u8) -> Option<Color> {
        match idx {
            0 => Some(Color::Blue),
            1 => Some(Color::Yellow),
            2 => Some(Color::Red),
            3 => Some(Color::Black),
            4 => Some(Color::Teal),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn name(self) -> &'static str {
        match self {
            Color::Blue => "blue",
            Color::Yellow => "yellow",
            Color::Red => "red",
            Color::Black => "black",
            Color::Teal => "teal",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub const ALL_COLORS: [Color; TILE_COLORS] = [
    Color::Blue,
    Color::Yellow,
    Color::Red,
    Color::Black,
    Color::Teal,
];

/// Anything that can sit in the center or on a floor line: a colored tile or
/// the starting-player marker. The marker never reaches a wall or pattern line.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Token {
    Tile(Color),
    StartingMarker,
}

impl Token {
    pub fn color(self) -> Option<Color> {
        match self {
            Token::Tile(color) => Some(color),
            Token::StartingMarker => None,
        }
    }

    pub fn is_marker(self) -> bool {
        matches!(self, Token::StartingMarker)
    }
}

impl Serialize for Token {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Token::Tile(color) => serializer.serialize_str(color.name()),
            Token::StartingMarker => serializer.serialize_str("starting_marker"),
        }
    }
}

/// Wall pattern: WALL_PATTERN[row][col] = Color at that position.
/// Each row is the row above rotated one step to the right.
pub const WALL_PATTERN: [[Color; BOARD_SIZE]; BOARD_SIZE] = [
    [Color::Blue, Color::Yellow, Color::Red, Color::Black, Color::Teal],
    [Color::Teal, Color::Blue, Color::Yellow, Color::Red, Color::Black],
    [Color::Black, Color::Teal, Color::Blue, Color::Yellow, Color::Red],
    [Color::Red, Color::Black, Color::Teal, Color::Blue, Color::Yellow],
    [Color::Yellow, Color::Red, Color::Black, Color::Teal, Color::Blue],
];

/// Destination column lookup: WALL_DEST_COL[row][color_index] => col
pub const WALL_DEST_COL: [[u8; TILE_COLORS]; BOARD_SIZE] = [
    [0, 1, 2, 3, 4],
    [1, 2, 3, 4, 0],
    [2, 3, 4, 0, 1],
    [3, 4, 0, 1, 2],
    [4, 0, 1, 2, 3],
];

/// Column of `color` in wall row `row`
pub fn wall_column(row: usize, color: Color) -> usize {
    WALL_DEST_COL[row][color.index()] as usize
}

/// A single placement cell holding at most one token, optionally restricted
/// to one color (wall cells) or open to anything (floor slots).
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct TileSpot {
    accepted: Option<Color>,
    occupant: Option<Token>,
}

impl TileSpot {
    /// Unrestricted empty spot
    pub const fn open() -> Self {
        TileSpot {
            accepted: None,
            occupant: None,
        }
    }

    /// Empty spot that only takes tiles of `color`
    pub const fn accepting(color: Color) -> Self {
        TileSpot {
            accepted: Some(color),
            occupant: None,
        }
    }

    pub fn accepted(&self) -> Option<Color> {
        self.accepted
    }

    pub fn occupant(&self) -> Option<Token> {
        self.occupant
    }

    pub fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }

    pub fn accepts(&self, token: Token) -> bool {
        if self.occupant.is_some() {
            return false;
        }
        match self.accepted {
            None => true,
            Some(color) => token == Token::Tile(color),
        }
    }

    /// Put `token` on the spot. Returns false and leaves the spot untouched
    /// if it is occupied or restricted to another color.
    pub fn place(&mut self, token: Token) -> bool {
        if !self.accepts(token) {
            return false;
        }
        self.occupant = Some(token);
        true
    }

    /// Remove and return the occupant; the color restriction stays.
    pub fn clear(&mut self) -> Option<Token> {
        self.occupant.take()
    }
}
