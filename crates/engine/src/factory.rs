//! Tile supply for a game: the bag, the per-round factory displays, the shared
//! table center, and the discard pile.
//!
//! Drafting from a display takes every tile of one color and spills the rest
//! into the center. The first draft from the center in a round also takes the
//! starting-player marker.

use std::fmt;

use rand::Rng;
use serde::Serialize;

use crate::{Color, GameError, IllegalMove, Reference, Result, TileBag, Token};

/// Where a player drafts tiles from
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize)]
#[serde(tag = "kind", content = "index", rename_all = "snake_case")]
pub enum DraftSource {
    Display(u8),
    Center,
}

impl fmt::Display for DraftSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DraftSource::Display(idx) => write!(f, "display {idx}"),
            DraftSource::Center => f.write_str("the table center"),
        }
    }
}

/// Receiver for tiles leaving play (overflow, wall-tiling leftovers)
pub trait TileSink {
    fn return_used_tile(&mut self, color: Color);

    fn return_used_tiles(&mut self, color: Color, n: usize) {
        for _ in 0..n {
            self.return_used_tile(color);
        }
    }
}

/// Tiles taken by one draft
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Draft {
    pub color: Color,
    pub tiles: usize,
    pub starting_marker: bool,
}

impl Draft {
    /// Marker first, then the colored tiles
    pub fn into_tokens(self) -> Vec<Token> {
        let mut tokens = Vec::with_capacity(self.tiles + 1);
        if self.starting_marker {
            tokens.push(Token::StartingMarker);
        }
        tokens.extend(std::iter::repeat(Token::Tile(self.color)).take(self.tiles));
        tokens
    }
}

/// Shared pool collecting display leftovers plus the round's starting marker
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TableCenter {
    tiles: Vec<Color>,
    starting_marker: bool,
}

impl TableCenter {
    pub fn tiles(&self) -> &[Color] {
        &self.tiles
    }

    pub fn has_starting_marker(&self) -> bool {
        self.starting_marker
    }

    /// True when no colored tile is left; a lingering marker does not count
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn contains(&self, color: Color) -> bool {
        self.tiles.contains(&color)
    }

    pub fn add_tiles(&mut self, tiles: impl IntoIterator<Item = Color>) {
        self.tiles.extend(tiles);
    }

    pub fn add_starting_marker(&mut self) {
        debug_assert!(!self.starting_marker, "one marker per round");
        self.starting_marker = true;
    }

    /// Remove every tile of `color`. The marker goes along on the first
    /// touch of the round and is gone for later draws.
    pub fn take(&mut self, color: Color) -> (usize, bool) {
        let before = self.tiles.len();
        self.tiles.retain(|&c| c != color);
        let taken = before - self.tiles.len();
        let marker = std::mem::take(&mut self.starting_marker);
        (taken, marker)
    }

    /// Drop leftovers from the previous round. Only a marker nobody took
    /// can be left here once a round has ended.
    fn reset(&mut self) {
        debug_assert!(self.tiles.is_empty(), "center must be drained before reset");
        self.tiles.clear();
        self.starting_marker = false;
    }
}

/// One of the per-round tile groups drawn from the bag
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FactoryDisplay {
    id: u8,
    tiles: Vec<Color>,
}

impl FactoryDisplay {
    pub fn new(id: u8) -> Self {
        FactoryDisplay {
            id,
            tiles: Vec::new(),
        }
    }

    pub fn id(&self) -> u8 {
        self.id
    }

    pub fn tiles(&self) -> &[Color] {
        &self.tiles
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn contains(&self, color: Color) -> bool {
        self.tiles.contains(&color)
    }

    /// Replace the display contents
    pub fn fill(&mut self, tiles: Vec<Color>) {
        debug_assert!(self.tiles.is_empty(), "display refilled before it was drafted");
        self.tiles = tiles;
    }

    /// Take every tile of `color`; everything else spills into `center`.
    pub fn take(&mut self, color: Color, center: &mut TableCenter) -> usize {
        let (taken, rest): (Vec<Color>, Vec<Color>) =
            self.tiles.drain(..).partition(|&c| c == color);
        center.add_tiles(rest);
        taken.len()
    }
}

/// Owns the bag, displays, center and discard pile for one game
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TileFactory {
    bag: TileBag,
    used: TileBag,
    displays: Vec<FactoryDisplay>,
    center: TableCenter,
    display_capacity: usize,
}

impl TileFactory {
    pub fn new(num_displays: u8, display_capacity: usize, bag: TileBag) -> Self {
        TileFactory {
            bag,
            used: TileBag::default(),
            displays: (0..num_displays).map(FactoryDisplay::new).collect(),
            center: TableCenter::default(),
            display_capacity,
        }
    }

    /// Factory with displays already dealt and the marker in the center,
    /// for replaying a recorded deal
    pub fn dealt(displays: Vec<Vec<Color>>, display_capacity: usize, bag: TileBag) -> Self {
        let mut center = TableCenter::default();
        center.add_starting_marker();
        TileFactory {
            bag,
            used: TileBag::default(),
            displays: displays
                .into_iter()
                .enumerate()
                .map(|(id, tiles)| FactoryDisplay {
                    id: id as u8,
                    tiles,
                })
                .collect(),
            center,
            display_capacity,
        }
    }

    pub fn bag(&self) -> &TileBag {
        &self.bag
    }

    pub fn used_tiles(&self) -> &TileBag {
        &self.used
    }

    pub fn displays(&self) -> &[FactoryDisplay] {
        &self.displays
    }

    pub fn display(&self, id: u8) -> Option<&FactoryDisplay> {
        self.displays.get(id as usize)
    }

    pub fn center(&self) -> &TableCenter {
        &self.center
    }

    pub fn display_capacity(&self) -> usize {
        self.display_capacity
    }

    /// Round is over once no colored tile is left anywhere on the table
    pub fn is_empty(&self) -> bool {
        self.displays.iter().all(FactoryDisplay::is_empty) && self.center.is_empty()
    }

    /// Colored tiles held by the bag, discards, displays and center
    pub fn tile_count(&self) -> usize {
        self.bag.len()
            + self.used.len()
            + self.displays.iter().map(|d| d.tiles.len()).sum::<usize>()
            + self.center.tiles.len()
    }

    /// Reset the center, refill every display and reseed the marker
    pub fn start_round(&mut self, rng: &mut impl Rng) -> Result<()> {
        self.center.reset();
        self.fill_displays(rng)?;
        self.center.add_starting_marker();
        Ok(())
    }

    /// Draw `display_capacity` tiles for each display, recycling the discard
    /// pile into the bag when it runs dry. Displays are left partly filled
    /// when both run out; it is an error only if nothing at all could be
    /// drawn.
    pub fn fill_displays(&mut self, rng: &mut impl Rng) -> Result<()> {
        let requested = self
            .displays
            .len()
            .checked_mul(self.display_capacity)
            .ok_or(GameError::ResourceExhaustion {
                requested: usize::MAX,
                available: self.bag.len() + self.used.len(),
            })?;
        let mut placed = 0;

        for display in &mut self.displays {
            let (mut tiles, complete) = self.bag.draw(self.display_capacity, rng);
            if !complete && !self.used.is_empty() {
                log::debug!(
                    "bag ran dry filling display {}; recycling {} used tiles",
                    display.id,
                    self.used.len()
                );
                self.bag.refill(&mut self.used);
                let (top_up, _) = self.bag.draw(self.display_capacity - tiles.len(), rng);
                tiles.extend(top_up);
            }
            if tiles.len() < self.display_capacity {
                log::warn!(
                    "display {} filled with {} of {} tiles",
                    display.id,
                    tiles.len(),
                    self.display_capacity
                );
            }
            placed += tiles.len();
            display.fill(tiles);
        }

        if placed == 0 && requested > 0 {
            return Err(GameError::ResourceExhaustion {
                requested,
                available: 0,
            });
        }
        Ok(())
    }

    /// Check that `color` can be drafted from `source` without touching state
    pub fn check_take(&self, source: DraftSource, color: Color) -> Result<()> {
        let present = match source {
            DraftSource::Display(id) => self
                .display(id)
                .ok_or(GameError::InvalidReference(Reference::Display(id)))?
                .contains(color),
            DraftSource::Center => self.center.contains(color),
        };
        if !present {
            return Err(IllegalMove::ColorNotInSource(source).into());
        }
        Ok(())
    }

    /// Draft every tile of `color` from `source`
    pub fn take_tiles(&mut self, source: DraftSource, color: Color) -> Result<Draft> {
        self.check_take(source, color)?;

        let draft = match source {
            DraftSource::Display(id) => {
                let tiles = self.displays[id as usize].take(color, &mut self.center);
                Draft {
                    color,
                    tiles,
                    starting_marker: false,
                }
            }
            DraftSource::Center => {
                let (tiles, starting_marker) = self.center.take(color);
                Draft {
                    color,
                    tiles,
                    starting_marker,
                }
            }
        };
        log::debug!(
            "took {} {} from {}{}",
            draft.tiles,
            color,
            source,
            if draft.starting_marker { " with the starting marker" } else { "" }
        );
        Ok(draft)
    }
}

impl TileSink for TileFactory {
    fn return_used_tile(&mut self, color: Color) {
        self.used.add(color);
    }
}
