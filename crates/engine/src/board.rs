//! One player's board: five pattern lines, the 5x5 wall, the floor line and
//! the score.
//!
//! Placement validates everything before it touches state, so a rejected
//! placement leaves the board exactly as it was.

use serde::Serialize;

use crate::{
    wall_column, Color, IllegalMove, PatternLine, Result, TileSink, TileSpot, Token, ALL_COLORS,
    BOARD_SIZE, FLOOR_CAPACITY, WALL_PATTERN,
};

/// Floor penalties (fixed table)
pub const FLOOR_PENALTY: [u32; FLOOR_CAPACITY] = [1, 1, 2, 2, 2, 3, 3];

pub const ROW_BONUS: u32 = 2;
pub const COLUMN_BONUS: u32 = 7;
pub const COLOR_BONUS: u32 = 10;

/// Total floor penalty for `occupied` filled slots
pub fn floor_penalty_for(occupied: usize) -> u32 {
    FLOOR_PENALTY[..occupied.min(FLOOR_CAPACITY)].iter().sum()
}

/// End-game bonus breakdown
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct FinalBonus {
    pub rows: u8,
    pub columns: u8,
    pub colors: u8,
    pub points: u32,
}

/// What one wall-tiling pass did to a board
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct WallTiling {
    /// (row, col, points) per tile moved to the wall
    pub placed: Vec<(usize, usize, u32)>,
    pub floor_penalty: u32,
    pub score: u32,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Board {
    pattern_lines: [PatternLine; BOARD_SIZE],
    wall: [[TileSpot; BOARD_SIZE]; BOARD_SIZE],
    floor: [TileSpot; FLOOR_CAPACITY],
    score: u32,
    final_bonus: Option<FinalBonus>,
}

impl Default for Board {
    fn default() -> Self {
        Board {
            pattern_lines: std::array::from_fn(|r| PatternLine::new(r as u8 + 1)),
            wall: std::array::from_fn(|r| {
                std::array::from_fn(|c| TileSpot::accepting(WALL_PATTERN[r][c]))
            }),
            floor: [TileSpot::open(); FLOOR_CAPACITY],
            score: 0,
            final_bonus: None,
        }
    }
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pattern_lines(&self) -> &[PatternLine; BOARD_SIZE] {
        &self.pattern_lines
    }

    pub fn wall(&self) -> &[[TileSpot; BOARD_SIZE]; BOARD_SIZE] {
        &self.wall
    }

    pub fn floor_line(&self) -> &[TileSpot; FLOOR_CAPACITY] {
        &self.floor
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn final_bonus(&self) -> Option<FinalBonus> {
        self.final_bonus
    }

    pub fn is_wall_filled(&self, row: usize, col: usize) -> bool {
        self.wall[row][col].is_occupied()
    }

    /// Whether wall row `row` already holds `color`
    pub fn wall_row_has(&self, row: usize, color: Color) -> bool {
        self.is_wall_filled(row, wall_column(row, color))
    }

    pub fn floor_len(&self) -> usize {
        self.floor.iter().filter(|s| s.is_occupied()).count()
    }

    /// Penalty the floor line will cost at the next wall tiling
    pub fn floor_penalty(&self) -> u32 {
        self.floor
            .iter()
            .zip(FLOOR_PENALTY)
            .filter(|(spot, _)| spot.is_occupied())
            .map(|(_, penalty)| penalty)
            .sum()
    }

    /// Colored tiles on this board (pattern lines, wall, floor)
    pub fn tile_count(&self) -> usize {
        let staged: usize = self.pattern_lines.iter().map(|l| l.count() as usize).sum();
        let walled = self.wall.iter().flatten().filter(|s| s.is_occupied()).count();
        let floored = self
            .floor
            .iter()
            .filter(|s| matches!(s.occupant(), Some(Token::Tile(_))))
            .count();
        staged + walled + floored
    }

    /// Check a pattern-line placement and return the color it would stage
    pub fn check_pattern_line(&self, tokens: &[Token], row: usize) -> Result<Color> {
        if row >= BOARD_SIZE {
            return Err(IllegalMove::RowOutOfRange(row.min(u8::MAX as usize) as u8).into());
        }
        let mut colors = tokens.iter().filter_map(|t| t.color());
        let color = colors.next().ok_or(IllegalMove::NoColoredTiles)?;
        if colors.any(|c| c != color) {
            return Err(IllegalMove::MixedColors.into());
        }

        let r = row as u8;
        if self.wall_row_has(row, color) {
            return Err(IllegalMove::ColorAlreadyOnWall { row: r }.into());
        }
        let line = &self.pattern_lines[row];
        if !line.holds_compatible(color) {
            return Err(IllegalMove::PatternLineColorMismatch { row: r }.into());
        }
        if line.is_full() {
            return Err(IllegalMove::PatternLineFull { row: r }.into());
        }
        Ok(color)
    }

    /// Stage `tokens` on pattern line `row`. Tiles beyond the line's capacity
    /// and the starting marker go to the floor line.
    pub fn place_on_pattern_line(
        &mut self,
        tokens: &[Token],
        row: usize,
        sink: &mut impl TileSink,
    ) -> Result<()> {
        let color = self.check_pattern_line(tokens, row)?;

        let tiles = tokens.iter().filter(|t| !t.is_marker()).count();
        let overflow = self.pattern_lines[row].fill(color, tiles);

        let mut to_floor: Vec<Token> = tokens.iter().copied().filter(|t| t.is_marker()).collect();
        to_floor.extend(std::iter::repeat(Token::Tile(color)).take(overflow));
        if !to_floor.is_empty() {
            self.place_on_floor_line(&to_floor, sink);
        }
        Ok(())
    }

    /// Fill floor slots left to right. Tiles that find no slot are returned
    /// to `sink`; a marker that finds no slot is simply not shown.
    pub fn place_on_floor_line(&mut self, tokens: &[Token], sink: &mut impl TileSink) {
        for &token in tokens {
            match self.floor.iter_mut().find(|s| !s.is_occupied()) {
                Some(spot) => {
                    spot.place(token);
                }
                None => match token {
                    Token::Tile(color) => sink.return_used_tile(color),
                    Token::StartingMarker => {
                        log::debug!("floor line full; starting marker kept off the board")
                    }
                },
            }
        }
    }

    /// Points for a tile just placed at (row, col): the tile itself plus the
    /// contiguous filled runs in each of the four directions.
    pub fn score_placement(&self, row: usize, col: usize) -> u32 {
        let filled = |r: usize, c: usize| self.wall[r][c].is_occupied();

        let left = (0..col).rev().take_while(|&c| filled(row, c)).count();
        let right = (col + 1..BOARD_SIZE).take_while(|&c| filled(row, c)).count();
        let up = (0..row).rev().take_while(|&r| filled(r, col)).count();
        let down = (row + 1..BOARD_SIZE).take_while(|&r| filled(r, col)).count();

        (1 + left + right + up + down) as u32
    }

    /// Round-end pass: move one tile of every full pattern line to the wall
    /// and score it, discard the rest of that line, then clear the floor line
    /// and apply its penalty. The score never drops below zero.
    pub fn do_wall_tiling(&mut self, sink: &mut impl TileSink) -> WallTiling {
        let mut report = WallTiling::default();
        let mut points = 0;

        for row in 0..BOARD_SIZE {
            if !self.pattern_lines[row].is_full() {
                continue;
            }
            let Some((color, count)) = self.pattern_lines[row].drain() else {
                continue;
            };
            let col = wall_column(row, color);

            if !self.wall[row][col].place(Token::Tile(color)) {
                log::warn!("wall cell ({row}, {col}) already filled; discarding pattern line {row}");
                sink.return_used_tiles(color, count as usize);
                continue;
            }

            let gained = self.score_placement(row, col);
            points += gained;
            report.placed.push((row, col, gained));
            sink.return_used_tiles(color, count as usize - 1);
        }

        report.floor_penalty = self.floor_penalty();
        for spot in &mut self.floor {
            if let Some(Token::Tile(color)) = spot.clear() {
                sink.return_used_tile(color);
            }
        }

        self.score = (self.score + points).saturating_sub(report.floor_penalty);
        report.score = self.score;
        report
    }

    fn row_complete(&self, row: usize) -> bool {
        (0..BOARD_SIZE).all(|col| self.is_wall_filled(row, col))
    }

    fn column_complete(&self, col: usize) -> bool {
        (0..BOARD_SIZE).all(|row| self.is_wall_filled(row, col))
    }

    fn color_complete(&self, color: Color) -> bool {
        (0..BOARD_SIZE).all(|row| self.wall_row_has(row, color))
    }

    pub fn completed_rows(&self) -> usize {
        (0..BOARD_SIZE).filter(|&r| self.row_complete(r)).count()
    }

    pub fn completed_columns(&self) -> usize {
        (0..BOARD_SIZE).filter(|&c| self.column_complete(c)).count()
    }

    pub fn completed_colors(&self) -> usize {
        ALL_COLORS.iter().filter(|&&c| self.color_complete(c)).count()
    }

    pub fn has_completed_horizontal_line(&self) -> bool {
        self.completed_rows() > 0
    }

    pub fn has_completed_vertical_line(&self) -> bool {
        self.completed_columns() > 0
    }

    pub fn has_completed_all_tiles_of_color(&self) -> bool {
        self.completed_colors() > 0
    }

    /// Add end-game bonuses. Applied once; later calls return the first result.
    pub fn calculate_final_bonus_scores(&mut self) -> FinalBonus {
        if let Some(bonus) = self.final_bonus {
            return bonus;
        }
        let rows = self.completed_rows();
        let columns = self.completed_columns();
        let colors = self.completed_colors();
        let bonus = FinalBonus {
            rows: rows as u8,
            columns: columns as u8,
            colors: colors as u8,
            points: rows as u32 * ROW_BONUS
                + columns as u32 * COLUMN_BONUS
                + colors as u32 * COLOR_BONUS,
        };
        self.score += bonus.points;
        self.final_bonus = Some(bonus);
        bonus
    }

    #[cfg(test)]
    pub(crate) fn fill_wall_cell(&mut self, row: usize, col: usize) {
        self.wall[row][col].place(Token::Tile(WALL_PATTERN[row][col]));
    }

    #[cfg(test)]
    pub(crate) fn set_score(&mut self, score: u32) {
        self.score = score;
    }
}
