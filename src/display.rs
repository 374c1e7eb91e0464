//! Shared display utilities for rendering Azul games in the terminal
//!
//! Provides colorized, human-readable output for boards, the factory, and moves.

use std::fmt::Write;

use azul_engine::{
    Board, Color, DraftSource, Draw, Game, Placement, PlayerId, Standing, Token, BOARD_SIZE,
    WALL_PATTERN,
};

// ANSI color codes for tile display
pub const BLUE: &str = "\x1b[94m";
pub const YELLOW: &str = "\x1b[93m";
pub const RED: &str = "\x1b[91m";
pub const BLACK: &str = "\x1b[90m";
pub const TEAL: &str = "\x1b[96m";
pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m";

pub fn color_code(color: Color) -> &'static str {
    match color {
        Color::Blue => BLUE,
        Color::Yellow => YELLOW,
        Color::Red => RED,
        Color::Black => BLACK,
        Color::Teal => TEAL,
    }
}

pub fn color_char(color: Color) -> char {
    match color {
        Color::Blue => 'B',
        Color::Yellow => 'Y',
        Color::Red => 'R',
        Color::Black => 'K',
        Color::Teal => 'T',
    }
}

pub fn display_tile(color: Color) -> String {
    format!("{}{}{}", color_code(color), color_char(color), RESET)
}

pub fn display_token(token: Token) -> String {
    match token {
        Token::Tile(c) => display_tile(c),
        Token::StartingMarker => format!("{BOLD}1{RESET}"),
    }
}

fn source_label(source: DraftSource) -> String {
    match source {
        DraftSource::Display(d) => format!("D{d}"),
        DraftSource::Center => "Center".to_string(),
    }
}

pub fn format_draw(draw: &Draw) -> String {
    format!("{} {}", source_label(draw.source), display_tile(draw.color))
}

pub fn format_placement(placement: &Placement) -> String {
    match placement {
        Placement::PatternLine(r) => format!("Line {}", r + 1),
        Placement::FloorLine => "Floor".to_string(),
    }
}

/// Pattern lines beside the wall, then the floor line
pub fn render_board(board: &Board) -> String {
    let mut out = String::new();
    out.push_str("  Pattern Lines          Wall\n");

    for row in 0..BOARD_SIZE {
        let line = &board.pattern_lines()[row];
        let cap = line.capacity() as usize;

        out.push_str("  ");
        for _ in 0..(BOARD_SIZE - cap) {
            out.push_str("  ");
        }
        for _ in 0..line.remaining() {
            let _ = write!(out, "{DIM}.{RESET} ");
        }
        if let Some(color) = line.color() {
            for _ in 0..line.count() {
                let _ = write!(out, "{} ", display_tile(color));
            }
        }

        out.push_str(" -> ");

        for (col, spot) in board.wall()[row].iter().enumerate() {
            match spot.occupant() {
                Some(token) => {
                    let _ = write!(out, "{} ", display_token(token));
                }
                // Show expected color dimmed
                None => {
                    let _ = write!(out, "{DIM}{}{RESET} ", color_char(WALL_PATTERN[row][col]));
                }
            }
        }
        out.push('\n');
    }

    out.push_str("  Floor: ");
    if board.floor_len() == 0 {
        let _ = write!(out, "{DIM}(empty){RESET}");
    } else {
        for token in board.floor_line().iter().filter_map(|s| s.occupant()) {
            let _ = write!(out, "{} ", display_token(token));
        }
        let _ = write!(out, " (-{})", board.floor_penalty());
    }
    out.push('\n');
    out
}

/// The whole table: displays, center, and every player's board.
///
/// If `highlight` is Some, that player's board is shown with emphasis.
pub fn render_game(game: &Game, highlight: Option<PlayerId>) -> String {
    let mut out = String::new();
    let rule = "══════════════════════════════════════════════════════════════";
    let _ = writeln!(out, "\n{BOLD}{rule}{RESET}");
    let _ = writeln!(
        out,
        "{BOLD}  Round {}{RESET}   |   To play: {}",
        game.round_number(),
        game.player_to_play()
    );
    let _ = writeln!(out, "{BOLD}{rule}{RESET}\n");

    let _ = writeln!(out, "{BOLD}DISPLAYS:{RESET}");
    for display in game.factory().displays() {
        let _ = write!(out, "  D{}: ", display.id());
        if display.is_empty() {
            let _ = write!(out, "{DIM}(empty){RESET}");
        } else {
            for &color in display.tiles() {
                let _ = write!(out, "{} ", display_tile(color));
            }
        }
        out.push('\n');
    }

    let center = game.factory().center();
    let _ = write!(out, "\n{BOLD}CENTER:{RESET} ");
    if center.has_starting_marker() {
        let _ = write!(out, "{} ", display_token(Token::StartingMarker));
    }
    if center.is_empty() && !center.has_starting_marker() {
        let _ = write!(out, "{DIM}(empty){RESET}");
    }
    for &color in center.tiles() {
        let _ = write!(out, "{} ", display_tile(color));
    }
    out.push_str("\n\n");

    for player in game.players() {
        let style = if highlight == Some(player.id()) { BOLD } else { DIM };
        let _ = writeln!(
            out,
            "{style}{} [{}] (Score: {}){RESET}",
            player.name(),
            player.id(),
            player.board().score()
        );
        if !player.held().is_empty() {
            out.push_str("  Holding: ");
            for &token in player.held() {
                let _ = write!(out, "{} ", display_token(token));
            }
            out.push('\n');
        }
        out.push_str(&render_board(player.board()));
        out.push('\n');
    }
    out
}

pub fn render_standings(standings: &[Standing]) -> String {
    let mut out = String::new();
    for s in standings {
        let marker = if s.winner { " *" } else { "" };
        let _ = writeln!(
            out,
            "  {}. {} [{}]  {} pts, {} rows{marker}",
            s.rank, s.name, s.player, s.score, s.completed_rows
        );
    }
    out
}

/// Print the full table to stdout
pub fn display_board(game: &Game, highlight: Option<PlayerId>) {
    print!("{}", render_game(game, highlight));
}
