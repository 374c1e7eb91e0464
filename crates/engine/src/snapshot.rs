//! Read-only views of a game, shaped for JSON clients.

use serde::Serialize;

use crate::{
    Board, Color, FinalBonus, Game, GameId, PatternLine, Phase, Player, PlayerId, Standing,
    TileFactory, TileSpot, Token, BOARD_SIZE, TILE_COLORS,
};

#[derive(Clone, Debug, Serialize)]
pub struct TileSpotView {
    pub accepts: Option<Color>,
    pub tile: Option<Token>,
}

#[derive(Clone, Debug, Serialize)]
pub struct BoardView {
    pub pattern_lines: Vec<PatternLine>,
    pub wall: Vec<Vec<TileSpotView>>,
    pub floor_line: Vec<TileSpotView>,
    pub floor_penalty: u32,
    pub score: u32,
    pub final_bonus: Option<FinalBonus>,
}

#[derive(Clone, Debug, Serialize)]
pub struct PlayerView {
    pub id: PlayerId,
    pub name: String,
    pub held: Vec<Token>,
    pub has_starting_marker: bool,
    pub board: BoardView,
}

#[derive(Clone, Debug, Serialize)]
pub struct DisplayView {
    pub id: u8,
    pub tiles: Vec<Color>,
}

#[derive(Clone, Debug, Serialize)]
pub struct FactoryView {
    pub displays: Vec<DisplayView>,
    pub center: Vec<Color>,
    pub center_has_starting_marker: bool,
    pub bag: [u16; TILE_COLORS],
    pub used_tiles: [u16; TILE_COLORS],
    pub is_empty: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct GameSnapshot {
    pub id: GameId,
    pub players: Vec<PlayerView>,
    pub factory: FactoryView,
    pub player_to_play: PlayerId,
    pub round_number: u32,
    pub phase: Phase,
    pub has_ended: bool,
    pub standings: Vec<Standing>,
}

impl From<&TileSpot> for TileSpotView {
    fn from(spot: &TileSpot) -> Self {
        TileSpotView {
            accepts: spot.accepted(),
            tile: spot.occupant(),
        }
    }
}

impl From<&Board> for BoardView {
    fn from(board: &Board) -> Self {
        BoardView {
            pattern_lines: board.pattern_lines().to_vec(),
            wall: (0..BOARD_SIZE)
                .map(|r| board.wall()[r].iter().map(TileSpotView::from).collect())
                .collect(),
            floor_line: board.floor_line().iter().map(TileSpotView::from).collect(),
            floor_penalty: board.floor_penalty(),
            score: board.score(),
            final_bonus: board.final_bonus(),
        }
    }
}

impl From<&Player> for PlayerView {
    fn from(player: &Player) -> Self {
        PlayerView {
            id: player.id(),
            name: player.name().to_string(),
            held: player.held().to_vec(),
            has_starting_marker: player.has_starting_marker(),
            board: player.board().into(),
        }
    }
}

impl From<&TileFactory> for FactoryView {
    fn from(factory: &TileFactory) -> Self {
        FactoryView {
            displays: factory
                .displays()
                .iter()
                .map(|d| DisplayView {
                    id: d.id(),
                    tiles: d.tiles().to_vec(),
                })
                .collect(),
            center: factory.center().tiles().to_vec(),
            center_has_starting_marker: factory.center().has_starting_marker(),
            bag: factory.bag().counts(),
            used_tiles: factory.used_tiles().counts(),
            is_empty: factory.is_empty(),
        }
    }
}

impl Game {
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            id: self.id(),
            players: self.players().iter().map(PlayerView::from).collect(),
            factory: self.factory().into(),
            player_to_play: self.player_to_play(),
            round_number: self.round_number(),
            phase: self.phase(),
            has_ended: self.has_ended(),
            standings: self.standings(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GameConfig, Seat};

    #[test]
    fn test_snapshot_json_shape() {
        let game = Game::new(
            GameId(3),
            vec![Seat::new(1, "ana"), Seat::new(2, "ben")],
            &GameConfig::with_seed(1),
        )
        .unwrap();
        let json = serde_json::to_value(game.snapshot()).unwrap();

        assert_eq!(json["id"], 3);
        assert_eq!(json["player_to_play"], 1);
        assert_eq!(json["round_number"], 1);
        assert_eq!(json["phase"], "awaiting_draw");
        assert_eq!(json["has_ended"], false);
        assert_eq!(json["factory"]["displays"].as_array().unwrap().len(), 5);
        assert_eq!(json["factory"]["center_has_starting_marker"], true);

        let board = &json["players"][0]["board"];
        assert_eq!(board["pattern_lines"][4]["capacity"], 5);
        assert_eq!(board["pattern_lines"][4]["color"], serde_json::Value::Null);
        assert_eq!(board["wall"][1][0]["accepts"], "teal");
        assert_eq!(board["floor_line"].as_array().unwrap().len(), 7);
        assert_eq!(board["score"], 0);
    }
}
