//! End-to-end games through the public API.
//!
//! The scripted round deals fixed displays so every draft, placement and
//! wall tiling below can be checked by hand.

use azul_engine::{
    play_turn, Color, DraftSource, Game, GameConfig, GameError, GameId, IllegalMove, Phase,
    PlayerId, RandomAgent, Seat, TileBag, TileFactory, Token,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

use Color::*;

const ANA: PlayerId = PlayerId(1);
const BEN: PlayerId = PlayerId(2);

/// Two players, five displays dealt as below, 80 tiles left in the bag
fn scripted_game() -> Game {
    let displays = vec![
        vec![Yellow, Blue, Blue, Blue],
        vec![Red, Red, Yellow, Yellow],
        vec![Black, Black, Teal, Teal],
        vec![Blue, Red, Black, Teal],
        vec![Yellow, Red, Black, Teal],
    ];
    let factory = TileFactory::dealt(displays, 4, TileBag::from_counts([16; 5]));
    Game::with_factory(
        GameId(7),
        vec![Seat::new(1, "ana"), Seat::new(2, "ben")],
        &GameConfig::with_seed(1),
        factory,
    )
    .unwrap()
}

fn snapshot_json(game: &Game) -> String {
    serde_json::to_string(&game.snapshot()).unwrap()
}

/// Draft then place on a pattern line, or the floor when `row` is None
fn turn(game: &mut Game, player: PlayerId, source: DraftSource, color: Color, row: Option<usize>) {
    game.take_tiles_from_factory(player, source, color).unwrap();
    match row {
        Some(row) => game.place_tiles_on_pattern_line(player, row).unwrap(),
        None => game.place_tiles_on_floor_line(player).unwrap(),
    }
}

// =============================================================================
// Scripted round
// =============================================================================

#[test]
fn test_opening_turns() {
    let mut game = scripted_game();
    assert_eq!(game.total_tiles(), 100);
    assert_eq!(game.player_to_play(), ANA);

    // Ana takes both reds from display 1; the yellows spill to the center
    game.take_tiles_from_factory(ANA, DraftSource::Display(1), Red)
        .unwrap();
    assert_eq!(
        game.player(ANA).unwrap().held(),
        &[Token::Tile(Red), Token::Tile(Red)]
    );
    assert_eq!(game.factory().center().tiles(), &[Yellow, Yellow]);
    assert!(game.factory().display(1).unwrap().is_empty());

    game.place_tiles_on_pattern_line(ANA, 1).unwrap();
    let line = &game.player(ANA).unwrap().board().pattern_lines()[1];
    assert_eq!((line.color(), line.count()), (Some(Red), 2));
    assert!(line.is_full());
    assert_eq!(game.player_to_play(), BEN);

    turn(&mut game, BEN, DraftSource::Display(0), Blue, Some(2));
    turn(&mut game, ANA, DraftSource::Display(2), Black, Some(3));
    assert_eq!(
        game.factory().center().tiles(),
        &[Yellow, Yellow, Yellow, Teal, Teal]
    );

    // First draft from the center carries the starting marker
    game.take_tiles_from_factory(BEN, DraftSource::Center, Yellow)
        .unwrap();
    assert!(game.player(BEN).unwrap().has_starting_marker());
    assert!(!game.factory().center().has_starting_marker());
    assert_eq!(game.player(BEN).unwrap().held().len(), 4);

    game.place_tiles_on_pattern_line(BEN, 4).unwrap();
    let board = game.player(BEN).unwrap().board();
    let line = &board.pattern_lines()[4];
    assert_eq!((line.color(), line.count()), (Some(Yellow), 3));
    assert_eq!(
        board.floor_line()[0].occupant(),
        Some(Token::StartingMarker)
    );
    assert_eq!(board.floor_len(), 1);
    assert_eq!(board.floor_penalty(), 1);
    assert_eq!(game.factory().center().tiles(), &[Teal, Teal]);
    assert_eq!(game.tile_count(), 100);
}

#[test]
fn test_rejected_moves_leave_game_untouched() {
    let mut game = scripted_game();
    turn(&mut game, ANA, DraftSource::Display(1), Red, Some(1));
    let before = snapshot_json(&game);

    assert_eq!(
        game.take_tiles_from_factory(BEN, DraftSource::Center, Blue),
        Err(GameError::IllegalMove(IllegalMove::ColorNotInSource(
            DraftSource::Center
        )))
    );
    assert_eq!(
        game.take_tiles_from_factory(ANA, DraftSource::Display(0), Blue),
        Err(GameError::OutOfTurn {
            expected: BEN,
            actual: ANA
        })
    );
    assert!(matches!(
        game.take_tiles_from_factory(BEN, DraftSource::Display(9), Blue),
        Err(GameError::InvalidReference(_))
    ));
    assert_eq!(snapshot_json(&game), before);

    // Ben now holds three blues; line 0 is too short but still legal, a
    // blocked line is not
    game.take_tiles_from_factory(BEN, DraftSource::Display(0), Blue)
        .unwrap();
    let holding = snapshot_json(&game);
    assert_eq!(
        game.place_tiles_on_pattern_line(BEN, 5),
        Err(GameError::IllegalMove(IllegalMove::RowOutOfRange(5)))
    );
    assert_eq!(snapshot_json(&game), holding);
    assert_eq!(game.phase(), Phase::AwaitingPlacement);
}

#[test]
fn test_line_color_mismatch_rejected() {
    let mut game = scripted_game();
    turn(&mut game, ANA, DraftSource::Display(1), Red, Some(3));
    turn(&mut game, BEN, DraftSource::Display(0), Blue, Some(2));

    game.take_tiles_from_factory(ANA, DraftSource::Display(2), Black)
        .unwrap();
    assert_eq!(
        game.place_tiles_on_pattern_line(ANA, 3),
        Err(GameError::IllegalMove(IllegalMove::PatternLineColorMismatch {
            row: 3
        }))
    );
    assert!(!game
        .legal_placements()
        .contains(&azul_engine::Placement::PatternLine(3)));
}

#[test]
fn test_round_end_scores_and_redeals() {
    let mut game = scripted_game();
    turn(&mut game, ANA, DraftSource::Display(1), Red, Some(1));
    turn(&mut game, BEN, DraftSource::Display(0), Blue, Some(2));
    turn(&mut game, ANA, DraftSource::Display(2), Black, Some(3));
    turn(&mut game, BEN, DraftSource::Center, Yellow, Some(3));
    turn(&mut game, ANA, DraftSource::Center, Teal, Some(4));
    turn(&mut game, BEN, DraftSource::Display(3), Red, Some(0));
    turn(&mut game, ANA, DraftSource::Display(4), Yellow, Some(0));
    turn(&mut game, BEN, DraftSource::Center, Black, None);
    turn(&mut game, ANA, DraftSource::Center, Teal, Some(4));
    turn(&mut game, BEN, DraftSource::Center, Blue, Some(1));
    assert_eq!(game.round_number(), 1);
    assert_eq!(game.factory().center().tiles(), &[Red]);

    // Last tile on the table: the round ends inside this call
    turn(&mut game, ANA, DraftSource::Center, Red, None);
    assert_eq!(game.round_number(), 2);
    assert_eq!(game.phase(), Phase::AwaitingDraw);

    // Ana: yellow at (0,1) and red at (1,3), one point each, minus one on the floor
    let ana = game.player(ANA).unwrap().board();
    assert!(ana.is_wall_filled(0, 1));
    assert!(ana.is_wall_filled(1, 3));
    assert_eq!(ana.score(), 1);
    assert_eq!(ana.floor_len(), 0);
    assert_eq!(ana.pattern_lines()[3].count(), 2);
    assert_eq!(ana.pattern_lines()[4].count(), 4);

    // Ben: red at (0,2) and blue at (2,2), two points, marker and two blacks
    // on the floor cost four; the score stops at zero
    let ben = game.player(BEN).unwrap().board();
    assert!(ben.is_wall_filled(0, 2));
    assert!(ben.is_wall_filled(2, 2));
    assert_eq!(ben.score(), 0);
    assert_eq!(ben.pattern_lines()[3].count(), 3);
    assert_eq!(ben.pattern_lines()[1].count(), 1);

    // The marker holder opens, the marker is back in the center
    assert_eq!(game.player_to_play(), BEN);
    assert!(game.factory().center().has_starting_marker());
    assert!(game.players().iter().all(|p| !p.has_starting_marker()));

    assert_eq!(game.factory().used_tiles().len(), 6);
    assert_eq!(game.factory().bag().len(), 60);
    assert!(game
        .factory()
        .displays()
        .iter()
        .all(|d| d.tiles().len() == 4));
    assert_eq!(game.tile_count(), 100);
}

// =============================================================================
// Random games
// =============================================================================

#[test]
fn test_random_games_for_every_player_count() {
    for players in 2..=4u32 {
        let seats = (1..=players).map(|i| Seat::new(i, format!("p{i}"))).collect();
        let mut game = Game::new(GameId(players as u64), seats, &GameConfig::with_seed(99)).unwrap();
        let mut rng = StdRng::seed_from_u64(99);
        let mut agent = RandomAgent::new();

        let mut turns = 0;
        while !game.has_ended() && turns < 5000 {
            play_turn(&mut game, &mut agent, &mut rng).unwrap();
            assert_eq!(game.tile_count(), game.total_tiles());
            turns += 1;
        }

        assert!(game.has_ended(), "{players}-player game should end");
        assert!(game
            .players()
            .iter()
            .any(|p| p.board().has_completed_horizontal_line()));
        assert!(game
            .players()
            .iter()
            .all(|p| p.board().final_bonus().is_some()));

        let standings = game.standings();
        assert_eq!(standings.len(), players as usize);
        assert!(standings[0].winner);
        assert!(standings.windows(2).all(|w| w[0].score >= w[1].score));
    }
}

#[test]
fn test_ended_game_rejects_moves() {
    let seats = vec![Seat::new(1, "ana"), Seat::new(2, "ben")];
    let mut game = Game::new(GameId(1), seats, &GameConfig::with_seed(5)).unwrap();
    let mut rng = StdRng::seed_from_u64(5);
    let mut agent = RandomAgent::new();
    while !game.has_ended() {
        play_turn(&mut game, &mut agent, &mut rng).unwrap();
    }

    let player = game.player_to_play();
    assert_eq!(
        game.take_tiles_from_factory(player, DraftSource::Center, Red),
        Err(GameError::IllegalMove(IllegalMove::GameOver))
    );
    assert!(game.legal_draws().is_empty());
    assert!(game.legal_placements().is_empty());
}
