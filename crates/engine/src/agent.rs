//! Agent API for seats the engine plays itself

use rand::Rng;

use crate::{Draw, Game, IllegalMove, Placement, PlayerId, Result};

/// Trait for anything that can choose moves for the player to play:
/// random policy, scripted opponent, or human input.
///
/// Requirement: only moves from `Game::legal_draws` / `Game::legal_placements`
/// may be returned.
pub trait Agent {
    fn choose_draw(&mut self, game: &Game, rng: &mut impl Rng) -> Draw;

    fn choose_placement(&mut self, game: &Game, rng: &mut impl Rng) -> Placement;
}

/// Random agent that uniformly samples from legal moves
#[derive(Clone, Debug, Default)]
pub struct RandomAgent;

impl RandomAgent {
    pub fn new() -> Self {
        Self
    }
}

impl Agent for RandomAgent {
    fn choose_draw(&mut self, game: &Game, rng: &mut impl Rng) -> Draw {
        let draws = game.legal_draws();
        assert!(!draws.is_empty(), "No legal draws available for agent");
        draws[rng.random_range(0..draws.len())]
    }

    fn choose_placement(&mut self, game: &Game, rng: &mut impl Rng) -> Placement {
        let placements = game.legal_placements();
        assert!(!placements.is_empty(), "No legal placements available for agent");
        placements[rng.random_range(0..placements.len())]
    }
}

/// Let `agent` play one full turn (draft, then place) for the player to play
pub fn play_turn(game: &mut Game, agent: &mut impl Agent, rng: &mut impl Rng) -> Result<PlayerId> {
    if game.has_ended() {
        return Err(IllegalMove::GameOver.into());
    }
    let player = game.player_to_play();
    let draw = agent.choose_draw(game, rng);
    game.draw(player, draw)?;
    let placement = agent.choose_placement(game, rng);
    game.place(player, placement)?;
    Ok(player)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GameConfig, GameId, Seat};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_random_agent_selects_legal_moves() {
        let mut game = Game::new(
            GameId(1),
            vec![Seat::new(1, "a"), Seat::new(2, "b")],
            &GameConfig::with_seed(42),
        )
        .unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        let mut agent = RandomAgent::new();

        let draw = agent.choose_draw(&game, &mut rng);
        assert!(game.legal_draws().contains(&draw));
        game.draw(PlayerId(1), draw).unwrap();

        let placement = agent.choose_placement(&game, &mut rng);
        assert!(game.legal_placements().contains(&placement));
    }

    #[test]
    fn test_random_agents_finish_a_game() {
        let mut game = Game::new(
            GameId(1),
            vec![Seat::new(1, "a"), Seat::new(2, "b"), Seat::new(3, "c")],
            &GameConfig::with_seed(12345),
        )
        .unwrap();
        let mut rng = StdRng::seed_from_u64(12345);
        let mut agent = RandomAgent::new();

        let mut turns = 0;
        while !game.has_ended() && turns < 2000 {
            play_turn(&mut game, &mut agent, &mut rng).unwrap();
            assert_eq!(game.tile_count(), game.total_tiles());
            turns += 1;
        }
        assert!(game.has_ended(), "game should end");

        assert_eq!(
            play_turn(&mut game, &mut agent, &mut rng),
            Err(crate::GameError::IllegalMove(IllegalMove::GameOver))
        );
    }
}
