//! Headless self-play for Azul
//!
//! Runs games between random agents and reports the standings. Useful for
//! soak-testing the rules engine and for producing sample snapshots.

use std::path::PathBuf;

use clap::Parser;
use rand::SeedableRng;

use azul::display::render_standings;
use azul_engine::{play_turn, GameConfig, GameRegistry, RandomAgent, Seat};

/// Random self-play games for Azul
#[derive(Parser, Debug)]
#[command(name = "azul")]
#[command(about = "Play Azul games between random agents", long_about = None)]
struct Args {
    /// Players per game (2-4)
    #[arg(long, default_value_t = 2)]
    players: usize,

    /// Number of games to play
    #[arg(long, default_value_t = 1)]
    games: usize,

    /// Random seed for the deal and for the agents
    #[arg(long)]
    seed: Option<u64>,

    /// Game config as JSON (missing fields take their defaults)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print each finished game's snapshot as JSON instead of the standings
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Safety cap on turns per game
    #[arg(long, default_value_t = 10_000)]
    max_turns: usize,
}

fn load_config(args: &Args) -> Result<GameConfig, Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)?;
            serde_json::from_str::<GameConfig>(&text)?
        }
        None => GameConfig::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    Ok(config)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();
    let config = load_config(&args)?;

    let mut registry = GameRegistry::new(config.clone());
    let mut rng = match config.seed {
        Some(seed) => rand::rngs::StdRng::seed_from_u64(seed),
        None => rand::rngs::StdRng::from_os_rng(),
    };
    let mut agent = RandomAgent::new();

    for g in 0..args.games {
        let seats = (0..args.players)
            .map(|i| Seat::new(i as u32 + 1, format!("bot{}", i + 1)))
            .collect();
        let id = registry.create_game(seats)?;

        let mut turns = 0;
        while !registry.game(id)?.has_ended() {
            if turns >= args.max_turns {
                log::warn!("game {id} hit the turn cap of {}", args.max_turns);
                break;
            }
            let player = play_turn(registry.game_mut(id)?, &mut agent, &mut rng)?;
            log::trace!("game {id}: player {player} moved");
            turns += 1;
        }

        let game = registry.remove(id)?;
        if args.json {
            println!("{}", serde_json::to_string(&game.snapshot())?);
        } else {
            println!(
                "Game {} ({} rounds, {} turns)",
                g + 1,
                game.round_number(),
                turns
            );
            print!("{}", render_standings(&game.standings()));
        }
    }

    Ok(())
}
