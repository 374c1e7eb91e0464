//! Interactive CLI to play Azul against random agents
//!
//! Usage: cargo run --bin play [--opponents 2] [--seed 42]

use std::io::{self, BufRead, Write};

use clap::Parser;
use rand::SeedableRng;

use azul::display::{
    display_board, format_draw, format_placement, render_standings, BOLD, DIM, RESET,
};
use azul_engine::{Agent, FirstPlayerRule, Game, GameConfig, GameId, PlayerId, RandomAgent, Seat};

/// Play Azul against random agents
#[derive(Parser, Debug)]
#[command(name = "play")]
#[command(about = "Play Azul in the terminal", long_about = None)]
struct Args {
    /// Number of computer opponents (1-3)
    #[arg(long, default_value_t = 1)]
    opponents: usize,

    /// Let the computer open instead of you
    #[arg(long)]
    ai_first: bool,

    /// Random seed
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

const HUMAN: PlayerId = PlayerId(1);

/// Ask for an index into `count` numbered choices; None on EOF or quit
fn prompt_choice(input: &mut impl BufRead, count: usize) -> Option<usize> {
    loop {
        print!("\n{BOLD}Enter move number:{RESET} ");
        let _ = io::stdout().flush();

        let mut line = String::new();
        match input.read_line(&mut line) {
            Ok(0) => return None,
            Err(_) => {
                println!("Error reading input, try again.");
                continue;
            }
            Ok(_) => {}
        }

        let line = line.trim();
        if line == "q" || line == "quit" {
            return None;
        }

        match line.parse::<usize>() {
            Ok(idx) if idx < count => return Some(idx),
            Ok(_) => println!("Invalid move number. Enter 0-{}", count - 1),
            Err(_) => println!("Please enter a number (or 'q' to quit)"),
        }
    }
}

/// One human turn; Ok(false) when the player quits
fn human_turn(
    game: &mut Game,
    input: &mut impl BufRead,
) -> Result<bool, Box<dyn std::error::Error>> {
    let draws = game.legal_draws();
    println!("{BOLD}Take tiles:{RESET}");
    for (i, draw) in draws.iter().enumerate() {
        println!("  {}: {}", i, format_draw(draw));
    }
    let Some(idx) = prompt_choice(input, draws.len()) else {
        return Ok(false);
    };
    game.draw(HUMAN, draws[idx])?;

    let placements = game.legal_placements();
    println!("{BOLD}Place them on:{RESET}");
    for (i, placement) in placements.iter().enumerate() {
        println!("  {}: {}", i, format_placement(placement));
    }
    let Some(idx) = prompt_choice(input, placements.len()) else {
        return Ok(false);
    };
    game.place(HUMAN, placements[idx])?;
    Ok(true)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let mut seats = vec![Seat::new(HUMAN.0, "you")];
    seats.extend((0..args.opponents).map(|i| Seat::new(i as u32 + 2, format!("bot{}", i + 1))));
    if args.ai_first {
        seats.rotate_left(1);
    }
    let config = GameConfig {
        first_player_rule: FirstPlayerRule::FirstSeated,
        ..GameConfig::with_seed(args.seed)
    };
    let mut game = Game::new(GameId(1), seats, &config)?;

    let mut rng = rand::rngs::StdRng::seed_from_u64(args.seed);
    let mut agent = RandomAgent::new();
    let stdin = io::stdin();
    let mut input = stdin.lock();

    println!("\n{BOLD}Welcome to Azul!{RESET}");
    println!("You are player {HUMAN}. Type 'q' to quit at any time.\n");

    while !game.has_ended() {
        display_board(&game, Some(HUMAN));

        let player = game.player_to_play();
        if player == HUMAN {
            if !human_turn(&mut game, &mut input)? {
                println!("Goodbye!");
                return Ok(());
            }
        } else {
            println!("{DIM}player {player} is thinking...{RESET}");
            let draw = agent.choose_draw(&game, &mut rng);
            game.draw(player, draw)?;
            let placement = agent.choose_placement(&game, &mut rng);
            game.place(player, placement)?;
            println!(
                "player {player} plays: {} -> {}",
                format_draw(&draw),
                format_placement(&placement)
            );
        }
    }

    display_board(&game, Some(HUMAN));
    println!("\n{BOLD}═══════════════════════════════════════{RESET}");
    println!("{BOLD}                GAME OVER{RESET}");
    println!("{BOLD}═══════════════════════════════════════{RESET}");
    let standings = game.standings();
    print!("{}", render_standings(&standings));
    if standings.iter().any(|s| s.winner && s.player == HUMAN) {
        println!("\n{BOLD}You win!{RESET}");
    } else {
        println!("\n{DIM}Better luck next time!{RESET}");
    }

    Ok(())
}
