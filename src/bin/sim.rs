use naval_battle::{init_logging, GameConfig, Seat, Session, Strategy};
use rand::{rngs::SmallRng, SeedableRng};
use serde_json::json;

/// Automated players never repeat a cell, so no player needs more shots
/// than the opponent grid has cells.
fn shot_limit(config: &GameConfig) -> usize {
    config.grid_size() * config.grid_size()
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 3 {
        eprintln!("Usage: {} <seed1> <seed2>", args[0]);
        std::process::exit(1);
    }
    let seed1: u64 = args[1].parse()?;
    let seed2: u64 = args[2].parse()?;

    // each seat draws from its own stream so either seed alone changes its moves
    let mut rngs = [SmallRng::seed_from_u64(seed1), SmallRng::seed_from_u64(seed2)];

    let config = GameConfig::standard();
    let mut session = Session::new(
        &config,
        &[
            Seat::automated("player1", Strategy::Probability),
            Seat::automated("player2", Strategy::Probability),
        ],
    )
    .map_err(|e| anyhow::anyhow!(e))?;

    session.begin_placement().map_err(|e| anyhow::anyhow!(e))?;
    while !session.all_fleets_ready() {
        let seat = session.game().current_player_index();
        session
            .auto_place_fleet(&mut rngs[seat])
            .map_err(|e| anyhow::anyhow!(e))?;
    }
    session.finish_placement().map_err(|e| anyhow::anyhow!(e))?;

    let mut shots = [0usize; 2];
    while !session.is_finished() {
        let seat = session.game().current_player_index();
        if shots[seat] >= shot_limit(&config) {
            anyhow::bail!("player{} exceeded the shot limit", seat + 1);
        }
        let outcome = session
            .play_automated_turn(&mut rngs[seat])
            .map_err(|e| anyhow::anyhow!(e))?
            .ok_or_else(|| anyhow::anyhow!("seat {} is not automated", seat))?;
        shots[outcome.attacker] += 1;
    }

    let winner = session.winner().map(|p| p.name().to_string());
    let status = |idx: usize| {
        let lost = session.game().players()[idx].has_lost();
        if lost { "Lost" } else { "Won" }
    };

    let result = json!({
        "player1": {"status": status(0), "shots": shots[0]},
        "player2": {"status": status(1), "shots": shots[1]},
        "winner": winner,
    });

    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
