//! Text rendering of grids and turn information.
//!
//! Axes are labelled 1-based to match what players type.

use std::fmt::Write;

use crate::core::{CellStatus, Coordinate, Game, Player, ShotResult, TargetView};
use crate::core::session::TurnOutcome;

fn column_header(out: &mut String, size: usize) {
    out.push_str("   ");
    for x in 1..=size {
        let _ = write!(out, "{:>3}", x);
    }
    out.push('\n');
}

fn render_rows<F>(size: usize, symbol: F) -> String
where
    F: Fn(Coordinate) -> char,
{
    let mut out = String::new();
    column_header(&mut out, size);
    for y in 0..size {
        let _ = write!(out, "{:>3}", y + 1);
        for x in 0..size {
            let _ = write!(out, "{:>3}", symbol(Coordinate::new(x, y)));
        }
        out.push('\n');
    }
    out
}

/// Opponent grid as the attacker sees it: `X` hit or sunk, `?` miss,
/// `O` not fired upon.
pub fn render_target(view: &TargetView) -> String {
    render_rows(view.size(), |c| match view.status(c) {
        Some(CellStatus::Hit) | Some(CellStatus::Sunk) => 'X',
        Some(CellStatus::Miss) => '?',
        _ => 'O',
    })
}

/// A player's own grid: `S` ship, `X` hit, `#` sunk, `?` miss, `.` water.
pub fn render_own(player: &Player) -> String {
    render_rows(player.grid().size(), |c| match player.display_status(c) {
        Ok(CellStatus::Ship) => 'S',
        Ok(CellStatus::Hit) => 'X',
        Ok(CellStatus::Sunk) => '#',
        Ok(CellStatus::Miss) => '?',
        _ => '.',
    })
}

/// One-line summary of whose turn it is.
pub fn render_turn_header(game: &Game) -> String {
    let current = game.current_player();
    let afloat = current.fleet().remaining_sizes().len();
    format!(
        "=== {} to play ({} ship{} afloat) ===",
        current.name(),
        afloat,
        if afloat == 1 { "" } else { "s" }
    )
}

/// Human readable report of a resolved shot.
pub fn describe_shot(game: &Game, outcome: &TurnOutcome) -> String {
    let attacker = game
        .player(outcome.attacker)
        .map(Player::name)
        .unwrap_or("?");
    let x = outcome.coordinate.x() + 1;
    let y = outcome.coordinate.y() + 1;
    let what = match outcome.result {
        ShotResult::Hit => "hit!".to_string(),
        ShotResult::Miss => "miss.".to_string(),
        ShotResult::Sunk => {
            let sunk = game
                .player(outcome.defender)
                .ok()
                .and_then(|p| p.fleet().ship_at(outcome.coordinate))
                .map(|s| s.name().to_string())
                .unwrap_or_else(|| "a ship".to_string());
            format!("hit and sunk {}!", sunk)
        }
        ShotResult::AlreadyHit => "already hit there, try again.".to_string(),
        ShotResult::AlreadyMiss => "already missed there, try again.".to_string(),
    };
    format!("{} fires at {} {}: {}", attacker, x, y, what)
}
