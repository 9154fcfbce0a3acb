//! Console front-end.
//!
//! A [`Console`] drives a [`Session`] from line-based input: ship placement
//! for every human seat, then turns until the game ends or a player quits.
//! Automated seats play without prompting. Input and output are generic so
//! tests can script whole games.

pub mod command;
pub mod interface;

pub use command::{parse_placement, parse_turn, CommandError, PlacementCommand, TurnCommand};
pub use interface::*;

use std::io::{BufRead, Write};

use rand::Rng;

use crate::core::{Phase, Session};
use crate::persistence::default_save_path;

/// How a console run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleOutcome {
    /// Game over; `winner` is `None` when no fleet survived.
    Finished { winner: Option<String> },
    /// A player quit or input ran out.
    Quit,
}

pub struct Console<R, W, G> {
    session: Session,
    input: R,
    output: W,
    rng: G,
    save_name: String,
}

impl<R: BufRead, W: Write, G: Rng> Console<R, W, G> {
    pub fn new(session: Session, input: R, output: W, rng: G) -> Self {
        Self {
            session,
            input,
            output,
            rng,
            save_name: "game".to_string(),
        }
    }

    /// Name used for `save` without a path (`saves/<name>.save`).
    pub fn with_save_name(mut self, name: impl Into<String>) -> Self {
        self.save_name = name.into();
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn into_session(self) -> Session {
        self.session
    }

    /// Read one line; `None` on end of input.
    fn prompt(&mut self, text: &str) -> anyhow::Result<Option<String>> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }

    pub fn run(&mut self) -> anyhow::Result<ConsoleOutcome> {
        if self.session.phase() == Phase::Setup {
            self.session
                .begin_placement()
                .map_err(|e| anyhow::anyhow!(e))?;
        }
        if self.session.phase() == Phase::Placement {
            if !self.place_fleets()? {
                return Ok(ConsoleOutcome::Quit);
            }
            self.session
                .finish_placement()
                .map_err(|e| anyhow::anyhow!(e))?;
            writeln!(self.output, "All fleets placed. Battle begins!")?;
        }
        self.play()
    }

    /// Returns `false` when the player quit during placement.
    fn place_fleets(&mut self) -> anyhow::Result<bool> {
        let grid_size = self.session.game().grid_size();
        while !self.session.all_fleets_ready() {
            let player = self.session.current_player();
            if player.is_automated() {
                let name = player.name().to_string();
                self.session
                    .auto_place_fleet(&mut self.rng)
                    .map_err(|e| anyhow::anyhow!(e))?;
                writeln!(self.output, "{} has placed its fleet.", name)?;
                continue;
            }

            let size = match player.fleet().missing_sizes().first() {
                Some(&size) => size,
                None => {
                    self.session.seat_next_placer();
                    continue;
                }
            };
            let board = render_own(player);
            let text = format!(
                "{}\n{}, place a ship of length {} (x y H|-H|V|-V, r for random): ",
                board,
                player.name(),
                size
            );
            let line = match self.prompt(&text)? {
                Some(line) => line,
                None => return Ok(false),
            };
            match parse_placement(&line, grid_size) {
                Ok(PlacementCommand::Quit) => return Ok(false),
                Ok(PlacementCommand::Random) => {
                    if let Err(e) = self.session.auto_place_fleet(&mut self.rng) {
                        writeln!(self.output, "Error: {}", e)?;
                    }
                }
                Ok(PlacementCommand::Place { start, orientation }) => {
                    if let Err(e) = self.session.place_ship(start, size, orientation, None) {
                        writeln!(self.output, "Error: {}", e)?;
                    }
                }
                Err(e) => writeln!(self.output, "Error: {}", e)?,
            }
        }
        Ok(true)
    }

    fn play(&mut self) -> anyhow::Result<ConsoleOutcome> {
        let grid_size = self.session.game().grid_size();
        while !self.session.is_finished() {
            if let Some(outcome) = self
                .session
                .play_automated_turn(&mut self.rng)
                .map_err(|e| anyhow::anyhow!(e))?
            {
                writeln!(self.output, "{}", describe_shot(self.session.game(), &outcome))?;
                continue;
            }

            let game = self.session.game();
            let target = self
                .session
                .target_player()
                .map_err(|e| anyhow::anyhow!(e))?;
            let text = format!(
                "{}\nTarget grid:\n{}\nYour grid:\n{}\nShoot (x y), save [path] or q: ",
                render_turn_header(game),
                render_target(&target.target_view()),
                render_own(game.current_player())
            );
            let line = match self.prompt(&text)? {
                Some(line) => line,
                None => return Ok(ConsoleOutcome::Quit),
            };
            match parse_turn(&line, grid_size) {
                Ok(TurnCommand::Quit) => return Ok(ConsoleOutcome::Quit),
                Ok(TurnCommand::Save(path)) => {
                    let path = path.unwrap_or_else(|| default_save_path(&self.save_name));
                    match self.session.save(&path) {
                        Ok(()) => writeln!(self.output, "Game saved to {}", path.display())?,
                        Err(e) => writeln!(self.output, "Error: {}", e)?,
                    }
                }
                Ok(TurnCommand::Shoot(coordinate)) => match self.session.play_shot(coordinate) {
                    Ok(outcome) => {
                        writeln!(self.output, "{}", describe_shot(self.session.game(), &outcome))?
                    }
                    Err(e) => writeln!(self.output, "Error: {}", e)?,
                },
                Err(e) => writeln!(self.output, "Error: {}", e)?,
            }
        }

        let winner = self.session.winner().map(|p| p.name().to_string());
        match &winner {
            Some(name) => writeln!(self.output, "Game over, {} wins!", name)?,
            None => writeln!(self.output, "Game over, no fleet survived.")?,
        }
        Ok(ConsoleOutcome::Finished { winner })
    }
}
