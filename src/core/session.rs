//! A running match: one [`Game`] plus the [`IdGenerator`] that feeds it.
//!
//! Front-ends (console, HTTP, simulator) drive a `Session` rather than a bare
//! `Game`. It adds the flows a front-end needs on top of the rules engine:
//! placement on behalf of whoever is seated, hand-off of the placement turn,
//! first-opponent targeting and the "miss passes the turn" convention.

use alloc::string::String;
use alloc::vec::Vec;
use rand::Rng;

use crate::core::ai::Strategy;
use crate::core::common::GameError;
use crate::core::config::{ship_name, GameConfig};
use crate::core::coordinate::{Coordinate, Orientation};
use crate::core::game::{Game, Phase, ShotResult};
use crate::core::ids::{IdGenerator, ShipId};
use crate::core::player::{Controller, Player};

/// Name and controller for one player of a new session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seat {
    pub name: String,
    pub controller: Controller,
}

impl Seat {
    pub fn human(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            controller: Controller::Human,
        }
    }

    pub fn automated(name: impl Into<String>, strategy: Strategy) -> Self {
        Self {
            name: name.into(),
            controller: Controller::Automated(strategy),
        }
    }
}

/// What happened on one turn of play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnOutcome {
    pub attacker: usize,
    pub defender: usize,
    pub coordinate: Coordinate,
    pub result: ShotResult,
    /// `true` when this shot ended the game.
    pub finished: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    game: Game,
    ids: IdGenerator,
}

impl Session {
    /// New session in phase `Setup` with one player per seat.
    pub fn new(config: &GameConfig, seats: &[Seat]) -> Result<Self, GameError> {
        let mut ids = IdGenerator::new();
        let players = seats
            .iter()
            .map(|seat| Player::with_controller(&mut ids, seat.name.clone(), config, seat.controller))
            .collect::<Result<Vec<_>, _>>()?;
        let game = Game::new(&mut ids, config.grid_size(), players)?;
        Ok(Self { game, ids })
    }

    /// Two humans named "Player 1" and "Player 2".
    pub fn two_player(config: &GameConfig) -> Result<Self, GameError> {
        Self::new(config, &[Seat::human("Player 1"), Seat::human("Player 2")])
    }

    /// Adopt a restored game; ids continue above everything it contains.
    pub fn resume(game: Game) -> Self {
        let ids = IdGenerator::after(&game);
        Self { game, ids }
    }

    /// Adopt a restored game together with an already reseeded generator.
    pub fn with_ids(game: Game, mut ids: IdGenerator) -> Self {
        ids.reseed_from(&game);
        Self { game, ids }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn ids(&self) -> &IdGenerator {
        &self.ids
    }

    /// Mutable access to the id generator, for creating entities outside the session.
    pub fn ids_mut(&mut self) -> &mut IdGenerator {
        &mut self.ids
    }

    pub fn into_game(self) -> Game {
        self.game
    }

    pub fn phase(&self) -> Phase {
        self.game.phase()
    }

    pub fn current_player(&self) -> &Player {
        self.game.current_player()
    }

    pub fn begin_placement(&mut self) -> Result<(), GameError> {
        self.game.begin_placement()
    }

    /// `true` when the seated player could place a ship of `size` at `start`.
    pub fn can_place_ship(&self, start: Coordinate, size: usize, orientation: Orientation) -> bool {
        self.game
            .can_place_ship(self.game.current_player_index(), start, size, orientation)
    }

    /// Place a ship for the seated player. Without a name the ship is named
    /// after its class. Once that player's fleet is complete during the
    /// placement phase, the next player with an incomplete fleet is seated.
    pub fn place_ship(
        &mut self,
        start: Coordinate,
        size: usize,
        orientation: Orientation,
        name: Option<&str>,
    ) -> Result<ShipId, GameError> {
        let idx = self.game.current_player_index();
        if !start.is_valid(self.game.grid_size()) {
            return Err(GameError::InvalidCoordinate(start));
        }
        let name = match name {
            Some(name) => String::from(name),
            None => {
                let same_size = self.game.player(idx)?
                    .fleet()
                    .ships()
                    .iter()
                    .filter(|s| s.size() == size)
                    .count();
                ship_name(size, same_size)
            }
        };
        let id = self
            .game
            .place_ship(&mut self.ids, idx, start, size, orientation, name)?;

        if self.game.phase() == Phase::Placement {
            self.seat_next_placer();
        }
        Ok(id)
    }

    /// If the seated player's fleet is complete, seat the next player (in
    /// turn order) whose fleet is not. No-op once every fleet is complete.
    pub fn seat_next_placer(&mut self) {
        if self.game.current_player().fleet().is_complete() && !self.all_fleets_ready() {
            while self.game.current_player().fleet().is_complete() {
                self.game.switch_turn();
            }
        }
    }

    /// Parse `orientation` (`H`, `-H`, `V`, `-V`) and place a ship at `(x, y)`.
    pub fn try_place_ship(
        &mut self,
        x: usize,
        y: usize,
        size: usize,
        orientation: &str,
        name: Option<&str>,
    ) -> Result<ShipId, GameError> {
        let orientation: Orientation = orientation.parse()?;
        self.place_ship(Coordinate::new(x, y), size, orientation, name)
    }

    /// Place every missing ship of the seated player at random.
    ///
    /// Uses the player's own strategy when automated; humans asking for a
    /// random layout get [`Strategy::Random`].
    pub fn auto_place_fleet<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), GameError> {
        let player = self.game.current_player();
        let strategy = player.strategy().unwrap_or(Strategy::Random);
        let missing = player.fleet().missing_sizes();
        let placements = strategy.choose_fleet_placement(player.grid(), &missing, rng)?;
        for p in placements {
            self.place_ship(p.start, p.size, p.orientation, None)?;
        }
        Ok(())
    }

    pub fn all_fleets_ready(&self) -> bool {
        self.game.players().iter().all(|p| p.fleet().is_complete())
    }

    /// Leave placement and start play.
    pub fn finish_placement(&mut self) -> Result<(), GameError> {
        self.game.start()
    }

    /// Index of the player the seated player fires at.
    pub fn target_index(&self) -> Result<usize, GameError> {
        self.game.target_of(self.game.current_player_index())
    }

    pub fn target_player(&self) -> Result<&Player, GameError> {
        self.game.player(self.target_index()?)
    }

    /// Fire from the seated player at its target. A miss passes the turn;
    /// hits, sinks and repeated shots keep it.
    pub fn play_shot(&mut self, coordinate: Coordinate) -> Result<TurnOutcome, GameError> {
        if self.game.phase() != Phase::Playing {
            return Err(GameError::WrongPhase(self.game.phase()));
        }
        let attacker = self.game.current_player_index();
        let defender = self.target_index()?;
        let result = self.game.shoot(attacker, defender, coordinate)?;
        let finished = self.game.is_finished();
        if result.passes_turn() && !finished {
            self.game.switch_turn();
        }
        Ok(TurnOutcome {
            attacker,
            defender,
            coordinate,
            result,
            finished,
        })
    }

    /// Let an automated seated player take one shot. `None` when the seated
    /// player is human.
    pub fn play_automated_turn<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> Result<Option<TurnOutcome>, GameError> {
        let strategy = match self.game.current_player().strategy() {
            Some(strategy) => strategy,
            None => return Ok(None),
        };
        let view = self.target_player()?.target_view();
        let target = strategy
            .choose_target(&view, rng)
            .ok_or(GameError::NoOpponent)?;
        self.play_shot(target).map(Some)
    }

    pub fn is_finished(&self) -> bool {
        self.game.is_finished()
    }

    pub fn winner(&self) -> Option<&Player> {
        self.game.winner()
    }

    /// Names of every player whose fleet is not yet complete.
    pub fn players_placing(&self) -> Vec<&str> {
        self.game
            .players()
            .iter()
            .filter(|p| !p.fleet().is_complete())
            .map(Player::name)
            .collect()
    }
}
