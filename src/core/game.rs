//! Phase state machine, ship placement and shot resolution.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::core::cell::CellStatus;
use crate::core::common::GameError;
use crate::core::coordinate::{Coordinate, Orientation};
use crate::core::grid::Grid;
use crate::core::ids::{GameId, IdGenerator, ShipId};
use crate::core::player::Player;
use crate::core::ship::Ship;

/// Coarse lifecycle stage of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    Setup,
    Placement,
    Playing,
    Finished,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Setup => "SETUP",
            Phase::Placement => "PLACEMENT",
            Phase::Playing => "PLAYING",
            Phase::Finished => "FINISHED",
        };
        f.write_str(name)
    }
}

/// Outcome of a single shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "std",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "SCREAMING_SNAKE_CASE")
)]
pub enum ShotResult {
    Hit,
    Miss,
    /// Hit that destroyed the last intact cell of a ship.
    Sunk,
    /// Cell was already hit; nothing changed.
    AlreadyHit,
    /// Cell was already missed; nothing changed.
    AlreadyMiss,
}

impl ShotResult {
    /// `true` for shots that changed the defender's grid.
    pub fn is_fresh(&self) -> bool {
        matches!(self, ShotResult::Hit | ShotResult::Miss | ShotResult::Sunk)
    }

    /// Hits and sinks grant the shooter another shot; only a miss passes the turn.
    pub fn passes_turn(&self) -> bool {
        matches!(self, ShotResult::Miss)
    }
}

impl fmt::Display for ShotResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ShotResult::Hit => "HIT",
            ShotResult::Miss => "MISS",
            ShotResult::Sunk => "SUNK",
            ShotResult::AlreadyHit => "ALREADY_HIT",
            ShotResult::AlreadyMiss => "ALREADY_MISS",
        };
        f.write_str(name)
    }
}

/// Orchestrates players, turn order and phases. The only place shots are
/// resolved and winners decided.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Game {
    id: GameId,
    grid_size: usize,
    players: Vec<Player>,
    current: usize,
    phase: Phase,
}

impl Game {
    /// New game in phase `Setup`. Needs at least two players whose grids
    /// all have `grid_size`.
    pub fn new(
        ids: &mut IdGenerator,
        grid_size: usize,
        players: Vec<Player>,
    ) -> Result<Self, GameError> {
        if players.len() < 2 {
            return Err(GameError::TooFewPlayers(players.len()));
        }
        if let Some(p) = players.iter().find(|p| p.grid().size() != grid_size) {
            return Err(GameError::GridSizeMismatch {
                expected: grid_size,
                found: p.grid().size(),
            });
        }
        let game = Game {
            id: ids.next_game_id()?,
            grid_size,
            players,
            current: 0,
            phase: Phase::Setup,
        };
        log::debug!(
            "game {} created: {}x{}, {} players",
            game.id,
            grid_size,
            grid_size,
            game.players.len()
        );
        Ok(game)
    }

    pub fn id(&self) -> GameId {
        self.id
    }

    pub fn grid_size(&self) -> usize {
        self.grid_size
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, idx: usize) -> Result<&Player, GameError> {
        self.players.get(idx).ok_or(GameError::UnknownPlayer(idx))
    }

    pub fn player_mut(&mut self, idx: usize) -> Result<&mut Player, GameError> {
        self.players.get_mut(idx).ok_or(GameError::UnknownPlayer(idx))
    }

    pub fn current_player_index(&self) -> usize {
        self.current
    }

    pub fn current_player(&self) -> &Player {
        &self.players[self.current]
    }

    /// `Setup → Placement`. Calling it again during placement is a no-op.
    pub fn begin_placement(&mut self) -> Result<(), GameError> {
        match self.phase {
            Phase::Setup => {
                self.phase = Phase::Placement;
                log::debug!("game {} entered placement", self.id);
                Ok(())
            }
            Phase::Placement => Ok(()),
            phase => Err(GameError::WrongPhase(phase)),
        }
    }

    /// Enter `Playing` with the first player to move. Every fleet must be
    /// complete; on failure the game is left untouched.
    pub fn start(&mut self) -> Result<(), GameError> {
        if !matches!(self.phase, Phase::Placement | Phase::Playing) {
            return Err(GameError::WrongPhase(self.phase));
        }
        if let Some(p) = self.players.iter().find(|p| !p.fleet().is_complete()) {
            return Err(GameError::FleetIncomplete(p.id()));
        }
        self.phase = Phase::Playing;
        self.current = 0;
        log::info!("game {} started", self.id);
        Ok(())
    }

    /// Pass the turn to the next player in order.
    pub fn switch_turn(&mut self) {
        self.current = (self.current + 1) % self.players.len();
    }

    /// Indices of every player other than `idx`, in seating order.
    pub fn opponents(&self, idx: usize) -> Vec<usize> {
        (0..self.players.len()).filter(|&i| i != idx).collect()
    }

    /// The player `idx` fires at: the first opponent in seating order.
    pub fn target_of(&self, idx: usize) -> Result<usize, GameError> {
        self.player(idx)?;
        self.opponents(idx)
            .first()
            .copied()
            .ok_or(GameError::NoOpponent)
    }

    /// `true` when a ship of `size` could go at `start` for player `idx`:
    /// in bounds, clear on the grid and clear of every fleet coordinate.
    pub fn can_place_ship(
        &self,
        idx: usize,
        start: Coordinate,
        size: usize,
        orientation: Orientation,
    ) -> bool {
        self.placement_coordinates(idx, start, size, orientation)
            .is_ok()
    }

    fn placement_coordinates(
        &self,
        idx: usize,
        start: Coordinate,
        size: usize,
        orientation: Orientation,
    ) -> Result<Vec<Coordinate>, GameError> {
        let player = self.player(idx)?;
        if size > self.grid_size {
            return Err(GameError::ShipOutOfBounds);
        }
        let coords = Grid::generate_ship_coordinates(start, size, orientation)?;
        if coords.iter().any(|c| !c.is_valid(self.grid_size)) {
            return Err(GameError::ShipOutOfBounds);
        }
        if !player.grid().can_place_ship(start, size, orientation) {
            return Err(GameError::ShipOverlaps);
        }
        if !player.fleet().can_add_coordinates(&coords) {
            return Err(GameError::ShipOverlaps);
        }
        Ok(coords)
    }

    /// Place a new ship for player `idx`, committing it to both grid and
    /// fleet or to neither. Only allowed before play starts.
    pub fn place_ship(
        &mut self,
        ids: &mut IdGenerator,
        idx: usize,
        start: Coordinate,
        size: usize,
        orientation: Orientation,
        name: impl Into<String>,
    ) -> Result<ShipId, GameError> {
        if !matches!(self.phase, Phase::Setup | Phase::Placement) {
            return Err(GameError::WrongPhase(self.phase));
        }
        let coords = self.placement_coordinates(idx, start, size, orientation)?;
        let ship = Ship::new(ids.next_ship_id()?, name, coords, orientation)?;
        let id = ship.id();

        let player = self.player_mut(idx)?;
        player.grid_mut().place_ship(&ship)?;
        log::debug!(
            "{} placed {} ({}) at {} {}",
            player.name(),
            ship.name(),
            id,
            start,
            orientation
        );
        player.fleet_mut().add_ship(ship);
        Ok(id)
    }

    /// Fire from `attacker` at `defender`'s grid. Does not move the turn.
    pub fn shoot(
        &mut self,
        attacker: usize,
        defender: usize,
        coordinate: Coordinate,
    ) -> Result<ShotResult, GameError> {
        self.player(attacker)?;
        self.player(defender)?;
        if attacker == defender {
            return Err(GameError::SelfTarget);
        }
        if !coordinate.is_valid(self.grid_size) {
            return Err(GameError::InvalidCoordinate(coordinate));
        }
        if self.phase == Phase::Finished {
            return Err(GameError::WrongPhase(self.phase));
        }

        let result = self.players[defender].receive_shot(coordinate)?;
        log::debug!(
            "{} -> {} at {}: {}",
            self.players[attacker].name(),
            self.players[defender].name(),
            coordinate,
            result
        );

        if self.phase == Phase::Playing && self.is_finished() {
            self.phase = Phase::Finished;
            match self.winner() {
                Some(w) => log::info!("game {} finished, {} wins", self.id, w.name()),
                None => log::info!("game {} finished without a winner", self.id),
            }
        }
        Ok(result)
    }

    /// `true` once the game is `Finished`, or while playing when at most one
    /// player still has ships afloat.
    pub fn is_finished(&self) -> bool {
        match self.phase {
            Phase::Finished => true,
            Phase::Playing => self.players.iter().filter(|p| !p.has_lost()).count() <= 1,
            _ => false,
        }
    }

    /// Index of the only player with ships afloat once the game is over.
    pub fn winner_index(&self) -> Option<usize> {
        if !self.is_finished() {
            return None;
        }
        let mut alive = self
            .players
            .iter()
            .enumerate()
            .filter(|(_, p)| !p.has_lost());
        match (alive.next(), alive.next()) {
            (Some((idx, _)), None) => Some(idx),
            _ => None,
        }
    }

    pub fn winner(&self) -> Option<&Player> {
        self.winner_index().map(|idx| &self.players[idx])
    }

    /// Check invariants a freshly decoded game must satisfy.
    pub(crate) fn check_integrity(&self) -> Result<(), GameError> {
        if self.players.len() < 2 {
            return Err(GameError::TooFewPlayers(self.players.len()));
        }
        if self.current >= self.players.len() {
            return Err(GameError::Inconsistent("turn pointer out of range"));
        }
        let mut player_ids = Vec::new();
        let mut ship_ids = Vec::new();
        for player in &self.players {
            let grid = player.grid();
            if grid.size() != self.grid_size {
                return Err(GameError::GridSizeMismatch {
                    expected: self.grid_size,
                    found: grid.size(),
                });
            }
            grid.check_integrity()?;
            player_ids.push(player.id());

            let fleet = player.fleet();
            if fleet.required_sizes().is_empty() || fleet.required_sizes().contains(&0) {
                return Err(GameError::Inconsistent("invalid fleet composition"));
            }
            let mut seen: Vec<Coordinate> = Vec::new();
            for ship in fleet.ships() {
                ship.check_geometry()?;
                ship_ids.push(ship.id());
                for &c in ship.coordinates() {
                    if seen.contains(&c) {
                        return Err(GameError::Inconsistent("ships overlap"));
                    }
                    seen.push(c);
                    match grid.cell(c) {
                        Ok(CellStatus::Ship) | Ok(CellStatus::Hit) | Ok(CellStatus::Sunk) => {}
                        _ => return Err(GameError::Inconsistent("ship cell not marked on grid")),
                    }
                }
                let all_hit = ship
                    .coordinates()
                    .iter()
                    .all(|&c| grid.cell(c).map(|s| s.is_hit()).unwrap_or(false));
                if all_hit != ship.is_sunk() {
                    return Err(GameError::Inconsistent("sunk flag disagrees with hits"));
                }
            }
        }
        // IdGenerator never hands out u32::MAX
        let reserved = self.id.get() == u32::MAX
            || player_ids.iter().any(|id| id.get() == u32::MAX)
            || ship_ids.iter().any(|id| id.get() == u32::MAX);
        if reserved {
            return Err(GameError::Inconsistent("identity out of range"));
        }
        if has_duplicates(&mut player_ids) || has_duplicates(&mut ship_ids) {
            return Err(GameError::Inconsistent("duplicate identities"));
        }
        Ok(())
    }
}

fn has_duplicates<T: Ord>(ids: &mut [T]) -> bool {
    ids.sort_unstable();
    ids.windows(2).any(|w| w[0] == w[1])
}
