//! Players: identity, one grid, one fleet and who decides their moves.

use alloc::string::String;
use alloc::vec::Vec;

use crate::core::ai::Strategy;
use crate::core::cell::CellStatus;
use crate::core::common::GameError;
use crate::core::config::GameConfig;
use crate::core::coordinate::Coordinate;
use crate::core::fleet::Fleet;
use crate::core::game::ShotResult;
use crate::core::grid::Grid;
use crate::core::ids::{IdGenerator, PlayerId};
use crate::core::view::TargetView;

/// Who chooses a player's moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Controller {
    /// Moves come from a person through a front-end.
    Human,
    /// Moves are chosen programmatically by the carried strategy.
    Automated(Strategy),
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Player {
    id: PlayerId,
    name: String,
    grid: Grid,
    fleet: Fleet,
    ready: bool,
    controller: Controller,
}

impl Player {
    /// Human player with an empty grid and fleet sized by `config`.
    pub fn new(
        ids: &mut IdGenerator,
        name: impl Into<String>,
        config: &GameConfig,
    ) -> Result<Self, GameError> {
        Self::with_controller(ids, name, config, Controller::Human)
    }

    /// Player driven by `strategy`.
    pub fn automated(
        ids: &mut IdGenerator,
        name: impl Into<String>,
        config: &GameConfig,
        strategy: Strategy,
    ) -> Result<Self, GameError> {
        Self::with_controller(ids, name, config, Controller::Automated(strategy))
    }

    pub fn with_controller(
        ids: &mut IdGenerator,
        name: impl Into<String>,
        config: &GameConfig,
        controller: Controller,
    ) -> Result<Self, GameError> {
        let fleet = Fleet::new(config.fleet())?;
        Ok(Player {
            id: ids.next_player_id()?,
            name: name.into(),
            grid: Grid::new(config.grid_size()),
            fleet,
            ready: false,
            controller,
        })
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn fleet(&self) -> &Fleet {
        &self.fleet
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn set_ready(&mut self, ready: bool) {
        self.ready = ready;
    }

    pub fn controller(&self) -> Controller {
        self.controller
    }

    pub fn is_automated(&self) -> bool {
        matches!(self.controller, Controller::Automated(_))
    }

    pub fn strategy(&self) -> Option<Strategy> {
        match self.controller {
            Controller::Automated(strategy) => Some(strategy),
            Controller::Human => None,
        }
    }

    /// `true` once every ship of a non-empty fleet is sunk.
    pub fn has_lost(&self) -> bool {
        self.fleet.are_all_ships_sunk()
    }

    /// Status of `coord` with hit cells of sunk ships shown as `Sunk`.
    pub fn display_status(&self, coord: Coordinate) -> Result<CellStatus, GameError> {
        let status = self.grid.cell(coord)?;
        if status == CellStatus::Hit && self.fleet.ship_at(coord).is_some_and(|s| s.is_sunk()) {
            return Ok(CellStatus::Sunk);
        }
        Ok(status)
    }

    /// Opponent-facing view of this player's grid.
    pub fn target_view(&self) -> TargetView {
        let cells: Vec<CellStatus> = self
            .grid
            .cells()
            .iter()
            .map(|cell| match self.display_status(cell.coordinate()) {
                Ok(CellStatus::Ship) | Ok(CellStatus::Empty) | Err(_) => CellStatus::Empty,
                Ok(status) => status,
            })
            .collect();
        TargetView::new(self.grid.size(), cells, self.fleet.remaining_sizes())
    }

    pub(crate) fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub(crate) fn fleet_mut(&mut self) -> &mut Fleet {
        &mut self.fleet
    }

    /// Resolve a shot against this player's grid.
    ///
    /// The outcome depends only on whether a ship of the fleet occupies
    /// `coord`; repeated shots are reported without touching state.
    pub(crate) fn receive_shot(&mut self, coord: Coordinate) -> Result<ShotResult, GameError> {
        match self.grid.cell(coord)? {
            CellStatus::Hit | CellStatus::Sunk => return Ok(ShotResult::AlreadyHit),
            CellStatus::Miss => return Ok(ShotResult::AlreadyMiss),
            CellStatus::Empty | CellStatus::Ship => {}
        }

        let grid = &mut self.grid;
        match self.fleet.ship_at_mut(coord) {
            Some(ship) => {
                grid.set_cell(coord, CellStatus::Hit)?;
                let grid = &*grid;
                let sank = ship.update_sunk(|c| grid.cell(c).map(|s| s.is_hit()).unwrap_or(false));
                if sank {
                    log::info!("{} lost {} ({})", self.name, ship.name(), ship.id());
                    Ok(ShotResult::Sunk)
                } else {
                    Ok(ShotResult::Hit)
                }
            }
            None => {
                grid.set_cell(coord, CellStatus::Miss)?;
                Ok(ShotResult::Miss)
            }
        }
    }
}
