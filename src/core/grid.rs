//! One player's N×N board: placement geometry and shot bookkeeping.

use alloc::vec::Vec;
use rand::Rng;

use crate::core::cell::{Cell, CellStatus};
use crate::core::common::GameError;
use crate::core::coordinate::{Coordinate, Orientation};
use crate::core::ship::Ship;

/// Attempts made by [`Grid::random_placement`] before giving up.
const PLACEMENT_ATTEMPTS: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid {
    size: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Empty `size × size` grid.
    pub fn new(size: usize) -> Self {
        let mut cells = Vec::with_capacity(size * size);
        for y in 0..size {
            for x in 0..size {
                cells.push(Cell::new(Coordinate::new(x, y), CellStatus::Empty));
            }
        }
        Grid { size, cells }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// All cells in row-major order (`y` outer, `x` inner).
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn is_valid_coordinate(&self, coord: Coordinate) -> bool {
        coord.is_valid(self.size)
    }

    pub fn cell(&self, coord: Coordinate) -> Result<CellStatus, GameError> {
        if !self.is_valid_coordinate(coord) {
            return Err(GameError::InvalidCoordinate(coord));
        }
        Ok(self.cells[coord.index(self.size)].status())
    }

    pub fn set_cell(&mut self, coord: Coordinate, status: CellStatus) -> Result<(), GameError> {
        if !self.is_valid_coordinate(coord) {
            return Err(GameError::InvalidCoordinate(coord));
        }
        self.cells[coord.index(self.size)].set_status(status);
        Ok(())
    }

    /// Number of cells currently in `status`.
    pub fn count(&self, status: CellStatus) -> usize {
        self.cells.iter().filter(|c| c.status() == status).count()
    }

    /// The `size` coordinates a ship would occupy, stepping from `start`.
    ///
    /// Coordinates past the far edge are still produced; a step that would
    /// go below zero cannot be represented and yields `ShipOutOfBounds`.
    pub fn generate_ship_coordinates(
        start: Coordinate,
        size: usize,
        orientation: Orientation,
    ) -> Result<Vec<Coordinate>, GameError> {
        if size == 0 {
            return Err(GameError::InvalidShipSize(size));
        }
        let steps = isize::try_from(size).map_err(|_| GameError::ShipOutOfBounds)?;
        let (dx, dy) = orientation.step();
        (0..steps)
            .map(|i| start.offset(dx * i, dy * i).ok_or(GameError::ShipOutOfBounds))
            .collect()
    }

    /// `true` when every cell of the placement is in bounds and not already a ship.
    pub fn can_place_ship(&self, start: Coordinate, size: usize, orientation: Orientation) -> bool {
        if size > self.size {
            return false;
        }
        match Self::generate_ship_coordinates(start, size, orientation) {
            Ok(coords) => self.check_free(&coords).is_ok(),
            Err(_) => false,
        }
    }

    fn check_free(&self, coords: &[Coordinate]) -> Result<(), GameError> {
        for &coord in coords {
            if !self.is_valid_coordinate(coord) {
                return Err(GameError::ShipOutOfBounds);
            }
            if self.cell(coord)? == CellStatus::Ship {
                return Err(GameError::ShipOverlaps);
            }
        }
        Ok(())
    }

    /// Mark every cell of `ship` as occupied. Nothing changes on error.
    pub fn place_ship(&mut self, ship: &Ship) -> Result<(), GameError> {
        self.check_free(ship.coordinates())?;
        for &coord in ship.coordinates() {
            self.set_cell(coord, CellStatus::Ship)?;
        }
        Ok(())
    }

    /// Pick a random in-bounds, non-overlapping start and orientation for a
    /// ship of `size`.
    pub fn random_placement<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        size: usize,
    ) -> Result<(Coordinate, Orientation), GameError> {
        if size == 0 || size > self.size {
            return Err(GameError::InvalidShipSize(size));
        }
        for _ in 0..PLACEMENT_ATTEMPTS {
            let orientation = Orientation::ALL[rng.random_range(0..Orientation::ALL.len())];
            let start = Coordinate::new(
                rng.random_range(0..self.size),
                rng.random_range(0..self.size),
            );
            if self.can_place_ship(start, size, orientation) {
                return Ok((start, orientation));
            }
        }
        Err(GameError::UnableToPlaceFleet)
    }

    pub(crate) fn check_integrity(&self) -> Result<(), GameError> {
        if self.size.checked_mul(self.size) != Some(self.cells.len()) {
            return Err(GameError::Inconsistent("grid cell count does not match its size"));
        }
        let misplaced = self
            .cells
            .iter()
            .enumerate()
            .any(|(i, cell)| {
                !cell.coordinate().is_valid(self.size) || cell.coordinate().index(self.size) != i
            });
        if misplaced {
            return Err(GameError::Inconsistent("grid cells are out of order"));
        }
        Ok(())
    }
}
