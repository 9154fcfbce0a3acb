use core::fmt;

use crate::core::coordinate::Coordinate;

/// State of a single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum CellStatus {
    Empty,
    Ship,
    Hit,
    Miss,
    /// Hit cell of a fully destroyed ship. Only produced by views.
    Sunk,
}

impl CellStatus {
    /// `true` once the cell has been fired upon.
    pub fn is_shot(&self) -> bool {
        matches!(self, CellStatus::Hit | CellStatus::Miss | CellStatus::Sunk)
    }

    pub fn is_hit(&self) -> bool {
        matches!(self, CellStatus::Hit | CellStatus::Sunk)
    }
}

impl fmt::Display for CellStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CellStatus::Empty => "EMPTY",
            CellStatus::Ship => "SHIP",
            CellStatus::Hit => "HIT",
            CellStatus::Miss => "MISS",
            CellStatus::Sunk => "SUNK",
        };
        f.write_str(name)
    }
}

/// A grid cell tagged with its own coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    coordinate: Coordinate,
    status: CellStatus,
}

impl Cell {
    pub fn new(coordinate: Coordinate, status: CellStatus) -> Self {
        Self { coordinate, status }
    }

    pub fn coordinate(&self) -> Coordinate {
        self.coordinate
    }

    pub fn status(&self) -> CellStatus {
        self.status
    }

    pub(crate) fn set_status(&mut self, status: CellStatus) {
        self.status = status;
    }
}
