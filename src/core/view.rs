use alloc::vec::Vec;

use crate::core::cell::CellStatus;
use crate::core::coordinate::Coordinate;

/// What an attacker may know about a defender's grid: shots fired and their
/// outcomes, with unshot ship cells indistinguishable from water.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetView {
    size: usize,
    cells: Vec<CellStatus>,
    remaining: Vec<usize>,
}

impl TargetView {
    pub(crate) fn new(size: usize, cells: Vec<CellStatus>, remaining: Vec<usize>) -> Self {
        debug_assert_eq!(cells.len(), size * size);
        Self {
            size,
            cells,
            remaining,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// `Empty`, `Hit`, `Miss` or `Sunk`; `None` outside the grid.
    pub fn status(&self, coord: Coordinate) -> Option<CellStatus> {
        if coord.is_valid(self.size) {
            Some(self.cells[coord.index(self.size)])
        } else {
            None
        }
    }

    pub fn is_untried(&self, coord: Coordinate) -> bool {
        self.status(coord) == Some(CellStatus::Empty)
    }

    /// Coordinates not yet fired upon, row-major.
    pub fn untried(&self) -> Vec<Coordinate> {
        self.coordinates()
            .filter(|&c| self.is_untried(c))
            .collect()
    }

    /// Sizes of the defender's ships still afloat.
    pub fn remaining_sizes(&self) -> &[usize] {
        &self.remaining
    }

    fn coordinates(&self) -> impl Iterator<Item = Coordinate> + '_ {
        (0..self.size).flat_map(move |y| (0..self.size).map(move |x| Coordinate::new(x, y)))
    }
}
