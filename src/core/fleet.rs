//! A player's ships together with the composition they must match.

use alloc::vec::Vec;

use crate::core::config::{validate_composition, ConfigError, DEFAULT_FLEET};
use crate::core::coordinate::Coordinate;
use crate::core::ship::Ship;

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Fleet {
    ships: Vec<Ship>,
    required: Vec<usize>,
}

impl Default for Fleet {
    fn default() -> Self {
        Self::standard()
    }
}

impl Fleet {
    /// Empty fleet that must end up holding exactly `required` ship sizes.
    pub fn new(required: &[usize]) -> Result<Self, ConfigError> {
        validate_composition(required)?;
        Ok(Self {
            ships: Vec::new(),
            required: required.to_vec(),
        })
    }

    /// Empty fleet with the classic `{5,4,3,3,2}` composition.
    pub fn standard() -> Self {
        Self {
            ships: Vec::new(),
            required: DEFAULT_FLEET.to_vec(),
        }
    }

    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    pub fn required_sizes(&self) -> &[usize] {
        &self.required
    }

    pub fn len(&self) -> usize {
        self.ships.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ships.is_empty()
    }

    /// Append a ship. Callers check [`Fleet::can_add_ship`] first.
    pub fn add_ship(&mut self, ship: Ship) {
        self.ships.push(ship);
    }

    /// `true` when `candidate` shares no coordinate with any ship already in the fleet.
    pub fn can_add_ship(&self, candidate: &Ship) -> bool {
        self.can_add_coordinates(candidate.coordinates())
    }

    pub(crate) fn can_add_coordinates(&self, coords: &[Coordinate]) -> bool {
        !self
            .ships
            .iter()
            .any(|ship| coords.iter().any(|&c| ship.occupies(c)))
    }

    /// `true` when the placed sizes equal the required composition as a multiset.
    pub fn is_complete(&self) -> bool {
        let mut placed: Vec<usize> = self.ships.iter().map(Ship::size).collect();
        let mut required = self.required.clone();
        placed.sort_unstable();
        required.sort_unstable();
        !required.is_empty() && placed == required
    }

    /// Required sizes with no matching placed ship yet, in composition order.
    pub fn missing_sizes(&self) -> Vec<usize> {
        let mut placed: Vec<usize> = self.ships.iter().map(Ship::size).collect();
        let mut missing = Vec::new();
        for &size in &self.required {
            match placed.iter().position(|&s| s == size) {
                Some(pos) => {
                    placed.swap_remove(pos);
                }
                None => missing.push(size),
            }
        }
        missing
    }

    /// Sizes of ships still afloat.
    pub fn remaining_sizes(&self) -> Vec<usize> {
        self.ships
            .iter()
            .filter(|s| !s.is_sunk())
            .map(Ship::size)
            .collect()
    }

    /// `true` when the fleet has ships and every one of them is sunk.
    pub fn are_all_ships_sunk(&self) -> bool {
        !self.ships.is_empty() && self.ships.iter().all(Ship::is_sunk)
    }

    pub fn ship_at(&self, coord: Coordinate) -> Option<&Ship> {
        self.ships.iter().find(|s| s.occupies(coord))
    }

    pub(crate) fn ship_at_mut(&mut self, coord: Coordinate) -> Option<&mut Ship> {
        self.ships.iter_mut().find(|s| s.occupies(coord))
    }
}
