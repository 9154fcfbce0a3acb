//! Ships: a named, contiguous run of coordinates with a sunk flag.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::core::common::GameError;
use crate::core::coordinate::{Coordinate, Orientation};
use crate::core::ids::ShipId;

/// A ship placed on a grid. Geometry is fixed at construction; only the
/// sunk flag changes afterwards.
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Ship {
    id: ShipId,
    name: String,
    coordinates: Vec<Coordinate>,
    orientation: Orientation,
    sunk: bool,
}

impl Ship {
    /// Build a ship from an already generated coordinate run.
    ///
    /// The run must be non-empty and each coordinate exactly one step
    /// further along `orientation` than the previous one.
    pub fn new(
        id: ShipId,
        name: impl Into<String>,
        coordinates: Vec<Coordinate>,
        orientation: Orientation,
    ) -> Result<Self, GameError> {
        let ship = Ship {
            id,
            name: name.into(),
            coordinates,
            orientation,
            sunk: false,
        };
        ship.check_geometry()?;
        Ok(ship)
    }

    pub(crate) fn check_geometry(&self) -> Result<(), GameError> {
        if self.coordinates.is_empty() {
            return Err(GameError::InvalidShipSize(0));
        }
        let (dx, dy) = self.orientation.step();
        let contiguous = self
            .coordinates
            .windows(2)
            .all(|pair| pair[0].offset(dx, dy) == Some(pair[1]));
        if contiguous {
            Ok(())
        } else {
            Err(GameError::InvalidShipGeometry)
        }
    }

    pub fn id(&self) -> ShipId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> usize {
        self.coordinates.len()
    }

    pub fn coordinates(&self) -> &[Coordinate] {
        &self.coordinates
    }

    pub fn start(&self) -> Coordinate {
        self.coordinates[0]
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn is_sunk(&self) -> bool {
        self.sunk
    }

    pub fn occupies(&self, coord: Coordinate) -> bool {
        self.coordinates.contains(&coord)
    }

    /// Recompute the sunk flag from a hit predicate. Returns `true` only when
    /// this call is the one that sank the ship.
    pub(crate) fn update_sunk<F>(&mut self, is_hit: F) -> bool
    where
        F: Fn(Coordinate) -> bool,
    {
        let was_sunk = self.sunk;
        self.sunk = self.coordinates.iter().all(|&c| is_hit(c));
        self.sunk && !was_sunk
    }
}

impl fmt::Debug for Ship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ship {{ id: {}, name: \"{}\", start: {:?}, orientation: {}, size: {}, sunk: {} }}",
            self.id,
            self.name,
            self.coordinates.first(),
            self.orientation,
            self.size(),
            self.sunk,
        )
    }
}
