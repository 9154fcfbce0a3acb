//! Error types shared by the rules engine.

use core::fmt;

use crate::core::config::ConfigError;
use crate::core::coordinate::Coordinate;
use crate::core::game::Phase;
use crate::core::ids::PlayerId;

/// Coarse classification of a [`GameError`].
///
/// Callers use it to decide between re-prompting (bad input) and
/// reporting a rejected transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request itself was malformed (bad coordinate, overlap, unknown player...).
    InvalidArgument,
    /// The request was well formed but not allowed in the current game state.
    IllegalState,
}

/// Errors returned by grid, fleet and game operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// Coordinate lies outside the grid.
    InvalidCoordinate(Coordinate),
    /// Some cell of a ship placement falls outside the grid.
    ShipOutOfBounds,
    /// Ship placement overlaps another ship.
    ShipOverlaps,
    /// Orientation token is not one of `H`, `-H`, `V`, `-V`.
    InvalidOrientation,
    /// Ships must have at least one cell.
    InvalidShipSize(usize),
    /// Ship coordinates are not a contiguous run along the orientation axis.
    InvalidShipGeometry,
    /// Player index does not exist in this game.
    UnknownPlayer(usize),
    /// A player cannot fire at its own grid.
    SelfTarget,
    /// A game needs at least two players.
    TooFewPlayers(usize),
    /// A player's grid was built for another grid size.
    GridSizeMismatch { expected: usize, found: usize },
    /// Game configuration rejected.
    InvalidConfig(ConfigError),
    /// Random placement gave up without finding a free layout.
    UnableToPlaceFleet,
    /// Play cannot start while this player's fleet is incomplete.
    FleetIncomplete(PlayerId),
    /// No opponent is available to target.
    NoOpponent,
    /// Operation not allowed in the current phase.
    WrongPhase(Phase),
    /// Restored state violates an engine invariant.
    Inconsistent(&'static str),
    /// The id generator has no ids left of some kind.
    IdsExhausted,
}

impl GameError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GameError::FleetIncomplete(_)
            | GameError::NoOpponent
            | GameError::WrongPhase(_)
            | GameError::IdsExhausted => ErrorKind::IllegalState,
            _ => ErrorKind::InvalidArgument,
        }
    }
}

impl From<ConfigError> for GameError {
    fn from(err: ConfigError) -> Self {
        GameError::InvalidConfig(err)
    }
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::InvalidCoordinate(c) => write!(f, "Invalid coordinate {}", c),
            GameError::ShipOutOfBounds => write!(f, "Ship placement is out of bounds"),
            GameError::ShipOverlaps => write!(f, "Ship placement overlaps with another ship"),
            GameError::InvalidOrientation => {
                write!(f, "Invalid orientation, use H, -H, V or -V")
            }
            GameError::InvalidShipSize(size) => write!(f, "Invalid ship size {}", size),
            GameError::InvalidShipGeometry => {
                write!(f, "Ship coordinates are not contiguous along its orientation")
            }
            GameError::UnknownPlayer(idx) => write!(f, "No player at index {}", idx),
            GameError::SelfTarget => write!(f, "A player cannot target its own grid"),
            GameError::TooFewPlayers(n) => write!(f, "At least 2 players are required, got {}", n),
            GameError::GridSizeMismatch { expected, found } => write!(
                f,
                "Player grid is {}x{} but the game uses {}x{}",
                found, found, expected, expected
            ),
            GameError::InvalidConfig(e) => write!(f, "Invalid configuration: {}", e),
            GameError::UnableToPlaceFleet => write!(f, "Unable to find a layout for the fleet"),
            GameError::FleetIncomplete(id) => write!(f, "Fleet of player {} is not complete", id),
            GameError::NoOpponent => write!(f, "No opponent available"),
            GameError::WrongPhase(phase) => write!(f, "Not allowed during phase {}", phase),
            GameError::Inconsistent(what) => write!(f, "Inconsistent game state: {}", what),
            GameError::IdsExhausted => write!(f, "No identities left to hand out"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for GameError {}
