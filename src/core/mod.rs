//! Core naval battle rules engine (no_std compatible)
//!
//! Pure game logic: coordinates, grids, ships, fleets, players, the game
//! state machine and the automated strategies. Only depends on `alloc`,
//! `rand`, `libm` and `log`, so it builds for embedded or WebAssembly
//! targets without the `std` feature.

pub mod ai;
pub mod cell;
pub mod common;
pub mod config;
pub mod coordinate;
pub mod fleet;
pub mod game;
pub mod grid;
pub mod ids;
pub mod player;
pub mod session;
pub mod ship;
pub mod view;

// Re-export commonly used types
pub use ai::{calc_pdf, sample_pdf, Placement, Strategy};
pub use cell::{Cell, CellStatus};
pub use common::{ErrorKind, GameError};
pub use config::*;
pub use coordinate::{Coordinate, Orientation};
pub use fleet::Fleet;
pub use game::{Game, Phase, ShotResult};
pub use grid::Grid;
pub use ids::{GameId, IdGenerator, PlayerId, ShipId};
pub use player::{Controller, Player};
pub use session::{Seat, Session, TurnOutcome};
pub use ship::Ship;
pub use view::TargetView;
