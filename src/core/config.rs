use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

pub const DEFAULT_GRID_SIZE: usize = 10;
pub const MIN_GRID_SIZE: usize = 5;
pub const DEFAULT_FLEET: [usize; 5] = [5, 4, 3, 3, 2];

/// Named ship class used to label ships of the standard fleet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShipClass {
    name: &'static str,
    length: usize,
}

impl ShipClass {
    pub const fn new(name: &'static str, length: usize) -> Self {
        Self { name, length }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn length(&self) -> usize {
        self.length
    }
}

pub const SHIP_CLASSES: [ShipClass; 5] = [
    ShipClass::new("Carrier", 5),
    ShipClass::new("Battleship", 4),
    ShipClass::new("Cruiser", 3),
    ShipClass::new("Submarine", 3),
    ShipClass::new("Destroyer", 2),
];

/// Display name for the `ordinal`-th ship (0-based) of a given size.
///
/// Sizes with a standard class reuse its name; sizes shared by several
/// classes (3 → Cruiser, Submarine) walk through them. Anything else gets
/// a generic `Ship-<size>` label.
pub fn ship_name(size: usize, ordinal: usize) -> String {
    let classes: Vec<&ShipClass> = SHIP_CLASSES.iter().filter(|c| c.length() == size).collect();
    match classes.get(ordinal) {
        Some(class) => String::from(class.name()),
        None if ordinal == 0 => format!("Ship-{}", size),
        None => format!("Ship-{}-{}", size, ordinal + 1),
    }
}

/// Reasons a game configuration is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Grid is smaller than [`MIN_GRID_SIZE`].
    GridTooSmall { size: usize, min: usize },
    /// Fleet composition lists no ships.
    EmptyFleet,
    /// Ship sizes must be positive.
    ZeroSizedShip,
    /// Grid side so large its cell count does not fit in memory.
    GridTooLarge { size: usize },
    /// Ships need more cells than the grid offers.
    FleetTooLarge { cells: usize, capacity: usize },
    /// A ship is longer than the grid side and can never be placed.
    ShipTooLong { size: usize, grid_size: usize },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::GridTooSmall { size, min } => {
                write!(f, "grid size {} is below the minimum of {}", size, min)
            }
            ConfigError::EmptyFleet => write!(f, "the fleet must contain at least one ship"),
            ConfigError::ZeroSizedShip => write!(f, "every ship size must be a positive integer"),
            ConfigError::GridTooLarge { size } => write!(f, "grid size {} is too large", size),
            ConfigError::FleetTooLarge { cells, capacity } => write!(
                f,
                "total ship cells ({}) exceed the number of grid cells ({})",
                cells, capacity
            ),
            ConfigError::ShipTooLong { size, grid_size } => write!(
                f,
                "a ship of length {} does not fit on a {}x{} grid",
                size, grid_size, grid_size
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

/// Validated grid size and fleet composition for a new game.
///
/// Only [`GameConfig::new`] and [`GameConfig::standard`] build one, so
/// every instance satisfies the rules checked there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    grid_size: usize,
    fleet: Vec<usize>,
}

impl GameConfig {
    pub fn new(grid_size: usize, fleet: Vec<usize>) -> Result<Self, ConfigError> {
        if grid_size < MIN_GRID_SIZE {
            return Err(ConfigError::GridTooSmall {
                size: grid_size,
                min: MIN_GRID_SIZE,
            });
        }
        validate_composition(&fleet)?;
        let capacity = grid_size
            .checked_mul(grid_size)
            .ok_or(ConfigError::GridTooLarge { size: grid_size })?;
        let cells = fleet
            .iter()
            .try_fold(0usize, |acc, &s| acc.checked_add(s))
            .unwrap_or(usize::MAX);
        if cells > capacity {
            return Err(ConfigError::FleetTooLarge { cells, capacity });
        }
        if let Some(&size) = fleet.iter().find(|&&s| s > grid_size) {
            return Err(ConfigError::ShipTooLong { size, grid_size });
        }
        Ok(Self { grid_size, fleet })
    }

    /// 10×10 grid with the classic `{5,4,3,3,2}` fleet.
    pub fn standard() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            fleet: DEFAULT_FLEET.to_vec(),
        }
    }

    pub fn grid_size(&self) -> usize {
        self.grid_size
    }

    pub fn fleet(&self) -> &[usize] {
        &self.fleet
    }

    pub fn total_ship_cells(&self) -> usize {
        self.fleet.iter().sum()
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::standard()
    }
}

/// Composition rules shared with [`crate::Fleet::new`].
pub(crate) fn validate_composition(sizes: &[usize]) -> Result<(), ConfigError> {
    if sizes.is_empty() {
        return Err(ConfigError::EmptyFleet);
    }
    if sizes.iter().any(|&s| s == 0) {
        return Err(ConfigError::ZeroSizedShip);
    }
    Ok(())
}
