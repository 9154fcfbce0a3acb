//! Grid positions and the four ship orientations.

use core::fmt;
use core::str::FromStr;

use crate::core::common::GameError;

/// Zero-based `(x, y)` position on a square grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate {
    x: usize,
    y: usize,
}

impl Coordinate {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    pub fn x(&self) -> usize {
        self.x
    }

    pub fn y(&self) -> usize {
        self.y
    }

    /// `true` when both axes lie in `[0, grid_size)`.
    pub fn is_valid(&self, grid_size: usize) -> bool {
        self.x < grid_size && self.y < grid_size
    }

    /// Shift by a signed offset. `None` when the result would be negative.
    pub fn offset(&self, dx: isize, dy: isize) -> Option<Coordinate> {
        Some(Coordinate {
            x: self.x.checked_add_signed(dx)?,
            y: self.y.checked_add_signed(dy)?,
        })
    }

    /// Row-major index into an `N×N` cell vector.
    pub(crate) fn index(&self, grid_size: usize) -> usize {
        self.y * grid_size + self.x
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Direction a ship extends from its start coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// Toward increasing x.
    Horizontal,
    /// Toward decreasing x.
    HorizontalLeft,
    /// Toward increasing y.
    Vertical,
    /// Toward decreasing y.
    VerticalUp,
}

impl Orientation {
    pub const ALL: [Orientation; 4] = [
        Orientation::Horizontal,
        Orientation::HorizontalLeft,
        Orientation::Vertical,
        Orientation::VerticalUp,
    ];

    /// Unit step `(dx, dy)` along this orientation.
    pub fn step(&self) -> (isize, isize) {
        match self {
            Orientation::Horizontal => (1, 0),
            Orientation::HorizontalLeft => (-1, 0),
            Orientation::Vertical => (0, 1),
            Orientation::VerticalUp => (0, -1),
        }
    }

    /// Console token for this orientation.
    pub fn token(&self) -> &'static str {
        match self {
            Orientation::Horizontal => "H",
            Orientation::HorizontalLeft => "-H",
            Orientation::Vertical => "V",
            Orientation::VerticalUp => "-V",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for Orientation {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Orientation::ALL
            .iter()
            .copied()
            .find(|o| o.token().eq_ignore_ascii_case(s))
            .ok_or(GameError::InvalidOrientation)
    }
}
