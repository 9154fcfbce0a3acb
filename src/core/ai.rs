// Automated opponents: fleet placement and target selection.
// Works from a `TargetView`, so strategies never see unshot ship cells.

use alloc::vec;
use alloc::vec::Vec;
use rand::Rng;

use crate::core::cell::CellStatus;
use crate::core::common::GameError;
use crate::core::coordinate::{Coordinate, Orientation};
use crate::core::grid::Grid;
use crate::core::view::TargetView;

/// Full-layout retries before [`Strategy::choose_fleet_placement`] gives up.
const LAYOUT_ATTEMPTS: usize = 20;

/// Placements covering observed hits get this much more weight per hit so
/// cells next to confirmed hits stand out.
const HIT_BIAS: f64 = 10.0;

/// Lower temperature biases sampling toward the most likely cells.
const TEMPERATURE: f64 = 0.5;

/// How an automated player picks its moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Strategy {
    /// Uniformly random untried cell.
    Random,
    /// Sample from a density of possible remaining-ship placements.
    Probability,
}

/// One ship to place: start, size and orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub start: Coordinate,
    pub size: usize,
    pub orientation: Orientation,
}

impl Strategy {
    /// Next cell to fire at, or `None` when every cell has been tried.
    pub fn choose_target<R: Rng + ?Sized>(
        &self,
        view: &TargetView,
        rng: &mut R,
    ) -> Option<Coordinate> {
        match self {
            Strategy::Random => random_untried(view, rng),
            Strategy::Probability => {
                let pdf = calc_pdf(view);
                sample_pdf(&pdf, view.size(), TEMPERATURE, rng)
                    .filter(|&c| view.is_untried(c))
                    .or_else(|| random_untried(view, rng))
            }
        }
    }

    /// Non-overlapping placements for every size in `sizes`, on top of
    /// whatever `grid` already holds.
    pub fn choose_fleet_placement<R: Rng + ?Sized>(
        &self,
        grid: &Grid,
        sizes: &[usize],
        rng: &mut R,
    ) -> Result<Vec<Placement>, GameError> {
        let mut order: Vec<usize> = sizes.to_vec();
        order.sort_unstable_by(|a, b| b.cmp(a));

        'layout: for _ in 0..LAYOUT_ATTEMPTS {
            let mut scratch = grid.clone();
            let mut placements = Vec::with_capacity(order.len());
            for &size in &order {
                let (start, orientation) = match scratch.random_placement(rng, size) {
                    Ok(found) => found,
                    Err(GameError::UnableToPlaceFleet) => continue 'layout,
                    Err(e) => return Err(e),
                };
                for coord in Grid::generate_ship_coordinates(start, size, orientation)? {
                    scratch.set_cell(coord, CellStatus::Ship)?;
                }
                placements.push(Placement {
                    start,
                    size,
                    orientation,
                });
            }
            return Ok(placements);
        }
        Err(GameError::UnableToPlaceFleet)
    }
}

fn random_untried<R: Rng + ?Sized>(view: &TargetView, rng: &mut R) -> Option<Coordinate> {
    let untried = view.untried();
    if untried.is_empty() {
        return None;
    }
    Some(untried[rng.random_range(0..untried.len())])
}

/// Relative likelihood, per untried cell, that a remaining ship covers it.
/// Row-major, normalized to sum to 1 (all zeros when nothing is untried).
pub fn calc_pdf(view: &TargetView) -> Vec<f64> {
    let size = view.size();
    let mut matrix = vec![0.0f64; size * size];

    for &len in view.remaining_sizes() {
        if len == 0 || len > size {
            continue;
        }
        for orient in [Orientation::Horizontal, Orientation::Vertical] {
            let (dx, dy) = orient.step();
            let max_x = if dx == 1 { size - len + 1 } else { size };
            let max_y = if dy == 1 { size - len + 1 } else { size };
            for y in 0..max_y {
                for x in 0..max_x {
                    let cells = (0..len).map(|k| Coordinate::new(x + k * dx as usize, y + k * dy as usize));

                    // a live ship cannot cross a miss or a sunk wreck
                    let mut valid = true;
                    let mut n_hits = 0;
                    for c in cells.clone() {
                        match view.status(c) {
                            Some(CellStatus::Hit) => n_hits += 1,
                            Some(CellStatus::Empty) => {}
                            _ => {
                                valid = false;
                                break;
                            }
                        }
                    }
                    if !valid {
                        continue;
                    }

                    let weight = if n_hits == 0 {
                        1.0
                    } else {
                        libm::pow(HIT_BIAS, n_hits as f64)
                    };
                    for c in cells {
                        if view.is_untried(c) {
                            matrix[c.index(size)] += weight;
                        }
                    }
                }
            }
        }
    }

    normalize(view, matrix)
}

fn normalize(view: &TargetView, mut matrix: Vec<f64>) -> Vec<f64> {
    let total: f64 = matrix.iter().sum();
    if total == 0.0 {
        // no consistent placement left; spread evenly over untried cells
        let untried = view.untried();
        if !untried.is_empty() {
            let uniform = 1.0 / untried.len() as f64;
            for c in untried {
                matrix[c.index(view.size())] = uniform;
            }
        }
        return matrix;
    }
    for v in matrix.iter_mut() {
        *v /= total;
    }
    matrix
}

/// Sample a coordinate from a row-major probability matrix. `None` when the
/// matrix has no mass.
pub fn sample_pdf<R: Rng + ?Sized>(
    pdf: &[f64],
    size: usize,
    temperature: f64,
    rng: &mut R,
) -> Option<Coordinate> {
    let adjusted: Vec<f64> = pdf
        .iter()
        .map(|&v| if v > 0.0 { libm::pow(v, 1.0 / temperature) } else { 0.0 })
        .collect();
    let total: f64 = adjusted.iter().sum();
    if total <= 0.0 || size == 0 {
        return None;
    }
    let threshold: f64 = rng.random_range(0.0..total);
    let mut cumulative = 0.0;
    let mut last = None;
    for (i, &v) in adjusted.iter().enumerate() {
        if v <= 0.0 {
            continue;
        }
        last = Some(i);
        cumulative += v;
        if threshold < cumulative {
            return Some(Coordinate::new(i % size, i / size));
        }
    }
    last.map(|i| Coordinate::new(i % size, i / size))
}
