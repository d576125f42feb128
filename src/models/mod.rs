use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub mod cell;
pub mod request;

/// Convenience alias for a two-dimensional grid.
pub type Matrix<T> = Vec<Vec<T>>;

/// A zero-based (row, col) position within the garden grid.
///
/// Ordering is row-major, so sorted selections read left-to-right, top-to-bottom.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
pub struct Coordinate {
    pub row: usize,
    pub col: usize,
}

impl Coordinate {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

/// Size of the garden grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Dimensions {
    pub rows: usize,
    pub cols: usize,
}

impl Dimensions {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    pub fn contains(&self, coord: Coordinate) -> bool {
        coord.row < self.rows && coord.col < self.cols
    }
}
