use log::info;
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use crate::models::{cell::Cell, Coordinate, Dimensions, Matrix};

pub const MIN_ROWS: usize = 4;
pub const MAX_ROWS: usize = 20;
pub const MIN_COLS: usize = 4;
pub const MAX_COLS: usize = 20;

pub const DEFAULT_ROWS: usize = 8;
pub const DEFAULT_COLS: usize = 8;

/// Which axis a single-step resize touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Rows,
    Columns,
}

impl Axis {
    pub fn noun(self) -> &'static str {
        match self {
            Axis::Rows => "row",
            Axis::Columns => "column",
        }
    }

    fn plural(self) -> &'static str {
        match self {
            Axis::Rows => "rows",
            Axis::Columns => "columns",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GridError {
    #[error("Cannot add more than {max} {}.", .axis.plural())]
    AboveMaximum { axis: Axis, max: usize },
    #[error("Cannot have fewer than {min} {}.", .axis.plural())]
    BelowMinimum { axis: Axis, min: usize },
    #[error("Square {0} is outside the grid.")]
    OutOfRange(Coordinate),
    #[error("Malformed grid: {0}")]
    Malformed(String),
}

impl GridError {
    /// Short headline shown to the user above the message.
    pub fn title(&self) -> &'static str {
        match self {
            GridError::AboveMaximum { axis: Axis::Rows, .. } => "Maximum rows reached",
            GridError::AboveMaximum { axis: Axis::Columns, .. } => "Maximum columns reached",
            GridError::BelowMinimum { axis: Axis::Rows, .. } => "Minimum rows reached",
            GridError::BelowMinimum { axis: Axis::Columns, .. } => "Minimum columns reached",
            GridError::OutOfRange(_) => "Invalid square",
            GridError::Malformed(_) => "Invalid grid",
        }
    }
}

/// Border joins between a cell and its four neighbours.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Joins {
    pub join_top: bool,
    pub join_right: bool,
    pub join_bottom: bool,
    pub join_left: bool,
}

/// The garden document: a rectangular grid of cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Garden {
    rows: usize,
    cols: usize,
    cells: Matrix<Cell>,
}

impl Default for Garden {
    fn default() -> Self {
        Self::new(DEFAULT_ROWS, DEFAULT_COLS)
    }
}

impl Garden {
    /// Creates an all-empty grid, clamping the size into the allowed range.
    pub fn new(rows: usize, cols: usize) -> Self {
        let rows = rows.clamp(MIN_ROWS, MAX_ROWS);
        let cols = cols.clamp(MIN_COLS, MAX_COLS);
        let cells = (0..rows)
            .map(|_| (0..cols).map(|_| Cell::empty()).collect())
            .collect();
        Self { rows, cols, cells }
    }

    /// Adopts an existing matrix, e.g. one read back from storage.
    pub fn from_cells(cells: Matrix<Cell>) -> Result<Self, GridError> {
        let rows = cells.len();
        if !(MIN_ROWS..=MAX_ROWS).contains(&rows) {
            return Err(GridError::Malformed(format!(
                "{rows} rows, expected {MIN_ROWS}..={MAX_ROWS}"
            )));
        }
        let cols = cells[0].len();
        if !(MIN_COLS..=MAX_COLS).contains(&cols) {
            return Err(GridError::Malformed(format!(
                "{cols} columns, expected {MIN_COLS}..={MAX_COLS}"
            )));
        }
        if let Some(r) = cells.iter().position(|row| row.len() != cols) {
            return Err(GridError::Malformed(format!(
                "row {r} has {} cells, expected {cols}",
                cells[r].len()
            )));
        }
        Ok(Self { rows, cols, cells })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.rows, self.cols)
    }

    pub fn cells(&self) -> &Matrix<Cell> {
        &self.cells
    }

    pub fn contains(&self, coord: Coordinate) -> bool {
        self.dimensions().contains(coord)
    }

    pub fn get(&self, coord: Coordinate) -> Option<&Cell> {
        self.cells.get(coord.row).and_then(|row| row.get(coord.col))
    }

    /// Grows or shrinks the trailing rows/columns. Existing cells keep their
    /// position; sizes outside the allowed range are clamped.
    pub fn resize(&mut self, rows: usize, cols: usize) {
        let rows = rows.clamp(MIN_ROWS, MAX_ROWS);
        let cols = cols.clamp(MIN_COLS, MAX_COLS);

        self.cells.truncate(rows);
        for row in &mut self.cells {
            row.resize_with(cols, Cell::empty);
        }
        while self.cells.len() < rows {
            self.cells.push((0..cols).map(|_| Cell::empty()).collect());
        }
        self.rows = rows;
        self.cols = cols;
    }

    /// Checks whether a single-step resize along `axis` is allowed without
    /// touching the grid.
    pub fn check_step(&self, axis: Axis, grow: bool) -> Result<(), GridError> {
        let (current, min, max) = match axis {
            Axis::Rows => (self.rows, MIN_ROWS, MAX_ROWS),
            Axis::Columns => (self.cols, MIN_COLS, MAX_COLS),
        };
        if grow && current >= max {
            return Err(GridError::AboveMaximum { axis, max });
        }
        if !grow && current <= min {
            return Err(GridError::BelowMinimum { axis, min });
        }
        Ok(())
    }

    /// Adds or removes the trailing row/column, rejecting at the bounds.
    pub fn step(&mut self, axis: Axis, grow: bool) -> Result<(), GridError> {
        self.check_step(axis, grow)?;
        let delta = |n: usize| if grow { n + 1 } else { n - 1 };
        match axis {
            Axis::Rows => self.resize(delta(self.rows), self.cols),
            Axis::Columns => self.resize(self.rows, delta(self.cols)),
        }
        Ok(())
    }

    pub fn add_row(&mut self) -> Result<(), GridError> {
        self.step(Axis::Rows, true)
    }

    pub fn remove_row(&mut self) -> Result<(), GridError> {
        self.step(Axis::Rows, false)
    }

    pub fn add_column(&mut self) -> Result<(), GridError> {
        self.step(Axis::Columns, true)
    }

    pub fn remove_column(&mut self) -> Result<(), GridError> {
        self.step(Axis::Columns, false)
    }

    /// Writes the same record to every listed coordinate. Coordinates outside
    /// the grid are skipped.
    pub fn set_cells<'a>(
        &mut self,
        coords: impl IntoIterator<Item = &'a Coordinate>,
        data: &Cell,
    ) -> usize {
        let mut written = 0;
        for coord in coords {
            if let Some(cell) = self
                .cells
                .get_mut(coord.row)
                .and_then(|row| row.get_mut(coord.col))
            {
                *cell = data.clone();
                written += 1;
            }
        }
        written
    }

    /// Moves (or copies) the record at `from` onto `to`.
    ///
    /// Returns `Ok(false)` when `from == to`, which leaves the grid untouched.
    pub fn move_cell(
        &mut self,
        from: Coordinate,
        to: Coordinate,
        copy: bool,
    ) -> Result<bool, GridError> {
        if !self.contains(from) {
            return Err(GridError::OutOfRange(from));
        }
        if !self.contains(to) {
            return Err(GridError::OutOfRange(to));
        }
        if from == to {
            return Ok(false);
        }
        let data = self.cells[from.row][from.col].clone();
        self.cells[to.row][to.col] = data;
        if !copy {
            self.cells[from.row][from.col] = Cell::empty();
        }
        info!(
            "{} square {from} to {to}",
            if copy { "Copied" } else { "Moved" }
        );
        Ok(true)
    }

    /// True when the neighbour at the signed offset shares this cell's
    /// non-empty type. Out-of-range neighbours never join.
    fn joins_with(&self, coord: Coordinate, dr: i32, dc: i32) -> bool {
        let nr = coord.row as i32 + dr;
        let nc = coord.col as i32 + dc;
        if nr < 0 || nr >= self.rows as i32 || nc < 0 || nc >= self.cols as i32 {
            return false;
        }
        match (
            self.get(coord),
            self.get(Coordinate::new(nr as usize, nc as usize)),
        ) {
            (Some(a), Some(b)) => !a.is_empty() && a.cell_type == b.cell_type,
            _ => false,
        }
    }

    pub fn joins(&self, coord: Coordinate) -> Joins {
        Joins {
            join_top: self.joins_with(coord, -1, 0),
            join_right: self.joins_with(coord, 0, 1),
            join_bottom: self.joins_with(coord, 1, 0),
            join_left: self.joins_with(coord, 0, -1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::cell::CellType;
    use proptest::prelude::*;

    fn assert_rectangular(garden: &Garden) {
        assert_eq!(garden.cells().len(), garden.rows());
        for row in garden.cells() {
            assert_eq!(row.len(), garden.cols());
        }
    }

    #[test]
    fn new_grid_is_empty_and_clamped() {
        let garden = Garden::new(2, 50);
        assert_eq!(garden.dimensions(), Dimensions::new(MIN_ROWS, MAX_COLS));
        assert!(garden.cells().iter().flatten().all(Cell::is_empty));
    }

    #[test]
    fn resize_keeps_existing_cells_in_place() {
        let mut garden = Garden::new(4, 4);
        let oak = Cell::of_type(CellType::Tree).with_name("Oak");
        garden.set_cells(&[Coordinate::new(2, 3)], &oak);

        garden.resize(6, 7);
        assert_eq!(garden.get(Coordinate::new(2, 3)), Some(&oak));
        assert!(garden.get(Coordinate::new(5, 6)).unwrap().is_empty());

        garden.resize(4, 4);
        assert_eq!(garden.get(Coordinate::new(2, 3)), Some(&oak));
        assert_rectangular(&garden);
    }

    #[test]
    fn add_row_at_maximum_is_rejected() {
        let mut garden = Garden::new(MAX_ROWS, 8);
        let before = garden.clone();
        let err = garden.add_row().unwrap_err();
        assert_eq!(err, GridError::AboveMaximum { axis: Axis::Rows, max: MAX_ROWS });
        assert_eq!(err.title(), "Maximum rows reached");
        assert_eq!(garden, before);
    }

    #[test]
    fn remove_column_at_minimum_is_rejected() {
        let mut garden = Garden::new(8, MIN_COLS);
        assert!(matches!(
            garden.remove_column(),
            Err(GridError::BelowMinimum { axis: Axis::Columns, .. })
        ));
        assert_eq!(garden.cols(), MIN_COLS);
    }

    #[test]
    fn move_cell_clears_source() {
        let mut garden = Garden::default();
        let oak = Cell::of_type(CellType::Tree).with_name("Oak");
        garden.set_cells(&[Coordinate::new(0, 0)], &oak);

        assert!(garden.move_cell(Coordinate::new(0, 0), Coordinate::new(1, 1), false).unwrap());
        assert_eq!(garden.get(Coordinate::new(1, 1)), Some(&oak));
        assert_eq!(garden.get(Coordinate::new(0, 0)), Some(&Cell::empty()));
    }

    #[test]
    fn copy_cell_keeps_source() {
        let mut garden = Garden::default();
        let oak = Cell::of_type(CellType::Tree).with_name("Oak");
        garden.set_cells(&[Coordinate::new(0, 0)], &oak);

        garden.move_cell(Coordinate::new(0, 0), Coordinate::new(1, 1), true).unwrap();
        assert_eq!(garden.get(Coordinate::new(1, 1)), Some(&oak));
        assert_eq!(garden.get(Coordinate::new(0, 0)), Some(&oak));
    }

    #[test]
    fn move_onto_itself_is_a_noop() {
        let mut garden = Garden::default();
        let lawn = Cell::of_type(CellType::Lawn);
        garden.set_cells(&[Coordinate::new(3, 3)], &lawn);
        assert!(!garden.move_cell(Coordinate::new(3, 3), Coordinate::new(3, 3), false).unwrap());
        assert_eq!(garden.get(Coordinate::new(3, 3)), Some(&lawn));
    }

    #[test]
    fn set_cells_skips_out_of_range() {
        let mut garden = Garden::new(4, 4);
        let written = garden.set_cells(
            &[Coordinate::new(0, 0), Coordinate::new(9, 9)],
            &Cell::of_type(CellType::Water),
        );
        assert_eq!(written, 1);
    }

    #[test]
    fn lawn_cells_join_horizontally() {
        let mut garden = Garden::default();
        let lawn = Cell::of_type(CellType::Lawn);
        garden.set_cells(&[Coordinate::new(2, 2), Coordinate::new(2, 3)], &lawn);

        assert!(garden.joins(Coordinate::new(2, 2)).join_right);
        assert!(garden.joins(Coordinate::new(2, 3)).join_left);
        // (2,1) is empty
        assert!(!garden.joins(Coordinate::new(2, 2)).join_left);
        assert!(!garden.joins(Coordinate::new(2, 2)).join_top);
    }

    #[test]
    fn empty_cells_never_join() {
        let garden = Garden::default();
        assert_eq!(garden.joins(Coordinate::new(1, 1)), Joins::default());
    }

    #[test]
    fn edge_cells_do_not_join_outside_grid() {
        let mut garden = Garden::new(4, 4);
        let all: Vec<Coordinate> = (0..4)
            .flat_map(|r| (0..4).map(move |c| Coordinate::new(r, c)))
            .collect();
        garden.set_cells(&all, &Cell::of_type(CellType::Path));
        let corner = garden.joins(Coordinate::new(0, 0));
        assert!(!corner.join_top && !corner.join_left);
        assert!(corner.join_right && corner.join_bottom);
    }

    #[test]
    fn from_cells_rejects_ragged_rows() {
        let mut cells: Matrix<Cell> = vec![vec![Cell::empty(); 5]; 5];
        cells[3].pop();
        assert!(matches!(Garden::from_cells(cells), Err(GridError::Malformed(_))));
    }

    #[test]
    fn from_cells_rejects_too_small() {
        assert!(Garden::from_cells(vec![]).is_err());
        assert!(Garden::from_cells(vec![vec![Cell::empty(); 4]; 3]).is_err());
    }

    proptest! {
        #[test]
        fn resize_always_yields_requested_shape(
            start_rows in 0usize..30,
            start_cols in 0usize..30,
            rows in 0usize..30,
            cols in 0usize..30,
        ) {
            let mut garden = Garden::new(start_rows, start_cols);
            garden.resize(rows, cols);
            prop_assert_eq!(garden.rows(), rows.clamp(MIN_ROWS, MAX_ROWS));
            prop_assert_eq!(garden.cols(), cols.clamp(MIN_COLS, MAX_COLS));
            prop_assert_eq!(garden.cells().len(), garden.rows());
            for row in garden.cells() {
                prop_assert_eq!(row.len(), garden.cols());
            }
        }
    }
}
