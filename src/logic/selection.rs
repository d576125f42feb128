use std::collections::BTreeSet;

use crate::models::{Coordinate, Dimensions};

/// The set of currently selected squares, iterated in row-major order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    coords: BTreeSet<Coordinate>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(coord: Coordinate) -> Self {
        let mut selection = Self::new();
        selection.insert(coord);
        selection
    }

    /// Every coordinate of the inclusive rectangle spanned by `a` and `b`.
    pub fn rectangle(a: Coordinate, b: Coordinate) -> Self {
        let (top, bottom) = (a.row.min(b.row), a.row.max(b.row));
        let (left, right) = (a.col.min(b.col), a.col.max(b.col));
        let coords = (top..=bottom)
            .flat_map(|row| (left..=right).map(move |col| Coordinate::new(row, col)))
            .collect();
        Self { coords }
    }

    pub fn insert(&mut self, coord: Coordinate) -> bool {
        self.coords.insert(coord)
    }

    /// Flips membership; returns whether the square is selected afterwards.
    pub fn toggle(&mut self, coord: Coordinate) -> bool {
        if self.coords.remove(&coord) {
            false
        } else {
            self.coords.insert(coord);
            true
        }
    }

    pub fn contains(&self, coord: Coordinate) -> bool {
        self.coords.contains(&coord)
    }

    pub fn clear(&mut self) {
        self.coords.clear();
    }

    /// Drops coordinates that no longer exist after a resize or undo.
    pub fn prune(&mut self, dims: Dimensions) {
        self.coords.retain(|c| dims.contains(*c));
    }

    pub fn len(&self) -> usize {
        self.coords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// The lone selected square, if exactly one is selected.
    pub fn only(&self) -> Option<Coordinate> {
        match self.coords.len() {
            1 => self.coords.first().copied(),
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Coordinate> {
        self.coords.iter()
    }

    pub fn to_vec(&self) -> Vec<Coordinate> {
        self.coords.iter().copied().collect()
    }
}
