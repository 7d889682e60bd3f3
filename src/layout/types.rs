//! Core layout types: row order, pixel positions, vertical extent.

use crate::model::Address;
use indexmap::IndexMap;
use serde::Serialize;

/// Top-to-bottom row sequence. Each address appears at most once.
pub type Order = Vec<Address>;

/// Vertical pixel offset per address, in row order.
pub type PositionMap = IndexMap<Address, f64>;

/// Pixel offset of the row at `index` under evenly spaced assignment.
pub fn row_offset(top_padding: f64, row_gap: f64, index: usize) -> f64 {
    top_padding + row_gap * index as f64
}

/// Assign evenly spaced offsets to every address in `order`.
///
/// The first row sits at `top_padding`; each following row is `row_gap` lower.
pub fn assign_positions(order: &[Address], top_padding: f64, row_gap: f64) -> PositionMap {
    order
        .iter()
        .enumerate()
        .map(|(index, addr)| (addr.clone(), row_offset(top_padding, row_gap, index)))
        .collect()
}

/// Minimum and maximum assigned offset. `(0, 0)` when nothing is placed.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct VerticalExtent {
    /// Smallest offset.
    pub min: f64,
    /// Largest offset.
    pub max: f64,
}

impl VerticalExtent {
    /// Create an extent from explicit bounds.
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Extent of a set of offsets, `(0, 0)` if the set is empty.
    pub fn of(values: impl IntoIterator<Item = f64>) -> Self {
        values
            .into_iter()
            .fold(None, |acc: Option<Self>, v| match acc {
                None => Some(Self::new(v, v)),
                Some(e) => Some(Self::new(e.min.min(v), e.max.max(v))),
            })
            .unwrap_or_default()
    }

    /// Distance between the lowest and highest row.
    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}
