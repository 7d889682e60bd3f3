//! Row ordering resolution.
//!
//! Decides which addresses get a row, in what order, and at what offset.
//! Candidate orders are tried in strict priority:
//!
//! 1. An explicit external order, else the linked view's order
//! 2. A previously computed force layout, if it still matches the address universe
//! 3. Addresses sorted by descending count, ties broken by address
//!
//! Tier 1 is filtered to the universe and then completed with every unseen
//! address in first-seen order, so no observed address is ever dropped.

use crate::layout::state::{ForceLayout, LayoutState};
use crate::layout::types::{assign_positions, row_offset, Order, PositionMap, VerticalExtent};
use crate::layout::{DEFAULT_MARKER_RADIUS, DEFAULT_ROW_GAP, DEFAULT_TOP_PADDING, MIN_CANVAS_HEIGHT};
use crate::model::{compute_counts, Address, AddressCounts, Record};
use serde::Serialize;
use std::collections::HashSet;
use tracing::{debug, warn};

/// Inputs to [`compute_ordering`] besides the records themselves.
#[derive(Debug, Clone, Copy)]
pub struct OrderingConfig<'a> {
    /// Shared layout state consulted for the linked-view order and any prior layout.
    pub shared_state: Option<&'a LayoutState>,
    /// Pixel spacing between consecutive rows.
    pub row_gap: f64,
    /// Pixel offset of the first row.
    pub top_padding: f64,
    /// Explicit order that wins over the linked-view order.
    pub external_order: Option<&'a [Address]>,
    /// Marker radius, only used for the canvas height.
    pub marker_radius: f64,
}

impl Default for OrderingConfig<'_> {
    fn default() -> Self {
        Self {
            shared_state: None,
            row_gap: DEFAULT_ROW_GAP,
            top_padding: DEFAULT_TOP_PADDING,
            external_order: None,
            marker_radius: DEFAULT_MARKER_RADIUS,
        }
    }
}

impl<'a> OrderingConfig<'a> {
    /// Config with library defaults and no state or external order.
    pub fn new() -> Self {
        Self::default()
    }

    /// Consult `state` for linked-view and prior layout orders.
    pub fn with_state(mut self, state: &'a LayoutState) -> Self {
        self.shared_state = Some(state);
        self
    }

    /// Prefer `order` over anything found in the shared state.
    pub fn with_external_order(mut self, order: &'a [Address]) -> Self {
        self.external_order = Some(order);
        self
    }

    /// Override the row gap.
    pub fn with_row_gap(mut self, row_gap: f64) -> Self {
        self.row_gap = row_gap;
        self
    }

    /// Override the top padding.
    pub fn with_top_padding(mut self, top_padding: f64) -> Self {
        self.top_padding = top_padding;
        self
    }

    /// Override the marker radius.
    pub fn with_marker_radius(mut self, marker_radius: f64) -> Self {
        self.marker_radius = marker_radius;
        self
    }
}

/// Which candidate produced the final order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderSource {
    /// The explicit external order from the config.
    External,
    /// The linked view's order held in the shared state.
    LinkedView,
    /// Descending count, ties by address.
    Sorted,
    /// The prior force layout, copied as-is.
    Reused,
}

/// Output of [`compute_ordering`].
///
/// # Invariants
///
/// - Every address in `order` has exactly one entry in `positions`
/// - `canvas_height >= MIN_CANVAS_HEIGHT`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderingResult {
    /// Final top-to-bottom row order.
    pub order: Order,
    /// Pixel offset per address.
    pub positions: PositionMap,
    /// Min/max offset over `order`.
    pub extent: VerticalExtent,
    /// Canvas height needed to draw every row.
    pub canvas_height: f64,
    /// Per-address occurrence counts.
    pub counts: AddressCounts,
    /// Which candidate produced `order`.
    pub source: OrderSource,
}

impl OrderingResult {
    /// Offset of `address`, if it has a row.
    pub fn position(&self, address: &str) -> Option<f64> {
        self.positions.get(address).copied()
    }
}

/// Compute row order, offsets, and canvas height for `records`.
///
/// Never fails: missing or empty optional inputs fall through to the next
/// priority tier, and the sorted fallback always produces an order.
pub fn compute_ordering(records: &[Record], config: &OrderingConfig<'_>) -> OrderingResult {
    let counts = compute_counts(records);

    let (order, positions, source) = if let Some((preferred, source)) = preferred_order(config) {
        let order = complete_with_universe(preferred, &counts);
        let positions = assign_positions(&order, config.top_padding, config.row_gap);
        (order, positions, source)
    } else if let Some(prior) = reusable_layout(config, counts.len()) {
        let (order, positions) = reuse_layout(prior, config);
        (order, positions, OrderSource::Reused)
    } else {
        let order = sort_by_count(&counts);
        let positions = assign_positions(&order, config.top_padding, config.row_gap);
        (order, positions, OrderSource::Sorted)
    };

    let extent = VerticalExtent::of(order.iter().filter_map(|addr| positions.get(addr).copied()));
    let canvas_height = MIN_CANVAS_HEIGHT
        .max(extent.max + config.row_gap + config.marker_radius + config.top_padding);

    debug!(
        ?source,
        rows = order.len(),
        records = records.len(),
        span = extent.span(),
        canvas_height,
        "Resolved row ordering"
    );

    OrderingResult {
        order,
        positions,
        extent,
        canvas_height,
        counts,
        source,
    }
}

/// External order if non-empty, else the linked view's order if non-empty.
fn preferred_order<'a>(config: &OrderingConfig<'a>) -> Option<(&'a [Address], OrderSource)> {
    if let Some(order) = config.external_order.filter(|o| !o.is_empty()) {
        return Some((order, OrderSource::External));
    }
    config
        .shared_state
        .map(|state| state.linked_view.order.as_slice())
        .filter(|o| !o.is_empty())
        .map(|order| (order, OrderSource::LinkedView))
}

/// Keep the addresses of `preferred` that were observed, then append the rest.
fn complete_with_universe(preferred: &[Address], counts: &AddressCounts) -> Order {
    let mut placed: HashSet<&Address> = HashSet::with_capacity(counts.len());
    let mut order = Vec::with_capacity(counts.len());

    for addr in preferred {
        if counts.contains(addr.as_str()) && placed.insert(addr) {
            order.push(addr.clone());
        }
    }
    for addr in counts.universe() {
        if placed.insert(addr) {
            order.push(addr.clone());
        }
    }
    order
}

fn reusable_layout<'a>(config: &OrderingConfig<'a>, universe_len: usize) -> Option<&'a ForceLayout> {
    config
        .shared_state
        .map(|state| &state.layout)
        .filter(|layout| layout.is_reusable_for(universe_len))
}

/// Copy a prior layout's order and offsets without recomputing them.
fn reuse_layout(prior: &ForceLayout, config: &OrderingConfig<'_>) -> (Order, PositionMap) {
    let order = prior.order.clone();
    let positions = order
        .iter()
        .enumerate()
        .map(|(index, addr)| {
            let offset = prior.positions.get(addr).copied().unwrap_or_else(|| {
                warn!(address = %addr, index, "Prior layout has no position for row; using default offset");
                row_offset(config.top_padding, config.row_gap, index)
            });
            (addr.clone(), offset)
        })
        .collect();
    (order, positions)
}

/// Descending count, ties broken by ascending address.
fn sort_by_count(counts: &AddressCounts) -> Order {
    let mut ranked: Vec<(&Address, u64)> = counts.iter().collect();
    ranked.sort_by(|(a, ca), (b, cb)| cb.cmp(ca).then_with(|| a.cmp(b)));
    ranked.into_iter().map(|(addr, _)| addr.clone()).collect()
}

#[cfg(test)]
#[path = "ordering_tests.rs"]
mod tests;
