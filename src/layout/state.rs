//! Shared layout state and the applier that writes results into it.
//!
//! The state is owned by the caller and passed explicitly: by shared
//! reference into [`compute_ordering`](crate::layout::compute_ordering) and by
//! mutable reference into [`apply_to_state`]. Nothing here locks; callers
//! serialize access themselves.

use crate::layout::ordering::OrderingResult;
use crate::layout::types::{Order, PositionMap};
use crate::model::{Address, StateError};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, warn};

/// Caller-owned layout state shared between render passes.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LayoutState {
    /// Last computed (or force-settled) layout. Written by [`apply_to_state`].
    pub layout: ForceLayout,
    /// Order published by a linked view. Read-only to this crate.
    pub linked_view: LinkedView,
}

/// A previously computed row order with its pixel offsets.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ForceLayout {
    /// Row order.
    pub order: Order,
    /// Offset per address.
    pub positions: PositionMap,
}

impl ForceLayout {
    /// Whether this layout can be reused for a universe of `universe_len` addresses.
    ///
    /// Only the shape is checked: non-empty order and positions, and an order
    /// length equal to the universe size. Address membership is not compared.
    pub fn is_reusable_for(&self, universe_len: usize) -> bool {
        !self.order.is_empty() && !self.positions.is_empty() && self.order.len() == universe_len
    }
}

/// Ordering published by a linked view.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LinkedView {
    /// Linked-view row order.
    pub order: Order,
}

impl LayoutState {
    /// Empty state: no prior layout, no linked-view order.
    pub fn new() -> Self {
        Self::default()
    }

    /// State carrying only a linked-view order.
    pub fn with_linked_order(order: Order) -> Self {
        Self {
            linked_view: LinkedView { order },
            ..Self::default()
        }
    }

    /// Decode state from arbitrary JSON, treating wrong-shaped fields as absent.
    ///
    /// Accepted keys:
    /// - `layout.order` / `layout.ipOrder`: array of address strings
    /// - `layout.positions` / `layout.ipPositions`: object of address -> number,
    ///   or an array of `[address, number]` pairs
    /// - `linked_view.order` / `timearcs.ipOrder`: array of address strings
    ///
    /// Non-string, empty, and repeated addresses are dropped, as are
    /// non-numeric positions.
    pub fn from_json_value(value: &Value) -> Self {
        let layout = value.get("layout");
        let linked = value.get("linked_view").or_else(|| value.get("timearcs"));

        Self {
            layout: ForceLayout {
                order: decode_order(field(layout, &["order", "ipOrder"])),
                positions: decode_positions(field(layout, &["positions", "ipPositions"])),
            },
            linked_view: LinkedView {
                order: decode_order(field(linked, &["order", "ipOrder"])),
            },
        }
    }
}

fn field<'v>(parent: Option<&'v Value>, keys: &[&str]) -> Option<&'v Value> {
    let parent = parent?;
    keys.iter().find_map(|key| parent.get(*key))
}

fn decode_order(value: Option<&Value>) -> Order {
    let Some(items) = value.and_then(Value::as_array) else {
        return Order::new();
    };
    let mut seen = HashSet::with_capacity(items.len());
    items
        .iter()
        .filter_map(|item| Address::from_field(item.as_str()))
        .filter(|addr| seen.insert(addr.clone()))
        .collect()
}

fn decode_positions(value: Option<&Value>) -> PositionMap {
    match value {
        Some(Value::Object(map)) => map
            .iter()
            .filter_map(|(key, v)| Some((Address::new(key.as_str()).ok()?, v.as_f64()?)))
            .collect(),
        Some(Value::Array(pairs)) => pairs
            .iter()
            .filter_map(|pair| {
                let pair = pair.as_array()?;
                let addr = Address::from_field(pair.first()?.as_str())?;
                Some((addr, pair.get(1)?.as_f64()?))
            })
            .collect(),
        _ => PositionMap::new(),
    }
}

/// Write a computed order and its offsets into `state`.
///
/// The stored order is replaced wholesale. The stored position map is
/// cleared and refilled in place. The linked-view order is left untouched.
pub fn apply_to_state(state: &mut LayoutState, result: &OrderingResult) {
    state.layout.order.clone_from(&result.order);
    state.layout.positions.clear();
    state.layout.positions.extend(
        result
            .positions
            .iter()
            .map(|(addr, offset)| (addr.clone(), *offset)),
    );
    debug!(rows = state.layout.order.len(), "Applied row layout to shared state");
}

/// Load layout state from a JSON file.
///
/// A missing file, or a file that is not valid JSON, yields the empty state.
///
/// # Errors
///
/// Returns `StateError::Read` if the file exists but cannot be read.
pub fn load_state(path: &Path) -> Result<LayoutState, StateError> {
    if !path.exists() {
        debug!(path = %path.display(), "No layout state file; starting empty");
        return Ok(LayoutState::default());
    }

    let contents = std::fs::read_to_string(path).map_err(|e| StateError::Read {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    match serde_json::from_str::<Value>(&contents) {
        Ok(value) => Ok(LayoutState::from_json_value(&value)),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Ignoring unparseable layout state");
            Ok(LayoutState::default())
        }
    }
}

/// Save layout state to a JSON file, creating parent directories as needed.
///
/// # Errors
///
/// Returns `StateError::Write` if the directory or file cannot be written.
pub fn save_state(path: &Path, state: &LayoutState) -> Result<(), StateError> {
    let write_err = |reason: String| StateError::Write {
        path: path.to_path_buf(),
        reason,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| write_err(e.to_string()))?;
    }
    let json = serde_json::to_string_pretty(state).map_err(|e| write_err(e.to_string()))?;
    std::fs::write(path, json).map_err(|e| write_err(e.to_string()))
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
