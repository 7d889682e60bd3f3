//! Row layout for time-arc diagrams.
//!
//! Pipeline: records -> [`compute_counts`](crate::model::compute_counts) ->
//! [`compute_ordering`] -> [`apply_to_state`].

pub mod ordering;
pub mod state;
pub mod types;

pub use ordering::{compute_ordering, OrderSource, OrderingConfig, OrderingResult};
pub use state::{apply_to_state, load_state, save_state, ForceLayout, LayoutState, LinkedView};
pub use types::{assign_positions, row_offset, Order, PositionMap, VerticalExtent};

/// Default pixel spacing between consecutive rows.
pub const DEFAULT_ROW_GAP: f64 = 30.0;

/// Default pixel offset of the first row.
pub const DEFAULT_TOP_PADDING: f64 = 30.0;

/// Default arc marker radius in pixels.
pub const DEFAULT_MARKER_RADIUS: f64 = 40.0;

/// Smallest canvas height ever reported.
pub const MIN_CANVAS_HEIGHT: f64 = 500.0;
