//! arcrows
//!
//! Row ordering and vertical positioning of network endpoints for
//! time-arc diagrams.
//!
//! The core is pure: [`model::compute_counts`] tallies addresses,
//! [`layout::compute_ordering`] picks the row order and offsets, and
//! [`layout::apply_to_state`] writes the result into caller-owned state.
//! Config, logging, input and the CLI wiring live around it.

pub mod config;
pub mod layout;
pub mod logging;
pub mod model;
pub mod parser;
pub mod source;

// Pipeline wiring used by the binary
pub mod integration;
