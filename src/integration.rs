//! End-to-end pipeline wiring.
//!
//! Joins parsing, state loading, ordering and state writing into one call so
//! the binary stays thin. [`process_input`] is pure and is what the tests
//! mostly exercise; [`run`] adds the file I/O around it.

use crate::config::ResolvedConfig;
use crate::layout::{
    apply_to_state, compute_ordering, load_state, save_state, LayoutState, OrderingResult,
};
use crate::model::{Address, AppError};
use crate::parser::{parse_order_list, parse_records};
use crate::source::{read_file, InputSource};
use std::path::PathBuf;
use tracing::info;

/// What one run reads and writes.
#[derive(Debug, Clone)]
pub struct RunRequest {
    /// Where records come from.
    pub source: InputSource,
    /// Layout state file consulted (and optionally rewritten).
    pub state_path: Option<PathBuf>,
    /// Newline-separated address file used as the external order.
    pub order_path: Option<PathBuf>,
    /// Write the result back into `state_path`.
    pub write_state: bool,
}

/// Compute the row layout for raw record text.
///
/// When `state` is given, the result is applied to it afterwards, so a
/// following call with the same records reuses this layout.
pub fn process_input(
    input: &str,
    state: Option<&mut LayoutState>,
    external_order: Option<&[Address]>,
    config: &ResolvedConfig,
) -> OrderingResult {
    let parsed = parse_records(input);
    if !parsed.malformed.is_empty() {
        info!(
            skipped = parsed.malformed.len(),
            "Some record lines could not be parsed"
        );
    }

    match state {
        Some(state) => {
            let result = compute_ordering(
                &parsed.records,
                &config.ordering_config(Some(&*state), external_order),
            );
            apply_to_state(state, &result);
            result
        }
        None => compute_ordering(
            &parsed.records,
            &config.ordering_config(None, external_order),
        ),
    }
}

/// Run the full pipeline for one request.
///
/// # Errors
///
/// Returns `AppError` if the records, order file or state file cannot be
/// read, or the state file cannot be written.
pub fn run(request: &RunRequest, config: &ResolvedConfig) -> Result<OrderingResult, AppError> {
    let input = request.source.read_to_string()?;

    let external_order = match &request.order_path {
        Some(path) => Some(parse_order_list(&read_file(path)?)),
        None => None,
    };

    let mut state = match &request.state_path {
        Some(path) => Some(load_state(path)?),
        None => None,
    };

    // Applied in memory either way; only persisted on request
    let result = process_input(&input, state.as_mut(), external_order.as_deref(), config);

    if let (true, Some(path), Some(state)) = (request.write_state, &request.state_path, &state) {
        save_state(path, state)?;
        info!(path = %path.display(), "Layout state written");
    }

    info!(
        rows = result.order.len(),
        source = ?result.source,
        canvas_height = result.canvas_height,
        "Row layout computed"
    );
    Ok(result)
}
