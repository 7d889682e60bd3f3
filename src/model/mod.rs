//! Domain model types (pure).
//!
//! All types in this module are pure data with smart constructors.

pub mod address;
pub mod counts;
pub mod error;
pub mod malformed_line;
pub mod record;

// Re-export for convenience
pub use address::{Address, InvalidAddress};
pub use counts::{compute_counts, AddressCounts};
pub use error::{AppError, InputError, ParseError, StateError};
pub use malformed_line::MalformedLine;
pub use record::Record;
