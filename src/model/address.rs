//! Endpoint address newtype with a smart constructor.
//!
//! Empty strings are rejected at construction time, so an `Address` always
//! names a real endpoint. The raw constructor is never exported.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Identifier of a communication endpoint (usually an IP address).
///
/// Ordering is byte-wise on the underlying string, which is the tie-break
/// used when rows are sorted by traffic count.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(String);

impl Address {
    /// Smart constructor: validates non-empty address.
    pub fn new(raw: impl Into<String>) -> Result<Self, InvalidAddress> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(InvalidAddress::Empty);
        }
        Ok(Self(raw))
    }

    /// Build an address from an optional raw field, treating `None` and `""` as absent.
    pub fn from_field(raw: Option<&str>) -> Option<Self> {
        raw.and_then(|s| Self::new(s).ok())
    }

    /// Borrow the address string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for Address {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Address {
    type Error = InvalidAddress;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

impl From<Address> for String {
    fn from(address: Address) -> Self {
        address.0
    }
}

/// Error returned when an address string is empty.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidAddress {
    /// The raw address was the empty string.
    #[error("Address cannot be empty")]
    Empty,
}
