//! Error types for the card engine

use thiserror::Error;

/// Card engine error
///
/// Validation itself is total and never fails; errors arise only when a
/// registry is built from a malformed rule table.
#[derive(Debug, Error)]
pub enum Error {
    /// Descriptor registered with no accepted lengths
    #[error("network {0} has no accepted lengths")]
    EmptyLengths(&'static str),

    /// Accepted length outside the plausible card range
    #[error("network {network} accepts implausible length {length}")]
    LengthOutOfRange {
        /// Offending network identifier
        network: &'static str,
        /// Rejected digit count
        length: usize,
    },

    /// Descriptor registered with no IIN ranges
    #[error("network {0} has no IIN ranges")]
    EmptyRanges(&'static str),

    /// Malformed IIN range
    #[error("network {network} has malformed IIN range {lo}-{hi} (width {width})")]
    InvalidRange {
        /// Offending network identifier
        network: &'static str,
        /// Range lower bound
        lo: u32,
        /// Range upper bound
        hi: u32,
        /// Range digit width
        width: u8,
    },

    /// Same network registered more than once
    #[error("network {0} registered more than once")]
    DuplicateNetwork(&'static str),
}

/// Result type
pub type Result<T> = std::result::Result<T, Error>;
