//! Card number validation and payment-network detection
//!
//! The engine behind a card-entry form: Luhn checksum validation plus
//! issuer-identification-number (IIN) matching over an ordered rule
//! table. Everything is pure and synchronous; the presentation layer
//! hands [`validate`] a raw string and renders the returned
//! [`ValidationResult`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod detect;
pub mod error;
pub mod luhn;
pub mod normalize;
pub mod registry;
pub mod types;
pub mod validator;

pub use detect::{PrefixRange, RangeMatch};
pub use error::{Error, Result};
pub use luhn::{is_valid_luhn, MAX_CARD_LENGTH, MIN_CARD_LENGTH};
pub use normalize::{format, normalize};
pub use registry::NetworkRegistry;
pub use types::{length_ok, Network, NetworkDescriptor, ValidationResult};
pub use validator::{detect, known_networks, validate, CardValidator};
