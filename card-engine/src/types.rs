//! Core types for card validation

use serde::{Deserialize, Serialize};

use crate::detect::PrefixRange;

/// Payment network identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    /// Visa
    Visa,
    /// MasterCard
    MasterCard,
    /// Mir
    Mir,
    /// American Express
    #[serde(rename = "amex")]
    AmericanExpress,
    /// Discover
    Discover,
    /// JCB
    Jcb,
    /// Diners Club
    #[serde(rename = "diners")]
    DinersClub,
    /// China UnionPay
    UnionPay,
    /// UzCard
    UzCard,
}

impl Network {
    /// Unique lowercase identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Visa => "visa",
            Network::MasterCard => "mastercard",
            Network::Mir => "mir",
            Network::AmericanExpress => "amex",
            Network::Discover => "discover",
            Network::Jcb => "jcb",
            Network::DinersClub => "diners",
            Network::UnionPay => "unionpay",
            Network::UzCard => "uzcard",
        }
    }

    /// Human-readable label
    pub fn display_name(&self) -> &'static str {
        match self {
            Network::Visa => "Visa",
            Network::MasterCard => "MasterCard",
            Network::Mir => "Мир",
            Network::AmericanExpress => "American Express",
            Network::Discover => "Discover",
            Network::Jcb => "JCB",
            Network::DinersClub => "Diners Club",
            Network::UnionPay => "China UnionPay",
            Network::UzCard => "UzCard",
        }
    }
}

/// Immutable description of one payment network: identity, display
/// metadata for the presentation layer, the digit counts a full number may
/// have, and the IIN ranges that select the network.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkDescriptor {
    /// Network identity
    pub network: Network,

    /// Human-readable label
    pub display_name: String,

    /// Icon key for the presentation layer
    pub icon: String,

    /// Brand color (hex) for the presentation layer
    pub color: String,

    /// Formatted example number shown in display listings
    pub example: String,

    /// Valid digit counts for a full number (never empty)
    pub accepted_lengths: Vec<usize>,

    /// Numeric IIN ranges over the leading digits
    pub iin_ranges: Vec<PrefixRange>,
}

impl NetworkDescriptor {
    /// Unique lowercase identifier
    pub fn name(&self) -> &'static str {
        self.network.as_str()
    }

    /// Whether a full number of `len` digits is acceptable for this network
    pub fn accepts_length(&self, len: usize) -> bool {
        self.accepted_lengths.contains(&len)
    }
}

/// Outcome of validating one raw input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Normalized digit string the checks ran against
    pub digits: String,

    /// Luhn checksum outcome
    pub luhn_valid: bool,

    /// Detected network, absent when unrecognized
    pub network: Option<NetworkDescriptor>,

    /// Length acceptable for the detected network
    pub length_ok: bool,
}

impl ValidationResult {
    /// Checksum and length policy both passed
    pub fn passes(&self) -> bool {
        self.luhn_valid && self.length_ok
    }

    /// Identifier of the detected network, if any
    pub fn network_name(&self) -> Option<&'static str> {
        self.network.as_ref().map(|descriptor| descriptor.name())
    }

    /// Number of digits that survived normalization
    pub fn digit_count(&self) -> usize {
        self.digits.len()
    }
}

/// Length policy: an unrecognized network imposes no constraint, a
/// recognized one requires membership in its accepted lengths.
pub fn length_ok(digits: &str, network: Option<&NetworkDescriptor>) -> bool {
    match network {
        Some(descriptor) => descriptor.accepts_length(digits.len()),
        None => true,
    }
}
