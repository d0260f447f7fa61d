//! Ordered payment-network rule table
//!
//! Descriptors are evaluated in a fixed priority order. A rule whose full
//! range width is covered by the prefix wins outright; with no such match
//! the detector answers only when a single network remains reachable from
//! the digits typed so far.

use lazy_static::lazy_static;
use tracing::{debug, info};

use crate::detect::{PrefixRange, RangeMatch};
use crate::error::{Error, Result};
use crate::luhn::MAX_CARD_LENGTH;
use crate::types::{Network, NetworkDescriptor};

/// Networks surfaced by [`NetworkRegistry::known_networks`], in display
/// order. A strict subset of the detection table.
const DISPLAY_NETWORKS: [Network; 6] = [
    Network::Visa,
    Network::MasterCard,
    Network::Mir,
    Network::AmericanExpress,
    Network::Discover,
    Network::Jcb,
];

/// Ordered table of network descriptors with first-match-wins detection
#[derive(Debug, Clone)]
pub struct NetworkRegistry {
    descriptors: Vec<NetworkDescriptor>,
}

impl NetworkRegistry {
    /// Build a registry from an ordered descriptor list.
    ///
    /// Rejects tables that violate the structural invariants: every
    /// descriptor needs at least one accepted length (each within the
    /// plausible 1..=19 card range), at least one well-formed IIN range,
    /// and no network may appear twice.
    pub fn new(descriptors: Vec<NetworkDescriptor>) -> Result<Self> {
        let mut seen: Vec<Network> = Vec::with_capacity(descriptors.len());

        for descriptor in &descriptors {
            if seen.contains(&descriptor.network) {
                return Err(Error::DuplicateNetwork(descriptor.name()));
            }
            seen.push(descriptor.network);

            if descriptor.accepted_lengths.is_empty() {
                return Err(Error::EmptyLengths(descriptor.name()));
            }
            for &length in &descriptor.accepted_lengths {
                if length == 0 || length > MAX_CARD_LENGTH {
                    return Err(Error::LengthOutOfRange {
                        network: descriptor.name(),
                        length,
                    });
                }
            }

            if descriptor.iin_ranges.is_empty() {
                return Err(Error::EmptyRanges(descriptor.name()));
            }
            for range in &descriptor.iin_ranges {
                if !range.is_well_formed() {
                    return Err(Error::InvalidRange {
                        network: descriptor.name(),
                        lo: range.lo,
                        hi: range.hi,
                        width: range.width,
                    });
                }
            }
        }

        info!("network registry loaded with {} descriptors", descriptors.len());
        Ok(Self { descriptors })
    }

    /// The process-wide built-in table, initialized on first use
    pub fn standard() -> &'static NetworkRegistry {
        &STANDARD
    }

    /// Detect the issuing network from however many leading digits are
    /// available, as few as one.
    ///
    /// The first descriptor with a definitive range match wins. Failing
    /// that, the sole descriptor some completion of the prefix could still
    /// reach is returned; with zero or several reachable networks the
    /// prefix is ambiguous and the answer is `None`. Empty input and input
    /// containing a non-digit also yield `None`.
    pub fn detect(&self, digits: &str) -> Option<&NetworkDescriptor> {
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        let mut sole_candidate: Option<&NetworkDescriptor> = None;
        let mut candidate_count = 0usize;

        for descriptor in &self.descriptors {
            let mut strength = RangeMatch::No;
            for range in &descriptor.iin_ranges {
                match range.evaluate(digits) {
                    RangeMatch::Definitive => {
                        strength = RangeMatch::Definitive;
                        break;
                    }
                    RangeMatch::Candidate => strength = RangeMatch::Candidate,
                    RangeMatch::No => {}
                }
            }

            match strength {
                RangeMatch::Definitive => {
                    debug!(network = descriptor.name(), "definitive IIN match");
                    return Some(descriptor);
                }
                RangeMatch::Candidate => {
                    candidate_count += 1;
                    if sole_candidate.is_none() {
                        sole_candidate = Some(descriptor);
                    }
                }
                RangeMatch::No => {}
            }
        }

        if candidate_count == 1 {
            let descriptor = sole_candidate?;
            debug!(network = descriptor.name(), "sole reachable network");
            Some(descriptor)
        } else {
            None
        }
    }

    /// Descriptor for a specific network, if the table carries it
    pub fn get(&self, network: Network) -> Option<&NetworkDescriptor> {
        self.descriptors
            .iter()
            .find(|descriptor| descriptor.network == network)
    }

    /// All descriptors in priority order
    pub fn descriptors(&self) -> &[NetworkDescriptor] {
        &self.descriptors
    }

    /// Number of descriptors in the table
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Fixed display subset for UI listings, in a stable order.
    ///
    /// The returned iterator is restartable; call again for a fresh pass.
    pub fn known_networks(&self) -> impl Iterator<Item = &NetworkDescriptor> {
        DISPLAY_NETWORKS
            .iter()
            .filter_map(move |network| self.get(*network))
    }
}

/// The nine-network table, in detection priority order.
fn builtin_descriptors() -> Vec<NetworkDescriptor> {
    vec![
        NetworkDescriptor {
            network: Network::Visa,
            display_name: "Visa".to_string(),
            icon: "visa".to_string(),
            color: "#1a1f71".to_string(),
            example: "4111 1111 1111 1111".to_string(),
            accepted_lengths: vec![13, 16, 19],
            iin_ranges: vec![PrefixRange::exact(4, 1)],
        },
        NetworkDescriptor {
            network: Network::MasterCard,
            display_name: "MasterCard".to_string(),
            icon: "mastercard".to_string(),
            color: "#eb001b".to_string(),
            example: "5555 5555 5555 4444".to_string(),
            accepted_lengths: vec![16],
            iin_ranges: vec![
                PrefixRange::between(51, 55, 2),
                PrefixRange::between(2221, 2720, 4),
            ],
        },
        NetworkDescriptor {
            network: Network::Mir,
            display_name: "Мир".to_string(),
            icon: "mir".to_string(),
            color: "#1e5a8b".to_string(),
            example: "2201 3820 0000 0013".to_string(),
            accepted_lengths: vec![16, 18, 19],
            iin_ranges: vec![PrefixRange::between(2200, 2204, 4)],
        },
        NetworkDescriptor {
            network: Network::AmericanExpress,
            display_name: "American Express".to_string(),
            icon: "amex".to_string(),
            color: "#2e77bc".to_string(),
            example: "3782 8224 6310 005".to_string(),
            accepted_lengths: vec![15],
            iin_ranges: vec![PrefixRange::exact(34, 2), PrefixRange::exact(37, 2)],
        },
        NetworkDescriptor {
            network: Network::Discover,
            display_name: "Discover".to_string(),
            icon: "discover".to_string(),
            color: "#ff6000".to_string(),
            example: "6011 1111 1111 1117".to_string(),
            accepted_lengths: vec![16, 19],
            iin_ranges: vec![
                PrefixRange::exact(6011, 4),
                PrefixRange::between(644, 649, 3),
                PrefixRange::exact(65, 2),
            ],
        },
        NetworkDescriptor {
            network: Network::Jcb,
            display_name: "JCB".to_string(),
            icon: "jcb".to_string(),
            color: "#3068a3".to_string(),
            example: "3530 1113 3330 0000".to_string(),
            accepted_lengths: vec![16, 17, 18, 19],
            iin_ranges: vec![PrefixRange::between(3528, 3589, 4)],
        },
        NetworkDescriptor {
            network: Network::DinersClub,
            display_name: "Diners Club".to_string(),
            icon: "diners".to_string(),
            color: "#0079be".to_string(),
            example: "3622 7206 2716 67".to_string(),
            accepted_lengths: vec![14, 15, 16, 17, 18, 19],
            iin_ranges: vec![
                PrefixRange::between(300, 305, 3),
                PrefixRange::exact(309, 3),
                PrefixRange::exact(36, 2),
                PrefixRange::exact(38, 2),
                PrefixRange::exact(39, 2),
            ],
        },
        NetworkDescriptor {
            network: Network::UnionPay,
            display_name: "China UnionPay".to_string(),
            icon: "unionpay".to_string(),
            color: "#e21836".to_string(),
            example: "6212 3456 7890 1265".to_string(),
            accepted_lengths: vec![16, 17, 18, 19],
            iin_ranges: vec![PrefixRange::exact(62, 2)],
        },
        NetworkDescriptor {
            network: Network::UzCard,
            display_name: "UzCard".to_string(),
            icon: "generic".to_string(),
            color: "#00a651".to_string(),
            example: "8600 1234 5678 9012".to_string(),
            accepted_lengths: vec![16],
            iin_ranges: vec![PrefixRange::exact(8600, 4)],
        },
    ]
}

lazy_static! {
    static ref STANDARD: NetworkRegistry = NetworkRegistry::new(builtin_descriptors())
        .expect("built-in network table satisfies registry invariants");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(network: Network, lengths: Vec<usize>, ranges: Vec<PrefixRange>) -> NetworkDescriptor {
        NetworkDescriptor {
            network,
            display_name: network.display_name().to_string(),
            icon: network.as_str().to_string(),
            color: "#000000".to_string(),
            example: String::new(),
            accepted_lengths: lengths,
            iin_ranges: ranges,
        }
    }

    #[test]
    fn test_standard_table_shape() {
        let registry = NetworkRegistry::standard();
        assert_eq!(registry.len(), 9);
        assert!(!registry.is_empty());
        assert!(registry.get(Network::UzCard).is_some());
    }

    #[test]
    fn test_detect_each_network() {
        let registry = NetworkRegistry::standard();
        let cases = [
            ("4111111111111111", Network::Visa),
            ("5555555555554444", Network::MasterCard),
            ("2221000000000009", Network::MasterCard),
            ("2201382000000013", Network::Mir),
            ("378282246310005", Network::AmericanExpress),
            ("6011111111111117", Network::Discover),
            ("6451111111111111", Network::Discover),
            ("6511111111111111", Network::Discover),
            ("3530111333300000", Network::Jcb),
            ("30569309025904", Network::DinersClub),
            ("36227206271667", Network::DinersClub),
            ("6212345678901265", Network::UnionPay),
            ("8600123456789012", Network::UzCard),
        ];
        for (digits, expected) in cases {
            let detected = registry.detect(digits);
            assert_eq!(
                detected.map(|d| d.network),
                Some(expected),
                "wrong network for {digits}"
            );
        }
    }

    #[test]
    fn test_detect_unknown_and_degenerate() {
        let registry = NetworkRegistry::standard();
        assert!(registry.detect("1234567890123456").is_none());
        assert!(registry.detect("9999999999999999").is_none());
        assert!(registry.detect("").is_none());
        assert!(registry.detect("4111 1111").is_none());
    }

    #[test]
    fn test_detect_incremental_prefixes() {
        let registry = NetworkRegistry::standard();

        // One digit settles Visa, two settle MasterCard and UnionPay
        assert_eq!(registry.detect("4").map(|d| d.network), Some(Network::Visa));
        assert_eq!(registry.detect("51").map(|d| d.network), Some(Network::MasterCard));
        assert_eq!(registry.detect("62").map(|d| d.network), Some(Network::UnionPay));

        // The 2-series stays ambiguous between MasterCard and Mir until the
        // third digit
        assert!(registry.detect("2").is_none());
        assert!(registry.detect("22").is_none());
        assert_eq!(registry.detect("220").map(|d| d.network), Some(Network::Mir));
        assert_eq!(registry.detect("223").map(|d| d.network), Some(Network::MasterCard));
        assert_eq!(registry.detect("2221").map(|d| d.network), Some(Network::MasterCard));
        assert_eq!(registry.detect("2204").map(|d| d.network), Some(Network::Mir));
        assert!(registry.detect("2205").is_none());

        // A lone 3 or 6 is still shared by several networks
        assert!(registry.detect("3").is_none());
        assert!(registry.detect("6").is_none());
        assert_eq!(registry.detect("35").map(|d| d.network), Some(Network::Jcb));
        assert_eq!(registry.detect("60").map(|d| d.network), Some(Network::Discover));
        assert_eq!(registry.detect("30").map(|d| d.network), Some(Network::DinersClub));
    }

    #[test]
    fn test_known_networks_subset() {
        let registry = NetworkRegistry::standard();
        let names: Vec<&str> = registry.known_networks().map(|d| d.name()).collect();
        assert_eq!(
            names,
            vec!["visa", "mastercard", "mir", "amex", "discover", "jcb"]
        );

        // Restartable enumeration
        assert_eq!(registry.known_networks().count(), 6);
        assert_eq!(registry.known_networks().count(), 6);
    }

    #[test]
    fn test_rejects_empty_lengths() {
        let result = NetworkRegistry::new(vec![descriptor(
            Network::Visa,
            vec![],
            vec![PrefixRange::exact(4, 1)],
        )]);
        assert!(matches!(result, Err(Error::EmptyLengths("visa"))));
    }

    #[test]
    fn test_rejects_implausible_length() {
        let result = NetworkRegistry::new(vec![descriptor(
            Network::Visa,
            vec![16, 25],
            vec![PrefixRange::exact(4, 1)],
        )]);
        assert!(matches!(
            result,
            Err(Error::LengthOutOfRange { network: "visa", length: 25 })
        ));
    }

    #[test]
    fn test_rejects_malformed_range() {
        let result = NetworkRegistry::new(vec![descriptor(
            Network::MasterCard,
            vec![16],
            vec![PrefixRange::between(55, 51, 2)],
        )]);
        assert!(matches!(result, Err(Error::InvalidRange { .. })));
    }

    #[test]
    fn test_rejects_missing_ranges() {
        let result = NetworkRegistry::new(vec![descriptor(Network::Jcb, vec![16], vec![])]);
        assert!(matches!(result, Err(Error::EmptyRanges("jcb"))));
    }

    #[test]
    fn test_rejects_duplicate_network() {
        let result = NetworkRegistry::new(vec![
            descriptor(Network::Visa, vec![16], vec![PrefixRange::exact(4, 1)]),
            descriptor(Network::Visa, vec![13], vec![PrefixRange::exact(4, 1)]),
        ]);
        assert!(matches!(result, Err(Error::DuplicateNetwork("visa"))));
    }

    #[test]
    fn test_custom_table_priority_order() {
        // A one-entry table only ever answers with that entry
        let registry = NetworkRegistry::new(vec![descriptor(
            Network::UzCard,
            vec![16],
            vec![PrefixRange::exact(8600, 4)],
        )])
        .unwrap();

        assert_eq!(
            registry.detect("8600123456789012").map(|d| d.network),
            Some(Network::UzCard)
        );
        assert!(registry.detect("4111111111111111").is_none());
    }
}
