//! Validation orchestration
//!
//! Single entry point for the presentation layer: raw user input in, a
//! structured [`ValidationResult`] out. Every call is independent; the
//! engine holds no session state.

use tracing::debug;

use crate::luhn::is_valid_luhn;
use crate::normalize::normalize;
use crate::registry::NetworkRegistry;
use crate::types::{length_ok, Network, NetworkDescriptor, ValidationResult};

/// Runs the full pipeline against a network rule table
#[derive(Debug, Clone)]
pub struct CardValidator {
    registry: NetworkRegistry,
}

impl CardValidator {
    /// Validator over the built-in network table
    pub fn new() -> Self {
        Self {
            registry: NetworkRegistry::standard().clone(),
        }
    }

    /// Validator over a custom rule table
    pub fn with_registry(registry: NetworkRegistry) -> Self {
        Self { registry }
    }

    /// Normalize the raw input, then run network detection, the Luhn
    /// check, and the length policy against the digit string.
    pub fn validate(&self, raw: &str) -> ValidationResult {
        run(&self.registry, raw)
    }

    /// Whether `raw` is a Luhn-valid number issued by `network`.
    pub fn is_valid_for_network(&self, raw: &str, network: Network) -> bool {
        let digits = normalize(raw);
        if !is_valid_luhn(&digits) {
            return false;
        }
        self.registry.detect(&digits).map(|descriptor| descriptor.network) == Some(network)
    }

    /// The rule table this validator runs against
    pub fn registry(&self) -> &NetworkRegistry {
        &self.registry
    }
}

impl Default for CardValidator {
    fn default() -> Self {
        Self::new()
    }
}

fn run(registry: &NetworkRegistry, raw: &str) -> ValidationResult {
    let digits = normalize(raw);
    let network = registry.detect(&digits).cloned();
    let luhn_valid = is_valid_luhn(&digits);
    let length_ok = length_ok(&digits, network.as_ref());

    debug!(
        digit_count = digits.len(),
        luhn_valid,
        length_ok,
        network = network.as_ref().map_or("none", |descriptor| descriptor.name()),
        "card validated"
    );

    ValidationResult {
        digits,
        luhn_valid,
        network,
        length_ok,
    }
}

/// Validate raw input against the built-in table.
pub fn validate(raw: &str) -> ValidationResult {
    run(NetworkRegistry::standard(), raw)
}

/// Detect the issuing network against the built-in table.
pub fn detect(digits: &str) -> Option<&'static NetworkDescriptor> {
    NetworkRegistry::standard().detect(digits)
}

/// Display subset of the built-in table, in a stable order.
pub fn known_networks() -> impl Iterator<Item = &'static NetworkDescriptor> {
    NetworkRegistry::standard().known_networks()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_full_pipeline() {
        let validator = CardValidator::new();
        let result = validator.validate("4111 1111 1111 1111");

        assert_eq!(result.digits, "4111111111111111");
        assert!(result.luhn_valid);
        assert_eq!(result.network_name(), Some("visa"));
        assert!(result.length_ok);
        assert!(result.passes());
    }

    #[test]
    fn test_validate_empty_input() {
        let result = validate("");
        assert_eq!(result.digits, "");
        assert!(!result.luhn_valid);
        assert!(result.network.is_none());
        assert!(result.length_ok);
        assert!(!result.passes());
    }

    #[test]
    fn test_validate_separators_do_not_matter() {
        let plain = validate("5555555555554444");
        let messy = validate("5555-5555 5555.4444");
        assert_eq!(plain.digits, messy.digits);
        assert_eq!(plain.luhn_valid, messy.luhn_valid);
        assert_eq!(plain.network_name(), messy.network_name());
    }

    #[test]
    fn test_validate_wrong_length_for_network() {
        // Luhn-consistent 14-digit number on a Visa IIN
        let result = validate("41111111111114");
        assert!(result.luhn_valid);
        assert_eq!(result.network_name(), Some("visa"));
        assert!(!result.length_ok);
        assert!(!result.passes());
    }

    #[test]
    fn test_is_valid_for_network() {
        let validator = CardValidator::new();
        assert!(validator.is_valid_for_network("4111111111111111", Network::Visa));
        assert!(!validator.is_valid_for_network("4111111111111111", Network::MasterCard));
        assert!(!validator.is_valid_for_network("4111111111111112", Network::Visa));
    }

    #[test]
    fn test_free_function_surface() {
        assert_eq!(
            detect("378282246310005").map(|descriptor| descriptor.network),
            Some(Network::AmericanExpress)
        );
        assert_eq!(known_networks().count(), 6);
    }

    #[test]
    fn test_result_serializes_for_the_ui() {
        let value = serde_json::to_value(validate("4111111111111111")).unwrap();
        assert_eq!(value["digits"], "4111111111111111");
        assert_eq!(value["luhn_valid"], true);
        assert_eq!(value["network"]["network"], "visa");
        assert_eq!(value["length_ok"], true);
    }
}
