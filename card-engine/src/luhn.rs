//! Luhn checksum validation (ISO/IEC 7812)

/// Minimum digits in a full card number
pub const MIN_CARD_LENGTH: usize = 13;

/// Maximum digits in a full card number
pub const MAX_CARD_LENGTH: usize = 19;

/// Check a normalized digit string against the Luhn formula.
///
/// Returns false for an empty string, a string containing a non-digit, or
/// a digit count outside the standard 13..=19 card range.
pub fn is_valid_luhn(digits: &str) -> bool {
    let values: Vec<u32> = digits
        .chars()
        .map(|c| c.to_digit(10))
        .collect::<Option<Vec<_>>>()
        .unwrap_or_default();

    if values.len() < MIN_CARD_LENGTH || values.len() > MAX_CARD_LENGTH {
        return false;
    }

    luhn_sum(&values) % 10 == 0
}

/// Running Luhn sum: every second digit from the right is doubled, with 9
/// subtracted whenever the double exceeds 9.
fn luhn_sum(values: &[u32]) -> u32 {
    values
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &digit)| {
            if i % 2 == 1 {
                let doubled = digit * 2;
                if doubled > 9 {
                    doubled - 9
                } else {
                    doubled
                }
            } else {
                digit
            }
        })
        .sum()
}
