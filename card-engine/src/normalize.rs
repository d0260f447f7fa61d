//! Raw input normalization and display formatting

/// Digits per display group
const GROUP_SIZE: usize = 4;

/// Strip every character that is not an ASCII decimal digit.
///
/// Empty input yields empty output; there are no error cases.
pub fn normalize(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Normalize, then regroup the digits into blocks of four separated by
/// single spaces. The last block may be shorter. Idempotent.
pub fn format(raw: &str) -> String {
    let digits = normalize(raw);
    let mut out = String::with_capacity(digits.len() + digits.len() / GROUP_SIZE);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && i % GROUP_SIZE == 0 {
            out.push(' ');
        }
        out.push(c);
    }
    out
}
