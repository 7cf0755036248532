//! Display grouping for accepted codes.

/// Digits per display group.
const GROUP: usize = 3;

/// Group the digits of `s` in threes separated by a single space.
///
/// Non-digits are dropped first, so the function is idempotent:
/// `format_grouped(&format_grouped(x)) == format_grouped(x)`.
pub fn format_grouped(s: &str) -> String {
    let digits: Vec<char> = s.chars().filter(char::is_ascii_digit).collect();
    digits
        .chunks(GROUP)
        .map(|chunk| chunk.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(" ")
}
