/// Minimum digit count for a phone number to be accepted.
pub const MIN_PHONE_DIGITS: usize = 10;

/// Strips everything except ASCII digits.
pub fn digits_only(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Progressive `(AAA) BBB-CCCC` display format applied on every keystroke.
///
/// Fewer than three digits are shown as typed; digits past the tenth are
/// dropped.
pub fn format_phone(raw: &str) -> String {
    let digits = digits_only(raw);
    let len = digits.len();

    if len >= MIN_PHONE_DIGITS {
        format!("({}) {}-{}", &digits[..3], &digits[3..6], &digits[6..10])
    } else if len >= 6 {
        format!("({}) {}-{}", &digits[..3], &digits[3..6], &digits[6..])
    } else if len >= 3 {
        format!("({}) {}", &digits[..3], &digits[3..])
    } else {
        digits
    }
}

pub fn is_valid_phone(raw: &str) -> bool {
    digits_only(raw).len() >= MIN_PHONE_DIGITS
}
