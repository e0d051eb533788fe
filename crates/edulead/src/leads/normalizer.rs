/// Minimum digits for a phone number to be trusted as an identity key.
const MIN_PHONE_DIGITS: usize = 7;
const PHONE_KEY_DIGITS: usize = 10;

pub(crate) fn normalize_text(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}'], "");
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub(crate) fn normalize_email(value: &str) -> Option<String> {
    let email = normalize_text(value).to_ascii_lowercase();
    if email.contains('@') {
        Some(email)
    } else {
        None
    }
}

/// Keeps the trailing ten digits so "+91 98765-43210" and "9876543210" collide.
pub(crate) fn normalize_phone(value: &str) -> Option<String> {
    let digits: Vec<char> = value.chars().filter(char::is_ascii_digit).collect();
    if digits.len() < MIN_PHONE_DIGITS {
        return None;
    }
    let start = digits.len().saturating_sub(PHONE_KEY_DIGITS);
    Some(digits[start..].iter().collect())
}
