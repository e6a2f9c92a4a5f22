use regex::Regex;
use std::sync::LazyLock;

// Matches a North American phone number in loose formatting: optional +1
// country code, optional parentheses around the area code, optional hyphens
// and spaces between the three digit groups.
static PHONE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\+1)?\s*\(?\s*(\d+)\s*-?\)?\s*(\d+)\s*-?\s*(\d+)").unwrap()
});

/// Canonicalizes an identifier value before hashing, so equivalent real-world
/// identifiers hash identically on the receiving platform.
///
/// Rules are per identifier key; unrecognized keys pass through unchanged.
/// Total: always returns a string, never fails.
pub fn normalize(key: &str, value: &str) -> String {
    match key {
        "phone_number" => match PHONE_PATTERN.captures(value) {
            // "+1 (555) 123-4567" becomes "5551234567".
            Some(caps) => format!("{}{}{}", &caps[1], &caps[2], &caps[3]),
            None => value.to_string(),
        },
        "email" => value.to_lowercase().trim().to_string(),
        _ => value.to_string(),
    }
}
