use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for validating postal code fields
    /// Alphanumeric groups, optionally separated by a single space or hyphen
    /// - Valid: "10115", "W1A 1AA", "75008", "1011-AB"
    /// - Invalid: " 10115", "10--115", "zip!", ""
    pub static ref ZIP_REGEX: Regex =
        Regex::new(r"^[A-Za-z0-9]+(?:[ -][A-Za-z0-9]+)*$").unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zip_regex_valid() {
        assert!(ZIP_REGEX.is_match("10115"));
        assert!(ZIP_REGEX.is_match("W1A 1AA"));
        assert!(ZIP_REGEX.is_match("75008"));
        assert!(ZIP_REGEX.is_match("1011-AB"));
        assert!(ZIP_REGEX.is_match("0"));
    }

    #[test]
    fn test_zip_regex_invalid() {
        assert!(!ZIP_REGEX.is_match(" 10115")); // leading space
        assert!(!ZIP_REGEX.is_match("10115 ")); // trailing space
        assert!(!ZIP_REGEX.is_match("10--115")); // double separator
        assert!(!ZIP_REGEX.is_match("zip!")); // punctuation
        assert!(!ZIP_REGEX.is_match("")); // empty
    }
}
