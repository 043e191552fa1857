use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for validating category slugs
    /// Must be lowercase alphanumeric with single hyphens, so it is safe as a path segment
    /// - Valid: "dubai", "dubai-marina", "beaches2"
    /// - Invalid: "-dubai", "dubai-", "dubai--marina", "Dubai", "dubai/marina"
    pub static ref SLUG_REGEX: Regex = Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").unwrap();
}
