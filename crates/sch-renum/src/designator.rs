//! Designator parsing: splitting `R12` into class prefix `R` and number 12.

/// A designator split into its class prefix and numeric suffix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedDesignator {
    pub prefix: String,
    pub number: u32,
}

/// Class prefix used when a designator carries no leading letters at all
/// (e.g. a bare number placed by hand).
pub const FALLBACK_CLASS: &str = "U";

/// Leading ASCII-alphabetic run of a designator, e.g. `LED` for `LED12`.
///
/// Returns `None` for designators that do not start with a letter.
pub fn class_prefix(designator: &str) -> Option<&str> {
    let end = designator
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(designator.len());
    (end > 0).then(|| &designator[..end])
}

/// Class prefix with the `U` fallback applied.
pub fn class_prefix_or_fallback(designator: &str) -> &str {
    class_prefix(designator).unwrap_or(FALLBACK_CLASS)
}

/// Parse a full `prefix + digits` designator (e.g. `R1`, `IC10`, `R1000`).
///
/// The digits must directly follow the letters and run to the end of the
/// string; anything else (underscores, trailing letters, missing number)
/// is not a class-prefixed designator.
pub fn parse_designator(s: &str) -> Option<ParsedDesignator> {
    let prefix = class_prefix(s)?;
    let digits = &s[prefix.len()..];
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let number: u32 = digits.parse().ok()?;
    Some(ParsedDesignator {
        prefix: prefix.to_owned(),
        number,
    })
}
