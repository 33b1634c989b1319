//! Identifier helpers shared by the renderer and the linter.

use once_cell::sync::Lazy;
use regex::Regex;

/// Identifier legal as a bare declaration or property name.
#[allow(clippy::expect_used)]
static IDENTIFIER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").expect("identifier regex should be valid")
});

/// PascalCase: uppercase first letter, no separators.
#[allow(clippy::expect_used)]
static PASCAL_CASE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z][A-Za-z0-9]*$").expect("pascal case regex should be valid"));

pub fn is_identifier(name: &str) -> bool {
    IDENTIFIER_REGEX.is_match(name)
}

pub fn is_pascal_case(name: &str) -> bool {
    PASCAL_CASE_REGEX.is_match(name)
}

/// `user_profile` / `user-profile` / `userProfile` → `UserProfile`.
pub fn to_pascal_case(name: &str) -> String {
    name.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}

/// Property name as written inside a declaration body, quoted when it is not
/// a bare identifier.
pub fn property_name(name: &str) -> String {
    if is_identifier(name) {
        name.to_string()
    } else {
        format!("{name:?}")
    }
}
