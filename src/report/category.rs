//! Normalizes free-text descriptions into display categories.

/// The category used for transactions with an empty description.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Normalize a transaction description into a display category.
///
/// The description is trimmed and only its first character is uppercased; the
/// remainder is left unchanged. Descriptions that are empty or entirely
/// whitespace map to [UNCATEGORIZED].
///
/// This is a display rule, not a taxonomy: " groceries" and "Groceries"
/// collapse to the same category, while descriptions that differ anywhere
/// past the first character remain distinct.
pub fn categorize(description: &str) -> String {
    let trimmed = description.trim();
    let mut chars = trimmed.chars();

    match chars.next() {
        None => UNCATEGORIZED.to_owned(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}
