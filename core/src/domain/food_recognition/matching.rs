//! Keyword lookup used by both the food filter and advice matching.
//!
//! Plain case-insensitive substring containment: "cheeseburger" matches
//! "cheese" and "burger", and "fishing" matches "fish". Everything that
//! decides whether a label mentions a keyword goes through [`label_matches`].

/// Returns true when `keyword` occurs anywhere in `label`, ignoring case.
/// An empty keyword never matches.
pub fn label_matches(label: &str, keyword: &str) -> bool {
    let keyword = keyword.trim();
    if keyword.is_empty() {
        return false;
    }
    label.to_lowercase().contains(&keyword.to_lowercase())
}
