//! Normalization of header text into Cypher-safe identifiers.
//!
//! `to_label` produces node labels and relationship type components;
//! `to_property_name` produces the camel-case property keys attached to
//! relationships. Neither escapes arbitrary characters - anything that
//! survives normalization must still pass [`is_safe_identifier`] before it
//! is interpolated into query text.

/// Normalize a raw header or cell value into a node label.
///
/// Uppercases, trims surrounding whitespace, and replaces spaces and
/// hyphens with underscores: `"Order Date"` becomes `"ORDER_DATE"`.
pub fn to_label(value: &str) -> String {
    value.trim().to_uppercase().replace([' ', '-'], "_")
}

/// Derive a camel-case property name from a value.
///
/// Runs `to_label` first, then converts underscores back to spaces,
/// title-cases each word, and strips the spaces: `"ORDER_DATE"` becomes
/// `"OrderDate"`. Used for the relationship property keys carrying a
/// row's numeric values.
pub fn to_property_name(value: &str) -> String {
    to_label(value).split('_').map(title_case).collect()
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

/// Allow-list check for anything interpolated into query text.
///
/// Labels and relationship types are derived from untrusted spreadsheet
/// headers; only ASCII alphanumerics and underscores are accepted. Cell
/// values never need this - they are always bound as query parameters.
pub fn is_safe_identifier(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}
