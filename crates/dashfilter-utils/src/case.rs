use convert_case::{Case, Casing};

///
/// Casing helpers
///
/// Schema names arrive as `snake_case` or `camelCase` identifiers; widgets
/// show them to people in title case.
///

/// Convert an identifier into a human-readable title (`order_items` -> `Order Items`).
#[must_use]
pub fn title_case(ident: &str) -> String {
    ident.to_case(Case::Title)
}
