//! Beach name search.

use praiafinder_core::Beach;

/// Suggestions shown for a search box.
pub const SEARCH_LIMIT: usize = 8;

/// Beaches whose name contains `query`, ignoring case.
///
/// The query is trimmed; a blank query matches nothing. A beach whose whole
/// name equals the query comes first, the rest keep list order.
///
/// # Examples
/// ```
/// use praiafinder_core::Beach;
/// use praiafinder_view::search_beaches;
///
/// let beaches = [
///     Beach { id: "1".into(), name: "Praia da Rocha".into(), ..Beach::default() },
///     Beach { id: "2".into(), name: "Meia Praia".into(), ..Beach::default() },
/// ];
/// let hits: Vec<_> = search_beaches(&beaches, " ROCHA ").map(|beach| beach.id.as_str()).collect();
/// assert_eq!(hits, ["1"]);
/// ```
pub fn search_beaches<'a>(beaches: &'a [Beach], query: &str) -> impl Iterator<Item = &'a Beach> {
    let needle = query.trim().to_lowercase();
    let mut hits: Vec<&Beach> = if needle.is_empty() {
        Vec::new()
    } else {
        beaches
            .iter()
            .filter(|beach| beach.name.to_lowercase().contains(&needle))
            .collect()
    };
    hits.sort_by_key(|beach| beach.name.to_lowercase() != needle);
    hits.into_iter()
}

/// The beach a submitted search selects: an exact name match, else the
/// first partial one.
#[must_use]
pub fn pick_beach<'a>(beaches: &'a [Beach], query: &str) -> Option<&'a Beach> {
    search_beaches(beaches, query).next()
}
