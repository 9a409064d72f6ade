//! Tag slugification.
//!
//! Converts display-cased tag strings into URL-safe route segments.

// ============================================================================
// Slugification
// ============================================================================

/// Convert a tag to its URL form: lowercase, spaces replaced by hyphens.
///
/// This transform is deliberately one-way and lossy. Two distinct tags can
/// collide on the same slug (e.g. `"AI/ML"` and `"ai/ml"`); lookups that need
/// the original tag back must re-derive the slug of every known tag and take
/// the first match (see `Catalog::posts_by_tag_slug`).
pub fn tag_to_slug(tag: &str) -> String {
    tag.trim()
        .chars()
        .map(|c| if c.is_whitespace() { '-' } else { c })
        .collect::<String>()
        .to_lowercase()
}

/// Check that a slug is usable as a route segment.
///
/// Content tables are hand-authored; this catches the common typos (spaces,
/// uppercase, empty string) at load time instead of emitting broken URLs.
pub fn is_route_safe(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}
