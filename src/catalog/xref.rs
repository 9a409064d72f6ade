//! The cross-reference joiner.
//!
//! One function, reused by every page type that carries a reference list
//! (glossary, comparisons, guides, industries, digests).

/// Resolve a list of soft slug references through a lookup.
///
/// - input order is preserved
/// - slugs that do not resolve are silently dropped
/// - duplicates are **not** deduplicated: a slug listed twice in the source
///   appears twice in the output (and a dangling slug listed twice is
///   dropped both times)
pub fn resolve_refs<'c, T: ?Sized, F>(slugs: &[String], lookup: F) -> Vec<&'c T>
where
    F: Fn(&str) -> Option<&'c T>,
{
    slugs.iter().filter_map(|slug| lookup(slug)).collect()
}
