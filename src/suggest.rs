//! Tag-overlap internal-link suggestions.
//!
//! A batch report, not part of the served site: for every post, find other
//! posts sharing at least two tags that the post's own body does not already
//! link to, and rank them by shared-tag count.
//!
//! The `>= 2` threshold is a precision/recall tradeoff: one shared tag on a
//! marketing blog is noise. Suppression is per-direction — if A links to B
//! but B does not link back, A gets no suggestion for B while B still gets
//! one for A.

use crate::catalog::Catalog;
use crate::config::SiteConfig;
use crate::content::types::Post;
use regex::Regex;
use std::collections::HashSet;
use std::fmt::Write;
use std::sync::LazyLock;

// ============================================================================
// Constants
// ============================================================================

/// Minimum shared tags before a candidate is surfaced.
const MIN_SHARED_TAGS: usize = 2;

/// Markdown link to an internal post: `](/blog/<slug>)` or `](/blog/<slug>/)`.
static INTERNAL_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\]\(/blog/([a-z0-9-]+)/?\)").unwrap());

// ============================================================================
// Suggestions
// ============================================================================

/// A ranked cross-link candidate for one post.
#[derive(Debug)]
pub struct Candidate<'a> {
    pub post: &'a Post,
    /// Tags shared with the source post, in the source post's tag order
    pub shared_tags: Vec<&'a str>,
}

/// All candidates for one post, best first.
#[derive(Debug)]
pub struct PostSuggestions<'a> {
    pub post: &'a Post,
    pub candidates: Vec<Candidate<'a>>,
}

/// Compute suggestions for every post. Posts with no candidate above the
/// threshold are omitted.
pub fn suggest(catalog: &Catalog) -> Vec<PostSuggestions<'_>> {
    let posts = catalog.posts().all();

    posts
        .iter()
        .filter_map(|post| {
            let already_linked = linked_slugs(&post.body);

            let mut candidates: Vec<Candidate<'_>> = posts
                .iter()
                .filter(|other| other.slug != post.slug)
                .filter(|other| !already_linked.contains(other.slug.as_str()))
                .filter_map(|other| {
                    let shared_tags: Vec<&str> = post
                        .tags
                        .iter()
                        .map(String::as_str)
                        .filter(|tag| other.tags.iter().any(|t| t == tag))
                        .collect();
                    (shared_tags.len() >= MIN_SHARED_TAGS).then_some(Candidate {
                        post: other,
                        shared_tags,
                    })
                })
                .collect();

            // Stable sort: ties keep table order (newest first).
            candidates.sort_by(|a, b| b.shared_tags.len().cmp(&a.shared_tags.len()));

            (!candidates.is_empty()).then_some(PostSuggestions { post, candidates })
        })
        .collect()
}

/// Slugs the body already links to, via the internal markdown link pattern.
fn linked_slugs(body: &str) -> HashSet<&str> {
    INTERNAL_LINK
        .captures_iter(body)
        .map(|caps| caps.get(1).unwrap().as_str())
        .collect()
}

// ============================================================================
// Report
// ============================================================================

/// Render the flat human-readable report. Same catalog, same report.
pub fn render_report(catalog: &Catalog, config: &SiteConfig) -> String {
    let suggestions = suggest(catalog);

    let mut out = String::new();
    let header = format!("Internal link suggestions — {}", config.site.title);
    writeln!(out, "{header}").ok();
    writeln!(out, "{}", "=".repeat(header.chars().count())).ok();
    writeln!(out).ok();

    if suggestions.is_empty() {
        writeln!(out, "No suggestions. Every post pair shares fewer than {MIN_SHARED_TAGS} tags or is already linked.").ok();
        return out;
    }

    let mut total = 0;
    for entry in &suggestions {
        writeln!(out, "/blog/{}/  ({})", entry.post.slug, entry.post.title).ok();
        for candidate in &entry.candidates {
            total += 1;
            writeln!(
                out,
                "  -> /blog/{}/  ({} shared: {})",
                candidate.post.slug,
                candidate.shared_tags.len(),
                candidate.shared_tags.join(", ")
            )
            .ok();
        }
        writeln!(out).ok();
    }

    writeln!(out, "{total} suggestions across {} posts", suggestions.len()).ok();
    out
}

// ============================================================================
// Tests
// ============================================================================
