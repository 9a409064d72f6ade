//! The content catalog: immutable lookup layer over every table.
//!
//! A `Catalog` is built once per invocation from the loaded tables and
//! passed by reference into every downstream stage. There is no interior
//! mutability and no write path; every accessor is a pure read, so sharing
//! the catalog across threads (rayon fan-out) is safe by construction.
//!
//! # Ordering
//!
//! Posts and digests are re-sorted newest-first at build time; every other
//! table keeps its source declaration order, which is editorially meaningful.

pub mod matrix;
pub mod xref;

use crate::config::SiteConfig;
use crate::content::types::*;
use crate::content::{ContentTables, load_tables};
use crate::utils::slug::tag_to_slug;
use anyhow::Result;
use matrix::Matrix;
use std::collections::HashMap;

// ============================================================================
// Slug-Indexed Table
// ============================================================================

/// An ordered table with a slug index built once at construction.
///
/// `all()` preserves the order the table was built with; `by_slug()` is an
/// O(1) map lookup. Missing slugs are `None`, never a panic — every slug
/// reference in the content is soft.
#[derive(Debug)]
pub struct Table<T> {
    items: Vec<T>,
    by_slug: HashMap<String, usize>,
}

impl<T> Table<T> {
    /// Build a table, indexing each item by the slug `slug_of` extracts.
    ///
    /// Uniqueness was already enforced at load; if a duplicate slips through,
    /// the first occurrence wins.
    fn new(items: Vec<T>, slug_of: impl Fn(&T) -> &str) -> Self {
        let mut by_slug = HashMap::with_capacity(items.len());
        for (idx, item) in items.iter().enumerate() {
            by_slug.entry(slug_of(item).to_owned()).or_insert(idx);
        }
        Self { items, by_slug }
    }

    /// All records, in table order.
    pub fn all(&self) -> &[T] {
        &self.items
    }

    /// Record by slug, if present.
    pub fn by_slug(&self, slug: &str) -> Option<&T> {
        self.by_slug.get(slug).map(|&idx| &self.items[idx])
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// ============================================================================
// Catalog
// ============================================================================

/// Immutable registry of every content table plus the combinatorial matrix.
#[derive(Debug)]
pub struct Catalog {
    posts: Table<Post>,
    tool_categories: Table<ToolCategory>,
    industries: Table<Industry>,
    glossary: Table<GlossaryTerm>,
    comparisons: Table<Comparison>,
    tool_comparisons: Table<Comparison>,
    digests: Table<Digest>,
    guides: Table<Guide>,
    use_cases: Table<UseCase>,
    matrix: Matrix,
}

impl Catalog {
    /// Build the catalog from loaded tables: sort the dated tables
    /// newest-first and index everything by slug.
    pub fn new(tables: ContentTables) -> Self {
        let ContentTables {
            mut posts,
            tool_categories,
            industries,
            glossary,
            comparisons,
            tool_comparisons,
            mut digests,
            guides,
            use_cases,
            concept_pages,
            industry_tool_recs,
        } = tables;

        // Stable sorts: same-day records keep their source order.
        posts.sort_by(|a, b| b.date.cmp(&a.date));
        digests.sort_by(|a, b| b.date.cmp(&a.date).then(b.number.cmp(&a.number)));

        Self {
            posts: Table::new(posts, |p| &p.slug),
            tool_categories: Table::new(tool_categories, |c| &c.slug),
            industries: Table::new(industries, |i| &i.slug),
            glossary: Table::new(glossary, |t| &t.slug),
            comparisons: Table::new(comparisons, |c| &c.slug),
            tool_comparisons: Table::new(tool_comparisons, |c| &c.slug),
            digests: Table::new(digests, |d| &d.slug),
            guides: Table::new(guides, |g| &g.slug),
            use_cases: Table::new(use_cases, |u| &u.slug),
            matrix: Matrix::new(concept_pages, industry_tool_recs),
        }
    }

    /// Load tables from disk and build the catalog.
    pub fn from_config(config: &SiteConfig) -> Result<Self> {
        Ok(Self::new(load_tables(config)?))
    }

    // ------------------------------------------------------------------------
    // Table accessors
    // ------------------------------------------------------------------------

    /// Posts, newest first.
    pub fn posts(&self) -> &Table<Post> {
        &self.posts
    }

    pub fn tool_categories(&self) -> &Table<ToolCategory> {
        &self.tool_categories
    }

    pub fn industries(&self) -> &Table<Industry> {
        &self.industries
    }

    pub fn glossary(&self) -> &Table<GlossaryTerm> {
        &self.glossary
    }

    pub fn comparisons(&self) -> &Table<Comparison> {
        &self.comparisons
    }

    pub fn tool_comparisons(&self) -> &Table<Comparison> {
        &self.tool_comparisons
    }

    /// Digest issues, newest first.
    pub fn digests(&self) -> &Table<Digest> {
        &self.digests
    }

    pub fn guides(&self) -> &Table<Guide> {
        &self.guides
    }

    pub fn use_cases(&self) -> &Table<UseCase> {
        &self.use_cases
    }

    /// The combinatorial concept×industry / category×industry matrix.
    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }

    /// A tool by its compound identity `(category_slug, tool_slug)`.
    ///
    /// A tool slug alone is not globally unique; it only means something
    /// inside its category.
    pub fn tool(&self, category_slug: &str, tool_slug: &str) -> Option<&Tool> {
        self.tool_categories
            .by_slug(category_slug)?
            .tools
            .iter()
            .find(|tool| tool.slug == tool_slug)
    }

    // ------------------------------------------------------------------------
    // Tag derivations
    // ------------------------------------------------------------------------

    /// Every tag, deduplicated, ordered by first occurrence across the
    /// (newest-first) post sequence.
    pub fn all_tags(&self) -> Vec<&str> {
        let mut seen = HashMap::new();
        let mut tags = Vec::new();
        for post in self.posts.all() {
            for tag in &post.tags {
                if seen.insert(tag.as_str(), ()).is_none() {
                    tags.push(tag.as_str());
                }
            }
        }
        tags
    }

    /// Resolve a tag slug back to its original-cased tag and the posts
    /// carrying it.
    ///
    /// `tag_to_slug` is lossy, so this re-derives the slug of every known
    /// tag and takes the first match. O(tags) per call; tables are tens of
    /// records, not millions.
    pub fn posts_by_tag_slug(&self, slug: &str) -> Option<(&str, Vec<&Post>)> {
        let tag = self
            .all_tags()
            .into_iter()
            .find(|tag| tag_to_slug(tag) == slug)?;

        let posts = self
            .posts
            .all()
            .iter()
            .filter(|post| post.tags.iter().any(|t| t == tag))
            .collect();

        Some((tag, posts))
    }

    // ------------------------------------------------------------------------
    // Soft-reference resolution
    // ------------------------------------------------------------------------

    /// Resolve a `related_posts` reference list, dropping dangling slugs.
    pub fn related_posts(&self, slugs: &[String]) -> Vec<&Post> {
        xref::resolve_refs(slugs, |slug| self.posts.by_slug(slug))
    }

    /// Resolve a `related_terms` reference list, dropping dangling slugs.
    pub fn related_terms(&self, slugs: &[String]) -> Vec<&GlossaryTerm> {
        xref::resolve_refs(slugs, |slug| self.glossary.by_slug(slug))
    }

    /// The "Learn" index: concept×industry pages grouped by industry, keyed
    /// by display name where the industry record resolves, by slug where it
    /// does not (soft reference).
    pub fn learn_index(&self) -> Vec<(&str, Vec<&ConceptIndustryPage>)> {
        matrix::group_by_industry(self.matrix.concept_pages())
            .into_iter()
            .map(|(slug, pages)| {
                let name = self
                    .industries
                    .by_slug(slug)
                    .map_or(slug, |industry| industry.name.as_str());
                (name, pages)
            })
            .collect()
    }
}

// ============================================================================
// Tests
// ============================================================================
