//! Record types for every content table.
//!
//! All records are immutable after load. Fields named `related_posts`,
//! `related_terms`, `tool_slug` and friends are **soft references**: plain
//! slug strings that may point at records which no longer (or do not yet)
//! exist. Resolution happens lazily through the catalog and silently drops
//! slugs that do not resolve.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ============================================================================
// Posts
// ============================================================================

/// A blog post. Parsed from `content/posts/*.md` (TOML front matter between
/// `+++` fences, markdown body kept opaque).
#[derive(Debug, Clone, Serialize)]
pub struct Post {
    /// URL slug, unique across posts
    pub slug: String,

    /// Display title
    pub title: String,

    /// Publication date
    pub date: NaiveDate,

    /// Short teaser shown on index pages
    pub excerpt: String,

    /// Display-cased tags (e.g. "Growth Loops"), order as authored
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    /// Raw markdown body. Opaque to the catalog; only the link suggester
    /// reads it, to detect existing internal links.
    #[serde(skip)]
    pub body: String,
}

/// Front matter of a post file, before date parsing and slug defaulting.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PostFrontMatter {
    /// Slug override; defaults to the file stem
    pub slug: Option<String>,
    pub title: String,
    /// `YYYY-MM-DD`
    pub date: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

// ============================================================================
// Tools
// ============================================================================

/// A tool category with its ordered tool listing (`content/data/tools.toml`).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ToolCategory {
    pub slug: String,
    pub title: String,
    pub description: String,

    /// Ordered as authored; order is meaningful (rough editorial ranking)
    #[serde(default)]
    pub tools: Vec<Tool>,
}

/// A single tool. Identity for cross-referencing is `(category_slug, slug)`;
/// the name alone is not globally unique.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Tool {
    /// Unique within its category
    pub slug: String,
    pub name: String,
    pub description: String,
    pub pricing: String,
    pub best_for: String,
    pub url: String,
}

// ============================================================================
// Industries
// ============================================================================

/// An industry landing page record (`content/data/industries.toml`).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Industry {
    pub slug: String,
    pub name: String,
    pub headline: String,

    #[serde(default)]
    pub metrics: Vec<Metric>,

    #[serde(default)]
    pub pain_points: Vec<String>,

    /// Ordered as authored
    #[serde(default)]
    pub ai_use_cases: Vec<String>,

    #[serde(default)]
    pub key_technologies: Vec<String>,

    /// Soft references into the posts table
    #[serde(default)]
    pub related_posts: Vec<String>,
}

/// A headline metric (label + display value).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Metric {
    pub label: String,
    pub value: String,
}

// ============================================================================
// Glossary
// ============================================================================

/// A glossary entry (`content/data/glossary.toml`). Glossary slugs double as
/// the "concept" axis of the concept×industry pages.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GlossaryTerm {
    pub slug: String,
    pub term: String,
    pub category: TermCategory,
    pub definition: String,
    pub explanation: String,

    /// Soft references into the glossary table itself
    #[serde(default)]
    pub related_terms: Vec<String>,

    /// Soft references into the posts table
    #[serde(default)]
    pub related_posts: Vec<String>,
}

/// Glossary taxonomy. Closed set; adding a category is a schema change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TermCategory {
    Concept,
    Technique,
    Metric,
    Tooling,
}

// ============================================================================
// Comparisons
// ============================================================================

/// A head-to-head comparison page. Used by both the generic comparison table
/// (`comparisons.toml`, sides named `item_a`/`item_b`) and the tool
/// comparison table (`tool-comparisons.toml`, sides named `tool_a`/`tool_b`);
/// the aliases accept either spelling.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Comparison {
    pub slug: String,
    pub title: String,

    #[serde(alias = "tool_a")]
    pub item_a: ComparisonSide,

    #[serde(alias = "tool_b")]
    pub item_b: ComparisonSide,

    #[serde(default)]
    pub criteria: Vec<Criterion>,

    pub verdict: String,

    #[serde(default)]
    pub related_posts: Vec<String>,
}

/// One side of a comparison.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ComparisonSide {
    pub name: String,
    #[serde(default)]
    pub pros: Vec<String>,
    #[serde(default)]
    pub cons: Vec<String>,
    #[serde(default)]
    pub best_for: String,
}

/// A row of the comparison criteria table.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Criterion {
    pub name: String,
    pub value_a: String,
    pub value_b: String,
}

// ============================================================================
// Digests
// ============================================================================

/// A newsletter digest issue (`content/data/digests.toml`).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Digest {
    pub slug: String,

    /// Monotonic issue id
    pub number: u32,

    /// `YYYY-MM-DD`
    pub date: NaiveDate,

    pub title: String,

    #[serde(default)]
    pub items: Vec<DigestItem>,
}

/// A digest item linking either to an internal post or an external URL.
/// The xor is conventional, not enforced at load; `lattice check` reports
/// items that carry both or neither.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DigestItem {
    pub title: String,
    pub description: String,

    /// Soft reference into the posts table
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_slug: Option<String>,

    /// External link
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

// ============================================================================
// Guides & Use Cases
// ============================================================================

/// A long-form guide (`content/data/guides.toml`).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Guide {
    pub slug: String,
    pub title: String,
    pub description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,

    #[serde(default)]
    pub related_posts: Vec<String>,
}

/// A use-case page (`content/data/use-cases.toml`).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct UseCase {
    pub slug: String,
    pub title: String,
    pub description: String,

    /// Soft reference into the industries table
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,

    #[serde(default)]
    pub related_posts: Vec<String>,
}

// ============================================================================
// Combinatorial Tables
// ============================================================================

/// An authored concept×industry page (`content/data/concept-industry.toml`).
///
/// Compound-keyed by `(concept, industry)`. These records form the curated
/// allow-list of the concept×industry matrix: a pair absent from this table
/// legitimately 404s, even when both slugs exist on their own axes.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ConceptIndustryPage {
    /// Glossary slug (first key)
    pub concept: String,

    /// Industry slug (second key)
    pub industry: String,

    pub headline: String,
    pub intro: String,

    #[serde(default)]
    pub applications: Vec<String>,

    /// Tool names relevant in this industry context (display strings)
    #[serde(default)]
    pub tools: Vec<String>,

    #[serde(default)]
    pub metrics: Vec<Metric>,

    #[serde(default)]
    pub related_posts: Vec<String>,
}

/// An authored category×industry recommendation set
/// (`content/data/industry-tools.toml`). Compound-keyed by
/// `(category, industry)`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct IndustryToolRec {
    /// Tool category slug (first key)
    pub category: String,

    /// Industry slug (second key)
    pub industry: String,

    /// Ranked as authored, best first
    #[serde(default)]
    pub recommendations: Vec<Recommendation>,
}

/// A single ranked tool recommendation.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Recommendation {
    /// Soft reference to a tool within the rec's category
    pub tool_slug: String,

    pub rating: Rating,
    pub reason: String,
}

/// Recommendation tier. Closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Rating {
    TopPick,
    RunnerUp,
    AlsoConsider,
}

impl Rating {
    /// Display label used in reports.
    pub fn label(&self) -> &'static str {
        match self {
            Rating::TopPick => "Top Pick",
            Rating::RunnerUp => "Runner Up",
            Rating::AlsoConsider => "Also Consider",
        }
    }
}
