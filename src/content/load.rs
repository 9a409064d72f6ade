//! Content table loading.
//!
//! Posts live in `content/posts/*.md` with TOML front matter between `+++`
//! fences. Every other table is a TOML array-of-tables file under
//! `content/data/`.
//!
//! # Failure semantics
//!
//! Load errors are fatal: a malformed file aborts the whole build rather
//! than producing a partial catalog. Missing table *files* are tolerated as
//! empty tables (a young site has no digests yet); missing *references*
//! inside tables are not even a load concern, they are dropped at lookup
//! time.

use crate::config::SiteConfig;
use crate::content::types::*;
use crate::utils::slug::is_route_safe;
use anyhow::Result;
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

// ============================================================================
// Errors
// ============================================================================

/// Content loading errors
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("missing `+++` front matter fences in `{0}`")]
    FrontMatter(PathBuf),

    #[error("TOML parsing error in `{0}`")]
    Toml(PathBuf, #[source] toml::de::Error),

    #[error("invalid date `{1}` in `{0}` (expected YYYY-MM-DD)")]
    Date(PathBuf, String),

    #[error("slug `{1}` in `{0}` is not route-safe (lowercase ascii, digits, hyphens)")]
    Slug(PathBuf, String),

    #[error("duplicate slug `{1}` in `{0}`")]
    DuplicateSlug(PathBuf, String),
}

// ============================================================================
// Loaded Tables
// ============================================================================

/// The raw tables as authored, before the catalog sorts and indexes them.
#[derive(Debug, Default)]
pub struct ContentTables {
    pub posts: Vec<Post>,
    pub tool_categories: Vec<ToolCategory>,
    pub industries: Vec<Industry>,
    pub glossary: Vec<GlossaryTerm>,
    pub comparisons: Vec<Comparison>,
    pub tool_comparisons: Vec<Comparison>,
    pub digests: Vec<Digest>,
    pub guides: Vec<Guide>,
    pub use_cases: Vec<UseCase>,
    pub concept_pages: Vec<ConceptIndustryPage>,
    pub industry_tool_recs: Vec<IndustryToolRec>,
}

/// Load every content table from the configured content directory.
pub fn load_tables(config: &SiteConfig) -> Result<ContentTables> {
    let content_dir = config.content_dir();
    let data_dir = content_dir.join("data");

    let tables = ContentTables {
        posts: load_posts(&content_dir.join("posts"))?,
        tool_categories: load_table(&data_dir.join("tools.toml"), "category")?,
        industries: load_table(&data_dir.join("industries.toml"), "industry")?,
        glossary: load_table(&data_dir.join("glossary.toml"), "term")?,
        comparisons: load_table(&data_dir.join("comparisons.toml"), "comparison")?,
        tool_comparisons: load_table(&data_dir.join("tool-comparisons.toml"), "comparison")?,
        digests: load_table(&data_dir.join("digests.toml"), "digest")?,
        guides: load_table(&data_dir.join("guides.toml"), "guide")?,
        use_cases: load_table(&data_dir.join("use-cases.toml"), "use_case")?,
        concept_pages: load_table(&data_dir.join("concept-industry.toml"), "page")?,
        industry_tool_recs: load_table(&data_dir.join("industry-tools.toml"), "rec")?,
    };

    check_unique(tables.posts.iter().map(|p| p.slug.as_str()), "posts")?;
    check_unique(tables.glossary.iter().map(|t| t.slug.as_str()), "glossary")?;
    check_unique(
        tables.industries.iter().map(|i| i.slug.as_str()),
        "industries",
    )?;
    check_unique(
        tables.tool_categories.iter().map(|c| c.slug.as_str()),
        "tools",
    )?;

    Ok(tables)
}

// ============================================================================
// Posts (markdown + front matter)
// ============================================================================

/// Load all posts from `content/posts/`, recursively.
///
/// Files without a `.md` extension are skipped.
fn load_posts(dir: &Path) -> Result<Vec<Post>, ContentError> {
    let mut posts = Vec::new();
    if !dir.is_dir() {
        return Ok(posts);
    }

    for entry in WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if !path.is_file() || path.extension().is_none_or(|ext| ext != "md") {
            continue;
        }
        posts.push(load_post(path)?);
    }

    Ok(posts)
}

/// Parse a single post file.
fn load_post(path: &Path) -> Result<Post, ContentError> {
    let source =
        fs::read_to_string(path).map_err(|err| ContentError::Io(path.to_path_buf(), err))?;

    let (front, body) =
        split_front_matter(&source).ok_or_else(|| ContentError::FrontMatter(path.to_path_buf()))?;

    let meta: PostFrontMatter =
        toml::from_str(front).map_err(|err| ContentError::Toml(path.to_path_buf(), err))?;

    let date = NaiveDate::parse_from_str(&meta.date, "%Y-%m-%d")
        .map_err(|_| ContentError::Date(path.to_path_buf(), meta.date.clone()))?;

    let slug = match meta.slug {
        Some(slug) => slug,
        None => path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default(),
    };
    if !is_route_safe(&slug) {
        return Err(ContentError::Slug(path.to_path_buf(), slug));
    }

    Ok(Post {
        slug,
        title: meta.title,
        date,
        excerpt: meta.excerpt,
        tags: meta.tags,
        body: body.to_owned(),
    })
}

/// Split `+++` front matter from the markdown body.
///
/// Returns `(front_matter, body)`. The opening fence must be the first
/// non-empty line.
fn split_front_matter(source: &str) -> Option<(&str, &str)> {
    let trimmed = source.trim_start_matches(['\u{feff}']).trim_start();
    let rest = trimmed.strip_prefix("+++")?;
    let end = rest.find("\n+++")?;
    let front = &rest[..end];
    let body = rest[end + 4..].trim_start_matches(['\r', '\n']);
    Some((front, body))
}

// ============================================================================
// TOML Tables
// ============================================================================

/// Load a TOML array-of-tables file, e.g. `[[industry]]` entries keyed by
/// `key = "industry"`. A missing file is an empty table.
fn load_table<T: DeserializeOwned>(path: &Path, key: &str) -> Result<Vec<T>, ContentError> {
    if !path.is_file() {
        return Ok(Vec::new());
    }
    let source =
        fs::read_to_string(path).map_err(|err| ContentError::Io(path.to_path_buf(), err))?;

    let mut doc: toml::Table =
        toml::from_str(&source).map_err(|err| ContentError::Toml(path.to_path_buf(), err))?;

    let Some(entries) = doc.remove(key) else {
        return Ok(Vec::new());
    };

    entries
        .try_into()
        .map_err(|err| ContentError::Toml(path.to_path_buf(), err))
}

/// Reject duplicate slugs within one table.
///
/// Slug is the identity key of every simple table; a duplicate is malformed
/// source data and aborts the build.
fn check_unique<'a>(
    slugs: impl Iterator<Item = &'a str>,
    table: &str,
) -> Result<(), ContentError> {
    let mut seen = HashSet::new();
    for slug in slugs {
        if !seen.insert(slug) {
            return Err(ContentError::DuplicateSlug(
                PathBuf::from(table),
                slug.to_owned(),
            ));
        }
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_post(dir: &Path, name: &str, content: &str) {
        fs::create_dir_all(dir).unwrap();
        fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn test_split_front_matter() {
        let source = "+++\ntitle = \"Hello\"\n+++\n\n# Body\n";
        let (front, body) = split_front_matter(source).unwrap();
        assert_eq!(front.trim(), "title = \"Hello\"");
        assert_eq!(body, "# Body\n");
    }

    #[test]
    fn test_split_front_matter_missing_fences() {
        assert!(split_front_matter("# Just markdown\n").is_none());
        assert!(split_front_matter("+++\nunclosed = true\n").is_none());
    }

    #[test]
    fn test_load_post_defaults_slug_to_file_stem() {
        let tmp = TempDir::new().unwrap();
        let posts = tmp.path().join("posts");
        write_post(
            &posts,
            "growth-loops.md",
            "+++\ntitle = \"Growth Loops\"\ndate = \"2024-03-01\"\n+++\nbody\n",
        );

        let loaded = load_posts(&posts).unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].slug, "growth-loops");
        assert_eq!(loaded[0].date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(loaded[0].body, "body\n");
    }

    #[test]
    fn test_load_post_bad_date_is_fatal() {
        let tmp = TempDir::new().unwrap();
        let posts = tmp.path().join("posts");
        write_post(
            &posts,
            "bad.md",
            "+++\ntitle = \"Bad\"\ndate = \"March 1st\"\n+++\n",
        );

        let err = load_posts(&posts).unwrap_err();
        assert!(matches!(err, ContentError::Date(_, _)));
    }

    #[test]
    fn test_load_post_rejects_unsafe_slug() {
        let tmp = TempDir::new().unwrap();
        let posts = tmp.path().join("posts");
        write_post(
            &posts,
            "a.md",
            "+++\nslug = \"Not Safe\"\ntitle = \"A\"\ndate = \"2024-01-01\"\n+++\n",
        );

        let err = load_posts(&posts).unwrap_err();
        assert!(matches!(err, ContentError::Slug(_, _)));
    }

    #[test]
    fn test_load_posts_missing_dir_is_empty() {
        let tmp = TempDir::new().unwrap();
        let loaded = load_posts(&tmp.path().join("nope")).unwrap();
        assert!(loaded.is_empty());
    }

    #[test]
    fn test_load_table_missing_file_is_empty() {
        let tmp = TempDir::new().unwrap();
        let loaded: Vec<Industry> = load_table(&tmp.path().join("industries.toml"), "industry").unwrap();
        assert!(loaded.is_empty());
    }

    #[test]
    fn test_load_table_parses_entries_in_order() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("industries.toml");
        fs::write(
            &path,
            r#"
            [[industry]]
            slug = "fintech"
            name = "Fintech"
            headline = "AI for Fintech"

            [[industry]]
            slug = "healthcare"
            name = "Healthcare"
            headline = "AI for Healthcare"
            "#,
        )
        .unwrap();

        let loaded: Vec<Industry> = load_table(&path, "industry").unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].slug, "fintech");
        assert_eq!(loaded[1].slug, "healthcare");
    }

    #[test]
    fn test_load_table_malformed_is_fatal() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("industries.toml");
        fs::write(&path, "[[industry]]\nslug = 42\n").unwrap();

        let result: Result<Vec<Industry>, _> = load_table(&path, "industry");
        assert!(matches!(result, Err(ContentError::Toml(_, _))));
    }

    #[test]
    fn test_check_unique_rejects_duplicates() {
        let err = check_unique(["a", "b", "a"].into_iter(), "posts").unwrap_err();
        assert!(matches!(err, ContentError::DuplicateSlug(_, _)));
        assert!(err.to_string().contains('a'));
    }
}
