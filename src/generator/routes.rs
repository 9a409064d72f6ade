//! Static-route parameter emission.
//!
//! The external rendering layer registers one route per record and one per
//! combinatorial pair. This module enumerates every parameter set and writes
//! them as one JSON document, grouped by route family.

use crate::catalog::Catalog;
use crate::config::SiteConfig;
use crate::log;
use crate::utils::slug::tag_to_slug;
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;

// ============================================================================
// Route Parameter Types
// ============================================================================

/// Parameters of a single-slug route (e.g. `/blog/[slug]`).
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SlugParams {
    pub slug: String,
}

/// Parameters of a tag route. Carries the slugified form; the renderer
/// recovers the original-cased tag through the catalog.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TagParams {
    pub tag: String,
}

/// Parameters of `/learn/[concept]/for/[industry]`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ConceptIndustryParams {
    pub concept: String,
    pub industry: String,
}

/// Parameters of `/tools/[category]/for/[industry]`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CategoryIndustryParams {
    pub category: String,
    pub industry: String,
}

/// Every static-route parameter set, grouped by route family.
#[derive(Debug, Clone, Serialize)]
pub struct StaticRoutes {
    pub blog: Vec<SlugParams>,
    pub tags: Vec<TagParams>,
    pub tools: Vec<SlugParams>,
    pub industries: Vec<SlugParams>,
    pub glossary: Vec<SlugParams>,
    pub comparisons: Vec<SlugParams>,
    pub tool_comparisons: Vec<SlugParams>,
    pub digests: Vec<SlugParams>,
    pub guides: Vec<SlugParams>,
    pub use_cases: Vec<SlugParams>,
    pub learn: Vec<ConceptIndustryParams>,
    pub industry_tools: Vec<CategoryIndustryParams>,
}

// ============================================================================
// Enumeration
// ============================================================================

impl StaticRoutes {
    /// Enumerate every route parameter set from the catalog.
    ///
    /// Combinatorial families come straight from the allow-lists; nothing is
    /// cross-multiplied here.
    pub fn from_catalog(catalog: &Catalog) -> Self {
        let slugs = |iter: &mut dyn Iterator<Item = &str>| -> Vec<SlugParams> {
            iter.map(|slug| SlugParams {
                slug: slug.to_owned(),
            })
            .collect()
        };

        Self {
            blog: slugs(&mut catalog.posts().all().iter().map(|p| p.slug.as_str())),
            tags: catalog
                .all_tags()
                .into_iter()
                .map(|tag| TagParams {
                    tag: tag_to_slug(tag),
                })
                .collect(),
            tools: slugs(
                &mut catalog
                    .tool_categories()
                    .all()
                    .iter()
                    .map(|c| c.slug.as_str()),
            ),
            industries: slugs(&mut catalog.industries().all().iter().map(|i| i.slug.as_str())),
            glossary: slugs(&mut catalog.glossary().all().iter().map(|t| t.slug.as_str())),
            comparisons: slugs(&mut catalog.comparisons().all().iter().map(|c| c.slug.as_str())),
            tool_comparisons: slugs(
                &mut catalog
                    .tool_comparisons()
                    .all()
                    .iter()
                    .map(|c| c.slug.as_str()),
            ),
            digests: slugs(&mut catalog.digests().all().iter().map(|d| d.slug.as_str())),
            guides: slugs(&mut catalog.guides().all().iter().map(|g| g.slug.as_str())),
            use_cases: slugs(&mut catalog.use_cases().all().iter().map(|u| u.slug.as_str())),
            learn: catalog
                .matrix()
                .concept_pages()
                .iter()
                .map(|page| ConceptIndustryParams {
                    concept: page.concept.clone(),
                    industry: page.industry.clone(),
                })
                .collect(),
            industry_tools: catalog
                .matrix()
                .tool_recs()
                .iter()
                .map(|rec| CategoryIndustryParams {
                    category: rec.category.clone(),
                    industry: rec.industry.clone(),
                })
                .collect(),
        }
    }

    /// Total number of parameterized routes across all families.
    pub fn len(&self) -> usize {
        self.blog.len()
            + self.tags.len()
            + self.tools.len()
            + self.industries.len()
            + self.glossary.len()
            + self.comparisons.len()
            + self.tool_comparisons.len()
            + self.digests.len()
            + self.guides.len()
            + self.use_cases.len()
            + self.learn.len()
            + self.industry_tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Pretty-printed JSON document.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize static routes")
    }
}

// ============================================================================
// Public API
// ============================================================================

/// Write routes.json into the output directory if enabled in config.
pub fn build_routes(config: &SiteConfig, catalog: &Catalog) -> Result<()> {
    if !config.build.routes.enable {
        return Ok(());
    }

    let routes = StaticRoutes::from_catalog(catalog);
    let count = routes.len();
    let json = routes.to_json()?;

    let path = config.output_dir().join(&config.build.routes.filename);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(&path, json)
        .with_context(|| format!("Failed to write routes to {}", path.display()))?;

    log!("routes"; "{} route params -> {}", count, path.display());
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentTables;
    use crate::content::types::*;
    use chrono::NaiveDate;

    fn sample_catalog() -> Catalog {
        Catalog::new(ContentTables {
            posts: vec![Post {
                slug: "hello".into(),
                title: "Hello".into(),
                date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                excerpt: String::new(),
                tags: vec!["Growth Loops".into()],
                body: String::new(),
            }],
            concept_pages: vec![ConceptIndustryPage {
                concept: "rag".into(),
                industry: "fintech".into(),
                headline: String::new(),
                intro: String::new(),
                applications: Vec::new(),
                tools: Vec::new(),
                metrics: Vec::new(),
                related_posts: Vec::new(),
            }],
            industry_tool_recs: vec![IndustryToolRec {
                category: "crm".into(),
                industry: "fintech".into(),
                recommendations: Vec::new(),
            }],
            ..ContentTables::default()
        })
    }

    #[test]
    fn test_enumerates_every_family() {
        let routes = StaticRoutes::from_catalog(&sample_catalog());

        assert_eq!(routes.blog, [SlugParams { slug: "hello".into() }]);
        assert_eq!(
            routes.tags,
            [TagParams {
                tag: "growth-loops".into()
            }]
        );
        assert_eq!(
            routes.learn,
            [ConceptIndustryParams {
                concept: "rag".into(),
                industry: "fintech".into()
            }]
        );
        assert_eq!(
            routes.industry_tools,
            [CategoryIndustryParams {
                category: "crm".into(),
                industry: "fintech".into()
            }]
        );
        assert_eq!(routes.len(), 4);
    }

    #[test]
    fn test_empty_catalog_is_empty() {
        let routes = StaticRoutes::from_catalog(&Catalog::new(ContentTables::default()));
        assert!(routes.is_empty());
    }

    #[test]
    fn test_json_shape() {
        let routes = StaticRoutes::from_catalog(&sample_catalog());
        let json = routes.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["blog"][0]["slug"], "hello");
        assert_eq!(value["learn"][0]["concept"], "rag");
        assert_eq!(value["learn"][0]["industry"], "fintech");
        assert_eq!(value["industry_tools"][0]["category"], "crm");
    }

    #[test]
    fn test_write_routes_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let mut config = SiteConfig::default();
        config.root = tmp.path().to_path_buf();
        config.site.base_url = "https://acme.example".into();

        build_routes(&config, &sample_catalog()).unwrap();

        let written = std::fs::read_to_string(tmp.path().join("public/routes.json")).unwrap();
        assert!(written.contains("\"slug\": \"hello\""));
    }
}
