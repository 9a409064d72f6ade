//! Sitemap generation.
//!
//! Aggregates every lookup table into one flat list of route descriptors and
//! writes sitemap.xml for search engine indexing.
//!
//! # Sitemap Format
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url>
//!     <loc>https://example.com/blog/hello/</loc>
//!     <lastmod>2025-01-01</lastmod>
//!     <changefreq>monthly</changefreq>
//!     <priority>0.8</priority>
//!   </url>
//! </urlset>
//! ```
//!
//! # Failure semantics
//!
//! There is no partial sitemap: if any table failed to load, the whole build
//! already aborted upstream. Within this module the only fallible step is
//! the final write.
//!
//! # Determinism
//!
//! Two aggregations over the same catalog are route-for-route identical,
//! except that sections without an intrinsic date carry the aggregation time
//! as `lastmod`. That keeps crawlers re-checking low-churn sections
//! periodically and is a deliberate choice, not drift to be pinned down.

use crate::catalog::Catalog;
use crate::config::SiteConfig;
use crate::log;
use crate::utils::minify::minify_xml;
use crate::utils::slug::tag_to_slug;
use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use std::fmt;
use std::fs;

// ============================================================================
// Constants
// ============================================================================

/// XML namespace for sitemap
const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

// ============================================================================
// Public API
// ============================================================================

/// Build sitemap if enabled in config.
pub fn build_sitemap(config: &SiteConfig, catalog: &Catalog) -> Result<()> {
    if config.build.sitemap.enable {
        let sitemap = Sitemap::from_catalog(catalog, config);
        sitemap.write(config)?;
    }
    Ok(())
}

// ============================================================================
// Route Descriptors
// ============================================================================

/// How often crawlers should expect a route to change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeFreq {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl fmt::Display for ChangeFreq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ChangeFreq::Daily => "daily",
            ChangeFreq::Weekly => "weekly",
            ChangeFreq::Monthly => "monthly",
            ChangeFreq::Yearly => "yearly",
        };
        f.write_str(s)
    }
}

/// Single URL entry in the sitemap.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteDescriptor {
    /// Full URL location
    pub url: String,
    /// Last modification date
    pub lastmod: NaiveDate,
    /// Crawl hint
    pub changefreq: ChangeFreq,
    /// Relative importance, 0.0..=1.0
    pub priority: f32,
}

/// Sitemap data structure
pub struct Sitemap {
    urls: Vec<RouteDescriptor>,
}

impl Sitemap {
    /// Aggregate one descriptor per static page, per simple table record,
    /// and per combinatorial pair. Deduplicated by construction: each route
    /// family is enumerated exactly once.
    pub fn from_catalog(catalog: &Catalog, config: &SiteConfig) -> Self {
        // Aggregation time stands in for sections with no intrinsic date.
        let today = Utc::now().date_naive();
        let mut urls = Vec::new();

        let mut push = |path: String, lastmod: NaiveDate, changefreq, priority| {
            urls.push(RouteDescriptor {
                url: config.url(&path),
                lastmod,
                changefreq,
                priority,
            });
        };

        // Static index pages
        push("/".into(), today, ChangeFreq::Daily, 1.0);
        push("/blog/".into(), today, ChangeFreq::Daily, 0.9);
        push("/tags/".into(), today, ChangeFreq::Weekly, 0.4);
        push("/tools/".into(), today, ChangeFreq::Weekly, 0.7);
        push("/industries/".into(), today, ChangeFreq::Weekly, 0.7);
        push("/glossary/".into(), today, ChangeFreq::Weekly, 0.5);
        push("/learn/".into(), today, ChangeFreq::Weekly, 0.6);
        push("/compare/".into(), today, ChangeFreq::Weekly, 0.6);
        push("/digests/".into(), today, ChangeFreq::Weekly, 0.5);
        push("/guides/".into(), today, ChangeFreq::Weekly, 0.6);
        push("/use-cases/".into(), today, ChangeFreq::Weekly, 0.6);

        // Simple tables: one descriptor per record
        for post in catalog.posts().all() {
            push(
                format!("/blog/{}/", post.slug),
                post.date,
                ChangeFreq::Monthly,
                0.8,
            );
        }
        for tag in catalog.all_tags() {
            push(
                format!("/tags/{}/", tag_to_slug(tag)),
                today,
                ChangeFreq::Weekly,
                0.4,
            );
        }
        for category in catalog.tool_categories().all() {
            push(
                format!("/tools/{}/", category.slug),
                today,
                ChangeFreq::Weekly,
                0.7,
            );
        }
        for industry in catalog.industries().all() {
            push(
                format!("/industries/{}/", industry.slug),
                today,
                ChangeFreq::Monthly,
                0.7,
            );
        }
        for term in catalog.glossary().all() {
            push(
                format!("/glossary/{}/", term.slug),
                today,
                ChangeFreq::Monthly,
                0.5,
            );
        }
        for cmp in catalog.comparisons().all() {
            push(
                format!("/compare/{}/", cmp.slug),
                today,
                ChangeFreq::Monthly,
                0.6,
            );
        }
        for cmp in catalog.tool_comparisons().all() {
            push(
                format!("/tools/compare/{}/", cmp.slug),
                today,
                ChangeFreq::Monthly,
                0.6,
            );
        }
        for digest in catalog.digests().all() {
            push(
                format!("/digests/{}/", digest.slug),
                digest.date,
                ChangeFreq::Yearly,
                0.5,
            );
        }
        for guide in catalog.guides().all() {
            push(
                format!("/guides/{}/", guide.slug),
                guide.date.unwrap_or(today),
                ChangeFreq::Monthly,
                0.6,
            );
        }
        for use_case in catalog.use_cases().all() {
            push(
                format!("/use-cases/{}/", use_case.slug),
                today,
                ChangeFreq::Monthly,
                0.6,
            );
        }

        // Combinatorial tables: one descriptor per allow-listed pair
        for page in catalog.matrix().concept_pages() {
            push(
                format!("/learn/{}/for/{}/", page.concept, page.industry),
                today,
                ChangeFreq::Monthly,
                0.6,
            );
        }
        for rec in catalog.matrix().tool_recs() {
            push(
                format!("/tools/{}/for/{}/", rec.category, rec.industry),
                today,
                ChangeFreq::Monthly,
                0.6,
            );
        }

        Self { urls }
    }

    /// All aggregated descriptors, in emission order.
    pub fn routes(&self) -> &[RouteDescriptor] {
        &self.urls
    }

    /// Generate sitemap XML string.
    fn into_xml(self) -> String {
        let mut xml = String::with_capacity(4096);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        xml.push('\n');
        xml.push_str(&format!(r#"<urlset xmlns="{SITEMAP_NS}">"#));
        xml.push('\n');

        for entry in self.urls {
            xml.push_str("  <url>\n");
            xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(&entry.url)));
            xml.push_str(&format!(
                "    <lastmod>{}</lastmod>\n",
                entry.lastmod.format("%Y-%m-%d")
            ));
            xml.push_str(&format!(
                "    <changefreq>{}</changefreq>\n",
                entry.changefreq
            ));
            xml.push_str(&format!("    <priority>{:.1}</priority>\n", entry.priority));
            xml.push_str("  </url>\n");
        }

        xml.push_str("</urlset>\n");
        xml
    }

    /// Write sitemap to the output directory.
    fn write(self, config: &SiteConfig) -> Result<()> {
        let count = self.urls.len();
        let sitemap_path = config.output_dir().join(&config.build.sitemap.filename);
        let xml = self.into_xml();
        let xml = minify_xml(&xml, config);

        if let Some(parent) = sitemap_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(&sitemap_path, xml.as_bytes())
            .with_context(|| format!("Failed to write sitemap to {}", sitemap_path.display()))?;

        log!("sitemap"; "{} routes -> {}", count, sitemap_path.display());
        Ok(())
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Escape special XML characters.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentTables;
    use crate::content::types::*;
    use std::collections::HashSet;

    fn test_config() -> SiteConfig {
        let mut config = SiteConfig::default();
        config.site.base_url = "https://acme.example".into();
        config
    }

    fn make_post(slug: &str, date: &str, tags: &[&str]) -> Post {
        Post {
            slug: slug.to_owned(),
            title: slug.to_owned(),
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            excerpt: String::new(),
            tags: tags.iter().map(|t| (*t).to_owned()).collect(),
            body: String::new(),
        }
    }

    fn make_page(concept: &str, industry: &str) -> ConceptIndustryPage {
        ConceptIndustryPage {
            concept: concept.to_owned(),
            industry: industry.to_owned(),
            headline: String::new(),
            intro: String::new(),
            applications: Vec::new(),
            tools: Vec::new(),
            metrics: Vec::new(),
            related_posts: Vec::new(),
        }
    }

    fn sample_catalog() -> Catalog {
        Catalog::new(ContentTables {
            posts: vec![
                make_post("hello", "2024-01-15", &["RAG"]),
                make_post("world", "2024-02-20", &["RAG", "Growth Loops"]),
            ],
            glossary: vec![GlossaryTerm {
                slug: "rag".into(),
                term: "RAG".into(),
                category: TermCategory::Technique,
                definition: String::new(),
                explanation: String::new(),
                related_terms: Vec::new(),
                related_posts: Vec::new(),
            }],
            concept_pages: vec![
                make_page("rag", "fintech"),
                make_page("rag", "healthcare"),
            ],
            industry_tool_recs: vec![IndustryToolRec {
                category: "crm".into(),
                industry: "fintech".into(),
                recommendations: Vec::new(),
            }],
            ..ContentTables::default()
        })
    }

    #[test]
    fn test_no_duplicate_urls() {
        let catalog = sample_catalog();
        let sitemap = Sitemap::from_catalog(&catalog, &test_config());

        let unique: HashSet<_> = sitemap.routes().iter().map(|r| r.url.as_str()).collect();
        assert_eq!(unique.len(), sitemap.routes().len());
    }

    #[test]
    fn test_one_descriptor_per_combinatorial_pair() {
        let catalog = sample_catalog();
        let sitemap = Sitemap::from_catalog(&catalog, &test_config());

        let combinatorial = sitemap
            .routes()
            .iter()
            .filter(|r| r.url.contains("/for/"))
            .count();
        assert_eq!(
            combinatorial,
            catalog.matrix().concept_pages().len() + catalog.matrix().tool_recs().len()
        );
    }

    #[test]
    fn test_posts_carry_their_date() {
        let catalog = sample_catalog();
        let sitemap = Sitemap::from_catalog(&catalog, &test_config());

        let post = sitemap
            .routes()
            .iter()
            .find(|r| r.url.ends_with("/blog/hello/"))
            .unwrap();
        assert_eq!(post.lastmod, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        assert_eq!(post.changefreq, ChangeFreq::Monthly);
    }

    #[test]
    fn test_tag_routes_use_slugs() {
        let catalog = sample_catalog();
        let sitemap = Sitemap::from_catalog(&catalog, &test_config());

        assert!(
            sitemap
                .routes()
                .iter()
                .any(|r| r.url.ends_with("/tags/growth-loops/"))
        );
    }

    #[test]
    fn test_urls_are_absolute() {
        let catalog = sample_catalog();
        let sitemap = Sitemap::from_catalog(&catalog, &test_config());

        assert!(!sitemap.routes().is_empty());
        assert!(
            sitemap
                .routes()
                .iter()
                .all(|r| r.url.starts_with("https://acme.example/"))
        );
    }

    #[test]
    fn test_deterministic_given_same_catalog() {
        let catalog = sample_catalog();
        let config = test_config();
        let a = Sitemap::from_catalog(&catalog, &config);
        let b = Sitemap::from_catalog(&catalog, &config);
        // `lastmod` of dateless sections is "now" in both runs of the same
        // process day; route lists must match route-for-route.
        assert_eq!(a.routes(), b.routes());
    }

    #[test]
    fn test_xml_structure() {
        let catalog = sample_catalog();
        let sitemap = Sitemap::from_catalog(&catalog, &test_config());
        let count = sitemap.routes().len();
        let xml = sitemap.into_xml();

        let lines: Vec<&str> = xml.lines().collect();
        assert_eq!(lines[0], r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        assert!(lines[1].starts_with("<urlset"));
        assert_eq!(lines.last().unwrap().trim(), "</urlset>");
        assert_eq!(xml.matches("<url>").count(), count);
        assert_eq!(xml.matches("<changefreq>").count(), count);
        assert_eq!(xml.matches("<priority>").count(), count);
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("hello"), "hello");
        assert_eq!(escape_xml("<test>"), "&lt;test&gt;");
        assert_eq!(escape_xml("a & b"), "a &amp; b");
        assert_eq!(escape_xml(r#"say "hi""#), "say &quot;hi&quot;");
        assert_eq!(escape_xml("it's"), "it&apos;s");
    }

    #[test]
    fn test_empty_catalog_still_lists_static_pages() {
        let catalog = Catalog::new(ContentTables::default());
        let sitemap = Sitemap::from_catalog(&catalog, &test_config());

        assert!(
            sitemap
                .routes()
                .iter()
                .any(|r| r.url == "https://acme.example/")
        );
        assert!(sitemap.routes().iter().all(|r| !r.url.contains("/for/")));
    }
}
