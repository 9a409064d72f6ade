//! Soft-reference audit.
//!
//! Soft references are dropped silently at lookup time; that tolerance is an
//! invariant of the catalog, not a reason to leave drift invisible. `lattice
//! check` walks every reference field and reports each slug that does not
//! resolve. Drift is expected during authoring, so the command always exits
//! zero — the report is informational.

use crate::catalog::Catalog;
use crate::config::SiteConfig;
use std::fmt::Write;

// ============================================================================
// Issues
// ============================================================================

/// One unresolved (or malformed) reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    /// Where the reference lives, e.g. `industries/fintech`
    pub location: String,
    /// What is wrong, e.g. `related post `ghost` not found`
    pub message: String,
}

impl Issue {
    fn new(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            message: message.into(),
        }
    }
}

// ============================================================================
// Audit
// ============================================================================

/// Walk every soft-reference field and collect unresolved slugs, in table
/// order.
pub fn audit(catalog: &Catalog) -> Vec<Issue> {
    let mut issues = Vec::new();

    let mut check_posts = |location: &str, slugs: &[String]| {
        for slug in slugs {
            if catalog.posts().by_slug(slug).is_none() {
                issues.push(Issue::new(
                    location,
                    format!("related post `{slug}` not found"),
                ));
            }
        }
    };

    for industry in catalog.industries().all() {
        check_posts(&format!("industries/{}", industry.slug), &industry.related_posts);
    }
    for term in catalog.glossary().all() {
        check_posts(&format!("glossary/{}", term.slug), &term.related_posts);
    }
    for cmp in catalog.comparisons().all() {
        check_posts(&format!("comparisons/{}", cmp.slug), &cmp.related_posts);
    }
    for cmp in catalog.tool_comparisons().all() {
        check_posts(&format!("tool-comparisons/{}", cmp.slug), &cmp.related_posts);
    }
    for guide in catalog.guides().all() {
        check_posts(&format!("guides/{}", guide.slug), &guide.related_posts);
    }
    for use_case in catalog.use_cases().all() {
        check_posts(&format!("use-cases/{}", use_case.slug), &use_case.related_posts);
    }
    for page in catalog.matrix().concept_pages() {
        check_posts(
            &format!("learn/{}/for/{}", page.concept, page.industry),
            &page.related_posts,
        );
    }

    for term in catalog.glossary().all() {
        let location = format!("glossary/{}", term.slug);
        for slug in &term.related_terms {
            if catalog.glossary().by_slug(slug).is_none() {
                issues.push(Issue::new(
                    location.as_str(),
                    format!("related term `{slug}` not found"),
                ));
            }
        }
    }

    for use_case in catalog.use_cases().all() {
        if let Some(slug) = &use_case.industry {
            if catalog.industries().by_slug(slug).is_none() {
                issues.push(Issue::new(
                    format!("use-cases/{}", use_case.slug),
                    format!("industry `{slug}` not found"),
                ));
            }
        }
    }

    for digest in catalog.digests().all() {
        let location = format!("digests/{}", digest.slug);
        for (idx, item) in digest.items.iter().enumerate() {
            match (&item.post_slug, &item.url) {
                (Some(slug), None) => {
                    if catalog.posts().by_slug(slug).is_none() {
                        issues.push(Issue::new(
                            location.as_str(),
                            format!("item {idx}: post `{slug}` not found"),
                        ));
                    }
                }
                (Some(_), Some(_)) => issues.push(Issue::new(
                    location.as_str(),
                    format!("item {idx}: carries both post_slug and url"),
                )),
                (None, None) => issues.push(Issue::new(
                    location.as_str(),
                    format!("item {idx}: carries neither post_slug nor url"),
                )),
                (None, Some(_)) => {}
            }
        }
    }

    for page in catalog.matrix().concept_pages() {
        let location = format!("learn/{}/for/{}", page.concept, page.industry);
        if catalog.glossary().by_slug(&page.concept).is_none() {
            issues.push(Issue::new(
                location.as_str(),
                format!("concept `{}` not in glossary", page.concept),
            ));
        }
        if catalog.industries().by_slug(&page.industry).is_none() {
            issues.push(Issue::new(
                location.as_str(),
                format!("industry `{}` not found", page.industry),
            ));
        }
    }

    for rec in catalog.matrix().tool_recs() {
        let location = format!("tools/{}/for/{}", rec.category, rec.industry);
        if catalog.tool_categories().by_slug(&rec.category).is_none() {
            issues.push(Issue::new(
                location.as_str(),
                format!("category `{}` not found", rec.category),
            ));
        }
        if catalog.industries().by_slug(&rec.industry).is_none() {
            issues.push(Issue::new(
                location.as_str(),
                format!("industry `{}` not found", rec.industry),
            ));
        }
        for r in &rec.recommendations {
            if catalog.tool(&rec.category, &r.tool_slug).is_none() {
                issues.push(Issue::new(
                    location.as_str(),
                    format!("tool `{}` not in category `{}`", r.tool_slug, rec.category),
                ));
            }
        }
    }

    issues
}

// ============================================================================
// Report
// ============================================================================

/// Render the audit as a flat report.
pub fn render_report(catalog: &Catalog, config: &SiteConfig) -> String {
    let issues = audit(catalog);

    let mut out = String::new();
    let header = format!("Reference audit — {}", config.site.title);
    writeln!(out, "{header}").ok();
    writeln!(out, "{}", "=".repeat(header.chars().count())).ok();
    writeln!(out).ok();

    if issues.is_empty() {
        writeln!(out, "All references resolve.").ok();
        return out;
    }

    for issue in &issues {
        writeln!(out, "{}: {}", issue.location, issue.message).ok();
    }
    writeln!(out).ok();
    writeln!(out, "{} unresolved references", issues.len()).ok();
    out
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

    fn make_post(slug: &str) -> Post {
        Post {
            slug: slug.to_owned(),
            title: slug.to_owned(),
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            excerpt: String::new(),
            tags: Vec::new(),
            body: String::new(),
        }
    }

    #[test]
    fn test_clean_catalog_has_no_issues() {
        let catalog = Catalog::new(ContentTables {
            posts: vec![make_post("hello")],
            industries: vec![Industry {
                slug: "fintech".into(),
                name: "Fintech".into(),
                headline: String::new(),
                metrics: Vec::new(),
                pain_points: Vec::new(),
                ai_use_cases: Vec::new(),
                key_technologies: Vec::new(),
                related_posts: vec!["hello".into()],
            }],
            ..ContentTables::default()
        });
        assert!(audit(&catalog).is_empty());
    }

    #[test]
    fn test_dangling_related_post_reported() {
        let catalog = Catalog::new(ContentTables {
            industries: vec![Industry {
                slug: "fintech".into(),
                name: "Fintech".into(),
                headline: String::new(),
                metrics: Vec::new(),
                pain_points: Vec::new(),
                ai_use_cases: Vec::new(),
                key_technologies: Vec::new(),
                related_posts: vec!["ghost".into()],
            }],
            ..ContentTables::default()
        });

        let issues = audit(&catalog);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].location, "industries/fintech");
        assert!(issues[0].message.contains("ghost"));
    }

    #[test]
    fn test_digest_item_xor_violations_reported() {
        let catalog = Catalog::new(ContentTables {
            digests: vec![Digest {
                slug: "week-1".into(),
                number: 1,
                date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
                title: "Week 1".into(),
                items: vec![
                    DigestItem {
                        title: "both".into(),
                        description: String::new(),
                        post_slug: Some("hello".into()),
                        url: Some("https://x.example".into()),
                    },
                    DigestItem {
                        title: "neither".into(),
                        description: String::new(),
                        post_slug: None,
                        url: None,
                    },
                    DigestItem {
                        title: "external only".into(),
                        description: String::new(),
                        post_slug: None,
                        url: Some("https://x.example".into()),
                    },
                ],
            }],
            ..ContentTables::default()
        });

        let issues = audit(&catalog);
        assert_eq!(issues.len(), 2);
        assert!(issues[0].message.contains("both"));
        assert!(issues[1].message.contains("neither"));
    }

    #[test]
    fn test_tool_rec_outside_category_reported() {
        let catalog = Catalog::new(ContentTables {
            tool_categories: vec![ToolCategory {
                slug: "crm".into(),
                title: "CRM".into(),
                description: String::new(),
                tools: Vec::new(),
            }],
            industries: vec![Industry {
                slug: "fintech".into(),
                name: "Fintech".into(),
                headline: String::new(),
                metrics: Vec::new(),
                pain_points: Vec::new(),
                ai_use_cases: Vec::new(),
                key_technologies: Vec::new(),
                related_posts: Vec::new(),
            }],
            industry_tool_recs: vec![IndustryToolRec {
                category: "crm".into(),
                industry: "fintech".into(),
                recommendations: vec![Recommendation {
                    tool_slug: "hubspot".into(),
                    rating: Rating::TopPick,
                    reason: String::new(),
                }],
            }],
            ..ContentTables::default()
        });

        let issues = audit(&catalog);
        assert_eq!(issues.len(), 1);
        assert!(issues[0].message.contains("hubspot"));
    }

    #[test]
    fn test_report_counts_issues() {
        let catalog = Catalog::new(ContentTables {
            glossary: vec![GlossaryTerm {
                slug: "rag".into(),
                term: "RAG".into(),
                category: TermCategory::Technique,
                definition: String::new(),
                explanation: String::new(),
                related_terms: vec!["ghost-term".into()],
                related_posts: vec!["ghost-post".into()],
            }],
            ..ContentTables::default()
        });

        let report = render_report(&catalog, &SiteConfig::default());
        assert!(report.contains("2 unresolved references"));
        assert!(report.contains("ghost-term"));
        assert!(report.contains("ghost-post"));
    }
}
