//! The combinatorial page matrix.
//!
//! Concept×industry and category×industry pages are *sparse* relations: the
//! tables hold a curated allow-list of authored pairs, never the mathematical
//! cross product. A pair absent from the allow-list legitimately 404s even
//! when both slugs exist on their own axes — absence is content, not a bug,
//! and nothing here infers or placeholder-fills missing pairs.
//!
//! Both directional queries are served from indexes built once at
//! construction; the allow-lists are static for the process lifetime.

use crate::content::types::{ConceptIndustryPage, IndustryToolRec};
use std::collections::HashMap;

// ============================================================================
// Matrix
// ============================================================================

/// Indexed allow-lists for both combinatorial relations.
#[derive(Debug, Default)]
pub struct Matrix {
    concept_pages: Vec<ConceptIndustryPage>,
    pages_by_concept: HashMap<String, Vec<usize>>,
    pages_by_industry: HashMap<String, Vec<usize>>,

    tool_recs: Vec<IndustryToolRec>,
    recs_by_category: HashMap<String, Vec<usize>>,
    recs_by_industry: HashMap<String, Vec<usize>>,
}

impl Matrix {
    /// Index both allow-lists by each key of their compound identity.
    pub fn new(concept_pages: Vec<ConceptIndustryPage>, tool_recs: Vec<IndustryToolRec>) -> Self {
        let mut pages_by_concept: HashMap<String, Vec<usize>> = HashMap::new();
        let mut pages_by_industry: HashMap<String, Vec<usize>> = HashMap::new();
        for (idx, page) in concept_pages.iter().enumerate() {
            pages_by_concept
                .entry(page.concept.clone())
                .or_default()
                .push(idx);
            pages_by_industry
                .entry(page.industry.clone())
                .or_default()
                .push(idx);
        }

        let mut recs_by_category: HashMap<String, Vec<usize>> = HashMap::new();
        let mut recs_by_industry: HashMap<String, Vec<usize>> = HashMap::new();
        for (idx, rec) in tool_recs.iter().enumerate() {
            recs_by_category
                .entry(rec.category.clone())
                .or_default()
                .push(idx);
            recs_by_industry
                .entry(rec.industry.clone())
                .or_default()
                .push(idx);
        }

        Self {
            concept_pages,
            pages_by_concept,
            pages_by_industry,
            tool_recs,
            recs_by_category,
            recs_by_industry,
        }
    }

    // ------------------------------------------------------------------------
    // Concept × Industry
    // ------------------------------------------------------------------------

    /// Every authored concept×industry page, in allow-list order.
    pub fn concept_pages(&self) -> &[ConceptIndustryPage] {
        &self.concept_pages
    }

    /// Direct lookup by compound key. Defined iff the pair is on the
    /// allow-list.
    pub fn concept_page(&self, concept: &str, industry: &str) -> Option<&ConceptIndustryPage> {
        self.pages_by_concept.get(concept)?.iter().find_map(|&idx| {
            let page = &self.concept_pages[idx];
            (page.industry == industry).then_some(page)
        })
    }

    /// All pages sharing a concept ("same concept, other industries").
    pub fn industries_for_concept(&self, concept: &str) -> Vec<&ConceptIndustryPage> {
        self.select(&self.pages_by_concept, concept, &self.concept_pages)
    }

    /// The symmetric query: all pages sharing an industry.
    pub fn concepts_for_industry(&self, industry: &str) -> Vec<&ConceptIndustryPage> {
        self.select(&self.pages_by_industry, industry, &self.concept_pages)
    }

    // ------------------------------------------------------------------------
    // Category × Industry
    // ------------------------------------------------------------------------

    /// Every authored category×industry recommendation set.
    pub fn tool_recs(&self) -> &[IndustryToolRec] {
        &self.tool_recs
    }

    /// Direct lookup by compound key.
    pub fn tool_rec(&self, category: &str, industry: &str) -> Option<&IndustryToolRec> {
        self.recs_by_category.get(category)?.iter().find_map(|&idx| {
            let rec = &self.tool_recs[idx];
            (rec.industry == industry).then_some(rec)
        })
    }

    /// All recommendation sets for a tool category.
    pub fn recs_for_category(&self, category: &str) -> Vec<&IndustryToolRec> {
        self.select(&self.recs_by_category, category, &self.tool_recs)
    }

    /// All recommendation sets for an industry.
    pub fn recs_for_industry(&self, industry: &str) -> Vec<&IndustryToolRec> {
        self.select(&self.recs_by_industry, industry, &self.tool_recs)
    }

    fn select<'a, T>(
        &self,
        index: &HashMap<String, Vec<usize>>,
        key: &str,
        items: &'a [T],
    ) -> Vec<&'a T> {
        index
            .get(key)
            .map(|indices| indices.iter().map(|&idx| &items[idx]).collect())
            .unwrap_or_default()
    }
}

// ============================================================================
// Grouping
// ============================================================================

/// Group concept pages by industry slug, ordered by first occurrence.
///
/// This reproduces a left-fold grouping, not an alphabetical one: the first
/// industry seen in the allow-list heads the index.
pub fn group_by_industry(
    pages: &[ConceptIndustryPage],
) -> Vec<(&str, Vec<&ConceptIndustryPage>)> {
    let mut groups: Vec<(&str, Vec<&ConceptIndustryPage>)> = Vec::new();
    for page in pages {
        match groups.iter_mut().find(|(slug, _)| *slug == page.industry) {
            Some((_, group)) => group.push(page),
            None => groups.push((page.industry.as_str(), vec![page])),
        }
    }
    groups
}

// ============================================================================
// Tests
// ============================================================================
