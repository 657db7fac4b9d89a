//! Deterministic keyword classifier.
//!
//! `classify` maps raw text to a category, a confidence, a priority and the
//! winning category's matched phrases. It is total over all strings and
//! keeps no state.
//!
//! RULES:
//!   - Text is lower-cased and nothing else. Matching is substring containment.
//!   - Categories are scanned in `Category::ALL` order and only a strictly
//!     greater score replaces the current best, so the earliest category
//!     wins ties.
//!   - A zero best score falls back to `General Query` with no keywords.
//!   - Confidence tracks the best score only, including the fallback case.
//!   - Priority is scanned Critical, High, Low; first hit wins; else Medium.

use crate::{
    keywords::{category_keywords, matches_in, priority_keywords, PRIORITY_SCAN_ORDER},
    types::{Category, Priority},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const CONFIDENCE_FLOOR: f64 = 0.5;
pub const CONFIDENCE_CEILING: f64 = 0.95;

/// Result of classifying one piece of text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub category: Category,
    pub confidence: f64,
    pub priority: Priority,
    pub matched_keywords: Vec<String>,
}

/// Per-category score, as reported by `analyze`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryAnalysis {
    pub category: Category,
    pub score: usize,
    pub matched_keywords: Vec<String>,
}

/// Full scoring breakdown for ad-hoc inspection of a text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub classification: Classification,
    /// One entry per category, in `Category::ALL` order.
    pub categories: Vec<CategoryAnalysis>,
    /// Phrases hit in every priority tier, including the unscanned Medium tier.
    pub priority_hits: BTreeMap<Priority, Vec<String>>,
}

impl Analysis {
    /// Categories by score, highest first. Equal scores keep enumeration order.
    pub fn ranked(&self) -> Vec<&CategoryAnalysis> {
        let mut rows: Vec<&CategoryAnalysis> = self.categories.iter().collect();
        rows.sort_by(|a, b| b.score.cmp(&a.score));
        rows
    }
}

/// Confidence for a winning score: 0.5 at zero, +0.045 per match, capped at 0.95.
pub fn confidence_for(score: usize) -> f64 {
    (CONFIDENCE_FLOOR + (score as f64 / 10.0) * 0.45).min(CONFIDENCE_CEILING)
}

/// Classify `text`. Never fails.
pub fn classify(text: &str) -> Classification {
    let normalized = text.to_lowercase();
    let scores = score_categories(&normalized);
    let classification = select(&scores, &normalized);
    log::debug!(
        "classified as {} (confidence={:.3}, priority={}, keywords={:?})",
        classification.category,
        classification.confidence,
        classification.priority,
        classification.matched_keywords,
    );
    classification
}

/// Classify `text` and report every category's score and every tier's hits.
pub fn analyze(text: &str) -> Analysis {
    let normalized = text.to_lowercase();
    let scores = score_categories(&normalized);
    let classification = select(&scores, &normalized);

    let categories = scores
        .iter()
        .map(|(category, found)| CategoryAnalysis {
            category: *category,
            score: found.len(),
            matched_keywords: owned_keywords(found),
        })
        .collect();

    let priority_hits = Priority::ALL
        .iter()
        .map(|p| (*p, owned_keywords(&matches_in(&normalized, priority_keywords(*p)))))
        .collect();

    Analysis {
        classification,
        categories,
        priority_hits,
    }
}

/// Priority for already lower-cased text.
pub fn priority_for(normalized: &str) -> Priority {
    PRIORITY_SCAN_ORDER
        .iter()
        .copied()
        .find(|tier| {
            priority_keywords(*tier)
                .iter()
                .any(|kw| normalized.contains(kw))
        })
        .unwrap_or_default()
}

fn score_categories(normalized: &str) -> Vec<(Category, Vec<&'static str>)> {
    Category::ALL
        .iter()
        .map(|c| (*c, matches_in(normalized, category_keywords(*c))))
        .collect()
}

fn select(scores: &[(Category, Vec<&'static str>)], normalized: &str) -> Classification {
    let mut best_score = 0usize;
    let mut best_category = Category::GeneralQuery;
    let mut best_keywords: &[&'static str] = &[];

    for (category, found) in scores {
        if found.len() > best_score {
            best_score = found.len();
            best_category = *category;
            best_keywords = found.as_slice();
        }
    }

    Classification {
        category: best_category,
        confidence: confidence_for(best_score),
        priority: priority_for(normalized),
        matched_keywords: owned_keywords(best_keywords),
    }
}

fn owned_keywords(found: &[&'static str]) -> Vec<String> {
    found.iter().map(|s| s.to_string()).collect()
}
