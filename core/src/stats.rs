//! Statistics derived from a complaint collection.
//!
//! RULE: nothing here is cached. Every figure is recomputed from the slice
//! it is handed, so a snapshot can never disagree with the collection.

use crate::{
    complaint::Complaint,
    types::{Category, Priority, Status},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplaintStats {
    pub total_complaints: usize,
    pub category_breakdown: BTreeMap<Category, usize>,
    /// Share of the total per category, 0..=100. All zero when empty.
    pub category_percentages: BTreeMap<Category, f64>,
    /// Highest count; ties go to the earlier category. `None` when empty.
    pub most_common_category: Option<Category>,
    pub status_breakdown: BTreeMap<Status, usize>,
    pub priority_breakdown: BTreeMap<Priority, usize>,
    pub average_confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: Category,
    pub count: usize,
    /// Rounded to two decimal places.
    pub percentage: f64,
}

/// Category breakdown ranked by count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailedStats {
    pub total_complaints: usize,
    /// Count descending; equal counts keep enumeration order.
    pub breakdown: Vec<CategoryCount>,
    pub most_common: Option<Category>,
    pub least_common: Option<Category>,
}

pub fn compute_stats(complaints: &[Complaint]) -> ComplaintStats {
    let total = complaints.len();

    let category_breakdown = count_by(&Category::ALL, complaints, Complaint::category);
    let status_breakdown = count_by(&Status::ALL, complaints, Complaint::status);
    let priority_breakdown = count_by(&Priority::ALL, complaints, Complaint::priority);

    let category_percentages = category_breakdown
        .iter()
        .map(|(cat, count)| (*cat, percentage(*count, total)))
        .collect();

    let most_common_category = if total == 0 {
        None
    } else {
        let mut best = Category::ALL[0];
        for cat in Category::ALL {
            if category_breakdown[&cat] > category_breakdown[&best] {
                best = cat;
            }
        }
        Some(best)
    };

    let average_confidence = if total == 0 {
        0.0
    } else {
        complaints.iter().map(Complaint::confidence).sum::<f64>() / total as f64
    };

    ComplaintStats {
        total_complaints: total,
        category_breakdown,
        category_percentages,
        most_common_category,
        status_breakdown,
        priority_breakdown,
        average_confidence,
    }
}

pub fn compute_detailed_stats(complaints: &[Complaint]) -> DetailedStats {
    let total = complaints.len();
    let counts = count_by(&Category::ALL, complaints, Complaint::category);

    let mut breakdown: Vec<CategoryCount> = counts
        .into_iter()
        .map(|(category, count)| CategoryCount {
            category,
            count,
            percentage: round2(percentage(count, total)),
        })
        .collect();
    // Stable sort: ties stay in enumeration order.
    breakdown.sort_by(|a, b| b.count.cmp(&a.count));

    let (most_common, least_common) = if total == 0 {
        (None, None)
    } else {
        (
            breakdown.first().map(|r| r.category),
            breakdown.last().map(|r| r.category),
        )
    };

    DetailedStats {
        total_complaints: total,
        breakdown,
        most_common,
        least_common,
    }
}

fn count_by<K: Ord + Copy>(
    keys: &[K],
    complaints: &[Complaint],
    key_of: fn(&Complaint) -> K,
) -> BTreeMap<K, usize> {
    let mut counts: BTreeMap<K, usize> = keys.iter().map(|k| (*k, 0)).collect();
    for c in complaints {
        *counts.entry(key_of(c)).or_insert(0) += 1;
    }
    counts
}

fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
