//! Static keyword tables for category scoring and priority assignment.
//!
//! Tables are exhaustive matches over the closed enums, so adding a
//! variant without a keyword list fails to build. Phrases are lower-case
//! and matched by plain substring containment.

use crate::types::{Category, Priority};

/// Keyword phrases scored for `category`, in scan order.
pub fn category_keywords(category: Category) -> &'static [&'static str] {
    match category {
        Category::PaymentIssue => &[
            "charged", "charge", "payment", "billing", "invoice", "transaction", "card",
            "debit", "credit", "money", "amount", "fee", "price",
        ],
        Category::DeliveryIssue => &[
            "delivery", "shipping", "arrived", "package", "tracking", "courier", "delayed",
            "late", "stuck", "transit", "shipped",
        ],
        Category::ProductDefect => &[
            "broken", "defect", "damaged", "not working", "faulty", "quality", "crack",
            "screen", "malfunction", "defective",
        ],
        Category::RefundRequest => &[
            "refund", "money back", "return", "cancelled", "cancel", "reimburse",
            "compensation",
        ],
        Category::AccountProblem => &[
            "account", "login", "password", "access", "locked", "reset", "profile",
            "username", "email", "sign in",
        ],
        Category::Fraud => &[
            "fraud", "unauthorized", "scam", "suspicious", "stolen", "hack", "security",
            "identity",
        ],
        Category::GeneralQuery => &[
            "question", "inquiry", "information", "help", "support", "how to", "where",
            "when",
        ],
    }
}

/// Keyword phrases that signal `priority`.
///
/// The `Medium` list is informational only: `Medium` is the fallback when
/// no other tier matches, so the priority scan never consults it.
pub fn priority_keywords(priority: Priority) -> &'static [&'static str] {
    match priority {
        Priority::Critical => &[
            "fraud", "unauthorized", "stolen", "security", "identity", "hack", "urgent",
            "immediately", "emergency",
        ],
        Priority::High => &[
            "refund", "money back", "broken", "defect", "not working", "damaged",
            "compensation",
        ],
        Priority::Medium => &["delayed", "late", "stuck", "waiting", "problem", "issue"],
        Priority::Low => &["question", "inquiry", "information", "help", "how to"],
    }
}

/// Tiers consulted by the priority scan, in strict precedence order.
pub const PRIORITY_SCAN_ORDER: [Priority; 3] = [Priority::Critical, Priority::High, Priority::Low];

/// Phrases from `keywords` contained in the already lower-cased `text`,
/// in list order, without duplicates.
pub(crate) fn matches_in(text: &str, keywords: &'static [&'static str]) -> Vec<&'static str> {
    let mut found: Vec<&'static str> = Vec::new();
    for &kw in keywords {
        if text.contains(kw) && !found.contains(&kw) {
            found.push(kw);
        }
    }
    found
}
