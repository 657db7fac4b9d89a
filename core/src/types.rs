//! Shared primitive types used across the complaint desk.
//!
//! The three enumerations are closed. Their declaration order is significant:
//! `Category` order is the classifier's tie-break order, `Priority` order is
//! severity (so `Critical` is the maximum), and every `BTreeMap` keyed by
//! these enums iterates in declaration order.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A stable, unique identifier for a complaint. Treat as opaque.
pub type ComplaintId = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Payment Issue")]
    PaymentIssue,
    #[serde(rename = "Delivery Issue")]
    DeliveryIssue,
    #[serde(rename = "Product Defect")]
    ProductDefect,
    #[serde(rename = "Refund Request")]
    RefundRequest,
    #[serde(rename = "Account Problem")]
    AccountProblem,
    #[serde(rename = "Fraud")]
    Fraud,
    #[serde(rename = "General Query")]
    GeneralQuery,
}

impl Category {
    /// Every category in tie-break order.
    pub const ALL: [Category; 7] = [
        Category::PaymentIssue,
        Category::DeliveryIssue,
        Category::ProductDefect,
        Category::RefundRequest,
        Category::AccountProblem,
        Category::Fraud,
        Category::GeneralQuery,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::PaymentIssue => "Payment Issue",
            Self::DeliveryIssue => "Delivery Issue",
            Self::ProductDefect => "Product Defect",
            Self::RefundRequest => "Refund Request",
            Self::AccountProblem => "Account Problem",
            Self::Fraud => "Fraud",
            Self::GeneralQuery => "General Query",
        }
    }
}

/// Severity, least severe first, so the derived `Ord` compares by severity.
/// Default is `Medium`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl Priority {
    pub const ALL: [Priority; 4] = [
        Priority::Low,
        Priority::Medium,
        Priority::High,
        Priority::Critical,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Critical => "Critical",
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

/// Workflow status. The only mutable field of a stored complaint.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Status {
    #[default]
    Pending,
    #[serde(rename = "In Progress")]
    InProgress,
    Resolved,
    Closed,
}

impl Status {
    pub const ALL: [Status; 4] = [
        Status::Pending,
        Status::InProgress,
        Status::Resolved,
        Status::Closed,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "In Progress",
            Self::Resolved => "Resolved",
            Self::Closed => "Closed",
        }
    }
}

// ── Label parsing ────────────────────────────────────────────────────────────

/// A label that names none of the variants of `kind`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown {kind} label: '{label}'")]
pub struct ParseLabelError {
    pub kind: &'static str,
    pub label: String,
}

fn parse_label<T: Copy>(
    kind: &'static str,
    all: &[T],
    label_of: fn(&T) -> &'static str,
    s: &str,
) -> Result<T, ParseLabelError> {
    let wanted = s.trim();
    all.iter()
        .copied()
        .find(|v| label_of(v).eq_ignore_ascii_case(wanted))
        .ok_or_else(|| ParseLabelError {
            kind,
            label: s.to_string(),
        })
}

macro_rules! label_impls {
    ($ty:ty, $kind:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $ty {
            type Err = ParseLabelError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                parse_label($kind, &<$ty>::ALL, <$ty>::label, s)
            }
        }
    };
}

label_impls!(Category, "category");
label_impls!(Priority, "priority");
label_impls!(Status, "status");
