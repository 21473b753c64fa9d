//! Keyword classification — static lookup tables plus substring heuristics.
//!
//! Tables are read-only constants shared across all calls. A keyword's
//! profile decides how often it may appear, whether the original resume must
//! substantiate it, and which proof predicates apply.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeywordCategory {
    Tool,
    Functional,
    Outcome,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// Category-specific evidence checks run by the evidence verifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProofKind {
    /// Excel usage backed by reporting/modeling vocabulary.
    Excel,
    /// Scale claims backed by a number ≥1000 or a scale word.
    Scale,
    /// Inventory ownership backed by an ownership verb plus a domain noun.
    Ownership,
    /// Customer-experience claims backed by support/service vocabulary.
    CustomerExperience,
}

/// Classification result for one target keyword.
#[derive(Debug, Clone, Copy)]
pub struct KeywordProfile {
    pub category: KeywordCategory,
    pub risk: RiskLevel,
    pub allowed_frequency: u32,
    pub requires_proof: bool,
    /// Safer phrasing suggested when a high-risk term cannot be proven.
    pub alternative: Option<&'static str>,
    pub proofs: &'static [ProofKind],
}

// ────────────────────────────────────────────────────────────────────────────
// Static tables
// ────────────────────────────────────────────────────────────────────────────

struct HighRiskEntry {
    term: &'static str,
    proofs: &'static [ProofKind],
    alternative: &'static str,
}

/// Terms recruiters reliably probe in interviews. Each carries the proof
/// predicates that must hold and a safer fallback phrase.
const HIGH_RISK: &[HighRiskEntry] = &[
    HighRiskEntry {
        term: "excel",
        proofs: &[ProofKind::Excel],
        alternative: "spreadsheet-based reporting",
    },
    HighRiskEntry {
        term: "large data sets",
        proofs: &[ProofKind::Scale],
        alternative: "structured data analysis",
    },
    HighRiskEntry {
        term: "inventory management",
        proofs: &[ProofKind::Ownership],
        alternative: "inventory tracking and replenishment support",
    },
    HighRiskEntry {
        term: "customer experience",
        proofs: &[ProofKind::CustomerExperience],
        alternative: "customer support and service",
    },
];

/// Named tools and platforms. Tools tolerate one extra repetition because a
/// skills section and an experience bullet both legitimately name them.
const TOOL_KEYWORDS: &[&str] = &[
    "excel",
    "ms excel",
    "microsoft excel",
    "google sheets",
    "sql",
    "python",
    "r",
    "power bi",
    "powerbi",
    "tableau",
    "looker",
    "aws",
    "amazon web services",
    "azure",
    "gcp",
    "google cloud",
    "react",
    "docker",
    "kubernetes",
    "git",
    "jira",
    "salesforce",
    "sap",
    "snowflake",
];

const OUTCOME_HINTS: &[&str] = &[
    "improvement",
    "optimization",
    "growth",
    "reduction",
    "increase",
    "efficiency",
    "impact",
    "revenue",
    "cost",
    "conversion",
];

const FUNCTIONAL_HINTS: &[&str] = &["management", "strategy", "leadership", "stakeholder"];

// ────────────────────────────────────────────────────────────────────────────
// Classification
// ────────────────────────────────────────────────────────────────────────────

fn is_tool(normalized: &str) -> bool {
    TOOL_KEYWORDS.contains(&normalized)
}

fn hint_category(normalized: &str) -> KeywordCategory {
    if is_tool(normalized) {
        KeywordCategory::Tool
    } else if OUTCOME_HINTS.iter().any(|h| normalized.contains(h)) {
        KeywordCategory::Outcome
    } else {
        KeywordCategory::Functional
    }
}

/// Classifies a target keyword.
///
/// Lookup order: high-risk table, tool list, outcome hints, functional
/// hints, then the conservative default (functional, low risk, proof still
/// required). Empty keywords classify as `unknown` and require nothing.
pub fn classify_keyword(keyword: &str) -> KeywordProfile {
    let normalized = keyword.trim().to_lowercase();

    if normalized.is_empty() {
        return KeywordProfile {
            category: KeywordCategory::Unknown,
            risk: RiskLevel::Low,
            allowed_frequency: 1,
            requires_proof: false,
            alternative: None,
            proofs: &[],
        };
    }

    if let Some(entry) = HIGH_RISK.iter().find(|e| e.term == normalized) {
        return KeywordProfile {
            category: hint_category(&normalized),
            risk: RiskLevel::High,
            // Tools may appear in a skills list and a bullet; claims may not.
            allowed_frequency: if is_tool(&normalized) { 2 } else { 1 },
            requires_proof: true,
            alternative: Some(entry.alternative),
            proofs: entry.proofs,
        };
    }

    if is_tool(&normalized) {
        return KeywordProfile {
            category: KeywordCategory::Tool,
            risk: RiskLevel::Low,
            allowed_frequency: 2,
            requires_proof: true,
            alternative: None,
            proofs: &[],
        };
    }

    if OUTCOME_HINTS.iter().any(|h| normalized.contains(h)) {
        return KeywordProfile {
            category: KeywordCategory::Outcome,
            risk: RiskLevel::Medium,
            allowed_frequency: 1,
            requires_proof: true,
            alternative: None,
            proofs: &[],
        };
    }

    if FUNCTIONAL_HINTS.iter().any(|h| normalized.contains(h)) {
        return KeywordProfile {
            category: KeywordCategory::Functional,
            risk: RiskLevel::Medium,
            allowed_frequency: 1,
            requires_proof: true,
            alternative: None,
            proofs: &[],
        };
    }

    KeywordProfile {
        category: KeywordCategory::Functional,
        risk: RiskLevel::Low,
        allowed_frequency: 1,
        requires_proof: true,
        alternative: None,
        proofs: &[],
    }
}

/// True if a bullet's opening word names a tool (single-word tools only).
pub fn is_tool_word(word: &str) -> bool {
    let normalized = word.trim().to_lowercase();
    !normalized.contains(' ') && TOOL_KEYWORDS.contains(&normalized.as_str())
}
