//! Evidence verification — does the original resume substantiate a claimed
//! keyword? Direct variant presence always counts; otherwise the keyword's
//! category predicates decide.
//!
//! The predicates are deliberately coarse (any number ≥1000 proves scale).
//! They trade precision for zero false negatives on the claims recruiters
//! actually probe.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::json;

use crate::compliance::keywords::{KeywordProfile, ProofKind, RiskLevel};
use crate::compliance::matcher;
use crate::compliance::models::ComplianceIssue;

// ────────────────────────────────────────────────────────────────────────────
// Predicate vocabularies
// ────────────────────────────────────────────────────────────────────────────

/// Excel context when the tool itself appears in the original.
const EXCEL_CONTEXT_HINTS: &[&str] = &[
    "report",
    "reporting",
    "dashboard",
    "model",
    "modeling",
    "analysis",
    "analyzing",
    "pivot",
    "vlookup",
    "lookup",
    "forecast",
    "tracking",
];

/// Accepted when the original never names Excel but shows equivalent work.
const EXCEL_GENERIC_HINTS: &[&str] =
    &["spreadsheet", "report", "dashboard", "model", "analysis", "tracking"];

const SCALE_WORDS: &[&str] = &[
    "million",
    "billion",
    "thousand",
    "tb",
    "gb",
    "records",
    "rows",
    "transactions",
];

const OWNERSHIP_VERBS: &[&str] = &[
    "owned",
    "accountable",
    "responsible for",
    "led",
    "managed",
    "end-to-end",
    "oversaw",
];

const INVENTORY_NOUNS: &[&str] = &[
    "inventory",
    "stock",
    "supply",
    "warehouse",
    "replenish",
    "demand planning",
    "procurement",
];

const CX_HINTS: &[&str] = &[
    "customer",
    "client",
    "support",
    "service",
    "satisfaction",
    "nps",
    "csat",
    "complaint",
    "tickets",
    "calls",
];

/// Thousands-separated or 4+ digit numbers, i.e. anything ≥1000.
static LARGE_NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\d{1,3}(?:,\d{3})+\b|\b\d{4,}\b").expect("valid number regex"));

// ────────────────────────────────────────────────────────────────────────────
// Predicates
// ────────────────────────────────────────────────────────────────────────────

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

/// Runs one category predicate against the original resume text.
pub fn predicate_holds(kind: ProofKind, original: &str) -> bool {
    let lower = original.to_lowercase();
    match kind {
        ProofKind::Excel => {
            if matcher::matches(original, "excel") {
                contains_any(&lower, EXCEL_CONTEXT_HINTS)
            } else {
                contains_any(&lower, EXCEL_GENERIC_HINTS)
            }
        }
        ProofKind::Scale => LARGE_NUMBER_RE.is_match(original) || contains_any(&lower, SCALE_WORDS),
        ProofKind::Ownership => {
            contains_any(&lower, OWNERSHIP_VERBS) && contains_any(&lower, INVENTORY_NOUNS)
        }
        ProofKind::CustomerExperience => contains_any(&lower, CX_HINTS),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Verification
// ────────────────────────────────────────────────────────────────────────────

/// Outcome of evidence verification for one keyword.
#[derive(Debug, Clone)]
pub struct EvidenceFinding {
    /// Keyword (any variant) appears verbatim in the original resume.
    pub direct: bool,
    /// Direct presence or a passing category predicate.
    pub proven: bool,
    pub issues: Vec<ComplianceIssue>,
    pub reason: Option<String>,
    /// Suggested replacement, populated for unproven high-risk keywords
    /// when risky-keyword removal is requested.
    pub alternative_used: Option<String>,
}

/// Verifies a used, proof-requiring keyword against the original resume.
///
/// Unused keywords and keywords without a proof requirement verify
/// trivially. An unproven claim emits a hard `experience_evidence` issue;
/// with `remove_risky_keywords` set, an unproven high-risk keyword
/// additionally emits a hard `remove_risky_keywords` issue carrying the
/// safer alternative phrase.
pub fn verify_evidence(
    original: &str,
    keyword: &str,
    profile: &KeywordProfile,
    used: bool,
    remove_risky_keywords: bool,
) -> EvidenceFinding {
    let direct = matcher::matches(original, keyword);

    if !used || !profile.requires_proof {
        return EvidenceFinding {
            direct,
            proven: true,
            issues: Vec::new(),
            reason: None,
            alternative_used: None,
        };
    }

    let predicate_pass = profile.proofs.iter().any(|&p| predicate_holds(p, original));
    let proven = direct || predicate_pass;

    if proven {
        return EvidenceFinding {
            direct,
            proven: true,
            issues: Vec::new(),
            reason: None,
            alternative_used: None,
        };
    }

    let reason = format!("No supporting evidence for \"{keyword}\" in the original resume");
    let mut issues = vec![ComplianceIssue::hard(
        "experience_evidence",
        format!("\"{keyword}\" is claimed but the original resume does not substantiate it"),
        json!({ "keyword": keyword }),
    )];

    let mut alternative_used = None;
    if remove_risky_keywords && profile.risk == RiskLevel::High {
        let alternative = profile.alternative.unwrap_or("a role-accurate phrase");
        alternative_used = profile.alternative.map(str::to_string);
        issues.push(ComplianceIssue::hard(
            "remove_risky_keywords",
            format!("Replace unproven high-risk keyword \"{keyword}\" with \"{alternative}\""),
            json!({ "keyword": keyword, "alternative": alternative }),
        ));
    }

    EvidenceFinding {
        direct,
        proven: false,
        issues,
        reason: Some(reason),
        alternative_used,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compliance::keywords::classify_keyword;

    #[test]
    fn test_excel_proof_via_pivot_and_dashboard() {
        let original = "Built dashboards and pivot tables in Excel for weekly reporting";
        assert!(predicate_holds(ProofKind::Excel, original));
    }

    #[test]
    fn test_excel_proof_generic_evidence_without_excel() {
        let original = "Maintained spreadsheet trackers for the finance team";
        assert!(predicate_holds(ProofKind::Excel, original));
    }

    #[test]
    fn test_excel_named_without_context_fails() {
        // Excel appears but with none of the usage vocabulary.
        assert!(!predicate_holds(ProofKind::Excel, "Familiar with Excel"));
    }

    #[test]
    fn test_scale_proof_comma_separated_number() {
        assert!(predicate_holds(ProofKind::Scale, "Processed 12,000 orders per month"));
    }

    #[test]
    fn test_scale_proof_four_digit_number() {
        assert!(predicate_holds(ProofKind::Scale, "Reconciled 4500 invoices"));
    }

    #[test]
    fn test_scale_proof_scale_word() {
        assert!(predicate_holds(ProofKind::Scale, "Queried million-row tables"));
    }

    #[test]
    fn test_scale_proof_small_numbers_fail() {
        assert!(!predicate_holds(ProofKind::Scale, "Managed 12 accounts across 3 regions"));
    }

    #[test]
    fn test_ownership_needs_verb_and_noun() {
        assert!(predicate_holds(
            ProofKind::Ownership,
            "Managed warehouse stock levels and replenishment"
        ));
        assert!(!predicate_holds(ProofKind::Ownership, "Managed a team of analysts"));
        assert!(!predicate_holds(ProofKind::Ownership, "Observed inventory levels"));
    }

    #[test]
    fn test_cx_proof_any_hint() {
        assert!(predicate_holds(ProofKind::CustomerExperience, "Resolved client complaints"));
        assert!(!predicate_holds(ProofKind::CustomerExperience, "Wrote internal tooling"));
    }

    #[test]
    fn test_verify_proven_excel_no_issue() {
        let profile = classify_keyword("Excel");
        let finding = verify_evidence(
            "Built dashboards and pivot tables in Excel for weekly reporting",
            "Excel",
            &profile,
            true,
            false,
        );
        assert!(finding.proven);
        assert!(finding.direct);
        assert!(finding.issues.is_empty());
    }

    #[test]
    fn test_verify_unproven_excel_fires_hard_issue() {
        let profile = classify_keyword("Excel");
        let finding = verify_evidence("Answered phones", "Excel", &profile, true, false);
        assert!(!finding.proven);
        assert_eq!(finding.issues.len(), 1);
        assert_eq!(finding.issues[0].validator, "experience_evidence");
        assert!(finding.reason.is_some());
    }

    #[test]
    fn test_remove_risky_flag_adds_second_issue_with_alternative() {
        let profile = classify_keyword("Excel");
        let finding = verify_evidence("Answered phones", "Excel", &profile, true, true);
        assert_eq!(finding.issues.len(), 2);
        assert_eq!(finding.issues[1].validator, "remove_risky_keywords");
        assert_eq!(finding.alternative_used.as_deref(), profile.alternative);
    }

    #[test]
    fn test_unused_keyword_verifies_trivially() {
        let profile = classify_keyword("Excel");
        let finding = verify_evidence("Answered phones", "Excel", &profile, false, true);
        assert!(finding.proven);
        assert!(finding.issues.is_empty());
    }

    #[test]
    fn test_generic_keyword_direct_presence_proves() {
        let profile = classify_keyword("forecasting");
        let finding = verify_evidence(
            "Responsible for demand forecasting",
            "forecasting",
            &profile,
            true,
            false,
        );
        assert!(finding.proven);
    }

    #[test]
    fn test_generic_keyword_without_presence_is_unproven() {
        // No category predicate applies, so absence from the original fails.
        let profile = classify_keyword("forecasting");
        let finding = verify_evidence("Answered phones", "forecasting", &profile, true, false);
        assert!(!finding.proven);
        assert_eq!(finding.issues.len(), 1);
    }

    #[test]
    fn test_empty_original_text_unproven() {
        let profile = classify_keyword("Excel");
        let finding = verify_evidence("", "Excel", &profile, true, false);
        assert!(!finding.proven);
    }
}
