#![allow(dead_code)]

//! Data model for the compliance engine — issues, the per-keyword
//! justification ledger, and the dual scoring report.
//!
//! Everything here is a plain serializable value. The engine constructs a
//! fresh report per invocation; nothing carries identity across calls.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::compliance::keywords::{KeywordCategory, RiskLevel};

// ────────────────────────────────────────────────────────────────────────────
// Engine input
// ────────────────────────────────────────────────────────────────────────────

/// Default shingle-overlap similarity at which JD mirroring becomes a hard issue.
pub const DEFAULT_MIRRORING_THRESHOLD: f64 = 0.75;

/// The four inputs plus two tuning flags the engine is a pure function of.
#[derive(Debug, Clone, Deserialize)]
pub struct ComplianceInput {
    /// AI-rewritten resume, markdown.
    pub markdown: String,
    /// Target job description, plain text.
    pub job_description: String,
    /// Source-of-truth resume text (extracted from the candidate's PDF upstream).
    pub original_resume_text: String,
    pub target_keywords: Vec<String>,
    #[serde(default)]
    pub remove_risky_keywords: bool,
    #[serde(default = "default_mirroring_threshold")]
    pub jd_mirroring_threshold: f64,
}

fn default_mirroring_threshold() -> f64 {
    DEFAULT_MIRRORING_THRESHOLD
}

// ────────────────────────────────────────────────────────────────────────────
// Issues
// ────────────────────────────────────────────────────────────────────────────

/// `Hard` issues must block use of the document; `Soft` issues are advisory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueSeverity {
    Hard,
    Soft,
}

/// A single detected quality problem. Problems are values, never errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplianceIssue {
    pub severity: IssueSeverity,
    /// Name of the rule that fired, e.g. `keyword_frequency`.
    pub validator: String,
    pub message: String,
    pub details: Value,
}

impl ComplianceIssue {
    pub fn hard(validator: &str, message: String, details: Value) -> Self {
        Self {
            severity: IssueSeverity::Hard,
            validator: validator.to_string(),
            message,
            details,
        }
    }

    pub fn soft(validator: &str, message: String, details: Value) -> Self {
        Self {
            severity: IssueSeverity::Soft,
            validator: validator.to_string(),
            message,
            details,
        }
    }

    pub fn is_hard(&self) -> bool {
        self.severity == IssueSeverity::Hard
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Keyword justification ledger
// ────────────────────────────────────────────────────────────────────────────

/// One record per deduplicated target keyword: how it was classified, how
/// often it appears, and what evidence backs it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordJustification {
    pub keyword: String,
    pub used: bool,
    pub category: KeywordCategory,
    pub risk_level: RiskLevel,
    pub allowed_frequency: u32,
    pub requires_proof: bool,
    /// Boundary-safe occurrence count in the rewritten resume.
    pub frequency: u32,
    /// Snippet from the original resume that supports the claim ("" if none).
    pub resume_evidence: String,
    /// Snippet from the job description mentioning the keyword ("" if none).
    pub job_description_reference: String,
    pub justification: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alternative_used: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Dual scoring
// ────────────────────────────────────────────────────────────────────────────

/// One weighted component of a composite score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreFactor {
    pub factor: String,
    /// 0–100. Weights within one factor list sum to exactly 100.
    pub weight: u32,
    /// 0–100.
    pub score: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

/// ATS-compliance and recruiter-credibility scores with their factor
/// breakdowns, plus the derived risk tier and verdict text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DualScoringReport {
    pub ats_score: u32,
    pub recruiter_score: u32,
    pub ats_factors: Vec<ScoreFactor>,
    pub recruiter_factors: Vec<ScoreFactor>,
    pub verdict: String,
    pub risk: RiskTier,
    pub summary: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Full report
// ────────────────────────────────────────────────────────────────────────────

/// Everything the engine returns for one document check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeComplianceReport {
    pub issues: Vec<ComplianceIssue>,
    pub keyword_justifications: Vec<KeywordJustification>,
    pub scoring: DualScoringReport,
}

impl ResumeComplianceReport {
    /// Count of blocking issues.
    pub fn hard_issue_count(&self) -> usize {
        self.issues.iter().filter(|i| i.is_hard()).count()
    }
}
