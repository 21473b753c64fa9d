//! Dual scoring — folds the heuristic signals into an ATS-compliance score
//! and a recruiter-credibility score, each a weighted composite of six
//! factors, then derives the risk tier and verdict text.

use crate::compliance::heuristics::HeuristicSignals;
use crate::compliance::models::{DualScoringReport, RiskTier, ScoreFactor};

/// Keyword-list size beyond which believability starts to erode.
const KEYWORD_OVERLOAD_FLOOR: usize = 18;
const KEYWORD_OVERLOAD_SCALE: f64 = 30.0;
const TOOL_FIRST_PENALTY: f64 = 0.15;

fn to_pct(value: f64) -> u32 {
    (value.clamp(0.0, 1.0) * 100.0).round() as u32
}

fn factor(name: &str, weight: u32, value: f64) -> ScoreFactor {
    ScoreFactor {
        factor: name.to_string(),
        weight,
        score: to_pct(value),
    }
}

/// Weighted composite of a factor list. Weights sum to 100 by construction,
/// so the result lands in [0, 100].
fn composite(factors: &[ScoreFactor]) -> u32 {
    let sum: f64 = factors
        .iter()
        .map(|f| f.weight as f64 * f.score as f64 / 100.0)
        .sum();
    (sum.round() as u32).min(100)
}

fn risk_tier(hard_issue_count: usize, recruiter_score: u32) -> RiskTier {
    if hard_issue_count >= 2 || recruiter_score < 60 {
        RiskTier::High
    } else if hard_issue_count == 1 || recruiter_score < 75 {
        RiskTier::Medium
    } else {
        RiskTier::Low
    }
}

fn verdict_for(risk: RiskTier) -> (&'static str, &'static str) {
    match risk {
        RiskTier::Low => (
            "Ready to submit",
            "Keywords are used honestly and the document reads like a person wrote it.",
        ),
        RiskTier::Medium => (
            "Fix the flagged items before sending",
            "Most checks pass, but at least one claim or pattern will draw recruiter scrutiny.",
        ),
        RiskTier::High => (
            "Do not send this version",
            "The document shows keyword or credibility patterns recruiters reject outright.",
        ),
    }
}

/// Builds the full dual scoring report.
///
/// `keyword_count` is the deduplicated target-keyword count;
/// `hard_issue_count` covers every hard issue the earlier analyzers emitted.
pub fn aggregate_scores(
    signals: &HeuristicSignals,
    hard_issue_count: usize,
    keyword_count: usize,
) -> DualScoringReport {
    let ats_factors = vec![
        factor("Semantic skill match", 30, signals.semantic_match),
        factor("Role alignment", 20, signals.role_alignment),
        factor("Section structure", 15, signals.section_structure),
        factor(
            "Keyword presence (non-repetitive)",
            15,
            signals.semantic_match * 0.9 + 0.1,
        ),
        factor("Formatting clarity", 10, signals.formatting_clarity),
        factor("Consistency", 10, signals.consistency),
    ];

    let hard = hard_issue_count as f64;
    let tool_first_penalty = if signals.tool_first_lines.is_empty() {
        0.0
    } else {
        TOOL_FIRST_PENALTY
    };
    let keyword_overload = ((keyword_count as f64 - KEYWORD_OVERLOAD_FLOOR as f64)
        / KEYWORD_OVERLOAD_SCALE)
        .max(0.0);

    let recruiter_factors = vec![
        factor("Credibility", 30, 1.0 - (hard / 4.0).min(1.0)),
        factor("Readability", 20, 1.0 - signals.robotic_score),
        factor("Outcome clarity", 20, signals.outcome_clarity),
        factor(
            "Skill believability",
            15,
            1.0 - (tool_first_penalty + keyword_overload).min(1.0),
        ),
        factor(
            "No buzzwords",
            10,
            1.0 - (signals.buzzword_count as f64 / 6.0).min(1.0),
        ),
        factor("Interview defensibility", 5, 1.0 - (hard / 6.0).min(1.0)),
    ];

    let ats_score = composite(&ats_factors);
    let recruiter_score = composite(&recruiter_factors);
    let risk = risk_tier(hard_issue_count, recruiter_score);
    let (verdict, summary) = verdict_for(risk);

    DualScoringReport {
        ats_score,
        recruiter_score,
        ats_factors,
        recruiter_factors,
        verdict: verdict.to_string(),
        risk,
        summary: summary.to_string(),
    }
}
