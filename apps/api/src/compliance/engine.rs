//! Engine orchestration — one pure, synchronous pass over the four inputs.
//!
//! Data flow is strictly linear: split/classify, then the independent
//! analyzers (frequency, mirroring, evidence, heuristics), then score
//! aggregation and report assembly. No I/O, no shared mutable state; the
//! same inputs always produce the same report.

use serde_json::json;
use tracing::debug;

use crate::compliance::evidence::{verify_evidence, EvidenceFinding};
use crate::compliance::frequency::{check_frequency, check_mirroring};
use crate::compliance::heuristics::compute_heuristics;
use crate::compliance::keywords::{classify_keyword, KeywordProfile};
use crate::compliance::matcher;
use crate::compliance::models::{
    ComplianceInput, ComplianceIssue, KeywordJustification, ResumeComplianceReport,
};
use crate::compliance::scoring::aggregate_scores;
use crate::compliance::text::split_sections;

/// Cap on offending lines listed in a `tool_first_sentence` issue.
const TOOL_FIRST_LINE_CAP: usize = 10;

/// Robotic score at which the advisory issue fires.
const ROBOTIC_ISSUE_THRESHOLD: f64 = 0.6;

/// Runs the full compliance check and returns the assembled report.
pub fn run_compliance_check(input: &ComplianceInput) -> ResumeComplianceReport {
    let sections = split_sections(&input.markdown);
    let keywords = dedupe_keywords(&input.target_keywords);

    let mut issues: Vec<ComplianceIssue> = Vec::new();
    let mut justifications: Vec<KeywordJustification> = Vec::new();

    for keyword in &keywords {
        let profile = classify_keyword(keyword);
        let used = matcher::matches(&input.markdown, keyword);

        let frequency = check_frequency(&input.markdown, &sections, keyword, profile.allowed_frequency);
        let over_budget = !frequency.issues.is_empty();

        let evidence = verify_evidence(
            &input.original_resume_text,
            keyword,
            &profile,
            used,
            input.remove_risky_keywords,
        );

        let justification = build_justification_text(used, &profile, &evidence, frequency.count);
        let reason = evidence.reason.clone().or_else(|| {
            over_budget.then(|| format!("\"{keyword}\" exceeds its allowed repetition budget"))
        });

        justifications.push(KeywordJustification {
            keyword: keyword.clone(),
            used,
            category: profile.category,
            risk_level: profile.risk,
            allowed_frequency: profile.allowed_frequency,
            requires_proof: profile.requires_proof,
            frequency: frequency.count,
            resume_evidence: matcher::extract_snippet(&input.original_resume_text, keyword),
            job_description_reference: matcher::extract_snippet(&input.job_description, keyword),
            justification,
            reason,
            alternative_used: evidence.alternative_used.clone(),
        });

        issues.extend(frequency.issues);
        issues.extend(evidence.issues);
    }

    let (mirroring, mirroring_issue) = check_mirroring(
        &input.job_description,
        &input.markdown,
        input.jd_mirroring_threshold,
    );
    issues.extend(mirroring_issue);

    let signals = compute_heuristics(
        &input.markdown,
        &sections,
        &input.job_description,
        &keywords,
    );

    if signals.robotic_score >= ROBOTIC_ISSUE_THRESHOLD {
        issues.push(ComplianceIssue::soft(
            "robotic_language_score",
            format!(
                "Language reads as machine-generated (score {:.2})",
                signals.robotic_score
            ),
            json!({ "score": signals.robotic_score }),
        ));
    }

    if !signals.tool_first_lines.is_empty() {
        let lines: Vec<&str> = signals
            .tool_first_lines
            .iter()
            .take(TOOL_FIRST_LINE_CAP)
            .map(String::as_str)
            .collect();
        issues.push(ComplianceIssue::soft(
            "tool_first_sentence",
            format!("{} bullet(s) open with a tool name", signals.tool_first_lines.len()),
            json!({ "lines": lines }),
        ));
    }

    let hard_issue_count = issues.iter().filter(|i| i.is_hard()).count();
    let scoring = aggregate_scores(&signals, hard_issue_count, keywords.len());

    debug!(
        issues = issues.len(),
        hard_issues = hard_issue_count,
        keywords = keywords.len(),
        mirroring_similarity = mirroring.similarity,
        ats_score = scoring.ats_score,
        recruiter_score = scoring.recruiter_score,
        "compliance check complete"
    );

    ResumeComplianceReport {
        issues,
        keyword_justifications: justifications,
        scoring,
    }
}

/// Deduplicates target keywords case-insensitively, keeping first spellings
/// and their order.
fn dedupe_keywords(target_keywords: &[String]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    let mut result: Vec<String> = Vec::new();
    for keyword in target_keywords {
        let normalized = keyword.trim().to_lowercase();
        if !seen.contains(&normalized) {
            seen.push(normalized);
            result.push(keyword.trim().to_string());
        }
    }
    result
}

fn build_justification_text(
    used: bool,
    profile: &KeywordProfile,
    evidence: &EvidenceFinding,
    frequency: u32,
) -> String {
    if !used {
        return "Not used in the rewritten resume.".to_string();
    }
    if !profile.requires_proof {
        return format!("Used {frequency} time(s); no supporting evidence required.");
    }
    if evidence.direct {
        format!("Used {frequency} time(s); the original resume states it directly.")
    } else if evidence.proven {
        format!("Used {frequency} time(s); the original resume shows equivalent work.")
    } else {
        format!("Used {frequency} time(s) without support in the original resume.")
    }
}
