//! Keyword-stuffing and JD-mirroring detection.
//!
//! Frequency rule: a keyword may appear at most `allowed_frequency` times
//! across the document, and never more than once within a single named
//! section. Mirroring rule: 7-word shingle overlap between the job
//! description and the rewritten resume must stay under the threshold.

use serde_json::json;

use crate::compliance::matcher::count_occurrences;
use crate::compliance::models::ComplianceIssue;
use crate::compliance::text::{shingles, tokenize_capped, SectionMap, SHINGLE_SIZE};

// ────────────────────────────────────────────────────────────────────────────
// Frequency rule
// ────────────────────────────────────────────────────────────────────────────

/// Result of the frequency check for one keyword.
#[derive(Debug, Clone)]
pub struct FrequencyFinding {
    /// Boundary-safe occurrence count across the whole document.
    pub count: u32,
    pub issues: Vec<ComplianceIssue>,
}

/// Counts a keyword across the document and per section, emitting hard
/// `keyword_frequency` issues for global overuse and intra-section repeats.
pub fn check_frequency(
    markdown: &str,
    sections: &SectionMap,
    keyword: &str,
    allowed_frequency: u32,
) -> FrequencyFinding {
    let count = count_occurrences(markdown, keyword) as u32;
    let mut issues = Vec::new();

    if count > allowed_frequency {
        issues.push(ComplianceIssue::hard(
            "keyword_frequency",
            format!(
                "\"{keyword}\" appears {count} times; at most {allowed_frequency} reads naturally"
            ),
            json!({
                "keyword": keyword,
                "count": count,
                "allowed_frequency": allowed_frequency,
            }),
        ));
    }

    // Sections must not repeat a keyword, independent of the global budget.
    for (name, body) in sections.iter().filter(|(n, _)| *n != "OTHER") {
        let section_count = count_occurrences(body, keyword) as u32;
        if section_count > 1 {
            issues.push(ComplianceIssue::hard(
                "keyword_frequency",
                format!("\"{keyword}\" repeats {section_count} times within the {name} section"),
                json!({
                    "keyword": keyword,
                    "section": name,
                    "count": section_count,
                }),
            ));
        }
    }

    FrequencyFinding { count, issues }
}

// ────────────────────────────────────────────────────────────────────────────
// Mirroring rule
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
pub struct MirroringAnalysis {
    /// `|intersection| / max(1, min(|jd shingles|, |resume shingles|))`.
    pub similarity: f64,
    /// Number of 7-word shingles shared verbatim.
    pub shared_shingles: usize,
}

/// Computes shingle-overlap similarity between the job description and the
/// rewritten resume. Token streams are capped on both sides, so cost is
/// bounded regardless of input length.
pub fn mirroring_similarity(job_description: &str, markdown: &str) -> MirroringAnalysis {
    let jd_shingles = shingles(&tokenize_capped(job_description), SHINGLE_SIZE);
    let resume_shingles = shingles(&tokenize_capped(markdown), SHINGLE_SIZE);

    let shared = jd_shingles.intersection(&resume_shingles).count();
    let denominator = jd_shingles.len().min(resume_shingles.len()).max(1);

    MirroringAnalysis {
        similarity: shared as f64 / denominator as f64,
        shared_shingles: shared,
    }
}

/// Runs the mirroring rule at the given threshold. Returns the analysis and
/// the hard `jd_phrase_mirroring` issue, if one fired.
pub fn check_mirroring(
    job_description: &str,
    markdown: &str,
    threshold: f64,
) -> (MirroringAnalysis, Option<ComplianceIssue>) {
    let analysis = mirroring_similarity(job_description, markdown);

    let issue = if analysis.similarity >= threshold && analysis.shared_shingles > 0 {
        Some(ComplianceIssue::hard(
            "jd_phrase_mirroring",
            format!(
                "Resume mirrors job-description phrasing too closely (similarity {:.2})",
                analysis.similarity
            ),
            json!({
                "similarity": analysis.similarity,
                "shared_shingles": analysis.shared_shingles,
                "threshold": threshold,
            }),
        ))
    } else {
        None
    };

    (analysis, issue)
}
