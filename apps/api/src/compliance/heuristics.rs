//! Stylistic and structural heuristics — seven independent scalar scores in
//! [0, 1] that feed the dual scoring aggregator.
//!
//! Missing input never fails a scorer; each has a neutral default so an
//! empty document still produces a bounded report.

use crate::compliance::keywords::is_tool_word;
use crate::compliance::matcher;
use crate::compliance::text::{tokenize, SectionMap};

/// Headings a well-structured resume carries.
const REQUIRED_HEADINGS: &[&str] = &["SUMMARY", "EXPERIENCE", "SKILLS", "EDUCATION"];

/// Filler vocabulary recruiters discount on sight.
const BUZZWORDS: &[&str] = &[
    "synergy",
    "results-driven",
    "self-starter",
    "rockstar",
    "ninja",
    "guru",
    "go-getter",
    "thought leader",
    "think outside the box",
    "dynamic",
    "detail-oriented",
    "team player",
];

const OUTCOME_VERBS: &[&str] = &[
    "increased",
    "reduced",
    "improved",
    "accelerated",
    "decreased",
    "grew",
    "saved",
    "delivered",
    "launched",
    "built",
    "optimized",
    "streamlined",
    "automated",
];

const BULLET_GLYPHS: &[char] = &['-', '*', '•'];

/// Robotic-language sub-term weights and caps.
const ROBOTIC_FIRST_WORD_WEIGHT: f64 = 0.15;
const ROBOTIC_BUZZWORD_WEIGHT: f64 = 0.35;
const ROBOTIC_BULLET_LENGTH_WEIGHT: f64 = 0.25;
const ROBOTIC_DOC_LENGTH_WEIGHT: f64 = 0.25;
const BUZZWORD_CAP: usize = 6;
const BULLET_WORD_BUDGET: f64 = 22.0;
const DOC_LENGTH_BUDGET: usize = 6500;
const DOC_LENGTH_SCALE: f64 = 4000.0;

// ────────────────────────────────────────────────────────────────────────────
// Signals
// ────────────────────────────────────────────────────────────────────────────

/// Everything the aggregator needs from the heuristic layer.
#[derive(Debug, Clone)]
pub struct HeuristicSignals {
    pub robotic_score: f64,
    pub buzzword_count: usize,
    /// Bullet lines whose opening word names a tool.
    pub tool_first_lines: Vec<String>,
    pub outcome_clarity: f64,
    pub section_structure: f64,
    pub formatting_clarity: f64,
    pub consistency: f64,
    pub semantic_match: f64,
    pub role_alignment: f64,
}

/// Runs all seven scorers. `target_keywords` must already be deduplicated.
pub fn compute_heuristics(
    markdown: &str,
    sections: &SectionMap,
    job_description: &str,
    target_keywords: &[String],
) -> HeuristicSignals {
    let bullets = extract_bullets(markdown);
    let buzzword_count = count_buzzwords(markdown);

    HeuristicSignals {
        robotic_score: robotic_language_score(markdown, &bullets, buzzword_count),
        buzzword_count,
        tool_first_lines: tool_first_lines(&bullets),
        outcome_clarity: outcome_clarity(&bullets),
        section_structure: section_structure(sections),
        formatting_clarity: formatting_clarity(markdown),
        consistency: consistency(markdown),
        semantic_match: semantic_match(markdown, target_keywords),
        role_alignment: role_alignment(job_description, sections),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Bullets
// ────────────────────────────────────────────────────────────────────────────

/// Bullet lines with their glyph stripped.
pub fn extract_bullets(markdown: &str) -> Vec<String> {
    markdown
        .lines()
        .filter_map(|line| {
            let trimmed = line.trim_start();
            let glyph = trimmed.chars().next()?;
            let rest = &trimmed[glyph.len_utf8()..];
            // A glyph followed by another glyph is a horizontal rule, not a bullet.
            let next = rest.chars().next();
            if BULLET_GLYPHS.contains(&glyph)
                && next.map_or(false, |c| c.is_whitespace() || c.is_alphanumeric())
            {
                Some(rest.trim().to_string())
            } else {
                None
            }
        })
        .filter(|b| !b.is_empty())
        .collect()
}

fn first_word(bullet: &str) -> Option<String> {
    tokenize(bullet).into_iter().next()
}

// ────────────────────────────────────────────────────────────────────────────
// Robotic language
// ────────────────────────────────────────────────────────────────────────────

pub fn count_buzzwords(markdown: &str) -> usize {
    let lower = markdown.to_lowercase();
    BUZZWORDS.iter().map(|b| lower.matches(b).count()).sum()
}

/// Weighted blend of four monotony signals, each clamped to [0, 1] before
/// weighting: repeated bullet openers, buzzword density, over-long bullets,
/// and over-long documents.
pub fn robotic_language_score(markdown: &str, bullets: &[String], buzzword_count: usize) -> f64 {
    let repeated_opener_fraction = if bullets.is_empty() {
        0.0
    } else {
        let openers: Vec<String> = bullets.iter().filter_map(|b| first_word(b)).collect();
        let repeated = openers
            .iter()
            .filter(|w| openers.iter().filter(|o| o == w).count() >= 3)
            .count();
        repeated as f64 / bullets.len() as f64
    };

    let buzzword_term = (buzzword_count.min(BUZZWORD_CAP) as f64) / BUZZWORD_CAP as f64;

    let bullet_length_term = if bullets.is_empty() {
        0.0
    } else {
        let avg_words: f64 = bullets
            .iter()
            .map(|b| b.split_whitespace().count() as f64)
            .sum::<f64>()
            / bullets.len() as f64;
        ((avg_words - BULLET_WORD_BUDGET) / BULLET_WORD_BUDGET).clamp(0.0, 1.0)
    };

    let doc_length_term =
        ((markdown.len() as f64 - DOC_LENGTH_BUDGET as f64) / DOC_LENGTH_SCALE).clamp(0.0, 1.0);

    (ROBOTIC_FIRST_WORD_WEIGHT * repeated_opener_fraction.clamp(0.0, 1.0)
        + ROBOTIC_BUZZWORD_WEIGHT * buzzword_term
        + ROBOTIC_BULLET_LENGTH_WEIGHT * bullet_length_term
        + ROBOTIC_DOC_LENGTH_WEIGHT * doc_length_term)
        .clamp(0.0, 1.0)
}

/// Bullets that open with a tool name read as keyword-stuffed to recruiters.
pub fn tool_first_lines(bullets: &[String]) -> Vec<String> {
    bullets
        .iter()
        .filter(|b| {
            b.split_whitespace()
                .next()
                .map(|w| is_tool_word(w.trim_matches(|c: char| !c.is_alphanumeric())))
                .unwrap_or(false)
        })
        .cloned()
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Clarity and structure
// ────────────────────────────────────────────────────────────────────────────

/// Fraction of bullets carrying a number, percent, or outcome verb.
pub fn outcome_clarity(bullets: &[String]) -> f64 {
    if bullets.is_empty() {
        return 0.6;
    }
    let clear = bullets
        .iter()
        .filter(|b| {
            let lower = b.to_lowercase();
            b.chars().any(|c| c.is_ascii_digit())
                || b.contains('%')
                || OUTCOME_VERBS.iter().any(|v| lower.contains(v))
        })
        .count();
    clear as f64 / bullets.len() as f64
}

/// Fraction of the four required headings present.
pub fn section_structure(sections: &SectionMap) -> f64 {
    let present = REQUIRED_HEADINGS
        .iter()
        .filter(|&&h| sections.contains(h))
        .count();
    present as f64 / REQUIRED_HEADINGS.len() as f64
}

/// Tables and raw HTML confuse ATS parsers; plain markdown scores higher.
pub fn formatting_clarity(markdown: &str) -> f64 {
    let lower = markdown.to_lowercase();
    if has_pipe_table(markdown) || lower.contains("<table") || lower.contains("<div") {
        0.6
    } else {
        0.9
    }
}

fn has_pipe_table(markdown: &str) -> bool {
    let has_pipe_row = markdown.lines().any(|l| l.contains('|'));
    let has_separator_row = markdown.lines().any(|l| {
        let trimmed = l.trim();
        trimmed.contains('|')
            && trimmed.contains('-')
            && trimmed
                .chars()
                .all(|c| c == '|' || c == '-' || c == ':' || c.is_whitespace())
    });
    has_pipe_row && has_separator_row
}

/// Among `### … | … | …` experience headers, fraction with ≥3 fields.
pub fn consistency(markdown: &str) -> f64 {
    let headers: Vec<&str> = markdown
        .lines()
        .map(str::trim_start)
        .filter(|l| l.starts_with("### ") && l.contains('|'))
        .collect();
    if headers.is_empty() {
        return 0.75;
    }
    let well_formed = headers
        .iter()
        .filter(|h| {
            h.trim_start_matches("### ")
                .split('|')
                .filter(|f| !f.trim().is_empty())
                .count()
                >= 3
        })
        .count();
    well_formed as f64 / headers.len() as f64
}

// ────────────────────────────────────────────────────────────────────────────
// Alignment
// ────────────────────────────────────────────────────────────────────────────

/// Fraction of target keywords found anywhere in the rewritten resume.
pub fn semantic_match(markdown: &str, target_keywords: &[String]) -> f64 {
    if target_keywords.is_empty() {
        return 0.8;
    }
    let found = target_keywords
        .iter()
        .filter(|k| matcher::matches(markdown, k))
        .count();
    found as f64 / target_keywords.len() as f64
}

/// Overlap between the top 40 JD words and the SUMMARY section's vocabulary,
/// normalized by `min(12, top-word count)`.
pub fn role_alignment(job_description: &str, sections: &SectionMap) -> f64 {
    let jd_tokens = tokenize(job_description);
    if jd_tokens.is_empty() {
        return 0.0;
    }

    let mut counts: Vec<(String, usize)> = Vec::new();
    for token in jd_tokens {
        match counts.iter_mut().find(|(t, _)| *t == token) {
            Some((_, n)) => *n += 1,
            None => counts.push((token, 1)),
        }
    }
    // Stable sort keeps first-seen order among equally frequent words.
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    let top_words: Vec<String> = counts.into_iter().take(40).map(|(t, _)| t).collect();

    let summary_words: std::collections::HashSet<String> = sections
        .get("SUMMARY")
        .map(|body| tokenize(body).into_iter().collect())
        .unwrap_or_default();

    let overlap = top_words
        .iter()
        .filter(|w| summary_words.contains(*w))
        .count();
    let denominator = top_words.len().min(12).max(1);
    (overlap as f64 / denominator as f64).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compliance::text::split_sections;

    fn bullets_of(lines: &[&str]) -> Vec<String> {
        lines.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn test_extract_bullets_strips_glyphs() {
        let md = "## Experience\n- Built reports\n* Shipped models\n• Led reviews\nplain line";
        let bullets = extract_bullets(md);
        assert_eq!(bullets, vec!["Built reports", "Shipped models", "Led reviews"]);
    }

    #[test]
    fn test_robotic_score_zero_for_clean_doc() {
        let bullets = bullets_of(&["Reduced costs by 12%", "Launched two dashboards"]);
        let score = robotic_language_score("short doc", &bullets, 0);
        assert!(score.abs() < f64::EPSILON);
    }

    #[test]
    fn test_robotic_score_repeated_openers() {
        let bullets = bullets_of(&[
            "Led project one",
            "Led project two",
            "Led project three",
            "Shipped a release",
        ]);
        let score = robotic_language_score("doc", &bullets, 0);
        // 3 of 4 bullets share an opener used ≥3 times → 0.15 × 0.75.
        assert!((score - 0.15 * 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_robotic_score_buzzwords_capped() {
        let score = robotic_language_score("doc", &[], 20);
        assert!((score - 0.35).abs() < 1e-9);
    }

    #[test]
    fn test_robotic_score_long_document() {
        let long_doc = "a".repeat(DOC_LENGTH_BUDGET + DOC_LENGTH_SCALE as usize);
        let score = robotic_language_score(&long_doc, &[], 0);
        assert!((score - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_robotic_score_clamped_to_one() {
        let bullets: Vec<String> = (0..5).map(|_| "word ".repeat(80).trim().to_string()).collect();
        let long_doc = "x".repeat(50_000);
        let score = robotic_language_score(&long_doc, &bullets, 50);
        assert!(score <= 1.0);
    }

    #[test]
    fn test_count_buzzwords_case_insensitive() {
        assert_eq!(count_buzzwords("Synergy with a results-driven rockstar"), 3);
    }

    #[test]
    fn test_tool_first_lines_detects_leading_tool() {
        let bullets = bullets_of(&[
            "Excel models for forecasting",
            "SQL queries across replicas",
            "Designed onboarding flows",
        ]);
        let flagged = tool_first_lines(&bullets);
        assert_eq!(flagged.len(), 2);
    }

    #[test]
    fn test_outcome_clarity_counts_numbers_and_verbs() {
        let bullets = bullets_of(&[
            "Reduced churn by 8%",
            "Launched loyalty program",
            "Partnered with marketing",
            "Owned the roadmap",
        ]);
        assert!((outcome_clarity(&bullets) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_outcome_clarity_default_without_bullets() {
        assert!((outcome_clarity(&[]) - 0.6).abs() < f64::EPSILON);
    }

    #[test]
    fn test_section_structure_none_to_all() {
        let none = split_sections("plain text, no headings");
        assert!(section_structure(&none).abs() < f64::EPSILON);

        let all = split_sections("## Summary\n\n## Experience\n\n## Skills\n\n## Education\n");
        assert!((section_structure(&all) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_formatting_clarity_flags_pipe_table() {
        let md = "| Skill | Years |\n| --- | --- |\n| SQL | 4 |";
        assert!((formatting_clarity(md) - 0.6).abs() < f64::EPSILON);
    }

    #[test]
    fn test_formatting_clarity_flags_html() {
        assert!((formatting_clarity("<div class=\"grid\">…</div>") - 0.6).abs() < f64::EPSILON);
    }

    #[test]
    fn test_formatting_clarity_plain_markdown() {
        assert!((formatting_clarity("## Summary\nClean text") - 0.9).abs() < f64::EPSILON);
    }

    #[test]
    fn test_consistency_counts_pipe_fields() {
        let md = "### Analyst | Acme Corp | 2020–2023\n### Manager | Beta Inc\n";
        assert!((consistency(md) - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_consistency_default_without_headers() {
        assert!((consistency("## Experience\nno entry headers") - 0.75).abs() < f64::EPSILON);
    }

    #[test]
    fn test_semantic_match_fraction() {
        let keywords = vec!["Excel".to_string(), "Tableau".to_string()];
        let score = semantic_match("Built Excel dashboards", &keywords);
        assert!((score - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_semantic_match_default_on_empty_list() {
        assert!((semantic_match("anything", &[]) - 0.8).abs() < f64::EPSILON);
    }

    #[test]
    fn test_role_alignment_overlap() {
        let jd = "inventory planning analyst inventory forecasting analyst retail operations";
        let sections =
            split_sections("## Summary\nAnalyst focused on inventory forecasting for retail");
        let score = role_alignment(jd, &sections);
        assert!(score > 0.5, "score was {score}");
    }

    #[test]
    fn test_role_alignment_missing_summary_is_zero() {
        let sections = split_sections("## Experience\nthings happened");
        assert!(role_alignment("inventory analyst role", &sections).abs() < f64::EPSILON);
    }

    #[test]
    fn test_role_alignment_empty_jd_is_zero() {
        let sections = split_sections("## Summary\nwords here");
        assert!(role_alignment("", &sections).abs() < f64::EPSILON);
    }
}
