//! Keyword matching — the shared primitive under frequency counting,
//! evidence checks, and semantic skill match.
//!
//! A keyword expands into a small set of brand/acronym variants, each tried
//! with word-boundary, whitespace-flexible regex matching. If a pattern
//! cannot be constructed, matching degrades to case-insensitive substring
//! containment rather than propagating the error.

use regex::Regex;

const MAX_VARIANTS: usize = 10;

/// Snippet context taken on each side of a matched keyword, in bytes.
const SNIPPET_CONTEXT: usize = 60;

/// Brand/acronym equivalences, applied symmetrically.
const SYNONYM_PAIRS: &[(&str, &str)] = &[
    ("excel", "microsoft excel"),
    ("excel", "ms excel"),
    ("power bi", "powerbi"),
    ("google sheets", "sheets"),
    ("aws", "amazon web services"),
];

// ────────────────────────────────────────────────────────────────────────────
// Variant set
// ────────────────────────────────────────────────────────────────────────────

/// Builds the lowercase variant set for a keyword, capped at 10.
///
/// Drops "MS "/"Microsoft " prefixes, then applies the synonym pairs to
/// every variant produced so far. Order is stable: the keyword itself first.
pub fn keyword_variants(keyword: &str) -> Vec<String> {
    let base = keyword.trim().to_lowercase();
    if base.is_empty() {
        return Vec::new();
    }

    let mut variants = vec![base.clone()];
    if let Some(rest) = base.strip_prefix("ms ") {
        variants.push(rest.trim().to_string());
    }
    if let Some(rest) = base.strip_prefix("microsoft ") {
        variants.push(rest.trim().to_string());
    }

    let prefix_stripped = variants.clone();
    for v in &prefix_stripped {
        for (a, b) in SYNONYM_PAIRS {
            if v == a {
                variants.push((*b).to_string());
            } else if v == b {
                variants.push((*a).to_string());
            }
        }
    }

    let mut deduped: Vec<String> = Vec::new();
    for v in variants {
        if !deduped.contains(&v) {
            deduped.push(v);
        }
        if deduped.len() == MAX_VARIANTS {
            break;
        }
    }
    deduped
}

// ────────────────────────────────────────────────────────────────────────────
// Matching
// ────────────────────────────────────────────────────────────────────────────

/// Escapes a variant into a case-insensitive pattern whose internal
/// whitespace matches any whitespace run.
fn flexible_pattern(variant: &str) -> String {
    variant
        .split_whitespace()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(r"\s+")
}

/// True when the match is not embedded in a larger alphanumeric token.
fn is_standalone(text: &str, start: usize, end: usize) -> bool {
    let before_ok = text[..start]
        .chars()
        .next_back()
        .map_or(true, |c| !c.is_alphanumeric());
    let after_ok = text[end..]
        .chars()
        .next()
        .map_or(true, |c| !c.is_alphanumeric());
    before_ok && after_ok
}

/// True if any variant of `keyword` appears in `text` on word boundaries.
pub fn matches(text: &str, keyword: &str) -> bool {
    if text.is_empty() {
        return false;
    }
    keyword_variants(keyword).iter().any(|variant| {
        match Regex::new(&format!(r"(?i)\b{}\b", flexible_pattern(variant))) {
            Ok(re) => re.is_match(text),
            // Pattern construction failed — degrade to plain containment.
            Err(_) => text.to_lowercase().contains(variant.as_str()),
        }
    })
}

/// Counts boundary-safe occurrences of the keyword itself (not its variants)
/// in `text`. A match embedded in a larger alphanumeric token does not count.
pub fn count_occurrences(text: &str, keyword: &str) -> usize {
    let base = keyword.trim().to_lowercase();
    if base.is_empty() || text.is_empty() {
        return 0;
    }
    match Regex::new(&format!("(?i){}", flexible_pattern(&base))) {
        Ok(re) => re
            .find_iter(text)
            .filter(|m| is_standalone(text, m.start(), m.end()))
            .count(),
        Err(_) => {
            let lower = text.to_lowercase();
            lower
                .match_indices(&base)
                .filter(|(i, m)| is_standalone(&lower, *i, i + m.len()))
                .count()
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Snippets
// ────────────────────────────────────────────────────────────────────────────

/// Returns a short context window around the first variant match, or an
/// empty string when nothing matches. Used for the justification ledger.
pub fn extract_snippet(text: &str, keyword: &str) -> String {
    for variant in keyword_variants(keyword) {
        match Regex::new(&format!("(?i){}", flexible_pattern(&variant))) {
            Ok(re) => {
                if let Some(m) = re
                    .find_iter(text)
                    .find(|m| is_standalone(text, m.start(), m.end()))
                {
                    return window(text, m.start(), m.end());
                }
            }
            Err(_) => {
                let lower = text.to_lowercase();
                if let Some(pos) = lower.find(&variant) {
                    return window(&lower, pos, pos + variant.len());
                }
            }
        }
    }
    String::new()
}

/// Cuts a whitespace-collapsed window around `[start, end)`, snapped to
/// char boundaries.
fn window(text: &str, start: usize, end: usize) -> String {
    let mut from = start.saturating_sub(SNIPPET_CONTEXT);
    while from > 0 && !text.is_char_boundary(from) {
        from -= 1;
    }
    let mut to = (end + SNIPPET_CONTEXT).min(text.len());
    while to < text.len() && !text.is_char_boundary(to) {
        to += 1;
    }
    text[from..to].split_whitespace().collect::<Vec<_>>().join(" ")
}
