#![allow(dead_code)]

//! Text primitives — normalization, word tokens, shingles, and the markdown
//! section splitter. Everything downstream (frequency, mirroring, heuristics)
//! builds on these.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

/// Token cap applied to each side of the mirroring comparison. Bounds
/// worst-case cost independent of pathological input length.
pub const MIRRORING_TOKEN_CAP: usize = 1600;

/// Shingle width used for JD-mirroring similarity.
pub const SHINGLE_SIZE: usize = 7;

static HEADING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^##\s+(.+)$").expect("valid heading regex"));

// ────────────────────────────────────────────────────────────────────────────
// Tokenizer
// ────────────────────────────────────────────────────────────────────────────

/// Lowercases, strips bullet glyphs and punctuation, and returns word tokens
/// of at least 3 characters.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect::<String>()
        .split_whitespace()
        .filter(|w| w.len() >= 3)
        .map(str::to_string)
        .collect()
}

/// Same as [`tokenize`] but capped at `MIRRORING_TOKEN_CAP` tokens.
pub fn tokenize_capped(text: &str) -> Vec<String> {
    let mut tokens = tokenize(text);
    tokens.truncate(MIRRORING_TOKEN_CAP);
    tokens
}

/// Builds the set of contiguous `n`-word shingles over a token stream.
/// Streams shorter than `n` yield the empty set.
pub fn shingles(tokens: &[String], n: usize) -> HashSet<String> {
    if n == 0 || tokens.len() < n {
        return HashSet::new();
    }
    tokens.windows(n).map(|w| w.join(" ")).collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Section splitter
// ────────────────────────────────────────────────────────────────────────────

/// Ordered section-name → body mapping produced by [`split_sections`].
///
/// Preserves document order; duplicate headings append to the existing body.
#[derive(Debug, Clone, Default)]
pub struct SectionMap {
    entries: Vec<(String, String)>,
}

impl SectionMap {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, body)| body.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, b)| (n.as_str(), b.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn push_line(&mut self, name: &str, line: &str) {
        match self.entries.iter_mut().find(|(n, _)| n == name) {
            Some((_, body)) => {
                if !body.is_empty() {
                    body.push('\n');
                }
                body.push_str(line);
            }
            None => self.entries.push((name.to_string(), line.to_string())),
        }
    }

    fn ensure(&mut self, name: &str) {
        if !self.contains(name) {
            self.entries.push((name.to_string(), String::new()));
        }
    }
}

/// Partitions resume markdown into named sections.
///
/// A line matching `^##\s+(.+)$` starts a new section (name upper-cased and
/// trimmed); everything before the first heading lands in `OTHER`. A missing
/// section is not an error — absence just lowers the structure score later.
pub fn split_sections(markdown: &str) -> SectionMap {
    let mut map = markdown
        .lines()
        .fold(
            (SectionMap::default(), "OTHER".to_string(), true),
            |(mut map, current, leading_blank), line| {
                if let Some(caps) = HEADING_RE.captures(line) {
                    let name = caps[1].trim().to_uppercase();
                    map.ensure(&name);
                    (map, name, false)
                } else if leading_blank && current == "OTHER" && line.trim().is_empty() {
                    // Drop blank lines before any content in the OTHER bucket.
                    (map, current, true)
                } else {
                    map.push_line(&current, line);
                    (map, current, false)
                }
            },
        )
        .0;
    map.entries
        .retain(|(name, body)| name != "OTHER" || !body.trim().is_empty());
    map
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_lowercases_and_drops_short_words() {
        let tokens = tokenize("Led a Team of 12 engineers");
        assert_eq!(tokens, vec!["led", "team", "engineers"]);
    }

    #[test]
    fn test_tokenize_strips_bullet_glyphs_and_punctuation() {
        let tokens = tokenize("• Shipped dashboards, reports!");
        assert_eq!(tokens, vec!["shipped", "dashboards", "reports"]);
    }

    #[test]
    fn test_tokenize_empty_string() {
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn test_tokenize_capped_truncates() {
        let long = "word ".repeat(MIRRORING_TOKEN_CAP + 50);
        assert_eq!(tokenize_capped(&long).len(), MIRRORING_TOKEN_CAP);
    }

    #[test]
    fn test_shingles_short_stream_is_empty() {
        let tokens = tokenize("one two three");
        assert!(shingles(&tokens, SHINGLE_SIZE).is_empty());
    }

    #[test]
    fn test_shingles_counts_windows() {
        let tokens: Vec<String> = (0..9).map(|i| format!("word{i}")).collect();
        let set = shingles(&tokens, 7);
        assert_eq!(set.len(), 3);
        assert!(set.contains("word0 word1 word2 word3 word4 word5 word6"));
    }

    #[test]
    fn test_split_sections_basic() {
        let md = "## Summary\nSeasoned analyst.\n## Experience\nDid things.";
        let map = split_sections(md);
        assert_eq!(map.get("SUMMARY"), Some("Seasoned analyst."));
        assert_eq!(map.get("EXPERIENCE"), Some("Did things."));
    }

    #[test]
    fn test_split_sections_leading_text_goes_to_other() {
        let md = "Jane Doe\njane@example.com\n## Skills\nSQL";
        let map = split_sections(md);
        assert_eq!(map.get("OTHER"), Some("Jane Doe\njane@example.com"));
        assert_eq!(map.get("SKILLS"), Some("SQL"));
    }

    #[test]
    fn test_split_sections_uppercases_and_trims_names() {
        let map = split_sections("##   Work History  \nbody");
        assert!(map.contains("WORK HISTORY"));
    }

    #[test]
    fn test_split_sections_h3_is_body_not_heading() {
        let md = "## Experience\n### Analyst | Acme | 2020\nbullet";
        let map = split_sections(md);
        assert_eq!(map.len(), 1);
        assert!(map.get("EXPERIENCE").unwrap().contains("### Analyst"));
    }

    #[test]
    fn test_split_sections_empty_input() {
        let map = split_sections("");
        assert!(map.is_empty());
    }

    #[test]
    fn test_split_sections_preserves_order() {
        let md = "## B\nx\n## A\ny";
        let map = split_sections(md);
        let names: Vec<&str> = map.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["B", "A"]);
    }

    #[test]
    fn test_split_sections_duplicate_heading_appends() {
        let md = "## Skills\nSQL\n## Skills\nPython";
        let map = split_sections(md);
        assert_eq!(map.len(), 1);
        let body = map.get("SKILLS").unwrap();
        assert!(body.contains("SQL") && body.contains("Python"));
    }
}
