//! Pattern-based skill extraction against the canonical vocabulary
//!
//! Fallback extraction path for callers that have only raw text and no
//! trained entity model: scan for exact vocabulary mentions with
//! Aho-Corasick, then for near-miss spellings with a fuzzy sliding window
//! over word groups, and resolve overlapping spans by confidence. The output
//! is a list of candidate skill strings ready for the matcher.

use crate::data::vocabulary::SkillVocabulary;
use crate::error::{Result, SkillGapError};
use aho_corasick::AhoCorasick;
use log::debug;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use strsim::normalized_damerau_levenshtein;
use unicode_segmentation::UnicodeSegmentation;

// Word windows longer than this never correspond to a single skill name.
const MAX_SKILL_WORDS: usize = 5;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedSkill {
    /// Canonical vocabulary name the span was recognized as.
    pub skill: String,
    /// Byte offsets into the cleaned text.
    pub start: usize,
    pub end: usize,
    pub confidence: f32,
}

pub struct SkillTextExtractor {
    vocabulary: Arc<SkillVocabulary>,
    exact_matcher: AhoCorasick,
    fuzzy_threshold: f32,
    whitespace: Regex,
    stripped: Regex,
}

impl SkillTextExtractor {
    pub fn new(vocabulary: Arc<SkillVocabulary>, fuzzy_threshold: f32) -> Result<Self> {
        let exact_matcher = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .match_kind(aho_corasick::MatchKind::LeftmostLongest)
            .build(vocabulary.skills())
            .map_err(|e| {
                SkillGapError::InvalidInput(format!("failed to build skill scanner: {}", e))
            })?;

        Ok(Self {
            vocabulary,
            exact_matcher,
            fuzzy_threshold: fuzzy_threshold.clamp(0.0, 1.0),
            whitespace: Regex::new(r"\s+").expect("static regex"),
            stripped: Regex::new(r"[^\w\s.\-+#]").expect("static regex"),
        })
    }

    pub fn fuzzy_threshold(&self) -> f32 {
        self.fuzzy_threshold
    }

    /// Normalize text before scanning: collapse whitespace and drop special
    /// characters, keeping the punctuation that appears in skill names
    /// (".", "-", "+", "#").
    pub fn clean_text(&self, text: &str) -> String {
        let stripped = self.stripped.replace_all(text, " ");
        self.whitespace
            .replace_all(stripped.trim(), " ")
            .to_string()
    }

    /// Find vocabulary skills mentioned in the text, exact or fuzzily
    /// spelled. Overlapping spans are resolved highest-confidence-first;
    /// results come back in text order.
    pub fn extract(&self, text: &str) -> Vec<ExtractedSkill> {
        let text = self.clean_text(text);
        let mut spans = self.find_exact_spans(&text);
        spans.extend(self.find_fuzzy_spans(&text));

        let mut kept = remove_overlapping(spans);
        kept.sort_by_key(|s| s.start);
        debug!("extracted {} skill spans from {} chars", kept.len(), text.len());
        kept
    }

    /// Candidate skill strings for the matcher: extraction results
    /// deduplicated in first-mention order.
    pub fn extract_candidate_skills(&self, text: &str) -> Vec<String> {
        let mut candidates: Vec<String> = Vec::new();
        for span in self.extract(text) {
            if !candidates.contains(&span.skill) {
                candidates.push(span.skill);
            }
        }
        candidates
    }

    fn find_exact_spans(&self, text: &str) -> Vec<ExtractedSkill> {
        let mut spans = Vec::new();
        for mat in self.exact_matcher.find_iter(text) {
            // Reject hits inside larger words ("r" in "marketing").
            if !on_word_boundary(text, mat.start(), mat.end()) {
                continue;
            }
            spans.push(ExtractedSkill {
                skill: self.vocabulary.skills()[mat.pattern().as_usize()].clone(),
                start: mat.start(),
                end: mat.end(),
                confidence: 1.0,
            });
        }
        spans
    }

    fn find_fuzzy_spans(&self, text: &str) -> Vec<ExtractedSkill> {
        let words: Vec<(usize, &str)> = text.unicode_word_indices().collect();
        let mut spans = Vec::new();

        for skill in self.vocabulary.skills() {
            let skill_lower = skill.to_lowercase();
            let skill_words = skill_lower.unicode_words().count().max(1);
            if skill_words > MAX_SKILL_WORDS {
                continue;
            }

            for window in words.windows(skill_words) {
                let (start, _) = window[0];
                let (last_start, last_word) = window[window.len() - 1];
                let end = last_start + last_word.len();
                let group = text[start..end].to_lowercase();

                let ratio = normalized_damerau_levenshtein(&skill_lower, &group) as f32;
                // Exact spellings are already covered by the exact scan.
                if ratio >= self.fuzzy_threshold && ratio < 1.0 {
                    spans.push(ExtractedSkill {
                        skill: skill.clone(),
                        start,
                        end,
                        confidence: ratio,
                    });
                }
            }
        }
        spans
    }
}

/// Keep the highest-confidence span of each overlapping group.
fn remove_overlapping(mut spans: Vec<ExtractedSkill>) -> Vec<ExtractedSkill> {
    spans.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.start.cmp(&b.start))
    });

    let mut kept: Vec<ExtractedSkill> = Vec::new();
    for span in spans {
        let overlaps = kept
            .iter()
            .any(|accepted| span.start < accepted.end && span.end > accepted.start);
        if !overlaps {
            kept.push(span);
        }
    }
    kept
}

/// A span is a standalone mention only when it does not abut alphanumeric
/// text on either side.
fn on_word_boundary(text: &str, start: usize, end: usize) -> bool {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::snapshot::SkillEmbeddingSnapshot;

    fn extractor() -> SkillTextExtractor {
        let vocabulary = Arc::new(
            SkillVocabulary::from_snapshot(SkillEmbeddingSnapshot {
                skills: vec![
                    "Python".to_string(),
                    "Machine Learning".to_string(),
                    "R".to_string(),
                    "SQL".to_string(),
                ],
                embeddings: vec![
                    vec![1.0, 0.0],
                    vec![0.0, 1.0],
                    vec![0.5, 0.5],
                    vec![0.5, -0.5],
                ],
            })
            .unwrap(),
        );
        SkillTextExtractor::new(vocabulary, 0.8).unwrap()
    }

    #[test]
    fn test_clean_text() {
        let extractor = extractor();
        assert_eq!(
            extractor.clean_text("  C++, and   C#!\n(also: Python)  "),
            "C++ and C# also Python"
        );
    }

    #[test]
    fn test_exact_extraction_case_insensitive() {
        let extractor = extractor();
        let skills = extractor.extract_candidate_skills("Experienced in python and sql.");
        assert_eq!(skills, vec!["Python", "SQL"]);
    }

    #[test]
    fn test_single_letter_skill_needs_word_boundary() {
        let extractor = extractor();
        let skills = extractor.extract_candidate_skills("Strong marketing background");
        assert!(skills.is_empty());

        let skills = extractor.extract_candidate_skills("Data analysis in R and Python");
        assert_eq!(skills, vec!["R", "Python"]);
    }

    #[test]
    fn test_fuzzy_extraction_of_misspellings() {
        let extractor = extractor();
        let spans = extractor.extract("I know Pyhton well");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].skill, "Python");
        assert!(spans[0].confidence >= 0.8 && spans[0].confidence < 1.0);
    }

    #[test]
    fn test_multi_word_fuzzy_extraction() {
        let extractor = extractor();
        let spans = extractor.extract("background in machine lerning");
        assert!(spans.iter().any(|s| s.skill == "Machine Learning"));
    }

    #[test]
    fn test_overlap_keeps_highest_confidence() {
        let extractor = extractor();
        // "machine learning" matches exactly; fuzzy sub-spans of it must not
        // survive alongside.
        let spans = extractor.extract("machine learning");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].skill, "Machine Learning");
        assert_eq!(spans[0].confidence, 1.0);
    }

    #[test]
    fn test_candidates_dedup_in_mention_order() {
        let extractor = extractor();
        let skills =
            extractor.extract_candidate_skills("SQL queries, more SQL, then Python scripts");
        assert_eq!(skills, vec!["SQL", "Python"]);
    }

    #[test]
    fn test_empty_text() {
        let extractor = extractor();
        assert!(extractor.extract("").is_empty());
    }
}
