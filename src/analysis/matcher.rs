//! Skill Matcher: reconcile raw candidate strings against the vocabulary
//!
//! Each candidate gets one shot at a canonical match: the better of its best
//! semantic cosine score and its best lexical ratio. Candidates below the
//! similarity threshold on both axes are dropped without comment; unmatched
//! skills are simply absent from the result.

use crate::analysis::embedder::TextEmbedder;
use crate::data::vocabulary::SkillVocabulary;
use crate::error::{Result, SkillGapError};
use log::debug;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillMatch {
    pub original_skill: String,
    pub matched_skill: String,
    pub confidence: f32,
    pub match_type: MatchType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    Semantic,
    Fuzzy,
}

pub struct SkillMatcher {
    vocabulary: Arc<SkillVocabulary>,
    embedder: Arc<dyn TextEmbedder>,
    similarity_threshold: f32,
}

impl SkillMatcher {
    pub fn new(
        vocabulary: Arc<SkillVocabulary>,
        embedder: Arc<dyn TextEmbedder>,
        similarity_threshold: f32,
    ) -> Self {
        Self {
            vocabulary,
            embedder,
            similarity_threshold: similarity_threshold.clamp(0.0, 1.0),
        }
    }

    pub fn similarity_threshold(&self) -> f32 {
        self.similarity_threshold
    }

    pub fn vocabulary(&self) -> &SkillVocabulary {
        &self.vocabulary
    }

    /// Match candidate skills against the vocabulary using the better of
    /// semantic and lexical similarity per candidate.
    ///
    /// All candidates are embedded in a single batch call. An embedding
    /// failure aborts the whole call; a caller that wants to degrade to
    /// lexical matching does so explicitly via
    /// [`SkillMatcher::match_skills_lexical_only`].
    pub fn match_skills(&self, candidate_skills: &[String]) -> Result<Vec<SkillMatch>> {
        if candidate_skills.is_empty() {
            return Ok(Vec::new());
        }

        let embeddings = self.embedder.embed_batch(candidate_skills)?;
        if embeddings.len() != candidate_skills.len() {
            return Err(SkillGapError::Embedding(format!(
                "embedder returned {} vectors for {} inputs",
                embeddings.len(),
                candidate_skills.len()
            )));
        }

        let mut matches = Vec::new();
        for (candidate, embedding) in candidate_skills.iter().zip(&embeddings) {
            let (semantic_name, semantic_score) =
                self.vocabulary.nearest_by_similarity(embedding)?;
            let (fuzzy_name, fuzzy_score) = self.vocabulary.nearest_by_lexical(candidate);

            // Semantic wins ties.
            let (matched_skill, confidence, match_type) = if semantic_score >= fuzzy_score {
                (semantic_name, semantic_score, MatchType::Semantic)
            } else {
                (fuzzy_name, fuzzy_score, MatchType::Fuzzy)
            };

            if confidence >= self.similarity_threshold {
                debug!(
                    "matched '{}' -> '{}' ({:?}, {:.3})",
                    candidate, matched_skill, match_type, confidence
                );
                matches.push(SkillMatch {
                    original_skill: candidate.clone(),
                    matched_skill: matched_skill.to_string(),
                    confidence,
                    match_type,
                });
            } else {
                debug!(
                    "no match for '{}' (best {:.3} below threshold {:.2})",
                    candidate, confidence, self.similarity_threshold
                );
            }
        }

        Ok(matches)
    }

    /// Lexical-only matching. Degraded mode for callers that cannot reach the
    /// embedding model; never entered automatically.
    pub fn match_skills_lexical_only(&self, candidate_skills: &[String]) -> Vec<SkillMatch> {
        let mut matches = Vec::new();
        for candidate in candidate_skills {
            let (matched_skill, ratio) = self.vocabulary.nearest_by_lexical(candidate);
            if ratio >= self.similarity_threshold {
                matches.push(SkillMatch {
                    original_skill: candidate.clone(),
                    matched_skill: matched_skill.to_string(),
                    confidence: ratio,
                    match_type: MatchType::Fuzzy,
                });
            }
        }
        matches
    }
}
