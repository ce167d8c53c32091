//! Skill Vocabulary Index: canonical skill names and their embeddings
//!
//! Built once at startup from a [`SkillEmbeddingSnapshot`] and never mutated
//! afterwards, so it can be shared behind an `Arc` by any number of
//! concurrent analysis requests. A hot reload must build a fresh index and
//! swap the `Arc`, never touch an existing one.

use crate::data::snapshot::SkillEmbeddingSnapshot;
use crate::error::{Result, SkillGapError};
use log::info;
use std::path::Path;
use strsim::normalized_damerau_levenshtein;

pub struct SkillVocabulary {
    skills: Vec<String>,
    embeddings: Vec<Vec<f32>>,
    dimension: usize,
}

impl SkillVocabulary {
    /// Load the vocabulary from a skill-embedding snapshot file.
    pub fn load(path: &Path) -> Result<Self> {
        let snapshot = SkillEmbeddingSnapshot::load(path)?;
        let vocabulary = Self::from_snapshot(snapshot)?;
        info!(
            "Loaded embeddings for {} skills (dimension {})",
            vocabulary.len(),
            vocabulary.dimension()
        );
        Ok(vocabulary)
    }

    /// Validate and index a snapshot. Name/embedding count mismatch, an empty
    /// skill list, or ragged embedding dimensions abort startup.
    pub fn from_snapshot(snapshot: SkillEmbeddingSnapshot) -> Result<Self> {
        let SkillEmbeddingSnapshot { skills, embeddings } = snapshot;

        if skills.len() != embeddings.len() {
            return Err(SkillGapError::DataIntegrity(format!(
                "skill count ({}) does not match embedding count ({})",
                skills.len(),
                embeddings.len()
            )));
        }
        if skills.is_empty() {
            return Err(SkillGapError::DataIntegrity(
                "skill vocabulary snapshot is empty".to_string(),
            ));
        }

        let dimension = embeddings[0].len();
        if dimension == 0 {
            return Err(SkillGapError::DataIntegrity(
                "skill embeddings have zero dimension".to_string(),
            ));
        }
        for (skill, embedding) in skills.iter().zip(&embeddings) {
            if embedding.len() != dimension {
                return Err(SkillGapError::DataIntegrity(format!(
                    "embedding for '{}' has dimension {} (expected {})",
                    skill,
                    embedding.len(),
                    dimension
                )));
            }
        }

        Ok(Self {
            skills,
            embeddings,
            dimension,
        })
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn skills(&self) -> &[String] {
        &self.skills
    }

    pub fn contains(&self, name: &str) -> bool {
        self.skills.iter().any(|s| s == name)
    }

    /// Best semantic match for a query vector: linear cosine scan over the
    /// full vocabulary. The vocabulary is small enough that no ANN structure
    /// is warranted.
    pub fn nearest_by_similarity(&self, query: &[f32]) -> Result<(&str, f32)> {
        if query.len() != self.dimension {
            return Err(SkillGapError::Embedding(format!(
                "query embedding has dimension {} but vocabulary uses {}",
                query.len(),
                self.dimension
            )));
        }

        let mut best_idx = 0;
        let mut best_score = f32::MIN;
        for (idx, embedding) in self.embeddings.iter().enumerate() {
            let score = cosine_similarity(query, embedding);
            if score > best_score {
                best_score = score;
                best_idx = idx;
            }
        }
        Ok((&self.skills[best_idx], best_score))
    }

    /// Best lexical match for a query string: normalized edit-distance ratio
    /// in [0, 1] over lowercased names, linear scan. Transpositions count as
    /// one edit so common misspellings ("pyhton") still score high.
    pub fn nearest_by_lexical(&self, query: &str) -> (&str, f32) {
        let query_lower = query.to_lowercase();

        let mut best_idx = 0;
        let mut best_ratio = f32::MIN;
        for (idx, skill) in self.skills.iter().enumerate() {
            let ratio =
                normalized_damerau_levenshtein(&query_lower, &skill.to_lowercase()) as f32;
            if ratio > best_ratio {
                best_ratio = ratio;
                best_idx = idx;
            }
        }
        (&self.skills[best_idx], best_ratio)
    }
}

/// Cosine similarity between two equal-length vectors. Zero-norm vectors
/// score 0.0 rather than NaN.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot_product / (norm_a * norm_b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_vocabulary() -> SkillVocabulary {
        SkillVocabulary::from_snapshot(SkillEmbeddingSnapshot {
            skills: vec![
                "Python".to_string(),
                "SQL".to_string(),
                "Machine Learning".to_string(),
            ],
            embeddings: vec![
                vec![1.0, 0.0, 0.0],
                vec![0.0, 1.0, 0.0],
                vec![0.0, 0.0, 1.0],
            ],
        })
        .unwrap()
    }

    #[test]
    fn test_rejects_count_mismatch() {
        let result = SkillVocabulary::from_snapshot(SkillEmbeddingSnapshot {
            skills: vec!["Python".to_string(), "SQL".to_string()],
            embeddings: vec![vec![1.0, 0.0]],
        });
        assert!(matches!(result, Err(SkillGapError::DataIntegrity(_))));
    }

    #[test]
    fn test_rejects_empty_vocabulary() {
        let result = SkillVocabulary::from_snapshot(SkillEmbeddingSnapshot {
            skills: vec![],
            embeddings: vec![],
        });
        assert!(matches!(result, Err(SkillGapError::DataIntegrity(_))));
    }

    #[test]
    fn test_rejects_ragged_dimensions() {
        let result = SkillVocabulary::from_snapshot(SkillEmbeddingSnapshot {
            skills: vec!["Python".to_string(), "SQL".to_string()],
            embeddings: vec![vec![1.0, 0.0], vec![0.0]],
        });
        assert!(matches!(result, Err(SkillGapError::DataIntegrity(_))));
    }

    #[test]
    fn test_nearest_by_similarity() {
        let vocabulary = sample_vocabulary();
        let (name, score) = vocabulary.nearest_by_similarity(&[0.9, 0.1, 0.0]).unwrap();
        assert_eq!(name, "Python");
        assert!(score > 0.9);
    }

    #[test]
    fn test_nearest_by_similarity_dimension_mismatch() {
        let vocabulary = sample_vocabulary();
        let result = vocabulary.nearest_by_similarity(&[1.0, 0.0]);
        assert!(matches!(result, Err(SkillGapError::Embedding(_))));
    }

    #[test]
    fn test_nearest_by_lexical_case_insensitive_exact() {
        let vocabulary = sample_vocabulary();
        let (name, ratio) = vocabulary.nearest_by_lexical("python");
        assert_eq!(name, "Python");
        assert_eq!(ratio, 1.0);
    }

    #[test]
    fn test_nearest_by_lexical_misspelling() {
        let vocabulary = sample_vocabulary();
        let (name, ratio) = vocabulary.nearest_by_lexical("pyhton");
        assert_eq!(name, "Python");
        // One transposition over six characters.
        assert!((ratio - 0.833).abs() < 0.01);
        assert!(ratio >= 0.7);
    }

    #[test]
    fn test_cosine_similarity_zero_norm() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
    }

    #[test]
    fn test_cosine_similarity_identical() {
        let similarity = cosine_similarity(&[0.5, 0.5], &[0.5, 0.5]);
        assert!((similarity - 1.0).abs() < 1e-6);
    }
}
