//! Analysis engine: Match -> Analyze -> BuildPath pipeline
//!
//! Owns the three pipeline components and the static snapshots behind them.
//! Every call is an independent pure computation over the immutable
//! vocabulary and job tables; the engine keeps no cross-call state.

use crate::analysis::embedder::TextEmbedder;
use crate::analysis::gap::{GapAnalysisResult, GapAnalyzer};
use crate::analysis::learning_path::{LearningPathBuilder, LearningPathItem};
use crate::analysis::matcher::{SkillMatch, SkillMatcher};
use crate::data::jobs::JobRequirementTable;
use crate::data::vocabulary::SkillVocabulary;
use crate::error::Result;
use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Instant;

/// How candidate skills are reconciled against the vocabulary. Lexical-only
/// is the degraded mode for callers without a reachable embedding model; it
/// is never entered automatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchingMode {
    Hybrid,
    LexicalOnly,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfo {
    pub embedding_model: String,
    pub vocabulary_size: usize,
    pub similarity_threshold: f32,
}

/// Full output of one analysis run. The match list is returned alongside the
/// gap result for audit purposes even though only the matched names feed the
/// analyzer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillGapReport {
    pub matches: Vec<SkillMatch>,
    pub gap: GapAnalysisResult,
    pub learning_path: Vec<LearningPathItem>,
    pub processing_time_ms: u64,
    pub generated_at: DateTime<Utc>,
    pub model_info: ModelInfo,
}

pub struct AnalysisEngine {
    vocabulary: Arc<SkillVocabulary>,
    matcher: SkillMatcher,
    gap_analyzer: GapAnalyzer,
    path_builder: LearningPathBuilder,
    embedding_model: String,
}

impl AnalysisEngine {
    pub fn new(
        vocabulary: Arc<SkillVocabulary>,
        jobs: Arc<JobRequirementTable>,
        embedder: Arc<dyn TextEmbedder>,
        similarity_threshold: f32,
    ) -> Self {
        let embedding_model = embedder.model_name().to_string();
        Self {
            matcher: SkillMatcher::new(vocabulary.clone(), embedder, similarity_threshold),
            gap_analyzer: GapAnalyzer::new(jobs),
            path_builder: LearningPathBuilder::new(),
            vocabulary,
            embedding_model,
        }
    }

    /// Run the full pipeline with hybrid (semantic + lexical) matching.
    pub fn analyze(&self, candidate_skills: &[String], target_job: &str) -> Result<SkillGapReport> {
        self.analyze_with_mode(candidate_skills, target_job, MatchingMode::Hybrid)
    }

    pub fn analyze_with_mode(
        &self,
        candidate_skills: &[String],
        target_job: &str,
        mode: MatchingMode,
    ) -> Result<SkillGapReport> {
        let start_time = Instant::now();

        let matches = match mode {
            MatchingMode::Hybrid => self.matcher.match_skills(candidate_skills)?,
            MatchingMode::LexicalOnly => {
                self.matcher.match_skills_lexical_only(candidate_skills)
            }
        };

        let matched_names: BTreeSet<String> =
            matches.iter().map(|m| m.matched_skill.clone()).collect();

        let gap = self.gap_analyzer.analyze(&matched_names, target_job);

        // The full missing set feeds the path builder, most critical tier
        // first; any top-N truncation belongs to presentation.
        let path_input: Vec<String> = gap
            .critical_missing
            .iter()
            .chain(&gap.important_missing)
            .chain(&gap.nice_to_have_missing)
            .cloned()
            .collect();
        let learning_path = self.path_builder.build_path(&path_input);

        info!(
            "Analyzed {} candidate skills against '{}': {:.1}% proficiency, {} missing",
            candidate_skills.len(),
            target_job,
            gap.proficiency_score,
            gap.missing_skills.len()
        );

        Ok(SkillGapReport {
            matches,
            gap,
            learning_path,
            processing_time_ms: start_time.elapsed().as_millis() as u64,
            generated_at: Utc::now(),
            model_info: ModelInfo {
                embedding_model: self.embedding_model.clone(),
                vocabulary_size: self.vocabulary.len(),
                similarity_threshold: self.matcher.similarity_threshold(),
            },
        })
    }

    /// Analyze several candidate-skill sets against one job.
    pub fn batch_analyze(
        &self,
        skill_sets: &[Vec<String>],
        target_job: &str,
    ) -> Result<Vec<SkillGapReport>> {
        skill_sets
            .iter()
            .map(|skills| self.analyze(skills, target_job))
            .collect()
    }
}
