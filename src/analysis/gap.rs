//! Gap Analyzer: compare matched skills against a job's requirements
//!
//! Partitions the job's required skills into present and missing, tiers the
//! missing ones by the hot-technology / in-demand flags, computes the
//! proficiency percentage, and buckets every required skill into a fixed
//! technical taxonomy for presentation.

use crate::analysis::keyword_matches;
use crate::data::jobs::JobRequirementTable;
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

/// Fixed technical buckets, declared in check priority order. A skill
/// matching several buckets lands in the first one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TechnicalCategory {
    #[serde(rename = "Programming Languages")]
    ProgrammingLanguages,
    #[serde(rename = "Machine Learning/AI")]
    MachineLearningAi,
    #[serde(rename = "Web Technologies")]
    WebTechnologies,
    #[serde(rename = "Databases")]
    Databases,
    #[serde(rename = "Cloud & DevOps")]
    CloudDevOps,
    #[serde(rename = "Data Analysis")]
    DataAnalysis,
    #[serde(rename = "Other")]
    Other,
}

impl TechnicalCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ProgrammingLanguages => "Programming Languages",
            Self::MachineLearningAi => "Machine Learning/AI",
            Self::WebTechnologies => "Web Technologies",
            Self::Databases => "Databases",
            Self::CloudDevOps => "Cloud & DevOps",
            Self::DataAnalysis => "Data Analysis",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for TechnicalCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const BUCKET_KEYWORDS: &[(TechnicalCategory, &[&str])] = &[
    (
        TechnicalCategory::ProgrammingLanguages,
        &["python", "java", "javascript", "c++", "r", "sql"],
    ),
    (
        TechnicalCategory::MachineLearningAi,
        &["machine learning", "deep learning", "tensorflow", "scikit", "neural"],
    ),
    (
        TechnicalCategory::WebTechnologies,
        &["html", "css", "react", "angular", "node", "express"],
    ),
    (
        TechnicalCategory::Databases,
        &["mysql", "postgresql", "mongodb", "database", "sql"],
    ),
    (
        TechnicalCategory::CloudDevOps,
        &["aws", "azure", "cloud", "docker", "kubernetes"],
    ),
    (
        TechnicalCategory::DataAnalysis,
        &["tableau", "power bi", "excel", "analytics", "statistics"],
    ),
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GapAnalysisResult {
    pub target_job: String,
    /// Percentage of required skills covered, in [0, 100]. Unrounded;
    /// rounding is a presentation concern.
    pub proficiency_score: f32,
    pub total_required: usize,
    pub present_skills: BTreeSet<String>,
    pub missing_skills: BTreeSet<String>,
    pub critical_missing: BTreeSet<String>,
    pub important_missing: BTreeSet<String>,
    pub nice_to_have_missing: BTreeSet<String>,
    /// Required skills (present and missing) grouped by technical bucket.
    /// Empty buckets are omitted.
    pub skill_categories: BTreeMap<TechnicalCategory, BTreeSet<String>>,
}

impl GapAnalysisResult {
    fn empty(target_job: &str) -> Self {
        Self {
            target_job: target_job.to_string(),
            proficiency_score: 0.0,
            total_required: 0,
            present_skills: BTreeSet::new(),
            missing_skills: BTreeSet::new(),
            critical_missing: BTreeSet::new(),
            important_missing: BTreeSet::new(),
            nice_to_have_missing: BTreeSet::new(),
            skill_categories: BTreeMap::new(),
        }
    }
}

pub struct GapAnalyzer {
    jobs: Arc<JobRequirementTable>,
}

impl GapAnalyzer {
    pub fn new(jobs: Arc<JobRequirementTable>) -> Self {
        Self { jobs }
    }

    /// Analyze matched skills against a job's requirement profile.
    ///
    /// An unknown job logs a warning and returns the zero/empty result so
    /// callers can render "no data for this job" without special-casing.
    pub fn analyze(
        &self,
        matched_skill_names: &BTreeSet<String>,
        target_job: &str,
    ) -> GapAnalysisResult {
        let Some(profile) = self.jobs.profile(target_job) else {
            warn!("Job profession '{}' not found in requirement table", target_job);
            return GapAnalysisResult::empty(target_job);
        };

        let required = profile.required_skills();
        let total_required = required.len();

        let mut present_skills = BTreeSet::new();
        let mut missing_skills = BTreeSet::new();
        let mut critical_missing = BTreeSet::new();
        let mut important_missing = BTreeSet::new();
        let mut nice_to_have_missing = BTreeSet::new();

        for requirement in &required {
            if matched_skill_names.contains(&requirement.name) {
                present_skills.insert(requirement.name.clone());
                continue;
            }
            missing_skills.insert(requirement.name.clone());
            match (requirement.is_hot_technology, requirement.is_in_demand) {
                (true, true) => critical_missing.insert(requirement.name.clone()),
                (false, false) => nice_to_have_missing.insert(requirement.name.clone()),
                _ => important_missing.insert(requirement.name.clone()),
            };
        }

        let proficiency_score =
            (present_skills.len() as f32 / total_required.max(1) as f32) * 100.0;

        let skill_categories = categorize_skills(present_skills.iter().chain(&missing_skills));

        GapAnalysisResult {
            target_job: target_job.to_string(),
            proficiency_score,
            total_required,
            present_skills,
            missing_skills,
            critical_missing,
            important_missing,
            nice_to_have_missing,
            skill_categories,
        }
    }
}

/// Assign a skill to its technical bucket, first keyword hit wins.
pub fn categorize_skill(skill: &str) -> TechnicalCategory {
    let skill_lower = skill.to_lowercase();
    for (category, keywords) in BUCKET_KEYWORDS {
        if keywords.iter().any(|kw| keyword_matches(&skill_lower, kw)) {
            return *category;
        }
    }
    TechnicalCategory::Other
}

fn categorize_skills<'a>(
    skills: impl Iterator<Item = &'a String>,
) -> BTreeMap<TechnicalCategory, BTreeSet<String>> {
    let mut categories: BTreeMap<TechnicalCategory, BTreeSet<String>> = BTreeMap::new();
    for skill in skills {
        categories
            .entry(categorize_skill(skill))
            .or_default()
            .insert(skill.clone());
    }
    categories
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::jobs::{JobProfile, JobSkillEntry};
    use std::collections::HashMap;

    fn entry(skill: &str, hot: bool, in_demand: bool) -> JobSkillEntry {
        JobSkillEntry {
            skill: skill.to_string(),
            is_hot_technology: hot,
            is_in_demand: in_demand,
            task: None,
        }
    }

    fn analyzer(jobs: Vec<(&str, Vec<JobSkillEntry>)>) -> GapAnalyzer {
        let map: HashMap<String, JobProfile> = jobs
            .into_iter()
            .map(|(name, skills)| (name.to_string(), JobProfile { skills }))
            .collect();
        GapAnalyzer::new(Arc::new(JobRequirementTable::from_map(map)))
    }

    fn matched(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_unknown_job_returns_empty_result() {
        let analyzer = analyzer(vec![]);
        let result = analyzer.analyze(&matched(&["Python"]), "Astronaut");
        assert_eq!(result.target_job, "Astronaut");
        assert_eq!(result.total_required, 0);
        assert_eq!(result.proficiency_score, 0.0);
        assert!(result.present_skills.is_empty());
        assert!(result.missing_skills.is_empty());
    }

    #[test]
    fn test_full_coverage() {
        let analyzer = analyzer(vec![(
            "Data Analyst",
            vec![entry("Python", false, true), entry("SQL", false, true)],
        )]);
        let result = analyzer.analyze(&matched(&["Python", "SQL"]), "Data Analyst");
        assert_eq!(result.proficiency_score, 100.0);
        assert_eq!(result.present_skills, matched(&["Python", "SQL"]));
        assert!(result.missing_skills.is_empty());
    }

    #[test]
    fn test_partition_and_tiers() {
        let analyzer = analyzer(vec![(
            "Data Scientist",
            vec![
                entry("Python", false, true),
                entry("SQL", false, true),
                entry("Machine Learning", true, true),
                entry("Excel", false, false),
            ],
        )]);
        let result = analyzer.analyze(&matched(&["Python"]), "Data Scientist");

        assert_eq!(result.total_required, 4);
        assert_eq!(result.present_skills, matched(&["Python"]));
        assert_eq!(
            result.missing_skills,
            matched(&["SQL", "Machine Learning", "Excel"])
        );
        assert_eq!(result.critical_missing, matched(&["Machine Learning"]));
        assert_eq!(result.important_missing, matched(&["SQL"]));
        assert_eq!(result.nice_to_have_missing, matched(&["Excel"]));
        assert!((result.proficiency_score - 25.0).abs() < 1e-6);

        // Invariants: tiers partition the missing set, present and missing
        // are disjoint and cover the requirements.
        let mut tier_union = BTreeSet::new();
        tier_union.extend(result.critical_missing.iter().cloned());
        tier_union.extend(result.important_missing.iter().cloned());
        tier_union.extend(result.nice_to_have_missing.iter().cloned());
        assert_eq!(tier_union, result.missing_skills);
        assert!(result.present_skills.is_disjoint(&result.missing_skills));
        assert_eq!(
            result.present_skills.len() + result.missing_skills.len(),
            result.total_required
        );
    }

    #[test]
    fn test_duplicate_requirements_deduped_before_scoring() {
        let analyzer = analyzer(vec![(
            "Data Analyst",
            vec![
                entry("SQL", false, true),
                entry("SQL", false, true),
                entry("Python", false, false),
            ],
        )]);
        let result = analyzer.analyze(&matched(&["SQL", "Python"]), "Data Analyst");
        assert_eq!(result.total_required, 2);
        assert_eq!(result.proficiency_score, 100.0);
    }

    #[test]
    fn test_bucket_priority_order() {
        // SQL hits both the programming and database keyword lists; the
        // programming bucket is checked first.
        assert_eq!(
            categorize_skill("SQL"),
            TechnicalCategory::ProgrammingLanguages
        );
        assert_eq!(categorize_skill("Machine Learning"), TechnicalCategory::MachineLearningAi);
        assert_eq!(categorize_skill("Docker"), TechnicalCategory::CloudDevOps);
        assert_eq!(categorize_skill("PostgreSQL"), TechnicalCategory::ProgrammingLanguages);
        assert_eq!(categorize_skill("Tableau"), TechnicalCategory::DataAnalysis);
        assert_eq!(categorize_skill("Knitting"), TechnicalCategory::Other);
    }

    #[test]
    fn test_single_letter_keyword_requires_exact_match() {
        assert_eq!(categorize_skill("R"), TechnicalCategory::ProgrammingLanguages);
        // "Power BI" contains the letter r but is not the R language.
        assert_eq!(categorize_skill("Power BI"), TechnicalCategory::DataAnalysis);
    }

    #[test]
    fn test_empty_buckets_omitted() {
        let analyzer = analyzer(vec![(
            "Data Analyst",
            vec![entry("Python", false, true)],
        )]);
        let result = analyzer.analyze(&matched(&[]), "Data Analyst");
        assert_eq!(result.skill_categories.len(), 1);
        assert!(result
            .skill_categories
            .contains_key(&TechnicalCategory::ProgrammingLanguages));
    }
}
