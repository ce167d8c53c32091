//! Job Requirement Table: job profession -> required skills with flags
//!
//! Loaded once from the job-skill mapping snapshot and immutable afterwards.
//! The hot-technology and in-demand flags on each entry drive the importance
//! tiers assigned to missing skills during gap analysis.

use crate::data::snapshot::read_json;
use crate::error::Result;
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// One requirement row for a job. A skill may appear in several rows (once
/// per task it supports); dedup happens in [`JobProfile::required_skills`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobSkillEntry {
    pub skill: String,
    #[serde(default)]
    pub is_hot_technology: bool,
    #[serde(default)]
    pub is_in_demand: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobProfile {
    pub skills: Vec<JobSkillEntry>,
}

/// A deduplicated requirement with flags merged across duplicate rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredSkill {
    pub name: String,
    pub is_hot_technology: bool,
    pub is_in_demand: bool,
}

impl JobProfile {
    /// Required skills in first-occurrence order, deduplicated by name.
    /// Flags are OR'd across duplicate rows: a skill is hot or in-demand if
    /// any of its rows says so.
    pub fn required_skills(&self) -> Vec<RequiredSkill> {
        let mut required: Vec<RequiredSkill> = Vec::new();
        for entry in &self.skills {
            if let Some(existing) = required.iter_mut().find(|r| r.name == entry.skill) {
                existing.is_hot_technology |= entry.is_hot_technology;
                existing.is_in_demand |= entry.is_in_demand;
            } else {
                required.push(RequiredSkill {
                    name: entry.skill.clone(),
                    is_hot_technology: entry.is_hot_technology,
                    is_in_demand: entry.is_in_demand,
                });
            }
        }
        required
    }
}

pub struct JobRequirementTable {
    jobs: HashMap<String, JobProfile>,
}

impl JobRequirementTable {
    /// Load the table from a job-skill mapping snapshot file.
    pub fn load(path: &Path) -> Result<Self> {
        let jobs: HashMap<String, JobProfile> = read_json(path)?;
        info!("Loaded requirements for {} job professions", jobs.len());
        Ok(Self { jobs })
    }

    pub fn from_map(jobs: HashMap<String, JobProfile>) -> Self {
        Self { jobs }
    }

    /// Requirement profile for a job, or `None` when the job is unknown.
    /// Unknown jobs are a warning condition for callers, never an error.
    pub fn profile(&self, job_name: &str) -> Option<&JobProfile> {
        self.jobs.get(job_name)
    }

    /// All known job professions, sorted for stable presentation.
    pub fn available_jobs(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.jobs.keys().map(|k| k.as_str()).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(skill: &str, hot: bool, in_demand: bool) -> JobSkillEntry {
        JobSkillEntry {
            skill: skill.to_string(),
            is_hot_technology: hot,
            is_in_demand: in_demand,
            task: None,
        }
    }

    #[test]
    fn test_required_skills_dedup_preserves_order() {
        let profile = JobProfile {
            skills: vec![
                entry("Python", false, true),
                entry("SQL", false, false),
                entry("Python", true, false),
            ],
        };

        let required = profile.required_skills();
        assert_eq!(required.len(), 2);
        assert_eq!(required[0].name, "Python");
        assert_eq!(required[1].name, "SQL");
        // Flags merged across the duplicate Python rows.
        assert!(required[0].is_hot_technology);
        assert!(required[0].is_in_demand);
    }

    #[test]
    fn test_profile_lookup() {
        let mut jobs = HashMap::new();
        jobs.insert(
            "Data Analyst".to_string(),
            JobProfile {
                skills: vec![entry("SQL", false, true)],
            },
        );
        let table = JobRequirementTable::from_map(jobs);

        assert!(table.profile("Data Analyst").is_some());
        assert!(table.profile("Astronaut").is_none());
    }

    #[test]
    fn test_available_jobs_sorted() {
        let mut jobs = HashMap::new();
        jobs.insert("Web Developer".to_string(), JobProfile::default());
        jobs.insert("Data Analyst".to_string(), JobProfile::default());
        let table = JobRequirementTable::from_map(jobs);

        assert_eq!(table.available_jobs(), vec!["Data Analyst", "Web Developer"]);
    }

    #[test]
    fn test_entry_parses_with_default_flags() {
        let json = r#"{"skill": "Python"}"#;
        let entry: JobSkillEntry = serde_json::from_str(json).unwrap();
        assert!(!entry.is_hot_technology);
        assert!(!entry.is_in_demand);
        assert!(entry.task.is_none());
    }
}
