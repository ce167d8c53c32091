//! Learning Path Builder: sequence missing skills into a study plan
//!
//! Skills are assigned a learning category by keyword lookup, then emitted
//! foundational-first in a fixed category order. Week estimates and
//! prerequisite chains come from small hard-coded domain tables, not from any
//! per-skill difficulty model.

use crate::analysis::keyword_matches;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Learning categories, declared in emission order (foundational first).
/// This is a separate vocabulary from the technical buckets of the gap
/// analyzer; the two taxonomies serve different outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LearningCategory {
    Programming,
    Database,
    Tools,
    DataScience,
    Web,
    Cloud,
    Other,
}

impl LearningCategory {
    /// Fixed study-time estimate per category, in weeks.
    pub fn estimated_weeks(self) -> u32 {
        match self {
            Self::Programming => 8,
            Self::DataScience => 12,
            Self::Web => 6,
            Self::Database => 4,
            Self::Cloud => 6,
            Self::Tools => 2,
            Self::Other => 4,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Programming => "programming",
            Self::Database => "database",
            Self::Tools => "tools",
            Self::DataScience => "data_science",
            Self::Web => "web",
            Self::Cloud => "cloud",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for LearningCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category assignment keywords in check order; first hit wins. Cloud is
/// checked before tools, so Docker lands in cloud.
const CATEGORY_KEYWORDS: &[(LearningCategory, &[&str])] = &[
    (
        LearningCategory::Programming,
        &["python", "java", "javascript", "c++", "r"],
    ),
    (
        LearningCategory::DataScience,
        &["machine learning", "deep learning", "statistics", "data analysis"],
    ),
    (
        LearningCategory::Web,
        &["html", "css", "react", "angular", "node.js"],
    ),
    (
        LearningCategory::Database,
        &["sql", "mysql", "postgresql", "mongodb"],
    ),
    (
        LearningCategory::Cloud,
        &["aws", "azure", "google cloud", "docker", "kubernetes"],
    ),
    (
        LearningCategory::Tools,
        &["git", "docker", "jenkins", "tableau"],
    ),
];

/// Prerequisite chains keyed by exact skill name. Skills absent from the
/// table have no prerequisites.
const PREREQUISITES: &[(&str, &[&str])] = &[
    ("Machine Learning", &["Python", "Statistics", "Mathematics"]),
    ("Deep Learning", &["Machine Learning", "Python", "TensorFlow"]),
    ("React", &["JavaScript", "HTML", "CSS"]),
    ("Node.js", &["JavaScript"]),
    ("Docker", &["Linux", "Command Line"]),
    ("Kubernetes", &["Docker", "Linux"]),
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearningPathItem {
    pub skill: String,
    pub category: LearningCategory,
    pub estimated_weeks: u32,
    pub prerequisites: Vec<String>,
}

#[derive(Debug, Default)]
pub struct LearningPathBuilder;

impl LearningPathBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Order skills into a learning sequence: grouped by category, categories
    /// emitted foundational-first, input order preserved within a category.
    pub fn build_path(&self, skills: &[String]) -> Vec<LearningPathItem> {
        let mut grouped: BTreeMap<LearningCategory, Vec<&String>> = BTreeMap::new();
        for skill in skills {
            grouped
                .entry(Self::categorize(skill))
                .or_default()
                .push(skill);
        }

        grouped
            .into_iter()
            .flat_map(|(category, group)| {
                group.into_iter().map(move |skill| LearningPathItem {
                    skill: skill.clone(),
                    category,
                    estimated_weeks: category.estimated_weeks(),
                    prerequisites: Self::prerequisites(skill),
                })
            })
            .collect()
    }

    /// Learning category for a skill, first keyword hit wins.
    pub fn categorize(skill: &str) -> LearningCategory {
        let skill_lower = skill.to_lowercase();
        for (category, keywords) in CATEGORY_KEYWORDS {
            if keywords.iter().any(|kw| keyword_matches(&skill_lower, kw)) {
                return *category;
            }
        }
        LearningCategory::Other
    }

    pub fn prerequisites(skill: &str) -> Vec<String> {
        PREREQUISITES
            .iter()
            .find(|(name, _)| *name == skill)
            .map(|(_, prereqs)| prereqs.iter().map(|p| p.to_string()).collect())
            .unwrap_or_default()
    }

    /// Running total of weeks in emission order, for timeline presentation.
    pub fn cumulative_weeks(path: &[LearningPathItem]) -> Vec<u32> {
        path.iter()
            .scan(0, |total, item| {
                *total += item.estimated_weeks;
                Some(*total)
            })
            .collect()
    }

    pub fn total_weeks(path: &[LearningPathItem]) -> u32 {
        path.iter().map(|item| item.estimated_weeks).sum()
    }
}
