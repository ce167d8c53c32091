//! On-disk snapshot formats for the static data files
//!
//! Two JSON files feed the analyzer: a skill-embedding snapshot (canonical
//! skill names plus one embedding vector per name) and a job-skill mapping
//! (job profession to required-skill entries with importance flags). Both are
//! produced offline by a preprocessing pipeline and are read-only here.

use crate::error::{Result, SkillGapError};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Precomputed skill vocabulary: `skills[i]` is described by `embeddings[i]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillEmbeddingSnapshot {
    pub skills: Vec<String>,
    pub embeddings: Vec<Vec<f32>>,
}

impl SkillEmbeddingSnapshot {
    pub fn load(path: &Path) -> Result<Self> {
        read_json(path)
    }
}

/// Read and parse a snapshot file. Parse failures are integrity errors: the
/// snapshot files are build artifacts, not user input.
pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|e| {
        SkillGapError::DataIntegrity(format!("malformed snapshot {}: {}", path.display(), e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_parses_original_format() {
        let json = r#"{
            "skills": ["Python", "SQL"],
            "embeddings": [[0.1, 0.2], [0.3, 0.4]]
        }"#;
        let snapshot: SkillEmbeddingSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.skills, vec!["Python", "SQL"]);
        assert_eq!(snapshot.embeddings.len(), 2);
        assert_eq!(snapshot.embeddings[0], vec![0.1, 0.2]);
    }

    #[test]
    fn test_snapshot_ignores_extra_fields() {
        // The preprocessing pipeline also writes a clean_skills list.
        let json = r#"{
            "skills": ["Python"],
            "clean_skills": ["python"],
            "embeddings": [[1.0]]
        }"#;
        let snapshot: SkillEmbeddingSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.skills.len(), 1);
    }
}
