//! Configuration management for the skill gap analyzer

use crate::error::{Result, SkillGapError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub data: DataConfig,
    pub models: ModelConfig,
    pub matching: MatchingConfig,
    pub output: OutputConfig,
}

/// Locations of the two static snapshot files the analyzer reads at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    pub skill_embeddings_path: PathBuf,
    pub job_mapping_path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    pub models_dir: PathBuf,
    /// Must be the same model that produced the skill-embedding snapshot.
    pub default_embedding_model: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchingConfig {
    /// Minimum score (semantic or lexical) for a candidate skill to count as
    /// matched.
    pub similarity_threshold: f32,
    /// Acceptance threshold for fuzzy spans in text extraction.
    pub extraction_threshold: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".skill-gap-analyzer");

        Self {
            data: DataConfig {
                skill_embeddings_path: data_dir.join("data").join("skill_embeddings.json"),
                job_mapping_path: data_dir.join("data").join("job_skill_mapping.json"),
            },
            models: ModelConfig {
                models_dir: data_dir.join("models"),
                default_embedding_model: "minishlab/M2V_base_output".to_string(),
            },
            matching: MatchingConfig {
                similarity_threshold: 0.7,
                extraction_threshold: 0.8,
            },
            output: OutputConfig {
                format: OutputFormat::Console,
                detailed: false,
                color_output: true,
            },
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(config_path: &PathBuf) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = toml::from_str(&content).map_err(|e| {
                SkillGapError::Configuration(format!("Failed to parse config: {}", e))
            })?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            SkillGapError::Configuration(format!("Failed to serialize config: {}", e))
        })?;

        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("skill-gap-analyzer")
            .join("config.toml")
    }

    pub fn embedding_model_path(&self) -> PathBuf {
        let model_name = &self.models.default_embedding_model;
        let local_path = self.models.models_dir.join(model_name);
        if local_path.exists() {
            local_path
        } else {
            // Treated as a HuggingFace model ID by the embedding loader.
            PathBuf::from(model_name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_threshold() {
        let config = Config::default();
        assert_eq!(config.matching.similarity_threshold, 0.7);
        assert_eq!(config.matching.extraction_threshold, 0.8);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = Config::default();
        let serialized = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(
            parsed.matching.similarity_threshold,
            config.matching.similarity_threshold
        );
        assert_eq!(parsed.output.format, OutputFormat::Console);
    }

    #[test]
    fn test_missing_config_file_falls_back_to_defaults() {
        let config = Config::load_from(&PathBuf::from("/nonexistent/config.toml")).unwrap();
        assert_eq!(config.matching.similarity_threshold, 0.7);
    }
}
