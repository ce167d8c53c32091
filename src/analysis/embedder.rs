//! Text embedding behind a trait seam
//!
//! The matcher only needs "string in, fixed-length vector out". The default
//! implementation wraps a Model2Vec static model; tests substitute a
//! deterministic stub. Any failure surfaces as `SkillGapError::Embedding` and
//! aborts the whole match call, never a partial result.

use crate::error::{Result, SkillGapError};
use log::info;
use model2vec_rs::model::StaticModel;
use std::path::Path;
use std::time::Instant;

pub trait TextEmbedder: Send + Sync {
    /// Embed a batch of texts, one vector per input, in input order.
    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    /// Embed a single text.
    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let mut batch = self.embed_batch(&[text.to_string()])?;
        batch
            .pop()
            .ok_or_else(|| SkillGapError::Embedding("embedder returned an empty batch".to_string()))
    }

    /// Identifier reported in analysis results.
    fn model_name(&self) -> &str;
}

/// Model2Vec-backed embedder. The same static model must have produced the
/// vocabulary snapshot, otherwise cosine scores are meaningless.
pub struct Model2VecEmbedder {
    model: StaticModel,
    model_name: String,
}

impl Model2VecEmbedder {
    pub async fn load(model_path: &Path, model_name: &str) -> Result<Self> {
        let start_time = Instant::now();

        let model = StaticModel::from_pretrained(
            model_path,
            None, // token
            None, // normalize
            None, // subfolder
        )
        .map_err(|e| {
            SkillGapError::Embedding(format!(
                "failed to load embedding model from {}: {}",
                model_path.display(),
                e
            ))
        })?;

        info!(
            "Loaded embedding model '{}' in {:.2?}",
            model_name,
            start_time.elapsed()
        );

        Ok(Self {
            model,
            model_name: model_name.to_string(),
        })
    }
}

impl TextEmbedder for Model2VecEmbedder {
    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(self.model.encode(texts))
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}

/// Placeholder embedder for callers that opt into lexical-only matching and
/// never load a model. Any semantic use is a hard error.
pub struct UnavailableEmbedder;

impl TextEmbedder for UnavailableEmbedder {
    fn embed_batch(&self, _texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Err(SkillGapError::Embedding(
            "no embedding model loaded; use lexical-only matching".to_string(),
        ))
    }

    fn model_name(&self) -> &str {
        "none"
    }
}
