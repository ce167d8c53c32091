//! Skill gap analyzer: match candidate skills to job requirements and plan
//! the learning path for whatever is missing

use clap::Parser;
use log::{error, info, warn};
use skill_gap_analyzer::analysis::embedder::{Model2VecEmbedder, TextEmbedder, UnavailableEmbedder};
use skill_gap_analyzer::analysis::engine::{AnalysisEngine, MatchingMode};
use skill_gap_analyzer::cli::{self, Cli, Commands, ConfigAction};
use skill_gap_analyzer::config::Config;
use skill_gap_analyzer::data::jobs::JobRequirementTable;
use skill_gap_analyzer::data::vocabulary::SkillVocabulary;
use skill_gap_analyzer::error::{Result, SkillGapError};
use skill_gap_analyzer::extract::extractor::SkillTextExtractor;
use skill_gap_analyzer::output::ReportRenderer;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match load_config(cli.config.clone()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

fn load_config(path: Option<PathBuf>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(&path),
        None => Config::load(),
    }
}

async fn run_command(command: Commands, config: Config) -> Result<()> {
    match command {
        Commands::Analyze {
            skills,
            skills_file,
            job,
            output,
            save,
            detailed,
            lexical_only,
        } => {
            let output_format = cli::parse_output_format(&output).map_err(SkillGapError::InvalidInput)?;

            let candidate_skills = gather_candidate_skills(skills, skills_file)?;
            if candidate_skills.is_empty() {
                return Err(SkillGapError::InvalidInput(
                    "no candidate skills given; use --skills or --skills-file".to_string(),
                ));
            }

            info!(
                "Analyzing {} candidate skills for '{}'",
                candidate_skills.len(),
                job
            );

            let vocabulary = Arc::new(SkillVocabulary::load(&config.data.skill_embeddings_path)?);
            let jobs = Arc::new(JobRequirementTable::load(&config.data.job_mapping_path)?);

            let (embedder, mode): (Arc<dyn TextEmbedder>, MatchingMode) = if lexical_only {
                warn!("Semantic matching disabled; lexical matching only");
                (Arc::new(UnavailableEmbedder), MatchingMode::LexicalOnly)
            } else {
                let embedder = Model2VecEmbedder::load(
                    &config.embedding_model_path(),
                    &config.models.default_embedding_model,
                )
                .await?;
                (Arc::new(embedder), MatchingMode::Hybrid)
            };

            let engine = AnalysisEngine::new(
                vocabulary,
                jobs,
                embedder,
                config.matching.similarity_threshold,
            );
            let report = engine.analyze_with_mode(&candidate_skills, &job, mode)?;

            let renderer = ReportRenderer::new(
                output_format,
                detailed || config.output.detailed,
                config.output.color_output && save.is_none(),
            );
            let rendered = renderer.render(&report)?;

            match save {
                Some(path) => {
                    std::fs::write(&path, &rendered)?;
                    println!("Report saved to {}", path.display());
                }
                None => println!("{}", rendered),
            }
            Ok(())
        }

        Commands::Extract { file, json } => {
            let text = std::fs::read_to_string(&file)?;
            let vocabulary = Arc::new(SkillVocabulary::load(&config.data.skill_embeddings_path)?);
            let extractor =
                SkillTextExtractor::new(vocabulary, config.matching.extraction_threshold)?;

            let spans = extractor.extract(&text);
            if json {
                println!("{}", serde_json::to_string_pretty(&spans)?);
            } else if spans.is_empty() {
                println!("No known skills found in {}", file.display());
            } else {
                println!("Skills found in {}:", file.display());
                for span in &spans {
                    println!("  {} (confidence {:.2})", span.skill, span.confidence);
                }
            }
            Ok(())
        }

        Commands::Jobs => {
            let jobs = JobRequirementTable::load(&config.data.job_mapping_path)?;
            let names = jobs.available_jobs();
            if names.is_empty() {
                println!("No job professions in the requirement table.");
            } else {
                println!("{} job professions:", names.len());
                for name in names {
                    println!("  {}", name);
                }
            }
            Ok(())
        }

        Commands::Config { action } => {
            match action.unwrap_or(ConfigAction::Show) {
                ConfigAction::Show => {
                    let content = toml::to_string_pretty(&config).map_err(|e| {
                        SkillGapError::Configuration(format!("Failed to serialize config: {}", e))
                    })?;
                    println!("# {}", Config::config_path().display());
                    println!("{}", content);
                }
                ConfigAction::Reset => {
                    let defaults = Config::default();
                    defaults.save()?;
                    println!("Configuration reset to defaults.");
                }
            }
            Ok(())
        }
    }
}

/// Merge skills from the --skills flag and an optional skills file, trimming
/// blanks and preserving order.
fn gather_candidate_skills(
    skills: Vec<String>,
    skills_file: Option<PathBuf>,
) -> Result<Vec<String>> {
    let mut candidates: Vec<String> = skills
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    if let Some(path) = skills_file {
        let content = std::fs::read_to_string(&path)?;
        candidates.extend(
            content
                .lines()
                .map(|line| line.trim().to_string())
                .filter(|line| !line.is_empty()),
        );
    }

    Ok(candidates)
}
