//! Report formatters: console, JSON, and markdown
//!
//! The engine's report is plain data; everything presentation-flavored lives
//! here, including rounding, color, the nice-to-have truncation, and the
//! cumulative learning timeline.

use crate::analysis::engine::SkillGapReport;
use crate::analysis::learning_path::LearningPathBuilder;
use crate::config::OutputFormat;
use crate::error::Result;
use colored::Colorize;
use std::collections::BTreeSet;
use std::fmt::Write as _;

/// Console listings show at most this many nice-to-have skills unless the
/// detailed flag is set; the underlying report always carries the full list.
const NICE_TO_HAVE_PREVIEW: usize = 5;

pub trait ReportFormatter {
    fn format_report(&self, report: &SkillGapReport) -> Result<String>;
}

pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter;

/// Dispatches to the formatter matching the configured output format.
pub struct ReportRenderer {
    format: OutputFormat,
    detailed: bool,
    use_colors: bool,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self {
            use_colors,
            detailed,
        }
    }

    fn paint(&self, text: &str, color: &str) -> String {
        if !self.use_colors {
            return text.to_string();
        }
        match color {
            "green" => text.green().to_string(),
            "yellow" => text.yellow().to_string(),
            "red" => text.red().to_string(),
            "cyan" => text.cyan().to_string(),
            "blue" => text.blue().to_string(),
            "bold" => text.bold().to_string(),
            _ => text.to_string(),
        }
    }

    fn score_color(score: f32) -> &'static str {
        if score >= 80.0 {
            "green"
        } else if score >= 50.0 {
            "yellow"
        } else {
            "red"
        }
    }

    fn skill_list(skills: &BTreeSet<String>, limit: Option<usize>) -> String {
        let mut names: Vec<&str> = skills.iter().map(|s| s.as_str()).collect();
        let truncated = match limit {
            Some(limit) if names.len() > limit => {
                let hidden = names.len() - limit;
                names.truncate(limit);
                Some(hidden)
            }
            _ => None,
        };
        let mut line = names.join(", ");
        if let Some(hidden) = truncated {
            let _ = write!(line, " (+{} more)", hidden);
        }
        line
    }
}

impl ReportFormatter for ConsoleFormatter {
    fn format_report(&self, report: &SkillGapReport) -> Result<String> {
        let mut out = String::new();
        let gap = &report.gap;

        writeln!(out, "{}", self.paint("Skill Gap Analysis", "bold")).ok();
        writeln!(out, "Target job: {}", gap.target_job).ok();

        if gap.total_required == 0 {
            writeln!(out, "No requirement data for this job.").ok();
            return Ok(out);
        }

        let score_line = format!(
            "Proficiency: {:.1}% ({}/{} required skills)",
            gap.proficiency_score,
            gap.present_skills.len(),
            gap.total_required
        );
        writeln!(
            out,
            "{}",
            self.paint(&score_line, Self::score_color(gap.proficiency_score))
        )
        .ok();
        writeln!(out).ok();

        if !gap.present_skills.is_empty() {
            writeln!(
                out,
                "{} {}",
                self.paint("Present:", "green"),
                Self::skill_list(&gap.present_skills, None)
            )
            .ok();
        }
        if !gap.critical_missing.is_empty() {
            writeln!(
                out,
                "{} {}",
                self.paint("Critical missing:", "red"),
                Self::skill_list(&gap.critical_missing, None)
            )
            .ok();
        }
        if !gap.important_missing.is_empty() {
            writeln!(
                out,
                "{} {}",
                self.paint("Important missing:", "yellow"),
                Self::skill_list(&gap.important_missing, None)
            )
            .ok();
        }
        if !gap.nice_to_have_missing.is_empty() {
            let limit = (!self.detailed).then_some(NICE_TO_HAVE_PREVIEW);
            writeln!(
                out,
                "{} {}",
                self.paint("Nice to have:", "blue"),
                Self::skill_list(&gap.nice_to_have_missing, limit)
            )
            .ok();
        }

        if !gap.skill_categories.is_empty() {
            writeln!(out).ok();
            writeln!(out, "{}", self.paint("Skill areas", "bold")).ok();
            for (category, skills) in &gap.skill_categories {
                writeln!(out, "  {}: {}", category, Self::skill_list(skills, None)).ok();
            }
        }

        if !report.learning_path.is_empty() {
            writeln!(out).ok();
            writeln!(out, "{}", self.paint("Learning path", "bold")).ok();
            let timeline = LearningPathBuilder::cumulative_weeks(&report.learning_path);
            for (item, week) in report.learning_path.iter().zip(timeline) {
                let mut line = format!(
                    "  {} [{}] ~{} weeks (cumulative: {} weeks)",
                    item.skill, item.category, item.estimated_weeks, week
                );
                if !item.prerequisites.is_empty() {
                    let _ = write!(line, " (prerequisites: {})", item.prerequisites.join(", "));
                }
                writeln!(out, "{}", line).ok();
            }
            writeln!(
                out,
                "  Total: ~{} weeks",
                LearningPathBuilder::total_weeks(&report.learning_path)
            )
            .ok();
        }

        if self.detailed && !report.matches.is_empty() {
            writeln!(out).ok();
            writeln!(out, "{}", self.paint("Matches", "bold")).ok();
            for m in &report.matches {
                writeln!(
                    out,
                    "  '{}' -> '{}' ({:?}, {:.2})",
                    m.original_skill, m.matched_skill, m.match_type, m.confidence
                )
                .ok();
            }
        }

        if self.detailed {
            writeln!(out).ok();
            writeln!(
                out,
                "Model: {} | vocabulary: {} skills | threshold: {:.2} | {} ms",
                report.model_info.embedding_model,
                report.model_info.vocabulary_size,
                report.model_info.similarity_threshold,
                report.processing_time_ms
            )
            .ok();
        }

        Ok(out)
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl ReportFormatter for JsonFormatter {
    fn format_report(&self, report: &SkillGapReport) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(report)?
        } else {
            serde_json::to_string(report)?
        };
        Ok(json)
    }
}

impl MarkdownFormatter {
    pub fn new() -> Self {
        Self
    }

    fn skill_lines(out: &mut String, heading: &str, skills: &BTreeSet<String>) {
        if skills.is_empty() {
            return;
        }
        let _ = writeln!(out, "### {}\n", heading);
        for skill in skills {
            let _ = writeln!(out, "- {}", skill);
        }
        let _ = writeln!(out);
    }
}

impl Default for MarkdownFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for MarkdownFormatter {
    fn format_report(&self, report: &SkillGapReport) -> Result<String> {
        let mut out = String::new();
        let gap = &report.gap;

        writeln!(out, "# Skill Gap Analysis: {}\n", gap.target_job).ok();
        writeln!(
            out,
            "Generated {} by {}.\n",
            report.generated_at.format("%Y-%m-%d %H:%M UTC"),
            report.model_info.embedding_model
        )
        .ok();

        if gap.total_required == 0 {
            writeln!(out, "No requirement data for this job.").ok();
            return Ok(out);
        }

        writeln!(
            out,
            "**Proficiency: {:.1}%** ({} of {} required skills)\n",
            gap.proficiency_score,
            gap.present_skills.len(),
            gap.total_required
        )
        .ok();

        Self::skill_lines(&mut out, "Present", &gap.present_skills);
        Self::skill_lines(&mut out, "Critical missing", &gap.critical_missing);
        Self::skill_lines(&mut out, "Important missing", &gap.important_missing);
        Self::skill_lines(&mut out, "Nice to have", &gap.nice_to_have_missing);

        if !report.learning_path.is_empty() {
            writeln!(out, "## Learning path\n").ok();
            writeln!(out, "| # | Skill | Category | Weeks | Cumulative | Prerequisites |").ok();
            writeln!(out, "|---|-------|----------|-------|------------|---------------|").ok();
            let timeline = LearningPathBuilder::cumulative_weeks(&report.learning_path);
            for (idx, (item, week)) in report.learning_path.iter().zip(timeline).enumerate() {
                writeln!(
                    out,
                    "| {} | {} | {} | {} | {} | {} |",
                    idx + 1,
                    item.skill,
                    item.category,
                    item.estimated_weeks,
                    week,
                    item.prerequisites.join(", ")
                )
                .ok();
            }
        }

        Ok(out)
    }
}

impl ReportRenderer {
    pub fn new(format: OutputFormat, detailed: bool, use_colors: bool) -> Self {
        Self {
            format,
            detailed,
            use_colors,
        }
    }

    pub fn render(&self, report: &SkillGapReport) -> Result<String> {
        match self.format {
            OutputFormat::Console => {
                ConsoleFormatter::new(self.use_colors, self.detailed).format_report(report)
            }
            OutputFormat::Json => JsonFormatter::new(true).format_report(report),
            OutputFormat::Markdown => MarkdownFormatter::new().format_report(report),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::engine::ModelInfo;
    use crate::analysis::gap::{GapAnalysisResult, TechnicalCategory};
    use crate::analysis::learning_path::{LearningCategory, LearningPathItem};
    use crate::analysis::matcher::{MatchType, SkillMatch};
    use chrono::Utc;
    use std::collections::{BTreeMap, BTreeSet};

    fn set(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    fn sample_report() -> SkillGapReport {
        let mut skill_categories = BTreeMap::new();
        skill_categories.insert(
            TechnicalCategory::ProgrammingLanguages,
            set(&["Python", "SQL"]),
        );

        SkillGapReport {
            matches: vec![SkillMatch {
                original_skill: "python".to_string(),
                matched_skill: "Python".to_string(),
                confidence: 1.0,
                match_type: MatchType::Semantic,
            }],
            gap: GapAnalysisResult {
                target_job: "Data Analyst".to_string(),
                proficiency_score: 50.0,
                total_required: 2,
                present_skills: set(&["Python"]),
                missing_skills: set(&["SQL"]),
                critical_missing: set(&[]),
                important_missing: set(&["SQL"]),
                nice_to_have_missing: set(&[]),
                skill_categories,
            },
            learning_path: vec![LearningPathItem {
                skill: "SQL".to_string(),
                category: LearningCategory::Database,
                estimated_weeks: 4,
                prerequisites: vec![],
            }],
            processing_time_ms: 3,
            generated_at: Utc::now(),
            model_info: ModelInfo {
                embedding_model: "test-model".to_string(),
                vocabulary_size: 10,
                similarity_threshold: 0.7,
            },
        }
    }

    #[test]
    fn test_console_output_mentions_skills_and_score() {
        let formatter = ConsoleFormatter::new(false, false);
        let output = formatter.format_report(&sample_report()).unwrap();
        assert!(output.contains("Data Analyst"));
        assert!(output.contains("50.0%"));
        assert!(output.contains("Python"));
        assert!(output.contains("SQL"));
        assert!(output.contains("cumulative: 4 weeks"));
    }

    #[test]
    fn test_json_output_round_trips() {
        let formatter = JsonFormatter::new(false);
        let output = formatter.format_report(&sample_report()).unwrap();
        let parsed: SkillGapReport = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed.gap.target_job, "Data Analyst");
        assert_eq!(parsed.learning_path.len(), 1);
    }

    #[test]
    fn test_markdown_output_has_table() {
        let formatter = MarkdownFormatter::new();
        let output = formatter.format_report(&sample_report()).unwrap();
        assert!(output.contains("# Skill Gap Analysis: Data Analyst"));
        assert!(output.contains("| 1 | SQL | database | 4 | 4 |"));
    }

    #[test]
    fn test_nice_to_have_preview_truncation() {
        let mut report = sample_report();
        report.gap.nice_to_have_missing = set(&["A1", "B2", "C3", "D4", "E5", "F6", "G7"]);
        let formatter = ConsoleFormatter::new(false, false);
        let output = formatter.format_report(&report).unwrap();
        assert!(output.contains("(+2 more)"));
    }
}
