//! Resume copilot: resume/JD match scoring CLI

use clap::Parser;
use colored::Colorize;
use log::{error, info};
use resume_copilot::cli::{self, Cli, Commands, ConfigAction, OutputFormat};
use resume_copilot::config::Config;
use resume_copilot::embedding::{CachedEmbedder, EmbeddingCache, LexicalEmbedder};
use resume_copilot::error::{Result, ResumeCopilotError};
use resume_copilot::scoring::{
    extract_resume_sections_text, score_resume, MatchReport, PartialScoreWeights, Route, Section,
};
use serde::Serialize;
use std::path::Path;
use std::process;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match load_config(cli.config.as_deref()) {
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

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

async fn run_command(command: Commands, config: Config) -> Result<()> {
    match command {
        Commands::Score {
            resume,
            jd,
            weights,
            output,
        } => {
            let output_format =
                cli::parse_output_format(&output).map_err(ResumeCopilotError::InvalidInput)?;
            score_command(&resume, &jd, weights.as_deref(), output_format, &config).await
        }
        Commands::Config { action } => {
            match action.unwrap_or(ConfigAction::Show) {
                ConfigAction::Show => {
                    let content = toml::to_string_pretty(&config).map_err(|e| {
                        ResumeCopilotError::Configuration(format!(
                            "Failed to serialize config: {}",
                            e
                        ))
                    })?;
                    println!("{}", content);
                }
                ConfigAction::Path => {
                    println!("{}", Config::config_path().display());
                }
            }
            Ok(())
        }
    }
}

#[derive(Debug, Serialize)]
struct ScoreReportOutput {
    generated_at: chrono::DateTime<chrono::Utc>,
    resume_path: String,
    jd_path: String,
    route: Route,
    #[serde(flatten)]
    report: MatchReport,
}

async fn score_command(
    resume_path: &Path,
    jd_path: &Path,
    weights_path: Option<&Path>,
    output_format: OutputFormat,
    config: &Config,
) -> Result<()> {
    info!(
        "Scoring {} against {}",
        resume_path.display(),
        jd_path.display()
    );

    let resume_raw = std::fs::read_to_string(resume_path)?;
    let resume: serde_json::Value = serde_json::from_str(&resume_raw)?;
    let jd_text = std::fs::read_to_string(jd_path)?;

    let sections = extract_resume_sections_text(&resume);
    info!(
        "Extracted section texts: summary={} skills={} experience={} education={} projects={} chars",
        sections.summary.len(),
        sections.skills.len(),
        sections.experience.len(),
        sections.education.len(),
        sections.projects.len()
    );

    let weights: PartialScoreWeights = match weights_path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)?;
            serde_json::from_str(&raw)?
        }
        None => config.scoring.weights.into(),
    };

    // Offline provider: a vocabulary fitted over this JD + resume pair
    let corpus = [
        jd_text.as_str(),
        &sections.summary,
        &sections.skills,
        &sections.experience,
        &sections.education,
        &sections.projects,
    ];
    let embedder = LexicalEmbedder::fit(&corpus);
    let cache = EmbeddingCache::new(config.embedding.cache_max_entries);
    let cached = CachedEmbedder::new(&embedder, &cache);

    let report = score_resume(&sections, &jd_text, Some(&weights), &cached).await?;
    let route = Route::decide(Some(report.score), config.scoring.route_threshold);

    match output_format {
        OutputFormat::Console => print_console_report(&report, route, config),
        OutputFormat::Json => {
            let output = ScoreReportOutput {
                generated_at: chrono::Utc::now(),
                resume_path: resume_path.display().to_string(),
                jd_path: jd_path.display().to_string(),
                route,
                report,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}

fn print_console_report(report: &MatchReport, route: Route, config: &Config) {
    let pct = |v: f64| format!("{:.1}%", v * 100.0);

    println!("\n{}", "Match score".bold());
    let score_text = pct(report.score);
    let score_colored = if report.score >= config.scoring.route_threshold {
        score_text.green().bold()
    } else {
        score_text.yellow().bold()
    };
    println!("  overall: {}", score_colored);

    println!("\n{}", "Section breakdown".bold());
    for section in Section::ALL {
        println!(
            "  {:<12} {:>7}  (weight {})",
            section.as_str(),
            pct(report.breakdown.get(section)),
            pct(report.weights.get(section))
        );
    }

    let route_text = match route {
        Route::End => "match is strong enough, nothing to optimize".green(),
        Route::Optimize => "below threshold, routing to resume optimization".yellow(),
        Route::Chat => "no score available, keep chatting".normal(),
    };
    println!(
        "\nRouting (threshold {}): {}",
        pct(config.scoring.route_threshold),
        route_text
    );
}
