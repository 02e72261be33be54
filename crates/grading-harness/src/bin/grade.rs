//! `grade`: score an agent's artifact against a reference and print JSON.
//!
//! Any failure prints `{"score": 0.0, "error": "..."}` and exits with status 1.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use grading_harness::io::{load_mesh_config, load_scoring_config};
use grading_harness::{grade_feature_files, grade_mesh_files, FeatureGradeReport, MeshGradeReport};
use grading_types::{round_to, MeshScore};
use similarity::{MeshScoringConfig, ScoringConfig};

#[derive(Parser)]
#[command(name = "grade", about = "Similarity grading of CAD artifacts", version)]
struct Cli {
    /// Print a text report instead of JSON
    #[arg(long, global = true)]
    text: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compare two feature reports (JSON)
    Features {
        #[arg(long)]
        agent: PathBuf,
        #[arg(long)]
        reference: PathBuf,
        /// Scoring constants (JSON); missing keys keep their defaults
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Compare two triangle meshes (STL) by surface distance
    Mesh {
        #[arg(long)]
        agent: PathBuf,
        #[arg(long)]
        reference: PathBuf,
        /// Number of surface points sampled on the agent mesh
        #[arg(long)]
        samples: Option<usize>,
        /// Mesh scoring constants (JSON)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn rounded(score: &MeshScore) -> MeshScore {
    MeshScore {
        score: round_to(score.score, 4),
        mean_dist: round_to(score.mean_dist, 4),
        median_dist: round_to(score.median_dist, 4),
        max_dist: round_to(score.max_dist, 4),
        ratio_perfect: round_to(score.ratio_perfect, 4),
        ratio_acceptable: round_to(score.ratio_acceptable, 4),
        ..*score
    }
}

fn features(agent: &Path, reference: &Path, config: Option<&Path>, text: bool) -> Result<String> {
    let config = match config {
        Some(path) => load_scoring_config(path).context("loading scoring config")?,
        None => ScoringConfig::default(),
    };
    let grade = grade_feature_files(agent, reference, &config).context("feature-graph comparison failed")?;
    if text {
        let report = FeatureGradeReport::new(agent.display().to_string(), reference.display().to_string(), grade);
        return Ok(report.to_text());
    }
    Ok(serde_json::to_string_pretty(&grade)?)
}

fn mesh(agent: &Path, reference: &Path, samples: Option<usize>, config: Option<&Path>, text: bool) -> Result<String> {
    let mut config = match config {
        Some(path) => load_mesh_config(path).context("loading mesh config")?,
        None => MeshScoringConfig::default(),
    };
    if let Some(n) = samples {
        config.n_samples = n;
    }
    let score = grade_mesh_files(agent, reference, &config).context("mesh-distance comparison failed")?;
    if text {
        let report = MeshGradeReport::new(agent.display().to_string(), reference.display().to_string(), score);
        return Ok(report.to_text());
    }
    Ok(serde_json::to_string_pretty(&rounded(&score))?)
}

fn run(cli: &Cli) -> Result<String> {
    match &cli.command {
        Command::Features {
            agent,
            reference,
            config,
        } => features(agent, reference, config.as_deref(), cli.text),
        Command::Mesh {
            agent,
            reference,
            samples,
            config,
        } => mesh(agent, reference, *samples, config.as_deref(), cli.text),
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(out) => {
            println!("{}", out);
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("{:#}", err);
            let body = serde_json::json!({ "score": 0.0, "error": format!("{:#}", err) });
            println!("{}", body);
            ExitCode::FAILURE
        }
    }
}
