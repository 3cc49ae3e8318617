use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

use crate::analysis::AnalysisClient;
use crate::capture::photo;
use crate::config::AppConfig;
use crate::output;

/// Describe symptoms or submit a photo and get a triage recommendation.
#[derive(Parser)]
#[command(name = "symptom-triage")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Print the assessment as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Directory holding config.json
    #[arg(long, global = true, value_name = "DIR")]
    pub config_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a free-text symptom description
    Symptoms {
        /// What you are experiencing
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// Describe a photo in neutral terms
    Image {
        /// Path to the photo
        path: PathBuf,
    },

    /// Show where configuration lives and which mode is active
    Config,
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        let config_dir = self.config_dir.clone().unwrap_or_else(AppConfig::default_dir);
        let config = AppConfig::load(&config_dir);
        let client = AnalysisClient::from_config(&config);

        match self.command {
            Commands::Symptoms { text } => {
                let assessment = client.assess_symptoms(&text.join(" ")).await?;
                if self.json {
                    print_json(&assessment)?;
                } else {
                    output::print_symptom_assessment(&assessment);
                }
            }
            Commands::Image { path } => {
                let capture = photo::load_photo(&path, config.image_max_dimension)?;
                log::debug!("Prepared photo {}x{}", capture.width, capture.height);
                let assessment = client.assess_image(&capture.base64_image).await?;
                if self.json {
                    print_json(&assessment)?;
                } else {
                    output::print_image_assessment(&assessment);
                }
            }
            Commands::Config => {
                output::print_config(&config_dir, &config, client.mode());
            }
        }

        Ok(())
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize assessment")?;
    println!("{}", json);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symptoms_collects_all_words() {
        let cli = Cli::try_parse_from(["symptom-triage", "symptoms", "sore", "throat"]).unwrap();
        match cli.command {
            Commands::Symptoms { text } => assert_eq!(text.join(" "), "sore throat"),
            _ => panic!("expected symptoms command"),
        }
    }

    #[test]
    fn symptoms_requires_text() {
        assert!(Cli::try_parse_from(["symptom-triage", "symptoms"]).is_err());
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from([
            "symptom-triage",
            "image",
            "rash.jpg",
            "--json",
            "--config-dir",
            "/tmp/triage",
        ])
        .unwrap();
        assert!(cli.json);
        assert_eq!(cli.config_dir, Some(PathBuf::from("/tmp/triage")));
        assert!(matches!(cli.command, Commands::Image { .. }));
    }

    #[tokio::test]
    async fn config_command_runs_offline() {
        let dir = tempfile::tempdir().unwrap();
        let cli = Cli::try_parse_from([
            "symptom-triage",
            "config",
            "--config-dir",
            dir.path().to_str().unwrap(),
        ])
        .unwrap();
        cli.execute().await.unwrap();
        assert!(dir.path().join("config.json").exists());
    }
}
