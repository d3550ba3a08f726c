//! Command-line interface for crisisguard.
//!
//! Provides commands for assessing text, listing support resources,
//! reviewing recorded incidents, and inspecting configuration.

use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::adapters::{IncidentRecorder, JsonlIncidentRecorder, KeywordSentimentSignal};
use crate::config;
use crate::core::{
    immediate_actions, recommended_resources, CrisisAssessor, CrisisManagementService,
};
use crate::domain::{CrisisAssessment, MoodContext, RiskLevel, UserHistory};

/// crisisguard - Crisis risk assessment for mood-journal text
#[derive(Parser, Debug)]
#[command(name = "crisisguard")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Assess a piece of text for crisis risk
    Assess(AssessArgs),

    /// List support resources and actions for a risk level
    Resources {
        /// Risk level (minimal, low, medium, high, critical, imminent)
        #[arg(short, long)]
        level: RiskLevel,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// List recorded crisis incidents, newest first
    Incidents {
        /// Maximum number of incidents to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Show resolved configuration (debug)
    Config,
}

#[derive(clap::Args, Debug)]
pub struct AssessArgs {
    /// Text to assess (reads --input or stdin if omitted)
    pub text: Option<String>,

    /// Input file
    #[arg(short, long, conflicts_with = "text")]
    pub input: Option<PathBuf>,

    /// Self-reported mood on a 1-10 scale
    #[arg(long)]
    pub mood_score: Option<f64>,

    /// Emotion tag for the entry (repeatable)
    #[arg(long = "emotion")]
    pub emotions: Vec<String>,

    /// Mood has been declining recently
    #[arg(long)]
    pub recent_decline: bool,

    #[arg(long, default_value = "0")]
    pub previous_attempts: u32,

    #[arg(long, default_value = "0")]
    pub previous_incidents: u32,

    #[arg(long, default_value = "0")]
    pub incidents_last_month: u32,

    #[arg(long)]
    pub recent_loss: bool,

    #[arg(long)]
    pub substance_history: bool,

    /// Also consult the lexicon sentiment signal
    #[arg(long)]
    pub signal: bool,

    /// Print the full result as JSON
    #[arg(long)]
    pub json: bool,

    /// Record an incident in the incident log when warranted
    #[arg(long, requires = "user_id")]
    pub record: bool,

    /// User the entry belongs to (with --record)
    #[arg(long)]
    pub user_id: Option<i64>,

    /// Mood entry the text came from (with --record)
    #[arg(long)]
    pub mood_entry_id: Option<i64>,
}

impl AssessArgs {
    fn context(&self) -> Option<MoodContext> {
        if self.mood_score.is_none() && self.emotions.is_empty() && !self.recent_decline {
            return None;
        }
        Some(MoodContext {
            mood_score: self.mood_score,
            emotions: self.emotions.clone(),
            recent_mood_decline: self.recent_decline,
        })
    }

    fn history(&self) -> Option<UserHistory> {
        let history = UserHistory {
            previous_attempts: self.previous_attempts,
            previous_crisis_incidents: self.previous_incidents,
            crisis_incidents_last_month: self.incidents_last_month,
            recent_major_loss: self.recent_loss,
            substance_abuse_history: self.substance_history,
        };
        (history != UserHistory::default()).then_some(history)
    }
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Assess(args) => assess(args).await,
            Commands::Resources { level, json } => show_resources(level, json),
            Commands::Incidents { limit } => list_incidents(limit).await,
            Commands::Config => show_config(),
        }
    }
}

fn read_input(text: Option<String>, input_file: Option<PathBuf>) -> Result<String> {
    if let Some(text) = text {
        Ok(text)
    } else if let Some(path) = input_file {
        std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read input file: {}", path.display()))
    } else if !io::stdin().is_terminal() {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read from stdin")?;
        Ok(buffer)
    } else {
        anyhow::bail!("No input provided. Pass TEXT, use --input <file>, or pipe to stdin");
    }
}

/// Assess text and print the result
async fn assess(args: AssessArgs) -> Result<()> {
    let context = args.context();
    let history = args.history();
    let text = read_input(args.text.clone(), args.input.clone())?;

    let settings = config::assessor_settings()?;
    let assessor = Arc::new(CrisisAssessor::with_settings(settings)?);

    if args.record {
        let user_id = args
            .user_id
            .context("--record requires --user-id")?;
        let cfg = config::config()?;
        let recorder = Arc::new(JsonlIncidentRecorder::new(&cfg.incidents.log_path));

        let mut service = CrisisManagementService::new(assessor, recorder)
            .with_min_level(cfg.incidents.min_level);
        if args.signal {
            service = service.with_signal(Arc::new(KeywordSentimentSignal::new()));
        }

        let response = service
            .handle(
                &text,
                user_id,
                args.mood_entry_id,
                context.as_ref(),
                history.as_ref(),
            )
            .await;

        if args.json {
            println!("{}", serde_json::to_string_pretty(&response)?);
        } else {
            let level = response
                .assessment
                .risk_level
                .map(|l| l.to_string())
                .unwrap_or_else(|| "unknown".to_string());
            println!("Risk level: {} (score {:.3})", level, response.assessment.risk_score);
            for action in &response.assessment.immediate_actions {
                println!("  - {}", action);
            }
            match response.incident_id {
                Some(id) => eprintln!("\n[Incident {} recorded]", id),
                None if response.recording_failed => {
                    eprintln!("\n[Incident could not be recorded, see logs]")
                }
                None => {}
            }
        }
        return Ok(());
    }

    let assessment = if args.signal {
        assessor
            .assess_with_signal(
                &text,
                context.as_ref(),
                history.as_ref(),
                &KeywordSentimentSignal::new(),
            )
            .await
    } else {
        assessor.assess(&text, context.as_ref(), history.as_ref())
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&assessment)?);
    } else {
        print_assessment(&assessment);
    }

    Ok(())
}

fn print_assessment(assessment: &CrisisAssessment) {
    let meta = &assessment.assessment_metadata;

    println!("Risk level:   {}", assessment.risk_level);
    println!("Risk score:   {:.3}", assessment.risk_score);
    println!("Intervention: {}", assessment.intervention_type);
    if let Some(error) = &meta.error {
        println!("Error:        {}", error);
    }
    if let Some(notice) = &meta.notice {
        println!("Notice:       {}", notice);
    }

    if !assessment.crisis_indicators.is_empty() {
        println!();
        println!("{:<45} {:>8} {:>10} {:<10}", "INDICATOR", "SEVERITY", "CONFIDENCE", "URGENCY");
        println!("{}", "-".repeat(76));
        for ind in &assessment.crisis_indicators {
            println!(
                "{:<45} {:>8.2} {:>10.2} {:<10}",
                ind.category, ind.severity, ind.confidence, ind.urgency_level
            );
        }
    }

    if !assessment.protective_factors.is_empty() {
        println!();
        println!("Protective factors:");
        for factor in &assessment.protective_factors {
            println!("  {}", factor);
        }
    }

    if !assessment.risk_factors.is_empty() {
        println!();
        println!("Risk factors:");
        for factor in &assessment.risk_factors {
            println!("  {}", factor);
        }
    }

    println!();
    println!("Immediate actions:");
    for action in &assessment.immediate_actions {
        println!("  - {}", action);
    }

    println!();
    println!("Resources:");
    for resource in &assessment.resources_recommended {
        println!("  {} - {} ({})", resource.name, resource.contact, resource.availability);
    }

    if meta.requires_human_review {
        eprintln!("\n[Flagged for human review]");
    }
}

/// Print actions and resources for a level
fn show_resources(level: RiskLevel, json: bool) -> Result<()> {
    let actions = immediate_actions(level);
    let resources = recommended_resources(level);

    if json {
        let body = serde_json::json!({
            "risk_level": level,
            "intervention_type": level.intervention(),
            "immediate_actions": actions,
            "resources": resources,
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    println!("Level: {} (intervention: {})", level, level.intervention());
    println!();
    println!("Immediate actions:");
    for action in actions {
        println!("  - {}", action);
    }
    println!();
    println!("Resources:");
    for resource in resources {
        println!("  {:<32} {:<30} {}", resource.name, resource.contact, resource.description);
    }

    Ok(())
}

/// List recorded incidents
async fn list_incidents(limit: usize) -> Result<()> {
    let recorder = JsonlIncidentRecorder::from_config()?;
    let incidents = recorder
        .recent(Some(limit))
        .await
        .with_context(|| format!("Failed to read incident log: {}", recorder.path().display()))?;

    if incidents.is_empty() {
        println!("No incidents recorded");
        return Ok(());
    }

    println!(
        "{:<38} {:<8} {:<10} {:>6} {:<26}",
        "INCIDENT ID", "USER", "LEVEL", "SCORE", "RECORDED"
    );
    println!("{}", "-".repeat(92));

    for incident in incidents {
        println!(
            "{:<38} {:<8} {:<10} {:>6.3} {:<26}",
            incident.id,
            incident.user_id,
            incident.risk_level,
            incident.risk_score,
            incident.recorded_at.to_rfc3339()
        );
    }

    Ok(())
}

/// Show the resolved configuration (for debugging)
fn show_config() -> Result<()> {
    let cfg = config::config()?;

    println!("crisisguard configuration");
    println!();
    println!(
        "Config file: {}",
        cfg.config_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none - using defaults)".to_string())
    );
    println!();
    println!("Paths:");
    println!("  Home:         {}", cfg.home.display());
    println!("  Incident log: {}", cfg.incidents.log_path.display());
    println!();
    println!("Assessment:");
    println!("  Negation window:        {} chars", cfg.assessment.negation_window_chars);
    println!("  Human review threshold: {}", cfg.assessment.human_review_threshold);
    println!(
        "  Late-night window:      {:02}:00-{:02}:00",
        cfg.assessment.late_night_start_hour, cfg.assessment.late_night_end_hour
    );
    println!("  Max text size:          {} bytes", cfg.assessment.max_text_bytes);
    println!();
    println!("Incidents:");
    println!("  Minimum level recorded: {}", cfg.incidents.min_level);

    Ok(())
}
