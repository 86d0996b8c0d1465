//! BodyScope: lifestyle questionnaire risk advisor.
//!
//! Command-line entry point.
//!
//! ```text
//! bodyscope assess <answers.json>
//! bodyscope history [limit]
//! bodyscope schema [v1|v2]
//! ```

use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use bodyscope::adapters::sanitize::SanitizingMakeWriter;
use bodyscope::adapters::{LinearRiskModel, SqliteStore};
use bodyscope::application::DISCLAIMER;
use bodyscope::config::{AppConfig, LogMode};
use bodyscope::domain::{SchemaVersion, FEATURE_NAMES};
use bodyscope::ports::SubmissionStore;
use bodyscope::{AdvisoryService, QuestionnaireAnswers};

const USAGE: &str = "usage: bodyscope <assess <answers.json> | history [limit] | schema [v1|v2]>";
const DEFAULT_HISTORY_LIMIT: usize = 10;

fn main() -> Result<()> {
    let config = AppConfig::from_env()?;

    // Logs go to stderr by default so stdout carries only command output.
    let (writer, _guard) = match config.log_mode {
        LogMode::File => {
            if let Some(parent) = config.log_file.parent() {
                // Best-effort: an unwritable directory surfaces when the file is opened.
                let _ = std::fs::create_dir_all(parent);
            }
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&config.log_file)
                .with_context(|| format!("Failed to open log file {:?}", config.log_file))?;
            tracing_appender::non_blocking(file)
        }
        LogMode::Stderr => tracing_appender::non_blocking(std::io::stderr()),
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(SanitizingMakeWriter::new(writer)))
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        Some("assess") => {
            let path = args.get(1).context(USAGE)?;
            assess(&config, Path::new(path))
        }
        Some("history") => {
            let limit = match args.get(1) {
                Some(raw) => raw
                    .parse::<usize>()
                    .with_context(|| format!("Invalid history limit {raw:?}"))?,
                None => DEFAULT_HISTORY_LIMIT,
            };
            history(&config, limit)
        }
        Some("schema") => {
            let schema = match args.get(1) {
                Some(raw) => raw.parse::<SchemaVersion>().map_err(anyhow::Error::msg)?,
                None => SchemaVersion::V2,
            };
            print_schema(schema);
            Ok(())
        }
        _ => bail!(USAGE),
    }
}

fn assess(config: &AppConfig, answers_path: &Path) -> Result<()> {
    let raw = std::fs::read_to_string(answers_path)
        .with_context(|| format!("Failed to read answers {answers_path:?}"))?;
    let answers: QuestionnaireAnswers =
        serde_json::from_str(&raw).context("Answers file is not valid JSON")?;

    let model = LinearRiskModel::load(&config.model_path, config.model_sha256.as_deref())?;
    let store = if config.persist {
        SqliteStore::new(&config.db_path)?
    } else {
        SqliteStore::in_memory()?
    };

    let service = AdvisoryService::new(Arc::new(model), Arc::new(store))?
        .with_persistence(config.persist);
    let assessment = service.assess(&answers)?;

    println!("{} [{}]", assessment.bmi.message, assessment.bmi.severity);
    println!(
        "Obesity risk: {} ({:.1}%)",
        assessment.prediction.risk.description(),
        assessment.prediction.confidence * 100.0
    );
    if let Some(id) = &assessment.submission_id {
        println!("Saved as {id}");
    }
    println!();
    match &assessment.advice {
        Some(advice) => println!("{advice}"),
        None => {
            println!("Advice prompt:");
            println!("{}", assessment.prompt);
        }
    }
    println!();
    println!("{DISCLAIMER}");

    Ok(())
}

fn history(config: &AppConfig, limit: usize) -> Result<()> {
    let store = SqliteStore::new(&config.db_path)?;
    let submissions = store.load_recent_submissions(limit)?;
    let total = store.count_submissions()?;

    println!("Showing {} of {} submissions", submissions.len(), total);
    for s in submissions {
        println!(
            "{}  {}  BMI {:.2} ({})  risk {} ({:.1}%)",
            s.created_at.format("%Y-%m-%d %H:%M"),
            s.id,
            s.bmi.value,
            s.bmi.category,
            s.prediction.risk,
            s.prediction.confidence * 100.0
        );
    }
    Ok(())
}

fn print_schema(schema: SchemaVersion) {
    println!("Schema {schema}");
    for (i, name) in FEATURE_NAMES.iter().enumerate() {
        println!("{i:>2}  {name}");
    }
    match schema {
        SchemaVersion::V1 => {
            println!("Gender: Female=0, Male=1");
            println!("CH2O: 1-3 as answered");
        }
        SchemaVersion::V2 => {
            println!("Gender: Female=0, Male=1, Other=2");
            println!("CH2O: answer minus 1 (0-2)");
        }
    }
}
