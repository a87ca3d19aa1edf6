//! Command-line interface
//!
//! - `serve`: run the HTTP gateway
//! - `classify`: classify and route a prompt without calling a model
//! - `models`: print the model registry

pub mod classify;
pub mod models;
pub mod serve;

use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::domain::classification::ClassifierMode;

/// PMP LLM Router - complexity-based model routing
#[derive(Parser)]
#[command(name = "pmp-llm-router")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP gateway
    Serve,

    /// Classify and route a prompt, printing the decision as JSON
    Classify(classify::ClassifyArgs),

    /// Print the available models as JSON
    Models,
}

/// Load `.env` and the layered configuration
fn load_config() -> anyhow::Result<AppConfig> {
    dotenvy::dotenv().ok();
    Ok(AppConfig::load()?)
}

/// Parse a classifier mode from the command line
fn parse_mode(value: &str) -> Result<ClassifierMode, String> {
    value.parse::<ClassifierMode>().map_err(|e| e.to_string())
}
