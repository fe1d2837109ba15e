use anyhow::{Context, bail};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode, Text};
use weatherview_core::{Config, DateClass};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weatherview", version, about = "Weather lookup by city and date")]
pub struct Cli {
    /// Print debug logs to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the weatherapi.com API key.
    Configure,

    /// Show weather for a city.
    Show {
        /// City name, e.g. "London" or "Paris, Ile-de-France, France".
        city: String,

        /// Date as YYYY-MM-DD; if absent, means today.
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Print the resolved view as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Suggest city names for a partial query.
    Search {
        /// At least four characters.
        query: String,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { city, date, json } => show(&city, date, json).await,
            Command::Search { query } => search(&query).await,
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut cfg = Config::load()?;

    let api_key = Password::new("weatherapi.com API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;
    cfg.set_api_key(&api_key);

    let base_url = Text::new("Base URL (leave empty for default):")
        .with_default(cfg.base_url.as_deref().unwrap_or_default())
        .prompt()
        .context("Failed to read base URL")?;
    cfg.set_base_url(&base_url);

    cfg.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());

    Ok(())
}

async fn show(city: &str, date: Option<NaiveDate>, json: bool) -> anyhow::Result<()> {
    let city = city.trim();
    if city.is_empty() {
        bail!("Please enter a city name");
    }

    let resolver = Config::load()?.resolver()?;
    let view = resolver.resolve(city, date).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        let class = DateClass::classify(resolver.today(), date);
        print!("{}", render::render_view(&view, date, class));
    }

    Ok(())
}

async fn search(query: &str) -> anyhow::Result<()> {
    let resolver = Config::load()?.resolver()?;
    let names = resolver.suggest_cities(query).await;

    if names.is_empty() {
        println!("No cities found");
    }
    for name in names {
        println!("{name}");
    }

    Ok(())
}
