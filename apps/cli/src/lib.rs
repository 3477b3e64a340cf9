pub mod config;
pub mod terminal;

use std::io;

use anyhow::Context;
use quiz_core::{QuizSettings, Session, SurahCatalog};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;

/// Load the surah catalog named by `config`, or the built-in one.
pub fn load_catalog(config: &Config) -> anyhow::Result<SurahCatalog> {
    match &config.data_path {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("reading verse data from {}", path.display()))?;
            SurahCatalog::from_data(&content)
                .with_context(|| format!("parsing verse data in {}", path.display()))
        }
        None => SurahCatalog::builtin().context("parsing built-in verse data"),
    }
}

pub fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Logs go to stderr; stdout belongs to the quiz.
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = Config::from_env()?;

    tracing::info!("Loading verse data...");
    let catalog = load_catalog(&config)?;
    tracing::info!(surahs = catalog.available_surahs().len(), "Verse data loaded");

    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let settings = QuizSettings {
        option_count: config.option_count,
        ..Default::default()
    };

    let mut session = Session::new(catalog, settings, rng);
    terminal::play(&mut session, io::stdin().lock(), io::stdout().lock(), config.json)
}
