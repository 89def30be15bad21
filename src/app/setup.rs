//! Application setup and initialization.
//!
//! Opens the database, picks the alias backend and builds the bot from settings.

use std::path::PathBuf;
use std::sync::Arc;

use crate::aliases::{AliasStore, FileAliasStore};
use crate::commands::{Bot, FactSource, FileFactSource};
use crate::session::BotSession;
use crate::turso::{self, TursoClient};
use crate::util::Settings;

/// Default fact file name inside the data directory
const FACTS_FILE_NAME: &str = "facts.txt";

/// Everything the running bot needs, built once at startup
pub struct Services {
    pub bot: Arc<Bot>,
    pub turso: Arc<TursoClient>,
    pub session: Arc<BotSession>,
}

/// Main application setup function.
///
/// Initializes the database and schema, then wires the alias store, fact
/// source and session into a `Bot`.
pub async fn setup(settings: &Settings) -> Result<Services, Box<dyn std::error::Error>> {
    crate::info!("Setting up silva...");

    let data_dir = settings.resolved_database_dir();
    let turso = setup_turso_database(data_dir.clone()).await?;

    let store: Arc<dyn AliasStore> = match &settings.alias_file {
        Some(path) => {
            crate::info!("Using alias file at {:?}", path);
            Arc::new(FileAliasStore::open(path.clone())?)
        }
        None => turso.clone(),
    };

    let facts_path = settings
        .facts_path
        .clone()
        .unwrap_or_else(|| data_dir.join(FACTS_FILE_NAME));
    crate::debug!("Reading facts from {:?}", facts_path);
    let facts: Arc<dyn FactSource> = Arc::new(FileFactSource::new(facts_path, settings.rng_seed));

    let session = Arc::new(BotSession::from_settings(settings));
    let bot = Arc::new(Bot::new(
        store,
        facts,
        session.clone(),
        settings.command_prefix.clone(),
        settings.rng_seed,
    ));

    crate::info!("Silva is ready (prefix \"{}\")", settings.command_prefix);
    Ok(Services {
        bot,
        turso,
        session,
    })
}

/// Initialize Turso/libsql embedded database client.
async fn setup_turso_database(
    data_dir: PathBuf,
) -> Result<Arc<TursoClient>, Box<dyn std::error::Error>> {
    let client = TursoClient::new(data_dir).await?;
    crate::info!("Database initialized at: {:?}", client.db_path());

    if let Err(e) = turso::initialize_schema(&client).await {
        crate::error!("Failed to initialize schema: {}", e);
        return Err(format!("Schema initialization failed: {}", e).into());
    }
    crate::debug!("Database schema initialized");

    Ok(Arc::new(client))
}
