mod challenges;
mod common;
mod config;
mod history;
mod preferences;
mod storage;
mod tutor;
mod ui;

use std::sync::Arc;

use clap::Parser;
use dotenvy::dotenv;
use tokio::sync::mpsc;

use config::{AppConfig, ResponderMode};
use history::{ConversationStore, SystemClock};
use storage::{LocalStorage, SqliteStorage};
use tutor::{TutorApiClient, TutorWorker};
use ui::TutorApp;
use ui::state::AppState;

#[derive(Parser)]
#[command(
    name = "pytutor",
    version,
    about = "Debugging tutor for novice Python programmers"
)]
struct Cli {
    /// Path to JSON config file
    #[arg(long, default_value = config::DEFAULT_CONFIG_PATH, value_name = "FILE")]
    config: String,
    /// Override the configured responder
    #[arg(long, value_enum)]
    responder: Option<ResponderMode>,
    /// Write the effective configuration to the config path and exit
    #[arg(long)]
    write_config: bool,
}

#[tokio::main]
async fn main() -> Result<(), eframe::Error> {
    dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();
    let mut app_config = config::load_config(&cli.config);
    app_config.apply_env();
    if let Some(responder) = cli.responder {
        app_config.responder = responder;
    }

    if cli.write_config {
        match config::save_config(&cli.config, &app_config) {
            Ok(()) => log::info!("Wrote configuration to {}", cli.config),
            Err(err) => log::error!("Failed to write configuration to {}: {err}", cli.config),
        }
        return Ok(());
    }

    run_client(app_config).await
}

fn open_storage(config: &AppConfig) -> Arc<dyn LocalStorage> {
    if let Err(err) = storage::ensure_data_dir(&config.data_path) {
        log::error!("Failed to create data directory for {}: {err}", config.data_path);
    }

    match SqliteStorage::with_path(&config.data_path) {
        Ok(storage) => {
            describe_storage(&storage, &config.data_path);
            Arc::new(storage)
        }
        Err(err) => {
            log::error!(
                "Failed to open {}: {err}; history will not survive this session",
                config.data_path
            );
            match SqliteStorage::in_memory() {
                Ok(storage) => Arc::new(storage),
                Err(err) => {
                    log::error!("In-memory SQLite unavailable: {err}");
                    Arc::new(storage::MemoryStorage::new())
                }
            }
        }
    }
}

fn describe_storage(db: &SqliteStorage, path: &str) {
    let keys = db.len().unwrap_or_default();
    match db.updated_at(storage::keys::CONVERSATIONS) {
        Ok(Some(saved)) => log::info!(
            "Local storage at {path}: {keys} keys, history last saved {}",
            saved.to_rfc3339()
        ),
        Ok(None) => log::info!("Local storage at {path}: {keys} keys, no saved history"),
        Err(err) => log::warn!("Local storage at {path}: {err}"),
    }
}

async fn run_client(app_config: AppConfig) -> Result<(), eframe::Error> {
    let storage = open_storage(&app_config);
    let store = ConversationStore::open(storage.clone(), Arc::new(SystemClock));
    let responder = tutor::build_responder(&app_config);
    let api = match app_config.responder {
        ResponderMode::Remote => Some(TutorApiClient::from_config(&app_config)),
        ResponderMode::Mock => None,
    };
    let state = AppState::new(
        store,
        storage,
        app_config.default_theme,
        responder.name(),
    );

    // UI -> worker
    let (cmd_tx, cmd_rx) = mpsc::channel(100);
    // worker -> UI
    let (event_tx, event_rx) = mpsc::channel(100);

    tokio::spawn(TutorWorker::new(responder, api, cmd_rx, event_tx).run());

    let options = eframe::NativeOptions::default();
    log::info!(
        "Starting PyTutor (responder: {:?}, api: {})",
        app_config.responder,
        app_config.api_url
    );

    eframe::run_native(
        "PyTutor",
        options,
        Box::new(move |cc| Ok(Box::new(TutorApp::new(cc, state, cmd_tx, event_rx)))),
    )
}
