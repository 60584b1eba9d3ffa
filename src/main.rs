mod app;
use vocab_app::*;

use app::VocabApp;
use config::{AppConfig, config_path, load_config_from_file};
use database::db::init_database;
use database::store::DatasetStore;

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = load_config_from_file(&config_path()).unwrap_or_else(|e| {
        log::error!("{}. Using default settings.", e);
        AppConfig::default()
    });

    let conn = init_database(&config.database_path).expect("Failed to initialize database");
    let store = DatasetStore::open(conn, &config.storage_key)
        .expect("Failed to load datasets from database");

    log::info!(
        "Using '{}' ({} datasets)",
        config.database_path.display(),
        store.dataset_names().len()
    );

    let controller = StudyController::new(store, &config);
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window_width, config.window_height]),
        ..Default::default()
    };
    eframe::run_native(
        "Vocabulary Trainer",
        options,
        Box::new(|_cc| Ok(Box::new(VocabApp::new(controller)))),
    )
}
