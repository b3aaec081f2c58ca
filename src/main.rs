mod backend;
mod frontend;
mod utils;

use crate::backend::firebase::{FirestoreStore, GoogleAuth};
use crate::backend::utils::config::FirebaseConfig;
use crate::frontend::app::App;
use crate::frontend::services::context::Backend;
use dioxus::LaunchBuilder;
use dioxus_desktop::{Config, LogicalSize, WindowBuilder};
use std::sync::Arc;

fn main() {
    // Logging setup
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = match FirebaseConfig::load() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Failed to load configuration: {e:#}");
            std::process::exit(1);
        }
    };

    let backend = Backend {
        identity: Arc::new(GoogleAuth::new(&config)),
        store: Arc::new(FirestoreStore::from_config(&config)),
    };

    let size = LogicalSize::new(720.0, 640.0);
    let window = Config::default()
        .with_window(
            WindowBuilder::new()
                .with_title("Dream Enter")
                .with_inner_size(size)
                .with_min_inner_size(size),
        )
        .with_menu(None);

    LaunchBuilder::new()
        .with_cfg(window)
        .with_context(backend)
        .launch(App);
}
