mod config;
mod report;
mod services;
mod store;

use crate::config::Config;
use crate::store::Store;
use actix_web::{web, App, HttpServer};
use env_logger::Env;
use log::{error, info};
use std::thread;
use std::time::Duration;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = Config::load().map_err(|e| {
        error!("{}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;
    let store = Store::open(&config.storage.db_path).map_err(|e| {
        error!("Cannot open {}: {}", config.storage.db_path.display(), e);
        std::io::Error::other(e.to_string())
    })?;

    let url = config.url();
    if config.server.open_browser {
        let url = url.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(500));
            if let Err(e) = webbrowser::open(&url) {
                info!("Could not open a browser: {}", e);
            }
        });
    }

    info!(
        "Server running at {} (database {})",
        url,
        config.storage.db_path.display()
    );

    let body_limit = config.server.json_limit_mb * 1024 * 1024;
    let store = web::Data::new(store);
    let report_config = web::Data::new(config.report.clone());

    HttpServer::new(move || {
        App::new()
            .app_data(web::JsonConfig::default().limit(body_limit))
            .app_data(web::PayloadConfig::new(body_limit))
            .app_data(store.clone())
            .app_data(report_config.clone())
            .configure(services::configure)
    })
    .bind((config.server.host.as_str(), config.server.port))?
    .run()
    .await
}
