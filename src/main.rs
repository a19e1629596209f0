use classifier_client::impl_fake::ClassifierClientFake;
use classifier_client::impl_http::ClassifierClientHttp;
use classifier_client::interface::ClassifierClient;
use classifier_page::main::ClassifierPage;
use clap::Parser;
use config::{Args, Config};
use eframe::egui;
use file_picker::impl_rfd::FilePickerRfd;
use library::logger::impl_console::LoggerConsole;
use library::logger::interface::Logger;
use std::sync::Arc;

mod classifier_client;
mod classifier_page;
mod config;
mod file_picker;
mod image_file;
mod library;
mod preview_store;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::try_from(Args::parse())?;

    let logger: Arc<dyn Logger + Send + Sync> =
        Arc::new(LoggerConsole::new(config.logger_timezone));

    let classifier_client: Arc<dyn ClassifierClient + Send + Sync> = if config.offline {
        let _ = logger.info("Offline mode: using the fake classifier");
        Arc::new(ClassifierClientFake::random(logger.clone()))
    } else {
        let _ = logger.info(&format!("Classifying with {}", config.api_url));
        Arc::new(ClassifierClientHttp::new(&config, logger.clone())?)
    };

    let file_picker = Arc::new(FilePickerRfd::new("Selecciona una imagen"));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Clasificador de edificaciones urbanas")
            .with_inner_size([640.0, 860.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        "Clasificador de edificaciones urbanas",
        options,
        Box::new(move |cc| {
            cc.egui_ctx.set_visuals(egui::Visuals::dark());
            Box::new(ClassifierPage::new(
                cc.egui_ctx.clone(),
                logger,
                classifier_client,
                file_picker,
            ))
        }),
    )
    .map_err(|e| e.to_string())?;

    Ok(())
}
