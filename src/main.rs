//! GlideWall: fullscreen gallery overlay viewer.
//! Built with Rust + egui (eframe)

use std::path::PathBuf;

use eframe::egui;
use tracing::info;
use tracing_subscriber::EnvFilter;

use glidewall::app::GalleryApp;
use glidewall::config::Config;
use glidewall::loader;
use glidewall::navigator::ImageSequence;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("glidewall=info")),
        )
        .init();

    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();
    let gallery_dir = if args.len() > 1 {
        PathBuf::from(&args[1])
    } else {
        PathBuf::from(".")
    };

    let config = Config::load();

    // The sequence is derived exactly once; the viewer never rescans.
    let images = loader::scan_gallery(&gallery_dir);
    info!(
        count = images.len(),
        dir = %gallery_dir.display(),
        "gallery scanned"
    );
    let sequence = ImageSequence::from_paths(images);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("GlideWall")
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "GlideWall",
        options,
        Box::new(move |cc| Ok(Box::new(GalleryApp::new(cc, config, sequence)))),
    )
}
