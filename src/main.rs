use pitch_uploader::app::PitchUploader;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

fn main() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("tracing subscriber already installed");
    }

    info!("starting pitch analyzer uploader v{}", env!("CARGO_PKG_VERSION"));

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([520.0, 560.0])
            .with_min_inner_size([420.0, 480.0]),
        ..Default::default()
    };

    let _ = eframe::run_native(
        "Pitch Analyzer Uploader",
        options,
        Box::new(|cc| Box::new(PitchUploader::new(cc))),
    );
}
