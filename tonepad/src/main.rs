//! tonepad: play, record, mix and draw seven-note sequences

mod app;
mod picker;
mod theme;
mod widgets;

use app::TonePadApp;
use theme::PadTheme;
use tonecore::Settings;

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = Settings::load();
    if !settings.sounds_dir.is_dir() {
        match std::fs::create_dir_all(&settings.sounds_dir) {
            Ok(()) => log::warn!(
                "created {}; run tonegen or add C.wav through B.wav, then start tonepad again",
                settings.sounds_dir.display()
            ),
            Err(e) => log::error!("cannot create {}: {}", settings.sounds_dir.display(), e),
        }
        return Ok(());
    }

    let initial_file = std::env::args().nth(1).map(std::path::PathBuf::from);

    let viewport = egui::ViewportBuilder::default()
        .with_title("Music Production Software with Drawing Canvas")
        .with_inner_size([settings.window_width, settings.window_height])
        .with_min_inner_size([640.0, 480.0])
        .with_drag_and_drop(true);

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "tonepad",
        options,
        Box::new(move |cc| {
            PadTheme::default().apply(&cc.egui_ctx);
            let mut app = TonePadApp::new(cc, &settings);
            if let Some(path) = initial_file {
                app.open_sequence(path);
            }
            Box::new(app)
        }),
    )
}
