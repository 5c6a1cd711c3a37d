//! tonegen: writes one sine tone per note into the sounds directory

use std::process::ExitCode;
use tonecore::{synth, Settings};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = Settings::load();
    match synth::generate_all(&settings.sounds_dir) {
        Ok(written) => {
            log::info!("{} tones written to {}", written.len(), settings.sounds_dir.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("tone generation failed: {e}");
            ExitCode::FAILURE
        }
    }
}
