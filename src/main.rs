//! Genius entry point
//!
//! Native headless build: the auto-player takes the mouse, tones and frames
//! go to the log. Set `RUST_LOG=info` (or `debug`) to follow the game, and
//! `GENIUS_SETTINGS` to a JSON object to override settings.

use genius::Settings;
use genius::audio::{AudioManager, LogOutput};
use genius::platform::{AutoPlayer, GameLoop, LogPresenter, SystemClock};
use genius::sim::GameSession;

fn main() {
    env_logger::init();
    log::info!("Genius (native) starting...");

    let settings = Settings::load();
    if let Ok(json) = settings.to_json() {
        log::debug!("Settings: {}", json);
    }
    let seed = settings.seed.unwrap_or_else(rand::random::<u64>);
    log::info!("Game initialized with seed: {}", seed);

    // Tones are synthesized here, once, and released on shutdown
    let mut audio = AudioManager::new(&settings, Some(Box::new(LogOutput)));
    let mut session = GameSession::new(seed);
    let mut player = AutoPlayer::new(settings.autoplay.clone());
    let mut presenter = LogPresenter::default();

    let mut game_loop = GameLoop::new(SystemClock::new());
    let summary = game_loop.run(&mut session, &mut audio, &mut player, &mut presenter);

    log::info!(
        "Game over: {} round(s) completed, final sequence length {}",
        summary.score,
        summary.sequence_length
    );
    audio.shutdown();
}
