//! Echo Pulse entry point
//!
//! Browser embedders drive the game through the library API (frame driver +
//! renderer sink). The native binary runs a headless autopiloted session,
//! useful for exercising the full loop and eyeballing balance from logs.

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use glam::Vec2;

    use echo_pulse::frame::{FrameDriver, NullRenderer};
    use echo_pulse::platform;
    use echo_pulse::sim::{GamePhase, GameState, TickInput};
    use echo_pulse::{BestScore, Settings};

    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Demo stops after this many frames even if the pilot keeps surviving
    const MAX_FRAMES: u64 = 60 * 120;

    /// Demo pilot: kite away from the nearest enemy while firing at it
    fn autopilot(state: &GameState) -> TickInput {
        let player = &state.player;
        let nearest = state.enemies.iter().min_by(|a, b| {
            let da = (a.pos - player.pos).length_squared();
            let db = (b.pos - player.pos).length_squared();
            da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
        });

        let Some(enemy) = nearest else {
            return TickInput::default();
        };

        let to_enemy = enemy.pos - player.pos;
        let dist = to_enemy.length();

        // Back off when crowded, drift back toward center otherwise
        let move_dir = if dist < 200.0 {
            -to_enemy.normalize_or_zero()
        } else {
            let center = Vec2::new(state.width / 2.0, state.height / 2.0);
            (center - player.pos).normalize_or_zero() * 0.3
        };

        TickInput {
            move_dir,
            aim: Some(enemy.pos),
            fire: true,
            echo: dist < 150.0,
            ..Default::default()
        }
    }

    pub fn run() {
        platform::init_logging();

        let seed = platform::wall_clock_ms() as u64;
        let mut state = GameState::new(seed);
        state.settings = Settings::load();
        log::info!("starting headless demo, seed {seed}");
        state.start_game();

        let mut driver = FrameDriver::new();
        let mut renderer = NullRenderer;

        for frame in 0..MAX_FRAMES {
            let input = autopilot(&state);
            driver.frame(&mut state, &input, &mut renderer, frame as f64 * FRAME_MS);
            // Feedback events would drive a real presentation layer
            state.drain_events();
            if state.phase == GamePhase::GameOver {
                break;
            }
        }

        let stats = &state.stats;
        println!(
            "demo over: level {}, score {}, kills {}, accuracy {}%, best streak {}, {:.1}s played",
            stats.level,
            stats.score,
            stats.enemies_killed,
            stats.accuracy,
            stats.best_streak,
            stats.time_played,
        );

        if state.settings.auto_save {
            if let Some(best) = BestScore::record(&state) {
                println!("new best score: {}", best.score);
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    demo::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM embedders call into the library; there is no binary entry point
}
